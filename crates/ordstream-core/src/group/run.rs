//! Module: group::run
//! Responsibility: maximal-run collection over one peekable source.
//! Does not own: group construction, join outcome policy.
//! Boundary: shared by `GroupingReader` and the many-side run of
//! `SortMergeJoin`.

use crate::{
    config::{Direction, LookaheadFailure},
    error::StreamError,
    stream::{OrderedSource, PeekableSource},
};

///
/// RunStep
///
/// Verdict on the lookahead record relative to the last accepted one.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum RunStep {
    Extend,
    Break,
    OutOfOrder,
}

///
/// RunPolicy
///

#[derive(Clone, Copy, Debug)]
pub(crate) struct RunPolicy {
    max_len: Option<u64>,
    lookahead_failure: LookaheadFailure,
    direction: Direction,
    resource: &'static str,
}

impl RunPolicy {
    pub(crate) const fn new(
        max_len: Option<u64>,
        lookahead_failure: LookaheadFailure,
        direction: Direction,
        resource: &'static str,
    ) -> Self {
        Self {
            max_len,
            lookahead_failure,
            direction,
            resource,
        }
    }

    /// Fail when accepting one more record into a run of `current_len`
    /// would exceed the configured limit.
    pub(crate) fn check_accept<S: OrderedSource>(
        self,
        source: &PeekableSource<S>,
        current_len: usize,
    ) -> Result<(), StreamError> {
        let Some(limit) = self.max_len else {
            return Ok(());
        };
        let attempted = u64::try_from(current_len)
            .unwrap_or(u64::MAX)
            .saturating_add(1);
        if attempted > limit {
            return Err(StreamError::GroupLimitExceeded {
                side: source.side(),
                resource: self.resource,
                attempted,
                limit,
            });
        }

        Ok(())
    }
}

/// Extend a non-empty run with every following record `step` accepts.
///
/// Returns `Err` for failures that abort the run. Returns `Ok(Some(err))`
/// when the run closed cleanly but the record after it is unusable (a read
/// failure under `LookaheadFailure::CloseRun`, or a key decrease); the caller
/// raises that error on its next pull.
pub(crate) fn extend_run<S, F>(
    source: &mut PeekableSource<S>,
    run: &mut Vec<S::Item>,
    policy: RunPolicy,
    mut step: F,
) -> Result<Option<StreamError>, StreamError>
where
    S: OrderedSource,
    F: FnMut(&S::Item, &S::Item) -> RunStep,
{
    loop {
        let Some(last) = run.last() else {
            return Err(StreamError::invariant("run extension requires a seed record"));
        };
        let admit = policy.check_accept(source, run.len());
        let mut verdict = RunStep::Break;

        let taken = source.next_if(|next| {
            verdict = step(last, next);
            verdict == RunStep::Extend && admit.is_ok()
        });
        let taken = match taken {
            Ok(taken) => taken,
            Err(err) => {
                return match policy.lookahead_failure {
                    LookaheadFailure::CloseRun => Ok(Some(err)),
                    LookaheadFailure::Abort => Err(err),
                };
            }
        };

        match (taken, verdict) {
            (Some(record), _) => run.push(record),
            (None, RunStep::Extend) => return admit.map(|()| None),
            (None, RunStep::Break) => return Ok(None),
            (None, RunStep::OutOfOrder) => {
                return Ok(Some(StreamError::OutOfOrderInput {
                    side: source.side(),
                    offset: source.lookahead_offset().unwrap_or(source.records_read()),
                    direction: policy.direction,
                }));
            }
        }
    }
}
