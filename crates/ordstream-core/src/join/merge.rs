use crate::{
    config::{AnchorPolicy, JoinConfig},
    error::{StreamError, StreamSide},
    group::run::{RunPolicy, RunStep, extend_run},
    join::JoinOutcome,
    obs::{EngineKind, JoinStats, TraceEvent, TraceScope, TraceSink, debug_log},
    stream::{KeyOrderComparator, OrderedSource, PeekableSource},
};
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum JoinState {
    Advancing,
    Done,
    Failed,
}

///
/// SortMergeJoin
///
/// Single-pass join of two sources pre-sorted by the same key.
///
/// The left side is the anchor side: each left record is emitted once, either
/// alone or together with the consecutive run of right records sharing its
/// key. Only the current lookahead of each side and the right run being
/// collected are held in memory.
///
/// Each `next_outcome` call yields at most one outcome. After `None` the
/// join stays exhausted; after an error every later call returns
/// `EngineFailed`.
///

pub struct SortMergeJoin<LS, RS, FL, FR, K>
where
    LS: OrderedSource,
    RS: OrderedSource,
{
    left: PeekableSource<LS>,
    right: PeekableSource<RS>,
    left_key: FL,
    right_key: FR,
    config: JoinConfig,
    comparator: KeyOrderComparator,
    state: JoinState,
    last_left_key: Option<K>,
    last_right_key: Option<K>,
    deferred: Option<StreamError>,
    stats: JoinStats,
    trace: TraceScope,
}

impl<LS, RS, FL, FR, K> SortMergeJoin<LS, RS, FL, FR, K>
where
    LS: OrderedSource,
    RS: OrderedSource,
    FL: Fn(&LS::Item) -> K,
    FR: Fn(&RS::Item) -> K,
    K: Ord,
{
    #[must_use]
    pub const fn new(left: LS, right: RS, left_key: FL, right_key: FR) -> Self {
        Self::with_config(left, right, left_key, right_key, JoinConfig::new())
    }

    #[must_use]
    pub const fn with_config(
        left: LS,
        right: RS,
        left_key: FL,
        right_key: FR,
        config: JoinConfig,
    ) -> Self {
        Self {
            left: PeekableSource::for_side(left, StreamSide::Left),
            right: PeekableSource::for_side(right, StreamSide::Right),
            left_key,
            right_key,
            comparator: KeyOrderComparator::from_direction(config.direction()),
            config,
            state: JoinState::Advancing,
            last_left_key: None,
            last_right_key: None,
            deferred: None,
            stats: JoinStats::new(),
            trace: TraceScope::new(EngineKind::MergeJoin),
        }
    }

    #[must_use]
    pub const fn with_trace(mut self, sink: &'static dyn TraceSink) -> Self {
        self.trace = self.trace.with_sink(sink);
        self
    }

    #[must_use]
    pub const fn config(&self) -> JoinConfig {
        self.config
    }

    #[must_use]
    pub const fn stats(&self) -> JoinStats {
        self.stats
    }

    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self.state, JoinState::Done)
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self.state, JoinState::Failed)
    }

    /// Advance the join by one outcome, or `None` once both sides are
    /// exhausted.
    pub fn next_outcome(
        &mut self,
    ) -> Result<Option<JoinOutcome<LS::Item, RS::Item>>, StreamError> {
        match self.state {
            JoinState::Advancing => {}
            JoinState::Done => return Ok(None),
            JoinState::Failed => {
                return Err(StreamError::EngineFailed {
                    engine: EngineKind::MergeJoin,
                });
            }
        }
        if let Some(err) = self.deferred.take() {
            return Err(self.fail(err));
        }

        match self.step() {
            Ok(Some(outcome)) => {
                let kind = outcome.kind();
                let right_records = outcome.right_len();
                self.stats.record_outcome(kind, right_records);
                self.trace.emit(TraceEvent::OutcomeEmitted {
                    kind,
                    right_records,
                });
                debug_log(
                    self.config.debug(),
                    EngineKind::MergeJoin,
                    format!("emitted {kind} with {right_records} right records"),
                );

                Ok(Some(outcome))
            }
            Ok(None) => {
                self.state = JoinState::Done;
                self.trace.exhausted(self.stats.outcomes());
                debug_log(
                    self.config.debug(),
                    EngineKind::MergeJoin,
                    format!(
                        "exhausted: matched={} left_only={} right_only={}",
                        self.stats.matched(),
                        self.stats.left_only(),
                        self.stats.right_only()
                    ),
                );

                Ok(None)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    // One merge decision over the two lookahead records.
    fn step(&mut self) -> Result<Option<JoinOutcome<LS::Item, RS::Item>>, StreamError> {
        let left_key = match self.left.peek()? {
            Some(record) => Some((self.left_key)(record)),
            None => None,
        };
        let right_key = match self.right.peek()? {
            Some(record) => Some((self.right_key)(record)),
            None => None,
        };
        if let Some(key) = &left_key {
            self.check_left(key)?;
        }
        if let Some(key) = &right_key {
            self.check_right(key)?;
        }

        let outcome = match (left_key, right_key) {
            (None, None) => return Ok(None),
            (Some(left_key), None) => self.take_left_only(left_key)?,
            (None, Some(right_key)) => self.take_right_only(right_key)?,
            (Some(left_key), Some(right_key)) => {
                match self.comparator.compare(&left_key, &right_key) {
                    Ordering::Less => self.take_left_only(left_key)?,
                    Ordering::Greater => self.take_right_only(right_key)?,
                    Ordering::Equal => self.take_matched(left_key)?,
                }
            }
        };

        Ok(Some(outcome))
    }

    fn check_left(&self, key: &K) -> Result<(), StreamError> {
        let Some(last) = &self.last_left_key else {
            return Ok(());
        };
        let natural = last.cmp(key);
        let offset = lookahead_offset(&self.left);

        if self.config.order_check() && self.comparator.violates_monotonicity(natural) {
            return Err(StreamError::OutOfOrderInput {
                side: StreamSide::Left,
                offset,
                direction: self.comparator.direction(),
            });
        }
        if natural.is_eq() && matches!(self.config.anchor_policy(), AnchorPolicy::Reject) {
            return Err(StreamError::DuplicateAnchorKey { offset });
        }

        Ok(())
    }

    fn check_right(&self, key: &K) -> Result<(), StreamError> {
        let Some(last) = &self.last_right_key else {
            return Ok(());
        };

        if self.config.order_check() && self.comparator.violates_monotonicity(last.cmp(key)) {
            return Err(StreamError::OutOfOrderInput {
                side: StreamSide::Right,
                offset: lookahead_offset(&self.right),
                direction: self.comparator.direction(),
            });
        }

        Ok(())
    }

    fn take_left_only(
        &mut self,
        key: K,
    ) -> Result<JoinOutcome<LS::Item, RS::Item>, StreamError> {
        let Some(left) = self.left.next_record()? else {
            return Err(StreamError::invariant("left lookahead vanished before consume"));
        };
        self.last_left_key = Some(key);

        Ok(JoinOutcome::LeftOnly(left))
    }

    fn take_right_only(
        &mut self,
        key: K,
    ) -> Result<JoinOutcome<LS::Item, RS::Item>, StreamError> {
        let Some(right) = self.right.next_record()? else {
            return Err(StreamError::invariant("right lookahead vanished before consume"));
        };
        self.last_right_key = Some(key);

        Ok(JoinOutcome::RightOnly(right))
    }

    // Attach the whole same-key right run to the current anchor.
    fn take_matched(&mut self, key: K) -> Result<JoinOutcome<LS::Item, RS::Item>, StreamError> {
        let policy = RunPolicy::new(
            self.config.max_run_len(),
            self.config.lookahead_failure(),
            self.config.direction(),
            "right run records",
        );
        policy.check_accept(&self.right, 0)?;

        let Some(left) = self.left.next_record()? else {
            return Err(StreamError::invariant("left lookahead vanished before consume"));
        };
        let Some(first) = self.right.next_record()? else {
            return Err(StreamError::invariant("right lookahead vanished before consume"));
        };

        let mut run = vec![first];
        let right_key = &self.right_key;
        self.deferred = extend_run(&mut self.right, &mut run, policy, |_, next| {
            if right_key(next) == key {
                RunStep::Extend
            } else {
                RunStep::Break
            }
        })?;

        // Keys are equal across the match; the right side keeps its own copy.
        self.last_right_key = Some((self.right_key)(&run[0]));
        self.last_left_key = Some(key);

        Ok(JoinOutcome::Matched { left, right: run })
    }

    fn fail(&mut self, err: StreamError) -> StreamError {
        self.state = JoinState::Failed;
        self.trace.failed(&err);
        debug_log(
            self.config.debug(),
            EngineKind::MergeJoin,
            format!("failed: {}", err.display_with_class()),
        );

        err
    }
}

impl<LS, RS, FL, FR, K> Iterator for SortMergeJoin<LS, RS, FL, FR, K>
where
    LS: OrderedSource,
    RS: OrderedSource,
    FL: Fn(&LS::Item) -> K,
    FR: Fn(&RS::Item) -> K,
    K: Ord,
{
    type Item = Result<JoinOutcome<LS::Item, RS::Item>, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_failed() {
            return None;
        }

        self.next_outcome().transpose()
    }
}

fn lookahead_offset<S: OrderedSource>(source: &PeekableSource<S>) -> u64 {
    source
        .lookahead_offset()
        .unwrap_or(source.records_read())
}
