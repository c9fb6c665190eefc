use crate::{
    config::GroupConfig,
    error::StreamError,
    group::{
        BreakFn, BreakKeyStrategy, Group, KeyBreak, OrderedKeyBreak,
        run::{RunPolicy, RunStep, extend_run},
    },
    obs::{EngineKind, GroupingStats, TraceEvent, TraceScope, TraceSink, debug_log},
    stream::{KeyOrderComparator, OrderedSource, PeekableSource},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ReaderState {
    Open,
    Done,
    Failed,
}

///
/// GroupingReader
///
/// Control-break reader: pulls one maximal run of same-group records per
/// call from a single ordered source.
///
/// Group boundaries come only from the `BreakKeyStrategy`, never from counts.
/// After `None` the reader stays exhausted; after an error it is failed and
/// every later call returns `EngineFailed`.
///

pub struct GroupingReader<S, B>
where
    S: OrderedSource,
{
    source: PeekableSource<S>,
    strategy: B,
    config: GroupConfig,
    comparator: KeyOrderComparator,
    state: ReaderState,
    deferred: Option<StreamError>,
    stats: GroupingStats,
    trace: TraceScope,
}

impl<S, B> GroupingReader<S, B>
where
    S: OrderedSource,
    B: BreakKeyStrategy<S::Item>,
{
    #[must_use]
    pub const fn new(source: S, strategy: B) -> Self {
        Self::with_config(source, strategy, GroupConfig::new())
    }

    #[must_use]
    pub const fn with_config(source: S, strategy: B, config: GroupConfig) -> Self {
        Self::from_peekable(PeekableSource::new(source), strategy, config)
    }

    /// Build over an existing lookahead wrapper, keeping whatever it has
    /// already buffered.
    #[must_use]
    pub const fn from_peekable(
        source: PeekableSource<S>,
        strategy: B,
        config: GroupConfig,
    ) -> Self {
        Self {
            source,
            strategy,
            comparator: KeyOrderComparator::from_direction(config.direction()),
            config,
            state: ReaderState::Open,
            deferred: None,
            stats: GroupingStats::new(),
            trace: TraceScope::new(EngineKind::Grouping),
        }
    }

    #[must_use]
    pub const fn with_trace(mut self, sink: &'static dyn TraceSink) -> Self {
        self.trace = self.trace.with_sink(sink);
        self
    }

    #[must_use]
    pub const fn config(&self) -> GroupConfig {
        self.config
    }

    #[must_use]
    pub const fn stats(&self) -> GroupingStats {
        self.stats
    }

    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self.state, ReaderState::Done)
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self.state, ReaderState::Failed)
    }

    /// Pull the next group, or `None` once the source is exhausted.
    pub fn next_group(&mut self) -> Result<Option<Group<S::Item>>, StreamError> {
        match self.state {
            ReaderState::Open => {}
            ReaderState::Done => return Ok(None),
            ReaderState::Failed => {
                return Err(StreamError::EngineFailed {
                    engine: EngineKind::Grouping,
                });
            }
        }
        if let Some(err) = self.deferred.take() {
            return Err(self.fail(err));
        }

        match self.collect_group() {
            Ok(Some(group)) => {
                let len = group.len_u64();
                self.stats.record_group(len);
                self.trace.emit(TraceEvent::GroupEmitted { records: len });
                debug_log(
                    self.config.debug(),
                    EngineKind::Grouping,
                    format!("group #{} closed with {len} records", self.stats.groups()),
                );

                Ok(Some(group))
            }
            Ok(None) => {
                self.state = ReaderState::Done;
                self.trace.exhausted(self.stats.groups());
                debug_log(
                    self.config.debug(),
                    EngineKind::Grouping,
                    format!(
                        "exhausted after {} groups / {} records",
                        self.stats.groups(),
                        self.stats.records()
                    ),
                );

                Ok(None)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Drive the reader to exhaustion, folding every group into `init`.
    pub fn fold_groups<A, F>(&mut self, init: A, mut fold: F) -> Result<A, StreamError>
    where
        F: FnMut(A, Group<S::Item>) -> A,
    {
        let mut acc = init;
        while let Some(group) = self.next_group()? {
            acc = fold(acc, group);
        }

        Ok(acc)
    }

    /// Release the reader, returning the lookahead wrapper with any record it
    /// still buffers.
    #[must_use]
    pub fn into_source(self) -> PeekableSource<S> {
        self.source
    }

    fn collect_group(&mut self) -> Result<Option<Group<S::Item>>, StreamError> {
        if self.source.peek()?.is_none() {
            return Ok(None);
        }

        let policy = RunPolicy::new(
            self.config.max_group_len(),
            self.config.lookahead_failure(),
            self.config.direction(),
            "group records",
        );
        policy.check_accept(&self.source, 0)?;
        let Some(first) = self.source.next_record()? else {
            return Err(StreamError::invariant("peeked record vanished before consume"));
        };

        let mut records = vec![first];
        let strategy = &self.strategy;
        let comparator = self.comparator;
        let order_check = self.config.order_check();
        self.deferred = extend_run(&mut self.source, &mut records, policy, |last, next| {
            if strategy.is_same_group(last, next) {
                RunStep::Extend
            } else if order_check
                && strategy
                    .key_order(last, next)
                    .is_some_and(|natural| comparator.violates_monotonicity(natural))
            {
                RunStep::OutOfOrder
            } else {
                RunStep::Break
            }
        })?;

        Ok(Some(Group::new(records)))
    }

    fn fail(&mut self, err: StreamError) -> StreamError {
        self.state = ReaderState::Failed;
        self.trace.failed(&err);
        debug_log(
            self.config.debug(),
            EngineKind::Grouping,
            format!("failed: {}", err.display_with_class()),
        );

        err
    }
}

impl<S, F, K> GroupingReader<S, KeyBreak<F, K>>
where
    S: OrderedSource,
    F: Fn(&S::Item) -> K,
    K: PartialEq,
{
    /// Group consecutive records whose extracted keys are equal.
    #[must_use]
    pub const fn by_key(source: S, key: F) -> Self {
        Self::new(source, KeyBreak::new(key))
    }
}

impl<S, F, K> GroupingReader<S, OrderedKeyBreak<F, K>>
where
    S: OrderedSource,
    F: Fn(&S::Item) -> K,
    K: Ord,
{
    /// Group consecutive records by an ordered key, failing on a key
    /// decrease at a group boundary when order checking is enabled.
    #[must_use]
    pub const fn by_ordered_key(source: S, key: F) -> Self {
        Self::new(source, OrderedKeyBreak::new(key))
    }
}

impl<S, F> GroupingReader<S, BreakFn<F>>
where
    S: OrderedSource,
    F: Fn(&S::Item, &S::Item) -> bool,
{
    /// Group consecutive records for which `same_group(prev, curr)` holds.
    #[must_use]
    pub const fn by_break_fn(source: S, same_group: F) -> Self {
        Self::new(source, BreakFn::new(same_group))
    }
}

impl<S, B> Iterator for GroupingReader<S, B>
where
    S: OrderedSource,
    B: BreakKeyStrategy<S::Item>,
{
    type Item = Result<Group<S::Item>, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_failed() {
            return None;
        }

        self.next_group().transpose()
    }
}
