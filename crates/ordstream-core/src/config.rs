//! Module: config
//! Responsibility: execution policy for grouping and merge-join engines.
//! Does not own: engine state machines or source adapters.
//! Boundary: plain `Copy` policy values that orchestration layers build or
//! deserialize from their own configuration files.

use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(test)]
mod tests;

///
/// Direction
///
/// Sort direction both inputs are expected to follow.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        };
        write!(f, "{label}")
    }
}

///
/// LookaheadFailure
///
/// What a run collector does when reading the record *after* the current run
/// fails.
///
/// `CloseRun` returns the run gathered so far and raises the read failure on
/// the next pull, which is the pull that would have consumed the failing
/// record. `Abort` raises immediately and discards the partial run.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum LookaheadFailure {
    #[default]
    CloseRun,
    Abort,
}

///
/// AnchorPolicy
///
/// Handling of repeated keys on the anchor (left) side of a merge join.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum AnchorPolicy {
    /// The first anchor with a key receives the whole right-hand run; later
    /// anchors with the same key surface as `LeftOnly`.
    #[default]
    FirstMatch,

    /// Anchor keys must be strictly monotonic; a repeat fails the join.
    Reject,
}

///
/// GroupConfig
///
/// Policy for one `GroupingReader` run.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct GroupConfig {
    direction: Direction,
    order_check: bool,
    max_group_len: Option<u64>,
    lookahead_failure: LookaheadFailure,
    debug: bool,
}

impl GroupConfig {
    /// Build the default grouping policy: ascending, order-checked, unbounded.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            direction: Direction::Asc,
            order_check: true,
            max_group_len: None,
            lookahead_failure: LookaheadFailure::CloseRun,
            debug: false,
        }
    }

    #[must_use]
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Toggle key-order validation for strategies that can order records.
    #[must_use]
    pub const fn with_order_check(mut self, enabled: bool) -> Self {
        self.order_check = enabled;
        self
    }

    /// Cap the number of records one group may hold.
    #[must_use]
    pub const fn with_max_group_len(mut self, limit: u64) -> Self {
        self.max_group_len = Some(limit);
        self
    }

    #[must_use]
    pub const fn with_lookahead_failure(mut self, policy: LookaheadFailure) -> Self {
        self.lookahead_failure = policy;
        self
    }

    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub const fn direction(self) -> Direction {
        self.direction
    }

    #[must_use]
    pub const fn order_check(self) -> bool {
        self.order_check
    }

    #[must_use]
    pub const fn max_group_len(self) -> Option<u64> {
        self.max_group_len
    }

    #[must_use]
    pub const fn lookahead_failure(self) -> LookaheadFailure {
        self.lookahead_failure
    }

    #[must_use]
    pub const fn debug(self) -> bool {
        self.debug
    }
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self::new()
    }
}

///
/// JoinConfig
///
/// Policy for one `SortMergeJoin` run.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct JoinConfig {
    direction: Direction,
    order_check: bool,
    anchor_policy: AnchorPolicy,
    max_run_len: Option<u64>,
    lookahead_failure: LookaheadFailure,
    debug: bool,
}

impl JoinConfig {
    /// Build the default join policy: ascending, order-checked, first-match
    /// anchors, unbounded right-hand runs.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            direction: Direction::Asc,
            order_check: true,
            anchor_policy: AnchorPolicy::FirstMatch,
            max_run_len: None,
            lookahead_failure: LookaheadFailure::CloseRun,
            debug: false,
        }
    }

    #[must_use]
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub const fn with_order_check(mut self, enabled: bool) -> Self {
        self.order_check = enabled;
        self
    }

    #[must_use]
    pub const fn with_anchor_policy(mut self, policy: AnchorPolicy) -> Self {
        self.anchor_policy = policy;
        self
    }

    /// Cap the number of right-hand records attached to one anchor.
    #[must_use]
    pub const fn with_max_run_len(mut self, limit: u64) -> Self {
        self.max_run_len = Some(limit);
        self
    }

    #[must_use]
    pub const fn with_lookahead_failure(mut self, policy: LookaheadFailure) -> Self {
        self.lookahead_failure = policy;
        self
    }

    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub const fn direction(self) -> Direction {
        self.direction
    }

    #[must_use]
    pub const fn order_check(self) -> bool {
        self.order_check
    }

    #[must_use]
    pub const fn anchor_policy(self) -> AnchorPolicy {
        self.anchor_policy
    }

    #[must_use]
    pub const fn max_run_len(self) -> Option<u64> {
        self.max_run_len
    }

    #[must_use]
    pub const fn lookahead_failure(self) -> LookaheadFailure {
        self.lookahead_failure
    }

    #[must_use]
    pub const fn debug(self) -> bool {
        self.debug
    }
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self::new()
    }
}
