use crate::join::OutcomeKind;

///
/// GroupingStats
///
/// Counters observed by one grouping reader.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GroupingStats {
    records: u64,
    groups: u64,
    largest_group: u64,
}

impl GroupingStats {
    pub(crate) const fn new() -> Self {
        Self {
            records: 0,
            groups: 0,
            largest_group: 0,
        }
    }

    #[must_use]
    pub const fn records(self) -> u64 {
        self.records
    }

    #[must_use]
    pub const fn groups(self) -> u64 {
        self.groups
    }

    #[must_use]
    pub const fn largest_group(self) -> u64 {
        self.largest_group
    }

    pub(crate) const fn record_group(&mut self, len: u64) {
        self.records = self.records.saturating_add(len);
        self.groups = self.groups.saturating_add(1);
        if len > self.largest_group {
            self.largest_group = len;
        }
    }
}

///
/// JoinStats
///
/// Counters observed by one merge join.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct JoinStats {
    matched: u64,
    left_only: u64,
    right_only: u64,
    right_matched: u64,
}

impl JoinStats {
    pub(crate) const fn new() -> Self {
        Self {
            matched: 0,
            left_only: 0,
            right_only: 0,
            right_matched: 0,
        }
    }

    /// Number of anchors that received a right-hand run.
    #[must_use]
    pub const fn matched(self) -> u64 {
        self.matched
    }

    #[must_use]
    pub const fn left_only(self) -> u64 {
        self.left_only
    }

    #[must_use]
    pub const fn right_only(self) -> u64 {
        self.right_only
    }

    /// Right-hand records attached to some anchor.
    #[must_use]
    pub const fn right_matched(self) -> u64 {
        self.right_matched
    }

    #[must_use]
    pub const fn outcomes(self) -> u64 {
        self.matched
            .saturating_add(self.left_only)
            .saturating_add(self.right_only)
    }

    pub(crate) const fn record_outcome(&mut self, kind: OutcomeKind, right_records: u64) {
        match kind {
            OutcomeKind::Matched => {
                self.matched = self.matched.saturating_add(1);
                self.right_matched = self.right_matched.saturating_add(right_records);
            }
            OutcomeKind::LeftOnly => self.left_only = self.left_only.saturating_add(1),
            OutcomeKind::RightOnly => self.right_only = self.right_only.saturating_add(1),
        }
    }
}
