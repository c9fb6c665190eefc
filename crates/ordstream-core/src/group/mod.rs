//! Module: group
//! Responsibility: control-break grouping over one ordered source.
//! Does not own: source adapters, aggregation of group contents.
//! Boundary: yields owned, non-empty `Group` values; the caller folds them.

mod reader;
pub(crate) mod run;
mod strategy;


use derive_more::{Deref, IntoIterator};
use serde::Serialize;

pub use reader::GroupingReader;
pub use strategy::{BreakFn, BreakKeyStrategy, KeyBreak, OrderedKeyBreak};

///
/// Group
///
/// Ordered, non-empty run of consecutive records that share a group.
/// Derefs to the record vector; iterate it by value or by reference.
///

#[repr(transparent)]
#[derive(Clone, Debug, Deref, Eq, IntoIterator, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Group<T>(#[into_iterator(owned, ref)] Vec<T>);

impl<T> Group<T> {
    /// Wrap a collected run.
    ///
    /// # Panics
    ///
    /// Panics on an empty vector: an empty group is an engine logic bug, not
    /// a data condition.
    pub(crate) fn new(records: Vec<T>) -> Self {
        assert!(
            !records.is_empty(),
            "empty group invariant violated: groups hold at least one record"
        );

        Self(records)
    }

    #[must_use]
    pub fn first_record(&self) -> &T {
        &self.0[0]
    }

    #[must_use]
    pub fn last_record(&self) -> &T {
        &self.0[self.0.len() - 1]
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }

    pub(crate) fn len_u64(&self) -> u64 {
        u64::try_from(self.0.len()).unwrap_or(u64::MAX)
    }
}

impl<T> From<Group<T>> for Vec<T> {
    fn from(group: Group<T>) -> Self {
        group.into_vec()
    }
}
