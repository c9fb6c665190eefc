//! Module: stream::order
//! Responsibility: comparator policy for ordered sources.
//! Does not own: stream traversal mechanics.
//! Boundary: centralizes ASC/DESC comparison behavior for engines.

use crate::config::Direction;
use std::cmp::Ordering;

///
/// KeyOrderComparator
///
/// Comparator wrapper for key monotonicity checks and merge decisions.
/// Keeps engines comparator-driven instead of branching on direction at each
/// call site.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeyOrderComparator {
    direction: Direction,
}

impl KeyOrderComparator {
    #[must_use]
    pub const fn from_direction(direction: Direction) -> Self {
        Self { direction }
    }

    #[must_use]
    pub const fn direction(self) -> Direction {
        self.direction
    }

    /// Compare two keys in traversal order: `Less` means `left` is met first.
    pub fn compare<K: Ord + ?Sized>(self, left: &K, right: &K) -> Ordering {
        self.orient(left.cmp(right))
    }

    /// Reorient a natural-order comparison into traversal order.
    #[must_use]
    pub const fn orient(self, natural: Ordering) -> Ordering {
        match self.direction {
            Direction::Asc => natural,
            Direction::Desc => natural.reverse(),
        }
    }

    /// Return whether a natural-order comparison of `(previous, current)`
    /// breaks monotonicity.
    #[must_use]
    pub const fn violates_monotonicity(self, natural: Ordering) -> bool {
        self.orient(natural).is_gt()
    }
}
