use serde::Serialize;
use std::{fmt, slice};

///
/// OutcomeKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutcomeKind {
    Matched,
    LeftOnly,
    RightOnly,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Matched => "matched",
            Self::LeftOnly => "left_only",
            Self::RightOnly => "right_only",
        };
        write!(f, "{label}")
    }
}

///
/// JoinOutcome
///
/// One emission of a sort-merge join.
///
/// `Matched` pairs one anchor (left) record with the whole consecutive run of
/// right records sharing its key. The run is never empty.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum JoinOutcome<L, R> {
    Matched { left: L, right: Vec<R> },
    LeftOnly(L),
    RightOnly(R),
}

impl<L, R> JoinOutcome<L, R> {
    #[must_use]
    pub const fn kind(&self) -> OutcomeKind {
        match self {
            Self::Matched { .. } => OutcomeKind::Matched,
            Self::LeftOnly(_) => OutcomeKind::LeftOnly,
            Self::RightOnly(_) => OutcomeKind::RightOnly,
        }
    }

    #[must_use]
    pub const fn is_matched(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    /// Anchor record, absent for `RightOnly`.
    #[must_use]
    pub const fn left(&self) -> Option<&L> {
        match self {
            Self::Matched { left, .. } | Self::LeftOnly(left) => Some(left),
            Self::RightOnly(_) => None,
        }
    }

    /// Right-hand records carried by this outcome: the matched run, the
    /// single unmatched record, or nothing for `LeftOnly`.
    #[must_use]
    pub fn right_run(&self) -> &[R] {
        match self {
            Self::Matched { right, .. } => right,
            Self::LeftOnly(_) => &[],
            Self::RightOnly(right) => slice::from_ref(right),
        }
    }

    #[must_use]
    pub fn into_parts(self) -> (Option<L>, Vec<R>) {
        match self {
            Self::Matched { left, right } => (Some(left), right),
            Self::LeftOnly(left) => (Some(left), Vec::new()),
            Self::RightOnly(right) => (None, vec![right]),
        }
    }

    #[must_use]
    pub fn map_left<T>(self, f: impl FnOnce(L) -> T) -> JoinOutcome<T, R> {
        match self {
            Self::Matched { left, right } => JoinOutcome::Matched {
                left: f(left),
                right,
            },
            Self::LeftOnly(left) => JoinOutcome::LeftOnly(f(left)),
            Self::RightOnly(right) => JoinOutcome::RightOnly(right),
        }
    }

    #[must_use]
    pub fn map_right<T>(self, mut f: impl FnMut(R) -> T) -> JoinOutcome<L, T> {
        match self {
            Self::Matched { left, right } => JoinOutcome::Matched {
                left,
                right: right.into_iter().map(f).collect(),
            },
            Self::LeftOnly(left) => JoinOutcome::LeftOnly(left),
            Self::RightOnly(right) => JoinOutcome::RightOnly(f(right)),
        }
    }

    pub(crate) fn right_len(&self) -> u64 {
        u64::try_from(self.right_run().len()).unwrap_or(u64::MAX)
    }
}
