//! Core engine for ordstream: ordered source contracts, one-record lookahead,
//! control-break grouping, and sort-merge joins over pre-sorted inputs.
//!
//! Engines are synchronous and pull-based. Nothing here sorts, parses, or
//! persists records; callers supply sources, key extractors, and consume
//! the emitted groups and outcomes themselves.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod error;
pub mod group;
pub mod join;
pub mod obs;
pub mod stream;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Engine vocabulary only: sources, engines, outcomes, and their policies.
/// Error types and observability stay behind their modules.
///

pub mod prelude {
    pub use crate::{
        config::{AnchorPolicy, Direction, GroupConfig, JoinConfig, LookaheadFailure},
        group::{
            BreakFn, BreakKeyStrategy as _, Group, GroupingReader, KeyBreak, OrderedKeyBreak,
        },
        join::{JoinOutcome, OutcomeKind, SortMergeJoin},
        stream::{IterSource, OrderedSource as _, PeekableSource, VecSource},
    };
}
