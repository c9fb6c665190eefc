//! ## Crate layout
//! - `core`: the engine crate (sources, grouping, merge join, config, trace).
//! - `error`: the public error type with a stable kind/origin taxonomy.
//!
//! The `prelude` mirrors what pipeline code needs to wire a source into a
//! grouping reader or a merge join and drain it.

pub use ordstream_core as core;

pub mod error;

pub use error::{Error, ErrorKind, ErrorOrigin};

use ordstream_core::{
    group::{BreakKeyStrategy, Group, GroupingReader},
    join::{JoinOutcome, SortMergeJoin},
    stream::OrderedSource,
};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Drain a grouping reader into memory, mapping failures to the public error.
pub fn collect_groups<S, B>(reader: GroupingReader<S, B>) -> Result<Vec<Group<S::Item>>, Error>
where
    S: OrderedSource,
    B: BreakKeyStrategy<S::Item>,
{
    reader.collect::<Result<_, _>>().map_err(Error::from)
}

/// Drain a merge join into memory, mapping failures to the public error.
pub fn collect_outcomes<LS, RS, FL, FR, K>(
    join: SortMergeJoin<LS, RS, FL, FR, K>,
) -> Result<Vec<JoinOutcome<LS::Item, RS::Item>>, Error>
where
    LS: OrderedSource,
    RS: OrderedSource,
    FL: Fn(&LS::Item) -> K,
    FR: Fn(&RS::Item) -> K,
    K: Ord,
{
    join.collect::<Result<_, _>>().map_err(Error::from)
}

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::{
        Error, collect_groups, collect_outcomes,
        core::{
            config::{AnchorPolicy, Direction, GroupConfig, JoinConfig, LookaheadFailure},
            group::{
                BreakFn, BreakKeyStrategy as _, Group, GroupingReader, KeyBreak, OrderedKeyBreak,
            },
            join::{JoinOutcome, OutcomeKind, SortMergeJoin},
            stream::{IterSource, OrderedSource as _, PeekableSource, VecSource},
        },
    };
}
