//! Module: join
//! Responsibility: sort-merge join of an anchor source with a many-side
//! source ordered by the same key.
//! Does not own: run collection (shared with `group`), source adapters.
//! Boundary: emits one `JoinOutcome` per pull and never buffers beyond the
//! current lookahead and the right run being collected.

mod merge;
mod outcome;


pub use merge::SortMergeJoin;
pub use outcome::{JoinOutcome, OutcomeKind};
