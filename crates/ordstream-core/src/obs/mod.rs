//! Observability: trace events, trace sinks, and engine stats snapshots.
//!
//! Engines never format or persist results. Everything they report flows
//! through `TraceEvent` into an installed `TraceSink`, or is read back from a
//! stats snapshot after the fact.

mod stats;
mod trace;

pub use stats::{GroupingStats, JoinStats};
pub use trace::{EngineKind, TraceEvent, TraceSink};

pub(crate) use trace::{TraceScope, debug_log};
