use crate::{
    error::{ErrorClass, StreamError, StreamSide},
    join::OutcomeKind,
};
use std::fmt;

///
/// TraceSink
///
/// Receiver for engine trace events. Installed per engine via `with_trace`.
///

pub trait TraceSink: Send + Sync {
    fn on_event(&self, event: TraceEvent);
}

///
/// EngineKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EngineKind {
    Grouping,
    MergeJoin,
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Grouping => "grouping",
            Self::MergeJoin => "merge join",
        };
        write!(f, "{label}")
    }
}

///
/// TraceEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TraceEvent {
    GroupEmitted {
        records: u64,
    },
    OutcomeEmitted {
        kind: OutcomeKind,
        right_records: u64,
    },
    Exhausted {
        engine: EngineKind,
        emitted: u64,
    },
    Failed {
        engine: EngineKind,
        class: ErrorClass,
        side: Option<StreamSide>,
    },
}

///
/// TraceScope
///
/// Optional sink bound to one engine kind.
///

#[derive(Clone, Copy)]
pub(crate) struct TraceScope {
    sink: Option<&'static dyn TraceSink>,
    engine: EngineKind,
}

impl TraceScope {
    pub(crate) const fn new(engine: EngineKind) -> Self {
        Self { sink: None, engine }
    }

    pub(crate) const fn with_sink(mut self, sink: &'static dyn TraceSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub(crate) fn emit(self, event: TraceEvent) {
        if let Some(sink) = self.sink {
            sink.on_event(event);
        }
    }

    pub(crate) fn exhausted(self, emitted: u64) {
        self.emit(TraceEvent::Exhausted {
            engine: self.engine,
            emitted,
        });
    }

    pub(crate) fn failed(self, err: &StreamError) {
        self.emit(TraceEvent::Failed {
            engine: self.engine,
            class: err.class(),
            side: err.side(),
        });
    }
}

pub(crate) fn debug_log(enabled: bool, engine: EngineKind, message: impl AsRef<str>) {
    if enabled {
        println!("[debug] {engine}: {}", message.as_ref());
    }
}
