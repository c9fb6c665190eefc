use crate::{config::Direction, obs::EngineKind};
use std::{error::Error as StdError, fmt, io};
use thiserror::Error as ThisError;

///
/// BoxedCause
///

pub type BoxedCause = Box<dyn StdError + Send + Sync + 'static>;

///
/// SourceError
///
/// Failure reported by an ordered source collaborator while producing its
/// next record. Carries the record offset when the source knows it.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct SourceError {
    message: String,
    offset: Option<u64>,
    #[source]
    cause: Option<BoxedCause>,
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            offset: None,
            cause: None,
        }
    }

    /// Wrap an underlying error, reusing its message.
    pub fn from_cause<E>(cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            message: cause.to_string(),
            offset: None,
            cause: Some(Box::new(cause)),
        }
    }

    #[must_use]
    pub fn at_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<BoxedCause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn offset(&self) -> Option<u64> {
        self.offset
    }
}

impl From<io::Error> for SourceError {
    fn from(err: io::Error) -> Self {
        Self::from_cause(err)
    }
}

impl From<String> for SourceError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for SourceError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

///
/// StreamSide
///
/// Which input a failure belongs to. Grouping readers drive a single source;
/// merge joins drive a left (anchor) and a right (many) source.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StreamSide {
    Single,
    Left,
    Right,
}

impl fmt::Display for StreamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Single => "source",
            Self::Left => "left",
            Self::Right => "right",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorClass
/// Runtime classification of stream failures.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// The collaborator source failed.
    Source,
    /// Input violated the sort precondition.
    Ordering,
    /// A configured hard limit was reached.
    Limit,
    /// Input shape conflicts with the configured join policy.
    Conflict,
    /// The caller kept driving an invalidated instance.
    Misuse,
    Internal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Source => "source",
            Self::Ordering => "ordering",
            Self::Limit => "limit",
            Self::Conflict => "conflict",
            Self::Misuse => "misuse",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// StreamError
///
/// Typed failure surface of every pull operation (`peek`, `next_record`,
/// `next_group`, `next_outcome`). Nothing here is retried by the engine.
///

#[derive(Debug, ThisError)]
pub enum StreamError {
    #[error("{side} source read failed at record {offset}: {source}")]
    SourceRead {
        side: StreamSide,
        offset: u64,
        #[source]
        source: SourceError,
    },

    #[error("{side} source was invalidated by an earlier read failure")]
    SourceInvalidated { side: StreamSide },

    #[error("{side} input out of order at record {offset}: key decreased under {direction} ordering")]
    OutOfOrderInput {
        side: StreamSide,
        offset: u64,
        direction: Direction,
    },

    #[error("{side} {resource} limit exceeded: attempted={attempted}, limit={limit}")]
    GroupLimitExceeded {
        side: StreamSide,
        resource: &'static str,
        attempted: u64,
        limit: u64,
    },

    #[error("duplicate anchor key at left record {offset}")]
    DuplicateAnchorKey { offset: u64 },

    #[error("{engine} engine was driven again after failing")]
    EngineFailed { engine: EngineKind },

    #[error("stream invariant violated: {message}")]
    InvariantViolation { message: &'static str },
}

impl StreamError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::SourceRead { .. } => ErrorClass::Source,
            Self::OutOfOrderInput { .. } => ErrorClass::Ordering,
            Self::GroupLimitExceeded { .. } => ErrorClass::Limit,
            Self::DuplicateAnchorKey { .. } => ErrorClass::Conflict,
            Self::SourceInvalidated { .. } | Self::EngineFailed { .. } => ErrorClass::Misuse,
            Self::InvariantViolation { .. } => ErrorClass::Internal,
        }
    }

    /// Input side the failure is attributed to, when there is one.
    #[must_use]
    pub const fn side(&self) -> Option<StreamSide> {
        match self {
            Self::SourceRead { side, .. }
            | Self::SourceInvalidated { side }
            | Self::OutOfOrderInput { side, .. }
            | Self::GroupLimitExceeded { side, .. } => Some(*side),
            Self::DuplicateAnchorKey { .. } => Some(StreamSide::Left),
            Self::EngineFailed { .. } | Self::InvariantViolation { .. } => None,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        match self.side() {
            Some(side) => format!("{side}:{}: {self}", self.class()),
            None => format!("engine:{}: {self}", self.class()),
        }
    }

    pub(crate) const fn invariant(message: &'static str) -> Self {
        Self::InvariantViolation { message }
    }
}
