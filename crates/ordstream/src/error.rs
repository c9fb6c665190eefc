use derive_more::Display;
use ordstream_core::error::{ErrorClass, StreamError, StreamSide};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

#[cfg(test)]
mod tests;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }

    /// Whether the failure came from input data rather than engine misuse or
    /// an internal bug.
    #[must_use]
    pub const fn is_data_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Source | ErrorKind::Ordering | ErrorKind::Limit | ErrorKind::Conflict
        )
    }
}

impl From<StreamError> for Error {
    fn from(err: StreamError) -> Self {
        let origin = err.side().map_or(ErrorOrigin::Engine, ErrorOrigin::from);

        Self::new(err.class().into(), origin, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers and orchestration layers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// A record source failed to produce its next record.
    Source,

    /// Input was not sorted the way the engine was configured.
    Ordering,

    /// A configured group or run limit was reached.
    Limit,

    /// Input shape conflicts with the join's anchor policy.
    Conflict,

    /// An engine or source was driven again after failing.
    Misuse,

    /// The caller cannot remediate this.
    Internal,
}

impl From<ErrorClass> for ErrorKind {
    fn from(class: ErrorClass) -> Self {
        match class {
            ErrorClass::Source => Self::Source,
            ErrorClass::Ordering => Self::Ordering,
            ErrorClass::Limit => Self::Limit,
            ErrorClass::Conflict => Self::Conflict,
            ErrorClass::Misuse => Self::Misuse,
            ErrorClass::Internal => Self::Internal,
        }
    }
}

///
/// ErrorOrigin
/// Which input, if any, the failure is attributed to.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Source,
    Left,
    Right,
    Engine,
}

impl From<StreamSide> for ErrorOrigin {
    fn from(side: StreamSide) -> Self {
        match side {
            StreamSide::Single => Self::Source,
            StreamSide::Left => Self::Left,
            StreamSide::Right => Self::Right,
        }
    }
}
