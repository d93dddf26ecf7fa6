//! Error types for record loading, editing and submission.

/// Failure of a single read or replace against a [`RecordSource`].
///
/// The three kinds are kept apart for logging and tests, but every consumer
/// in this crate collapses them into one display string.
///
/// [`RecordSource`]: crate::RecordSource
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} {reason}")]
    Status { status: u16, reason: String },

    /// The response body was not a usable record.
    #[error("invalid record: {0}")]
    Decode(String),
}

impl FetchError {
    /// The HTTP status code, when the failure was a status failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A rejected change to the draft.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("field '{0}' cannot be edited")]
    ImmutableField(String),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("invalid value '{value}' for field '{key}': expected {expected}")]
    InvalidValue {
        key: String,
        expected: &'static str,
        value: String,
    },

    #[error("no record loaded")]
    NotLoaded,

    #[error("a request is in progress")]
    Busy,
}

/// Why a submit did not go through.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("no record loaded")]
    NotLoaded,

    #[error("a request is in progress")]
    Busy,

    #[error("record has no usable id")]
    MissingId,

    #[error(transparent)]
    Remote(#[from] FetchError),
}
