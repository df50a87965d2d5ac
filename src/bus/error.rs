//! Error types for the command bus.

use thiserror::Error;

/// Failures surfaced to a bus caller. Everything below the bus boundary is
/// converted into one of these; handler-side errors never cross the bus as
/// raw errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BusError {
    /// No alive node in the cluster has a handler registered for the channel.
    #[error("no handler available for channel '{0}'")]
    NoHandlerAvailable(String),

    /// No reply arrived within the caller-supplied window. The handler may
    /// still complete; callers must treat the outcome as unknown.
    #[error("request on channel '{0}' timed out")]
    Timeout(String),

    /// The handler ran and failed; its error message is forwarded verbatim.
    #[error("handler failed: {0}")]
    HandlerFailed(String),

    /// A connection-level failure that is neither a timeout nor a handler
    /// error (connection refused, malformed reply body).
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Error raised by a channel handler. Carried back to the caller as
/// `BusError::HandlerFailed`.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{0}")]
pub struct HandlerError(pub String);

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        Self(message)
    }
}
