//! Error types for the Conjoin client.
//!
//! # Design
//! `Api` is the application failure: the service answered with a status
//! outside `[200, 300)` and its envelope message is the error's entire
//! `Display` text, passed through verbatim. Transport failures are wrapped
//! transparently so their message is unchanged. Everything else is local:
//! (de)serialization, URL composition, and configuration.

use thiserror::Error;

use crate::envelope::ResponseType;

pub type Result<T, E = ConjoinError> = std::result::Result<T, E>;

/// Errors returned by every client operation.
#[derive(Debug, Error)]
pub enum ConjoinError {
    /// The service rejected the call. `message` is `response.message` from
    /// the error envelope; `kind` and `code` are present when the envelope
    /// carried them in a readable form.
    #[error("{message}")]
    Api {
        status: Option<u16>,
        kind: Option<ResponseType>,
        code: Option<u16>,
        message: String,
    },

    /// The HTTP exchange itself did not complete.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A request body or query could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A response body did not match the expected envelope shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("invalid request url: {0}")]
    InvalidUrl(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ConjoinError {
    /// Transport-level status of an `Api` failure, if one was reported.
    pub fn status(&self) -> Option<u16> {
        match self {
            ConjoinError::Api { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Failure of the underlying HTTP exchange (DNS, connect, timeout, ...).
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("transport error: {0}")]
    Other(String),
}
