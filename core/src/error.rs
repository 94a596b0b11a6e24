//! Error types for the flashcards API client.
//!
//! # Design
//! Service calls never interpret responses, so `ApiError` only shows up in
//! three places: encoding a request body or query locally, looking up the
//! signed-in user, and the opt-in `parse_*` helpers. `NotFound` gets its own
//! variant because callers frequently branch on it; every other non-2xx
//! response lands in `HttpError` with the raw status and body.

use thiserror::Error;

/// Errors returned by request builders and `parse_*` helpers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status other than the expected one (and not 404).
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// A session-scoped call was made while no user is signed in.
    #[error("no user is signed in")]
    NoSession,
}
