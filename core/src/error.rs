//! Error types for the provisioning API client.
//!
//! # Design
//! Errors fall into two groups. Local validation failures (`InvalidArgument`,
//! `SerializationError`, `Config`) are raised before any request is built.
//! Remote failures (`NotFound`, `HttpError`, `DeserializationError`,
//! `Transport`) surface whatever the round-trip produced, unchanged. The core
//! never retries.

use thiserror::Error;

/// Errors returned by the sites client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404; the requested server or site does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be encoded.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// An argument was rejected before any request was issued.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The transport could not complete the round-trip.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// True when the error was raised locally, before a request was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ApiError::InvalidArgument(_) | ApiError::SerializationError(_) | ApiError::Config(_)
        )
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::DeserializationError(err.to_string())
    }
}
