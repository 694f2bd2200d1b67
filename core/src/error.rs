//! Error types for the catalog API client.
//!
//! # Design
//! Input problems are caught locally and reported as `ValidationError` before
//! any request is built. Everything that happens after the request leaves the
//! process lands in `ApiError`. `NotFound` gets a dedicated variant because
//! callers frequently distinguish "the resource does not exist" from "the
//! server returned an unexpected status".

use thiserror::Error;

/// A request payload or query failed local pre-flight checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields are absent or `null`, in declaration order.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// The first field whose value has the wrong type.
    #[error("{field} must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    /// Keys outside the allow-list.
    #[error("unknown properties [{}] (allowed: {})", .unknown.join(", "), .allowed.join(", "))]
    UnknownProperties {
        unknown: Vec<String>,
        allowed: Vec<&'static str>,
    },

    /// The payload is not a JSON object, or passed validation but still failed to decode.
    #[error("malformed input: {0}")]
    Malformed(String),

    /// An id that cannot stand as a single path segment: empty, `.` or `..`.
    #[error("invalid resource id {0:?}")]
    InvalidId(String),
}

/// Errors returned by `CatalogClient` and `CatalogService` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input was rejected before any network I/O.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request never produced a response (connection refused, DNS, TLS, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The base URL cannot carry path segments.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// True for failures that originate from the HTTP exchange rather than local input.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiError::NotFound | ApiError::HttpError { .. } | ApiError::Transport(_)
        )
    }
}
