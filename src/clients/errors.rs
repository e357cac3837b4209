//! HTTP-specific error types for the MoySklad API client.
//!
//! This module contains the errors a single call can fail with.
//!
//! # Error Handling
//!
//! - [`ServerError`]: HTTP 5xx responses; retried up to the attempt budget
//! - [`ClientError`]: HTTP 4xx responses; never retried
//! - [`ResponseFormatError`]: Unexpected non-JSON responses; never retried
//! - [`InvalidHttpRequestError`]: A request failed validation before sending
//! - [`HttpError`]: Unified error type encompassing all of the above plus
//!   transport failures
//!
//! # Example
//!
//! ```rust,ignore
//! use moysklad_api::HttpError;
//!
//! match client.call(&GetProduct { id }).await {
//!     Ok(product) => println!("Product: {}", product.name),
//!     Err(HttpError::Client(e)) => println!("API error {}: {}", e.status, e.error),
//!     Err(HttpError::Server(e)) => println!("Server kept failing: {}", e),
//!     Err(e) if e.is_retryable() => println!("Transient failure: {}", e),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A structured error entry from the `errors` array of a response body.
///
/// # Example
///
/// ```rust
/// use moysklad_api::clients::ApiErrorEntry;
///
/// let entry: ApiErrorEntry = serde_json::from_value(serde_json::json!({
///     "error": "Not Found",
///     "code": 1021,
///     "moreInfo": "https://dev.moysklad.ru/doc/api/remap/1.2/#error_1021"
/// }))
/// .unwrap();
///
/// assert_eq!(entry.error, "Not Found");
/// assert_eq!(entry.code, Some(1021));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorEntry {
    /// Human-readable error message.
    #[serde(default)]
    pub error: String,
    /// Numeric API error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    /// The request parameter the error refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    /// Link to the error documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more_info: Option<String>,
}

impl ApiErrorEntry {
    /// Creates an entry carrying only a message.
    #[must_use]
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            ..Self::default()
        }
    }
}

impl fmt::Display for ApiErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.error)
    }
}

/// Error returned for HTTP 5xx responses.
///
/// Carries the server-provided `errors` payload (or a synthesized
/// `{"error": "Server returned <status>"}`) plus the outgoing request body
/// for diagnostics.
#[derive(Debug, Error)]
#[error("Server returned {status}: {errors}")]
pub struct ServerError {
    /// The HTTP status code of the response.
    pub status: u16,
    /// The `errors` payload of the response.
    pub errors: Value,
    /// The serialized request body that was sent.
    pub request_body: String,
}

/// Error returned for HTTP 4xx responses.
///
/// The message is the first structured error entry of the response, or
/// `Server returned <status>` when the body carries none.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct ClientError {
    /// The HTTP status code of the response.
    pub status: u16,
    /// The first error entry of the response.
    pub error: ApiErrorEntry,
    /// The serialized request body that was sent.
    pub request_body: String,
}

/// Error returned when a successful response is not JSON.
#[derive(Debug, Error)]
#[error("Response is not JSON: `{content_type}` : {body}")]
pub struct ResponseFormatError {
    /// The HTTP status code of the response.
    pub status: u16,
    /// The content type of the response (empty if absent).
    pub content_type: String,
    /// The response body as text.
    pub body: String,
}

/// Error returned when a request fails validation before it is sent.
///
/// # Example
///
/// ```rust
/// use moysklad_api::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "POST".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Cannot use POST without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request path is empty.
    #[error("Request path cannot be empty.")]
    EmptyPath,
}

/// Unified error type for a single API call.
///
/// # Example
///
/// ```rust
/// use moysklad_api::HttpError;
///
/// let error = HttpError::NotPerformed;
/// assert!(!error.is_retryable());
/// assert!(error.to_string().contains("retry count"));
/// ```
#[derive(Debug, Error)]
pub enum HttpError {
    /// Connection failure, timeout or other transport error.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// HTTP 5xx response.
    #[error(transparent)]
    Server(#[from] ServerError),

    /// HTTP 4xx response.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Non-JSON response where JSON was required.
    #[error(transparent)]
    ResponseFormat(#[from] ResponseFormatError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// No attempt was made because the configured retry count is 0.
    #[error("Request was not performed: the configured retry count is 0")]
    NotPerformed,

    /// A request body could not be serialized.
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A successful response could not be parsed into the operation's output.
    #[error("Failed to parse {operation} response: {source}")]
    Deserialize {
        /// The operation whose response failed to parse.
        operation: &'static str,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

impl HttpError {
    /// Returns `true` if the executor would attempt the request again.
    ///
    /// Server errors, connection failures and timeouts are retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Server(_) => true,
            Self::Transport(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }

    /// Returns the HTTP status code of the response, if one was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server(e) => Some(e.status),
            Self::Client(e) => Some(e.status),
            Self::ResponseFormat(e) => Some(e.status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
