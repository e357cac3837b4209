//! Error types for client configuration.
//!
//! This module contains the errors raised while building a
//! [`ClientConfig`](crate::ClientConfig). They are raised synchronously at
//! construction time, before any request can be made, and are never retried.
//!
//! # Example
//!
//! ```rust
//! use moysklad_api::{ApiToken, ConfigError};
//!
//! let result = ApiToken::new("");
//! assert!(matches!(result, Err(ConfigError::MissingCredentials)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the client.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither a login/password pair nor an API token was supplied.
    #[error("missing credentials: either login and password or an API token must be provided")]
    MissingCredentials,

    /// The supplied API token is not a valid Basic token.
    #[error("invalid token: {reason}")]
    InvalidToken {
        /// Why the token was rejected.
        reason: String,
    },

    /// The retry delay must not be negative.
    #[error("retry delay must be >= 0")]
    NegativeRetryDelay,

    /// The base URL is not an absolute HTTP(S) URL.
    #[error("Invalid base URL '{url}'. Expected an absolute URL such as 'https://api.moysklad.ru/api/remap/1.2'.")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// An environment variable holds a value that cannot be parsed.
    #[error("Invalid value '{value}' for environment variable {key}")]
    InvalidEnvValue {
        /// The environment variable name.
        key: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },
}
