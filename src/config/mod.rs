//! Configuration types for the MoySklad API client.
//!
//! This module provides the configuration used to construct a
//! [`MoySkladClient`](crate::MoySkladClient).
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ClientConfig`]: Immutable client settings shared by all calls
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`ApiToken`]: A validated Basic authentication token
//! - [`BaseUrl`]: A validated absolute base URL
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use moysklad_api::ClientConfig;
//!
//! let config = ClientConfig::builder()
//!     .login_password("admin@example", "secret")
//!     .retry_count(3)
//!     .retry_delay(Duration::from_millis(500))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.retry_count(), 3);
//! ```

mod newtypes;

pub use newtypes::{resolve_credentials, ApiToken, BaseUrl};

use std::time::Duration;

use crate::error::ConfigError;

/// Default base URL of the MoySklad JSON API.
pub const DEFAULT_BASE_URL: &str = "https://api.moysklad.ru/api/remap/1.2";

/// Default number of attempts per request.
pub const DEFAULT_RETRY_COUNT: u32 = 5;

/// Default constant delay between attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Configuration for the MoySklad API client.
///
/// Created once and never mutated afterward. Every call made through a
/// client reads the same configuration.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    token: ApiToken,
    debug: bool,
    retry_count: u32,
    retry_delay: Duration,
    timeout: Duration,
    base_url: BaseUrl,
    user_agent_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Builds a configuration from `MOYSKLAD_*` environment variables.
    ///
    /// See [`ClientConfig::from_env_with`] for the variables read.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if credentials are missing or invalid, or a
    /// variable holds an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from variables supplied by `lookup`.
    ///
    /// | Variable | Meaning |
    /// |----------|---------|
    /// | `MOYSKLAD_LOGIN`, `MOYSKLAD_PASSWORD` | Login/password pair |
    /// | `MOYSKLAD_TOKEN` | Raw Basic token (takes precedence) |
    /// | `MOYSKLAD_DEBUG` | `1`/`true`/`yes`/`on` enables tracing of every attempt |
    /// | `MOYSKLAD_RETRY_COUNT` | Attempt budget; negative values mean `0` |
    /// | `MOYSKLAD_RETRY_DELAY` | Seconds between attempts (float, `>= 0`) |
    /// | `MOYSKLAD_BASE_URL` | Base URL override |
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NegativeRetryDelay`] for a negative delay and
    /// [`ConfigError::InvalidEnvValue`] for values that cannot be parsed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use moysklad_api::ClientConfig;
    ///
    /// let config = ClientConfig::from_env_with(|key| match key {
    ///     "MOYSKLAD_LOGIN" => Some("admin".to_string()),
    ///     "MOYSKLAD_PASSWORD" => Some("pass".to_string()),
    ///     "MOYSKLAD_RETRY_COUNT" => Some("-3".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    ///
    /// assert_eq!(config.retry_count(), 0);
    /// ```
    pub fn from_env_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(token) = lookup("MOYSKLAD_TOKEN") {
            builder = builder.api_token(token);
        }
        if let (Some(login), Some(password)) =
            (lookup("MOYSKLAD_LOGIN"), lookup("MOYSKLAD_PASSWORD"))
        {
            builder = builder.login_password(login, password);
        }
        if let Some(value) = lookup("MOYSKLAD_DEBUG") {
            builder = builder.debug(parse_flag("MOYSKLAD_DEBUG", &value)?);
        }
        if let Some(value) = lookup("MOYSKLAD_RETRY_COUNT") {
            builder = builder.retry_count(parse_retry_count(&value)?);
        }
        if let Some(value) = lookup("MOYSKLAD_RETRY_DELAY") {
            builder = builder.retry_delay(parse_retry_delay(&value)?);
        }
        if let Some(url) = lookup("MOYSKLAD_BASE_URL") {
            builder = builder.base_url(url);
        }

        builder.build()
    }

    /// Returns the resolved API token.
    #[must_use]
    pub const fn token(&self) -> &ApiToken {
        &self.token
    }

    /// Returns whether every attempt is traced.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Returns the total number of attempts made per request.
    #[must_use]
    pub const fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// Returns the constant delay between attempts.
    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Returns the per-attempt timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// Credentials are required: either a login/password pair or an API token.
/// All other fields have defaults.
///
/// # Defaults
///
/// - `debug`: `false`
/// - `retry_count`: 5
/// - `retry_delay`: 1 second
/// - `timeout`: 300 seconds
/// - `base_url`: [`DEFAULT_BASE_URL`]
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    login: Option<String>,
    password: Option<String>,
    api_token: Option<String>,
    debug: Option<bool>,
    retry_count: Option<u32>,
    retry_delay: Option<Duration>,
    timeout: Option<Duration>,
    base_url: Option<String>,
    user_agent_prefix: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the login and password the token is derived from.
    #[must_use]
    pub fn login_password(mut self, login: impl Into<String>, password: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self.password = Some(password.into());
        self
    }

    /// Sets a raw Basic token. Takes precedence over a login/password pair.
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Enables tracing of every attempt and pretty-printed request bodies.
    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Sets the total number of attempts per request.
    ///
    /// A count of 0 means no request is ever sent: every call fails
    /// immediately with [`HttpError::NotPerformed`](crate::HttpError::NotPerformed).
    #[must_use]
    pub const fn retry_count(mut self, count: u32) -> Self {
        self.retry_count = Some(count);
        self
    }

    /// Sets the constant delay between attempts.
    #[must_use]
    pub const fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    /// Sets the per-attempt timeout covering connect, send and receive.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides the base URL relative request paths are joined to.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ClientConfig`], resolving and validating credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredentials`] or
    /// [`ConfigError::InvalidToken`] if credentials cannot be resolved, and
    /// [`ConfigError::InvalidBaseUrl`] for a malformed base URL.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let token = resolve_credentials(
            self.login.as_deref(),
            self.password.as_deref(),
            self.api_token.as_deref(),
        )?;
        let base_url =
            BaseUrl::new(self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()))?;

        Ok(ClientConfig {
            token,
            debug: self.debug.unwrap_or(false),
            retry_count: self.retry_count.unwrap_or(DEFAULT_RETRY_COUNT),
            retry_delay: self.retry_delay.unwrap_or(DEFAULT_RETRY_DELAY),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            base_url,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnvValue {
            key,
            value: value.to_string(),
        }),
    }
}

fn parse_retry_count(value: &str) -> Result<u32, ConfigError> {
    let invalid = || ConfigError::InvalidEnvValue {
        key: "MOYSKLAD_RETRY_COUNT",
        value: value.to_string(),
    };
    let count: i64 = value.trim().parse().map_err(|_| invalid())?;
    u32::try_from(count.max(0)).map_err(|_| invalid())
}

fn parse_retry_delay(value: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidEnvValue {
        key: "MOYSKLAD_RETRY_DELAY",
        value: value.to_string(),
    };
    let seconds: f64 = value.trim().parse().map_err(|_| invalid())?;
    if seconds < 0.0 {
        return Err(ConfigError::NegativeRetryDelay);
    }
    Duration::try_from_secs_f64(seconds).map_err(|_| invalid())
}
