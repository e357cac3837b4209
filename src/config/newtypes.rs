//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::ConfigError;

/// A validated Basic authentication token.
///
/// The token is the Base64 encoding of `login:password`. It is either derived
/// from a login/password pair or supplied directly, in which case it must
/// decode to UTF-8 text containing a `:` separator.
///
/// # Security
///
/// The `Debug` implementation masks the token, displaying only
/// `ApiToken(*****)`.
///
/// # Example
///
/// ```rust
/// use moysklad_api::ApiToken;
///
/// let token = ApiToken::from_login_password("admin", "pass");
/// assert_eq!(token.as_ref(), "YWRtaW46cGFzcw==");
/// assert_eq!(format!("{:?}", token), "ApiToken(*****)");
///
/// assert!(ApiToken::new("YWRtaW46cGFzcw==").is_ok());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Validates a raw API token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredentials`] if the token is empty, and
    /// [`ConfigError::InvalidToken`] if it is not valid Base64, does not
    /// decode to UTF-8, or has no `:` in its decoded form.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::MissingCredentials);
        }

        let decoded = STANDARD
            .decode(token.as_bytes())
            .map_err(|e| ConfigError::InvalidToken {
                reason: format!("not valid base64 ({e})"),
            })?;
        let decoded = String::from_utf8(decoded).map_err(|_| ConfigError::InvalidToken {
            reason: "decoded token is not UTF-8".to_string(),
        })?;
        if !decoded.contains(':') {
            return Err(ConfigError::InvalidToken {
                reason: "decoded token has no ':' separator".to_string(),
            });
        }

        Ok(Self(token))
    }

    /// Derives a token by encoding `login:password`.
    #[must_use]
    pub fn from_login_password(login: &str, password: &str) -> Self {
        Self(STANDARD.encode(format!("{login}:{password}")))
    }

    /// Returns the value of the `Authorization` header for this token.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Basic {}", self.0)
    }
}

impl AsRef<str> for ApiToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(*****)")
    }
}

/// Resolves credentials into a validated [`ApiToken`].
///
/// A non-empty `token` takes precedence. Otherwise both `login` and
/// `password` must be non-empty and the token is derived from them. No
/// network I/O is performed.
///
/// # Errors
///
/// Returns [`ConfigError::MissingCredentials`] if neither a complete
/// login/password pair nor a token is supplied, and
/// [`ConfigError::InvalidToken`] if the supplied token fails validation.
///
/// # Example
///
/// ```rust
/// use moysklad_api::config::resolve_credentials;
/// use moysklad_api::ConfigError;
///
/// let token = resolve_credentials(Some("admin"), Some("pass"), None).unwrap();
/// assert_eq!(token.as_ref(), "YWRtaW46cGFzcw==");
///
/// let missing = resolve_credentials(Some("admin"), None, None);
/// assert_eq!(missing, Err(ConfigError::MissingCredentials));
/// ```
pub fn resolve_credentials(
    login: Option<&str>,
    password: Option<&str>,
    token: Option<&str>,
) -> Result<ApiToken, ConfigError> {
    if let Some(token) = token.filter(|t| !t.is_empty()) {
        return ApiToken::new(token);
    }

    match (
        login.filter(|l| !l.is_empty()),
        password.filter(|p| !p.is_empty()),
    ) {
        (Some(login), Some(password)) => Ok(ApiToken::from_login_password(login, password)),
        _ => Err(ConfigError::MissingCredentials),
    }
}

/// A validated absolute base URL for API requests.
///
/// Trailing slashes are stripped so paths can be joined with a single `/`.
///
/// # Example
///
/// ```rust
/// use moysklad_api::BaseUrl;
///
/// let base = BaseUrl::new("https://api.moysklad.ru/api/remap/1.2/").unwrap();
/// assert_eq!(base.join("entity/product"), "https://api.moysklad.ru/api/remap/1.2/entity/product");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no `http://` or
    /// `https://` scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"));

        match rest {
            Some(rest) if !rest.trim_matches('/').is_empty() => {
                Ok(Self(url.trim_end_matches('/').to_string()))
            }
            _ => Err(ConfigError::InvalidBaseUrl { url }),
        }
    }

    /// Resolves `path` against this base URL.
    ///
    /// Absolute `http://` or `https://` URLs are returned unchanged.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        if is_absolute(path) {
            return path.to_string();
        }
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn is_absolute(path: &str) -> bool {
    path.starts_with("https://") || path.starts_with("http://")
}
