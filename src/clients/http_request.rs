//! HTTP request types for the MoySklad API client.
//!
//! This module provides the [`HttpRequest`] type and its builder. An
//! `HttpRequest` describes one call: method, target, optional JSON body and
//! whether a non-JSON response is acceptable.

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods supported by the MoySklad API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving entities.
    Get,
    /// HTTP POST method for creating entities.
    Post,
    /// HTTP PUT method for updating entities.
    Put,
    /// HTTP DELETE method for removing entities.
    Delete,
}

impl HttpMethod {
    /// Returns `true` for methods that may change server state.
    #[must_use]
    pub const fn is_write(self) -> bool {
        !matches!(self, Self::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// A description of one HTTP call to the MoySklad API.
///
/// The `path` is either relative to the configured base URL
/// (e.g. `entity/product`) or an absolute `http(s)://` URL.
///
/// # Example
///
/// ```rust
/// use moysklad_api::clients::{HttpRequest, HttpMethod};
/// use serde_json::json;
///
/// let get_request = HttpRequest::builder(HttpMethod::Get, "entity/product")
///     .query_param("limit", "100")
///     .build()
///     .unwrap();
///
/// let post_request = HttpRequest::builder(HttpMethod::Post, "entity/product")
///     .body(json!({"name": "Pencil"}))
///     .build()
///     .unwrap();
///
/// let delete_request = HttpRequest::builder(HttpMethod::Delete, "entity/product/42")
///     .allow_non_json(true)
///     .build()
///     .unwrap();
/// assert!(delete_request.allow_non_json);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path (relative to the base URL) or absolute URL.
    pub path: String,
    /// The JSON request body, if any.
    pub body: Option<serde_json::Value>,
    /// Query parameters to append to the URL.
    pub query: Option<HashMap<String, String>>,
    /// Whether a successful response with a non-JSON content type is
    /// returned as an empty result. A JSON-typed body that fails to parse is
    /// still an error.
    pub allow_non_json: bool,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `path` is empty
    /// - `http_method` is `Post` or `Put` but `body` is `None`
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.path.trim().is_empty() {
            return Err(InvalidHttpRequestError::EmptyPath);
        }

        if matches!(self.http_method, HttpMethod::Post | HttpMethod::Put) && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<serde_json::Value>,
    query: Option<HashMap<String, String>>,
    allow_non_json: bool,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            query: None,
            allow_non_json: false,
        }
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.to_string());
        self
    }

    /// Adds a query parameter if `value` is `Some`.
    #[must_use]
    pub fn optional_query_param<V: ToString>(
        self,
        key: impl Into<String>,
        value: Option<V>,
    ) -> Self {
        match value {
            Some(value) => self.query_param(key, value),
            None => self,
        }
    }

    /// Accepts non-JSON successful responses as an empty result.
    #[must_use]
    pub const fn allow_non_json(mut self, allow: bool) -> Self {
        self.allow_non_json = allow;
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            query: self.query,
            allow_non_json: self.allow_non_json,
        };
        request.verify()?;
        Ok(request)
    }
}
