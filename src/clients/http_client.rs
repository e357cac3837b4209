//! HTTP client for MoySklad API communication.
//!
//! This module provides the [`MoySkladClient`] type: the retrying JSON
//! executor, the single-attempt raw executor and the typed dispatcher for
//! [`ApiRequest`] operations.

use reqwest::header::{ACCEPT_ENCODING, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde_json::Value;

use crate::api::ApiRequest;
use crate::clients::classify::{classify_response, classify_transport, Classification};
use crate::clients::errors::HttpError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::{parse_response_headers, RawResponse};
use crate::config::ClientConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Client for the MoySklad JSON API.
///
/// The client handles:
/// - Basic authentication and `Accept-Encoding: gzip` on every attempt
/// - JSON body encoding (pretty-printed in debug mode)
/// - A bounded retry loop with a constant delay for server errors,
///   connection failures and timeouts
/// - Typed dispatch of [`ApiRequest`] operations
///
/// Each attempt opens its own connection session, which is released when
/// the attempt ends, whatever its outcome.
///
/// # Thread Safety
///
/// `MoySkladClient` is `Send + Sync` and holds only immutable
/// configuration, so it can be shared across tasks.
///
/// # Example
///
/// ```rust,ignore
/// use moysklad_api::{ClientConfig, MoySkladClient};
/// use moysklad_api::api::entities::product::ListProducts;
///
/// let config = ClientConfig::builder()
///     .login_password("admin@example", "secret")
///     .build()?;
/// let client = MoySkladClient::new(config);
///
/// let products = client.call(&ListProducts::default()).await?;
/// ```
#[derive(Clone, Debug)]
pub struct MoySkladClient {
    config: ClientConfig,
    user_agent: String,
}

// Verify MoySkladClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MoySkladClient>();
};

impl MoySkladClient {
    /// Creates a new client from a validated configuration.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}moysklad-api-rust v{SDK_VERSION}");

        Self { config, user_agent }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the `User-Agent` sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Executes a typed operation.
    ///
    /// The operation describes its HTTP call, the call runs through
    /// [`request`](Self::request), and the resulting JSON is handed back to
    /// the operation to parse.
    ///
    /// # Errors
    ///
    /// Returns any [`HttpError`] raised while building the request,
    /// executing it, or parsing its result.
    pub async fn call<R>(&self, operation: &R) -> Result<R::Response, HttpError>
    where
        R: ApiRequest + ?Sized,
    {
        let request = operation.to_request()?;
        let value = self.request(&request).await?;
        operation.from_response(value)
    }

    /// Sends a request, retrying transient failures.
    ///
    /// The request is attempted at most `retry_count` times. Retryable
    /// failures (HTTP >= 500, connection failures, timeouts) are retried
    /// after the constant `retry_delay`; the last one is returned once the
    /// budget is spent. Terminal failures are returned immediately. With a
    /// retry count of 0 no attempt is made and [`HttpError::NotPerformed`]
    /// is returned.
    ///
    /// Writes are retried like reads. A POST/PUT/DELETE the server applied
    /// before failing with a 5xx or timing out may be applied twice.
    ///
    /// # Errors
    ///
    /// Returns the classified [`HttpError`] of the failing attempt.
    pub async fn request(&self, request: &HttpRequest) -> Result<Value, HttpError> {
        request.verify()?;

        let url = self.config.base_url().join(&request.path);
        let body = self.encode_body(request.body.as_ref())?;
        let attempts = self.config.retry_count();

        for attempt in 1..=attempts {
            match self.attempt(request, &url, body.as_deref()).await {
                Classification::Success(value) => return Ok(value),
                Classification::Terminal(error) => {
                    tracing::debug!(
                        "{} {} failed on attempt {}: {}",
                        request.http_method,
                        url,
                        attempt,
                        error
                    );
                    return Err(error);
                }
                Classification::Retryable(error) => {
                    if attempt == attempts {
                        tracing::debug!(
                            "{} {} exhausted {} attempts: {}",
                            request.http_method,
                            url,
                            attempts,
                            error
                        );
                        return Err(error);
                    }
                    let delay = self.config.retry_delay();
                    tracing::warn!(
                        write = request.http_method.is_write(),
                        "Retrying {} {} (attempt {}/{}) in {:?} after: {}",
                        request.http_method,
                        url,
                        attempt,
                        attempts,
                        delay,
                        error
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }

        Err(HttpError::NotPerformed)
    }

    /// Sends a single attempt and returns the response verbatim.
    ///
    /// Credential and gzip headers are injected and a JSON body is encoded,
    /// but there is no retry, no status classification and no JSON parsing.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the request fails
    /// validation, [`HttpError::Serialization`] if the body cannot be
    /// encoded, and [`HttpError::Transport`] for any transport failure.
    pub async fn raw_request(&self, request: &HttpRequest) -> Result<RawResponse, HttpError> {
        request.verify()?;

        let url = self.config.base_url().join(&request.path);
        let body = self.encode_body(request.body.as_ref())?;

        let session = self.open_session()?;
        let response = self
            .build_request(&session, request, &url, body.as_deref())
            .send()
            .await?;

        let status = response.status().as_u16();
        let headers = parse_response_headers(response.headers());
        let bytes = response.bytes().await?;

        Ok(RawResponse::new(status, headers, bytes.to_vec()))
    }

    /// Performs one attempt on a fresh session and classifies it.
    async fn attempt(
        &self,
        request: &HttpRequest,
        url: &str,
        body: Option<&str>,
    ) -> Classification {
        let session = match self.open_session() {
            Ok(session) => session,
            Err(error) => return Classification::Terminal(HttpError::Transport(error)),
        };

        let response = match self.build_request(&session, request, url, body).send().await {
            Ok(response) => response,
            Err(error) => return classify_transport(error),
        };

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(error) => return classify_transport(error),
        };

        if self.config.debug() {
            tracing::debug!(
                target: "moysklad_api::trace",
                "Request: {} {} {}\nResponse: {} {}",
                request.http_method,
                url,
                body.unwrap_or_default(),
                status,
                String::from_utf8_lossy(&bytes)
            );
        }

        classify_response(
            status,
            content_type.as_deref(),
            &bytes,
            request.allow_non_json,
            body.unwrap_or("{}"),
        )
    }

    /// Opens a connection session scoped to a single attempt.
    fn open_session(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(self.config.timeout())
            .build()
    }

    fn build_request(
        &self,
        session: &reqwest::Client,
        request: &HttpRequest,
        url: &str,
        body: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let mut builder = session
            .request(request.http_method.into(), url)
            .header(AUTHORIZATION, self.config.token().authorization_header())
            .header(ACCEPT_ENCODING, "gzip")
            .header(USER_AGENT, &self.user_agent);

        if let Some(query) = &request.query {
            builder = builder.query(query);
        }

        if let Some(body) = body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }

        builder
    }

    /// Serializes a JSON body: pretty-printed in debug mode, compact otherwise.
    fn encode_body(&self, body: Option<&Value>) -> Result<Option<String>, HttpError> {
        let Some(body) = body else {
            return Ok(None);
        };

        if self.config.debug() {
            let mut buf = Vec::new();
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
            let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
            serde::Serialize::serialize(body, &mut serializer)?;
            // serde_json only ever writes valid UTF-8
            Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
        } else {
            Ok(Some(serde_json::to_string(body)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_client(debug: bool) -> MoySkladClient {
        let config = ClientConfig::builder()
            .login_password("admin", "pass")
            .debug(debug)
            .build()
            .unwrap();
        MoySkladClient::new(config)
    }

    #[test]
    fn test_user_agent_format() {
        let client = create_test_client(false);
        assert!(client.user_agent().starts_with("moysklad-api-rust v"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = ClientConfig::builder()
            .login_password("admin", "pass")
            .user_agent_prefix("Storefront/1.0")
            .build()
            .unwrap();
        let client = MoySkladClient::new(config);
        assert!(client.user_agent().starts_with("Storefront/1.0 | moysklad-api-rust v"));
    }

    #[test]
    fn test_compact_body_encoding() {
        let client = create_test_client(false);
        let body = json!({"name": "Карандаш", "code": "A-1"});
        let encoded = client.encode_body(Some(&body)).unwrap().unwrap();

        assert!(!encoded.contains(' '));
        assert!(!encoded.contains('\n'));
        assert!(encoded.contains("Карандаш"));
    }

    #[test]
    fn test_pretty_body_encoding_in_debug_mode() {
        let client = create_test_client(true);
        let body = json!({"name": "Карандаш"});
        let encoded = client.encode_body(Some(&body)).unwrap().unwrap();

        assert_eq!(encoded, "{\n    \"name\": \"Карандаш\"\n}");
    }

    #[test]
    fn test_no_body_encodes_to_none() {
        let client = create_test_client(true);
        assert!(client.encode_body(None).unwrap().is_none());
    }

    #[test]
    fn test_build_request_injects_headers() {
        let client = create_test_client(false);
        let session = client.open_session().unwrap();
        let request = HttpRequest::builder(crate::clients::HttpMethod::Post, "entity/product")
            .body(json!({"name": "x"}))
            .build()
            .unwrap();

        let built = client
            .build_request(&session, &request, "https://example.com/entity/product", Some("{}"))
            .build()
            .unwrap();

        let headers = built.headers();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Basic YWRtaW46cGFzcw==");
        assert_eq!(headers.get(ACCEPT_ENCODING).unwrap(), "gzip");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(built.method(), &reqwest::Method::POST);
    }
}
