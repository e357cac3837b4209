//! Failure classification for a single attempt.
//!
//! Every attempt ends in exactly one [`Classification`]. The retry loop in
//! [`MoySkladClient::request`](crate::MoySkladClient::request) only decides
//! on this value; it never inspects responses itself.
//!
//! | Outcome | Classification |
//! |---------|----------------|
//! | HTTP >= 500 | `Retryable` ([`ServerError`]) |
//! | Connect failure or timeout | `Retryable` (`Transport`) |
//! | HTTP 400-499 | `Terminal` ([`ClientError`]) |
//! | HTTP < 400, non-JSON, not tolerated | `Terminal` ([`ResponseFormatError`]) |
//! | HTTP < 400, non-JSON, tolerated | `Success` (empty object) |
//! | HTTP < 400, JSON | `Success` (parsed body) |
//! | HTTP < 400, JSON content type, unparsable body | `Terminal` ([`ResponseFormatError`]) |
//! | Any other transport error | `Terminal` (`Transport`) |

use serde_json::{json, Map, Value};

use crate::clients::errors::{
    ApiErrorEntry, ClientError, HttpError, ResponseFormatError, ServerError,
};

/// The classified result of one attempt.
#[derive(Debug)]
pub enum Classification {
    /// The attempt succeeded with this JSON value.
    Success(Value),
    /// The attempt failed transiently and may be retried.
    Retryable(HttpError),
    /// The attempt failed and must not be retried.
    Terminal(HttpError),
}

impl Classification {
    /// Returns `true` for [`Classification::Retryable`].
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Retryable(_))
    }
}

/// The value returned for tolerated non-JSON responses.
#[must_use]
pub fn empty_result() -> Value {
    Value::Object(Map::new())
}

/// Classifies a received HTTP response.
///
/// `request_body` is the serialized body that was sent; it is attached to
/// server and client errors for diagnostics.
///
/// # Example
///
/// ```rust
/// use moysklad_api::clients::{classify_response, Classification};
///
/// let body = br#"{"errors":[{"error":"Not Found"}]}"#;
/// let outcome = classify_response(404, Some("application/json"), body, false, "{}");
/// assert!(matches!(outcome, Classification::Terminal(e) if e.to_string() == "Not Found"));
///
/// let outcome = classify_response(503, Some("text/html"), b"<html/>", false, "{}");
/// assert!(outcome.is_retryable());
/// ```
#[must_use]
pub fn classify_response(
    status: u16,
    content_type: Option<&str>,
    body: &[u8],
    allow_non_json: bool,
    request_body: &str,
) -> Classification {
    if status >= 500 {
        let errors = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|value| value.get("errors").cloned())
            .unwrap_or_else(|| json!({ "error": format!("Server returned {status}") }));
        return Classification::Retryable(HttpError::Server(ServerError {
            status,
            errors,
            request_body: request_body.to_string(),
        }));
    }

    if status >= 400 {
        let error = first_error_entry(body)
            .unwrap_or_else(|| ApiErrorEntry::message(format!("Server returned {status}")));
        return Classification::Terminal(HttpError::Client(ClientError {
            status,
            error,
            request_body: request_body.to_string(),
        }));
    }

    let format_error = || {
        HttpError::ResponseFormat(ResponseFormatError {
            status,
            content_type: content_type.unwrap_or_default().to_string(),
            body: String::from_utf8_lossy(body).into_owned(),
        })
    };

    if !is_json_content_type(content_type) {
        return if allow_non_json {
            Classification::Success(empty_result())
        } else {
            Classification::Terminal(format_error())
        };
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(value) => Classification::Success(value),
        Err(_) => Classification::Terminal(format_error()),
    }
}

/// Classifies a transport-level failure.
///
/// Connection failures and timeouts are retryable; everything else is
/// terminal.
#[must_use]
pub fn classify_transport(error: reqwest::Error) -> Classification {
    if error.is_connect() || error.is_timeout() {
        Classification::Retryable(HttpError::Transport(error))
    } else {
        Classification::Terminal(HttpError::Transport(error))
    }
}

/// Returns `true` if the MIME essence of `content_type` is `application/json`.
#[must_use]
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}

fn first_error_entry(body: &[u8]) -> Option<ApiErrorEntry> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let first = value.get("errors")?.as_array()?.first()?.clone();
    serde_json::from_value(first).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: Option<&str> = Some("application/json;charset=utf-8");

    #[test]
    fn test_server_error_is_retryable_with_payload() {
        let body = br#"{"errors":[{"error":"Internal error","code":1000}]}"#;
        let outcome = classify_response(500, JSON, body, false, r#"{"name":"x"}"#);

        match outcome {
            Classification::Retryable(HttpError::Server(e)) => {
                assert_eq!(e.status, 500);
                assert_eq!(e.errors, json!([{"error": "Internal error", "code": 1000}]));
                assert_eq!(e.request_body, r#"{"name":"x"}"#);
            }
            other => panic!("expected retryable server error, got {other:?}"),
        }
    }

    #[test]
    fn test_server_error_without_json_gets_synthetic_payload() {
        let outcome = classify_response(502, Some("text/html"), b"Bad Gateway", false, "{}");

        match outcome {
            Classification::Retryable(HttpError::Server(e)) => {
                assert_eq!(e.errors, json!({"error": "Server returned 502"}));
            }
            other => panic!("expected retryable server error, got {other:?}"),
        }
    }

    #[test]
    fn test_server_error_wins_even_when_non_json_is_tolerated() {
        let outcome = classify_response(503, Some("text/plain"), b"", true, "{}");
        assert!(outcome.is_retryable());
    }

    #[test]
    fn test_client_error_carries_first_entry() {
        let body = br#"{"errors":[{"error":"Not Found","code":1021},{"error":"second"}]}"#;
        let outcome = classify_response(404, JSON, body, false, "{}");

        match outcome {
            Classification::Terminal(HttpError::Client(e)) => {
                assert_eq!(e.status, 404);
                assert_eq!(e.error.error, "Not Found");
                assert_eq!(e.error.code, Some(1021));
            }
            other => panic!("expected terminal client error, got {other:?}"),
        }
    }

    #[test]
    fn test_client_error_without_entries_is_synthetic() {
        let outcome = classify_response(401, Some("text/html"), b"<h1>401</h1>", true, "{}");

        match outcome {
            Classification::Terminal(HttpError::Client(e)) => {
                assert_eq!(e.to_string(), "Server returned 401");
            }
            other => panic!("expected terminal client error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_json_success_is_format_error_unless_tolerated() {
        let strict = classify_response(200, Some("text/plain"), b"ok", false, "{}");
        match strict {
            Classification::Terminal(HttpError::ResponseFormat(e)) => {
                assert_eq!(e.content_type, "text/plain");
            }
            other => panic!("expected terminal format error, got {other:?}"),
        }

        let tolerant = classify_response(200, Some("text/plain"), b"ok", true, "{}");
        assert!(matches!(tolerant, Classification::Success(v) if v == json!({})));
    }

    #[test]
    fn test_missing_content_type_is_not_json() {
        let outcome = classify_response(200, None, b"{}", false, "{}");
        assert!(matches!(
            outcome,
            Classification::Terminal(HttpError::ResponseFormat(_))
        ));
    }

    #[test]
    fn test_json_success_is_parsed() {
        let outcome = classify_response(200, JSON, br#"{"rows":[]}"#, false, "{}");
        assert!(matches!(outcome, Classification::Success(v) if v == json!({"rows": []})));
    }

    #[test]
    fn test_malformed_json_is_format_error_even_when_tolerated() {
        let strict = classify_response(200, JSON, b"", false, "{}");
        assert!(matches!(
            strict,
            Classification::Terminal(HttpError::ResponseFormat(_))
        ));

        let truncated = classify_response(200, JSON, br#"{"rows": [tru"#, true, "{}");
        match truncated {
            Classification::Terminal(HttpError::ResponseFormat(e)) => {
                assert_eq!(e.body, r#"{"rows": [tru"#);
            }
            other => panic!("expected terminal format error, got {other:?}"),
        }
    }

    #[test]
    fn test_json_content_type_detection() {
        assert!(is_json_content_type(Some("application/json")));
        assert!(is_json_content_type(Some("Application/JSON; charset=UTF-8")));
        assert!(!is_json_content_type(Some("application/jsonp")));
        assert!(!is_json_content_type(Some("text/plain")));
        assert!(!is_json_content_type(None));
    }
}
