//! Raw HTTP response type returned by
//! [`MoySkladClient::raw_request`](crate::MoySkladClient::raw_request).

use std::collections::HashMap;

/// A verbatim HTTP response: status code, raw body bytes and headers.
///
/// No classification or JSON parsing is applied; the caller is
/// responsible for interpreting the status code.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use moysklad_api::RawResponse;
///
/// let mut headers = HashMap::new();
/// headers.insert("content-type".to_string(), vec!["application/pdf".to_string()]);
///
/// let response = RawResponse::new(200, headers, b"%PDF-1.4".to_vec());
/// assert!(response.is_ok());
/// assert_eq!(response.header("Content-Type"), Some("application/pdf"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    /// The HTTP status code.
    pub status: u16,
    /// Response headers keyed by lowercase name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The response body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Creates a new `RawResponse`.
    #[must_use]
    pub const fn new(status: u16, headers: HashMap<String, Vec<String>>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns the first value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Collects response headers into a map keyed by lowercase name.
pub(crate) fn parse_response_headers(
    headers: &reqwest::header::HeaderMap,
) -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        let key = name.as_str().to_lowercase();
        let value = value.to_str().unwrap_or_default().to_string();
        result.entry(key).or_default().push(value);
    }
    result
}
