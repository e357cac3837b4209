//! Integration tests for the request executor.
//!
//! These tests run the client against a local mock server and verify:
//! - Credential and gzip headers on every attempt
//! - Body encoding in normal and debug mode
//! - Retry of server errors, connection failures and timeouts
//! - Immediate failure on client errors and non-JSON responses
//! - The raw executor's single-attempt, unclassified behavior

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use moysklad_api::clients::{HttpMethod, HttpRequest};
use moysklad_api::{ClientConfig, HttpError, MoySkladClient};
use serde_json::json;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

const DELAY: Duration = Duration::from_millis(10);

fn client_for(server: &MockServer, retry_count: u32) -> MoySkladClient {
    client_with(server.uri(), retry_count, DELAY, false)
}

fn client_with(base_url: String, retry_count: u32, delay: Duration, debug: bool) -> MoySkladClient {
    let config = ClientConfig::builder()
        .login_password("admin", "pass")
        .base_url(base_url)
        .retry_count(retry_count)
        .retry_delay(delay)
        .debug(debug)
        .build()
        .unwrap();
    MoySkladClient::new(config)
}

fn get(path: &str) -> HttpRequest {
    HttpRequest::builder(HttpMethod::Get, path).build().unwrap()
}

/// Records the arrival time of every request and answers with a 500.
#[derive(Clone, Default)]
struct ArrivalRecorder {
    arrivals: Arc<Mutex<Vec<Instant>>>,
}

impl Respond for ArrivalRecorder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        self.arrivals.lock().unwrap().push(Instant::now());
        ResponseTemplate::new(500).set_body_json(json!({"errors": [{"error": "busy"}]}))
    }
}

// ============================================================================
// Headers and body encoding
// ============================================================================

#[tokio::test]
async fn test_every_request_carries_credentials_and_gzip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entity/product"))
        .and(header("authorization", "Basic YWRtaW46cGFzcw=="))
        .and(header("accept-encoding", "gzip"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rows": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 1);
    let request = HttpRequest::builder(HttpMethod::Get, "entity/product")
        .query_param("limit", 10)
        .build()
        .unwrap();

    let value = client.request(&request).await.unwrap();
    assert_eq!(value, json!({"rows": []}));
}

#[tokio::test]
async fn test_token_supplied_directly_is_sent_verbatim() {
    let server = MockServer::start().await;
    Mock::given(header("authorization", "Basic dXNlcjpzZWNyZXQ="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .api_token("dXNlcjpzZWNyZXQ=")
        .base_url(server.uri())
        .build()
        .unwrap();
    let client = MoySkladClient::new(config);

    client.request(&get("context/employee")).await.unwrap();
}

#[tokio::test]
async fn test_body_is_compact_outside_debug_mode() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("content-type", "application/json"))
        .and(body_string(r#"{"name":"Карандаш"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 1);
    let request = HttpRequest::builder(HttpMethod::Post, "entity/product")
        .body(json!({"name": "Карандаш"}))
        .build()
        .unwrap();

    assert_eq!(client.request(&request).await.unwrap(), json!({"id": "1"}));
}

#[tokio::test]
async fn test_body_is_pretty_printed_in_debug_mode() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string("{\n    \"name\": \"Карандаш\"\n}"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(server.uri(), 1, DELAY, true);
    let request = HttpRequest::builder(HttpMethod::Post, "entity/product")
        .body(json!({"name": "Карандаш"}))
        .build()
        .unwrap();

    client.request(&request).await.unwrap();
}

#[tokio::test]
async fn test_absolute_path_bypasses_base_url() {
    let server = MockServer::start().await;
    Mock::given(path("/download/file-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(
        "https://api.moysklad.ru/api/remap/1.2".to_string(),
        1,
        DELAY,
        false,
    );
    let value = client
        .request(&get(&format!("{}/download/file-1", server.uri())))
        .await
        .unwrap();
    assert_eq!(value, json!({"ok": true}));
}

// ============================================================================
// Retry behavior
// ============================================================================

#[tokio::test]
async fn test_server_error_exhausts_exactly_retry_count_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"errors": [{"error": "boom"}]})),
        )
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server, 3);
    let error = client.request(&get("entity/product")).await.unwrap_err();

    match error {
        HttpError::Server(e) => {
            assert_eq!(e.status, 500);
            assert_eq!(e.errors, json!([{"error": "boom"}]));
        }
        other => panic!("expected ServerError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_then_success_recovers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rows": [1]})))
        .mount(&server)
        .await;

    let client = client_for(&server, 5);
    let value = client.request(&get("entity/product")).await.unwrap();

    assert_eq!(value, json!({"rows": [1]}));
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_synthetic_payload_for_non_json_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = client_for(&server, 1);
    let error = client.request(&get("entity/product")).await.unwrap_err();

    assert!(error.is_retryable());
    assert_eq!(error.status(), Some(502));
    match error {
        HttpError::Server(e) => assert_eq!(e.errors, json!({"error": "Server returned 502"})),
        other => panic!("expected ServerError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_retry_delay_is_constant() {
    let server = MockServer::start().await;
    let recorder = ArrivalRecorder::default();
    Mock::given(method("GET"))
        .respond_with(recorder.clone())
        .expect(4)
        .mount(&server)
        .await;

    let delay = Duration::from_millis(100);
    let client = client_with(server.uri(), 4, delay, false);
    let result = client.request(&get("entity/product")).await;
    assert!(matches!(result, Err(HttpError::Server(_))));

    let arrivals = recorder.arrivals.lock().unwrap().clone();
    assert_eq!(arrivals.len(), 4);
    for pair in arrivals.windows(2) {
        let gap = pair[1] - pair[0];
        assert!(gap >= delay, "gap {gap:?} shorter than delay");
        assert!(gap < delay * 10, "gap {gap:?} suggests a growing backoff");
    }
}

#[tokio::test]
async fn test_timeout_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"slow": true}))
                .set_delay(Duration::from_secs(2)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"slow": false})))
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .login_password("admin", "pass")
        .base_url(server.uri())
        .retry_count(2)
        .retry_delay(DELAY)
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let client = MoySkladClient::new(config);

    let value = client.request(&get("entity/product")).await.unwrap();
    assert_eq!(value, json!({"slow": false}));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_connection_failure_is_retried_then_surfaced() {
    // Nothing listens on port 1.
    let client = client_with("http://127.0.0.1:1".to_string(), 2, DELAY, false);
    let error = client.request(&get("entity/product")).await.unwrap_err();

    match error {
        HttpError::Transport(e) => assert!(e.is_connect()),
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_zero_retry_count_never_sends() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    let error = client.request(&get("entity/product")).await.unwrap_err();
    assert!(matches!(error, HttpError::NotPerformed));
}

#[tokio::test]
async fn test_writes_are_retried_like_reads() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"errors": []})))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server, 2);
    let request = HttpRequest::builder(HttpMethod::Post, "entity/product")
        .body(json!({"name": "x"}))
        .build()
        .unwrap();

    assert!(client.request(&request).await.is_err());
}

// ============================================================================
// Terminal failures
// ============================================================================

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [{"error": "Not Found", "code": 1021, "moreInfo": "https://dev.moysklad.ru"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 5);
    let error = client.request(&get("entity/product/missing")).await.unwrap_err();

    assert_eq!(error.to_string(), "Not Found");
    assert!(!error.is_retryable());
    match error {
        HttpError::Client(e) => {
            assert_eq!(e.status, 404);
            assert_eq!(e.error.code, Some(1021));
            assert_eq!(e.error.more_info.as_deref(), Some("https://dev.moysklad.ru"));
        }
        other => panic!("expected ClientError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_client_error_attaches_request_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(
            ResponseTemplate::new(412).set_body_json(json!({"errors": [{"error": "Bad field"}]})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, 3);
    let request = HttpRequest::builder(HttpMethod::Put, "entity/product/1")
        .body(json!({"vat": -1}))
        .build()
        .unwrap();

    match client.request(&request).await.unwrap_err() {
        HttpError::Client(e) => assert_eq!(e.request_body, r#"{"vat":-1}"#),
        other => panic!("expected ClientError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_response_is_format_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("plain text"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 5);
    match client.request(&get("entity/product")).await.unwrap_err() {
        HttpError::ResponseFormat(e) => {
            assert!(e.content_type.starts_with("text/plain"));
            assert_eq!(e.body, "plain text");
        }
        other => panic!("expected ResponseFormatError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_response_tolerated_yields_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 5);
    let request = HttpRequest::builder(HttpMethod::Delete, "entity/product/1")
        .allow_non_json(true)
        .build()
        .unwrap();

    assert_eq!(client.request(&request).await.unwrap(), json!({}));
}

#[tokio::test]
async fn test_truncated_json_is_format_error_even_when_tolerated() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(br#"{"rows": [tru"#.to_vec(), "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 1);
    let request = HttpRequest::builder(HttpMethod::Delete, "entity/product/1")
        .allow_non_json(true)
        .build()
        .unwrap();

    match client.request(&request).await.unwrap_err() {
        HttpError::ResponseFormat(e) => {
            assert_eq!(e.status, 200);
            assert_eq!(e.body, r#"{"rows": [tru"#);
        }
        other => panic!("expected ResponseFormatError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_request_fails_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, 5);
    let request = HttpRequest {
        http_method: HttpMethod::Post,
        path: "entity/product".to_string(),
        body: None,
        query: None,
        allow_non_json: false,
    };

    let error = client.request(&request).await.unwrap_err();
    assert!(matches!(error, HttpError::InvalidRequest(_)));
}

// ============================================================================
// Raw executor
// ============================================================================

#[tokio::test]
async fn test_raw_request_returns_bytes_and_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/download/report"))
        .and(header("authorization", "Basic YWRtaW46cGFzcw=="))
        .and(header("accept-encoding", "gzip"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"%PDF-1.4".to_vec(), "application/pdf")
                .insert_header("x-lognex-request-id", "req-42"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 5);
    let response = client.raw_request(&get("download/report")).await.unwrap();

    assert!(response.is_ok());
    assert_eq!(response.body, b"%PDF-1.4");
    assert_eq!(response.header("Content-Type"), Some("application/pdf"));
    assert_eq!(response.header("X-Lognex-Request-Id"), Some("req-42"));
}

#[tokio::test]
async fn test_raw_request_does_not_retry_or_classify() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 5);
    let response = client.raw_request(&get("entity/product")).await.unwrap();

    assert_eq!(response.status, 500);
    assert_eq!(response.text(), "oops");
}
