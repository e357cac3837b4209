//! HTTP client types for MoySklad API communication.
//!
//! This module provides the execution layer: it turns an [`HttpRequest`]
//! into an authenticated HTTP call, classifies the outcome and retries
//! transient failures.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`MoySkladClient`]: The async client (retrying, raw and typed execution)
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`RawResponse`]: A verbatim response from [`MoySkladClient::raw_request`]
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`Classification`]: The classified outcome of one attempt
//! - [`HttpError`]: The unified error type for calls
//!
//! # Example
//!
//! ```rust,ignore
//! use moysklad_api::{ClientConfig, MoySkladClient};
//! use moysklad_api::clients::{HttpMethod, HttpRequest};
//!
//! let config = ClientConfig::builder()
//!     .login_password("admin@example", "secret")
//!     .build()?;
//! let client = MoySkladClient::new(config);
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "entity/product")
//!     .query_param("limit", 10)
//!     .build()?;
//!
//! let value = client.request(&request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! Each request is attempted at most `retry_count` times (default 5) with a
//! constant `retry_delay` (default 1 second) between attempts:
//!
//! - **5xx**: retried; the last [`ServerError`] is returned when the budget runs out
//! - **Connection failure or timeout**: retried the same way
//! - **4xx**: returned immediately as a [`ClientError`]
//! - **Non-JSON success**: a [`ResponseFormatError`], or `{}` when tolerated

mod classify;
mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use classify::{
    classify_response, classify_transport, empty_result, is_json_content_type, Classification,
};
pub use errors::{
    ApiErrorEntry, ClientError, HttpError, InvalidHttpRequestError, ResponseFormatError,
    ServerError,
};
pub use http_client::{MoySkladClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::RawResponse;
