//! # MoySklad API Rust Client
//!
//! An async Rust client for the MoySklad JSON API 1.2, providing validated
//! configuration, a retrying request executor and typed endpoint operations.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Credential resolution from a login/password pair or a prebuilt token
//! - A request executor with bounded constant-delay retries for server
//!   errors, connection failures and timeouts
//! - A raw executor for binary downloads and non-JSON endpoints
//! - Typed operations via the [`ApiRequest`] trait and the [`api`] catalog
//!
//! ## Quick Start
//!
//! ```rust
//! use moysklad_api::{ClientConfig, MoySkladClient};
//!
//! let config = ClientConfig::builder()
//!     .login_password("admin@example", "secret")
//!     .build()
//!     .unwrap();
//!
//! let client = MoySkladClient::new(config);
//! assert_eq!(client.config().retry_count(), 5);
//! ```
//!
//! ## Configuration From the Environment
//!
//! ```rust,ignore
//! use moysklad_api::{ClientConfig, MoySkladClient};
//!
//! // Reads MOYSKLAD_TOKEN or MOYSKLAD_LOGIN/MOYSKLAD_PASSWORD,
//! // plus the optional MOYSKLAD_DEBUG, MOYSKLAD_RETRY_COUNT,
//! // MOYSKLAD_RETRY_DELAY and MOYSKLAD_BASE_URL.
//! let client = MoySkladClient::new(ClientConfig::from_env()?);
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use moysklad_api::api::entities::product::{GetProduct, ListProducts};
//! use moysklad_api::clients::{HttpMethod, HttpRequest};
//!
//! // Typed operation
//! let products = client.call(&ListProducts::default()).await?;
//! let product = client.call(&GetProduct { id: products[0].id.clone() }).await?;
//!
//! // Untyped JSON request
//! let request = HttpRequest::builder(HttpMethod::Get, "entity/currency").build()?;
//! let currencies = client.request(&request).await?;
//!
//! // Raw bytes, e.g. a file download
//! let request = HttpRequest::builder(HttpMethod::Get, "download/abc").build()?;
//! let file = client.raw_request(&request).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Credentials and URLs are validated on construction
//! - **Thread-safe**: The client is `Send + Sync` and holds no mutable state
//! - **Async-first**: Designed for use with the Tokio async runtime

pub mod api;
pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use api::ApiRequest;
pub use config::{ApiToken, BaseUrl, ClientConfig, ClientConfigBuilder};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ClientError, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, MoySkladClient,
    RawResponse, ResponseFormatError, ServerError,
};
