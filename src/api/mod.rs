//! Typed operations for the MoySklad JSON API.
//!
//! This module defines the [`ApiRequest`] trait, the contract every endpoint
//! operation implements, and the operation catalog built on it:
//!
//! - [`entities`]: products, product folders, organizations, webhooks and
//!   custom entities
//! - [`reports`]: stock reports
//! - [`documents`]: internal orders
//!
//! An operation only describes its HTTP call and parses the JSON result.
//! Execution, retry and failure classification live in
//! [`MoySkladClient`](crate::MoySkladClient), so adding an endpoint means
//! adding an `ApiRequest` implementation and nothing else.
//!
//! # Implementing an Operation
//!
//! ```rust
//! use moysklad_api::api::{parse_json, ApiRequest};
//! use moysklad_api::clients::{HttpMethod, HttpRequest};
//! use moysklad_api::HttpError;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct Currency {
//!     pub id: String,
//!     pub name: String,
//! }
//!
//! pub struct GetCurrency {
//!     pub id: String,
//! }
//!
//! impl ApiRequest for GetCurrency {
//!     type Response = Currency;
//!
//!     fn to_request(&self) -> Result<HttpRequest, HttpError> {
//!         let path = format!("entity/currency/{}", self.id);
//!         Ok(HttpRequest::builder(HttpMethod::Get, path).build()?)
//!     }
//!
//!     fn from_response(&self, value: serde_json::Value) -> Result<Currency, HttpError> {
//!         parse_json("GetCurrency", value)
//!     }
//! }
//!
//! let request = GetCurrency { id: "42".to_string() }.to_request().unwrap();
//! assert_eq!(request.path, "entity/currency/42");
//! ```

pub mod common;
pub mod documents;
pub mod entities;
pub mod reports;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::{HttpError, HttpRequest};

pub use common::{ListParams, ListResponse, Meta, MetaRef, Price, SalePrice};

/// A typed operation against the MoySklad API.
///
/// Implementors produce an [`HttpRequest`] describing their call and parse
/// the JSON value returned by the executor into [`Self::Response`].
pub trait ApiRequest {
    /// The typed result of the operation.
    type Response;

    /// Describes the HTTP call for this operation.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Serialization`] if the body cannot be encoded or
    /// [`HttpError::InvalidRequest`] if the request is malformed.
    fn to_request(&self) -> Result<HttpRequest, HttpError>;

    /// Parses the JSON result of a successful call.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Deserialize`] if the value does not have the
    /// expected shape.
    fn from_response(&self, value: Value) -> Result<Self::Response, HttpError>;
}

/// Deserializes `value`, tagging failures with the operation name.
///
/// # Errors
///
/// Returns [`HttpError::Deserialize`] if `value` does not match `T`.
pub fn parse_json<T: DeserializeOwned>(
    operation: &'static str,
    value: Value,
) -> Result<T, HttpError> {
    serde_json::from_value(value).map_err(|source| HttpError::Deserialize { operation, source })
}

/// Deserializes a list response and returns its `rows`.
///
/// # Errors
///
/// Returns [`HttpError::Deserialize`] if `value` is not a list response of `T`.
pub fn parse_rows<T: DeserializeOwned>(
    operation: &'static str,
    value: Value,
) -> Result<Vec<T>, HttpError> {
    parse_json::<ListResponse<T>>(operation, value).map(|list| list.rows)
}

/// Builds an entity path, percent-encoding each dynamic segment.
///
/// ```rust
/// use moysklad_api::api::entity_path;
///
/// assert_eq!(entity_path("entity/product", &["a b"]), "entity/product/a%20b");
/// assert_eq!(entity_path("entity/product", &[]), "entity/product");
/// ```
#[must_use]
pub fn entity_path(collection: &str, segments: &[&str]) -> String {
    segments.iter().fold(collection.to_string(), |mut path, segment| {
        path.push('/');
        path.push_str(&urlencoding::encode(segment));
        path
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: String,
    }

    #[test]
    fn test_parse_rows_extracts_rows() {
        let value = json!({
            "meta": {"href": "https://api.moysklad.ru/api/remap/1.2/entity/product", "size": 2},
            "rows": [{"id": "1"}, {"id": "2"}]
        });
        let rows: Vec<Row> = parse_rows("ListRows", value).unwrap();
        assert_eq!(rows, vec![Row { id: "1".into() }, Row { id: "2".into() }]);
    }

    #[test]
    fn test_parse_json_reports_operation_name() {
        let result: Result<Row, _> = parse_json("GetRow", json!({"name": "no id"}));
        match result {
            Err(HttpError::Deserialize { operation, .. }) => assert_eq!(operation, "GetRow"),
            other => panic!("expected Deserialize error, got {other:?}"),
        }
    }

    #[test]
    fn test_entity_path_encodes_segments() {
        assert_eq!(
            entity_path("entity/customentity", &["meta-1", "el/2"]),
            "entity/customentity/meta-1/el%2F2"
        );
    }
}
