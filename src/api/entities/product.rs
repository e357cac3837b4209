//! Product operations (`entity/product`).
//!
//! # Example
//!
//! ```rust,ignore
//! use moysklad_api::api::entities::product::{CreateProduct, GetProduct, ListProducts, ProductDetails};
//! use moysklad_api::api::ListParams;
//!
//! let products = client
//!     .call(&ListProducts {
//!         params: ListParams { limit: Some(100), ..Default::default() },
//!     })
//!     .await?;
//!
//! let created = client
//!     .call(&CreateProduct {
//!         name: "Карандаш".to_string(),
//!         details: ProductDetails { article: Some("P-1".to_string()), ..Default::default() },
//!     })
//!     .await?;
//!
//! let fetched = client.call(&GetProduct { id: created.id }).await?;
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::common::{datetime, ListParams, Meta, MetaRef, Price, SalePrice};
use crate::api::{entity_path, parse_json, parse_rows, ApiRequest};
use crate::clients::{HttpError, HttpMethod, HttpRequest};

const COLLECTION: &str = "entity/product";

/// A product as returned by the API.
///
/// Only `meta`, `id` and `name` are guaranteed; everything else depends on
/// the account and the `expand` settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Entity metadata.
    pub meta: Meta,
    /// Product identifier.
    pub id: String,
    /// Account identifier.
    #[serde(default)]
    pub account_id: Option<String>,
    /// Product name.
    pub name: String,
    /// Last modification time.
    #[serde(default, with = "datetime")]
    pub updated: Option<NaiveDateTime>,
    /// Full folder path.
    #[serde(default)]
    pub path_name: Option<String>,
    /// Writable fields.
    #[serde(flatten)]
    pub details: ProductDetails,
}

/// Writable product fields shared by reads, creates and updates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Product code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// External system code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_code: Option<String>,
    /// Article (SKU).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article: Option<String>,
    /// Whether the product is archived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    /// Weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Volume.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    /// VAT rate in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat: Option<i32>,
    /// Parent product folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_folder: Option<MetaRef>,
    /// Purchase price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_price: Option<Price>,
    /// Minimum price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Price>,
    /// Sale prices per price type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_prices: Option<Vec<SalePrice>>,
    /// Additional attributes, kept as raw JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<Value>>,
}

/// Lists products.
#[derive(Clone, Debug, Default)]
pub struct ListProducts {
    /// Paging and filtering.
    pub params: ListParams,
}

impl ApiRequest for ListProducts {
    type Response = Vec<Product>;

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        let builder = HttpRequest::builder(HttpMethod::Get, COLLECTION);
        Ok(self.params.apply(builder).build()?)
    }

    fn from_response(&self, value: Value) -> Result<Self::Response, HttpError> {
        parse_rows("ListProducts", value)
    }
}

/// Fetches a product by id.
#[derive(Clone, Debug)]
pub struct GetProduct {
    /// Product identifier.
    pub id: String,
}

impl ApiRequest for GetProduct {
    type Response = Product;

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        Ok(HttpRequest::builder(HttpMethod::Get, entity_path(COLLECTION, &[&self.id])).build()?)
    }

    fn from_response(&self, value: Value) -> Result<Self::Response, HttpError> {
        parse_json("GetProduct", value)
    }
}

/// Creates a product.
#[derive(Clone, Debug, Serialize)]
pub struct CreateProduct {
    /// Product name.
    pub name: String,
    /// Optional fields.
    #[serde(flatten)]
    pub details: ProductDetails,
}

impl ApiRequest for CreateProduct {
    type Response = Product;

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        Ok(HttpRequest::builder(HttpMethod::Post, COLLECTION)
            .body(serde_json::to_value(self)?)
            .build()?)
    }

    fn from_response(&self, value: Value) -> Result<Self::Response, HttpError> {
        parse_json("CreateProduct", value)
    }
}

/// Updates a product; only the fields that are set are sent.
#[derive(Clone, Debug, Serialize)]
pub struct UpdateProduct {
    /// Product identifier.
    #[serde(skip)]
    pub id: String,
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Fields to change.
    #[serde(flatten)]
    pub details: ProductDetails,
}

impl ApiRequest for UpdateProduct {
    type Response = Product;

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        Ok(HttpRequest::builder(HttpMethod::Put, entity_path(COLLECTION, &[&self.id]))
            .body(serde_json::to_value(self)?)
            .build()?)
    }

    fn from_response(&self, value: Value) -> Result<Self::Response, HttpError> {
        parse_json("UpdateProduct", value)
    }
}

/// Deletes a product. The API answers with an empty body.
#[derive(Clone, Debug)]
pub struct DeleteProduct {
    /// Product identifier.
    pub id: String,
}

impl ApiRequest for DeleteProduct {
    type Response = ();

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        Ok(HttpRequest::builder(HttpMethod::Delete, entity_path(COLLECTION, &[&self.id]))
            .allow_non_json(true)
            .build()?)
    }

    fn from_response(&self, _value: Value) -> Result<Self::Response, HttpError> {
        Ok(())
    }
}
