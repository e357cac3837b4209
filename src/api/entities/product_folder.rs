//! Product folder operations (`entity/productfolder`).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::common::{datetime, ListParams, Meta, MetaRef};
use crate::api::{entity_path, parse_json, parse_rows, ApiRequest};
use crate::clients::{HttpError, HttpMethod, HttpRequest};

const COLLECTION: &str = "entity/productfolder";

/// A product folder (product group).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFolder {
    /// Entity metadata.
    pub meta: Meta,
    /// Folder identifier.
    pub id: String,
    /// Account identifier.
    #[serde(default)]
    pub account_id: Option<String>,
    /// Folder name.
    pub name: String,
    /// Last modification time.
    #[serde(default, with = "datetime")]
    pub updated: Option<NaiveDateTime>,
    /// Full path of the parent folders.
    #[serde(default)]
    pub path_name: Option<String>,
    /// Whether the folder is archived.
    #[serde(default)]
    pub archived: Option<bool>,
    /// Writable fields.
    #[serde(flatten)]
    pub details: ProductFolderDetails,
}

/// Writable product folder fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFolderDetails {
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Folder code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// External system code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_code: Option<String>,
    /// VAT rate in percent applied to the folder's products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat: Option<i32>,
    /// Parent folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_folder: Option<MetaRef>,
}

/// Lists product folders.
#[derive(Clone, Debug, Default)]
pub struct ListProductFolders {
    /// Paging and filtering.
    pub params: ListParams,
}

impl ApiRequest for ListProductFolders {
    type Response = Vec<ProductFolder>;

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        let builder = HttpRequest::builder(HttpMethod::Get, COLLECTION);
        Ok(self.params.apply(builder).build()?)
    }

    fn from_response(&self, value: Value) -> Result<Self::Response, HttpError> {
        parse_rows("ListProductFolders", value)
    }
}

/// Fetches a product folder by id.
#[derive(Clone, Debug)]
pub struct GetProductFolder {
    /// Folder identifier.
    pub id: String,
}

impl ApiRequest for GetProductFolder {
    type Response = ProductFolder;

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        Ok(HttpRequest::builder(HttpMethod::Get, entity_path(COLLECTION, &[&self.id])).build()?)
    }

    fn from_response(&self, value: Value) -> Result<Self::Response, HttpError> {
        parse_json("GetProductFolder", value)
    }
}

/// Creates a product folder.
#[derive(Clone, Debug, Serialize)]
pub struct CreateProductFolder {
    /// Folder name.
    pub name: String,
    /// Optional fields.
    #[serde(flatten)]
    pub details: ProductFolderDetails,
}

impl ApiRequest for CreateProductFolder {
    type Response = ProductFolder;

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        Ok(HttpRequest::builder(HttpMethod::Post, COLLECTION)
            .body(serde_json::to_value(self)?)
            .build()?)
    }

    fn from_response(&self, value: Value) -> Result<Self::Response, HttpError> {
        parse_json("CreateProductFolder", value)
    }
}

/// Updates a product folder.
#[derive(Clone, Debug, Serialize)]
pub struct UpdateProductFolder {
    /// Folder identifier.
    #[serde(skip)]
    pub id: String,
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Fields to change.
    #[serde(flatten)]
    pub details: ProductFolderDetails,
}

impl ApiRequest for UpdateProductFolder {
    type Response = ProductFolder;

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        Ok(HttpRequest::builder(HttpMethod::Put, entity_path(COLLECTION, &[&self.id]))
            .body(serde_json::to_value(self)?)
            .build()?)
    }

    fn from_response(&self, value: Value) -> Result<Self::Response, HttpError> {
        parse_json("UpdateProductFolder", value)
    }
}

/// Deletes a product folder.
#[derive(Clone, Debug)]
pub struct DeleteProductFolder {
    /// Folder identifier.
    pub id: String,
}

impl ApiRequest for DeleteProductFolder {
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
