//! Custom directory operations (`entity/customentity`).
//!
//! A custom entity is a user-defined directory identified by its metadata
//! id; its elements live under `entity/customentity/{metadata_id}`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::common::{datetime, ListParams, Meta};
use crate::api::{entity_path, parse_json, parse_rows, ApiRequest};
use crate::clients::{HttpError, HttpMethod, HttpRequest};

const COLLECTION: &str = "entity/customentity";

/// A custom directory definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEntity {
    pub meta: Meta,
    /// Metadata id; elements are addressed through it.
    pub id: String,
    pub name: String,
}

/// An element of a custom directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomEntityElement {
    pub meta: Meta,
    pub id: String,
    #[serde(default)]
    pub account_id: Option<String>,
    pub name: String,
    #[serde(default, with = "datetime")]
    pub updated: Option<NaiveDateTime>,
    #[serde(default)]
    pub shared: Option<bool>,
    #[serde(flatten)]
    pub details: CustomEntityElementDetails,
}

/// Writable element fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomEntityElementDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Creates a custom directory.
#[derive(Clone, Debug, Serialize)]
pub struct CreateCustomEntity {
    pub name: String,
}

impl ApiRequest for CreateCustomEntity {
    type Response = CustomEntity;

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        Ok(HttpRequest::builder(HttpMethod::Post, COLLECTION)
            .body(serde_json::to_value(self)?)
            .build()?)
    }

    fn from_response(&self, value: Value) -> Result<Self::Response, HttpError> {
        parse_json("CreateCustomEntity", value)
    }
}

/// Renames a custom directory.
#[derive(Clone, Debug, Serialize)]
pub struct UpdateCustomEntity {
    #[serde(skip)]
    pub metadata_id: String,
    pub name: String,
}

impl ApiRequest for UpdateCustomEntity {
    type Response = CustomEntity;

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        Ok(
            HttpRequest::builder(HttpMethod::Put, entity_path(COLLECTION, &[&self.metadata_id]))
                .body(serde_json::to_value(self)?)
                .build()?,
        )
    }

    fn from_response(&self, value: Value) -> Result<Self::Response, HttpError> {
        parse_json("UpdateCustomEntity", value)
    }
}

/// Deletes a custom directory together with its elements.
#[derive(Clone, Debug)]
pub struct DeleteCustomEntity {
    pub metadata_id: String,
}

impl ApiRequest for DeleteCustomEntity {
    type Response = ();

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        Ok(
            HttpRequest::builder(HttpMethod::Delete, entity_path(COLLECTION, &[&self.metadata_id]))
                .allow_non_json(true)
                .build()?,
        )
    }

    fn from_response(&self, _value: Value) -> Result<Self::Response, HttpError> {
        Ok(())
    }
}

/// Lists the elements of a custom directory.
#[derive(Clone, Debug, Default)]
pub struct ListCustomEntityElements {
    pub metadata_id: String,
    pub params: ListParams,
}

impl ApiRequest for ListCustomEntityElements {
    type Response = Vec<CustomEntityElement>;

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        let builder =
            HttpRequest::builder(HttpMethod::Get, entity_path(COLLECTION, &[&self.metadata_id]));
        Ok(self.params.apply(builder).build()?)
    }

    fn from_response(&self, value: Value) -> Result<Self::Response, HttpError> {
        parse_rows("ListCustomEntityElements", value)
    }
}

/// Fetches one element of a custom directory.
#[derive(Clone, Debug)]
pub struct GetCustomEntityElement {
    pub metadata_id: String,
    pub element_id: String,
}

impl ApiRequest for GetCustomEntityElement {
    type Response = CustomEntityElement;

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        let path = entity_path(COLLECTION, &[&self.metadata_id, &self.element_id]);
        Ok(HttpRequest::builder(HttpMethod::Get, path).build()?)
    }

    fn from_response(&self, value: Value) -> Result<Self::Response, HttpError> {
        parse_json("GetCustomEntityElement", value)
    }
}

/// Adds an element to a custom directory.
#[derive(Clone, Debug, Serialize)]
pub struct CreateCustomEntityElement {
    #[serde(skip)]
    pub metadata_id: String,
    pub name: String,
    #[serde(flatten)]
    pub details: CustomEntityElementDetails,
}

impl ApiRequest for CreateCustomEntityElement {
    type Response = CustomEntityElement;

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        Ok(
            HttpRequest::builder(HttpMethod::Post, entity_path(COLLECTION, &[&self.metadata_id]))
                .body(serde_json::to_value(self)?)
                .build()?,
        )
    }

    fn from_response(&self, value: Value) -> Result<Self::Response, HttpError> {
        parse_json("CreateCustomEntityElement", value)
    }
}

/// Changes an element of a custom directory.
#[derive(Clone, Debug, Serialize)]
pub struct UpdateCustomEntityElement {
    #[serde(skip)]
    pub metadata_id: String,
    #[serde(skip)]
    pub element_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub details: CustomEntityElementDetails,
}

impl ApiRequest for UpdateCustomEntityElement {
    type Response = CustomEntityElement;

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        let path = entity_path(COLLECTION, &[&self.metadata_id, &self.element_id]);
        Ok(HttpRequest::builder(HttpMethod::Put, path)
            .body(serde_json::to_value(self)?)
            .build()?)
    }

    fn from_response(&self, value: Value) -> Result<Self::Response, HttpError> {
        parse_json("UpdateCustomEntityElement", value)
    }
}

/// Removes an element from a custom directory.
#[derive(Clone, Debug)]
pub struct DeleteCustomEntityElement {
    pub metadata_id: String,
    pub element_id: String,
}

impl ApiRequest for DeleteCustomEntityElement {
    type Response = ();

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        let path = entity_path(COLLECTION, &[&self.metadata_id, &self.element_id]);
        Ok(HttpRequest::builder(HttpMethod::Delete, path)
            .allow_non_json(true)
            .build()?)
    }

    fn from_response(&self, _value: Value) -> Result<Self::Response, HttpError> {
        Ok(())
    }
}
