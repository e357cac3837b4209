//! Internal order operations (`entity/internalorder`).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::common::{datetime, ListParams, Meta, MetaRef};
use crate::api::{entity_path, parse_json, parse_rows, ApiRequest};
use crate::clients::{HttpError, HttpMethod, HttpRequest};

const COLLECTION: &str = "entity/internalorder";

/// An internal order: a request to move or replenish goods between the
/// account's own stores.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalOrder {
    pub meta: Meta,
    pub id: String,
    #[serde(default)]
    pub account_id: Option<String>,
    /// Document number.
    pub name: String,
    #[serde(default, with = "datetime")]
    pub updated: Option<NaiveDateTime>,
    /// Document date.
    #[serde(default, with = "datetime")]
    pub moment: Option<NaiveDateTime>,
    /// Whether the document is posted.
    #[serde(default)]
    pub applicable: Option<bool>,
    /// Total in kopecks.
    #[serde(default)]
    pub sum: Option<f64>,
    #[serde(default)]
    pub vat_enabled: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub organization: Option<MetaRef>,
    /// Target store.
    #[serde(default)]
    pub store: Option<MetaRef>,
    /// Collection reference to the order positions.
    #[serde(default)]
    pub positions: Option<MetaRef>,
}

/// Lists internal orders.
#[derive(Clone, Debug, Default)]
pub struct ListInternalOrders {
    pub params: ListParams,
}

impl ApiRequest for ListInternalOrders {
    type Response = Vec<InternalOrder>;

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        let builder = HttpRequest::builder(HttpMethod::Get, COLLECTION);
        Ok(self.params.apply(builder).build()?)
    }

    fn from_response(&self, value: Value) -> Result<Self::Response, HttpError> {
        parse_rows("ListInternalOrders", value)
    }
}

/// Fetches an internal order by id.
#[derive(Clone, Debug)]
pub struct GetInternalOrder {
    pub id: String,
}

impl ApiRequest for GetInternalOrder {
    type Response = InternalOrder;

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        Ok(HttpRequest::builder(HttpMethod::Get, entity_path(COLLECTION, &[&self.id])).build()?)
    }

    fn from_response(&self, value: Value) -> Result<Self::Response, HttpError> {
        parse_json("GetInternalOrder", value)
    }
}
