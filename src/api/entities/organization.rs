//! Legal entity operations (`entity/organization`).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::common::{datetime, ListParams, Meta};
use crate::api::{entity_path, parse_json, parse_rows, ApiRequest};
use crate::clients::{HttpError, HttpMethod, HttpRequest};

const COLLECTION: &str = "entity/organization";

/// One of the account's own legal entities.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub meta: Meta,
    pub id: String,
    #[serde(default)]
    pub account_id: Option<String>,
    pub name: String,
    #[serde(default, with = "datetime")]
    pub updated: Option<NaiveDateTime>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub external_code: Option<String>,
    #[serde(default)]
    pub archived: Option<bool>,
    /// Full legal name.
    #[serde(default)]
    pub legal_title: Option<String>,
    #[serde(default)]
    pub legal_address: Option<String>,
    /// Taxpayer identification number.
    #[serde(default)]
    pub inn: Option<String>,
    /// Tax registration reason code.
    #[serde(default)]
    pub kpp: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Lists the account's legal entities.
#[derive(Clone, Debug, Default)]
pub struct ListOrganizations {
    pub params: ListParams,
}

impl ApiRequest for ListOrganizations {
    type Response = Vec<Organization>;

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        let builder = HttpRequest::builder(HttpMethod::Get, COLLECTION);
        Ok(self.params.apply(builder).build()?)
    }

    fn from_response(&self, value: Value) -> Result<Self::Response, HttpError> {
        parse_rows("ListOrganizations", value)
    }
}

/// Fetches a legal entity by id.
#[derive(Clone, Debug)]
pub struct GetOrganization {
    pub id: String,
}

impl ApiRequest for GetOrganization {
    type Response = Organization;

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        Ok(HttpRequest::builder(HttpMethod::Get, entity_path(COLLECTION, &[&self.id])).build()?)
    }

    fn from_response(&self, value: Value) -> Result<Self::Response, HttpError> {
        parse_json("GetOrganization", value)
    }
}
