//! Webhook subscription operations (`entity/webhook`).
//!
//! A webhook makes the service POST a notification to `url` whenever an
//! entity of `entity_type` is created, updated, deleted or processed.
//!
//! # Example
//!
//! ```rust,ignore
//! use moysklad_api::api::entities::webhook::{CreateWebhook, WebhookAction};
//!
//! let hook = client
//!     .call(&CreateWebhook {
//!         url: "https://example.com/hooks/product".to_string(),
//!         action: WebhookAction::Update,
//!         entity_type: "product".to_string(),
//!         diff_type: None,
//!     })
//!     .await?;
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::common::{ListParams, Meta};
use crate::api::{entity_path, parse_json, parse_rows, ApiRequest};
use crate::clients::{HttpError, HttpMethod, HttpRequest};

const COLLECTION: &str = "entity/webhook";

/// The event a webhook reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WebhookAction {
    Create,
    Update,
    Delete,
    /// Asynchronous task processing finished.
    Processed,
}

/// How changed fields are reported for `UPDATE` webhooks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WebhookDiffType {
    /// No field information.
    None,
    /// The names of the changed fields are included.
    Fields,
}

/// A webhook subscription.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    pub meta: Meta,
    pub id: String,
    #[serde(default)]
    pub account_id: Option<String>,
    /// Type of the watched entity, e.g. `product`.
    pub entity_type: String,
    /// Notification target.
    pub url: String,
    pub action: WebhookAction,
    /// HTTP method used for notifications; always `POST`.
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub diff_type: Option<WebhookDiffType>,
}

/// Lists webhook subscriptions.
#[derive(Clone, Debug, Default)]
pub struct ListWebhooks {
    pub params: ListParams,
}

impl ApiRequest for ListWebhooks {
    type Response = Vec<Webhook>;

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        let builder = HttpRequest::builder(HttpMethod::Get, COLLECTION);
        Ok(self.params.apply(builder).build()?)
    }

    fn from_response(&self, value: Value) -> Result<Self::Response, HttpError> {
        parse_rows("ListWebhooks", value)
    }
}

/// Fetches a webhook by id.
#[derive(Clone, Debug)]
pub struct GetWebhook {
    pub id: String,
}

impl ApiRequest for GetWebhook {
    type Response = Webhook;

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        Ok(HttpRequest::builder(HttpMethod::Get, entity_path(COLLECTION, &[&self.id])).build()?)
    }

    fn from_response(&self, value: Value) -> Result<Self::Response, HttpError> {
        parse_json("GetWebhook", value)
    }
}

/// Subscribes to an entity event.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWebhook {
    pub url: String,
    pub action: WebhookAction,
    pub entity_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_type: Option<WebhookDiffType>,
}

impl ApiRequest for CreateWebhook {
    type Response = Webhook;

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        Ok(HttpRequest::builder(HttpMethod::Post, COLLECTION)
            .body(serde_json::to_value(self)?)
            .build()?)
    }

    fn from_response(&self, value: Value) -> Result<Self::Response, HttpError> {
        parse_json("CreateWebhook", value)
    }
}

/// Changes a webhook subscription. Unset fields are left as they are.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWebhook {
    #[serde(skip)]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<WebhookAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    /// Pauses (`false`) or resumes (`true`) notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_type: Option<WebhookDiffType>,
}

impl ApiRequest for UpdateWebhook {
    type Response = Webhook;

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        Ok(HttpRequest::builder(HttpMethod::Put, entity_path(COLLECTION, &[&self.id]))
            .body(serde_json::to_value(self)?)
            .build()?)
    }

    fn from_response(&self, value: Value) -> Result<Self::Response, HttpError> {
        parse_json("UpdateWebhook", value)
    }
}

/// Removes a webhook subscription.
#[derive(Clone, Debug)]
pub struct DeleteWebhook {
    pub id: String,
}

impl ApiRequest for DeleteWebhook {
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
