//! Types shared across the operation catalog.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::clients::HttpRequestBuilder;

/// Metadata object attached to every MoySklad entity and collection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    /// Link to the entity or collection.
    pub href: String,
    /// Link to the entity type metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_href: Option<String>,
    /// Entity type name.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    /// Response media type, usually `application/json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Link to the entity in the web UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid_href: Option<String>,
    /// Link for downloading a file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_href: Option<String>,
    /// Number of elements in a collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Page size of a collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Page offset of a collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// Link to the next page of a collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_href: Option<String>,
}

impl Meta {
    /// Creates an entity reference meta for use in request bodies.
    ///
    /// ```rust
    /// use moysklad_api::api::Meta;
    ///
    /// let meta = Meta::reference("https://api.moysklad.ru/api/remap/1.2/entity/productfolder/1", "productfolder");
    /// assert_eq!(meta.media_type.as_deref(), Some("application/json"));
    /// ```
    #[must_use]
    pub fn reference(href: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            entity_type: Some(entity_type.into()),
            media_type: Some("application/json".to_string()),
            ..Self::default()
        }
    }
}

/// A `{"meta": ...}` reference to another entity or collection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaRef {
    /// The referenced entity's metadata.
    pub meta: Meta,
}

impl From<Meta> for MetaRef {
    fn from(meta: Meta) -> Self {
        Self { meta }
    }
}

/// A paginated collection response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Collection metadata (size, limit, offset).
    #[serde(default)]
    pub meta: Option<Meta>,
    /// The entities on this page.
    #[serde(default = "Vec::new")]
    pub rows: Vec<T>,
}

/// Paging and filtering parameters accepted by collection endpoints.
///
/// ```rust
/// use moysklad_api::api::ListParams;
///
/// let params = ListParams {
///     limit: Some(100),
///     filter: Some("archived=false".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(params.offset, None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Page size; the API caps it at 1000.
    pub limit: Option<u32>,
    /// Number of rows to skip.
    pub offset: Option<u32>,
    /// Context search string.
    pub search: Option<String>,
    /// Filter expression, e.g. `archived=false;code=A-1`.
    pub filter: Option<String>,
    /// Sort expression, e.g. `name,desc`.
    pub order: Option<String>,
}

impl ListParams {
    pub(crate) fn apply(&self, builder: HttpRequestBuilder) -> HttpRequestBuilder {
        builder
            .optional_query_param("limit", self.limit)
            .optional_query_param("offset", self.offset)
            .optional_query_param("search", self.search.as_deref())
            .optional_query_param("filter", self.filter.as_deref())
            .optional_query_param("order", self.order.as_deref())
    }
}

/// A monetary value with an optional currency reference.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    /// Amount in kopecks.
    pub value: f64,
    /// Currency reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<MetaRef>,
}

/// A sale price bound to a price type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalePrice {
    /// Amount in kopecks.
    pub value: f64,
    /// Currency reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<MetaRef>,
    /// Price type reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_type: Option<MetaRef>,
}

/// Serde adapter for MoySklad timestamps (`2023-01-31 12:00:00.000`).
pub mod datetime {
    use super::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    /// The timestamp format used by the API.
    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

    /// Serializes an optional timestamp.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional timestamp; fractional seconds are optional.
    ///
    /// # Errors
    ///
    /// Fails if the string is not a MoySklad timestamp.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|s| {
                NaiveDateTime::parse_from_str(&s, FORMAT)
                    .or_else(|_| NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S"))
                    .map_err(serde::de::Error::custom)
            })
            .transpose()
    }
}
