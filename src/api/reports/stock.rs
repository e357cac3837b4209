//! Stock reports (`report/stock/all`, `report/stock/all/current`).
//!
//! The full report is a paginated list response with prices and folder
//! information. The current report is a bare JSON array of
//! `(assortmentId, stock)` pairs meant for frequent polling.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::common::{datetime, ListParams, Meta, MetaRef};
use crate::api::{parse_json, parse_rows, ApiRequest};
use crate::clients::{HttpError, HttpMethod, HttpRequest};

/// Which rows the full report includes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StockMode {
    /// Every item, whatever its stock.
    All,
    /// Items with stock above zero.
    PositiveOnly,
    /// Items with stock below zero.
    NegativeOnly,
    /// Items with zero stock.
    Empty,
    /// Items with non-zero stock.
    NonEmpty,
    /// Items whose stock is below their minimum balance.
    UnderMinimum,
}

impl StockMode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::PositiveOnly => "positiveOnly",
            Self::NegativeOnly => "negativeOnly",
            Self::Empty => "empty",
            Self::NonEmpty => "nonEmpty",
            Self::UnderMinimum => "underMinimum",
        }
    }
}

/// Row grouping of the full report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StockGroupBy {
    /// One row per product; variants are folded in.
    Product,
    /// One row per product and per variant.
    Variant,
    /// One row per product, variant and consignment.
    Consignment,
}

impl StockGroupBy {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Variant => "variant",
            Self::Consignment => "consignment",
        }
    }
}

/// Folder information attached to a stock row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockFolder {
    /// Link to the product folder.
    pub href: String,
    /// Folder name.
    pub name: String,
    /// Names of the parent folders, `/`-separated.
    #[serde(default)]
    pub path_name: Option<String>,
}

/// One row of the full stock report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRow {
    /// Metadata of the assortment item the row describes.
    pub meta: Meta,
    /// Item name.
    pub name: String,
    /// Item code.
    #[serde(default)]
    pub code: Option<String>,
    /// Article number.
    #[serde(default)]
    pub article: Option<String>,
    /// Code in an external system.
    #[serde(default)]
    pub external_code: Option<String>,
    /// Physical stock.
    #[serde(default)]
    pub stock: f64,
    /// Reserved quantity.
    #[serde(default)]
    pub reserve: f64,
    /// Quantity awaiting arrival.
    #[serde(default)]
    pub in_transit: f64,
    /// Available quantity (`stock - reserve + in_transit`).
    #[serde(default)]
    pub quantity: f64,
    /// Cost price in kopecks.
    #[serde(default)]
    pub price: Option<f64>,
    /// Sale price in kopecks.
    #[serde(default)]
    pub sale_price: Option<f64>,
    /// Days the item has been in stock.
    #[serde(default)]
    pub stock_days: Option<f64>,
    /// Product folder of the item.
    #[serde(default)]
    pub folder: Option<StockFolder>,
    /// Unit of measure reference.
    #[serde(default)]
    pub uom: Option<MetaRef>,
}

/// Fetches the full stock report.
///
/// ```rust
/// use moysklad_api::api::reports::stock::{GetFullStockReport, StockMode};
/// use moysklad_api::api::ApiRequest;
///
/// let op = GetFullStockReport {
///     stock_mode: Some(StockMode::PositiveOnly),
///     ..Default::default()
/// };
/// let request = op.to_request().unwrap();
/// assert_eq!(request.path, "report/stock/all");
/// assert_eq!(request.query.unwrap()["filter"], "stockMode=positiveOnly");
/// ```
#[derive(Clone, Debug, Default)]
pub struct GetFullStockReport {
    /// Paging, search, filter and sort parameters.
    pub params: ListParams,
    /// Appended to the filter as `stockMode=...`.
    pub stock_mode: Option<StockMode>,
    /// Row grouping; the API groups by product when unset.
    pub group_by: Option<StockGroupBy>,
}

impl ApiRequest for GetFullStockReport {
    type Response = Vec<StockRow>;

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        let mut params = self.params.clone();
        if let Some(mode) = self.stock_mode {
            let clause = format!("stockMode={}", mode.as_str());
            params.filter = Some(match params.filter.take() {
                Some(filter) if !filter.is_empty() => format!("{filter};{clause}"),
                _ => clause,
            });
        }

        let builder = HttpRequest::builder(HttpMethod::Get, "report/stock/all")
            .optional_query_param("groupBy", self.group_by.map(StockGroupBy::as_str));
        Ok(params.apply(builder).build()?)
    }

    fn from_response(&self, value: Value) -> Result<Self::Response, HttpError> {
        parse_rows("GetFullStockReport", value)
    }
}

/// Which quantity the current report returns in `stock`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StockType {
    /// Physical stock.
    Stock,
    /// Stock minus reserve.
    FreeStock,
    /// Available quantity, including goods in transit.
    Quantity,
    /// Reserved quantity.
    Reserve,
    /// Quantity awaiting arrival.
    InTransit,
}

impl StockType {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Stock => "stock",
            Self::FreeStock => "freeStock",
            Self::Quantity => "quantity",
            Self::Reserve => "reserve",
            Self::InTransit => "inTransit",
        }
    }
}

/// One row of the current stock report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentStock {
    /// Id of the product, variant or service.
    pub assortment_id: String,
    /// The quantity selected by [`StockType`].
    pub stock: f64,
}

/// Fetches current stock levels.
#[derive(Clone, Debug, Default)]
pub struct GetCurrentStockReport {
    /// Quantity to report; the API reports physical stock when unset.
    pub stock_type: Option<StockType>,
    /// Include items with zero stock.
    pub include_zero_lines: bool,
    /// Only items whose stock changed after this moment.
    pub changed_since: Option<NaiveDateTime>,
}

impl ApiRequest for GetCurrentStockReport {
    type Response = Vec<CurrentStock>;

    fn to_request(&self) -> Result<HttpRequest, HttpError> {
        let mut builder = HttpRequest::builder(HttpMethod::Get, "report/stock/all/current")
            .optional_query_param("stockType", self.stock_type.map(StockType::as_str))
            .optional_query_param(
                "changedSince",
                self.changed_since.map(|moment| moment.format(datetime::FORMAT).to_string()),
            );
        if self.include_zero_lines {
            builder = builder.query_param("include", "zeroLines");
        }
        Ok(builder.build()?)
    }

    fn from_response(&self, value: Value) -> Result<Self::Response, HttpError> {
        parse_json("GetCurrentStockReport", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_full_report_merges_stock_mode_into_filter() {
        let op = GetFullStockReport {
            params: ListParams {
                filter: Some("archived=false".to_string()),
                ..Default::default()
            },
            stock_mode: Some(StockMode::NonEmpty),
            group_by: Some(StockGroupBy::Variant),
        };
        let query = op.to_request().unwrap().query.unwrap();

        assert_eq!(query["filter"], "archived=false;stockMode=nonEmpty");
        assert_eq!(query["groupBy"], "variant");
    }

    #[test]
    fn test_full_report_rows() {
        let rows = GetFullStockReport::default()
            .from_response(json!({
                "meta": {"href": "https://api.moysklad.ru/api/remap/1.2/report/stock/all", "size": 1},
                "rows": [{
                    "meta": {"href": "https://api.moysklad.ru/api/remap/1.2/entity/product/p-1", "type": "product"},
                    "name": "Карандаш",
                    "stock": 10.0,
                    "reserve": 2.0,
                    "inTransit": 1.0,
                    "quantity": 9.0,
                    "price": 1500.0,
                    "folder": {"href": "https://api.moysklad.ru/api/remap/1.2/entity/productfolder/f-1", "name": "Канцелярия"}
                }]
            }))
            .unwrap();

        assert_eq!(rows[0].quantity, 9.0);
        assert_eq!(rows[0].folder.as_ref().map(|f| f.name.as_str()), Some("Канцелярия"));
    }

    #[test]
    fn test_current_report_query_and_bare_array() {
        let op = GetCurrentStockReport {
            stock_type: Some(StockType::FreeStock),
            include_zero_lines: true,
            changed_since: NaiveDate::from_ymd_opt(2024, 3, 1)
                .and_then(|d| d.and_hms_opt(9, 30, 0)),
        };
        let request = op.to_request().unwrap();
        let query = request.query.unwrap();

        assert_eq!(request.path, "report/stock/all/current");
        assert_eq!(query["stockType"], "freeStock");
        assert_eq!(query["include"], "zeroLines");
        assert_eq!(query["changedSince"], "2024-03-01 09:30:00.000");

        let stock = op
            .from_response(json!([
                {"assortmentId": "a-1", "stock": 3.0},
                {"assortmentId": "a-2", "stock": 0.0}
            ]))
            .unwrap();
        assert_eq!(stock.len(), 2);
        assert_eq!(stock[0].assortment_id, "a-1");
    }

    #[test]
    fn test_current_report_defaults_send_no_query() {
        let request = GetCurrentStockReport::default().to_request().unwrap();
        assert!(request.query.is_none());
    }
}
