//! Report operations.

pub mod stock;

pub use stock::{CurrentStock, StockRow};
