//! Document operations.

pub mod internal_order;

pub use internal_order::InternalOrder;
