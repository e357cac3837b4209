//! Directory entity operations.

pub mod custom_entity;
pub mod organization;
pub mod product;
pub mod product_folder;
pub mod webhook;

pub use custom_entity::{CustomEntity, CustomEntityElement};
pub use organization::Organization;
pub use product::Product;
pub use product_folder::ProductFolder;
pub use webhook::{Webhook, WebhookAction, WebhookDiffType};
