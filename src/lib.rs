//! catalog-cli - Product catalog manager with REST and MongoDB backends.
//!
//! Operation logic is written once against the [`store::CatalogStore`] trait;
//! the backend (REST API or direct MongoDB) is selected once at startup from
//! the configured environment.

pub mod commands;
pub mod config;
pub mod currency;
pub mod fields;
pub mod format;
pub mod model;
pub mod store;

pub use config::Config;
pub use model::{NewProduct, Product, RecordLocator, StockChange};
pub use store::CatalogStore;
