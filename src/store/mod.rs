//! Storage backends for product records.
//!
//! Both backends expose the same capability through [`CatalogStore`], so
//! each operation is implemented once and the backend is chosen once at
//! startup by [`connect`].

pub mod api;
pub mod mongo;

use crate::config::Config;
use crate::model::{Created, NewProduct, Product, RecordLocator, StockChange, Updated};
use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

/// Storage capability shared by the REST and MongoDB backends.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Creates one product.
    async fn create(&self, product: &NewProduct) -> Result<Created>;

    /// Persists a batch of already-normalized product records and returns
    /// the number of items processed.
    async fn create_many(&self, items: &[Map<String, Value>]) -> Result<usize>;

    /// Lists products. `category` is an already-normalized filter;
    /// `None` means every category.
    async fn list(&self, category: Option<&str>) -> Result<Vec<Product>>;

    /// Deletes one product; reports whether anything was deleted.
    async fn remove(&self, locator: &RecordLocator) -> Result<bool>;

    /// Applies a stock mutation.
    async fn adjust_stock(&self, locator: &RecordLocator, change: StockChange) -> Result<Updated>;

    /// Applies a partial update with the given typed field mapping.
    async fn update(&self, locator: &RecordLocator, fields: &Map<String, Value>)
        -> Result<Updated>;
}

/// True for category values that mean "no filter".
pub fn is_wildcard_category(category: &str) -> bool {
    category.is_empty() || category.eq_ignore_ascii_case("all")
}

/// Selects the backend: REST when an API base URL is configured, MongoDB
/// otherwise. Missing MongoDB settings in fallback mode is a fatal error,
/// reported before any network or database call.
pub async fn connect(config: &Config) -> Result<Box<dyn CatalogStore>> {
    if let Some(url) = &config.api_url {
        debug!("Using REST backend at {}", url);
        return Ok(Box::new(api::ApiStore::new(url, config.timeout_secs)?));
    }

    let (Some(mongo_url), Some(db_name)) = (&config.mongo_url, &config.db_name) else {
        bail!(
            "No backend configured: set BACKEND_URL (or REACT_APP_BACKEND_URL) \
             to use the REST API, or MONGO_URL and DB_NAME for direct MongoDB access"
        );
    };

    debug!("Using MongoDB backend, database {}", db_name);
    let store = mongo::MongoStore::connect(mongo_url, db_name, &config.collection).await?;
    Ok(Box::new(store))
}
