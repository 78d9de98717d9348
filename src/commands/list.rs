//! `list` command: list products, optionally filtered by category.

use crate::config::Config;
use crate::format::Formatter;
use crate::store::{self, CatalogStore};
use anyhow::Result;
use tracing::info;

/// Lists products from the selected backend.
pub struct ListCommand {
    config: Config,
    category: Option<String>,
}

impl ListCommand {
    /// Creates a new list command.
    pub fn new(config: Config, category: Option<String>) -> Self {
        Self { config, category }
    }

    /// Executes against the configured backend.
    pub async fn execute(&self) -> Result<String> {
        let store = store::connect(&self.config).await?;
        self.execute_with_store(store.as_ref()).await
    }

    /// Executes with a provided store (for testing).
    pub async fn execute_with_store(&self, store: &dyn CatalogStore) -> Result<String> {
        // The wildcard value means "no filter"
        let filter =
            self.category.as_deref().filter(|category| !store::is_wildcard_category(category));

        let products = store.list(filter).await?;
        info!("Found {} product(s)", products.len());

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_products(&products))
    }
}
