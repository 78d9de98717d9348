//! `remove` command: delete a product by record locator.

use crate::config::Config;
use crate::model::RecordLocator;
use crate::store::{self, CatalogStore};
use anyhow::Result;
use tracing::info;

/// Removes one product from the selected backend.
pub struct RemoveCommand {
    config: Config,
    locator: RecordLocator,
}

impl RemoveCommand {
    /// Creates a new remove command.
    pub fn new(config: Config, locator: RecordLocator) -> Self {
        Self { config, locator }
    }

    /// Executes against the configured backend.
    pub async fn execute(&self) -> Result<String> {
        let store = store::connect(&self.config).await?;
        self.execute_with_store(store.as_ref()).await
    }

    /// Executes with a provided store (for testing).
    pub async fn execute_with_store(&self, store: &dyn CatalogStore) -> Result<String> {
        info!("Removing product: {}", self.locator);

        if store.remove(&self.locator).await? {
            Ok(format!("Removed product id={}", self.locator))
        } else {
            // Not-found is reported, not raised
            Ok(format!("Nothing removed (id={} not found)", self.locator))
        }
    }
}
