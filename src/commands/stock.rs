//! `stock` command: set or adjust a product's stock count.

use crate::config::Config;
use crate::model::{RecordLocator, StockChange, Updated};
use crate::store::{self, CatalogStore};
use anyhow::Result;
use tracing::info;

/// Applies a stock mutation to one product.
pub struct StockCommand {
    config: Config,
    locator: RecordLocator,
    change: StockChange,
}

impl StockCommand {
    /// Creates a new stock command.
    pub fn new(config: Config, locator: RecordLocator, change: StockChange) -> Self {
        Self { config, locator, change }
    }

    /// Executes against the configured backend.
    pub async fn execute(&self) -> Result<String> {
        let store = store::connect(&self.config).await?;
        self.execute_with_store(store.as_ref()).await
    }

    /// Executes with a provided store (for testing).
    pub async fn execute_with_store(&self, store: &dyn CatalogStore) -> Result<String> {
        info!("Adjusting stock for {}: {:?}", self.locator, self.change);

        match store.adjust_stock(&self.locator, self.change).await? {
            Updated::Record(record) => {
                Ok(format!("Stock updated:\n{}", serde_json::to_string_pretty(&record)?))
            }
            Updated::Matched(0) => Ok(format!("Nothing updated (id={} not found)", self.locator)),
            Updated::Matched(_) => Ok(match self.change {
                StockChange::Set(n) => format!("Stock set to {}", n),
                StockChange::Add(n) => format!("Stock adjusted by {:+}", n),
                StockChange::Sub(n) => format!("Stock adjusted by {:+}", -n),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use serde_json::{json, Value};

    fn make_store(stock: i64) -> MemoryStore {
        let store = MemoryStore::new();
        let Value::Object(record) =
            json!({ "id": "p-1", "name": "Vase", "category": "Decor", "stock": stock })
        else {
            unreachable!()
        };
        store.seed(record);
        store
    }

    fn stock_of(store: &MemoryStore) -> i64 {
        store.records()[0]["stock"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_stock_set_is_absolute() {
        let store = make_store(7);
        let cmd =
            StockCommand::new(Config::default(), RecordLocator::new("p-1"), StockChange::Set(20));

        let output = cmd.execute_with_store(&store).await.unwrap();
        assert!(output.contains("Stock set to 20"));
        assert_eq!(stock_of(&store), 20);
    }

    #[tokio::test]
    async fn test_stock_add_increments() {
        let store = make_store(7);
        let cmd =
            StockCommand::new(Config::default(), RecordLocator::new("p-1"), StockChange::Add(3));

        let output = cmd.execute_with_store(&store).await.unwrap();
        assert!(output.contains("Stock adjusted by +3"));
        assert_eq!(stock_of(&store), 10);
    }

    #[tokio::test]
    async fn test_stock_sub_decrements() {
        let store = make_store(7);
        let cmd =
            StockCommand::new(Config::default(), RecordLocator::new("p-1"), StockChange::Sub(4));

        let output = cmd.execute_with_store(&store).await.unwrap();
        assert!(output.contains("Stock adjusted by -4"));
        assert_eq!(stock_of(&store), 3);
    }

    #[tokio::test]
    async fn test_stock_missing_id() {
        let store = make_store(7);
        let cmd =
            StockCommand::new(Config::default(), RecordLocator::new("ghost"), StockChange::Set(1));

        let output = cmd.execute_with_store(&store).await.unwrap();
        assert!(output.contains("Nothing updated"));
        assert_eq!(stock_of(&store), 7);
    }
}
