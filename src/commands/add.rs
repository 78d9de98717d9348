//! `add` command: create a single product.

use crate::config::Config;
use crate::model::{Created, NewProduct};
use crate::store::{self, CatalogStore};
use anyhow::Result;
use tracing::info;

/// Creates one product on the selected backend.
pub struct AddCommand {
    config: Config,
    product: NewProduct,
}

impl AddCommand {
    /// Creates a new add command.
    pub fn new(config: Config, product: NewProduct) -> Self {
        Self { config, product }
    }

    /// Executes against the configured backend.
    pub async fn execute(&self) -> Result<String> {
        let store = store::connect(&self.config).await?;
        self.execute_with_store(store.as_ref()).await
    }

    /// Executes with a provided store (for testing).
    pub async fn execute_with_store(&self, store: &dyn CatalogStore) -> Result<String> {
        info!("Creating product: {}", self.product.name);

        match store.create(&self.product).await? {
            Created::Record(record) => {
                Ok(format!("Created:\n{}", serde_json::to_string_pretty(&record)?))
            }
            Created::Id(id) => Ok(format!("Created product with id={}", id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use serde_json::json;

    fn make_product(name: &str, category: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: 49.0,
            category: category.to_string(),
            image: "/products/test.jpg".to_string(),
            description: String::new(),
            stock: 5,
            buy_url: None,
            active: true,
        }
    }

    #[tokio::test]
    async fn test_add_creates_record() {
        let store = MemoryStore::new();
        let cmd = AddCommand::new(Config::default(), make_product("Vase", "Decor"));

        let output = cmd.execute_with_store(&store).await.unwrap();
        assert!(output.contains("Created product with id=mem-1"));

        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"], json!("Vase"));
        assert_eq!(records[0]["stock"], json!(5));
        assert!(!records[0].contains_key("buyUrl"));
    }

    #[tokio::test]
    async fn test_added_product_appears_in_list() {
        let store = MemoryStore::new();
        let cmd = AddCommand::new(Config::default(), make_product("Vase", "Decor"));
        cmd.execute_with_store(&store).await.unwrap();

        let all = store.list(None).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Vase");

        let same_category = store.list(Some("Decor")).await.unwrap();
        assert_eq!(same_category.len(), 1);

        let other_category = store.list(Some("Miniatures")).await.unwrap();
        assert!(other_category.is_empty());
    }
}
