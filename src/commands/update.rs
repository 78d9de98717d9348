//! `update` command: apply a partial field update to a product.

use crate::config::Config;
use crate::model::{RecordLocator, Updated};
use crate::store::{self, CatalogStore};
use anyhow::Result;
use serde_json::{Map, Value};
use tracing::info;

/// Applies a typed field mapping as a partial update.
pub struct UpdateCommand {
    config: Config,
    locator: RecordLocator,
    fields: Map<String, Value>,
}

impl UpdateCommand {
    /// Creates a new update command. `fields` is the already-coerced mapping
    /// produced by [`crate::fields::parse_set_fields`].
    pub fn new(config: Config, locator: RecordLocator, fields: Map<String, Value>) -> Self {
        Self { config, locator, fields }
    }

    /// Executes against the configured backend.
    pub async fn execute(&self) -> Result<String> {
        let store = store::connect(&self.config).await?;
        self.execute_with_store(store.as_ref()).await
    }

    /// Executes with a provided store (for testing).
    pub async fn execute_with_store(&self, store: &dyn CatalogStore) -> Result<String> {
        info!("Updating {} field(s) on {}", self.fields.len(), self.locator);

        match store.update(&self.locator, &self.fields).await? {
            Updated::Record(record) => {
                Ok(format!("Updated:\n{}", serde_json::to_string_pretty(&record)?))
            }
            Updated::Matched(0) => Ok(format!("Nothing updated (id={} not found)", self.locator)),
            Updated::Matched(_) => {
                Ok(format!("Updated {} field(s) on id={}", self.fields.len(), self.locator))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;
    use crate::store::memory::MemoryStore;
    use serde_json::json;

    fn make_store() -> MemoryStore {
        let store = MemoryStore::new();
        let Value::Object(record) = json!({
            "id": "p-1",
            "name": "Vase",
            "price": 49.0,
            "category": "Decor",
            "stock": 5,
            "active": false
        }) else {
            unreachable!()
        };
        store.seed(record);
        store
    }

    #[tokio::test]
    async fn test_update_changes_exactly_named_fields() {
        let store = make_store();
        let fields = fields::parse_set_fields("price=59.9,active=true").unwrap();
        let cmd = UpdateCommand::new(Config::default(), RecordLocator::new("p-1"), fields);

        let output = cmd.execute_with_store(&store).await.unwrap();
        assert!(output.contains("Updated 2 field(s) on id=p-1"));

        let record = &store.records()[0];
        assert_eq!(record["price"], json!(59.9));
        assert_eq!(record["active"], json!(true));
        // Untouched fields keep their values
        assert_eq!(record["name"], json!("Vase"));
        assert_eq!(record["category"], json!("Decor"));
        assert_eq!(record["stock"], json!(5));
    }

    #[tokio::test]
    async fn test_update_missing_id() {
        let store = make_store();
        let fields = fields::parse_set_fields("name=New").unwrap();
        let cmd = UpdateCommand::new(Config::default(), RecordLocator::new("ghost"), fields);

        let output = cmd.execute_with_store(&store).await.unwrap();
        assert!(output.contains("Nothing updated"));
        assert_eq!(store.records()[0]["name"], json!("Vase"));
    }
}
