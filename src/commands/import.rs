//! `import` command: bulk-create products from a JSON file.

use crate::config::Config;
use crate::currency;
use crate::store::{self, CatalogStore};
use anyhow::{bail, Context, Result};
use serde_json::{Map, Number, Value};
use std::path::PathBuf;
use tracing::info;

/// Imports a JSON array of product records.
pub struct ImportCommand {
    config: Config,
    file: PathBuf,
}

impl ImportCommand {
    /// Creates a new import command.
    pub fn new(config: Config, file: PathBuf) -> Self {
        Self { config, file }
    }

    /// Executes against the configured backend.
    pub async fn execute(&self) -> Result<String> {
        let store = store::connect(&self.config).await?;
        self.execute_with_store(store.as_ref()).await
    }

    /// Executes with a provided store (for testing). The whole file is
    /// validated and normalized before any write.
    pub async fn execute_with_store(&self, store: &dyn CatalogStore) -> Result<String> {
        let items = self.load_items()?;
        info!("Importing {} item(s) from {}", items.len(), self.file.display());

        let count = store.create_many(&items).await?;
        Ok(format!("Imported {} product(s)", count))
    }

    fn load_items(&self) -> Result<Vec<Map<String, Value>>> {
        let content = std::fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read import file: {}", self.file.display()))?;

        let data: Value = serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in import file: {}", self.file.display()))?;

        let Value::Array(entries) = data else {
            bail!("Import file must contain a JSON array of products");
        };

        entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| normalize_item(index, entry))
            .collect()
    }
}

/// Normalizes one import record: `price` through the currency normalizer,
/// `stock` to an integer. Any failure aborts the whole import.
fn normalize_item(index: usize, entry: Value) -> Result<Map<String, Value>> {
    let Value::Object(mut item) = entry else {
        bail!("Item #{} is not an object", index + 1);
    };

    if let Some(price) = item.get("price") {
        let amount = currency::to_number(price)
            .with_context(|| format!("Item #{}: invalid price {}", index + 1, price))?;
        let number = Number::from_f64(amount)
            .with_context(|| format!("Item #{}: invalid price {}", index + 1, price))?;
        item.insert("price".to_string(), Value::Number(number));
    }

    if let Some(stock) = item.get("stock") {
        let count = currency::to_integer(stock)
            .with_context(|| format!("Item #{}: invalid stock {}", index + 1, stock))?;
        item.insert("stock".to_string(), Value::from(count));
    }

    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[tokio::test]
    async fn test_import_three_products() {
        let file = write_file(
            r#"[
                { "name": "A", "price": "R$ 10,00", "category": "Decor", "stock": "2" },
                { "name": "B", "price": 20, "category": "Decor" },
                { "name": "C", "price": 30.5, "category": "Miniatures", "stock": 1 }
            ]"#,
        );

        let store = MemoryStore::new();
        let cmd = ImportCommand::new(Config::default(), file.path().to_path_buf());

        let output = cmd.execute_with_store(&store).await.unwrap();
        assert!(output.contains("Imported 3 product(s)"));

        let records = store.records();
        assert_eq!(records.len(), 3);
        // Normalized before persistence
        assert_eq!(records[0]["price"], json!(10.0));
        assert_eq!(records[0]["stock"], json!(2));
        assert_eq!(records[1]["price"], json!(20.0));

        // All three retrievable via list
        let products = store.list(None).await.unwrap();
        assert_eq!(products.len(), 3);
    }

    #[tokio::test]
    async fn test_import_missing_file_is_fatal() {
        let store = MemoryStore::new();
        let cmd =
            ImportCommand::new(Config::default(), PathBuf::from("/nonexistent/products.json"));

        let err = cmd.execute_with_store(&store).await.unwrap_err().to_string();
        assert!(err.contains("Failed to read import file"));
        assert!(store.records().is_empty());
    }

    #[tokio::test]
    async fn test_import_rejects_non_array() {
        let file = write_file(r#"{ "name": "A" }"#);
        let store = MemoryStore::new();
        let cmd = ImportCommand::new(Config::default(), file.path().to_path_buf());

        let err = cmd.execute_with_store(&store).await.unwrap_err().to_string();
        assert!(err.contains("JSON array"));
        assert!(store.records().is_empty());
    }

    #[tokio::test]
    async fn test_import_bad_price_aborts_before_any_write() {
        let file = write_file(
            r#"[
                { "name": "A", "price": 10 },
                { "name": "B", "price": "not a price" }
            ]"#,
        );

        let store = MemoryStore::new();
        let cmd = ImportCommand::new(Config::default(), file.path().to_path_buf());

        let err = cmd.execute_with_store(&store).await.unwrap_err().to_string();
        assert!(err.contains("Item #2"));
        assert!(store.records().is_empty());
    }

    #[test]
    fn test_normalize_item_leaves_other_fields_alone() {
        let item = normalize_item(
            0,
            json!({ "name": "A", "price": "59,90", "buyUrl": "https://example.com" }),
        )
        .unwrap();
        assert_eq!(item["price"], json!(59.9));
        assert_eq!(item["buyUrl"], json!("https://example.com"));
        assert!(!item.contains_key("stock"));
    }

    #[test]
    fn test_normalize_item_rejects_non_object() {
        let err = normalize_item(4, json!("scalar")).unwrap_err().to_string();
        assert!(err.contains("Item #5"));
    }
}
