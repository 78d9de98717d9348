//! MongoDB fallback backend operating directly on the products collection.

use crate::model::{Created, NewProduct, Product, RecordLocator, StockChange, Updated};
use crate::store::CatalogStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, Bson, Document};
use mongodb::{Client, Collection};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Catalog store writing straight to a MongoDB collection.
pub struct MongoStore {
    collection: Collection<Document>,
}

impl MongoStore {
    /// Connects to the database and binds the products collection.
    pub async fn connect(uri: &str, db_name: &str, collection: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await.context("Failed to connect to MongoDB")?;
        let collection = client.database(db_name).collection(collection);
        Ok(Self { collection })
    }

    /// Filter addressing one record: hex-24 locators hit the native `_id`,
    /// anything else matches a plain string `id` field.
    fn locator_filter(locator: &RecordLocator) -> Result<Document> {
        if locator.is_object_id() {
            let oid = ObjectId::parse_str(locator.as_str())
                .with_context(|| format!("Invalid object id: {}", locator))?;
            Ok(doc! { "_id": oid })
        } else {
            Ok(doc! { "id": locator.as_str() })
        }
    }

    fn stock_update(change: StockChange) -> Document {
        match change {
            StockChange::Set(n) => doc! { "$set": { "stock": n } },
            // Relative changes apply as one atomic increment
            StockChange::Add(n) => doc! { "$inc": { "stock": n } },
            StockChange::Sub(n) => doc! { "$inc": { "stock": -n } },
        }
    }

    /// Converts a stored document to the read model, hex-encoding a native
    /// `_id` into the `id` field when no plain id is present.
    fn document_to_product(mut document: Document) -> Result<Product> {
        match document.remove("_id") {
            Some(Bson::ObjectId(oid)) if !document.contains_key("id") => {
                document.insert("id", oid.to_hex());
            }
            Some(Bson::String(s)) if !document.contains_key("id") => {
                document.insert("id", s);
            }
            _ => {}
        }
        bson::from_document(document).context("Malformed product document")
    }
}

#[async_trait]
impl CatalogStore for MongoStore {
    async fn create(&self, product: &NewProduct) -> Result<Created> {
        let document = bson::to_document(product).context("Failed to serialize product")?;
        let result =
            self.collection.insert_one(document).await.context("Failed to insert product")?;

        let id = match result.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        };
        Ok(Created::Id(id))
    }

    async fn create_many(&self, items: &[Map<String, Value>]) -> Result<usize> {
        if items.is_empty() {
            return Ok(0);
        }

        let documents: Vec<Document> = items
            .iter()
            .map(|item| bson::to_document(item).context("Failed to serialize import item"))
            .collect::<Result<_>>()?;

        let result =
            self.collection.insert_many(documents).await.context("Failed to insert products")?;
        Ok(result.inserted_ids.len())
    }

    async fn list(&self, category: Option<&str>) -> Result<Vec<Product>> {
        let filter = match category {
            Some(c) => doc! { "category": c },
            None => doc! {},
        };

        let mut cursor =
            self.collection.find(filter).await.context("Failed to query products")?;

        let mut products = Vec::new();
        while let Some(document) =
            cursor.try_next().await.context("Failed to read product cursor")?
        {
            match Self::document_to_product(document) {
                Ok(product) => products.push(product),
                Err(e) => warn!("Skipping unreadable product document: {}", e),
            }
        }
        Ok(products)
    }

    async fn remove(&self, locator: &RecordLocator) -> Result<bool> {
        let filter = Self::locator_filter(locator)?;
        let result =
            self.collection.delete_one(filter).await.context("Failed to delete product")?;
        Ok(result.deleted_count > 0)
    }

    async fn adjust_stock(&self, locator: &RecordLocator, change: StockChange) -> Result<Updated> {
        let filter = Self::locator_filter(locator)?;
        let update = Self::stock_update(change);

        let result =
            self.collection.update_one(filter, update).await.context("Failed to update stock")?;
        debug!("Stock update matched {} record(s)", result.matched_count);
        Ok(Updated::Matched(result.matched_count))
    }

    async fn update(
        &self,
        locator: &RecordLocator,
        fields: &Map<String, Value>,
    ) -> Result<Updated> {
        let filter = Self::locator_filter(locator)?;
        let set = bson::to_document(fields).context("Failed to serialize update fields")?;

        let result = self
            .collection
            .update_one(filter, doc! { "$set": set })
            .await
            .context("Failed to update product")?;
        Ok(Updated::Matched(result.matched_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_filter_object_id() {
        let filter =
            MongoStore::locator_filter(&RecordLocator::new("66f3a1b2c3d4e5f60718293a")).unwrap();
        let oid = ObjectId::parse_str("66f3a1b2c3d4e5f60718293a").unwrap();
        assert_eq!(filter, doc! { "_id": oid });
    }

    #[test]
    fn test_locator_filter_plain_id() {
        let filter = MongoStore::locator_filter(&RecordLocator::new("vase-1")).unwrap();
        assert_eq!(filter, doc! { "id": "vase-1" });

        // Uppercase hex is not the native form, so it matches the string field
        let filter =
            MongoStore::locator_filter(&RecordLocator::new("66F3A1B2C3D4E5F60718293A")).unwrap();
        assert_eq!(filter, doc! { "id": "66F3A1B2C3D4E5F60718293A" });
    }

    #[test]
    fn test_stock_update_documents() {
        assert_eq!(
            MongoStore::stock_update(StockChange::Set(20)),
            doc! { "$set": { "stock": 20_i64 } }
        );
        assert_eq!(
            MongoStore::stock_update(StockChange::Add(5)),
            doc! { "$inc": { "stock": 5_i64 } }
        );
        assert_eq!(
            MongoStore::stock_update(StockChange::Sub(3)),
            doc! { "$inc": { "stock": -3_i64 } }
        );
    }

    #[test]
    fn test_document_to_product_hex_encodes_native_id() {
        let oid = ObjectId::parse_str("66f3a1b2c3d4e5f60718293a").unwrap();
        let document = doc! {
            "_id": oid,
            "name": "Vase",
            "price": 49.9,
            "category": "Decor",
            "stock": 12_i64,
            "active": true,
        };

        let product = MongoStore::document_to_product(document).unwrap();
        assert_eq!(product.id.as_deref(), Some("66f3a1b2c3d4e5f60718293a"));
        assert_eq!(product.name, "Vase");
        assert_eq!(product.price, Some(49.9));
        assert_eq!(product.stock, 12);
    }

    #[test]
    fn test_document_to_product_prefers_existing_plain_id() {
        let oid = ObjectId::parse_str("66f3a1b2c3d4e5f60718293a").unwrap();
        let document = doc! { "_id": oid, "id": "vase-1", "name": "Vase" };

        let product = MongoStore::document_to_product(document).unwrap();
        assert_eq!(product.id.as_deref(), Some("vase-1"));
    }

    #[test]
    fn test_document_to_product_partial_document() {
        let product = MongoStore::document_to_product(doc! { "name": "Bare" }).unwrap();
        assert_eq!(product.name, "Bare");
        assert!(product.id.is_none());
        assert!(product.price.is_none());
        assert_eq!(product.stock, 0);
        assert!(product.active);
    }

    #[test]
    fn test_document_to_product_integer_price() {
        // Records written by other tools may store whole prices as integers
        let product =
            MongoStore::document_to_product(doc! { "name": "Mini", "price": 49_i32 }).unwrap();
        assert_eq!(product.price, Some(49.0));
    }
}
