//! REST backend talking to the catalog API over HTTP.

use crate::model::{Created, NewProduct, Product, RecordLocator, StockChange, Updated};
use crate::store::CatalogStore;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Catalog store backed by the REST API at a configured base URL.
pub struct ApiStore {
    client: reqwest::Client,
    base_url: String,
}

impl ApiStore {
    /// Creates a store for the given base URL with a fixed per-call timeout.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Checks the status and decodes the body. Non-2xx responses surface the
    /// body text; an empty 2xx body (some DELETE handlers) decodes to null.
    async fn read_json(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let body = response.text().await.context("Failed to read response body")?;

        if !status.is_success() {
            let detail = body.trim();
            if detail.is_empty() {
                bail!("API request failed with status {}", status);
            }
            bail!("API request failed with status {}: {}", status, detail);
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).context("API returned invalid JSON")
    }

    async fn get(&self, path: &str, query: Option<(&str, &str)>) -> Result<Value> {
        let mut request = self.client.get(self.url(path));
        if let Some((key, value)) = query {
            request = request.query(&[(key, value)]);
        }
        debug!("GET {}", self.url(path));
        let response = request.send().await.context("Failed to send GET request")?;
        Self::read_json(response).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        debug!("POST {}", self.url(path));
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .context("Failed to send POST request")?;
        Self::read_json(response).await
    }

    async fn patch(&self, path: &str, body: &Value) -> Result<Value> {
        debug!("PATCH {}", self.url(path));
        let response = self
            .client
            .patch(self.url(path))
            .json(body)
            .send()
            .await
            .context("Failed to send PATCH request")?;
        Self::read_json(response).await
    }

    async fn delete(&self, path: &str) -> Result<Value> {
        debug!("DELETE {}", self.url(path));
        let response =
            self.client.delete(self.url(path)).send().await.context("Failed to send DELETE request")?;
        Self::read_json(response).await
    }

    fn product_path(locator: &RecordLocator) -> String {
        format!("/api/products/{}", locator)
    }
}

#[async_trait]
impl CatalogStore for ApiStore {
    async fn create(&self, product: &NewProduct) -> Result<Created> {
        let body = serde_json::to_value(product).context("Failed to serialize product")?;
        let created = self.post("/api/products", &body).await?;
        Ok(Created::Record(created))
    }

    async fn create_many(&self, items: &[Map<String, Value>]) -> Result<usize> {
        // Try the bulk endpoint once; any failure falls back to per-item
        // creation in sequence.
        let payload = json!({ "items": items });
        match self.post("/api/products/bulk", &payload).await {
            Ok(_) => {
                info!("Imported {} items via bulk endpoint", items.len());
                Ok(items.len())
            }
            Err(e) => {
                warn!("Bulk endpoint unavailable ({}), creating items individually", e);
                for item in items {
                    self.post("/api/products", &Value::Object(item.clone())).await?;
                }
                Ok(items.len())
            }
        }
    }

    async fn list(&self, category: Option<&str>) -> Result<Vec<Product>> {
        let query = category.map(|c| ("category", c));
        let data = self.get("/api/products", query).await?;

        // The API returns either a bare array or an {items: [...]} wrapper.
        let items = match data {
            Value::Array(items) => items,
            Value::Object(mut obj) => match obj.remove("items") {
                Some(Value::Array(items)) => items,
                _ => bail!("Unexpected list response shape (expected array or {{items: [...]}})"),
            },
            _ => bail!("Unexpected list response shape (expected array or {{items: [...]}})"),
        };

        items
            .into_iter()
            .map(|item| {
                serde_json::from_value(item).context("Malformed product in list response")
            })
            .collect()
    }

    async fn remove(&self, locator: &RecordLocator) -> Result<bool> {
        self.delete(&Self::product_path(locator)).await?;
        Ok(true)
    }

    async fn adjust_stock(&self, locator: &RecordLocator, change: StockChange) -> Result<Updated> {
        let body = match change {
            StockChange::Set(n) => json!({ "stock": n }),
            StockChange::Add(n) => json!({ "stock_delta": n }),
            StockChange::Sub(n) => json!({ "stock_delta": -n }),
        };
        let updated = self.patch(&Self::product_path(locator), &body).await?;
        Ok(Updated::Record(updated))
    }

    async fn update(
        &self,
        locator: &RecordLocator,
        fields: &Map<String, Value>,
    ) -> Result<Updated> {
        let updated =
            self.patch(&Self::product_path(locator), &Value::Object(fields.clone())).await?;
        Ok(Updated::Record(updated))
    }
}
