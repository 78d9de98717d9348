//! Data models for catalog products and record addressing.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Payload for creating a product.
///
/// Optional fields that were not supplied are omitted from the serialized
/// body rather than sent as null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    /// Product name
    pub name: String,
    /// Price, already normalized to a number
    pub price: f64,
    /// Category name
    pub category: String,
    /// Image URL or public path
    pub image: String,
    /// Free-text description (empty by default)
    #[serde(default)]
    pub description: String,
    /// Units in stock
    #[serde(default)]
    pub stock: i64,
    /// External purchase link
    #[serde(rename = "buyUrl", skip_serializing_if = "Option::is_none")]
    pub buy_url: Option<String>,
    /// Whether the product is visible in the storefront
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Read model for listing. Lenient on purpose: backend records created by
/// other tools may miss fields, and a partial record should still list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    /// Backend-assigned identifier (string `id` field or hex-encoded `_id`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub description: String,
    pub stock: i64,
    #[serde(rename = "buyUrl", skip_serializing_if = "Option::is_none")]
    pub buy_url: Option<String>,
    pub active: bool,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            price: None,
            category: String::new(),
            image: None,
            description: String::new(),
            stock: 0,
            buy_url: None,
            active: true,
        }
    }
}

/// Identifier addressing a single product for remove/update/stock operations.
///
/// Matching rule: a 24-character lowercase hexadecimal locator addresses the
/// database-native `_id` (ObjectId); anything else matches a plain string
/// `id` field. API mode always uses the locator verbatim as a path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLocator(String);

impl RecordLocator {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the locator looks like a native ObjectId (24 lowercase hex).
    pub fn is_object_id(&self) -> bool {
        self.0.len() == 24 && self.0.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }
}

impl fmt::Display for RecordLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stock mutation: exactly one of absolute set, increment, or decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockChange {
    Set(i64),
    Add(i64),
    Sub(i64),
}

impl StockChange {
    /// Signed delta for relative changes; None for an absolute set.
    pub fn delta(&self) -> Option<i64> {
        match self {
            StockChange::Set(_) => None,
            StockChange::Add(n) => Some(*n),
            StockChange::Sub(n) => Some(-n),
        }
    }
}

/// Result of creating a product: the REST backend echoes the created record,
/// the database backend only yields the generated identifier.
#[derive(Debug, Clone)]
pub enum Created {
    Record(Value),
    Id(String),
}

/// Result of a partial update: the REST backend echoes the updated record,
/// the database backend reports how many records matched.
#[derive(Debug, Clone)]
pub enum Updated {
    Record(Value),
    Matched(u64),
}
