//! Parser for `--set-fields key=value,...` partial-update specifications.

use crate::currency;
use anyhow::{bail, Context, Result};
use serde_json::{Map, Number, Value};

/// How a value is coerced before being written.
#[derive(Debug, Clone, Copy)]
enum Coercion {
    /// Through the currency normalizer; failure aborts the whole update.
    Currency,
    /// Plain integer; failure aborts.
    Integer,
    /// `true`/`false` (case-insensitive) become booleans, anything else a string.
    Inferred,
}

/// Per-field coercion rules; fields not listed fall through to `Inferred`.
const COERCION_RULES: &[(&str, Coercion)] =
    &[("price", Coercion::Currency), ("stock", Coercion::Integer)];

fn rule_for(key: &str) -> Coercion {
    COERCION_RULES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, coercion)| *coercion)
        .unwrap_or(Coercion::Inferred)
}

/// Parses a comma-separated `key=value` list into a typed field mapping.
/// Chunks without `=` are ignored; an input with no usable pair is an error.
pub fn parse_set_fields(input: &str) -> Result<Map<String, Value>> {
    let mut fields = Map::new();

    for chunk in input.split(',') {
        let Some((key, value)) = chunk.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() {
            continue;
        }

        let coerced = match rule_for(key) {
            Coercion::Currency => {
                let amount = currency::parse_currency(value)
                    .with_context(|| format!("Invalid value for {}: {:?}", key, value))?;
                Number::from_f64(amount)
                    .map(Value::Number)
                    .with_context(|| format!("Invalid value for {}: {:?}", key, value))?
            }
            Coercion::Integer => {
                let n: i64 = value
                    .parse()
                    .with_context(|| format!("Invalid integer for {}: {:?}", key, value))?;
                Value::from(n)
            }
            Coercion::Inferred => match value.to_ascii_lowercase().as_str() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => Value::String(value.to_string()),
            },
        };

        fields.insert(key.to_string(), coerced);
    }

    if fields.is_empty() {
        bail!("No key=value pairs found in {:?}. Example: name=Vase,price=59.9,active=true", input);
    }

    Ok(fields)
}
