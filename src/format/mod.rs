//! Output formatting for product listings (table, JSON).

use crate::config::OutputFormat;
use crate::model::Product;

/// Formats products for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a product listing.
    pub fn format_products(&self, products: &[Product]) -> String {
        if products.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Table => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_products(products),
            OutputFormat::Table => self.table_products(products),
        }
    }

    fn json_products(&self, products: &[Product]) -> String {
        serde_json::to_string_pretty(products).unwrap_or_else(|_| "[]".to_string())
    }

    fn table_products(&self, products: &[Product]) -> String {
        let id_width = 24;
        let name_width = 30;
        let price_width = 10;
        let category_width = 16;
        let stock_width = 6;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<id_width$} {:<name_width$} {:>price_width$} {:<category_width$} {:>stock_width$} {}",
            "ID", "NAME", "PRICE", "CATEGORY", "STOCK", "ACTIVE"
        ));
        lines.push(format!(
            "{:-<id_width$} {:-<name_width$} {:->price_width$} {:-<category_width$} {:->stock_width$} {:-<6}",
            "", "", "", "", "", ""
        ));

        for product in products {
            let id = truncate(product.id.as_deref().unwrap_or("-"), id_width);
            let name = truncate(&product.name, name_width);
            let price = match product.price {
                Some(p) => format!("{:.2}", p),
                None => "-".to_string(),
            };
            let category = truncate(&product.category, category_width);
            let active = if product.active { "yes" } else { "no" };

            lines.push(format!(
                "{:<id_width$} {:<name_width$} {:>price_width$} {:<category_width$} {:>stock_width$} {}",
                id, name, price, category, product.stock, active
            ));
        }

        lines.push(String::new());
        lines.push(format!("{} product(s)", products.len()));
        lines.join("\n")
    }
}

/// Truncates a string to fit a column, appending an ellipsis.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
