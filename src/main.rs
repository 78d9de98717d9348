//! catalog-cli - Manage products in an e-commerce catalog.
//!
//! Writes through the REST backend when an API base URL is configured,
//! falling back to direct MongoDB access otherwise.

use anyhow::{Context, Result};
use catalog_cli::commands::{
    AddCommand, ImportCommand, ListCommand, RemoveCommand, StockCommand, UpdateCommand,
};
use catalog_cli::config::{Config, OutputFormat};
use catalog_cli::model::{NewProduct, RecordLocator, StockChange};
use catalog_cli::{currency, fields};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "catalog-cli",
    version,
    about = "Manage catalog products via REST API or MongoDB",
    long_about = "Manages product records in an e-commerce catalog. Uses the REST API when \
                  BACKEND_URL (or REACT_APP_BACKEND_URL) is set, otherwise writes directly \
                  to MongoDB (MONGO_URL + DB_NAME)."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// REST API base URL (overrides environment and config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Output format for listings
    #[arg(short, long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a product
    Add {
        /// Product name
        #[arg(long)]
        name: String,

        /// Price, plain or locale-formatted (e.g. 59.9 or "R$ 59,90")
        #[arg(long)]
        price: String,

        /// Category name
        #[arg(long)]
        category: String,

        /// Image URL or public path (e.g. /products/file.jpg)
        #[arg(long)]
        image: String,

        /// Free-text description
        #[arg(long, default_value = "")]
        description: String,

        /// Initial stock count
        #[arg(long, default_value = "0")]
        stock: i64,

        /// External purchase link
        #[arg(long)]
        buy_url: Option<String>,

        /// Whether the product is active (true/false, defaults to true)
        #[arg(long)]
        active: Option<bool>,
    },

    /// List products
    List {
        /// Category filter ("all" or empty lists every category)
        #[arg(long)]
        category: Option<String>,
    },

    /// Set or adjust stock for a product
    Stock {
        /// Product id
        #[arg(long)]
        id: String,

        #[command(flatten)]
        change: StockArgs,
    },

    /// Remove a product by id
    Remove {
        /// Product id
        #[arg(long)]
        id: String,
    },

    /// Update arbitrary fields on a product
    Update {
        /// Product id
        #[arg(long)]
        id: String,

        /// Comma-separated key=value pairs (e.g. name=Vase,price=59.9,active=true)
        #[arg(long)]
        set_fields: String,
    },

    /// Import products from a JSON file
    Import {
        /// Path to a JSON array of product records
        #[arg(long)]
        file: PathBuf,
    },
}

/// Exactly one stock mutation must be supplied.
#[derive(Args)]
#[group(required = true, multiple = false)]
struct StockArgs {
    /// Set absolute stock
    #[arg(long)]
    set: Option<i64>,

    /// Increment stock by this amount
    #[arg(long)]
    add: Option<i64>,

    /// Decrement stock by this amount
    #[arg(long)]
    sub: Option<i64>,
}

impl StockArgs {
    fn into_change(self) -> Result<StockChange> {
        // clap enforces exclusivity; this is the fail-fast backstop
        match (self.set, self.add, self.sub) {
            (Some(n), None, None) => Ok(StockChange::Set(n)),
            (None, Some(n), None) => Ok(StockChange::Add(n)),
            (None, None, Some(n)) => Ok(StockChange::Sub(n)),
            _ => anyhow::bail!("Use exactly one of --set, --add, --sub"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    config.format = cli.format;
    if let Some(api_url) = cli.api_url {
        config.api_url = Some(api_url);
    }

    match cli.command {
        Commands::Add { name, price, category, image, description, stock, buy_url, active } => {
            let price = currency::parse_currency(&price)
                .with_context(|| format!("Invalid price: {:?}", price))?;

            let product = NewProduct {
                name,
                price,
                category,
                image,
                description,
                stock,
                buy_url,
                active: active.unwrap_or(true),
            };

            let cmd = AddCommand::new(config, product);
            println!("{}", cmd.execute().await?);
        }

        Commands::List { category } => {
            let cmd = ListCommand::new(config, category);
            println!("{}", cmd.execute().await?);
        }

        Commands::Stock { id, change } => {
            let change = change.into_change()?;
            let cmd = StockCommand::new(config, RecordLocator::new(id), change);
            println!("{}", cmd.execute().await?);
        }

        Commands::Remove { id } => {
            let cmd = RemoveCommand::new(config, RecordLocator::new(id));
            println!("{}", cmd.execute().await?);
        }

        Commands::Update { id, set_fields } => {
            // Coercion failures abort before any backend connection
            let fields = fields::parse_set_fields(&set_fields)?;
            let cmd = UpdateCommand::new(config, RecordLocator::new(id), fields);
            println!("{}", cmd.execute().await?);
        }

        Commands::Import { file } => {
            let cmd = ImportCommand::new(config, file);
            println!("{}", cmd.execute().await?);
        }
    }

    Ok(())
}
