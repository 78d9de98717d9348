//! CLI command implementations.
//!
//! Each command is written once against [`crate::store::CatalogStore`] and
//! works identically on the REST and MongoDB backends.

pub mod add;
pub mod import;
pub mod list;
pub mod remove;
pub mod stock;
pub mod update;

pub use add::AddCommand;
pub use import::ImportCommand;
pub use list::ListCommand;
pub use remove::RemoveCommand;
pub use stock::StockCommand;
pub use update::UpdateCommand;
