pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod row;

pub use client::NotionClient;
pub use config::Config;
pub use error::NotionError;
pub use models::{PropertyKind, RowLinks};
pub use row::Row;
