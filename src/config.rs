use std::env;

use crate::error::NotionError;

pub const ENV_NOTION_SECRET: &str = "NOTION_SECRET";
pub const ENV_TARGET_DB: &str = "TARGET_DB";

/// Connection settings for a Notion integration, read from the process
/// environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub notion_secret: String,
    pub target_db: String,
}

impl Config {
    pub fn from_env() -> Result<Self, NotionError> {
        Ok(Self {
            notion_secret: read_var(ENV_NOTION_SECRET)?,
            target_db: read_var(ENV_TARGET_DB)?,
        })
    }
}

fn read_var(name: &str) -> Result<String, NotionError> {
    env::var(name).map_err(|_| NotionError::Config(format!("{} must be set", name)))
}
