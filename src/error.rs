use thiserror::Error;

use crate::models::PropertyKind;

/// Errors surfaced while building or transmitting database rows.
#[derive(Debug, Error)]
pub enum NotionError {
    /// The row already holds a property under this field name.
    #[error("A property named {0} already exists in this row")]
    DuplicateField(String),

    /// A hyperlink was supplied for a property type that cannot carry one.
    #[error("A link is compatible only with the \"rich_text\" property type, not \"{0}\"")]
    IncompatibleOption(PropertyKind),

    /// The property type is part of the Notion schema but cannot be set
    /// through this client.
    #[error("The property type \"{0}\" is not supported yet")]
    UnsupportedType(PropertyKind),

    /// The property type name is not part of the Notion schema at all.
    #[error("Invalid property type: {0}")]
    InvalidType(String),

    /// The API answered with a non-success status.
    #[error("Error code: {code}. Message: {message}")]
    Remote { code: String, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for NotionError {
    fn from(e: reqwest::Error) -> Self {
        NotionError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for NotionError {
    fn from(e: serde_json::Error) -> Self {
        NotionError::Parse(e.to_string())
    }
}
