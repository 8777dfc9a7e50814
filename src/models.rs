use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NotionError;

/// Property types recognized by the Notion database schema.
///
/// Only `Title`, `RichText` and `Url` can currently be written through this
/// client; the remaining variants exist so that schema-valid names parse to
/// a dedicated "not supported yet" error instead of an "invalid name" one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Title,
    RichText,
    Number,
    Select,
    MultiSelect,
    Date,
    People,
    File,
    Checkbox,
    Url,
    Email,
    PhoneNumber,
    Formula,
    Relation,
    Rollup,
    CreatedTime,
    CreatedBy,
    LastEditedTime,
    LastEditedBy,
}

impl PropertyKind {
    pub fn as_str(&self) -> &str {
        match self {
            PropertyKind::Title => "title",
            PropertyKind::RichText => "rich_text",
            PropertyKind::Number => "number",
            PropertyKind::Select => "select",
            PropertyKind::MultiSelect => "multi_select",
            PropertyKind::Date => "date",
            PropertyKind::People => "people",
            PropertyKind::File => "file",
            PropertyKind::Checkbox => "checkbox",
            PropertyKind::Url => "url",
            PropertyKind::Email => "email",
            PropertyKind::PhoneNumber => "phone_number",
            PropertyKind::Formula => "formula",
            PropertyKind::Relation => "relation",
            PropertyKind::Rollup => "rollup",
            PropertyKind::CreatedTime => "created_time",
            PropertyKind::CreatedBy => "created_by",
            PropertyKind::LastEditedTime => "last_edited_time",
            PropertyKind::LastEditedBy => "last_edited_by",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyKind {
    type Err = NotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(PropertyKind::Title),
            // "text" is accepted as an alias for rich_text
            "text" | "rich_text" => Ok(PropertyKind::RichText),
            "number" => Ok(PropertyKind::Number),
            "select" => Ok(PropertyKind::Select),
            "multi_select" => Ok(PropertyKind::MultiSelect),
            "date" => Ok(PropertyKind::Date),
            "people" => Ok(PropertyKind::People),
            "file" => Ok(PropertyKind::File),
            "checkbox" => Ok(PropertyKind::Checkbox),
            "url" => Ok(PropertyKind::Url),
            "email" => Ok(PropertyKind::Email),
            "phone_number" => Ok(PropertyKind::PhoneNumber),
            "formula" => Ok(PropertyKind::Formula),
            "relation" => Ok(PropertyKind::Relation),
            "rollup" => Ok(PropertyKind::Rollup),
            "created_time" => Ok(PropertyKind::CreatedTime),
            "created_by" => Ok(PropertyKind::CreatedBy),
            "last_edited_time" => Ok(PropertyKind::LastEditedTime),
            "last_edited_by" => Ok(PropertyKind::LastEditedBy),
            other => Err(NotionError::InvalidType(other.to_string())),
        }
    }
}

/// Reference to the database a page belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParentRef {
    pub database_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkTarget {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkTarget>,
}

/// One `{"text": {...}}` element of a title or rich_text array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RichTextFragment {
    pub text: TextContent,
}

impl RichTextFragment {
    pub fn plain(content: &str) -> Self {
        Self {
            text: TextContent {
                content: content.to_string(),
                link: None,
            },
        }
    }

    pub fn linked(content: &str, url: &str) -> Self {
        Self {
            text: TextContent {
                content: content.to_string(),
                link: Some(LinkTarget {
                    url: url.to_string(),
                }),
            },
        }
    }
}

/// Typed value of one page property, serialized in Notion's externally
/// tagged shape: `{"title": [...]}`, `{"rich_text": [...]}` or
/// `{"url": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PropertyPayload {
    #[serde(rename = "title")]
    Title(Vec<RichTextFragment>),
    #[serde(rename = "rich_text")]
    RichText(Vec<RichTextFragment>),
    #[serde(rename = "url")]
    Url(String),
}

/// Body of a database query request. Only sent when resuming at a cursor.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    pub start_cursor: String,
}

/// One page of database query results.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    pub results: Vec<serde_json::Value>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Error body returned by the API on failed requests.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// The two URL columns extracted from one database row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowLinks {
    pub playlist_url: String,
    pub video_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_round_trip() {
        for name in [
            "title",
            "rich_text",
            "number",
            "select",
            "multi_select",
            "date",
            "people",
            "file",
            "checkbox",
            "url",
            "email",
            "phone_number",
            "formula",
            "relation",
            "rollup",
            "created_time",
            "created_by",
            "last_edited_time",
            "last_edited_by",
        ] {
            let kind: PropertyKind = name.parse().unwrap();
            assert_eq!(kind.as_str(), name);
        }
    }

    #[test]
    fn test_text_alias_resolves_to_rich_text() {
        let kind: PropertyKind = "text".parse().unwrap();
        assert_eq!(kind, PropertyKind::RichText);
    }

    #[test]
    fn test_unknown_kind_is_invalid() {
        let err = "status".parse::<PropertyKind>().unwrap_err();
        assert!(matches!(err, NotionError::InvalidType(name) if name == "status"));
    }

    #[test]
    fn test_title_payload_shape() {
        let payload = PropertyPayload::Title(vec![RichTextFragment::plain("Hello")]);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"title": [{"text": {"content": "Hello"}}]})
        );
    }

    #[test]
    fn test_url_payload_shape() {
        let payload = PropertyPayload::Url("https://x.test".to_string());
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"url": "https://x.test"})
        );
    }

    #[test]
    fn test_linked_fragment_shape() {
        let payload = PropertyPayload::RichText(vec![RichTextFragment::linked("P", "http://y.test")]);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"rich_text": [{"text": {"content": "P", "link": {"url": "http://y.test"}}}]})
        );
    }

    #[test]
    fn test_query_response_defaults() {
        let page: QueryResponse = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(page.results.is_empty());
        assert!(!page.has_more);
        assert!(page.next_cursor.is_none());
    }
}
