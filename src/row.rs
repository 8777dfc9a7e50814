use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::NotionError;
use crate::models::{ParentRef, PropertyKind, PropertyPayload, RichTextFragment};

/// One page record staged for creation in a Notion database.
///
/// Starts empty, accumulates properties through [`Row::add_property`], and
/// serializes directly as the create-page request body. Each row owns its
/// property map; nothing is shared between instances.
#[derive(Debug, Clone, Serialize)]
pub struct Row {
    pub parent: ParentRef,
    pub properties: BTreeMap<String, PropertyPayload>,
}

impl Row {
    pub fn new(database_id: &str) -> Self {
        Self {
            parent: ParentRef {
                database_id: database_id.to_string(),
            },
            properties: BTreeMap::new(),
        }
    }

    /// Stages one typed field value on the row.
    ///
    /// Fails if `field_name` is already staged and `overwrite` is false, if
    /// `link` is given for anything but a rich_text property, or if `kind`
    /// is recognized by the schema but not writable through this client.
    pub fn add_property(
        &mut self,
        field_name: &str,
        value: &str,
        kind: PropertyKind,
        link: Option<&str>,
        overwrite: bool,
    ) -> Result<(), NotionError> {
        if self.properties.contains_key(field_name) && !overwrite {
            return Err(NotionError::DuplicateField(field_name.to_string()));
        }
        if link.is_some() && kind != PropertyKind::RichText {
            return Err(NotionError::IncompatibleOption(kind));
        }

        let payload = match kind {
            PropertyKind::Title => PropertyPayload::Title(vec![RichTextFragment::plain(value)]),
            PropertyKind::Url => PropertyPayload::Url(value.to_string()),
            PropertyKind::RichText => match link {
                Some(url) => PropertyPayload::RichText(vec![RichTextFragment::linked(value, url)]),
                None => PropertyPayload::RichText(vec![RichTextFragment::plain(value)]),
            },
            // select and multi_select cannot be set through API v1
            // (confirmed by the Notion support service); the rest of the
            // schema types are unimplemented as well.
            other => return Err(NotionError::UnsupportedType(other)),
        };

        self.properties.insert(field_name.to_string(), payload);
        Ok(())
    }

    /// Drops all staged properties, keeping the parent database reference.
    pub fn reset(&mut self) {
        self.properties.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_duplicate_field_rejected() {
        let mut row = Row::new("db1");
        row.add_property("Title", "a", PropertyKind::Title, None, false)
            .unwrap();
        let err = row
            .add_property("Title", "b", PropertyKind::Title, None, false)
            .unwrap_err();
        assert!(matches!(err, NotionError::DuplicateField(name) if name == "Title"));
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let mut row = Row::new("db1");
        row.add_property("Title", "a", PropertyKind::Title, None, false)
            .unwrap();
        row.add_property("Title", "b", PropertyKind::Title, None, true)
            .unwrap();
        assert_eq!(
            serde_json::to_value(&row.properties["Title"]).unwrap(),
            json!({"title": [{"text": {"content": "b"}}]})
        );
    }

    #[test]
    fn test_link_requires_rich_text() {
        let mut row = Row::new("db1");
        let err = row
            .add_property("Link", "v", PropertyKind::Url, Some("http://y.test"), false)
            .unwrap_err();
        assert!(matches!(
            err,
            NotionError::IncompatibleOption(PropertyKind::Url)
        ));
    }

    #[test]
    fn test_link_with_text_alias_accepted() {
        let mut row = Row::new("db1");
        let kind: PropertyKind = "text".parse().unwrap();
        row.add_property("Playlist", "P", kind, Some("http://y.test"), false)
            .unwrap();
        assert_eq!(
            serde_json::to_value(&row.properties["Playlist"]).unwrap(),
            json!({"rich_text": [{"text": {"content": "P", "link": {"url": "http://y.test"}}}]})
        );
    }

    #[test]
    fn test_title_stored_as_fragment() {
        let mut row = Row::new("db1");
        row.add_property("Name", "Hello", PropertyKind::Title, None, false)
            .unwrap();
        assert_eq!(
            serde_json::to_value(&row.properties["Name"]).unwrap(),
            json!({"title": [{"text": {"content": "Hello"}}]})
        );
    }

    #[test]
    fn test_url_stored_verbatim() {
        let mut row = Row::new("db1");
        row.add_property("Link", "https://x.test", PropertyKind::Url, None, false)
            .unwrap();
        assert_eq!(
            serde_json::to_value(&row.properties["Link"]).unwrap(),
            json!({"url": "https://x.test"})
        );
    }

    #[test]
    fn test_known_but_unsupported_kind() {
        let mut row = Row::new("db1");
        let err = row
            .add_property("Tags", "x", PropertyKind::MultiSelect, None, false)
            .unwrap_err();
        assert!(matches!(
            err,
            NotionError::UnsupportedType(PropertyKind::MultiSelect)
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let mut row = Row::new("db1");
        row.add_property("Name", "Hello", PropertyKind::Title, None, false)
            .unwrap();
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            json!({
                "parent": {"database_id": "db1"},
                "properties": {"Name": {"title": [{"text": {"content": "Hello"}}]}}
            })
        );
    }

    #[test]
    fn test_reset_keeps_parent() {
        let mut row = Row::new("db1");
        row.add_property("Name", "Hello", PropertyKind::Title, None, false)
            .unwrap();
        row.reset();
        assert!(row.is_empty());
        assert_eq!(row.parent.database_id, "db1");
    }
}
