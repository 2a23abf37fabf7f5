// src/api/requests.rs
//! Outbound request bodies.

use crate::model::DocumentKind;
use crate::types::{DatabaseId, FileUploadId};
use serde_json::{json, Map, Value};

/// Outbound property payload keyed by Notion property name.
pub type PropertyPayload = Map<String, Value>;

/// A block to be appended to a page.
#[derive(Debug, Clone, PartialEq)]
pub enum NewBlock {
    Heading2(String),
    Paragraph(String),
    /// Image or file block pointing at a completed upload.
    Attachment {
        kind: DocumentKind,
        upload: FileUploadId,
    },
}

impl NewBlock {
    /// Notion JSON for this block.
    pub fn to_json(&self) -> Value {
        match self {
            NewBlock::Heading2(text) => json!({
                "object": "block",
                "type": "heading_2",
                "heading_2": { "rich_text": text_runs(text) }
            }),
            NewBlock::Paragraph(text) => json!({
                "object": "block",
                "type": "paragraph",
                "paragraph": { "rich_text": text_runs(text) }
            }),
            NewBlock::Attachment { kind, upload } => {
                let key = match kind {
                    DocumentKind::Image => "image",
                    DocumentKind::File => "file",
                };
                let mut block = Map::new();
                block.insert("type".to_string(), json!(key));
                block.insert(
                    key.to_string(),
                    json!({
                        "type": "file_upload",
                        "file_upload": { "id": upload.to_dashed() },
                        "caption": []
                    }),
                );
                Value::Object(block)
            }
        }
    }
}

/// Rich text array for a single plain run. Empty text yields an empty
/// array, which is how Notion represents a blank paragraph.
pub fn text_runs(text: &str) -> Value {
    if text.is_empty() {
        json!([])
    } else {
        json!([{ "type": "text", "text": { "content": text } }])
    }
}

/// Body of `PATCH /blocks/{id}/children`.
pub fn append_children_body(children: &[NewBlock], after: Option<&str>) -> Value {
    let mut body = json!({
        "children": children.iter().map(NewBlock::to_json).collect::<Vec<_>>()
    });
    if let Some(after) = after {
        body["after"] = json!(after);
    }
    body
}

/// Body of `POST /databases/{id}/query` filtered on a select property.
pub fn select_filter_query(property: &str, value: &str, cursor: Option<&str>, page_size: u32) -> Value {
    let mut query = json!({
        "filter": {
            "property": property,
            "select": { "equals": value }
        },
        "page_size": page_size
    });
    if let Some(cursor) = cursor {
        query["start_cursor"] = json!(cursor);
    }
    query
}

/// Body of `POST /pages` creating a row in a database.
pub fn create_page_body(database: &DatabaseId, properties: &PropertyPayload) -> Value {
    json!({
        "parent": { "database_id": database.to_dashed() },
        "properties": properties
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn attachment_block_references_upload() {
        let block = NewBlock::Attachment {
            kind: DocumentKind::File,
            upload: FileUploadId::parse("550e8400e29b41d4a716446655440000").unwrap(),
        };
        assert_eq!(
            block.to_json(),
            json!({
                "type": "file",
                "file": {
                    "type": "file_upload",
                    "file_upload": { "id": "550e8400-e29b-41d4-a716-446655440000" },
                    "caption": []
                }
            })
        );
    }

    #[test]
    fn empty_paragraph_has_no_runs() {
        let json = NewBlock::Paragraph(String::new()).to_json();
        assert_eq!(json["paragraph"]["rich_text"], json!([]));
    }

    #[test]
    fn append_body_includes_anchor_only_when_given() {
        let blocks = [NewBlock::Paragraph("hi".to_string())];
        assert!(append_children_body(&blocks, None).get("after").is_none());
        assert_eq!(append_children_body(&blocks, Some("abc"))["after"], "abc");
    }

    #[test]
    fn query_filters_on_select() {
        let query = select_filter_query("Type", "Lead", Some("cur"), 100);
        assert_eq!(query["filter"]["select"]["equals"], "Lead");
        assert_eq!(query["start_cursor"], "cur");
    }
}
