// src/api/responses.rs
//! Wire types for Notion API responses and their conversion into the
//! domain model.
//!
//! Unknown fields are ignored. Block kinds this service does not interpret
//! become `Block::Unsupported` and keep their position in the page.

use super::types::{FileUploadSlot, PaginatedResponse};
use crate::error::AppError;
use crate::model::{
    AttachmentBlock, Block, BlockCommon, ChoiceKind, DatabaseSchema, FileSource, Page,
    PropertyTypeValue, SchemaProperty, TextBlock, TextBlockContent, UnsupportedBlock,
};
use crate::types::{BlockId, FileUploadId, PageId, RichTextItem, SelectOption};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Notion error body
#[derive(Debug, Clone, Deserialize)]
pub struct NotionError {
    pub status: u16,
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub request_id: Option<String>,
}

/// Trait for converting wire types to domain types
pub trait ToDomain<T> {
    fn to_domain(self) -> Result<T, AppError>;
}

// --- Pages ---

#[derive(Debug, Clone, Deserialize)]
pub struct PageObject {
    pub id: PageId,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub properties: HashMap<String, PropertyTypeValue>,
}

impl ToDomain<Page> for PageObject {
    fn to_domain(self) -> Result<Page, AppError> {
        Ok(Page {
            id: self.id,
            url: self.url,
            properties: self.properties,
            archived: self.archived,
        })
    }
}

pub type QueryDatabaseResponse = PaginatedResponse<PageObject>;

impl QueryDatabaseResponse {
    /// Convert all pages to domain model
    pub fn into_domain_pages(self) -> Result<Vec<Page>, AppError> {
        self.results.into_iter().map(ToDomain::to_domain).collect()
    }
}

// --- Blocks ---

#[derive(Debug, Clone, Deserialize)]
pub struct BlockObject {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_edited_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub archived: bool,
    /// Holds the payload keyed by the block type, e.g. `"heading_2": {...}`.
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct AttachmentPayload {
    #[serde(default)]
    caption: Vec<RichTextItem>,
    #[serde(default)]
    name: Option<String>,
    #[serde(flatten)]
    source: SourcePayload,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum SourcePayload {
    File { file: FileRef },
    External { external: FileRef },
    FileUpload { file_upload: UploadRef },
}

#[derive(Debug, Clone, Deserialize)]
struct FileRef {
    #[serde(default)]
    url: String,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct UploadRef {
    id: FileUploadId,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl From<SourcePayload> for FileSource {
    fn from(payload: SourcePayload) -> Self {
        match payload {
            SourcePayload::File { file } => FileSource::Hosted {
                url: file.url,
                name: file.name,
            },
            SourcePayload::External { external } => FileSource::External {
                url: external.url,
                name: external.name,
            },
            SourcePayload::FileUpload { file_upload } => FileSource::Upload {
                id: file_upload.id,
                url: file_upload.url,
                name: file_upload.name,
            },
        }
    }
}

impl BlockObject {
    fn common(&self) -> BlockCommon {
        BlockCommon {
            id: self.id.clone(),
            created_time: self.created_time,
            last_edited_time: self.last_edited_time,
            has_children: self.has_children,
            archived: self.archived,
        }
    }

    fn payload(&self) -> Value {
        self.rest.get(&self.block_type).cloned().unwrap_or(Value::Null)
    }

    fn unsupported(&self) -> Block {
        Block::Unsupported(UnsupportedBlock {
            common: self.common(),
            block_type: self.block_type.clone(),
        })
    }

    fn text_block(&self) -> Option<TextBlock> {
        match serde_json::from_value::<TextBlockContent>(self.payload()) {
            Ok(content) => Some(TextBlock {
                common: self.common(),
                content,
            }),
            Err(e) => {
                log::warn!("Unreadable {} block {}: {}", self.block_type, self.id, e);
                None
            }
        }
    }

    fn attachment_block(&self) -> Option<AttachmentBlock> {
        match serde_json::from_value::<AttachmentPayload>(self.payload()) {
            Ok(payload) => Some(AttachmentBlock {
                common: self.common(),
                source: payload.source.into(),
                caption: payload.caption,
                name: payload.name,
            }),
            Err(e) => {
                log::warn!("Unreadable {} block {}: {}", self.block_type, self.id, e);
                None
            }
        }
    }
}

impl ToDomain<Block> for BlockObject {
    fn to_domain(self) -> Result<Block, AppError> {
        let block = match self.block_type.as_str() {
            "paragraph" => self.text_block().map(Block::Paragraph),
            "heading_1" => self.text_block().map(Block::Heading1),
            "heading_2" => self.text_block().map(Block::Heading2),
            "heading_3" => self.text_block().map(Block::Heading3),
            "image" => self.attachment_block().map(Block::Image),
            "file" => self.attachment_block().map(Block::File),
            _ => None,
        };
        Ok(block.unwrap_or_else(|| self.unsupported()))
    }
}

pub type RetrieveBlockChildrenResponse = PaginatedResponse<BlockObject>;

impl RetrieveBlockChildrenResponse {
    /// Convert all blocks to domain model
    pub fn into_domain_blocks(self) -> Result<Vec<Block>, AppError> {
        self.results.into_iter().map(ToDomain::to_domain).collect()
    }
}

// --- Databases ---

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseObject {
    #[serde(default)]
    pub properties: HashMap<String, DatabasePropertyObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabasePropertyObject {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub select: Option<OptionList>,
    #[serde(default)]
    pub multi_select: Option<OptionList>,
    #[serde(default)]
    pub status: Option<OptionList>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionList {
    #[serde(default)]
    pub options: Vec<SelectOption>,
}

impl ToDomain<DatabaseSchema> for DatabaseObject {
    fn to_domain(self) -> Result<DatabaseSchema, AppError> {
        let properties = self
            .properties
            .into_iter()
            .filter_map(|(name, property)| {
                let (kind, list) = match property.kind.as_str() {
                    "select" => (ChoiceKind::Select, property.select),
                    "multi_select" => (ChoiceKind::MultiSelect, property.multi_select),
                    "status" => (ChoiceKind::Status, property.status),
                    _ => return None,
                };
                list.map(|list| {
                    (
                        name,
                        SchemaProperty {
                            kind,
                            options: list.options,
                        },
                    )
                })
            })
            .collect();
        Ok(DatabaseSchema { properties })
    }
}

// --- File uploads ---

#[derive(Debug, Clone, Deserialize)]
pub struct FileUploadObject {
    pub id: FileUploadId,
    #[serde(default)]
    pub upload_url: Option<String>,
}

impl ToDomain<FileUploadSlot> for FileUploadObject {
    fn to_domain(self) -> Result<FileUploadSlot, AppError> {
        let upload_url = self.upload_url.ok_or_else(|| {
            AppError::MalformedResponse(format!("File upload {} has no upload_url", self.id))
        })?;
        Ok(FileUploadSlot {
            id: self.id,
            upload_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn block(json: &str) -> Block {
        serde_json::from_str::<BlockObject>(json)
            .unwrap()
            .to_domain()
            .unwrap()
    }

    #[test]
    fn heading_block_converts() {
        let b = block(
            r#"{"object":"block","id":"550e8400-e29b-41d4-a716-446655440000","type":"heading_2",
                "created_time":"2025-01-05T15:45:00.000Z","last_edited_time":"2025-01-05T15:45:00.000Z",
                "has_children":false,"archived":false,
                "heading_2":{"rich_text":[{"type":"text","plain_text":"Sales Comments"}],"color":"default","is_toggleable":false}}"#,
        );
        assert_eq!(b.heading_level(), Some(2));
        assert_eq!(b.plain_text().as_deref(), Some("Sales Comments"));
        assert!(b.common().created_time.is_some());
    }

    #[test]
    fn uploaded_image_converts() {
        let b = block(
            r#"{"id":"550e8400-e29b-41d4-a716-446655440001","type":"image",
                "image":{"caption":[],"type":"file_upload","file_upload":{"id":"f-1"}}}"#,
        );
        let attachment = b.attachment().unwrap();
        assert!(matches!(attachment.source, FileSource::Upload { .. }));
        assert_eq!(attachment.source.url(), None);
    }

    #[test]
    fn hosted_file_keeps_url_and_name() {
        let b = block(
            r#"{"id":"550e8400-e29b-41d4-a716-446655440002","type":"file",
                "file":{"caption":[],"type":"file","name":"contract.pdf",
                        "file":{"url":"https://s3.example.com/contract.pdf?sig=1","expiry_time":"2025-01-05T16:45:00.000Z"}}}"#,
        );
        let attachment = b.attachment().unwrap();
        assert_eq!(attachment.name.as_deref(), Some("contract.pdf"));
        assert_eq!(
            attachment.source.url(),
            Some("https://s3.example.com/contract.pdf?sig=1")
        );
    }

    #[test]
    fn unknown_block_kinds_are_kept_in_place() {
        let b = block(r#"{"id":"550e8400-e29b-41d4-a716-446655440003","type":"divider","divider":{}}"#);
        assert_eq!(b.block_type(), "divider");
    }

    #[test]
    fn database_schema_keeps_only_choice_properties() {
        let db: DatabaseObject = serde_json::from_str(
            r#"{"object":"database","properties":{
                "Type":{"id":"a","name":"Type","type":"select","select":{"options":[{"id":"1","name":"Lead","color":"blue"}]}},
                "Job Type":{"id":"b","name":"Job Type","type":"multi_select","multi_select":{"options":[]}},
                "Address":{"id":"c","name":"Address","type":"rich_text","rich_text":{}}
            }}"#,
        )
        .unwrap();
        let schema = db.to_domain().unwrap();
        assert_eq!(schema.properties.len(), 2);
        assert_eq!(schema.properties["Type"].kind, ChoiceKind::Select);
        assert_eq!(schema.properties["Type"].options[0].name, "Lead");
    }

    #[test]
    fn upload_without_url_is_malformed() {
        let obj: FileUploadObject = serde_json::from_str(r#"{"id":"f-2","status":"pending"}"#).unwrap();
        assert!(matches!(obj.to_domain(), Err(AppError::MalformedResponse(_))));
    }
}
