use super::common::BlockCommon;
use crate::types::{join_plain_text, FileUploadId, RichTextItem};
use serde::{Deserialize, Serialize};

/// Text content shared by paragraphs and headings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextBlockContent {
    #[serde(default)]
    pub rich_text: Vec<RichTextItem>,
}

impl TextBlockContent {
    pub fn from_plain(text: &str) -> Self {
        Self {
            rich_text: vec![RichTextItem::plain_text(text)],
        }
    }

    /// All runs concatenated.
    pub fn plain_text(&self) -> String {
        join_plain_text(&self.rich_text)
    }
}

/// Paragraph or heading block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Where the bytes behind an image or file block live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FileSource {
    /// Notion-hosted file with a signed, expiring URL
    Hosted { url: String, name: Option<String> },
    /// Link to a file hosted elsewhere
    External { url: String, name: Option<String> },
    /// File attached through the file upload API
    Upload {
        id: FileUploadId,
        url: Option<String>,
        name: Option<String>,
    },
}

impl FileSource {
    pub fn url(&self) -> Option<&str> {
        match self {
            FileSource::Hosted { url, .. } | FileSource::External { url, .. } => Some(url),
            FileSource::Upload { url, .. } => url.as_deref(),
        }
    }

    /// Name carried by the payload itself, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            FileSource::Hosted { name, .. }
            | FileSource::External { name, .. }
            | FileSource::Upload { name, .. } => name.as_deref(),
        }
    }
}

/// Image or file block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentBlock {
    pub common: BlockCommon,
    pub source: FileSource,
    pub caption: Vec<RichTextItem>,
    /// Block-level display name; Notion sets this for uploaded files.
    pub name: Option<String>,
}

/// Any block kind this service does not interpret
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnsupportedBlock {
    pub common: BlockCommon,
    pub block_type: String,
}
