// src/api/types.rs
//! Type definitions for the Notion API module.

use crate::types::FileUploadId;
use serde::Deserialize;

/// Generic paginated response wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub object: String,
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// All items gathered by following a cursor to the end.
#[derive(Debug, Clone)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub total_fetched: usize,
    pub pages_fetched: u32,
}

/// A staged upload: the handle to reference from a block and the URL the
/// bytes are sent to.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUploadSlot {
    pub id: FileUploadId,
    pub upload_url: String,
}

/// Bytes on their way to an upload slot.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePayload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}
