// src/api/mod.rs
//! Notion API interaction: reading and writing the CRM database and the
//! block content of its pages.
//!
//! This module provides a data-oriented interface to the Notion API,
//! with clear separation between I/O operations, parsing, and business logic.

pub mod client;
pub mod parser;
pub mod requests;
mod responses;
mod simple_pagination;
pub mod types;

use crate::error::AppError;
use crate::model::{Block, DatabaseSchema, Page};
use crate::types::{BlockId, DatabaseId, PageId};

pub use client::NotionHttpClient;
pub use requests::{NewBlock, PropertyPayload};
pub use types::{FilePayload, FileUploadSlot};

/// Everything the service needs from Notion.
///
/// Business logic depends on this trait, never on HTTP details. Listing
/// calls follow pagination cursors to the end before returning.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    /// Rows of `database` whose `Type` select equals `record_type`.
    async fn query_database(
        &self,
        database: &DatabaseId,
        record_type: &str,
    ) -> Result<Vec<Page>, AppError>;

    async fn retrieve_page(&self, id: &PageId) -> Result<Page, AppError>;

    async fn retrieve_database(&self, id: &DatabaseId) -> Result<DatabaseSchema, AppError>;

    async fn create_page(
        &self,
        database: &DatabaseId,
        properties: PropertyPayload,
    ) -> Result<Page, AppError>;

    async fn update_page(&self, id: &PageId, properties: PropertyPayload) -> Result<(), AppError>;

    /// Top-level blocks of a page, in order.
    async fn retrieve_children(&self, parent: &PageId) -> Result<Vec<Block>, AppError>;

    /// Appends `children` directly after `after`, or at the end of the page
    /// when no anchor is given. Returns the created blocks.
    async fn append_children(
        &self,
        parent: &PageId,
        children: Vec<NewBlock>,
        after: Option<&BlockId>,
    ) -> Result<Vec<Block>, AppError>;

    async fn delete_block(&self, id: &BlockId) -> Result<(), AppError>;

    async fn create_file_upload(
        &self,
        file_name: &str,
        content_type: &str,
    ) -> Result<FileUploadSlot, AppError>;

    async fn send_file_upload(
        &self,
        slot: &FileUploadSlot,
        file: &FilePayload,
    ) -> Result<(), AppError>;
}
