// src/lib.rs
//! notion-crm library: a leads, sales and payments backend over a Notion
//! database.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `ServerConfig`
//! - **Domain model**: `Page`, `Block`, records (`Lead`, `Sale`, `Payment`),
//!   `Comment`, `Document`
//! - **Page body**: `PageOutline`, comment and document scanning, uploads
//! - **API client**: `NotionRepository`, `NotionHttpClient`
//! - **Service and HTTP**: `CrmService`, `create_router`

pub mod api;
pub mod comments;
pub mod config;
pub mod constants;
pub mod documents;
pub mod error;
pub mod mapping;
pub mod model;
pub mod sections;
pub mod server;
pub mod service;
pub mod types;
pub mod upload;

// --- Error Handling ---
pub use crate::error::{AppError, NotionClientError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, ServerConfig};

// --- Domain Model ---
pub use crate::model::{
    AttachmentBlock, Block, BlockCommon, Comment, DatabaseSchema, Document, DocumentKind,
    FileSource, Lead, LeadDraft, Page, Payment, PropertyTypeValue, Sale, SchemaProperty,
    TextBlock, TextBlockContent,
};

// --- Domain Types ---
pub use crate::types::{
    ApiKey, BlockId, CommentSection, DatabaseId, DocumentSection, FileUploadId, PageId,
    RichTextItem, SelectOption,
};

// --- Page Body ---
pub use crate::sections::{CaseSensitivity, HeadingQuery, PageOutline, Section};
pub use crate::upload::UploadReceipt;

// --- API Client ---
pub use crate::api::{
    FilePayload, FileUploadSlot, NewBlock, NotionHttpClient, NotionRepository, PropertyPayload,
};

// --- Service and HTTP ---
pub use crate::server::create_router;
pub use crate::service::{CommentDraft, CrmService, LeadCreation, TemplateOutcome};
