use thiserror::Error;

mod domain_types;
mod ids;
mod properties;

pub use domain_types::*;
pub use ids::*;
pub use properties::*;

/// Input that was rejected before any call reached Notion.
///
/// Display strings are returned verbatim to API callers, so each one names
/// the constraint that was violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid Notion ID format: {0}")]
    InvalidId(String),

    #[error("Invalid API key format: {reason}")]
    InvalidApiKey { reason: String },

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Text and section type are required")]
    MissingCommentFields,

    #[error("Unknown section type: {0}")]
    UnknownSection(String),

    #[error("Field '{field}' must be a string or null")]
    InvalidFieldValue { field: String },

    #[error("Only image files and PDFs are allowed")]
    UnsupportedFileType { content_type: String },

    #[error("File size must be less than 20MB")]
    FileTooLarge { size: u64, limit: u64 },
}
