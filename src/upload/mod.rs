// src/upload/mod.rs
//! Attaching an uploaded file to a documents section.
//!
//! Notion's file upload API is a three step exchange: reserve a slot,
//! send the bytes to the slot's URL, then reference the slot id from a new
//! image or file block. Steps run strictly in order and a failure at any
//! step aborts the rest without undoing earlier steps.

use crate::api::{FilePayload, NewBlock, NotionRepository};
use crate::constants::{MAX_UPLOAD_BYTES, PDF_CONTENT_TYPE};
use crate::documents::{document_from_block, document_section};
use crate::error::{AppError, Result};
use crate::model::{Block, Document, DocumentKind};
use crate::sections::PageOutline;
use crate::types::{BlockId, DocumentSection, PageId, ValidationError};

/// Outcome of a completed upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadReceipt {
    pub message: &'static str,
    pub block_id: BlockId,
    pub document: Document,
}

/// Checks content type and size before anything is sent upstream.
///
/// PDFs become file blocks and `image/*` becomes image blocks. Files of
/// exactly the size limit are accepted.
pub fn validate_upload(content_type: &str, size: u64) -> Result<DocumentKind, ValidationError> {
    let normalized = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    let kind = if normalized == PDF_CONTENT_TYPE {
        DocumentKind::File
    } else if normalized.starts_with("image/") {
        DocumentKind::Image
    } else {
        return Err(ValidationError::UnsupportedFileType {
            content_type: content_type.to_string(),
        });
    };

    if size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::FileTooLarge {
            size,
            limit: MAX_UPLOAD_BYTES,
        });
    }

    Ok(kind)
}

/// Confirmation shown to the user for a finished upload.
pub fn success_message(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::File => "PDF uploaded successfully",
        DocumentKind::Image => "Image uploaded successfully",
    }
}

/// Uploads `file` and attaches it after the last document of `section`
/// on `page`, or right after the section heading.
pub async fn upload_document(
    repo: &dyn NotionRepository,
    page: &PageId,
    section: DocumentSection,
    file: FilePayload,
) -> Result<UploadReceipt> {
    let kind = validate_upload(&file.content_type, file.bytes.len() as u64)?;

    log::info!(
        "Uploading {} ({}, {} bytes) to page {}",
        file.file_name,
        file.content_type,
        file.bytes.len(),
        page
    );

    let slot = repo
        .create_file_upload(&file.file_name, &file.content_type)
        .await?;
    log::debug!("Reserved upload slot {}", slot.id);

    repo.send_file_upload(&slot, &file).await?;
    log::debug!("Sent {} bytes to upload slot {}", file.bytes.len(), slot.id);

    let outline = PageOutline::from_blocks(repo.retrieve_children(page).await?);
    let target = document_section(&outline, section)
        .ok_or_else(|| AppError::document_section_missing(section.heading()))?;
    let anchor = target.anchor(Block::is_attachment).clone();

    let created = repo
        .append_children(
            page,
            vec![NewBlock::Attachment {
                kind,
                upload: slot.id.clone(),
            }],
            Some(&anchor),
        )
        .await?;

    let block = created.into_iter().next().ok_or_else(|| {
        AppError::MalformedResponse("Append returned no blocks for the uploaded file".to_string())
    })?;
    let document = document_from_block(&block, Some(&file.file_name)).ok_or_else(|| {
        AppError::MalformedResponse(format!(
            "Expected an attachment block for the uploaded file, got {}",
            block.block_type()
        ))
    })?;

    log::info!("Attached {} as block {}", document.file_name, document.id);

    Ok(UploadReceipt {
        message: success_message(kind),
        block_id: document.id.clone(),
        document,
    })
}
