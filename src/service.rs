// src/service.rs
//! CRM operations composed from repository calls and the page-body
//! scanners.
//!
//! Each operation issues its upstream calls one after another and keeps no
//! state between requests.

use crate::api::{FilePayload, NewBlock, NotionRepository};
use crate::comments;
use crate::constants::{LEAD_TEMPLATE_HEADINGS, TYPE_CANCELED, TYPE_LEAD, TYPE_PROPERTY, TYPE_SALE};
use crate::documents;
use crate::error::{AppError, Result};
use crate::mapping::fields::{ALL_PAYMENTS_FINISHED, SALES_DATE};
use crate::mapping::{lead_creation_payload, PropertyPatch, LEAD_FIELDS, SALE_FIELDS};
use crate::model::{Comment, DatabaseSchema, Document, Lead, LeadDraft, Page, Payment, Sale};
use crate::sections::PageOutline;
use crate::types::{BlockId, CommentSection, DatabaseId, DocumentSection, PageId, ValidationError};
use crate::upload::{self, UploadReceipt};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Whether the section headings of a new lead were written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOutcome {
    Seeded,
    /// The page exists but its body is missing some or all headings.
    Failed(String),
}

/// Result of creating a lead: the page always exists once this is
/// returned, the template may not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadCreation {
    pub id: PageId,
    pub template: TemplateOutcome,
}

/// Body of a comment creation request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommentDraft {
    pub text: Option<String>,
    pub section_type: Option<String>,
}

impl CommentDraft {
    /// Non-blank text and a known section, or the reason why not.
    pub fn validate(&self) -> Result<(&str, CommentSection), ValidationError> {
        let text = self
            .text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .ok_or(ValidationError::MissingCommentFields)?;
        let section = self
            .section_type
            .as_deref()
            .filter(|section| !section.trim().is_empty())
            .ok_or(ValidationError::MissingCommentFields)?;
        Ok((text, CommentSection::parse(section)?))
    }
}

/// Blocks seeded into every new lead page.
pub fn lead_template() -> Vec<NewBlock> {
    LEAD_TEMPLATE_HEADINGS
        .iter()
        .flat_map(|heading| {
            [
                NewBlock::Heading2(heading.to_string()),
                NewBlock::Paragraph(String::new()),
            ]
        })
        .collect()
}

/// Today's UTC date as `YYYY-MM-DD`.
pub fn today_utc() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

#[derive(Clone)]
pub struct CrmService {
    repo: Arc<dyn NotionRepository>,
    database: DatabaseId,
}

impl CrmService {
    pub fn new(repo: Arc<dyn NotionRepository>, database: DatabaseId) -> Self {
        Self { repo, database }
    }

    pub fn database_id(&self) -> &DatabaseId {
        &self.database
    }

    async fn pages_of_type(&self, record_type: &str) -> Result<Vec<Page>> {
        let pages = self.repo.query_database(&self.database, record_type).await?;
        log::debug!("Fetched {} pages typed {}", pages.len(), record_type);
        Ok(pages)
    }

    async fn apply_patch(&self, id: &PageId, patch: PropertyPatch) -> Result<()> {
        if patch.is_empty() {
            log::debug!("Nothing to update on page {}", id);
            return Ok(());
        }
        self.repo.update_page(id, patch.into_payload()).await
    }

    async fn outline(&self, page: &PageId) -> Result<PageOutline> {
        let blocks = self.repo.retrieve_children(page).await?;
        log::debug!("Scanned {} blocks on page {}", blocks.len(), page);
        Ok(PageOutline::from_blocks(blocks))
    }

    // Leads

    pub async fn list_leads(&self) -> Result<Vec<Lead>> {
        let pages = self.pages_of_type(TYPE_LEAD).await?;
        Ok(pages.iter().map(Lead::from).collect())
    }

    pub async fn get_lead(&self, id: &PageId) -> Result<Lead> {
        let page = self.repo.retrieve_page(id).await?;
        Ok(Lead::from(&page))
    }

    /// Creates the lead page, then seeds its section headings. A seeding
    /// failure is reported in the result rather than failing the call.
    pub async fn create_lead(&self, draft: &LeadDraft) -> Result<LeadCreation> {
        let page = self
            .repo
            .create_page(&self.database, lead_creation_payload(draft))
            .await?;
        log::info!("Created lead {}", page.id);

        let template = match self.repo.append_children(&page.id, lead_template(), None).await {
            Ok(_) => TemplateOutcome::Seeded,
            Err(e) => {
                log::error!("Failed to seed sections on lead {}: {}", page.id, e);
                TemplateOutcome::Failed(e.to_string())
            }
        };

        Ok(LeadCreation {
            id: page.id,
            template,
        })
    }

    pub async fn update_lead(&self, id: &PageId, body: &Map<String, Value>) -> Result<()> {
        let patch = PropertyPatch::from_partial(LEAD_FIELDS, body)?;
        self.apply_patch(id, patch).await
    }

    /// Turns a lead into a sale dated today.
    pub async fn convert_lead(&self, id: &PageId) -> Result<()> {
        let mut patch = PropertyPatch::new();
        patch
            .select(TYPE_PROPERTY, TYPE_SALE)
            .date(SALES_DATE, &today_utc());
        self.repo.update_page(id, patch.into_payload()).await?;
        log::info!("Converted lead {} to sale", id);
        Ok(())
    }

    pub async fn cancel_lead(&self, id: &PageId) -> Result<()> {
        let mut patch = PropertyPatch::new();
        patch.select(TYPE_PROPERTY, TYPE_CANCELED);
        self.repo.update_page(id, patch.into_payload()).await?;
        log::info!("Canceled lead {}", id);
        Ok(())
    }

    // Sales and payments

    pub async fn list_sales(&self) -> Result<Vec<Sale>> {
        let pages = self.pages_of_type(TYPE_SALE).await?;
        Ok(pages.iter().map(Sale::from).collect())
    }

    pub async fn get_sale(&self, id: &PageId) -> Result<Sale> {
        let page = self.repo.retrieve_page(id).await?;
        Ok(Sale::from(&page))
    }

    pub async fn update_sale(&self, id: &PageId, body: &Map<String, Value>) -> Result<()> {
        let patch = PropertyPatch::from_partial(SALE_FIELDS, body)?;
        self.apply_patch(id, patch).await
    }

    pub async fn list_payments(&self) -> Result<Vec<Payment>> {
        let pages = self.pages_of_type(TYPE_SALE).await?;
        Ok(pages.iter().map(Payment::from).collect())
    }

    pub async fn update_payment(&self, id: &PageId, all_payments_finished: bool) -> Result<()> {
        let mut patch = PropertyPatch::new();
        patch.select(
            ALL_PAYMENTS_FINISHED,
            if all_payments_finished { "Yes" } else { "No" },
        );
        self.repo.update_page(id, patch.into_payload()).await
    }

    pub async fn database_schema(&self) -> Result<DatabaseSchema> {
        self.repo.retrieve_database(&self.database).await
    }

    // Comments

    pub async fn list_comments(
        &self,
        page: &PageId,
        section: Option<CommentSection>,
    ) -> Result<Vec<Comment>> {
        let outline = self.outline(page).await?;
        Ok(comments::list_comments(&outline, section))
    }

    /// Writes a comment after the last comment of its section.
    pub async fn add_comment(&self, page: &PageId, draft: &CommentDraft) -> Result<Comment> {
        let (text, section) = draft.validate()?;

        let outline = self.outline(page).await?;
        let anchor = comments::comment_section(&outline, section)
            .ok_or_else(|| AppError::comment_section_missing(section.heading()))?
            .anchor(comments::is_comment_block)
            .clone();

        let timestamp = comments::now_timestamp();
        let paragraph = NewBlock::Paragraph(comments::format(section, &timestamp, text));
        let created = self
            .repo
            .append_children(page, vec![paragraph], Some(&anchor))
            .await?;

        let block = created.first().ok_or_else(|| {
            AppError::MalformedResponse("Append returned no blocks for the comment".to_string())
        })?;
        log::info!("Added {} comment {} to page {}", section, block.id(), page);
        Ok(comments::created_comment(block.id(), &timestamp, text))
    }

    pub async fn delete_comment(&self, block: &BlockId) -> Result<()> {
        self.repo.delete_block(block).await?;
        log::info!("Deleted comment block {}", block);
        Ok(())
    }

    // Documents

    pub async fn list_documents(
        &self,
        page: &PageId,
        section: DocumentSection,
    ) -> Result<Vec<Document>> {
        let outline = self.outline(page).await?;
        Ok(documents::list_documents(&outline, section))
    }

    /// Removes the block; the uploaded bytes stay with Notion.
    pub async fn delete_document(&self, block: &BlockId) -> Result<()> {
        self.repo.delete_block(block).await?;
        log::info!("Deleted document block {}", block);
        Ok(())
    }

    pub async fn upload_document(
        &self,
        page: &PageId,
        section: DocumentSection,
        file: FilePayload,
    ) -> Result<UploadReceipt> {
        upload::upload_document(self.repo.as_ref(), page, section, file).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn template_is_five_headings_each_with_a_blank_paragraph() {
        let template = lead_template();
        assert_eq!(template.len(), 10);
        assert_eq!(template[0], NewBlock::Heading2("Sales Comments".to_string()));
        assert_eq!(template[1], NewBlock::Paragraph(String::new()));
        assert_eq!(
            template[8],
            NewBlock::Heading2("Appointment Documents (Live Representative)".to_string())
        );
    }

    #[test]
    fn comment_draft_validation() {
        let draft = CommentDraft {
            text: Some("Called customer".to_string()),
            section_type: Some("sales".to_string()),
        };
        assert_eq!(draft.validate(), Ok(("Called customer", CommentSection::Sales)));

        let blank = CommentDraft {
            text: Some("   ".to_string()),
            section_type: Some("sales".to_string()),
        };
        assert_eq!(blank.validate(), Err(ValidationError::MissingCommentFields));

        let no_section = CommentDraft {
            text: Some("hi".to_string()),
            section_type: None,
        };
        assert_eq!(no_section.validate(), Err(ValidationError::MissingCommentFields));

        let unknown = CommentDraft {
            text: Some("hi".to_string()),
            section_type: Some("billing".to_string()),
        };
        assert!(matches!(unknown.validate(), Err(ValidationError::UnknownSection(_))));
    }

    #[test]
    fn today_is_iso_date() {
        let today = today_utc();
        assert_eq!(today.len(), 10);
        assert!(chrono::NaiveDate::parse_from_str(&today, "%Y-%m-%d").is_ok());
    }
}
