// tests/common/mod.rs
//! In-memory Notion used by the integration tests.

#![allow(dead_code)]

use notion_crm::error::NotionErrorCode;
use notion_crm::model::ChoiceKind;
use notion_crm::{
    AppError, AttachmentBlock, Block, BlockCommon, BlockId, CrmService, DatabaseId,
    DatabaseSchema, DocumentKind, FilePayload, FileSource, FileUploadId, FileUploadSlot, NewBlock,
    NotionRepository, Page, PageId, PropertyPayload, PropertyTypeValue, RichTextItem,
    SchemaProperty, SelectOption,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const DATABASE: &str = "11111111111111111111111111111111";

pub fn database_id() -> DatabaseId {
    DatabaseId::parse(DATABASE).unwrap()
}

pub fn block_id(n: u32) -> BlockId {
    BlockId::parse(&format!("{:032x}", n)).unwrap()
}

pub fn page_id(n: u32) -> PageId {
    PageId::parse(&format!("{:032x}", 0xabc0_0000u32 + n)).unwrap()
}

#[derive(Default)]
struct State {
    pages: Vec<Page>,
    children: HashMap<PageId, Vec<Block>>,
    updates: Vec<(PageId, PropertyPayload)>,
    uploads: Vec<(FileUploadSlot, FilePayload)>,
    calls: Vec<&'static str>,
    failing: Option<&'static str>,
}

/// Notion stand-in backed by plain collections.
///
/// Writes behave like the real API closely enough for the service: pages
/// store the properties they are sent, appends honor `after`, and every
/// call is recorded by name.
#[derive(Default)]
pub struct FakeNotion {
    state: Mutex<State>,
}

impl FakeNotion {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn service(self: &Arc<Self>) -> CrmService {
        CrmService::new(self.clone(), database_id())
    }

    /// Makes every later call to `operation` fail with a 500.
    pub fn fail_on(&self, operation: &'static str) {
        self.state.lock().unwrap().failing = Some(operation);
    }

    pub fn add_page(&self, id: PageId, record_type: &str, properties: PropertyPayload) {
        let mut page = Page {
            id,
            url: String::new(),
            properties: HashMap::new(),
            archived: false,
        };
        apply(&mut page, &properties);
        page.properties.insert(
            "Type".to_string(),
            PropertyTypeValue::Select {
                select: Some(option(record_type)),
            },
        );
        self.state.lock().unwrap().pages.push(page);
    }

    pub fn set_children(&self, page: &PageId, blocks: Vec<Block>) {
        self.state
            .lock()
            .unwrap()
            .children
            .insert(page.clone(), blocks);
    }

    pub fn children(&self, page: &PageId) -> Vec<Block> {
        self.state
            .lock()
            .unwrap()
            .children
            .get(page)
            .cloned()
            .unwrap_or_default()
    }

    pub fn updates(&self) -> Vec<(PageId, PropertyPayload)> {
        self.state.lock().unwrap().updates.clone()
    }

    pub fn uploads(&self) -> Vec<(FileUploadSlot, FilePayload)> {
        self.state.lock().unwrap().uploads.clone()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    fn enter(&self, operation: &'static str) -> Result<std::sync::MutexGuard<'_, State>, AppError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(operation);
        if state.failing == Some(operation) {
            return Err(AppError::NotionService {
                code: NotionErrorCode::InternalError,
                message: format!("{} is down", operation),
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            });
        }
        Ok(state)
    }
}

fn not_found(what: &str) -> AppError {
    AppError::NotionService {
        code: NotionErrorCode::ObjectNotFound,
        message: format!("Could not find {}", what),
        status: reqwest::StatusCode::NOT_FOUND,
    }
}

fn option(name: &str) -> SelectOption {
    SelectOption {
        id: None,
        name: name.to_string(),
        color: None,
    }
}

/// Reads an outbound property value back the way Notion would store it.
fn stored_value(value: &Value) -> PropertyTypeValue {
    let runs = |v: &Value| -> Vec<RichTextItem> {
        v.as_array()
            .into_iter()
            .flatten()
            .filter_map(|run| run["text"]["content"].as_str())
            .map(RichTextItem::plain_text)
            .collect()
    };
    let choice = |v: &Value| v["name"].as_str().map(option);

    if let Some(v) = value.get("title") {
        PropertyTypeValue::Title { title: runs(v) }
    } else if let Some(v) = value.get("rich_text") {
        PropertyTypeValue::RichText { rich_text: runs(v) }
    } else if let Some(v) = value.get("select") {
        PropertyTypeValue::Select { select: choice(v) }
    } else if let Some(v) = value.get("status") {
        PropertyTypeValue::Status { status: choice(v) }
    } else if let Some(v) = value.get("multi_select") {
        PropertyTypeValue::MultiSelect {
            multi_select: v.as_array().into_iter().flatten().filter_map(choice).collect(),
        }
    } else if let Some(v) = value.get("date") {
        PropertyTypeValue::Date {
            date: v["start"].as_str().map(|start| notion_crm::types::DateValue {
                start: Some(start.to_string()),
                end: None,
                time_zone: None,
            }),
        }
    } else {
        PropertyTypeValue::Unsupported
    }
}

fn apply(page: &mut Page, properties: &PropertyPayload) {
    for (name, value) in properties {
        page.properties.insert(name.clone(), stored_value(value));
    }
}

fn materialize(block: NewBlock) -> Block {
    let id = BlockId::new_v4();
    match block {
        NewBlock::Heading2(text) => Block::heading(2, id, &text),
        NewBlock::Paragraph(text) => Block::paragraph(id, &text),
        NewBlock::Attachment { kind, upload } => {
            let attachment = AttachmentBlock {
                common: BlockCommon::new(id),
                source: FileSource::Upload {
                    url: Some(format!("https://files.example.com/{}", upload)),
                    id: upload,
                    name: None,
                },
                caption: vec![],
                name: None,
            };
            match kind {
                DocumentKind::Image => Block::Image(attachment),
                DocumentKind::File => Block::File(attachment),
            }
        }
    }
}

fn record_type(page: &Page) -> Option<&str> {
    match page.property("Type") {
        Some(PropertyTypeValue::Select {
            select: Some(option),
        }) => Some(option.name.as_str()),
        _ => None,
    }
}

#[async_trait::async_trait]
impl NotionRepository for FakeNotion {
    async fn query_database(
        &self,
        _database: &DatabaseId,
        wanted: &str,
    ) -> Result<Vec<Page>, AppError> {
        let state = self.enter("query_database")?;
        Ok(state
            .pages
            .iter()
            .filter(|page| record_type(page) == Some(wanted))
            .cloned()
            .collect())
    }

    async fn retrieve_page(&self, id: &PageId) -> Result<Page, AppError> {
        let state = self.enter("retrieve_page")?;
        state
            .pages
            .iter()
            .find(|page| &page.id == id)
            .cloned()
            .ok_or_else(|| not_found("page"))
    }

    async fn retrieve_database(&self, _id: &DatabaseId) -> Result<DatabaseSchema, AppError> {
        let _guard = self.enter("retrieve_database")?;
        let mut schema = DatabaseSchema::default();
        schema.properties.insert(
            "Type".to_string(),
            SchemaProperty {
                kind: ChoiceKind::Select,
                options: ["Lead", "Sale", "Canceled"].into_iter().map(option).collect(),
            },
        );
        schema.properties.insert(
            "Job Type".to_string(),
            SchemaProperty {
                kind: ChoiceKind::MultiSelect,
                options: ["Camera", "Alarm"].into_iter().map(option).collect(),
            },
        );
        Ok(schema)
    }

    async fn create_page(
        &self,
        _database: &DatabaseId,
        properties: PropertyPayload,
    ) -> Result<Page, AppError> {
        let mut state = self.enter("create_page")?;
        let mut page = Page {
            id: PageId::new_v4(),
            url: String::new(),
            properties: HashMap::new(),
            archived: false,
        };
        apply(&mut page, &properties);
        state.pages.push(page.clone());
        Ok(page)
    }

    async fn update_page(&self, id: &PageId, properties: PropertyPayload) -> Result<(), AppError> {
        let mut state = self.enter("update_page")?;
        let page = state
            .pages
            .iter_mut()
            .find(|page| &page.id == id)
            .ok_or_else(|| not_found("page"))?;
        apply(page, &properties);
        state.updates.push((id.clone(), properties));
        Ok(())
    }

    async fn retrieve_children(&self, parent: &PageId) -> Result<Vec<Block>, AppError> {
        let state = self.enter("retrieve_children")?;
        Ok(state.children.get(parent).cloned().unwrap_or_default())
    }

    async fn append_children(
        &self,
        parent: &PageId,
        children: Vec<NewBlock>,
        after: Option<&BlockId>,
    ) -> Result<Vec<Block>, AppError> {
        let mut state = self.enter("append_children")?;
        let blocks = state.children.entry(parent.clone()).or_default();
        let position = match after {
            Some(after) => {
                blocks
                    .iter()
                    .position(|block| block.id() == after)
                    .ok_or_else(|| not_found("anchor block"))?
                    + 1
            }
            None => blocks.len(),
        };
        let created: Vec<Block> = children.into_iter().map(materialize).collect();
        for (offset, block) in created.iter().enumerate() {
            blocks.insert(position + offset, block.clone());
        }
        Ok(created)
    }

    async fn delete_block(&self, id: &BlockId) -> Result<(), AppError> {
        let mut state = self.enter("delete_block")?;
        for blocks in state.children.values_mut() {
            if let Some(index) = blocks.iter().position(|block| block.id() == id) {
                blocks.remove(index);
                return Ok(());
            }
        }
        Err(not_found("block"))
    }

    async fn create_file_upload(
        &self,
        _file_name: &str,
        _content_type: &str,
    ) -> Result<FileUploadSlot, AppError> {
        let _guard = self.enter("create_file_upload")?;
        let id = FileUploadId::new_v4();
        Ok(FileUploadSlot {
            upload_url: format!("https://api.example.com/v1/file_uploads/{}/send", id),
            id,
        })
    }

    async fn send_file_upload(
        &self,
        slot: &FileUploadSlot,
        file: &FilePayload,
    ) -> Result<(), AppError> {
        let mut state = self.enter("send_file_upload")?;
        state.uploads.push((slot.clone(), file.clone()));
        Ok(())
    }
}

/// A lead page body as seeded on creation, with some content in it.
pub fn seeded_body() -> Vec<Block> {
    vec![
        Block::heading(2, block_id(1), "Sales Comments"),
        Block::paragraph(block_id(2), ""),
        Block::heading(2, block_id(3), "Sales Documents"),
        Block::paragraph(block_id(4), ""),
        Block::heading(2, block_id(5), "Appointment Comments"),
        Block::paragraph(block_id(6), ""),
        Block::heading(2, block_id(7), "Appointment Documents (Owner)"),
        Block::paragraph(block_id(8), ""),
        Block::heading(2, block_id(9), "Appointment Documents (Live Representative)"),
        Block::paragraph(block_id(10), ""),
    ]
}

pub fn file(name: &str, content_type: &str, size: usize) -> FilePayload {
    FilePayload {
        file_name: name.to_string(),
        content_type: content_type.to_string(),
        bytes: vec![0u8; size],
    }
}
