// src/server/routes.rs
//! HTTP handlers.
//!
//! Handlers parse identifiers and bodies, call one service operation and
//! wrap the result in the JSON shape the dashboard expects.

use super::response::{ApiError, ApiResult, OrRespond};
use super::SharedState;
use crate::api::FilePayload;
use crate::model::{Comment, DatabaseSchema, Document, Lead, LeadDraft, Payment, Sale};
use crate::service::{CommentDraft, TemplateOutcome};
use crate::types::{BlockId, CommentSection, DocumentSection, PageId, ValidationError};
use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        rejection::JsonRejection,
        Path, Query, State,
    },
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Content type assumed when a multipart part does not declare one.
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

fn page_id(raw: &str) -> ApiResult<PageId> {
    Ok(PageId::parse(raw)?)
}

fn block_id(raw: Option<&str>) -> ApiResult<BlockId> {
    let raw = raw
        .filter(|raw| !raw.trim().is_empty())
        .ok_or(ValidationError::MissingField("Block ID"))?;
    Ok(BlockId::parse(raw)?)
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

const SUCCESS: SuccessResponse = SuccessResponse { success: true };

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// === Leads ===

#[derive(Debug, Serialize)]
pub struct LeadsResponse {
    pub leads: Vec<Lead>,
}

#[derive(Debug, Serialize)]
pub struct LeadResponse {
    pub lead: Lead,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadCreatedResponse {
    pub success: bool,
    pub id: PageId,
    pub template_seeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_error: Option<String>,
}

/// GET /api/leads
pub async fn list_leads(State(service): State<SharedState>) -> ApiResult<Json<LeadsResponse>> {
    let leads = service
        .list_leads()
        .await
        .or_respond("Failed to fetch leads data")?;
    Ok(Json(LeadsResponse { leads }))
}

/// POST /api/leads
pub async fn create_lead(
    State(service): State<SharedState>,
    payload: Result<Json<LeadDraft>, JsonRejection>,
) -> ApiResult<Json<LeadCreatedResponse>> {
    let draft = json_body(payload)?;
    let created = service
        .create_lead(&draft)
        .await
        .or_respond("Failed to create lead")?;

    let template_error = match created.template {
        TemplateOutcome::Seeded => None,
        TemplateOutcome::Failed(reason) => Some(reason),
    };
    Ok(Json(LeadCreatedResponse {
        success: true,
        id: created.id,
        template_seeded: template_error.is_none(),
        template_error,
    }))
}

/// GET /api/leads/:id
pub async fn get_lead(
    State(service): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<LeadResponse>> {
    let id = page_id(&id)?;
    let lead = service
        .get_lead(&id)
        .await
        .or_respond("Failed to fetch lead data")?;
    Ok(Json(LeadResponse { lead }))
}

/// PATCH /api/leads/:id
pub async fn update_lead(
    State(service): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<Json<SuccessResponse>> {
    let id = page_id(&id)?;
    let body = json_body(payload)?;
    service
        .update_lead(&id, &body)
        .await
        .or_respond("Failed to update lead data")?;
    Ok(Json(SUCCESS))
}

/// PATCH /api/leads/:id/convert
pub async fn convert_lead(
    State(service): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    let id = page_id(&id)?;
    service
        .convert_lead(&id)
        .await
        .or_respond("Failed to convert lead to sale")?;
    Ok(Json(SUCCESS))
}

/// PATCH /api/leads/:id/cancel
pub async fn cancel_lead(
    State(service): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    let id = page_id(&id)?;
    service
        .cancel_lead(&id)
        .await
        .or_respond("Failed to cancel lead")?;
    Ok(Json(SUCCESS))
}

// === Sales and payments ===

#[derive(Debug, Serialize)]
pub struct SalesResponse {
    pub sales: Vec<Sale>,
}

#[derive(Debug, Serialize)]
pub struct SaleResponse {
    pub sale: Sale,
}

#[derive(Debug, Serialize)]
pub struct PaymentsResponse {
    pub payments: Vec<Payment>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentUpdate {
    /// Absent means not finished.
    pub all_payments_finished: bool,
}

/// GET /api/sales
pub async fn list_sales(State(service): State<SharedState>) -> ApiResult<Json<SalesResponse>> {
    let sales = service
        .list_sales()
        .await
        .or_respond("Failed to fetch sales data")?;
    Ok(Json(SalesResponse { sales }))
}

/// GET /api/sales/:id
pub async fn get_sale(
    State(service): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SaleResponse>> {
    let id = page_id(&id)?;
    let sale = service
        .get_sale(&id)
        .await
        .or_respond("Failed to fetch sale data")?;
    Ok(Json(SaleResponse { sale }))
}

/// PATCH /api/sales/:id
pub async fn update_sale(
    State(service): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<Json<SuccessResponse>> {
    let id = page_id(&id)?;
    let body = json_body(payload)?;
    service
        .update_sale(&id, &body)
        .await
        .or_respond("Failed to update sale data")?;
    Ok(Json(SUCCESS))
}

/// GET /api/payments
pub async fn list_payments(
    State(service): State<SharedState>,
) -> ApiResult<Json<PaymentsResponse>> {
    let payments = service
        .list_payments()
        .await
        .or_respond("Failed to fetch payments data")?;
    Ok(Json(PaymentsResponse { payments }))
}

/// PATCH /api/payments/:id
pub async fn update_payment(
    State(service): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<PaymentUpdate>, JsonRejection>,
) -> ApiResult<Json<SuccessResponse>> {
    let id = page_id(&id)?;
    let finished = json_body(payload)?.all_payments_finished;
    service
        .update_payment(&id, finished)
        .await
        .or_respond("Failed to update payment status")?;
    Ok(Json(SUCCESS))
}

// === Schema ===

#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub schema: std::collections::BTreeMap<String, crate::model::SchemaProperty>,
}

impl From<DatabaseSchema> for SchemaResponse {
    fn from(schema: DatabaseSchema) -> Self {
        Self {
            schema: schema.properties,
        }
    }
}

/// GET /api/schema
pub async fn database_schema(
    State(service): State<SharedState>,
) -> ApiResult<Json<SchemaResponse>> {
    let schema = service
        .database_schema()
        .await
        .or_respond("Failed to fetch database schema")?;
    Ok(Json(schema.into()))
}

// === Comments ===

#[derive(Debug, Default, Deserialize)]
pub struct CommentQuery {
    pub section: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BlockQuery {
    #[serde(rename = "blockId")]
    pub block_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CommentsResponse {
    pub comments: Vec<Comment>,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub comment: Comment,
}

/// GET /api/comments/:page_id?section=
///
/// An absent or unknown section lists every section.
pub async fn list_comments(
    State(service): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<CommentQuery>,
) -> ApiResult<Json<CommentsResponse>> {
    let id = page_id(&id)?;
    let section = query
        .section
        .as_deref()
        .and_then(|section| CommentSection::parse(section).ok());
    let comments = service
        .list_comments(&id, section)
        .await
        .or_respond("Failed to fetch comments")?;
    Ok(Json(CommentsResponse { comments }))
}

/// POST /api/comments/:page_id
pub async fn add_comment(
    State(service): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<CommentDraft>, JsonRejection>,
) -> ApiResult<Json<CommentResponse>> {
    let id = page_id(&id)?;
    let draft = json_body(payload)?;
    let comment = service
        .add_comment(&id, &draft)
        .await
        .or_respond("Failed to add comment")?;
    Ok(Json(CommentResponse { comment }))
}

/// DELETE /api/comments/:page_id?blockId=
pub async fn delete_comment(
    State(service): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<BlockQuery>,
) -> ApiResult<Json<SuccessResponse>> {
    page_id(&id)?;
    let block = block_id(query.block_id.as_deref())?;
    service
        .delete_comment(&block)
        .await
        .or_respond("Failed to delete comment")?;
    Ok(Json(SUCCESS))
}

// === Documents ===

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentQuery {
    pub section_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DocumentsResponse {
    pub documents: Vec<Document>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub message: &'static str,
    pub block_id: BlockId,
    pub document: Document,
}

/// GET /api/documents/:page_id?sectionType=
pub async fn list_documents(
    State(service): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<DocumentQuery>,
) -> ApiResult<Json<DocumentsResponse>> {
    let id = page_id(&id)?;
    let section = DocumentSection::from_query(query.section_type.as_deref());
    let documents = service
        .list_documents(&id, section)
        .await
        .or_respond("Failed to fetch documents")?;
    Ok(Json(DocumentsResponse { documents }))
}

/// DELETE /api/documents/:page_id?blockId=
pub async fn delete_document(
    State(service): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<BlockQuery>,
) -> ApiResult<Json<MessageResponse>> {
    page_id(&id)?;
    let block = block_id(query.block_id.as_deref())?;
    service
        .delete_document(&block)
        .await
        .or_respond("Failed to delete document")?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Document deleted successfully",
    }))
}

/// Reads the `file` part of an upload form.
async fn file_part(multipart: &mut Multipart) -> ApiResult<FilePayload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        return Ok(FilePayload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }
    Err(ValidationError::MissingField("File").into())
}

/// POST /api/documents/:page_id/upload?sectionType=
pub async fn upload_document(
    State(service): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<DocumentQuery>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<UploadResponse>> {
    let id = page_id(&id)?;
    let mut multipart = multipart.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let file = file_part(&mut multipart).await?;
    let section = DocumentSection::from_query(query.section_type.as_deref());

    let receipt = service
        .upload_document(&id, section, file)
        .await
        .or_respond("Upload failed")?;
    Ok(Json(UploadResponse {
        success: true,
        message: receipt.message,
        block_id: receipt.block_id,
        document: receipt.document,
    }))
}
