// src/api/parser.rs
//! Response parsing.
//!
//! Success bodies are deserialized into the wire types of `responses`;
//! error bodies become `NotionClientError::NotionApi` when Notion sent its
//! usual error object and `AppError::NotionService` otherwise.

use super::client::ApiResponse;
use super::responses::{
    DatabaseObject, FileUploadObject, NotionError, PageObject, QueryDatabaseResponse,
    RetrieveBlockChildrenResponse, ToDomain,
};
use super::types::{FileUploadSlot, PaginatedResponse};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionClientError, NotionErrorCode};
use crate::model::{Block, DatabaseSchema, Page};
use reqwest::StatusCode;

/// Parse any Notion API response
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        parse_error(&result.data, result.status, &result.url)
    }
}

/// Accept any successful response, discarding the body.
pub fn expect_success(result: ApiResponse<String>) -> Result<(), AppError> {
    if result.status.is_success() {
        Ok(())
    } else {
        parse_error(&result.data, result.status, &result.url)
    }
}

fn parse_success<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        NotionClientError::Deserialization {
            source: e,
            body: preview(body),
        }
        .into()
    })
}

fn parse_error<T>(body: &str, status: StatusCode, url: &str) -> Result<T, AppError> {
    if let Ok(notion_error) = serde_json::from_str::<NotionError>(body) {
        log::debug!(
            "Notion rejected {} with {} ({})",
            url,
            notion_error.code,
            notion_error.status
        );
        return Err(NotionClientError::NotionApi {
            status: notion_error.status,
            code: NotionErrorCode::from_api_response(&notion_error.code),
            message: notion_error.message,
            request_id: notion_error.request_id,
        }
        .into());
    }

    Err(AppError::NotionService {
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}: {}", status, url, preview(body)),
        status,
    })
}

fn preview(body: &str) -> String {
    if body.len() > ERROR_BODY_PREVIEW_LENGTH {
        let mut end = ERROR_BODY_PREVIEW_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

pub fn parse_page_response(result: ApiResponse<String>) -> Result<Page, AppError> {
    let page: PageObject = parse_api_response(result)?;
    page.to_domain()
}

pub fn parse_database_response(result: ApiResponse<String>) -> Result<DatabaseSchema, AppError> {
    let database: DatabaseObject = parse_api_response(result)?;
    database.to_domain()
}

pub fn parse_file_upload_response(result: ApiResponse<String>) -> Result<FileUploadSlot, AppError> {
    let upload: FileUploadObject = parse_api_response(result)?;
    upload.to_domain()
}

/// Blocks returned by an append call.
pub fn parse_appended_blocks(result: ApiResponse<String>) -> Result<Vec<Block>, AppError> {
    let response: RetrieveBlockChildrenResponse = parse_api_response(result)?;
    response.into_domain_blocks()
}

/// Pagination function for pages - returns PaginatedResponse
pub fn parse_pages_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Page>, AppError> {
    let response: QueryDatabaseResponse = parse_api_response(result)?;
    let object = response.object.clone();
    let next_cursor = response.next_cursor.clone();
    let has_more = response.has_more;

    Ok(PaginatedResponse {
        object,
        results: response.into_domain_pages()?,
        next_cursor,
        has_more,
    })
}

/// Pagination function for blocks - returns PaginatedResponse
pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Block>, AppError> {
    let response: RetrieveBlockChildrenResponse = parse_api_response(result)?;
    let object = response.object.clone();
    let next_cursor = response.next_cursor.clone();
    let has_more = response.has_more;

    Ok(PaginatedResponse {
        object,
        results: response.into_domain_blocks()?,
        next_cursor,
        has_more,
    })
}
