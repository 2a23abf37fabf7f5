// src/api/client.rs
//! Pure HTTP client wrapper for Notion API.
//!
//! This module provides a thin wrapper around reqwest for making
//! HTTP requests to the Notion API. It handles authentication and
//! basic request/response operations without parsing or business logic.

use super::parser;
use super::requests::{self, NewBlock, PropertyPayload};
use super::simple_pagination::fetch_all_pages_simple;
use super::types::{FilePayload, FileUploadSlot};
use crate::constants::{NOTION_API_BASE_URL, NOTION_VERSION};
use crate::error::AppError;
use crate::model::{Block, DatabaseSchema, Page};
use crate::types::{ApiKey, BlockId, DatabaseId, PageId};
use reqwest::{header, multipart, Client, Response};
use serde::Serialize;
use serde_json::json;

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: String,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        Self::with_base_url(api_key, NOTION_API_BASE_URL)
    }

    /// Creates a client against a different API root, e.g. a local stub.
    pub fn with_base_url(api_key: &ApiKey, base_url: &str) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates the default headers for Notion API requests.
    ///
    /// No default content type: JSON bodies set their own and the upload
    /// step needs a multipart boundary.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        Ok(headers)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// Makes a GET request to the specified endpoint.
    pub async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Response, AppError> {
        let url = self.url(endpoint);
        log::debug!("GET {}", url);
        Ok(self.client.get(url).query(query).send().await?)
    }

    /// Makes a POST request with JSON body to the specified endpoint.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        let url = self.url(endpoint);
        log::debug!("POST {}", url);
        Ok(self.client.post(url).json(body).send().await?)
    }

    /// Makes a PATCH request with JSON body to the specified endpoint.
    pub async fn patch<T: Serialize>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<Response, AppError> {
        let url = self.url(endpoint);
        log::debug!("PATCH {}", url);
        Ok(self.client.patch(url).json(body).send().await?)
    }

    /// Makes a DELETE request to the specified endpoint.
    pub async fn delete(&self, endpoint: &str) -> Result<Response, AppError> {
        let url = self.url(endpoint);
        log::debug!("DELETE {}", url);
        Ok(self.client.delete(url).send().await?)
    }

    /// POSTs a multipart form to an absolute URL handed out by Notion.
    pub async fn post_multipart(&self, url: &str, form: multipart::Form) -> Result<Response, AppError> {
        log::debug!("POST (multipart) {}", url);
        Ok(self.client.post(url).multipart(form).send().await?)
    }
}

#[async_trait::async_trait]
impl super::NotionRepository for NotionHttpClient {
    async fn query_database(
        &self,
        database: &DatabaseId,
        record_type: &str,
    ) -> Result<Vec<Page>, AppError> {
        let endpoint = format!("databases/{}/query", database.to_dashed());
        log::info!("Querying {} rows of database {}", record_type, database);
        let client = self.clone();
        let pagination_result = fetch_all_pages_simple(
            |page_size, cursor| {
                let client = client.clone();
                let endpoint = endpoint.clone();
                async move {
                    let query = requests::select_filter_query(
                        crate::constants::TYPE_PROPERTY,
                        record_type,
                        cursor.as_deref(),
                        page_size,
                    );
                    let response = client.post(&endpoint, &query).await?;
                    let result = extract_response_text(response).await?;
                    parser::parse_pages_pagination(result)
                }
            },
        )
        .await?;
        Ok(pagination_result.items)
    }

    async fn retrieve_page(&self, id: &PageId) -> Result<Page, AppError> {
        let endpoint = format!("pages/{}", id.to_dashed());
        let response = self.get(&endpoint, &[]).await?;
        let result = extract_response_text(response).await?;
        parser::parse_page_response(result)
    }

    async fn retrieve_database(&self, id: &DatabaseId) -> Result<DatabaseSchema, AppError> {
        let endpoint = format!("databases/{}", id.to_dashed());
        let response = self.get(&endpoint, &[]).await?;
        let result = extract_response_text(response).await?;
        parser::parse_database_response(result)
    }

    async fn create_page(
        &self,
        database: &DatabaseId,
        properties: PropertyPayload,
    ) -> Result<Page, AppError> {
        let body = requests::create_page_body(database, &properties);
        let response = self.post("pages", &body).await?;
        let result = extract_response_text(response).await?;
        parser::parse_page_response(result)
    }

    async fn update_page(&self, id: &PageId, properties: PropertyPayload) -> Result<(), AppError> {
        let endpoint = format!("pages/{}", id.to_dashed());
        let body = json!({ "properties": properties });
        let response = self.patch(&endpoint, &body).await?;
        let result = extract_response_text(response).await?;
        parser::expect_success(result)
    }

    async fn retrieve_children(&self, parent: &PageId) -> Result<Vec<Block>, AppError> {
        let endpoint = format!("blocks/{}/children", parent.to_dashed());
        let client = self.clone();
        let pagination_result = fetch_all_pages_simple(
            |page_size, cursor| {
                let client = client.clone();
                let endpoint = endpoint.clone();
                async move {
                    let mut query = vec![("page_size", page_size.to_string())];
                    if let Some(cursor) = cursor {
                        query.push(("start_cursor", cursor));
                    }
                    let response = client.get(&endpoint, &query).await?;
                    let result = extract_response_text(response).await?;
                    parser::parse_blocks_pagination(result)
                }
            },
        )
        .await?;
        log::debug!(
            "Page {} has {} top-level blocks",
            parent,
            pagination_result.total_fetched
        );
        Ok(pagination_result.items)
    }

    async fn append_children(
        &self,
        parent: &PageId,
        children: Vec<NewBlock>,
        after: Option<&BlockId>,
    ) -> Result<Vec<Block>, AppError> {
        let endpoint = format!("blocks/{}/children", parent.to_dashed());
        let after = after.map(|id| id.to_dashed());
        let body = requests::append_children_body(&children, after.as_deref());
        let response = self.patch(&endpoint, &body).await?;
        let result = extract_response_text(response).await?;
        parser::parse_appended_blocks(result)
    }

    async fn delete_block(&self, id: &BlockId) -> Result<(), AppError> {
        let endpoint = format!("blocks/{}", id.to_dashed());
        let response = self.delete(&endpoint).await?;
        let result = extract_response_text(response).await?;
        parser::expect_success(result)
    }

    async fn create_file_upload(
        &self,
        file_name: &str,
        content_type: &str,
    ) -> Result<FileUploadSlot, AppError> {
        let body = json!({ "filename": file_name, "content_type": content_type });
        let response = self.post("file_uploads", &body).await?;
        let result = extract_response_text(response).await?;
        parser::parse_file_upload_response(result)
    }

    async fn send_file_upload(
        &self,
        slot: &FileUploadSlot,
        file: &FilePayload,
    ) -> Result<(), AppError> {
        let part = multipart::Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;
        let form = multipart::Form::new().part("file", part);
        let response = self.post_multipart(&slot.upload_url, form).await?;
        let result = extract_response_text(response).await?;
        parser::expect_success(result)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    if !status.is_success() {
        log::warn!("{} returned {}", url, status);
    }

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
