// src/server/mod.rs
//! HTTP surface of the dashboard backend.

pub mod response;
pub mod routes;

use crate::constants::UPLOAD_BODY_LIMIT;
use crate::service::CrmService;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub use response::{ApiError, ApiResult};

/// Service shared by every handler.
pub type SharedState = Arc<CrmService>;

/// Create the API router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        // Leads
        .route("/api/leads", get(routes::list_leads).post(routes::create_lead))
        .route(
            "/api/leads/:id",
            get(routes::get_lead).patch(routes::update_lead),
        )
        .route("/api/leads/:id/convert", patch(routes::convert_lead))
        .route("/api/leads/:id/cancel", patch(routes::cancel_lead))
        // Sales and payments
        .route("/api/sales", get(routes::list_sales))
        .route(
            "/api/sales/:id",
            get(routes::get_sale).patch(routes::update_sale),
        )
        .route("/api/payments", get(routes::list_payments))
        .route("/api/payments/:id", patch(routes::update_payment))
        .route("/api/schema", get(routes::database_schema))
        // Page body
        .route(
            "/api/comments/:page_id",
            get(routes::list_comments)
                .post(routes::add_comment)
                .delete(routes::delete_comment),
        )
        .route(
            "/api/documents/:page_id",
            get(routes::list_documents).delete(routes::delete_document),
        )
        .route(
            "/api/documents/:page_id/upload",
            post(routes::upload_document).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `addr` and serves the API until the process stops.
pub async fn serve(addr: SocketAddr, service: CrmService) -> crate::error::Result<()> {
    let app = create_router(Arc::new(service));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
