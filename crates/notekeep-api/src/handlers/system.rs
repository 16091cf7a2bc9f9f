//! Unauthenticated service endpoints.

use axum::Json;
use serde_json::json;
use utoipa::OpenApi;

use crate::ApiDoc;

/// `GET /health`
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `GET /openapi.json`
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
