// src/handlers/system.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;
use utoipa::OpenApi;

use crate::{error::AppError, openapi::ApiDoc, services::refresh, store::QuizStore};

/// Liveness probe. Also checks that the store answers.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "System",
    responses(
        (status = 200, description = "Service and store are up"),
        (status = 500, description = "Store unreachable")
    )
)]
pub async fn health(State(store): State<Arc<dyn QuizStore>>) -> Result<impl IntoResponse, AppError> {
    store.ping().await?;

    Ok(Json(json!({
        "success": true,
        "message": "Quiz Competition API is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}

/// Clears every result and question and installs the fixed question set.
#[utoipa::path(
    post,
    path = "/api/refresh",
    tag = "System",
    responses(
        (status = 200, description = "Refresh report", body = crate::services::refresh::RefreshReport),
        (status = 500, description = "Refresh aborted part-way")
    )
)]
pub async fn trigger_refresh(
    State(store): State<Arc<dyn QuizStore>>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("Manual refresh triggered");
    let report = refresh::refresh(store.as_ref()).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Data refreshed successfully",
        "data": report,
    })))
}

/// Serves the OpenAPI document of the public API.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// JSON 404 for unmatched routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("API endpoint not found".to_string())
}
