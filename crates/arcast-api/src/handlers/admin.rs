//! Bulk administration: list stored models, purge everything.
//!
//! Purge is the only deletion path in the system; asset keys are otherwise
//! immutable from creation.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use arcast_core::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct ModelListResponse {
    pub keys: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PurgeResponse {
    pub deleted: usize,
}

/// List every stored object key (originals and usdz siblings).
#[utoipa::path(
    get,
    path = "/api/v0/models",
    tag = "models",
    responses(
        (status = 200, description = "Stored keys", body = ModelListResponse),
        (status = 503, description = "Store unavailable", body = ErrorResponse)
    )
)]
pub async fn list_models(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ModelListResponse>, HttpAppError> {
    let keys = state
        .storage
        .list("")
        .await
        .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

    Ok(Json(ModelListResponse { keys }))
}

/// Delete every stored object.
#[utoipa::path(
    delete,
    path = "/api/v0/models",
    tag = "models",
    responses(
        (status = 200, description = "All objects removed", body = PurgeResponse),
        (status = 503, description = "Store unavailable", body = ErrorResponse)
    )
)]
pub async fn purge_models(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PurgeResponse>, HttpAppError> {
    let keys = state
        .storage
        .list("")
        .await
        .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

    if !keys.is_empty() {
        state
            .storage
            .delete(&keys)
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
    }

    tracing::info!(deleted = keys.len(), "purged all stored models");

    Ok(Json(PurgeResponse {
        deleted: keys.len(),
    }))
}
