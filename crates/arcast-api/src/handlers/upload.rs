//! Model upload handler.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use arcast_core::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Asset key of the stored original; the share handle.
    pub key: String,
    /// Shareable viewer URL carrying the handle.
    pub share_url: String,
    /// Key of the derived usdz variant, when derivation succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usdz_key: Option<String>,
}

/// Upload a 3D model.
///
/// Stores the original and, for glb/gltf sources, derives a usdz sibling on a
/// best-effort basis. A failed derivation does not fail the upload; it only
/// means the eventual absence of an iOS-native AR button.
#[utoipa::path(
    post,
    path = "/api/v0/models",
    tag = "models",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Model uploaded", body = UploadResponse),
        (status = 400, description = "Invalid or unsupported file", body = ErrorResponse),
        (status = 409, description = "Key conflict", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 503, description = "Store unavailable", body = ErrorResponse)
    )
)]
pub async fn upload_model(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("invalid multipart body: {}", e)))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("failed to read upload: {}", e)))?;
        upload = Some((filename, data));
        break;
    }

    let (filename, data) =
        upload.ok_or_else(|| AppError::InvalidInput("missing model file field".to_string()))?;

    let receipt = state.ingest.ingest(&filename, data).await?;

    let response = UploadResponse {
        share_url: receipt.handle.viewer_url(&state.config.public_origin),
        usdz_key: receipt.variant.stored_key().map(String::from),
        key: receipt.handle.key,
    };

    Ok((StatusCode::CREATED, Json(response)))
}
