//! Deferred usdz conversion endpoint.
//!
//! Batch alternative to the inline derivation performed during upload: given a
//! stored glb/gltf key, download → convert → store the sibling. Response
//! contract: `400` when `bucket`/`key` are missing, `500 { error }` on any
//! download/convert/upload failure, `200 { ok: true, usdzKey }` on success.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;
use arcast_core::{ModelFormat, USDZ_CONTENT_TYPE};
use arcast_storage::usdz_sibling_key;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ConvertRequest {
    pub bucket: Option<String>,
    pub key: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConvertResponse {
    pub ok: bool,
    #[serde(rename = "usdzKey")]
    pub usdz_key: String,
}

fn error_json(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({ "error": message.into() })),
    )
        .into_response()
}

/// Convert a stored glb/gltf asset into its usdz sibling.
#[utoipa::path(
    post,
    path = "/api/convert-usdz",
    tag = "convert",
    request_body = ConvertRequest,
    responses(
        (status = 200, description = "Sibling stored", body = ConvertResponse),
        (status = 400, description = "Missing bucket or key"),
        (status = 500, description = "Download, conversion or upload failed")
    )
)]
pub async fn convert_usdz(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConvertRequest>,
) -> Response {
    let (bucket, key) = match (request.bucket.as_deref(), request.key.as_deref()) {
        (Some(bucket), Some(key)) if !bucket.is_empty() && !key.is_empty() => (bucket, key),
        _ => return error_json(StatusCode::BAD_REQUEST, "bucket and key are required"),
    };

    if bucket != state.config.storage_bucket {
        return error_json(
            StatusCode::BAD_REQUEST,
            format!("unknown bucket: {}", bucket),
        );
    }

    let (format, usdz_key) = match (ModelFormat::from_filename(key), usdz_sibling_key(key)) {
        (Some(format), Some(usdz_key)) => (format, usdz_key),
        _ => {
            return error_json(
                StatusCode::INTERNAL_SERVER_ERROR,
                "source is not a glb/gltf asset",
            )
        }
    };

    let source = match state.storage.get(key).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(key = %key, error = %e, "conversion source download failed");
            return error_json(
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to download source",
            );
        }
    };

    let usdz_bytes = match state.converter.convert(&source, format).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(key = %key, error = %e, "deferred conversion failed");
            return error_json(StatusCode::INTERNAL_SERVER_ERROR, "conversion failed");
        }
    };

    if let Err(e) = state
        .storage
        .put(&usdz_key, usdz_bytes.into(), USDZ_CONTENT_TYPE, true)
        .await
    {
        tracing::error!(usdz_key = %usdz_key, error = %e, "usdz upload failed");
        return error_json(StatusCode::INTERNAL_SERVER_ERROR, "failed to store usdz");
    }

    tracing::info!(key = %key, usdz_key = %usdz_key, "deferred usdz conversion complete");

    Json(ConvertResponse {
        ok: true,
        usdz_key,
    })
    .into_response()
}
