//! Handle resolution handler.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    Json,
};
use serde::Deserialize;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use arcast_core::{AppError, Platform, ResolvedView, ShareHandle};

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    /// Asset key carried by the share handle.
    pub key: String,
    /// Optional platform override (`android` | `ios` | `other`); when absent
    /// the `User-Agent` header is classified.
    pub platform: Option<String>,
}

/// Resolve a share handle into a platform-appropriate view.
#[utoipa::path(
    get,
    path = "/api/v0/models/resolve",
    tag = "models",
    params(
        ("key" = String, Query, description = "Asset key from the share handle"),
        ("platform" = Option<String>, Query, description = "Platform override: android, ios or other")
    ),
    responses(
        (status = 200, description = "Resolved view with signed URLs and AR launch artifact"),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 404, description = "Asset unavailable", body = ErrorResponse)
    )
)]
pub async fn resolve_model(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResolveQuery>,
    headers: HeaderMap,
) -> Result<Json<ResolvedView>, HttpAppError> {
    if query.key.is_empty() {
        return Err(AppError::InvalidInput("missing key parameter".to_string()).into());
    }

    let platform = match query.platform.as_deref() {
        Some(raw) => Platform::from_param(raw)
            .ok_or_else(|| AppError::InvalidInput(format!("unknown platform: {}", raw)))?,
        None => {
            let user_agent = headers
                .get(header::USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("");
            Platform::from_user_agent(user_agent)
        }
    };

    let handle = ShareHandle::new(query.key);
    let view = state.resolver.resolve(&handle, platform).await?;

    Ok(Json(view))
}
