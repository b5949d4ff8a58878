//! Ingestion coordination: store original → derive platform variant → store variant.
//!
//! The derivation is a two-phase operation with an explicit composite result:
//! the primary write either succeeds or fails the upload, while the secondary
//! usdz write reports its own outcome and is never allowed to fail the parent.

use arcast_convert::UsdzConverter;
use arcast_core::{AppError, ModelFormat, ShareHandle, VariantOutcome, USDZ_CONTENT_TYPE};
use arcast_storage::{generate_asset_key, usdz_sibling_key, ObjectStore, StorageError};
use bytes::Bytes;
use chrono::Utc;
use std::sync::Arc;

/// Result of a successful ingestion.
#[derive(Debug)]
pub struct IngestReceipt {
    /// Handle referencing the stored original.
    pub handle: ShareHandle,
    /// Outcome of the best-effort usdz derivation.
    pub variant: VariantOutcome,
}

/// Coordinates upload of a model and best-effort derivation of its usdz variant.
#[derive(Clone)]
pub struct IngestService {
    storage: Arc<dyn ObjectStore>,
    converter: Arc<dyn UsdzConverter>,
    max_model_size_bytes: usize,
}

impl IngestService {
    pub fn new(
        storage: Arc<dyn ObjectStore>,
        converter: Arc<dyn UsdzConverter>,
        max_model_size_bytes: usize,
    ) -> Self {
        Self {
            storage,
            converter,
            max_model_size_bytes,
        }
    }

    /// Ingest an uploaded model.
    ///
    /// Validates the format, stores the original under a fresh asset key
    /// (`overwrite = false`, so a same-millisecond duplicate surfaces as
    /// `StoreConflict`), then attempts the usdz derivation for glb/gltf
    /// sources. Up to two store writes; no deletions.
    #[tracing::instrument(skip(self, data), fields(filename = %filename, size_bytes = data.len()))]
    pub async fn ingest(&self, filename: &str, data: Bytes) -> Result<IngestReceipt, AppError> {
        let format = ModelFormat::from_filename(filename)
            .ok_or_else(|| AppError::UnsupportedFormat(filename.to_string()))?;

        if data.is_empty() {
            return Err(AppError::InvalidInput("empty model file".to_string()));
        }
        if data.len() > self.max_model_size_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "model is {} bytes (max: {} bytes)",
                data.len(),
                self.max_model_size_bytes
            )));
        }

        let key = generate_asset_key(Utc::now().timestamp_millis(), filename);

        self.storage
            .put(&key, data.clone(), format.content_type(), false)
            .await
            .map_err(|e| match e {
                StorageError::Conflict(conflicting) => AppError::StoreConflict(conflicting),
                other => AppError::StoreUnavailable(other.to_string()),
            })?;

        tracing::info!(key = %key, format = format.extension(), "original stored");

        let variant = if format.is_convertible() {
            self.derive_variant(&key, &data, format).await
        } else {
            VariantOutcome::Skipped
        };

        Ok(IngestReceipt {
            handle: ShareHandle::new(key),
            variant,
        })
    }

    /// Best-effort usdz derivation. Every failure is logged and absorbed: the
    /// original upload has already succeeded and must be reported as such.
    async fn derive_variant(
        &self,
        key: &str,
        data: &[u8],
        format: ModelFormat,
    ) -> VariantOutcome {
        let Some(usdz_key) = usdz_sibling_key(key) else {
            return VariantOutcome::Skipped;
        };

        let usdz_bytes = match self.converter.convert(data, format).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(
                    key = %key,
                    strategy = self.converter.strategy(),
                    error = %e,
                    "usdz derivation failed"
                );
                return VariantOutcome::Failed;
            }
        };

        // Re-derivation is idempotent, so the sibling write may overwrite.
        match self
            .storage
            .put(&usdz_key, Bytes::from(usdz_bytes), USDZ_CONTENT_TYPE, true)
            .await
        {
            Ok(()) => {
                tracing::info!(key = %key, usdz_key = %usdz_key, "usdz variant stored");
                VariantOutcome::Stored(usdz_key)
            }
            Err(e) => {
                tracing::warn!(key = %key, usdz_key = %usdz_key, error = %e, "failed to store usdz variant");
                VariantOutcome::Failed
            }
        }
    }
}
