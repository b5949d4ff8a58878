//! Handle resolution: pick the stored variant and AR trigger for a device.

use arcast_core::{scene_viewer_uri, AppError, ArLaunch, Platform, ResolvedView, ShareHandle};
use arcast_storage::{usdz_sibling_key, ObjectStore};
use std::sync::Arc;
use std::time::Duration;

/// Resolves a share handle into a platform-appropriate view.
///
/// Idempotent and side-effect-free beyond signed-URL issuance.
#[derive(Clone)]
pub struct ResolveService {
    storage: Arc<dyn ObjectStore>,
    signed_url_ttl: Duration,
}

impl ResolveService {
    pub fn new(storage: Arc<dyn ObjectStore>, signed_url_ttl: Duration) -> Self {
        Self {
            storage,
            signed_url_ttl,
        }
    }

    #[tracing::instrument(skip(self), fields(key = %handle.key, platform = ?platform))]
    pub async fn resolve(
        &self,
        handle: &ShareHandle,
        platform: Platform,
    ) -> Result<ResolvedView, AppError> {
        let key = &handle.key;

        // The primary asset must be locatable and signable; anything else is
        // fatal for the whole resolution.
        let display_url = self
            .storage
            .signed_url(key, self.signed_url_ttl)
            .await
            .map_err(|e| {
                AppError::AssetUnavailable(format!("cannot sign display URL for {}: {}", key, e))
            })?;

        // The usdz variant is optional by contract; a miss here only downgrades
        // the iOS launch mode.
        let usdz_url = match usdz_sibling_key(key) {
            Some(usdz_key) => self.probe_variant(&usdz_key).await,
            None => None,
        };

        let ar = match platform {
            Platform::Android => ArLaunch::SceneViewer {
                uri: scene_viewer_uri(&display_url),
            },
            Platform::Ios => match &usdz_url {
                Some(url) => ArLaunch::QuickLook { url: url.clone() },
                None => ArLaunch::Unavailable,
            },
            Platform::Other => ArLaunch::DisplayOnly,
        };

        Ok(ResolvedView {
            display_url,
            usdz_url,
            platform,
            ar,
        })
    }

    async fn probe_variant(&self, usdz_key: &str) -> Option<String> {
        match self.storage.exists(usdz_key).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(usdz_key = %usdz_key, "no usdz variant stored");
                return None;
            }
            Err(e) => {
                tracing::debug!(usdz_key = %usdz_key, error = %e, "usdz variant probe failed");
                return None;
            }
        }

        match self.storage.signed_url(usdz_key, self.signed_url_ttl).await {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::debug!(usdz_key = %usdz_key, error = %e, "usdz variant signing failed");
                None
            }
        }
    }
}
