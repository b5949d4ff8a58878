//! Application state shared across handlers.

use crate::services::{IngestService, ResolveService};
use arcast_convert::UsdzConverter;
use arcast_core::Config;
use arcast_storage::ObjectStore;
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn ObjectStore>,
    pub converter: Arc<dyn UsdzConverter>,
    pub ingest: IngestService,
    pub resolver: ResolveService,
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Arc<dyn ObjectStore>,
        converter: Arc<dyn UsdzConverter>,
    ) -> Self {
        let ingest = IngestService::new(
            storage.clone(),
            converter.clone(),
            config.max_model_size_bytes,
        );
        let resolver = ResolveService::new(storage.clone(), config.signed_url_ttl());

        Self {
            config,
            storage,
            converter,
            ingest,
            resolver,
        }
    }
}
