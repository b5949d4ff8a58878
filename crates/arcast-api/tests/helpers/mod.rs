//! Test helpers: build AppState and router against the in-memory store.
//!
//! Run from workspace root: `cargo test -p arcast-api`.

// Not every test binary uses every helper.
#![allow(dead_code)]

pub mod fixtures;

use arcast_api::setup::routes::setup_routes;
use arcast_api::state::AppState;
use arcast_convert::{ConversionError, SceneConverter, UsdzConverter};
use arcast_core::{Config, ConverterStrategy, ModelFormat, StorageBackend};
use arcast_storage::{MemoryStorage, ObjectStore, StorageError, StorageResult};
use async_trait::async_trait;
use axum_test::TestServer;
use bytes::Bytes;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub fn test_config() -> Config {
    Config {
        server_port: 0,
        cors_origins: Vec::new(),
        public_origin: "http://localhost:8080".to_string(),
        environment: "test".to_string(),
        storage_backend: StorageBackend::Memory,
        storage_bucket: "models".to_string(),
        local_storage_path: None,
        local_storage_base_url: None,
        local_signing_secret: None,
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        converter_strategy: ConverterStrategy::Scene,
        converter_path: None,
        converter_timeout_secs: 5,
        signed_url_ttl_secs: 3600,
        max_model_size_bytes: 10 * 1024 * 1024,
    }
}

/// Test application: server plus direct access to the backing store.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<MemoryStorage>,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with_converter(Arc::new(SceneConverter::new()))
}

pub fn setup_test_app_with_converter(converter: Arc<dyn UsdzConverter>) -> TestApp {
    let storage = Arc::new(MemoryStorage::new("models"));
    let state = Arc::new(AppState::new(
        test_config(),
        storage.clone() as Arc<dyn ObjectStore>,
        converter,
    ));
    let router = setup_routes(&state.config, state.clone()).expect("failed to build router");

    TestApp {
        server: TestServer::new(router).expect("failed to start test server"),
        storage,
        state,
    }
}

/// Converter stub that returns a fixed buffer and counts invocations.
#[derive(Default)]
pub struct CountingConverter {
    pub calls: AtomicUsize,
}

impl CountingConverter {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UsdzConverter for CountingConverter {
    async fn convert(
        &self,
        _data: &[u8],
        _format: ModelFormat,
    ) -> Result<Vec<u8>, ConversionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(b"PK-usdz-stub".to_vec())
    }

    fn strategy(&self) -> &'static str {
        "counting-stub"
    }
}

/// Converter stub that always fails.
pub struct FailingConverter;

#[async_trait]
impl UsdzConverter for FailingConverter {
    async fn convert(
        &self,
        _data: &[u8],
        _format: ModelFormat,
    ) -> Result<Vec<u8>, ConversionError> {
        Err(ConversionError::Parse("synthetic parse failure".to_string()))
    }

    fn strategy(&self) -> &'static str {
        "failing-stub"
    }
}

/// Storage stub simulating a backend outage: every operation fails.
pub struct FailingStorage;

#[async_trait]
impl ObjectStore for FailingStorage {
    async fn put(
        &self,
        _key: &str,
        _data: Bytes,
        _content_type: &str,
        _overwrite: bool,
    ) -> StorageResult<()> {
        Err(StorageError::BackendError("simulated outage".to_string()))
    }

    async fn get(&self, key: &str) -> StorageResult<Bytes> {
        Err(StorageError::BackendError(format!(
            "simulated outage: {}",
            key
        )))
    }

    async fn list(&self, _prefix: &str) -> StorageResult<Vec<String>> {
        Err(StorageError::BackendError("simulated outage".to_string()))
    }

    async fn delete(&self, _keys: &[String]) -> StorageResult<()> {
        Err(StorageError::BackendError("simulated outage".to_string()))
    }

    async fn signed_url(&self, key: &str, _expires_in: Duration) -> StorageResult<String> {
        Err(StorageError::BackendError(format!(
            "simulated outage: {}",
            key
        )))
    }

    fn public_url(&self, key: &str) -> String {
        format!("memory://outage/{}", key)
    }

    async fn exists(&self, _key: &str) -> StorageResult<bool> {
        Err(StorageError::BackendError("simulated outage".to_string()))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
