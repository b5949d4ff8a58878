//! Storage abstraction trait
//!
//! This module defines the ObjectStore trait that all storage backends must
//! implement. The ingestion coordinator and handle resolver work against this
//! trait only, so a test can substitute the in-memory backend.

use arcast_core::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// A `put` with `overwrite = false` hit an existing object.
    #[error("Object already exists: {0}")]
    Conflict(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Key/value blob store abstraction
///
/// All backends (S3, local filesystem, in-memory) must implement this trait.
/// Constructor-injected everywhere; never accessed through global state.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store an object under `key`.
    ///
    /// With `overwrite = false` an existing object is never replaced: the
    /// backend reports `StorageError::Conflict` instead, which turns a
    /// same-millisecond duplicate upload into a detectable error rather than
    /// silent corruption.
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
        overwrite: bool,
    ) -> StorageResult<()>;

    /// Fetch an object's bytes.
    async fn get(&self, key: &str) -> StorageResult<Bytes>;

    /// List keys starting with `prefix` (empty prefix lists the whole bucket).
    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>>;

    /// Delete the given keys. Missing keys are not an error.
    async fn delete(&self, keys: &[String]) -> StorageResult<()>;

    /// Generate a time-limited signed URL granting read access to `key`.
    ///
    /// Fails with `NotFound` when the backend can cheaply establish the object
    /// does not exist.
    async fn signed_url(&self, key: &str, expires_in: Duration) -> StorageResult<String>;

    /// Public (unsigned) URL of an object.
    fn public_url(&self, key: &str) -> String;

    /// Check whether an object exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
