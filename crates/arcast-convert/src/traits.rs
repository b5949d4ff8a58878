//! Converter abstraction trait.

use arcast_core::ModelFormat;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Conversion errors. All of these are expected-and-tolerated by the
/// ingestion coordinator: a failed derivation is logged and absorbed, never
/// surfaced to the uploading client.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("unsupported source format: {0}")]
    UnsupportedSource(String),

    #[error("failed to parse source model: {0}")]
    Parse(String),

    #[error("source model contains no geometry")]
    EmptyScene,

    #[error("usdz packaging failed: {0}")]
    Packaging(String),

    #[error("converter tool failed: {0}")]
    Tool(String),

    #[error("converter timed out after {0:?}")]
    Timeout(Duration),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Transforms a glb/gltf source into a usdz byte buffer.
///
/// Single attempt, no retries; callers decide what a failure means. The two
/// provided implementations are functionally interchangeable.
#[async_trait]
pub trait UsdzConverter: Send + Sync {
    async fn convert(
        &self,
        data: &[u8],
        format: ModelFormat,
    ) -> Result<Vec<u8>, ConversionError>;

    /// Name of the strategy (for logging).
    fn strategy(&self) -> &'static str;
}
