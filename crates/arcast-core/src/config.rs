//! Configuration module
//!
//! Env-driven configuration for the API and services: server, storage backend,
//! converter strategy, and delivery settings.

use std::env;
use std::str::FromStr;
use std::time::Duration;

// Defaults
const DEFAULT_SERVER_PORT: u16 = 8080;
const DEFAULT_BUCKET: &str = "models";
const DEFAULT_SIGNED_URL_TTL_SECS: u64 = 3600;
const DEFAULT_CONVERTER_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_MODEL_SIZE_BYTES: usize = 100 * 1024 * 1024;

/// Storage backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Local,
    S3,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(StorageBackend::Local),
            "s3" => Ok(StorageBackend::S3),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(format!("unknown storage backend: {}", other)),
        }
    }
}

/// Format converter strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConverterStrategy {
    /// In-process scene pipeline: parse, recenter, repack as usdz.
    Scene,
    /// External native conversion executable.
    External,
}

impl FromStr for ConverterStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scene" => Ok(ConverterStrategy::Scene),
            "external" => Ok(ConverterStrategy::External),
            other => Err(format!("unknown converter strategy: {}", other)),
        }
    }
}

/// Application configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    /// Public origin used to build shareable viewer URLs.
    pub public_origin: String,
    pub environment: String,

    // Storage configuration
    pub storage_backend: StorageBackend,
    pub storage_bucket: String,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    pub local_signing_secret: Option<String>,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    /// Custom endpoint for S3-compatible providers (MinIO, Supabase Storage, etc.)
    pub s3_endpoint: Option<String>,

    // Conversion configuration
    pub converter_strategy: ConverterStrategy,
    pub converter_path: Option<String>,
    pub converter_timeout_secs: u64,

    // Delivery configuration
    pub signed_url_ttl_secs: u64,
    pub max_model_size_bytes: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let storage_backend = env_parse("STORAGE_BACKEND", StorageBackend::Local)?;
        let converter_strategy = env_parse("CONVERTER_STRATEGY", ConverterStrategy::Scene)?;

        Ok(Config {
            server_port: env_parse("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            public_origin: env_or("PUBLIC_ORIGIN", "http://localhost:8080"),
            environment: env_or("ENVIRONMENT", "development"),

            storage_backend,
            storage_bucket: env_or("STORAGE_BUCKET", DEFAULT_BUCKET),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
            local_signing_secret: env::var("LOCAL_SIGNING_SECRET").ok(),
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").ok().or(env::var("AWS_REGION").ok()),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),

            converter_strategy,
            converter_path: env::var("CONVERTER_PATH").ok(),
            converter_timeout_secs: env_parse(
                "CONVERTER_TIMEOUT_SECS",
                DEFAULT_CONVERTER_TIMEOUT_SECS,
            )?,

            signed_url_ttl_secs: env_parse("SIGNED_URL_TTL_SECS", DEFAULT_SIGNED_URL_TTL_SECS)?,
            max_model_size_bytes: env_parse(
                "MAX_MODEL_SIZE_BYTES",
                DEFAULT_MAX_MODEL_SIZE_BYTES,
            )?,
        })
    }

    pub fn signed_url_ttl(&self) -> Duration {
        Duration::from_secs(self.signed_url_ttl_secs)
    }

    pub fn converter_timeout(&self) -> Duration {
        Duration::from_secs(self.converter_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("invalid {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}
