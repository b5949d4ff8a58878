//! Arcast Core Library
//!
//! This crate provides the core domain model, error types, and configuration
//! shared across all arcast components: model formats, asset keys and share
//! handles, platform classification, and resolved AR views.

pub mod config;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use config::{Config, ConverterStrategy, StorageBackend};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use model::{
    scene_viewer_uri, ArLaunch, ModelFormat, Platform, ResolvedView, ShareHandle, VariantOutcome,
    USDZ_CONTENT_TYPE,
};
