//! Arcast API
//!
//! HTTP surface for the AR model pipeline: multipart upload, handle
//! resolution, deferred conversion, and bulk administration.

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;
