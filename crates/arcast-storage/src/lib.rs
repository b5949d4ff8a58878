//! Arcast Storage Library
//!
//! Object store abstraction and implementations: the `ObjectStore` trait plus
//! local-filesystem, S3 and in-memory backends.
//!
//! # Key format
//!
//! Asset keys are flat, store-safe names of the form
//! `<unix-millis>_<sanitized-filename>` generated by the [keys] module. The
//! sanitizer restricts filenames to `[A-Za-z0-9_.-]`; the timestamp prefix
//! makes concurrent uploads of different files collision-free. Keys must not
//! contain `..` or a leading `/`.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use arcast_core::StorageBackend;
pub use factory::create_storage;
pub use keys::{generate_asset_key, sanitize_filename, usdz_sibling_key};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use memory::MemoryStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{ObjectStore, StorageError, StorageResult};
