//! Asset key generation and sanitization.
//!
//! Key format: `<unix-millis>_<sanitized-filename>`. The timestamp prefix
//! distinguishes uploads of identically-named files; sanitization keeps the
//! key safe for every backend.

use arcast_core::ModelFormat;
use std::path::Path;

/// Replace every character outside `[A-Za-z0-9_.-]` with `_`.
///
/// Idempotent: sanitizing an already-sanitized name is a no-op.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Generate an asset key for an upload event.
pub fn generate_asset_key(timestamp_millis: i64, filename: &str) -> String {
    format!("{}_{}", timestamp_millis, sanitize_filename(filename))
}

/// Candidate derived key for a stored original: base name preserved, extension
/// rewritten to `.usdz`. `None` when the original is not in the convertible
/// family (the derived key would not differ meaningfully from the original).
pub fn usdz_sibling_key(key: &str) -> Option<String> {
    let format = ModelFormat::from_filename(key)?;
    if !format.is_convertible() {
        return None;
    }

    let stem = Path::new(key).file_stem()?.to_str()?;
    Some(format!("{}.usdz", stem))
}
