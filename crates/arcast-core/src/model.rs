//! Domain model: model formats, share handles, platforms, resolved AR views.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Encode set for URL query component values. Keeps the unreserved marks
/// (`-`, `_`, `.`, `~`) literal, so sanitized asset keys pass through unchanged.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Content type of a derived usdz variant.
pub const USDZ_CONTENT_TYPE: &str = "model/vnd.usdz+zip";

/// Base endpoint of Google's Scene Viewer AR launcher.
pub const SCENE_VIEWER_ENDPOINT: &str = "https://arvr.google.com/scene-viewer/1.0";

/// Supported 3D model container formats.
///
/// `Glb` and `Gltf` form the convertible family: only these can be transcoded
/// into a usdz variant for the iOS AR path. The remaining formats are stored
/// and served as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    Glb,
    Gltf,
    Obj,
    Fbx,
    Stl,
}

impl ModelFormat {
    /// Parse the format from a filename extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())?;

        match extension.as_str() {
            "glb" => Some(ModelFormat::Glb),
            "gltf" => Some(ModelFormat::Gltf),
            "obj" => Some(ModelFormat::Obj),
            "fbx" => Some(ModelFormat::Fbx),
            "stl" => Some(ModelFormat::Stl),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ModelFormat::Glb => "glb",
            ModelFormat::Gltf => "gltf",
            ModelFormat::Obj => "obj",
            ModelFormat::Fbx => "fbx",
            ModelFormat::Stl => "stl",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ModelFormat::Glb => "model/gltf-binary",
            ModelFormat::Gltf => "model/gltf+json",
            ModelFormat::Obj => "model/obj",
            ModelFormat::Fbx => "application/octet-stream",
            ModelFormat::Stl => "model/stl",
        }
    }

    /// Whether a usdz variant can be derived from this format.
    pub fn is_convertible(&self) -> bool {
        matches!(self, ModelFormat::Glb | ModelFormat::Gltf)
    }
}

/// Requesting device platform, derived from the user agent string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    Other,
}

impl Platform {
    /// Classify a user agent string. Pure, total, deterministic.
    ///
    /// The iOS check runs first: Apple device strings never contain "Android",
    /// so ordering the checks makes the precedence explicit rather than
    /// accidental.
    pub fn from_user_agent(user_agent: &str) -> Self {
        if ["iPad", "iPhone", "iPod"]
            .iter()
            .any(|marker| user_agent.contains(marker))
        {
            Platform::Ios
        } else if user_agent.contains("Android") {
            Platform::Android
        } else {
            Platform::Other
        }
    }

    /// Parse an explicit platform override parameter.
    pub fn from_param(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "android" => Some(Platform::Android),
            "ios" => Some(Platform::Ios),
            "other" => Some(Platform::Other),
            _ => None,
        }
    }
}

/// Externally shareable reference to an uploaded asset.
///
/// The handle alone is sufficient to resolve a viewable asset; it carries no
/// variant information. Variant selection happens at resolution time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareHandle {
    pub key: String,
}

impl ShareHandle {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Viewer URL carrying this handle: `<origin>/#/ar?key=<url-encoded key>`.
    pub fn viewer_url(&self, origin: &str) -> String {
        format!(
            "{}/#/ar?key={}",
            origin.trim_end_matches('/'),
            utf8_percent_encode(&self.key, QUERY_COMPONENT)
        )
    }
}

/// Build the Scene Viewer AR-invocation URI for an Android device.
pub fn scene_viewer_uri(display_url: &str) -> String {
    format!(
        "{}?file={}&mode=ar_only",
        SCENE_VIEWER_ENDPOINT,
        utf8_percent_encode(display_url, QUERY_COMPONENT)
    )
}

/// Platform-specific AR launch artifact of a resolved view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ArLaunch {
    /// Android: Scene Viewer intent URI.
    SceneViewer { uri: String },
    /// iOS: direct link to the usdz variant, opened with `rel="ar"` semantics.
    QuickLook { url: String },
    /// iOS without a usdz variant: show an informational fallback, not an error.
    Unavailable,
    /// Desktop and unknown devices: 3D preview only.
    DisplayOnly,
}

/// Output of handle resolution. Computed per view request, never persisted;
/// expires implicitly when the signed display URL's TTL lapses.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedView {
    pub display_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usdz_url: Option<String>,
    pub platform: Platform,
    pub ar: ArLaunch,
}

/// Outcome of the best-effort usdz derivation during ingestion.
///
/// Kept separate from the primary result channel: a failed or skipped variant
/// never turns a successful upload into an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantOutcome {
    /// The variant was derived and stored under this key.
    Stored(String),
    /// Derivation was attempted and failed; the failure was logged and absorbed.
    Failed,
    /// The source format is not in the convertible family.
    Skipped,
}

impl VariantOutcome {
    pub fn stored_key(&self) -> Option<&str> {
        match self {
            VariantOutcome::Stored(key) => Some(key),
            _ => None,
        }
    }
}
