//! Handle resolver tests.
//!
//! Run with: `cargo test -p arcast-api --test resolve_test`

use arcast_api::services::ResolveService;
use arcast_core::{AppError, ArLaunch, Platform, ShareHandle, USDZ_CONTENT_TYPE};
use arcast_storage::{MemoryStorage, ObjectStore};
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;

const TTL: Duration = Duration::from_secs(3600);

async fn seeded_storage(keys: &[&str]) -> Arc<MemoryStorage> {
    let storage = Arc::new(MemoryStorage::new("models"));
    for key in keys {
        let content_type = if key.ends_with(".usdz") {
            USDZ_CONTENT_TYPE
        } else {
            "model/gltf-binary"
        };
        storage
            .put(key, Bytes::from_static(b"bytes"), content_type, false)
            .await
            .unwrap();
    }
    storage
}

#[tokio::test]
async fn android_gets_scene_viewer_uri() {
    let storage = seeded_storage(&["1700_chair.glb"]).await;
    let resolver = ResolveService::new(storage, TTL);

    let view = resolver
        .resolve(&ShareHandle::new("1700_chair.glb"), Platform::Android)
        .await
        .unwrap();

    assert_eq!(view.platform, Platform::Android);
    assert!(view.usdz_url.is_none());

    let ArLaunch::SceneViewer { uri } = &view.ar else {
        panic!("expected scene viewer launch, got {:?}", view.ar);
    };
    assert!(uri.starts_with("https://arvr.google.com/scene-viewer/1.0?file="));
    assert!(uri.ends_with("&mode=ar_only"));
    // The signed display URL is embedded percent-encoded.
    assert!(uri.contains("1700_chair.glb"));
}

#[tokio::test]
async fn ios_with_variant_gets_quick_look() {
    let storage = seeded_storage(&["1700_chair.glb", "1700_chair.usdz"]).await;
    let resolver = ResolveService::new(storage, TTL);

    let view = resolver
        .resolve(&ShareHandle::new("1700_chair.glb"), Platform::Ios)
        .await
        .unwrap();

    let usdz_url = view.usdz_url.clone().expect("variant should resolve");
    assert!(usdz_url.contains("1700_chair.usdz"));
    assert_eq!(view.ar, ArLaunch::QuickLook { url: usdz_url });
}

#[tokio::test]
async fn ios_without_variant_degrades_instead_of_erroring() {
    let storage = seeded_storage(&["1700_chair.glb"]).await;
    let resolver = ResolveService::new(storage, TTL);

    let view = resolver
        .resolve(&ShareHandle::new("1700_chair.glb"), Platform::Ios)
        .await
        .unwrap();

    assert!(view.usdz_url.is_none());
    assert_eq!(view.ar, ArLaunch::Unavailable);
}

#[tokio::test]
async fn other_platforms_are_display_only() {
    let storage = seeded_storage(&["1700_chair.glb", "1700_chair.usdz"]).await;
    let resolver = ResolveService::new(storage, TTL);

    let view = resolver
        .resolve(&ShareHandle::new("1700_chair.glb"), Platform::Other)
        .await
        .unwrap();

    assert_eq!(view.ar, ArLaunch::DisplayOnly);
    // The variant URL is still reported for preview widgets that want it.
    assert!(view.usdz_url.is_some());
}

#[tokio::test]
async fn missing_primary_asset_is_fatal() {
    let storage = seeded_storage(&[]).await;
    let resolver = ResolveService::new(storage, TTL);

    let err = resolver
        .resolve(&ShareHandle::new("1700_missing.glb"), Platform::Android)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AssetUnavailable(_)));
}

#[tokio::test]
async fn non_convertible_originals_never_probe_a_variant() {
    let storage = seeded_storage(&["1700_scan.stl"]).await;
    let resolver = ResolveService::new(storage, TTL);

    let view = resolver
        .resolve(&ShareHandle::new("1700_scan.stl"), Platform::Ios)
        .await
        .unwrap();

    assert!(view.usdz_url.is_none());
    assert_eq!(view.ar, ArLaunch::Unavailable);
}
