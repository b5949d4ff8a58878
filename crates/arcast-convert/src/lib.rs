//! Arcast Convert Library
//!
//! Derives usdz variants from glb/gltf sources for the iOS Quick Look AR path.
//! Two interchangeable strategies sit behind the [`UsdzConverter`] trait:
//!
//! - [`scene::SceneConverter`]: in-process pipeline — parse the glTF scene,
//!   recenter its bounding box on the origin, serialize to USDA and pack a
//!   usdz archive.
//! - [`external::ExternalConverter`]: shells out to a native conversion
//!   executable with `(input, output)` paths under a bounded timeout.
//!
//! Callers select a strategy via configuration through [`create_converter`];
//! the ingestion coordinator never couples to a concrete implementation.

pub mod external;
pub mod factory;
pub mod scene;
pub mod traits;
mod usda;
mod usdz;

pub use external::ExternalConverter;
pub use factory::create_converter;
pub use scene::SceneConverter;
pub use traits::{ConversionError, UsdzConverter};
