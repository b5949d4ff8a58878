//! In-process conversion strategy: glTF scene pipeline.
//!
//! Parses the glb/gltf document, merges all triangle primitives into one CPU
//! mesh, translates the scene so its bounding-box center sits at the origin
//! (off-center models otherwise spawn outside the camera frustum in AR
//! viewers), then serializes the result into a usdz archive.

use crate::traits::{ConversionError, UsdzConverter};
use crate::usda::{self, SceneMesh};
use crate::usdz;
use arcast_core::ModelFormat;
use async_trait::async_trait;
use gltf::mesh::util::ReadIndices;

/// Magic prefix of a binary glTF container.
const GLB_MAGIC: &[u8; 4] = b"glTF";

/// In-process glTF → usdz converter.
#[derive(Default)]
pub struct SceneConverter;

impl SceneConverter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UsdzConverter for SceneConverter {
    async fn convert(
        &self,
        data: &[u8],
        format: ModelFormat,
    ) -> Result<Vec<u8>, ConversionError> {
        if !format.is_convertible() {
            return Err(ConversionError::UnsupportedSource(
                format.extension().to_string(),
            ));
        }

        // Parsing and serialization are CPU-bound; keep them off the runtime
        // worker threads.
        let data = data.to_vec();
        tokio::task::spawn_blocking(move || convert_blocking(&data, format))
            .await
            .map_err(|e| ConversionError::Packaging(format!("conversion task failed: {}", e)))?
    }

    fn strategy(&self) -> &'static str {
        "scene"
    }
}

fn convert_blocking(data: &[u8], format: ModelFormat) -> Result<Vec<u8>, ConversionError> {
    if format == ModelFormat::Glb && !data.starts_with(GLB_MAGIC) {
        return Err(ConversionError::Parse(
            "missing glTF magic in binary container".to_string(),
        ));
    }

    let mesh = load_scene_mesh(data)?;
    let mesh = recenter(mesh);

    tracing::debug!(
        points = mesh.points.len(),
        triangles = mesh.triangle_count(),
        "serializing recentered scene"
    );

    let usda = usda::write_usda(&mesh);
    usdz::pack_usdz(&[("model.usda", usda.as_bytes())])
}

/// Import the document and merge all triangle primitives into a single mesh.
fn load_scene_mesh(data: &[u8]) -> Result<SceneMesh, ConversionError> {
    let (doc, buffers, _images) =
        gltf::import_slice(data).map_err(|e| ConversionError::Parse(e.to_string()))?;

    let mut points: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for mesh in doc.meshes() {
        for prim in mesh.primitives() {
            if prim.mode() != gltf::mesh::Mode::Triangles {
                continue;
            }

            let reader = prim.reader(|b| buffers.get(b.index()).map(|bb| bb.0.as_slice()));
            let positions = match reader.read_positions() {
                Some(it) => it.collect::<Vec<[f32; 3]>>(),
                None => continue,
            };
            let prim_normals: Vec<[f32; 3]> = match reader.read_normals() {
                Some(it) => it.collect(),
                None => vec![[0.0, 1.0, 0.0]; positions.len()],
            };

            let start = points.len() as u32;
            points.extend_from_slice(&positions);
            normals.extend_from_slice(&prim_normals);

            let prim_indices: Vec<u32> = match reader.read_indices() {
                Some(ReadIndices::U8(it)) => it.map(u32::from).collect(),
                Some(ReadIndices::U16(it)) => it.map(u32::from).collect(),
                Some(ReadIndices::U32(it)) => it.collect(),
                None => (0..positions.len() as u32).collect(),
            };
            indices.extend(prim_indices.into_iter().map(|i| start + i));
        }
    }

    if points.is_empty() || indices.is_empty() {
        return Err(ConversionError::EmptyScene);
    }

    Ok(SceneMesh {
        points,
        normals,
        indices,
    })
}

/// Translate all points so the axis-aligned bounding-box center lands on the
/// origin.
fn recenter(mut mesh: SceneMesh) -> SceneMesh {
    let mut min = [f32::INFINITY; 3];
    let mut max = [f32::NEG_INFINITY; 3];

    for p in &mesh.points {
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }

    let center = [
        (min[0] + max[0]) / 2.0,
        (min[1] + max[1]) / 2.0,
        (min[2] + max[2]) / 2.0,
    ];

    for p in &mut mesh.points {
        for axis in 0..3 {
            p[axis] -= center[axis];
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    /// Build a minimal valid glb: one triangle at (0,0,0), (1,0,0), (0,1,0).
    fn minimal_glb() -> Vec<u8> {
        let json = serde_json::json!({
            "asset": {"version": "2.0"},
            "scene": 0,
            "scenes": [{"nodes": [0]}],
            "nodes": [{"mesh": 0}],
            "meshes": [{"primitives": [{"attributes": {"POSITION": 0}, "indices": 1, "mode": 4}]}],
            "buffers": [{"byteLength": 42}],
            "bufferViews": [
                {"buffer": 0, "byteOffset": 0, "byteLength": 36, "target": 34962},
                {"buffer": 0, "byteOffset": 36, "byteLength": 6, "target": 34963}
            ],
            "accessors": [
                {"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
                 "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]},
                {"bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR"}
            ]
        })
        .to_string();

        let mut json_chunk = json.into_bytes();
        while json_chunk.len() % 4 != 0 {
            json_chunk.push(b' ');
        }

        let mut bin_chunk = Vec::new();
        for v in [
            [0.0f32, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        ] {
            for c in v {
                bin_chunk.extend_from_slice(&c.to_le_bytes());
            }
        }
        for i in [0u16, 1, 2] {
            bin_chunk.extend_from_slice(&i.to_le_bytes());
        }
        while bin_chunk.len() % 4 != 0 {
            bin_chunk.push(0);
        }

        let total_len = 12 + 8 + json_chunk.len() + 8 + bin_chunk.len();

        let mut glb = Vec::with_capacity(total_len);
        glb.extend_from_slice(b"glTF");
        glb.extend_from_slice(&2u32.to_le_bytes());
        glb.extend_from_slice(&(total_len as u32).to_le_bytes());

        glb.extend_from_slice(&(json_chunk.len() as u32).to_le_bytes());
        glb.extend_from_slice(b"JSON");
        glb.extend_from_slice(&json_chunk);

        glb.extend_from_slice(&(bin_chunk.len() as u32).to_le_bytes());
        glb.extend_from_slice(&0x004E4942u32.to_le_bytes()); // "BIN\0"
        glb.extend_from_slice(&bin_chunk);

        glb
    }

    fn root_layer(usdz_bytes: &[u8]) -> String {
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(usdz_bytes.to_vec())).unwrap();
        let mut entry = archive.by_index(0).unwrap();
        assert_eq!(entry.name(), "model.usda");
        let mut contents = String::new();
        entry.read_to_string(&mut contents).unwrap();
        contents
    }

    #[tokio::test]
    async fn converts_minimal_glb_to_usdz() {
        let converter = SceneConverter::new();
        let usdz_bytes = converter
            .convert(&minimal_glb(), ModelFormat::Glb)
            .await
            .unwrap();

        let usda = root_layer(&usdz_bytes);
        assert!(usda.starts_with("#usda 1.0"));
        assert!(usda.contains("int[] faceVertexIndices = [0, 1, 2]"));
    }

    #[tokio::test]
    async fn recenters_bounding_box_on_origin() {
        let converter = SceneConverter::new();
        let usdz_bytes = converter
            .convert(&minimal_glb(), ModelFormat::Glb)
            .await
            .unwrap();

        // AABB of the fixture triangle is [0,1]x[0,1]x{0}; its center (0.5, 0.5, 0)
        // must be subtracted from every vertex.
        let usda = root_layer(&usdz_bytes);
        assert!(usda.contains(
            "point3f[] points = [(-0.5, -0.5, 0), (0.5, -0.5, 0), (-0.5, 0.5, 0)]"
        ));
    }

    #[tokio::test]
    async fn rejects_bad_glb_magic() {
        let converter = SceneConverter::new();
        let err = converter
            .convert(b"not a model at all", ModelFormat::Glb)
            .await
            .unwrap_err();
        assert!(matches!(err, ConversionError::Parse(_)));
    }

    #[tokio::test]
    async fn rejects_non_convertible_formats() {
        let converter = SceneConverter::new();
        let err = converter
            .convert(b"solid teapot", ModelFormat::Stl)
            .await
            .unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedSource(_)));
    }
}
