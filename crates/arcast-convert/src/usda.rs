//! USDA scene description serialization.
//!
//! Emits a single-mesh USD stage in the text (usda) encoding. Quick Look only
//! needs points, topology and optional normals; materials from the source are
//! out of scope for the derivation pass.

/// Triangulated mesh geometry extracted from a glTF scene.
pub(crate) struct SceneMesh {
    pub points: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    /// Flat triangle list, three indices per face.
    pub indices: Vec<u32>,
}

impl SceneMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Serialize the mesh into a usda stage with a single `Mesh` prim.
pub(crate) fn write_usda(mesh: &SceneMesh) -> String {
    let mut out = String::new();

    out.push_str("#usda 1.0\n");
    out.push_str("(\n");
    out.push_str("    defaultPrim = \"Model\"\n");
    out.push_str("    metersPerUnit = 1\n");
    out.push_str("    upAxis = \"Y\"\n");
    out.push_str(")\n\n");
    out.push_str("def Xform \"Model\"\n{\n");
    out.push_str("    def Mesh \"Geometry\"\n    {\n");

    let counts = vec!["3"; mesh.triangle_count()].join(", ");
    out.push_str(&format!("        int[] faceVertexCounts = [{}]\n", counts));

    let indices = mesh
        .indices
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    out.push_str(&format!("        int[] faceVertexIndices = [{}]\n", indices));

    out.push_str(&format!(
        "        point3f[] points = [{}]\n",
        format_vec3_list(&mesh.points)
    ));

    if !mesh.normals.is_empty() {
        out.push_str(&format!(
            "        normal3f[] normals = [{}] (\n            interpolation = \"vertex\"\n        )\n",
            format_vec3_list(&mesh.normals)
        ));
    }

    out.push_str("        uniform token subdivisionScheme = \"none\"\n");
    out.push_str("    }\n");
    out.push_str("}\n");

    out
}

fn format_vec3_list(values: &[[f32; 3]]) -> String {
    values
        .iter()
        .map(|v| format!("({}, {}, {})", v[0], v[1], v[2]))
        .collect::<Vec<_>>()
        .join(", ")
}
