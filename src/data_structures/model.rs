//! Built model entities: what the binary writer serializes.

use anyhow::bail;

/// One attribute tuple of one face corner, after normalization.
///
/// This is the unit the vertex deduplicator consumes: corners with
/// bit-identical tuples collapse to one vertex, corners differing in any
/// field stay distinct even when they share the underlying mesh vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceCorner {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

/// One deduplicated vertex as laid out in the level file: 12 floats,
/// 48 bytes, field order position/normal/uv/color.
///
/// `Pod` lets the deduplicator key on the exact byte representation and
/// keeps the wire layout in lockstep with this struct.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl From<&FaceCorner> for Vertex {
    fn from(corner: &FaceCorner) -> Self {
        Self {
            position: corner.position,
            normal: corner.normal,
            uv: corner.uv,
            color: corner.color,
        }
    }
}

/// One exported mesh object: names, transform, visibility and its own
/// indexed triangle list. Owns its buffers exclusively; nothing is shared
/// across models.
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    /// Scene object name.
    pub element_name: String,
    /// Mesh datablock name.
    pub shape_name: String,
    /// Resolved texture reference, extension stripped. Always present; an
    /// object without one never becomes a `Model`.
    pub texture_name: String,
    /// Object-to-world transform, 16 floats in row-major order.
    pub world_matrix: [f32; 16],
    /// False if the object is hidden in either the viewport or the render.
    pub is_visible: bool,
    pub vertices: Vec<Vertex>,
    /// Triangle list; every 3 consecutive indices form one triangle.
    pub indices: Vec<u32>,
}

impl Model {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Consistency check over the index buffer: length divisible by 3 and
    /// every index inside the vertex array.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.indices.len() % 3 != 0 {
            bail!(
                "model `{}`: index count {} is not a multiple of 3",
                self.element_name,
                self.indices.len()
            );
        }
        let vertex_count = self.vertices.len() as u32;
        for (i, &index) in self.indices.iter().enumerate() {
            if index >= vertex_count {
                bail!(
                    "model `{}`: index {} at position {} is out of range ({} vertices)",
                    self.element_name,
                    index,
                    i,
                    vertex_count
                );
            }
        }
        Ok(())
    }
}
