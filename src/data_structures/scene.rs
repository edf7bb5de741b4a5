//! Host-facing scene input records.
//!
//! The exporter never talks to a live scene runtime. A host integration
//! (DCC plugin, asset tool, test fixture) materializes its objects into these
//! plain records and passes them in; the core stays a pure function over
//! them. This keeps the pipeline free of implicit global state and makes it
//! testable with synthetic scenes.

use cgmath::Matrix4;

/// One object of the host scene, as handed to the exporter.
#[derive(Clone, Debug)]
pub struct SceneObject {
    pub name: String,
    pub data: ObjectData,
    /// Material slots in host slot order; scanned in order for a texture.
    pub material_slots: Vec<MaterialSlot>,
    /// Object-to-world transform.
    pub world_matrix: Matrix4<f32>,
    /// Hidden in the host viewport.
    pub hide_viewport: bool,
    /// Hidden for rendering.
    pub hide_render: bool,
}

/// What kind of data an object carries. Only meshes are exported; every
/// other kind is skipped with a diagnostic.
#[derive(Clone, Debug)]
pub enum ObjectData {
    Mesh(RawMesh),
    Camera,
    Light,
    Empty,
}

impl ObjectData {
    /// Host-style kind name, used in logs and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ObjectData::Mesh(_) => "MESH",
            ObjectData::Camera => "CAMERA",
            ObjectData::Light => "LIGHT",
            ObjectData::Empty => "EMPTY",
        }
    }
}

/// Raw mesh geometry in the host's shared-vertex, face-loop layout.
///
/// Positions are shared between faces; everything face-varying lives in flat
/// per-loop arrays parallel to `loops`. A loop is one corner of one face: it
/// references a shared vertex and carries its own normal/UV/color, which is
/// what allows hard shading edges and UV seams.
#[derive(Clone, Debug)]
pub struct RawMesh {
    pub name: String,
    /// Shared vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// One shared-vertex index per face corner, all faces concatenated.
    pub loops: Vec<u32>,
    /// Faces as ranges into `loops`, in host face order.
    pub faces: Vec<Face>,
    /// Per-loop split normals, if the host already computed them.
    pub loop_normals: Option<Vec<[f32; 3]>>,
    /// Active UV layer, one value per loop.
    pub uv_layer: Option<Vec<[f32; 2]>>,
    /// Active vertex-color layer, one RGBA value per loop.
    pub color_layer: Option<Vec<[f32; 4]>>,
}

/// One face: an ordered run of corners inside [`RawMesh::loops`].
#[derive(Clone, Copy, Debug)]
pub struct Face {
    pub loop_start: usize,
    pub loop_total: usize,
}

impl Face {
    pub fn new(loop_start: usize, loop_total: usize) -> Self {
        Self {
            loop_start,
            loop_total,
        }
    }

    /// Range of this face's corners inside the flat loop array.
    pub fn loop_range(&self) -> std::ops::Range<usize> {
        self.loop_start..self.loop_start + self.loop_total
    }
}

/// A material slot of an object. Slots may be empty.
#[derive(Clone, Debug, Default)]
pub struct MaterialSlot {
    pub material: Option<Material>,
}

impl MaterialSlot {
    pub fn assigned(material: Material) -> Self {
        Self {
            material: Some(material),
        }
    }
}

/// A node-based material, reduced to what texture resolution needs.
#[derive(Clone, Debug)]
pub struct Material {
    pub name: String,
    /// Whether the material uses a node graph at all; without nodes there is
    /// nothing to scan for a texture.
    pub use_nodes: bool,
    /// Shader nodes in host node order.
    pub nodes: Vec<MaterialNode>,
}

/// A shader node, as far as the exporter cares.
#[derive(Clone, Debug)]
pub enum MaterialNode {
    /// An image texture node. `image` is the image datablock name (with
    /// extension) and may be unassigned.
    ImageTexture { image: Option<String> },
    /// Any other node kind; carries no texture reference.
    Other,
}
