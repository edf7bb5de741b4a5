//! Synthetic scene fixtures. These stand in for a host scene integration so
//! the pipeline can be exercised without any DCC runtime.

use cgmath::{Matrix4, SquareMatrix};
use lvl_forge::data_structures::scene::{
    Face, Material, MaterialNode, MaterialSlot, ObjectData, RawMesh, SceneObject,
};

/// A node-based material whose node list carries one assigned image texture
/// after a couple of unrelated shader nodes.
pub fn image_material(name: &str, image: &str) -> Material {
    Material {
        name: name.to_string(),
        use_nodes: true,
        nodes: vec![
            MaterialNode::Other,
            MaterialNode::ImageTexture {
                image: Some(image.to_string()),
            },
            MaterialNode::Other,
        ],
    }
}

/// A node-based material with no image anywhere.
pub fn untextured_material(name: &str) -> Material {
    Material {
        name: name.to_string(),
        use_nodes: true,
        nodes: vec![MaterialNode::Other, MaterialNode::ImageTexture { image: None }],
    }
}

/// Single quad in the z=0 plane, counter-clockwise loop `[A, B, C, D]`.
pub fn quad_mesh() -> RawMesh {
    RawMesh {
        name: "Quad".to_string(),
        positions: vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ],
        loops: vec![0, 1, 2, 3],
        faces: vec![Face::new(0, 4)],
        loop_normals: None,
        uv_layer: None,
        color_layer: None,
    }
}

/// Unit cube out of 6 quad faces, 8 shared vertices, 24 loops, outward
/// winding, no attribute layers.
pub fn cube_mesh() -> RawMesh {
    RawMesh {
        name: "Cube".to_string(),
        positions: vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [0.0, 1.0, 1.0],
        ],
        loops: vec![
            0, 3, 2, 1, // bottom
            4, 5, 6, 7, // top
            0, 1, 5, 4, // front
            1, 2, 6, 5, // right
            2, 3, 7, 6, // back
            3, 0, 4, 7, // left
        ],
        faces: (0..6).map(|f| Face::new(f * 4, 4)).collect(),
        loop_normals: None,
        uv_layer: None,
        color_layer: None,
    }
}

/// Non-convex U-shaped polygon in the z=0 plane, counter-clockwise, area 5.
/// A naive fan from the first corner produces flipped triangles here; ear
/// clipping must not.
pub fn u_shape_mesh() -> RawMesh {
    RawMesh {
        name: "UShape".to_string(),
        positions: vec![
            [0.0, 0.0, 0.0],
            [3.0, 0.0, 0.0],
            [3.0, 2.0, 0.0],
            [2.0, 2.0, 0.0],
            [2.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [1.0, 2.0, 0.0],
            [0.0, 2.0, 0.0],
        ],
        loops: vec![0, 1, 2, 3, 4, 5, 6, 7],
        faces: vec![Face::new(0, 8)],
        loop_normals: None,
        uv_layer: None,
        color_layer: None,
    }
}

/// A mesh object with one image-textured material slot and identity
/// transform, visible everywhere.
pub fn textured_object(name: &str, mesh: RawMesh, image: &str) -> SceneObject {
    SceneObject {
        name: name.to_string(),
        data: ObjectData::Mesh(mesh),
        material_slots: vec![MaterialSlot::assigned(image_material("Mat", image))],
        world_matrix: Matrix4::identity(),
        hide_viewport: false,
        hide_render: false,
    }
}

/// A non-mesh object; the pipeline must skip it.
pub fn camera_object(name: &str) -> SceneObject {
    SceneObject {
        name: name.to_string(),
        data: ObjectData::Camera,
        material_slots: Vec::new(),
        world_matrix: Matrix4::identity(),
        hide_viewport: false,
        hide_render: false,
    }
}
