//! Exports a synthetic textured cube scene to `cube.lvl` in the working
//! directory. Run with `RUST_LOG=info` to watch the pipeline.

use std::fs::File;
use std::io::BufWriter;

use cgmath::Matrix4;
use lvl_forge::data_structures::scene::{
    Face, Material, MaterialNode, MaterialSlot, ObjectData, RawMesh, SceneObject,
};
use lvl_forge::{build_models, write_level};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let objects = vec![
        SceneObject {
            name: "Crate".to_string(),
            data: ObjectData::Mesh(cube()),
            material_slots: vec![MaterialSlot::assigned(Material {
                name: "CrateMat".to_string(),
                use_nodes: true,
                nodes: vec![
                    MaterialNode::Other,
                    MaterialNode::ImageTexture {
                        image: Some("crate_diffuse.png".to_string()),
                    },
                ],
            })],
            world_matrix: Matrix4::from_translation([0.0, 0.0, 1.0].into()),
            hide_viewport: false,
            hide_render: false,
        },
        // Lights and cameras get skipped with a diagnostic.
        SceneObject {
            name: "KeyLight".to_string(),
            data: ObjectData::Light,
            material_slots: Vec::new(),
            world_matrix: Matrix4::from_translation([4.0, 4.0, 6.0].into()),
            hide_viewport: false,
            hide_render: false,
        },
    ];

    let (models, diagnostics) = build_models(&objects)?;
    for diagnostic in &diagnostics {
        log::info!("{diagnostic}");
    }
    for model in &models {
        log::info!(
            "{}: {} vertices, {} triangles, texture `{}`",
            model.element_name,
            model.vertex_count(),
            model.triangle_count(),
            model.texture_name
        );
    }

    let mut file = BufWriter::new(File::create("cube.lvl")?);
    write_level(&mut file, &models)?;
    println!("wrote cube.lvl with {} model(s)", models.len());
    Ok(())
}

fn cube() -> RawMesh {
    RawMesh {
        name: "Cube".to_string(),
        positions: vec![
            [-0.5, -0.5, -0.5],
            [0.5, -0.5, -0.5],
            [0.5, 0.5, -0.5],
            [-0.5, 0.5, -0.5],
            [-0.5, -0.5, 0.5],
            [0.5, -0.5, 0.5],
            [0.5, 0.5, 0.5],
            [-0.5, 0.5, 0.5],
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
