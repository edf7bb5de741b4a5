//! The export pipeline: scene objects in, built models out.
//!
//! `build_models` is a single linear fold over the input objects. Per object
//! the stages run leaves-first: material resolution, mesh normalization,
//! vertex deduplication, transform encoding. Models come out in input order,
//! which is also the order the binary writer serializes them in.
//!
//! Recoverable conditions (non-mesh objects, degenerate faces) are collected
//! as [`Diagnostic`] entries and logged; the one non-recoverable condition,
//! a missing texture, aborts the whole batch so that no partial level is
//! ever produced.

use std::fmt;

use crate::data_structures::model::Model;
use crate::data_structures::scene::{ObjectData, RawMesh, SceneObject};
use crate::error::ExportError;

pub mod material;
pub mod normalize;
pub mod transform;
pub mod vertex_buffer;

use normalize::NormalizedMesh;
use vertex_buffer::VertexBufferBuilder;

/// A recoverable condition encountered while exporting. The pipeline
/// continues past all of these; they exist so hosts can report what was
/// skipped or dropped without scraping logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// Object was not a mesh and was not exported.
    SkippedObject { object: String, kind: &'static str },
    /// A degenerate face was dropped during mesh validation.
    DroppedFace {
        mesh: String,
        face: usize,
        reason: &'static str,
    },
    /// A per-loop attribute layer had the wrong length and was ignored for
    /// the whole mesh.
    IgnoredLayer { mesh: String, layer: &'static str },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SkippedObject { object, kind } => {
                write!(f, "skipped object `{object}` of type {kind}")
            }
            Diagnostic::DroppedFace { mesh, face, reason } => {
                write!(f, "mesh `{mesh}`: dropped face {face} ({reason})")
            }
            Diagnostic::IgnoredLayer { mesh, layer } => {
                write!(f, "mesh `{mesh}`: ignored {layer} layer with mismatched length")
            }
        }
    }
}

/// Build one model per qualifying object, in input order.
///
/// Non-mesh objects are skipped with a diagnostic. The first object whose
/// materials yield no texture aborts the batch with
/// [`ExportError::MissingTexture`]; nothing built so far is returned in that
/// case.
pub fn build_models(
    objects: &[SceneObject],
) -> Result<(Vec<Model>, Vec<Diagnostic>), ExportError> {
    let mut models = Vec::new();
    let mut diagnostics = Vec::new();

    for object in objects {
        let mesh = match &object.data {
            ObjectData::Mesh(mesh) => mesh,
            other => {
                log::info!("Skipped object: {} of type: {}", object.name, other.kind());
                diagnostics.push(Diagnostic::SkippedObject {
                    object: object.name.clone(),
                    kind: other.kind(),
                });
                continue;
            }
        };
        log::info!("Exporting object: {}", object.name);
        models.push(build_model(object, mesh, &mut diagnostics)?);
    }

    Ok((models, diagnostics))
}

/// Run the pipeline stages for a single mesh object.
pub fn build_model(
    object: &SceneObject,
    mesh: &RawMesh,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Model, ExportError> {
    let texture_name = material::resolve_texture(&object.name, &object.material_slots)?;

    let normalized = NormalizedMesh::normalize(mesh, diagnostics);

    let mut builder = VertexBufferBuilder::with_capacity(normalized.corner_count());
    for corner in normalized.corners() {
        builder.push_corner(&corner);
    }
    let (vertices, indices) = builder.finish();

    Ok(Model {
        element_name: object.name.clone(),
        shape_name: mesh.name.clone(),
        texture_name,
        world_matrix: transform::encode_matrix(&object.world_matrix),
        // Hidden in either the viewport or the render means hidden at runtime.
        is_visible: !(object.hide_viewport || object.hide_render),
        vertices,
        indices,
    })
}
