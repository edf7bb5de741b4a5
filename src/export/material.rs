//! Texture resolution over node-based materials.

use std::path::Path;

use crate::data_structures::scene::{MaterialNode, MaterialSlot};
use crate::error::ExportError;

/// Pick the one texture reference for an object.
///
/// Slots are scanned in slot order, nodes within a material in node order;
/// the first image texture node with an image assigned wins. The returned
/// name is the image name with its final extension stripped, which is the
/// key the runtime looks textures up by. No slot yielding an image is a
/// hard failure for the whole export.
pub fn resolve_texture(
    object_name: &str,
    slots: &[MaterialSlot],
) -> Result<String, ExportError> {
    for slot in slots {
        let Some(material) = &slot.material else {
            continue;
        };
        if !material.use_nodes {
            continue;
        }
        for node in &material.nodes {
            if let MaterialNode::ImageTexture { image: Some(image) } = node {
                log::debug!("Found an image: {image}");
                return Ok(strip_extension(image));
            }
        }
    }

    Err(ExportError::MissingTexture {
        object: object_name.to_string(),
    })
}

/// Drop the final extension only: `"crate.png"` → `"crate"`,
/// `"bark.4k.png"` → `"bark.4k"`, `"noext"` → `"noext"`.
fn strip_extension(image_name: &str) -> String {
    Path::new(image_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| image_name.to_string())
}
