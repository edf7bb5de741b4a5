//! Face-corner deduplication into an indexed triangle list.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::data_structures::model::{FaceCorner, Vertex};

/// Byte width of one [`Vertex`], which doubles as the dedup key width.
const VERTEX_BYTES: usize = std::mem::size_of::<Vertex>();

/// Flattens a face-corner sequence into a deduplicated vertex array plus a
/// triangle index buffer.
///
/// Dedup is exact: the key is the 48-byte `Vertex` representation, so two
/// corners collapse only when every attribute is bit-identical. No epsilon
/// comparison is involved, which keeps the mapping well-defined across runs
/// and platforms (approximate float hashing is where determinism usually
/// dies). First-seen tuples get the lowest index; the map's iteration order
/// is never consulted, so the output is a pure function of the input order.
pub struct VertexBufferBuilder {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    seen: HashMap<[u8; VERTEX_BYTES], u32>,
}

impl VertexBufferBuilder {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            seen: HashMap::new(),
        }
    }

    pub fn with_capacity(corners: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(corners),
            indices: Vec::with_capacity(corners),
            seen: HashMap::with_capacity(corners),
        }
    }

    /// Look up or insert the corner's attribute tuple and append its index.
    /// Returns the index the corner resolved to.
    pub fn push_corner(&mut self, corner: &FaceCorner) -> u32 {
        let vertex = Vertex::from(corner);
        let key: [u8; VERTEX_BYTES] = bytemuck::cast(vertex);

        let index = match self.seen.entry(key) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let index = self.vertices.len() as u32;
                self.vertices.push(vertex);
                *entry.insert(index)
            }
        };
        self.indices.push(index);
        index
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn finish(self) -> (Vec<Vertex>, Vec<u32>) {
        (self.vertices, self.indices)
    }
}

impl Default for VertexBufferBuilder {
    fn default() -> Self {
        Self::new()
    }
}
