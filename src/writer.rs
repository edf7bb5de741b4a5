//! The level file binary layout, write and read side.
//!
//! Everything is little-endian with fixed field widths; strings and arrays
//! are length-prefixed. Models are written contiguously in processing order,
//! record and payload together, so the file never interleaves two models.
//!
//! # File structure
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │ HEADER                                                        │
//! │   magic        b"SKLV"                                        │
//! │   version      u16 (currently 1)                              │
//! │   model_count  u32                                            │
//! ├───────────────────────────────────────────────────────────────┤
//! │ MODEL RECORD + PAYLOAD (repeated model_count times)           │
//! │   element_name  u32 length + UTF-8 bytes                      │
//! │   shape_name    u32 length + UTF-8 bytes                      │
//! │   texture_name  u32 length + UTF-8 bytes                      │
//! │   world_matrix  16 x f32, row-major                           │
//! │   is_visible    u8 (0 or 1)                                   │
//! │   vertex_count  u32                                           │
//! │   index_count   u32                                           │
//! │   vertices      vertex_count x 12 f32                         │
//! │                 (position xyz, normal xyz, uv, color rgba)    │
//! │   indices       index_count x u32                             │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Indices are always `u32`, which accommodates any vertex count a model
//! record can declare; no per-model index width is negotiated. Readers must
//! reject unknown magic and versions newer than [`VERSION`].

use std::io::{Read, Write};

use crate::data_structures::model::{Model, Vertex};
use crate::error::ExportError;

/// Magic tag at the start of every level file, "SKLV" in ASCII.
pub const MAGIC: [u8; 4] = *b"SKLV";

/// Current format version.
pub const VERSION: u16 = 1;

/// Most entries the reader reserves ahead of decoding. Counts come from the
/// stream and cannot be trusted; a corrupt file declaring billions of
/// vertices must run out of bytes, not memory.
const MAX_PREALLOC: usize = 1 << 16;

/// Serialize `models` to `writer` in the layout above, in slice order.
///
/// Append-only; any I/O failure aborts mid-stream with no guarantee about
/// partial output. Callers that need atomicity should write to a temporary
/// destination and rename.
pub fn write_level<W: Write>(writer: &mut W, models: &[Model]) -> Result<(), ExportError> {
    writer.write_all(&MAGIC)?;
    writer.write_all(&VERSION.to_le_bytes())?;
    writer.write_all(&(models.len() as u32).to_le_bytes())?;

    for model in models {
        write_model(writer, model)?;
    }
    Ok(())
}

fn write_model<W: Write>(writer: &mut W, model: &Model) -> Result<(), ExportError> {
    write_string(writer, &model.element_name)?;
    write_string(writer, &model.shape_name)?;
    write_string(writer, &model.texture_name)?;

    for value in model.world_matrix {
        writer.write_all(&value.to_le_bytes())?;
    }
    writer.write_all(&[model.is_visible as u8])?;
    writer.write_all(&(model.vertices.len() as u32).to_le_bytes())?;
    writer.write_all(&(model.indices.len() as u32).to_le_bytes())?;

    for vertex in &model.vertices {
        write_vertex(writer, vertex)?;
    }
    for index in &model.indices {
        writer.write_all(&index.to_le_bytes())?;
    }
    Ok(())
}

// Field-by-field rather than one byte cast of the whole struct, so the wire
// stays little-endian on any host.
fn write_vertex<W: Write>(writer: &mut W, vertex: &Vertex) -> Result<(), ExportError> {
    for value in vertex
        .position
        .iter()
        .chain(&vertex.normal)
        .chain(&vertex.uv)
        .chain(&vertex.color)
    {
        writer.write_all(&value.to_le_bytes())?;
    }
    Ok(())
}

fn write_string<W: Write>(writer: &mut W, value: &str) -> Result<(), ExportError> {
    writer.write_all(&(value.len() as u32).to_le_bytes())?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}

/// Decode a level stream written by [`write_level`].
///
/// Mostly useful for round-trip verification and tooling; the runtime has
/// its own loader. Rejects bad magic and versions newer than [`VERSION`].
pub fn read_level<R: Read>(reader: &mut R) -> Result<Vec<Model>, ExportError> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(ExportError::InvalidMagic(magic));
    }

    let version = read_u16(reader)?;
    if version > VERSION {
        return Err(ExportError::UnsupportedVersion(version));
    }

    let model_count = read_u32(reader)?;
    let mut models = Vec::with_capacity((model_count as usize).min(MAX_PREALLOC));
    for _ in 0..model_count {
        models.push(read_model(reader)?);
    }
    Ok(models)
}

fn read_model<R: Read>(reader: &mut R) -> Result<Model, ExportError> {
    let element_name = read_string(reader)?;
    let shape_name = read_string(reader)?;
    let texture_name = read_string(reader)?;

    let mut world_matrix = [0.0f32; 16];
    for value in &mut world_matrix {
        *value = read_f32(reader)?;
    }

    let mut visible = [0u8; 1];
    reader.read_exact(&mut visible)?;
    let vertex_count = read_u32(reader)?;
    let index_count = read_u32(reader)?;

    let mut vertices = Vec::with_capacity((vertex_count as usize).min(MAX_PREALLOC));
    for _ in 0..vertex_count {
        vertices.push(read_vertex(reader)?);
    }
    let mut indices = Vec::with_capacity((index_count as usize).min(MAX_PREALLOC));
    for _ in 0..index_count {
        indices.push(read_u32(reader)?);
    }

    Ok(Model {
        element_name,
        shape_name,
        texture_name,
        world_matrix,
        is_visible: visible[0] != 0,
        vertices,
        indices,
    })
}

fn read_vertex<R: Read>(reader: &mut R) -> Result<Vertex, ExportError> {
    let mut fields = [0.0f32; 12];
    for value in &mut fields {
        *value = read_f32(reader)?;
    }
    Ok(Vertex {
        position: [fields[0], fields[1], fields[2]],
        normal: [fields[3], fields[4], fields[5]],
        uv: [fields[6], fields[7]],
        color: [fields[8], fields[9], fields[10], fields[11]],
    })
}

fn read_string<R: Read>(reader: &mut R) -> Result<String, ExportError> {
    let length = read_u32(reader)? as usize;
    // Sized by what the stream actually delivers, not by the declared length.
    let mut bytes = Vec::with_capacity(length.min(MAX_PREALLOC));
    reader.by_ref().take(length as u64).read_to_end(&mut bytes)?;
    if bytes.len() != length {
        return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
    }
    Ok(String::from_utf8(bytes)?)
}

fn read_u16<R: Read>(reader: &mut R) -> Result<u16, ExportError> {
    let mut bytes = [0u8; 2];
    reader.read_exact(&mut bytes)?;
    Ok(u16::from_le_bytes(bytes))
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32, ExportError> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}

fn read_f32<R: Read>(reader: &mut R) -> Result<f32, ExportError> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(f32::from_le_bytes(bytes))
}
