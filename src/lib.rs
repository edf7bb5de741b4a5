//! lvl-forge
//!
//! A small, deterministic exporter that turns an in-memory 3D scene (mesh
//! objects with materials, transforms and per-corner attributes) into a
//! compact binary level file for a runtime renderer. The design emphasizes
//! reproducible output: the same scene input always serializes to the same
//! bytes, so level files can be diffed, cached and regenerated in asset
//! pipelines without spurious changes.
//!
//! High-level modules
//! - `data_structures`: scene input records and the core model/vertex types
//! - `export`: the pipeline stages (material resolution, mesh normalization,
//!   vertex deduplication, transform encoding) and the batch fold over objects
//! - `writer`: the versioned little-endian binary layout, write and read side
//! - `error`: the export error taxonomy
//!

pub mod data_structures;
pub mod error;
pub mod export;
pub mod writer;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use data_structures::model::{Model, Vertex};
pub use data_structures::scene::SceneObject;
pub use error::ExportError;
pub use export::{Diagnostic, build_models};
pub use writer::{read_level, write_level};
