//! Exporter data structures: scene inputs and built models.
//!
//! This module contains the data types on both sides of the pipeline:
//!
//! - `scene` holds the host-facing input records (objects, raw meshes,
//!   material slots) that a scene integration hands to the exporter
//! - `model` holds the built output entities (models with deduplicated
//!   vertex and index buffers) that the binary writer serializes

pub mod model;
pub mod scene;
