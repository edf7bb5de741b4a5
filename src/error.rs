use thiserror::Error;

/// Errors that abort an export or a level read.
///
/// Per-object recoverable conditions (non-mesh objects, degenerate faces) are
/// *not* represented here; those surface as [`crate::export::Diagnostic`]
/// entries and the pipeline continues. A missing texture is deliberately
/// fatal: a model without a texture reference is invalid data for the
/// runtime, and aborting the batch beats shipping a level that fails to load
/// later and less diagnosably.
#[derive(Debug, Error)]
pub enum ExportError {
    /// No material slot of the object yielded an image texture.
    #[error("no texture for assigned material found on object `{object}`, add one")]
    MissingTexture { object: String },

    /// Reading or writing the level stream failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The stream does not start with the level file magic tag.
    #[error("not a level file: bad magic {0:?}")]
    InvalidMagic([u8; 4]),

    /// The level format version is newer than this crate understands.
    #[error("unsupported level format version {0}")]
    UnsupportedVersion(u16),

    /// A length-prefixed string field was not valid UTF-8.
    #[error("malformed string field in level stream")]
    InvalidString(#[from] std::string::FromUtf8Error),
}
