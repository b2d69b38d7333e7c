//! Error types for model lookups.

use thiserror::Error;

/// Errors raised while reading a model description.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// No section with this name exists in the section table.
    #[error("unknown section '{0}'")]
    UnknownSection(String),

    /// A flattened buffer does not have the length its shape requires.
    #[error("buffer of length {len} cannot be viewed as {shape:?}")]
    ShapeMismatch {
        /// Requested shape.
        shape: Vec<usize>,
        /// Actual buffer length.
        len: usize,
    },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
