//! Error types for plotting.

use strata_model::ModelError;
use thiserror::Error;

/// Errors that can occur while preparing or painting a cross-section.
#[derive(Error, Debug)]
pub enum PlotError {
    /// Axis letter is not one of x, y, z.
    #[error("'{0}' must be a cartesian direction, i.e. x, y or z")]
    InvalidAxis(String),

    /// Neither or both of section name and cell number were given.
    #[error("exactly one of section name or cell number must be given")]
    AmbiguousOrMissingSelector,

    /// Geological map requested but the topography grid was not solved.
    #[error("geological map not computed, activate the topography grid")]
    TopographyNotComputed,

    /// Section image requested but no section outputs exist.
    #[error("no sections for plotting defined")]
    SectionsNotSolved,

    /// No section, cell number or block was selected.
    #[error("no section, cell number or block selected")]
    NoSelectorProvided,

    /// An index fell outside the array it was applied to.
    #[error("index {index} out of range for {what} of length {len}")]
    IndexOutOfRange {
        /// What was indexed (axis name, isosurface list, ...).
        what: String,
        /// The offending index.
        index: usize,
        /// Length of the indexed dimension.
        len: usize,
    },

    /// Section start and stop coincide, so there is no line to project on.
    #[error("section '{0}' has zero length")]
    DegenerateSection(String),

    /// A color string could not be parsed.
    #[error("invalid color '{0}', expected #RRGGBB")]
    InvalidColor(String),

    /// Plot settings failed validation.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Section or surface lookup failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A buffer could not be reshaped to the requested grid.
    #[error("reshape failed: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// PNG encoding or file IO failed.
    #[error("image export failed: {0}")]
    Image(#[from] image::ImageError),

    /// Settings text was not valid TOML for [`crate::PlotSettings`].
    #[error("settings parse failed: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for plotting operations.
pub type Result<T> = std::result::Result<T, PlotError>;
