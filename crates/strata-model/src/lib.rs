#![warn(missing_docs)]

//! Read-only description of a solved geological model.
//!
//! The potential-field solver lives elsewhere; this crate only carries what
//! it produced (lithology and scalar-field blocks, per-section buffers, the
//! geological map) together with the grid, section and surface descriptions
//! needed to draw cross-sections of it.
//!
//! Everything here is plain data. Plotting never mutates a [`GeoModel`].

pub mod error;
pub mod grid;
pub mod sections;
pub mod solution;
pub mod surfaces;

pub use error::{ModelError, Result};
pub use grid::{Grid, RegularGrid, Topography};
pub use sections::{Section, SectionTable};
pub use solution::{SectionSolution, Solutions};
pub use surfaces::{Orientation, Surface, SurfacePoint, SurfaceTable};

use serde::{Deserialize, Serialize};

/// A solved geological model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoModel {
    /// Grid, topography and section geometry.
    pub grid: Grid,
    /// Modeled surfaces in rock-unit id order.
    pub surfaces: SurfaceTable,
    /// Interface points.
    #[serde(default)]
    pub surface_points: Vec<SurfacePoint>,
    /// Orientation measurements.
    #[serde(default)]
    pub orientations: Vec<Orientation>,
    /// Solver outputs.
    #[serde(default)]
    pub solutions: Solutions,
}

impl GeoModel {
    /// A model with no survey data and no solutions yet.
    pub fn new(grid: Grid, surfaces: SurfaceTable) -> Self {
        Self {
            grid,
            surfaces,
            surface_points: Vec::new(),
            orientations: Vec::new(),
            solutions: Solutions::default(),
        }
    }

    /// Replace the solver outputs.
    pub fn with_solutions(mut self, solutions: Solutions) -> Self {
        self.solutions = solutions;
        self
    }

    /// Replace the survey tables.
    pub fn with_data(mut self, points: Vec<SurfacePoint>, orientations: Vec<Orientation>) -> Self {
        self.surface_points = points;
        self.orientations = orientations;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_defaults_from_minimal_json() {
        let json = r##"{
            "grid": {"regular": {"resolution": [2, 2, 2], "extent": [0, 1, 0, 1, 0, 1]}},
            "surfaces": [{"name": "a", "color": "#ff0000"}]
        }"##;
        let model: GeoModel = serde_json::from_str(json).unwrap();
        assert!(model.grid.topography.is_none());
        assert!(model.grid.sections.is_empty());
        assert!(model.solutions.lith_block.is_empty());
        assert_eq!(model.surfaces.unit_id("a"), Some(1));
    }
}
