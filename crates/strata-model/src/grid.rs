//! Regular grid, topography and the grid container.

use serde::{Deserialize, Serialize};

use crate::sections::SectionTable;

/// Regular 3D grid the lithology and scalar blocks are solved on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularGrid {
    /// Number of cells along X, Y and Z.
    pub resolution: [usize; 3],
    /// Spatial bounds `[xmin, xmax, ymin, ymax, zmin, zmax]`.
    pub extent: [f64; 6],
}

impl RegularGrid {
    /// Create a grid from its resolution and extent.
    pub fn new(resolution: [usize; 3], extent: [f64; 6]) -> Self {
        Self { resolution, extent }
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.resolution.iter().product()
    }

    /// Bounds of one axis (0 = X, 1 = Y, 2 = Z) as `(min, max)`.
    pub fn axis_bounds(&self, axis: usize) -> (f64, f64) {
        (self.extent[2 * axis], self.extent[2 * axis + 1])
    }

    /// Plan-view extent `[xmin, xmax, ymin, ymax]`.
    pub fn planar_extent(&self) -> [f64; 4] {
        [self.extent[0], self.extent[1], self.extent[2], self.extent[3]]
    }
}

/// Topography grid the geological map is evaluated on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topography {
    /// Number of samples along X and Y.
    pub resolution: [usize; 2],
}

impl Topography {
    /// Create a topography grid.
    pub fn new(nx: usize, ny: usize) -> Self {
        Self {
            resolution: [nx, ny],
        }
    }

    /// Shape of the map image as `(rows, cols)`: one row per Y sample.
    pub fn planar_shape(&self) -> (usize, usize) {
        (self.resolution[1], self.resolution[0])
    }
}

/// All grids attached to a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// The regular volume grid.
    pub regular: RegularGrid,
    /// Topography grid, present when the geological map is enabled.
    #[serde(default)]
    pub topography: Option<Topography>,
    /// Named cross-sections.
    #[serde(default)]
    pub sections: SectionTable,
}

impl Grid {
    /// A grid with only the regular volume part.
    pub fn new(regular: RegularGrid) -> Self {
        Self {
            regular,
            topography: None,
            sections: SectionTable::default(),
        }
    }

    /// Attach a topography grid.
    pub fn with_topography(mut self, topography: Topography) -> Self {
        self.topography = Some(topography);
        self
    }

    /// Attach a section table.
    pub fn with_sections(mut self, sections: SectionTable) -> Self {
        self.sections = sections;
        self
    }
}
