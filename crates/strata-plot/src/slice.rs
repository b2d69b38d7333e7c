//! Axis-aligned slicing of regular-grid blocks.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array2, ArrayView3, Axis as NdAxis};
use strata_model::RegularGrid;

use crate::error::{PlotError, Result};
use crate::types::Extent2D;

/// One of the three grid axes a slice can be taken across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    /// Slice at a fixed X cell (YZ plane).
    X,
    /// Slice at a fixed Y cell (XZ plane).
    #[default]
    Y,
    /// Slice at a fixed Z cell (XY plane).
    Z,
}

impl Axis {
    /// Array dimension of this axis in a C-ordered `(x, y, z)` block.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Upper-case display name.
    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Axis {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(PlotError::InvalidAxis(s.to_string())),
        }
    }
}

impl TryFrom<char> for Axis {
    type Error = PlotError;

    fn try_from(c: char) -> Result<Self> {
        c.to_string().parse()
    }
}

/// Index selection along one block dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceIndex {
    /// Every cell `0..len`.
    Full(usize),
    /// A single cell.
    Single(usize),
}

/// How to cut a 2D image out of a 3D block and where to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceRecipe {
    /// The sliced axis.
    pub axis: Axis,
    /// Selection along X, Y and Z.
    pub indices: [SliceIndex; 3],
    /// Horizontal and vertical in-plane axis names.
    pub in_plane: (&'static str, &'static str),
    /// Gradient components lying in the plane, same order as `in_plane`.
    pub gradients: (&'static str, &'static str),
    /// Grid extent with the sliced axis's bounds removed.
    pub extent: Extent2D,
}

/// Build the slice recipe for `axis` at `cell_number`.
///
/// `cell_number` is not checked against the grid; [`SliceRecipe::apply`]
/// reports an out-of-range cell.
pub fn slice_recipe(grid: &RegularGrid, axis: Axis, cell_number: usize) -> SliceRecipe {
    let [nx, ny, nz] = grid.resolution;
    let e = grid.extent;
    let mut indices = [
        SliceIndex::Full(nx),
        SliceIndex::Full(ny),
        SliceIndex::Full(nz),
    ];
    indices[axis.index()] = SliceIndex::Single(cell_number);

    let (in_plane, gradients, extent) = match axis {
        Axis::X => (("Y", "Z"), ("G_y", "G_z"), Extent2D::new(e[2], e[3], e[4], e[5])),
        Axis::Y => (("X", "Z"), ("G_x", "G_z"), Extent2D::new(e[0], e[1], e[4], e[5])),
        Axis::Z => (("X", "Y"), ("G_x", "G_y"), Extent2D::new(e[0], e[1], e[2], e[3])),
    };

    SliceRecipe {
        axis,
        indices,
        in_plane,
        gradients,
        extent,
    }
}

impl SliceRecipe {
    /// Cell selected along the sliced axis.
    pub fn cell_number(&self) -> usize {
        match self.indices[self.axis.index()] {
            SliceIndex::Single(i) | SliceIndex::Full(i) => i,
        }
    }

    /// Cut the recipe's plane out of `block` as an image.
    ///
    /// Rows follow the vertical in-plane axis (row 0 at its minimum) and
    /// columns the horizontal one.
    pub fn apply(&self, block: ArrayView3<'_, f64>) -> Result<Array2<f64>> {
        let dim = self.axis.index();
        let len = block.len_of(NdAxis(dim));
        let cell = self.cell_number();
        if cell >= len {
            return Err(PlotError::IndexOutOfRange {
                what: format!("axis {}", self.axis),
                index: cell,
                len,
            });
        }
        Ok(block.index_axis(NdAxis(dim), cell).t().to_owned())
    }
}

/// View a flattened block as `(nx, ny, nz)` in C order.
pub fn reshape_block<'a>(values: &'a [f64], grid: &RegularGrid) -> Result<ArrayView3<'a, f64>> {
    let [nx, ny, nz] = grid.resolution;
    Ok(ArrayView3::from_shape((nx, ny, nz), values)?)
}
