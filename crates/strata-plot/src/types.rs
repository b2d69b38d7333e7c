//! Core types shared by the plotter, the drawing surface and the rasterizer.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::colormap::{ColorMap, Normalize};

/// An sRGB 8-bit color triplet.
pub type Rgb = [u8; 3];

/// A 2D point in axes data coordinates.
///
/// We use a plain type instead of nalgebra::Point2 so drawn layers stay
/// serializable without nalgebra's serde feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point2D {
    /// Create a new 2D point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    pub fn distance(&self, other: &Self) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// A 2D rectangle `[x0, x1, y0, y1]`, as used for image extents and limits.
///
/// Bounds are stored as given: `y1 < y0` describes a downward vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent2D {
    /// Left bound.
    pub x0: f64,
    /// Right bound.
    pub x1: f64,
    /// Bottom bound.
    pub y0: f64,
    /// Top bound.
    pub y1: f64,
}

impl Extent2D {
    /// Create an extent from its four bounds.
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64) -> Self {
        Self { x0, x1, y0, y1 }
    }

    /// Bounds as `[x0, x1, y0, y1]`.
    pub fn to_array(&self) -> [f64; 4] {
        [self.x0, self.x1, self.y0, self.y1]
    }

    /// Signed horizontal span.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Signed vertical span.
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// True when the vertical bounds run downward.
    pub fn is_y_inverted(&self) -> bool {
        self.y1 < self.y0
    }
}

impl From<[f64; 4]> for Extent2D {
    fn from(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

/// Tick configuration of the horizontal axis.
#[derive(Debug, Clone, PartialEq)]
pub enum Ticks {
    /// Backend-chosen ticks; carries how many labels it shows.
    Auto(usize),
    /// Fixed positions with their labels.
    Fixed {
        /// Tick positions in data coordinates.
        positions: Vec<f64>,
        /// One label per position.
        labels: Vec<String>,
    },
}

impl Ticks {
    /// Number of tick labels currently shown.
    pub fn label_count(&self) -> usize {
        match self {
            Ticks::Auto(n) => *n,
            Ticks::Fixed { labels, .. } => labels.len(),
        }
    }
}

/// A raster of rock-unit ids stretched over an extent.
#[derive(Debug, Clone)]
pub struct ImageLayer {
    /// Values with row 0 at the bottom of the extent (origin lower).
    pub values: Array2<f64>,
    /// Discrete color map applied to `values`.
    pub color_map: ColorMap,
    /// Normalization from value to color-map position.
    pub norm: Normalize,
    /// Data-space rectangle the image covers.
    pub extent: Extent2D,
    /// Drawing order; lower is painted first.
    pub z_order: i32,
}

/// One iso-line of a scalar field.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourLine {
    /// Field value along the line.
    pub level: f64,
    /// Ordered vertices in data coordinates.
    pub points: Vec<Point2D>,
    /// Whether the line forms a closed loop.
    pub is_closed: bool,
    /// Stroke color.
    pub color: Rgb,
}

/// Scalar-field contours.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourLayer {
    /// Levels that were traced, ascending.
    pub levels: Vec<f64>,
    /// Traced polylines.
    pub lines: Vec<ContourLine>,
    /// Drawing order.
    pub z_order: i32,
}

/// Categorical scatter of observation points.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterLayer {
    /// Marker positions.
    pub points: Vec<Point2D>,
    /// Category (rock-unit id) per marker.
    pub categories: Vec<u32>,
    /// Fill color per marker.
    pub colors: Vec<Rgb>,
    /// Drawing order.
    pub z_order: i32,
}

/// Vector field of arrows anchored at their tail.
#[derive(Debug, Clone, PartialEq)]
pub struct QuiverLayer {
    /// Arrow tails.
    pub origins: Vec<Point2D>,
    /// Arrow components in data orientation.
    pub vectors: Vec<Point2D>,
    /// A unit vector spans `1 / scale` of the axes width.
    pub scale: f64,
    /// Drawing order.
    pub z_order: i32,
}

/// A legend row.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Label text.
    pub label: String,
    /// Swatch color.
    pub color: Rgb,
}

/// Any drawable layer, ordered by [`Layer::z_order`] when rendered.
#[derive(Debug, Clone)]
pub enum Layer {
    /// Lithology image.
    Image(ImageLayer),
    /// Scalar-field contours.
    Contours(ContourLayer),
    /// Observation markers.
    Scatter(ScatterLayer),
    /// Orientation arrows.
    Quiver(QuiverLayer),
}

impl Layer {
    /// Drawing order of the layer.
    pub fn z_order(&self) -> i32 {
        match self {
            Layer::Image(l) => l.z_order,
            Layer::Contours(l) => l.z_order,
            Layer::Scatter(l) => l.z_order,
            Layer::Quiver(l) => l.z_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_spans() {
        let e = Extent2D::new(0.0, 100.0, 50.0, 0.0);
        assert_eq!(e.width(), 100.0);
        assert_eq!(e.height(), -50.0);
        assert!(e.is_y_inverted());
        assert_eq!(e.to_array(), [0.0, 100.0, 50.0, 0.0]);
    }

    #[test]
    fn test_point_distance() {
        let d = Point2D::new(0.0, 0.0).distance(&Point2D::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_tick_label_count() {
        assert_eq!(Ticks::Auto(6).label_count(), 6);
        let fixed = Ticks::Fixed {
            positions: vec![0.0, 1.0],
            labels: vec!["0".into(), "1".into()],
        };
        assert_eq!(fixed.label_count(), 2);
    }
}
