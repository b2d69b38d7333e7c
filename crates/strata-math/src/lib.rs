#![warn(missing_docs)]

//! Math types for strata.
//!
//! Thin wrappers around nalgebra for the plan-view geometry of
//! cross-section plotting: evenly spaced samples along a line and the
//! orthogonal projector onto a section line.

use nalgebra::{Matrix2, Vector2};

/// A point in plan view (X, Y).
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in plan view.
pub type Vec2 = Vector2<f64>;

/// `n` evenly spaced values from `start` to `stop`, both inclusive.
///
/// `n == 0` yields nothing and `n == 1` yields `start`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// `n` evenly spaced points on the segment `a -> b`, endpoints included.
pub fn points_along(a: &Point2, b: &Point2, n: usize) -> Vec<Point2> {
    let xs = linspace(a.x, b.x, n);
    let ys = linspace(a.y, b.y, n);
    xs.into_iter()
        .zip(ys)
        .map(|(x, y)| Point2::new(x, y))
        .collect()
}

/// Orthogonal projection onto the line through `origin` with direction `d`.
///
/// The projection matrix is `A = d dᵀ / |d|²`; a plan-view point `p` maps to
/// `A (p - origin)`, a vector lying on the line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineProjector {
    /// Point the line passes through (section start).
    pub origin: Point2,
    /// The 2x2 projection matrix.
    pub matrix: Matrix2<f64>,
}

impl LineProjector {
    /// Projector onto the line `start -> stop`.
    ///
    /// Returns `None` when the two points coincide within `Tolerance::DEFAULT`.
    pub fn new(start: Point2, stop: Point2) -> Option<Self> {
        let d = stop - start;
        let len_sq = d.norm_squared();
        if Tolerance::DEFAULT.is_zero(len_sq.sqrt()) {
            return None;
        }
        Some(Self {
            origin: start,
            matrix: (d * d.transpose()) / len_sq,
        })
    }

    /// Project `p` onto the line, relative to the line origin.
    pub fn project(&self, p: &Point2) -> Vec2 {
        self.matrix * (p - self.origin)
    }

    /// Unsigned distance from the origin of `p`'s projection along the line.
    pub fn distance_along(&self, p: &Point2) -> f64 {
        self.project(p).norm()
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in model units.
    pub linear: f64,
}

impl Tolerance {
    /// Default tolerance (1e-9 model units).
    pub const DEFAULT: Self = Self { linear: 1e-9 };

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace_endpoints() {
        let v = linspace(0.0, 100.0, 5);
        assert_eq!(v, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
    }

    #[test]
    fn test_linspace_descending() {
        let v = linspace(10.0, 0.0, 3);
        assert_eq!(v, vec![10.0, 5.0, 0.0]);
    }

    #[test]
    fn test_points_along() {
        let pts = points_along(&Point2::new(0.0, 50.0), &Point2::new(100.0, 50.0), 3);
        assert_eq!(pts.len(), 3);
        assert!(pts.iter().all(|p| p.y == 50.0));
        assert_relative_eq!(pts[1].x, 50.0);
    }

    #[test]
    fn test_projector_recovers_section_length() {
        let start = Point2::new(10.0, 20.0);
        let stop = Point2::new(70.0, 100.0);
        let proj = LineProjector::new(start, stop).unwrap();
        assert_relative_eq!(proj.distance_along(&stop), 100.0, epsilon = 1e-9);
        assert_relative_eq!(proj.distance_along(&start), 0.0);
    }

    #[test]
    fn test_projector_drops_perpendicular_offset() {
        let proj = LineProjector::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)).unwrap();
        let v = proj.project(&Point2::new(4.0, 7.0));
        assert_relative_eq!(v.x, 4.0);
        assert_relative_eq!(v.y, 0.0);
    }

    #[test]
    fn test_projector_matrix_is_idempotent() {
        let proj = LineProjector::new(Point2::new(1.0, 1.0), Point2::new(4.0, 5.0)).unwrap();
        let a2 = proj.matrix * proj.matrix;
        assert_relative_eq!(a2, proj.matrix, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_line() {
        let p = Point2::new(5.0, 5.0);
        assert!(LineProjector::new(p, p).is_none());
    }
}
