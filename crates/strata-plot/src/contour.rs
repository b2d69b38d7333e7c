//! Iso-line extraction for scalar-field images.
//!
//! - Marching squares over the image cells with linear edge interpolation
//! - Segment chaining into open or closed polylines
//! - Mapping from image index space onto the plot extent

use std::collections::HashMap;

use ndarray::ArrayView2;

use crate::types::{Extent2D, Point2D};

/// Endpoint matching tolerance in image index units.
const CHAIN_TOLERANCE: f64 = 1e-9;

/// A traced iso-line in image index space (`x` = column, `y` = row).
#[derive(Debug, Clone, PartialEq)]
pub struct Isoline {
    /// Field value along the line.
    pub level: f64,
    /// Ordered vertices.
    pub points: Vec<Point2D>,
    /// Whether the line forms a closed loop.
    pub is_closed: bool,
}

/// Evenly spaced "nice" levels covering `[min, max]`, aiming for `target` levels.
///
/// The step is 1, 2, 2.5 or 5 times a power of ten; levels are multiples
/// of the step inside the closed range.
pub fn contour_levels(min: f64, max: f64, target: usize) -> Vec<f64> {
    if target == 0 || !min.is_finite() || !max.is_finite() || max <= min {
        return Vec::new();
    }
    let step = nice_step((max - min) / target as f64);
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

fn nice_step(raw: f64) -> f64 {
    let exp = 10f64.powf(raw.log10().floor());
    let f = raw / exp;
    let nice = if f <= 1.0 {
        1.0
    } else if f <= 2.0 {
        2.0
    } else if f <= 2.5 {
        2.5
    } else if f <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * exp
}

/// Minimum and maximum of the finite values of an image.
pub fn value_range(image: ArrayView2<'_, f64>) -> Option<(f64, f64)> {
    image
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

// ============================================================================
// Marching Squares
// ============================================================================

/// Marching squares at one level; returns unchained segments.
///
/// Cells touching a NaN are skipped.
pub fn march_squares(image: ArrayView2<'_, f64>, level: f64) -> Vec<(Point2D, Point2D)> {
    let (rows, cols) = image.dim();
    if rows < 2 || cols < 2 {
        return Vec::new();
    }

    let mut segments = Vec::new();
    for r in 0..rows - 1 {
        for c in 0..cols - 1 {
            let v00 = image[[r, c]];
            let v01 = image[[r, c + 1]];
            let v11 = image[[r + 1, c + 1]];
            let v10 = image[[r + 1, c]];
            if v00.is_nan() || v01.is_nan() || v11.is_nan() || v10.is_nan() {
                continue;
            }

            let mut case = 0u8;
            if v00 >= level {
                case |= 1;
            }
            if v01 >= level {
                case |= 2;
            }
            if v11 >= level {
                case |= 4;
            }
            if v10 >= level {
                case |= 8;
            }
            cell_segments(case, c as f64, r as f64, [v00, v01, v11, v10], level, &mut segments);
        }
    }
    segments
}

/// Append the segments of one cell. Corners are `[v00, v01, v11, v10]`
/// going around the cell starting at `(x, y)`.
fn cell_segments(
    case: u8,
    x: f64,
    y: f64,
    corners: [f64; 4],
    level: f64,
    out: &mut Vec<(Point2D, Point2D)>,
) {
    let [v00, v01, v11, v10] = corners;
    let low = || interpolate_edge(x, y, x + 1.0, y, v00, v01, level);
    let right = || interpolate_edge(x + 1.0, y, x + 1.0, y + 1.0, v01, v11, level);
    let high = || interpolate_edge(x, y + 1.0, x + 1.0, y + 1.0, v10, v11, level);
    let left = || interpolate_edge(x, y, x, y + 1.0, v00, v10, level);

    match case {
        0 | 15 => {}
        1 | 14 => out.push((left(), low())),
        2 | 13 => out.push((low(), right())),
        3 | 12 => out.push((left(), right())),
        4 | 11 => out.push((right(), high())),
        5 => {
            out.push((left(), low()));
            out.push((right(), high()));
        }
        6 | 9 => out.push((low(), high())),
        7 | 8 => out.push((left(), high())),
        10 => {
            out.push((low(), right()));
            out.push((left(), high()));
        }
        _ => {}
    }
}

/// Point where `level` crosses the edge `(x1, y1) -> (x2, y2)`.
fn interpolate_edge(x1: f64, y1: f64, x2: f64, y2: f64, v1: f64, v2: f64, level: f64) -> Point2D {
    if (v2 - v1).abs() < 1e-12 {
        return Point2D::new((x1 + x2) / 2.0, (y1 + y2) / 2.0);
    }
    let t = ((level - v1) / (v2 - v1)).clamp(0.0, 1.0);
    Point2D::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1))
}

// ============================================================================
// Segment Chaining
// ============================================================================

fn point_key(p: &Point2D, tolerance: f64) -> (i64, i64) {
    let scale = 1.0 / tolerance;
    ((p.x * scale).round() as i64, (p.y * scale).round() as i64)
}

/// Chain individual segments into continuous polylines.
///
/// Segments sharing an endpoint (within `tolerance`) are joined. Returns
/// each polyline with a flag telling whether it closes on itself.
pub fn chain_segments(
    segments: &[(Point2D, Point2D)],
    tolerance: f64,
) -> Vec<(Vec<Point2D>, bool)> {
    if segments.is_empty() {
        return Vec::new();
    }

    let mut adjacency: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
    for (i, (p0, p1)) in segments.iter().enumerate() {
        adjacency.entry(point_key(p0, tolerance)).or_default().push(i);
        adjacency.entry(point_key(p1, tolerance)).or_default().push(i);
    }

    let mut used = vec![false; segments.len()];
    let mut polylines = Vec::new();

    for start_idx in 0..segments.len() {
        if used[start_idx] {
            continue;
        }
        used[start_idx] = true;
        let (p0, p1) = segments[start_idx];

        let mut forward = vec![p0, p1];
        extend_chain(&mut forward, segments, &adjacency, &mut used, tolerance);

        let mut backward = vec![p0];
        extend_chain(&mut backward, segments, &adjacency, &mut used, tolerance);

        // backward = [p0, b1, b2, ...]; the polyline is [.., b2, b1, p0, p1, ..]
        let mut chain: Vec<Point2D> = backward.into_iter().skip(1).rev().collect();
        chain.extend(forward);

        let is_closed = chain.len() >= 3
            && chain[0].distance(&chain[chain.len() - 1]) < tolerance;
        if is_closed {
            chain.pop();
        }
        polylines.push((chain, is_closed));
    }

    polylines
}

/// Walk unused segments from the last point of `chain`.
fn extend_chain(
    chain: &mut Vec<Point2D>,
    segments: &[(Point2D, Point2D)],
    adjacency: &HashMap<(i64, i64), Vec<usize>>,
    used: &mut [bool],
    tolerance: f64,
) {
    while let Some(&current) = chain.last() {
        let key = point_key(&current, tolerance);
        let next = adjacency.get(&key).and_then(|neighbors| {
            neighbors.iter().copied().find(|&i| !used[i])
        });
        let Some(seg_idx) = next else {
            break;
        };
        used[seg_idx] = true;
        let (s0, s1) = segments[seg_idx];
        let next_pt = if point_key(&s0, tolerance) == key { s1 } else { s0 };
        chain.push(next_pt);
    }
}

/// Trace every level and chain the results.
pub fn trace(image: ArrayView2<'_, f64>, levels: &[f64]) -> Vec<Isoline> {
    levels
        .iter()
        .flat_map(|&level| {
            let segments = march_squares(image, level);
            chain_segments(&segments, CHAIN_TOLERANCE)
                .into_iter()
                .map(move |(points, is_closed)| Isoline {
                    level,
                    points,
                    is_closed,
                })
        })
        .collect()
}

/// Map an image-index point onto `extent`, grid nodes spanning it edge to edge.
pub fn to_extent(p: &Point2D, shape: (usize, usize), extent: &Extent2D) -> Point2D {
    let (rows, cols) = shape;
    let fx = if cols > 1 { p.x / (cols - 1) as f64 } else { 0.0 };
    let fy = if rows > 1 { p.y / (rows - 1) as f64 } else { 0.0 };
    Point2D::new(extent.x0 + fx * extent.width(), extent.y0 + fy * extent.height())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    /// Radial bowl: value = distance from the image center.
    fn bowl(n: usize) -> Array2<f64> {
        let c = (n - 1) as f64 / 2.0;
        Array2::from_shape_fn((n, n), |(r, col)| {
            ((r as f64 - c).powi(2) + (col as f64 - c).powi(2)).sqrt()
        })
    }

    #[test]
    fn test_levels_are_nice_and_inside_range() {
        let levels = contour_levels(0.0, 10.0, 5);
        assert_eq!(levels, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);

        let levels = contour_levels(0.13, 0.87, 7);
        assert!(levels.iter().all(|l| *l >= 0.13 && *l <= 0.87));
        assert_eq!(levels.len(), 4);
        assert!((levels[0] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_levels_empty_for_flat_field() {
        assert!(contour_levels(1.0, 1.0, 7).is_empty());
        assert!(contour_levels(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_vertical_front() {
        // value = column index, so the 1.5 level is the vertical line x = 1.5
        let img = Array2::from_shape_fn((4, 4), |(_, c)| c as f64);
        let lines = trace(img.view(), &[1.5]);
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert!(!line.is_closed);
        assert_eq!(line.points.len(), 4);
        assert!(line.points.iter().all(|p| (p.x - 1.5).abs() < 1e-12));
    }

    #[test]
    fn test_ring_is_closed() {
        let img = bowl(11);
        let lines = trace(img.view(), &[3.0]);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_closed);
        for p in &lines[0].points {
            let r = ((p.x - 5.0).powi(2) + (p.y - 5.0).powi(2)).sqrt();
            assert!((r - 3.0).abs() < 0.25, "vertex {:?} at radius {}", p, r);
        }
    }

    #[test]
    fn test_nan_cells_skipped() {
        let mut img = Array2::from_shape_fn((3, 3), |(_, c)| c as f64);
        img[[1, 1]] = f64::NAN;
        assert!(march_squares(img.view(), 0.5).is_empty());
    }

    #[test]
    fn test_chain_joins_reversed_segments() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(1.0, 0.0);
        let c = Point2D::new(2.0, 0.0);
        let chains = chain_segments(&[(b, c), (b, a)], 1e-9);
        assert_eq!(chains.len(), 1);
        let (pts, closed) = &chains[0];
        assert!(!closed);
        assert_eq!(pts.len(), 3);
        assert_eq!(pts[1], b);
    }

    #[test]
    fn test_to_extent_maps_corners() {
        let e = Extent2D::new(0.0, 100.0, -50.0, 0.0);
        let p = to_extent(&Point2D::new(9.0, 4.0), (5, 10), &e);
        assert_eq!(p, Point2D::new(100.0, 0.0));
        let p = to_extent(&Point2D::new(0.0, 0.0), (5, 10), &e);
        assert_eq!(p, Point2D::new(0.0, -50.0));
    }

    #[test]
    fn test_value_range_ignores_nan() {
        let img = Array2::from_shape_vec((1, 3), vec![2.0, f64::NAN, -1.0]).unwrap();
        assert_eq!(value_range(img.view()), Some((-1.0, 2.0)));
    }
}
