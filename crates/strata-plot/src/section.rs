//! Section-line geometry: tick labels along a section and projection of
//! plan-view data onto it.

use strata_math::{LineProjector, Point2};
use strata_model::{Section, SectionTable};
use tracing::warn;

use crate::error::{PlotError, Result};

/// Tick count used when a request falls outside `[0, MAX_SECTION_TICKS]`.
pub const FALLBACK_SECTION_TICKS: usize = 3;

/// Largest tick count honored as requested.
pub const MAX_SECTION_TICKS: i64 = 5;

/// Tick labels for the horizontal axis of a section plot.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionLabels {
    /// One label per tick, from section start to stop.
    pub labels: Vec<String>,
    /// Name of the plan-view coordinate(s) the labels show.
    pub axis_name: String,
}

/// Orientation of a section line in plan view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Constant X: the line runs along Y.
    AlongY,
    /// Constant Y: the line runs along X.
    AlongX,
    /// Neither coordinate is constant.
    Oblique,
}

/// Clamp a requested tick count: anything outside `[0, 5]` becomes 3.
pub fn clamp_tick_request(requested: i64) -> usize {
    if (0..=MAX_SECTION_TICKS).contains(&requested) {
        requested as usize
    } else {
        warn!(requested, "section tick request out of range, using {FALLBACK_SECTION_TICKS}");
        FALLBACK_SECTION_TICKS
    }
}

/// Classify sampled line points by which coordinate stays constant.
pub fn classify_line(points: &[Point2]) -> LineKind {
    if distinct_count(points.iter().map(|p| p.x)) == 1 {
        LineKind::AlongY
    } else if distinct_count(points.iter().map(|p| p.y)) == 1 {
        LineKind::AlongX
    } else {
        LineKind::Oblique
    }
}

/// Tick labels for `section` with `requested` ticks (clamped).
///
/// Labels are plan-view coordinates truncated to integers: Y values for a
/// line of constant X, X values for a line of constant Y, and `"x,\ny"`
/// pairs for an oblique line, stacked on two rows.
pub fn section_labels(section: &Section, requested: i64) -> SectionLabels {
    let n = clamp_tick_request(requested);
    let xy = SectionTable::line_coordinates(&section.start_point(), &section.stop_point(), n);

    match classify_line(&xy) {
        LineKind::AlongY => SectionLabels {
            labels: xy.iter().map(|p| (p.y as i64).to_string()).collect(),
            axis_name: "Y".into(),
        },
        LineKind::AlongX => SectionLabels {
            labels: xy.iter().map(|p| (p.x as i64).to_string()).collect(),
            axis_name: "X".into(),
        },
        LineKind::Oblique => SectionLabels {
            labels: xy
                .iter()
                .map(|p| format!("{},\n{}", p.x as i64, p.y as i64))
                .collect(),
            axis_name: "X,Y".into(),
        },
    }
}

/// Projector onto the plan-view line of `section`.
pub fn section_projector(section: &Section) -> Result<LineProjector> {
    LineProjector::new(section.start_point(), section.stop_point())
        .ok_or_else(|| PlotError::DegenerateSection(section.name.clone()))
}

fn distinct_count(values: impl Iterator<Item = f64>) -> usize {
    let mut v: Vec<f64> = values.collect();
    v.sort_by(f64::total_cmp);
    v.dedup();
    v.len()
}
