//! Named vertical cross-sections and their slots in the flattened buffers.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use strata_math::{points_along, Point2};

use crate::error::{ModelError, Result};

/// A vertical cross-section defined by a straight line in plan view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section name, unique within a table.
    pub name: String,
    /// Plan-view start point `[x, y]`.
    pub start: [f64; 2],
    /// Plan-view stop point `[x, y]`.
    pub stop: [f64; 2],
    /// Samples along the line and along Z.
    pub resolution: [usize; 2],
    /// Path length from start to stop.
    pub dist: f64,
}

impl Section {
    /// Create a section; the path length is derived from the endpoints.
    pub fn new(
        name: impl Into<String>,
        start: [f64; 2],
        stop: [f64; 2],
        resolution: [usize; 2],
    ) -> Self {
        let dist = (Point2::from(stop) - Point2::from(start)).norm();
        Self {
            name: name.into(),
            start,
            stop,
            resolution,
            dist,
        }
    }

    /// Start point as a [`Point2`].
    pub fn start_point(&self) -> Point2 {
        Point2::from(self.start)
    }

    /// Stop point as a [`Point2`].
    pub fn stop_point(&self) -> Point2 {
        Point2::from(self.stop)
    }

    /// Number of values this section occupies in a flattened buffer.
    pub fn len(&self) -> usize {
        self.resolution[0] * self.resolution[1]
    }

    /// True when the section has no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ordered table of sections.
///
/// Per-section solver outputs are concatenated in table order, so each
/// section owns a contiguous slot of `resolution[0] * resolution[1]` values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionTable {
    sections: Vec<Section>,
}

impl SectionTable {
    /// Build a table from sections in buffer order.
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Look up a section by name.
    pub fn get(&self, name: &str) -> Result<&Section> {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ModelError::UnknownSection(name.to_string()))
    }

    /// Section names in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    /// Iterate sections in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// True when the table holds no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Half-open range the named section occupies in the flattened buffers.
    pub fn index_range(&self, name: &str) -> Result<Range<usize>> {
        let mut start = 0;
        for s in &self.sections {
            if s.name == name {
                return Ok(start..start + s.len());
            }
            start += s.len();
        }
        Err(ModelError::UnknownSection(name.to_string()))
    }

    /// The named section's values inside a flattened multi-section buffer.
    pub fn slot<'b>(&self, name: &str, buffer: &'b [f64]) -> Result<&'b [f64]> {
        let range = self.index_range(name)?;
        buffer.get(range).ok_or_else(|| ModelError::ShapeMismatch {
            shape: vec![self.total_len()],
            len: buffer.len(),
        })
    }

    /// Total length of a flattened buffer holding every section.
    pub fn total_len(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    /// `n` evenly spaced plan-view points from `start` to `stop`, inclusive.
    pub fn line_coordinates(start: &Point2, stop: &Point2, n: usize) -> Vec<Point2> {
        points_along(start, stop, n)
    }
}

impl FromIterator<Section> for SectionTable {
    fn from_iter<I: IntoIterator<Item = Section>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
