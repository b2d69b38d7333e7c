//! Solver outputs consumed by the plotter.

use serde::{Deserialize, Serialize};

/// Solver outputs evaluated on the section grid.
///
/// Every buffer concatenates all sections in section-table order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionSolution {
    /// Rock-unit ids for every section sample.
    pub lith: Vec<f64>,
    /// One scalar-field buffer per isosurface.
    pub scalar_fields: Vec<Vec<f64>>,
}

impl SectionSolution {
    /// True when no section samples were solved.
    pub fn is_empty(&self) -> bool {
        self.lith.is_empty()
    }
}

/// Everything the solver produced for a model.
///
/// Volume blocks are flattened in C order over the regular grid resolution
/// (X slowest, Z fastest).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Solutions {
    /// Rock-unit id per regular-grid cell.
    #[serde(default)]
    pub lith_block: Vec<f64>,
    /// Scalar field per regular-grid cell, one block per isosurface.
    #[serde(default)]
    pub scalar_field_matrix: Vec<Vec<f64>>,
    /// Section-grid outputs, when sections were solved.
    #[serde(default)]
    pub sections: Option<SectionSolution>,
    /// Rock-unit id per topography sample, when the map was computed.
    #[serde(default)]
    pub geological_map: Option<Vec<f64>>,
}

impl Solutions {
    /// Section outputs, if any section sample was solved.
    pub fn solved_sections(&self) -> Option<&SectionSolution> {
        self.sections.as_ref().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_section_solution_counts_as_unsolved() {
        let mut sol = Solutions {
            sections: Some(SectionSolution::default()),
            ..Default::default()
        };
        assert!(sol.solved_sections().is_none());

        sol.sections = Some(SectionSolution {
            lith: vec![1.0, 2.0],
            scalar_fields: vec![],
        });
        assert!(sol.solved_sections().is_some());
    }
}
