//! Plot settings.

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, Result};

/// Tunables shared by all plotting operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotSettings {
    /// Cell number used when a block is painted without an explicit cell.
    pub default_cell_number: usize,
    /// Target number of scalar-field contour levels.
    pub contour_level_count: usize,
    /// Quiver arrow scale: a unit gradient spans `1 / quiver_scale` of the axes width.
    pub quiver_scale: f64,
    /// Scatter marker radius in pixels.
    pub marker_radius_px: u32,
    /// Subplot grid of a new figure as `[rows, cols]`.
    pub figure_grid: [usize; 2],
    /// Tick labels a fresh axes reports before fixed ticks are set.
    pub auto_tick_count: usize,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            default_cell_number: 25,
            contour_level_count: 7,
            quiver_scale: 10.0,
            marker_radius_px: 4,
            figure_grid: [3, 2],
            auto_tick_count: 6,
        }
    }
}

impl PlotSettings {
    /// Parse settings from TOML; missing keys keep their defaults.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let settings: Self = toml::from_str(src)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.contour_level_count == 0 {
            return Err(PlotError::InvalidSettings(
                "contour_level_count must be positive".into(),
            ));
        }
        if self.quiver_scale <= 0.0 || !self.quiver_scale.is_finite() {
            return Err(PlotError::InvalidSettings(
                "quiver_scale must be positive".into(),
            ));
        }
        if self.figure_grid[0] == 0 || self.figure_grid[1] == 0 {
            return Err(PlotError::InvalidSettings(
                "figure_grid needs at least one row and one column".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let s = PlotSettings::default();
        assert!(s.validate().is_ok());
        assert_eq!(s.default_cell_number, 25);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let s = PlotSettings::from_toml_str("contour_level_count = 12\nfigure_grid = [2, 2]\n")
            .unwrap();
        assert_eq!(s.contour_level_count, 12);
        assert_eq!(s.figure_grid, [2, 2]);
        assert_eq!(s.quiver_scale, 10.0);
    }

    #[test]
    fn test_rejects_zero_levels() {
        let err = PlotSettings::from_toml_str("contour_level_count = 0").unwrap_err();
        assert!(matches!(err, PlotError::InvalidSettings(_)));
    }

    #[test]
    fn test_rejects_bad_toml() {
        let err = PlotSettings::from_toml_str("quiver_scale = \"big\"").unwrap_err();
        assert!(matches!(err, PlotError::Config(_)));
    }
}
