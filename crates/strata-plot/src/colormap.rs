//! Discrete surface color maps and value normalization.
//!
//! A [`ColorMap`] is an explicit ordered enumeration: surface name →
//! palette slot → color. Rock-unit id `k` lives in slot `k - 1`, so the
//! assignment stays stable as long as the surfaces table order does.

use strata_model::SurfaceTable;

use crate::error::{PlotError, Result};
use crate::types::Rgb;

/// One palette slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorEntry {
    /// Surface name shown in legends.
    pub name: String,
    /// Swatch color.
    pub rgb: Rgb,
}

/// Listed color map indexed by palette slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    entries: Vec<ColorEntry>,
}

impl ColorMap {
    /// One slot per surface, in table order.
    pub fn from_surfaces(surfaces: &SurfaceTable) -> Result<Self> {
        let entries = surfaces
            .iter()
            .map(|s| {
                Ok(ColorEntry {
                    name: s.name.clone(),
                    rgb: parse_hex_rgb(&s.color)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Anonymous listed map; slots are named by their unit id.
    pub fn listed(colors: Vec<Rgb>) -> Self {
        let entries = colors
            .into_iter()
            .enumerate()
            .map(|(i, rgb)| ColorEntry {
                name: (i + 1).to_string(),
                rgb,
            })
            .collect();
        Self { entries }
    }

    /// Number of palette slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the palette is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Slots in order.
    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    /// Palette slot of a surface name.
    pub fn slot_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    /// Color of a surface name.
    pub fn color_of(&self, name: &str) -> Option<Rgb> {
        self.slot_of(name).map(|i| self.entries[i].rgb)
    }

    /// Color and name for a rock-unit id (1-based).
    pub fn unit(&self, id: u32) -> Option<&ColorEntry> {
        (id as usize).checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Color for a data value through `norm`.
    ///
    /// The normalized value in `[0, 1]` picks slot `floor(t * len)`;
    /// out-of-range values clamp to the first or last slot.
    pub fn map(&self, value: f64, norm: &Normalize) -> Option<Rgb> {
        if self.entries.is_empty() || value.is_nan() {
            return None;
        }
        let n = self.entries.len();
        let t = norm.apply(value);
        let slot = (t * n as f64).floor().clamp(0.0, (n - 1) as f64) as usize;
        Some(self.entries[slot].rgb)
    }
}

/// Linear normalization of values into `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalize {
    /// Value mapped to 0.
    pub vmin: f64,
    /// Value mapped to 1.
    pub vmax: f64,
}

impl Normalize {
    /// Create a normalization range.
    pub fn new(vmin: f64, vmax: f64) -> Self {
        Self { vmin, vmax }
    }

    /// `[0.5, n + 0.5]`: centers unit ids `1..=n` on one swatch each.
    pub fn for_palette(n: usize) -> Self {
        Self::new(0.5, n as f64 + 0.5)
    }

    /// Normalize a value. A zero-width range maps everything to 0.
    pub fn apply(&self, value: f64) -> f64 {
        let span = self.vmax - self.vmin;
        if span == 0.0 {
            return 0.0;
        }
        (value - self.vmin) / span
    }
}

/// Parse `#RRGGBB` (leading `#` optional) into an sRGB triplet.
pub fn parse_hex_rgb(s: &str) -> Result<Rgb> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(PlotError::InvalidColor(s.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| PlotError::InvalidColor(s.to_string()))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

/// The "autumn" ramp: red at 0 through yellow at 1.
pub fn autumn(t: f64) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    [255, (t * 255.0).round() as u8, 0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_model::Surface;

    fn surfaces() -> SurfaceTable {
        SurfaceTable::new(vec![
            Surface::new("basement", "#015482"),
            Surface::new("sandstone", "#9F0052"),
            Surface::new("shale", "#ffbe00"),
        ])
    }

    #[test]
    fn test_palette_matches_surface_count() {
        let cmap = ColorMap::from_surfaces(&surfaces()).unwrap();
        assert_eq!(cmap.len(), 3);
        assert_eq!(cmap.color_of("sandstone"), Some([0x9f, 0x00, 0x52]));
        assert_eq!(cmap.slot_of("shale"), Some(2));
    }

    #[test]
    fn test_unit_ids_hit_their_own_swatch() {
        let cmap = ColorMap::from_surfaces(&surfaces()).unwrap();
        let norm = Normalize::for_palette(cmap.len());
        assert_eq!(norm, Normalize::new(0.5, 3.5));
        for id in 1..=3u32 {
            let expected = cmap.unit(id).unwrap().rgb;
            assert_eq!(cmap.map(id as f64, &norm), Some(expected));
        }
    }

    #[test]
    fn test_out_of_range_values_clamp() {
        let cmap = ColorMap::listed(vec![[0, 0, 0], [255, 255, 255]]);
        let norm = Normalize::for_palette(2);
        assert_eq!(cmap.map(-10.0, &norm), Some([0, 0, 0]));
        assert_eq!(cmap.map(99.0, &norm), Some([255, 255, 255]));
        assert_eq!(cmap.map(f64::NAN, &norm), None);
    }

    #[test]
    fn test_unit_zero_has_no_color() {
        let cmap = ColorMap::listed(vec![[1, 2, 3]]);
        assert!(cmap.unit(0).is_none());
        assert_eq!(cmap.unit(1).unwrap().name, "1");
    }

    #[test]
    fn test_bad_color_rejected() {
        let table = SurfaceTable::new(vec![Surface::new("a", "#12345")]);
        let err = ColorMap::from_surfaces(&table).unwrap_err();
        assert!(matches!(err, PlotError::InvalidColor(_)));
        assert!(parse_hex_rgb("#GG0000").is_err());
    }

    #[test]
    fn test_autumn_endpoints() {
        assert_eq!(autumn(0.0), [255, 0, 0]);
        assert_eq!(autumn(1.0), [255, 255, 0]);
        assert_eq!(autumn(2.0), [255, 255, 0]);
    }
}
