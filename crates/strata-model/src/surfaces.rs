//! Modeled surfaces and the raw survey tables attached to them.

use serde::{Deserialize, Serialize};

/// A modeled geological surface with its display color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    /// Surface name.
    pub name: String,
    /// Display color as `#RRGGBB`.
    pub color: String,
}

impl Surface {
    /// Create a surface.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Ordered surfaces table.
///
/// The position of a surface is its palette slot; the rock-unit id written
/// into lithology blocks is `slot + 1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceTable {
    surfaces: Vec<Surface>,
}

impl SurfaceTable {
    /// Build a table from surfaces in unit-id order.
    pub fn new(surfaces: Vec<Surface>) -> Self {
        Self { surfaces }
    }

    /// Iterate surfaces in unit-id order.
    pub fn iter(&self) -> impl Iterator<Item = &Surface> {
        self.surfaces.iter()
    }

    /// Number of surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// True when no surfaces are defined.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Rock-unit id of the named surface.
    pub fn unit_id(&self, name: &str) -> Option<u32> {
        self.surfaces
            .iter()
            .position(|s| s.name == name)
            .map(|slot| slot as u32 + 1)
    }
}

impl FromIterator<Surface> for SurfaceTable {
    fn from_iter<I: IntoIterator<Item = Surface>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// An interface point measured on a surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoint {
    /// Rock-unit id of the surface the point belongs to.
    pub id: u32,
    /// Surface name.
    pub surface: String,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

/// An orientation measurement: a position plus the surface gradient there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    /// Rock-unit id of the surface the measurement belongs to.
    pub id: u32,
    /// Surface name.
    pub surface: String,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
    /// Gradient X component.
    pub g_x: f64,
    /// Gradient Y component.
    pub g_y: f64,
    /// Gradient Z component.
    pub g_z: f64,
}

impl Orientation {
    /// Named gradient component (`"G_x"`, `"G_y"` or `"G_z"`).
    pub fn gradient(&self, component: &str) -> Option<f64> {
        match component {
            "G_x" => Some(self.g_x),
            "G_y" => Some(self.g_y),
            "G_z" => Some(self.g_z),
            _ => None,
        }
    }

    /// Named coordinate (`"X"`, `"Y"` or `"Z"`).
    pub fn coordinate(&self, axis: &str) -> Option<f64> {
        coordinate(self.x, self.y, self.z, axis)
    }
}

impl SurfacePoint {
    /// Named coordinate (`"X"`, `"Y"` or `"Z"`).
    pub fn coordinate(&self, axis: &str) -> Option<f64> {
        coordinate(self.x, self.y, self.z, axis)
    }
}

fn coordinate(x: f64, y: f64, z: f64, axis: &str) -> Option<f64> {
    match axis {
        "X" => Some(x),
        "Y" => Some(y),
        "Z" => Some(z),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_ids_follow_table_order() {
        let t: SurfaceTable = [
            Surface::new("basement", "#015482"),
            Surface::new("sandstone", "#9f0052"),
            Surface::new("shale", "#ffbe00"),
        ]
        .into_iter()
        .collect();
        assert_eq!(t.unit_id("basement"), Some(1));
        assert_eq!(t.unit_id("shale"), Some(3));
        assert_eq!(t.unit_id("granite"), None);
    }

    #[test]
    fn test_named_components() {
        let o = Orientation {
            id: 1,
            surface: "a".into(),
            x: 1.0,
            y: 2.0,
            z: 3.0,
            g_x: 0.1,
            g_y: 0.2,
            g_z: 0.9,
        };
        assert_eq!(o.gradient("G_z"), Some(0.9));
        assert_eq!(o.gradient("G_w"), None);
        assert_eq!(o.coordinate("Y"), Some(2.0));
    }
}
