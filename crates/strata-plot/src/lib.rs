#![warn(missing_docs)]

//! 2D cross-section plotting for solved geological models.
//!
//! This crate draws what a potential-field solver produced onto 2D axes:
//!
//! - **Lithology**: rock-unit ids as a discrete-color image
//! - **Scalar fields**: iso-lines of the interpolated potential field
//! - **Observations**: interface points and orientation arrows, projected
//!   onto the plotted plane
//!
//! Plots can be taken along named sections, across axis-aligned cell
//! slices of the regular grid, or over the topography (geological map).
//! Drawing goes through the [`DrawingSurface`] trait; [`Axes`] records the
//! calls in memory and [`raster`] turns them into PNG images.
//!
//! # Example
//!
//! ```ignore
//! use strata_plot::{Axes, Selector, SectionPlotter};
//!
//! let plotter = SectionPlotter::new(&model)?;
//! let selector = Selector::section("section_1");
//! let mut ax = Axes::default();
//! plotter.configure_axis(&mut ax, &selector, 1.0)?;
//! plotter.paint_lithology(&mut ax, &selector)?;
//! plotter.paint_observations(&mut ax, &selector)?;
//! ```

pub mod colormap;
pub mod contour;
pub mod error;
pub mod plotter;
pub mod raster;
pub mod section;
pub mod settings;
pub mod slice;
pub mod surface;
pub mod types;

pub use colormap::{autumn, parse_hex_rgb, ColorEntry, ColorMap, Normalize};
pub use contour::{contour_levels, Isoline};
pub use error::{PlotError, Result};
pub use plotter::{AxisFrame, ProjectedObservations, SectionPlotter, Selector, TOPOGRAPHY};
pub use raster::{render_axes, render_figure, save_png, Viewport};
pub use section::{clamp_tick_request, section_labels, LineKind, SectionLabels};
pub use settings::PlotSettings;
pub use slice::{reshape_block, slice_recipe, Axis, SliceIndex, SliceRecipe};
pub use surface::{Axes, DrawingSurface, Figure};
pub use types::{
    ContourLayer, ContourLine, Extent2D, ImageLayer, Layer, LegendEntry, Point2D, QuiverLayer, Rgb,
    ScatterLayer, Ticks,
};

#[cfg(test)]
mod tests {
    use super::*;
    use strata_model::{
        GeoModel, Grid, Orientation, RegularGrid, Section, SectionSolution, SectionTable,
        Solutions, Surface, SurfacePoint, SurfaceTable,
    };

    fn model() -> GeoModel {
        let grid = Grid::new(RegularGrid::new([4, 3, 2], [0.0, 40.0, 0.0, 30.0, 0.0, 20.0]))
            .with_sections(SectionTable::new(vec![Section::new(
                "s1",
                [0.0, 15.0],
                [40.0, 15.0],
                [4, 2],
            )]));
        let surfaces = SurfaceTable::new(vec![
            Surface::new("top", "#ff0000"),
            Surface::new("base", "#0000ff"),
        ]);
        // section buffer is (along, depth) = (4, 2): lower half unit 2
        let solutions = Solutions {
            lith_block: (0..24).map(|i| if i % 2 == 0 { 2.0 } else { 1.0 }).collect(),
            scalar_field_matrix: vec![(0..24).map(f64::from).collect()],
            sections: Some(SectionSolution {
                lith: vec![2.0, 1.0, 2.0, 1.0, 2.0, 1.0, 2.0, 1.0],
                scalar_fields: vec![vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0]],
            }),
            geological_map: None,
        };
        GeoModel::new(grid, surfaces)
            .with_solutions(solutions)
            .with_data(
                vec![SurfacePoint {
                    id: 1,
                    surface: "top".into(),
                    x: 20.0,
                    y: 5.0,
                    z: 12.0,
                }],
                vec![Orientation {
                    id: 1,
                    surface: "top".into(),
                    x: 10.0,
                    y: 25.0,
                    z: 8.0,
                    g_x: 0.0,
                    g_y: 0.5,
                    g_z: 1.0,
                }],
            )
    }

    #[test]
    fn test_section_workflow() {
        let model = model();
        let plotter = SectionPlotter::new(&model).unwrap();
        let selector = Selector::section("s1");
        let mut ax = Axes::default();

        let frame = plotter.configure_axis(&mut ax, &selector, 1.0).unwrap();
        assert_eq!(frame.extent, Extent2D::new(0.0, 40.0, 0.0, 20.0));
        assert_eq!(frame.aspect, 0.5);
        assert_eq!(ax.title, "s1");
        assert_eq!(ax.xlabel, "X");
        assert_eq!(ax.ylabel, "Z");
        match &ax.x_ticks {
            Ticks::Fixed { positions, labels } => {
                assert_eq!(labels, &["0", "13", "26", "40"]);
                assert_eq!(positions.len(), labels.len());
                assert_eq!(positions.last().copied(), Some(40.0));
            }
            other => panic!("expected fixed ticks, got {other:?}"),
        }

        plotter.paint_lithology(&mut ax, &selector).unwrap();
        plotter.paint_scalar_field(&mut ax, &selector, 0).unwrap();
        let obs = plotter.paint_observations(&mut ax, &selector).unwrap();

        let image = ax.images().next().unwrap();
        assert_eq!(image.values.dim(), (2, 4));
        assert_eq!(image.values.row(0).to_vec(), vec![2.0; 4]);
        assert_eq!(image.z_order, plotter::LITHOLOGY_Z_ORDER);

        assert_eq!(obs.points, vec![Point2D::new(20.0, 12.0)]);
        assert_eq!(obs.orientations, vec![Point2D::new(10.0, 8.0)]);
        assert_eq!(ax.legend.len(), 1);
        assert_eq!(ax.legend[0].label, "top");

        let order: Vec<i32> = ax.layers_in_draw_order().iter().map(|l| l.z_order()).collect();
        assert_eq!(order.first(), Some(&plotter::LITHOLOGY_Z_ORDER));
        assert_eq!(order.last(), Some(&plotter::CONTOUR_Z_ORDER));
    }

    #[test]
    fn test_cell_slice_workflow() {
        let model = model();
        let plotter = SectionPlotter::new(&model).unwrap();
        let selector = Selector::cell(Axis::Y, 1);
        let mut ax = Axes::default();

        let frame = plotter.configure_axis(&mut ax, &selector, 2.0).unwrap();
        assert_eq!(frame.extent.to_array(), [0.0, 40.0, 0.0, 20.0]);
        assert_eq!(frame.aspect, 0.25);
        assert_eq!((frame.xlabel.as_str(), frame.ylabel.as_str()), ("X", "Z"));

        plotter.paint_lithology(&mut ax, &selector).unwrap();
        let image = ax.images().next().unwrap();
        // rows follow Z (2), columns follow X (4)
        assert_eq!(image.values.dim(), (2, 4));

        let obs = plotter.paint_observations(&mut ax, &selector).unwrap();
        assert_eq!(obs.points, vec![Point2D::new(20.0, 12.0)]);
        let quiver = ax.quivers().next().unwrap();
        assert_eq!(quiver.vectors, vec![Point2D::new(0.0, 1.0)]);
    }

    #[test]
    fn test_topography_without_map() {
        let model = model();
        let plotter = SectionPlotter::new(&model).unwrap();
        let mut ax = Axes::default();

        let frame = plotter
            .configure_axis(&mut ax, &Selector::Topography, 1.0)
            .unwrap();
        assert_eq!(frame.extent.to_array(), [0.0, 40.0, 0.0, 30.0]);
        assert!(matches!(
            plotter.paint_lithology(&mut ax, &Selector::Topography),
            Err(PlotError::TopographyNotComputed)
        ));
        assert!(matches!(
            plotter.paint_scalar_field(&mut ax, &Selector::Topography, 0),
            Err(PlotError::TopographyNotComputed)
        ));
    }
}
