//! Plot a synthetic two-layer model with an anticline and write the
//! figure to `section_demo.png`.
//!
//! Run with `RUST_LOG=strata_plot=debug` to see what each painting step does.

use strata_model::{
    GeoModel, Grid, Orientation, RegularGrid, Section, SectionSolution, SectionTable, Solutions,
    Surface, SurfacePoint, SurfaceTable, Topography,
};
use strata_plot::{render_figure, save_png, Axis, Result, SectionPlotter, Selector};
use tracing_subscriber::EnvFilter;

const NX: usize = 40;
const NY: usize = 30;
const NZ: usize = 20;
const EXTENT: [f64; 6] = [0.0, 1000.0, 0.0, 750.0, 0.0, 500.0];

/// Potential of a fold whose crest runs along Y at x = 500.
fn potential(x: f64, _y: f64, z: f64) -> f64 {
    let crest = 300.0 - 0.0004 * (x - 500.0).powi(2);
    (z - crest) / 500.0
}

fn unit(potential: f64) -> f64 {
    if potential > 0.0 {
        1.0
    } else {
        2.0
    }
}

fn cell_center(axis: usize, i: usize, n: usize) -> f64 {
    let (lo, hi) = (EXTENT[2 * axis], EXTENT[2 * axis + 1]);
    lo + (i as f64 + 0.5) * (hi - lo) / n as f64
}

fn build_model() -> GeoModel {
    let mut scalar = Vec::with_capacity(NX * NY * NZ);
    for ix in 0..NX {
        for iy in 0..NY {
            for iz in 0..NZ {
                scalar.push(potential(
                    cell_center(0, ix, NX),
                    cell_center(1, iy, NY),
                    cell_center(2, iz, NZ),
                ));
            }
        }
    }
    let lith_block = scalar.iter().map(|&p| unit(p)).collect();

    let sections = SectionTable::new(vec![
        Section::new("across_fold", [0.0, 375.0], [1000.0, 375.0], [80, 40]),
        Section::new("oblique", [100.0, 50.0], [900.0, 700.0], [60, 40]),
    ]);

    let mut section_scalar = Vec::with_capacity(sections.total_len());
    for section in sections.iter() {
        let [along, depth] = section.resolution;
        let line =
            SectionTable::line_coordinates(&section.start_point(), &section.stop_point(), along);
        for p in &line {
            for k in 0..depth {
                let z = EXTENT[4] + (k as f64 + 0.5) * (EXTENT[5] - EXTENT[4]) / depth as f64;
                section_scalar.push(potential(p.x, p.y, z));
            }
        }
    }
    let section_lith = section_scalar.iter().map(|&p| unit(p)).collect();

    // the map sees the unit outcropping at the surface (z = 500)
    let geological_map = (0..NY * NX)
        .map(|i| unit(potential(cell_center(0, i % NX, NX), 0.0, 500.0)))
        .collect();

    let grid = Grid::new(RegularGrid::new([NX, NY, NZ], EXTENT))
        .with_topography(Topography::new(NX, NY))
        .with_sections(sections);
    let surfaces = SurfaceTable::new(vec![
        Surface::new("cover", "#ffbe00"),
        Surface::new("basement", "#015482"),
    ]);

    let points = (0..5)
        .map(|i| {
            let x = 100.0 + 200.0 * i as f64;
            SurfacePoint {
                id: 2,
                surface: "basement".into(),
                x,
                y: 375.0,
                z: 300.0 - 0.0004 * (x - 500.0).powi(2),
            }
        })
        .collect();
    let orientations = vec![Orientation {
        id: 2,
        surface: "basement".into(),
        x: 300.0,
        y: 375.0,
        z: 284.0,
        g_x: -0.16,
        g_y: 0.0,
        g_z: 1.0,
    }];

    GeoModel::new(grid, surfaces)
        .with_solutions(Solutions {
            lith_block,
            scalar_field_matrix: vec![scalar],
            sections: Some(SectionSolution {
                lith: section_lith,
                scalar_fields: vec![section_scalar],
            }),
            geological_map: Some(geological_map),
        })
        .with_data(points, orientations)
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let model = build_model();
    let plotter = SectionPlotter::new(&model)?;
    let mut figure = plotter.new_figure();

    let panels = [
        (0, 0, Selector::section("across_fold")),
        (0, 1, Selector::section("oblique")),
        (1, 0, Selector::cell(Axis::Y, NY / 2)),
        (1, 1, Selector::cell(Axis::X, NX / 4)),
        (2, 0, Selector::Topography),
    ];

    for (row, col, selector) in panels {
        let Some(ax) = figure.subplot(row, col) else {
            continue;
        };
        plotter.configure_axis(ax, &selector, 1.0)?;
        plotter.paint_lithology(ax, &selector)?;
        if selector != Selector::Topography {
            plotter.paint_scalar_field(ax, &selector, 0)?;
        }
        plotter.paint_observations(ax, &selector)?;
    }

    let image = render_figure(&figure, 320, 200, plotter.settings().marker_radius_px);
    save_png(&image, "section_demo.png")
}
