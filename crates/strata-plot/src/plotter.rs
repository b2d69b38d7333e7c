//! The section plotter: configures axes and paints lithology, scalar-field
//! contours and observations of a solved model onto them.

use std::collections::BTreeSet;

use ndarray::{Array2, ArrayView2};
use strata_math::{linspace, Point2};
use strata_model::GeoModel;
use tracing::debug;

use crate::colormap::{autumn, ColorMap, Normalize};
use crate::contour::{self, contour_levels, value_range};
use crate::error::{PlotError, Result};
use crate::section::{section_labels, section_projector, SectionLabels};
use crate::settings::PlotSettings;
use crate::slice::{reshape_block, slice_recipe, Axis, SliceRecipe};
use crate::surface::{DrawingSurface, Figure};
use crate::types::{
    ContourLayer, ContourLine, Extent2D, ImageLayer, LegendEntry, Point2D, QuiverLayer, Rgb,
    ScatterLayer,
};

/// Section name that selects the geological map instead of a cross-section.
pub const TOPOGRAPHY: &str = "topography";

/// Z-order of the lithology image (behind everything else).
pub const LITHOLOGY_Z_ORDER: i32 = -100;
/// Z-order of scalar-field contours.
pub const CONTOUR_Z_ORDER: i32 = 8;
/// Z-order of observation markers.
pub const SCATTER_Z_ORDER: i32 = 2;
/// Z-order of orientation arrows.
pub const QUIVER_Z_ORDER: i32 = 3;

/// Marker color for points whose unit id has no palette slot.
const UNMAPPED_UNIT: Rgb = [128, 128, 128];

/// What part of the model a plot shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selector<'b> {
    /// The geological map on the topography grid.
    Topography,
    /// A named cross-section. The name `"topography"` draws the
    /// geological map instead.
    Section(&'b str),
    /// An axis-aligned slice of the solved blocks.
    Cell {
        /// Sliced axis.
        axis: Axis,
        /// Cell index along `axis`.
        cell_number: usize,
    },
    /// An axis-aligned slice of a caller-supplied block.
    Block {
        /// Sliced axis.
        axis: Axis,
        /// Cell index along `axis`; `None` uses the configured default.
        cell_number: Option<usize>,
        /// Flattened block over the regular grid.
        block: &'b [f64],
    },
}

impl<'b> Selector<'b> {
    /// Select a section by name; `"topography"` selects the geological map.
    pub fn section(name: &'b str) -> Self {
        if name == TOPOGRAPHY {
            Selector::Topography
        } else {
            Selector::Section(name)
        }
    }

    /// The same selection with a section named `"topography"` turned into
    /// [`Selector::Topography`].
    pub fn resolved(self) -> Self {
        match self {
            Selector::Section(name) => Self::section(name),
            other => other,
        }
    }

    /// Select a cell slice.
    pub fn cell(axis: Axis, cell_number: usize) -> Self {
        Selector::Cell { axis, cell_number }
    }

    /// Selector for axis configuration: exactly one of `section` and
    /// `cell_number` must be given.
    pub fn for_frame(
        section: Option<&'b str>,
        cell_number: Option<usize>,
        axis: Axis,
    ) -> Result<Self> {
        match (section, cell_number) {
            (Some(name), None) => Ok(Self::section(name)),
            (None, Some(cell)) => Ok(Self::cell(axis, cell)),
            _ => Err(PlotError::AmbiguousOrMissingSelector),
        }
    }

    /// Selector for painting a layer.
    ///
    /// A section name wins over a cell number or block; a block without a
    /// cell number is sliced at the configured default cell.
    pub fn for_layer(
        section: Option<&'b str>,
        cell_number: Option<usize>,
        axis: Axis,
        block: Option<&'b [f64]>,
    ) -> Result<Self> {
        match (section, cell_number, block) {
            (Some(name), _, _) => Ok(Self::section(name)),
            (None, cell_number, Some(block)) => Ok(Selector::Block {
                axis,
                cell_number,
                block,
            }),
            (None, Some(cell), None) => Ok(Self::cell(axis, cell)),
            (None, None, None) => Err(PlotError::NoSelectorProvided),
        }
    }
}

/// Result of configuring an axes.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisFrame {
    /// Data extent the limits were set to.
    pub extent: Extent2D,
    /// `(vertical span / horizontal span) / vertical exaggeration`.
    ///
    /// Reported only; the axes aspect is left to the backend.
    pub aspect: f64,
    /// Horizontal axis label.
    pub xlabel: String,
    /// Vertical axis label.
    pub ylabel: String,
}

/// Observation coordinates as drawn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectedObservations {
    /// Surface points in plot coordinates, in table order.
    pub points: Vec<Point2D>,
    /// Orientation anchors in plot coordinates, in table order.
    pub orientations: Vec<Point2D>,
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Lithology,
    Scalar(usize),
}

/// Draws cross-sections of one model.
#[derive(Debug, Clone)]
pub struct SectionPlotter<'a> {
    model: &'a GeoModel,
    color_map: ColorMap,
    norm: Option<Normalize>,
    settings: PlotSettings,
}

impl<'a> SectionPlotter<'a> {
    /// Plotter with a color map derived from the model's surfaces table.
    pub fn new(model: &'a GeoModel) -> Result<Self> {
        let color_map = ColorMap::from_surfaces(&model.surfaces)?;
        Ok(Self {
            model,
            color_map,
            norm: None,
            settings: PlotSettings::default(),
        })
    }

    /// Use an explicit color map.
    ///
    /// Unless [`with_norm`](Self::with_norm) sets one, the normalization
    /// follows the palette length of this map.
    pub fn with_color_map(mut self, color_map: ColorMap) -> Self {
        self.color_map = color_map;
        self
    }

    /// Use an explicit normalization.
    pub fn with_norm(mut self, norm: Normalize) -> Self {
        self.norm = Some(norm);
        self
    }

    /// Use validated settings.
    pub fn with_settings(mut self, settings: PlotSettings) -> Result<Self> {
        settings.validate()?;
        self.settings = settings;
        Ok(self)
    }

    /// The model being drawn.
    pub fn model(&self) -> &GeoModel {
        self.model
    }

    /// Color map used for lithology and observations.
    pub fn color_map(&self) -> &ColorMap {
        &self.color_map
    }

    /// Normalization used for lithology: the explicit one, or
    /// `[0.5, n + 0.5]` over the active palette.
    pub fn norm(&self) -> Normalize {
        self.norm.unwrap_or_else(|| Normalize::for_palette(self.color_map.len()))
    }

    /// Active settings.
    pub fn settings(&self) -> &PlotSettings {
        &self.settings
    }

    /// An empty figure with the configured subplot grid.
    pub fn new_figure(&self) -> Figure {
        let [rows, cols] = self.settings.figure_grid;
        Figure::new(rows, cols, self.settings.auto_tick_count)
    }

    /// Slice recipe across `axis` at `cell_number`.
    pub fn compute_slice(&self, axis: Axis, cell_number: usize) -> SliceRecipe {
        slice_recipe(&self.model.grid.regular, axis, cell_number)
    }

    /// Tick labels along a named section.
    pub fn compute_section_labels(&self, section: &str, requested: i64) -> Result<SectionLabels> {
        let section = self.model.grid.sections.get(section)?;
        Ok(section_labels(section, requested))
    }

    /// Set title, labels, ticks and limits of `ax` for `selector`.
    pub fn configure_axis<S: DrawingSurface + ?Sized>(
        &self,
        ax: &mut S,
        selector: &Selector<'_>,
        vertical_exaggeration: f64,
    ) -> Result<AxisFrame> {
        let selector = &selector.resolved();
        let grid = &self.model.grid.regular;
        let (zmin, zmax) = grid.axis_bounds(2);

        let (extent, xlabel, ylabel) = match *selector {
            Selector::Topography => {
                ax.set_title("Geological map");
                (Extent2D::from(grid.planar_extent()), "X".to_string(), "Y".to_string())
            }
            Selector::Section(name) => {
                let section = self.model.grid.sections.get(name)?;
                let extent = Extent2D::new(0.0, section.dist, zmin, zmax);

                let requested = ax.x_tick_label_count() as i64 - 2;
                let SectionLabels { labels, axis_name } = section_labels(section, requested);
                let positions = linspace(0.0, section.dist, labels.len());
                ax.set_x_ticks(positions, labels);
                ax.set_title(name);
                (extent, axis_name, "Z".to_string())
            }
            Selector::Cell { axis, cell_number } => {
                let recipe = self.compute_slice(axis, cell_number);
                (recipe.extent, recipe.in_plane.0.to_string(), recipe.in_plane.1.to_string())
            }
            Selector::Block {
                axis, cell_number, ..
            } => {
                let cell = cell_number.unwrap_or(self.settings.default_cell_number);
                let recipe = self.compute_slice(axis, cell);
                (recipe.extent, recipe.in_plane.0.to_string(), recipe.in_plane.1.to_string())
            }
        };

        ax.set_xlabel(&xlabel);
        ax.set_ylabel(&ylabel);

        if extent.is_y_inverted() {
            ax.invert_yaxis();
        }
        let aspect = (extent.height() / extent.width()) / vertical_exaggeration;
        debug!(aspect, vertical_exaggeration, "axes aspect computed, not applied");

        ax.set_xlim(extent.x0, extent.x1);
        ax.set_ylim(extent.y0, extent.y1);

        Ok(AxisFrame {
            extent,
            aspect,
            xlabel,
            ylabel,
        })
    }

    /// Paint the lithology image for `selector` behind everything on `ax`.
    ///
    /// The image is stretched over the current limits of `ax`, so the axes
    /// should have been configured for the same selector first.
    pub fn paint_lithology<S: DrawingSurface + ?Sized>(
        &self,
        ax: &mut S,
        selector: &Selector<'_>,
    ) -> Result<()> {
        let extent = ax.limits();
        let values = self.image(&selector.resolved(), Field::Lithology)?;
        debug!(rows = values.nrows(), cols = values.ncols(), "painting lithology");

        ax.add_image(ImageLayer {
            values,
            color_map: self.color_map.clone(),
            norm: self.norm(),
            extent,
            z_order: LITHOLOGY_Z_ORDER,
        });
        Ok(())
    }

    /// Overlay contours of the scalar field of `isosurface` on `ax`.
    pub fn paint_scalar_field<S: DrawingSurface + ?Sized>(
        &self,
        ax: &mut S,
        selector: &Selector<'_>,
        isosurface: usize,
    ) -> Result<()> {
        let extent = ax.limits();
        let values = self.image(&selector.resolved(), Field::Scalar(isosurface))?;

        let layer = self.contour_layer(values.view(), &extent);
        debug!(
            levels = layer.levels.len(),
            lines = layer.lines.len(),
            isosurface,
            "painting scalar field"
        );
        ax.add_contours(layer);
        Ok(())
    }

    /// Overlay surface points and orientation arrows on `ax`.
    ///
    /// For a section, plan-view positions are projected onto the section
    /// line and replaced by their distance along it; Z is kept.
    pub fn paint_observations<S: DrawingSurface + ?Sized>(
        &self,
        ax: &mut S,
        selector: &Selector<'_>,
    ) -> Result<ProjectedObservations> {
        let points = &self.model.surface_points;
        let orientations = &self.model.orientations;

        let projected: (Vec<Point2D>, Vec<Point2D>, Vec<Point2D>) = match selector.resolved() {
            Selector::Section(name) => {
                let section = self.model.grid.sections.get(name)?;
                let projector = section_projector(section)?;
                let along = |x: f64, y: f64, z: f64| {
                    Point2D::new(projector.distance_along(&Point2::new(x, y)), z)
                };
                let gradients = orientations
                    .iter()
                    .map(|o| Point2D::new(o.g_x, o.g_z))
                    .collect::<Vec<_>>();
                (
                    points.iter().map(|p| along(p.x, p.y, p.z)).collect::<Vec<_>>(),
                    orientations.iter().map(|o| along(o.x, o.y, o.z)).collect::<Vec<_>>(),
                    gradients,
                )
            }
            Selector::Topography => (
                points.iter().map(|p| Point2D::new(p.x, p.y)).collect(),
                orientations.iter().map(|o| Point2D::new(o.x, o.y)).collect(),
                orientations.iter().map(|o| Point2D::new(o.g_x, o.g_y)).collect(),
            ),
            Selector::Cell { axis, cell_number } => self.in_plane_observations(axis, cell_number),
            Selector::Block {
                axis, cell_number, ..
            } => self.in_plane_observations(
                axis,
                cell_number.unwrap_or(self.settings.default_cell_number),
            ),
        };
        let (point_xy, orientation_xy, gradients) = projected;

        let categories: Vec<u32> = points.iter().map(|p| p.id).collect();
        let colors = categories
            .iter()
            .map(|&id| self.color_map.unit(id).map_or(UNMAPPED_UNIT, |e| e.rgb))
            .collect();
        let legend = categories
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|id| match self.color_map.unit(id) {
                Some(entry) => LegendEntry {
                    label: entry.name.clone(),
                    color: entry.rgb,
                },
                None => LegendEntry {
                    label: id.to_string(),
                    color: UNMAPPED_UNIT,
                },
            })
            .collect();

        debug!(
            points = point_xy.len(),
            orientations = orientation_xy.len(),
            "painting observations"
        );

        ax.add_scatter(ScatterLayer {
            points: point_xy.clone(),
            categories,
            colors,
            z_order: SCATTER_Z_ORDER,
        });
        ax.add_quiver(QuiverLayer {
            origins: orientation_xy.clone(),
            vectors: gradients,
            scale: self.settings.quiver_scale,
            z_order: QUIVER_Z_ORDER,
        });
        ax.set_legend(legend);

        Ok(ProjectedObservations {
            points: point_xy,
            orientations: orientation_xy,
        })
    }

    /// Observations in the plane of an axis-aligned slice.
    fn in_plane_observations(
        &self,
        axis: Axis,
        cell_number: usize,
    ) -> (Vec<Point2D>, Vec<Point2D>, Vec<Point2D>) {
        let recipe = self.compute_slice(axis, cell_number);
        let (h, v) = recipe.in_plane;
        let (gh, gv) = recipe.gradients;
        let coord = |value: Option<f64>| value.unwrap_or(f64::NAN);

        let points = self
            .model
            .surface_points
            .iter()
            .map(|p| Point2D::new(coord(p.coordinate(h)), coord(p.coordinate(v))))
            .collect();
        let orientations = self
            .model
            .orientations
            .iter()
            .map(|o| Point2D::new(coord(o.coordinate(h)), coord(o.coordinate(v))))
            .collect();
        let gradients = self
            .model
            .orientations
            .iter()
            .map(|o| Point2D::new(coord(o.gradient(gh)), coord(o.gradient(gv))))
            .collect();
        (points, orientations, gradients)
    }

    /// The 2D image `selector` picks out of `field`, row 0 at the bottom.
    fn image(&self, selector: &Selector<'_>, field: Field) -> Result<Array2<f64>> {
        let solutions = &self.model.solutions;
        match (*selector, field) {
            (Selector::Topography, Field::Lithology) => {
                let map = solutions
                    .geological_map
                    .as_ref()
                    .ok_or(PlotError::TopographyNotComputed)?;
                let topography = self
                    .model
                    .grid
                    .topography
                    .as_ref()
                    .ok_or(PlotError::TopographyNotComputed)?;
                debug!("image source: geological map");
                Ok(Array2::from_shape_vec(topography.planar_shape(), map.clone())?)
            }
            (Selector::Topography, Field::Scalar(_)) => Err(PlotError::TopographyNotComputed),
            (Selector::Section(name), field) => {
                let solved = solutions
                    .solved_sections()
                    .ok_or(PlotError::SectionsNotSolved)?;
                let buffer = match field {
                    Field::Lithology => solved.lith.as_slice(),
                    Field::Scalar(i) => {
                        indexed(&solved.scalar_fields, i, "section scalar fields")?
                    }
                };
                debug!(section = name, "image source: section buffer");
                self.section_image(name, buffer)
            }
            (Selector::Cell { axis, cell_number }, field) => {
                let block = match field {
                    Field::Lithology => solutions.lith_block.as_slice(),
                    Field::Scalar(i) => {
                        indexed(&solutions.scalar_field_matrix, i, "scalar fields")?
                    }
                };
                debug!(%axis, cell_number, "image source: solved block");
                self.block_image(block, axis, cell_number)
            }
            (
                Selector::Block {
                    axis,
                    cell_number,
                    block,
                },
                _,
            ) => {
                let cell = cell_number.unwrap_or(self.settings.default_cell_number);
                debug!(%axis, cell, "image source: caller block");
                self.block_image(block, axis, cell)
            }
        }
    }

    /// Cut a section's slot out of a flattened per-section buffer.
    fn section_image(&self, name: &str, buffer: &[f64]) -> Result<Array2<f64>> {
        let sections = &self.model.grid.sections;
        let [along, depth] = sections.get(name)?.resolution;
        let slot = sections.slot(name, buffer)?;
        let view = ArrayView2::from_shape((along, depth), slot)?;
        Ok(view.t().to_owned())
    }

    fn block_image(&self, block: &[f64], axis: Axis, cell_number: usize) -> Result<Array2<f64>> {
        let view = reshape_block(block, &self.model.grid.regular)?;
        self.compute_slice(axis, cell_number).apply(view)
    }

    fn contour_layer(&self, image: ArrayView2<'_, f64>, extent: &Extent2D) -> ContourLayer {
        let levels = value_range(image)
            .map(|(lo, hi)| contour_levels(lo, hi, self.settings.contour_level_count))
            .unwrap_or_default();

        let (first, last) = match (levels.first(), levels.last()) {
            (Some(&a), Some(&b)) => (a, b),
            _ => (0.0, 0.0),
        };
        let span = last - first;
        let shape = image.dim();

        let lines = contour::trace(image, &levels)
            .into_iter()
            .map(|iso| {
                let t = if span > 0.0 { (iso.level - first) / span } else { 0.0 };
                ContourLine {
                    level: iso.level,
                    points: iso
                        .points
                        .iter()
                        .map(|p| contour::to_extent(p, shape, extent))
                        .collect(),
                    is_closed: iso.is_closed,
                    color: autumn(t),
                }
            })
            .collect();

        ContourLayer {
            levels,
            lines,
            z_order: CONTOUR_Z_ORDER,
        }
    }
}

fn indexed<'v>(blocks: &'v [Vec<f64>], index: usize, what: &str) -> Result<&'v [f64]> {
    blocks
        .get(index)
        .map(Vec::as_slice)
        .ok_or_else(|| PlotError::IndexOutOfRange {
            what: what.to_string(),
            index,
            len: blocks.len(),
        })
}
