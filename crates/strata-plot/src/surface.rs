//! Drawing surfaces: the seam between the plotter and a rendering backend.
//!
//! [`DrawingSurface`] is everything the plotter needs from a plot axes.
//! [`Axes`] records those calls in memory so they can be inspected or
//! rasterized, and [`Figure`] arranges several of them in a grid.

use crate::types::{
    ContourLayer, Extent2D, ImageLayer, Layer, LegendEntry, QuiverLayer, ScatterLayer, Ticks,
};

/// A 2D plot axes the plotter can configure and draw on.
pub trait DrawingSurface {
    /// Set the axes title.
    fn set_title(&mut self, title: &str);
    /// Set the horizontal axis label.
    fn set_xlabel(&mut self, label: &str);
    /// Set the vertical axis label.
    fn set_ylabel(&mut self, label: &str);
    /// Number of tick labels currently on the horizontal axis.
    fn x_tick_label_count(&self) -> usize;
    /// Fix horizontal tick positions and their labels.
    fn set_x_ticks(&mut self, positions: Vec<f64>, labels: Vec<String>);
    /// Set horizontal limits (left, right).
    fn set_xlim(&mut self, left: f64, right: f64);
    /// Set vertical limits (bottom, top).
    fn set_ylim(&mut self, bottom: f64, top: f64);
    /// Current horizontal limits.
    fn xlim(&self) -> (f64, f64);
    /// Current vertical limits.
    fn ylim(&self) -> (f64, f64);
    /// Flip the vertical axis direction.
    fn invert_yaxis(&mut self);
    /// Add an image layer.
    fn add_image(&mut self, layer: ImageLayer);
    /// Add a contour layer.
    fn add_contours(&mut self, layer: ContourLayer);
    /// Add a scatter layer.
    fn add_scatter(&mut self, layer: ScatterLayer);
    /// Add a quiver layer.
    fn add_quiver(&mut self, layer: QuiverLayer);
    /// Replace the legend.
    fn set_legend(&mut self, entries: Vec<LegendEntry>);

    /// Current limits as an extent.
    fn limits(&self) -> Extent2D {
        let (x0, x1) = self.xlim();
        let (y0, y1) = self.ylim();
        Extent2D::new(x0, x1, y0, y1)
    }
}

/// In-memory axes recording every configuration and layer.
#[derive(Debug, Clone)]
pub struct Axes {
    /// Title text.
    pub title: String,
    /// Horizontal axis label.
    pub xlabel: String,
    /// Vertical axis label.
    pub ylabel: String,
    /// Horizontal ticks.
    pub x_ticks: Ticks,
    /// Horizontal limits.
    pub xlim: (f64, f64),
    /// Vertical limits.
    pub ylim: (f64, f64),
    /// Layers in insertion order.
    pub layers: Vec<Layer>,
    /// Legend rows.
    pub legend: Vec<LegendEntry>,
}

impl Axes {
    /// Fresh axes over the unit square with `auto_ticks` automatic tick labels.
    pub fn new(auto_ticks: usize) -> Self {
        Self {
            title: String::new(),
            xlabel: String::new(),
            ylabel: String::new(),
            x_ticks: Ticks::Auto(auto_ticks),
            xlim: (0.0, 1.0),
            ylim: (0.0, 1.0),
            layers: Vec::new(),
            legend: Vec::new(),
        }
    }

    /// Layers sorted by drawing order (stable for equal z-order).
    pub fn layers_in_draw_order(&self) -> Vec<&Layer> {
        let mut layers: Vec<&Layer> = self.layers.iter().collect();
        layers.sort_by_key(|l| l.z_order());
        layers
    }

    /// Whether the vertical axis currently runs downward.
    pub fn is_y_inverted(&self) -> bool {
        self.ylim.1 < self.ylim.0
    }

    /// Image layers.
    pub fn images(&self) -> impl Iterator<Item = &ImageLayer> {
        self.layers.iter().filter_map(|l| match l {
            Layer::Image(i) => Some(i),
            _ => None,
        })
    }

    /// Contour layers.
    pub fn contours(&self) -> impl Iterator<Item = &ContourLayer> {
        self.layers.iter().filter_map(|l| match l {
            Layer::Contours(c) => Some(c),
            _ => None,
        })
    }

    /// Scatter layers.
    pub fn scatters(&self) -> impl Iterator<Item = &ScatterLayer> {
        self.layers.iter().filter_map(|l| match l {
            Layer::Scatter(s) => Some(s),
            _ => None,
        })
    }

    /// Quiver layers.
    pub fn quivers(&self) -> impl Iterator<Item = &QuiverLayer> {
        self.layers.iter().filter_map(|l| match l {
            Layer::Quiver(q) => Some(q),
            _ => None,
        })
    }
}

impl Default for Axes {
    fn default() -> Self {
        Self::new(6)
    }
}

impl DrawingSurface for Axes {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_xlabel(&mut self, label: &str) {
        self.xlabel = label.to_string();
    }

    fn set_ylabel(&mut self, label: &str) {
        self.ylabel = label.to_string();
    }

    fn x_tick_label_count(&self) -> usize {
        self.x_ticks.label_count()
    }

    fn set_x_ticks(&mut self, positions: Vec<f64>, labels: Vec<String>) {
        self.x_ticks = Ticks::Fixed { positions, labels };
    }

    fn set_xlim(&mut self, left: f64, right: f64) {
        self.xlim = (left, right);
    }

    fn set_ylim(&mut self, bottom: f64, top: f64) {
        self.ylim = (bottom, top);
    }

    fn xlim(&self) -> (f64, f64) {
        self.xlim
    }

    fn ylim(&self) -> (f64, f64) {
        self.ylim
    }

    fn invert_yaxis(&mut self) {
        self.ylim = (self.ylim.1, self.ylim.0);
    }

    fn add_image(&mut self, layer: ImageLayer) {
        self.layers.push(Layer::Image(layer));
    }

    fn add_contours(&mut self, layer: ContourLayer) {
        self.layers.push(Layer::Contours(layer));
    }

    fn add_scatter(&mut self, layer: ScatterLayer) {
        self.layers.push(Layer::Scatter(layer));
    }

    fn add_quiver(&mut self, layer: QuiverLayer) {
        self.layers.push(Layer::Quiver(layer));
    }

    fn set_legend(&mut self, entries: Vec<LegendEntry>) {
        self.legend = entries;
    }
}

/// A grid of subplots.
#[derive(Debug, Clone)]
pub struct Figure {
    rows: usize,
    cols: usize,
    auto_ticks: usize,
    cells: Vec<Option<Axes>>,
}

impl Figure {
    /// Empty figure with a `rows x cols` subplot grid.
    pub fn new(rows: usize, cols: usize, auto_ticks: usize) -> Self {
        Self {
            rows,
            cols,
            auto_ticks,
            cells: vec![None; rows * cols],
        }
    }

    /// Grid shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Axes at grid cell `(row, col)`, created on first use.
    ///
    /// Returns `None` outside the grid.
    pub fn subplot(&mut self, row: usize, col: usize) -> Option<&mut Axes> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let auto_ticks = self.auto_ticks;
        let cell = &mut self.cells[row * self.cols + col];
        Some(cell.get_or_insert_with(|| Axes::new(auto_ticks)))
    }

    /// Existing axes at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<&Axes> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells[row * self.cols + col].as_ref()
    }

    /// Created subplots with their grid positions.
    pub fn subplots(&self) -> impl Iterator<Item = ((usize, usize), &Axes)> {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, c)| c.as_ref().map(|a| ((i / cols, i % cols), a)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_swaps_limits() {
        let mut ax = Axes::default();
        ax.set_ylim(0.0, 50.0);
        ax.invert_yaxis();
        assert_eq!(ax.ylim(), (50.0, 0.0));
        assert!(ax.is_y_inverted());
        assert_eq!(ax.limits(), Extent2D::new(0.0, 1.0, 50.0, 0.0));
    }

    #[test]
    fn test_fixed_ticks_replace_auto() {
        let mut ax = Axes::new(6);
        assert_eq!(ax.x_tick_label_count(), 6);
        ax.set_x_ticks(vec![0.0, 10.0], vec!["a".into(), "b".into()]);
        assert_eq!(ax.x_tick_label_count(), 2);
    }

    #[test]
    fn test_figure_subplots() {
        let mut fig = Figure::new(3, 2, 6);
        assert!(fig.subplot(3, 0).is_none());
        fig.subplot(1, 1).unwrap().set_title("a");
        fig.subplot(0, 0).unwrap().set_title("b");
        let titles: Vec<_> = fig.subplots().map(|(pos, a)| (pos, a.title.clone())).collect();
        assert_eq!(titles, vec![((0, 0), "b".to_string()), ((1, 1), "a".to_string())]);
        assert!(fig.get(2, 1).is_none());
    }
}
