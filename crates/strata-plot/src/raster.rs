//! Rasterize recorded axes into RGB images and export them as PNG.
//!
//! Layers are painted onto a `tiny_skia` pixmap: lines and arrows are
//! stroked paths, markers are filled circles. The finished pixmap is copied
//! into an `image::RgbImage` for tiling and PNG encoding.

use std::path::Path;

use image::{imageops, Rgb, RgbImage};
use tiny_skia::{
    Color, ColorU8, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform,
};
use tracing::info;

use crate::error::Result;
use crate::surface::{Axes, Figure};
use crate::types::{ContourLayer, ImageLayer, Layer, Point2D, QuiverLayer, ScatterLayer};

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const ARROW_COLOR: [u8; 3] = [0, 0, 0];

/// Stroke width of contour lines and arrows, in pixels.
const LINE_WIDTH: f32 = 2.0;

/// Fraction of an arrow's length used for each head barb.
const ARROW_HEAD: f64 = 0.3;

/// Maps axes data coordinates onto a pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Horizontal limits (left, right).
    pub xlim: (f64, f64),
    /// Vertical limits (bottom, top).
    pub ylim: (f64, f64),
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Viewport over the current limits of `ax`.
    pub fn of(ax: &Axes, width: u32, height: u32) -> Self {
        Self {
            xlim: ax.xlim,
            ylim: ax.ylim,
            width,
            height,
        }
    }

    /// Pixel position of a data point; y grows downward.
    pub fn to_pixel(&self, p: &Point2D) -> (f64, f64) {
        let tx = (p.x - self.xlim.0) / (self.xlim.1 - self.xlim.0);
        let ty = (p.y - self.ylim.0) / (self.ylim.1 - self.ylim.0);
        (tx * self.width as f64, (1.0 - ty) * self.height as f64)
    }

    /// Data coordinates at the center of pixel `(col, row)`.
    pub fn to_data(&self, col: u32, row: u32) -> Point2D {
        let tx = (col as f64 + 0.5) / self.width as f64;
        let ty = 1.0 - (row as f64 + 0.5) / self.height as f64;
        Point2D::new(
            self.xlim.0 + tx * (self.xlim.1 - self.xlim.0),
            self.ylim.0 + ty * (self.ylim.1 - self.ylim.0),
        )
    }
}

/// Render `ax` into a `width x height` image, layers in z-order.
pub fn render_axes(ax: &Axes, width: u32, height: u32, marker_radius: u32) -> RgbImage {
    let Some(mut pixmap) = Pixmap::new(width, height) else {
        return RgbImage::from_pixel(width, height, BACKGROUND);
    };
    pixmap.fill(Color::WHITE);
    let view = Viewport::of(ax, width, height);

    for layer in ax.layers_in_draw_order() {
        match layer {
            Layer::Image(l) => paint_image(&mut pixmap, &view, l),
            Layer::Contours(l) => paint_contours(&mut pixmap, &view, l),
            Layer::Scatter(l) => paint_scatter(&mut pixmap, &view, l, marker_radius),
            Layer::Quiver(l) => paint_quiver(&mut pixmap, &view, l),
        }
    }

    RgbImage::from_fn(width, height, |x, y| {
        pixmap.pixel(x, y).map_or(BACKGROUND, |px| {
            let c = px.demultiply();
            Rgb([c.red(), c.green(), c.blue()])
        })
    })
}

/// Render every subplot of `fig` into one tiled image.
pub fn render_figure(
    fig: &Figure,
    cell_width: u32,
    cell_height: u32,
    marker_radius: u32,
) -> RgbImage {
    let (rows, cols) = fig.shape();
    let (width, height) = (cols as u32 * cell_width, rows as u32 * cell_height);
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);

    for ((row, col), ax) in fig.subplots() {
        let tile = render_axes(ax, cell_width, cell_height, marker_radius);
        let (ox, oy) = (col as i64 * cell_width as i64, row as i64 * cell_height as i64);
        imageops::replace(&mut img, &tile, ox, oy);
    }
    img
}

/// Write `img` as a PNG file.
pub fn save_png(img: &RgbImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    img.save_with_format(path, image::ImageFormat::Png)?;
    info!(path = %path.display(), width = img.width(), height = img.height(), "wrote PNG");
    Ok(())
}

fn paint_image(pixmap: &mut Pixmap, view: &Viewport, layer: &ImageLayer) {
    let (rows, cols) = layer.values.dim();
    if rows == 0 || cols == 0 {
        return;
    }
    let e = layer.extent;
    let width = view.width as usize;
    let pixels = pixmap.pixels_mut();

    for row in 0..view.height {
        for col in 0..view.width {
            let p = view.to_data(col, row);
            let u = (p.x - e.x0) / (e.x1 - e.x0);
            let v = (p.y - e.y0) / (e.y1 - e.y0);
            if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
                continue;
            }
            let c = ((u * cols as f64) as usize).min(cols - 1);
            let r = ((v * rows as f64) as usize).min(rows - 1);
            let Some([red, green, blue]) = layer.color_map.map(layer.values[[r, c]], &layer.norm)
            else {
                continue;
            };
            if let Some(px) = pixels.get_mut(row as usize * width + col as usize) {
                *px = ColorU8::from_rgba(red, green, blue, 255).premultiply();
            }
        }
    }
}

fn solid(rgb: [u8; 3]) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(rgb[0], rgb[1], rgb[2], 255);
    paint.anti_alias = true;
    paint
}

fn line_stroke() -> Stroke {
    Stroke {
        width: LINE_WIDTH,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    }
}

/// Pixel position as path coordinates; `None` off the float range.
fn path_point(view: &Viewport, p: &Point2D) -> Option<(f32, f32)> {
    let (x, y) = view.to_pixel(p);
    let (x, y) = (x as f32, y as f32);
    (x.is_finite() && y.is_finite()).then_some((x, y))
}

fn paint_contours(pixmap: &mut Pixmap, view: &Viewport, layer: &ContourLayer) {
    let stroke = line_stroke();
    for line in &layer.lines {
        let mut pb = PathBuilder::new();
        // a non-finite vertex breaks the polyline in two
        let mut pen_down = false;
        for p in &line.points {
            match path_point(view, p) {
                Some((x, y)) if pen_down => pb.line_to(x, y),
                Some((x, y)) => {
                    pb.move_to(x, y);
                    pen_down = true;
                }
                None => pen_down = false,
            }
        }
        if line.is_closed && pen_down {
            pb.close();
        }
        if let Some(path) = pb.finish() {
            pixmap.stroke_path(&path, &solid(line.color), &stroke, Transform::identity(), None);
        }
    }
}

fn paint_scatter(pixmap: &mut Pixmap, view: &Viewport, layer: &ScatterLayer, radius: u32) {
    for (p, rgb) in layer.points.iter().zip(&layer.colors) {
        let Some((cx, cy)) = path_point(view, p) else {
            continue;
        };
        if let Some(circle) = PathBuilder::from_circle(cx, cy, radius as f32) {
            pixmap.fill_path(
                &circle,
                &solid(*rgb),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }
}

fn paint_quiver(pixmap: &mut Pixmap, view: &Viewport, layer: &QuiverLayer) {
    let px_per_unit = view.width as f64 / layer.scale;
    let mut pb = PathBuilder::new();

    for (origin, v) in layer.origins.iter().zip(&layer.vectors) {
        let (x0, y0) = view.to_pixel(origin);
        // screen y grows downward
        let (dx, dy) = (v.x * px_per_unit, -v.y * px_per_unit);
        let tip = (x0 + dx, y0 + dy);
        let ends = [x0, y0, tip.0, tip.1];
        if !ends.iter().all(|c| (*c as f32).is_finite()) {
            continue;
        }
        pb.move_to(x0 as f32, y0 as f32);
        pb.line_to(tip.0 as f32, tip.1 as f32);

        let len = dx.hypot(dy);
        if len < 1.0 {
            continue;
        }
        let (ux, uy) = (dx / len, dy / len);
        let barb = len * ARROW_HEAD;
        for side in [-1.0, 1.0] {
            // 30 degrees off the shaft
            let (s, c) = (0.5 * side, 3f64.sqrt() / 2.0);
            let bx = -(ux * c - uy * s) * barb;
            let by = -(uy * c + ux * s) * barb;
            pb.move_to(tip.0 as f32, tip.1 as f32);
            pb.line_to((tip.0 + bx) as f32, (tip.1 + by) as f32);
        }
    }

    if let Some(path) = pb.finish() {
        let paint = solid(ARROW_COLOR);
        pixmap.stroke_path(&path, &paint, &line_stroke(), Transform::identity(), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::{ColorMap, Normalize};
    use crate::surface::DrawingSurface;
    use crate::types::{ContourLine, Extent2D};
    use approx::assert_relative_eq;
    use ndarray::array;

    const RED: [u8; 3] = [255, 0, 0];
    const BLUE: [u8; 3] = [0, 0, 255];

    fn two_band_axes() -> Axes {
        let mut ax = Axes::default();
        ax.set_xlim(0.0, 10.0);
        ax.set_ylim(0.0, 10.0);
        // row 0 (bottom) is unit 1, row 1 (top) is unit 2
        ax.add_image(ImageLayer {
            values: array![[1.0, 1.0], [2.0, 2.0]],
            color_map: ColorMap::listed(vec![RED, BLUE]),
            norm: Normalize::for_palette(2),
            extent: Extent2D::new(0.0, 10.0, 0.0, 10.0),
            z_order: -100,
        });
        ax
    }

    #[test]
    fn test_viewport_round_trip() {
        let view = Viewport {
            xlim: (0.0, 100.0),
            ylim: (0.0, 50.0),
            width: 100,
            height: 50,
        };
        let (px, py) = view.to_pixel(&Point2D::new(25.0, 10.0));
        assert_eq!((px, py), (25.0, 40.0));
        let p = view.to_data(25, 39);
        assert_relative_eq!(p.x, 25.5, epsilon = 1e-9);
        assert_relative_eq!(p.y, 10.5, epsilon = 1e-9);
    }

    #[test]
    fn test_image_origin_lower() {
        let img = render_axes(&two_band_axes(), 20, 20, 2);
        assert_eq!(img.get_pixel(5, 18).0, RED);
        assert_eq!(img.get_pixel(5, 1).0, BLUE);
    }

    #[test]
    fn test_inverted_axis_flips_image() {
        let mut ax = two_band_axes();
        ax.invert_yaxis();
        let img = render_axes(&ax, 20, 20, 2);
        assert_eq!(img.get_pixel(5, 18).0, BLUE);
        assert_eq!(img.get_pixel(5, 1).0, RED);
    }

    #[test]
    fn test_layers_drawn_over_image() {
        let mut ax = two_band_axes();
        ax.add_scatter(ScatterLayer {
            points: vec![Point2D::new(5.0, 5.0)],
            categories: vec![1],
            colors: vec![[0, 255, 0]],
            z_order: 2,
        });
        ax.add_contours(ContourLayer {
            levels: vec![1.5],
            lines: vec![ContourLine {
                level: 1.5,
                points: vec![Point2D::new(0.0, 2.5), Point2D::new(10.0, 2.5)],
                is_closed: false,
                color: [255, 255, 0],
            }],
            z_order: 8,
        });
        let img = render_axes(&ax, 20, 20, 2);
        assert_eq!(img.get_pixel(10, 10).0, [0, 255, 0]);
        assert_eq!(img.get_pixel(3, 15).0, [255, 255, 0]);
    }

    #[test]
    fn test_contour_breaks_at_non_finite_vertex() {
        let mut ax = Axes::default();
        ax.set_xlim(0.0, 10.0);
        ax.set_ylim(0.0, 10.0);
        let points = vec![
            Point2D::new(0.0, 2.5),
            Point2D::new(10.0, 2.5),
            Point2D::new(f64::NAN, 5.0),
            Point2D::new(0.0, 7.5),
            Point2D::new(10.0, 7.5),
        ];
        let far = vec![Point2D::new(-1.0e12, 5.0), Point2D::new(1.0e12, 5.0)];
        ax.add_contours(ContourLayer {
            levels: vec![1.0, 2.0],
            lines: vec![
                ContourLine {
                    level: 1.0,
                    points,
                    is_closed: false,
                    color: [255, 255, 0],
                },
                ContourLine {
                    level: 2.0,
                    points: far,
                    is_closed: false,
                    color: [0, 255, 255],
                },
            ],
            z_order: 8,
        });
        let img = render_axes(&ax, 20, 20, 2);
        assert_eq!(img.get_pixel(3, 15).0, [255, 255, 0]);
        assert_eq!(img.get_pixel(3, 5).0, [255, 255, 0]);
        // no diagonal joins the two pieces
        assert_eq!(img.get_pixel(10, 12).0, [255, 255, 255]);
    }

    #[test]
    fn test_quiver_draws_from_origin() {
        let mut ax = Axes::default();
        ax.set_xlim(0.0, 10.0);
        ax.set_ylim(0.0, 10.0);
        ax.add_quiver(QuiverLayer {
            origins: vec![Point2D::new(5.0, 5.0)],
            vectors: vec![Point2D::new(0.0, 1.0)],
            scale: 4.0,
            z_order: 3,
        });
        let img = render_axes(&ax, 40, 40, 2);
        // unit vector spans 10 px straight up from (20, 20)
        assert_eq!(img.get_pixel(20, 15).0, [0, 0, 0]);
        assert_eq!(img.get_pixel(20, 25).0, [255, 255, 255]);
    }

    #[test]
    fn test_figure_tiles_subplots() {
        let mut fig = Figure::new(1, 2, 6);
        if let Some(ax) = fig.subplot(0, 1) {
            *ax = two_band_axes();
        }
        let img = render_figure(&fig, 10, 10, 1);
        assert_eq!(img.dimensions(), (20, 10));
        assert_eq!(img.get_pixel(2, 9).0, [255, 255, 255]);
        assert_eq!(img.get_pixel(12, 9).0, RED);
    }

    #[test]
    fn test_save_png() {
        let path = std::env::temp_dir().join(format!("strata-raster-{}.png", std::process::id()));
        let img = render_axes(&two_band_axes(), 8, 8, 1);
        save_png(&img, &path).unwrap();
        let back = image::open(&path).unwrap().to_rgb8();
        assert_eq!(back.dimensions(), (8, 8));
        std::fs::remove_file(&path).unwrap();
    }
}
