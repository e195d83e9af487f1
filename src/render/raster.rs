use serde::{Deserialize, Serialize};
use tiny_skia::{LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};

use crate::error::PersistenceError;
use crate::figure::{Color, Figure};
use crate::math::{Aabb, Point2, Vector2};

use super::{content_bounds, outline_pivot, render_all, DrawStyle, Renderer};

/// Largest edge accepted for a raster export, in pixels.
pub const MAX_RASTER_EDGE: u32 = 16_384;

/// Page setup for PNG export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterOptions {
    /// Blank space around the drawing, in pixels.
    pub margin: f64,
    pub background: Color,
    pub anti_alias: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            margin: 10.0,
            background: Color::WHITE,
            anti_alias: true,
        }
    }
}

/// Strokes figure outlines into a `tiny-skia` pixmap.
///
/// Document coordinates map one-to-one onto pixels, shifted so that the
/// framed bounds start at the pixmap origin.
#[derive(Debug)]
pub struct RasterRenderer {
    pixmap: Pixmap,
    offset: Vector2,
    anti_alias: bool,
}

#[allow(clippy::cast_possible_truncation)]
fn to_f32(v: f64) -> f32 {
    v as f32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pixel_extent(v: f64) -> u32 {
    v.ceil().max(1.0) as u32
}

impl RasterRenderer {
    /// Creates a pixmap sized to `bounds` plus the margin, filled with the
    /// background color.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Export`] if the requested canvas is too
    /// large or cannot be allocated.
    pub fn new(bounds: &Aabb, options: &RasterOptions) -> Result<Self, PersistenceError> {
        let frame = bounds.expanded(options.margin);
        if !frame.width().is_finite() || !frame.height().is_finite() {
            return Err(PersistenceError::Export("drawing bounds are not finite".to_owned()));
        }
        let width = pixel_extent(frame.width());
        let height = pixel_extent(frame.height());
        if width > MAX_RASTER_EDGE || height > MAX_RASTER_EDGE {
            return Err(PersistenceError::Export(format!(
                "canvas {width}x{height} exceeds {MAX_RASTER_EDGE} pixels per edge"
            )));
        }
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            PersistenceError::Export(format!("cannot allocate a {width}x{height} pixmap"))
        })?;
        let [r, g, b, a] = options.background.to_rgba8();
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));

        tracing::debug!(width, height, "raster canvas created");
        Ok(Self {
            pixmap,
            offset: Point2::origin() - frame.min,
            anti_alias: options.anti_alias,
        })
    }

    #[must_use]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    #[must_use]
    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Encodes the pixmap as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Export`] if encoding fails.
    pub fn encode_png(&self) -> Result<Vec<u8>, PersistenceError> {
        png_bytes(&self.pixmap)
    }

    fn to_canvas(&self, p: Point2) -> (f32, f32) {
        let q = p + self.offset;
        (to_f32(q.x), to_f32(q.y))
    }

    fn polyline(&self, points: &[Point2], closed: bool) -> Option<Path> {
        let (first, rest) = points.split_first()?;
        let mut pb = PathBuilder::new();
        let (x, y) = self.to_canvas(*first);
        pb.move_to(x, y);
        for p in rest {
            let (x, y) = self.to_canvas(*p);
            pb.line_to(x, y);
        }
        if closed {
            pb.close();
        }
        pb.finish()
    }

    fn stroke(&mut self, path: Option<Path>, style: &DrawStyle, pivot: Point2) {
        let Some(path) = path else {
            tracing::warn!("skipping figure with an empty outline");
            return;
        };

        let mut paint = Paint::default();
        let [r, g, b, a] = style.color.to_rgba8();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = self.anti_alias;

        let stroke = Stroke {
            width: to_f32(style.stroke_thickness),
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };

        let transform = match style.angle {
            Some(angle) => {
                let (cx, cy) = self.to_canvas(pivot);
                Transform::from_rotate_at(to_f32(angle), cx, cy)
            }
            None => Transform::identity(),
        };
        self.pixmap.stroke_path(&path, &paint, &stroke, transform, None);
    }
}

impl Renderer for RasterRenderer {
    fn draw_line(&mut self, style: &DrawStyle, start: Point2, end: Point2) {
        let path = self.polyline(&[start, end], false);
        self.stroke(path, style, outline_pivot(&[start, end]));
    }

    fn draw_circle(&mut self, style: &DrawStyle, center: Point2, radius: f64, _on: Point2) {
        let (cx, cy) = self.to_canvas(center);
        let path = PathBuilder::from_circle(cx, cy, to_f32(radius));
        self.stroke(path, style, center);
    }

    fn draw_triangle(&mut self, style: &DrawStyle, vertices: [Point2; 3]) {
        let path = self.polyline(&vertices, true);
        self.stroke(path, style, outline_pivot(&vertices));
    }

    fn draw_rectangle(&mut self, style: &DrawStyle, vertices: [Point2; 4]) {
        let path = self.polyline(&vertices, true);
        self.stroke(path, style, outline_pivot(&vertices));
    }
}

/// Renders `figures` into a pixmap framing their combined bounds.
///
/// # Errors
///
/// Returns [`PersistenceError::Export`] if the canvas cannot be created.
pub fn to_pixmap<'a>(
    figures: impl IntoIterator<Item = &'a Figure> + Clone,
    options: &RasterOptions,
) -> Result<Pixmap, PersistenceError> {
    let bounds = content_bounds(figures.clone())
        .unwrap_or_else(|| Aabb::new(Point2::origin(), Point2::origin()));
    let mut renderer = RasterRenderer::new(&bounds, options)?;
    render_all(figures, &mut renderer, None);
    Ok(renderer.into_pixmap())
}

/// Encodes a pixmap as PNG.
///
/// # Errors
///
/// Returns [`PersistenceError::Export`] if encoding fails.
pub fn png_bytes(pixmap: &Pixmap) -> Result<Vec<u8>, PersistenceError> {
    pixmap
        .encode_png()
        .map_err(|e| PersistenceError::Export(format!("png encoding failed: {e}")))
}

/// Renders `figures` and encodes the result as PNG.
///
/// # Errors
///
/// Returns [`PersistenceError::Export`] if the canvas cannot be created or
/// encoded.
pub fn to_png<'a>(
    figures: impl IntoIterator<Item = &'a Figure> + Clone,
    options: &RasterOptions,
) -> Result<Vec<u8>, PersistenceError> {
    png_bytes(&to_pixmap(figures, options)?)
}
