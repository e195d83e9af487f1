//! Rendering collaborator contract.
//!
//! The core never produces pixels itself. Each figure variant forwards its
//! full visual state to one method of [`Renderer`]; UI canvases and the
//! exporters in this module implement the trait.

pub mod raster;
pub mod svg;

pub use raster::{RasterOptions, RasterRenderer};
pub use svg::{SvgOptions, SvgRenderer};

use crate::figure::{Color, Figure};
use crate::math::{polygon_2d, Aabb, Point2};

/// Visual state handed to the renderer with every figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawStyle {
    pub selected: bool,
    pub stroke_thickness: f64,
    pub color: Color,
    /// Optional display rotation in degrees about the figure's own center.
    pub angle: Option<f64>,
}

/// One draw call per figure variant.
pub trait Renderer {
    fn draw_line(&mut self, style: &DrawStyle, start: Point2, end: Point2);

    fn draw_circle(&mut self, style: &DrawStyle, center: Point2, radius: f64, point_on_circle: Point2);

    fn draw_triangle(&mut self, style: &DrawStyle, vertices: [Point2; 3]);

    fn draw_rectangle(&mut self, style: &DrawStyle, vertices: [Point2; 4]);
}

/// Draws every figure in iteration order.
pub fn render_all<'a>(
    figures: impl IntoIterator<Item = &'a Figure>,
    renderer: &mut dyn Renderer,
    angle: Option<f64>,
) {
    for figure in figures {
        figure.draw(renderer, angle);
    }
}

/// Returns the union of the figures' bounds grown by half their stroke.
#[must_use]
pub fn content_bounds<'a>(figures: impl IntoIterator<Item = &'a Figure>) -> Option<Aabb> {
    figures
        .into_iter()
        .map(|f| f.bounding_box().expanded(f.stroke().half_thickness()))
        .reduce(|acc, b| acc.union(&b))
}

/// Pivot used for display rotation of a polygon outline.
#[must_use]
pub(crate) fn outline_pivot(points: &[Point2]) -> Point2 {
    polygon_2d::mean_point(points)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use crate::figure::{Circle, Line, Rectangle, Triangle};

    /// Records draw calls as short text lines.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingRenderer {
        pub calls: Vec<String>,
    }

    impl Renderer for RecordingRenderer {
        fn draw_line(&mut self, style: &DrawStyle, start: Point2, end: Point2) {
            self.calls.push(format!(
                "line {} {} {} {} w={} c={} sel={} a={:?}",
                start.x, start.y, end.x, end.y, style.stroke_thickness, style.color, style.selected, style.angle
            ));
        }

        fn draw_circle(&mut self, style: &DrawStyle, center: Point2, radius: f64, _on: Point2) {
            self.calls.push(format!(
                "circle {} {} r={radius:.2} w={}",
                center.x, center.y, style.stroke_thickness
            ));
        }

        fn draw_triangle(&mut self, _style: &DrawStyle, vertices: [Point2; 3]) {
            self.calls.push(format!("triangle {}", vertices.len()));
        }

        fn draw_rectangle(&mut self, _style: &DrawStyle, vertices: [Point2; 4]) {
            self.calls.push(format!("rectangle {}", vertices.len()));
        }
    }

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn dispatches_by_variant_in_order() {
        let figures = vec![
            Figure::new(Line::new(p(0.0, 0.0), p(10.0, 0.0)).unwrap()),
            Figure::new(Circle::new(p(5.0, 5.0), p(8.0, 9.0)).unwrap()),
            Figure::new(Triangle::new(p(0.0, 0.0), p(30.0, 0.0), p(0.0, 30.0)).unwrap()),
            Figure::new(Rectangle::from_corners(p(0.0, 0.0), p(20.0, 20.0)).unwrap()),
        ];
        let mut rec = RecordingRenderer::default();
        render_all(&figures, &mut rec, Some(15.0));
        assert_eq!(rec.calls.len(), 4);
        assert_eq!(rec.calls[0], "line 0 0 10 0 w=2 c=#ff000000 sel=false a=Some(15.0)");
        assert_eq!(rec.calls[1], "circle 5 5 r=5.00 w=2");
        assert_eq!(rec.calls[2], "triangle 3");
        assert_eq!(rec.calls[3], "rectangle 4");
    }

    #[test]
    fn content_bounds_include_stroke() {
        let figures = vec![
            Figure::new(Line::new(p(0.0, 0.0), p(10.0, 0.0)).unwrap()),
            Figure::new(Circle::new(p(50.0, 50.0), p(60.0, 50.0)).unwrap()),
        ];
        let b = content_bounds(&figures).unwrap();
        assert_eq!(b.min, p(-1.0, -1.0));
        assert_eq!(b.max, p(61.0, 61.0));
        assert!(content_bounds(&Vec::<Figure>::new()).is_none());
    }
}
