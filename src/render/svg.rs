use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::figure::{Color, Figure};
use crate::math::{Aabb, Point2};

use super::{content_bounds, outline_pivot, render_all, DrawStyle, Renderer};

/// Page setup for SVG export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgOptions {
    /// Blank space around the drawing, in document units.
    pub margin: f64,
    /// Fill painted behind the figures; `None` leaves the page transparent.
    pub background: Option<Color>,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            margin: 10.0,
            background: Some(Color::WHITE),
        }
    }
}

/// Collects figure outlines as SVG elements.
///
/// Coordinates are written unchanged; the `viewBox` produced by
/// [`SvgRenderer::finish`] frames them.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    body: String,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the collected elements in an `<svg>` document framing `bounds`.
    #[must_use]
    pub fn finish(self, bounds: &Aabb, options: &SvgOptions) -> String {
        let frame = bounds.expanded(options.margin);
        let (width, height) = (frame.width(), frame.height());

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="{:.2} {:.2} {width:.2} {height:.2}">"#,
            frame.min.x, frame.min.y,
        );
        if let Some(bg) = options.background {
            let _ = writeln!(
                svg,
                r#"  <rect x="{:.2}" y="{:.2}" width="{width:.2}" height="{height:.2}" fill="{}"{}/>"#,
                frame.min.x,
                frame.min.y,
                bg.to_hex_rgb(),
                opacity_attr("fill-opacity", bg),
            );
        }
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }

    fn push_element(&mut self, element: &str, style: &DrawStyle, pivot: Point2) {
        let _ = writeln!(
            self.body,
            r#"  <{element} fill="none" stroke="{}" stroke-width="{:.2}"{}{}/>"#,
            style.color.to_hex_rgb(),
            style.stroke_thickness,
            opacity_attr("stroke-opacity", style.color),
            rotation_attr(style.angle, pivot),
        );
    }
}

fn opacity_attr(name: &str, color: Color) -> String {
    if color.alpha() == u8::MAX {
        String::new()
    } else {
        format!(r#" {name}="{:.3}""#, color.opacity())
    }
}

fn rotation_attr(angle: Option<f64>, pivot: Point2) -> String {
    match angle {
        Some(a) if a != 0.0 => format!(
            r#" transform="rotate({a:.2} {:.2} {:.2})""#,
            pivot.x, pivot.y
        ),
        _ => String::new(),
    }
}

fn points_attr(points: &[Point2]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

impl Renderer for SvgRenderer {
    fn draw_line(&mut self, style: &DrawStyle, start: Point2, end: Point2) {
        let element = format!(
            r#"line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}""#,
            start.x, start.y, end.x, end.y
        );
        self.push_element(&element, style, outline_pivot(&[start, end]));
    }

    fn draw_circle(&mut self, style: &DrawStyle, center: Point2, radius: f64, _on: Point2) {
        let element = format!(
            r#"circle cx="{:.2}" cy="{:.2}" r="{radius:.2}""#,
            center.x, center.y
        );
        self.push_element(&element, style, center);
    }

    fn draw_triangle(&mut self, style: &DrawStyle, vertices: [Point2; 3]) {
        let element = format!(r#"polygon points="{}""#, points_attr(&vertices));
        self.push_element(&element, style, outline_pivot(&vertices));
    }

    fn draw_rectangle(&mut self, style: &DrawStyle, vertices: [Point2; 4]) {
        let element = format!(r#"polygon points="{}""#, points_attr(&vertices));
        self.push_element(&element, style, outline_pivot(&vertices));
    }
}

/// Renders `figures` into a standalone SVG document.
///
/// An empty drawing produces an empty page of the margin's size.
#[must_use]
pub fn to_svg<'a>(figures: impl IntoIterator<Item = &'a Figure> + Clone, options: &SvgOptions) -> String {
    let bounds = content_bounds(figures.clone())
        .unwrap_or_else(|| Aabb::new(Point2::origin(), Point2::origin()));
    let mut renderer = SvgRenderer::new();
    render_all(figures, &mut renderer, None);
    renderer.finish(&bounds, options)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::figure::{Circle, Line, Rectangle, Triangle};

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn document_frames_content_with_margin() {
        let figures = vec![Figure::new(Line::new(p(0.0, 0.0), p(100.0, 50.0)).unwrap())];
        let svg = to_svg(&figures, &SvgOptions::default());
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="122" height="72" viewBox="-11.00 -11.00 122.00 72.00">"#));
        assert!(svg.contains(r##"<rect x="-11.00" y="-11.00" width="122.00" height="72.00" fill="#ffffff"/>"##));
        assert!(svg.contains(
            r##"<line x1="0.00" y1="0.00" x2="100.00" y2="50.00" fill="none" stroke="#000000" stroke-width="2.00"/>"##
        ));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn each_variant_emits_one_element() {
        let figures = vec![
            Figure::new(Circle::new(p(50.0, 50.0), p(60.0, 50.0)).unwrap()),
            Figure::new(Triangle::new(p(0.0, 0.0), p(30.0, 0.0), p(0.0, 30.0)).unwrap()),
            Figure::new(Rectangle::from_corners(p(0.0, 0.0), p(20.0, 10.0)).unwrap()),
        ];
        let svg = to_svg(&figures, &SvgOptions { margin: 0.0, background: None });
        assert!(svg.contains(r#"<circle cx="50.00" cy="50.00" r="10.00""#));
        assert!(svg.contains(r#"<polygon points="0.00,0.00 30.00,0.00 0.00,30.00""#));
        assert!(svg.contains(r#"<polygon points="0.00,0.00 20.00,0.00 20.00,10.00 0.00,10.00""#));
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn translucent_color_and_rotation_attributes() {
        let mut renderer = SvgRenderer::new();
        let style = DrawStyle {
            selected: false,
            stroke_thickness: 3.0,
            color: Color(0x80FF_0000),
            angle: Some(45.0),
        };
        renderer.draw_line(&style, p(0.0, 0.0), p(10.0, 0.0));
        let svg = renderer.finish(&Aabb::new(p(0.0, 0.0), p(10.0, 0.0)), &SvgOptions::default());
        assert!(svg.contains(r##"stroke="#ff0000" stroke-width="3.00" stroke-opacity="0.502" transform="rotate(45.00 5.00 0.00)""##));
    }

    #[test]
    fn empty_drawing_is_margin_sized() {
        let svg = to_svg(&Vec::<Figure>::new(), &SvgOptions::default());
        assert!(svg.contains(r#"width="20" height="20""#));
    }
}
