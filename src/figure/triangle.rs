use crate::error::GeometryError;
use crate::math::polygon_2d::{edge_lengths, min_distance_to, point_in_triangle, signed_area};
use crate::math::{Point2, TOLERANCE};
use crate::render::{DrawStyle, Renderer};

use super::{ensure_finite, fixed_definition, Primitive, ScaleLimits, Stroke};

/// A triangle given by three vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    points: [Point2; 3],
}

impl Triangle {
    /// Creates a new triangle.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertices are collinear or not finite.
    pub fn new(p1: Point2, p2: Point2, p3: Point2) -> Result<Self, GeometryError> {
        let triangle = Self {
            points: [p1, p2, p3],
        };
        triangle.validate()?;
        Ok(triangle)
    }

    #[must_use]
    pub fn vertices(&self) -> [Point2; 3] {
        self.points
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        signed_area(&self.points).abs()
    }
}

impl Primitive for Triangle {
    const NAME: &'static str = "Triangle";
    const POINT_PARAMETERS: &'static [&'static str] = &["P1", "P2", "P3"];

    fn from_definition(points: &[Point2]) -> Result<Self, GeometryError> {
        let [p1, p2, p3] = fixed_definition(Self::NAME, points)?;
        Self::new(p1, p2, p3)
    }

    fn default_definition() -> Self {
        Self {
            points: [
                Point2::new(50.0, 50.0),
                Point2::new(150.0, 50.0),
                Point2::new(100.0, 150.0),
            ],
        }
    }

    fn definition(&self) -> &[Point2] {
        &self.points
    }

    fn definition_mut(&mut self) -> &mut [Point2] {
        &mut self.points
    }

    fn validate(&self) -> Result<(), GeometryError> {
        ensure_finite(Self::NAME, &self.points)?;
        if self.area() < TOLERANCE {
            return Err(GeometryError::Degenerate(
                "triangle vertices are collinear".to_owned(),
            ));
        }
        Ok(())
    }

    fn fits_after_scale(&self, factor: f64, limits: &ScaleLimits) -> bool {
        let vertex_ok = min_distance_to(&self.centroid(), &self.points) * factor
            >= limits.min_triangle_vertex_distance - TOLERANCE;
        let edges_ok = edge_lengths(&self.points)
            .into_iter()
            .all(|len| len * factor >= limits.min_edge_length - TOLERANCE);
        vertex_ok && edges_ok
    }

    fn contains_near(&self, point: &Point2, eps: f64, _stroke: &Stroke) -> bool {
        let [a, b, c] = &self.points;
        point_in_triangle(point, a, b, c, eps)
    }

    fn draw(&self, renderer: &mut dyn Renderer, style: &DrawStyle) {
        renderer.draw_triangle(style, self.points);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::figure::ScaleOutcome;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn default_triangle() -> Triangle {
        Triangle::new(p(50.0, 50.0), p(150.0, 50.0), p(100.0, 150.0)).unwrap()
    }

    #[test]
    fn centroid_is_vertex_mean() {
        assert_abs_diff_eq!(
            default_triangle().centroid(),
            p(100.0, 250.0 / 3.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn collinear_vertices_rejected() {
        assert!(Triangle::new(p(0.0, 0.0), p(5.0, 5.0), p(10.0, 10.0)).is_err());
    }

    #[test]
    fn interior_and_outside_points() {
        let t = default_triangle();
        let s = Stroke::default();
        assert!(t.contains_near(&p(100.0, 80.0), 0.0, &s));
        assert!(t.contains_near(&p(100.0, 50.0), 1e-6, &s));
        assert!(!t.contains_near(&p(10.0, 10.0), 0.0, &s));
        assert!(!t.contains_near(&p(100.0, 160.0), 0.0, &s));
    }

    #[test]
    fn scale_refused_when_vertices_get_too_close_to_centroid() {
        // Centroid-to-vertex distance is about 35; halving it drops below 20.
        let mut t = Triangle::new(p(0.0, 0.0), p(60.0, 0.0), p(30.0, 52.0)).unwrap();
        let before = t.clone();
        assert_eq!(t.scale(0.5, &ScaleLimits::default()), ScaleOutcome::Refused);
        assert_eq!(t, before);
        assert_eq!(t.scale(0.9, &ScaleLimits::default()), ScaleOutcome::Applied);
    }

    #[test]
    fn scale_refused_for_short_edge() {
        let limits = ScaleLimits {
            min_triangle_vertex_distance: 0.0,
            ..ScaleLimits::default()
        };
        let mut t = Triangle::new(p(0.0, 0.0), p(12.0, 0.0), p(6.0, 100.0)).unwrap();
        assert_eq!(t.scale(0.5, &limits), ScaleOutcome::Refused);
    }

    #[test]
    fn growing_is_never_refused() {
        let mut t = Triangle::new(p(0.0, 0.0), p(4.0, 0.0), p(2.0, 3.0)).unwrap();
        assert_eq!(t.scale(1.5, &ScaleLimits::default()), ScaleOutcome::Applied);
    }
}
