use crate::error::GeometryError;
use crate::math::polygon_2d::{edge_lengths, min_distance_to, signed_area};
use crate::math::{distance, Aabb, Point2, TOLERANCE};
use crate::render::{DrawStyle, Renderer};

use super::{ensure_finite, fixed_definition, Primitive, ScaleLimits, Stroke};

/// A quadrilateral given by four vertices in drawing order.
///
/// Rotation is applied to the vertices, so the edges need not stay
/// axis-aligned. Width and height are derived from the first two edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    points: [Point2; 4],
}

impl Rectangle {
    /// Creates a new rectangle.
    ///
    /// # Errors
    ///
    /// Returns an error if two consecutive vertices coincide, the outline has
    /// no area, or a vertex is not finite.
    pub fn new(p1: Point2, p2: Point2, p3: Point2, p4: Point2) -> Result<Self, GeometryError> {
        let rect = Self {
            points: [p1, p2, p3, p4],
        };
        rect.validate()?;
        Ok(rect)
    }

    /// Creates an axis-aligned rectangle from two opposite corners.
    ///
    /// # Errors
    ///
    /// Returns an error if the corners share an x or y coordinate.
    pub fn from_corners(a: Point2, b: Point2) -> Result<Self, GeometryError> {
        let bounds = Aabb::new(a, b);
        Self::new(
            bounds.min,
            Point2::new(bounds.max.x, bounds.min.y),
            bounds.max,
            Point2::new(bounds.min.x, bounds.max.y),
        )
    }

    #[must_use]
    pub fn vertices(&self) -> [Point2; 4] {
        self.points
    }

    /// Length of the edge `P1`→`P2`.
    #[must_use]
    pub fn width(&self) -> f64 {
        distance(&self.points[0], &self.points[1])
    }

    /// Length of the edge `P2`→`P3`.
    #[must_use]
    pub fn height(&self) -> f64 {
        distance(&self.points[1], &self.points[2])
    }
}

impl Primitive for Rectangle {
    const NAME: &'static str = "Rectangle";
    const POINT_PARAMETERS: &'static [&'static str] = &["P1", "P2", "P3", "P4"];

    fn from_definition(points: &[Point2]) -> Result<Self, GeometryError> {
        let [p1, p2, p3, p4] = fixed_definition(Self::NAME, points)?;
        Self::new(p1, p2, p3, p4)
    }

    fn default_definition() -> Self {
        Self {
            points: [
                Point2::new(50.0, 50.0),
                Point2::new(150.0, 50.0),
                Point2::new(150.0, 150.0),
                Point2::new(50.0, 150.0),
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
        if edge_lengths(&self.points).into_iter().any(|len| len < TOLERANCE) {
            return Err(GeometryError::Degenerate(
                "rectangle has coincident vertices".to_owned(),
            ));
        }
        if signed_area(&self.points).abs() < TOLERANCE {
            return Err(GeometryError::Degenerate(
                "rectangle has no area".to_owned(),
            ));
        }
        Ok(())
    }

    fn fits_after_scale(&self, factor: f64, limits: &ScaleLimits) -> bool {
        let vertex_ok = min_distance_to(&self.centroid(), &self.points) * factor
            >= limits.min_rectangle_vertex_distance - TOLERANCE;
        let edges_ok = edge_lengths(&self.points)
            .into_iter()
            .all(|len| len * factor >= limits.min_edge_length - TOLERANCE);
        vertex_ok && edges_ok
    }

    /// Edge proximity against the axis-aligned extents of the vertices.
    fn contains_near(&self, point: &Point2, eps: f64, _stroke: &Stroke) -> bool {
        let b = self.bounding_box();
        let within_x = point.x >= b.min.x && point.x <= b.max.x;
        let within_y = point.y >= b.min.y && point.y <= b.max.y;

        let near_left = (point.x - b.min.x).abs() <= eps && within_y;
        let near_right = (point.x - b.max.x).abs() <= eps && within_y;
        let near_top = (point.y - b.min.y).abs() <= eps && within_x;
        let near_bottom = (point.y - b.max.y).abs() <= eps && within_x;

        near_left || near_right || near_top || near_bottom
    }

    fn draw(&self, renderer: &mut dyn Renderer, style: &DrawStyle) {
        renderer.draw_rectangle(style, self.points);
    }
}
