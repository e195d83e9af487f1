use crate::error::GeometryError;
use crate::math::{distance, Aabb, Point2, Vector2, TOLERANCE};
use crate::render::{DrawStyle, Renderer};

use super::{ensure_finite, fixed_definition, Primitive, ScaleLimits, Stroke};

/// A circle defined by its center and one point on its circumference.
///
/// The radius is always derived from the two stored points.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    points: [Point2; 2],
}

impl Circle {
    /// Creates a new circle.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is zero or a point is not finite.
    pub fn new(center: Point2, point_on_circle: Point2) -> Result<Self, GeometryError> {
        let circle = Self {
            points: [center, point_on_circle],
        };
        circle.validate()?;
        Ok(circle)
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        self.points[0]
    }

    #[must_use]
    pub fn point_on_circle(&self) -> Point2 {
        self.points[1]
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        distance(&self.points[0], &self.points[1])
    }
}

impl Primitive for Circle {
    const NAME: &'static str = "Circle";
    const POINT_PARAMETERS: &'static [&'static str] = &["Center", "PointOnCircle"];

    fn from_definition(points: &[Point2]) -> Result<Self, GeometryError> {
        let [center, on_circle] = fixed_definition(Self::NAME, points)?;
        Self::new(center, on_circle)
    }

    fn default_definition() -> Self {
        Self {
            points: [Point2::new(250.0, 250.0), Point2::new(200.0, 200.0)],
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
        if self.radius() < TOLERANCE {
            return Err(GeometryError::Degenerate(
                "circle radius must be positive".to_owned(),
            ));
        }
        Ok(())
    }

    fn centroid(&self) -> Point2 {
        self.points[0]
    }

    fn bounding_box(&self) -> Aabb {
        let r = self.radius();
        let c = self.center();
        Aabb::new(c - Vector2::new(r, r), c + Vector2::new(r, r))
    }

    fn fits_after_scale(&self, factor: f64, limits: &ScaleLimits) -> bool {
        self.radius() * factor >= limits.min_circle_radius - TOLERANCE
    }

    fn contains_near(&self, point: &Point2, eps: f64, _stroke: &Stroke) -> bool {
        (distance(point, &self.points[0]) - self.radius()).abs() <= eps
    }

    fn draw(&self, renderer: &mut dyn Renderer, style: &DrawStyle) {
        renderer.draw_circle(style, self.points[0], self.radius(), self.points[1]);
    }
}
