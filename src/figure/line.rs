use crate::error::GeometryError;
use crate::math::distance_2d::perpendicular_dist_within;
use crate::math::{distance, polygon_2d, Point2, TOLERANCE};
use crate::render::{DrawStyle, Renderer};

use super::{ensure_finite, fixed_definition, Primitive, ScaleLimits, Stroke};

/// Weight applied to the caller's epsilon in the line hit test; the stroke
/// half-thickness supplies most of the grab margin.
pub const LINE_EPSILON_WEIGHT: f64 = 0.1;

/// A straight segment between two endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    points: [Point2; 2],
}

impl Line {
    /// Creates a new line.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoints coincide or are not finite.
    pub fn new(start: Point2, end: Point2) -> Result<Self, GeometryError> {
        let line = Self {
            points: [start, end],
        };
        line.validate()?;
        Ok(line)
    }

    #[must_use]
    pub fn start(&self) -> Point2 {
        self.points[0]
    }

    #[must_use]
    pub fn end(&self) -> Point2 {
        self.points[1]
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        distance(&self.points[0], &self.points[1])
    }

    /// Shortest distance from the midpoint to an endpoint.
    #[must_use]
    pub fn half_length(&self) -> f64 {
        polygon_2d::min_distance_to(&self.centroid(), &self.points)
    }
}

impl Primitive for Line {
    const NAME: &'static str = "Line";
    const POINT_PARAMETERS: &'static [&'static str] = &["Start", "End"];

    fn from_definition(points: &[Point2]) -> Result<Self, GeometryError> {
        let [start, end] = fixed_definition(Self::NAME, points)?;
        Self::new(start, end)
    }

    fn default_definition() -> Self {
        Self {
            points: [Point2::new(50.0, 50.0), Point2::new(150.0, 150.0)],
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
        if self.length() < TOLERANCE {
            return Err(GeometryError::Degenerate(
                "line endpoints coincide".to_owned(),
            ));
        }
        Ok(())
    }

    fn fits_after_scale(&self, factor: f64, limits: &ScaleLimits) -> bool {
        self.half_length() * factor >= limits.min_line_half_length - TOLERANCE
    }

    fn contains_near(&self, point: &Point2, eps: f64, stroke: &Stroke) -> bool {
        perpendicular_dist_within(point, &self.points[0], &self.points[1])
            .is_some_and(|d| d <= eps * LINE_EPSILON_WEIGHT + stroke.half_thickness())
    }

    fn draw(&self, renderer: &mut dyn Renderer, style: &DrawStyle) {
        renderer.draw_line(style, self.points[0], self.points[1]);
    }
}
