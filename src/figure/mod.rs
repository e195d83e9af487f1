//! Figure variants and the shared capability set.
//!
//! Each variant stores a fixed-arity point definition. The transforms
//! (translate, rotate, scale, reflect) are written once as provided methods
//! of [`Primitive`] over that definition; variants supply only their
//! centroid, validity rules, minimum-size guard and hit test.
//!
//! [`Figure`] wraps a [`Shape`] with identity and visual attributes.

mod circle;
mod limits;
mod line;
mod rectangle;
mod style;
mod triangle;

pub use circle::Circle;
pub use limits::{ScaleLimits, ScaleOutcome};
pub use line::Line;
pub use rectangle::Rectangle;
pub use style::{Color, Stroke, DEFAULT_STROKE_THICKNESS};
pub use triangle::Triangle;

use std::fmt;

use uuid::Uuid;

use crate::error::{GeometryError, RegistryError, Result};
use crate::math::transform_2d::{reflect_point, rotate_point, scale_point};
use crate::math::{is_finite, polygon_2d, Aabb, Point2, Vector2};
use crate::render::{DrawStyle, Renderer};

/// Name of the scalar parameter shared by every figure type.
pub const STROKE_THICKNESS: &str = "StrokeThickness";

/// Scalar parameters common to all figure types.
pub const COMMON_SCALAR_PARAMETERS: &[&str] = &[STROKE_THICKNESS];

/// Stable identity of a figure, generated at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FigureId(Uuid);

impl FigureId {
    /// Generates a fresh random identity.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for FigureId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FigureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Geometry shared by all figure variants.
///
/// The definition is a fixed list of named points; `POINT_PARAMETERS[i]`
/// names `definition()[i]`.
pub trait Primitive: Clone + fmt::Debug + Into<Shape> {
    /// Type name used by the registry and persisted documents.
    const NAME: &'static str;

    /// Names of the definition points, in definition order.
    const POINT_PARAMETERS: &'static [&'static str];

    /// Builds the variant from points in `POINT_PARAMETERS` order.
    ///
    /// # Errors
    ///
    /// Returns an error if the point count is wrong or the definition is
    /// degenerate.
    fn from_definition(points: &[Point2]) -> std::result::Result<Self, GeometryError>;

    /// Built-in geometry used for one-click creation.
    fn default_definition() -> Self;

    fn definition(&self) -> &[Point2];

    fn definition_mut(&mut self) -> &mut [Point2];

    /// Checks that the definition is finite and not degenerate.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first violated rule.
    fn validate(&self) -> std::result::Result<(), GeometryError>;

    /// Returns `true` if the figure would still meet `limits` after scaling
    /// by `factor`.
    fn fits_after_scale(&self, factor: f64, limits: &ScaleLimits) -> bool;

    /// Boundary hit test.
    fn contains_near(&self, point: &Point2, eps: f64, stroke: &Stroke) -> bool;

    /// Forwards the definition to the matching renderer method.
    fn draw(&self, renderer: &mut dyn Renderer, style: &DrawStyle);

    /// The rotation and scaling pivot.
    fn centroid(&self) -> Point2 {
        polygon_2d::mean_point(self.definition())
    }

    fn bounding_box(&self) -> Aabb {
        let pts = self.definition();
        Aabb::from_points(pts).unwrap_or_else(|| Aabb::new(Point2::origin(), Point2::origin()))
    }

    fn translate(&mut self, v: &Vector2) {
        for p in self.definition_mut() {
            *p += v;
        }
    }

    fn rotate(&mut self, degrees: f64) {
        let pivot = self.centroid();
        for p in self.definition_mut() {
            *p = rotate_point(p, &pivot, degrees);
        }
    }

    fn scale(&mut self, factor: f64, limits: &ScaleLimits) -> ScaleOutcome {
        if !factor.is_finite() || factor <= 0.0 {
            return ScaleOutcome::Refused;
        }
        if factor < 1.0 && !self.fits_after_scale(factor, limits) {
            return ScaleOutcome::Refused;
        }
        let pivot = self.centroid();
        let mut candidate = self.clone();
        for p in candidate.definition_mut() {
            *p = scale_point(p, &pivot, factor);
        }
        // Collapse below the limits or overflow to infinity leaves the old shape.
        if candidate.validate().is_err() {
            return ScaleOutcome::Refused;
        }
        *self = candidate;
        ScaleOutcome::Applied
    }

    fn reflect(&mut self, a: &Point2, b: &Point2) {
        for p in self.definition_mut() {
            *p = reflect_point(p, a, b);
        }
    }

    fn point_parameter(&self, name: &str) -> Option<Point2> {
        let idx = Self::POINT_PARAMETERS.iter().position(|n| *n == name)?;
        self.definition().get(idx).copied()
    }

    /// Replaces one named point, keeping the old definition if the result
    /// would be invalid.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown name or an invalid resulting
    /// definition.
    fn set_point_parameter(&mut self, name: &str, value: Point2) -> Result<()> {
        let idx = Self::POINT_PARAMETERS
            .iter()
            .position(|n| *n == name)
            .ok_or_else(|| RegistryError::InvalidParameter {
                figure: Self::NAME,
                parameter: name.to_owned(),
                reason: "no such point parameter".to_owned(),
            })?;
        let mut candidate = self.clone();
        candidate.definition_mut()[idx] = value;
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }
}

/// Checks that every point of a definition is finite.
pub(crate) fn ensure_finite(
    name: &'static str,
    points: &[Point2],
) -> std::result::Result<(), GeometryError> {
    if points.iter().all(is_finite) {
        Ok(())
    } else {
        Err(GeometryError::NonFinite(name))
    }
}

/// Converts a definition slice into a fixed-size array.
pub(crate) fn fixed_definition<const N: usize>(
    name: &'static str,
    points: &[Point2],
) -> std::result::Result<[Point2; N], GeometryError> {
    <[Point2; N]>::try_from(points).map_err(|_| {
        GeometryError::Degenerate(format!(
            "{name} needs {N} points, got {}",
            points.len()
        ))
    })
}

/// Closed set of figure variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line(Line),
    Circle(Circle),
    Triangle(Triangle),
    Rectangle(Rectangle),
}

macro_rules! dispatch {
    ($shape:expr, $s:ident => $body:expr) => {
        match $shape {
            Shape::Line($s) => $body,
            Shape::Circle($s) => $body,
            Shape::Triangle($s) => $body,
            Shape::Rectangle($s) => $body,
        }
    };
}

macro_rules! dispatch_type {
    ($shape:expr, $t:ident => $body:expr) => {
        match $shape {
            Shape::Line(_) => {
                type $t = Line;
                $body
            }
            Shape::Circle(_) => {
                type $t = Circle;
                $body
            }
            Shape::Triangle(_) => {
                type $t = Triangle;
                $body
            }
            Shape::Rectangle(_) => {
                type $t = Rectangle;
                $body
            }
        }
    };
}

impl Shape {
    /// Returns the registry type name of the variant.
    #[must_use]
    pub fn name(&self) -> &'static str {
        dispatch_type!(self, T => T::NAME)
    }

    #[must_use]
    pub fn point_parameter_names(&self) -> &'static [&'static str] {
        dispatch_type!(self, T => T::POINT_PARAMETERS)
    }

    #[must_use]
    pub fn definition(&self) -> &[Point2] {
        dispatch!(self, s => s.definition())
    }

    #[must_use]
    pub fn centroid(&self) -> Point2 {
        dispatch!(self, s => s.centroid())
    }

    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        dispatch!(self, s => s.bounding_box())
    }

    /// Checks that the definition is finite and not degenerate.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first violated rule.
    pub fn validate(&self) -> std::result::Result<(), GeometryError> {
        dispatch!(self, s => s.validate())
    }

    pub fn translate(&mut self, v: &Vector2) {
        dispatch!(self, s => s.translate(v));
    }

    pub fn rotate(&mut self, degrees: f64) {
        dispatch!(self, s => s.rotate(degrees));
    }

    pub fn scale(&mut self, factor: f64, limits: &ScaleLimits) -> ScaleOutcome {
        dispatch!(self, s => s.scale(factor, limits))
    }

    pub fn reflect(&mut self, a: &Point2, b: &Point2) {
        dispatch!(self, s => s.reflect(a, b));
    }

    #[must_use]
    pub fn contains_near(&self, point: &Point2, eps: f64, stroke: &Stroke) -> bool {
        dispatch!(self, s => s.contains_near(point, eps, stroke))
    }

    #[must_use]
    pub fn point_parameter(&self, name: &str) -> Option<Point2> {
        dispatch!(self, s => s.point_parameter(name))
    }

    /// Replaces one named point of the definition.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown name or an invalid resulting
    /// definition; the shape is unchanged in that case.
    pub fn set_point_parameter(&mut self, name: &str, value: Point2) -> Result<()> {
        dispatch!(self, s => s.set_point_parameter(name, value))
    }

    pub fn draw(&self, renderer: &mut dyn Renderer, style: &DrawStyle) {
        dispatch!(self, s => s.draw(renderer, style));
    }
}

impl From<Line> for Shape {
    fn from(value: Line) -> Self {
        Shape::Line(value)
    }
}

impl From<Circle> for Shape {
    fn from(value: Circle) -> Self {
        Shape::Circle(value)
    }
}

impl From<Triangle> for Shape {
    fn from(value: Triangle) -> Self {
        Shape::Triangle(value)
    }
}

impl From<Rectangle> for Shape {
    fn from(value: Rectangle) -> Self {
        Shape::Rectangle(value)
    }
}

/// A uniquely identified shape with visual attributes.
#[derive(Debug, Clone)]
pub struct Figure {
    id: FigureId,
    shape: Shape,
    stroke: Stroke,
    color: Color,
    selected: bool,
    limits: ScaleLimits,
}

impl Figure {
    /// Creates a figure with a fresh identity, default stroke and color.
    #[must_use]
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            id: FigureId::new(),
            shape: shape.into(),
            stroke: Stroke::default(),
            color: Color::default(),
            selected: false,
            limits: ScaleLimits::default(),
        }
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = stroke;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_limits(mut self, limits: ScaleLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn id(&self) -> FigureId {
        self.id
    }

    /// Returns the registry type name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.shape.name()
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Defining points in schema order.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        self.shape.definition()
    }

    #[must_use]
    pub fn centroid(&self) -> Point2 {
        self.shape.centroid()
    }

    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        self.shape.bounding_box()
    }

    #[must_use]
    pub fn stroke(&self) -> Stroke {
        self.stroke
    }

    #[must_use]
    pub fn stroke_thickness(&self) -> f64 {
        self.stroke.thickness()
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[must_use]
    pub fn limits(&self) -> &ScaleLimits {
        &self.limits
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Translates every point of the definition.
    pub fn translate(&mut self, v: &Vector2) {
        self.shape.translate(v);
    }

    /// Rotates about the centroid; positive degrees turn clockwise on screen.
    pub fn rotate(&mut self, degrees: f64) {
        self.shape.rotate(degrees);
    }

    /// Scales about the centroid, refusing to shrink below the limits or to
    /// produce a degenerate or non-finite definition.
    pub fn scale(&mut self, factor: f64) -> ScaleOutcome {
        let outcome = self.shape.scale(factor, &self.limits);
        if !outcome.is_applied() {
            tracing::debug!(id = %self.id, factor, "scale refused");
        }
        outcome
    }

    /// Reflects across the infinite line through `a` and `b`.
    pub fn reflect(&mut self, a: &Point2, b: &Point2) {
        self.shape.reflect(a, b);
    }

    /// Returns a copy with a new identity, displaced by `offset`.
    #[must_use]
    pub fn duplicate(&self, offset: &Vector2) -> Self {
        let mut shape = self.shape.clone();
        shape.translate(offset);
        Self {
            id: FigureId::new(),
            shape,
            stroke: self.stroke,
            color: self.color,
            selected: false,
            limits: self.limits,
        }
    }

    /// Boundary hit test used for pointer selection.
    #[must_use]
    pub fn contains_near(&self, point: &Point2, eps: f64) -> bool {
        self.shape.contains_near(point, eps, &self.stroke)
    }

    #[must_use]
    pub fn point_parameter_names(&self) -> &'static [&'static str] {
        self.shape.point_parameter_names()
    }

    #[must_use]
    pub fn scalar_parameter_names(&self) -> &'static [&'static str] {
        COMMON_SCALAR_PARAMETERS
    }

    /// Reads a named point. Unknown names yield the origin.
    #[must_use]
    pub fn point_parameter(&self, name: &str) -> Point2 {
        self.shape
            .point_parameter(name)
            .unwrap_or_else(Point2::origin)
    }

    /// Reads a named scalar. Unknown names yield `0.0`.
    #[must_use]
    pub fn scalar_parameter(&self, name: &str) -> f64 {
        match name {
            STROKE_THICKNESS => self.stroke.thickness(),
            _ => 0.0,
        }
    }

    /// Replaces a named point of the definition.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown name or a degenerate result.
    pub fn set_point_parameter(&mut self, name: &str, value: Point2) -> Result<()> {
        self.shape.set_point_parameter(name, value)
    }

    /// Replaces a named scalar.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown name or an invalid value.
    pub fn set_scalar_parameter(&mut self, name: &str, value: f64) -> Result<()> {
        match name {
            STROKE_THICKNESS => {
                self.stroke = Stroke::new(self.name(), value)?;
                Ok(())
            }
            _ => Err(RegistryError::InvalidParameter {
                figure: self.name(),
                parameter: name.to_owned(),
                reason: "no such scalar parameter".to_owned(),
            }
            .into()),
        }
    }

    /// Checks the structural validity of the figure.
    ///
    /// # Errors
    ///
    /// Returns an error if the definition is degenerate or non-finite, or
    /// the stroke thickness is not positive.
    pub fn validate(&self) -> Result<()> {
        self.shape.validate()?;
        Stroke::new(self.name(), self.stroke.thickness())?;
        Ok(())
    }

    /// Hands the full visual state to the renderer.
    pub fn draw(&self, renderer: &mut dyn Renderer, angle: Option<f64>) {
        let style = DrawStyle {
            selected: self.selected,
            stroke_thickness: self.stroke.thickness(),
            color: self.color,
            angle,
        };
        self.shape.draw(renderer, &style);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn sample_figures() -> Vec<Figure> {
        vec![
            Figure::new(Line::new(p(0.0, 0.0), p(40.0, 30.0)).unwrap()),
            Figure::new(Circle::new(p(250.0, 250.0), p(200.0, 200.0)).unwrap()),
            Figure::new(Triangle::new(p(50.0, 50.0), p(150.0, 50.0), p(100.0, 150.0)).unwrap()),
            Figure::new(
                Rectangle::new(p(50.0, 50.0), p(150.0, 50.0), p(150.0, 150.0), p(50.0, 150.0))
                    .unwrap(),
            ),
        ]
    }

    fn assert_same_definition(a: &Figure, b: &Figure) {
        let (da, db) = (a.shape().definition(), b.shape().definition());
        assert_eq!(da.len(), db.len());
        for (pa, pb) in da.iter().zip(db) {
            assert_abs_diff_eq!(*pa, *pb, epsilon = 1e-9);
        }
    }

    #[test]
    fn move_there_and_back_restores_definition() {
        let v = Vector2::new(17.5, -42.25);
        for original in sample_figures() {
            let mut f = original.clone();
            f.translate(&v);
            f.translate(&-v);
            assert_same_definition(&f, &original);
        }
    }

    #[test]
    fn rotate_there_and_back_restores_definition() {
        for angle in [15.0, 90.0, 133.7, -270.0] {
            for original in sample_figures() {
                let mut f = original.clone();
                f.rotate(angle);
                f.rotate(-angle);
                assert_same_definition(&f, &original);
            }
        }
    }

    #[test]
    fn rotation_keeps_centroid() {
        for original in sample_figures() {
            let mut f = original.clone();
            f.rotate(37.0);
            assert_abs_diff_eq!(f.centroid(), original.centroid(), epsilon = 1e-9);
        }
    }

    #[test]
    fn reflect_twice_restores_definition() {
        let (a, b) = (p(0.0, 10.0), p(100.0, 80.0));
        for original in sample_figures() {
            let mut f = original.clone();
            f.reflect(&a, &b);
            f.reflect(&a, &b);
            assert_same_definition(&f, &original);
        }
    }

    #[test]
    fn duplicate_has_new_identity_and_offset() {
        for original in sample_figures() {
            let original = original.with_color(Color(0xFF12_3456));
            let copy = original.duplicate(&Vector2::new(50.0, 50.0));
            assert_ne!(copy.id(), original.id());
            assert_eq!(copy.name(), original.name());
            assert_eq!(copy.color(), original.color());
            assert!((copy.stroke_thickness() - original.stroke_thickness()).abs() < f64::EPSILON);
            let shift = copy.centroid() - original.centroid();
            assert_abs_diff_eq!(shift, Vector2::new(50.0, 50.0), epsilon = 1e-9);
            assert!(!copy.is_selected());
        }
    }

    #[test]
    fn scale_up_then_down_restores_definition() {
        for original in sample_figures() {
            let mut f = original.clone();
            assert_eq!(f.scale(2.0), ScaleOutcome::Applied);
            assert_eq!(f.scale(0.5), ScaleOutcome::Applied);
            assert_same_definition(&f, &original);
        }
    }

    #[test]
    fn collapsing_scale_is_refused_without_limits() {
        for original in sample_figures() {
            let mut f = original.with_limits(ScaleLimits::unrestricted());
            let before = f.clone();
            assert_eq!(f.scale(1e-15), ScaleOutcome::Refused);
            assert_same_definition(&f, &before);
            assert!(f.validate().is_ok());

            assert_eq!(f.scale(0.01), ScaleOutcome::Applied);
            assert!(f.validate().is_ok());
        }
    }

    #[test]
    fn overflowing_scale_is_refused() {
        for original in sample_figures() {
            let mut f = original.clone();
            assert_eq!(f.scale(1e308), ScaleOutcome::Refused);
            assert_same_definition(&f, &original);
            assert!(f.validate().is_ok());
        }
    }

    #[test]
    fn non_positive_scale_is_refused() {
        for original in sample_figures() {
            let mut f = original.clone();
            assert_eq!(f.scale(0.0), ScaleOutcome::Refused);
            assert_eq!(f.scale(-2.0), ScaleOutcome::Refused);
            assert_eq!(f.scale(f64::NAN), ScaleOutcome::Refused);
            assert_same_definition(&f, &original);
        }
    }

    #[test]
    fn unknown_parameters_return_sentinels() {
        let f = &sample_figures()[0];
        assert_eq!(f.point_parameter("Nope"), Point2::origin());
        assert!(f.scalar_parameter("Nope").abs() < f64::EPSILON);
        assert!((f.scalar_parameter(STROKE_THICKNESS) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn named_points_follow_schema() {
        let f = &sample_figures()[1];
        assert_eq!(f.name(), "Circle");
        assert_eq!(f.point_parameter_names(), &["Center", "PointOnCircle"]);
        assert_eq!(f.point_parameter("Center"), p(250.0, 250.0));
        assert_eq!(f.point_parameter("PointOnCircle"), p(200.0, 200.0));
        assert_eq!(f.points(), &[p(250.0, 250.0), p(200.0, 200.0)]);
    }

    #[test]
    fn set_point_parameter_rejects_degenerate_result() {
        let mut f = sample_figures().remove(0);
        let err = f.set_point_parameter("End", p(0.0, 0.0));
        assert!(err.is_err());
        assert_eq!(f.point_parameter("End"), p(40.0, 30.0));

        f.set_point_parameter("End", p(80.0, 0.0)).unwrap();
        assert_eq!(f.point_parameter("End"), p(80.0, 0.0));
    }

    #[test]
    fn set_scalar_parameter_validates_stroke() {
        let mut f = sample_figures().remove(2);
        assert!(f.set_scalar_parameter(STROKE_THICKNESS, -1.0).is_err());
        assert!(f.set_scalar_parameter("Radius", 3.0).is_err());
        f.set_scalar_parameter(STROKE_THICKNESS, 5.0).unwrap();
        assert!((f.stroke_thickness() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn figure_ids_are_unique() {
        let a = FigureId::new();
        let b = FigureId::new();
        assert_ne!(a, b);
    }
}
