//! Compile-time table of figure types.
//!
//! The registry maps a type name to its parameter schema and constructor.
//! It is an explicitly constructed value, so callers and tests decide which
//! types are available.

mod parameters;

pub use parameters::ParameterSet;

use crate::config::EditorConfig;
use crate::error::{GeometryError, RegistryError, Result};
use crate::figure::{
    Circle, Figure, Line, Primitive, Rectangle, Shape, Stroke, Triangle,
    COMMON_SCALAR_PARAMETERS, STROKE_THICKNESS,
};
use crate::math::Point2;

type ShapeConstructor = fn(&[Point2]) -> std::result::Result<Shape, GeometryError>;

fn build_shape<T: Primitive>(points: &[Point2]) -> std::result::Result<Shape, GeometryError> {
    Ok(T::from_definition(points)?.into())
}

fn default_shape<T: Primitive>() -> Shape {
    T::default_definition().into()
}

/// Schema and constructors of one figure type.
#[derive(Debug, Clone, Copy)]
pub struct RegistryEntry {
    name: &'static str,
    point_parameters: &'static [&'static str],
    scalar_parameters: &'static [&'static str],
    construct: ShapeConstructor,
    construct_default: fn() -> Shape,
}

impl RegistryEntry {
    /// Describes the primitive type `T`.
    #[must_use]
    pub fn of<T: Primitive>() -> Self {
        Self {
            name: T::NAME,
            point_parameters: T::POINT_PARAMETERS,
            scalar_parameters: COMMON_SCALAR_PARAMETERS,
            construct: build_shape::<T>,
            construct_default: default_shape::<T>,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn point_parameters(&self) -> &'static [&'static str] {
        self.point_parameters
    }

    #[must_use]
    pub fn scalar_parameters(&self) -> &'static [&'static str] {
        self.scalar_parameters
    }
}

/// Figure type table together with the settings applied to created figures.
#[derive(Debug, Clone)]
pub struct FigureRegistry {
    entries: Vec<RegistryEntry>,
    config: EditorConfig,
}

impl Default for FigureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FigureRegistry {
    /// Registers the four built-in figure types with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Registers the built-in figure types with the given settings.
    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        Self::builder()
            .register::<Line>()
            .register::<Circle>()
            .register::<Triangle>()
            .register::<Rectangle>()
            .config(config)
            .build()
    }

    /// Starts an empty registry.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Registered type names, in registration order.
    pub fn available_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Looks up the entry for a type name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownType`] if `name` is not registered.
    pub fn entry(&self, name: &str) -> std::result::Result<&RegistryEntry, RegistryError> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| RegistryError::UnknownType {
                name: name.to_owned(),
            })
    }

    /// Ordered point parameter names of a type.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownType`] if `name` is not registered.
    pub fn point_parameter_names(
        &self,
        name: &str,
    ) -> std::result::Result<&'static [&'static str], RegistryError> {
        Ok(self.entry(name)?.point_parameters)
    }

    /// Ordered scalar parameter names of a type.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownType`] if `name` is not registered.
    pub fn scalar_parameter_names(
        &self,
        name: &str,
    ) -> std::result::Result<&'static [&'static str], RegistryError> {
        Ok(self.entry(name)?.scalar_parameters)
    }

    /// Builds a figure of type `name` from named parameters.
    ///
    /// Every name in the type's schema must be present; extra names are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownType`] for an unregistered type,
    /// [`RegistryError::MissingParameter`] for an absent name,
    /// [`RegistryError::InvalidParameter`] for a bad stroke thickness and a
    /// [`GeometryError`] for a degenerate definition.
    pub fn create(&self, name: &str, params: &ParameterSet) -> Result<Figure> {
        let entry = self.entry(name)?;

        let points = entry
            .point_parameters
            .iter()
            .map(|p| params.require_point(entry.name, *p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let thickness = params.require_scalar(entry.name, STROKE_THICKNESS)?;
        let stroke = Stroke::new(entry.name, thickness)?;

        let shape = (entry.construct)(&points)?;
        tracing::debug!(figure = entry.name, "figure constructed");
        Ok(self.decorate(shape, stroke))
    }

    /// Builds a figure of type `name` with its built-in geometry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownType`] for an unregistered type, or
    /// an error if the configured default stroke is invalid.
    pub fn create_default(&self, name: &str) -> Result<Figure> {
        let entry = self.entry(name)?;
        let stroke = self.config.default_stroke()?;
        tracing::debug!(figure = entry.name, "default figure constructed");
        Ok(self.decorate((entry.construct_default)(), stroke))
    }

    fn decorate(&self, shape: Shape, stroke: Stroke) -> Figure {
        Figure::new(shape)
            .with_stroke(stroke)
            .with_color(self.config.default_color)
            .with_limits(self.config.limits)
    }
}

/// Incrementally assembles a [`FigureRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<RegistryEntry>,
    config: EditorConfig,
}

impl RegistryBuilder {
    /// Adds the primitive type `T`. Registering a name twice replaces the
    /// earlier entry in place.
    #[must_use]
    pub fn register<T: Primitive>(mut self) -> Self {
        let entry = RegistryEntry::of::<T>();
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(slot) => *slot = entry,
            None => self.entries.push(entry),
        }
        self
    }

    #[must_use]
    pub fn config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn build(self) -> FigureRegistry {
        tracing::debug!(types = self.entries.len(), "figure registry built");
        FigureRegistry {
            entries: self.entries,
            config: self.config,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::FiguraError;
    use crate::figure::{Color, ScaleLimits};

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn builtins_in_registration_order() {
        let registry = FigureRegistry::new();
        let names: Vec<_> = registry.available_types().collect();
        assert_eq!(names, ["Line", "Circle", "Triangle", "Rectangle"]);
    }

    #[test]
    fn schemas_are_ordered() {
        let registry = FigureRegistry::new();
        assert_eq!(registry.point_parameter_names("Line").unwrap(), &["Start", "End"]);
        assert_eq!(
            registry.point_parameter_names("Rectangle").unwrap(),
            &["P1", "P2", "P3", "P4"]
        );
        assert_eq!(
            registry.scalar_parameter_names("Circle").unwrap(),
            &[STROKE_THICKNESS]
        );
    }

    #[test]
    fn unknown_type_is_reported() {
        let registry = FigureRegistry::new();
        assert!(matches!(
            registry.point_parameter_names("Hexagon"),
            Err(RegistryError::UnknownType { .. })
        ));
        assert!(matches!(
            registry.create_default("Hexagon"),
            Err(FiguraError::Registry(RegistryError::UnknownType { .. }))
        ));
    }

    #[test]
    fn create_line_from_parameters() {
        let registry = FigureRegistry::new();
        let params = ParameterSet::new()
            .with_point("Start", p(0.0, 0.0))
            .with_point("End", p(10.0, 0.0))
            .with_scalar(STROKE_THICKNESS, 4.0)
            .with_scalar("Unused", 1.0);
        let figure = registry.create("Line", &params).unwrap();
        assert_eq!(figure.name(), "Line");
        assert_eq!(figure.point_parameter("End"), p(10.0, 0.0));
        assert!((figure.stroke_thickness() - 4.0).abs() < f64::EPSILON);
        assert_eq!(figure.color(), Color::BLACK);
    }

    #[test]
    fn missing_point_parameter() {
        let registry = FigureRegistry::new();
        let params = ParameterSet::new()
            .with_point("Start", p(0.0, 0.0))
            .with_scalar(STROKE_THICKNESS, 2.0);
        let err = registry.create("Line", &params).unwrap_err();
        assert!(err.is_missing_parameter());
    }

    #[test]
    fn missing_stroke_thickness() {
        let registry = FigureRegistry::new();
        let params = ParameterSet::new()
            .with_point("Center", p(0.0, 0.0))
            .with_point("PointOnCircle", p(10.0, 0.0));
        let err = registry.create("Circle", &params).unwrap_err();
        assert!(matches!(
            err,
            FiguraError::Registry(RegistryError::MissingParameter {
                parameter: STROKE_THICKNESS,
                ..
            })
        ));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let registry = FigureRegistry::new();
        let degenerate = ParameterSet::new()
            .with_point("Center", p(1.0, 1.0))
            .with_point("PointOnCircle", p(1.0, 1.0))
            .with_scalar(STROKE_THICKNESS, 2.0);
        assert!(matches!(
            registry.create("Circle", &degenerate),
            Err(FiguraError::Geometry(_))
        ));

        let thin = ParameterSet::new()
            .with_point("Center", p(1.0, 1.0))
            .with_point("PointOnCircle", p(5.0, 1.0))
            .with_scalar(STROKE_THICKNESS, -1.0);
        assert!(matches!(
            registry.create("Circle", &thin),
            Err(FiguraError::Registry(RegistryError::InvalidParameter { .. }))
        ));
    }

    #[test]
    fn default_geometries() {
        let registry = FigureRegistry::new();
        let line = registry.create_default("Line").unwrap();
        assert_eq!(line.point_parameter("Start"), p(50.0, 50.0));
        assert_eq!(line.point_parameter("End"), p(150.0, 150.0));

        let circle = registry.create_default("Circle").unwrap();
        assert_eq!(circle.point_parameter("Center"), p(250.0, 250.0));
        assert_eq!(circle.point_parameter("PointOnCircle"), p(200.0, 200.0));

        let triangle = registry.create_default("Triangle").unwrap();
        assert_eq!(triangle.point_parameter("P3"), p(100.0, 150.0));

        let rect = registry.create_default("Rectangle").unwrap();
        assert_eq!(rect.point_parameter("P3"), p(150.0, 150.0));
        assert_eq!(rect.point_parameter("P4"), p(50.0, 150.0));

        for f in [line, circle, triangle, rect] {
            assert!((f.stroke_thickness() - 2.0).abs() < f64::EPSILON);
            assert_eq!(f.color(), Color::BLACK);
            f.validate().unwrap();
        }
    }

    #[test]
    fn builder_registers_subset_with_config() {
        let config = EditorConfig {
            default_color: Color(0xFF00_FF00),
            limits: ScaleLimits::unrestricted(),
            ..EditorConfig::default()
        };
        let registry = FigureRegistry::builder()
            .register::<Circle>()
            .register::<Circle>()
            .config(config)
            .build();
        assert_eq!(registry.available_types().collect::<Vec<_>>(), ["Circle"]);
        assert!(!registry.contains("Line"));

        let circle = registry.create_default("Circle").unwrap();
        assert_eq!(circle.color(), Color(0xFF00_FF00));
        assert_eq!(circle.limits(), &ScaleLimits::unrestricted());
    }
}
