use std::collections::HashMap;

use crate::error::RegistryError;
use crate::figure::Figure;
use crate::math::Point2;

/// Named construction arguments for a figure type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    points: HashMap<String, Point2>,
    scalars: HashMap<String, f64>,
}

impl ParameterSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures every named parameter of an existing figure.
    #[must_use]
    pub fn from_figure(figure: &Figure) -> Self {
        let mut params = Self::new();
        for name in figure.point_parameter_names() {
            params.insert_point(*name, figure.point_parameter(name));
        }
        for name in figure.scalar_parameter_names() {
            params.insert_scalar(*name, figure.scalar_parameter(name));
        }
        params
    }

    #[must_use]
    pub fn with_point(mut self, name: impl Into<String>, value: Point2) -> Self {
        self.insert_point(name, value);
        self
    }

    #[must_use]
    pub fn with_scalar(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert_scalar(name, value);
        self
    }

    pub fn insert_point(&mut self, name: impl Into<String>, value: Point2) {
        self.points.insert(name.into(), value);
    }

    pub fn insert_scalar(&mut self, name: impl Into<String>, value: f64) {
        self.scalars.insert(name.into(), value);
    }

    #[must_use]
    pub fn point(&self, name: &str) -> Option<Point2> {
        self.points.get(name).copied()
    }

    #[must_use]
    pub fn scalar(&self, name: &str) -> Option<f64> {
        self.scalars.get(name).copied()
    }

    /// Looks up a point required by `figure`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MissingParameter`] if the name is absent.
    pub fn require_point(
        &self,
        figure: &'static str,
        name: &'static str,
    ) -> Result<Point2, RegistryError> {
        self.point(name).ok_or(RegistryError::MissingParameter {
            figure,
            parameter: name,
        })
    }

    /// Looks up a scalar required by `figure`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MissingParameter`] if the name is absent.
    pub fn require_scalar(
        &self,
        figure: &'static str,
        name: &'static str,
    ) -> Result<f64, RegistryError> {
        self.scalar(name).ok_or(RegistryError::MissingParameter {
            figure,
            parameter: name,
        })
    }

    pub fn points(&self) -> impl Iterator<Item = (&str, Point2)> {
        self.points.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn scalars(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scalars.iter().map(|(k, v)| (k.as_str(), *v))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.scalars.is_empty()
    }
}
