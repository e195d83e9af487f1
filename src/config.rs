//! Editor-wide settings applied to newly created figures.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PersistenceError, Result};
use crate::figure::{Color, ScaleLimits, Stroke, DEFAULT_STROKE_THICKNESS};
use crate::math::Vector2;

/// Displacement applied to a duplicated figure.
pub const DEFAULT_CLONE_OFFSET: (f64, f64) = (50.0, 50.0);

/// Pointer tolerance used for hit testing when the caller has no better value.
pub const DEFAULT_HIT_EPSILON: f64 = 5.0;

/// Editor settings. Missing JSON fields take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub limits: ScaleLimits,
    pub clone_offset: Vector2,
    pub default_stroke_thickness: f64,
    pub default_color: Color,
    pub hit_epsilon: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            limits: ScaleLimits::default(),
            clone_offset: Vector2::new(DEFAULT_CLONE_OFFSET.0, DEFAULT_CLONE_OFFSET.1),
            default_stroke_thickness: DEFAULT_STROKE_THICKNESS,
            default_color: Color::default(),
            hit_epsilon: DEFAULT_HIT_EPSILON,
        }
    }
}

impl EditorConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(PersistenceError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json =
            std::fs::read_to_string(path).map_err(|e| PersistenceError::io(path, e))?;
        let config = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), "editor configuration loaded");
        Ok(config)
    }

    /// Stroke given to figures created without an explicit thickness.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured thickness is not positive.
    pub fn default_stroke(&self) -> Result<Stroke> {
        Ok(Stroke::new("EditorConfig", self.default_stroke_thickness)?)
    }

    /// Checks that every value is finite and in range.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        self.default_stroke()?;
        let invalid = |field: &str| {
            PersistenceError::InvalidDocument(format!("configuration field {field} is out of range"))
        };
        if !self.hit_epsilon.is_finite() || self.hit_epsilon < 0.0 {
            return Err(invalid("hit_epsilon").into());
        }
        if !self.clone_offset.iter().all(|v| v.is_finite()) {
            return Err(invalid("clone_offset").into());
        }
        let l = &self.limits;
        let minimums = [
            l.min_edge_length,
            l.min_line_half_length,
            l.min_circle_radius,
            l.min_triangle_vertex_distance,
            l.min_rectangle_vertex_distance,
        ];
        if minimums.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return Err(invalid("limits").into());
        }
        Ok(())
    }
}
