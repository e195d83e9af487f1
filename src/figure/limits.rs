use serde::{Deserialize, Serialize};

/// Minimum sizes below which `scale` refuses to shrink a figure.
///
/// These are interaction guards that keep figures grabbable, not
/// mathematical requirements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleLimits {
    /// Minimum length of any polygon edge.
    pub min_edge_length: f64,
    /// Minimum distance from a line's midpoint to its endpoints.
    pub min_line_half_length: f64,
    /// Minimum circle radius.
    pub min_circle_radius: f64,
    /// Minimum centroid-to-vertex distance for triangles.
    pub min_triangle_vertex_distance: f64,
    /// Minimum centroid-to-vertex distance for rectangles.
    pub min_rectangle_vertex_distance: f64,
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self {
            min_edge_length: 10.0,
            min_line_half_length: 10.0,
            min_circle_radius: 10.0,
            min_triangle_vertex_distance: 20.0,
            min_rectangle_vertex_distance: 10.0,
        }
    }
}

impl ScaleLimits {
    /// Limits that only refuse a scale producing a degenerate or
    /// non-finite definition.
    #[must_use]
    pub fn unrestricted() -> Self {
        Self {
            min_edge_length: 0.0,
            min_line_half_length: 0.0,
            min_circle_radius: 0.0,
            min_triangle_vertex_distance: 0.0,
            min_rectangle_vertex_distance: 0.0,
        }
    }
}

/// Result of a scale request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleOutcome {
    /// The definition was scaled.
    Applied,
    /// The definition was left unchanged.
    Refused,
}

impl ScaleOutcome {
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, ScaleOutcome::Applied)
    }
}
