pub mod bounds_2d;
pub mod distance_2d;
pub mod polygon_2d;
pub mod transform_2d;

pub use bounds_2d::Aabb;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for degeneracy checks.
pub const TOLERANCE: f64 = 1e-9;

/// Returns the Euclidean distance between two points.
#[must_use]
pub fn distance(a: &Point2, b: &Point2) -> f64 {
    (b - a).norm()
}

/// Returns `true` if both coordinates of the point are finite.
#[must_use]
pub fn is_finite(p: &Point2) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
