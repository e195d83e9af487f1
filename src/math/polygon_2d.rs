use super::{distance, Point2};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise in a Y-up frame, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns the arithmetic mean of the given points.
///
/// An empty slice yields the origin.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean_point(points: &[Point2]) -> Point2 {
    if points.is_empty() {
        return Point2::origin();
    }
    let sum = points
        .iter()
        .fold(nalgebra::Vector2::zeros(), |acc, p| acc + p.coords);
    Point2::from(sum / points.len() as f64)
}

/// Returns the lengths of the closed polygon edges `p[i]`→`p[i+1]`,
/// including the closing edge back to the first vertex.
#[must_use]
pub fn edge_lengths(points: &[Point2]) -> Vec<f64> {
    let n = points.len();
    (0..n)
        .map(|i| distance(&points[i], &points[(i + 1) % n]))
        .collect()
}

/// Returns the shortest distance from `pivot` to any of `points`.
#[must_use]
pub fn min_distance_to(pivot: &Point2, points: &[Point2]) -> f64 {
    points
        .iter()
        .map(|p| distance(pivot, p))
        .fold(f64::INFINITY, f64::min)
}

/// Cross product of the edge `a`→`b` with the vector from `p` to `a`.
///
/// The sign tells which side of the edge `p` lies on; zero means collinear.
#[must_use]
pub fn edge_cross(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    (a.x - p.x) * (b.y - a.y) - (b.x - a.x) * (a.y - p.y)
}

/// Returns `true` if `p` lies inside or on the triangle `a`, `b`, `c`.
///
/// Each edge cross product may miss the consistent sign by up to `eps`,
/// which widens the accepted region slightly around the boundary.
#[must_use]
pub fn point_in_triangle(p: &Point2, a: &Point2, b: &Point2, c: &Point2, eps: f64) -> bool {
    let ab = edge_cross(p, a, b);
    let bc = edge_cross(p, b, c);
    let ca = edge_cross(p, c, a);
    (ab > -eps && bc > -eps && ca > -eps) || (ab < eps && bc < eps && ca < eps)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn signed_area_ccw_square() {
        let pts = vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
        assert!((signed_area(&pts) - 1.0).abs() < TOL);
    }

    #[test]
    fn signed_area_cw_square() {
        let pts = vec![p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0)];
        assert!((signed_area(&pts) + 1.0).abs() < TOL);
    }

    #[test]
    fn signed_area_collinear_is_zero() {
        let pts = vec![p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0)];
        assert!(signed_area(&pts).abs() < TOL);
    }

    #[test]
    fn mean_of_triangle() {
        let c = mean_point(&[p(0.0, 0.0), p(3.0, 0.0), p(0.0, 3.0)]);
        assert!((c - p(1.0, 1.0)).norm() < TOL);
    }

    #[test]
    fn mean_of_empty_is_origin() {
        assert_eq!(mean_point(&[]), Point2::origin());
    }

    #[test]
    fn edge_lengths_include_closing_edge() {
        let lens = edge_lengths(&[p(0.0, 0.0), p(3.0, 0.0), p(3.0, 4.0)]);
        assert_eq!(lens.len(), 3);
        assert!((lens[0] - 3.0).abs() < TOL);
        assert!((lens[1] - 4.0).abs() < TOL);
        assert!((lens[2] - 5.0).abs() < TOL);
    }

    #[test]
    fn triangle_containment_either_winding() {
        let (a, b, c) = (p(0.0, 0.0), p(10.0, 0.0), p(0.0, 10.0));
        assert!(point_in_triangle(&p(2.0, 2.0), &a, &b, &c, 0.0));
        assert!(point_in_triangle(&p(2.0, 2.0), &a, &c, &b, 0.0));
        assert!(!point_in_triangle(&p(8.0, 8.0), &a, &b, &c, 0.0));
    }
}
