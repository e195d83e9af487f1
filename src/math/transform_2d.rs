use nalgebra::Rotation2;

use super::{Point2, TOLERANCE};

/// Rotates `p` about `pivot` by `degrees`.
///
/// Screen coordinates have the Y axis pointing down, so a positive angle
/// turns the point clockwise on screen.
#[must_use]
pub fn rotate_point(p: &Point2, pivot: &Point2, degrees: f64) -> Point2 {
    let rot = Rotation2::new(degrees.to_radians());
    pivot + rot * (p - pivot)
}

/// Scales `p` away from (or towards) `pivot` by `factor`.
#[must_use]
pub fn scale_point(p: &Point2, pivot: &Point2, factor: f64) -> Point2 {
    pivot + (p - pivot) * factor
}

/// Reflects `p` across the infinite line through `a` and `b`.
///
/// The point is projected onto the line and its perpendicular offset is
/// doubled. When `a` and `b` coincide there is no line and `p` is returned
/// unchanged.
#[must_use]
pub fn reflect_point(p: &Point2, a: &Point2, b: &Point2) -> Point2 {
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        return *p;
    }
    let t = (p - a).dot(&d) / len_sq;
    let foot = a + d * t;
    Point2::from(foot.coords * 2.0 - p.coords)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn rotate_90_is_clockwise_on_screen() {
        // +X rotated by 90 degrees lands on +Y, which points down on screen.
        let r = rotate_point(&p(1.0, 0.0), &Point2::origin(), 90.0);
        assert_abs_diff_eq!(r, p(0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn rotate_about_pivot() {
        let r = rotate_point(&p(12.0, 10.0), &p(10.0, 10.0), 180.0);
        assert_abs_diff_eq!(r, p(8.0, 10.0), epsilon = 1e-12);
    }

    #[test]
    fn scale_towards_pivot() {
        let s = scale_point(&p(10.0, 0.0), &p(0.0, 0.0), 0.5);
        assert_abs_diff_eq!(s, p(5.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn reflect_across_x_axis() {
        let r = reflect_point(&p(3.0, 4.0), &p(0.0, 0.0), &p(1.0, 0.0));
        assert_abs_diff_eq!(r, p(3.0, -4.0), epsilon = 1e-12);
    }

    #[test]
    fn reflect_across_diagonal() {
        let r = reflect_point(&p(2.0, 0.0), &p(0.0, 0.0), &p(1.0, 1.0));
        assert_abs_diff_eq!(r, p(0.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn reflect_is_involution() {
        let (a, b) = (p(-3.0, 7.0), p(11.0, -2.5));
        let orig = p(4.25, 9.5);
        let back = reflect_point(&reflect_point(&orig, &a, &b), &a, &b);
        assert_abs_diff_eq!(back, orig, epsilon = 1e-9);
    }

    #[test]
    fn reflect_with_coincident_line_points_is_identity() {
        let q = p(5.0, 6.0);
        assert_eq!(reflect_point(&q, &p(1.0, 1.0), &p(1.0, 1.0)), q);
    }
}
