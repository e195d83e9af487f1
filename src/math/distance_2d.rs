use super::{Point2, TOLERANCE};

/// Projects `p` onto the segment `a`→`b` and returns the foot of the
/// perpendicular together with its segment parameter `t`.
///
/// `t` is not clamped, so values outside `[0, 1]` mean the foot lies
/// beyond one of the endpoints. Returns `None` for a zero-length segment.
#[must_use]
pub fn project_onto_segment(p: &Point2, a: &Point2, b: &Point2) -> Option<(Point2, f64)> {
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        return None;
    }
    let t = (p - a).dot(&d) / len_sq;
    Some((a + d * t, t))
}

/// Returns the minimum distance from `p` to the segment `a`→`b`.
///
/// Points beyond the segment extent measure to the nearest endpoint.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    match project_onto_segment(p, a, b) {
        Some((_, t)) => {
            let t = t.clamp(0.0, 1.0);
            let closest = a + (b - a) * t;
            (p - closest).norm()
        }
        // Degenerate segment (zero length).
        None => (p - a).norm(),
    }
}

/// Returns the perpendicular distance from `p` to the segment `a`→`b`,
/// or `None` when the perpendicular foot falls outside the segment.
#[must_use]
pub fn perpendicular_dist_within(p: &Point2, a: &Point2, b: &Point2) -> Option<f64> {
    let (foot, t) = project_onto_segment(p, a, b)?;
    if (0.0..=1.0).contains(&t) {
        Some((p - foot).norm())
    } else {
        None
    }
}
