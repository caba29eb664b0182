//! Closed-form routines for steering around a circular obstacle.
//!
//! All inputs are plane coordinates.  Degenerate configurations (a point on
//! or inside the circle, parallel rays, no forward intersection) yield `None`
//! rather than an error: they describe legitimate geometry, such as a path
//! that is already clear of the obstacle.

use crate::Vec2;

/// Denominators smaller than this are treated as parallel rays.
const PARALLEL_EPS: f64 = 1e-12;

/// The two points where lines through `a` touch the circle `(c, r)`.
///
/// Returns `None` unless `a` is strictly outside the circle.  With
/// `d = |a - c|`, the tangent points sit at distance `x = r²/d` along the
/// centre-to-`a` axis and `y = sqrt(r² - x²)` either side of it.
pub fn tangent_points(a: Vec2, c: Vec2, r: f64) -> Option<(Vec2, Vec2)> {
    let d = a.distance(c);
    if d.is_nan() || d <= r {
        return None;
    }
    let u = (a - c).normalized()?;
    let x = r * r / d;
    let y = (r * r - x * x).max(0.0).sqrt();

    let along = c + u * x;
    let across = u.perp() * y;
    Some((along + across, along - across))
}

/// Intersection of the ray from `a` through `at` with the ray from `b`
/// through `bt`, if it lies ahead of both starting points.
pub fn positive_intersection(a: Vec2, at: Vec2, b: Vec2, bt: Vec2) -> Option<Vec2> {
    let a_delta = at - a;
    let b_delta = bt - b;
    let a_perp = a_delta.perp();
    let b_perp = b_delta.perp();

    let s_den = b_delta.dot(a_perp);
    let t_den = a_delta.dot(b_perp);
    if s_den.abs() < PARALLEL_EPS || t_den.abs() < PARALLEL_EPS {
        return None;
    }

    // a + t·aΔ = b + s·bΔ
    let s = (a - b).dot(a_perp) / s_den;
    if s < 0.0 {
        return None;
    }
    let t = (b - a).dot(b_perp) / t_den;
    if t < 0.0 {
        return None;
    }
    Some(a + a_delta * t)
}

/// The detour point between `a` and `b` that skirts the circle `(c, r)`
/// with the least deviation.
///
/// Each endpoint contributes two tangent rays; of the up to four pairwise
/// forward intersections, the one closest to `c` wins.  `None` if either
/// endpoint is not outside the circle or no forward intersection exists.
pub fn circle_avoidance_waypoint(a: Vec2, b: Vec2, c: Vec2, r: f64) -> Option<Vec2> {
    let (a0, a1) = tangent_points(a, c, r)?;
    let (b0, b1) = tangent_points(b, c, r)?;

    [a0, a1]
        .into_iter()
        .flat_map(|at| [b0, b1].into_iter().map(move |bt| (at, bt)))
        .filter_map(|(at, bt)| positive_intersection(a, at, b, bt))
        .min_by(|p, q| p.distance(c).total_cmp(&q.distance(c)))
}
