//! Point-level cleanup: duplicate removal and collinear point removal.
//!
//! Both passes only ever drop points; surviving points keep their order
//! and exact coordinates.

use std::collections::VecDeque;

use crate::types::{Point, Polyline};
use crate::vector::almost_equal;

/// Whether three points lie on one straight line within tolerance.
///
/// Compares the two cross-multiplied slope terms
/// `(y0 − y1)(x0 − x2)` and `(y0 − y2)(x0 − x1)` with [`almost_equal`],
/// which avoids dividing by a vertical slope.
#[must_use]
pub fn are_points_collinear(p0: Point, p1: Point, p2: Point) -> bool {
    almost_equal((p0.y - p1.y) * (p0.x - p2.x), (p0.y - p2.y) * (p0.x - p1.x))
}

/// Drop points that almost equal the previously kept point.
#[must_use = "returns the deduplicated points"]
pub fn remove_duplicate_points(points: &[Point]) -> Vec<Point> {
    let mut result: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if result.last().is_none_or(|&last| !last.almost_eq(p)) {
            result.push(p);
        }
    }
    result
}

/// Collapse runs of collinear points to their endpoints.
///
/// Looks at the first three remaining points. If they are collinear and
/// the middle one lies no farther from the first than the third does, the
/// middle point is dropped and the new triple is tested again. Otherwise
/// the first point is committed and the window slides by one. A middle
/// point that doubles back past the third point is a real direction
/// change and is kept.
#[must_use = "returns the simplified points"]
pub fn remove_collinear_points(points: &[Point]) -> Vec<Point> {
    let mut remaining: VecDeque<Point> = points.iter().copied().collect();
    let mut result = Vec::with_capacity(points.len());

    while remaining.len() >= 3 {
        let (p0, p1, p2) = (remaining[0], remaining[1], remaining[2]);
        if are_points_collinear(p0, p1, p2) && p0.distance_squared(p1) <= p0.distance_squared(p2) {
            remaining.remove(1);
        } else if let Some(p) = remaining.pop_front() {
            result.push(p);
        }
    }

    result.extend(remaining);
    result
}

/// Apply [`remove_duplicate_points`] then [`remove_collinear_points`] to
/// every polyline, dropping any that end up empty.
#[must_use = "returns the cleaned polylines"]
pub fn simplify_paths(polylines: &[Polyline]) -> Vec<Polyline> {
    let cleaned: Vec<Polyline> = polylines
        .iter()
        .map(|pl| Polyline::new(remove_collinear_points(&remove_duplicate_points(pl.points()))))
        .filter(|pl| !pl.is_empty())
        .collect();
    let before: usize = polylines.iter().map(Polyline::len).sum();
    let after: usize = cleaned.iter().map(Polyline::len).sum();
    tracing::trace!(before, after, "removed duplicate and collinear points");
    cleaned
}
