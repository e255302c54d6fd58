//! Circle intersection and circular masking.
//!
//! [`clip_line_to_circle`] and [`clip_segment_to_circle`] follow the
//! accumulator convention: hit points are appended to a caller-supplied
//! `Vec` and the return value says whether anything was hit. Nothing is
//! ever removed from the accumulator, so one buffer can collect hits for
//! many segments.
//!
//! [`clip_polyline_to_circle`] builds on the same quadratic to split whole
//! polylines at the boundary of a round plot area.

use crate::types::{Circle, Point, Polyline};
use crate::vector::almost_equal;

/// Intersect the infinite line through `p0` and `p1` with `circle`.
///
/// Solves `a·t² + b·t + c = 0` for the parametrized line
/// `p0 + t·(p1 − p0)`. Returns `false` when the discriminant is negative
/// or the two points coincide exactly. When the chord the line cuts is
/// within tolerance of zero length a single tangent hit is pushed;
/// otherwise two hits are pushed, the `+√disc` root first. The test does
/// not depend on how far apart `p0` and `p1` are. Hits may lie outside
/// the segment.
pub fn clip_line_to_circle(p0: Point, p1: Point, circle: Circle, hits: &mut Vec<Point>) -> bool {
    let d = p1 - p0;
    let f = p0 - circle.center;

    let a = d.dot(d);
    if a == 0.0 {
        return false;
    }
    let b = 2.0 * d.dot(f);
    let c = circle.radius.mul_add(-circle.radius, f.dot(f));

    let det = b.mul_add(b, -4.0 * a * c);
    if det < 0.0 {
        return false;
    }

    // det / a is four times the squared half-chord, independent of |d|.
    if almost_equal(det / a, 0.0) {
        hits.push(p0.lerp(p1, -b / (2.0 * a)));
        return true;
    }

    let sqrt_det = det.sqrt();
    hits.push(p0.lerp(p1, (-b + sqrt_det) / (2.0 * a)));
    hits.push(p0.lerp(p1, (-b - sqrt_det) / (2.0 * a)));
    true
}

/// Intersect the segment `p0 → p1` with `circle`.
///
/// Endpoints count as inside when `distance <= radius`.
///
/// - Both inside: both endpoints are pushed (the segment is contained).
/// - One inside: the inside endpoint is pushed, followed by the boundary
///   crossing toward the outside endpoint unless the two coincide.
/// - Neither inside: no hit if the closest point of the segment to the
///   center is an endpoint or lies beyond the radius; a single tangent
///   hit if it lies on the circle; otherwise the two boundary crossings,
///   the one toward `p0` first.
pub fn clip_segment_to_circle(
    p0: Point,
    p1: Point,
    circle: Circle,
    hits: &mut Vec<Point>,
) -> bool {
    let center = circle.center;
    let radius = circle.radius;
    let p0_inside = circle.contains(p0);
    let p1_inside = circle.contains(p1);

    if p0_inside && p1_inside {
        hits.push(p0);
        hits.push(p1);
        return true;
    }

    if p0_inside || p1_inside {
        let foot = closest_point_on_line(p0, p1, center);
        let a = chord_half_length(radius, foot.distance(center));
        let (inside, outside) = if p0_inside { (p0, p1) } else { (p1, p0) };
        let crossing = project_point(foot, outside, a);
        hits.push(inside);
        if !inside.almost_eq(crossing) {
            // The inside endpoint sits on the boundary otherwise.
            hits.push(crossing);
        }
        return true;
    }

    let closest = closest_point_on_segment(p0, p1, center);
    if closest.almost_eq(p0) || closest.almost_eq(p1) {
        return false;
    }

    let h = closest.distance(center);
    if h > radius {
        false
    } else if almost_equal(h, radius) {
        hits.push(closest);
        true
    } else if almost_equal(h, 0.0) {
        hits.push(project_point(center, p0, radius));
        hits.push(project_point(center, p1, radius));
        true
    } else {
        let a = chord_half_length(radius, h);
        hits.push(project_point(closest, p0, a));
        hits.push(project_point(closest, p1, a));
        true
    }
}

/// Clip a single polyline to a circle, splitting at boundary crossings.
///
/// Segments that cross the circle boundary are split at the intersection
/// point. The result may be multiple polylines if the original path
/// exits and re-enters the circle. Runs shorter than two points are
/// dropped.
#[must_use = "returns the clipped polyline segments"]
pub fn clip_polyline_to_circle(polyline: &Polyline, circle: Circle) -> Vec<Polyline> {
    let points = polyline.points();
    let mut result = Vec::new();
    let mut current: Vec<Point> = Vec::new();

    let Some(&first) = points.first() else {
        return result;
    };
    if circle.contains(first) {
        current.push(first);
    }

    for pair in points.windows(2) {
        let (prev, p) = (pair[0], pair[1]);
        match (circle.contains(prev), circle.contains(p)) {
            (true, true) => current.push(p),
            (true, false) => {
                if let Some((_, t)) = crossing_params(prev, p, circle) {
                    current.push(prev.lerp(p, t));
                }
                flush(&mut current, &mut result);
            }
            (false, true) => {
                if let Some((t, _)) = crossing_params(prev, p, circle) {
                    current.push(prev.lerp(p, t));
                }
                current.push(p);
            }
            (false, false) => {
                if let Some((t0, t1)) = crossing_params(prev, p, circle) {
                    if (t1 - t0).abs() > 1e-12 {
                        flush(&mut current, &mut result);
                        result.push(Polyline::new(vec![prev.lerp(p, t0), prev.lerp(p, t1)]));
                    }
                }
            }
        }
    }

    flush(&mut current, &mut result);
    result
}

/// Clip multiple polylines to a circle.
///
/// Each input polyline is independently clipped and all resulting runs
/// are flattened into one list.
#[must_use = "returns the clipped polylines"]
pub fn clip_polylines_to_circle(polylines: &[Polyline], circle: Circle) -> Vec<Polyline> {
    let clipped: Vec<Polyline> = polylines
        .iter()
        .flat_map(|pl| clip_polyline_to_circle(pl, circle))
        .collect();
    tracing::debug!(
        input = polylines.len(),
        output = clipped.len(),
        radius = circle.radius,
        "clipped polylines to circle"
    );
    clipped
}

/// Move the run under construction into `result` if it forms a segment.
fn flush(current: &mut Vec<Point>, result: &mut Vec<Polyline>) {
    if current.len() >= 2 {
        result.push(Polyline::new(std::mem::take(current)));
    } else {
        current.clear();
    }
}

/// Line parameters of the boundary crossings inside `[0, 1]`.
///
/// Returns `(entry, exit)` clamped to the segment: when only one root
/// falls in range, the missing side is replaced by the corresponding
/// segment end so callers can pick the side they need.
fn crossing_params(a: Point, b: Point, circle: Circle) -> Option<(f64, f64)> {
    let d = b - a;
    let f = a - circle.center;

    let a_coeff = d.dot(d);
    if a_coeff == 0.0 {
        return None;
    }
    let b_coeff = 2.0 * d.dot(f);
    let c_coeff = circle.radius.mul_add(-circle.radius, f.dot(f));
    let discriminant = b_coeff.mul_add(b_coeff, -4.0 * a_coeff * c_coeff);
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_disc = discriminant.sqrt();
    let t0 = (-b_coeff - sqrt_disc) / (2.0 * a_coeff);
    let t1 = (-b_coeff + sqrt_disc) / (2.0 * a_coeff);
    let in_range = |t: f64| (0.0..=1.0).contains(&t);

    match (in_range(t0), in_range(t1)) {
        (true, true) => Some((t0, t1)),
        (true, false) => Some((t0, t0)),
        (false, true) => Some((t1, t1)),
        (false, false) => None,
    }
}

/// Half the chord length at perpendicular distance `h` from the center.
fn chord_half_length(radius: f64, h: f64) -> f64 {
    radius.mul_add(radius, -(h * h)).max(0.0).sqrt()
}

/// The point `dist` away from `src` in the direction of `dest`.
fn project_point(src: Point, dest: Point, dist: f64) -> Point {
    let len = src.distance(dest);
    if len == 0.0 {
        return src;
    }
    src.lerp(dest, dist / len)
}

/// Foot of the perpendicular from `p` onto the infinite line `a → b`.
fn closest_point_on_line(a: Point, b: Point, p: Point) -> Point {
    let v = b - a;
    let len_sq = v.dot(v);
    if len_sq == 0.0 {
        return a;
    }
    a.lerp(b, v.dot(p - a) / len_sq)
}

/// Point of the segment `a → b` closest to `p`.
fn closest_point_on_segment(a: Point, b: Point, p: Point) -> Point {
    let v = b - a;
    let c1 = v.dot(p - a);
    if c1 <= 0.0 {
        return a;
    }
    let c2 = v.dot(v);
    if c2 <= c1 {
        return b;
    }
    a.lerp(b, c1 / c2)
}
