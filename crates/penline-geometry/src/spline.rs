//! Cardinal (Catmull-Rom style) spline interpolation through a polyline.
//!
//! Every input point is kept and `segments` samples are generated per
//! input interval. Tangents at each control point are the difference of
//! its neighbours scaled by `tension`; the ends are padded by repeating
//! the boundary points (open) or wrapping around (closed).
//!
//! The four cubic Hermite basis weights depend only on the sample index
//! within an interval, so they are tabulated once per call and reused
//! for every interval.

use serde::{Deserialize, Serialize};

use crate::types::{GeometryError, Point};

/// Parameters of [`cubic_spline`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplineConfig {
    /// Tangent scale. `0.0` eases linearly into each control point; larger
    /// values overshoot more.
    pub tension: f64,
    /// Number of samples generated per input interval.
    pub segments: usize,
}

impl Default for SplineConfig {
    fn default() -> Self {
        Self {
            tension: 0.5,
            segments: 25,
        }
    }
}

/// Interpolate a smooth curve through `points`.
///
/// Output length is `(N − 1) × segments + 1` for open paths and
/// `N × segments + 1` for closed paths, where the closed ring repeats its
/// first point at the end. Paths with fewer than two points are returned
/// unchanged.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidSegments`] when `segments` is zero.
pub fn cubic_spline(
    points: &[Point],
    config: SplineConfig,
    closed: bool,
) -> Result<Vec<Point>, GeometryError> {
    let SplineConfig { tension, segments } = config;
    if segments == 0 {
        return Err(GeometryError::InvalidSegments);
    }
    let n = points.len();
    if n < 2 {
        return Ok(points.to_vec());
    }

    let basis = hermite_basis(segments);

    // Control points padded with one extra point on each side.
    let mut padded = Vec::with_capacity(n + 2);
    if closed {
        padded.push(points[n - 1]);
        padded.extend_from_slice(points);
        padded.push(points[0]);
    } else {
        padded.push(points[0]);
        padded.extend_from_slice(points);
        padded.push(points[n - 1]);
    }

    let intervals = if closed { n } else { n - 1 };
    let mut result = Vec::with_capacity(intervals * segments + 1);
    for k in 1..n {
        let window = [padded[k - 1], padded[k], padded[k + 1], padded[k + 2]];
        emit_interval(window, tension, &basis, &mut result);
    }
    if closed {
        // Closing interval from the last point back to the first.
        let window = [points[(n + n - 2) % n], points[n - 1], points[0], points[1 % n]];
        emit_interval(window, tension, &basis, &mut result);
        result.push(points[0]);
    } else {
        result.push(points[n - 1]);
    }

    Ok(result)
}

/// Hermite weights `[h00, h01, h10, h11]` for `t = i / segments`,
/// `i in 0..segments`.
fn hermite_basis(segments: usize) -> Vec<[f64; 4]> {
    #[allow(clippy::cast_precision_loss)]
    let denom = segments as f64;
    (0..segments)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let st = i as f64 / denom;
            let st2 = st * st;
            let st3 = st2 * st;
            let st23 = st3 * 2.0;
            let st32 = st2 * 3.0;
            [
                st23 - st32 + 1.0,
                st32 - st23,
                st3 - 2.0 * st2 + st,
                st3 - st2,
            ]
        })
        .collect()
}

/// Sample the interval `window[1] → window[2]` with tangents taken from
/// the outer neighbours, pushing `basis.len()` points (start included,
/// end excluded).
fn emit_interval(window: [Point; 4], tension: f64, basis: &[[f64; 4]], out: &mut Vec<Point>) {
    let [prev, start, end, next] = window;
    let t1 = (end - prev) * tension;
    let t2 = (next - start) * tension;
    out.extend(basis.iter().map(|&[c1, c2, c3, c4]| {
        Point::new(
            c1 * start.x + c2 * end.x + c3 * t1.x + c4 * t2.x,
            c1 * start.y + c2 * end.y + c3 * t1.y + c4 * t2.y,
        )
    }));
}
