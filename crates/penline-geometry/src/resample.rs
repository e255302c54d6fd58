//! Arclength measurement and even-spacing resampling of polylines.
//!
//! Resampled points always lie on the input polyline: each one is a linear
//! interpolation between two consecutive input points (including the
//! implicit closing segment for closed paths).

use crate::types::{BoundingBox, GeometryError, Point};

/// Total length of a polyline.
///
/// When `closed` is set and there are at least two points, the closing
/// segment from the last point back to the first is included.
#[must_use]
pub fn polyline_perimeter(points: &[Point], closed: bool) -> f64 {
    let open: f64 = points.windows(2).map(|w| w[0].distance(w[1])).sum();
    match (closed, points.first(), points.last()) {
        (true, Some(&first), Some(&last)) if points.len() > 1 => open + last.distance(first),
        _ => open,
    }
}

/// Cumulative distance at each vertex, normalized by the total length.
///
/// The result has the same length as `points`, starts at `0.0`, ends at
/// `1.0`, and never decreases. A path with zero total length (a single
/// point, or all points coincident) divides by zero and yields `NaN`
/// entries; callers that may pass such paths must check for them.
#[must_use]
pub fn polyline_arclengths(points: &[Point]) -> Vec<f64> {
    let mut total = 0.0;
    let mut distances: Vec<f64> = points
        .iter()
        .enumerate()
        .map(|(i, &cur)| {
            if i > 0 {
                total += points[i - 1].distance(cur);
            }
            total
        })
        .collect();
    for d in &mut distances {
        *d /= total;
    }
    distances
}

/// Resample a polyline so consecutive samples are `spacing` apart along
/// its length.
///
/// Walks each segment (plus the closing segment when `closed`), emitting a
/// linearly interpolated point at every multiple of `spacing` along the
/// cumulative length. The first sample is always the first point; the
/// final partial interval is dropped.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidSpacing`] unless `spacing` is positive
/// and finite.
pub fn resample_by_spacing(
    points: &[Point],
    spacing: f64,
    closed: bool,
) -> Result<Vec<Point>, GeometryError> {
    if !(spacing > 0.0 && spacing.is_finite()) {
        return Err(GeometryError::InvalidSpacing(spacing));
    }

    let segment_count = if closed {
        points.len()
    } else {
        points.len().saturating_sub(1)
    };

    let mut result = Vec::new();
    let mut total_length = 0.0;
    let mut step: u32 = 0;

    for i in 0..segment_count {
        let cur = points[i];
        let next = points[(i + 1) % points.len()];
        let segment_length = cur.distance(next);
        total_length += segment_length;
        let segment_start = total_length - segment_length;

        loop {
            let sample = f64::from(step) * spacing;
            if sample > total_length {
                break;
            }
            let t = if segment_length > 0.0 {
                (sample - segment_start) / segment_length
            } else {
                0.0
            };
            result.push(cur.lerp(next, t));
            step += 1;
        }
    }

    Ok(result)
}

/// Resample a polyline into roughly `count` evenly spaced points.
///
/// Derives `spacing = perimeter / count` and delegates to
/// [`resample_by_spacing`]. A `count` of zero yields an empty result.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidSpacing`] when the polyline has zero
/// length, since no positive spacing can be derived from it.
pub fn resample_by_count(
    points: &[Point],
    count: usize,
    closed: bool,
) -> Result<Vec<Point>, GeometryError> {
    if count == 0 {
        return Ok(Vec::new());
    }
    #[allow(clippy::cast_precision_loss)]
    let spacing = polyline_perimeter(points, closed) / count as f64;
    resample_by_spacing(points, spacing, closed)
}

/// Axis-aligned bounds of a point set.
///
/// # Errors
///
/// Returns [`GeometryError::EmptyPoints`] when `points` is empty.
pub fn bounds(points: &[Point]) -> Result<BoundingBox, GeometryError> {
    let (&first, rest) = points.split_first().ok_or(GeometryError::EmptyPoints)?;
    Ok(rest
        .iter()
        .fold(BoundingBox::from_corners(first, first), |acc, p| {
            BoundingBox::new(
                acc.min_x.min(p.x),
                acc.min_y.min(p.y),
                acc.max_x.max(p.x),
                acc.max_y.max(p.y),
            )
        }))
}
