//! Path optimization: reorder, orient and stitch paths to cut pen travel.
//!
//! [`sort_paths`] is a greedy nearest-neighbour tour over path endpoints.
//! Each step scans every unvisited path, so the sort is O(n²) in the
//! number of paths. [`merge_paths`] then joins consecutive paths whose
//! ends nearly touch, so the pen does not lift between them.

use crate::types::{Point, Polyline};

/// Default join distance for [`merge_paths`], in drawing units.
pub const DEFAULT_MERGE_THRESHOLD: f64 = 0.05;

/// Reorder and orient paths to minimize travel between them.
///
/// Starts from the first non-empty path and repeatedly appends the
/// unvisited path whose start or end is nearest to the current path's
/// last point, reversing it when its end is the nearer one. Ties keep the
/// first candidate found in input order.
///
/// Empty paths are dropped from the output.
#[must_use = "returns the sorted paths"]
pub fn sort_paths(paths: &[Polyline]) -> Vec<Polyline> {
    let candidates: Vec<&Polyline> = paths.iter().filter(|p| !p.is_empty()).collect();

    let Some((&start, _)) = candidates.split_first() else {
        return Vec::new();
    };

    let n = candidates.len();
    let mut visited = vec![false; n];
    let mut result = Vec::with_capacity(n);
    let mut reversals = 0_usize;

    visited[0] = true;
    result.push(start.clone());
    let mut current_end = start.last().copied().unwrap_or_default();

    for _ in 1..n {
        let mut best: Option<(usize, bool)> = None;
        let mut best_dist = f64::INFINITY;

        for (j, candidate) in candidates.iter().enumerate() {
            if visited[j] {
                continue;
            }
            let (Some(&c_start), Some(&c_end)) = (candidate.first(), candidate.last()) else {
                continue;
            };

            let dist_forward = current_end.distance_squared(c_start);
            let dist_reverse = current_end.distance_squared(c_end);
            let (dist, reversed) = if dist_reverse < dist_forward {
                (dist_reverse, true)
            } else {
                (dist_forward, false)
            };

            if dist < best_dist {
                best_dist = dist;
                best = Some((j, reversed));
            }
        }

        let Some((best_idx, best_reversed)) = best else {
            break;
        };
        visited[best_idx] = true;

        let next = if best_reversed {
            reversals += 1;
            candidates[best_idx].reversed()
        } else {
            candidates[best_idx].clone()
        };
        current_end = next.last().copied().unwrap_or(current_end);
        result.push(next);
    }

    tracing::debug!(paths = result.len(), reversals, "sorted paths");
    result
}

/// Join consecutive paths whose ends nearly touch.
///
/// Walks the already-ordered list once. When a path starts within
/// `threshold` of where the previous output path ends, its points (minus
/// the duplicated join point) are appended to that path; the grown path
/// is then tested against the next input path in turn. The comparison is
/// strict, so paths exactly `threshold` apart stay separate. Empty paths
/// are never merged into or from.
#[must_use = "returns the merged paths"]
pub fn merge_paths(paths: &[Polyline], threshold: f64) -> Vec<Polyline> {
    let threshold_sq = threshold * threshold;
    let mut result: Vec<Vec<Point>> = Vec::with_capacity(paths.len());

    for path in paths {
        let points = path.points();
        let touches = |prev: &[Point]| match (prev.last(), points.first()) {
            (Some(end), Some(start)) => end.distance_squared(*start) < threshold_sq,
            _ => false,
        };
        match result.last_mut() {
            Some(prev) if touches(prev.as_slice()) => prev.extend_from_slice(&points[1..]),
            _ => result.push(points.to_vec()),
        }
    }

    tracing::debug!(
        input = paths.len(),
        output = result.len(),
        threshold,
        "merged paths"
    );
    result.into_iter().map(Polyline::new).collect()
}

/// Total pen-up distance between consecutive paths.
#[must_use]
pub fn travel_distance(paths: &[Polyline]) -> f64 {
    paths
        .windows(2)
        .filter_map(|w| Some(w[0].last()?.distance(*w[1].first()?)))
        .sum()
}
