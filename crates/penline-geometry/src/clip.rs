//! Axis-aligned box clipping for polylines and polygons.
//!
//! Open polylines use Cohen-Sutherland outcodes and may split into several
//! runs where they leave and re-enter the box. Closed outlines use
//! Sutherland-Hodgman, clipping the ring against each box edge in turn so
//! the result stays a single polygon.
//!
//! Boxes arrive as [`BoundingBox`]; flat `[xmin, ymin, xmax, ymax]` and
//! corner-pair inputs are normalized by its conversions, which reject
//! malformed arities before any clipping happens.

use crate::types::{BoundingBox, Point, Polyline};

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

/// Clip a set of paths to `bbox`.
///
/// With `border` unset every path is clipped as an open polyline and all
/// resulting runs are flattened into one list. With `border` set every
/// path is clipped as a closed polygon; when `close_lines` is also set
/// and a clipped ring has more than two points, its first point is
/// appended again. Polygons that clip away entirely are dropped.
#[must_use = "returns the clipped paths"]
pub fn clip_polylines_to_box(
    polylines: &[Polyline],
    bbox: &BoundingBox,
    border: bool,
    close_lines: bool,
) -> Vec<Polyline> {
    let clipped: Vec<Polyline> = if border {
        polylines
            .iter()
            .filter_map(|pl| {
                let mut ring = clip_polygon_to_box(pl.points(), bbox);
                if ring.is_empty() {
                    return None;
                }
                if close_lines && ring.len() > 2 {
                    ring.push(ring[0]);
                }
                Some(Polyline::new(ring))
            })
            .collect()
    } else {
        polylines
            .iter()
            .flat_map(|pl| clip_polyline_to_box(pl.points(), bbox))
            .collect()
    };

    tracing::debug!(
        input = polylines.len(),
        output = clipped.len(),
        border,
        close_lines,
        "clipped paths to box"
    );
    clipped
}

/// Clip an open polyline to `bbox`.
///
/// Returns one run per stretch of the path inside the box. A segment that
/// merely touches the boundary still contributes its clipped endpoint, so
/// consecutive runs can share a coordinate with the previous one.
#[must_use = "returns the clipped runs"]
pub fn clip_polyline_to_box(points: &[Point], bbox: &BoundingBox) -> Vec<Polyline> {
    let mut result = Vec::new();
    let mut part: Vec<Point> = Vec::new();

    let Some(&first) = points.first() else {
        return result;
    };
    let last_index = points.len() - 1;
    let mut code_a = outcode(first, bbox);

    for i in 1..points.len() {
        let mut a = points[i - 1];
        let mut b = points[i];
        let last_code = outcode(b, bbox);
        let mut code_b = last_code;

        loop {
            if code_a | code_b == 0 {
                // Accepted: the (possibly shortened) segment is inside.
                part.push(a);
                if code_b != last_code {
                    // `b` was moved onto the boundary: the path leaves here.
                    part.push(b);
                    if i < last_index {
                        result.push(Polyline::new(std::mem::take(&mut part)));
                    }
                } else if i == last_index {
                    part.push(b);
                }
                break;
            } else if code_a & code_b != 0 {
                // Both ends beyond the same edge.
                break;
            } else if code_a != 0 {
                a = intersect_edge(a, b, code_a, bbox);
                code_a = outcode(a, bbox);
            } else {
                b = intersect_edge(a, b, code_b, bbox);
                code_b = outcode(b, bbox);
            }
        }

        code_a = last_code;
    }

    if !part.is_empty() {
        result.push(Polyline::new(part));
    }
    result
}

/// Clip a closed polygon to `bbox`.
///
/// The ring is implicitly closed (the last point connects back to the
/// first); the result follows the same convention. An empty result means
/// the polygon lies entirely outside the box.
#[must_use = "returns the clipped polygon"]
pub fn clip_polygon_to_box(points: &[Point], bbox: &BoundingBox) -> Vec<Point> {
    let mut ring = points.to_vec();

    for edge in [LEFT, RIGHT, BOTTOM, TOP] {
        let Some(&last) = ring.last() else {
            break;
        };
        let mut clipped = Vec::with_capacity(ring.len() + 1);
        let mut prev = last;
        let mut prev_inside = outcode(prev, bbox) & edge == 0;

        for &p in &ring {
            let inside = outcode(p, bbox) & edge == 0;
            if inside != prev_inside {
                clipped.push(intersect_edge(prev, p, edge, bbox));
            }
            if inside {
                clipped.push(p);
            }
            prev = p;
            prev_inside = inside;
        }

        ring = clipped;
    }

    ring
}

/// Cohen-Sutherland region code of `p` relative to `bbox`.
fn outcode(p: Point, bbox: &BoundingBox) -> u8 {
    let mut code = 0;
    if p.x < bbox.min_x {
        code |= LEFT;
    } else if p.x > bbox.max_x {
        code |= RIGHT;
    }
    if p.y < bbox.min_y {
        code |= BOTTOM;
    } else if p.y > bbox.max_y {
        code |= TOP;
    }
    code
}

/// Point where segment `a → b` meets the box edge selected by `code`.
///
/// When several bits are set the edge is chosen in the order top, bottom,
/// right, left. `code` must be non-zero and the segment must straddle the
/// chosen edge.
fn intersect_edge(a: Point, b: Point, code: u8, bbox: &BoundingBox) -> Point {
    let d = b - a;
    if code & TOP != 0 {
        Point::new(a.x + d.x * (bbox.max_y - a.y) / d.y, bbox.max_y)
    } else if code & BOTTOM != 0 {
        Point::new(a.x + d.x * (bbox.min_y - a.y) / d.y, bbox.min_y)
    } else if code & RIGHT != 0 {
        Point::new(bbox.max_x, a.y + d.y * (bbox.max_x - a.x) / d.x)
    } else {
        Point::new(bbox.min_x, a.y + d.y * (bbox.min_x - a.x) / d.x)
    }
}
