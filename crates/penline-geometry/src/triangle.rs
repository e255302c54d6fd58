//! Segment intersection, triangle clipping, and face visibility.

use crate::types::{CullSide, GeometryError, Point, Triangle};
use crate::vector::Vec3;

/// Intersect segment `p1 → p2` with segment `p3 → p4`.
///
/// Returns the parameter along the first segment (`0.0` at `p1`, `1.0` at
/// `p2`) when the intersection lies within both segments, or `None` when
/// the segments are parallel, collinear, or miss each other.
#[must_use]
pub fn intersect_segments(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<f64> {
    let d21 = p2 - p1;
    let d43 = p4 - p3;

    let denom = d21.cross(d43);
    if denom == 0.0 {
        return None;
    }

    let d13 = p1 - p3;
    let sb = d13.y.mul_add(d21.x, -(d13.x * d21.y)) / denom;
    if !(0.0..=1.0).contains(&sb) {
        return None;
    }

    let sa = d13.y.mul_add(d43.x, -(d13.x * d43.y)) / denom;
    if !(0.0..=1.0).contains(&sa) {
        return None;
    }
    Some(sa)
}

/// Move `point` toward `centroid` by `amount`, never past the centroid.
///
/// Negative amounts move the point away from the centroid.
#[must_use]
pub fn expand_vector(point: Point, centroid: Point, amount: f64) -> Point {
    let dir = centroid - point;
    let max_len = dir.length();
    let len = max_len.min(amount);
    point.scale_and_add(dir.normalize(), len)
}

/// Inset every vertex toward the centroid by `border`.
///
/// A `border` of `0.0` returns the triangle unchanged.
#[must_use]
pub fn expand_triangle(triangle: &Triangle, border: f64) -> Triangle {
    if border == 0.0 {
        return *triangle;
    }
    let centroid = triangle.centroid();
    Triangle::new(
        expand_vector(triangle.a, centroid, border),
        expand_vector(triangle.b, centroid, border),
        expand_vector(triangle.c, centroid, border),
    )
}

/// Barycentric containment test.
///
/// Points on the edges from `a` are inside; points on the edge `bc` are
/// not. Degenerate (zero-area) triangles contain only their vertex `a`.
#[must_use]
pub fn point_in_triangle(p: Point, triangle: &Triangle) -> bool {
    let v0 = triangle.c - triangle.a;
    let v1 = triangle.b - triangle.a;
    let v2 = p - triangle.a;

    let dot00 = v0.dot(v0);
    let dot01 = v0.dot(v1);
    let dot02 = v0.dot(v2);
    let dot11 = v1.dot(v1);
    let dot12 = v1.dot(v2);

    let b = dot00.mul_add(dot11, -(dot01 * dot01));
    let inv = if b == 0.0 { 0.0 } else { 1.0 / b };
    let u = dot11.mul_add(dot02, -(dot01 * dot12)) * inv;
    let v = dot00.mul_add(dot12, -(dot01 * dot02)) * inv;
    u >= 0.0 && v >= 0.0 && u + v < 1.0
}

/// Clip the segment `p1 → p2` to a triangle, optionally inset by `border`.
///
/// When both endpoints lie inside the (inset) triangle the segment is
/// returned as is. Otherwise the segment is tested against the edges `AB`,
/// `BC`, `CA` in that order, stopping after two crossings. Returns `None`
/// unless exactly two distinct crossings are found; crossings that nearly
/// coincide (a touch at a vertex, or a border squeezing them together)
/// are discarded.
#[must_use]
pub fn clip_segment_to_triangle(
    p1: Point,
    p2: Point,
    triangle: &Triangle,
    border: f64,
) -> Option<[Point; 2]> {
    let tri = expand_triangle(triangle, border);

    if point_in_triangle(p1, &tri) && point_in_triangle(p2, &tri) {
        return Some([p1, p2]);
    }

    let mut crossings = tri
        .edges()
        .into_iter()
        .filter_map(|(p3, p4)| intersect_segments(p1, p2, p3, p4))
        .map(|t| p1.lerp(p2, t));

    let first = crossings.next()?;
    let second = crossings.next()?;
    if first.almost_eq(second) {
        return None;
    }
    Some([first, second])
}

/// Area of a 2D triangle.
#[must_use]
pub fn triangle_area(a: Point, b: Point, c: Point) -> f64 {
    (a - c).cross(b - a).abs() * 0.5
}

/// Area of a 3D triangle.
#[must_use]
pub fn triangle_area_3d(a: Vec3, b: Vec3, c: Vec3) -> f64 {
    (c - b).cross(a - b).length() * 0.5
}

/// Unit normal of the face `a, b, c`: `normalize((c − b) × (a − b))`.
///
/// Degenerate faces yield the zero vector.
#[must_use]
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (c - b).cross(a - b).normalize()
}

/// Whether the triangle `v0, v1, v2` survives culling for a view ray.
///
/// The face direction is `normalize((v1 − v0) × (v2 − v0))`. With
/// [`CullSide::Back`] the face is visible when the ray and the face
/// direction point the same way (`dot > 0`); [`CullSide::Front`] inverts
/// that; [`CullSide::None`] keeps every face.
#[must_use]
pub fn is_triangle_visible(v0: Vec3, v1: Vec3, v2: Vec3, ray_dir: Vec3, side: CullSide) -> bool {
    let d = || ray_dir.dot((v1 - v0).cross(v2 - v0).normalize());
    match side {
        CullSide::None => true,
        CullSide::Back => d() > 0.0,
        CullSide::Front => d() <= 0.0,
    }
}

/// Face-culling test for an indexed triangle or quad.
///
/// Quads are tested through their first three vertices, which share the
/// quad's plane when it is planar.
///
/// # Errors
///
/// Returns [`GeometryError::UnsupportedFace`] for cells that are neither
/// triangles nor quads and [`GeometryError::FaceIndexOutOfRange`] when a
/// cell refers to a missing vertex. A [`CullSide::None`] test succeeds
/// without inspecting the cell.
pub fn is_face_visible(
    cell: &[usize],
    vertices: &[Vec3],
    ray_dir: Vec3,
    side: CullSide,
) -> Result<bool, GeometryError> {
    if side == CullSide::None {
        return Ok(true);
    }
    let [i0, i1, i2] = match *cell {
        [i0, i1, i2] | [i0, i1, i2, _] => [i0, i1, i2],
        _ => return Err(GeometryError::UnsupportedFace(cell.len())),
    };
    let vertex = |index: usize| {
        vertices
            .get(index)
            .copied()
            .ok_or(GeometryError::FaceIndexOutOfRange {
                index,
                len: vertices.len(),
            })
    };
    Ok(is_triangle_visible(
        vertex(i0)?,
        vertex(i1)?,
        vertex(i2)?,
        ray_dir,
        side,
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn unit_triangle() -> Triangle {
        Triangle::new(p(0.0, 0.0), p(4.0, 0.0), p(0.0, 4.0))
    }

    // --- intersect_segments ---

    #[test]
    fn crossing_segments_report_parameter_on_first() {
        let t = intersect_segments(p(0.0, 0.0), p(2.0, 0.0), p(0.5, -1.0), p(0.5, 1.0)).unwrap();
        assert!((t - 0.25).abs() < 1e-12);
    }

    #[test]
    fn parallel_segments_do_not_intersect() {
        assert!(intersect_segments(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0), p(1.0, 1.0)).is_none());
    }

    #[test]
    fn collinear_segments_do_not_intersect() {
        assert!(intersect_segments(p(0.0, 0.0), p(2.0, 0.0), p(1.0, 0.0), p(3.0, 0.0)).is_none());
    }

    #[test]
    fn segments_missing_each_other() {
        assert!(intersect_segments(p(0.0, 0.0), p(1.0, 0.0), p(2.0, -1.0), p(2.0, 1.0)).is_none());
        assert!(intersect_segments(p(0.0, 0.0), p(1.0, 0.0), p(0.5, 0.5), p(0.5, 2.0)).is_none());
    }

    #[test]
    fn zero_length_segment_does_not_intersect() {
        assert!(intersect_segments(p(0.5, 0.0), p(0.5, 0.0), p(0.0, -1.0), p(1.0, 1.0)).is_none());
    }

    // --- expand ---

    #[test]
    fn expand_vector_moves_toward_centroid() {
        let moved = expand_vector(p(0.0, 0.0), p(10.0, 0.0), 2.0);
        assert_eq!(moved, p(2.0, 0.0));
    }

    #[test]
    fn expand_vector_never_overshoots_centroid() {
        let moved = expand_vector(p(0.0, 0.0), p(1.0, 0.0), 5.0);
        assert_eq!(moved, p(1.0, 0.0));
    }

    #[test]
    fn expand_vector_at_centroid_stays_put() {
        assert_eq!(expand_vector(p(1.0, 1.0), p(1.0, 1.0), 3.0), p(1.0, 1.0));
    }

    #[test]
    fn zero_border_leaves_triangle_unchanged() {
        let t = unit_triangle();
        assert_eq!(expand_triangle(&t, 0.0), t);
    }

    #[test]
    fn border_shrinks_triangle() {
        let t = unit_triangle();
        let inset = expand_triangle(&t, 0.5);
        let area = triangle_area(inset.a, inset.b, inset.c);
        assert!(area < triangle_area(t.a, t.b, t.c));
        assert!(point_in_triangle(inset.a, &t));
    }

    // --- point_in_triangle ---

    #[test]
    fn point_containment() {
        let t = unit_triangle();
        assert!(point_in_triangle(p(1.0, 1.0), &t));
        assert!(point_in_triangle(p(0.0, 0.0), &t));
        assert!(!point_in_triangle(p(3.0, 3.0), &t));
        assert!(!point_in_triangle(p(-0.1, 1.0), &t));
    }

    // --- clip_segment_to_triangle ---

    #[test]
    fn inside_segment_is_returned_unchanged() {
        let clipped = clip_segment_to_triangle(p(0.5, 0.5), p(1.0, 1.5), &unit_triangle(), 0.0);
        assert_eq!(clipped, Some([p(0.5, 0.5), p(1.0, 1.5)]));
    }

    #[test]
    fn crossing_segment_is_clipped_to_two_edges() {
        let [a, b] =
            clip_segment_to_triangle(p(-1.0, 1.0), p(5.0, 1.0), &unit_triangle(), 0.0).unwrap();
        // Enters through CA (x = 0), leaves through BC (x + y = 4).
        assert!(a.almost_eq(p(3.0, 1.0)));
        assert!(b.almost_eq(p(0.0, 1.0)));
    }

    #[test]
    fn segment_outside_triangle_fails() {
        assert!(
            clip_segment_to_triangle(p(5.0, 5.0), p(6.0, 7.0), &unit_triangle(), 0.0).is_none()
        );
    }

    #[test]
    fn half_inside_segment_has_single_crossing_and_fails() {
        assert!(
            clip_segment_to_triangle(p(1.0, 1.0), p(5.0, 1.0), &unit_triangle(), 0.0).is_none()
        );
    }

    #[test]
    fn vertex_touch_is_discarded() {
        // Passes exactly through vertex B, hitting AB and BC at the same point.
        assert!(
            clip_segment_to_triangle(p(3.0, -1.0), p(5.0, 1.0), &unit_triangle(), 0.0).is_none()
        );
    }

    #[test]
    fn border_moves_clip_points_inward() {
        let [a, b] =
            clip_segment_to_triangle(p(-1.0, 1.0), p(5.0, 1.0), &unit_triangle(), 0.5).unwrap();
        assert!(a.x < 3.0);
        assert!(b.x > 0.0);
    }

    // --- areas and normals ---

    #[test]
    fn triangle_areas() {
        assert!((triangle_area(p(0.0, 0.0), p(4.0, 0.0), p(0.0, 4.0)) - 8.0).abs() < 1e-12);
        let area = triangle_area_3d(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 4.0, 0.0),
        );
        assert!((area - 8.0).abs() < 1e-12);
    }

    #[test]
    fn face_normal_of_xy_triangle() {
        let n = face_normal(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        assert_eq!(n, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn degenerate_face_normal_is_zero() {
        let a = Vec3::new(1.0, 1.0, 1.0);
        assert_eq!(face_normal(a, a, a), Vec3::default());
    }

    // --- visibility ---

    fn ccw_vertices() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn back_culling_keeps_faces_aligned_with_ray() {
        let v = ccw_vertices();
        let toward = Vec3::new(0.0, 0.0, 1.0);
        let away = Vec3::new(0.0, 0.0, -1.0);
        assert!(is_triangle_visible(v[0], v[1], v[2], toward, CullSide::Back));
        assert!(!is_triangle_visible(v[0], v[1], v[2], away, CullSide::Back));
    }

    #[test]
    fn front_culling_is_the_complement() {
        let v = ccw_vertices();
        let toward = Vec3::new(0.0, 0.0, 1.0);
        let away = Vec3::new(0.0, 0.0, -1.0);
        assert!(!is_triangle_visible(v[0], v[1], v[2], toward, CullSide::Front));
        assert!(is_triangle_visible(v[0], v[1], v[2], away, CullSide::Front));
    }

    #[test]
    fn no_culling_is_always_visible() {
        let v = ccw_vertices();
        let away = Vec3::new(0.0, 0.0, -1.0);
        assert!(is_triangle_visible(v[0], v[1], v[2], away, CullSide::None));
        assert!(is_face_visible(&[0, 1], &v, away, CullSide::None).unwrap());
    }

    #[test]
    fn indexed_quad_uses_first_triangle() {
        let v = ccw_vertices();
        let ray = Vec3::new(0.0, 0.0, 1.0);
        assert!(is_face_visible(&[0, 1, 3, 2], &v, ray, CullSide::Back).unwrap());
    }

    #[test]
    fn indexed_face_errors() {
        let v = ccw_vertices();
        let ray = Vec3::new(0.0, 0.0, 1.0);
        assert_eq!(
            is_face_visible(&[0, 1], &v, ray, CullSide::Back),
            Err(GeometryError::UnsupportedFace(2))
        );
        assert_eq!(
            is_face_visible(&[0, 1, 9], &v, ray, CullSide::Back),
            Err(GeometryError::FaceIndexOutOfRange { index: 9, len: 4 })
        );
    }
}
