//! Shared value types for the penline geometry core.

use serde::{Deserialize, Serialize};

/// A 2D point (or 2D vector) in sketch units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// An ordered sequence of points forming an open or closed path.
///
/// Closedness is not stored here: every operation that cares about it
/// takes an explicit `closed` flag.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline(Vec<Point>);

impl Polyline {
    /// Create a new polyline from a vector of points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the polyline has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points in the polyline.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the first point, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Point> {
        self.0.first()
    }

    /// Returns the last point, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Point> {
        self.0.last()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the polyline and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }

    /// Returns the same points in reverse traversal order.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self(self.0.iter().rev().copied().collect())
    }
}

impl From<Vec<Point>> for Polyline {
    fn from(points: Vec<Point>) -> Self {
        Self(points)
    }
}

impl FromIterator<Point> for Polyline {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// An axis-aligned box in flat `(xmin, ymin, xmax, ymax)` form.
///
/// Callers may supply either a corner pair or a flat 4-tuple; both are
/// normalized to this representation before use. `xmin <= xmax` and
/// `ymin <= ymax` are the caller's responsibility and are not corrected.
///
/// Serializes as `[xmin, ymin, xmax, ymax]` and deserializes from either
/// that form or `[[xmin, ymin], [xmax, ymax]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "BoundingBoxRepr", into = "[f64; 4]")]
pub struct BoundingBox {
    /// Left edge.
    pub min_x: f64,
    /// Bottom edge (smallest `y`).
    pub min_y: f64,
    /// Right edge.
    pub max_x: f64,
    /// Top edge (largest `y`).
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a box from its flat extents.
    #[must_use]
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create a box from its minimum and maximum corners.
    #[must_use]
    pub const fn from_corners(min: Point, max: Point) -> Self {
        Self::new(min.x, min.y, max.x, max.y)
    }

    /// The minimum corner.
    #[must_use]
    pub const fn min(&self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// The maximum corner.
    #[must_use]
    pub const fn max(&self) -> Point {
        Point::new(self.max_x, self.max_y)
    }

    /// Extent along the x axis.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent along the y axis.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// The center of the box.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            self.width().mul_add(0.5, self.min_x),
            self.height().mul_add(0.5, self.min_y),
        )
    }

    /// Whether `p` lies inside the box or on its boundary.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from([min_x, min_y, max_x, max_y]: [f64; 4]) -> Self {
        Self::new(min_x, min_y, max_x, max_y)
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.min_x, b.min_y, b.max_x, b.max_y]
    }
}

impl From<(Point, Point)> for BoundingBox {
    fn from((min, max): (Point, Point)) -> Self {
        Self::from_corners(min, max)
    }
}

impl From<[Point; 2]> for BoundingBox {
    fn from([min, max]: [Point; 2]) -> Self {
        Self::from_corners(min, max)
    }
}

impl TryFrom<&[f64]> for BoundingBox {
    type Error = GeometryError;

    /// Accepts only the flat `[xmin, ymin, xmax, ymax]` form.
    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        match *values {
            [min_x, min_y, max_x, max_y] => Ok(Self::new(min_x, min_y, max_x, max_y)),
            _ => Err(GeometryError::MalformedBounds { len: values.len() }),
        }
    }
}

impl TryFrom<&[Point]> for BoundingBox {
    type Error = GeometryError;

    /// Accepts only the `[min, max]` corner-pair form.
    fn try_from(corners: &[Point]) -> Result<Self, Self::Error> {
        match *corners {
            [min, max] => Ok(Self::from_corners(min, max)),
            _ => Err(GeometryError::MalformedBounds {
                len: corners.len(),
            }),
        }
    }
}

/// Serde-compatible proxy accepting both box notations.
#[derive(Deserialize)]
#[serde(untagged)]
enum BoundingBoxRepr {
    Corners([[f64; 2]; 2]),
    Flat([f64; 4]),
}

impl From<BoundingBoxRepr> for BoundingBox {
    fn from(repr: BoundingBoxRepr) -> Self {
        match repr {
            BoundingBoxRepr::Corners([min, max]) => Self::from_corners(min.into(), max.into()),
            BoundingBoxRepr::Flat(flat) => flat.into(),
        }
    }
}

/// A circle given by its center and a non-negative radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center point.
    pub center: Point,
    /// Radius; expected to be `>= 0`.
    pub radius: f64,
}

impl Circle {
    /// Create a new circle.
    #[must_use]
    pub const fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Whether `p` lies inside or on the circle.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.distance_squared(self.center) <= self.radius * self.radius
    }
}

/// Exactly three points; their order defines the winding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    /// First vertex.
    pub a: Point,
    /// Second vertex.
    pub b: Point,
    /// Third vertex.
    pub c: Point,
}

impl Triangle {
    /// Create a new triangle.
    #[must_use]
    pub const fn new(a: Point, b: Point, c: Point) -> Self {
        Self { a, b, c }
    }

    /// Arithmetic mean of the three vertices.
    #[must_use]
    pub fn centroid(&self) -> Point {
        Point::new(
            (self.a.x + self.b.x + self.c.x) / 3.0,
            (self.a.y + self.b.y + self.c.y) / 3.0,
        )
    }

    /// The three edges in `AB`, `BC`, `CA` order.
    #[must_use]
    pub const fn edges(&self) -> [(Point, Point); 3] {
        [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
    }
}

/// Which faces a visibility test discards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CullSide {
    /// Discard faces pointing away from the viewer.
    #[default]
    Back,
    /// Discard faces pointing toward the viewer.
    Front,
    /// Discard nothing; every face is visible.
    None,
}

/// Errors raised for invalid arguments.
///
/// Degenerate geometry (parallel segments, misses, empty clips) is never
/// an error; those outcomes are reported through `Option` or `bool`
/// return values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// Resampling or hatch spacing is unusable.
    #[error("spacing must be positive and finite, got {0}")]
    InvalidSpacing(f64),

    /// Spline subdivision count is zero.
    #[error("spline segment count must be at least 1")]
    InvalidSegments,

    /// A box was given with the wrong number of components.
    #[error(
        "expected box as [min_point, max_point] or [min_x, min_y, max_x, max_y], got {len} elements"
    )]
    MalformedBounds {
        /// Number of elements supplied.
        len: usize,
    },

    /// Bounds were requested for an empty point set.
    #[error("expected a non-empty point set")]
    EmptyPoints,

    /// A face cell with an arity other than 3 or 4.
    #[error("faces must be triangles or quads, got {0} vertices")]
    UnsupportedFace(usize),

    /// A face cell refers to a vertex that does not exist.
    #[error("face references vertex {index} but only {len} vertices exist")]
    FaceIndexOutOfRange {
        /// Offending vertex index.
        index: usize,
        /// Number of vertices available.
        len: usize,
    },

    /// Pipeline configuration is invalid.
    #[error("invalid plot configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // --- Point tests ---

    #[test]
    fn point_distance_squared() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_squared(b) - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn point_distance() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(4.0, 5.0);
        assert!((a.distance(b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn point_from_array_and_tuple() {
        assert_eq!(Point::from([1.0, 2.0]), Point::new(1.0, 2.0));
        assert_eq!(Point::from((1.0, 2.0)), Point::new(1.0, 2.0));
    }

    // --- Polyline tests ---

    #[test]
    fn polyline_first_and_last() {
        let pl = Polyline::new(vec![
            Point::new(1.0, 2.0),
            Point::new(3.0, 4.0),
            Point::new(5.0, 6.0),
        ]);
        assert_eq!(pl.first(), Some(&Point::new(1.0, 2.0)));
        assert_eq!(pl.last(), Some(&Point::new(5.0, 6.0)));
    }

    #[test]
    fn polyline_reversed_leaves_original_alone() {
        let pl = Polyline::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
        let rev = pl.reversed();
        assert_eq!(rev.points(), &[Point::new(1.0, 0.0), Point::new(0.0, 0.0)]);
        assert_eq!(pl.first(), Some(&Point::new(0.0, 0.0)));
    }

    // --- BoundingBox tests ---

    #[test]
    fn corner_and_flat_forms_agree() {
        let flat = BoundingBox::from([1.0, 2.0, 3.0, 4.0]);
        let corners = BoundingBox::from((Point::new(1.0, 2.0), Point::new(3.0, 4.0)));
        assert_eq!(flat, corners);
        assert_eq!(flat.min(), Point::new(1.0, 2.0));
        assert_eq!(flat.max(), Point::new(3.0, 4.0));
    }

    #[test]
    fn flat_slice_with_wrong_arity_is_rejected() {
        let values = [0.0, 0.0, 1.0];
        let err = BoundingBox::try_from(&values[..]).unwrap_err();
        assert_eq!(err, GeometryError::MalformedBounds { len: 3 });
    }

    #[test]
    fn corner_slice_with_wrong_arity_is_rejected() {
        let corners = [Point::new(0.0, 0.0)];
        let err = BoundingBox::try_from(&corners[..]).unwrap_err();
        assert_eq!(err, GeometryError::MalformedBounds { len: 1 });
    }

    #[test]
    fn box_center_and_extent() {
        let b = BoundingBox::new(0.0, 0.0, 4.0, 2.0);
        assert_eq!(b.center(), Point::new(2.0, 1.0));
        assert!((b.width() - 4.0).abs() < f64::EPSILON);
        assert!((b.height() - 2.0).abs() < f64::EPSILON);
        assert!(b.contains(Point::new(4.0, 2.0)));
        assert!(!b.contains(Point::new(4.1, 2.0)));
    }

    #[test]
    fn box_deserializes_from_both_notations() {
        let flat: BoundingBox = serde_json::from_str("[1, 1, 2, 2]").unwrap();
        let nested: BoundingBox = serde_json::from_str("[[1, 1], [2, 2]]").unwrap();
        assert_eq!(flat, nested);
        assert_eq!(serde_json::to_string(&flat).unwrap(), "[1.0,1.0,2.0,2.0]");
    }

    #[test]
    fn box_with_wrong_arity_fails_to_deserialize() {
        assert!(serde_json::from_str::<BoundingBox>("[1, 1, 2]").is_err());
        assert!(serde_json::from_str::<BoundingBox>("[[1, 1]]").is_err());
    }

    // --- Circle / Triangle tests ---

    #[test]
    fn circle_contains_is_inclusive() {
        let c = Circle::new(Point::new(0.0, 0.0), 1.0);
        assert!(c.contains(Point::new(1.0, 0.0)));
        assert!(!c.contains(Point::new(1.0, 0.1)));
    }

    #[test]
    fn triangle_centroid() {
        let t = Triangle::new(
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(0.0, 3.0),
        );
        assert_eq!(t.centroid(), Point::new(1.0, 1.0));
    }

    #[test]
    fn cull_side_defaults_to_back() {
        assert_eq!(CullSide::default(), CullSide::Back);
    }

    // --- Error display ---

    #[test]
    fn error_messages() {
        assert_eq!(
            GeometryError::InvalidSpacing(0.0).to_string(),
            "spacing must be positive and finite, got 0"
        );
        assert_eq!(
            GeometryError::EmptyPoints.to_string(),
            "expected a non-empty point set"
        );
    }
}
