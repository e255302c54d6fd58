//! Pen-plotter SVG serializer.
//!
//! Polylines are given in physical drawing units (`px`, `mm`, `cm` or
//! `in`). The document is sized in those units while its `viewBox` and
//! path coordinates are expressed in pixels at 90 pixels per inch, the
//! convention plotter tooling such as Inkscape's plotter extensions
//! expects.
//!
//! Each polyline with at least two points becomes one `<path>` element
//! built with the [`svg`] crate using `M` (move to) and `L` (line to)
//! commands. Pure function, no I/O: the result is a `String`.

use std::fmt;

use serde::{Deserialize, Serialize};
use svg::Document;
use svg::node::Value;
use svg::node::element::path::Data;
use svg::node::element::{Group, Path};

use penline_geometry::Polyline;

/// Output resolution used for unit conversion.
pub const PIXELS_PER_INCH: f64 = 90.0;

/// Width of a fine-tip plotter pen, in centimetres.
pub const DEFAULT_PEN_THICKNESS_CM: f64 = 0.03;

/// Physical unit of the drawing coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Pixels at [`PIXELS_PER_INCH`].
    #[default]
    Px,
    /// Millimetres.
    Mm,
    /// Centimetres.
    Cm,
    /// Inches.
    In,
}

impl Units {
    /// How many output pixels one of this unit spans.
    #[must_use]
    pub fn pixels_per_unit(self) -> f64 {
        match self {
            Self::Px => 1.0,
            Self::Mm => PIXELS_PER_INCH / 25.4,
            Self::Cm => PIXELS_PER_INCH / 2.54,
            Self::In => PIXELS_PER_INCH,
        }
    }

    /// The unit suffix used in SVG length attributes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Mm => "mm",
            Self::Cm => "cm",
            Self::In => "in",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert a length between units.
#[must_use]
pub fn convert_length(value: f64, from: Units, to: Units) -> f64 {
    value * from.pixels_per_unit() / to.pixels_per_unit()
}

/// Document settings for [`polylines_to_svg`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgOptions {
    /// Document width in `units`.
    pub width: f64,
    /// Document height in `units`.
    pub height: f64,
    /// Unit of the document size, the polyline coordinates and
    /// `line_width`.
    pub units: Units,
    /// `fill` paint of every path.
    pub fill: String,
    /// `stroke` paint of every path.
    pub stroke: String,
    /// Stroke width in `units`. Defaults to a 0.03 cm pen.
    pub line_width: Option<f64>,
    /// Decimal places kept when converting to pixels.
    pub precision: u32,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            units: Units::Px,
            fill: "none".to_owned(),
            stroke: "black".to_owned(),
            line_width: None,
            precision: 5,
        }
    }
}

impl SvgOptions {
    /// Options for a `width` × `height` document in `units`, with default
    /// styling.
    #[must_use]
    pub fn new(width: f64, height: f64, units: Units) -> Self {
        Self {
            width,
            height,
            units,
            ..Self::default()
        }
    }

    /// The stroke width that will be emitted, in `units`.
    #[must_use]
    pub fn effective_line_width(&self) -> f64 {
        self.line_width.unwrap_or_else(|| {
            round_to(
                convert_length(DEFAULT_PEN_THICKNESS_CM, Units::Cm, self.units),
                self.precision,
            )
        })
    }
}

/// Errors from SVG export.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExportError {
    /// The document size is not positive and finite.
    #[error("document size must be positive and finite, got {width} x {height}")]
    InvalidDimensions {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },

    /// The stroke width is negative or not finite.
    #[error("line width must be non-negative and finite, got {0}")]
    InvalidLineWidth(f64),
}

/// Build an SVG path `d` attribute string from a polyline, scaling every
/// coordinate by `scale` and rounding to `precision` decimal places.
///
/// Returns an empty string for polylines with fewer than 2 points.
///
/// The [`svg`] crate stores path coordinates as `f32`, so `precision` is
/// an upper bound: large coordinates keep only about seven significant
/// digits (`744.09449` is written as `744.0945`).
///
/// # Examples
///
/// ```
/// use penline_geometry::{Point, Polyline};
/// use penline_export::build_path_data;
///
/// let polyline = Polyline::new(vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
/// assert_eq!(build_path_data(&polyline, 10.0, 5), "M10,20 L30,40");
/// ```
#[must_use]
pub fn build_path_data(polyline: &Polyline, scale: f64, precision: u32) -> String {
    let points = polyline.points();
    let Some((first, rest)) = points.split_first() else {
        return String::new();
    };
    if rest.is_empty() {
        return String::new();
    }

    let tx = |x: f64| round_to(x * scale, precision);
    let mut data = Data::new().move_to((tx(first.x), tx(first.y)));
    for p in rest {
        data = data.line_to((tx(p.x), tx(p.y)));
    }
    String::from(Value::from(data))
}

/// Serialize polylines into a standalone pen-plotter SVG document.
///
/// The root element is sized `width`/`height` in the chosen unit, its
/// `viewBox` spans the same area in pixels, and all paths sit in one
/// `<g>` group with the configured fill, stroke and stroke width.
/// Polylines with fewer than two points are skipped.
///
/// # Errors
///
/// Returns [`ExportError::InvalidDimensions`] if the width or height is
/// not positive and finite, and [`ExportError::InvalidLineWidth`] if an
/// explicit line width is negative or not finite.
pub fn polylines_to_svg(
    polylines: &[Polyline],
    options: &SvgOptions,
) -> Result<String, ExportError> {
    let SvgOptions {
        width,
        height,
        units,
        ..
    } = *options;
    let valid = |v: f64| v > 0.0 && v.is_finite();
    if !(valid(width) && valid(height)) {
        return Err(ExportError::InvalidDimensions { width, height });
    }
    let line_width = options.effective_line_width();
    if !(line_width >= 0.0 && line_width.is_finite()) {
        return Err(ExportError::InvalidLineWidth(line_width));
    }

    let scale = units.pixels_per_unit();
    let view_width = round_to(width * scale, options.precision);
    let view_height = round_to(height * scale, options.precision);

    let mut group = Group::new();
    for polyline in polylines {
        let d = build_path_data(polyline, scale, options.precision);
        if d.is_empty() {
            continue;
        }
        let path = Path::new()
            .set("d", d)
            .set("fill", options.fill.as_str())
            .set("stroke", options.stroke.as_str())
            .set("stroke-width", format!("{line_width}{units}"));
        group = group.add(path);
    }

    let doc = Document::new()
        .set("width", format!("{width}{units}"))
        .set("height", format!("{height}{units}"))
        .set("version", "1.1")
        .set("viewBox", format!("0 0 {view_width} {view_height}"))
        .add(group);

    // The svg crate omits the XML declaration, so we prepend it.
    Ok(format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n"))
}

/// Round to `precision` decimal places.
fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10_f64.powi(i32::try_from(precision).unwrap_or(i32::MAX));
    if factor.is_finite() {
        (value * factor).round() / factor
    } else {
        value
    }
}
