//! Parallel hatch-line generation over a bounding box.
//!
//! Lines are laid across the circle circumscribing the box, so every line
//! spans the full diagonal. Only lines that fall entirely on one side of
//! the box are rejected; the rest usually overhang the box and should be
//! passed through [`clip_polylines_to_box`](crate::clip::clip_polylines_to_box)
//! when exact containment matters.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use serde::{Deserialize, Serialize};

use crate::types::{BoundingBox, GeometryError, Point, Polyline};

/// Parameters of [`create_hatch_lines`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HatchConfig {
    /// Line angle in radians. Zero gives horizontal lines; positive angles
    /// turn counter-clockwise on a y-down canvas.
    pub angle: f64,
    /// Distance between neighbouring lines. The sign is ignored.
    pub spacing: f64,
}

impl Default for HatchConfig {
    fn default() -> Self {
        Self {
            angle: -FRAC_PI_4,
            spacing: 0.5,
        }
    }
}

/// Generate hatch lines covering `bbox`.
///
/// Each line is a two-point [`Polyline`]. A box with zero width or height
/// produces no lines.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidSpacing`] when the spacing is zero or
/// not finite.
pub fn create_hatch_lines(
    bbox: &BoundingBox,
    config: HatchConfig,
) -> Result<Vec<Polyline>, GeometryError> {
    let spacing = config.spacing.abs();
    if !(spacing > 0.0 && spacing.is_finite()) {
        return Err(GeometryError::InvalidSpacing(config.spacing));
    }

    let (w, h) = (bbox.width(), bbox.height());
    if w == 0.0 || h == 0.0 {
        return Ok(Vec::new());
    }

    let r = w.hypot(h) / 2.0;
    let (sa, ca) = (FRAC_PI_2 - config.angle).sin_cos();
    let c = bbox.center();

    let mut lines = Vec::new();
    let mut step: u32 = 0;
    loop {
        let i = f64::from(step).mul_add(spacing, -r);
        if i > r {
            break;
        }
        step += 1;

        // The line at offset `i` runs from (i, -r) to (i, r) in the
        // rotated frame.
        let x1 = c.x + i * ca + r * sa;
        let y1 = c.y + i * sa - r * ca;
        let x2 = c.x + i * ca - r * sa;
        let y2 = c.y + i * sa + r * ca;

        let outside = (x1 < bbox.min_x && x2 < bbox.min_x)
            || (x1 > bbox.max_x && x2 > bbox.max_x)
            || (y1 < bbox.min_y && y2 < bbox.min_y)
            || (y1 > bbox.max_y && y2 > bbox.max_y);
        if !outside {
            lines.push(Polyline::new(vec![Point::new(x1, y1), Point::new(x2, y2)]));
        }
    }

    tracing::debug!(
        lines = lines.len(),
        angle = config.angle,
        spacing,
        "generated hatch lines"
    );
    Ok(lines)
}
