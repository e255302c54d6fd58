//! Configuration for the one-shot [`process`](crate::process) pipeline.

use serde::{Deserialize, Serialize};

use crate::hatch::HatchConfig;
use crate::optimize::DEFAULT_MERGE_THRESHOLD;
use crate::spline::SplineConfig;
use crate::types::{BoundingBox, Circle, GeometryError};

/// Which stages [`process`](crate::process) runs and with what parameters.
///
/// Optional stages are skipped when their field is `None` (or `false`).
/// The default cleans the input, sorts it for plotting and merges touching
/// paths; it does not resample, smooth, clip or hatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Treat every input path as a closed ring when resampling and
    /// smoothing.
    pub closed: bool,

    /// Resample every path at this spacing before smoothing.
    pub resample_spacing: Option<f64>,

    /// Smooth every path with a cubic spline.
    pub spline: Option<SplineConfig>,

    /// Clip paths (and hatch lines) to this box.
    pub clip_box: Option<BoundingBox>,

    /// Clip paths as closed polygons instead of open polylines.
    /// Only used when `clip_box` is set.
    pub border: bool,

    /// Re-close polygons after clipping. Only used when `border` is set.
    pub close_lines: bool,

    /// Keep only the parts of paths inside this circle.
    pub circle_mask: Option<Circle>,

    /// Add hatch fill over `clip_box`, or over the bounds of the processed
    /// paths when no box is set.
    pub hatch: Option<HatchConfig>,

    /// Reorder paths with the nearest-neighbour sort.
    pub sort: bool,

    /// Join consecutive paths whose ends are closer than this distance.
    pub merge_threshold: Option<f64>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            closed: false,
            resample_spacing: None,
            spline: None,
            clip_box: None,
            border: false,
            close_lines: true,
            circle_mask: None,
            hatch: None,
            sort: true,
            merge_threshold: Some(DEFAULT_MERGE_THRESHOLD),
        }
    }
}

impl PlotConfig {
    /// Check every enabled stage's parameters.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidConfig`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if let Some(spacing) = self.resample_spacing
            && !(spacing > 0.0 && spacing.is_finite())
        {
            return Err(invalid(format!(
                "resample_spacing must be positive and finite, got {spacing}"
            )));
        }
        if let Some(spline) = self.spline {
            if spline.segments == 0 {
                return Err(invalid("spline.segments must be at least 1"));
            }
            if !spline.tension.is_finite() {
                return Err(invalid("spline.tension must be finite"));
            }
        }
        if let Some(bbox) = self.clip_box
            && !(bbox.min_x <= bbox.max_x && bbox.min_y <= bbox.max_y)
        {
            return Err(invalid(format!(
                "clip_box minimum must not exceed its maximum, got {bbox:?}"
            )));
        }
        if let Some(circle) = self.circle_mask
            && !(circle.radius >= 0.0 && circle.radius.is_finite())
        {
            return Err(invalid(format!(
                "circle_mask.radius must be non-negative and finite, got {}",
                circle.radius
            )));
        }
        if let Some(hatch) = self.hatch {
            let spacing = hatch.spacing.abs();
            if !(spacing > 0.0 && spacing.is_finite()) {
                return Err(invalid(format!(
                    "hatch.spacing must be non-zero and finite, got {}",
                    hatch.spacing
                )));
            }
        }
        if let Some(threshold) = self.merge_threshold
            && !(threshold >= 0.0 && threshold.is_finite())
        {
            return Err(invalid(format!(
                "merge_threshold must be non-negative and finite, got {threshold}"
            )));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> GeometryError {
    GeometryError::InvalidConfig(msg.into())
}
