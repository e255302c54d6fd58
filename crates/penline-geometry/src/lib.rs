//! penline-geometry: Pure polyline geometry for pen plotting (sans-IO).
//!
//! Prepares vector paths for rendering or physical plotting through:
//! cleanup -> resampling -> spline smoothing -> box/circle clipping ->
//! hatch fill -> nearest-neighbour ordering -> endpoint merging.
//!
//! Every function is a synchronous computation over its arguments and
//! returns fresh values. There is no shared mutable state, so callers may
//! process independent paths on as many threads as they like.

pub mod circle;
pub mod clip;
pub mod config;
pub mod hatch;
pub mod optimize;
pub mod resample;
pub mod simplify;
pub mod spline;
pub mod triangle;
pub mod types;
pub mod vector;

pub use config::PlotConfig;
pub use hatch::HatchConfig;
pub use spline::SplineConfig;
pub use types::{BoundingBox, Circle, CullSide, GeometryError, Point, Polyline, Triangle};
pub use vector::{EPSILON, Vec3, almost_equal};

/// Run the full path preparation pipeline.
///
/// # Pipeline steps
///
/// 1. Duplicate and collinear point removal
/// 2. Optional resampling at a fixed spacing
/// 3. Optional cubic spline smoothing
/// 4. Optional clipping to a box (open or polygon mode)
/// 5. Optional circular mask
/// 6. Optional hatch fill, clipped to the box when one is set
/// 7. Optional nearest-neighbour ordering
/// 8. Optional endpoint merging
///
/// # Errors
///
/// Returns [`GeometryError::InvalidConfig`] if `config` fails
/// [`PlotConfig::validate`]. Stage errors cannot occur once the
/// configuration has been validated.
pub fn process(paths: &[Polyline], config: &PlotConfig) -> Result<Vec<Polyline>, GeometryError> {
    config.validate()?;
    tracing::debug!(paths = paths.len(), "processing paths");

    // 1. Cleanup.
    let mut current = simplify::simplify_paths(paths);

    // 2. Resampling.
    if let Some(spacing) = config.resample_spacing {
        current = current
            .iter()
            .map(|pl| resample::resample_by_spacing(pl.points(), spacing, config.closed))
            .map(|r| r.map(Polyline::new))
            .collect::<Result<_, _>>()?;
    }

    // 3. Spline smoothing.
    if let Some(spline) = config.spline {
        current = current
            .iter()
            .map(|pl| spline::cubic_spline(pl.points(), spline, config.closed))
            .map(|r| r.map(Polyline::new))
            .collect::<Result<_, _>>()?;
    }

    // 4. Box clipping.
    if let Some(bbox) = &config.clip_box {
        current = clip::clip_polylines_to_box(&current, bbox, config.border, config.close_lines);
    }

    // 5. Circular mask.
    if let Some(circle) = config.circle_mask {
        current = circle::clip_polylines_to_circle(&current, circle);
    }

    // 6. Hatch fill.
    if let Some(hatch) = config.hatch {
        let region = config.clip_box.or_else(|| {
            let all: Vec<Point> = current
                .iter()
                .flat_map(|pl| pl.points().iter().copied())
                .collect();
            resample::bounds(&all).ok()
        });
        if let Some(region) = region {
            let lines = hatch::create_hatch_lines(&region, hatch)?;
            let lines = clip::clip_polylines_to_box(&lines, &region, false, false);
            let lines = match config.circle_mask {
                Some(circle) => circle::clip_polylines_to_circle(&lines, circle),
                None => lines,
            };
            current.extend(lines);
        }
    }

    // 7. Ordering.
    if config.sort {
        current = optimize::sort_paths(&current);
    }

    // 8. Merging.
    if let Some(threshold) = config.merge_threshold {
        current = optimize::merge_paths(&current, threshold);
    }

    tracing::debug!(
        paths = current.len(),
        points = current.iter().map(Polyline::len).sum::<usize>(),
        "processed paths"
    );
    Ok(current)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn poly(coords: &[(f64, f64)]) -> Polyline {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn default_config_cleans_and_orders() {
        let paths = vec![
            poly(&[(0.0, 0.0), (0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]),
            poly(&[(10.0, 10.0), (11.0, 10.0)]),
            poly(&[(5.0, 0.0), (2.02, 0.0)]),
        ];
        let result = process(&paths, &PlotConfig::default()).unwrap();
        assert_eq!(
            result,
            vec![
                poly(&[(0.0, 0.0), (2.0, 0.0), (5.0, 0.0)]),
                poly(&[(10.0, 10.0), (11.0, 10.0)]),
            ]
        );
    }

    #[test]
    fn invalid_config_is_rejected_before_work() {
        let config = PlotConfig {
            resample_spacing: Some(-1.0),
            ..PlotConfig::default()
        };
        assert!(matches!(
            process(&[poly(&[(0.0, 0.0), (1.0, 0.0)])], &config),
            Err(GeometryError::InvalidConfig(_))
        ));
    }

    #[test]
    fn clipping_keeps_everything_inside_the_box() {
        let bbox = BoundingBox::new(0.0, 0.0, 4.0, 4.0);
        let config = PlotConfig {
            resample_spacing: Some(0.5),
            spline: Some(SplineConfig {
                tension: 0.5,
                segments: 4,
            }),
            clip_box: Some(bbox),
            ..PlotConfig::default()
        };
        let paths = vec![poly(&[(-2.0, 1.0), (2.0, 3.0), (6.0, 1.0)])];
        let result = process(&paths, &config).unwrap();
        assert!(!result.is_empty());
        for p in result.iter().flat_map(|pl| pl.points()) {
            assert!(bbox.contains(*p), "{p:?} escaped the box");
        }
    }

    #[test]
    fn hatch_fill_uses_clip_box() {
        let bbox = BoundingBox::new(0.0, 0.0, 2.0, 2.0);
        let config = PlotConfig {
            clip_box: Some(bbox),
            hatch: Some(HatchConfig {
                angle: 0.0,
                spacing: 0.5,
            }),
            merge_threshold: None,
            ..PlotConfig::default()
        };
        let result = process(&[], &config).unwrap();
        assert!(!result.is_empty());
        for line in &result {
            assert_eq!(line.len(), 2);
            for p in line.points() {
                assert!(bbox.contains(*p));
            }
        }
    }

    #[test]
    fn hatch_without_box_uses_path_bounds() {
        let config = PlotConfig {
            hatch: Some(HatchConfig {
                angle: 0.0,
                spacing: 0.25,
            }),
            sort: false,
            merge_threshold: None,
            ..PlotConfig::default()
        };
        let square = poly(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]);
        let result = process(std::slice::from_ref(&square), &config).unwrap();
        assert_eq!(result[0], square);
        assert!(result.len() > 1);
    }

    #[test]
    fn hatch_of_nothing_is_nothing() {
        let config = PlotConfig {
            hatch: Some(HatchConfig::default()),
            ..PlotConfig::default()
        };
        assert!(process(&[], &config).unwrap().is_empty());
    }

    #[test]
    fn circle_mask_applies() {
        let circle = Circle::new(Point::new(0.0, 0.0), 1.0);
        let config = PlotConfig {
            circle_mask: Some(circle),
            ..PlotConfig::default()
        };
        let result = process(&[poly(&[(-3.0, 0.0), (3.0, 0.0)])], &config).unwrap();
        assert_eq!(result.len(), 1);
        for p in result[0].points() {
            assert!(p.x.abs() <= 1.0 + 1e-9);
        }
    }
}
