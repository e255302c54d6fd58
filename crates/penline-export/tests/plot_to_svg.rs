//! Integration test: hatch a framed region, run it through the full
//! geometry pipeline and export the result as a plotter SVG.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use penline_export::{SvgOptions, Units, polylines_to_svg};
use penline_geometry::{BoundingBox, HatchConfig, PlotConfig, Point, Polyline, SplineConfig};

fn poly(coords: &[(f64, f64)]) -> Polyline {
    coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

#[test]
fn hatched_frame_pipeline_to_svg() {
    // An A4 page in centimetres with a 2 cm margin.
    let (width, height) = (21.0, 29.7);
    let margin = BoundingBox::new(2.0, 2.0, width - 2.0, height - 2.0);

    let frame = poly(&[
        (margin.min_x, margin.min_y),
        (margin.max_x, margin.min_y),
        (margin.max_x, margin.max_y),
        (margin.min_x, margin.max_y),
        (margin.min_x, margin.min_y),
    ]);
    // A wave that runs off both sides of the page.
    let wave: Polyline = (0..=40)
        .map(|i| {
            let x = f64::from(i) * 0.75 - 4.0;
            Point::new(x, 0.5f64.mul_add(x.sin(), 15.0))
        })
        .collect();

    let config = PlotConfig {
        spline: Some(SplineConfig {
            tension: 0.5,
            segments: 6,
        }),
        clip_box: Some(margin),
        hatch: Some(HatchConfig {
            angle: -std::f64::consts::FRAC_PI_4,
            spacing: 1.0,
        }),
        ..PlotConfig::default()
    };
    let paths =
        penline_geometry::process(&[frame, wave], &config).expect("pipeline should succeed");
    assert!(paths.len() > 2, "expected frame, wave and hatch lines");
    for p in paths.iter().flat_map(Polyline::points) {
        assert!(margin.contains(*p), "{p:?} lies outside the margin");
    }

    let svg = polylines_to_svg(&paths, &SvgOptions::new(width, height, Units::Cm)).unwrap();
    assert!(svg.contains(r#"width="21cm""#));
    assert!(svg.contains(r#"height="29.7cm""#));
    assert!(svg.contains(r#"stroke-width="0.03cm""#));
    assert_eq!(
        svg.matches("<path").count(),
        paths.iter().filter(|p| p.len() >= 2).count()
    );
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn config_round_trips_through_json() {
    let config = PlotConfig {
        clip_box: Some(BoundingBox::new(0.0, 0.0, 10.0, 10.0)),
        border: true,
        ..PlotConfig::default()
    };
    let options = SvgOptions::new(10.0, 10.0, Units::Mm);

    let config_json = serde_json::to_string(&config).unwrap();
    let options_json = serde_json::to_string(&options).unwrap();
    assert_eq!(serde_json::from_str::<PlotConfig>(&config_json).unwrap(), config);
    assert_eq!(serde_json::from_str::<SvgOptions>(&options_json).unwrap(), options);
}
