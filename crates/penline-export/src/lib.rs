//! penline-export: Pure format serializers (sans-IO)
//!
//! Converts polylines into plotter-ready output formats. Currently
//! supports SVG.

pub mod svg;

pub use svg::{
    ExportError, SvgOptions, Units, build_path_data, convert_length, polylines_to_svg,
};
