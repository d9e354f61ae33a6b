//! SVG document export.

use std::fmt::Write;

use crate::element::PointElement;
use crate::import::LASER_MARKER_TAG;
use crate::path_codec::format_number;

const STROKE_STYLE: &str = "fill:none;stroke:#000000;stroke-width:0.1";

/// Writes `elements` as an SVG document sized in millimetres.
///
/// The `viewBox` matches the physical size, so one user unit is one
/// millimetre and re-importing leaves coordinates untouched. Elements with
/// fewer than two vertices are left out.
pub fn to_svg_document(elements: &[PointElement], width_mm: f64, height_mm: f64) -> String {
    let w = format_number(width_mm);
    let h = format_number(height_mm);

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<svg width="{w}mm" height="{h}mm" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">
  <metadata><{LASER_MARKER_TAG}>true</{LASER_MARKER_TAG}></metadata>
"#
    );

    for element in elements.iter().filter(|e| e.is_usable()) {
        let _ = writeln!(
            svg,
            r#"  <path d="{}" style="{STROKE_STYLE}" />"#,
            element.to_path_data()
        );
    }

    svg.push_str("</svg>\n");
    svg
}
