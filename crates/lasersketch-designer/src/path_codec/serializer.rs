//! SVG path data writer.

use std::fmt::Write;

use crate::bounds::{segment_controls, segment_indices};
use crate::vertex::{Point, Vertex};

/// Formats a coordinate with up to six decimals and no trailing zeros.
pub fn format_number(value: f64) -> String {
    let mut s = format!("{:.6}", value);
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

fn push_point(out: &mut String, p: Point) {
    let _ = write!(out, "{} {}", format_number(p.x), format_number(p.y));
}

/// Writes vertices back to path data.
///
/// Emits `M` for the first vertex, then one `L` or `C` per segment. A segment
/// is cubic when either of its ends carries a handle on that side; a missing
/// side uses its own anchor as control point. Closed shapes with at least
/// three vertices also get the closing segment (when curved) and `Z`.
pub fn generate_path_data(vertices: &[Vertex], closed: bool) -> String {
    let Some(first) = vertices.first() else {
        return String::new();
    };

    let mut out = String::from("M ");
    push_point(&mut out, first.position());

    for (a, b) in segment_indices(vertices.len(), closed) {
        let (from, to) = (&vertices[a], &vertices[b]);
        let closing = b == 0;
        match segment_controls(from, to) {
            Some((c1, c2)) => {
                out.push_str(" C ");
                push_point(&mut out, c1);
                out.push_str(", ");
                push_point(&mut out, c2);
                out.push_str(", ");
                push_point(&mut out, to.position());
            }
            // Z draws the straight closing segment itself.
            None if closing => {}
            None => {
                out.push_str(" L ");
                push_point(&mut out, to.position());
            }
        }
    }

    if closed && vertices.len() >= 3 {
        out.push_str(" Z");
    }

    out
}
