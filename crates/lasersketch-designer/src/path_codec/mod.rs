//! SVG path data (`d` attribute) codec.
//!
//! Parsing runs in three stages:
//! 1. [`tokenize`] splits the text into command letters with numeric arguments,
//!    silently dropping numbers that fail to parse.
//! 2. [`to_absolute`] resolves relative commands against a running cursor and
//!    lowers everything to `MoveTo`/`LineTo`/`CubicTo`/`Close`.
//! 3. [`build_vertices`] walks that stream and produces the vertex model.
//!
//! [`generate_path_data`] is the inverse for shapes produced by the parser:
//! parse → serialize → parse keeps vertex count, positions and handle presence.

pub mod parser;
pub mod serializer;

pub use parser::{
    build_vertices, parse_path, parse_path_data, to_absolute, tokenize, ParsedPath, PathCommand,
    RawCommand,
};
pub use serializer::{format_number, generate_path_data};
