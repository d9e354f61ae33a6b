//! # LaserSketch Designer
//!
//! Vector shape engine behind the LaserSketch editor. Every drawable shape is
//! an ordered list of vertices with optional cubic Bezier handles; this crate
//! computes their bounds, reads and writes them as SVG path data, applies the
//! interactive transforms, and brings imported SVG documents into document
//! coordinates.
//!
//! ## Core Components
//!
//! - **Vertex model**: straight, corner and smooth vertices and the
//!   conversions between them
//! - **Bounds**: curve-aware bounding boxes for shapes and selections
//! - **Path codec**: SVG `d` attribute parser and serializer
//! - **Transforms**: handle-driven resize, flips, translate, scale, rotate
//! - **Import/Export**: SVG documents in, SVG documents out
//!
//! ## Architecture
//!
//! ```text
//! ElementStore (shapes + groups)
//!   └── PointElement (vertices + closed flag)
//!         └── Vertex (anchor + VertexKind)
//!
//! path_codec ── parse ──► Vec<Vertex> ── serialize ──► path data
//! transform  ── &[Vertex] + BoundingBox ──► Vec<Vertex>
//! import     ── SVG text ──► normalized PointElements
//! ```
//!
//! All engine operations are pure: they borrow their input and return new
//! data. The owning store decides when results are committed.
//!
//! ## Usage
//!
//! ```rust
//! use lasersketch_designer::{
//!     calculate_bounds_from_points, parse_handle, parse_path_data, resize_points, DragDelta,
//! };
//!
//! let vertices = parse_path_data("M 0 0 L 100 0 L 100 50 L 0 50 Z");
//! let bounds = calculate_bounds_from_points(&vertices, true);
//! let handle = parse_handle("e").unwrap();
//! let resized = resize_points(&vertices, &bounds, DragDelta::new(20.0, 0.0), &handle, false);
//! assert_eq!(resized[1].x, 120.0);
//! ```

pub mod bounds;
pub mod element;
pub mod export;
pub mod import;
pub mod path_codec;
pub mod transform;
pub mod vertex;

pub use bounds::{
    calculate_bounds_from_points, calculate_bounds_with, cubic_point, union_bounds, BoundingBox,
    BoundsOptions, MIN_CURVE_SAMPLES,
};
pub use element::{
    shape_kind, DocumentElement, ElementId, ElementKind, ElementStore, PointElement, ShapeKind,
    KAPPA,
};
pub use export::to_svg_document;
pub use import::{
    center_elements, crop_elements_to_bounds, has_laser_marker, normalize_elements,
    normalize_scale, ImportMode, ImportedDesign, NormalizeOptions, SvgDocumentInfo, SvgImporter,
    ViewBox,
};
pub use path_codec::{format_number, generate_path_data, parse_path, parse_path_data, ParsedPath};
pub use transform::{
    flip_horizontal, flip_vertical, parse_handle, resize_points, rotate_points, scale_points,
    transform_points, translate_points, Affine, DragDelta, HandleName, HorizontalSide,
    TransformHandle, VerticalSide,
};
pub use vertex::{
    convert_to_corner, convert_to_smooth, convert_to_straight, create_vertex, has_curve,
    next_index, previous_index, Handles, Point, Vertex, VertexKind, VertexType,
};
