//! # LaserSketch Core
//!
//! Core types shared by every LaserSketch crate: the error taxonomy and
//! physical unit handling for imported documents.

pub mod error;
pub mod units;

pub use error::{Error, GeometryError, ImportError, Result};
pub use units::{SvgLength, SvgUnit, MM_PER_CM, MM_PER_INCH, PX_TO_MM};
