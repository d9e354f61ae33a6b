//! Error handling for LaserSketch
//!
//! The geometry engine favours graceful degradation: malformed path data
//! yields fewer vertices and degenerate boxes short-circuit to no-ops. The
//! types here cover the few conditions that are real caller errors:
//! - Geometry errors (unknown resize handle names, bad units)
//! - Import errors (documents that are not SVG or carry no usable shapes)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised at the engine boundary when a caller hands over an identifier or
/// value the engine does not define.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Resize handle name outside the 8-way compass set
    #[error("Invalid transform handle: {name}")]
    InvalidHandle {
        /// The rejected handle name.
        name: String,
    },

    /// Length unit suffix that is not mm, cm, in or px
    #[error("Invalid unit: {unit}")]
    InvalidUnit {
        /// The rejected unit suffix.
        unit: String,
    },

    /// Length string whose numeric part does not parse
    #[error("Invalid length: {value}")]
    InvalidLength {
        /// The rejected length text.
        value: String,
    },

    /// Generic geometry error
    #[error("Geometry error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Import error type
///
/// Represents errors while reading an SVG document into shapes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    /// The document has no `<svg>` root element
    #[error("Invalid SVG: missing <svg> element")]
    MissingSvgElement,

    /// Every shape in the document degenerated to fewer than two vertices
    #[error("No usable shapes found in document")]
    NoUsableShapes,

    /// Generic import error
    #[error("Import error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Main error type for LaserSketch
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Import error
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is an import error
    pub fn is_import_error(&self) -> bool {
        matches!(self, Error::Import(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
