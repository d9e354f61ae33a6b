//! # LaserSketch
//!
//! Vector shape engine for a laser-cutting layout editor, plus a small
//! command-line front end that imports SVG documents onto an artboard.
//!
//! ## Architecture
//!
//! LaserSketch is organized as a workspace with multiple crates:
//!
//! 1. **lasersketch-core** - Error types and physical units
//! 2. **lasersketch-designer** - Vertices, bounds, path codec, transforms, import/export
//! 3. **lasersketch-settings** - Configuration files and validation
//! 4. **lasersketch** - Command-line binary that integrates all crates

pub mod cli;

pub use lasersketch_designer as designer;

pub use lasersketch_core::{Error, GeometryError, ImportError, Result};
pub use lasersketch_designer::{
    BoundingBox, ElementStore, PointElement, SvgImporter, Vertex, VertexKind, VertexType,
};
pub use lasersketch_settings::Config;

/// Initialize structured logging with tracing
///
/// Sets up structured logging with:
/// - Console output on stderr
/// - RUST_LOG environment variable support
/// - Target, level and line number on every event
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
