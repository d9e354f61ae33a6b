//! Command-line front end: import an SVG onto the artboard and report the
//! resulting shapes.

use std::fmt::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use lasersketch_designer::{
    center_elements, crop_elements_to_bounds, shape_kind, union_bounds, ImportMode, SvgImporter,
};
use lasersketch_settings::Config;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "lasersketch", version)]
pub struct Cli {
    /// SVG document to import
    pub file: PathBuf,

    #[arg(long, help = "Configuration file (.toml or .json); defaults to the platform config dir")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Keep source units instead of fitting the drawing to the target size")]
    pub into_existing: bool,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => Config::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display())),
            None => match Config::default_path() {
                Ok(path) => Ok(Config::load_or_default(&path)?),
                Err(_) => Ok(Config::default()),
            },
        }
    }

    fn mode(&self) -> ImportMode {
        if self.into_existing {
            ImportMode::IntoExisting
        } else {
            ImportMode::FreshDocument
        }
    }
}

/// Imports, crops and centres the document, returning a text report with
/// one block per element: kind, bounding box and path data.
pub fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = cli.load_config()?;
    let importer = SvgImporter::new(config.normalize_options(cli.mode()));
    let design = importer.import_file(&cli.file)?;
    info!(
        file = %cli.file.display(),
        elements = design.elements.len(),
        skipped = design.skipped,
        scale = design.scale,
        "Imported document"
    );

    let artboard = &config.artboard;
    let cropped = crop_elements_to_bounds(&design.elements, artboard.width, artboard.height);
    let placed = center_elements(
        &cropped,
        artboard.width / 2.0,
        artboard.height / 2.0,
        artboard.width,
        artboard.height,
    );

    let bounds_options = config.bounds_options();
    let mut report = String::new();
    if design.laser_compatible {
        report.push_str("# laser-compatible document\n");
    }
    for (i, element) in placed.iter().enumerate() {
        let bb = element.bounds_with(&bounds_options);
        writeln!(
            report,
            "#{} {:?} x={:.3} y={:.3} w={:.3} h={:.3}",
            i + 1,
            shape_kind(element),
            bb.x,
            bb.y,
            bb.width,
            bb.height
        )?;
        writeln!(report, "  {}", element.to_path_data())?;
    }
    if let Some(bb) = union_bounds(placed.iter().map(|e| e.bounds_with(&bounds_options))) {
        writeln!(
            report,
            "total x={:.3} y={:.3} w={:.3} h={:.3}",
            bb.x, bb.y, bb.width, bb.height
        )?;
    }

    Ok(report)
}
