//! # SVG Import
//!
//! Reads SVG documents into [`PointElement`]s and normalizes them into the
//! document coordinate system (millimetres).
//!
//! Supports:
//! - `<path>`, `<rect>`, `<circle>`, `<ellipse>`, `<line>`, `<polyline>`, `<polygon>`
//! - Physical sizes in `mm`, `cm`, `in` and `px` (unitless), plus `viewBox`
//! - `transform` attributes (`matrix`, `translate`, `scale`, `rotate`) on
//!   shapes and nested `<g>` groups
//! - Fit-to-artboard for fresh documents, plain unit conversion otherwise
//! - Batch cropping and centring onto an artboard
//!
//! Transforms and scaling are always applied through [`Vertex::map_points`](crate::vertex::Vertex::map_points)
//! so control handles move with their anchors.

use std::path::Path;

use anyhow::{Context, Result};
use lasersketch_core::{ImportError, SvgLength, SvgUnit, PX_TO_MM};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::bounds::{union_bounds, BoundingBox, BoundsOptions};
use crate::element::PointElement;
use crate::transform::{scale_points, transform_points, translate_points, Affine};
use crate::vertex::Point;

/// Compatibility marker written by [`crate::export::to_svg_document`].
pub const LASER_MARKER_TAG: &str = "isLaserSvgCompatible";

/// The `viewBox` rectangle of a document, in user units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Parses `"min-x min-y width height"`, comma or space separated.
    pub fn parse(s: &str) -> Option<Self> {
        let values: Vec<f64> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .map(str::parse)
            .collect::<std::result::Result<_, _>>()
            .ok()?;
        match values.as_slice() {
            [min_x, min_y, width, height] => Some(Self {
                min_x: *min_x,
                min_y: *min_y,
                width: *width,
                height: *height,
            }),
            _ => None,
        }
    }
}

/// Size information declared on the `<svg>` root.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SvgDocumentInfo {
    pub width: Option<SvgLength>,
    pub height: Option<SvgLength>,
    pub view_box: Option<ViewBox>,
}

impl SvgDocumentInfo {
    /// Unit of the declared size; unitless documents are pixels.
    pub fn unit(&self) -> SvgUnit {
        self.width
            .or(self.height)
            .map(|l| l.unit)
            .unwrap_or_default()
    }

    /// Millimetres per user unit.
    ///
    /// The unit factor of the declared size, further scaled by
    /// `width / viewBox.width` when both are present.
    pub fn unit_scale(&self, px_to_mm: f64) -> f64 {
        let factor = self.unit().mm_factor(px_to_mm);
        match (self.width, self.view_box) {
            (Some(w), Some(vb)) if vb.width > 0.0 && w.value > 0.0 => factor * w.value / vb.width,
            _ => match (self.height, self.view_box) {
                (Some(h), Some(vb)) if vb.height > 0.0 && h.value > 0.0 => {
                    factor * h.value / vb.height
                }
                _ => factor,
            },
        }
    }

    /// Drawing size in user units, if the document declares one.
    pub fn user_size(&self) -> Option<(f64, f64)> {
        if let Some(vb) = self.view_box {
            return Some((vb.width, vb.height));
        }
        match (self.width, self.height) {
            (Some(w), Some(h)) => Some((w.value, h.value)),
            _ => None,
        }
    }

    /// Offset that moves the `viewBox` origin to zero.
    pub fn view_box_offset(&self) -> Point {
        self.view_box
            .map(|vb| Point::new(-vb.min_x, -vb.min_y))
            .unwrap_or_default()
    }
}

/// Where the imported batch is going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImportMode {
    /// New document: fit the drawing into the target size.
    #[default]
    FreshDocument,
    /// Existing document: unit conversion and `viewBox` offset only.
    IntoExisting,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    pub mode: ImportMode,
    pub target_width: f64,
    pub target_height: f64,
    pub px_to_mm: f64,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            mode: ImportMode::FreshDocument,
            target_width: 1000.0,
            target_height: 1000.0,
            px_to_mm: PX_TO_MM,
        }
    }
}

fn batch_bounds(elements: &[PointElement]) -> Option<BoundingBox> {
    let options = BoundsOptions::default();
    union_bounds(
        elements
            .iter()
            .filter(|e| !e.vertices.is_empty())
            .map(|e| e.bounds_with(&options)),
    )
}

/// Uniform scale for a batch under `options`.
pub fn normalize_scale(
    elements: &[PointElement],
    info: &SvgDocumentInfo,
    options: &NormalizeOptions,
) -> f64 {
    let unit_scale = info.unit_scale(options.px_to_mm);
    match options.mode {
        ImportMode::IntoExisting => unit_scale,
        ImportMode::FreshDocument => {
            let size = info
                .user_size()
                .or_else(|| batch_bounds(elements).map(|b| (b.width, b.height)));
            let fit = match size {
                Some((w, h)) if w > 0.0 && h > 0.0 => {
                    (options.target_width / (w * unit_scale))
                        .min(options.target_height / (h * unit_scale))
                }
                _ => 1.0,
            };
            unit_scale * fit
        }
    }
}

/// Applies the `viewBox` offset and the import scale to every vertex and handle.
pub fn normalize_elements(
    elements: &[PointElement],
    info: &SvgDocumentInfo,
    options: &NormalizeOptions,
) -> Vec<PointElement> {
    let scale = normalize_scale(elements, info, options);
    let offset = info.view_box_offset();
    debug!(scale, offset_x = offset.x, offset_y = offset.y, mode = ?options.mode, "Normalizing import");

    elements
        .iter()
        .map(|e| {
            let shifted = translate_points(&e.vertices, offset.x, offset.y);
            PointElement::new(
                scale_points(&shifted, scale, scale, Point::default()),
                e.closed,
            )
        })
        .collect()
}

/// Uniformly shrinks the batch about its own centre until it fits the
/// artboard. Batches that already fit are returned unchanged.
pub fn crop_elements_to_bounds(
    elements: &[PointElement],
    artboard_width: f64,
    artboard_height: f64,
) -> Vec<PointElement> {
    let Some(bounds) = batch_bounds(elements) else {
        return elements.to_vec();
    };
    if bounds.fits_within(artboard_width, artboard_height) {
        return elements.to_vec();
    }

    let sx = if bounds.width > 0.0 { artboard_width / bounds.width } else { 1.0 };
    let sy = if bounds.height > 0.0 { artboard_height / bounds.height } else { 1.0 };
    let scale = sx.min(sy).min(1.0);
    let pivot = bounds.center();
    debug!(scale, width = bounds.width, height = bounds.height, "Cropping batch to artboard");

    elements
        .iter()
        .map(|e| PointElement::new(scale_points(&e.vertices, scale, scale, pivot), e.closed))
        .collect()
}

/// Moves the batch so its box centre sits on `(target_cx, target_cy)`.
///
/// Only batches that already fit the artboard are moved.
pub fn center_elements(
    elements: &[PointElement],
    target_cx: f64,
    target_cy: f64,
    artboard_width: f64,
    artboard_height: f64,
) -> Vec<PointElement> {
    let Some(bounds) = batch_bounds(elements) else {
        return elements.to_vec();
    };
    if !bounds.fits_within(artboard_width, artboard_height) {
        debug!(width = bounds.width, height = bounds.height, "Batch exceeds artboard, not centring");
        return elements.to_vec();
    }

    let center = bounds.center();
    let (dx, dy) = (target_cx - center.x, target_cy - center.y);
    elements
        .iter()
        .map(|e| PointElement::new(translate_points(&e.vertices, dx, dy), e.closed))
        .collect()
}

/// Represents an imported SVG document
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedDesign {
    /// Normalized shapes in document order
    pub elements: Vec<PointElement>,
    /// Size information from the `<svg>` root
    pub info: SvgDocumentInfo,
    /// Uniform scale that was applied
    pub scale: f64,
    /// Document carries the compatibility marker
    pub laser_compatible: bool,
    /// Shape elements dropped as unreadable or degenerate
    pub skipped: usize,
}

/// SVG importer for converting SVG documents to point elements
#[derive(Debug, Clone, Default)]
pub struct SvgImporter {
    pub options: NormalizeOptions,
}

impl SvgImporter {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    /// Import SVG from a file on disk
    pub fn import_file(&self, path: impl AsRef<Path>) -> Result<ImportedDesign> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        self.import_string(&content)
            .with_context(|| format!("Failed to import {}", path.display()))
    }

    /// Import SVG from string content
    pub fn import_string(&self, svg_content: &str) -> Result<ImportedDesign> {
        let Some(svg_tag) = find_tags(svg_content).find(|t| t.name == "svg" && !t.closing) else {
            return Err(ImportError::MissingSvgElement.into());
        };
        let info = Self::read_document_info(svg_tag.body);

        let mut raw = Vec::new();
        let mut skipped = 0usize;
        // Accumulated transform of each open <g>, outermost first.
        let mut groups = vec![Affine::IDENTITY];
        for tag in find_tags(svg_content) {
            let parent = groups.last().copied().unwrap_or_default();
            if tag.name == "g" {
                if tag.closing {
                    if groups.len() > 1 {
                        groups.pop();
                    }
                } else if !tag.self_closing {
                    groups.push(parent * tag_transform(tag.body));
                }
                continue;
            }
            if tag.closing {
                continue;
            }
            let Some(kind) = ShapeTag::from_name(tag.name) else {
                continue;
            };
            let ctm = parent * tag_transform(tag.body);
            match kind.read(tag.body) {
                Some(element) if element.is_usable() => {
                    if ctm.is_identity() {
                        raw.push(element);
                    } else {
                        raw.push(PointElement::new(
                            transform_points(&element.vertices, &ctm),
                            element.closed,
                        ));
                    }
                }
                _ => {
                    warn!(tag = tag.name, "Skipping unusable SVG element");
                    skipped += 1;
                }
            }
        }

        if raw.is_empty() && skipped > 0 {
            return Err(ImportError::NoUsableShapes.into());
        }

        let laser_compatible = has_laser_marker(svg_content);
        let scale = normalize_scale(&raw, &info, &self.options);
        let elements = normalize_elements(&raw, &info, &self.options);
        debug!(
            elements = elements.len(),
            skipped,
            laser_compatible,
            "Imported SVG document"
        );

        Ok(ImportedDesign {
            elements,
            info,
            scale,
            laser_compatible,
            skipped,
        })
    }

    fn read_document_info(svg_tag: &str) -> SvgDocumentInfo {
        let length = |attr: &str| {
            let text = extract_attr_str(svg_tag, attr)?;
            match text.parse::<SvgLength>() {
                Ok(l) => Some(l),
                Err(e) => {
                    debug!(attr, value = text, error = %e, "Ignoring document size");
                    None
                }
            }
        };
        SvgDocumentInfo {
            width: length("width"),
            height: length("height"),
            view_box: extract_attr_str(svg_tag, "viewBox").and_then(ViewBox::parse),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShapeTag {
    Path,
    Rect,
    Circle,
    Ellipse,
    Line,
    Polyline,
    Polygon,
}

impl ShapeTag {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "path" => Self::Path,
            "rect" => Self::Rect,
            "circle" => Self::Circle,
            "ellipse" => Self::Ellipse,
            "line" => Self::Line,
            "polyline" => Self::Polyline,
            "polygon" => Self::Polygon,
            _ => return None,
        })
    }

    fn read(self, tag: &str) -> Option<PointElement> {
        let num = |attr: &str| extract_attr_f64(tag, attr).unwrap_or(0.0);
        match self {
            Self::Path => PointElement::from_path_data(extract_attr_str(tag, "d")?),
            Self::Rect => {
                let (w, h) = (num("width"), num("height"));
                (w > 0.0 && h > 0.0).then(|| PointElement::rectangle(num("x"), num("y"), w, h))
            }
            Self::Circle => {
                let r = num("r");
                (r > 0.0).then(|| PointElement::circle(num("cx"), num("cy"), r))
            }
            Self::Ellipse => {
                let (rx, ry) = (num("rx"), num("ry"));
                (rx > 0.0 && ry > 0.0).then(|| PointElement::ellipse(num("cx"), num("cy"), rx, ry))
            }
            Self::Line => Some(PointElement::line(
                Point::new(num("x1"), num("y1")),
                Point::new(num("x2"), num("y2")),
            )),
            Self::Polyline => Some(PointElement::polyline(&parse_points(extract_attr_str(
                tag, "points",
            )?))),
            Self::Polygon => Some(PointElement::polygon(&parse_points(extract_attr_str(
                tag, "points",
            )?))),
        }
    }
}

fn parse_points(s: &str) -> Vec<Point> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect::<Vec<&str>>()
        .chunks_exact(2)
        .filter_map(|chunk| {
            let x = chunk[0].parse::<f64>().ok()?;
            let y = chunk[1].parse::<f64>().ok()?;
            Some(Point::new(x, y))
        })
        .collect()
}

/// A tag: its name and the text between the name and `>`.
#[derive(Debug, Clone, Copy)]
struct Tag<'a> {
    name: &'a str,
    body: &'a str,
    /// `</name>`
    closing: bool,
    /// `<name ... />`
    self_closing: bool,
}

/// Walks the tags of a document in order, skipping comments and
/// processing instructions.
fn find_tags(content: &str) -> impl Iterator<Item = Tag<'_>> {
    let mut search_pos = 0;
    std::iter::from_fn(move || loop {
        let tag_start = search_pos + content[search_pos..].find('<')?;
        let tag_end = tag_start + content[tag_start..].find('>')?;
        search_pos = tag_end + 1;

        let inner = &content[tag_start + 1..tag_end];
        if inner.starts_with(|c| matches!(c, '!' | '?')) {
            continue;
        }
        let (closing, inner) = match inner.strip_prefix('/') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, inner),
        };
        let name_end = inner
            .find(|c: char| c.is_whitespace() || c == '/')
            .unwrap_or(inner.len());
        let name = &inner[..name_end];
        // Drop a namespace prefix such as `svg:`.
        let name = name.rsplit(':').next().unwrap_or(name);
        let body = &inner[name_end..];
        return Some(Tag {
            name,
            body,
            closing,
            self_closing: body.trim_end().ends_with('/'),
        });
    })
}

fn tag_transform(body: &str) -> Affine {
    extract_attr_str(body, "transform")
        .map(parse_transform)
        .unwrap_or_default()
}

/// Parses an SVG transform list such as `translate(10 5) scale(2)`.
///
/// Functions compose left to right, so the rightmost applies first.
/// Unsupported or malformed functions are skipped.
fn parse_transform(s: &str) -> Affine {
    let mut result = Affine::IDENTITY;
    let mut rest = s;
    while let Some(open) = rest.find('(') {
        let Some(len) = rest[open..].find(')') else {
            break;
        };
        let name = rest[..open].trim_matches(|c: char| c == ',' || c.is_whitespace());
        let args = rest[open + 1..open + len]
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .map(str::parse::<f64>)
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap_or_default();
        rest = &rest[open + len + 1..];

        let step = match (name, args.as_slice()) {
            ("matrix", &[a, b, c, d, e, f]) => Affine([a, b, c, d, e, f]),
            ("translate", &[tx]) => Affine::translate(tx, 0.0),
            ("translate", &[tx, ty]) => Affine::translate(tx, ty),
            ("scale", &[k]) => Affine::scale(k, k),
            ("scale", &[sx, sy]) => Affine::scale(sx, sy),
            ("rotate", &[angle]) => Affine::rotate(angle),
            ("rotate", &[angle, cx, cy]) => {
                Affine::translate(cx, cy) * Affine::rotate(angle) * Affine::translate(-cx, -cy)
            }
            _ => {
                warn!(function = name, args = ?args, "Ignoring unsupported transform");
                continue;
            }
        };
        result = result * step;
    }
    result
}

/// Finds `attr="value"` (or single-quoted) where `attr` is a whole attribute name.
fn extract_attr_str<'a>(tag: &'a str, attr: &str) -> Option<&'a str> {
    let mut search_pos = 0;
    while let Some(found) = tag[search_pos..].find(attr) {
        let start = search_pos + found;
        search_pos = start + attr.len();

        let preceded_ok = tag[..start]
            .chars()
            .next_back()
            .map_or(true, char::is_whitespace);
        let rest = tag[search_pos..].trim_start();
        let Some(rest) = rest.strip_prefix('=') else {
            continue;
        };
        if !preceded_ok {
            continue;
        }
        let rest = rest.trim_start();
        let quote = rest.chars().next()?;
        if quote != '"' && quote != '\'' {
            continue;
        }
        let value = &rest[1..];
        let end = value.find(quote)?;
        return Some(&value[..end]);
    }
    None
}

fn extract_attr_f64(tag: &str, attr: &str) -> Option<f64> {
    extract_attr_str(tag, attr).and_then(|s| s.trim().parse().ok())
}

/// True when the document carries `<isLaserSvgCompatible>true</isLaserSvgCompatible>`.
pub fn has_laser_marker(svg_content: &str) -> bool {
    let open = format!("<{LASER_MARKER_TAG}>");
    let close = format!("</{LASER_MARKER_TAG}>");
    let Some(start) = svg_content.find(&open) else {
        return false;
    };
    let value_start = start + open.len();
    svg_content[value_start..]
        .find(&close)
        .map(|end| svg_content[value_start..value_start + end].trim() == "true")
        .unwrap_or(false)
}
