//! SVG path data parser.
//!
//! Parsing never fails. Malformed numbers are dropped one token at a time,
//! unsupported commands are skipped together with their arguments, and
//! degenerate input simply yields fewer vertices. Callers treat fewer than
//! two vertices as "not a usable shape".

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::vertex::{Point, Vertex};

/// Control points closer than this to their anchor count as absent.
const COINCIDENT_TOLERANCE: f64 = 1e-9;

/// A command letter with its numeric arguments, as written.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCommand {
    pub letter: char,
    pub args: SmallVec<[f64; 8]>,
}

/// Absolute drawing command after relative resolution and lowering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo { ctrl1: Point, ctrl2: Point, to: Point },
    Close,
}

/// Vertices of a parsed path plus whether any subpath was closed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedPath {
    pub vertices: Vec<Vertex>,
    pub closed: bool,
}

/// Parses path data into vertices.
pub fn parse_path_data(d: &str) -> Vec<Vertex> {
    parse_path(d).vertices
}

/// Parses path data into vertices and a closed flag.
pub fn parse_path(d: &str) -> ParsedPath {
    let raw = tokenize(d);
    let commands = to_absolute(&raw);
    let parsed = build_vertices(&commands);
    debug!(
        commands = commands.len(),
        vertices = parsed.vertices.len(),
        closed = parsed.closed,
        "Parsed path data"
    );
    parsed
}

/// Stage 1: split path data into commands with their numeric arguments.
///
/// Handles commas and whitespace, splits on `+`/`-` when they begin a new
/// number (`10-5` → `10`, `-5`) and on a second decimal point (`0.5.5` →
/// `0.5`, `.5`), while keeping exponents (`1e-3`) intact.
pub fn tokenize(d: &str) -> Vec<RawCommand> {
    let mut commands: Vec<RawCommand> = Vec::new();
    let mut current = String::new();

    for ch in d.chars() {
        match ch {
            'e' | 'E' => current.push(ch),
            c if c.is_ascii_alphabetic() => {
                flush_number(&mut current, &mut commands);
                commands.push(RawCommand {
                    letter: c,
                    args: SmallVec::new(),
                });
            }
            '-' | '+' => {
                if !current.is_empty() && !matches!(current.chars().last(), Some('e' | 'E')) {
                    flush_number(&mut current, &mut commands);
                }
                current.push(ch);
            }
            '.' => {
                if current.contains(|c| c == '.' || c == 'e' || c == 'E') {
                    flush_number(&mut current, &mut commands);
                }
                current.push(ch);
            }
            c if c.is_whitespace() || c == ',' => flush_number(&mut current, &mut commands),
            _ => current.push(ch),
        }
    }
    flush_number(&mut current, &mut commands);

    commands
}

fn flush_number(current: &mut String, commands: &mut [RawCommand]) {
    if current.is_empty() {
        return;
    }
    let text = std::mem::take(current);
    let value = match text.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            trace!(token = %text, "Dropping malformed path token");
            return;
        }
    };
    match commands.last_mut() {
        Some(cmd) => cmd.args.push(value),
        None => trace!(token = %text, "Dropping argument before first command"),
    }
}

fn arity(command: char) -> Option<usize> {
    match command {
        'Z' => Some(0),
        'H' | 'V' => Some(1),
        'M' | 'L' | 'T' => Some(2),
        'S' | 'Q' => Some(4),
        'C' => Some(6),
        'A' => Some(7),
        _ => None,
    }
}

fn resolve(cursor: Point, relative: bool, x: f64, y: f64) -> Point {
    if relative {
        Point::new(cursor.x + x, cursor.y + y)
    } else {
        Point::new(x, y)
    }
}

fn reflect(p: Point, around: Point) -> Point {
    Point::new(2.0 * around.x - p.x, 2.0 * around.y - p.y)
}

/// Degree elevation of the quadratic `from, q, to`.
fn quad_to_cubic(from: Point, q: Point, to: Point) -> PathCommand {
    PathCommand::CubicTo {
        ctrl1: from.lerp(&q, 2.0 / 3.0),
        ctrl2: to.lerp(&q, 2.0 / 3.0),
        to,
    }
}

/// Stage 2: resolve relative coordinates and lower to absolute commands.
///
/// The cursor returns to the subpath start on `Z`, so a relative command
/// after a close is measured from where that subpath began.
pub fn to_absolute(raw: &[RawCommand]) -> Vec<PathCommand> {
    let mut out = Vec::with_capacity(raw.len());
    let mut cursor = Point::default();
    let mut start = Point::default();
    let mut prev_cubic: Option<Point> = None;
    let mut prev_quad: Option<Point> = None;

    for cmd in raw {
        let upper = cmd.letter.to_ascii_uppercase();
        let relative = cmd.letter.is_ascii_lowercase();

        let Some(n) = arity(upper) else {
            debug!(letter = %cmd.letter, args = cmd.args.len(), "Skipping unsupported path command");
            prev_cubic = None;
            prev_quad = None;
            continue;
        };

        if n == 0 {
            out.push(PathCommand::Close);
            cursor = start;
            prev_cubic = None;
            prev_quad = None;
            continue;
        }

        let groups = cmd.args.chunks_exact(n);
        if !groups.remainder().is_empty() {
            trace!(letter = %cmd.letter, leftover = groups.remainder().len(), "Dropping incomplete argument group");
        }

        for (i, a) in groups.enumerate() {
            match upper {
                'M' => {
                    let p = resolve(cursor, relative, a[0], a[1]);
                    if i == 0 {
                        out.push(PathCommand::MoveTo(p));
                        start = p;
                    } else {
                        out.push(PathCommand::LineTo(p));
                    }
                    cursor = p;
                    prev_cubic = None;
                    prev_quad = None;
                }
                'L' => {
                    let p = resolve(cursor, relative, a[0], a[1]);
                    out.push(PathCommand::LineTo(p));
                    cursor = p;
                    prev_cubic = None;
                    prev_quad = None;
                }
                'H' => {
                    let x = if relative { cursor.x + a[0] } else { a[0] };
                    let p = Point::new(x, cursor.y);
                    out.push(PathCommand::LineTo(p));
                    cursor = p;
                    prev_cubic = None;
                    prev_quad = None;
                }
                'V' => {
                    let y = if relative { cursor.y + a[0] } else { a[0] };
                    let p = Point::new(cursor.x, y);
                    out.push(PathCommand::LineTo(p));
                    cursor = p;
                    prev_cubic = None;
                    prev_quad = None;
                }
                'C' => {
                    let ctrl1 = resolve(cursor, relative, a[0], a[1]);
                    let ctrl2 = resolve(cursor, relative, a[2], a[3]);
                    let to = resolve(cursor, relative, a[4], a[5]);
                    out.push(PathCommand::CubicTo { ctrl1, ctrl2, to });
                    cursor = to;
                    prev_cubic = Some(ctrl2);
                    prev_quad = None;
                }
                'S' => {
                    let ctrl1 = prev_cubic.map(|c| reflect(c, cursor)).unwrap_or(cursor);
                    let ctrl2 = resolve(cursor, relative, a[0], a[1]);
                    let to = resolve(cursor, relative, a[2], a[3]);
                    out.push(PathCommand::CubicTo { ctrl1, ctrl2, to });
                    cursor = to;
                    prev_cubic = Some(ctrl2);
                    prev_quad = None;
                }
                'Q' => {
                    let q = resolve(cursor, relative, a[0], a[1]);
                    let to = resolve(cursor, relative, a[2], a[3]);
                    out.push(quad_to_cubic(cursor, q, to));
                    cursor = to;
                    prev_quad = Some(q);
                    prev_cubic = None;
                }
                'T' => {
                    let q = prev_quad.map(|c| reflect(c, cursor)).unwrap_or(cursor);
                    let to = resolve(cursor, relative, a[0], a[1]);
                    out.push(quad_to_cubic(cursor, q, to));
                    cursor = to;
                    prev_quad = Some(q);
                    prev_cubic = None;
                }
                'A' => {
                    let to = resolve(cursor, relative, a[5], a[6]);
                    let arc = ArcParams {
                        rx: a[0],
                        ry: a[1],
                        x_axis_rotation: a[2],
                        large_arc: a[3] != 0.0,
                        sweep: a[4] != 0.0,
                    };
                    match arc_to_cubics(cursor, to, arc) {
                        Some(cubics) => {
                            out.extend(cubics.into_iter().map(|(ctrl1, ctrl2, to)| {
                                PathCommand::CubicTo { ctrl1, ctrl2, to }
                            }));
                        }
                        None => out.push(PathCommand::LineTo(to)),
                    }
                    cursor = to;
                    prev_cubic = None;
                    prev_quad = None;
                }
                _ => {}
            }
        }
    }

    out
}

#[derive(Debug, Clone, Copy)]
struct ArcParams {
    rx: f64,
    ry: f64,
    x_axis_rotation: f64,
    large_arc: bool,
    sweep: bool,
}

/// Converts an endpoint-parameterised elliptical arc into cubic segments of
/// at most 90° each. `None` means the radii are degenerate and the arc is a
/// straight line; an empty list means start and end coincide.
fn arc_to_cubics(from: Point, to: Point, arc: ArcParams) -> Option<Vec<(Point, Point, Point)>> {
    if from.approx_eq(&to, COINCIDENT_TOLERANCE) {
        return Some(Vec::new());
    }
    let mut rx = arc.rx.abs();
    let mut ry = arc.ry.abs();
    if rx < f64::EPSILON || ry < f64::EPSILON {
        return None;
    }

    let phi = arc.x_axis_rotation.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    let dx2 = (from.x - to.x) / 2.0;
    let dy2 = (from.y - to.y) / 2.0;
    let x1p = cos_phi * dx2 + sin_phi * dy2;
    let y1p = -sin_phi * dx2 + cos_phi * dy2;

    // Scale radii up when they cannot span the endpoints.
    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }

    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let denom = rx2 * y1p * y1p + ry2 * x1p * x1p;
    if denom.abs() < f64::EPSILON {
        return None;
    }
    let numer = (rx2 * ry2 - rx2 * y1p * y1p - ry2 * x1p * x1p).max(0.0);
    let sign = if arc.large_arc == arc.sweep { -1.0 } else { 1.0 };
    let coef = sign * (numer / denom).sqrt();
    let cxp = coef * (rx * y1p / ry);
    let cyp = coef * (-ry * x1p / rx);

    let cx = cos_phi * cxp - sin_phi * cyp + (from.x + to.x) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (from.y + to.y) / 2.0;

    let angle = |ux: f64, uy: f64, vx: f64, vy: f64| (ux * vy - uy * vx).atan2(ux * vx + uy * vy);
    let ux = (x1p - cxp) / rx;
    let uy = (y1p - cyp) / ry;
    let vx = (-x1p - cxp) / rx;
    let vy = (-y1p - cyp) / ry;

    let mut theta = angle(1.0, 0.0, ux, uy);
    let mut delta = angle(ux, uy, vx, vy);
    if !arc.sweep && delta > 0.0 {
        delta -= std::f64::consts::TAU;
    } else if arc.sweep && delta < 0.0 {
        delta += std::f64::consts::TAU;
    }

    let segments = (delta.abs() / std::f64::consts::FRAC_PI_2).ceil().max(1.0) as usize;
    let step = delta / segments as f64;
    let on_ellipse = |u: f64, v: f64| {
        Point::new(
            cx + cos_phi * (rx * u) - sin_phi * (ry * v),
            cy + sin_phi * (rx * u) + cos_phi * (ry * v),
        )
    };

    let mut cubics = Vec::with_capacity(segments);
    for i in 0..segments {
        let t0 = theta;
        let t1 = theta + step;
        let k = 4.0 / 3.0 * ((t1 - t0) / 4.0).tan();
        let (s0, c0) = t0.sin_cos();
        let (s1, c1) = t1.sin_cos();
        let ctrl1 = on_ellipse(c0 - k * s0, s0 + k * c0);
        let ctrl2 = on_ellipse(c1 + k * s1, s1 - k * c1);
        // Land exactly on the requested endpoint.
        let end = if i + 1 == segments { to } else { on_ellipse(c1, s1) };
        cubics.push((ctrl1, ctrl2, end));
        theta = t1;
    }

    Some(cubics)
}

/// Stage 3: build vertices from absolute commands.
///
/// `MoveTo`/`LineTo` add straight vertices. `CubicTo` hangs its first control
/// point on the previous vertex as an outgoing handle and creates a vertex
/// carrying the second as its incoming handle; control points lying on their
/// anchor are left off. `Close` merges a trailing vertex that duplicates the
/// subpath start into it, then, for subpaths of more than two vertices,
/// stitches the closing segment: if either end carries a handle on that
/// segment both ends become corners.
pub fn build_vertices(commands: &[PathCommand]) -> ParsedPath {
    let mut vertices: Vec<Vertex> = Vec::new();
    let mut subpath_start = 0usize;
    let mut closed = false;

    for command in commands {
        match *command {
            PathCommand::MoveTo(p) => {
                subpath_start = vertices.len();
                vertices.push(Vertex::new(p.x, p.y));
            }
            PathCommand::LineTo(p) => vertices.push(Vertex::new(p.x, p.y)),
            PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                if vertices.len() > subpath_start {
                    if let Some(prev) = vertices.last_mut() {
                        if !ctrl1.approx_eq(&prev.position(), COINCIDENT_TOLERANCE) {
                            prev.set_next_handle(Some(ctrl1));
                        }
                    }
                }
                let mut v = Vertex::new(to.x, to.y);
                if !ctrl2.approx_eq(&to, COINCIDENT_TOLERANCE) {
                    v.set_prev_handle(Some(ctrl2));
                }
                vertices.push(v);
            }
            PathCommand::Close => {
                closed = true;
                close_subpath(&mut vertices, subpath_start);
                subpath_start = vertices.len();
            }
        }
    }

    ParsedPath { vertices, closed }
}

/// Handles `Z`: a trailing vertex on top of the subpath start is merged into
/// it, and a curved closing segment turns both ends into corners.
///
/// Handles are kept where the path data put them rather than copied across
/// the seam, so serializing the result reproduces the same closing segment.
fn close_subpath(vertices: &mut Vec<Vertex>, start: usize) {
    if vertices.len() < start + 2 {
        return;
    }

    let first = vertices[start].position();
    let last = vertices[vertices.len() - 1];
    if last.position().approx_eq(&first, COINCIDENT_TOLERANCE) {
        vertices.pop();
        if let Some(handle) = last.prev_handle() {
            vertices[start].set_prev_handle(Some(handle));
        }
        trace!(start, "Merged closing vertex into subpath start");
    }

    if vertices.len() - start > 2 {
        let last_index = vertices.len() - 1;
        let curved = vertices[start].prev_handle().is_some()
            || vertices[last_index].next_handle().is_some();
        if curved {
            vertices[start].promote_to_corner();
            vertices[last_index].promote_to_corner();
            trace!(start, last_index, "Stitched curved closing segment");
        }
    }
}
