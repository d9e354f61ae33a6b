//! Interactive transforms over vertex arrays.
//!
//! Every operation takes the current vertices and returns a fresh array;
//! the caller decides when to commit the result to its document store.

use std::fmt;
use std::ops::Mul;
use std::str::FromStr;

use lasersketch_core::GeometryError;
use serde::{Deserialize, Serialize};

use crate::bounds::BoundingBox;
use crate::vertex::{Point, Vertex};

const DEGENERATE_EXTENT: f64 = 1e-12;

/// One of the eight resize handles around a selection box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleName {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl HandleName {
    pub const ALL: [HandleName; 8] = [
        HandleName::N,
        HandleName::Ne,
        HandleName::E,
        HandleName::Se,
        HandleName::S,
        HandleName::Sw,
        HandleName::W,
        HandleName::Nw,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HandleName::N => "n",
            HandleName::Ne => "ne",
            HandleName::E => "e",
            HandleName::Se => "se",
            HandleName::S => "s",
            HandleName::Sw => "sw",
            HandleName::W => "w",
            HandleName::Nw => "nw",
        }
    }

    pub fn to_handle(self) -> TransformHandle {
        use HorizontalSide::*;
        use VerticalSide::*;
        let (horizontal, vertical) = match self {
            HandleName::N => (None, Some(Top)),
            HandleName::Ne => (Some(Right), Some(Top)),
            HandleName::E => (Some(Right), None),
            HandleName::Se => (Some(Right), Some(Bottom)),
            HandleName::S => (None, Some(Bottom)),
            HandleName::Sw => (Some(Left), Some(Bottom)),
            HandleName::W => (Some(Left), None),
            HandleName::Nw => (Some(Left), Some(Top)),
        };
        TransformHandle {
            horizontal,
            vertical,
            is_corner: horizontal.is_some() && vertical.is_some(),
        }
    }
}

impl fmt::Display for HandleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HandleName {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        HandleName::ALL
            .into_iter()
            .find(|h| h.as_str() == lower)
            .ok_or_else(|| GeometryError::InvalidHandle {
                name: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorizontalSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalSide {
    Top,
    Bottom,
}

/// Which box sides a drag acts on. An absent side leaves that axis alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformHandle {
    pub horizontal: Option<HorizontalSide>,
    pub vertical: Option<VerticalSide>,
    pub is_corner: bool,
}

/// Parses a handle identifier such as `"e"` or `"nw"`.
///
/// Unknown names are a caller error and are rejected.
pub fn parse_handle(name: &str) -> Result<TransformHandle, GeometryError> {
    name.parse::<HandleName>().map(HandleName::to_handle)
}

/// Pointer movement in vertex units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DragDelta {
    pub dx: f64,
    pub dy: f64,
}

impl DragDelta {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// Per-axis resize law: the pivot, the dragged side and the drag distance.
#[derive(Debug, Clone, Copy)]
struct AxisLaw {
    pivot: f64,
    extent: f64,
    delta: f64,
    from_center: bool,
}

impl AxisLaw {
    fn new(min: f64, max: f64, dragged_max: bool, delta: f64, from_center: bool) -> Option<Self> {
        let (handle_pos, edge_pivot) = if dragged_max { (max, min) } else { (min, max) };
        let pivot = if from_center { (min + max) / 2.0 } else { edge_pivot };
        // From the centre both sides move, so the drag spans the whole box.
        let extent = if from_center {
            2.0 * (handle_pos - pivot)
        } else {
            handle_pos - pivot
        };
        (extent.abs() > DEGENERATE_EXTENT).then_some(Self {
            pivot,
            extent,
            delta,
            from_center,
        })
    }

    fn apply(&self, value: f64) -> f64 {
        let coefficient = if self.from_center {
            (value - self.pivot) / self.extent
        } else {
            (value - self.pivot).abs() / self.extent.abs()
        };
        value + coefficient * self.delta
    }
}

/// Resizes vertices by dragging `handle` of `bounds` by `delta`.
///
/// Each anchor and each present handle moves by `coefficient * delta` on
/// the active axes. A point on the pivot stays put, a point on the dragged
/// edge follows the pointer (by half the delta when scaling from the
/// centre, since the opposite edge mirrors it). Zero-size axes are skipped.
pub fn resize_points(
    vertices: &[Vertex],
    bounds: &BoundingBox,
    delta: DragDelta,
    handle: &TransformHandle,
    from_center: bool,
) -> Vec<Vertex> {
    let x_law = handle.horizontal.and_then(|side| {
        AxisLaw::new(
            bounds.min_x(),
            bounds.max_x(),
            side == HorizontalSide::Right,
            delta.dx,
            from_center,
        )
    });
    let y_law = handle.vertical.and_then(|side| {
        AxisLaw::new(
            bounds.min_y(),
            bounds.max_y(),
            side == VerticalSide::Bottom,
            delta.dy,
            from_center,
        )
    });

    if x_law.is_none() && y_law.is_none() {
        return vertices.to_vec();
    }

    vertices
        .iter()
        .map(|v| {
            v.map_points(|p| {
                Point::new(
                    x_law.map_or(p.x, |law| law.apply(p.x)),
                    y_law.map_or(p.y, |law| law.apply(p.y)),
                )
            })
        })
        .collect()
}

/// Mirrors across the vertical centre line of `bounds`.
pub fn flip_horizontal(vertices: &[Vertex], bounds: &BoundingBox) -> Vec<Vertex> {
    let cx = bounds.center().x;
    vertices
        .iter()
        .map(|v| v.map_points(|p| Point::new(2.0 * cx - p.x, p.y)))
        .collect()
}

/// Mirrors across the horizontal centre line of `bounds`.
pub fn flip_vertical(vertices: &[Vertex], bounds: &BoundingBox) -> Vec<Vertex> {
    let cy = bounds.center().y;
    vertices
        .iter()
        .map(|v| v.map_points(|p| Point::new(p.x, 2.0 * cy - p.y)))
        .collect()
}

pub fn translate_points(vertices: &[Vertex], dx: f64, dy: f64) -> Vec<Vertex> {
    vertices
        .iter()
        .map(|v| v.map_points(|p| Point::new(p.x + dx, p.y + dy)))
        .collect()
}

/// Scales about `pivot`.
pub fn scale_points(vertices: &[Vertex], sx: f64, sy: f64, pivot: Point) -> Vec<Vertex> {
    vertices
        .iter()
        .map(|v| {
            v.map_points(|p| {
                Point::new(
                    pivot.x + (p.x - pivot.x) * sx,
                    pivot.y + (p.y - pivot.y) * sy,
                )
            })
        })
        .collect()
}

/// Rotates about `center` by `angle_deg`, clockwise in screen coordinates.
pub fn rotate_points(vertices: &[Vertex], center: Point, angle_deg: f64) -> Vec<Vertex> {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    vertices
        .iter()
        .map(|v| {
            v.map_points(|p| {
                let dx = p.x - center.x;
                let dy = p.y - center.y;
                Point::new(
                    center.x + dx * cos - dy * sin,
                    center.y + dx * sin + dy * cos,
                )
            })
        })
        .collect()
}

/// 2D affine map `[a, b, c, d, e, f]` in SVG `matrix()` order:
/// `x' = a·x + c·y + e`, `y' = b·x + d·y + f`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affine(pub [f64; 6]);

impl Affine {
    pub const IDENTITY: Affine = Affine([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    pub fn translate(tx: f64, ty: f64) -> Self {
        Affine([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Affine([sx, 0.0, 0.0, sy, 0.0, 0.0])
    }

    /// Rotation about the origin, clockwise in screen coordinates.
    pub fn rotate(angle_deg: f64) -> Self {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        Affine([cos, sin, -sin, cos, 0.0, 0.0])
    }

    pub fn apply(&self, p: Point) -> Point {
        let [a, b, c, d, e, f] = self.0;
        Point::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// `self * other` applies `other` first.
impl Mul for Affine {
    type Output = Affine;

    fn mul(self, other: Affine) -> Affine {
        let m = self.0;
        let n = other.0;
        Affine([
            m[0] * n[0] + m[2] * n[1],
            m[1] * n[0] + m[3] * n[1],
            m[0] * n[2] + m[2] * n[3],
            m[1] * n[2] + m[3] * n[3],
            m[0] * n[4] + m[2] * n[5] + m[4],
            m[1] * n[4] + m[3] * n[5] + m[5],
        ])
    }
}

/// Maps anchors and control handles through `affine`.
pub fn transform_points(vertices: &[Vertex], affine: &Affine) -> Vec<Vertex> {
    vertices
        .iter()
        .map(|v| v.map_points(|p| affine.apply(p)))
        .collect()
}
