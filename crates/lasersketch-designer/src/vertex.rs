//! Vertex model shared by every drawable shape.
//!
//! A vertex is an anchor coordinate plus a kind. Straight vertices carry no
//! control handles at all; corner and smooth vertices may carry an incoming
//! (`prev`) and/or outgoing (`next`) cubic Bezier handle. Keeping the handles
//! inside the kind makes "straight implies no handles" hold by construction.

use serde::{Deserialize, Serialize};

/// Handle length as a fraction of the distance to the neighbouring anchor.
const HANDLE_RATIO: f64 = 0.25;

const EPSILON: f64 = 1e-9;

/// Represents a 2D point with X and Y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn approx_eq(&self, other: &Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

/// Vertex type tag as exposed to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VertexType {
    Straight,
    Corner,
    Smooth,
}

/// Control handles owned by a curved vertex.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Handles {
    /// Governs the incoming segment.
    pub prev: Option<Point>,
    /// Governs the outgoing segment.
    pub next: Option<Point>,
}

impl Handles {
    pub fn new(prev: Option<Point>, next: Option<Point>) -> Self {
        Self { prev, next }
    }

    pub fn is_empty(&self) -> bool {
        self.prev.is_none() && self.next.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "vertexType", rename_all = "lowercase")]
pub enum VertexKind {
    Straight,
    Corner(Handles),
    Smooth(Handles),
}

/// An anchor point of a shape with optional Bezier handles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    #[serde(flatten)]
    pub kind: VertexKind,
}

impl Vertex {
    /// Creates a straight vertex without handles.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            kind: VertexKind::Straight,
        }
    }

    pub fn corner(x: f64, y: f64, prev: Option<Point>, next: Option<Point>) -> Self {
        Self {
            x,
            y,
            kind: VertexKind::Corner(Handles::new(prev, next)),
        }
    }

    pub fn smooth(x: f64, y: f64, prev: Option<Point>, next: Option<Point>) -> Self {
        Self {
            x,
            y,
            kind: VertexKind::Smooth(Handles::new(prev, next)),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn vertex_type(&self) -> VertexType {
        match self.kind {
            VertexKind::Straight => VertexType::Straight,
            VertexKind::Corner(_) => VertexType::Corner,
            VertexKind::Smooth(_) => VertexType::Smooth,
        }
    }

    pub fn handles(&self) -> Option<&Handles> {
        match &self.kind {
            VertexKind::Straight => None,
            VertexKind::Corner(h) | VertexKind::Smooth(h) => Some(h),
        }
    }

    fn handles_mut(&mut self) -> Option<&mut Handles> {
        match &mut self.kind {
            VertexKind::Straight => None,
            VertexKind::Corner(h) | VertexKind::Smooth(h) => Some(h),
        }
    }

    pub fn prev_handle(&self) -> Option<Point> {
        self.handles().and_then(|h| h.prev)
    }

    pub fn next_handle(&self) -> Option<Point> {
        self.handles().and_then(|h| h.next)
    }

    /// True iff either handle is present.
    pub fn has_curve(&self) -> bool {
        self.handles().map(|h| !h.is_empty()).unwrap_or(false)
    }

    /// Turns a straight vertex into a corner without handles. Curved kinds are kept.
    pub fn promote_to_corner(&mut self) {
        if self.kind == VertexKind::Straight {
            self.kind = VertexKind::Corner(Handles::default());
        }
    }

    /// Sets the incoming handle, promoting a straight vertex to a corner.
    /// Clearing a handle on a straight vertex is a no-op.
    pub fn set_prev_handle(&mut self, handle: Option<Point>) {
        if handle.is_some() {
            self.promote_to_corner();
        }
        if let Some(h) = self.handles_mut() {
            h.prev = handle;
        }
    }

    /// Sets the outgoing handle, promoting a straight vertex to a corner.
    pub fn set_next_handle(&mut self, handle: Option<Point>) {
        if handle.is_some() {
            self.promote_to_corner();
        }
        if let Some(h) = self.handles_mut() {
            h.next = handle;
        }
    }

    /// Applies `f` to the anchor and to every present handle.
    pub fn map_points<F>(&self, f: F) -> Vertex
    where
        F: Fn(Point) -> Point,
    {
        let anchor = f(self.position());
        let map_handles = |h: &Handles| Handles::new(h.prev.map(&f), h.next.map(&f));
        let kind = match &self.kind {
            VertexKind::Straight => VertexKind::Straight,
            VertexKind::Corner(h) => VertexKind::Corner(map_handles(h)),
            VertexKind::Smooth(h) => VertexKind::Smooth(map_handles(h)),
        };
        Vertex {
            x: anchor.x,
            y: anchor.y,
            kind,
        }
    }
}

/// `createVertex`: a straight vertex with no handles.
pub fn create_vertex(x: f64, y: f64) -> Vertex {
    Vertex::new(x, y)
}

/// True iff either handle of `v` is present, regardless of its type.
pub fn has_curve(v: &Vertex) -> bool {
    v.has_curve()
}

/// Index of the previous anchor, wrapping around on closed shapes.
pub fn previous_index(current: usize, len: usize, closed: bool) -> Option<usize> {
    if len < 2 || current >= len {
        None
    } else if current > 0 {
        Some(current - 1)
    } else if closed {
        Some(len - 1)
    } else {
        None
    }
}

/// Index of the next anchor, wrapping around on closed shapes.
pub fn next_index(current: usize, len: usize, closed: bool) -> Option<usize> {
    if len < 2 || current >= len {
        None
    } else if current + 1 < len {
        Some(current + 1)
    } else if closed {
        Some(0)
    } else {
        None
    }
}

fn neighbours(index: usize, vertices: &[Vertex], closed: bool) -> (Option<Point>, Option<Point>) {
    let len = vertices.len();
    (
        previous_index(index, len, closed).map(|i| vertices[i].position()),
        next_index(index, len, closed).map(|i| vertices[i].position()),
    )
}

/// Derives a corner vertex whose handles point straight at each neighbour,
/// each a quarter of the way there. Sides without a neighbour get no handle.
///
/// Returns `None` when `index` is out of range. The input is never mutated.
pub fn convert_to_corner(index: usize, vertices: &[Vertex], closed: bool) -> Option<Vertex> {
    let v = vertices.get(index)?;
    let anchor = v.position();
    let (prev, next) = neighbours(index, vertices, closed);

    Some(Vertex::corner(
        v.x,
        v.y,
        prev.map(|p| anchor.lerp(&p, HANDLE_RATIO)),
        next.map(|n| anchor.lerp(&n, HANDLE_RATIO)),
    ))
}

/// Clears both handles and marks the vertex straight, keeping its position.
pub fn convert_to_straight(index: usize, vertices: &[Vertex]) -> Option<Vertex> {
    vertices.get(index).map(|v| Vertex::new(v.x, v.y))
}

/// Derives a smooth vertex with collinear, mirrored handles.
///
/// The handle direction follows the chord from the previous to the next
/// neighbour; both handles share the mean quarter-distance to the
/// neighbours. An open endpoint only gets the handle towards its single
/// neighbour.
pub fn convert_to_smooth(index: usize, vertices: &[Vertex], closed: bool) -> Option<Vertex> {
    let v = vertices.get(index)?;
    let anchor = v.position();

    let (prev_handle, next_handle) = match neighbours(index, vertices, closed) {
        (Some(p), Some(n)) => {
            let (mut dx, mut dy) = (n.x - p.x, n.y - p.y);
            let mut len = (dx * dx + dy * dy).sqrt();
            if len < EPSILON {
                // Both neighbours coincide; aim along the outgoing side.
                dx = n.x - anchor.x;
                dy = n.y - anchor.y;
                len = (dx * dx + dy * dy).sqrt();
            }
            if len < EPSILON {
                (Some(anchor), Some(anchor))
            } else {
                let reach =
                    HANDLE_RATIO * (anchor.distance_to(&p) + anchor.distance_to(&n)) / 2.0;
                let (ux, uy) = (dx / len * reach, dy / len * reach);
                (
                    Some(Point::new(anchor.x - ux, anchor.y - uy)),
                    Some(Point::new(anchor.x + ux, anchor.y + uy)),
                )
            }
        }
        (Some(p), None) => (Some(anchor.lerp(&p, HANDLE_RATIO)), None),
        (None, Some(n)) => (None, Some(anchor.lerp(&n, HANDLE_RATIO))),
        (None, None) => (None, None),
    };

    Some(Vertex::smooth(v.x, v.y, prev_handle, next_handle))
}
