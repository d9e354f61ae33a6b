//! Point-based shapes and the element collection that owns them.
//!
//! Every drawable shape (line, rectangle, polygon, ellipse, free-form curve)
//! is a [`PointElement`]: an ordered vertex sequence plus a closed flag.
//! Shape-specific behaviour lives in free functions keyed on vertex count
//! and closedness rather than in per-kind types.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::bounds::{calculate_bounds_with, union_bounds, BoundingBox, BoundsOptions};
use crate::path_codec::{generate_path_data, parse_path};
use crate::vertex::{convert_to_corner, convert_to_smooth, convert_to_straight, Point, Vertex, VertexType};

/// Bezier circle approximation constant, `4/3 * (sqrt(2) - 1)`.
pub const KAPPA: f64 = 0.552_284_749_8;

/// A shape made of vertices.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PointElement {
    pub vertices: Vec<Vertex>,
    /// Last vertex connects back to the first.
    pub closed: bool,
}

impl PointElement {
    pub fn new(vertices: Vec<Vertex>, closed: bool) -> Self {
        Self { vertices, closed }
    }

    pub fn line(start: Point, end: Point) -> Self {
        Self::new(
            vec![Vertex::new(start.x, start.y), Vertex::new(end.x, end.y)],
            false,
        )
    }

    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            vec![
                Vertex::new(x, y),
                Vertex::new(x + width, y),
                Vertex::new(x + width, y + height),
                Vertex::new(x, y + height),
            ],
            true,
        )
    }

    pub fn polygon(points: &[Point]) -> Self {
        Self::new(points.iter().map(|p| Vertex::new(p.x, p.y)).collect(), true)
    }

    pub fn polyline(points: &[Point]) -> Self {
        Self::new(points.iter().map(|p| Vertex::new(p.x, p.y)).collect(), false)
    }

    /// Four smooth vertices (top, right, bottom, left) with quarter-arc handles.
    pub fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        let kx = KAPPA * rx;
        let ky = KAPPA * ry;
        Self::new(
            vec![
                Vertex::smooth(
                    cx,
                    cy - ry,
                    Some(Point::new(cx - kx, cy - ry)),
                    Some(Point::new(cx + kx, cy - ry)),
                ),
                Vertex::smooth(
                    cx + rx,
                    cy,
                    Some(Point::new(cx + rx, cy - ky)),
                    Some(Point::new(cx + rx, cy + ky)),
                ),
                Vertex::smooth(
                    cx,
                    cy + ry,
                    Some(Point::new(cx + kx, cy + ry)),
                    Some(Point::new(cx - kx, cy + ry)),
                ),
                Vertex::smooth(
                    cx - rx,
                    cy,
                    Some(Point::new(cx - rx, cy + ky)),
                    Some(Point::new(cx - rx, cy - ky)),
                ),
            ],
            true,
        )
    }

    pub fn circle(cx: f64, cy: f64, r: f64) -> Self {
        Self::ellipse(cx, cy, r, r)
    }

    /// Parses SVG path data. Returns `None` for fewer than two vertices.
    pub fn from_path_data(d: &str) -> Option<Self> {
        let parsed = parse_path(d);
        (parsed.vertices.len() >= 2).then(|| Self::new(parsed.vertices, parsed.closed))
    }

    pub fn to_path_data(&self) -> String {
        generate_path_data(&self.vertices, self.closed)
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds_with(&BoundsOptions::default())
    }

    pub fn bounds_with(&self, options: &BoundsOptions) -> BoundingBox {
        calculate_bounds_with(&self.vertices, self.closed, options)
    }

    /// At least two vertices.
    pub fn is_usable(&self) -> bool {
        self.vertices.len() >= 2
    }

    /// Converts the vertex at `index` in place. Returns false when out of range.
    pub fn set_vertex_type(&mut self, index: usize, vertex_type: VertexType) -> bool {
        let converted = match vertex_type {
            VertexType::Straight => convert_to_straight(index, &self.vertices),
            VertexType::Corner => convert_to_corner(index, &self.vertices, self.closed),
            VertexType::Smooth => convert_to_smooth(index, &self.vertices, self.closed),
        };
        match converted {
            Some(v) => {
                self.vertices[index] = v;
                true
            }
            None => false,
        }
    }
}

/// Geometric reading of a [`PointElement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Empty,
    Point,
    Line,
    Polyline,
    Polygon,
    Ellipse,
    Curve,
}

pub fn shape_kind(element: &PointElement) -> ShapeKind {
    let vertices = &element.vertices;
    let any_curve = vertices.iter().any(Vertex::has_curve);
    match vertices.len() {
        0 => ShapeKind::Empty,
        1 => ShapeKind::Point,
        2 if !any_curve => ShapeKind::Line,
        4 if element.closed && vertices.iter().all(|v| v.prev_handle().is_some() && v.next_handle().is_some()) => {
            ShapeKind::Ellipse
        }
        _ if any_curve => ShapeKind::Curve,
        _ if element.closed => ShapeKind::Polygon,
        _ => ShapeKind::Polyline,
    }
}

pub type ElementId = u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementKind {
    Shape(PointElement),
    /// Container of other elements, by id.
    Group(Vec<ElementId>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentElement {
    pub id: ElementId,
    pub name: String,
    pub visible: bool,
    pub kind: ElementKind,
}

/// Authoritative collection of shapes and groups in draw order.
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    elements: Vec<DocumentElement>,
    next_id: ElementId,
}

impl ElementStore {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> ElementId {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    pub fn add_shape(&mut self, name: impl Into<String>, shape: PointElement) -> ElementId {
        let id = self.allocate_id();
        self.elements.push(DocumentElement {
            id,
            name: name.into(),
            visible: true,
            kind: ElementKind::Shape(shape),
        });
        id
    }

    pub fn add_group(&mut self, name: impl Into<String>, children: Vec<ElementId>) -> ElementId {
        let id = self.allocate_id();
        self.elements.push(DocumentElement {
            id,
            name: name.into(),
            visible: true,
            kind: ElementKind::Group(children),
        });
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&DocumentElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut DocumentElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn shape(&self, id: ElementId) -> Option<&PointElement> {
        match &self.get(id)?.kind {
            ElementKind::Shape(s) => Some(s),
            ElementKind::Group(_) => None,
        }
    }

    /// Replaces the vertices of a shape, e.g. with a transform result.
    pub fn set_vertices(&mut self, id: ElementId, vertices: Vec<Vertex>) -> bool {
        match self.get_mut(id).map(|e| &mut e.kind) {
            Some(ElementKind::Shape(s)) => {
                s.vertices = vertices;
                true
            }
            _ => false,
        }
    }

    pub fn set_visible(&mut self, id: ElementId, visible: bool) -> bool {
        match self.get_mut(id) {
            Some(e) => {
                e.visible = visible;
                true
            }
            None => false,
        }
    }

    /// Removes an element and drops it from any group that references it.
    pub fn remove(&mut self, id: ElementId) -> Option<DocumentElement> {
        let pos = self.elements.iter().position(|e| e.id == id)?;
        let removed = self.elements.remove(pos);
        for e in &mut self.elements {
            if let ElementKind::Group(children) = &mut e.kind {
                children.retain(|c| *c != id);
            }
        }
        Some(removed)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentElement> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Resolves ids to shape ids, flattening groups recursively and skipping
    /// invisible groups. Unknown ids are ignored; each shape appears once.
    pub fn flatten_shapes(&self, ids: &[ElementId]) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        for id in ids {
            self.collect_shapes(*id, &mut seen, &mut out);
        }
        out
    }

    fn collect_shapes(&self, id: ElementId, seen: &mut HashSet<ElementId>, out: &mut Vec<ElementId>) {
        if !seen.insert(id) {
            return;
        }
        let Some(element) = self.get(id) else {
            return;
        };
        match &element.kind {
            ElementKind::Shape(_) => out.push(id),
            ElementKind::Group(children) => {
                if !element.visible {
                    return;
                }
                for child in children {
                    self.collect_shapes(*child, seen, out);
                }
            }
        }
    }

    /// Union box of the selection, or `None` when it resolves to no shapes.
    pub fn selection_bounds(&self, ids: &[ElementId]) -> Option<BoundingBox> {
        self.selection_bounds_with(ids, &BoundsOptions::default())
    }

    pub fn selection_bounds_with(
        &self,
        ids: &[ElementId],
        options: &BoundsOptions,
    ) -> Option<BoundingBox> {
        let shapes = self.flatten_shapes(ids);
        union_bounds(
            shapes
                .iter()
                .filter_map(|id| self.shape(*id))
                .map(|s| s.bounds_with(options)),
        )
    }
}
