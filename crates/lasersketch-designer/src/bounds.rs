//! Axis-aligned bounding boxes over vertex sequences.
//!
//! Bounds are always derived from the current vertices, never stored. The
//! calculation runs in two passes: a coarse seed over anchors (and, by
//! default, control handles), then a curve-aware pass that samples every
//! cubic segment so curved extents are folded in.

use serde::{Deserialize, Serialize};

use crate::vertex::{Point, Vertex};

/// Lowest number of subdivisions used when sampling a cubic segment.
pub const MIN_CURVE_SAMPLES: usize = 20;

/// Axis-aligned box in the same units as vertex coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_min_max(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Returns `(min_x, min_y, max_x, max_y)`.
    pub fn as_min_max(&self) -> (f64, f64, f64, f64) {
        (self.min_x(), self.min_y(), self.max_x(), self.max_y())
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox::from_min_max(
            self.min_x().min(other.min_x()),
            self.min_y().min(other.min_y()),
            self.max_x().max(other.max_x()),
            self.max_y().max(other.max_y()),
        )
    }

    pub fn contains(&self, p: &Point, tolerance: f64) -> bool {
        p.x >= self.min_x() - tolerance
            && p.x <= self.max_x() + tolerance
            && p.y >= self.min_y() - tolerance
            && p.y <= self.max_y() + tolerance
    }

    /// True when the box is no larger than `width` x `height`.
    pub fn fits_within(&self, width: f64, height: f64) -> bool {
        self.width <= width && self.height <= height
    }
}

/// Tuning for [`calculate_bounds_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsOptions {
    /// Subdivisions per cubic segment; raised to [`MIN_CURVE_SAMPLES`] if lower.
    pub samples: usize,
    /// Seed the box with raw control-handle coordinates.
    pub include_handles: bool,
}

impl Default for BoundsOptions {
    fn default() -> Self {
        Self {
            samples: MIN_CURVE_SAMPLES,
            include_handles: true,
        }
    }
}

/// Evaluates a cubic Bezier at `t` using the Bernstein form.
pub fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

/// Index pairs of the segments of a shape. The closing segment is only
/// present for closed shapes with at least three vertices.
pub fn segment_indices(len: usize, closed: bool) -> impl Iterator<Item = (usize, usize)> {
    let open = (1..len).map(|i| (i - 1, i));
    let closing = (closed && len >= 3).then(|| (len - 1, 0));
    open.chain(closing)
}

/// Control points of the segment `from -> to`, or `None` for a straight one.
/// A missing side falls back to its own anchor.
pub fn segment_controls(from: &Vertex, to: &Vertex) -> Option<(Point, Point)> {
    let out = from.next_handle();
    let inc = to.prev_handle();
    if out.is_none() && inc.is_none() {
        return None;
    }
    Some((
        out.unwrap_or_else(|| from.position()),
        inc.unwrap_or_else(|| to.position()),
    ))
}

#[derive(Debug, Clone, Copy)]
struct Extents {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Extents {
    fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    fn fold(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    fn into_box(self) -> BoundingBox {
        BoundingBox::from_min_max(self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

/// `calculateBoundsFromPoints` with default options.
pub fn calculate_bounds_from_points(vertices: &[Vertex], closed: bool) -> BoundingBox {
    calculate_bounds_with(vertices, closed, &BoundsOptions::default())
}

pub fn calculate_bounds_with(
    vertices: &[Vertex],
    closed: bool,
    options: &BoundsOptions,
) -> BoundingBox {
    if vertices.is_empty() {
        return BoundingBox::default();
    }

    let mut ext = Extents::empty();
    for v in vertices {
        ext.fold(v.position());
        if options.include_handles {
            if let Some(h) = v.prev_handle() {
                ext.fold(h);
            }
            if let Some(h) = v.next_handle() {
                ext.fold(h);
            }
        }
    }

    let samples = options.samples.max(MIN_CURVE_SAMPLES);
    for (a, b) in segment_indices(vertices.len(), closed) {
        let (from, to) = (&vertices[a], &vertices[b]);
        let Some((c1, c2)) = segment_controls(from, to) else {
            continue;
        };
        let (p0, p3) = (from.position(), to.position());
        for i in 1..samples {
            let t = i as f64 / samples as f64;
            ext.fold(cubic_point(p0, c1, c2, p3, t));
        }
    }

    ext.into_box()
}

/// Componentwise union of several boxes; `None` when there are none.
pub fn union_bounds<I>(boxes: I) -> Option<BoundingBox>
where
    I: IntoIterator<Item = BoundingBox>,
{
    boxes.into_iter().reduce(|acc, b| acc.union(&b))
}
