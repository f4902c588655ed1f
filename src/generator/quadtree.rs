//! Point quad-tree for rectangle range queries.

use crate::graph::Point;

/// Points stored per node before it splits.
const CAPACITY: usize = 4;

/// Depth past which nodes stop splitting and just grow.
const MAX_DEPTH: usize = 24;

/// Axis-aligned rectangle, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of half-side `r` centred on `(cx, cy)`.
    #[must_use]
    pub fn around(cx: f64, cy: f64, r: f64) -> Self {
        Self::new(cx - r, cy - r, 2.0 * r, 2.0 * r)
    }

    /// Closed containment test.
    #[must_use]
    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// True if the two rectangles touch or overlap.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        other.x <= self.x + self.width
            && other.x + other.width >= self.x
            && other.y <= self.y + self.height
            && other.y + other.height >= self.y
    }

    fn quadrants(&self) -> [Self; 4] {
        let w = self.width / 2.0;
        let h = self.height / 2.0;
        [
            Self::new(self.x, self.y, w, h),
            Self::new(self.x + w, self.y, w, h),
            Self::new(self.x, self.y + h, w, h),
            Self::new(self.x + w, self.y + h, w, h),
        ]
    }
}

/// Region quad-tree over points.
#[derive(Debug, Clone)]
pub struct QuadTree {
    boundary: Rect,
    depth: usize,
    points: Vec<Point>,
    children: Option<Box<[QuadTree; 4]>>,
}

impl QuadTree {
    /// Empty tree covering `boundary`.
    #[must_use]
    pub fn new(boundary: Rect) -> Self {
        Self::with_depth(boundary, 0)
    }

    fn with_depth(boundary: Rect, depth: usize) -> Self {
        Self {
            boundary,
            depth,
            points: Vec::with_capacity(CAPACITY),
            children: None,
        }
    }

    /// Insert a point. Returns `false` if it lies outside the boundary.
    pub fn insert(&mut self, p: Point) -> bool {
        if !self.boundary.contains(&p) {
            return false;
        }
        if self.points.len() < CAPACITY || self.depth >= MAX_DEPTH {
            self.points.push(p);
            return true;
        }
        let depth = self.depth + 1;
        let children = self.children.get_or_insert_with(|| {
            Box::new(
                self.boundary
                    .quadrants()
                    .map(|quadrant| Self::with_depth(quadrant, depth)),
            )
        });
        children.iter_mut().any(|child| child.insert(p))
    }

    /// All stored points inside `range`.
    #[must_use]
    pub fn query(&self, range: &Rect) -> Vec<Point> {
        let mut found = Vec::new();
        self.query_into(range, &mut found);
        found
    }

    fn query_into(&self, range: &Rect, found: &mut Vec<Point>) {
        if !self.boundary.intersects(range) {
            return;
        }
        found.extend(self.points.iter().filter(|p| range.contains(p)));
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.query_into(range, found);
            }
        }
    }

    /// Number of stored points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
            + self
                .children
                .as_ref()
                .map_or(0, |c| c.iter().map(Self::len).sum())
    }

    /// True if nothing has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
