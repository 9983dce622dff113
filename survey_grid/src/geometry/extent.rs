//! Axis-aligned bounding boxes describing a viewport.

use super::Point;

/// Axis-aligned rectangle `[min_x, min_y, max_x, max_y]` in projected units.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Builds the smallest extent containing both corner points.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the four corners: bottom-left, top-right, top-left, bottom-right.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
            Point::new(self.max_x, self.min_y),
        ]
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// An extent is empty when it has a negative side or a non-finite bound.
    pub fn is_empty(&self) -> bool {
        !(self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite())
            || self.min_x > self.max_x
            || self.min_y > self.max_y
    }
}

impl From<[f64; 4]> for Extent {
    fn from(e: [f64; 4]) -> Self {
        Extent::new(e[0], e[1], e[2], e[3])
    }
}

impl From<geo_types::Rect<f64>> for Extent {
    fn from(r: geo_types::Rect<f64>) -> Self {
        Extent::new(r.min().x, r.min().y, r.max().x, r.max().y)
    }
}
