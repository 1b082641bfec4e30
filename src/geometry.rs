//! Geometry primitives shared by every layout: Point, Rect, Size.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

// ─── Point ───────────────────────────────────────────────────────────────────

/// A location in scene (pixel) coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ─── Rect ─────────────────────────────────────────────────────────────────────

/// Preferred bounds of a node, relative to its location.
///
/// `x`/`y` are the offset of the node's visual origin and may be negative,
/// e.g. a widget whose anchor sits in its center.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Rect {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounds anchored at the top-left corner.
    pub fn sized(width: i64, height: i64) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn right(&self) -> i64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i64 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

// ─── Size ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width: i64,
    pub height: i64,
}

impl Size {
    /// Size of a vertex whose geometry is unknown (dummy vertices, unmeasured nodes).
    pub const ZERO: Size = Size {
        width: 0,
        height: 0,
    };

    pub fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_geometry.rs"]
mod tests;
