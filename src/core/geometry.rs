//! Geometric primitives.
//!
//! Coordinates are signed: a resolved child origin may legally sit left of or
//! above its parent and gets clipped during compositing.

use std::ops::{Add, Neg, Sub};

/// A signed 2-D vector used for sizes, offsets and cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0, y: 0 };
    pub const ONE: Vec2 = Vec2 { x: 1, y: 1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise maximum against `min` on both axes.
    pub fn max_each(self, min: i32) -> Self {
        Self::new(self.x.max(min), self.y.max(min))
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl From<(i32, i32)> for Vec2 {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// An axis-aligned rectangle; `origin` inclusive, `origin + size` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    pub const fn from_size(size: Vec2) -> Self {
        Self::new(Vec2::ZERO, size)
    }

    pub fn right(&self) -> i32 {
        self.origin.x + self.size.x
    }

    pub fn bottom(&self) -> i32 {
        self.origin.y + self.size.y
    }

    pub fn is_empty(&self) -> bool {
        self.size.x <= 0 || self.size.y <= 0
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.origin.x
            && point.x < self.right()
            && point.y >= self.origin.y
            && point.y < self.bottom()
    }

    /// Overlapping region, empty (zero size) when the rectangles are disjoint.
    pub fn intersection(&self, other: &Rect) -> Rect {
        let left = self.origin.x.max(other.origin.x);
        let top = self.origin.y.max(other.origin.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return Rect::new(Vec2::new(left, top), Vec2::ZERO);
        }
        Rect::new(Vec2::new(left, top), Vec2::new(right - left, bottom - top))
    }
}
