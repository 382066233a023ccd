//! Axis-aligned rectangles
//!
//! Every entity is rectangle-bounded; all collision tests go through
//! [`overlaps`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Negative sizes are clamped to zero
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        overlaps(self, other)
    }
}

/// Open-interval AABB test: touching edges do not count
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Anything with a collision rectangle
pub trait Bounded {
    fn rect(&self) -> Rect;
}

/// Entities removed by the sweep pass between frames
pub trait Sweepable {
    fn is_marked(&self) -> bool;
}

/// Drop marked entities, preserving order. Returns how many were removed.
pub fn sweep<T: Sweepable>(items: &mut Vec<T>) -> usize {
    let before = items.len();
    items.retain(|item| !item.is_marked());
    before - items.len()
}
