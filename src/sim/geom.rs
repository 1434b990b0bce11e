//! Axis-aligned geometry for zones, bases and actor footprints
//!
//! The two primitives the game logic needs are "do these two rectangles
//! overlap" and "how far apart are these two points".

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (y grows downward, screen space)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle of the given size centered on `center`
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// True if the rectangle has no area
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y
    }

    /// Strict overlap test (shared edges do not count)
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Point containment, edges inclusive
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// True if `other` lies entirely inside this rectangle
    pub fn contains(&self, other: &Aabb) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Shrink by `dx` on the left/right and `dy` on the top/bottom.
    /// The result may be empty.
    pub fn inset(&self, dx: f32, dy: f32) -> Self {
        Self {
            min: self.min + Vec2::new(dx, dy),
            max: self.max - Vec2::new(dx, dy),
        }
    }

    /// Clamp a point into the rectangle
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max.max(self.min))
    }

    /// Uniformly random point inside the rectangle.
    /// A collapsed axis yields its midpoint.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            random_between(rng, self.min.x, self.max.x),
            random_between(rng, self.min.y, self.max.y),
        )
    }
}

fn random_between<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.random_range(lo..hi)
    } else {
        (lo + hi) * 0.5
    }
}

/// Distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}
