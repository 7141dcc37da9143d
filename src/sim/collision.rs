//! Collision detection for boxes, circles and the canvas edges
//!
//! Everything in both games is checked pairwise with simple axis-aligned
//! tests. Entity counts stay in the dozens, so there is no broad phase.

use glam::Vec2;

/// Axis-aligned bounding box in canvas coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box centered on `center` extending `half` in each direction
    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Square box of side `2 * half` around `center`
    pub fn square(center: Vec2, half: f32) -> Self {
        Self::from_center(center, Vec2::splat(half))
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// True if the point lies within `radius` of `center`
#[inline]
pub fn point_in_circle(p: Vec2, center: Vec2, radius: f32) -> bool {
    p.distance_squared(center) <= radius * radius
}

/// Clamp a box center so the whole box stays inside a `width` x `height` canvas
pub fn clamp_to_canvas(center: Vec2, half: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        center.x.clamp(half.x, (width - half.x).max(half.x)),
        center.y.clamp(half.y, (height - half.y).max(half.y)),
    )
}

/// True once a box has moved entirely past the canvas on any side
pub fn is_off_canvas(bounds: &Aabb, width: f32, height: f32) -> bool {
    bounds.max.x < 0.0 || bounds.min.x > width || bounds.max.y < 0.0 || bounds.min.y > height
}
