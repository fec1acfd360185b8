//! Line segment geometry for the tilted paddle
//!
//! A tilted paddle is a segment of fixed length centred on the paddle
//! position; collisions treat it as a capsule (segment + radius).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A line segment between two endpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    /// Segment of `length` centred at `center`, rotated by `angle` radians
    pub fn centered(center: Vec2, length: f32, angle: f32) -> Self {
        let half = Vec2::new(angle.cos(), angle.sin()) * (length / 2.0);
        Self {
            a: center - half,
            b: center + half,
        }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.b - self.a).length()
    }

    /// Closest point on the segment to `p`, with the projection parameter
    /// clamped to [0, 1]. A zero-length segment returns `a`.
    pub fn closest_point(&self, p: Vec2) -> (Vec2, f32) {
        let ab = self.b - self.a;
        let denom = ab.length_squared();
        if denom == 0.0 {
            return (self.a, 0.0);
        }
        let t = ((p - self.a).dot(ab) / denom).clamp(0.0, 1.0);
        (self.a + ab * t, t)
    }

    #[inline]
    pub fn distance_to(&self, p: Vec2) -> f32 {
        (p - self.closest_point(p).0).length()
    }
}
