//! Landmark geometry: distance and interaction-space mapping.

use glam::Vec3;
use serde::Deserialize;

use crate::landmark::Landmark;

/// Euclidean distance between two landmarks in normalized units.
pub fn distance(a: &Landmark, b: &Landmark) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Maps normalized landmark coordinates onto the plane the particle text
/// lives in.  Depth is discarded: a single camera gives no usable z for
/// dragging.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionSpace {
    /// World units spanned by the full image width.
    pub range:  f32,
    /// Viewport height / width.
    pub aspect: f32,
}

impl Default for InteractionSpace {
    fn default() -> Self {
        InteractionSpace { range: 25.0, aspect: 9.0 / 16.0 }
    }
}

impl InteractionSpace {
    pub fn new(range: f32, aspect: f32) -> Self {
        InteractionSpace { range, aspect }
    }

    /// x: 0..1 → -range/2..range/2, y flipped so up is positive.
    pub fn position(&self, lm: &Landmark) -> Vec3 {
        Vec3::new(
            (lm.x - 0.5) * self.range,
            -(lm.y - 0.5) * self.range * self.aspect,
            0.0,
        )
    }
}
