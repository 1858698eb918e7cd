//! Collectible gifts and the progress/unlock tracker.
//!
//! The registry owns both counters.  `opened` only moves through
//! [`GiftRegistry::open`], which refuses already-opened gifts, so
//! `opened <= spawned` holds by construction.

use glam::Vec3;
use tracing::info;

/// Distance from the tree trunk at which gifts are placed.
pub const RING_RADIUS: f32 = 2.0;

pub type GiftId = usize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gift {
    pub id:       GiftId,
    pub position: Vec3,
    opened:       bool,
}

impl Gift {
    pub fn is_opened(&self) -> bool {
        self.opened
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GiftRegistry {
    gifts:  Vec<Gift>,
    opened: usize,
}

impl GiftRegistry {
    pub fn new() -> Self {
        GiftRegistry::default()
    }

    /// Replace all gifts with `count` new ones spaced evenly on a ring around
    /// `center` (on the ground plane).  Progress starts over.
    pub fn spawn_ring(&mut self, center: Vec3, count: usize) {
        self.gifts = (0..count)
            .map(|i| {
                let angle = i as f32 / count as f32 * std::f32::consts::TAU;
                Gift {
                    id:       i,
                    position: Vec3::new(
                        center.x + angle.cos() * RING_RADIUS,
                        0.0,
                        center.z + angle.sin() * RING_RADIUS,
                    ),
                    opened:   false,
                }
            })
            .collect();
        self.opened = 0;
        info!(count, "gifts spawned");
    }

    /// Place gifts at explicit positions.  Progress starts over.
    pub fn spawn_at(&mut self, positions: &[Vec3]) {
        self.gifts = positions
            .iter()
            .enumerate()
            .map(|(id, &position)| Gift { id, position, opened: false })
            .collect();
        self.opened = 0;
    }

    pub fn gifts(&self) -> &[Gift] {
        &self.gifts
    }

    pub fn spawned(&self) -> usize {
        self.gifts.len()
    }

    pub fn opened(&self) -> usize {
        self.opened
    }

    /// The closest unopened gift strictly within `radius` of `from`.
    /// Opened gifts are never candidates.
    pub fn nearest_unopened(&self, from: Vec3, radius: f32) -> Option<GiftId> {
        self.gifts
            .iter()
            .filter(|g| !g.opened)
            .map(|g| (g.id, g.position.distance(from)))
            .filter(|&(_, d)| d < radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Open a gift.  Returns `false` (and changes nothing) for an unknown
    /// or already-opened gift.
    pub fn open(&mut self, id: GiftId) -> bool {
        let Some(gift) = self.gifts.get_mut(id) else { return false };
        if gift.opened {
            return false;
        }
        gift.opened = true;
        self.opened += 1;
        info!(opened = self.opened, spawned = self.gifts.len(), "gift opened");
        if self.can_access_secret_scene() {
            info!("all gifts found; secret scenes unlocked");
        }
        true
    }

    /// At least one gift was spawned and every one of them is open.
    pub fn can_access_secret_scene(&self) -> bool {
        !self.gifts.is_empty() && self.opened == self.gifts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry_is_locked() {
        let reg = GiftRegistry::new();
        assert_eq!(reg.spawned(), 0);
        assert!(!reg.can_access_secret_scene());
    }

    #[test]
    fn unlock_requires_every_gift() {
        let mut reg = GiftRegistry::new();
        reg.spawn_ring(Vec3::ZERO, 3);
        for id in 0..3 {
            assert!(!reg.can_access_secret_scene());
            assert!(reg.open(id));
            assert!(reg.opened() <= reg.spawned());
        }
        assert!(reg.can_access_secret_scene());
    }

    #[test]
    fn open_is_idempotent() {
        let mut reg = GiftRegistry::new();
        reg.spawn_ring(Vec3::ZERO, 2);
        assert!(reg.open(1));
        assert!(!reg.open(1));
        assert!(!reg.open(7));
        assert_eq!(reg.opened(), 1);
    }

    #[test]
    fn nearest_skips_opened_and_far_gifts() {
        let mut reg = GiftRegistry::new();
        reg.spawn_at(&[Vec3::new(1.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0), Vec3::new(50.0, 0.0, 0.0)]);
        assert_eq!(reg.nearest_unopened(Vec3::ZERO, 8.0), Some(0));
        reg.open(0);
        assert_eq!(reg.nearest_unopened(Vec3::ZERO, 8.0), Some(1));
        reg.open(1);
        assert_eq!(reg.nearest_unopened(Vec3::ZERO, 8.0), None);
    }

    #[test]
    fn respawn_resets_progress() {
        let mut reg = GiftRegistry::new();
        reg.spawn_ring(Vec3::ZERO, 1);
        reg.open(0);
        assert!(reg.can_access_secret_scene());
        reg.spawn_ring(Vec3::new(0.0, 0.0, -10.0), 4);
        assert_eq!(reg.opened(), 0);
        assert_eq!(reg.spawned(), 4);
        assert!(!reg.can_access_secret_scene());
    }

    #[test]
    fn ring_surrounds_center() {
        let mut reg = GiftRegistry::new();
        let center = Vec3::new(5.0, 0.0, -5.0);
        reg.spawn_ring(center, 4);
        for g in reg.gifts() {
            assert!((g.position.distance(center) - RING_RADIUS).abs() < 1e-4);
        }
    }
}
