//! Long-press target lock for gifts and media.
//!
//! The hovered candidate is recomputed every frame, but the target a hold
//! will act on is captured once, when the gesture begins, and kept until the
//! hold completes or the gesture is released.  Drifting toward a different
//! candidate mid-hold therefore never changes what gets opened.

use tracing::debug;

use crate::debounce::Debouncer;

#[derive(Clone, Debug, PartialEq)]
pub struct InteractionLock<T> {
    hovered: Option<T>,
    locked:  Option<T>,
    hold:    Debouncer,
}

impl<T: Copy + PartialEq + std::fmt::Debug> InteractionLock<T> {
    pub fn new(hold_ms: u64) -> Self {
        InteractionLock { hovered: None, locked: None, hold: Debouncer::new(hold_ms) }
    }

    pub fn hovered(&self) -> Option<T> {
        self.hovered
    }

    pub fn locked(&self) -> Option<T> {
        self.locked
    }

    /// A hold is running on a locked target.
    pub fn is_holding(&self) -> bool {
        self.locked.is_some() && self.hold.is_holding()
    }

    pub fn progress(&self, now_ms: u64) -> f32 {
        if self.locked.is_some() { self.hold.progress(now_ms) } else { 0.0 }
    }

    /// Drop any hold and lock; the hover is kept.
    pub fn release(&mut self) {
        self.locked = None;
        self.hold.reset();
    }

    pub fn clear(&mut self) {
        self.hovered = None;
        self.release();
    }

    /// Feed one frame.  Returns the locked target on the frame its hold
    /// completes.  After completion the lock stays spent until the gesture
    /// is released, so a held gesture never fires twice.
    pub fn update(&mut self, hovered: Option<T>, gesture: bool, now_ms: u64) -> Option<T> {
        self.hovered = hovered;
        if !gesture {
            self.release();
            return None;
        }
        if self.hold.has_fired() {
            return None;
        }
        let target = match self.locked {
            Some(t) => t,
            None => {
                // A gesture with nothing hovered waits for a candidate.
                let t = hovered?;
                debug!(target = ?t, "target locked");
                self.locked = Some(t);
                t
            }
        };
        if self.hold.update(true, now_ms) {
            self.locked = None;
            return Some(target);
        }
        None
    }

    /// [`update`](Self::update) by value: the next lock state plus the
    /// completed target, if any.
    pub fn advance(mut self, hovered: Option<T>, gesture: bool, now_ms: u64) -> (Self, Option<T>) {
        let done = self.update(hovered, gesture, now_ms);
        (self, done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_survives_hover_change() {
        let mut lock = InteractionLock::new(500);
        assert_eq!(lock.update(Some('A'), true, 0), None);
        assert_eq!(lock.locked(), Some('A'));
        assert_eq!(lock.update(Some('B'), true, 300), None);
        assert_eq!(lock.hovered(), Some('B'));
        assert_eq!(lock.update(Some('B'), true, 500), Some('A'));
    }

    #[test]
    fn lock_survives_hover_loss() {
        let mut lock = InteractionLock::new(100);
        lock.update(Some(1u32), true, 0);
        assert_eq!(lock.update(None, true, 100), Some(1));
    }

    #[test]
    fn early_release_discards_hold() {
        let mut lock = InteractionLock::new(200);
        lock.update(Some(7u32), true, 0);
        assert!(lock.is_holding());
        assert_eq!(lock.update(Some(7), false, 150), None);
        assert!(!lock.is_holding());
        assert_eq!(lock.locked(), None);
        assert_eq!(lock.update(Some(7), true, 160), None);
        assert_eq!(lock.update(Some(7), true, 300), None);
        assert_eq!(lock.update(Some(7), true, 360), Some(7));
    }

    #[test]
    fn gesture_without_candidate_waits() {
        let mut lock: InteractionLock<u32> = InteractionLock::new(100);
        assert_eq!(lock.update(None, true, 0), None);
        assert!(!lock.is_holding());
        lock.update(Some(3), true, 500);
        assert_eq!(lock.update(Some(3), true, 599), None);
        assert_eq!(lock.update(Some(3), true, 600), Some(3));
    }

    #[test]
    fn completed_hold_needs_release_to_rearm() {
        let mut lock = InteractionLock::new(10);
        lock.update(Some(1u8), true, 0);
        assert_eq!(lock.update(Some(1), true, 10), Some(1));
        assert_eq!(lock.update(Some(2), true, 50), None);
        assert_eq!(lock.update(Some(2), true, 500), None);
        let (lock, done) = lock.advance(Some(2), false, 501);
        assert_eq!(done, None);
        let (lock, _) = lock.advance(Some(2), true, 502);
        let (_, done) = lock.advance(Some(2), true, 512);
        assert_eq!(done, Some(2));
    }
}
