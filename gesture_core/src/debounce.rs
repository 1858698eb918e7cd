//! Hold-to-confirm debouncing.
//!
//! A [`Debouncer`] turns a per-frame boolean into a single confirmed event:
//! the condition must hold continuously for `min_ms` before it fires, any
//! frame where it does not hold discards all accumulated time, and after
//! firing it stays latched (silent) until the condition drops.

use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Debouncer {
    min_ms:     u64,
    started_at: Option<u64>,
    fired:      bool,
}

impl Debouncer {
    pub fn new(min_ms: u64) -> Self {
        Debouncer { min_ms, started_at: None, fired: false }
    }

    /// Feed one frame.  Returns `true` on exactly the frame the hold
    /// reaches `min_ms`.
    pub fn update(&mut self, holds: bool, now_ms: u64) -> bool {
        if !holds {
            self.reset();
            return false;
        }
        let started = match self.started_at {
            Some(t) => t,
            None => {
                debug!(min_ms = self.min_ms, "hold started");
                self.started_at = Some(now_ms);
                now_ms
            }
        };
        if !self.fired && now_ms.saturating_sub(started) >= self.min_ms {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.started_at = None;
        self.fired = false;
    }

    pub fn is_holding(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    pub fn started_at(&self) -> Option<u64> {
        self.started_at
    }

    /// Hold progress in 0..=1 (for the renderer's progress ring).
    pub fn progress(&self, now_ms: u64) -> f32 {
        match self.started_at {
            None => 0.0,
            Some(_) if self.fired || self.min_ms == 0 => 1.0,
            Some(t) => (now_ms.saturating_sub(t) as f32 / self.min_ms as f32).min(1.0),
        }
    }
}
