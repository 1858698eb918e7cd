//! Gift long-press in the Christmas forest.
//!
//! The nearest unopened gift within reach of the camera is the only
//! candidate.  A right-hand coarse pinch or a fist held for the hold time
//! opens the gift locked at onset.

use glam::Vec3;
use hand_sign::classify::{is_fist, is_pinch};
use hand_sign::{Finger, HandPair};
use scene_state::{GiftId, GiftRegistry};

use crate::config::{ArbiterConfig, GiftConfig};
use crate::lock::InteractionLock;

pub struct GiftStep {
    pub lock: InteractionLock<GiftId>,
    /// Gift whose hold completed this frame.
    pub open: Option<GiftId>,
}

pub fn grab(pair: &HandPair<'_>, arbiter: &ArbiterConfig) -> bool {
    is_pinch(pair.right, Finger::Index, arbiter.coarse_pinch) || is_fist(pair.right)
}

pub fn step(
    pair:    &HandPair<'_>,
    lock:    &InteractionLock<GiftId>,
    gifts:   &GiftRegistry,
    from:    Vec3,
    cfg:     &GiftConfig,
    arbiter: &ArbiterConfig,
    now_ms:  u64,
) -> GiftStep {
    let hovered = gifts.nearest_unopened(from, cfg.radius);
    let (lock, open) = lock.clone().advance(hovered, grab(pair, arbiter), now_ms);
    GiftStep { lock, open }
}
