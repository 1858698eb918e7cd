//! Free-look navigation, shared by every 3-D scene.
//!
//! Uses the coarse pinch threshold throughout.  The three controls are
//! independent and may all apply in one frame:
//!
//! * left three-finger pinch drag → yaw / pitch
//! * right three-finger pinch drag → strafe along camera-right and world-up
//! * both hands two-finger pinching → dolly along the view direction by the
//!   change in hand separation

use glam::Vec3;
use hand_sign::classify::{is_pinch, pinch_kind};
use hand_sign::landmark::index;
use hand_sign::{Finger, HandLandmarks, HandPair, PinchKind};
use scene_state::FreeLookCamera;

use crate::config::ArbiterConfig;

pub const LOOK_SENSITIVITY: f32 = 0.15;
pub const STRAFE_SPEED:     f32 = 2.0;
pub const DOLLY_SPEED:      f32 = 5.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FreeLookState {
    pub looking:    bool,
    pub strafing:   bool,
    pub dollying:   bool,
    look_anchor:    Option<Vec3>,
    strafe_anchor:  Option<Vec3>,
    dolly_distance: Option<f32>,
}

impl FreeLookState {
    pub fn is_active(&self) -> bool {
        self.looking || self.strafing || self.dollying
    }
}

pub struct FreeLookStep {
    pub state:  FreeLookState,
    pub camera: FreeLookCamera,
}

fn three_finger(hand: Option<&HandLandmarks>, cfg: &ArbiterConfig) -> Option<Vec3> {
    let hand = hand?;
    (pinch_kind(hand, cfg.coarse_pinch) == Some(PinchKind::ThreeFinger))
        .then(|| cfg.space.position(hand.point(index::INDEX_TIP)))
}

pub fn step(pair: &HandPair<'_>, prev: &FreeLookState, camera: &FreeLookCamera, cfg: &ArbiterConfig) -> FreeLookStep {
    let mut state = FreeLookState::default();
    let mut camera = *camera;

    // ── dolly ──
    if let Some((left, right)) = pair.both() {
        if is_pinch(left, Finger::Index, cfg.coarse_pinch) && is_pinch(right, Finger::Index, cfg.coarse_pinch) {
            let distance = cfg.space.position(left.point(index::INDEX_TIP))
                .distance(cfg.space.position(right.point(index::INDEX_TIP)));
            if let Some(before) = prev.dolly_distance {
                camera.translate(camera.forward() * (distance - before) * DOLLY_SPEED);
            }
            state.dollying = true;
            state.dolly_distance = Some(distance);
        }
    }

    // ── look ──
    if let Some(here) = three_finger(pair.left, cfg) {
        if let Some(anchor) = prev.look_anchor {
            let d = here - anchor;
            camera.look(d.x * LOOK_SENSITIVITY, -d.y * LOOK_SENSITIVITY);
        }
        state.looking = true;
        state.look_anchor = Some(here);
    }

    // ── strafe ──
    if let Some(here) = three_finger(pair.right, cfg) {
        if let Some(anchor) = prev.strafe_anchor {
            let d = here - anchor;
            camera.translate(camera.right() * (-d.x * STRAFE_SPEED) + Vec3::Y * (d.y * STRAFE_SPEED));
        }
        state.strafing = true;
        state.strafe_anchor = Some(here);
    }

    FreeLookStep { state, camera }
}
