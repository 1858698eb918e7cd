//! Particle-text manipulation: drag, rotate, two-hand scale.
//!
//! The left hand drives drag (thumb + index) and rotate (thumb + index +
//! middle); the two are exclusive, rotate winning.  Scale needs a fine
//! pinch on both hands and is relative to the pinch distance at onset.

use glam::Vec3;
use hand_sign::classify::is_pinch;
use hand_sign::landmark::index;
use hand_sign::{Finger, HandPair};
use scene_state::ModelTransform;

use crate::config::ArbiterConfig;

/// Radians of model rotation per interaction-space unit of hand travel.
pub const ROTATE_SENSITIVITY: f32 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq)]
struct ScaleStart {
    distance: f32,
    scale:    f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParticleState {
    pub dragging: bool,
    pub rotating: bool,
    pub scaling:  bool,
    /// Last index-tip position while dragging or rotating.
    anchor:       Option<Vec3>,
    scale_start:  Option<ScaleStart>,
}

impl ParticleState {
    pub fn is_active(&self) -> bool {
        self.dragging || self.rotating || self.scaling
    }
}

pub struct ParticleStep {
    pub state: ParticleState,
    pub model: ModelTransform,
}

pub fn step(pair: &HandPair<'_>, prev: &ParticleState, model: &ModelTransform, cfg: &ArbiterConfig) -> ParticleStep {
    let mut state = ParticleState::default();
    let mut model = *model;

    // ── drag / rotate ──
    if let Some(left) = pair.left {
        let index_pinch = is_pinch(left, Finger::Index, cfg.fine_pinch);
        let middle_pinch = is_pinch(left, Finger::Middle, cfg.fine_pinch);
        let here = cfg.space.position(left.point(index::INDEX_TIP));

        if index_pinch && middle_pinch {
            state.rotating = true;
            if let Some(anchor) = prev.anchor {
                let d = here - anchor;
                model.rotation.y += d.x * ROTATE_SENSITIVITY;
                model.rotation.x -= d.y * ROTATE_SENSITIVITY;
            }
            state.anchor = Some(here);
        } else if index_pinch {
            state.dragging = true;
            if let (true, Some(anchor)) = (prev.dragging, prev.anchor) {
                let d = here - anchor;
                model.position.x += d.x;
                model.position.y += d.y;
            }
            state.anchor = Some(here);
        }
    }

    // ── scale ──
    if let Some((left, right)) = pair.both() {
        if is_pinch(left, Finger::Index, cfg.fine_pinch) && is_pinch(right, Finger::Index, cfg.fine_pinch) {
            let distance = cfg.space.position(left.point(index::INDEX_TIP))
                .distance(cfg.space.position(right.point(index::INDEX_TIP)));
            state.scaling = true;
            state.scale_start = match prev.scale_start.filter(|_| prev.scaling) {
                Some(start) => {
                    if start.distance > f32::EPSILON {
                        model.scale = start.scale * distance / start.distance;
                    }
                    Some(start)
                }
                None => Some(ScaleStart { distance, scale: model.scale }),
            };
        }
    }

    ParticleStep { state, model }
}
