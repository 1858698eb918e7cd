//! Per-frame mode arbitration.
//!
//! The [`Arbitrator`] is the only writer of [`GestureSession`] and of the
//! [`Stage`].  Each tracking frame it, in order:
//!
//! 1. resets everything when no hand is visible;
//! 2. reads the global mode-switch gesture (left "1" + right finger count),
//!    unless an in-scene interaction was active on the previous frame;
//! 3. dispatches the frame to the handlers of the active scene.
//!
//! ```text
//!            new target              same target, < confirm
//!   Idle ───────────────▶ Pending ◀────────────────┐
//!    ▲  ◀── lost/changed ──┘  │ └──────────────────┘
//!    │                        │ confirmed: action fires
//!    └──── released ──── AwaitingRelease
//! ```

use hand_sign::classify::{count_extended_fingers, shown_number};
use hand_sign::{HandFrame, HandPair};
use scene_state::{GiftId, MediaId, SceneMode, Stage};
use tracing::{debug, info};

use crate::config::CoreConfig;
use crate::debounce::Debouncer;
use crate::handlers::free_look::{self, FreeLookState};
use crate::handlers::gifts;
use crate::handlers::media::{self, MediaAction};
use crate::handlers::particles::{self, ParticleState};
use crate::lock::InteractionLock;

// ════════════════════════════════════════════════════════════════════════════
// Mode-switch targets
// ════════════════════════════════════════════════════════════════════════════

/// What a confirmed mode-switch gesture asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchTarget {
    /// Select particle text `n` (right hand shows `n + 1`).
    Text(usize),
    /// Enter the free-look scene (right hand shows four, thumb tucked).
    FreeLook,
}

impl SwitchTarget {
    /// Right-hand finger count → target.  0 and 5 select nothing.
    pub fn from_count(count: u8) -> Option<SwitchTarget> {
        match count {
            1..=3 => Some(SwitchTarget::Text(count as usize - 1)),
            4     => Some(SwitchTarget::FreeLook),
            _     => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SwitchState {
    #[default]
    Idle,
    Pending(SwitchTarget),
    /// Fired; silent until the gesture changes or goes away.
    AwaitingRelease(SwitchTarget),
}

// ════════════════════════════════════════════════════════════════════════════
// Session + report
// ════════════════════════════════════════════════════════════════════════════

/// Transient gesture state carried from one frame to the next.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureSession {
    pub particles: ParticleState,
    pub free_look: FreeLookState,
    pub switch:    SwitchState,
    switch_hold:   Debouncer,
    gift_lock:     InteractionLock<GiftId>,
    media_lock:    InteractionLock<MediaId>,
}

impl GestureSession {
    fn new(cfg: &CoreConfig) -> Self {
        GestureSession {
            particles:   ParticleState::default(),
            free_look:   FreeLookState::default(),
            switch:      SwitchState::Idle,
            switch_hold: Debouncer::new(cfg.arbiter.confirm_ms),
            gift_lock:   InteractionLock::new(cfg.gifts.hold_ms),
            media_lock:  InteractionLock::new(cfg.media.hold_ms),
        }
    }

    /// Back to idle: no flags, no anchors, no pending switch, no locks.
    pub fn reset(&mut self) {
        self.particles = ParticleState::default();
        self.free_look = FreeLookState::default();
        self.switch = SwitchState::Idle;
        self.switch_hold.reset();
        self.gift_lock.clear();
        self.media_lock.clear();
    }

    /// Any in-scene manipulation is running.
    pub fn is_interacting(&self) -> bool {
        self.particles.is_active() || self.free_look.is_active()
    }

    pub fn gift_lock(&self) -> &InteractionLock<GiftId> {
        &self.gift_lock
    }

    pub fn media_lock(&self) -> &InteractionLock<MediaId> {
        &self.media_lock
    }
}

/// What happened during one frame.  Read by the tutorial and the renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub dragging:       bool,
    pub rotating:       bool,
    pub scaling:        bool,
    pub looking:        bool,
    pub strafing:       bool,
    pub dollying:       bool,
    /// A mode-switch target is being held but has not confirmed yet.
    pub switch_pending: bool,
    pub switch_fired:   Option<SwitchTarget>,
    pub text_selected:  Option<usize>,
    pub scene_entered:  Option<SceneMode>,
    pub gift_opened:    Option<GiftId>,
    pub media_opened:   Option<MediaId>,
    pub viewer_closed:  bool,
    /// Progress of the running gift/media long-press, 0..=1.
    pub hover_progress: f32,
}

impl FrameReport {
    /// A hand is driving drag, rotate or scale in any scene.
    pub fn is_interacting(&self) -> bool {
        self.dragging || self.rotating || self.scaling || self.looking || self.strafing || self.dollying
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Arbitrator
// ════════════════════════════════════════════════════════════════════════════

pub struct Arbitrator {
    config:     CoreConfig,
    text_count: usize,
    session:    GestureSession,
}

impl Arbitrator {
    /// `text_count` is the number of selectable particle texts.
    pub fn new(config: &CoreConfig, text_count: usize) -> Self {
        Arbitrator {
            config:  config.clone(),
            text_count,
            session: GestureSession::new(config),
        }
    }

    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Process one tracking frame.  `tutorial_complete` gates the
    /// mode-switch actions; the gesture is still tracked (and released)
    /// while onboarding runs.
    pub fn on_frame(&mut self, frame: &HandFrame, stage: &mut Stage, tutorial_complete: bool, now_ms: u64) -> FrameReport {
        let mut report = FrameReport::default();
        if frame.is_empty() {
            if self.session.is_interacting() || self.session.switch != SwitchState::Idle {
                debug!("hands lost, gesture state reset");
            }
            self.session.reset();
            return report;
        }
        let pair = frame.pair();

        self.mode_switch(&pair, stage, tutorial_complete, now_ms, &mut report);
        self.dispatch(&pair, stage, now_ms, &mut report);
        report
    }

    // ── mode switch ──────────────────────────────────────────────────────────

    fn read_switch(&self, pair: &HandPair<'_>, stage: &Stage) -> Option<SwitchTarget> {
        let cfg = &self.config.arbiter;
        let right = pair.right?;
        if shown_number(pair.left, cfg.activation_margin) != Some(1) {
            return None;
        }
        let target = SwitchTarget::from_count(count_extended_fingers(right, cfg.count_margin))?;
        // Re-selecting the text already on screen is not a switch.
        let same = matches!(target, SwitchTarget::Text(n)
            if stage.scenes.is_active(SceneMode::Particles) && stage.scenes.text_index() == n);
        (!same).then_some(target)
    }

    fn mode_switch(
        &mut self,
        pair:              &HandPair<'_>,
        stage:             &mut Stage,
        tutorial_complete: bool,
        now_ms:            u64,
        report:            &mut FrameReport,
    ) {
        let read = if self.session.is_interacting() { None } else { self.read_switch(pair, stage) };

        let pending = match (self.session.switch, read) {
            (_, None) => None,
            (SwitchState::AwaitingRelease(t), Some(r)) if t == r => return,
            (SwitchState::AwaitingRelease(_), Some(_)) => None,
            (SwitchState::Pending(t), Some(r)) if t == r => Some(t),
            (_, Some(r)) => {
                self.session.switch_hold.reset();
                Some(r)
            }
        };
        let Some(target) = pending else {
            self.session.switch = SwitchState::Idle;
            self.session.switch_hold.reset();
            return;
        };

        if !self.session.switch_hold.update(true, now_ms) {
            self.session.switch = SwitchState::Pending(target);
            report.switch_pending = true;
            return;
        }

        self.session.switch = SwitchState::AwaitingRelease(target);
        self.session.switch_hold.reset();
        if !tutorial_complete {
            debug!(?target, "mode switch held during onboarding, ignored");
            return;
        }
        info!(?target, "mode switch fired");
        report.switch_fired = Some(target);
        match target {
            SwitchTarget::Text(n) => {
                if stage.scenes.is_active(SceneMode::Particles) && n < self.text_count {
                    stage.scenes.select_text(n);
                    report.text_selected = Some(n);
                }
            }
            SwitchTarget::FreeLook => {
                if stage.enter_scene(SceneMode::CherryBlossom) {
                    report.scene_entered = Some(SceneMode::CherryBlossom);
                }
            }
        }
    }

    // ── scene dispatch ───────────────────────────────────────────────────────

    fn dispatch(&mut self, pair: &HandPair<'_>, stage: &mut Stage, now_ms: u64, report: &mut FrameReport) {
        let mode = stage.scenes.active();
        let session = &mut self.session;
        let cfg = &self.config;

        if mode == SceneMode::Particles {
            let step = particles::step(pair, &session.particles, &stage.model, &cfg.arbiter);
            session.particles = step.state;
            session.free_look = FreeLookState::default();
            stage.model = step.model;
            report.dragging = step.state.dragging;
            report.rotating = step.state.rotating;
            report.scaling = step.state.scaling;
            session.gift_lock.clear();
            session.media_lock.clear();
            return;
        }

        let step = free_look::step(pair, &session.free_look, &stage.camera, &cfg.arbiter);
        session.free_look = step.state;
        session.particles = ParticleState::default();
        stage.camera = step.camera;
        report.looking = step.state.looking;
        report.strafing = step.state.strafing;
        report.dollying = step.state.dollying;

        if mode == SceneMode::Christmas {
            let step = gifts::step(pair, &session.gift_lock, &stage.gifts, stage.camera.position, &cfg.gifts, &cfg.arbiter, now_ms);
            session.gift_lock = step.lock;
            if let Some(id) = step.open {
                if stage.gifts.open(id) {
                    report.gift_opened = Some(id);
                }
            }
            report.hover_progress = session.gift_lock.progress(now_ms);
        } else {
            session.gift_lock.clear();
        }

        if mode.has_media() {
            let shelf = if mode == SceneMode::PhotoTree { &stage.photo_shelf } else { &stage.tree_shelf };
            let step = media::step(pair, &session.media_lock, Some(shelf), stage.viewer.is_open(), &stage.camera, &cfg.media, now_ms);
            session.media_lock = step.lock;
            match step.action {
                Some(MediaAction::Open(id)) => {
                    if let Some(item) = shelf.get(id) {
                        info!(id, kind = item.entry.kind.label(), name = %item.entry.name, "media opened");
                        stage.viewer.open(item);
                        report.media_opened = Some(id);
                    }
                }
                Some(MediaAction::Close) => {
                    if stage.viewer.close() {
                        info!("viewer closed");
                        report.viewer_closed = true;
                    }
                }
                None => {}
            }
            report.hover_progress = session.media_lock.progress(now_ms);
        } else {
            session.media_lock.clear();
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use hand_sign::pose::{HandPose, PoseBuilder};
    use hand_sign::{Side, TrackedHand};
    use scene_state::MediaEntry;
    use std::path::Path;

    fn frame(left: Option<HandPose>, right: Option<HandPose>) -> HandFrame {
        let mut hands = Vec::new();
        if let Some(p) = left {
            hands.push(TrackedHand::physical(PoseBuilder::new(0.7, 0.6).build(p), Side::Left));
        }
        if let Some(p) = right {
            hands.push(TrackedHand::physical(PoseBuilder::new(0.3, 0.6).build(p), Side::Right));
        }
        HandFrame::new(hands).unwrap()
    }

    fn arbiter() -> Arbitrator {
        Arbitrator::new(&CoreConfig::default(), 3)
    }

    const ONE: Option<HandPose> = Some(HandPose::Number(1));

    #[test]
    fn left_one_right_four_enters_free_look_once() {
        let mut arb = arbiter();
        let mut stage = Stage::new();
        let f = frame(ONE, Some(HandPose::Number(4)));

        let r = arb.on_frame(&f, &mut stage, true, 0);
        assert!(r.switch_pending);
        assert_eq!(arb.session().switch, SwitchState::Pending(SwitchTarget::FreeLook));

        let r = arb.on_frame(&f, &mut stage, true, 60);
        assert_eq!(r.switch_fired, Some(SwitchTarget::FreeLook));
        assert_eq!(r.scene_entered, Some(SceneMode::CherryBlossom));
        assert_eq!(arb.session().switch, SwitchState::AwaitingRelease(SwitchTarget::FreeLook));

        for t in (100..2000).step_by(33) {
            let r = arb.on_frame(&f, &mut stage, true, t);
            assert_eq!(r.switch_fired, None);
        }
        assert_eq!(stage.scenes.active(), SceneMode::CherryBlossom);

        // hand pattern changes → release
        arb.on_frame(&frame(ONE, Some(HandPose::Number(5))), &mut stage, true, 2100);
        assert_eq!(arb.session().switch, SwitchState::Idle);
    }

    #[test]
    fn interrupted_read_restarts_the_hold() {
        let mut arb = arbiter();
        let mut stage = Stage::new();
        let two = frame(ONE, Some(HandPose::Number(2)));
        arb.on_frame(&two, &mut stage, true, 0);
        arb.on_frame(&frame(None, Some(HandPose::Number(2))), &mut stage, true, 40);
        let r = arb.on_frame(&two, &mut stage, true, 60);
        assert_eq!(r.switch_fired, None);
        let r = arb.on_frame(&two, &mut stage, true, 110);
        assert_eq!(r.switch_fired, Some(SwitchTarget::Text(1)));
        assert_eq!(r.text_selected, Some(1));
        assert_eq!(stage.scenes.text_index(), 1);
    }

    #[test]
    fn current_text_is_not_a_target() {
        let mut arb = arbiter();
        let mut stage = Stage::new();
        let one = frame(ONE, ONE);
        for t in (0..500).step_by(50) {
            let r = arb.on_frame(&one, &mut stage, true, t);
            assert_eq!(r.switch_fired, None);
        }
        assert_eq!(arb.session().switch, SwitchState::Idle);
    }

    #[test]
    fn text_switch_needs_particles_and_completed_tutorial() {
        let mut stage = Stage::new();
        let three = frame(ONE, Some(HandPose::Number(3)));

        let mut arb = arbiter();
        arb.on_frame(&three, &mut stage, false, 0);
        let r = arb.on_frame(&three, &mut stage, false, 100);
        assert_eq!(r.switch_fired, None);
        assert_eq!(r.text_selected, None);
        assert_eq!(stage.scenes.text_index(), 0);
        // latched anyway, so finishing onboarding mid-hold does not fire it
        assert_eq!(arb.session().switch, SwitchState::AwaitingRelease(SwitchTarget::Text(2)));
        let r = arb.on_frame(&three, &mut stage, true, 200);
        assert_eq!(r.switch_fired, None);

        let mut arb = arbiter();
        stage.enter_scene(SceneMode::Christmas);
        arb.on_frame(&three, &mut stage, true, 0);
        let r = arb.on_frame(&three, &mut stage, true, 100);
        assert_eq!(r.text_selected, None);
        assert_eq!(stage.scenes.active(), SceneMode::Christmas);
    }

    #[test]
    fn active_pinch_suppresses_switching() {
        let mut arb = arbiter();
        let mut stage = Stage::new();
        // left pinch starts a drag
        arb.on_frame(&frame(Some(HandPose::Pinch), None), &mut stage, true, 0);
        assert!(arb.session().is_interacting());
        let r = arb.on_frame(&frame(ONE, Some(HandPose::Number(4))), &mut stage, true, 10);
        assert!(!r.switch_pending);
        assert_eq!(arb.session().switch, SwitchState::Idle);
    }

    #[test]
    fn empty_frame_resets_everything() {
        let mut arb = arbiter();
        let mut stage = Stage::new();
        arb.on_frame(&frame(Some(HandPose::Pinch), None), &mut stage, true, 0);
        arb.on_frame(&frame(ONE, Some(HandPose::Number(2))), &mut stage, true, 10);
        arb.on_frame(&HandFrame::empty(), &mut stage, true, 20);
        assert!(!arb.session().is_interacting());
        assert_eq!(arb.session().switch, SwitchState::Idle);
    }

    #[test]
    fn exactly_one_scene_after_any_switch() {
        let mut arb = arbiter();
        let mut stage = Stage::new();
        for mode in SceneMode::ALL {
            stage.enter_scene(mode);
            let f = frame(ONE, Some(HandPose::Number(4)));
            arb.on_frame(&f, &mut stage, true, 0);
            arb.on_frame(&f, &mut stage, true, 100);
            arb.on_frame(&HandFrame::empty(), &mut stage, true, 200);
            let active = SceneMode::ALL.iter().filter(|m| stage.scenes.is_active(**m)).count();
            assert_eq!(active, 1);
            assert_eq!(stage.scenes.active(), SceneMode::CherryBlossom);
        }
    }

    #[test]
    fn christmas_fist_opens_gift_and_reports_progress() {
        let mut arb = arbiter();
        let mut stage = Stage::new();
        stage.enter_scene(SceneMode::Christmas);
        stage.gifts.spawn_at(&[stage.camera.position + Vec3::new(0.0, 0.0, -2.0)]);
        let f = frame(None, Some(HandPose::Fist));
        let r = arb.on_frame(&f, &mut stage, true, 0);
        assert_eq!(r.hover_progress, 0.0);
        let r = arb.on_frame(&f, &mut stage, true, 100);
        assert!((r.hover_progress - 0.5).abs() < 1e-6);
        let r = arb.on_frame(&f, &mut stage, true, 200);
        assert_eq!(r.gift_opened, Some(0));
        assert!(stage.gifts.can_access_secret_scene());
    }

    #[test]
    fn media_scene_opens_and_palm_closes() {
        let mut arb = arbiter();
        let mut stage = Stage::new();
        stage.photo_shelf = scene_state::MediaShelf::new(vec![(
            MediaEntry::new(Path::new("/photos"), "a.jpg").unwrap(),
            stage.camera.position + Vec3::new(0.0, 0.0, -5.0),
        )]);
        stage.enter_scene(SceneMode::PhotoTree);

        let fist = frame(None, Some(HandPose::Fist));
        arb.on_frame(&fist, &mut stage, true, 0);
        let r = arb.on_frame(&fist, &mut stage, true, 500);
        assert_eq!(r.media_opened, Some(0));
        assert!(stage.viewer.is_open());

        let r = arb.on_frame(&frame(None, Some(HandPose::OpenPalm)), &mut stage, true, 600);
        assert!(r.viewer_closed);
        assert!(!stage.viewer.is_open());
    }

    #[test]
    fn free_look_scene_does_not_drag_the_model() {
        let mut arb = arbiter();
        let mut stage = Stage::new();
        stage.enter_scene(SceneMode::CherryBlossom);
        let r = arb.on_frame(&frame(Some(HandPose::Pinch), None), &mut stage, true, 0);
        assert!(!r.dragging);
        assert_eq!(stage.model, scene_state::ModelTransform::default());
    }
}
