//! The tracking-callback entry point.
//!
//! [`InteractionCore`] owns the tutorial, the arbitrator and the secret-phrase
//! listener, and applies their requests to the [`Stage`] and the
//! [`Presenter`].  Callers feed it three things: tracking frames, render
//! ticks and keypresses.

use hand_sign::HandFrame;
use scene_state::{PhraseOutcome, SecretPhraseListener, Stage};
use tracing::{debug, info};

use crate::arbitrator::{Arbitrator, FrameReport, GestureSession};
use crate::config::CoreConfig;
use crate::present::Presenter;
use crate::tutorial::{TutorialSequencer, TutorialSignal};

pub struct InteractionCore {
    texts:       Vec<String>,
    skip:        bool,
    recognition: bool,
    tutorial:    TutorialSequencer,
    arbitrator:  Arbitrator,
    secret:      SecretPhraseListener,
}

impl InteractionCore {
    /// `texts` are the particle texts selectable with the switch gesture.
    pub fn new(config: CoreConfig, texts: Vec<String>) -> Self {
        InteractionCore {
            skip:        config.tutorial.skip,
            recognition: false,
            tutorial:    TutorialSequencer::new(config.tutorial.clone()),
            arbitrator:  Arbitrator::new(&config, texts.len()),
            secret:      SecretPhraseListener::new(),
            texts,
        }
    }

    pub fn tutorial(&self) -> &TutorialSequencer {
        &self.tutorial
    }

    pub fn session(&self) -> &GestureSession {
        self.arbitrator.session()
    }

    /// Whether tracking frames are processed at all.
    pub fn recognition_enabled(&self) -> bool {
        self.recognition
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// Begin the session: run onboarding, or skip straight to the first text.
    /// Calling it again restarts onboarding with recognition off and no
    /// gesture state carried over.
    pub fn start(&mut self, now_ms: u64, stage: &mut Stage, presenter: &mut dyn Presenter) -> Vec<TutorialSignal> {
        self.recognition = false;
        self.arbitrator.reset();
        let signals = if self.skip {
            let mut s = self.tutorial.skip();
            s.push(TutorialSignal::SelectText(0));
            s
        } else {
            self.tutorial.start(now_ms, presenter)
        };
        self.apply(&signals, stage, presenter);
        signals
    }

    /// Drive timed tutorial beats and the secret-phrase idle timeout.
    pub fn tick(&mut self, now_ms: u64, stage: &mut Stage, presenter: &mut dyn Presenter) -> Vec<TutorialSignal> {
        self.secret.tick(now_ms);
        let signals = self.tutorial.tick(now_ms, presenter);
        self.apply(&signals, stage, presenter);
        signals
    }

    /// Process one tracking frame.  `None` while recognition is off.
    pub fn on_tracking(
        &mut self,
        frame:     &HandFrame,
        stage:     &mut Stage,
        presenter: &mut dyn Presenter,
        now_ms:    u64,
    ) -> Option<FrameReport> {
        if !self.recognition {
            return None;
        }

        let report = if self.tutorial.allows_scene_interaction() {
            self.arbitrator.on_frame(frame, stage, self.tutorial.is_complete(), now_ms)
        } else {
            self.arbitrator.reset();
            FrameReport::default()
        };
        if let Some(n) = report.text_selected {
            self.present_text(n, presenter);
        }

        let signals = self.tutorial.observe(&frame.pair(), frame.len(), &report, now_ms, presenter);
        self.apply(&signals, stage, presenter);
        Some(report)
    }

    /// Feed a keypress to the secret-phrase listener; accepted phrases
    /// toggle their scene.
    pub fn on_key(&mut self, key: char, now_ms: u64, stage: &mut Stage) -> Option<PhraseOutcome> {
        let outcome = self.secret.on_key(key, now_ms, stage.scenes.active(), &stage.gifts)?;
        if let PhraseOutcome::Toggle(mode) = outcome {
            stage.toggle_scene(mode);
            self.arbitrator.reset();
        }
        Some(outcome)
    }

    fn present_text(&self, n: usize, presenter: &mut dyn Presenter) {
        match self.texts.get(n) {
            Some(text) => presenter.set_particle_text(text),
            None => debug!(n, "no particle text at index"),
        }
    }

    fn apply(&mut self, signals: &[TutorialSignal], stage: &mut Stage, presenter: &mut dyn Presenter) {
        for signal in signals {
            match *signal {
                TutorialSignal::EnableRecognition => {
                    if !self.recognition {
                        info!("gesture recognition enabled");
                    }
                    self.recognition = true;
                }
                TutorialSignal::EnterScene(mode) => {
                    stage.enter_scene(mode);
                }
                TutorialSignal::SelectText(n) => {
                    stage.scenes.select_text(n);
                    self.present_text(n, presenter);
                }
                TutorialSignal::Completed => {
                    info!("interaction unlocked");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::RecordingPresenter;
    use crate::tutorial::{TutorialWait, PALMS_TEXT};
    use hand_sign::pose::{HandPose, PoseBuilder};
    use hand_sign::{Side, TrackedHand};
    use scene_state::SceneMode;

    fn texts() -> Vec<String> {
        vec!["Alpha".into(), "Beta".into(), "Gamma".into()]
    }

    fn skipped() -> CoreConfig {
        let mut cfg = CoreConfig::default();
        cfg.tutorial.skip = true;
        cfg
    }

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

    #[test]
    fn frames_ignored_until_recognition_enabled() {
        let mut core = InteractionCore::new(CoreConfig::default(), texts());
        let mut stage = Stage::new();
        let mut p = RecordingPresenter::default();
        core.start(0, &mut stage, &mut p);
        assert!(!core.recognition_enabled());
        assert_eq!(core.on_tracking(&frame(None, Some(HandPose::Fist)), &mut stage, &mut p, 10), None);

        core.tick(5000, &mut stage, &mut p);
        core.tick(7500, &mut stage, &mut p);
        assert!(core.recognition_enabled());
        assert_eq!(p.text, PALMS_TEXT);
        assert_eq!(core.tutorial().wait(), TutorialWait::Palms);
    }

    /// Drive onboarding with real frames up to the drag lesson.
    fn reach_drag_lesson(core: &mut InteractionCore, stage: &mut Stage, p: &mut RecordingPresenter) -> u64 {
        core.start(0, stage, p);
        core.tick(5000, stage, p);
        core.tick(7500, stage, p);
        let palms = frame(Some(HandPose::OpenPalm), Some(HandPose::OpenPalm));
        core.on_tracking(&palms, stage, p, 7600);
        core.on_tracking(&palms, stage, p, 8100);
        assert_eq!(core.tutorial().phase(), 3);
        core.tick(10_600, stage, p);
        core.on_tracking(&frame(None, Some(HandPose::Number(1))), stage, p, 10_700);
        assert_eq!(core.tutorial().phase(), 5);
        core.tick(14_700, stage, p);
        core.on_tracking(&frame(Some(HandPose::Number(1)), Some(HandPose::Number(1))), stage, p, 14_800);
        core.on_tracking(&frame(Some(HandPose::Number(2)), Some(HandPose::Number(1))), stage, p, 14_900);
        assert_eq!(core.tutorial().phase(), 8);
        core.tick(17_900, stage, p);
        assert_eq!(core.tutorial().wait(), TutorialWait::Drag);
        17_900
    }

    #[test]
    fn restart_turns_recognition_off_again() {
        let mut core = InteractionCore::new(CoreConfig::default(), texts());
        let mut stage = Stage::new();
        let mut p = RecordingPresenter::default();
        core.start(0, &mut stage, &mut p);
        core.tick(5000, &mut stage, &mut p);
        core.tick(7500, &mut stage, &mut p);
        assert!(core.recognition_enabled());
        core.on_tracking(&frame(Some(HandPose::Number(1)), Some(HandPose::Number(4))), &mut stage, &mut p, 7600);

        let signals = core.start(8000, &mut stage, &mut p);
        assert!(signals.is_empty());
        assert!(!core.recognition_enabled());
        assert_eq!(core.tutorial().phase(), 0);
        assert_eq!(core.tutorial().wait(), TutorialWait::None);
        assert_eq!(core.session().switch, crate::arbitrator::SwitchState::Idle);
        assert_eq!(core.on_tracking(&frame(None, Some(HandPose::Number(1))), &mut stage, &mut p, 8100), None);
        assert_eq!(core.tutorial().phase(), 0);

        // the intro replays on the original schedule
        core.tick(13_000, &mut stage, &mut p);
        core.tick(15_500, &mut stage, &mut p);
        assert!(core.recognition_enabled());
        assert_eq!(core.tutorial().wait(), TutorialWait::Palms);
    }

    #[test]
    fn drag_lesson_advances_on_a_real_pinch_drag() {
        let mut core = InteractionCore::new(CoreConfig::default(), texts());
        let mut stage = Stage::new();
        let mut p = RecordingPresenter::default();
        let now = reach_drag_lesson(&mut core, &mut stage, &mut p);

        let r = core.on_tracking(&frame(Some(HandPose::Pinch), None), &mut stage, &mut p, now + 100).unwrap();
        assert!(r.dragging);
        assert_eq!(core.tutorial().phase(), 9);
        assert_eq!(core.tutorial().wait(), TutorialWait::Rotate);
    }

    #[test]
    fn switch_gesture_is_inert_during_hands_on_lessons() {
        let mut core = InteractionCore::new(CoreConfig::default(), texts());
        let mut stage = Stage::new();
        let mut p = RecordingPresenter::default();
        let mut now = reach_drag_lesson(&mut core, &mut stage, &mut p);
        assert!(core.tutorial().allows_scene_interaction());

        for pose in [HandPose::Number(4), HandPose::Number(3)] {
            let f = frame(Some(HandPose::Number(1)), Some(pose));
            for _ in 0..10 {
                now += 33;
                let r = core.on_tracking(&f, &mut stage, &mut p, now).unwrap();
                assert_eq!(r.switch_fired, None);
                assert_eq!(r.scene_entered, None);
                assert_eq!(r.text_selected, None);
            }
            core.on_tracking(&HandFrame::empty(), &mut stage, &mut p, now + 10);
        }
        assert_eq!(stage.scenes.active(), SceneMode::Particles);
        assert_eq!(stage.scenes.text_index(), 0);
        assert_eq!(core.tutorial().phase(), 8);
    }

    #[test]
    fn skip_shows_first_text_and_unlocks() {
        let mut core = InteractionCore::new(skipped(), texts());
        let mut stage = Stage::new();
        let mut p = RecordingPresenter::default();
        core.start(0, &mut stage, &mut p);
        assert!(core.tutorial().is_complete());
        assert!(core.recognition_enabled());
        assert_eq!(p.text, "Alpha");
    }

    #[test]
    fn switch_gesture_presents_selected_text() {
        let mut core = InteractionCore::new(skipped(), texts());
        let mut stage = Stage::new();
        let mut p = RecordingPresenter::default();
        core.start(0, &mut stage, &mut p);

        let f = frame(Some(HandPose::Number(1)), Some(HandPose::Number(3)));
        core.on_tracking(&f, &mut stage, &mut p, 0);
        let r = core.on_tracking(&f, &mut stage, &mut p, 100).unwrap();
        assert_eq!(r.text_selected, Some(2));
        assert_eq!(p.text, "Gamma");
        assert_eq!(stage.scenes.text_index(), 2);
    }

    #[test]
    fn scene_gestures_wait_for_hands_on_phases() {
        let mut core = InteractionCore::new(CoreConfig::default(), texts());
        let mut stage = Stage::new();
        let mut p = RecordingPresenter::default();
        core.start(0, &mut stage, &mut p);
        core.tick(5000, &mut stage, &mut p);
        core.tick(7500, &mut stage, &mut p);
        // phase 2: a left pinch must not move the model yet
        let pinch = frame(Some(HandPose::Pinch), None);
        let r = core.on_tracking(&pinch, &mut stage, &mut p, 7600).unwrap();
        assert!(!r.dragging);
        assert!(!core.session().is_interacting());
    }

    #[test]
    fn secret_phrase_toggles_scene() {
        let mut core = InteractionCore::new(skipped(), texts());
        let mut stage = Stage::new();
        let mut now = 0;
        let mut last = None;
        for c in scene_state::secret::PHRASE_CHRISTMAS.chars() {
            now += 100;
            last = core.on_key(c, now, &mut stage);
        }
        assert_eq!(last, Some(PhraseOutcome::Toggle(SceneMode::Christmas)));
        assert_eq!(stage.scenes.active(), SceneMode::Christmas);
    }

    #[test]
    fn gated_phrase_rejected_outside_christmas() {
        let mut core = InteractionCore::new(skipped(), texts());
        let mut stage = Stage::new();
        let mut last = None;
        for (i, c) in scene_state::secret::PHRASE_PHOTO_TREE.chars().enumerate() {
            last = core.on_key(c, i as u64 * 100, &mut stage);
        }
        assert!(matches!(last, Some(PhraseOutcome::Rejected(_))));
        assert_eq!(stage.scenes.active(), SceneMode::Particles);
    }
}
