//! Onboarding tutorial sequencer.
//!
//! Sixteen strictly ordered phases (0–15, 15 terminal).  Each phase is a
//! declarative script of [`Beat`]s: the first beat runs on entry, every
//! later beat runs a fixed delay after the one before it.  A single pending
//! beat is held at a time and driven by [`TutorialSequencer::tick`], so
//! entering a new phase implicitly cancels whatever the old phase had
//! scheduled.
//!
//! Phases that wait on the user set exactly one [`TutorialWait`].  A
//! confirmation only advances the sequence if the wait matches *and* the
//! current phase is the one that wait belongs to; anything else is a stale
//! delivery and is dropped.
//!
//! ```text
//!  0 intro text ──5 s──▶ 1 presents ──2.5 s──▶ 2 show palms ─(Palms)─▶ 3 ──2.5 s──▶
//!  4 right "1" ─(FingerOne)─▶ 5 ──4 s──▶ 6 ─(LeftOne)─▶ 7 ─(LeftTwo)─▶ 8 ─(Drag)─▶
//!  9 ─(Rotate)─▶ 10 ─(Scale)─▶ 11 ──2 s, 3 s──▶ 12 ─(Look3D)─▶ 13 ─(Move3D)─▶ 14 ──3 s──▶ 15
//! ```

use hand_sign::classify::is_showing_number;
use hand_sign::HandPair;
use scene_state::SceneMode;
use tracing::{debug, info};

use crate::arbitrator::FrameReport;
use crate::config::TutorialConfig;
use crate::debounce::Debouncer;
use crate::present::Presenter;

pub const TERMINAL_PHASE: u8 = 15;

// ── on-screen copy ──────────────────────────────────────────────────────────

pub const INTRO_TEXT:      &str = "Merry Christmas";
pub const PRESENTS_TEXT:   &str = "BP Debate Union Presents";
pub const PALMS_TEXT:      &str = "Show Your Palms";
pub const PALMS_OK_TEXT:   &str = "Good Lets Go";
pub const FINGER_TEXT:     &str = "Show 1 With Right Hand";
pub const WELLDONE_TEXT:   &str = "Welldone";

pub const FINGER_CAPTION:   &str =
    "This finger switches scenes. There are several scenes built in, and you will get to explore them all.";
pub const SWITCH_CAPTION:   &str =
    "Keep your right hand showing 1 and show 1 with your left hand to switch.";
pub const SCENE2_CAPTION:   &str =
    "Now keep your right hand on 1 and show 2 with your left hand.";
pub const DRAG_CAPTION:     &str = "Pinch your left thumb and index finger and drag the text around.";
pub const ROTATE_CAPTION:   &str = "Great! Now pinch thumb, index and middle together and turn the text.";
pub const SCALE_CAPTION:    &str = "Awesome! Pinch with both hands and pull apart to zoom.";
pub const ZOOM_CAPTION:     &str = "Awesome! You've mastered zooming!";
pub const INTRO_3D_CAPTION: &str = "You can handle text now. Let's move on to 3D scenes...";
pub const LOOK_CAPTION:     &str = "Pinch three fingers on your left hand and drag to look around.";
pub const MOVE_CAPTION:     &str = "Great! Now pinch three fingers on your right hand and drag to move.";
pub const DONE_CAPTION:     &str = "Excellent! You've mastered 3D navigation. Tutorial complete!";

// ════════════════════════════════════════════════════════════════════════════
// Waits and signals
// ════════════════════════════════════════════════════════════════════════════

/// The single gesture the tutorial is currently waiting for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TutorialWait {
    #[default]
    None,
    /// Two hands in view for the palm-confirm time.
    Palms,
    /// Physical right hand shows 1.
    FingerOne,
    /// Right shows 1 while left shows 1.
    LeftOne,
    /// Right shows 1 while left shows 2.
    LeftTwo,
    Drag,
    Rotate,
    Scale,
    Look3D,
    Move3D,
}

impl TutorialWait {
    /// The phase in which this wait is valid.
    pub fn phase(self) -> Option<u8> {
        match self {
            TutorialWait::None      => None,
            TutorialWait::Palms     => Some(2),
            TutorialWait::FingerOne => Some(4),
            TutorialWait::LeftOne   => Some(6),
            TutorialWait::LeftTwo   => Some(7),
            TutorialWait::Drag      => Some(8),
            TutorialWait::Rotate    => Some(9),
            TutorialWait::Scale     => Some(10),
            TutorialWait::Look3D    => Some(12),
            TutorialWait::Move3D    => Some(13),
        }
    }
}

/// Side effects the tutorial asks its owner to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TutorialSignal {
    EnableRecognition,
    EnterScene(SceneMode),
    SelectText(usize),
    Completed,
}

// ════════════════════════════════════════════════════════════════════════════
// Script
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Delay {
    FirstTextStay,
    TextCycle,
    Caption,
    Welldone,
    Zoom,
    Intro3d,
    Complete,
}

impl Delay {
    fn ms(self, cfg: &TutorialConfig) -> u64 {
        match self {
            Delay::FirstTextStay => cfg.first_text_stay_ms,
            Delay::TextCycle     => cfg.text_cycle_ms(),
            Delay::Caption       => cfg.caption_ms,
            Delay::Welldone      => cfg.welldone_ms,
            Delay::Zoom          => cfg.zoom_ms,
            Delay::Intro3d       => cfg.intro_3d_ms,
            Delay::Complete      => cfg.complete_ms,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Cue {
    Text(&'static str),
    Caption(&'static str),
    HideCaption,
    Await(TutorialWait),
    EnableRecognition,
    EnterScene(SceneMode),
    SelectText(usize),
    /// Enter the next phase; later cues and beats of this phase are dropped.
    Advance,
    Complete,
}

struct Beat {
    /// Delay after the previous beat; `None` only for a phase's first beat.
    after: Option<Delay>,
    cues:  &'static [Cue],
}

const fn on_entry(cues: &'static [Cue]) -> Beat {
    Beat { after: None, cues }
}

const fn then(delay: Delay, cues: &'static [Cue]) -> Beat {
    Beat { after: Some(delay), cues }
}

use Cue::*;

const SCRIPT: [&[Beat]; 16] = [
    /*  0 */ &[on_entry(&[HideCaption, Text(INTRO_TEXT)]), then(Delay::FirstTextStay, &[Advance])],
    /*  1 */ &[on_entry(&[Text(PRESENTS_TEXT)]), then(Delay::TextCycle, &[Advance])],
    /*  2 */ &[on_entry(&[EnableRecognition, Text(PALMS_TEXT), Await(TutorialWait::Palms)])],
    /*  3 */ &[on_entry(&[Text(PALMS_OK_TEXT)]), then(Delay::TextCycle, &[Advance])],
    /*  4 */ &[on_entry(&[Text(FINGER_TEXT), Await(TutorialWait::FingerOne)])],
    /*  5 */ &[on_entry(&[Caption(FINGER_CAPTION)]), then(Delay::Caption, &[Advance])],
    /*  6 */ &[on_entry(&[Caption(SWITCH_CAPTION), Await(TutorialWait::LeftOne)])],
    /*  7 */ &[on_entry(&[Text(WELLDONE_TEXT), Caption(SCENE2_CAPTION), Await(TutorialWait::LeftTwo)])],
    /*  8 */ &[
        on_entry(&[HideCaption, Text(WELLDONE_TEXT)]),
        then(Delay::Welldone, &[Text(INTRO_TEXT), Caption(DRAG_CAPTION), Await(TutorialWait::Drag)]),
    ],
    /*  9 */ &[on_entry(&[Caption(ROTATE_CAPTION), Await(TutorialWait::Rotate)])],
    /* 10 */ &[on_entry(&[Caption(SCALE_CAPTION), Await(TutorialWait::Scale)])],
    /* 11 */ &[
        on_entry(&[Caption(ZOOM_CAPTION)]),
        then(Delay::Zoom, &[Caption(INTRO_3D_CAPTION)]),
        then(Delay::Intro3d, &[Advance]),
    ],
    /* 12 */ &[on_entry(&[EnterScene(SceneMode::CherryBlossom), Caption(LOOK_CAPTION), Await(TutorialWait::Look3D)])],
    /* 13 */ &[on_entry(&[Caption(MOVE_CAPTION), Await(TutorialWait::Move3D)])],
    /* 14 */ &[on_entry(&[Caption(DONE_CAPTION)]), then(Delay::Complete, &[Advance])],
    /* 15 */ &[on_entry(&[HideCaption, EnterScene(SceneMode::Particles), SelectText(0), Complete])],
];

// ════════════════════════════════════════════════════════════════════════════
// Sequencer
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Pending {
    phase:  u8,
    beat:   usize,
    due_ms: u64,
}

#[derive(Clone, Debug)]
pub struct TutorialSequencer {
    config:   TutorialConfig,
    phase:    u8,
    wait:     TutorialWait,
    complete: bool,
    pending:  Option<Pending>,
    palms:    Debouncer,
}

impl TutorialSequencer {
    pub fn new(config: TutorialConfig) -> Self {
        let palms = Debouncer::new(config.palm_confirm_ms);
        TutorialSequencer {
            config,
            phase:    0,
            wait:     TutorialWait::None,
            complete: false,
            pending:  None,
            palms,
        }
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    pub fn wait(&self) -> TutorialWait {
        self.wait
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Full scene interaction runs once onboarding is done, and during the
    /// hands-on phases 8–13.
    pub fn allows_scene_interaction(&self) -> bool {
        self.complete || (8..=13).contains(&self.phase)
    }

    /// (Re)start onboarding from phase 0.
    pub fn start(&mut self, now_ms: u64, presenter: &mut dyn Presenter) -> Vec<TutorialSignal> {
        info!("tutorial started");
        self.complete = false;
        self.palms.reset();
        let mut out = Vec::new();
        self.enter(0, now_ms, presenter, &mut out);
        out
    }

    /// Mark onboarding complete without running it.
    pub fn skip(&mut self) -> Vec<TutorialSignal> {
        info!("tutorial skipped");
        self.phase = TERMINAL_PHASE;
        self.wait = TutorialWait::None;
        self.pending = None;
        self.complete = true;
        vec![TutorialSignal::EnableRecognition, TutorialSignal::Completed]
    }

    /// Run the pending beat once it is due.
    pub fn tick(&mut self, now_ms: u64, presenter: &mut dyn Presenter) -> Vec<TutorialSignal> {
        let mut out = Vec::new();
        while let Some(p) = self.pending {
            if now_ms < p.due_ms {
                break;
            }
            self.pending = None;
            if p.phase == self.phase && !self.complete {
                self.run_from(p.phase, p.beat, now_ms, presenter, &mut out);
            }
        }
        out
    }

    /// Check the awaited gesture against this frame.  `report` carries the
    /// interaction flags the arbitrator set (default when it did not run).
    pub fn observe(
        &mut self,
        pair:       &HandPair<'_>,
        hand_count: usize,
        report:     &FrameReport,
        now_ms:     u64,
        presenter:  &mut dyn Presenter,
    ) -> Vec<TutorialSignal> {
        if self.complete {
            return Vec::new();
        }
        let palms = self.palms.update(self.wait == TutorialWait::Palms && hand_count >= 2, now_ms);
        let right_one = || is_showing_number(pair.right, 1);
        let detected = match self.wait {
            TutorialWait::None      => false,
            TutorialWait::Palms     => palms,
            TutorialWait::FingerOne => right_one(),
            TutorialWait::LeftOne   => right_one() && is_showing_number(pair.left, 1),
            TutorialWait::LeftTwo   => right_one() && is_showing_number(pair.left, 2),
            TutorialWait::Drag      => report.dragging,
            TutorialWait::Rotate    => report.rotating,
            TutorialWait::Scale     => report.scaling,
            TutorialWait::Look3D    => report.looking,
            TutorialWait::Move3D    => report.strafing,
        };
        if detected {
            self.on_detected(self.wait, now_ms, presenter)
        } else {
            Vec::new()
        }
    }

    /// Deliver a confirmed gesture.  Ignored unless `wait` is the current
    /// wait and the sequencer is in that wait's phase.
    pub fn on_detected(
        &mut self,
        wait:      TutorialWait,
        now_ms:    u64,
        presenter: &mut dyn Presenter,
    ) -> Vec<TutorialSignal> {
        if self.complete || wait == TutorialWait::None || self.wait != wait || wait.phase() != Some(self.phase) {
            debug!(?wait, phase = self.phase, "stale tutorial event dropped");
            return Vec::new();
        }
        info!(?wait, phase = self.phase, "tutorial gesture confirmed");
        let mut out = Vec::new();
        self.enter(self.phase + 1, now_ms, presenter, &mut out);
        out
    }

    fn enter(&mut self, phase: u8, now_ms: u64, presenter: &mut dyn Presenter, out: &mut Vec<TutorialSignal>) {
        info!(phase, "tutorial phase");
        self.phase = phase;
        self.wait = TutorialWait::None;
        self.pending = None;
        self.run_from(phase, 0, now_ms, presenter, out);
    }

    fn run_from(
        &mut self,
        phase:     u8,
        start:     usize,
        now_ms:    u64,
        presenter: &mut dyn Presenter,
        out:       &mut Vec<TutorialSignal>,
    ) {
        let Some(beats) = SCRIPT.get(phase as usize) else { return };
        for (i, beat) in beats.iter().enumerate().skip(start) {
            if i != start {
                if let Some(delay) = beat.after {
                    self.pending = Some(Pending { phase, beat: i, due_ms: now_ms + delay.ms(&self.config) });
                    return;
                }
            }
            for cue in beat.cues {
                match *cue {
                    Text(t)            => presenter.set_particle_text(t),
                    Caption(c)         => presenter.show_caption(c),
                    HideCaption        => presenter.hide_caption(),
                    Await(w)           => self.wait = w,
                    EnableRecognition  => out.push(TutorialSignal::EnableRecognition),
                    EnterScene(m)      => out.push(TutorialSignal::EnterScene(m)),
                    SelectText(n)      => out.push(TutorialSignal::SelectText(n)),
                    Advance => {
                        self.enter(phase + 1, now_ms, presenter, out);
                        return;
                    }
                    Complete => {
                        info!("tutorial complete");
                        self.complete = true;
                        self.wait = TutorialWait::None;
                        out.push(TutorialSignal::Completed);
                    }
                }
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::{Presented, RecordingPresenter};
    use hand_sign::pose::{HandPose, PoseBuilder};
    use hand_sign::{HandFrame, Side, TrackedHand};

    fn seq() -> (TutorialSequencer, RecordingPresenter) {
        (TutorialSequencer::new(TutorialConfig::default()), RecordingPresenter::default())
    }

    fn frame(left: Option<HandPose>, right: Option<HandPose>) -> HandFrame {
        let mut hands = Vec::new();
        if let Some(p) = left {
            hands.push(TrackedHand::physical(PoseBuilder::new(0.7, 0.6).build(p), Side::Left));
        }
        if let Some(p) = right {
            hands.push(TrackedHand::physical(PoseBuilder::new(0.3, 0.6).mirrored(true).build(p), Side::Right));
        }
        HandFrame::new(hands).unwrap()
    }

    fn observe(t: &mut TutorialSequencer, p: &mut RecordingPresenter, f: &HandFrame, r: &FrameReport, now: u64) -> Vec<TutorialSignal> {
        t.observe(&f.pair(), f.len(), r, now, p)
    }

    /// Walk the whole tutorial, recording every phase seen after each step.
    #[test]
    fn expected_sequence_reaches_terminal_monotonically() {
        let (mut t, mut p) = seq();
        let mut phases = vec![];
        let mut signals = t.start(0, &mut p);
        phases.push(t.phase());
        let none = FrameReport::default();
        let mut now = 0;

        let step = |t: &mut TutorialSequencer, p: &mut RecordingPresenter, now: &mut u64, f: HandFrame, r: FrameReport| {
            let mut s = Vec::new();
            for _ in 0..60 {
                *now += 100;
                s.extend(t.tick(*now, p));
                s.extend(observe(t, p, &f, &r, *now));
            }
            s
        };

        // intro texts and palms
        signals.extend(step(&mut t, &mut p, &mut now, HandFrame::empty(), none.clone()));
        phases.push(t.phase());
        signals.extend(step(&mut t, &mut p, &mut now, HandFrame::empty(), none.clone()));
        phases.push(t.phase());
        assert_eq!(t.wait(), TutorialWait::Palms);
        signals.extend(step(&mut t, &mut p, &mut now, frame(Some(HandPose::OpenPalm), Some(HandPose::OpenPalm)), none.clone()));
        phases.push(t.phase());
        assert_eq!(t.wait(), TutorialWait::FingerOne);

        signals.extend(step(&mut t, &mut p, &mut now, frame(None, Some(HandPose::Number(1))), none.clone()));
        phases.push(t.phase());
        assert_eq!(t.phase(), 6);
        signals.extend(step(&mut t, &mut p, &mut now, frame(Some(HandPose::Number(1)), Some(HandPose::Number(1))), none.clone()));
        phases.push(t.phase());
        assert_eq!(t.phase(), 7);
        signals.extend(step(&mut t, &mut p, &mut now, frame(Some(HandPose::Number(2)), Some(HandPose::Number(1))), none.clone()));
        phases.push(t.phase());
        assert_eq!(t.phase(), 8);
        assert_eq!(t.wait(), TutorialWait::Drag);

        for flag in 0..5 {
            let mut r = FrameReport::default();
            match flag {
                0 => r.dragging = true,
                1 => r.rotating = true,
                2 => r.scaling = true,
                3 => r.looking = true,
                _ => r.strafing = true,
            }
            signals.extend(step(&mut t, &mut p, &mut now, HandFrame::empty(), r));
            phases.push(t.phase());
        }
        signals.extend(step(&mut t, &mut p, &mut now, HandFrame::empty(), none));
        phases.push(t.phase());

        assert!(t.is_complete());
        assert_eq!(t.phase(), TERMINAL_PHASE);
        assert!(phases.windows(2).all(|w| w[0] <= w[1]), "{:?}", phases);
        assert_eq!(
            signals,
            vec![
                TutorialSignal::EnableRecognition,
                TutorialSignal::EnterScene(SceneMode::CherryBlossom),
                TutorialSignal::EnterScene(SceneMode::Particles),
                TutorialSignal::SelectText(0),
                TutorialSignal::Completed,
            ],
        );
        assert_eq!(p.caption, None);
    }

    #[test]
    fn every_phase_is_entered_once_in_order() {
        let (mut t, mut p) = seq();
        t.start(0, &mut p);
        let mut seen = vec![t.phase()];
        let mut now = 0;
        let waits = [
            TutorialWait::Palms, TutorialWait::FingerOne, TutorialWait::LeftOne, TutorialWait::LeftTwo,
            TutorialWait::Drag, TutorialWait::Rotate, TutorialWait::Scale, TutorialWait::Look3D,
            TutorialWait::Move3D,
        ];
        let mut next_wait = 0;
        while !t.is_complete() && now < 200_000 {
            now += 10;
            t.tick(now, &mut p);
            if *seen.last().unwrap() != t.phase() {
                seen.push(t.phase());
            }
            if next_wait < waits.len() && t.wait() == waits[next_wait] {
                t.on_detected(waits[next_wait], now, &mut p);
                next_wait += 1;
            }
            if *seen.last().unwrap() != t.phase() {
                seen.push(t.phase());
            }
        }
        assert_eq!(seen, (0..=TERMINAL_PHASE).collect::<Vec<_>>());
    }

    #[test]
    fn out_of_order_gesture_does_nothing() {
        let (mut t, mut p) = seq();
        t.start(0, &mut p);
        t.tick(5000, &mut p);
        t.tick(7500, &mut p);
        assert_eq!(t.phase(), 2);
        assert!(t.on_detected(TutorialWait::Drag, 7600, &mut p).is_empty());
        assert!(t.on_detected(TutorialWait::Scale, 7600, &mut p).is_empty());
        assert_eq!(t.phase(), 2);
        assert_eq!(t.wait(), TutorialWait::Palms);
    }

    #[test]
    fn duplicate_delivery_is_dropped() {
        let (mut t, mut p) = seq();
        t.start(0, &mut p);
        t.tick(5000, &mut p);
        t.tick(7500, &mut p);
        t.on_detected(TutorialWait::Palms, 8000, &mut p);
        assert_eq!(t.phase(), 3);
        t.on_detected(TutorialWait::Palms, 8001, &mut p);
        assert_eq!(t.phase(), 3);
    }

    #[test]
    fn palms_need_two_hands_for_confirm_time() {
        let (mut t, mut p) = seq();
        t.start(0, &mut p);
        t.tick(5000, &mut p);
        t.tick(7500, &mut p);
        assert_eq!(t.wait(), TutorialWait::Palms);

        let two = frame(Some(HandPose::OpenPalm), Some(HandPose::Fist));
        let one = frame(Some(HandPose::OpenPalm), None);
        let r = FrameReport::default();
        observe(&mut t, &mut p, &two, &r, 8000);
        observe(&mut t, &mut p, &two, &r, 8400);
        observe(&mut t, &mut p, &one, &r, 8450);
        observe(&mut t, &mut p, &two, &r, 8500);
        observe(&mut t, &mut p, &two, &r, 8999);
        assert_eq!(t.phase(), 2);
        observe(&mut t, &mut p, &two, &r, 9000);
        assert_eq!(t.phase(), 3);
        assert_eq!(p.text, PALMS_OK_TEXT);
    }

    #[test]
    fn timed_beats_follow_configured_delays() {
        let (mut t, mut p) = seq();
        t.start(0, &mut p);
        assert_eq!(p.log, vec![Presented::HideCaption, Presented::Text(INTRO_TEXT.into())]);
        t.tick(4999, &mut p);
        assert_eq!(t.phase(), 0);
        t.tick(5000, &mut p);
        assert_eq!(t.phase(), 1);
        assert_eq!(p.text, PRESENTS_TEXT);
        t.tick(7499, &mut p);
        assert_eq!(t.phase(), 1);
        let s = t.tick(7500, &mut p);
        assert_eq!(s, vec![TutorialSignal::EnableRecognition]);
        assert_eq!(t.phase(), 2);
    }

    #[test]
    fn phase_eight_waits_for_welldone_before_drag() {
        let (mut t, mut p) = seq();
        t.start(0, &mut p);
        t.tick(5000, &mut p);
        t.tick(7500, &mut p);
        t.on_detected(TutorialWait::Palms, 8000, &mut p);
        t.tick(10_500, &mut p);
        t.on_detected(TutorialWait::FingerOne, 11_000, &mut p);
        t.tick(15_000, &mut p);
        t.on_detected(TutorialWait::LeftOne, 15_100, &mut p);
        t.on_detected(TutorialWait::LeftTwo, 15_200, &mut p);
        assert_eq!(t.phase(), 8);
        assert!(t.allows_scene_interaction());
        assert_eq!(t.wait(), TutorialWait::None);
        assert!(t.on_detected(TutorialWait::Drag, 15_300, &mut p).is_empty());
        t.tick(18_200, &mut p);
        assert_eq!(t.wait(), TutorialWait::Drag);
        assert_eq!(p.caption.as_deref(), Some(DRAG_CAPTION));
    }

    #[test]
    fn switch_lessons_need_right_hand_on_one() {
        let (mut t, mut p) = seq();
        t.start(0, &mut p);
        t.tick(5000, &mut p);
        t.tick(7500, &mut p);
        t.on_detected(TutorialWait::Palms, 8000, &mut p);
        t.tick(10_500, &mut p);
        t.on_detected(TutorialWait::FingerOne, 11_000, &mut p);
        t.tick(15_000, &mut p);
        assert_eq!(t.wait(), TutorialWait::LeftOne);

        let r = FrameReport::default();
        let one = Some(HandPose::Number(1));
        let two = Some(HandPose::Number(2));
        for right in [None, Some(HandPose::Fist), two] {
            assert!(observe(&mut t, &mut p, &frame(one, right), &r, 15_100).is_empty());
            assert_eq!(t.phase(), 6, "left 1 with right {:?}", right);
        }
        observe(&mut t, &mut p, &frame(one, one), &r, 15_200);
        assert_eq!(t.phase(), 7);
        assert_eq!(t.wait(), TutorialWait::LeftTwo);

        for right in [None, Some(HandPose::Fist), two] {
            observe(&mut t, &mut p, &frame(two, right), &r, 15_300);
            assert_eq!(t.phase(), 7, "left 2 with right {:?}", right);
        }
        observe(&mut t, &mut p, &frame(two, one), &r, 15_400);
        assert_eq!(t.phase(), 8);
    }

    #[test]
    fn skip_completes_immediately() {
        let (mut t, _) = seq();
        let s = t.skip();
        assert!(t.is_complete());
        assert!(t.allows_scene_interaction());
        assert!(s.contains(&TutorialSignal::Completed));
    }

    #[test]
    fn at_most_one_wait_by_construction() {
        for w in [TutorialWait::Palms, TutorialWait::Drag, TutorialWait::Move3D] {
            assert!(w.phase().is_some());
        }
        assert_eq!(TutorialWait::default(), TutorialWait::None);
        assert_eq!(TutorialWait::None.phase(), None);
    }
}
