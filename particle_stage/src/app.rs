//! Top-level application state.
//!
//! [`App`] owns the [`InteractionCore`], the [`Stage`] it drives, the
//! on-screen text and caption, and the chime player.  It processes
//! [`TrackingEvent`]s and keypresses and hands the visualizer a
//! [`StageView`] each frame.

use std::path::PathBuf;
use std::sync::mpsc::{self, TryRecvError};
use std::time::Instant;

use anyhow::Result;
use gesture_core::{FrameReport, InteractionCore, Presenter, SwitchTarget};
use hand_sign::HandFrame;
use scene_state::{MediaShelf, PhraseOutcome, PhraseRejection, Stage, GIFT_TREE_POSITION, MEDIA_TREE_POSITION};
use tracing::{debug, info};

use crate::chime::{Chime, ChimePlayer};
use crate::config::StageConfig;
use crate::source::{spawn_frame_source, ReplayFrameSource, SimFrameSource, SimInput, TrackingEvent};
use crate::visualizer::{StageView, Visualizer};

// ════════════════════════════════════════════════════════════════════════════
// StagePresenter
// ════════════════════════════════════════════════════════════════════════════

/// What the window currently shows: particle text and the caption bar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StagePresenter {
    pub text:    String,
    pub caption: Option<String>,
}

impl Presenter for StagePresenter {
    fn set_particle_text(&mut self, text: &str) {
        debug!(text, "particle text");
        self.text = text.to_string();
    }

    fn show_caption(&mut self, text: &str) {
        debug!(text, "caption shown");
        self.caption = Some(text.to_string());
    }

    fn hide_caption(&mut self) {
        self.caption = None;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// App
// ════════════════════════════════════════════════════════════════════════════

pub struct App {
    core:       InteractionCore,
    stage:      Stage,
    screen:     StagePresenter,
    chimes:     ChimePlayer,
    // ── last frame, for the renderer ──────────────────────────────────────
    hands:      HandFrame,
    report:     FrameReport,
    last_phase: u8,
    pub status: String,
}

impl App {
    pub fn new(cfg: &StageConfig, chimes: ChimePlayer) -> Self {
        let mut stage = Stage::new();
        stage.gifts.spawn_ring(GIFT_TREE_POSITION, cfg.gifts.count);
        if let Some(dir) = &cfg.media.photo_dir {
            stage.photo_shelf = MediaShelf::load(dir, MEDIA_TREE_POSITION);
        }
        if let Some(dir) = &cfg.media.tree_dir {
            stage.tree_shelf = MediaShelf::load(dir, MEDIA_TREE_POSITION);
        }
        info!(
            gifts = stage.gifts.spawned(),
            photos = stage.photo_shelf.items().len(),
            tree_media = stage.tree_shelf.items().len(),
            "stage ready"
        );

        App {
            core:       InteractionCore::new(cfg.core(), cfg.texts.items.clone()),
            stage,
            screen:     StagePresenter::default(),
            chimes,
            hands:      HandFrame::empty(),
            report:     FrameReport::default(),
            last_phase: 0,
            status:     "Ready".to_string(),
        }
    }

    pub fn start(&mut self, now_ms: u64) {
        self.core.start(now_ms, &mut self.stage, &mut self.screen);
        self.last_phase = self.core.tutorial().phase();
        if self.core.tutorial().is_complete() {
            self.status = "Tutorial skipped. Show left 1 + right 1-4 to switch".to_string();
        }
    }

    // ── process one TrackingEvent ────────────────────────────────────────

    pub fn handle_event(&mut self, event: TrackingEvent, now_ms: u64) {
        match event {
            TrackingEvent::Frame(frame) => {
                let report = self.core.on_tracking(&frame, &mut self.stage, &mut self.screen, now_ms);
                self.hands = frame;
                if let Some(report) = report {
                    for chime in chimes_for(&report, &self.stage) {
                        self.chimes.play(chime);
                    }
                    if let Some(status) = describe(&report, &self.stage) {
                        self.status = status;
                    }
                    self.report = report;
                }
                self.note_phase();
            }
            TrackingEvent::Finished => {
                info!("tracking source finished");
                self.hands = HandFrame::empty();
                self.report = FrameReport::default();
                self.status = "Tracking source finished".to_string();
            }
        }
    }

    pub fn on_key(&mut self, key: char, now_ms: u64) {
        match self.core.on_key(key, now_ms, &mut self.stage) {
            Some(PhraseOutcome::Toggle(_)) => {
                let mode = self.stage.scenes.active();
                self.status = format!("Scene: {}", mode.label());
                self.chimes.play(Chime::ModeSwitch);
            }
            Some(PhraseOutcome::Rejected(why)) => {
                self.status = match why {
                    PhraseRejection::NotInChristmas => "That phrase only works in the Christmas scene".to_string(),
                    PhraseRejection::NoGiftsSpawned => "No gifts to find yet".to_string(),
                    PhraseRejection::GiftsRemaining { opened, spawned } =>
                        format!("Find every gift first ({opened}/{spawned})"),
                };
            }
            None => {}
        }
    }

    /// Per-frame logic: timed tutorial beats.
    pub fn tick(&mut self, now_ms: u64) {
        self.core.tick(now_ms, &mut self.stage, &mut self.screen);
        self.note_phase();
    }

    fn note_phase(&mut self) {
        let phase = self.core.tutorial().phase();
        if phase != self.last_phase {
            debug!(from = self.last_phase, to = phase, "tutorial phase");
            self.last_phase = phase;
            self.chimes.play(Chime::TutorialStep);
        }
    }

    // ── Accessors for the render loop ─────────────────────────────────────

    pub fn stage(&self)  -> &Stage          { &self.stage }
    pub fn screen(&self) -> &StagePresenter { &self.screen }
    pub fn report(&self) -> &FrameReport    { &self.report }

    pub fn view(&self) -> StageView<'_> {
        let session = self.core.session();
        let gift = session.gift_lock();
        let media = session.media_lock();
        StageView {
            stage:         &self.stage,
            text:          &self.screen.text,
            caption:       self.screen.caption.as_deref(),
            hands:         &self.hands,
            report:        &self.report,
            hovered_gift:  gift.locked().or(gift.hovered()),
            hovered_media: media.locked().or(media.hovered()),
            status:        &self.status,
        }
    }

    pub fn shutdown(self) {
        self.chimes.shutdown();
    }
}

/// Chimes acknowledging what a frame did.
pub fn chimes_for(report: &FrameReport, stage: &Stage) -> Vec<Chime> {
    let mut out = Vec::new();
    if report.text_selected.is_some() || report.scene_entered.is_some() {
        out.push(Chime::ModeSwitch);
    }
    if report.gift_opened.is_some() {
        out.push(if stage.gifts.can_access_secret_scene() { Chime::AllGiftsFound } else { Chime::GiftOpened });
    }
    if report.media_opened.is_some() {
        out.push(Chime::ViewerOpened);
    }
    out
}

fn describe(report: &FrameReport, stage: &Stage) -> Option<String> {
    if let Some(n) = report.text_selected {
        return Some(format!("Text {} selected", n + 1));
    }
    if let Some(mode) = report.scene_entered {
        return Some(format!("Scene: {}", mode.label()));
    }
    if report.switch_fired == Some(SwitchTarget::FreeLook) {
        return Some("Already in a 3D scene".to_string());
    }
    if report.gift_opened.is_some() {
        let (opened, spawned) = (stage.gifts.opened(), stage.gifts.spawned());
        return Some(if opened == spawned {
            "All gifts found! Secret phrases unlocked".to_string()
        } else {
            format!("Gift opened ({opened}/{spawned})")
        });
    }
    if let Some(open) = stage.viewer.current().filter(|_| report.media_opened.is_some()) {
        return Some(format!("Viewing {} {}", open.kind.label(), open.path.display()));
    }
    if report.viewer_closed {
        return Some("Viewer closed".to_string());
    }
    None
}

// ════════════════════════════════════════════════════════════════════════════
// run(): the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Where tracking frames come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// Keyboard-simulated hands.
    Sim,
    /// A JSON-lines recording.
    Replay(PathBuf),
    #[cfg(feature = "leap")]
    Leap,
}

/// Run the full application.
///
/// Creates the visualizer, the frame source and the chime player, and drives
/// the event/render loop at ~60 fps until the window closes.
pub fn run(cfg: StageConfig, kind: SourceKind) -> Result<()> {
    let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();
    let frames = match kind {
        SourceKind::Sim => spawn_frame_source(SimFrameSource::new(sim_rx)),
        SourceKind::Replay(path) => spawn_frame_source(ReplayFrameSource::open(&path)?),
        #[cfg(feature = "leap")]
        SourceKind::Leap => spawn_frame_source(crate::source::LeapFrameSource),
    };

    let mut vis = Visualizer::new()?;
    let mut app = App::new(&cfg, ChimePlayer::spawn(&cfg.chimes));

    let started = Instant::now();
    let now = || started.elapsed().as_millis() as u64;
    app.start(now());

    let mut source_open = true;
    while let Some(inputs) = vis.poll_input() {
        // 1. Window input: letters feed the phrase listener, the rest the sim
        for input in inputs {
            match input {
                SimInput::Letter(c) => app.on_key(c, now()),
                other => { let _ = sim_tx.send(other); }
            }
        }

        // 2. Drain tracking events
        while source_open {
            match frames.try_recv() {
                Ok(event) => app.handle_event(event, now()),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => source_open = false,
            }
        }

        // 3. Per-frame logic
        app.tick(now());

        // 4. Render
        vis.render(&app.view());
    }

    let _ = sim_tx.send(SimInput::Quit);
    app.shutdown();
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
