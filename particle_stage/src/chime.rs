//! MIDI feedback chimes.
//!
//! Short arpeggios played on a background thread so a chime never stalls
//! the render loop.  When no MIDI port is available every chime is a
//! silent no-op.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{info, warn};

use crate::config::ChimeConfig;

// ════════════════════════════════════════════════════════════════════════════
// Chime
// ════════════════════════════════════════════════════════════════════════════

/// Something worth acknowledging audibly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Chime {
    ModeSwitch,
    TutorialStep,
    GiftOpened,
    AllGiftsFound,
    ViewerOpened,
}

impl Chime {
    /// `(note, milliseconds)` pairs, played in order.
    pub fn notes(self) -> &'static [(u8, u64)] {
        match self {
            Chime::ModeSwitch    => &[(67, 90), (72, 140)],
            Chime::TutorialStep  => &[(76, 120)],
            Chime::GiftOpened    => &[(72, 80), (76, 80), (79, 160)],
            Chime::AllGiftsFound => &[(72, 90), (76, 90), (79, 90), (84, 260)],
            Chime::ViewerOpened  => &[(79, 80), (74, 140)],
        }
    }
}

enum ChimeCommand {
    Play(Chime),
    Quit,
}

// ════════════════════════════════════════════════════════════════════════════
// MidiOut: abstraction over midir / null (for testing)
// ════════════════════════════════════════════════════════════════════════════

pub(crate) trait MidiOut: Send {
    fn program_change(&mut self, channel: u8, program: u8);
    fn note_on(&mut self,  channel: u8, note: u8, velocity: u8);
    fn note_off(&mut self, channel: u8, note: u8);
}

// ── midir backend ─────────────────────────────────────────────────────────

struct MidirOut {
    conn: midir::MidiOutputConnection,
}

impl MidiOut for MidirOut {
    fn program_change(&mut self, channel: u8, program: u8) {
        let _ = self.conn.send(&[0xC0 | (channel & 0x0F), program]);
    }
    fn note_on(&mut self, channel: u8, note: u8, velocity: u8) {
        let _ = self.conn.send(&[0x90 | (channel & 0x0F), note, velocity]);
    }
    fn note_off(&mut self, channel: u8, note: u8) {
        let _ = self.conn.send(&[0x80 | (channel & 0x0F), note, 0]);
    }
}

// ── null backend (used when no MIDI port is available) ────────────────────

struct NullOut;
impl MidiOut for NullOut {
    fn program_change(&mut self, _ch: u8, _p: u8)   {}
    fn note_on(&mut self, _ch: u8, _n: u8, _v: u8)  {}
    fn note_off(&mut self, _ch: u8, _n: u8)          {}
}

/// Try to open the first available MIDI output port, preferring a
/// softsynth.  Falls back to [`NullOut`] with a warning.
fn open_midi_output() -> Box<dyn MidiOut> {
    let midi_out = match midir::MidiOutput::new("particle_stage_chimes") {
        Ok(m)  => m,
        Err(e) => {
            warn!(error = %e, "MIDI init failed, chimes muted");
            return Box::new(NullOut);
        }
    };

    let ports = midi_out.ports();
    if ports.is_empty() {
        warn!("no MIDI output ports found, chimes muted (try `timidity -iA` or `fluidsynth`)");
        return Box::new(NullOut);
    }

    let port_idx = ports.iter().enumerate()
        .find(|(_, p)| {
            midi_out.port_name(p).map(|n| {
                let n = n.to_lowercase();
                n.contains("fluid") || n.contains("timidity") ||
                n.contains("microsoft") || n.contains("synth")
            }).unwrap_or(false)
        })
        .map(|(i, _)| i)
        .unwrap_or(0);

    let port = &ports[port_idx];
    let name = midi_out.port_name(port).unwrap_or_else(|_| "unknown".to_string());
    info!(port = %name, "opening MIDI port");

    match midi_out.connect(port, "particle-stage-chimes") {
        Ok(conn) => Box::new(MidirOut { conn }),
        Err(e) => {
            warn!(error = %e, "MIDI connect failed, chimes muted");
            Box::new(NullOut)
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ChimePlayer: handle to the chime thread
// ════════════════════════════════════════════════════════════════════════════

pub struct ChimePlayer {
    cmd_tx: Sender<ChimeCommand>,
    handle: Option<JoinHandle<()>>,
}

impl ChimePlayer {
    /// Spawn the chime thread on the first usable MIDI port, or a muted
    /// player when chimes are disabled.
    pub fn spawn(cfg: &ChimeConfig) -> Self {
        if !cfg.enabled {
            return ChimePlayer::muted();
        }
        let cfg = cfg.clone();
        Self::spawn_with(move || open_midi_output(), cfg)
    }

    /// A player that accepts and drops every chime.
    pub fn muted() -> Self {
        let (cmd_tx, _) = mpsc::channel();
        ChimePlayer { cmd_tx, handle: None }
    }

    pub(crate) fn spawn_with<F>(open: F, cfg: ChimeConfig) -> Self
    where
        F: FnOnce() -> Box<dyn MidiOut> + Send + 'static,
    {
        let (cmd_tx, cmd_rx) = mpsc::channel::<ChimeCommand>();
        let handle = thread::spawn(move || chime_thread(open(), cfg, cmd_rx));
        ChimePlayer { cmd_tx, handle: Some(handle) }
    }

    pub fn play(&self, chime: Chime) {
        let _ = self.cmd_tx.send(ChimeCommand::Play(chime));
    }

    /// Finish queued chimes, then stop the thread.
    pub fn shutdown(mut self) {
        let _ = self.cmd_tx.send(ChimeCommand::Quit);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn chime_thread(mut midi: Box<dyn MidiOut>, cfg: ChimeConfig, cmd_rx: Receiver<ChimeCommand>) {
    midi.program_change(cfg.channel, cfg.program);
    for cmd in cmd_rx {
        match cmd {
            ChimeCommand::Play(chime) => {
                for &(note, ms) in chime.notes() {
                    midi.note_on(cfg.channel, note, cfg.velocity);
                    thread::sleep(Duration::from_millis(ms));
                    midi.note_off(cfg.channel, note);
                }
            }
            ChimeCommand::Quit => return,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Debug, PartialEq)]
    enum Msg {
        Program(u8),
        On(u8),
        Off(u8),
    }

    struct RecordingOut(Arc<Mutex<Vec<Msg>>>);

    impl MidiOut for RecordingOut {
        fn program_change(&mut self, _ch: u8, p: u8)  { self.0.lock().unwrap().push(Msg::Program(p)); }
        fn note_on(&mut self, _ch: u8, n: u8, _v: u8) { self.0.lock().unwrap().push(Msg::On(n)); }
        fn note_off(&mut self, _ch: u8, n: u8)        { self.0.lock().unwrap().push(Msg::Off(n)); }
    }

    #[test]
    fn every_chime_is_playable() {
        for chime in [Chime::ModeSwitch, Chime::TutorialStep, Chime::GiftOpened, Chime::AllGiftsFound, Chime::ViewerOpened] {
            assert!(!chime.notes().is_empty());
            assert!(chime.notes().iter().all(|&(n, ms)| n < 128 && ms > 0));
        }
    }

    #[test]
    fn chime_plays_each_note_on_then_off() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let out = RecordingOut(log.clone());
        let player = ChimePlayer::spawn_with(move || Box::new(out), ChimeConfig::default());
        player.play(Chime::GiftOpened);
        player.shutdown();

        let log = log.lock().unwrap().clone();
        assert_eq!(
            log,
            vec![
                Msg::Program(11),
                Msg::On(72), Msg::Off(72),
                Msg::On(76), Msg::Off(76),
                Msg::On(79), Msg::Off(79),
            ],
        );
    }

    #[test]
    fn muted_player_swallows_chimes() {
        let player = ChimePlayer::muted();
        player.play(Chime::ModeSwitch);
        player.shutdown();
    }
}
