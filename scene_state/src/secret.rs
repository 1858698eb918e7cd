//! Secret-phrase keyboard listener.
//!
//! Letters are appended to a short rolling buffer; whenever the buffer ends
//! with one of the fixed phrases the matching scene is toggled.  The two
//! tree scenes are gated behind the Christmas forest and a full gift hunt.

use tracing::{info, warn};

use crate::collectible::GiftRegistry;
use crate::mode::SceneMode;

pub const PHRASE_CHRISTMAS: &str = "merrychristmas";
pub const PHRASE_PHOTO_TREE: &str = "aurora";
pub const PHRASE_EMPTY_TREE: &str = "tree";

/// Longest phrase; the buffer never holds more.
pub const MAX_BUFFER_LEN: usize = PHRASE_CHRISTMAS.len();

/// No keypress for this long clears the buffer.
pub const IDLE_RESET_MS: u64 = 3000;

struct Phrase {
    text:   &'static str,
    target: SceneMode,
    gated:  bool,
}

// Checked in order; the first suffix match wins.
const PHRASES: [Phrase; 3] = [
    Phrase { text: PHRASE_CHRISTMAS,  target: SceneMode::Christmas, gated: false },
    Phrase { text: PHRASE_PHOTO_TREE, target: SceneMode::PhotoTree, gated: true  },
    Phrase { text: PHRASE_EMPTY_TREE, target: SceneMode::EmptyTree, gated: true  },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhraseRejection {
    NotInChristmas,
    NoGiftsSpawned,
    GiftsRemaining { opened: usize, spawned: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhraseOutcome {
    /// Toggle this scene.
    Toggle(SceneMode),
    Rejected(PhraseRejection),
}

#[derive(Clone, Debug, Default)]
pub struct SecretPhraseListener {
    buffer:      String,
    last_key_ms: Option<u64>,
}

impl SecretPhraseListener {
    pub fn new() -> Self {
        SecretPhraseListener::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Clear the buffer once the idle timeout has passed.
    pub fn tick(&mut self, now_ms: u64) {
        if let Some(last) = self.last_key_ms {
            if now_ms.saturating_sub(last) >= IDLE_RESET_MS {
                self.buffer.clear();
                self.last_key_ms = None;
            }
        }
    }

    /// Feed one keypress.  Non-letters are ignored.  A matched phrase always
    /// clears the buffer, whether it is accepted or rejected.
    pub fn on_key(
        &mut self,
        key:    char,
        now_ms: u64,
        active: SceneMode,
        gifts:  &GiftRegistry,
    ) -> Option<PhraseOutcome> {
        if !key.is_ascii_alphabetic() {
            return None;
        }
        self.tick(now_ms);
        self.last_key_ms = Some(now_ms);

        self.buffer.push(key.to_ascii_lowercase());
        if self.buffer.len() > MAX_BUFFER_LEN {
            let cut = self.buffer.len() - MAX_BUFFER_LEN;
            self.buffer.drain(..cut);
        }

        let phrase = PHRASES.iter().find(|p| self.buffer.ends_with(p.text))?;
        self.buffer.clear();

        if phrase.gated {
            if let Some(reason) = prerequisite_violation(active, gifts) {
                match reason {
                    PhraseRejection::NotInChristmas => {
                        warn!(phrase = phrase.text, "secret phrase needs the Christmas forest first")
                    }
                    PhraseRejection::NoGiftsSpawned => {
                        warn!(phrase = phrase.text, "secret phrase rejected: no gifts spawned")
                    }
                    PhraseRejection::GiftsRemaining { opened, spawned } => {
                        warn!(phrase = phrase.text, opened, spawned, "secret phrase rejected: find all gifts first")
                    }
                }
                return Some(PhraseOutcome::Rejected(reason));
            }
        }
        info!(phrase = phrase.text, scene = phrase.target.label(), "secret phrase accepted");
        Some(PhraseOutcome::Toggle(phrase.target))
    }
}

fn prerequisite_violation(active: SceneMode, gifts: &GiftRegistry) -> Option<PhraseRejection> {
    if active != SceneMode::Christmas {
        Some(PhraseRejection::NotInChristmas)
    } else if gifts.spawned() == 0 {
        Some(PhraseRejection::NoGiftsSpawned)
    } else if !gifts.can_access_secret_scene() {
        Some(PhraseRejection::GiftsRemaining { opened: gifts.opened(), spawned: gifts.spawned() })
    } else {
        None
    }
}
