//! Tunables for the interaction core.
//!
//! Every field has a default, so each section deserializes from an empty
//! TOML table.

use hand_sign::classify::{
    COARSE_PINCH_THRESHOLD, FINE_PINCH_THRESHOLD, LOOSE_EXTENSION_MARGIN, STRICT_EXTENSION_MARGIN,
};
use hand_sign::InteractionSpace;
use serde::Deserialize;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub arbiter:  ArbiterConfig,
    pub tutorial: TutorialConfig,
    pub gifts:    GiftConfig,
    pub media:    MediaConfig,
}

/// Mode switching and particle manipulation.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArbiterConfig {
    /// Hold time before a mode-switch target fires.
    pub confirm_ms:        u64,
    /// Margin for the left-hand activation "1".
    pub activation_margin: f32,
    /// Margin for the right-hand finger count.
    pub count_margin:      f32,
    pub fine_pinch:        f32,
    pub coarse_pinch:      f32,
    #[serde(flatten)]
    pub space:             InteractionSpace,
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        ArbiterConfig {
            confirm_ms:        50,
            activation_margin: LOOSE_EXTENSION_MARGIN,
            count_margin:      STRICT_EXTENSION_MARGIN,
            fine_pinch:        FINE_PINCH_THRESHOLD,
            coarse_pinch:      COARSE_PINCH_THRESHOLD,
            space:             InteractionSpace::default(),
        }
    }
}

/// Onboarding timings, all in milliseconds.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TutorialConfig {
    pub palm_confirm_ms:    u64,
    /// Particles take this long to form a new text…
    pub formation_ms:       u64,
    /// …and the text then stays this long.
    pub stay_ms:            u64,
    pub first_text_stay_ms: u64,
    pub caption_ms:         u64,
    pub welldone_ms:        u64,
    pub zoom_ms:            u64,
    pub intro_3d_ms:        u64,
    pub complete_ms:        u64,
    /// Start with onboarding already complete.
    pub skip:               bool,
}

impl Default for TutorialConfig {
    fn default() -> Self {
        TutorialConfig {
            palm_confirm_ms:    500,
            formation_ms:       1000,
            stay_ms:            1500,
            first_text_stay_ms: 5000,
            caption_ms:         4000,
            welldone_ms:        3000,
            zoom_ms:            2000,
            intro_3d_ms:        3000,
            complete_ms:        3000,
            skip:               false,
        }
    }
}

impl TutorialConfig {
    /// Formation plus stay: how long an ordinary intro text is shown.
    pub fn text_cycle_ms(&self) -> u64 {
        self.formation_ms + self.stay_ms
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GiftConfig {
    pub radius:  f32,
    pub hold_ms: u64,
    pub count:   usize,
}

impl Default for GiftConfig {
    fn default() -> Self {
        GiftConfig { radius: 8.0, hold_ms: 200, count: 3 }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    pub radius:  f32,
    /// Cosine of the view-cone half angle.
    pub min_dot: f32,
    pub hold_ms: u64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        MediaConfig { radius: 12.0, min_dot: 0.5, hold_ms: 500 }
    }
}
