//! Stage configuration, read from a TOML file.
//!
//! Every field is defaulted, so an empty file (or no file at all) yields
//! the stock installation.
//!
//! ```toml
//! [texts]
//! items = ["Hello", "World"]
//!
//! [arbiter]
//! confirm_ms = 80
//!
//! [media]
//! photo_dir = "/srv/photos"
//!
//! [chimes]
//! enabled = false
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gesture_core::{ArbiterConfig, CoreConfig, GiftConfig, MediaConfig, TutorialConfig};
use serde::Deserialize;

pub const DEFAULT_TEXTS: [&str; 3] = ["BP Debate Union", "Aurora", "BPDU Team Presents"];

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub texts:    TextsConfig,
    pub arbiter:  ArbiterConfig,
    pub tutorial: TutorialConfig,
    pub gifts:    GiftConfig,
    pub media:    MediaSection,
    pub chimes:   ChimeConfig,
}

/// Particle texts selectable with the switch gesture, in finger-count order.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextsConfig {
    pub items: Vec<String>,
}

impl Default for TextsConfig {
    fn default() -> Self {
        TextsConfig { items: DEFAULT_TEXTS.iter().map(|s| s.to_string()).collect() }
    }
}

/// Media interaction tunables plus the library directories of both trees.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MediaSection {
    #[serde(flatten)]
    pub interaction: MediaConfig,
    pub photo_dir:   Option<PathBuf>,
    pub tree_dir:    Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChimeConfig {
    pub enabled:  bool,
    /// General MIDI program (0–127).
    pub program:  u8,
    pub channel:  u8,
    pub velocity: u8,
}

impl Default for ChimeConfig {
    fn default() -> Self {
        // 11 = Vibraphone
        ChimeConfig { enabled: true, program: 11, channel: 0, velocity: 90 }
    }
}

impl StageConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed reading config file {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let mut cfg: StageConfig = toml::from_str(raw).context("invalid TOML")?;
        cfg.chimes.channel &= 0x0F;
        cfg.chimes.program = cfg.chimes.program.min(127);
        cfg.chimes.velocity = cfg.chimes.velocity.min(127);
        Ok(cfg)
    }

    /// The sections the interaction core reads.
    pub fn core(&self) -> CoreConfig {
        CoreConfig {
            arbiter:  self.arbiter.clone(),
            tutorial: self.tutorial.clone(),
            gifts:    self.gifts.clone(),
            media:    self.media.interaction.clone(),
        }
    }
}
