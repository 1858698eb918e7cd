//! Exclusive scene modes.
//!
//! Exactly one [`SceneMode`] is active at any time.  Storing the active mode
//! as a single enum value (rather than one flag per scene) makes "two scenes
//! on at once" unrepresentable, so every toggle trivially preserves the
//! mutual-exclusion invariant.

use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SceneMode {
    /// Floating particle text.  The base scene.
    #[default]
    Particles,
    CherryBlossom,
    Christmas,
    PhotoTree,
    EmptyTree,
}

impl SceneMode {
    pub const ALL: [SceneMode; 5] = [
        SceneMode::Particles,
        SceneMode::CherryBlossom,
        SceneMode::Christmas,
        SceneMode::PhotoTree,
        SceneMode::EmptyTree,
    ];

    /// Scenes navigated with the free-look camera.
    pub fn is_free_look(self) -> bool {
        self != SceneMode::Particles
    }

    /// Scenes that hang media on a tree.
    pub fn has_media(self) -> bool {
        matches!(self, SceneMode::PhotoTree | SceneMode::EmptyTree)
    }

    pub fn label(self) -> &'static str {
        match self {
            SceneMode::Particles     => "particles",
            SceneMode::CherryBlossom => "cherry-blossom",
            SceneMode::Christmas     => "christmas",
            SceneMode::PhotoTree     => "photo-tree",
            SceneMode::EmptyTree     => "empty-tree",
        }
    }
}

/// The active scene plus the selected particle text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneSelector {
    active:     SceneMode,
    text_index: usize,
}

impl SceneSelector {
    pub fn new() -> Self {
        SceneSelector::default()
    }

    pub fn active(&self) -> SceneMode {
        self.active
    }

    pub fn is_active(&self, mode: SceneMode) -> bool {
        self.active == mode
    }

    pub fn text_index(&self) -> usize {
        self.text_index
    }

    /// Switch a scene on, or off again if it is already the active one.
    /// Switching a scene off falls back to particles.  Returns the mode that
    /// is active afterwards.
    pub fn toggle(&mut self, mode: SceneMode) -> SceneMode {
        let next = if self.active == mode { SceneMode::Particles } else { mode };
        self.enter(next);
        next
    }

    /// Make `mode` active.  Returns `true` if the scene changed.
    pub fn enter(&mut self, mode: SceneMode) -> bool {
        if self.active == mode {
            return false;
        }
        info!(from = self.active.label(), to = mode.label(), "scene change");
        self.active = mode;
        true
    }

    pub fn select_text(&mut self, index: usize) {
        self.text_index = index;
    }
}
