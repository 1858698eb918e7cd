//! # scene_state
//!
//! Scene state the gesture core writes and the renderer reads.  Nothing in
//! this crate looks at hands.
//!
//! * [`mode`]: the exclusive [`SceneMode`] and the particle-text selection.
//! * [`camera`]: free-look camera and the particle model transform.
//! * [`collectible`]: gifts and the spawned/opened progress tracker.
//! * [`media`]: media libraries, shelves and the viewer.
//! * [`secret`]: the secret-phrase keyboard listener.
//!
//! [`Stage`] bundles all of it so callers pass one `&mut` around.

pub mod mode;
pub mod camera;
pub mod collectible;
pub mod media;
pub mod secret;

pub use mode::{SceneMode, SceneSelector};
pub use camera::{FreeLookCamera, ModelTransform};
pub use collectible::{Gift, GiftId, GiftRegistry};
pub use media::{MediaEntry, MediaError, MediaId, MediaItem, MediaKind, MediaShelf, MediaViewer, OpenMedia};
pub use secret::{PhraseOutcome, PhraseRejection, SecretPhraseListener};

use glam::Vec3;

/// Where the Christmas forest's gift tree stands.
pub const GIFT_TREE_POSITION: Vec3 = Vec3::new(0.0, 0.0, -10.0);

/// Where the media trees stand in their scenes.
pub const MEDIA_TREE_POSITION: Vec3 = Vec3::ZERO;

/// All externally-owned scene state.
#[derive(Clone, Debug, Default)]
pub struct Stage {
    pub scenes:      SceneSelector,
    pub camera:      FreeLookCamera,
    pub model:       ModelTransform,
    pub gifts:       GiftRegistry,
    pub photo_shelf: MediaShelf,
    pub tree_shelf:  MediaShelf,
    pub viewer:      MediaViewer,
}

impl Stage {
    pub fn new() -> Self {
        Stage::default()
    }

    /// Toggle a scene (see [`SceneSelector::toggle`]).  Every toggle puts the
    /// camera back home and closes the viewer.
    pub fn toggle_scene(&mut self, mode: SceneMode) -> SceneMode {
        let next = self.scenes.toggle(mode);
        self.camera.reset();
        self.viewer.close();
        next
    }

    /// Enter a scene directly.  Returns `true` if it changed.
    pub fn enter_scene(&mut self, mode: SceneMode) -> bool {
        let changed = self.scenes.enter(mode);
        if changed {
            self.camera.reset();
            self.viewer.close();
        }
        changed
    }

    /// The shelf of the active tree scene, if any.
    pub fn active_shelf(&self) -> Option<&MediaShelf> {
        match self.scenes.active() {
            SceneMode::PhotoTree => Some(&self.photo_shelf),
            SceneMode::EmptyTree => Some(&self.tree_shelf),
            _ => None,
        }
    }
}
