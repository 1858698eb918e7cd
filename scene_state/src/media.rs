//! Media shelves for the tree scenes.
//!
//! A library directory is read once, classified by file extension, and laid
//! out on a helix around the tree.  The gesture core only ever asks the shelf
//! for the best hover candidate and the viewer for open/close; decoding and
//! playback belong to the platform.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

pub const MANIFEST_FILE: &str = "manifest.json";

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "svg", "ico", "tiff", "tif"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "m4a", "flac", "aac", "wma", "opus", "webm"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "avi", "mkv", "ogv", "m4v", "wmv", "flv"];

// ════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("cannot read media library {}: {source}", .path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed manifest {}: {source}", .path.display())]
    Manifest {
        path:   PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ════════════════════════════════════════════════════════════════════════════
// Kinds and entries
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Audio,
    Video,
}

impl MediaKind {
    /// Classify by extension, case-insensitively.  Lists are checked image,
    /// audio, video in that order, so `.webm` is audio.
    pub fn from_path(path: impl AsRef<Path>) -> Option<MediaKind> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Image)
        } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Audio)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: MediaKind,
}

impl MediaEntry {
    /// `None` for unsupported file types.
    pub fn new(dir: &Path, name: &str) -> Option<MediaEntry> {
        let kind = MediaKind::from_path(name)?;
        Some(MediaEntry { name: name.to_string(), path: dir.join(name), kind })
    }
}

#[derive(Deserialize)]
struct Manifest {
    files: Vec<String>,
}

/// Read a library directory: `manifest.json` when present, otherwise every
/// supported file in the directory sorted by name.
pub fn load_library(dir: &Path) -> Result<Vec<MediaEntry>, MediaError> {
    let manifest_path = dir.join(MANIFEST_FILE);
    let names: Vec<String> = if manifest_path.is_file() {
        let text = fs::read_to_string(&manifest_path)
            .map_err(|source| MediaError::Io { path: manifest_path.clone(), source })?;
        let manifest: Manifest = serde_json::from_str(&text)
            .map_err(|source| MediaError::Manifest { path: manifest_path.clone(), source })?;
        manifest.files
    } else {
        let read = fs::read_dir(dir).map_err(|source| MediaError::Io { path: dir.to_path_buf(), source })?;
        let mut names = Vec::new();
        for entry in read {
            let entry = entry.map_err(|source| MediaError::Io { path: dir.to_path_buf(), source })?;
            if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        names
    };

    let entries: Vec<MediaEntry> = names
        .iter()
        .filter_map(|name| {
            let entry = MediaEntry::new(dir, name);
            if entry.is_none() {
                debug!(file = %name, "skipping unsupported media file");
            }
            entry
        })
        .collect();
    debug!(dir = %dir.display(), count = entries.len(), "media library read");
    Ok(entries)
}

// ════════════════════════════════════════════════════════════════════════════
// Shelf
// ════════════════════════════════════════════════════════════════════════════

pub type MediaId = usize;

#[derive(Clone, Debug, PartialEq)]
pub struct MediaItem {
    pub id:       MediaId,
    pub entry:    MediaEntry,
    pub position: Vec3,
}

/// The media hung around one tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MediaShelf {
    items: Vec<MediaItem>,
}

impl MediaShelf {
    pub fn new(items: Vec<(MediaEntry, Vec3)>) -> Self {
        MediaShelf {
            items: items
                .into_iter()
                .enumerate()
                .map(|(id, (entry, position))| MediaItem { id, entry, position })
                .collect(),
        }
    }

    /// Spiral the entries up and around a tree standing at `center`.  More
    /// media means more turns, a taller spiral and a wider radius.
    pub fn helix(entries: Vec<MediaEntry>, center: Vec3) -> Self {
        let n = entries.len() as f32;
        let turns = (n / 6.0).ceil().max(2.0);
        let height_range = 5.0 + n * 1.5;
        let spread = (n / 8.0).sqrt().max(1.0);
        MediaShelf::new(
            entries
                .into_iter()
                .enumerate()
                .map(|(i, entry)| {
                    let t = i as f32 / n;
                    let angle = t * std::f32::consts::TAU * turns;
                    let radius = (8.0 + (i as f32 * 0.8).sin() * 2.0) * spread;
                    let offset = Vec3::new(angle.cos() * radius, 5.0 + t * height_range, angle.sin() * radius);
                    (entry, center + offset)
                })
                .collect(),
        )
    }

    /// Load and lay out a library.  A missing or broken library leaves the
    /// shelf empty; the scene simply has nothing to pick.
    pub fn load(dir: &Path, center: Vec3) -> Self {
        match load_library(dir) {
            Ok(entries) => MediaShelf::helix(entries, center),
            Err(e) => {
                warn!(error = %e, "media library unavailable");
                MediaShelf::default()
            }
        }
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn get(&self, id: MediaId) -> Option<&MediaItem> {
        self.items.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Best hover candidate from the camera: closer than `radius`, inside
    /// the view cone (`forward · to_item >= min_dot`), lowest
    /// `distance / dot²` so centred items beat nearer ones off to the side.
    pub fn candidate(&self, cam_pos: Vec3, forward: Vec3, radius: f32, min_dot: f32) -> Option<MediaId> {
        self.items
            .iter()
            .filter_map(|item| {
                let d = cam_pos.distance(item.position);
                if d >= radius {
                    return None;
                }
                let dot = forward.dot((item.position - cam_pos).normalize_or_zero());
                if dot < min_dot || dot <= 0.0 {
                    return None;
                }
                Some((item.id, d / (dot * dot)))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Viewer
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenMedia {
    pub id:   MediaId,
    pub kind: MediaKind,
    pub path: PathBuf,
}

/// Full-screen viewer state: an image viewer for stills, a player for audio
/// and video.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MediaViewer {
    current: Option<OpenMedia>,
}

impl MediaViewer {
    pub fn open(&mut self, item: &MediaItem) {
        self.current = Some(OpenMedia {
            id:   item.id,
            kind: item.entry.kind,
            path: item.entry.path.clone(),
        });
    }

    /// Returns `true` if something was open.
    pub fn close(&mut self) -> bool {
        self.current.take().is_some()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&OpenMedia> {
        self.current.as_ref()
    }
}
