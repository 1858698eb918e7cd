//! Media long-press in the tree scenes.
//!
//! While the viewer is open the only thing this handler does is watch for a
//! right open palm to close it.  Otherwise the best view-cone candidate is
//! hovered, and a right fist held for the hold time opens the candidate that
//! was locked when the fist formed.

use hand_sign::classify::{is_fist, is_open_palm};
use hand_sign::HandPair;
use scene_state::{FreeLookCamera, MediaId, MediaShelf};

use crate::config::MediaConfig;
use crate::lock::InteractionLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaAction {
    Open(MediaId),
    Close,
}

pub struct MediaStep {
    pub lock:   InteractionLock<MediaId>,
    pub action: Option<MediaAction>,
}

pub fn step(
    pair:        &HandPair<'_>,
    lock:        &InteractionLock<MediaId>,
    shelf:       Option<&MediaShelf>,
    viewer_open: bool,
    camera:      &FreeLookCamera,
    cfg:         &MediaConfig,
    now_ms:      u64,
) -> MediaStep {
    let mut lock = lock.clone();
    if viewer_open {
        lock.clear();
        let action = is_open_palm(pair.right).then_some(MediaAction::Close);
        return MediaStep { lock, action };
    }

    let hovered = shelf.and_then(|s| s.candidate(camera.position, camera.forward(), cfg.radius, cfg.min_dot));
    let action = lock.update(hovered, is_fist(pair.right), now_ms).map(MediaAction::Open);
    MediaStep { lock, action }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use hand_sign::pose::{HandPose, PoseBuilder};
    use hand_sign::HandLandmarks;
    use scene_state::MediaEntry;
    use std::path::Path;

    fn shelf() -> MediaShelf {
        let e = |n: &str| MediaEntry::new(Path::new("/m"), n).unwrap();
        MediaShelf::new(vec![
            (e("a.jpg"), Vec3::new(0.0, 5.0, 14.0)),
            (e("b.mp4"), Vec3::new(-4.0, 5.0, 14.0)),
        ])
    }

    fn right(p: HandPose) -> HandLandmarks {
        PoseBuilder::new(0.3, 0.6).build(p)
    }

    fn run(hand: &HandLandmarks, lock: &InteractionLock<MediaId>, cam: &FreeLookCamera, open: bool, now: u64) -> MediaStep {
        let shelf = shelf();
        step(&HandPair { left: None, right: Some(hand) }, lock, Some(&shelf), open, cam, &MediaConfig::default(), now)
    }

    #[test]
    fn locked_photo_wins_over_new_hover() {
        let fist = right(HandPose::Fist);
        let mut cam = FreeLookCamera::new();
        let lock = InteractionLock::new(500);

        let s = run(&fist, &lock, &cam, false, 0);
        assert_eq!(s.lock.locked(), Some(0));

        // turn toward B while the fist is held
        cam.look(std::f32::consts::FRAC_PI_4 * 0.9, 0.0);
        let s = run(&fist, &s.lock, &cam, false, 300);
        assert_eq!(s.lock.hovered(), Some(1));
        assert_eq!(s.action, None);

        let s = run(&fist, &s.lock, &cam, false, 500);
        assert_eq!(s.action, Some(MediaAction::Open(0)));
    }

    #[test]
    fn open_palm_is_the_only_close() {
        let cam = FreeLookCamera::new();
        let lock = InteractionLock::new(500);
        assert_eq!(run(&right(HandPose::Fist), &lock, &cam, true, 0).action, None);
        assert_eq!(run(&right(HandPose::Number(2)), &lock, &cam, true, 0).action, None);
        assert_eq!(run(&right(HandPose::OpenPalm), &lock, &cam, true, 0).action, Some(MediaAction::Close));
    }

    #[test]
    fn viewer_open_suspends_hold() {
        let fist = right(HandPose::Fist);
        let cam = FreeLookCamera::new();
        let s = run(&fist, &InteractionLock::new(500), &cam, false, 0);
        let s = run(&fist, &s.lock, &cam, true, 600);
        assert_eq!(s.action, None);
        assert_eq!(s.lock.locked(), None);
    }

    #[test]
    fn nothing_in_view_nothing_opens() {
        let fist = right(HandPose::Fist);
        let mut cam = FreeLookCamera::new();
        cam.look(std::f32::consts::PI, 0.0);
        let s = run(&fist, &InteractionLock::new(500), &cam, false, 0);
        let s = run(&fist, &s.lock, &cam, false, 1000);
        assert_eq!(s.action, None);
    }
}
