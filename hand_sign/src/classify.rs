//! Stateless gesture classifiers.
//!
//! Every predicate accepts either `&HandLandmarks` or `Option<&HandLandmarks>`
//! and answers `false`/`None` for an absent hand.  None of them keep state
//! between frames; temporal confirmation lives in `gesture_core`.
//!
//! # Extension rule
//!
//! A non-thumb finger is extended when its tip is farther from the wrist
//! than its PIP joint, scaled by a margin.  Comparing two distances from the
//! same reference point makes the test independent of hand rotation and of
//! the hand's distance from the camera.  The thumb bends along a different
//! axis, so it is judged by the gap between its tip and the index MCP.

use crate::geometry::distance;
use crate::landmark::{index, HandLandmarks};

/// Tip must clear the PIP by 15 %, so a naturally lifted pinky does not
/// turn a "3" into a "4".
pub const STRICT_EXTENSION_MARGIN: f32 = 1.15;

/// Plain tip-beyond-PIP test.
pub const LOOSE_EXTENSION_MARGIN: f32 = 1.0;

/// Thumb tip to index MCP distance above which the thumb counts as out.
pub const THUMB_EXTENDED_THRESHOLD: f32 = 0.08;

/// Tip may sit at most 10 % beyond the PIP for the finger to count as curled.
pub const FIST_CURL_MARGIN: f32 = 1.1;

/// Thumb-to-fingertip gap for a precise two-finger pinch.
pub const FINE_PINCH_THRESHOLD: f32 = 0.05;

/// Looser gap used when three fingers must meet, or for scene navigation.
pub const COARSE_PINCH_THRESHOLD: f32 = 0.08;

// ════════════════════════════════════════════════════════════════════════════
// Finger topology
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    /// The four fingers judged by the tip-vs-PIP rule.
    pub const NON_THUMB: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    pub fn tip(self) -> usize {
        match self {
            Finger::Thumb  => index::THUMB_TIP,
            Finger::Index  => index::INDEX_TIP,
            Finger::Middle => index::MIDDLE_TIP,
            Finger::Ring   => index::RING_TIP,
            Finger::Pinky  => index::PINKY_TIP,
        }
    }

    /// PIP joint (IP joint for the thumb).
    pub fn pip(self) -> usize {
        match self {
            Finger::Thumb  => index::THUMB_IP,
            Finger::Index  => index::INDEX_PIP,
            Finger::Middle => index::MIDDLE_PIP,
            Finger::Ring   => index::RING_PIP,
            Finger::Pinky  => index::PINKY_PIP,
        }
    }

    pub fn mcp(self) -> usize {
        match self {
            Finger::Thumb  => index::THUMB_MCP,
            Finger::Index  => index::INDEX_MCP,
            Finger::Middle => index::MIDDLE_MCP,
            Finger::Ring   => index::RING_MCP,
            Finger::Pinky  => index::PINKY_MCP,
        }
    }
}

/// Which fingers of a hand are extended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FingerPattern {
    pub thumb:  bool,
    pub index:  bool,
    pub middle: bool,
    pub ring:   bool,
    pub pinky:  bool,
}

impl FingerPattern {
    /// Extended non-thumb fingers, plus one if the thumb is out.
    pub fn count(&self) -> u8 {
        [self.index, self.middle, self.ring, self.pinky, self.thumb]
            .iter()
            .filter(|&&b| b)
            .count() as u8
    }

    /// The number 1–5 this exact pattern signs, if any.  Each number has
    /// exactly one pattern, so at most one can match.
    pub fn number(&self) -> Option<u8> {
        let FingerPattern { thumb, index, middle, ring, pinky } = *self;
        match (index, middle, ring, pinky, thumb) {
            (true, false, false, false, false) => Some(1),
            (true, true,  false, false, false) => Some(2),
            (true, true,  true,  false, false) => Some(3),
            (true, true,  true,  true,  false) => Some(4),
            (true, true,  true,  true,  true)  => Some(5),
            _ => None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Extension
// ════════════════════════════════════════════════════════════════════════════

/// Tip-to-wrist distance exceeds PIP-to-wrist distance × `margin`.
/// For the thumb this defers to [`is_thumb_extended`] and ignores `margin`.
pub fn is_extended<'a>(hand: impl Into<Option<&'a HandLandmarks>>, finger: Finger, margin: f32) -> bool {
    let Some(hand) = hand.into() else { return false };
    if finger == Finger::Thumb {
        return is_thumb_extended(hand);
    }
    let wrist = hand.wrist();
    distance(hand.point(finger.tip()), wrist) > distance(hand.point(finger.pip()), wrist) * margin
}

pub fn is_thumb_extended<'a>(hand: impl Into<Option<&'a HandLandmarks>>) -> bool {
    let Some(hand) = hand.into() else { return false };
    distance(hand.point(index::THUMB_TIP), hand.point(index::INDEX_MCP)) > THUMB_EXTENDED_THRESHOLD
}

pub fn finger_pattern<'a>(hand: impl Into<Option<&'a HandLandmarks>>, margin: f32) -> FingerPattern {
    let Some(hand) = hand.into() else { return FingerPattern::default() };
    FingerPattern {
        thumb:  is_thumb_extended(hand),
        index:  is_extended(hand, Finger::Index,  margin),
        middle: is_extended(hand, Finger::Middle, margin),
        ring:   is_extended(hand, Finger::Ring,   margin),
        pinky:  is_extended(hand, Finger::Pinky,  margin),
    }
}

/// 0–5: the four non-thumb extension tests, plus the thumb only when it is
/// out.  "Four fingers, thumb tucked" therefore counts 4 and an open hand 5.
pub fn count_extended_fingers<'a>(hand: impl Into<Option<&'a HandLandmarks>>, margin: f32) -> u8 {
    finger_pattern(hand, margin).count()
}

/// The exact number sign shown at `margin`, if any.
pub fn shown_number<'a>(hand: impl Into<Option<&'a HandLandmarks>>, margin: f32) -> Option<u8> {
    let hand = hand.into()?;
    finger_pattern(hand, margin).number()
}

/// Exact-match sign test at the strict margin.  Partial patterns (three
/// fingers while attempting two, a stray thumb) match no number at all.
pub fn is_showing_number<'a>(hand: impl Into<Option<&'a HandLandmarks>>, n: u8) -> bool {
    (1..=5).contains(&n) && shown_number(hand, STRICT_EXTENSION_MARGIN) == Some(n)
}

// ════════════════════════════════════════════════════════════════════════════
// Pinch
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinchKind {
    /// Thumb + index.
    TwoFinger,
    /// Thumb + index + middle.
    ThreeFinger,
}

/// Thumb tip within `threshold` of `finger`'s tip.
pub fn is_pinch<'a>(hand: impl Into<Option<&'a HandLandmarks>>, finger: Finger, threshold: f32) -> bool {
    let Some(hand) = hand.into() else { return false };
    if finger == Finger::Thumb {
        return false;
    }
    distance(hand.point(index::THUMB_TIP), hand.point(finger.tip())) < threshold
}

/// Three-finger wins when both the index and middle tips meet the thumb.
pub fn pinch_kind<'a>(hand: impl Into<Option<&'a HandLandmarks>>, threshold: f32) -> Option<PinchKind> {
    let hand = hand.into()?;
    match (is_pinch(hand, Finger::Index, threshold), is_pinch(hand, Finger::Middle, threshold)) {
        (true, true)  => Some(PinchKind::ThreeFinger),
        (true, false) => Some(PinchKind::TwoFinger),
        _ => None,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Fist / open palm
// ════════════════════════════════════════════════════════════════════════════

/// All four non-thumb fingers curled: tip no farther from the wrist than
/// the PIP × [`FIST_CURL_MARGIN`].  A majority is not enough.
pub fn is_fist<'a>(hand: impl Into<Option<&'a HandLandmarks>>) -> bool {
    let Some(hand) = hand.into() else { return false };
    let wrist = hand.wrist();
    Finger::NON_THUMB.iter().all(|f| {
        distance(hand.point(f.tip()), wrist) <= distance(hand.point(f.pip()), wrist) * FIST_CURL_MARGIN
    })
}

/// At least three of four non-thumb fingers past their PIP (no margin),
/// and not a fist.  Only used to dismiss the media viewer, so it is looser
/// than the number signs.
pub fn is_open_palm<'a>(hand: impl Into<Option<&'a HandLandmarks>>) -> bool {
    let Some(hand) = hand.into() else { return false };
    let extended = Finger::NON_THUMB
        .iter()
        .filter(|&&f| is_extended(hand, f, LOOSE_EXTENSION_MARGIN))
        .count();
    // Tips in (pip, 1.1 × pip] satisfy both raw rules; the fist reading wins.
    extended >= 3 && !is_fist(hand)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{Landmark, LANDMARK_COUNT};
    use crate::pose::{HandPose, PoseBuilder};

    fn pose(p: HandPose) -> HandLandmarks {
        PoseBuilder::new(0.5, 0.6).build(p)
    }

    fn all_poses() -> Vec<HandLandmarks> {
        let mut v: Vec<_> = (1..=5).map(|n| pose(HandPose::Number(n))).collect();
        v.push(pose(HandPose::Fist));
        v.push(pose(HandPose::OpenPalm));
        v.push(pose(HandPose::Pinch));
        v.push(pose(HandPose::ThreeFingerPinch));
        v
    }

    /// Wrist at the origin, every finger tip at `ratio` × its PIP distance.
    fn uniform_ratio_hand(ratio: f32) -> HandLandmarks {
        let mut pts = [Landmark::new(0.0, 0.0, 0.0); LANDMARK_COUNT];
        for (i, f) in Finger::NON_THUMB.iter().enumerate() {
            let x = i as f32 * 0.02;
            pts[f.mcp()] = Landmark::new(x, -0.10, 0.0);
            pts[f.pip()] = Landmark::new(x, -0.14, 0.0);
            pts[f.tip()] = Landmark::new(x * ratio, -0.14 * ratio, 0.0);
        }
        pts[index::THUMB_TIP] = Landmark::new(-0.03, -0.10, 0.0);
        HandLandmarks::from_points(&pts).unwrap()
    }

    #[test]
    fn numbers_are_recognised() {
        for n in 1..=5 {
            let hand = pose(HandPose::Number(n));
            assert!(is_showing_number(&hand, n), "pose {} not recognised", n);
        }
    }

    #[test]
    fn number_signs_are_mutually_exclusive() {
        for hand in all_poses() {
            let matches: Vec<u8> = (1..=5).filter(|&n| is_showing_number(&hand, n)).collect();
            assert!(matches.len() <= 1, "matched {:?}", matches);
        }
    }

    #[test]
    fn partial_pattern_matches_nothing() {
        // index + middle + pinky: neither 2 nor 3
        let mut pts = *pose(HandPose::Number(2)).points();
        let four = pose(HandPose::Number(4));
        for i in [index::PINKY_PIP, index::PINKY_DIP, index::PINKY_TIP] {
            pts[i] = *four.point(i);
        }
        let hand = HandLandmarks::from_points(&pts).unwrap();
        assert!((1..=5).all(|n| !is_showing_number(&hand, n)));
    }

    #[test]
    fn out_of_range_number_is_false() {
        let hand = pose(HandPose::Number(1));
        assert!(!is_showing_number(&hand, 0));
        assert!(!is_showing_number(&hand, 6));
    }

    #[test]
    fn thumb_changes_four_into_five() {
        assert_eq!(count_extended_fingers(&pose(HandPose::Number(4)), STRICT_EXTENSION_MARGIN), 4);
        assert_eq!(count_extended_fingers(&pose(HandPose::Number(5)), STRICT_EXTENSION_MARGIN), 5);
        assert!(!is_thumb_extended(&pose(HandPose::Number(4))));
        assert!(is_thumb_extended(&pose(HandPose::Number(5))));
    }

    #[test]
    fn margin_decides_borderline_extension() {
        let hand = uniform_ratio_hand(1.08);
        assert!(is_extended(&hand, Finger::Index, LOOSE_EXTENSION_MARGIN));
        assert!(!is_extended(&hand, Finger::Index, STRICT_EXTENSION_MARGIN));
    }

    #[test]
    fn fist_requires_all_four_fingers() {
        assert!(is_fist(&pose(HandPose::Fist)));
        // index out, three curled: not a fist
        assert!(!is_fist(&pose(HandPose::Number(1))));
    }

    #[test]
    fn open_palm_needs_three_fingers() {
        assert!(is_open_palm(&pose(HandPose::OpenPalm)));
        assert!(is_open_palm(&pose(HandPose::Number(3))));
        assert!(!is_open_palm(&pose(HandPose::Number(2))));
        assert!(!is_open_palm(&pose(HandPose::Fist)));
    }

    #[test]
    fn fist_and_open_palm_never_coincide() {
        for ratio in [0.5, 0.9, 1.0, 1.02, 1.05, 1.1, 1.12, 1.3] {
            let hand = uniform_ratio_hand(ratio);
            assert!(!(is_fist(&hand) && is_open_palm(&hand)), "ratio {}", ratio);
        }
        for hand in all_poses() {
            assert!(!(is_fist(&hand) && is_open_palm(&hand)));
        }
    }

    #[test]
    fn pinch_kinds() {
        assert_eq!(pinch_kind(&pose(HandPose::Pinch), FINE_PINCH_THRESHOLD), Some(PinchKind::TwoFinger));
        assert_eq!(
            pinch_kind(&pose(HandPose::ThreeFingerPinch), FINE_PINCH_THRESHOLD),
            Some(PinchKind::ThreeFinger),
        );
        assert_eq!(pinch_kind(&pose(HandPose::OpenPalm), COARSE_PINCH_THRESHOLD), None);
    }

    #[test]
    fn number_poses_do_not_pinch() {
        for n in 1..=5 {
            assert!(!is_pinch(&pose(HandPose::Number(n)), Finger::Index, COARSE_PINCH_THRESHOLD), "{}", n);
        }
        assert!(!is_pinch(&pose(HandPose::Fist), Finger::Index, COARSE_PINCH_THRESHOLD));
    }

    #[test]
    fn absent_hand_is_never_a_gesture() {
        let none: Option<&HandLandmarks> = None;
        assert!(!is_fist(none));
        assert!(!is_open_palm(none));
        assert!(!is_showing_number(none, 1));
        assert!(!is_pinch(none, Finger::Index, 1.0));
        assert_eq!(pinch_kind(none, 1.0), None);
        assert_eq!(count_extended_fingers(none, 1.0), 0);
    }
}
