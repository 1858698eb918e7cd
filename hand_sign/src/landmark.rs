//! Hand landmark data model.
//!
//! A tracked hand is 21 normalized 3-D points in a fixed anatomical order
//! (0 = wrist, 4 = thumb tip, 8 = index tip, …).  The tracker labels each
//! hand as it appears in the *mirrored* camera image, so its "Left" is the
//! user's physical right hand.  [`TrackerLabel::physical`] is the only place
//! that mirror is applied; everything above this module speaks in [`Side`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

/// The tracker never reports more than two hands.
pub const MAX_HANDS: usize = 2;

/// Landmark indices of the 21-point hand topology.
pub mod index {
    pub const WRIST:      usize = 0;
    pub const THUMB_CMC:  usize = 1;
    pub const THUMB_MCP:  usize = 2;
    pub const THUMB_IP:   usize = 3;
    pub const THUMB_TIP:  usize = 4;
    pub const INDEX_MCP:  usize = 5;
    pub const INDEX_PIP:  usize = 6;
    pub const INDEX_DIP:  usize = 7;
    pub const INDEX_TIP:  usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP:   usize = 13;
    pub const RING_PIP:   usize = 14;
    pub const RING_DIP:   usize = 15;
    pub const RING_TIP:   usize = 16;
    pub const PINKY_MCP:  usize = 17;
    pub const PINKY_PIP:  usize = 18;
    pub const PINKY_DIP:  usize = 19;
    pub const PINKY_TIP:  usize = 20;
}

// ════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HandSignError {
    #[error("expected 21 landmarks, got {0}")]
    LandmarkCount(usize),

    #[error("landmark {index} has a non-finite coordinate")]
    NonFinite { index: usize },

    #[error("a frame carries at most 2 hands, got {0}")]
    TooManyHands(usize),

    #[error("{landmarks} landmark sets but {labels} handedness labels")]
    LabelMismatch { landmarks: usize, labels: usize },
}

// ════════════════════════════════════════════════════════════════════════════
// Landmark
// ════════════════════════════════════════════════════════════════════════════

/// One normalized landmark.  `x`/`y` are 0..1 image coordinates, `z` is
/// depth relative to the wrist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Landmark { x, y, z }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandLandmarks
// ════════════════════════════════════════════════════════════════════════════

/// The full landmark set of one hand.  Always exactly 21 finite points:
/// malformed input is rejected at construction so no classifier ever
/// indexes a missing joint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Landmark>", into = "Vec<Landmark>")]
pub struct HandLandmarks {
    points: [Landmark; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn from_points(points: &[Landmark]) -> Result<Self, HandSignError> {
        if points.len() != LANDMARK_COUNT {
            return Err(HandSignError::LandmarkCount(points.len()));
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(HandSignError::NonFinite { index });
        }
        let mut out = [Landmark::default(); LANDMARK_COUNT];
        out.copy_from_slice(points);
        Ok(HandLandmarks { points: out })
    }

    /// Callers inside the crate guarantee finiteness.
    pub(crate) fn from_array(points: [Landmark; LANDMARK_COUNT]) -> Self {
        debug_assert!(points.iter().all(Landmark::is_finite));
        HandLandmarks { points }
    }

    pub fn point(&self, idx: usize) -> &Landmark {
        &self.points[idx]
    }

    pub fn wrist(&self) -> &Landmark {
        &self.points[index::WRIST]
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }

    /// Shift every point by the same offset (used by the simulator).
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        let mut points = self.points;
        for p in &mut points {
            p.x += dx;
            p.y += dy;
        }
        HandLandmarks { points }
    }
}

impl TryFrom<Vec<Landmark>> for HandLandmarks {
    type Error = HandSignError;

    fn try_from(points: Vec<Landmark>) -> Result<Self, Self::Error> {
        HandLandmarks::from_points(&points)
    }
}

impl From<HandLandmarks> for Vec<Landmark> {
    fn from(hand: HandLandmarks) -> Self {
        hand.points.to_vec()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Handedness
// ════════════════════════════════════════════════════════════════════════════

/// Handedness exactly as the tracker reports it (mirrored image).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackerLabel {
    Left,
    Right,
}

/// The user's physical hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl TrackerLabel {
    /// Undo the camera mirror: the tracker's "Left" is the physical right.
    pub fn physical(self) -> Side {
        match self {
            TrackerLabel::Left  => Side::Right,
            TrackerLabel::Right => Side::Left,
        }
    }

    /// The label the tracker would report for a physical hand.
    pub fn for_side(side: Side) -> Self {
        match side {
            Side::Left  => TrackerLabel::Right,
            Side::Right => TrackerLabel::Left,
        }
    }
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left  => "left",
            Side::Right => "right",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandFrame
// ════════════════════════════════════════════════════════════════════════════

/// One hand as delivered by the tracker.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackedHand {
    pub landmarks: HandLandmarks,
    pub label:     TrackerLabel,
}

impl TrackedHand {
    pub fn new(landmarks: HandLandmarks, label: TrackerLabel) -> Self {
        TrackedHand { landmarks, label }
    }

    /// Build from a physical side, applying the mirror in reverse.
    pub fn physical(landmarks: HandLandmarks, side: Side) -> Self {
        TrackedHand { landmarks, label: TrackerLabel::for_side(side) }
    }

    pub fn side(&self) -> Side {
        self.label.physical()
    }
}

/// One tracking callback's worth of hands (0, 1 or 2).  Produced fresh per
/// callback and never persisted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandFrame {
    hands: Vec<TrackedHand>,
}

/// Both physical hands of a frame, either possibly absent.
#[derive(Clone, Copy, Debug, Default)]
pub struct HandPair<'a> {
    pub left:  Option<&'a HandLandmarks>,
    pub right: Option<&'a HandLandmarks>,
}

impl<'a> HandPair<'a> {
    pub fn get(&self, side: Side) -> Option<&'a HandLandmarks> {
        match side {
            Side::Left  => self.left,
            Side::Right => self.right,
        }
    }

    pub fn both(&self) -> Option<(&'a HandLandmarks, &'a HandLandmarks)> {
        Some((self.left?, self.right?))
    }
}

impl HandFrame {
    pub fn new(hands: Vec<TrackedHand>) -> Result<Self, HandSignError> {
        if hands.len() > MAX_HANDS {
            return Err(HandSignError::TooManyHands(hands.len()));
        }
        Ok(HandFrame { hands })
    }

    pub fn empty() -> Self {
        HandFrame::default()
    }

    /// Assemble a frame from the tracker's two parallel arrays.
    pub fn from_parallel(
        landmarks: Vec<HandLandmarks>,
        labels:    Vec<TrackerLabel>,
    ) -> Result<Self, HandSignError> {
        if landmarks.len() != labels.len() {
            return Err(HandSignError::LabelMismatch {
                landmarks: landmarks.len(),
                labels:    labels.len(),
            });
        }
        HandFrame::new(
            landmarks.into_iter().zip(labels).map(|(l, t)| TrackedHand::new(l, t)).collect(),
        )
    }

    pub fn hands(&self) -> &[TrackedHand] {
        &self.hands
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    /// The first hand whose mirrored label resolves to `side`.
    pub fn hand(&self, side: Side) -> Option<&HandLandmarks> {
        self.hands.iter().find(|h| h.side() == side).map(|h| &h.landmarks)
    }

    pub fn pair(&self) -> HandPair<'_> {
        HandPair {
            left:  self.hand(Side::Left),
            right: self.hand(Side::Right),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_hand(x: f32) -> HandLandmarks {
        HandLandmarks::from_points(&[Landmark::new(x, 0.5, 0.0); LANDMARK_COUNT]).unwrap()
    }

    #[test]
    fn tracker_left_is_physical_right() {
        assert_eq!(TrackerLabel::Left.physical(),  Side::Right);
        assert_eq!(TrackerLabel::Right.physical(), Side::Left);
        assert_eq!(TrackerLabel::for_side(Side::Left), TrackerLabel::Right);
    }

    #[test]
    fn frame_lookup_applies_mirror() {
        let frame = HandFrame::new(vec![
            TrackedHand::new(flat_hand(0.2), TrackerLabel::Left),
            TrackedHand::new(flat_hand(0.8), TrackerLabel::Right),
        ]).unwrap();
        let pair = frame.pair();
        assert_eq!(pair.right.unwrap().wrist().x, 0.2);
        assert_eq!(pair.left.unwrap().wrist().x,  0.8);
    }

    #[test]
    fn wrong_landmark_count_rejected() {
        let err = HandLandmarks::from_points(&[Landmark::default(); 20]).unwrap_err();
        assert_eq!(err, HandSignError::LandmarkCount(20));
    }

    #[test]
    fn non_finite_landmark_rejected() {
        let mut pts = [Landmark::default(); LANDMARK_COUNT];
        pts[7].y = f32::NAN;
        assert_eq!(
            HandLandmarks::from_points(&pts).unwrap_err(),
            HandSignError::NonFinite { index: 7 },
        );
    }

    #[test]
    fn three_hands_rejected() {
        let h = TrackedHand::new(flat_hand(0.5), TrackerLabel::Left);
        let err = HandFrame::new(vec![h.clone(), h.clone(), h]).unwrap_err();
        assert_eq!(err, HandSignError::TooManyHands(3));
    }

    #[test]
    fn parallel_arrays_must_match() {
        let err = HandFrame::from_parallel(vec![flat_hand(0.5)], vec![]).unwrap_err();
        assert!(matches!(err, HandSignError::LabelMismatch { landmarks: 1, labels: 0 }));
    }

    #[test]
    fn empty_frame_has_no_hands() {
        let frame = HandFrame::empty();
        assert!(frame.is_empty());
        assert!(frame.pair().both().is_none());
    }
}
