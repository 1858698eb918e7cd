//! Synthetic hand poses.
//!
//! The keyboard simulator and the test suites both need hands that the
//! classifiers read unambiguously.  Each pose is laid out in a hand-local
//! frame (wrist at the origin, fingers pointing toward −y as in the image)
//! and then placed at an image position.

use crate::landmark::{index, HandLandmarks, Landmark, LANDMARK_COUNT};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandPose {
    /// All fingers extended, thumb out.
    OpenPalm,
    /// All fingers curled, thumb tucked.
    Fist,
    /// Numeric sign 1–5.  Values outside that range produce a fist.
    Number(u8),
    /// Thumb meets a hooked index finger, middle finger up.
    Pinch,
    /// Thumb, index and middle tips together, ring and pinky up.
    ThreeFingerPinch,
}

// ── hand-local layout ───────────────────────────────────────────────────────

type Offset = (f32, f32);

/// MCP joints of index, middle, ring, pinky.
const MCP: [Offset; 4] = [(-0.03, -0.10), (-0.01, -0.105), (0.01, -0.10), (0.03, -0.09)];

/// PIP, DIP, TIP relative to the MCP.
const EXTENDED: [Offset; 3] = [(0.0, -0.04), (0.0, -0.065), (0.0, -0.09)];
const CURLED:   [Offset; 3] = [(0.0, -0.03), (0.0, -0.01), (0.0, 0.04)];

const THUMB_CMC: Offset = (-0.03, -0.02);
/// MCP, IP, TIP.
const THUMB_OUT:    [Offset; 3] = [(-0.07, -0.04), (-0.105, -0.05), (-0.14, -0.06)];
const THUMB_TUCKED: [Offset; 3] = [(-0.06, -0.05), (-0.08, -0.09), (-0.095, -0.125)];

/// Absolute PIP, DIP, TIP for fingers bent over to meet the thumb.
const PINCH_INDEX:        [Offset; 3] = [(-0.04, -0.16), (-0.07, -0.16), (-0.09, -0.13)];
const PINCH_THUMB:        [Offset; 3] = [(-0.065, -0.05), (-0.09, -0.09), (-0.095, -0.135)];
const THREE_PINCH_INDEX:  [Offset; 3] = [(-0.04, -0.16), (-0.06, -0.165), (-0.07, -0.14)];
const THREE_PINCH_MIDDLE: [Offset; 3] = [(-0.02, -0.165), (-0.045, -0.17), (-0.06, -0.14)];
const THREE_PINCH_THUMB:  [Offset; 3] = [(-0.05, -0.05), (-0.06, -0.09), (-0.065, -0.135)];

#[derive(Clone, Copy)]
enum Shape {
    Extended,
    Curled,
    Fixed([Offset; 3]),
}

/// Places poses in normalized image space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseBuilder {
    wrist_x: f32,
    wrist_y: f32,
    mirror:  bool,
}

impl PoseBuilder {
    /// Wrist at (`x`, `y`).  Non-finite input falls back to the image centre.
    pub fn new(x: f32, y: f32) -> Self {
        PoseBuilder {
            wrist_x: if x.is_finite() { x } else { 0.5 },
            wrist_y: if y.is_finite() { y } else { 0.5 },
            mirror:  false,
        }
    }

    /// Flip the layout horizontally (thumb on the other side).
    pub fn mirrored(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    pub fn build(&self, pose: HandPose) -> HandLandmarks {
        use Shape::*;
        let (fingers, thumb): ([Shape; 4], [Offset; 3]) = match pose {
            HandPose::OpenPalm | HandPose::Number(5) => ([Extended; 4], THUMB_OUT),
            HandPose::Number(4) => ([Extended, Extended, Extended, Extended], THUMB_TUCKED),
            HandPose::Number(3) => ([Extended, Extended, Extended, Curled], THUMB_TUCKED),
            HandPose::Number(2) => ([Extended, Extended, Curled, Curled], THUMB_TUCKED),
            HandPose::Number(1) => ([Extended, Curled, Curled, Curled], THUMB_TUCKED),
            HandPose::Fist | HandPose::Number(_) => ([Curled; 4], THUMB_TUCKED),
            HandPose::Pinch => (
                [Fixed(PINCH_INDEX), Extended, Curled, Curled],
                PINCH_THUMB,
            ),
            HandPose::ThreeFingerPinch => (
                [Fixed(THREE_PINCH_INDEX), Fixed(THREE_PINCH_MIDDLE), Extended, Extended],
                THREE_PINCH_THUMB,
            ),
        };

        let mut pts = [Landmark::default(); LANDMARK_COUNT];
        pts[index::WRIST]     = self.place((0.0, 0.0));
        pts[index::THUMB_CMC] = self.place(THUMB_CMC);
        for (j, off) in thumb.iter().enumerate() {
            pts[index::THUMB_MCP + j] = self.place(*off);
        }

        for (f, shape) in fingers.iter().enumerate() {
            let mcp_idx = index::INDEX_MCP + f * 4;
            let (mx, my) = MCP[f];
            pts[mcp_idx] = self.place(MCP[f]);
            for j in 0..3 {
                let off = match shape {
                    Extended => (mx + EXTENDED[j].0, my + EXTENDED[j].1),
                    Curled   => (mx + CURLED[j].0,   my + CURLED[j].1),
                    Fixed(a) => a[j],
                };
                pts[mcp_idx + 1 + j] = self.place(off);
            }
        }
        HandLandmarks::from_array(pts)
    }

    fn place(&self, (dx, dy): Offset) -> Landmark {
        let dx = if self.mirror { -dx } else { dx };
        Landmark::new(self.wrist_x + dx, self.wrist_y + dy, 0.0)
    }
}
