//! # hand_sign
//!
//! The per-frame hand data model and the stateless gesture classifiers that
//! sit underneath the installation's interaction core.
//!
//! * [`landmark`]: the 21-point hand topology, [`HandLandmarks`],
//!   mirrored tracker labels and the [`HandFrame`] delivered by the tracker.
//! * [`geometry`]: landmark distance and the mapping from normalized
//!   landmark coordinates into interaction space.
//! * [`classify`]: finger extension, numeric signs 1–5, pinch, fist and
//!   open-palm predicates.  Pure functions; no memory of previous frames.
//! * [`pose`]: synthetic hands for the keyboard simulator and for tests.
//!
//! ## Quick start
//!
//! ```rust
//! use hand_sign::{classify, pose::{HandPose, PoseBuilder}};
//!
//! let hand = PoseBuilder::new(0.3, 0.5).build(HandPose::Number(2));
//! assert!(classify::is_showing_number(&hand, 2));
//! assert!(!classify::is_showing_number(&hand, 3));
//! assert!(!classify::is_fist(None::<&hand_sign::HandLandmarks>));
//! ```

pub mod landmark;
pub mod geometry;
pub mod classify;
pub mod pose;

pub use landmark::{
    HandFrame, HandLandmarks, HandPair, HandSignError, Landmark, Side, TrackedHand, TrackerLabel,
    LANDMARK_COUNT, MAX_HANDS,
};
pub use geometry::{distance, InteractionSpace};
pub use classify::{Finger, FingerPattern, PinchKind};
