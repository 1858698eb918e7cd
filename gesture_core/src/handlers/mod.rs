//! Per-scene gesture handlers.
//!
//! Each handler is a pure step function: previous state plus this frame's
//! hands in, next state plus requested changes out.  Only the arbitrator
//! stores the results.

pub mod particles;
pub mod free_look;
pub mod gifts;
pub mod media;
