//! # particle_stage
//!
//! The installation host: a software-rendered stage window that feeds hand
//! tracking frames into the interaction core and draws what it does to the
//! scene, with MIDI chimes as feedback.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Hand | Action |
//! |---|---|---|
//! | Left "1" + right 1–3 fingers, held | Both | Select particle text 1–3 |
//! | Left "1" + right 4 fingers, held | Both | Enter the cherry-blossom 3D scene |
//! | Thumb + index pinch, drag | Left | Drag the particle text |
//! | Thumb + index + middle pinch, drag | Left | Rotate the particle text |
//! | Pinch both hands, pull apart | Both | Scale the particle text |
//! | Three-finger pinch, drag | Left | Look around (3D scenes) |
//! | Three-finger pinch, drag | Right | Move (3D scenes) |
//! | Pinch both hands, pull apart | Both | Move forward / back (3D scenes) |
//! | Fist or pinch near a gift, held | Right | Open the gift (Christmas forest) |
//! | Fist on a photo, held | Right | Open it in the viewer (tree scenes) |
//! | Open palm | Right | Close the viewer |
//!
//! Typing `merrychristmas` toggles the Christmas forest; once every gift
//! is open, `aurora` and `tree` toggle the two tree scenes.
//!
//! ## Frame sources
//!
//! * (default) **Simulation**: keyboard-driven hands.
//! * `--replay FILE`: a JSON-lines recording of tracker callbacks.
//! * `leap` feature: a LeapMotion controller via LeapC.
//!
//! ### Simulation keyboard shortcuts
//!
//! | Key | Effect |
//! |---|---|
//! | `1`–`5` / numpad `1`–`5` | Left / right hand shows that many fingers |
//! | `6` / numpad `6` | Fist |
//! | `7` / numpad `7` | Thumb + index pinch |
//! | `8` / numpad `8` | Three-finger pinch |
//! | `9` / numpad `9` | Open palm |
//! | `0` / numpad `0` | Hide the hand |
//! | Arrows | Move both hands (Shift: left only, Ctrl: right only) |
//! | `a`–`z` | Typed into the secret-phrase listener |
//! | `Escape` | Quit |

pub mod config;
pub mod source;
pub mod chime;
pub mod visualizer;
pub mod app;
