//! # gesture_core
//!
//! The stateful half of the interaction core: everything that needs to
//! remember earlier frames.
//!
//! * [`debounce`]: hold-to-confirm with reset on interrupt.
//! * [`lock`]: long-press target lock captured at gesture onset.
//! * [`tutorial`]: the 16-phase onboarding sequencer.
//! * [`arbitrator`]: per-frame mode switching and scene dispatch, owner of
//!   the [`GestureSession`].
//! * [`handlers`]: particle, free-look, gift and media step functions.
//! * [`interaction`]: [`InteractionCore`], the one object a host drives.
//!
//! ## Quick start
//!
//! ```rust
//! use gesture_core::{CoreConfig, InteractionCore, RecordingPresenter};
//! use hand_sign::HandFrame;
//! use scene_state::Stage;
//!
//! let mut config = CoreConfig::default();
//! config.tutorial.skip = true;
//! let mut core = InteractionCore::new(config, vec!["Hello".into()]);
//! let mut stage = Stage::new();
//! let mut screen = RecordingPresenter::default();
//!
//! core.start(0, &mut stage, &mut screen);
//! assert_eq!(screen.text, "Hello");
//!
//! let report = core.on_tracking(&HandFrame::empty(), &mut stage, &mut screen, 33);
//! assert!(!report.unwrap().is_interacting());
//! ```

pub mod config;
pub mod debounce;
pub mod lock;
pub mod present;
pub mod tutorial;
pub mod handlers;
pub mod arbitrator;
pub mod interaction;

pub use arbitrator::{Arbitrator, FrameReport, GestureSession, SwitchState, SwitchTarget};
pub use config::{ArbiterConfig, CoreConfig, GiftConfig, MediaConfig, TutorialConfig};
pub use interaction::InteractionCore;
pub use debounce::Debouncer;
pub use lock::InteractionLock;
pub use present::{Presented, Presenter, RecordingPresenter};
pub use tutorial::{TutorialSequencer, TutorialSignal, TutorialWait};
