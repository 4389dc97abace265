//! Media Engine - playback engine for Auralis
//!
//! The engine owns the transport state of a single track on top of an
//! [`AudioBackend`]. Hosts feed backend notifications in through
//! [`PlaybackEngine::handle_event`], call [`PlaybackEngine::tick`] once a
//! second while [`PlaybackEngine::sleep_ticker_armed`] holds, and forward
//! the returned [`EngineEvent`]s to whoever owns the library.

mod backend;
mod engine;
mod error;
mod events;
mod sleep_timer;
mod state;
mod volume;

pub use auralis_core::{PlaybackSpeed, PlayerState};
pub use backend::{AudioBackend, SimulatedBackend};
pub use engine::PlaybackEngine;
pub use error::{EngineError, EngineResult, MediaErrorCode, PlaybackFault};
pub use events::{EngineEvent, MediaEvent};
pub use sleep_timer::SleepTimer;
pub use state::{Controls, TransportState};
pub use volume::VolumeControl;
