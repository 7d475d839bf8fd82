//! Centralized error type for the midiscope umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Malformed(#[from] midiscope_midi::MalformedMessage),

    #[cfg(feature = "io")]
    #[error("MIDI: {0}")]
    Midi(#[from] midiscope_midi_io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
