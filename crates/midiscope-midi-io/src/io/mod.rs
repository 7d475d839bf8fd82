//! Hardware MIDI input.
//!
//! Device enumeration and connection via midir.
//! Requires the `midi-io` feature.

mod input;

pub use input::MidiInputDevice;
pub(crate) use input::MidiInputManager;
