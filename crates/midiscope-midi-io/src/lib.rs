//! MIDI input monitor for midiscope.
//!
//! Selects an input port, decodes every message it delivers, and hands the
//! decoded messages to a consumer over a bounded channel.
//!
//! Feature gates: `midi-io` (hardware input via midir).

pub mod error;
pub use error::{Error, Result};

mod monitor;
pub use monitor::{MidiMonitor, MonitorBuilder, DEFAULT_CAPACITY, DEFAULT_CLIENT_NAME};

pub mod sink;
pub use sink::{DecodeSink, SinkStats};

#[cfg(feature = "midi-io")]
pub(crate) mod io;

#[cfg(feature = "midi-io")]
pub use io::MidiInputDevice;

pub use midiscope_midi::{DecodedMessage, MalformedMessage, MessageKind, RawEvent};
