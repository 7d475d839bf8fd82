//! # midiscope - MIDI Monitor
//!
//! Decodes the raw bytes a MIDI port delivers into readable events: notes,
//! controller changes, pitch bend and system messages.
//!
//! ## Architecture
//!
//! midiscope is an umbrella crate that coordinates:
//! - **midiscope-midi** - Decoder (status classification, lookup tables, rendering)
//! - **midiscope-midi-io** - Input monitor (port selection, channel delivery)
//!
//! ## Quick Start
//!
//! ```
//! use midiscope::prelude::*;
//!
//! let msg = decode(&RawEvent::new(0.0, &[0xB0, 0x40, 0x7F]))?;
//! assert_eq!(msg.label, "Control Change");
//! assert_eq!(msg.detail.as_deref(), Some("Sustain On"));
//! # Ok::<(), midiscope::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `default` - Decoder plus input monitor
//! - `io` - Input monitor
//! - `midi-hardware` - Hardware input through midir

/// Re-export of midiscope-midi for direct access
pub use midiscope_midi as midi;

pub use midiscope_midi::{
    controller, decode, decode_bytes, note_name, octave, system_message_name,
    ControllerDescriptor, DecodedMessage, MalformedMessage, MessageKind, NoteLabel, RawEvent,
    Status, NOTE_NAMES, PITCH_BEND_CENTER, SYSTEM_MESSAGE_NAMES,
};

/// Re-export of midiscope-midi-io for direct access
#[cfg(feature = "io")]
pub use midiscope_midi_io as io;

#[cfg(feature = "io")]
pub use midiscope_midi_io::{DecodeSink, MidiMonitor, MonitorBuilder, SinkStats};

#[cfg(feature = "midi-hardware")]
pub use midiscope_midi_io::MidiInputDevice;

mod error;
pub use error::{Error, Result};

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{decode, DecodedMessage, MessageKind, RawEvent};
    pub use crate::{Error, Result};

    #[cfg(feature = "io")]
    pub use crate::{MidiMonitor, MonitorBuilder};
}
