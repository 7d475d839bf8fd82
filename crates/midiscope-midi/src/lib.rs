//! MIDI message decoder for midiscope.
//!
//! Turns the raw `(timestamp, bytes)` events a MIDI port delivers into typed,
//! human-readable [`DecodedMessage`]s.
//!
//! # Example
//!
//! ```
//! use midiscope_midi::{decode, MessageKind, RawEvent};
//!
//! let msg = decode(&RawEvent::new(0.0, &[0x90, 0x3C, 0x40])).unwrap();
//! assert_eq!(msg.kind, MessageKind::NoteOn);
//! assert_eq!(msg.channel, Some(1));
//! assert_eq!(msg.detail.as_deref(), Some("C3 64"));
//! ```

pub mod error;
pub use error::{MalformedMessage, Result};

pub mod decoder;
pub use decoder::{decode, decode_bytes, PITCH_BEND_CENTER};

pub mod kind;
pub use kind::{MessageKind, Status};

pub mod message;
pub use message::{DecodedMessage, RawEvent};

pub mod note;
pub use note::{note_name, octave, NoteLabel, NOTE_NAMES};

pub mod tables;
pub use tables::{controller, system_message_name, ControllerDescriptor, SYSTEM_MESSAGE_NAMES};

#[cfg(test)]
mod serde_tests {
    use super::*;

    #[test]
    fn test_decoded_message_bincode_roundtrip() {
        let msg = decode(&RawEvent::new(42.0, &[0xB0, 0x40, 0x7F])).unwrap();
        let bytes = bincode::serialize(&msg).unwrap();
        let back: DecodedMessage = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_raw_event_bincode_roundtrip() {
        let event = RawEvent::new(7.0, &[0xF0, 0x01, 0x02, 0xF7]);
        let bytes = bincode::serialize(&event).unwrap();
        let back: RawEvent = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back, event);
    }
}
