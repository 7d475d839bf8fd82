//! Decoder input and output records.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::kind::MessageKind;

/// Raw MIDI message as delivered by a port, before decoding.
///
/// Up to three bytes are stored inline; longer (system exclusive) messages
/// spill to the heap.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Arrival time, passed through to the decoded message untouched.
    pub timestamp: f64,
    pub bytes: SmallVec<[u8; 3]>,
}

impl RawEvent {
    #[inline]
    pub fn new(timestamp: f64, bytes: &[u8]) -> Self {
        Self {
            timestamp,
            bytes: SmallVec::from_slice(bytes),
        }
    }

    #[inline]
    pub fn status(&self) -> Option<u8> {
        self.bytes.first().copied()
    }

    /// Bytes following the status byte.
    #[inline]
    pub fn data(&self) -> &[u8] {
        self.bytes.get(1..).unwrap_or(&[])
    }
}

/// Semantically interpreted MIDI message, ready for display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecodedMessage {
    pub timestamp: f64,
    pub kind: MessageKind,
    /// 1-16 for channel voice messages, `None` for system messages.
    pub channel: Option<u8>,
    pub label: String,
    pub detail: Option<String>,
    /// Velocity byte of Note On / Note Off messages.
    pub velocity: Option<u8>,
}

impl DecodedMessage {
    /// Note Off, or Note On at velocity zero.
    #[inline]
    pub fn is_note_off(&self) -> bool {
        match self.kind {
            MessageKind::NoteOff => true,
            MessageKind::NoteOn => self.velocity == Some(0),
            _ => false,
        }
    }
}

/// Renders the four monitor columns: timestamp, message, channel, data.
///
/// Columns are tab separated; absent channel or detail leaves its column empty.
impl fmt::Display for DecodedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}\t{}\t", self.timestamp, self.label)?;
        if let Some(channel) = self.channel {
            write!(f, "{channel}")?;
        }
        f.write_str("\t")?;
        if let Some(detail) = &self.detail {
            f.write_str(detail)?;
        }
        Ok(())
    }
}
