//! Status byte classification.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{MalformedMessage, Result};

/// MIDI message kind, tagged by the status nibble with the high bit masked off.
///
/// `0..=6` are channel voice messages (status `0x80..=0xEF`); `System` covers
/// every status byte from `0xF0` upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MessageKind {
    NoteOff = 0,
    NoteOn = 1,
    PolyPressure = 2,
    ControlChange = 3,
    ProgramChange = 4,
    ChannelPressure = 5,
    PitchBend = 6,
    System = 7,
}

impl MessageKind {
    pub const ALL: [MessageKind; 8] = [
        MessageKind::NoteOff,
        MessageKind::NoteOn,
        MessageKind::PolyPressure,
        MessageKind::ControlChange,
        MessageKind::ProgramChange,
        MessageKind::ChannelPressure,
        MessageKind::PitchBend,
        MessageKind::System,
    ];

    /// Kind for a masked status nibble (`(status >> 4) & 0x7`).
    #[inline]
    pub fn from_nibble(nibble: u8) -> Option<Self> {
        Self::ALL.get(nibble as usize).copied()
    }

    #[inline]
    pub fn is_channel_voice(self) -> bool {
        self != MessageKind::System
    }

    /// Number of data bytes a channel voice message of this kind carries.
    ///
    /// `None` for system messages, whose length depends on the low nibble.
    #[inline]
    pub fn data_len(self) -> Option<usize> {
        match self {
            MessageKind::ProgramChange | MessageKind::ChannelPressure => Some(1),
            MessageKind::System => None,
            _ => Some(2),
        }
    }

    /// Generic human-readable name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            MessageKind::NoteOff => "Note Off",
            MessageKind::NoteOn => "Note On",
            MessageKind::PolyPressure => "Poly Pressure",
            MessageKind::ControlChange => "Control Change",
            MessageKind::ProgramChange => "Program Change",
            MessageKind::ChannelPressure => "Channel Pressure",
            MessageKind::PitchBend => "Pitch Bend",
            MessageKind::System => "System",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for MessageKind {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Self::from_nibble(value).ok_or(value)
    }
}

/// A classified status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub byte: u8,
    pub kind: MessageKind,
    /// 1-indexed channel (1-16); `None` for system messages.
    pub channel: Option<u8>,
}

impl Status {
    /// Classify a status byte.
    ///
    /// Data bytes (`< 0x80`) are rejected; every other byte classifies.
    pub fn classify(byte: u8) -> Result<Self> {
        if byte < 0x80 {
            return Err(MalformedMessage::NotAStatusByte(byte));
        }

        if byte >= 0xF0 {
            return Ok(Self {
                byte,
                kind: MessageKind::System,
                channel: None,
            });
        }

        let kind = MessageKind::from_nibble((byte >> 4) & 0x7)
            .ok_or(MalformedMessage::NotAStatusByte(byte))?;
        Ok(Self {
            byte,
            kind,
            channel: Some((byte & 0x0F) + 1),
        })
    }

    /// Low nibble: channel index for voice messages, sub-type for system ones.
    #[inline]
    pub fn low_nibble(&self) -> u8 {
        self.byte & 0x0F
    }
}
