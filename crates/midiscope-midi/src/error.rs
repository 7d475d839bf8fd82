//! Error type for the MIDI decoder.

use thiserror::Error;

use crate::kind::MessageKind;

/// A byte sequence that cannot be decoded as a whole MIDI message.
///
/// Decoding never produces a partial result: any of these causes rejects the
/// entire message.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedMessage {
    #[error("empty MIDI message")]
    Empty,

    #[error("expected a status byte, found data byte {0:#04x}")]
    NotAStatusByte(u8),

    #[error("{kind} needs {expected} data byte(s), found {found}")]
    MissingData {
        kind: MessageKind,
        expected: usize,
        found: usize,
    },

    #[error("{kind} data byte {index} is {value}, outside 0-127")]
    DataOutOfRange {
        kind: MessageKind,
        index: usize,
        value: u8,
    },
}

pub type Result<T> = std::result::Result<T, MalformedMessage>;
