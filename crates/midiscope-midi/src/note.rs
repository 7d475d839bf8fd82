//! Note naming.
//!
//! Octaves follow the convention where MIDI note 0 is `C-2`, so middle C
//! (note 60) renders as `C3`.

use std::fmt;

pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Pitch class name of a MIDI note number.
#[inline]
pub fn note_name(pitch: u8) -> &'static str {
    NOTE_NAMES[(pitch % 12) as usize]
}

/// Octave of a MIDI note number (`pitch / 12 - 2`).
#[inline]
pub fn octave(pitch: u8) -> i8 {
    (pitch / 12) as i8 - 2
}

/// Displays a MIDI note number as name plus octave, e.g. `C#3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteLabel(pub u8);

impl fmt::Display for NoteLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", note_name(self.0), octave(self.0))
    }
}
