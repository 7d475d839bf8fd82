//! Turns raw MIDI bytes into [`DecodedMessage`]s.
//!
//! Decoding is a single pure pass: no state survives between calls, so the
//! functions here can be called from any number of threads at once.

use tracing::trace;

use crate::error::{MalformedMessage, Result};
use crate::kind::{MessageKind, Status};
use crate::message::{DecodedMessage, RawEvent};
use crate::note::NoteLabel;
use crate::tables::{self, UNDEFINED_CONTROLLER};

/// Pitch bend value at rest (14-bit center).
pub const PITCH_BEND_CENTER: i16 = 0x2000;

/// Decode one raw event.
pub fn decode(event: &RawEvent) -> Result<DecodedMessage> {
    let result = decode_event(event);
    if let Err(err) = &result {
        trace!("Rejected MIDI message {:02X?}: {}", event.bytes, err);
    }
    result
}

/// Decode a status byte plus data bytes received at `timestamp`.
pub fn decode_bytes(timestamp: f64, bytes: &[u8]) -> Result<DecodedMessage> {
    decode(&RawEvent::new(timestamp, bytes))
}

fn decode_event(event: &RawEvent) -> Result<DecodedMessage> {
    let status = Status::classify(event.status().ok_or(MalformedMessage::Empty)?)?;
    let data = event.data();

    let mut velocity = None;
    let (label, detail) = if status.kind.is_channel_voice() {
        let kind = status.kind;
        let data = channel_data(kind, data)?;
        let (label, detail) = match kind {
            MessageKind::NoteOff | MessageKind::NoteOn => {
                velocity = Some(data[1]);
                note(kind, data[0], data[1])
            }
            MessageKind::ControlChange => control_change(data[0], data[1]),
            MessageKind::PitchBend => pitch_bend(data[0], data[1]),
            _ => generic(kind, data),
        };
        (label.to_string(), Some(detail))
    } else {
        system_data(&status, data)?;
        let name = tables::system_message_name(status.low_nibble());
        (name.to_string(), None)
    };

    Ok(DecodedMessage {
        timestamp: event.timestamp,
        kind: status.kind,
        channel: status.channel,
        label,
        detail,
        velocity,
    })
}

/// Checks length and 7-bit range of a channel voice message's data bytes.
fn channel_data(kind: MessageKind, data: &[u8]) -> Result<&[u8]> {
    let expected = kind.data_len().unwrap_or(0);
    if data.len() < expected {
        return Err(MalformedMessage::MissingData {
            kind,
            expected,
            found: data.len(),
        });
    }
    check_data_range(kind, data)?;
    Ok(data)
}

/// System payload bytes must be 7-bit. A system exclusive frame may end in
/// its EOX (`0xF7`) terminator.
fn system_data(status: &Status, data: &[u8]) -> Result<()> {
    let payload = match data.split_last() {
        Some((&0xF7, body)) if status.byte == 0xF0 => body,
        _ => data,
    };
    check_data_range(MessageKind::System, payload)
}

fn check_data_range(kind: MessageKind, data: &[u8]) -> Result<()> {
    match data.iter().enumerate().find(|(_, &b)| b > 0x7F) {
        Some((index, &value)) => Err(MalformedMessage::DataOutOfRange { kind, index, value }),
        None => Ok(()),
    }
}

/// Note On at velocity zero reads as Note Off.
pub fn note(kind: MessageKind, pitch: u8, velocity: u8) -> (&'static str, String) {
    let off = kind == MessageKind::NoteOff || velocity == 0;
    let label = if off { "Note Off" } else { "Note On" };
    (label, format!("{} {}", NoteLabel(pitch), velocity))
}

/// Controller name (with coarse/fine suffix) followed by its value.
///
/// Controllers 32-63 are the fine halves of 0-31 and share their names. Each
/// half is rendered on its own; paired messages are not merged into one
/// 14-bit value.
pub fn control_change(controller: u8, value: u8) -> (&'static str, String) {
    let coarse = controller < 0x20;
    let fine = (0x20..0x40).contains(&controller);
    let index = if fine { controller - 0x20 } else { controller };

    let descriptor = tables::controller(index);
    let name = descriptor.map_or(UNDEFINED_CONTROLLER, |d| d.name);
    let suffix = if coarse {
        " (coarse)"
    } else if fine {
        " (fine)"
    } else {
        ""
    };

    let detail = match descriptor.and_then(|d| d.discrete_value(value)) {
        Some(label) => format!("{name}{suffix} {label}"),
        None => format!("{name}{suffix} {value}"),
    };
    ("Control Change", detail)
}

/// Signed bend relative to center, -8192..=8191.
pub fn pitch_bend(lsb: u8, msb: u8) -> (&'static str, String) {
    let raw = ((msb as i16) << 7) | lsb as i16;
    ("Pitch Bend", (raw - PITCH_BEND_CENTER).to_string())
}

/// Kind name with the data bytes listed in decimal.
pub fn generic(kind: MessageKind, data: &[u8]) -> (&'static str, String) {
    let detail = data
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    (kind.name(), detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_raw(bytes: &[u8]) -> Result<DecodedMessage> {
        decode(&RawEvent::new(0.0, bytes))
    }

    #[test]
    fn test_note_on() {
        let msg = decode_raw(&[0x90, 0x3C, 0x40]).unwrap();
        assert_eq!(msg.kind, MessageKind::NoteOn);
        assert_eq!(msg.channel, Some(1));
        assert_eq!(msg.label, "Note On");
        assert_eq!(msg.detail.as_deref(), Some("C3 64"));
    }

    #[test]
    fn test_note_on_zero_velocity_is_note_off() {
        let msg = decode_raw(&[0x90, 0x3C, 0x00]).unwrap();
        assert_eq!(msg.kind, MessageKind::NoteOn);
        assert_eq!(msg.label, "Note Off");
        assert!(msg.is_note_off());
        assert_eq!(msg.detail.as_deref(), Some("C3 0"));
        assert_eq!(msg.velocity, Some(0));
    }

    #[test]
    fn test_note_off_keeps_release_velocity() {
        let msg = decode_raw(&[0x83, 61, 40]).unwrap();
        assert_eq!(msg.kind, MessageKind::NoteOff);
        assert_eq!(msg.channel, Some(4));
        assert_eq!(msg.label, "Note Off");
        assert_eq!(msg.detail.as_deref(), Some("C#3 40"));
    }

    #[test]
    fn test_sustain_switch() {
        let msg = decode_raw(&[0xB0, 0x40, 0x7F]).unwrap();
        assert_eq!(msg.label, "Control Change");
        assert_eq!(msg.detail.as_deref(), Some("Sustain On"));

        let msg = decode_raw(&[0xB0, 0x40, 0x00]).unwrap();
        assert_eq!(msg.detail.as_deref(), Some("Sustain Off"));
    }

    #[test]
    fn test_coarse_and_fine_share_a_name() {
        let coarse = decode_raw(&[0xB2, 7, 100]).unwrap();
        assert_eq!(coarse.channel, Some(3));
        assert_eq!(coarse.detail.as_deref(), Some("Channel Volume (coarse) 100"));

        let fine = decode_raw(&[0xB2, 7 + 0x20, 5]).unwrap();
        assert_eq!(fine.detail.as_deref(), Some("Channel Volume (fine) 5"));
    }

    #[test]
    fn test_undefined_controllers() {
        let msg = decode_raw(&[0xB0, 3, 10]).unwrap();
        assert_eq!(msg.detail.as_deref(), Some("Undefined (coarse) 10"));

        let msg = decode_raw(&[0xB0, 35, 10]).unwrap();
        assert_eq!(msg.detail.as_deref(), Some("Undefined (fine) 10"));

        // Above the paired range: no suffix, and no discrete value lookup.
        let msg = decode_raw(&[0xB0, 80, 127]).unwrap();
        assert_eq!(msg.detail.as_deref(), Some("Undefined 127"));
    }

    #[test]
    fn test_channel_mode_controllers() {
        let msg = decode_raw(&[0xBF, 123, 0]).unwrap();
        assert_eq!(msg.channel, Some(16));
        assert_eq!(msg.detail.as_deref(), Some("All Notes Off 0"));

        let msg = decode_raw(&[0xB0, 122, 127]).unwrap();
        assert_eq!(msg.detail.as_deref(), Some("Local Control On"));
    }

    #[test]
    fn test_pitch_bend() {
        let center = decode_raw(&[0xE0, 0x00, 0x40]).unwrap();
        assert_eq!(center.label, "Pitch Bend");
        assert_eq!(center.detail.as_deref(), Some("0"));

        let low = decode_raw(&[0xE0, 0x00, 0x00]).unwrap();
        assert_eq!(low.detail.as_deref(), Some("-8192"));

        let high = decode_raw(&[0xE0, 0x7F, 0x7F]).unwrap();
        assert_eq!(high.detail.as_deref(), Some("8191"));
    }

    #[test]
    fn test_generic_fallbacks() {
        let program = decode_raw(&[0xC5, 12]).unwrap();
        assert_eq!(program.kind, MessageKind::ProgramChange);
        assert_eq!(program.channel, Some(6));
        assert_eq!(program.label, "Program Change");
        assert_eq!(program.detail.as_deref(), Some("12"));

        let pressure = decode_raw(&[0xD0, 90]).unwrap();
        assert_eq!(pressure.label, "Channel Pressure");
        assert_eq!(pressure.detail.as_deref(), Some("90"));

        let poly = decode_raw(&[0xA1, 60, 33]).unwrap();
        assert_eq!(poly.label, "Poly Pressure");
        assert_eq!(poly.detail.as_deref(), Some("60 33"));
    }

    #[test]
    fn test_system_messages() {
        let start = decode_raw(&[0xFA]).unwrap();
        assert_eq!(start.kind, MessageKind::System);
        assert_eq!(start.channel, None);
        assert_eq!(start.label, "Sequence Start");
        assert_eq!(start.detail, None);

        // Payload is carried but not interpreted.
        let song_position = decode_raw(&[0xF2, 0x10, 0x20]).unwrap();
        assert_eq!(song_position.label, "Song Position Pointer");
        assert_eq!(song_position.detail, None);

        let sysex = decode_raw(&[0xF0, 0x43, 0x12, 0x00, 0xF7]).unwrap();
        assert_eq!(sysex.label, "System Exclusive");

        let unterminated = decode_raw(&[0xF0, 0x43, 0x12]).unwrap();
        assert_eq!(unterminated.label, "System Exclusive");
    }

    #[test]
    fn test_system_payload_out_of_range_is_malformed() {
        assert_eq!(
            decode_raw(&[0xF2, 200, 0x90]),
            Err(MalformedMessage::DataOutOfRange {
                kind: MessageKind::System,
                index: 0,
                value: 200,
            })
        );
        assert_eq!(
            decode_raw(&[0xF3, 0xFF]),
            Err(MalformedMessage::DataOutOfRange {
                kind: MessageKind::System,
                index: 0,
                value: 0xFF,
            })
        );

        // Stray status bytes inside a sysex body.
        assert_eq!(
            decode_raw(&[0xF0, 0x43, 0xC8, 0x90, 0xF7]),
            Err(MalformedMessage::DataOutOfRange {
                kind: MessageKind::System,
                index: 1,
                value: 0xC8,
            })
        );

        // EOX only terminates system exclusive.
        assert!(decode_raw(&[0xF1, 0xF7]).is_err());
        assert!(decode_raw(&[0xF0, 0xF7, 0x01]).is_err());
    }

    #[test]
    fn test_timestamp_passes_through() {
        let msg = decode(&RawEvent::new(1234.567, &[0xF8])).unwrap();
        assert_eq!(msg.timestamp, 1234.567);
        assert_eq!(decode_bytes(1234.567, &[0xF8]).unwrap(), msg);
    }

    #[test]
    fn test_velocity_only_on_notes() {
        assert_eq!(decode_raw(&[0x90, 60, 99]).unwrap().velocity, Some(99));
        assert_eq!(decode_raw(&[0xB0, 64, 127]).unwrap().velocity, None);
        assert_eq!(decode_raw(&[0xFA]).unwrap().velocity, None);
    }

    #[test]
    fn test_empty_is_malformed() {
        assert_eq!(decode_raw(&[]), Err(MalformedMessage::Empty));
    }

    #[test]
    fn test_data_byte_as_status_is_malformed() {
        assert_eq!(
            decode_raw(&[0x3C, 0x40]),
            Err(MalformedMessage::NotAStatusByte(0x3C))
        );
    }

    #[test]
    fn test_out_of_range_data_is_malformed() {
        assert_eq!(
            decode_raw(&[0x90, 200, 64]),
            Err(MalformedMessage::DataOutOfRange {
                kind: MessageKind::NoteOn,
                index: 0,
                value: 200,
            })
        );
        assert!(decode_raw(&[0xB0, 64, 0x80]).is_err());
        assert!(decode_raw(&[0xE0, 0xFF, 0x40]).is_err());
    }

    #[test]
    fn test_missing_data_is_malformed() {
        assert_eq!(
            decode_raw(&[0x90, 60]),
            Err(MalformedMessage::MissingData {
                kind: MessageKind::NoteOn,
                expected: 2,
                found: 1,
            })
        );
        assert!(decode_raw(&[0xC0]).is_err());
        assert!(decode_raw(&[0xE0]).is_err());
    }

    #[test]
    fn test_decode_is_repeatable() {
        let event = RawEvent::new(3.25, &[0xB0, 0x41, 0x20]);
        assert_eq!(decode(&event), decode(&event));
    }
}
