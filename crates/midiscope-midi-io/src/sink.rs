//! Decode-and-forward sink used as the body of a port callback.
//!
//! Each message handed to a [`DecodeSink`] is decoded on the calling thread
//! and forwarded over a bounded channel, in arrival order. Malformed messages
//! and messages that do not fit in the channel are counted, logged and
//! discarded.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use midiscope_midi::{decode, DecodedMessage, RawEvent};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::error::Result;

/// Snapshot of a sink's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinkStats {
    /// Messages decoded and delivered to the consumer.
    pub received: u64,
    /// Messages rejected by the decoder.
    pub malformed: u64,
    /// Decoded messages discarded because the channel was full or closed.
    pub dropped: u64,
}

#[derive(Debug, Default)]
struct Counters {
    received: AtomicU64,
    malformed: AtomicU64,
    dropped: AtomicU64,
}

/// Producer side of a monitor. Clone is cheap.
#[derive(Clone)]
pub struct DecodeSink {
    sender: Sender<DecodedMessage>,
    counters: Arc<Counters>,
}

impl DecodeSink {
    /// Create a sink and the receiver its decoded messages arrive on.
    pub fn with_capacity(capacity: usize) -> (Self, Receiver<DecodedMessage>) {
        let (sender, receiver) = bounded(capacity);
        let sink = Self {
            sender,
            counters: Arc::new(Counters::default()),
        };
        (sink, receiver)
    }

    /// Port callback entry point. `timestamp_us` is in microseconds; decoded
    /// messages carry milliseconds.
    pub fn handle(&self, timestamp_us: u64, bytes: &[u8]) {
        let event = RawEvent::new(timestamp_us as f64 / 1000.0, bytes);
        // Failures are already counted and logged by `push`.
        let _ = self.push(&event);
    }

    /// Decode `event` and forward it.
    ///
    /// Returns `Ok(true)` when delivered, `Ok(false)` when dropped because the
    /// consumer is full or gone, and the decode error for malformed input.
    pub fn push(&self, event: &RawEvent) -> Result<bool> {
        let msg = match decode(event) {
            Ok(msg) => msg,
            Err(e) => {
                self.counters.malformed.fetch_add(1, Ordering::Relaxed);
                debug!("Discarding malformed MIDI message {:02X?}: {}", event.bytes, e);
                return Err(e.into());
            }
        };

        match self.sender.try_send(msg) {
            Ok(()) => {
                self.counters.received.fetch_add(1, Ordering::Relaxed);
                Ok(true)
            }
            Err(TrySendError::Full(msg)) => {
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                debug!("MIDI monitor channel full, dropping {}", msg.label);
                Ok(false)
            }
            Err(TrySendError::Disconnected(_)) => {
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                debug!("MIDI monitor receiver gone, dropping message");
                Ok(false)
            }
        }
    }

    pub fn stats(&self) -> SinkStats {
        SinkStats {
            received: self.counters.received.load(Ordering::Relaxed),
            malformed: self.counters.malformed.load(Ordering::Relaxed),
            dropped: self.counters.dropped.load(Ordering::Relaxed),
        }
    }
}
