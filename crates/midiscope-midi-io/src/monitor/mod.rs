//! MIDI monitor: decoded messages from a selected input, in arrival order.
//!
//! ## Quick Start
//!
//! ```ignore
//! use midiscope_midi_io::MidiMonitor;
//!
//! let monitor = MidiMonitor::builder().io().build()?;
//!
//! for device in monitor.list_devices() {
//!     println!("[{}] {}", device.index, device.name);
//! }
//! monitor.connect_device_by_name("Keyboard")?;
//!
//! for msg in monitor.receiver().iter() {
//!     println!("{msg}");
//! }
//! ```

mod builder;

pub use builder::{MonitorBuilder, DEFAULT_CAPACITY, DEFAULT_CLIENT_NAME};

use crossbeam_channel::{Receiver, TryIter};
use midiscope_midi::{DecodedMessage, RawEvent};
use std::sync::Arc;

use crate::error::Result;
use crate::sink::{DecodeSink, SinkStats};

#[cfg(feature = "midi-io")]
use crate::error::Error;
#[cfg(feature = "midi-io")]
use crate::io::{MidiInputDevice, MidiInputManager};

/// MIDI input monitor. Clone is cheap (Arc internally).
#[derive(Clone)]
pub struct MidiMonitor {
    inner: Arc<MidiMonitorInner>,
}

pub(crate) struct MidiMonitorInner {
    pub(crate) client_name: String,
    pub(crate) sink: DecodeSink,
    pub(crate) receiver: Receiver<DecodedMessage>,
    #[cfg(feature = "midi-io")]
    pub(crate) input_manager: Option<Arc<MidiInputManager>>,
}

impl MidiMonitor {
    pub fn builder() -> MonitorBuilder {
        MonitorBuilder::default()
    }

    pub fn client_name(&self) -> &str {
        &self.inner.client_name
    }

    pub fn capacity(&self) -> Option<usize> {
        self.inner.receiver.capacity()
    }

    /// Receiving end of the decoded message stream.
    pub fn receiver(&self) -> Receiver<DecodedMessage> {
        self.inner.receiver.clone()
    }

    /// Iterates over the messages currently buffered, oldest first, without
    /// blocking.
    pub fn try_iter(&self) -> TryIter<'_, DecodedMessage> {
        self.inner.receiver.try_iter()
    }

    /// Producer handle, for feeding messages from a source other than midir.
    pub fn sink(&self) -> DecodeSink {
        self.inner.sink.clone()
    }

    /// Decode and enqueue one event. See [`DecodeSink::push`].
    pub fn push(&self, event: &RawEvent) -> Result<bool> {
        self.inner.sink.push(event)
    }

    pub fn stats(&self) -> SinkStats {
        self.inner.sink.stats()
    }

    // ==================== Hardware Input ====================

    #[cfg(feature = "midi-io")]
    fn input(&self) -> Result<&MidiInputManager> {
        self.inner
            .input_manager
            .as_deref()
            .ok_or_else(|| Error::MidiDevice("MIDI I/O not enabled".to_string()))
    }

    /// Available input devices. Empty when I/O is not enabled.
    #[cfg(feature = "midi-io")]
    pub fn list_devices(&self) -> Vec<MidiInputDevice> {
        self.input().map(|m| m.list_devices()).unwrap_or_default()
    }

    /// Select an input by index, replacing any current selection.
    ///
    /// Blocks until the input thread has opened the port and returns its name.
    #[cfg(feature = "midi-io")]
    pub fn connect_device(&self, index: usize) -> Result<String> {
        self.input()?.connect(index)
    }

    /// Select the first input whose name contains `name` (case-insensitive).
    #[cfg(feature = "midi-io")]
    pub fn connect_device_by_name(&self, name: &str) -> Result<String> {
        self.input()?.connect_by_name(name)
    }

    #[cfg(feature = "midi-io")]
    pub fn disconnect_device(&self) {
        if let Ok(input) = self.input() {
            input.disconnect();
        }
    }

    #[cfg(feature = "midi-io")]
    pub fn is_device_connected(&self) -> bool {
        self.input().map(|m| m.is_connected()).unwrap_or(false)
    }

    #[cfg(feature = "midi-io")]
    pub fn connected_device_name(&self) -> Option<String> {
        self.input().ok().and_then(|m| m.connected_device_name())
    }
}
