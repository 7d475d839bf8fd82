//! MidiMonitor builder for configuring the input monitor.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::sink::DecodeSink;

#[cfg(feature = "midi-io")]
use crate::io::MidiInputManager;

use super::{MidiMonitor, MidiMonitorInner};

pub const DEFAULT_CLIENT_NAME: &str = "midiscope";
pub const DEFAULT_CAPACITY: usize = 1024;

pub struct MonitorBuilder {
    pub(super) client_name: String,
    pub(super) capacity: usize,
    #[cfg(feature = "midi-io")]
    pub(super) enable_io: bool,
}

impl Default for MonitorBuilder {
    fn default() -> Self {
        Self {
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            capacity: DEFAULT_CAPACITY,
            #[cfg(feature = "midi-io")]
            enable_io: false,
        }
    }
}

impl MonitorBuilder {
    /// Client name reported to the platform MIDI API.
    pub fn client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    /// Decoded messages buffered before new ones are dropped.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Enables hardware input through midir.
    #[cfg(feature = "midi-io")]
    pub fn io(mut self) -> Self {
        self.enable_io = true;
        self
    }

    pub fn build(self) -> Result<MidiMonitor> {
        if self.capacity == 0 {
            return Err(Error::InvalidConfig(
                "monitor capacity must be greater than zero".to_string(),
            ));
        }
        if self.client_name.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "client name must not be empty".to_string(),
            ));
        }

        let (sink, receiver) = DecodeSink::with_capacity(self.capacity);

        #[cfg(feature = "midi-io")]
        let input_manager = self
            .enable_io
            .then(|| Arc::new(MidiInputManager::new(self.client_name.clone(), sink.clone())));

        Ok(MidiMonitor {
            inner: Arc::new(MidiMonitorInner {
                client_name: self.client_name,
                sink,
                receiver,
                #[cfg(feature = "midi-io")]
                input_manager,
            }),
        })
    }
}
