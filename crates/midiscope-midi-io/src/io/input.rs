//! MIDI input: device enumeration and connection on a dedicated thread.
//!
//! The midir connection lives on the thread that created it; callers talk to
//! that thread through a command channel. Between commands the thread
//! re-enumerates ports, so a selected input that disappears is released.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use midir::{Ignore, MidiInput, MidiInputConnection};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::debug;

use crate::error::{Error, Result};
use crate::sink::DecodeSink;

/// How often the input thread checks for added or removed ports.
pub(crate) const PORT_REFRESH_INTERVAL: Duration = Duration::from_millis(500);

/// Information about an available MIDI input device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiInputDevice {
    /// Device index (for connection)
    pub index: usize,
    pub name: String,
}

enum InputCommand {
    /// Device index, and where to report the connected port name.
    Connect(usize, Sender<Result<String>>),
    Disconnect,
    Shutdown,
}

/// Port names that appeared or vanished between two enumerations.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct PortChanges {
    pub(crate) added: Vec<String>,
    pub(crate) removed: Vec<String>,
}

impl PortChanges {
    pub(crate) fn between(previous: &[String], current: &[String]) -> Self {
        Self {
            added: current
                .iter()
                .filter(|name| !previous.contains(name))
                .cloned()
                .collect(),
            removed: previous
                .iter()
                .filter(|name| !current.contains(name))
                .cloned()
                .collect(),
        }
    }
}

/// True when a port is selected and no longer listed.
pub(crate) fn selected_port_gone(selected: Option<&str>, current: &[String]) -> bool {
    selected.is_some_and(|name| !current.iter().any(|port| port == name))
}

fn port_names(midi_input: &MidiInput) -> Vec<String> {
    midi_input
        .ports()
        .iter()
        .enumerate()
        .map(|(index, port)| {
            midi_input
                .port_name(port)
                .unwrap_or_else(|_| format!("Unknown Device {}", index))
        })
        .collect()
}

pub(crate) struct MidiInputManager {
    client_name: String,
    command_sender: Sender<InputCommand>,
    connected_device: Arc<arc_swap::ArcSwap<Option<String>>>,
    is_connected: Arc<AtomicBool>,
}

impl MidiInputManager {
    pub(crate) fn new(client_name: impl Into<String>, sink: DecodeSink) -> Self {
        let client_name = client_name.into();
        let (command_sender, command_receiver) = bounded(16);
        let connected_device = Arc::new(arc_swap::ArcSwap::new(Arc::new(None)));
        let is_connected = Arc::new(AtomicBool::new(false));

        let thread_client = client_name.clone();
        let connected_device_clone = Arc::clone(&connected_device);
        let is_connected_clone = Arc::clone(&is_connected);

        thread::spawn(move || {
            Self::input_thread(
                thread_client,
                sink,
                command_receiver,
                connected_device_clone,
                is_connected_clone,
            );
        });

        Self {
            client_name,
            command_sender,
            connected_device,
            is_connected,
        }
    }

    fn input_thread(
        client_name: String,
        sink: DecodeSink,
        command_receiver: Receiver<InputCommand>,
        connected_device: Arc<arc_swap::ArcSwap<Option<String>>>,
        is_connected: Arc<AtomicBool>,
    ) {
        let mut connection: Option<MidiInputConnection<()>> = None;

        let release = |connection: &mut Option<MidiInputConnection<()>>| {
            if let Some(conn) = connection.take() {
                conn.close();
                is_connected.store(false, Ordering::SeqCst);
                let previous = connected_device.swap(Arc::new(None));
                if let Some(name) = previous.as_deref() {
                    debug!("Disconnected MIDI input '{}'", name);
                }
            }
        };

        // Without a watcher client, hot-plug tracking is skipped.
        let watcher = MidiInput::new(&format!("{client_name}-watch")).ok();
        let mut known_ports = watcher.as_ref().map(port_names).unwrap_or_default();

        loop {
            match command_receiver.recv_timeout(PORT_REFRESH_INTERVAL) {
                Ok(InputCommand::Connect(device_index, reply)) => {
                    // Selecting a new input detaches the previous one first.
                    release(&mut connection);

                    let result = Self::connect_to_device(&client_name, device_index, sink.clone())
                        .map(|(conn, name)| {
                            debug!("Connected MIDI input {}: '{}'", device_index, name);
                            connection = Some(conn);
                            is_connected.store(true, Ordering::SeqCst);
                            connected_device.store(Arc::new(Some(name.clone())));
                            name
                        });
                    if let Err(e) = &result {
                        debug!("Failed to connect MIDI input {}: {}", device_index, e);
                    }
                    // The caller may have given up waiting.
                    let _ = reply.send(result);
                }
                Ok(InputCommand::Disconnect) => release(&mut connection),
                Ok(InputCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {
                    let Some(watcher) = watcher.as_ref() else {
                        continue;
                    };
                    let current = port_names(watcher);
                    let changes = PortChanges::between(&known_ports, &current);
                    for name in &changes.added {
                        debug!("MIDI input port appeared: '{}'", name);
                    }
                    for name in &changes.removed {
                        debug!("MIDI input port removed: '{}'", name);
                    }

                    let selected = connected_device.load_full();
                    if selected_port_gone(selected.as_deref(), &current) {
                        release(&mut connection);
                    }
                    known_ports = current;
                }
            }
        }

        release(&mut connection);
    }

    fn connect_to_device(
        client_name: &str,
        device_index: usize,
        sink: DecodeSink,
    ) -> Result<(MidiInputConnection<()>, String)> {
        let mut midi_input = MidiInput::new(client_name)?;
        // System exclusive, timing and active sensing are all monitored.
        midi_input.ignore(Ignore::None);

        let ports = midi_input.ports();
        let port = ports
            .get(device_index)
            .ok_or_else(|| Error::MidiDevice(format!("MIDI device {} not found", device_index)))?;

        let port_name = midi_input
            .port_name(port)
            .unwrap_or_else(|_| format!("Device {}", device_index));

        let connection = midi_input.connect(
            port,
            &format!("{client_name}-input"),
            move |timestamp, message, _| sink.handle(timestamp, message),
            (),
        )?;

        Ok((connection, port_name))
    }

    pub(crate) fn list_devices(&self) -> Vec<MidiInputDevice> {
        MidiInput::new(&format!("{}-device-list", self.client_name))
            .map(|midi_input| {
                port_names(&midi_input)
                    .into_iter()
                    .enumerate()
                    .map(|(index, name)| MidiInputDevice { index, name })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Connects on the input thread and waits for the outcome.
    ///
    /// Returns the connected port name.
    pub(crate) fn connect(&self, device_index: usize) -> Result<String> {
        let (reply_sender, reply_receiver) = bounded(1);
        self.command_sender
            .send(InputCommand::Connect(device_index, reply_sender))
            .map_err(|_| Error::MidiPort("MIDI input thread not running".to_string()))?;

        reply_receiver
            .recv()
            .map_err(|_| Error::MidiPort("MIDI input thread not running".to_string()))?
    }

    /// Connects to the first device whose name contains `name`, ignoring case.
    pub(crate) fn connect_by_name(&self, name: &str) -> Result<String> {
        let needle = name.to_lowercase();
        let device = self
            .list_devices()
            .into_iter()
            .find(|d| d.name.to_lowercase().contains(&needle))
            .ok_or_else(|| Error::MidiDevice(format!("No MIDI device matching '{}' found", name)))?;
        self.connect(device.index)
    }

    pub(crate) fn disconnect(&self) {
        let _ = self.command_sender.send(InputCommand::Disconnect);
    }

    pub(crate) fn is_connected(&self) -> bool {
        self.is_connected.load(Ordering::SeqCst)
    }

    pub(crate) fn connected_device_name(&self) -> Option<String> {
        self.connected_device.load().as_ref().clone()
    }
}

impl Drop for MidiInputManager {
    fn drop(&mut self) {
        let _ = self.command_sender.send(InputCommand::Shutdown);
    }
}
