//! # MIDI Monitor
//!
//! Enumerate MIDI input devices, connect to one, and print every message it
//! sends as a table row.
//!
//! **Concepts:** Device enumeration, input selection, `midi-hardware` feature
//!
//! ```bash
//! cargo run --example monitor --features midi-hardware -- [device name]
//! RUST_LOG=debug cargo run --example monitor --features midi-hardware
//! ```

use midiscope::prelude::*;
use std::time::{Duration, Instant};

fn main() -> midiscope::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let monitor = MidiMonitor::builder().io().build()?;

    let devices = monitor.list_devices();
    println!("MIDI input devices:");
    if devices.is_empty() {
        println!("  (none found, connect a MIDI controller and try again)");
        return Ok(());
    }
    for dev in &devices {
        println!("  [{}] {}", dev.index, dev.name);
    }

    let connected = match std::env::args().nth(1) {
        Some(name) => monitor.connect_device_by_name(&name)?,
        None => monitor.connect_device(0)?,
    };
    println!("\nConnected to {connected}");

    println!("\nListening for 30 seconds...");
    println!("{:>10}\t{}\t{}\t{}", "time", "message", "channel", "data");

    let receiver = monitor.receiver();
    let deadline = Instant::now() + Duration::from_secs(30);
    while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
        if let Ok(msg) = receiver.recv_timeout(remaining) {
            println!("{msg}");
        }
    }

    let stats = monitor.stats();
    tracing::info!(
        received = stats.received,
        malformed = stats.malformed,
        dropped = stats.dropped,
        "Monitor finished"
    );
    monitor.disconnect_device();
    Ok(())
}
