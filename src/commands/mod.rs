//! Command handlers for the CLI application.
//!
//! This module organizes command handlers by category:
//! - `memory`: Raw memory commands (hexdump, write)
//! - `profile`: Profile field commands (profile, map, reset, name, stick, info)
//! - `utility`: Device commands (devices, version)

pub mod memory;
pub mod profile;
pub mod utility;

use hori_controller::Controller;
use hori_transport::{Timing, Transport, UsbTransport};
use tracing::debug;

/// Result type for command handlers
pub type CommandResult = anyhow::Result<()>;

/// Device selection and timing shared by all commands
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub device: usize,
    pub timing: Timing,
}

impl Context {
    /// Open the selected controller and run a closure with it.
    /// The device is released when the closure returns.
    pub fn with_controller<F>(&self, f: F) -> CommandResult
    where
        F: FnOnce(&mut Controller<UsbTransport>) -> CommandResult,
    {
        let mut controller = Controller::open(self.device, self.timing)?;
        debug!(
            "Using device {}: {}",
            self.device,
            controller.session().transport().device_info().display_name()
        );
        f(&mut controller)
    }
}
