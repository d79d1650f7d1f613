//! Transport and framing layer for HORI GIP controller configuration memory
//!
//! This crate provides:
//!
//! - the [`Transport`] trait with a USB bulk backend ([`UsbTransport`]) and an
//!   in-memory backend ([`SimulatedController`])
//! - request/reply frame encoding and reply matching ([`frame`])
//! - typed commands ([`command`]) and a [`Session`] that numbers requests and
//!   waits for their replies

pub mod command;
pub mod error;
pub mod frame;
pub mod protocol;
pub mod session;
pub mod sim;
pub mod types;

mod usb;

pub use command::{Command, GetProfile, GetVersion, MemHeader, ReadMem, SwitchProfile, WriteMem};
pub use error::{ReplyTimeout, TransportError};
pub use frame::{hex_string, match_reply, RequestFrame};
pub use session::{ReplyWait, Session, Timing};
pub use sim::SimulatedController;
pub use types::{DiscoveredDevice, TransportDeviceInfo, TransportType};
pub use usb::{list_devices, UsbTransport};

use std::time::Duration;

/// Raw frame transport - all backends implement this
pub trait Transport {
    /// Write one request frame
    fn write_frame(&self, frame: &[u8]) -> Result<(), TransportError>;

    /// Read one inbound frame
    ///
    /// # Returns
    /// `None` if nothing arrived within `timeout`
    fn read_frame(&self, timeout: Duration) -> Result<Option<Vec<u8>>, TransportError>;

    /// Get device information
    fn device_info(&self) -> &TransportDeviceInfo;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write_frame(&self, frame: &[u8]) -> Result<(), TransportError> {
        (**self).write_frame(frame)
    }

    fn read_frame(&self, timeout: Duration) -> Result<Option<Vec<u8>>, TransportError> {
        (**self).read_frame(timeout)
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        (**self).device_info()
    }
}
