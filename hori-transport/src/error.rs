//! Transport error types

use std::fmt;

use thiserror::Error;

use crate::frame::hex_string;
use crate::protocol::reply;

/// Errors that can occur during transport operations
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Invalid device index {index} ({count} device(s) found)")]
    InvalidDeviceIndex { index: usize, count: usize },

    #[error("USB error: {0}")]
    Usb(String),

    #[error("Transfer failed on endpoint 0x{endpoint:02x}: {message}")]
    Transfer { endpoint: u8, message: String },

    #[error(transparent)]
    NoReply(#[from] ReplyTimeout),

    #[error("Frame too large: {len} bytes (max {max})")]
    FrameTooLarge { len: usize, max: usize },
}

/// The reply wait deadline passed without a matching frame.
///
/// Carries the header prefix of every frame that arrived but did not match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyTimeout {
    pub sequence: u8,
    pub reply_type: u8,
    pub rejected: Vec<Vec<u8>>,
}

impl fmt::Display for ReplyTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Did not receive expected reply 0x{:02x} ({}) with sequence number 0x{:02x}",
            self.reply_type,
            reply::name(self.reply_type),
            self.sequence
        )?;
        if !self.rejected.is_empty() {
            f.write_str("\nReceived:")?;
            for frame in &self.rejected {
                write!(f, "\n  {}", hex_string(frame))?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ReplyTimeout {}
