//! Controller interface error types

use hori_transport::TransportError;
use thiserror::Error;

/// Errors from controller operations
#[derive(Error, Debug)]
pub enum ControllerError {
    /// Transport layer error
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("<profile> must be between 1 and 4 (got {0})")]
    InvalidProfile(u64),

    /// Access outside the 16-bit offset range of the wire protocol
    #[error("Range 0x{offset:x}+{size} exceeds the addressable memory (0x10000 bytes)")]
    RangeOutOfBounds { offset: usize, size: usize },

    #[error("Name too long (must be at most 16 characters): {0}")]
    NameTooLong(String),

    #[error("Incorrect mapping argument: {0}")]
    InvalidMapping(String),

    #[error("Incorrect mapping argument: {0} (unknown button)")]
    UnknownButton(String),

    #[error("Incorrect mapping argument: {0} (unknown function)")]
    UnknownFunction(String),

    #[error("<stick> must be \"LS\" or \"RS\" (got {0:?})")]
    UnknownStick(String),
}
