//! Typed request builders
//!
//! Each command knows its opcode, the reply type that acknowledges it and how
//! many reply payload bytes it needs. [`crate::Session::execute`] uses these
//! to send the request and wait for the matching reply.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::protocol::{cmd, reply, MAX_CHUNK_LEN, MEM_SUBHEADER_LEN};

/// A request that can be framed and sent through a session
pub trait Command {
    /// Opcode byte (e.g. `cmd::READMEM`)
    const OPCODE: u8;

    /// Reply type acknowledging this command
    const REPLY: u8;

    /// Minimum reply payload length, in bytes after the reply header
    fn reply_len(&self) -> usize;

    /// Serialize arguments (excluding the opcode)
    fn to_args(&self) -> Vec<u8>;
}

/// Argument header shared by READMEM and WRITEMEM, also echoed at the start
/// of every MEM reply.
///
/// The offset is carried big-endian as two separate bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct MemHeader {
    pub profile: u8,
    pub offset_hi: u8,
    pub offset_lo: u8,
    pub len: u8,
}

impl MemHeader {
    pub fn new(profile: u8, offset: u16, len: u8) -> Self {
        let [offset_hi, offset_lo] = offset.to_be_bytes();
        Self {
            profile,
            offset_hi,
            offset_lo,
            len,
        }
    }

    pub fn offset(&self) -> u16 {
        u16::from_be_bytes([self.offset_hi, self.offset_lo])
    }
}

// =============================================================================
// Memory access
// =============================================================================

/// READMEM (0x04): read up to 55 bytes of a profile region
#[derive(Debug, Clone)]
pub struct ReadMem {
    header: MemHeader,
}

impl ReadMem {
    /// `len` is clamped to the per-exchange limit
    pub fn new(profile: u8, offset: u16, len: usize) -> Self {
        let len = len.min(MAX_CHUNK_LEN) as u8;
        Self {
            header: MemHeader::new(profile, offset, len),
        }
    }

    pub fn len(&self) -> usize {
        self.header.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.header.len == 0
    }
}

impl Command for ReadMem {
    const OPCODE: u8 = cmd::READMEM;
    const REPLY: u8 = reply::MEM;

    fn reply_len(&self) -> usize {
        MEM_SUBHEADER_LEN + self.len()
    }

    fn to_args(&self) -> Vec<u8> {
        self.header.as_bytes().to_vec()
    }
}

/// WRITEMEM (0x03): write up to 55 bytes of a profile region
#[derive(Debug, Clone)]
pub struct WriteMem<'a> {
    header: MemHeader,
    data: &'a [u8],
}

impl<'a> WriteMem<'a> {
    /// Build a write; `data` beyond the per-exchange limit is not sent
    pub fn new(profile: u8, offset: u16, data: &'a [u8]) -> Self {
        let data = &data[..data.len().min(MAX_CHUNK_LEN)];
        Self {
            header: MemHeader::new(profile, offset, data.len() as u8),
            data,
        }
    }
}

impl Command for WriteMem<'_> {
    const OPCODE: u8 = cmd::WRITEMEM;
    const REPLY: u8 = reply::DONE;

    fn reply_len(&self) -> usize {
        0
    }

    fn to_args(&self) -> Vec<u8> {
        let mut args = Vec::with_capacity(4 + self.data.len());
        args.extend_from_slice(self.header.as_bytes());
        args.extend_from_slice(self.data);
        args
    }
}

// =============================================================================
// Profile selection
// =============================================================================

/// SWITCH_PROFILE (0x07)
#[derive(Debug, Clone)]
pub struct SwitchProfile {
    pub profile: u8,
}

impl Command for SwitchProfile {
    const OPCODE: u8 = cmd::SWITCH_PROFILE;
    const REPLY: u8 = reply::DONE;

    fn reply_len(&self) -> usize {
        0
    }

    fn to_args(&self) -> Vec<u8> {
        vec![self.profile]
    }
}

/// GET_PROFILE (0x0B): reply byte 0 is the active profile number
#[derive(Debug, Clone, Default)]
pub struct GetProfile;

impl Command for GetProfile {
    const OPCODE: u8 = cmd::GET_PROFILE;
    const REPLY: u8 = reply::PROFILE;

    fn reply_len(&self) -> usize {
        2
    }

    fn to_args(&self) -> Vec<u8> {
        vec![]
    }
}

/// GET_VERSION (0x09)
#[derive(Debug, Clone, Default)]
pub struct GetVersion;

impl Command for GetVersion {
    const OPCODE: u8 = cmd::GET_VERSION;
    const REPLY: u8 = reply::VERSION;

    fn reply_len(&self) -> usize {
        2
    }

    fn to_args(&self) -> Vec<u8> {
        vec![]
    }
}
