//! Protocol constants for the HORI GIP configuration protocol

/// Frame tags (byte 0 of every frame)
pub mod tag {
    /// Host → controller request frame
    pub const REQUEST: u8 = 0x0F;
    /// Controller → host reply frame
    pub const REPLY: u8 = 0x10;
}

/// Request opcodes (first payload byte of a request frame)
pub mod cmd {
    pub const WRITEMEM: u8 = 0x03;
    pub const READMEM: u8 = 0x04;
    pub const SWITCH_PROFILE: u8 = 0x07;
    pub const GET_VERSION: u8 = 0x09;
    pub const GET_PROFILE: u8 = 0x0B;

    /// Get human-readable name for an opcode
    pub fn name(cmd: u8) -> &'static str {
        match cmd {
            WRITEMEM => "WRITEMEM",
            READMEM => "READMEM",
            SWITCH_PROFILE => "SWITCH_PROFILE",
            GET_VERSION => "GET_VERSION",
            GET_PROFILE => "GET_PROFILE",
            _ => "UNKNOWN",
        }
    }
}

/// Reply type codes (byte 4 of a reply frame)
pub mod reply {
    /// Memory contents; payload starts with a 4-byte offset echo
    pub const MEM: u8 = 0x05;
    /// Acknowledgement of a write or profile switch
    pub const DONE: u8 = 0x06;
    pub const VERSION: u8 = 0x0A;
    /// Active profile; payload byte 0 is the profile number
    pub const PROFILE: u8 = 0x0C;

    /// Get human-readable name for a reply type
    pub fn name(reply: u8) -> &'static str {
        match reply {
            MEM => "MEM",
            DONE => "DONE",
            VERSION => "VERSION",
            PROFILE => "PROFILE",
            _ => "UNKNOWN",
        }
    }
}

/// USB identification and endpoint layout
pub mod device {
    /// HORI vendor ID
    pub const VENDOR_ID: u16 = 0x0F0D;
    /// Supported GIP controller
    pub const PRODUCT_ID: u16 = 0x0150;
    /// Vendor interface carrying the GIP endpoints
    pub const INTERFACE: u8 = 0;
    /// Bulk OUT endpoint
    pub const ENDPOINT_OUT: u8 = 0x02;
    /// Bulk IN endpoint
    pub const ENDPOINT_IN: u8 = 0x82;
}

/// Reply wait timing
pub mod timing {
    /// Wall-clock deadline for a matching reply, measured from the start of the wait (ms)
    pub const REPLY_DEADLINE_MS: u64 = 100;
    /// Timeout of each individual transport read inside the wait loop (ms)
    pub const READ_TIMEOUT_MS: u64 = 100;
}

/// Request header: tag, address, sequence, payload length
pub const REQUEST_HEADER_LEN: usize = 4;

/// Reply header: tag, address, sequence, length, reply type
pub const REPLY_HEADER_LEN: usize = 5;

/// Bytes requested per bulk IN transfer
pub const READ_BUFFER_SIZE: usize = 128;

/// Maximum memory bytes carried by one READMEM/WRITEMEM exchange.
///
/// 55 data bytes plus the WRITEMEM argument header and the frame header fill
/// the controller's 64-byte transfer buffer.
pub const MAX_CHUNK_LEN: usize = 55;

/// Offset echo preceding the data bytes in every MEM reply
pub const MEM_SUBHEADER_LEN: usize = 4;

/// Number of rejected frame bytes kept for diagnostics
pub const REJECTED_PREFIX_LEN: usize = 9;

/// Largest frame the controller accepts in one bulk transfer
pub const MAX_FRAME_LEN: usize = 64;

/// Number of configuration profiles (numbered from 1)
pub const PROFILE_COUNT: u8 = 4;

/// Size of one profile's configuration memory region
pub const PROFILE_REGION_LEN: usize = 421;
