//! Chunked access to profile memory
//!
//! The controller moves at most 55 bytes per READMEM/WRITEMEM exchange, so
//! longer ranges are split into full chunks followed by one short remainder
//! and transferred in ascending offset order.

use hori_transport::protocol::{MAX_CHUNK_LEN, MEM_SUBHEADER_LEN};
use hori_transport::{ReadMem, Session, Transport, WriteMem};
use tracing::debug;

use crate::error::ControllerError;
use crate::layout::Profile;

/// Size of the 16-bit offset space reachable through the wire protocol
pub const ADDRESS_SPACE: usize = 0x10000;

/// One exchange of a chunked transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    /// Absolute offset in the profile region
    pub offset: u16,
    /// Position of this chunk within the whole transfer
    pub position: usize,
    pub len: usize,
}

/// Validate a range against the wire offset width
pub fn check_range(offset: usize, size: usize) -> Result<(), ControllerError> {
    match offset.checked_add(size) {
        Some(end) if end <= ADDRESS_SPACE => Ok(()),
        _ => Err(ControllerError::RangeOutOfBounds { offset, size }),
    }
}

/// Split `offset..offset + size` into per-exchange chunks
pub fn plan_chunks(offset: usize, size: usize) -> Result<Vec<Chunk>, ControllerError> {
    check_range(offset, size)?;

    let chunks = (0..size)
        .step_by(MAX_CHUNK_LEN)
        .map(|position| Chunk {
            // check_range keeps every chunk start below 0x10000
            offset: (offset + position) as u16,
            position,
            len: MAX_CHUNK_LEN.min(size - position),
        })
        .collect();
    Ok(chunks)
}

/// Read `size` bytes of a profile region starting at `offset`
pub fn read_memory<T: Transport>(
    session: &mut Session<T>,
    profile: Profile,
    offset: usize,
    size: usize,
) -> Result<Vec<u8>, ControllerError> {
    let chunks = plan_chunks(offset, size)?;
    debug!(
        "Reading {size} bytes of profile {profile} at 0x{offset:x} in {} chunk(s)",
        chunks.len()
    );

    let mut data = Vec::with_capacity(size);
    for chunk in chunks {
        let reply = session.execute(&ReadMem::new(profile.number(), chunk.offset, chunk.len))?;
        data.extend_from_slice(&reply[MEM_SUBHEADER_LEN..]);
    }
    Ok(data)
}

/// Write `data` to a profile region starting at `offset`.
///
/// Chunks are acknowledged one at a time. A failure leaves the chunks
/// before it written.
pub fn write_memory<T: Transport>(
    session: &mut Session<T>,
    profile: Profile,
    offset: usize,
    data: &[u8],
) -> Result<(), ControllerError> {
    let chunks = plan_chunks(offset, data.len())?;
    debug!(
        "Writing {} bytes of profile {profile} at 0x{offset:x} in {} chunk(s)",
        data.len(),
        chunks.len()
    );

    for chunk in chunks {
        let bytes = &data[chunk.position..chunk.position + chunk.len];
        session.execute(&WriteMem::new(profile.number(), chunk.offset, bytes))?;
    }
    Ok(())
}
