//! Request/reply frame encoding
//!
//! ```text
//! request: [0x0F] [0x00] [seq] [len]   [opcode] [args...]
//! reply:   [0x10] [0x00] [seq] [len+1] [type]   [payload...]
//! ```
//!
//! The reply length byte counts the reply type, so the payload length is
//! `len - 1`.

use std::fmt::Write as _;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::error::TransportError;
use crate::protocol::{tag, MAX_FRAME_LEN, REPLY_HEADER_LEN, REQUEST_HEADER_LEN};

/// Request frame header (4 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct RequestHeader {
    pub tag: u8,
    pub address: u8,
    pub sequence: u8,
    pub length: u8,
}

/// Reply frame header (5 bytes, includes the reply type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct ReplyHeader {
    pub tag: u8,
    pub address: u8,
    pub sequence: u8,
    pub length: u8,
    pub reply_type: u8,
}

/// An outbound request: sequence number plus `[opcode, args...]` payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFrame {
    pub sequence: u8,
    pub payload: Vec<u8>,
}

impl RequestFrame {
    /// Build a request frame, rejecting payloads that do not fit one transfer
    pub fn new(sequence: u8, opcode: u8, args: &[u8]) -> Result<Self, TransportError> {
        let len = 1 + args.len();
        if REQUEST_HEADER_LEN + len > MAX_FRAME_LEN {
            return Err(TransportError::FrameTooLarge {
                len: REQUEST_HEADER_LEN + len,
                max: MAX_FRAME_LEN,
            });
        }

        let mut payload = Vec::with_capacity(len);
        payload.push(opcode);
        payload.extend_from_slice(args);
        Ok(Self { sequence, payload })
    }

    /// Opcode of this request
    pub fn opcode(&self) -> u8 {
        self.payload[0]
    }

    /// Serialize to wire bytes. Outbound frames always use address 0.
    pub fn to_bytes(&self) -> Vec<u8> {
        let header = RequestHeader {
            tag: tag::REQUEST,
            address: 0,
            sequence: self.sequence,
            length: self.payload.len() as u8,
        };
        let mut buf = Vec::with_capacity(REQUEST_HEADER_LEN + self.payload.len());
        buf.extend_from_slice(header.as_bytes());
        buf.extend_from_slice(&self.payload);
        buf
    }

    /// Parse a request from wire bytes (used by the simulated controller)
    pub fn parse(raw: &[u8]) -> Option<Self> {
        let (header, rest) = RequestHeader::read_from_prefix(raw).ok()?;
        if header.tag != tag::REQUEST || header.length == 0 {
            return None;
        }
        let payload = rest.get(..header.length as usize)?.to_vec();
        Some(Self {
            sequence: header.sequence,
            payload,
        })
    }
}

/// Check whether `raw` is the reply we are waiting for.
///
/// A frame matches when it is a reply tag from address 0, carries `sequence`,
/// declares at least `min_len` payload bytes and has type `reply_type`.
/// On a match the first `min_len` payload bytes are returned.
pub fn match_reply(raw: &[u8], sequence: u8, reply_type: u8, min_len: usize) -> Option<&[u8]> {
    let (header, payload) = ReplyHeader::ref_from_prefix(raw).ok()?;

    let matches = header.tag == tag::REPLY
        && header.address == 0
        && header.sequence == sequence
        && header.length as usize >= min_len + 1
        && header.reply_type == reply_type;

    if !matches {
        return None;
    }
    payload.get(..min_len)
}

/// Build a reply frame (used by the simulated controller and tests)
pub fn build_reply(sequence: u8, reply_type: u8, payload: &[u8]) -> Vec<u8> {
    let header = ReplyHeader {
        tag: tag::REPLY,
        address: 0,
        sequence,
        length: (payload.len() + 1) as u8,
        reply_type,
    };
    let mut buf = Vec::with_capacity(REPLY_HEADER_LEN + payload.len());
    buf.extend_from_slice(header.as_bytes());
    buf.extend_from_slice(payload);
    buf
}

/// Format bytes as space-separated two-digit lowercase hex
pub fn hex_string(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 3);
    for (i, b) in data.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{b:02x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{cmd, reply};

    #[test]
    fn test_request_layout() {
        let frame = RequestFrame::new(7, cmd::READMEM, &[2, 0x01, 0x8a, 18]).unwrap();
        assert_eq!(
            frame.to_bytes(),
            vec![0x0f, 0x00, 7, 5, cmd::READMEM, 2, 0x01, 0x8a, 18]
        );
        assert_eq!(frame.opcode(), cmd::READMEM);
    }

    #[test]
    fn test_request_without_args() {
        let frame = RequestFrame::new(1, cmd::GET_PROFILE, &[]).unwrap();
        assert_eq!(frame.to_bytes(), vec![0x0f, 0x00, 1, 1, cmd::GET_PROFILE]);
    }

    #[test]
    fn test_request_too_large() {
        let args = [0u8; 60];
        let err = RequestFrame::new(1, cmd::WRITEMEM, &args).unwrap_err();
        assert!(matches!(err, TransportError::FrameTooLarge { len: 65, max: 64 }));
    }

    #[test]
    fn test_full_write_chunk_fits() {
        let mut args = vec![1, 0, 0, 55];
        args.extend_from_slice(&[0xaa; 55]);
        let frame = RequestFrame::new(1, cmd::WRITEMEM, &args).unwrap();
        assert_eq!(frame.to_bytes().len(), MAX_FRAME_LEN);
    }

    #[test]
    fn test_request_parse() {
        let bytes = RequestFrame::new(3, cmd::SWITCH_PROFILE, &[2]).unwrap().to_bytes();
        let parsed = RequestFrame::parse(&bytes).unwrap();
        assert_eq!(parsed.sequence, 3);
        assert_eq!(parsed.payload, vec![cmd::SWITCH_PROFILE, 2]);
        assert!(RequestFrame::parse(&[0x10, 0, 3, 1, 7]).is_none());
        assert!(RequestFrame::parse(&[0x0f, 0, 3, 4, 7]).is_none());
    }

    #[test]
    fn test_match_reply() {
        let raw = build_reply(4, reply::PROFILE, &[2, 0]);
        assert_eq!(match_reply(&raw, 4, reply::PROFILE, 2), Some(&[2u8, 0][..]));
        // Fewer bytes requested than available
        assert_eq!(match_reply(&raw, 4, reply::PROFILE, 1), Some(&[2u8][..]));
        assert_eq!(match_reply(&raw, 4, reply::PROFILE, 0), Some(&[][..]));
    }

    #[test]
    fn test_match_reply_rejects() {
        let raw = build_reply(4, reply::MEM, &[0; 8]);
        // Wrong sequence
        assert!(match_reply(&raw, 5, reply::MEM, 8).is_none());
        // Wrong type
        assert!(match_reply(&raw, 4, reply::DONE, 0).is_none());
        // Declared length too short
        assert!(match_reply(&raw, 4, reply::MEM, 9).is_none());

        // Wrong tag
        let mut bad = raw.clone();
        bad[0] = tag::REQUEST;
        assert!(match_reply(&bad, 4, reply::MEM, 8).is_none());

        // Non-zero address
        let mut bad = raw.clone();
        bad[1] = 1;
        assert!(match_reply(&bad, 4, reply::MEM, 8).is_none());

        // Truncated header
        assert!(match_reply(&raw[..4], 4, reply::MEM, 0).is_none());

        // Declared length larger than the bytes actually received
        assert!(match_reply(&raw[..10], 4, reply::MEM, 8).is_none());
    }

    #[test]
    fn test_zero_length_never_matches() {
        let raw = [tag::REPLY, 0, 1, 0, reply::DONE];
        assert!(match_reply(&raw, 1, reply::DONE, 0).is_none());
    }

    #[test]
    fn test_build_reply_layout() {
        let raw = build_reply(3, reply::PROFILE, &[2, 0]);
        assert_eq!(raw.len(), REPLY_HEADER_LEN + 2);
        assert_eq!(&raw[..REPLY_HEADER_LEN], &[tag::REPLY, 0, 3, 3, reply::PROFILE]);
    }

    #[test]
    fn test_hex_string() {
        assert_eq!(hex_string(&[0x00, 0x0f, 0xa0]), "00 0f a0");
        assert_eq!(hex_string(&[]), "");
    }
}
