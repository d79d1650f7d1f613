//! Profile name codec

use crate::error::ControllerError;
use crate::layout::{NAME_LEN, NAME_MAX_CHARS};

/// Decode a name field: UTF-16LE units up to the first zero unit.
///
/// Each unit maps to one character; units that are not valid scalar values
/// (lone surrogates) decode as U+FFFD.
pub fn decode_name(field: &[u8]) -> String {
    field
        .chunks_exact(2)
        .take(NAME_MAX_CHARS)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .take_while(|&unit| unit != 0)
        .map(|unit| char::from_u32(unit.into()).unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Encode a name into the 32-byte field, zero padded.
///
/// Code points above U+FFFF are truncated to their low 16 bits.
pub fn encode_name(name: &str) -> Result<[u8; NAME_LEN], ControllerError> {
    if name.chars().count() > NAME_MAX_CHARS {
        return Err(ControllerError::NameTooLong(name.to_string()));
    }

    let mut field = [0u8; NAME_LEN];
    for (slot, ch) in field.chunks_exact_mut(2).zip(name.chars()) {
        let unit = (u32::from(ch) & 0xffff) as u16;
        slot.copy_from_slice(&unit.to_le_bytes());
    }
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for name in ["", "Fight", "Profile 1", "ÄÖÜ äöü ß", "日本語", "sixteen chars!!!"] {
            let field = encode_name(name).unwrap();
            assert_eq!(decode_name(&field), name);
        }
    }

    #[test]
    fn test_encoding_layout() {
        let field = encode_name("Ab").unwrap();
        assert_eq!(&field[..6], &[b'A', 0, b'b', 0, 0, 0]);
        assert!(field[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_too_long() {
        let err = encode_name("seventeen chars!!").unwrap_err();
        assert!(matches!(err, ControllerError::NameTooLong(_)));
    }

    #[test]
    fn test_length_counts_characters() {
        // Counted in characters, not UTF-8 bytes
        assert!(encode_name("äääääääääääääääää").is_err());
        assert!(encode_name("ääääääääääääääää").is_ok());
    }

    #[test]
    fn test_decode_stops_at_zero() {
        let mut field = [0u8; NAME_LEN];
        field[0] = b'X';
        field[4] = b'Y';
        assert_eq!(decode_name(&field), "X");
    }

    #[test]
    fn test_decode_full_field_without_terminator() {
        let field: Vec<u8> = std::iter::repeat([b'z', 0]).take(16).flatten().collect();
        assert_eq!(decode_name(&field), "z".repeat(16));
    }

    #[test]
    fn test_lone_surrogate() {
        let field = [0x00, 0xd8, b'a', 0x00];
        assert_eq!(decode_name(&field), "\u{fffd}a");
    }
}
