//! Hex dump formatting for `hori hexdump`
//!
//! Eight values per line, two lowercase hex digits each, separated by single
//! spaces. The last line holds whatever remains. The output is also the
//! input format of `hori-isolate`.

use hori_transport::hex_string;

/// Values per output line
pub const BYTES_PER_LINE: usize = 8;

/// Format memory as hex dump lines
pub fn hexdump_lines(data: &[u8]) -> Vec<String> {
    data.chunks(BYTES_PER_LINE).map(hex_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_and_ragged_lines() {
        let data: Vec<u8> = (0..11).collect();
        assert_eq!(
            hexdump_lines(&data),
            vec!["00 01 02 03 04 05 06 07", "08 09 0a"]
        );
    }

    #[test]
    fn test_exact_multiple() {
        let lines = hexdump_lines(&[0xff; 16]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "ff ff ff ff ff ff ff ff");
    }

    #[test]
    fn test_single_byte_and_empty() {
        assert_eq!(hexdump_lines(&[0xa5]), vec!["a5"]);
        assert!(hexdump_lines(&[]).is_empty());
    }
}
