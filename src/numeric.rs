//! Numeric command-line arguments
//!
//! Integers are accepted in decimal or with a `0x`, `0o` or `0b` prefix.
//! The parsers return `String` errors so they plug into clap's
//! `value_parser`.

use hori_controller::Profile;

/// Parse an integer with an optional radix prefix
pub fn parse_int(s: &str) -> Result<u64, String> {
    let lower = s.to_ascii_lowercase();
    let (digits, radix) = if let Some(rest) = lower.strip_prefix("0x") {
        (rest, 16)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (rest, 8)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (rest, 2)
    } else {
        (lower.as_str(), 10)
    };
    u64::from_str_radix(digits, radix).map_err(|_| format!("invalid number: {s}"))
}

/// Offset or size argument
pub fn parse_usize(s: &str) -> Result<usize, String> {
    let value = parse_int(s)?;
    usize::try_from(value).map_err(|_| format!("number too large: {s}"))
}

/// Size argument of `hexdump`, at least 1
pub fn parse_size(s: &str) -> Result<usize, String> {
    match parse_usize(s)? {
        0 => Err("size must be at least 1".to_string()),
        size => Ok(size),
    }
}

/// One data value of `write`
pub fn parse_byte(s: &str) -> Result<u8, String> {
    let value = parse_int(s)?;
    u8::try_from(value).map_err(|_| format!("data values must be between 0 and 255 (got {s})"))
}

/// Profile number, 1 to 4
pub fn parse_profile(s: &str) -> Result<Profile, String> {
    let value = parse_int(s)?;
    Profile::new(value).map_err(|e| e.to_string())
}
