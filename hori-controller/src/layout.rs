//! Profile memory layout
//!
//! Each profile owns a 421-byte configuration region:
//!
//! ```text
//! 0x000..0x020  name (16 UTF-16LE units, zero terminated)
//! 0x020..0x19e  configuration block (see PROFILE_DEFAULT)
//!   0x073..0x185  button mapping table, one 8-byte entry per button
//!   0x18a..0x19c  analog stick role
//! ```

use std::fmt;

use hori_transport::protocol::{PROFILE_COUNT, PROFILE_REGION_LEN};

use crate::error::ControllerError;

/// Size of a profile region
pub const PROFILE_LEN: usize = PROFILE_REGION_LEN;

/// Profile name field
pub const NAME_OFFSET: usize = 0x00;
pub const NAME_LEN: usize = 32;
/// Maximum name length in characters
pub const NAME_MAX_CHARS: usize = 16;

/// Start of the configuration block written by a profile reset
pub const DEFAULT_BLOCK_OFFSET: usize = 0x20;

/// Button mapping table
pub const MAPPING_OFFSET: usize = 0x73;
pub const MAPPING_END: usize = 0x185;
pub const MAPPING_ENTRY_LEN: usize = 8;

/// Analog stick role bytes
pub const STICK_OFFSET: usize = 0x18a;
pub const STICK_LEN: usize = 18;

/// Factory configuration block, written at `DEFAULT_BLOCK_OFFSET`
pub const PROFILE_DEFAULT: [u8; 382] = [
    0x00, 0x00, 0x01, 0x32, 0x32, 0x01, 0x32, 0x32, 0x01, 0x32, 0x32, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x20, 0x20, 0x20, 0x20, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x00, 0x00, 0x00, 0x01,
    0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x00, 0x00, 0x00, 0x01, 0x02, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x00, 0x00, 0x00, 0x01, 0x02, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x00, 0x00, 0x00, 0x01, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x01, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x0d, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x01, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x0e, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x0c, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x13, 0x01,
    0x37, 0x37, 0x00, 0x00, 0x01, 0x0c, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x14, 0x01, 0x37, 0x37,
    0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
];

/// Default bytes from the start of the mapping table to the end of the block
pub fn mapping_defaults() -> &'static [u8] {
    &PROFILE_DEFAULT[MAPPING_OFFSET - DEFAULT_BLOCK_OFFSET..]
}

/// A profile number, 1 to 4
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Profile(u8);

impl Profile {
    pub fn new(number: u64) -> Result<Self, ControllerError> {
        match u8::try_from(number) {
            Ok(n) if (1..=PROFILE_COUNT).contains(&n) => Ok(Self(n)),
            _ => Err(ControllerError::InvalidProfile(number)),
        }
    }

    /// Wire value of this profile
    pub fn number(self) -> u8 {
        self.0
    }

    /// All profiles in ascending order
    pub fn all() -> impl Iterator<Item = Profile> {
        (1..=PROFILE_COUNT).map(Profile)
    }
}

impl TryFrom<u8> for Profile {
    type Error = ControllerError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::new(n.into())
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_block_fills_region() {
        assert_eq!(DEFAULT_BLOCK_OFFSET + PROFILE_DEFAULT.len(), 0x19e);
        assert!(DEFAULT_BLOCK_OFFSET + PROFILE_DEFAULT.len() <= PROFILE_LEN);
        assert_eq!(mapping_defaults().len(), 299);
    }

    #[test]
    fn test_mapping_defaults_cover_stick() {
        let end = MAPPING_OFFSET + mapping_defaults().len();
        assert!(STICK_OFFSET + STICK_LEN <= end);
    }

    #[test]
    fn test_profile_range() {
        assert!(Profile::new(0).is_err());
        assert_eq!(Profile::new(1).unwrap().number(), 1);
        assert_eq!(Profile::new(4).unwrap().number(), 4);
        assert!(Profile::new(5).is_err());
        assert!(Profile::new(257).is_err());
        assert!(Profile::try_from(3u8).is_ok());
    }

    #[test]
    fn test_all_profiles() {
        let numbers: Vec<u8> = Profile::all().map(Profile::number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }
}
