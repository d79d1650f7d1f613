//! Analog stick role

use std::fmt;
use std::str::FromStr;

use crate::error::ControllerError;
use crate::layout::STICK_LEN;

const LS_BYTES: [u8; STICK_LEN] = [0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0];
const RS_BYTES: [u8; STICK_LEN] = [1, 0, 0, 1, 0, 0, 2, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1];

/// Which stick the controller's analog stick acts as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stick {
    Ls,
    Rs,
}

impl Stick {
    /// Anything other than the exact RS sequence reads as LS, including
    /// patterns the firmware might use for other settings.
    pub fn decode(bytes: &[u8]) -> Self {
        if bytes == RS_BYTES.as_slice() {
            Stick::Rs
        } else {
            Stick::Ls
        }
    }

    pub fn bytes(self) -> &'static [u8; STICK_LEN] {
        match self {
            Stick::Ls => &LS_BYTES,
            Stick::Rs => &RS_BYTES,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stick::Ls => "LS",
            Stick::Rs => "RS",
        }
    }
}

impl fmt::Display for Stick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stick {
    type Err = ControllerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LS" => Ok(Stick::Ls),
            "RS" => Ok(Stick::Rs),
            _ => Err(ControllerError::UnknownStick(s.to_string())),
        }
    }
}
