//! Button mapping table codec
//!
//! Every physical button owns an 8-byte entry inside the mapping table. An
//! entry whose byte 0 is 4 and byte 6 is 1 is an override; byte 7 then holds
//! the function code the button sends. Any other entry means the button
//! sends its own function.

use std::fmt;
use std::str::FromStr;

use crate::error::ControllerError;
use crate::layout::{MAPPING_ENTRY_LEN, MAPPING_OFFSET};

/// A physical button and its entry offset in the profile region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub name: &'static str,
    pub offset: u16,
}

/// A function a button can send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Function {
    pub name: &'static str,
    pub code: u8,
}

/// Physical buttons in display order
pub static BUTTONS: [Button; 14] = [
    Button { name: "A", offset: 0xff },
    Button { name: "B", offset: 0x10d },
    Button { name: "X", offset: 0x11b },
    Button { name: "Y", offset: 0x129 },
    Button { name: "LB", offset: 0x73 },
    Button { name: "RB", offset: 0x81 },
    Button { name: "LT", offset: 0xe3 },
    Button { name: "RT", offset: 0xf1 },
    Button { name: "LSB", offset: 0x8f },
    Button { name: "RSB", offset: 0x9d },
    Button { name: "SELECT", offset: 0x161 },
    Button { name: "GUIDE", offset: 0x153 },
    Button { name: "SHARE", offset: 0x17d },
    Button { name: "START", offset: 0x16f },
];

pub static FUNCTIONS: [Function; 27] = [
    Function { name: "A", code: 15 },
    Function { name: "B", code: 16 },
    Function { name: "X", code: 17 },
    Function { name: "Y", code: 18 },
    Function { name: "LB", code: 5 },
    Function { name: "RB", code: 6 },
    Function { name: "LT", code: 13 },
    Function { name: "RT", code: 14 },
    Function { name: "LSB", code: 7 },
    Function { name: "RSB", code: 8 },
    Function { name: "SELECT", code: 0x16 },
    Function { name: "GUIDE", code: 0x15 },
    Function { name: "SHARE", code: 0x18 },
    Function { name: "START", code: 0x17 },
    Function { name: "DPAD-UP", code: 1 },
    Function { name: "DPAD-DOWN", code: 2 },
    Function { name: "DPAD-LEFT", code: 3 },
    Function { name: "DPAD-RIGHT", code: 4 },
    Function { name: "LS-UP", code: 0x1a },
    Function { name: "LS-DOWN", code: 0x19 },
    Function { name: "LS-LEFT", code: 0x1b },
    Function { name: "LS-RIGHT", code: 0x1c },
    Function { name: "RS-UP", code: 0x1e },
    Function { name: "RS-DOWN", code: 0x1d },
    Function { name: "RS-LEFT", code: 0x1f },
    Function { name: "RS-RIGHT", code: 0x20 },
    Function { name: "DISABLED", code: DISABLED_CODE },
];

/// Code of the DISABLED function; also shown for unknown override codes
pub const DISABLED_CODE: u8 = 0x21;

/// Alternative names for the special buttons, used for both buttons and functions
pub const ALIASES: [(&str, &str); 3] = [("VIEW", "SELECT"), ("XBOX", "GUIDE"), ("MENU", "START")];

const OVERRIDE_MARKER: u8 = 4;
const OVERRIDE_ENABLED: u8 = 1;

fn canonical(name: &str) -> String {
    let upper = name.to_ascii_uppercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == upper)
        .map(|(_, target)| target.to_string())
        .unwrap_or(upper)
}

/// Look up a button by name or alias (case-insensitive)
pub fn button_by_name(name: &str) -> Option<&'static Button> {
    let name = canonical(name);
    BUTTONS.iter().find(|b| b.name == name)
}

/// Look up a function by name or alias (case-insensitive)
pub fn function_by_name(name: &str) -> Option<&'static Function> {
    let name = canonical(name);
    FUNCTIONS.iter().find(|f| f.name == name)
}

/// Reverse lookup, yielding the canonical function name
pub fn function_by_code(code: u8) -> Option<&'static Function> {
    FUNCTIONS.iter().find(|f| f.code == code)
}

/// Override entry making a button send `code`
pub fn override_entry(code: u8) -> [u8; MAPPING_ENTRY_LEN] {
    [OVERRIDE_MARKER, 0, 0, 0, 0, 0, OVERRIDE_ENABLED, code]
}

/// One change requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingRequest {
    /// Restore the factory mapping table
    Reset,
    Override {
        button: &'static Button,
        function: &'static Function,
    },
}

impl FromStr for MappingRequest {
    type Err = ControllerError;

    /// Parse `default` or `BUTTON=FUNCTION`
    fn from_str(arg: &str) -> Result<Self, Self::Err> {
        if arg.eq_ignore_ascii_case("default") {
            return Ok(MappingRequest::Reset);
        }

        let (button, function) = arg
            .split_once('=')
            .ok_or_else(|| ControllerError::InvalidMapping(arg.to_string()))?;
        let button =
            button_by_name(button).ok_or_else(|| ControllerError::UnknownButton(arg.to_string()))?;
        let function = function_by_name(function)
            .ok_or_else(|| ControllerError::UnknownFunction(arg.to_string()))?;

        Ok(MappingRequest::Override { button, function })
    }
}

/// Parse mapping arguments in order.
///
/// `default` discards everything listed before it and queues a reset;
/// arguments after it still apply on top of the reset.
pub fn parse_mappings<S: AsRef<str>>(args: &[S]) -> Result<Vec<MappingRequest>, ControllerError> {
    let mut requests = Vec::new();
    for arg in args {
        let request: MappingRequest = arg.as_ref().parse()?;
        if request == MappingRequest::Reset {
            requests.clear();
        }
        requests.push(request);
    }
    Ok(requests)
}

/// Current function of one physical button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonMapping {
    pub button: &'static str,
    pub function: &'static str,
}

impl fmt::Display for ButtonMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.button, self.function)
    }
}

/// Decode a mapping table read from `MAPPING_OFFSET`
pub fn decode_mappings(table: &[u8]) -> Vec<ButtonMapping> {
    BUTTONS
        .iter()
        .map(|button| {
            let start = button.offset as usize - MAPPING_OFFSET;
            let entry = table.get(start..start + MAPPING_ENTRY_LEN);
            let function = match entry {
                Some(e) if e[0] == OVERRIDE_MARKER && e[6] == OVERRIDE_ENABLED => {
                    function_by_code(e[7]).map_or("DISABLED", |f| f.name)
                }
                _ => button.name,
            };
            ButtonMapping {
                button: button.name,
                function,
            }
        })
        .collect()
}
