//! Shared pieces of the `hori` and `hori-isolate` binaries

pub mod config;
pub mod hexdump;
pub mod isolate;
pub mod numeric;
