//! Raw memory command handlers.

use super::{CommandResult, Context};
use hori_controller::memory::check_range;
use hori_controller::{Profile, PROFILE_LEN};
use hori_driver::hexdump::hexdump_lines;

/// Dump profile memory, eight values per line
pub fn hexdump(ctx: &Context, profile: Profile, ofs: usize, size: Option<usize>) -> CommandResult {
    let size = size.unwrap_or_else(|| PROFILE_LEN.saturating_sub(ofs).max(1));
    check_range(ofs, size)?;

    ctx.with_controller(|ctrl| {
        let data = ctrl.read_memory(profile, ofs, size)?;
        for line in hexdump_lines(&data) {
            println!("{line}");
        }
        Ok(())
    })
}

/// Write raw bytes to profile memory
pub fn write(ctx: &Context, profile: Profile, ofs: usize, data: &[u8]) -> CommandResult {
    check_range(ofs, data.len())?;

    ctx.with_controller(|ctrl| {
        println!(
            "Writing mem of profile {profile} at offset 0x{ofs:x}: {}",
            format_values(data)
        );
        ctrl.write_memory(profile, ofs, data)?;
        Ok(())
    })
}

/// `[0x1, 0xff]`
fn format_values(data: &[u8]) -> String {
    let values: Vec<String> = data.iter().map(|b| format!("0x{b:x}")).collect();
    format!("[{}]", values.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_values() {
        assert_eq!(format_values(&[1, 0xff, 0x20]), "[0x1, 0xff, 0x20]");
        assert_eq!(format_values(&[0]), "[0x0]");
    }
}
