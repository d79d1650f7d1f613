//! Device command handlers.

use super::{CommandResult, Context};
use hori_controller::list_controllers;
use hori_transport::hex_string;

/// List supported controllers
pub fn devices() -> CommandResult {
    let devices = list_controllers()?;
    if devices.is_empty() {
        eprintln!("No supported controller found");
    }
    for device in devices {
        println!("{}: {}", device.index, device.info.display_name());
    }
    Ok(())
}

/// Show the raw GET_VERSION reply
pub fn version(ctx: &Context) -> CommandResult {
    ctx.with_controller(|ctrl| {
        let version = ctrl.version()?;
        println!("Version: {}", hex_string(&version));
        Ok(())
    })
}
