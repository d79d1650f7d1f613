//! Profile field command handlers.

use super::{CommandResult, Context};
use hori_controller::name::encode_name;
use hori_controller::{parse_mappings, Profile, ProfileInfo, Stick};

/// Separator printed before each profile by `info`
const SEPARATOR: &str = "==============================================";

/// Optionally activate a profile, then show the active one
pub fn profile(ctx: &Context, switch_to: Option<Profile>) -> CommandResult {
    ctx.with_controller(|ctrl| {
        if let Some(profile) = switch_to {
            println!("Activating profile {profile}");
            ctrl.switch_profile(profile)?;
        }
        println!("Current profile is {}", ctrl.active_profile()?);
        Ok(())
    })
}

/// Apply mapping changes in order, then show the mapping table
pub fn map(ctx: &Context, profile: Profile, args: &[String]) -> CommandResult {
    let requests = parse_mappings(args)?;

    ctx.with_controller(|ctrl| {
        ctrl.apply_mappings(profile, &requests)?;
        for mapping in ctrl.mappings(profile)? {
            println!("{mapping}");
        }
        Ok(())
    })
}

/// Restore the factory block of a profile
pub fn reset(ctx: &Context, profile: Profile) -> CommandResult {
    ctx.with_controller(|ctrl| {
        println!("Resetting profile {profile} to default values");
        ctrl.reset_profile(profile)?;
        Ok(())
    })
}

/// List names, or rename one profile and show the result
pub fn name(ctx: &Context, profile: Option<Profile>, new_name: Option<&str>) -> CommandResult {
    if let Some(new_name) = new_name {
        encode_name(new_name)?;
    }

    ctx.with_controller(|ctrl| {
        let Some(profile) = profile else {
            for profile in Profile::all() {
                println!("{profile}: {}", ctrl.profile_name(profile)?);
            }
            return Ok(());
        };

        if let Some(new_name) = new_name {
            ctrl.rename_profile(profile, new_name)?;
        }
        println!("{profile}: {}", ctrl.profile_name(profile)?);
        Ok(())
    })
}

/// Optionally set the stick role, then show it
pub fn stick(ctx: &Context, profile: Profile, stick: Option<Stick>) -> CommandResult {
    ctx.with_controller(|ctrl| {
        if let Some(stick) = stick {
            ctrl.set_stick(profile, stick)?;
        }
        println!("stick: {}", ctrl.stick(profile)?);
        Ok(())
    })
}

/// Show every profile
pub fn info(ctx: &Context) -> CommandResult {
    ctx.with_controller(|ctrl| {
        for profile in Profile::all() {
            let info = ctrl.profile_info(profile)?;
            print!("{}", format_info(&info));
        }
        Ok(())
    })
}

fn format_info(info: &ProfileInfo) -> String {
    let mut out = format!("{SEPARATOR}\n{}: {}\n", info.profile, info.name);
    for mapping in &info.mappings {
        out.push_str(&format!("{mapping}\n"));
    }
    out.push_str(&format!("stick: {}\n", info.stick));
    out
}
