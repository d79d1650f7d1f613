//! Integration tests against a real controller.
//!
//! These tests require a controller to be connected and only read memory.
//! Run with: cargo test -p hori-controller --test device_queries -- --ignored --nocapture

use hori_controller::{list_controllers, Controller, Profile, PROFILE_LEN};
use hori_transport::Timing;

#[test]
#[ignore] // requires hardware
fn read_all_profiles() {
    let devices = list_controllers().expect("USB enumeration failed");
    assert!(!devices.is_empty(), "No controller found, plug in a supported device");
    for d in &devices {
        println!("{}: {}", d.index, d.info.display_name());
    }

    let mut ctrl = Controller::open(0, Timing::default()).expect("Failed to open controller");

    let active = ctrl.active_profile().expect("GET_PROFILE failed");
    println!("Current profile is {active}");
    assert!((1..=4).contains(&active));

    for profile in Profile::all() {
        let info = ctrl.profile_info(profile).expect("profile read failed");
        println!("{}: {} (stick: {})", profile, info.name, info.stick);
        assert_eq!(info.mappings.len(), 14);

        let dump = ctrl
            .read_memory(profile, 0, PROFILE_LEN)
            .expect("full region read failed");
        assert_eq!(dump.len(), PROFILE_LEN);
    }
}
