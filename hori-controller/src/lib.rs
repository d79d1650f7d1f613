//! High-level interface to HORI GIP controller profiles
//!
//! This crate provides a convenient API for the structured fields of the
//! controller's configuration memory (profile names, button mappings, stick
//! role) on top of any [`Transport`].

pub mod error;
pub mod layout;
pub mod mapping;
pub mod memory;
pub mod name;
pub mod stick;

pub use error::ControllerError;
pub use layout::{Profile, PROFILE_DEFAULT, PROFILE_LEN};
pub use mapping::{parse_mappings, ButtonMapping, MappingRequest};
pub use stick::Stick;

use hori_transport::{
    DiscoveredDevice, GetProfile, GetVersion, Session, SwitchProfile, Timing, Transport,
    UsbTransport,
};
use tracing::info;

use layout::{
    mapping_defaults, DEFAULT_BLOCK_OFFSET, MAPPING_END, MAPPING_OFFSET, NAME_LEN, NAME_OFFSET,
    STICK_LEN, STICK_OFFSET,
};

/// List supported controllers
pub fn list_controllers() -> Result<Vec<DiscoveredDevice>, ControllerError> {
    Ok(hori_transport::list_devices()?)
}

/// Everything the CLI shows about one profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileInfo {
    pub profile: Profile,
    pub name: String,
    pub mappings: Vec<ButtonMapping>,
    pub stick: Stick,
}

/// High-level controller interface using any transport
pub struct Controller<T: Transport> {
    session: Session<T>,
}

impl Controller<UsbTransport> {
    /// Open the `index`-th connected controller
    pub fn open(index: usize, timing: Timing) -> Result<Self, ControllerError> {
        let transport = UsbTransport::open(index)?;
        Ok(Self::with_timing(transport, timing))
    }
}

impl<T: Transport> Controller<T> {
    pub fn new(transport: T) -> Self {
        Self {
            session: Session::new(transport),
        }
    }

    pub fn with_timing(transport: T, timing: Timing) -> Self {
        Self {
            session: Session::with_timing(transport, timing),
        }
    }

    /// Get the underlying session
    pub fn session(&self) -> &Session<T> {
        &self.session
    }

    pub fn into_transport(self) -> T {
        self.session.into_transport()
    }

    // === Raw memory ===

    pub fn read_memory(
        &mut self,
        profile: Profile,
        offset: usize,
        size: usize,
    ) -> Result<Vec<u8>, ControllerError> {
        memory::read_memory(&mut self.session, profile, offset, size)
    }

    pub fn write_memory(
        &mut self,
        profile: Profile,
        offset: usize,
        data: &[u8],
    ) -> Result<(), ControllerError> {
        memory::write_memory(&mut self.session, profile, offset, data)
    }

    // === Profiles ===

    /// Get the active profile number as reported by the controller
    pub fn active_profile(&mut self) -> Result<u8, ControllerError> {
        let reply = self.session.execute(&GetProfile)?;
        Ok(reply[0])
    }

    pub fn switch_profile(&mut self, profile: Profile) -> Result<(), ControllerError> {
        info!("Activating profile {profile}");
        self.session.execute(&SwitchProfile {
            profile: profile.number(),
        })?;
        Ok(())
    }

    /// Raw GET_VERSION payload
    pub fn version(&mut self) -> Result<[u8; 2], ControllerError> {
        let reply = self.session.execute(&GetVersion)?;
        Ok([reply[0], reply[1]])
    }

    /// Restore the factory configuration block; the name is kept
    pub fn reset_profile(&mut self, profile: Profile) -> Result<(), ControllerError> {
        self.write_memory(profile, DEFAULT_BLOCK_OFFSET, &PROFILE_DEFAULT)
    }

    // === Name ===

    pub fn profile_name(&mut self, profile: Profile) -> Result<String, ControllerError> {
        let field = self.read_memory(profile, NAME_OFFSET, NAME_LEN)?;
        Ok(name::decode_name(&field))
    }

    pub fn rename_profile(&mut self, profile: Profile, name: &str) -> Result<(), ControllerError> {
        let field = name::encode_name(name)?;
        self.write_memory(profile, NAME_OFFSET, &field)
    }

    // === Button mapping ===

    pub fn mappings(&mut self, profile: Profile) -> Result<Vec<ButtonMapping>, ControllerError> {
        let table = self.read_memory(profile, MAPPING_OFFSET, MAPPING_END - MAPPING_OFFSET)?;
        Ok(mapping::decode_mappings(&table))
    }

    /// Apply mapping requests in order
    pub fn apply_mappings(
        &mut self,
        profile: Profile,
        requests: &[MappingRequest],
    ) -> Result<(), ControllerError> {
        for request in requests {
            match request {
                MappingRequest::Reset => {
                    self.write_memory(profile, MAPPING_OFFSET, mapping_defaults())?;
                }
                MappingRequest::Override { button, function } => {
                    let entry = mapping::override_entry(function.code);
                    self.write_memory(profile, button.offset.into(), &entry)?;
                }
            }
        }
        Ok(())
    }

    // === Stick ===

    pub fn stick(&mut self, profile: Profile) -> Result<Stick, ControllerError> {
        let bytes = self.read_memory(profile, STICK_OFFSET, STICK_LEN)?;
        Ok(Stick::decode(&bytes))
    }

    pub fn set_stick(&mut self, profile: Profile, stick: Stick) -> Result<(), ControllerError> {
        self.write_memory(profile, STICK_OFFSET, stick.bytes())
    }

    /// Name, mappings and stick role of one profile
    pub fn profile_info(&mut self, profile: Profile) -> Result<ProfileInfo, ControllerError> {
        Ok(ProfileInfo {
            profile,
            name: self.profile_name(profile)?,
            mappings: self.mappings(profile)?,
            stick: self.stick(profile)?,
        })
    }
}
