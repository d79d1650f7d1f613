//! Common types for transport layer

/// Transport type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportType {
    /// USB bulk endpoints on the vendor interface
    UsbBulk,
    /// In-memory controller model
    Simulated,
}

/// Device identification information
#[derive(Debug, Clone)]
pub struct TransportDeviceInfo {
    /// USB Vendor ID
    pub vid: u16,
    /// USB Product ID
    pub pid: u16,
    /// Transport type
    pub transport_type: TransportType,
    /// Bus location or other transport-specific identifier
    pub device_path: String,
    /// Manufacturer string if available
    pub manufacturer: Option<String>,
    /// Product name if available
    pub product_name: Option<String>,
}

impl TransportDeviceInfo {
    /// `<manufacturer> <product>` as shown by the device listing
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.manufacturer.as_deref().unwrap_or("Unknown"),
            self.product_name.as_deref().unwrap_or("Unknown")
        )
    }
}

/// A supported controller found during enumeration
#[derive(Debug, Clone)]
pub struct DiscoveredDevice {
    /// Position in enumeration order, as accepted by `-d`
    pub index: usize,
    pub info: TransportDeviceInfo,
}
