//! USB bulk transport for the controller's vendor interface
//!
//! The configuration protocol runs over a pair of bulk endpoints on
//! interface 0. The kernel's gamepad driver is detached while the interface
//! is claimed and reattached when the transport is dropped.

use std::time::Duration;

use nusb::transfer::{Buffer, Bulk, In, Out, TransferError};
use nusb::{DeviceInfo, Endpoint, MaybeFuture};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::error::TransportError;
use crate::protocol::{device, READ_BUFFER_SIZE};
use crate::types::{DiscoveredDevice, TransportDeviceInfo, TransportType};
use crate::Transport;

/// Write timeout for a single request frame
const WRITE_TIMEOUT: Duration = Duration::from_millis(1000);

fn usb_error(e: impl std::fmt::Display) -> TransportError {
    TransportError::Usb(e.to_string())
}

fn is_supported(d: &DeviceInfo) -> bool {
    d.vendor_id() == device::VENDOR_ID && d.product_id() == device::PRODUCT_ID
}

fn device_info(d: &DeviceInfo) -> TransportDeviceInfo {
    TransportDeviceInfo {
        vid: d.vendor_id(),
        pid: d.product_id(),
        transport_type: TransportType::UsbBulk,
        device_path: format!("bus {} address {}", d.bus_id(), d.device_address()),
        manufacturer: d.manufacturer_string().map(str::to_owned),
        product_name: d.product_string().map(str::to_owned),
    }
}

fn supported_devices() -> Result<Vec<DeviceInfo>, TransportError> {
    Ok(nusb::list_devices()
        .wait()
        .map_err(usb_error)?
        .filter(is_supported)
        .collect())
}

/// List supported controllers in enumeration order
pub fn list_devices() -> Result<Vec<DiscoveredDevice>, TransportError> {
    Ok(supported_devices()?
        .iter()
        .enumerate()
        .map(|(index, d)| DiscoveredDevice {
            index,
            info: device_info(d),
        })
        .collect())
}

/// Bulk transport to one claimed controller
pub struct UsbTransport {
    out_ep: Mutex<Endpoint<Bulk, Out>>,
    in_ep: Mutex<Endpoint<Bulk, In>>,
    info: TransportDeviceInfo,
}

impl UsbTransport {
    /// Open the `index`-th supported controller (enumeration order)
    pub fn open(index: usize) -> Result<Self, TransportError> {
        let devices = supported_devices()?;
        if devices.is_empty() {
            return Err(TransportError::DeviceNotFound(format!(
                "no controller with VID {:04x} PID {:04x}",
                device::VENDOR_ID,
                device::PRODUCT_ID
            )));
        }
        let count = devices.len();
        let dev_info = devices
            .into_iter()
            .nth(index)
            .ok_or(TransportError::InvalidDeviceIndex { index, count })?;

        let info = device_info(&dev_info);
        let device = dev_info.open().wait().map_err(usb_error)?;

        // Detach the gamepad driver and claim the vendor interface
        let interface = device
            .detach_and_claim_interface(device::INTERFACE)
            .wait()
            .map_err(usb_error)?;

        let out_ep = interface
            .endpoint::<Bulk, Out>(device::ENDPOINT_OUT)
            .map_err(usb_error)?;
        let in_ep = interface
            .endpoint::<Bulk, In>(device::ENDPOINT_IN)
            .map_err(usb_error)?;

        info!(
            "Opened {} ({})",
            info.display_name(),
            info.device_path
        );

        Ok(Self {
            out_ep: Mutex::new(out_ep),
            in_ep: Mutex::new(in_ep),
            info,
        })
    }
}

impl Transport for UsbTransport {
    fn write_frame(&self, frame: &[u8]) -> Result<(), TransportError> {
        let mut buf = Buffer::new(frame.len());
        buf.extend_from_slice(frame);

        let completion = self.out_ep.lock().transfer_blocking(buf, WRITE_TIMEOUT);
        completion.status.map_err(|e| TransportError::Transfer {
            endpoint: device::ENDPOINT_OUT,
            message: e.to_string(),
        })
    }

    fn read_frame(&self, timeout: Duration) -> Result<Option<Vec<u8>>, TransportError> {
        let buf = Buffer::new(READ_BUFFER_SIZE);
        let completion = self.in_ep.lock().transfer_blocking(buf, timeout);

        match completion.status {
            Ok(()) => {
                let mut data = completion.buffer.into_vec();
                data.truncate(completion.actual_len);
                Ok(Some(data))
            }
            // transfer_blocking cancels the transfer when the timeout expires
            Err(TransferError::Cancelled) => Ok(None),
            Err(e) => Err(TransportError::Transfer {
                endpoint: device::ENDPOINT_IN,
                message: e.to_string(),
            }),
        }
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        &self.info
    }
}

// The endpoints drop after this runs; dropping the last one releases the
// interface, and nusb reattaches the kernel driver it detached on claim.
impl Drop for UsbTransport {
    fn drop(&mut self) {
        debug!("Releasing interface {}", device::INTERFACE);
        info!("Closed {}", self.info.device_path);
    }
}
