//! In-memory controller model
//!
//! Answers requests the way the controller firmware does, over four
//! 421-byte profile regions. Used by the test suites of this workspace; the
//! `hori` CLI always talks to real hardware.

use std::collections::VecDeque;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::debug;
use zerocopy::FromBytes;

use crate::command::MemHeader;
use crate::error::TransportError;
use crate::frame::{build_reply, hex_string, RequestFrame};
use crate::protocol::{cmd, device, reply, PROFILE_COUNT, PROFILE_REGION_LEN};
use crate::types::{TransportDeviceInfo, TransportType};
use crate::Transport;

struct SimState {
    memory: Vec<Vec<u8>>,
    active_profile: u8,
    version: [u8; 2],
    pending: VecDeque<Vec<u8>>,
    requests: Vec<Vec<u8>>,
    drop_replies: usize,
}

/// Simulated controller implementing [`Transport`]
pub struct SimulatedController {
    state: Mutex<SimState>,
    info: TransportDeviceInfo,
}

impl Default for SimulatedController {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedController {
    /// Zero-filled memory, profile 1 active
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SimState {
                memory: vec![vec![0; PROFILE_REGION_LEN]; PROFILE_COUNT as usize],
                active_profile: 1,
                version: [0x01, 0x00],
                pending: VecDeque::new(),
                requests: Vec::new(),
                drop_replies: 0,
            }),
            info: TransportDeviceInfo {
                vid: device::VENDOR_ID,
                pid: device::PRODUCT_ID,
                transport_type: TransportType::Simulated,
                device_path: "simulated".into(),
                manufacturer: Some("HORI CO.,LTD.".into()),
                product_name: Some("Simulated Controller".into()),
            },
        }
    }

    /// Overwrite part of a profile region. Out-of-range bytes are ignored.
    pub fn load(&self, profile: u8, offset: usize, data: &[u8]) {
        let mut state = self.state.lock();
        if let Some(region) = region_mut(&mut state.memory, profile) {
            let end = (offset + data.len()).min(region.len());
            if offset < end {
                region[offset..end].copy_from_slice(&data[..end - offset]);
            }
        }
    }

    /// Copy of a profile region (empty for an invalid profile)
    pub fn memory(&self, profile: u8) -> Vec<u8> {
        let mut state = self.state.lock();
        region_mut(&mut state.memory, profile)
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn active_profile(&self) -> u8 {
        self.state.lock().active_profile
    }

    pub fn set_version(&self, version: [u8; 2]) {
        self.state.lock().version = version;
    }

    /// Every request frame written so far
    pub fn requests(&self) -> Vec<Vec<u8>> {
        self.state.lock().requests.clone()
    }

    /// Swallow the next `count` replies
    pub fn drop_next_replies(&self, count: usize) {
        self.state.lock().drop_replies = count;
    }

    /// Queue an unsolicited frame ahead of the next reply
    pub fn inject_frame(&self, frame: Vec<u8>) {
        self.state.lock().pending.push_back(frame);
    }
}

fn region_mut(memory: &mut [Vec<u8>], profile: u8) -> Option<&mut Vec<u8>> {
    if profile == 0 {
        return None;
    }
    memory.get_mut(profile as usize - 1)
}

impl SimState {
    /// Produce the reply for a request, or `None` if the firmware would stay silent
    fn handle(&mut self, request: &RequestFrame) -> Option<Vec<u8>> {
        let seq = request.sequence;
        let args = &request.payload[1..];

        match request.opcode() {
            cmd::READMEM => {
                let header = MemHeader::read_from_prefix(args).ok()?.0;
                let start = header.offset() as usize;
                let end = start + header.len as usize;
                let region = region_mut(&mut self.memory, header.profile)?;
                let data = region.get(start..end)?;

                let mut payload = Vec::with_capacity(4 + data.len());
                payload.extend_from_slice(&args[..4]);
                payload.extend_from_slice(data);
                Some(build_reply(seq, reply::MEM, &payload))
            }
            cmd::WRITEMEM => {
                let (header, data) = MemHeader::read_from_prefix(args).ok()?;
                let data = data.get(..header.len as usize)?;
                let start = header.offset() as usize;
                let region = region_mut(&mut self.memory, header.profile)?;
                region.get_mut(start..start + data.len())?.copy_from_slice(data);
                Some(build_reply(seq, reply::DONE, &[]))
            }
            cmd::SWITCH_PROFILE => {
                let profile = *args.first()?;
                if !(1..=PROFILE_COUNT).contains(&profile) {
                    return None;
                }
                self.active_profile = profile;
                Some(build_reply(seq, reply::DONE, &[]))
            }
            cmd::GET_PROFILE => Some(build_reply(seq, reply::PROFILE, &[self.active_profile, 0])),
            cmd::GET_VERSION => Some(build_reply(seq, reply::VERSION, &self.version)),
            _ => None,
        }
    }
}

impl Transport for SimulatedController {
    fn write_frame(&self, frame: &[u8]) -> Result<(), TransportError> {
        let mut state = self.state.lock();
        state.requests.push(frame.to_vec());

        let Some(request) = RequestFrame::parse(frame) else {
            debug!("Simulator ignoring malformed frame: {}", hex_string(frame));
            return Ok(());
        };

        if let Some(reply) = state.handle(&request) {
            if state.drop_replies > 0 {
                state.drop_replies -= 1;
            } else {
                state.pending.push_back(reply);
            }
        }
        Ok(())
    }

    fn read_frame(&self, _timeout: Duration) -> Result<Option<Vec<u8>>, TransportError> {
        Ok(self.state.lock().pending.pop_front())
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        &self.info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::match_reply;

    fn request(seq: u8, opcode: u8, args: &[u8]) -> Vec<u8> {
        RequestFrame::new(seq, opcode, args).unwrap().to_bytes()
    }

    #[test]
    fn test_read_echoes_header() {
        let sim = SimulatedController::new();
        sim.load(2, 0x10, &[1, 2, 3]);
        sim.write_frame(&request(5, cmd::READMEM, &[2, 0, 0x10, 3])).unwrap();

        let frame = sim.read_frame(Duration::ZERO).unwrap().unwrap();
        let payload = match_reply(&frame, 5, reply::MEM, 7).unwrap();
        assert_eq!(payload, &[2, 0, 0x10, 3, 1, 2, 3]);
    }

    #[test]
    fn test_write_then_read_back() {
        let sim = SimulatedController::new();
        sim.write_frame(&request(1, cmd::WRITEMEM, &[3, 0x01, 0x00, 2, 0xab, 0xcd]))
            .unwrap();
        let done = sim.read_frame(Duration::ZERO).unwrap().unwrap();
        assert!(match_reply(&done, 1, reply::DONE, 0).is_some());
        assert_eq!(&sim.memory(3)[0x100..0x102], &[0xab, 0xcd]);
    }

    #[test]
    fn test_out_of_range_is_silent() {
        let sim = SimulatedController::new();
        sim.write_frame(&request(1, cmd::READMEM, &[1, 0x01, 0xa0, 10])).unwrap();
        sim.write_frame(&request(2, cmd::READMEM, &[5, 0, 0, 1])).unwrap();
        sim.write_frame(&request(3, cmd::SWITCH_PROFILE, &[0])).unwrap();
        assert!(sim.read_frame(Duration::ZERO).unwrap().is_none());
        assert_eq!(sim.requests().len(), 3);
    }

    #[test]
    fn test_profile_switch() {
        let sim = SimulatedController::new();
        sim.write_frame(&request(1, cmd::SWITCH_PROFILE, &[4])).unwrap();
        sim.write_frame(&request(2, cmd::GET_PROFILE, &[])).unwrap();
        let _done = sim.read_frame(Duration::ZERO).unwrap();
        let frame = sim.read_frame(Duration::ZERO).unwrap().unwrap();
        assert_eq!(match_reply(&frame, 2, reply::PROFILE, 2).unwrap(), &[4, 0]);
        assert_eq!(sim.active_profile(), 4);
    }

    #[test]
    fn test_dropped_replies() {
        let sim = SimulatedController::new();
        sim.drop_next_replies(1);
        sim.write_frame(&request(1, cmd::GET_VERSION, &[])).unwrap();
        assert!(sim.read_frame(Duration::ZERO).unwrap().is_none());
        sim.write_frame(&request(2, cmd::GET_VERSION, &[])).unwrap();
        assert!(sim.read_frame(Duration::ZERO).unwrap().is_some());
    }
}
