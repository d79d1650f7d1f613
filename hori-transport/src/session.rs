//! Command session: sequence numbering and reply matching
//!
//! A [`Session`] owns the transport and the sequence counter. Every request
//! sent through it gets the next sequence number (1, 2, ... 255, 1, ...), and
//! replies are matched against that number and the expected reply type.
//! A failed transport read does not end the wait: polling continues until
//! the reply deadline, and the failures are logged once the wait is over.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::command::Command;
use crate::error::{ReplyTimeout, TransportError};
use crate::frame::{hex_string, match_reply, RequestFrame};
use crate::protocol::{cmd, reply, timing, REJECTED_PREFIX_LEN};
use crate::Transport;

/// Reply wait timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Deadline for a matching reply, measured from the start of the wait
    pub reply_deadline: Duration,
    /// Timeout of each transport read inside the wait
    pub read_timeout: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            reply_deadline: Duration::from_millis(timing::REPLY_DEADLINE_MS),
            read_timeout: Duration::from_millis(timing::READ_TIMEOUT_MS),
        }
    }
}

/// Frames received from the transport until a deadline passes.
///
/// Yields every frame read. Reads that time out or fail are retried while
/// the deadline has not passed; failures are counted in
/// [`read_errors`](Self::read_errors).
pub struct ReplyWait<'a, T: Transport + ?Sized> {
    transport: &'a T,
    deadline: Instant,
    read_timeout: Duration,
    read_errors: usize,
}

impl<'a, T: Transport + ?Sized> ReplyWait<'a, T> {
    pub fn new(transport: &'a T, timing: Timing) -> Self {
        Self {
            transport,
            deadline: Instant::now() + timing.reply_deadline,
            read_timeout: timing.read_timeout,
            read_errors: 0,
        }
    }

    /// Number of failed transport reads so far
    pub fn read_errors(&self) -> usize {
        self.read_errors
    }
}

impl<T: Transport + ?Sized> Iterator for ReplyWait<'_, T> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        while Instant::now() < self.deadline {
            match self.transport.read_frame(self.read_timeout) {
                Ok(Some(frame)) => return Some(frame),
                Ok(None) => {}
                Err(e) => {
                    self.read_errors += 1;
                    debug!("Read failed while waiting for reply: {e}");
                }
            }
        }
        None
    }
}

/// Request/reply session over a transport
pub struct Session<T: Transport> {
    transport: T,
    /// Last issued sequence number (0 before the first request)
    sequence: u8,
    timing: Timing,
}

impl<T: Transport> Session<T> {
    pub fn new(transport: T) -> Self {
        Self::with_timing(transport, Timing::default())
    }

    pub fn with_timing(transport: T, timing: Timing) -> Self {
        Self {
            transport,
            sequence: 0,
            timing,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Last sequence number issued by this session
    pub fn last_sequence(&self) -> u8 {
        self.sequence
    }

    fn next_sequence(&mut self) -> u8 {
        self.sequence = match self.sequence {
            u8::MAX => 1,
            n => n + 1,
        };
        self.sequence
    }

    /// Frame and send a command, returning the sequence number it was sent with
    pub fn send<C: Command>(&mut self, command: &C) -> Result<u8, TransportError> {
        let seq = self.next_sequence();
        let frame = RequestFrame::new(seq, C::OPCODE, &command.to_args())?;
        let bytes = frame.to_bytes();
        debug!(
            "TX {} seq=0x{seq:02x}: {}",
            cmd::name(C::OPCODE),
            hex_string(&bytes)
        );
        self.transport.write_frame(&bytes)?;
        Ok(seq)
    }

    /// Wait for the reply with `sequence` and `reply_type`, returning its
    /// first `min_len` payload bytes.
    pub fn expect(
        &self,
        sequence: u8,
        reply_type: u8,
        min_len: usize,
    ) -> Result<Vec<u8>, TransportError> {
        let mut rejected = Vec::new();
        let mut wait = ReplyWait::new(&self.transport, self.timing);

        for frame in wait.by_ref() {
            if let Some(payload) = match_reply(&frame, sequence, reply_type, min_len) {
                debug!(
                    "RX {} seq=0x{sequence:02x}: {}",
                    reply::name(reply_type),
                    hex_string(&frame)
                );
                return Ok(payload.to_vec());
            }
            debug!("Ignoring frame: {}", hex_string(&frame));
            rejected.push(frame[..frame.len().min(REJECTED_PREFIX_LEN)].to_vec());
        }

        if wait.read_errors() > 0 {
            warn!(
                "{} read(s) from {} failed while waiting for reply seq=0x{sequence:02x}",
                wait.read_errors(),
                self.transport.device_info().display_name()
            );
        }

        Err(ReplyTimeout {
            sequence,
            reply_type,
            rejected,
        }
        .into())
    }

    /// Send a command and wait for its reply payload
    pub fn execute<C: Command>(&mut self, command: &C) -> Result<Vec<u8>, TransportError> {
        let seq = self.send(command)?;
        self.expect(seq, C::REPLY, command.reply_len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{GetProfile, ReadMem, SwitchProfile};
    use crate::frame::build_reply;
    use crate::types::{TransportDeviceInfo, TransportType};
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// Replays a fixed list of inbound frames and records outbound ones
    struct ScriptedTransport {
        info: TransportDeviceInfo,
        replies: Mutex<VecDeque<Vec<u8>>>,
        written: Mutex<Vec<Vec<u8>>>,
        /// Reads that fail before the scripted replies are handed out
        failing_reads: Mutex<usize>,
    }

    impl ScriptedTransport {
        fn new(replies: Vec<Vec<u8>>) -> Self {
            Self {
                info: TransportDeviceInfo {
                    vid: 0,
                    pid: 0,
                    transport_type: TransportType::Simulated,
                    device_path: "scripted".into(),
                    manufacturer: None,
                    product_name: None,
                },
                replies: Mutex::new(replies.into()),
                written: Mutex::new(Vec::new()),
                failing_reads: Mutex::new(0),
            }
        }

        fn with_failing_reads(replies: Vec<Vec<u8>>, failures: usize) -> Self {
            let transport = Self::new(replies);
            *transport.failing_reads.lock() = failures;
            transport
        }
    }

    impl Transport for ScriptedTransport {
        fn write_frame(&self, frame: &[u8]) -> Result<(), TransportError> {
            self.written.lock().push(frame.to_vec());
            Ok(())
        }

        fn read_frame(&self, _timeout: Duration) -> Result<Option<Vec<u8>>, TransportError> {
            let mut failing = self.failing_reads.lock();
            if *failing > 0 {
                *failing -= 1;
                return Err(TransportError::Transfer {
                    endpoint: 0x82,
                    message: "pipe error".into(),
                });
            }
            Ok(self.replies.lock().pop_front())
        }

        fn device_info(&self) -> &TransportDeviceInfo {
            &self.info
        }
    }

    fn fast_timing() -> Timing {
        Timing {
            reply_deadline: Duration::from_millis(20),
            read_timeout: Duration::from_millis(5),
        }
    }

    #[test]
    fn test_sequence_starts_at_one_and_increments() {
        let mut session = Session::new(ScriptedTransport::new(vec![]));
        assert_eq!(session.send(&GetProfile).unwrap(), 1);
        assert_eq!(session.send(&GetProfile).unwrap(), 2);
        assert_eq!(session.send(&SwitchProfile { profile: 1 }).unwrap(), 3);

        let written = session.transport().written.lock();
        assert_eq!(written[0], vec![0x0f, 0x00, 1, 1, 0x0b]);
        assert_eq!(written[2], vec![0x0f, 0x00, 3, 2, 0x07, 1]);
    }

    #[test]
    fn test_sequence_wraps_past_zero() {
        let mut session = Session::new(ScriptedTransport::new(vec![]));
        session.sequence = 254;
        assert_eq!(session.send(&GetProfile).unwrap(), 255);
        assert_eq!(session.send(&GetProfile).unwrap(), 1);
    }

    #[test]
    fn test_execute_skips_unrelated_frames() {
        let replies = vec![
            // stale reply from an earlier sequence
            build_reply(9, reply::PROFILE, &[4, 0]),
            // right sequence, wrong type
            build_reply(1, reply::DONE, &[]),
            build_reply(1, reply::PROFILE, &[2, 0]),
        ];
        let mut session = Session::with_timing(ScriptedTransport::new(replies), fast_timing());
        let payload = session.execute(&GetProfile).unwrap();
        assert_eq!(payload, vec![2, 0]);
    }

    #[test]
    fn test_execute_mem_reply_length() {
        let mut data = vec![0, 0, 0x20, 3];
        data.extend_from_slice(&[0xaa, 0xbb, 0xcc]);
        let replies = vec![build_reply(1, reply::MEM, &data)];
        let mut session = Session::with_timing(ScriptedTransport::new(replies), fast_timing());
        let payload = session.execute(&ReadMem::new(1, 0x20, 3)).unwrap();
        assert_eq!(payload, data);
    }

    #[test]
    fn test_timeout_reports_rejected_frames() {
        let stray = build_reply(7, reply::MEM, &[0; 20]);
        let mut session =
            Session::with_timing(ScriptedTransport::new(vec![stray.clone()]), fast_timing());

        let err = session.execute(&GetProfile).unwrap_err();
        match err {
            TransportError::NoReply(timeout) => {
                assert_eq!(timeout.sequence, 1);
                assert_eq!(timeout.reply_type, reply::PROFILE);
                assert_eq!(timeout.rejected, vec![stray[..REJECTED_PREFIX_LEN].to_vec()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_timeout_without_any_frames() {
        let session = Session::with_timing(ScriptedTransport::new(vec![]), fast_timing());
        let start = Instant::now();
        let err = session.expect(1, reply::DONE, 0).unwrap_err();
        assert!(matches!(err, TransportError::NoReply(_)));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_read_errors_do_not_end_the_wait() {
        let replies = vec![build_reply(1, reply::PROFILE, &[3, 0])];
        let transport = ScriptedTransport::with_failing_reads(replies, 3);
        let mut session = Session::with_timing(transport, fast_timing());

        assert_eq!(session.execute(&GetProfile).unwrap(), vec![3, 0]);
        assert_eq!(*session.transport().failing_reads.lock(), 0);
    }

    #[test]
    fn test_read_errors_end_in_timeout() {
        let transport = ScriptedTransport::with_failing_reads(vec![], usize::MAX);
        let session = Session::with_timing(transport, fast_timing());

        let mut wait = ReplyWait::new(session.transport(), session.timing);
        assert!(wait.next().is_none());
        assert!(wait.read_errors() > 0);

        let err = session.expect(1, reply::DONE, 0).unwrap_err();
        match err {
            TransportError::NoReply(timeout) => assert!(timeout.rejected.is_empty()),
            other => panic!("unexpected error: {other}"),
        }
    }
}
