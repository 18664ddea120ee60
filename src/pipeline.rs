//! Per-frame run: extract, sanitize, encode, send.
//!
//! Runs synchronously on the caller's thread. Errors stay inside the frame
//! (and inside the body) that produced them.

use std::time::{Duration, Instant};

use crate::error::FrameError;
use crate::extract::{FrameExtractor, RawFrame};
use crate::mailbox::{FrameReceiver, Recv, StopSignal};
use crate::osc::{build_bundle, encode_bundle, AddressMap, Transport};
use crate::sanitize::sanitize_body;
use crate::skeleton::{joint_record, Body};

/// How long `run` waits on the mailbox before rechecking the stop signal.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Result of one processed frame. `bodies` holds the sanitized tracked
/// bodies in slot order, for display consumers.
#[derive(Debug, Clone, Default)]
pub struct ProcessedFrame {
    pub bodies: Vec<Body>,
    pub sent: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub frames: u64,
    pub unavailable: u64,
    pub rejected: u64,
    pub datagrams: u64,
    pub failures: u64,
}

pub struct Pipeline<T: Transport> {
    extractor: FrameExtractor,
    addresses: AddressMap,
    transport: T,
    z_floor: f32,
    joint_records: bool,
    stop: StopSignal,
    stats: Stats,
}

impl<T: Transport> Pipeline<T> {
    pub fn new(transport: T, addresses: AddressMap, z_floor: f32, stop: StopSignal) -> Self {
        Self {
            extractor: FrameExtractor::new(),
            addresses,
            transport,
            z_floor,
            joint_records: false,
            stop,
            stats: Stats::default(),
        }
    }

    /// Log each tracked body's raw joints as an alphabetical text record.
    pub fn with_joint_records(mut self, enabled: bool) -> Self {
        self.joint_records = enabled;
        self
    }

    /// Process one sensor delivery.
    ///
    /// Sends one datagram per tracked body in slot order. A failed send is
    /// logged and counted; the remaining bodies are still sent. Nothing is
    /// sent once the stop signal is raised.
    pub fn process(&mut self, raw: Option<&RawFrame>) -> Result<ProcessedFrame, FrameError> {
        let frame = match self.extractor.extract(raw) {
            Ok(frame) => frame,
            Err(e) => {
                match &e {
                    FrameError::Unavailable => self.stats.unavailable += 1,
                    FrameError::SlotOverflow { .. } => self.stats.rejected += 1,
                }
                return Err(e);
            }
        };
        self.stats.frames += 1;

        let mut out = ProcessedFrame::default();
        for body in frame.tracked_bodies() {
            if self.joint_records {
                log::info!("body {}: {}", body.slot_index, joint_record(body));
            }

            let clean = sanitize_body(body, self.z_floor);
            if self.stop.is_raised() {
                out.bodies.push(clean);
                continue;
            }

            let bundle = build_bundle(&clean, &self.addresses);
            let result = encode_bundle(&bundle).and_then(|bytes| self.transport.send(&bytes));
            match result {
                Ok(()) => {
                    out.sent += 1;
                    self.stats.datagrams += 1;
                }
                Err(e) => {
                    log::warn!("body {}: dropped bundle: {}", clean.slot_index, e);
                    out.failed += 1;
                    self.stats.failures += 1;
                }
            }
            out.bodies.push(clean);
        }

        Ok(out)
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

/// Drain `receiver` until the sender closes or `stop` is raised.
///
/// `on_frame` sees every successfully processed frame, after its datagrams
/// went out. Consumes the pipeline so the transport is released on return.
pub fn run<T, F>(mut pipeline: Pipeline<T>, receiver: FrameReceiver, stop: &StopSignal, mut on_frame: F) -> Stats
where
    T: Transport,
    F: FnMut(&ProcessedFrame),
{
    let mut report_timer = Instant::now();
    let mut last = Stats::default();

    while !stop.is_raised() {
        match receiver.recv_timeout(POLL_INTERVAL) {
            Recv::Frame(event) => match pipeline.process(event.as_ref()) {
                Ok(processed) => on_frame(&processed),
                Err(FrameError::Unavailable) => log::debug!("no frame data this cycle"),
                Err(e) => log::warn!("frame skipped: {}", e),
            },
            Recv::Idle => {}
            Recv::Closed => {
                log::info!("frame source closed");
                break;
            }
        }

        if report_timer.elapsed() >= Duration::from_secs(1) {
            let now = pipeline.stats();
            log::info!(
                "frames: {}  datagrams: {}  failed: {}",
                now.frames - last.frames,
                now.datagrams - last.datagrams,
                now.failures - last.failures
            );
            last = now;
            report_timer = Instant::now();
        }
    }

    pipeline.stats()
}
