//! Single-slot frame mailbox between the sensor side and the pipeline.
//!
//! The sensor pushes at its own rate. If the pipeline has not taken the
//! previous frame yet, the new one is dropped rather than queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender, TrySendError};
use std::sync::Arc;
use std::time::Duration;

use crate::extract::RawFrame;

/// One delivery from the sensor. `None` means "frame arrived but no data".
pub type FrameEvent = Option<RawFrame>;

/// Shared stop flag. Once raised it stays raised.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    Delivered,
    /// Previous frame still pending; this one was dropped.
    Dropped,
    /// Receiver is gone.
    Closed,
}

pub struct FrameSender {
    tx: SyncSender<FrameEvent>,
    dropped: u64,
}

impl FrameSender {
    /// Never blocks.
    pub fn offer(&mut self, event: FrameEvent) -> Offer {
        match self.tx.try_send(event) {
            Ok(()) => Offer::Delivered,
            Err(TrySendError::Full(_)) => {
                self.dropped += 1;
                Offer::Dropped
            }
            Err(TrySendError::Disconnected(_)) => Offer::Closed,
        }
    }

    /// Frames dropped because the mailbox was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

pub enum Recv {
    Frame(FrameEvent),
    Idle,
    Closed,
}

pub struct FrameReceiver {
    rx: Receiver<FrameEvent>,
}

impl FrameReceiver {
    /// Wait up to `timeout` for the next delivery.
    pub fn recv_timeout(&self, timeout: Duration) -> Recv {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Recv::Frame(event),
            Err(RecvTimeoutError::Timeout) => Recv::Idle,
            Err(RecvTimeoutError::Disconnected) => Recv::Closed,
        }
    }
}

/// Capacity-one mailbox. Dropping the sender closes it.
pub fn mailbox() -> (FrameSender, FrameReceiver) {
    let (tx, rx) = mpsc::sync_channel(1);
    (FrameSender { tx, dropped: 0 }, FrameReceiver { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_signal_shared() {
        let stop = StopSignal::new();
        let other = stop.clone();
        assert!(!other.is_raised());
        stop.raise();
        assert!(other.is_raised());
    }

    #[test]
    fn test_second_offer_is_dropped_until_drained() {
        let (mut tx, rx) = mailbox();
        assert_eq!(tx.offer(Some(RawFrame::default())), Offer::Delivered);
        assert_eq!(tx.offer(None), Offer::Dropped);
        assert_eq!(tx.dropped(), 1);

        assert!(matches!(rx.recv_timeout(Duration::from_millis(10)), Recv::Frame(Some(_))));
        assert!(matches!(rx.recv_timeout(Duration::from_millis(10)), Recv::Idle));
        assert_eq!(tx.offer(None), Offer::Delivered);
        assert!(matches!(rx.recv_timeout(Duration::from_millis(10)), Recv::Frame(None)));
    }

    #[test]
    fn test_closing_sender() {
        let (tx, rx) = mailbox();
        drop(tx);
        assert!(matches!(rx.recv_timeout(Duration::from_millis(10)), Recv::Closed));
    }

    #[test]
    fn test_offer_after_receiver_dropped() {
        let (mut tx, rx) = mailbox();
        drop(rx);
        assert_eq!(tx.offer(None), Offer::Closed);
    }
}
