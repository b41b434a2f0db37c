use std::fmt;
use std::sync::mpsc::{Receiver, TryRecvError};

use tracing::debug;

use crate::error::{CaptureError, Result};
use crate::frame::Frame;
use crate::source::{FrameSource, SourcedFrame};

/// Which physical camera a feed represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraFacing {
    Front,
    Rear,
}

impl CameraFacing {
    pub fn other(self) -> Self {
        match self {
            Self::Front => Self::Rear,
            Self::Rear => Self::Front,
        }
    }
}

impl fmt::Display for CameraFacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Front => write!(f, "front"),
            Self::Rear => write!(f, "rear"),
        }
    }
}

/// Control surface of one logical camera stream.
///
/// The real system backs this with a capture session per camera; tests and
/// the demo binary use synthetic feeds. Starting an unavailable device fails
/// with [`CaptureError::DeviceUnavailable`].
pub trait CaptureFeed: Send {
    fn facing(&self) -> CameraFacing;
    fn start(&mut self) -> Result<()>;
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Pair of camera feeds with at most one running at any time.
///
/// Switching cameras is a stop-then-start handshake; the two feeds are never
/// concurrently active.
pub struct CameraRig {
    front: Box<dyn CaptureFeed>,
    rear: Box<dyn CaptureFeed>,
    active: CameraFacing,
}

impl CameraRig {
    /// The rear camera is active initially, matching the original app
    pub fn new(front: Box<dyn CaptureFeed>, rear: Box<dyn CaptureFeed>) -> Self {
        Self {
            front,
            rear,
            active: CameraFacing::Rear,
        }
    }

    pub fn active(&self) -> CameraFacing {
        self.active
    }

    pub fn is_running(&self) -> bool {
        self.active_feed().is_running()
    }

    /// Start the active feed
    pub fn start(&mut self) -> Result<()> {
        self.active_feed_mut().start()
    }

    /// Stop the active feed
    pub fn stop(&mut self) {
        self.active_feed_mut().stop();
    }

    /// Switch to the other camera.
    ///
    /// The current feed is stopped before the other one starts. If the rig
    /// was stopped, it stays stopped after the switch.
    pub fn toggle(&mut self) -> Result<()> {
        let was_running = self.is_running();
        self.active_feed_mut().stop();
        self.active = self.active.other();
        debug!("switched to {} camera", self.active);
        if was_running {
            self.active_feed_mut().start()?;
        }
        Ok(())
    }

    fn active_feed(&self) -> &dyn CaptureFeed {
        match self.active {
            CameraFacing::Front => self.front.as_ref(),
            CameraFacing::Rear => self.rear.as_ref(),
        }
    }

    fn active_feed_mut(&mut self) -> &mut dyn CaptureFeed {
        match self.active {
            CameraFacing::Front => self.front.as_mut(),
            CameraFacing::Rear => self.rear.as_mut(),
        }
    }
}

/// Live capture source with drop-late backpressure.
///
/// Only the newest pending frame is ever surfaced; any older frames still
/// queued behind it are discarded so a slow consumer can never build up a
/// capture backlog.
pub struct LiveFrameSource {
    rx: Receiver<Frame>,
    seq: u64,
}

impl LiveFrameSource {
    pub fn new(rx: Receiver<Frame>) -> Self {
        Self { rx, seq: 0 }
    }
}

impl FrameSource for LiveFrameSource {
    fn next_frame(&mut self) -> Result<Option<SourcedFrame>> {
        let mut latest = None;
        let mut dropped = 0usize;

        loop {
            match self.rx.try_recv() {
                Ok(frame) => {
                    if latest.is_some() {
                        dropped += 1;
                    }
                    latest = Some(frame);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if latest.is_none() {
                        return Err(CaptureError::FeedDisconnected.into());
                    }
                    break;
                }
            }
        }

        if dropped > 0 {
            debug!("discarded {} late capture frames", dropped);
        }

        Ok(latest.map(|frame| {
            self.seq += 1;
            SourcedFrame { seq: self.seq, frame }
        }))
    }
}
