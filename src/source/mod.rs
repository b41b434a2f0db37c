//! # Frame Sources
//!
//! Abstracts where frames currently come from: the live camera feed or a
//! recorded clip being replayed. A single still image is handled at the
//! session level (a frozen frame is just held, not streamed).

pub mod clip;
pub mod live;

pub use clip::ClipFrameSource;
pub use live::{CameraFacing, CameraRig, CaptureFeed, LiveFrameSource};

use crate::{error::Result, frame::Frame};

/// A frame tagged with a monotonically increasing sequence number
#[derive(Debug, Clone)]
pub struct SourcedFrame {
    pub seq: u64,
    pub frame: Frame,
}

/// Something that produces an ordered sequence of frames
pub trait FrameSource {
    /// Returns the next frame, or `None` when no frame is currently pending
    fn next_frame(&mut self) -> Result<Option<SourcedFrame>>;
}
