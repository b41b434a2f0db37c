//! # Stylecam
//!
//! Coordination core of a neural-style-transfer camera: live capture, photo
//! and clip recording, looping replay, and asynchronous batch re-stylization
//! of recorded clips.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::{mpsc, Arc};
//! use std::time::Instant;
//!
//! use stylecam::{
//!     config::Config,
//!     session::{DisplaySink, Orchestrator},
//!     source::{CameraRig, LiveFrameSource},
//!     styles::{StyleCatalog, ToyStylizer},
//! };
//! # use stylecam::source::{CameraFacing, CaptureFeed};
//! # struct Feed;
//! # impl CaptureFeed for Feed {
//! #     fn facing(&self) -> CameraFacing { CameraFacing::Rear }
//! #     fn start(&mut self) -> stylecam::Result<()> { Ok(()) }
//! #     fn stop(&mut self) {}
//! #     fn is_running(&self) -> bool { true }
//! # }
//!
//! # fn main() -> stylecam::Result<()> {
//! let (frame_tx, frame_rx) = mpsc::channel();
//! let rig = CameraRig::new(Box::new(Feed), Box::new(Feed));
//! let sink: DisplaySink = Box::new(|frame| {
//!     // hand the frame to the display layer
//!     let _ = frame;
//! });
//!
//! let mut session = Orchestrator::new(
//!     Config::default(),
//!     StyleCatalog::builtin(),
//!     Arc::new(ToyStylizer::default()),
//!     rig,
//!     LiveFrameSource::new(frame_rx),
//!     sink,
//! )?;
//!
//! frame_tx.send(stylecam::frame::Frame::solid(720, [0, 0, 0])).ok();
//! session.pump_capture(Instant::now())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`session`] - State machine, batch re-stylization, and the orchestrator
//! - [`source`] - Live capture and clip replay frame sources
//! - [`styles`] - Style catalog and the stylizer seam
//! - [`frame`] - Frame and recorded-clip types
//! - [`config`] - Configuration management
//!
//! ## Plugging In a Real Stylizer
//!
//! The bundled [`ToyStylizer`](styles::ToyStylizer) stands in for a neural
//! network. Any inference backend slots in by implementing the
//! [`Stylizer`](styles::Stylizer) trait:
//!
//! ```rust,no_run
//! use stylecam::frame::Frame;
//! use stylecam::styles::{Style, Stylizer};
//! use stylecam::Result;
//!
//! struct MyModel;
//!
//! impl Stylizer for MyModel {
//!     fn stylize(&self, frame: &Frame, style: &Style) -> Result<Frame> {
//!         // run inference for `style` here
//!         Ok(frame.clone())
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod frame;
pub mod session;
pub mod source;
pub mod styles;

// Re-export commonly used types for convenience
pub use crate::{
    config::Config,
    error::{Result, SessionError},
    frame::{Frame, RecordedClip},
    session::{Orchestrator, SessionState},
    styles::{StyleCatalog, Stylizer},
};
