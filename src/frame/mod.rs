//! # Frame Data Model
//!
//! Owned image buffers and the recorded-clip container shared between the
//! interactive path and the batch re-stylization job.

pub mod clip;
pub mod types;

pub use clip::{ClipRecorder, RecordedClip};
pub use types::{Frame, Orientation};
