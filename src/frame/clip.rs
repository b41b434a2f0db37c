use std::sync::{Mutex, MutexGuard};

use crate::error::{ClipError, Result};
use crate::frame::types::Frame;

/// Frames captured during one recording session, paired with the stylized
/// frames produced by the most recent batch job.
///
/// The raw sequence is immutable once the clip is built (see
/// [`ClipRecorder`]). The stylized sequence grows index-by-index and is
/// always a prefix of the raw sequence: empty, a strict prefix (job running
/// or stopped early), or fully matching. The batch worker is the only
/// writer; replay and the orchestrator read through the same lock.
#[derive(Debug)]
pub struct RecordedClip {
    raw: Vec<Frame>,
    stylized: Mutex<Vec<Frame>>,
}

impl RecordedClip {
    pub fn raw_len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn raw_frame(&self, index: usize) -> Option<&Frame> {
        self.raw.get(index)
    }

    pub fn stylized_len(&self) -> usize {
        self.stylized_lock().len()
    }

    /// Stylized frame at `index`, if the batch job has produced it yet
    pub fn stylized_frame(&self, index: usize) -> Option<Frame> {
        self.stylized_lock().get(index).cloned()
    }

    /// Append the next stylized frame.
    ///
    /// Fails if the prefix invariant would be violated; the frame is dropped
    /// in that case.
    pub fn push_stylized(&self, frame: Frame) -> Result<()> {
        let mut stylized = self.stylized_lock();
        if stylized.len() >= self.raw.len() {
            return Err(ClipError::StylizedOverrun {
                len: stylized.len() + 1,
                raw_len: self.raw.len(),
            }
            .into());
        }
        stylized.push(frame);
        Ok(())
    }

    /// Discard all stylized frames; called at the start of every batch job
    pub fn clear_stylized(&self) {
        self.stylized_lock().clear();
    }

    pub fn stylized_complete(&self) -> bool {
        self.stylized_lock().len() == self.raw.len()
    }

    // A poisoned lock only means a batch worker died mid-push; the frames
    // already stored are still a valid prefix.
    fn stylized_lock(&self) -> MutexGuard<'_, Vec<Frame>> {
        self.stylized.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Append-only frame buffer used while a recording is in progress.
///
/// Consuming the recorder with [`ClipRecorder::finish`] freezes the raw
/// sequence for the lifetime of the clip.
#[derive(Debug, Default)]
pub struct ClipRecorder {
    frames: Vec<Frame>,
}

impl ClipRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn finish(self) -> RecordedClip {
        RecordedClip {
            raw: self.frames,
            stylized: Mutex::new(Vec::new()),
        }
    }
}
