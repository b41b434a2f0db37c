use std::sync::Arc;

use crate::error::{ClipError, Result};
use crate::frame::RecordedClip;
use crate::source::{FrameSource, SourcedFrame};
use crate::styles::PASSTHROUGH_STYLE;

/// Replays a recorded clip in a fixed loop.
///
/// On each pass, frame `i` is served from the stylized sequence when a
/// non-passthrough style is selected and the batch job has already produced
/// index `i`; otherwise the raw frame is served for that pass. Playback
/// never waits for the batch job.
pub struct ClipFrameSource {
    clip: Arc<RecordedClip>,
    style_index: usize,
    cursor: usize,
    seq: u64,
}

impl ClipFrameSource {
    pub fn new(clip: Arc<RecordedClip>, style_index: usize) -> Result<Self> {
        if clip.is_empty() {
            return Err(ClipError::EmptyClip.into());
        }
        Ok(Self {
            clip,
            style_index,
            cursor: 0,
            seq: 0,
        })
    }

    /// Retarget playback to a different style; takes effect on the next frame
    pub fn set_style(&mut self, style_index: usize) {
        self.style_index = style_index;
    }

    pub fn clip(&self) -> &Arc<RecordedClip> {
        &self.clip
    }
}

impl FrameSource for ClipFrameSource {
    fn next_frame(&mut self) -> Result<Option<SourcedFrame>> {
        let index = self.cursor;

        let stylized = if self.style_index != PASSTHROUGH_STYLE {
            self.clip.stylized_frame(index)
        } else {
            None
        };

        let frame = match stylized {
            Some(frame) => frame,
            None => self
                .clip
                .raw_frame(index)
                .cloned()
                .ok_or(ClipError::EmptyClip)?,
        };

        self.cursor = (self.cursor + 1) % self.clip.raw_len();
        self.seq += 1;
        Ok(Some(SourcedFrame { seq: self.seq, frame }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{ClipRecorder, Frame};

    fn clip_with(n: usize) -> Arc<RecordedClip> {
        let mut recorder = ClipRecorder::new();
        for i in 0..n {
            recorder.push(Frame::solid(2, [i as u8, 0, 0]));
        }
        Arc::new(recorder.finish())
    }

    #[test]
    fn test_empty_clip_rejected() {
        let clip = Arc::new(ClipRecorder::new().finish());
        assert!(ClipFrameSource::new(clip, 0).is_err());
    }

    #[test]
    fn test_looping_playback() {
        let clip = clip_with(3);
        let mut source = ClipFrameSource::new(clip, 0).unwrap();

        let shades: Vec<u8> = (0..7)
            .map(|_| source.next_frame().unwrap().unwrap().frame.get_pixel(0, 0)[0])
            .collect();
        assert_eq!(shades, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_passthrough_always_serves_raw() {
        let clip = clip_with(2);
        clip.push_stylized(Frame::solid(2, [99, 99, 99])).unwrap();
        clip.push_stylized(Frame::solid(2, [99, 99, 99])).unwrap();

        let mut source = ClipFrameSource::new(clip, 0).unwrap();
        let frame = source.next_frame().unwrap().unwrap().frame;
        assert_eq!(frame.get_pixel(0, 0), [0, 0, 0]);
    }

    #[test]
    fn test_retargets_per_index_as_stylized_frames_appear() {
        let clip = clip_with(3);
        clip.push_stylized(Frame::solid(2, [99, 99, 99])).unwrap();

        let mut source = ClipFrameSource::new(Arc::clone(&clip), 2).unwrap();

        // Index 0 is stylized, 1 and 2 fall back to raw for this pass
        assert_eq!(source.next_frame().unwrap().unwrap().frame.get_pixel(0, 0), [99, 99, 99]);
        assert_eq!(source.next_frame().unwrap().unwrap().frame.get_pixel(0, 0), [1, 0, 0]);
        assert_eq!(source.next_frame().unwrap().unwrap().frame.get_pixel(0, 0), [2, 0, 0]);

        // The job catches up; the next lap serves stylized frames throughout
        clip.push_stylized(Frame::solid(2, [99, 99, 99])).unwrap();
        clip.push_stylized(Frame::solid(2, [99, 99, 99])).unwrap();
        for _ in 0..3 {
            let frame = source.next_frame().unwrap().unwrap().frame;
            assert_eq!(frame.get_pixel(0, 0), [99, 99, 99]);
        }
    }

    #[test]
    fn test_set_style_back_to_passthrough() {
        let clip = clip_with(2);
        clip.push_stylized(Frame::solid(2, [99, 99, 99])).unwrap();

        let mut source = ClipFrameSource::new(clip, 1).unwrap();
        assert_eq!(source.next_frame().unwrap().unwrap().frame.get_pixel(0, 0), [99, 99, 99]);

        source.set_style(0);
        assert_eq!(source.next_frame().unwrap().unwrap().frame.get_pixel(0, 0), [1, 0, 0]);
    }
}
