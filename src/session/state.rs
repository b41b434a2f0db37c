use crate::source::CameraFacing;
use crate::styles::PASSTHROUGH_STYLE;

/// Where frames currently come from, at the session level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    /// Continuous capture feeding the display
    Live,
    /// A single still is held; capture is paused
    Frozen,
    /// Capture runs and every frame is appended to a new clip
    Recording,
    /// A recorded clip loops on the display; capture is paused
    Replaying,
}

/// Lifecycle of the background batch re-stylization job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    Idle,
    Running,
    /// Stop requested; the worker has not yet been observed to stop
    Interrupted,
}

/// The session state machine.
///
/// Mutated exclusively by the orchestrator on the interactive context; every
/// transition method is total and rejects invalid intents by returning
/// `false` instead of changing anything. There is no terminal state: the
/// machine cycles for the life of the session.
#[derive(Debug, Clone)]
pub struct SessionState {
    mode: CaptureMode,
    style_index: usize,
    camera: CameraFacing,
    batch: BatchStatus,
}

impl SessionState {
    /// Fresh session: live capture on the rear camera, passthrough style
    pub fn new() -> Self {
        Self {
            mode: CaptureMode::Live,
            style_index: PASSTHROUGH_STYLE,
            camera: CameraFacing::Rear,
            batch: BatchStatus::Idle,
        }
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    pub fn style_index(&self) -> usize {
        self.style_index
    }

    pub fn is_passthrough(&self) -> bool {
        self.style_index == PASSTHROUGH_STYLE
    }

    pub fn camera(&self) -> CameraFacing {
        self.camera
    }

    pub fn batch_status(&self) -> BatchStatus {
        self.batch
    }

    /// Live → Frozen (shutter released before the hold threshold)
    pub fn freeze(&mut self) -> bool {
        if self.mode != CaptureMode::Live {
            return false;
        }
        self.mode = CaptureMode::Frozen;
        true
    }

    /// Live → Recording (shutter held past the threshold).
    ///
    /// Rejected while a non-passthrough style is selected: live video can
    /// only be recorded unstyled, matching the original system.
    pub fn begin_recording(&mut self) -> bool {
        if self.mode != CaptureMode::Live || !self.is_passthrough() {
            return false;
        }
        self.mode = CaptureMode::Recording;
        true
    }

    /// Recording → Replaying (shutter released)
    pub fn finish_recording(&mut self) -> bool {
        if self.mode != CaptureMode::Recording {
            return false;
        }
        self.mode = CaptureMode::Replaying;
        true
    }

    /// Frozen/Replaying → Live (clear intent)
    pub fn clear(&mut self) -> bool {
        if !matches!(self.mode, CaptureMode::Frozen | CaptureMode::Replaying) {
            return false;
        }
        self.mode = CaptureMode::Live;
        true
    }

    /// Select a style; keeps the current mode.
    ///
    /// A no-op during `Recording`. Flags a running batch job as interrupted;
    /// the orchestrator must observe the stop before starting a successor.
    pub fn select_style(&mut self, style_index: usize) -> bool {
        if self.mode == CaptureMode::Recording {
            return false;
        }
        if self.batch == BatchStatus::Running {
            self.batch = BatchStatus::Interrupted;
        }
        self.style_index = style_index;
        true
    }

    /// Switch cameras; only accepted while live
    pub fn toggle_camera(&mut self) -> bool {
        if self.mode != CaptureMode::Live {
            return false;
        }
        self.camera = self.camera.other();
        true
    }

    /// Live → Frozen onto an externally picked photo
    pub fn pick_photo(&mut self) -> bool {
        if self.mode != CaptureMode::Live {
            return false;
        }
        self.mode = CaptureMode::Frozen;
        true
    }

    pub fn set_batch_status(&mut self, status: BatchStatus) {
        self.batch = status;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session() {
        let state = SessionState::new();
        assert_eq!(state.mode(), CaptureMode::Live);
        assert_eq!(state.camera(), CameraFacing::Rear);
        assert!(state.is_passthrough());
        assert_eq!(state.batch_status(), BatchStatus::Idle);
    }

    #[test]
    fn test_photo_cycle() {
        let mut state = SessionState::new();
        assert!(state.freeze());
        assert_eq!(state.mode(), CaptureMode::Frozen);
        assert!(state.clear());
        assert_eq!(state.mode(), CaptureMode::Live);
    }

    #[test]
    fn test_recording_cycle() {
        let mut state = SessionState::new();
        assert!(state.begin_recording());
        assert!(state.finish_recording());
        assert_eq!(state.mode(), CaptureMode::Replaying);
        assert!(state.clear());
        assert_eq!(state.mode(), CaptureMode::Live);
    }

    #[test]
    fn test_recording_rejected_with_style_selected() {
        let mut state = SessionState::new();
        assert!(state.select_style(2));
        assert!(!state.begin_recording());
        assert_eq!(state.mode(), CaptureMode::Live);
    }

    #[test]
    fn test_style_swipe_during_recording_is_noop() {
        let mut state = SessionState::new();
        state.begin_recording();

        assert!(!state.select_style(3));
        assert_eq!(state.style_index(), 0);
        assert_eq!(state.mode(), CaptureMode::Recording);
    }

    #[test]
    fn test_style_swipe_interrupts_running_batch() {
        let mut state = SessionState::new();
        state.begin_recording();
        state.finish_recording();
        state.set_batch_status(BatchStatus::Running);

        assert!(state.select_style(2));
        assert_eq!(state.batch_status(), BatchStatus::Interrupted);
        assert_eq!(state.style_index(), 2);
    }

    #[test]
    fn test_camera_toggle_only_while_live() {
        let mut state = SessionState::new();
        assert!(state.toggle_camera());
        assert_eq!(state.camera(), CameraFacing::Front);

        state.begin_recording();
        assert!(!state.toggle_camera());
        assert_eq!(state.camera(), CameraFacing::Front);
        assert_eq!(state.mode(), CaptureMode::Recording);
    }

    #[test]
    fn test_invalid_transitions_rejected() {
        let mut state = SessionState::new();
        assert!(!state.finish_recording());
        assert!(!state.clear());

        state.freeze();
        assert!(!state.freeze());
        assert!(!state.begin_recording());
        assert!(!state.pick_photo());
    }
}
