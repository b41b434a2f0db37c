use std::sync::{mpsc, Arc};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::{Result, StylizeError},
    frame::{ClipRecorder, Frame, Orientation, RecordedClip},
    session::batch::{BatchEvent, BatchHandle, BatchOutcome, BatchRestylizer},
    session::state::{BatchStatus, CaptureMode, SessionState},
    source::{CameraFacing, CameraRig, ClipFrameSource, FrameSource, LiveFrameSource},
    styles::{Style, StyleCatalog, Stylizer},
};

/// Direction of a style swipe gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

/// Receives one frame per "frame ready" event; the display layer behind it
/// is out of scope
pub type DisplaySink = Box<dyn FnMut(Frame) + Send>;

/// Translates discrete user intents into state transitions and component
/// calls.
///
/// All intent handlers run on the interactive context and are total: they
/// either apply a valid transition or leave the session unchanged. The
/// orchestrator owns the single active batch handle; a successor job can
/// only start once the previous worker has been interrupted and joined.
pub struct Orchestrator {
    config: Config,
    state: SessionState,
    catalog: StyleCatalog,
    stylizer: Arc<dyn Stylizer>,
    restylizer: BatchRestylizer,
    rig: CameraRig,
    live: LiveFrameSource,
    playback: Option<ClipFrameSource>,
    recorder: Option<ClipRecorder>,
    clip: Option<Arc<RecordedClip>>,
    /// Pre-stylization still retained so a style swipe restyles from the
    /// original rather than compounding effects
    frozen_raw: Option<Frame>,
    last_raw: Option<Frame>,
    batch: Option<BatchHandle>,
    batch_rx: Option<mpsc::Receiver<BatchEvent>>,
    batch_progress: f32,
    shutter_down_at: Option<Instant>,
    affordances_enabled: bool,
    sink: DisplaySink,
}

impl Orchestrator {
    /// Build a session and start the capture rig.
    ///
    /// A `DeviceUnavailable` error here means the caller should fall back to
    /// photo-only operation.
    pub fn new(
        config: Config,
        catalog: StyleCatalog,
        stylizer: Arc<dyn Stylizer>,
        mut rig: CameraRig,
        live: LiveFrameSource,
        sink: DisplaySink,
    ) -> Result<Self> {
        rig.start()?;
        let restylizer = BatchRestylizer::new(Arc::clone(&stylizer));
        Ok(Self {
            config,
            state: SessionState::new(),
            catalog,
            stylizer,
            restylizer,
            rig,
            live,
            playback: None,
            recorder: None,
            clip: None,
            frozen_raw: None,
            last_raw: None,
            batch: None,
            batch_rx: None,
            batch_progress: 0.0,
            shutter_down_at: None,
            affordances_enabled: false,
            sink,
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn catalog(&self) -> &StyleCatalog {
        &self.catalog
    }

    pub fn current_clip(&self) -> Option<&Arc<RecordedClip>> {
        self.clip.as_ref()
    }

    /// Fraction of the active (or last) batch job that has completed
    pub fn batch_progress(&self) -> f32 {
        self.batch_progress
    }

    /// Whether the save/clear affordances are currently usable.
    ///
    /// Disabled while a batch job runs; after an interrupted job they stay
    /// disabled until the successor job reaches a terminal outcome.
    pub fn can_save_clear(&self) -> bool {
        self.affordances_enabled
    }

    // ==========================================
    // CAPTURE PATH
    // ==========================================

    /// Pull the newest capture frame (late frames are discarded upstream)
    /// and route it per the current mode.
    ///
    /// Also the point where a held shutter promotes the session into
    /// `Recording`: the promotion happens on frame arrival so a clip always
    /// holds at least one frame by the time the shutter is released.
    pub fn pump_capture(&mut self, now: Instant) -> Result<()> {
        if matches!(self.state.mode(), CaptureMode::Frozen | CaptureMode::Replaying) {
            return Ok(());
        }

        let Some(sourced) = self.live.next_frame()? else {
            return Ok(());
        };

        let mut frame = sourced.frame;
        if self.rig.active() == CameraFacing::Front {
            frame = frame.with_orientation(Orientation::Mirrored);
        }
        self.last_raw = Some(frame.clone());

        self.maybe_begin_recording(now);

        match self.state.mode() {
            CaptureMode::Recording => {
                if let Some(recorder) = self.recorder.as_mut() {
                    recorder.push(frame.clone());
                }
                (self.sink)(frame);
            }
            CaptureMode::Live => {
                let displayed = self.stylize_for_display(frame);
                (self.sink)(displayed);
            }
            CaptureMode::Frozen | CaptureMode::Replaying => {}
        }

        Ok(())
    }

    /// Advance looping playback by one frame; also delivers pending batch
    /// events so progress and completion are observed on this context.
    pub fn on_playback_tick(&mut self) -> Result<()> {
        self.poll_batch_events();

        if self.state.mode() != CaptureMode::Replaying {
            return Ok(());
        }
        if let Some(playback) = self.playback.as_mut() {
            if let Some(sourced) = playback.next_frame()? {
                (self.sink)(sourced.frame);
            }
        }
        Ok(())
    }

    // ==========================================
    // USER INTENTS
    // ==========================================

    /// Shutter pressed; whether this becomes a photo or a recording depends
    /// on how long it is held
    pub fn on_shutter_down(&mut self, now: Instant) {
        if self.state.mode() == CaptureMode::Live {
            self.shutter_down_at = Some(now);
        }
    }

    /// Shutter released: a short press freezes the current frame, releasing
    /// an active recording moves to looping replay
    pub fn on_shutter_up(&mut self, _now: Instant) -> Result<()> {
        let held = self.shutter_down_at.take().is_some();

        match self.state.mode() {
            CaptureMode::Recording => {
                self.rig.stop();
                self.state.finish_recording();

                let recorder = self.recorder.take().unwrap_or_default();
                info!("recording stopped: {} frames", recorder.len());
                let clip = Arc::new(recorder.finish());

                // Recording requires the passthrough style, so this only
                // fires if that constraint is ever relaxed
                if !self.state.is_passthrough() {
                    self.affordances_enabled = false;
                    self.start_batch(Arc::clone(&clip))?;
                } else {
                    self.affordances_enabled = true;
                }

                self.playback = Some(ClipFrameSource::new(
                    Arc::clone(&clip),
                    self.state.style_index(),
                )?);
                self.clip = Some(clip);
            }
            CaptureMode::Live if held => {
                self.rig.stop();
                self.state.freeze();
                self.frozen_raw = self.last_raw.clone();
                self.affordances_enabled = true;
                debug!("capture frozen on last frame");
            }
            _ => {}
        }

        Ok(())
    }

    /// Discard the current capture and resume live preview
    pub fn on_clear(&mut self) -> Result<()> {
        if !self.state.clear() {
            return Ok(());
        }

        self.stop_active_batch();
        self.playback = None;
        self.clip = None;
        self.frozen_raw = None;
        self.batch_progress = 0.0;
        self.affordances_enabled = false;
        self.rig.start()?;
        info!("capture cleared, live preview resumed");
        Ok(())
    }

    /// Swipe to the neighboring style in the catalog
    pub fn on_style_swipe(&mut self, direction: SwipeDirection) -> Result<()> {
        let current = self.state.style_index();
        let target = match direction {
            SwipeDirection::Left => self.catalog.next_index(current),
            SwipeDirection::Right => self.catalog.prev_index(current),
        };
        self.select_style(target)
    }

    /// Select a style by catalog index.
    ///
    /// No-op during `Recording`. Any running batch job is interrupted and
    /// joined before a successor starts; that join is the synchronization
    /// barrier guaranteeing jobs never overlap.
    pub fn select_style(&mut self, target: usize) -> Result<()> {
        if self.catalog.get(target).is_none() {
            return Err(StylizeError::UnknownStyle { index: target }.into());
        }

        if !self.state.select_style(target) {
            debug!("style change rejected while recording");
            return Ok(());
        }
        debug!("style selected: {}", target);

        self.stop_active_batch();

        match self.state.mode() {
            CaptureMode::Frozen => self.refresh_frozen_still(),
            CaptureMode::Replaying => {
                if let Some(playback) = self.playback.as_mut() {
                    playback.set_style(target);
                }
                if self.state.is_passthrough() {
                    // No successor job will run; the raw clip is immediately
                    // usable, so save/clear must not stay locked out
                    self.affordances_enabled = true;
                } else if let Some(clip) = self.clip.clone() {
                    self.affordances_enabled = false;
                    self.start_batch(clip)?;
                }
                Ok(())
            }
            // Live frames pick up the new style on arrival
            _ => Ok(()),
        }
    }

    /// Switch between the front and rear camera; only valid while live
    pub fn on_toggle_camera(&mut self) -> Result<bool> {
        if !self.state.toggle_camera() {
            debug!("camera toggle rejected in {:?}", self.state.mode());
            return Ok(false);
        }
        if let Err(err) = self.rig.toggle() {
            // Rig is stopped on the new camera; undo the state flip and
            // surface the failure
            self.state.toggle_camera();
            return Err(err);
        }
        Ok(true)
    }

    /// An externally picked image becomes the frozen still
    pub fn on_photo_picked(&mut self, frame: Frame) -> Result<()> {
        if !self.state.pick_photo() {
            return Ok(());
        }
        self.rig.stop();
        self.frozen_raw = Some(frame);
        self.affordances_enabled = true;
        self.refresh_frozen_still()
    }

    /// Pick cancelled: resume live capture if it was paused for the picker
    pub fn on_photo_pick_cancelled(&mut self) -> Result<()> {
        if self.state.mode() == CaptureMode::Live && !self.rig.is_running() {
            self.rig.start()?;
        }
        Ok(())
    }

    // ==========================================
    // BATCH JOB PLUMBING
    // ==========================================

    /// Deliver pending events from the batch worker on this context
    pub fn poll_batch_events(&mut self) {
        let Some(rx) = self.batch_rx.as_ref() else {
            return;
        };
        let events: Vec<BatchEvent> = rx.try_iter().collect();
        for event in events {
            self.handle_batch_event(event);
        }

        if self.state.batch_status() == BatchStatus::Idle
            && self.batch.as_ref().is_some_and(|handle| handle.is_finished())
        {
            self.batch = None;
            self.batch_rx = None;
        }
    }

    fn handle_batch_event(&mut self, event: BatchEvent) {
        match event {
            BatchEvent::Progress(fraction) => {
                self.batch_progress = fraction;
            }
            BatchEvent::Finished(outcome) => {
                self.state.set_batch_status(BatchStatus::Idle);
                match outcome {
                    BatchOutcome::Completed => {
                        self.batch_progress = 1.0;
                        self.affordances_enabled = true;
                    }
                    BatchOutcome::Interrupted => {
                        // Affordances stay disabled until the successor job
                        // reaches a terminal outcome
                        debug!("batch job stopped after interruption");
                    }
                    BatchOutcome::Failed { index } => {
                        warn!("batch job aborted at frame {}", index);
                        self.affordances_enabled = true;
                    }
                }
            }
        }
    }

    fn start_batch(&mut self, clip: Arc<RecordedClip>) -> Result<()> {
        debug_assert!(self.batch.is_none(), "previous job must be joined first");

        let style = self.current_style()?;
        let (tx, rx) = mpsc::channel();
        let handle = self.restylizer.spawn(clip, style, tx)?;

        self.batch = Some(handle);
        self.batch_rx = Some(rx);
        self.batch_progress = 0.0;
        self.state.set_batch_status(BatchStatus::Running);
        Ok(())
    }

    /// Interrupt the active job, wait for it to observably stop, and deliver
    /// whatever it reported on the way out
    fn stop_active_batch(&mut self) {
        let Some(handle) = self.batch.take() else {
            return;
        };

        handle.interrupt();
        self.state.set_batch_status(BatchStatus::Interrupted);
        let outcome = handle.join();
        debug!("previous batch job stopped: {:?}", outcome);

        if let Some(rx) = self.batch_rx.take() {
            let events: Vec<BatchEvent> = rx.try_iter().collect();
            for event in events {
                self.handle_batch_event(event);
            }
        }
        self.state.set_batch_status(BatchStatus::Idle);
    }

    // ==========================================
    // INTERNAL HELPERS
    // ==========================================

    fn maybe_begin_recording(&mut self, now: Instant) {
        let Some(pressed_at) = self.shutter_down_at else {
            return;
        };
        if self.state.mode() != CaptureMode::Live {
            return;
        }
        if now.duration_since(pressed_at) < self.config.capture.record_hold_threshold() {
            return;
        }

        // Rejected with a non-passthrough style; the release then takes a
        // photo instead
        if !self.state.begin_recording() {
            return;
        }

        self.recorder = Some(ClipRecorder::new());
        self.shutter_down_at = None;
        info!("recording started");
    }

    /// Live-path stylization: on failure the raw frame is shown for this
    /// pass and the error is only logged
    fn stylize_for_display(&mut self, frame: Frame) -> Frame {
        if self.state.is_passthrough() {
            return frame;
        }
        let style = match self.current_style() {
            Ok(style) => style,
            Err(_) => return frame,
        };
        match self.stylizer.stylize(&frame, &style) {
            Ok(out) => out.with_orientation(frame.orientation()),
            Err(err) => {
                warn!("live stylize failed, showing raw frame: {}", err);
                frame
            }
        }
    }

    fn refresh_frozen_still(&mut self) -> Result<()> {
        let Some(raw) = self.frozen_raw.clone() else {
            return Ok(());
        };
        let displayed = self.stylize_for_display(raw);
        (self.sink)(displayed);
        Ok(())
    }

    fn current_style(&self) -> Result<Style> {
        let index = self.state.style_index();
        self.catalog
            .get(index)
            .cloned()
            .ok_or_else(|| StylizeError::UnknownStyle { index }.into())
    }
}

impl Drop for Orchestrator {
    fn drop(&mut self) {
        if let Some(handle) = self.batch.take() {
            handle.interrupt();
            let _ = handle.join();
        }
    }
}
