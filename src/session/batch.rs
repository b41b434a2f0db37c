use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::frame::RecordedClip;
use crate::styles::{Style, Stylizer};

/// Terminal result of a batch re-stylization job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Every raw frame was stylized
    Completed,
    /// The job stopped at a frame boundary after an interruption request
    Interrupted,
    /// The stylizer failed at `index`; the job aborted to preserve the
    /// prefix invariant (no gaps are tolerated)
    Failed { index: usize },
}

/// Events a running job reports back to the interactive context
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BatchEvent {
    /// Fraction of frames stylized so far, reported after every frame
    Progress(f32),
    Finished(BatchOutcome),
}

/// Stylize every raw frame of `clip`, index by index.
///
/// Interruption is cooperative: `is_interrupted` is checked before each
/// frame, never mid-stylize call. The stylized sequence is rebuilt from
/// scratch on every run; an interrupted or failed run leaves it as a strict
/// prefix of the raw sequence.
pub fn run_batch(
    clip: &RecordedClip,
    style: &Style,
    stylizer: &dyn Stylizer,
    mut on_progress: impl FnMut(f32),
    is_interrupted: impl Fn() -> bool,
) -> BatchOutcome {
    clip.clear_stylized();
    let total = clip.raw_len();

    for index in 0..total {
        if is_interrupted() {
            debug!("batch job interrupted before frame {}/{}", index, total);
            return BatchOutcome::Interrupted;
        }

        let raw = match clip.raw_frame(index) {
            Some(frame) => frame,
            None => return BatchOutcome::Failed { index },
        };

        match stylizer.stylize(raw, style) {
            Ok(frame) => {
                if clip.push_stylized(frame).is_err() {
                    return BatchOutcome::Failed { index };
                }
            }
            Err(err) => {
                warn!("stylize failed at frame {}: {}", index, err);
                return BatchOutcome::Failed { index };
            }
        }

        on_progress((index + 1) as f32 / total as f32);
    }

    info!("batch job completed: {} frames restyled as '{}'", total, style.name());
    BatchOutcome::Completed
}

/// Handle to a spawned batch job.
///
/// [`BatchHandle::interrupt`] requests a cooperative stop;
/// [`BatchHandle::join`] blocks until the worker has observably stopped and
/// yields the terminal outcome. That join is the synchronization barrier
/// required before a successor job may start.
pub struct BatchHandle {
    interrupt: Arc<AtomicBool>,
    worker: JoinHandle<BatchOutcome>,
}

impl BatchHandle {
    pub fn interrupt(&self) {
        self.interrupt.store(true, Ordering::Release);
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    pub fn join(self) -> BatchOutcome {
        match self.worker.join() {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!("batch worker panicked");
                BatchOutcome::Failed { index: 0 }
            }
        }
    }
}

/// Spawns batch jobs, each on its own worker thread.
///
/// At most one job may be active at a time; the caller enforces this by
/// interrupting and joining the previous handle before spawning a successor.
pub struct BatchRestylizer {
    stylizer: Arc<dyn Stylizer>,
}

impl BatchRestylizer {
    pub fn new(stylizer: Arc<dyn Stylizer>) -> Self {
        Self { stylizer }
    }

    /// Start a job over `clip`, reporting events on `events`.
    ///
    /// The clip is borrowed for the duration of the job (shared ownership,
    /// never exclusive); the stylized sequence inside it is the only thing
    /// the worker writes.
    pub fn spawn(
        &self,
        clip: Arc<RecordedClip>,
        style: Style,
        events: mpsc::Sender<BatchEvent>,
    ) -> Result<BatchHandle> {
        let interrupt = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&interrupt);
        let stylizer = Arc::clone(&self.stylizer);

        debug!(
            "starting batch job: {} frames, style '{}'",
            clip.raw_len(),
            style.name()
        );

        let worker = thread::Builder::new()
            .name("batch-restylizer".into())
            .spawn(move || {
                let progress = events.clone();
                let outcome = run_batch(
                    clip.as_ref(),
                    &style,
                    stylizer.as_ref(),
                    |fraction| {
                        let _ = progress.send(BatchEvent::Progress(fraction));
                    },
                    || flag.load(Ordering::Acquire),
                );
                let _ = events.send(BatchEvent::Finished(outcome));
                outcome
            })?;

        Ok(BatchHandle { interrupt, worker })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::error::StylizeError;
    use crate::frame::{ClipRecorder, Frame};
    use crate::styles::StyleCatalog;

    fn clip_with(n: usize) -> Arc<RecordedClip> {
        let mut recorder = ClipRecorder::new();
        for i in 0..n {
            recorder.push(Frame::solid(2, [i as u8, 0, 0]));
        }
        Arc::new(recorder.finish())
    }

    fn style() -> Style {
        StyleCatalog::builtin().get(1).unwrap().clone()
    }

    /// Stylizer that logs each call and can be slowed down or made to fail
    struct ProbeStylizer {
        log: Arc<Mutex<Vec<String>>>,
        delay: Duration,
        fail_at: Option<usize>,
        calls: AtomicUsize,
    }

    impl ProbeStylizer {
        fn new(log: Arc<Mutex<Vec<String>>>, delay: Duration) -> Self {
            Self {
                log,
                delay,
                fail_at: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Stylizer for ProbeStylizer {
        fn stylize(&self, frame: &Frame, style: &Style) -> Result<Frame> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            self.log.lock().unwrap().push(style.name().to_string());
            if self.fail_at == Some(call) {
                return Err(StylizeError::Failed {
                    index: call,
                    reason: "probe failure".to_string(),
                }
                .into());
            }
            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
            Ok(frame.clone())
        }
    }

    #[test]
    fn test_completed_run_reports_progress_per_frame() {
        let clip = clip_with(10);
        let log = Arc::new(Mutex::new(Vec::new()));
        let stylizer = ProbeStylizer::new(log, Duration::ZERO);

        let mut fractions = Vec::new();
        let outcome = run_batch(&clip, &style(), &stylizer, |f| fractions.push(f), || false);

        assert_eq!(outcome, BatchOutcome::Completed);
        assert_eq!(fractions.len(), 10);
        assert_eq!(*fractions.last().unwrap(), 1.0);
        assert!(clip.stylized_complete());
    }

    #[test]
    fn test_interrupted_at_index_four_leaves_four_frames() {
        let clip = clip_with(10);
        let log = Arc::new(Mutex::new(Vec::new()));
        let stylizer = ProbeStylizer::new(log, Duration::ZERO);

        // The interruption check before frame 4 fires
        let checks = AtomicUsize::new(0);
        let outcome = run_batch(
            &clip,
            &style(),
            &stylizer,
            |_| {},
            || checks.fetch_add(1, Ordering::SeqCst) == 4,
        );

        assert_eq!(outcome, BatchOutcome::Interrupted);
        assert_eq!(clip.stylized_len(), 4);
    }

    #[test]
    fn test_failure_aborts_whole_job() {
        let clip = clip_with(5);
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut stylizer = ProbeStylizer::new(log, Duration::ZERO);
        stylizer.fail_at = Some(2);

        let outcome = run_batch(&clip, &style(), &stylizer, |_| {}, || false);

        assert_eq!(outcome, BatchOutcome::Failed { index: 2 });
        assert_eq!(clip.stylized_len(), 2);
    }

    #[test]
    fn test_rerun_rebuilds_from_scratch() {
        let clip = clip_with(4);
        let log = Arc::new(Mutex::new(Vec::new()));
        let stylizer = ProbeStylizer::new(Arc::clone(&log), Duration::ZERO);

        assert_eq!(run_batch(&clip, &style(), &stylizer, |_| {}, || false), BatchOutcome::Completed);
        assert_eq!(run_batch(&clip, &style(), &stylizer, |_| {}, || false), BatchOutcome::Completed);

        // No caching: the second run stylizes all frames again
        assert_eq!(log.lock().unwrap().len(), 8);
        assert_eq!(clip.stylized_len(), 4);
    }

    #[test]
    fn test_spawned_job_reports_events() {
        let clip = clip_with(6);
        let log = Arc::new(Mutex::new(Vec::new()));
        let restylizer =
            BatchRestylizer::new(Arc::new(ProbeStylizer::new(log, Duration::ZERO)));

        let (tx, rx) = mpsc::channel();
        let handle = restylizer.spawn(Arc::clone(&clip), style(), tx).unwrap();
        assert_eq!(handle.join(), BatchOutcome::Completed);

        let events: Vec<BatchEvent> = rx.try_iter().collect();
        assert_eq!(events.len(), 7); // 6 progress + 1 finished
        assert_eq!(events.last(), Some(&BatchEvent::Finished(BatchOutcome::Completed)));
    }

    #[test]
    fn test_interrupt_then_join_is_a_barrier() {
        let clip = clip_with(100);
        let log = Arc::new(Mutex::new(Vec::new()));
        let catalog = StyleCatalog::builtin();

        let restylizer = BatchRestylizer::new(Arc::new(ProbeStylizer::new(
            Arc::clone(&log),
            Duration::from_millis(2),
        )));

        let (tx, _rx) = mpsc::channel();
        let first = restylizer
            .spawn(Arc::clone(&clip), catalog.get(1).unwrap().clone(), tx)
            .unwrap();

        thread::sleep(Duration::from_millis(10));
        first.interrupt();
        let outcome = first.join();
        assert!(matches!(outcome, BatchOutcome::Interrupted | BatchOutcome::Completed));

        let calls_after_join = log.lock().unwrap().len();

        let (tx, _rx) = mpsc::channel();
        let second = restylizer
            .spawn(Arc::clone(&clip), catalog.get(2).unwrap().clone(), tx)
            .unwrap();
        second.join();

        // Every first-job call happened before the second job's first call
        let log = log.lock().unwrap();
        assert!(log[..calls_after_join].iter().all(|name| name == "mosaic"));
        assert!(log[calls_after_join..].iter().all(|name| name == "udnie"));
        assert_eq!(clip.stylized_len(), clip.raw_len());
    }
}
