use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{info, Level};
use tracing_subscriber;

use stylecam::{
    config::Config,
    error::Result as SessionResult,
    frame::Frame,
    session::{DisplaySink, Orchestrator, SwipeDirection},
    source::{CameraFacing, CameraRig, CaptureFeed, LiveFrameSource},
    styles::{StyleCatalog, ToyStylizer},
};

#[derive(Parser)]
#[command(
    name = "stylecam",
    version,
    about = "Style-transfer camera session demo",
    long_about = "Drives a full capture session against synthetic camera feeds: live preview, clip recording, looping replay, and asynchronous batch re-stylization with mid-job style switches."
)]
struct Cli {
    /// Style to preview live before recording (catalog name)
    #[arg(short, long, default_value = "udnie")]
    style: String,

    /// Number of frames to record into the clip
    #[arg(short, long, default_value_t = 40)]
    frames: usize,

    /// Write the final displayed frame to this PNG path
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Camera feed whose frames the demo loop synthesizes while it is running
struct SyntheticFeed {
    facing: CameraFacing,
    running: Arc<AtomicBool>,
}

impl SyntheticFeed {
    fn new(facing: CameraFacing) -> (Self, Arc<AtomicBool>) {
        let running = Arc::new(AtomicBool::new(false));
        let feed = Self {
            facing,
            running: Arc::clone(&running),
        };
        (feed, running)
    }
}

impl CaptureFeed for SyntheticFeed {
    fn facing(&self) -> CameraFacing {
        self.facing
    }

    fn start(&mut self) -> SessionResult<()> {
        self.running.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Everything the demo loop needs to stand in for camera hardware
struct Studio {
    frame_tx: mpsc::Sender<Frame>,
    front_running: Arc<AtomicBool>,
    rear_running: Arc<AtomicBool>,
    rng: SmallRng,
    frame_size: u32,
}

impl Studio {
    /// Emit one noise frame if either camera is running
    fn shoot(&mut self) {
        let running = self.front_running.load(Ordering::SeqCst)
            || self.rear_running.load(Ordering::SeqCst);
        if !running {
            return;
        }
        let color = [self.rng.gen(), self.rng.gen(), self.rng.gen()];
        let _ = self.frame_tx.send(Frame::solid(self.frame_size, color));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    info!("Starting Stylecam v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = match cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(&config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };

    let catalog = StyleCatalog::builtin();
    let style_index = catalog
        .index_of(&cli.style)
        .ok_or_else(|| anyhow::anyhow!("Unknown style: {}", cli.style))?;
    info!("Using '{}' style (index {})", cli.style, style_index);

    let (front, front_running) = SyntheticFeed::new(CameraFacing::Front);
    let (rear, rear_running) = SyntheticFeed::new(CameraFacing::Rear);
    let rig = CameraRig::new(Box::new(front), Box::new(rear));

    let (frame_tx, frame_rx) = mpsc::channel();
    let mut studio = Studio {
        frame_tx,
        front_running,
        rear_running,
        rng: SmallRng::seed_from_u64(0x5717_1ECA),
        frame_size: config.capture.frame_size,
    };

    // The display layer is a single retained frame, like a preview view
    let last_displayed: Arc<Mutex<Option<Frame>>> = Arc::new(Mutex::new(None));
    let display = Arc::clone(&last_displayed);
    let sink: DisplaySink = Box::new(move |frame| {
        if let Ok(mut slot) = display.lock() {
            *slot = Some(frame);
        }
    });

    let frame_interval = config.capture.frame_interval();
    let hold_threshold = config.capture.record_hold_threshold();
    let playback_interval = config.playback.frame_interval();

    let mut session = Orchestrator::new(
        config,
        catalog,
        Arc::new(ToyStylizer::default()),
        rig,
        LiveFrameSource::new(frame_rx),
        sink,
    )?;

    // --- live preview, styled, then back to passthrough for recording ---
    info!("Live preview with '{}'", cli.style);
    session.select_style(style_index)?;
    for _ in 0..10 {
        studio.shoot();
        session.pump_capture(Instant::now())?;
        tokio::time::sleep(frame_interval).await;
    }

    session.select_style(0)?;
    session.on_toggle_camera()?;
    info!("Switched to the front camera");

    // --- hold the shutter to record a clip ---
    info!("Recording {} frames", cli.frames);
    session.on_shutter_down(Instant::now());
    tokio::time::sleep(hold_threshold).await;
    for _ in 0..cli.frames {
        studio.shoot();
        session.pump_capture(Instant::now())?;
        tokio::time::sleep(frame_interval).await;
    }
    session.on_shutter_up(Instant::now())?;

    let recorded = session
        .current_clip()
        .map(|clip| clip.raw_len())
        .unwrap_or(0);
    info!("Replaying a {}-frame clip", recorded);

    // --- restyle the clip, switching styles mid-job ---
    session.on_style_swipe(SwipeDirection::Left)?;
    let mut swiped_again = false;
    while !session.can_save_clear() {
        session.on_playback_tick()?;
        if !swiped_again && session.batch_progress() > 0.3 {
            info!(
                "Batch at {:.0}%, swiping to the next style",
                session.batch_progress() * 100.0
            );
            session.on_style_swipe(SwipeDirection::Left)?;
            swiped_again = true;
        }
        tokio::time::sleep(playback_interval).await;
    }
    info!(
        "Batch complete: style index {}, progress {:.0}%",
        session.state().style_index(),
        session.batch_progress() * 100.0
    );

    // let the restyled clip loop a little
    for _ in 0..10 {
        session.on_playback_tick()?;
        tokio::time::sleep(playback_interval).await;
    }

    if let Some(path) = cli.snapshot {
        if let Ok(slot) = last_displayed.lock() {
            if let Some(frame) = slot.as_ref() {
                frame.as_image().save(&path)?;
                info!("Snapshot saved to {:?}", path);
            }
        }
    }

    session.on_clear()?;
    info!("Cleared; session back to live preview");
    Ok(())
}
