use thiserror::Error;

/// Main error type for the stylecam library
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Clip error: {0}")]
    Clip(#[from] ClipError),

    #[error("Stylization error: {0}")]
    Stylize(#[from] StylizeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Capture-side errors
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Capture device unavailable: {facing}")]
    DeviceUnavailable { facing: String },

    #[error("Capture feed disconnected")]
    FeedDisconnected,
}

/// Clip replay and construction errors
///
/// `EmptyClip` indicates a broken transition sequence rather than a
/// user-facing condition: a clip must hold at least one frame before
/// replay can be requested.
#[derive(Error, Debug)]
pub enum ClipError {
    #[error("Replay requested for a clip with no frames")]
    EmptyClip,

    #[error("Stylized sequence would exceed raw sequence ({len} >= {raw_len})")]
    StylizedOverrun { len: usize, raw_len: usize },
}

/// Stylization errors
#[derive(Error, Debug)]
pub enum StylizeError {
    #[error("Stylization failed at frame {index}: {reason}")]
    Failed { index: usize, reason: String },

    #[error("Unknown style index: {index}")]
    UnknownStyle { index: usize },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using SessionError
pub type Result<T> = std::result::Result<T, SessionError>;

impl SessionError {
    /// Whether the session can keep running with capture disabled.
    ///
    /// A missing capture device degrades the app to photo-only mode; most
    /// other errors are logic faults or permanent failures.
    pub fn is_capture_fallback(&self) -> bool {
        matches!(self, Self::Capture(CaptureError::DeviceUnavailable { .. }))
    }
}
