//! # Session Coordination
//!
//! The state machine deciding frame-by-frame what happens to capture input,
//! the background batch re-stylization job, and the orchestrator translating
//! user intents into transitions and component calls.

pub mod batch;
pub mod orchestrator;
pub mod state;

pub use batch::{BatchEvent, BatchHandle, BatchOutcome, BatchRestylizer};
pub use orchestrator::{DisplaySink, Orchestrator, SwipeDirection};
pub use state::{BatchStatus, CaptureMode, SessionState};
