use crate::{error::Result, frame::Frame, styles::Style};

/// External stylization capability.
///
/// Backed by a neural style-transfer model in the original system; the core
/// only requires that calls are synchronous, deterministic for fixed
/// weights, and touch no shared mutable state. The target style is always an
/// explicit argument, so a live-path call and a batch-path call using
/// different styles can never race on ambient model state.
///
/// The session guarantees at most one in-flight call per pipeline stage; the
/// live path and the batch path may invoke the stylizer concurrently on
/// independent frame buffers.
pub trait Stylizer: Send + Sync {
    /// Produce a stylized copy of `frame`.
    ///
    /// Implementations are never called with the passthrough style; callers
    /// short-circuit style index 0 before reaching the stylizer.
    fn stylize(&self, frame: &Frame, style: &Style) -> Result<Frame>;
}
