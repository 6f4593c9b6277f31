//! Progress reporting seam between the orchestrator and its caller.

/// Shared progress tracker advanced once per completed session.
///
/// Implementations only need an atomic increment; sessions never read each
/// other's progress state.
pub trait ScanProgress: Send + Sync {
    /// Record one unit of completed work.
    fn advance(&self);
}

/// Progress sink that discards updates, for library callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ScanProgress for NoProgress {
    fn advance(&self) {}
}
