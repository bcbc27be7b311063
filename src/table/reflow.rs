//! Reflow guard for resize echoes

use super::types::Allocation;

/// Suppresses the size allocation that echoes a gap-fill pass.
///
/// Placing recycled cells can make the host re-send the allocation the table
/// already has. The guard remembers the allocation a gap-fill pass ran with
/// and swallows exactly one matching notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReflowGuard {
    /// No gap-fill pass is awaiting its echo.
    #[default]
    Idle,
    /// A gap-fill pass ran with this allocation.
    ReflowInProgress(Allocation),
}

impl ReflowGuard {
    /// Record that a gap-fill pass ran with `allocation`.
    pub fn arm(&mut self, allocation: Allocation) {
        *self = ReflowGuard::ReflowInProgress(allocation);
    }

    /// Whether `allocation` is the echo of the armed pass.
    ///
    /// The guard returns to `Idle` either way.
    pub fn swallow_echo(&mut self, allocation: Allocation) -> bool {
        matches!(
            std::mem::take(self),
            ReflowGuard::ReflowInProgress(armed) if armed == allocation
        )
    }
}
