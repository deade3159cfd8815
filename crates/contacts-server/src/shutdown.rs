//! Graceful shutdown signalling via `CancellationToken`.

use tokio_util::sync::CancellationToken;

/// Shared shutdown flag for the server task.
#[derive(Clone, Default)]
pub struct ShutdownCoordinator {
    token: CancellationToken,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that resolves `cancelled()` once shutdown starts.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn shutdown(&self) {
        self.token.cancel();
    }
}
