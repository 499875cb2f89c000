//! At most one live search per session.

use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Hands out cancellation tokens so that starting a search cancels the
/// previous one.
#[derive(Debug, Default)]
pub struct SearchSession {
    current: Mutex<Option<CancellationToken>>,
}

impl SearchSession {
    /// Create a session with no running search.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the running search, if any, and return the token for a new one.
    pub fn begin(&self) -> CancellationToken {
        let token = CancellationToken::new();
        let mut current = self.current.lock().expect("acquire session lock");
        if let Some(previous) = current.replace(token.clone()) {
            previous.cancel();
        }
        token
    }

    /// Cancel the running search without starting another.
    pub fn cancel(&self) {
        let current = self.current.lock().expect("acquire session lock");
        if let Some(token) = current.as_ref() {
            token.cancel();
        }
    }
}
