use crate::error::{JotError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Externally controlled stop signal for scans over many entries.
///
/// Clones share the same flag, so one handle can be given to a worker and the
/// other kept to call [`Cancellation::cancel`]. An optional deadline trips it
/// on its own.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl Cancellation {
    /// Never trips unless [`Cancellation::cancel`] is called.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed) || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// `Err(Cancelled)` once tripped; checked between entries in a scan.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(JotError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_is_not_cancelled() {
        assert!(Cancellation::new().check().is_ok());
    }

    #[test]
    fn cancel_is_visible_through_clones() {
        let token = Cancellation::new();
        let handle = token.clone();
        handle.cancel();
        assert!(matches!(token.check(), Err(JotError::Cancelled)));
    }

    #[test]
    fn past_deadline_trips() {
        let token = Cancellation::new().with_deadline(Instant::now());
        assert!(token.is_cancelled());
        let token = Cancellation::new().with_timeout(Duration::from_secs(3600));
        assert!(!token.is_cancelled());
    }
}
