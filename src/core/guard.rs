//! Anti double-submit guard.
//!
//! Scanners and impatient operators often send the same code twice in a row. The
//! guard remembers the last accepted code per submitter and ignores an identical
//! code that arrives within the window. It is process-local and only protects
//! against accidental repeats; numbering integrity is enforced by the database.

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;
use tracing::debug;

/// Window used by the desk when none is configured.
pub const DEFAULT_SUBMIT_WINDOW: Duration = Duration::from_secs(1);

/// Whether a submission should be processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Process the submission
    Accepted,
    /// Same code from the same submitter inside the window; ignore it
    Duplicate,
}

#[derive(Debug)]
struct LastSubmit {
    code: String,
    at: Instant,
}

/// Per-submitter memory of the last accepted code.
#[derive(Debug)]
pub struct SubmitGuard {
    window: Duration,
    last: Mutex<HashMap<String, LastSubmit>>,
}

impl SubmitGuard {
    /// Creates a guard that ignores repeats within `window`.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last: Mutex::new(HashMap::new()),
        }
    }

    /// The configured window.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Checks a submission made now.
    pub async fn check(&self, submitter: &str, code: &str) -> SubmitDecision {
        self.check_at(submitter, code, Instant::now()).await
    }

    /// Checks a submission made at `now`.
    ///
    /// Duplicates do not refresh the remembered instant, so a burst of repeats is
    /// measured from the first accepted submission.
    pub async fn check_at(&self, submitter: &str, code: &str, now: Instant) -> SubmitDecision {
        let code = code.trim();
        let mut last = self.last.lock().await;

        if let Some(previous) = last.get(submitter) {
            let elapsed = now.saturating_duration_since(previous.at);
            if previous.code == code && elapsed < self.window {
                debug!("Ignoring repeated code '{code}' from {submitter} after {elapsed:?}");
                return SubmitDecision::Duplicate;
            }
        }

        last.insert(
            submitter.to_string(),
            LastSubmit {
                code: code.to_string(),
                at: now,
            },
        );
        SubmitDecision::Accepted
    }
}

impl Default for SubmitGuard {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_WINDOW)
    }
}
