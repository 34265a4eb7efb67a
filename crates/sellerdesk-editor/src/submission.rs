//! Submission phase tracking.
//!
//! ```text
//! Idle -> Validating -> Invalid -> Idle
//!                    -> Uploading -> Persisting -> Done
//!                                             \-> Failed -> Validating (retry)
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::EditorError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Invalid,
    Uploading,
    Persisting,
    Done,
    Failed,
}

impl SubmissionPhase {
    #[must_use]
    pub fn is_in_flight(self) -> bool {
        matches!(self, Self::Validating | Self::Uploading | Self::Persisting)
    }
}

impl std::fmt::Display for SubmissionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SubmissionPhase::Idle => "idle",
            SubmissionPhase::Validating => "validating",
            SubmissionPhase::Invalid => "invalid",
            SubmissionPhase::Uploading => "uploading",
            SubmissionPhase::Persisting => "persisting",
            SubmissionPhase::Done => "done",
            SubmissionPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Shared handle on a session's submission phase. Clones observe the same
/// phase.
#[derive(Debug, Clone, Default)]
pub struct SubmissionTracker {
    phase: Arc<Mutex<SubmissionPhase>>,
}

impl SubmissionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> SubmissionPhase {
        *self.lock()
    }

    /// Starts a submission, moving to `Validating`.
    ///
    /// # Errors
    ///
    /// [`EditorError::Busy`] while another submission is in flight,
    /// [`EditorError::Closed`] once a submission has completed.
    pub fn begin(&self) -> Result<SubmissionGuard, EditorError> {
        let mut phase = self.lock();
        let current = *phase;
        match current {
            p if p.is_in_flight() => Err(EditorError::Busy),
            SubmissionPhase::Done => Err(EditorError::Closed),
            previous => {
                tracing::debug!(from = %previous, "submission started");
                *phase = SubmissionPhase::Validating;
                Ok(SubmissionGuard {
                    tracker: self.clone(),
                    settled: false,
                })
            }
        }
    }

    fn set(&self, next: SubmissionPhase) {
        let mut phase = self.lock();
        let previous = *phase;
        tracing::debug!(from = %previous, to = %next, "submission phase");
        *phase = next;
    }

    // A panic while holding the lock cannot leave the phase half-written.
    fn lock(&self) -> MutexGuard<'_, SubmissionPhase> {
        self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Owns an in-flight submission. Dropping it before it settles (for example
/// when the submitting future is cancelled) leaves the tracker in `Failed`.
#[derive(Debug)]
pub struct SubmissionGuard {
    tracker: SubmissionTracker,
    settled: bool,
}

impl SubmissionGuard {
    pub fn advance(&self, next: SubmissionPhase) {
        self.tracker.set(next);
    }

    /// Validation rejected the form; back to `Idle` via `Invalid`.
    pub fn invalid(mut self) {
        self.tracker.set(SubmissionPhase::Invalid);
        self.tracker.set(SubmissionPhase::Idle);
        self.settled = true;
    }

    pub fn fail(mut self) {
        self.tracker.set(SubmissionPhase::Failed);
        self.settled = true;
    }

    pub fn done(mut self) {
        self.tracker.set(SubmissionPhase::Done);
        self.settled = true;
    }
}

impl Drop for SubmissionGuard {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!("submission abandoned mid-flight; marking failed");
            self.tracker.set(SubmissionPhase::Failed);
        }
    }
}
