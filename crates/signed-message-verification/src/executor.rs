//! # Cancellable Executor
//!
//! Runs one verification unit on the blocking pool and races it against a
//! deadline or a caller's cancellation token.
//!
//! Losing the race only stops the *wait*. The unit receives a
//! [`CancellationToken`] that is cancelled when the race is lost, and the
//! verifier checks it between stages; recovery and derivation math are not
//! preemptible mid-computation. Whatever the unit returns after that is
//! discarded.

use crate::domain::errors::VerifyError;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

/// What bounds a verification.
#[derive(Debug, Clone)]
pub enum StopSignal {
    /// Relative deadline from the start of the call
    Timeout(Duration),
    /// Absolute deadline
    Deadline(Instant),
    /// Explicit cancellation by the caller
    Cancel {
        token: CancellationToken,
        reason: String,
    },
}

impl StopSignal {
    pub fn cancel(token: CancellationToken, reason: impl Into<String>) -> Self {
        Self::Cancel {
            token,
            reason: reason.into(),
        }
    }
}

impl From<Duration> for StopSignal {
    fn from(timeout: Duration) -> Self {
        Self::Timeout(timeout)
    }
}

impl From<Instant> for StopSignal {
    fn from(deadline: Instant) -> Self {
        Self::Deadline(deadline)
    }
}

/// Races verification units against a [`StopSignal`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CancellableExecutor;

impl CancellableExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Run `unit` under `stop`.
    ///
    /// Exactly one of the stop path and the completion path decides the
    /// result. When the unit finishes first its outcome is returned
    /// untouched; a panic inside it becomes `TaskFailed`.
    pub async fn run_with_deadline<F>(
        &self,
        stop: StopSignal,
        unit: F,
    ) -> Result<bool, VerifyError>
    where
        F: FnOnce(CancellationToken) -> Result<bool, VerifyError> + Send + 'static,
    {
        let started = Instant::now();
        let (deadline, caller_token, reason) = match stop {
            // A bound past the clock's range never fires.
            StopSignal::Timeout(timeout) => (started.checked_add(timeout), None, String::new()),
            StopSignal::Deadline(at) => (Some(at), None, String::new()),
            StopSignal::Cancel { token, reason } => (None, Some(token), reason),
        };

        // A child of the caller's token sees caller cancellation directly.
        let unit_token = match &caller_token {
            Some(token) => token.child_token(),
            None => CancellationToken::new(),
        };
        let worker_token = unit_token.clone();
        let mut handle = tokio::task::spawn_blocking(move || unit(worker_token));

        tokio::select! {
            biased;

            _ = wait_cancelled(caller_token.as_ref()) => {
                unit_token.cancel();
                Err(VerifyError::Cancelled { reason })
            }
            _ = wait_deadline(deadline) => {
                unit_token.cancel();
                let timeout_ms = deadline
                    .map(|at| millis(at.saturating_duration_since(started)))
                    .unwrap_or_default();
                Err(VerifyError::Timeout { timeout_ms })
            }
            joined = &mut handle => {
                joined.map_err(|e| VerifyError::TaskFailed(e.to_string()))?
            }
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

async fn wait_cancelled(token: Option<&CancellationToken>) {
    match token {
        Some(token) => token.cancelled().await,
        None => std::future::pending().await,
    }
}

async fn wait_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}
