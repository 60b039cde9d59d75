//! Bounded Poller - retries a Probe on a fixed cadence until success or deadline
//!
//! State machine: RUNNING -> SUCCEEDED | TIMED_OUT | CANCELED
//!
//! - A probe error is logged and treated as `false` for that tick.
//! - The deadline is checked before and after every attempt, and the wait
//!   between attempts never runs past it. Overshoot is bounded by the
//!   latency of the last attempt.
//! - The interval runs from the completion of one attempt to the start of
//!   the next; attempts never overlap.

use crate::application::cancel::CancelToken;
use crate::domain::PollSession;
use crate::error::{AppError, Result};
use crate::port::Probe;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Caller-supplied poll configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    /// The resource identifier being polled
    pub target_name: String,
    /// Spacing between probe attempts
    pub interval: Duration,
    /// Maximum total wait
    pub deadline: Duration,
}

impl PollConfig {
    pub fn new(target_name: impl Into<String>, interval: Duration, deadline: Duration) -> Self {
        Self {
            target_name: target_name.into(),
            interval,
            deadline,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(AppError::Validation(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Outcome of a single tick, used to drive the loop
enum Tick {
    Found,
    NotYet,
}

/// Poll `probe` until it reports `true`, the deadline elapses, or `cancel` fires
///
/// Returns `Ok(true)` on success. Fails with `AppError::Timeout` when the
/// deadline is reached first and `AppError::Canceled` when canceled.
pub async fn poll_until_true(
    probe: &dyn Probe,
    config: &PollConfig,
    mut cancel: CancelToken,
) -> Result<bool> {
    config.validate()?;

    let mut session = PollSession::start(&config.target_name, config.interval, config.deadline);

    debug!(
        community = %session.target_name(),
        interval_ms = session.interval().as_millis() as u64,
        deadline_ms = session.deadline().as_millis() as u64,
        "Polling community existence"
    );

    loop {
        if cancel.is_canceled() {
            return Err(canceled(&mut session)?);
        }

        if session.is_deadline_exceeded() {
            return Err(timed_out(&mut session)?);
        }

        if let Tick::Found = attempt(probe, &mut session).await? {
            session.succeed()?;
            info!(
                community = %session.target_name(),
                attempts = session.attempts(),
                elapsed_ms = session.elapsed().as_millis() as u64,
                "Community exists and is enabled"
            );
            return Ok(true);
        }

        if session.is_deadline_exceeded() {
            return Err(timed_out(&mut session)?);
        }

        let wait = session.interval().min(session.remaining());
        tokio::select! {
            _ = sleep(wait) => {},
            _ = cancel.canceled() => {
                return Err(canceled(&mut session)?);
            }
        }
    }
}

/// Run one probe attempt; errors are swallowed and count as "not yet"
async fn attempt(probe: &dyn Probe, session: &mut PollSession) -> Result<Tick> {
    let n = session.begin_attempt()?;

    match probe.check(session.target_name()).await {
        Ok(true) => Ok(Tick::Found),
        Ok(false) => {
            debug!(
                community = %session.target_name(),
                attempt = n,
                "Community not available yet"
            );
            Ok(Tick::NotYet)
        }
        Err(e) => {
            warn!(
                community = %session.target_name(),
                attempt = n,
                error = %e,
                "Community status check failed, retrying"
            );
            Ok(Tick::NotYet)
        }
    }
}

fn timed_out(session: &mut PollSession) -> Result<AppError> {
    session.time_out()?;
    let elapsed = session.elapsed();
    info!(
        community = %session.target_name(),
        attempts = session.attempts(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Community poll timed out"
    );
    Ok(AppError::Timeout {
        target: session.target_name().to_string(),
        deadline: session.deadline(),
        elapsed,
        attempts: session.attempts(),
    })
}

fn canceled(session: &mut PollSession) -> Result<AppError> {
    session.cancel()?;
    info!(
        community = %session.target_name(),
        attempts = session.attempts(),
        "Community poll canceled"
    );
    Ok(AppError::Canceled {
        target: session.target_name().to_string(),
        attempts: session.attempts(),
    })
}
