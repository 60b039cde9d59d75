// Poll Session - ephemeral state for a single existence poll

use super::error::{DomainError, Result};
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// Poll state machine states
///
/// `Running` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Running,
    Succeeded,
    TimedOut,
    Canceled,
}

impl PollState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollState::Running)
    }
}

impl fmt::Display for PollState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollState::Running => write!(f, "RUNNING"),
            PollState::Succeeded => write!(f, "SUCCEEDED"),
            PollState::TimedOut => write!(f, "TIMED_OUT"),
            PollState::Canceled => write!(f, "CANCELED"),
        }
    }
}

/// A single poll invocation
///
/// Lives only for the duration of one `poll_until_true` call. Nothing here is
/// shared across sessions.
#[derive(Debug)]
pub struct PollSession {
    target_name: String,
    interval: Duration,
    deadline: Duration,
    started_at: Instant,
    attempts: u32,
    state: PollState,
}

impl PollSession {
    /// Start a new session in the `Running` state
    pub fn start(target_name: impl Into<String>, interval: Duration, deadline: Duration) -> Self {
        Self {
            target_name: target_name.into(),
            interval,
            deadline,
            started_at: Instant::now(),
            attempts: 0,
            state: PollState::Running,
        }
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// True once the elapsed wall-clock time has reached the deadline
    pub fn is_deadline_exceeded(&self) -> bool {
        self.elapsed() >= self.deadline
    }

    /// Time left before the deadline, zero once it has passed
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_sub(self.elapsed())
    }

    /// Record the start of a probe attempt, returning its 1-based number
    pub fn begin_attempt(&mut self) -> Result<u32> {
        self.ensure_running("RUNNING")?;
        self.attempts += 1;
        Ok(self.attempts)
    }

    /// Transition to Succeeded
    pub fn succeed(&mut self) -> Result<()> {
        self.transition(PollState::Succeeded)
    }

    /// Transition to TimedOut
    pub fn time_out(&mut self) -> Result<()> {
        self.transition(PollState::TimedOut)
    }

    /// Transition to Canceled
    pub fn cancel(&mut self) -> Result<()> {
        self.transition(PollState::Canceled)
    }

    fn transition(&mut self, to: PollState) -> Result<()> {
        self.ensure_running(&to.to_string())?;
        self.state = to;
        Ok(())
    }

    fn ensure_running(&self, to: &str) -> Result<()> {
        if self.state.is_terminal() {
            return Err(DomainError::InvalidStateTransition {
                from: self.state.to_string(),
                to: to.to_string(),
            });
        }
        Ok(())
    }
}
