// Central Error Type for the Application

use std::time::Duration;
use thiserror::Error;

/// Application-level error type
///
/// Only terminal outcomes live here. Per-attempt `ProbeError`s are swallowed
/// by the poller and never surface through this type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(
        "The community check for '{target}' did not complete within {} (waited {} over {attempts} attempt(s))",
        format_duration(.deadline),
        format_duration(.elapsed)
    )]
    Timeout {
        target: String,
        deadline: Duration,
        elapsed: Duration,
        attempts: u32,
    },

    #[error("The community check for '{target}' was canceled after {attempts} attempt(s)")]
    Canceled { target: String, attempts: u32 },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, AppError::Timeout { .. })
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, AppError::Canceled { .. })
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Render a duration as whole minutes when exact, seconds otherwise
pub fn format_duration(d: &Duration) -> String {
    let secs = d.as_secs();
    if secs > 0 && secs % 60 == 0 && d.subsec_nanos() == 0 {
        format!("{} minute(s)", secs / 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", d.as_millis())
    }
}
