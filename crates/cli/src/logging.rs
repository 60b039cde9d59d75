//! Logging setup
//!
//! Logs always go to stderr; stdout carries only the command result.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "community_probe=warn";

/// Initialize tracing
///
/// # Environment Variables
///
/// - `RUST_LOG`: filter directives (default: `community_probe=warn`)
/// - `COMMUNITY_PROBE_LOG_FORMAT`: `json` for structured logs, anything else
///   for compact human-readable lines
pub fn init() {
    let log_format =
        std::env::var("COMMUNITY_PROBE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let registry = tracing_subscriber::registry().with(env_filter);

    // A second init (e.g. in tests) is harmless, so the error is ignored
    let _ = match log_format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        _ => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init(),
    };
}
