// Community Probe Core - Existence probe, bounded poller & ports
// NO infrastructure dependencies (HTTP lives in infra-http)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
