// Community Source Port
// Abstraction over the authenticated remote read of the communities list

use crate::domain::CommunityRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from a single remote read
///
/// All of these are transient from the poller's point of view.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unauthorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("Unexpected HTTP status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Remote source of community records
///
/// Implementations:
/// - HttpCommunitySource: `GET <base>/connect/communities/`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommunitySource: Send + Sync {
    /// Perform exactly one remote read. Never retries.
    async fn list_communities(&self) -> Result<Vec<CommunityRecord>, ProbeError>;
}
