// Authenticated org connection & shared HTTP client setup

use community_probe_core::error::{AppError, Result};
use std::fmt;
use std::time::Duration;

/// Everything needed to issue authenticated REST calls against one org
#[derive(Clone)]
pub struct OrgConnection {
    pub username: String,
    pub org_id: Option<String>,
    pub instance_url: String,
    pub access_token: String,
    pub api_version: String,
}

impl OrgConnection {
    /// REST base, e.g. `https://host/services/data/v59.0`
    pub fn base_url(&self) -> String {
        format!(
            "{}/services/data/v{}",
            self.instance_url.trim_end_matches('/'),
            self.api_version
        )
    }

    pub fn communities_url(&self) -> String {
        format!("{}/connect/communities/", self.base_url())
    }
}

// Keep the access token out of logs
impl fmt::Debug for OrgConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrgConnection")
            .field("username", &self.username)
            .field("org_id", &self.org_id)
            .field("instance_url", &self.instance_url)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

/// Create the HTTP client shared by every request of a session
///
/// `reqwest::Client` pools connections internally and is safe to reuse.
pub fn create_client(request_timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(request_timeout)
        .user_agent(concat!("community-probe/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))
}
