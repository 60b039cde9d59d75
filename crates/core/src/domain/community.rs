// Community - remote record as returned by the communities endpoint

use serde::{Deserialize, Serialize};

/// A single community record
///
/// Only `name` and `site_as_container_enabled` take part in the existence
/// check; `id` is logged when a check matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityRecord {
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(rename = "siteAsContainerEnabled", default)]
    pub site_as_container_enabled: bool,
}

impl CommunityRecord {
    pub fn new(name: impl Into<String>, id: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            site_as_container_enabled: enabled,
        }
    }

    /// Exact, case-sensitive name match on an enabled community
    pub fn is_enabled_match(&self, target_name: &str) -> bool {
        self.site_as_container_enabled && self.name == target_name
    }
}

/// Response envelope of `GET .../connect/communities/`
#[derive(Debug, Clone, Deserialize)]
pub struct CommunitiesResponse {
    pub communities: Vec<CommunityRecord>,
}
