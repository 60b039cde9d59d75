//! Existence Probe - reduces one remote read to a boolean

use crate::domain::CommunityRecord;
use crate::port::{CommunitySource, Probe, ProbeError};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Checks whether a named community exists and is enabled
pub struct ExistenceProbe {
    source: Arc<dyn CommunitySource>,
}

impl ExistenceProbe {
    pub fn new(source: Arc<dyn CommunitySource>) -> Self {
        Self { source }
    }
}

/// First record that matches `target_name` exactly and is enabled
pub fn find_enabled<'a>(
    records: &'a [CommunityRecord],
    target_name: &str,
) -> Option<&'a CommunityRecord> {
    records.iter().find(|c| c.is_enabled_match(target_name))
}

#[async_trait]
impl Probe for ExistenceProbe {
    async fn check(&self, target_name: &str) -> Result<bool, ProbeError> {
        if target_name.is_empty() {
            debug!("Empty community name, skipping remote query");
            return Ok(false);
        }

        let records = self.source.list_communities().await?;
        let matched = find_enabled(&records, target_name);

        debug!(
            community = %target_name,
            communities = records.len(),
            community_id = matched.map(|c| c.id.as_str()).unwrap_or(""),
            exists = matched.is_some(),
            "Queried community existence"
        );

        Ok(matched.is_some())
    }
}
