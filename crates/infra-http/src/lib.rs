// Community Probe Infrastructure - HTTP Adapter
// Implements: CommunitySource over the authenticated REST API

mod community_source;
mod connection;
mod settings;

pub use community_source::HttpCommunitySource;
pub use connection::{create_client, OrgConnection};
pub use settings::{default_config_path, load_settings, OrgEntry, Settings};

// Note: reqwest::Error and config::ConfigError are mapped by helper functions
// (orphan rules prevent From impls into core error types here)
