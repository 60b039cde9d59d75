// Settings & org registry
//
// Sources, lowest to highest precedence:
//   1. built-in defaults
//   2. TOML file (explicit path, or the platform config dir)
//   3. COMMUNITY_PROBE_* environment variables (scalar settings only)

use crate::connection::OrgConnection;
use community_probe_core::application::constants::DEFAULT_POLL_INTERVAL;
use community_probe_core::error::{AppError, Result};
use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_VERSION: &str = "59.0";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const CONFIG_FILE_NAME: &str = "orgs.toml";
const ENV_PREFIX: &str = "COMMUNITY_PROBE";

/// A locally registered org
#[derive(Debug, Clone, Deserialize)]
pub struct OrgEntry {
    pub username: String,
    pub instance_url: String,
    pub access_token: String,
    #[serde(default)]
    pub org_id: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_version: String,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub orgs: Vec<OrgEntry>,
}

impl Settings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Resolve an alias or username to a connection
    ///
    /// Aliases win over usernames. Unknown targets are a configuration error.
    pub fn resolve(&self, target_org: &str) -> Result<OrgConnection> {
        let entry = self
            .orgs
            .iter()
            .find(|o| o.aliases.iter().any(|a| a == target_org))
            .or_else(|| self.orgs.iter().find(|o| o.username == target_org))
            .ok_or_else(|| AppError::Config(format!("Alias or user {} not set.", target_org)))?;

        debug!(
            target_org = %target_org,
            username = %entry.username,
            "Resolved target org"
        );

        Ok(OrgConnection {
            username: entry.username.clone(),
            org_id: entry.org_id.clone(),
            instance_url: entry.instance_url.clone(),
            access_token: entry.access_token.clone(),
            api_version: self.api_version.clone(),
        })
    }
}

/// Platform config location, e.g. `~/.config/community-probe/orgs.toml`
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "community-probe").map(|d| d.config_dir().join(CONFIG_FILE_NAME))
}

/// Load settings
///
/// An explicit `path` must exist; the default location is optional.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    load_settings_with_env(path, Environment::with_prefix(ENV_PREFIX))
}

/// Environment values stay strings; serde converts the numeric fields, so
/// `api_version = "60.0"` is not narrowed to a float.
fn load_settings_with_env(path: Option<&Path>, env: Environment) -> Result<Settings> {
    let mut builder = Config::builder()
        .set_default("api_version", DEFAULT_API_VERSION)
        .map_err(map_config_error)?
        .set_default("poll_interval_secs", DEFAULT_POLL_INTERVAL.as_secs())
        .map_err(map_config_error)?
        .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS)
        .map_err(map_config_error)?;

    match path {
        Some(p) => {
            debug!(path = %p.display(), "Loading settings file");
            builder = builder.add_source(File::from(p).required(true));
        }
        None => {
            if let Some(default) = default_config_path() {
                debug!(path = %default.display(), "Loading default settings file if present");
                builder = builder.add_source(File::from(default).required(false));
            }
        }
    }

    builder
        .add_source(env)
        .build()
        .and_then(|c| c.try_deserialize::<Settings>())
        .map_err(map_config_error)
}

fn map_config_error(err: ConfigError) -> AppError {
    AppError::Config(format!("Failed to load settings: {}", err))
}
