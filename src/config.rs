//! Configuration types for artifact-dl

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Runtime configuration
///
/// Every field has a default matching the Input Leap release workflow, so
/// `Config::default()` is enough for the normal release run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// GitHub REST API base URL (default: "https://api.github.com")
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Repository in `owner/name` form (default: "input-leap/input-leap")
    #[serde(default = "default_repository")]
    pub repository: String,

    /// Hub-style credentials file (default: `$HUB_CONFIG` or `~/.config/hub`)
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,

    /// Host key to look up in the credentials file (default: "github.com")
    #[serde(default = "default_credentials_host")]
    pub credentials_host: String,

    /// User-Agent sent with every request; GitHub rejects requests without one
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            repository: default_repository(),
            credentials_path: default_credentials_path(),
            credentials_host: default_credentials_host(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Check the fields that would otherwise only fail deep inside a request
    pub fn validate(&self) -> Result<()> {
        let mut parts = self.repository.split('/');
        let valid_repo = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty()
        );
        if !valid_repo {
            return Err(Error::Config {
                message: format!(
                    "repository must be in owner/name form, got {:?}",
                    self.repository
                ),
                key: Some("repository".to_string()),
            });
        }

        url::Url::parse(&self.api_base_url).map_err(|e| Error::Config {
            message: format!("invalid API base URL {:?}: {}", self.api_base_url, e),
            key: Some("api_base_url".to_string()),
        })?;

        if self.credentials_host.is_empty() {
            return Err(Error::Config {
                message: "credentials host must not be empty".to_string(),
                key: Some("credentials_host".to_string()),
            });
        }

        Ok(())
    }
}

/// Parameters of one release fetch, as given on the command line
#[derive(Clone, Debug)]
pub struct ReleaseRequest {
    /// Workflow run URL (or bare run id)
    pub run_locator: String,
    /// Directory the extracted packages are written to
    pub dest_dir: PathBuf,
    /// Version string substituted into destination filenames
    pub version: String,
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_repository() -> String {
    "input-leap/input-leap".to_string()
}

fn default_credentials_path() -> PathBuf {
    crate::credentials::default_credentials_path()
}

fn default_credentials_host() -> String {
    "github.com".to_string()
}

fn default_user_agent() -> String {
    concat!("artifact-dl/", env!("CARGO_PKG_VERSION")).to_string()
}
