//! GitHub token loading from a hub-style credentials file
//!
//! The file maps a host key to the accounts configured for it:
//!
//! ```yaml
//! github.com:
//! - user: octocat
//!   oauth_token: ghp_xxx
//!   protocol: https
//! ```
//!
//! The GitHub CLI writes a single mapping instead of a list; both shapes are
//! accepted and the first account wins.

use crate::error::CredentialsError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One account entry under a host key
#[derive(Clone, Debug, Deserialize)]
pub struct HubAccount {
    /// Account login, informational only
    #[serde(default)]
    pub user: Option<String>,
    /// Access token sent as the bearer credential
    pub oauth_token: String,
    /// Git protocol preference, informational only
    #[serde(default)]
    pub protocol: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HostAccounts {
    List(Vec<HubAccount>),
    Single(HubAccount),
}

/// Default credentials location: `$HUB_CONFIG`, else `~/.config/hub`
pub fn default_credentials_path() -> PathBuf {
    if let Some(path) = std::env::var_os("HUB_CONFIG").filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    dirs::home_dir()
        .unwrap_or_default()
        .join(".config")
        .join("hub")
}

/// Load the token of the first account configured for `host`
pub fn load_token(path: &Path, host: &str) -> std::result::Result<String, CredentialsError> {
    let content = std::fs::read_to_string(path).map_err(|source| CredentialsError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_token(&content, path, host)
}

/// Pick the token for `host` out of the file content
///
/// `path` is only used for error messages.
pub fn parse_token(
    content: &str,
    path: &Path,
    host: &str,
) -> std::result::Result<String, CredentialsError> {
    let malformed = |e: serde_yaml::Error| CredentialsError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    // Other hosts may use shapes this tool does not understand; only the
    // requested section is decoded.
    let mut hosts: HashMap<String, serde_yaml::Value> =
        serde_yaml::from_str(content).map_err(malformed)?;

    let section = hosts
        .remove(host)
        .ok_or_else(|| CredentialsError::HostMissing {
            host: host.to_string(),
            path: path.to_path_buf(),
        })?;
    let accounts: HostAccounts = serde_yaml::from_value(section).map_err(malformed)?;

    let account = match &accounts {
        HostAccounts::List(list) => list.first(),
        HostAccounts::Single(account) => Some(account),
    }
    .ok_or_else(|| CredentialsError::NoEntries {
        host: host.to_string(),
        path: path.to_path_buf(),
    })?;

    let token = account.oauth_token.trim();
    if token.is_empty() {
        return Err(CredentialsError::EmptyToken {
            host: host.to_string(),
            path: path.to_path_buf(),
        });
    }

    debug!(
        host,
        user = account.user.as_deref().unwrap_or("<unknown>"),
        "loaded credentials"
    );
    Ok(token.to_string())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HUB_FILE: &str = "\
github.com:
- user: first
  oauth_token: tok-first
  protocol: https
- user: second
  oauth_token: tok-second
";

    fn p() -> &'static Path {
        Path::new("/tmp/hub")
    }

    #[test]
    fn test_first_account_wins() {
        assert_eq!(parse_token(HUB_FILE, p(), "github.com").unwrap(), "tok-first");
    }

    #[test]
    fn test_gh_cli_single_mapping() {
        let content = "github.com:\n  user: me\n  oauth_token: gho_abc\n  git_protocol: ssh\n";
        assert_eq!(parse_token(content, p(), "github.com").unwrap(), "gho_abc");
    }

    #[test]
    fn test_other_host() {
        let content = format!("{HUB_FILE}ghe.example.com:\n- oauth_token: enterprise\n");
        assert_eq!(
            parse_token(&content, p(), "ghe.example.com").unwrap(),
            "enterprise"
        );
    }

    #[test]
    fn test_unrelated_host_without_token_is_ignored() {
        let content = format!(
            "{HUB_FILE}ghe.corp:\n- user: other\n  protocol: ssh\nkeyring.example: {{user: me}}\n"
        );
        assert_eq!(parse_token(&content, p(), "github.com").unwrap(), "tok-first");
    }

    #[test]
    fn test_requested_host_without_token_is_malformed() {
        let content = format!("{HUB_FILE}ghe.corp:\n- user: other\n");
        let err = parse_token(&content, p(), "ghe.corp").unwrap_err();
        assert!(matches!(err, CredentialsError::Malformed { .. }));
    }

    #[test]
    fn test_missing_host() {
        let err = parse_token(HUB_FILE, p(), "gitlab.com").unwrap_err();
        assert!(
            matches!(err, CredentialsError::HostMissing { ref host, .. } if host == "gitlab.com")
        );
    }

    #[test]
    fn test_empty_list() {
        let err = parse_token("github.com: []\n", p(), "github.com").unwrap_err();
        assert!(matches!(err, CredentialsError::NoEntries { .. }));
    }

    #[test]
    fn test_blank_token() {
        let content = "github.com:\n- oauth_token: '  '\n";
        let err = parse_token(content, p(), "github.com").unwrap_err();
        assert!(matches!(err, CredentialsError::EmptyToken { .. }));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = parse_token("github.com: [unclosed", p(), "github.com").unwrap_err();
        match err {
            CredentialsError::Malformed { path, .. } => assert_eq!(path, p()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_token_field_is_malformed() {
        let err = parse_token("github.com:\n- user: nobody\n", p(), "github.com").unwrap_err();
        assert!(matches!(err, CredentialsError::Malformed { .. }));
    }

    #[test]
    fn test_load_token_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hub");
        std::fs::write(&path, HUB_FILE).unwrap();
        assert_eq!(load_token(&path, "github.com").unwrap(), "tok-first");
    }

    #[test]
    fn test_load_token_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent");
        let err = load_token(&path, "github.com").unwrap_err();
        assert!(err.to_string().contains("absent"));
        assert!(matches!(err, CredentialsError::Unreadable { .. }));
    }
}
