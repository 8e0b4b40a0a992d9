//! GitHub Actions REST client
//!
//! Two calls are needed: list the artifacts of a workflow run, and fetch one
//! artifact's zip. Both carry the bearer token. Artifact downloads redirect to
//! blob storage on another host; reqwest drops the `Authorization` header on
//! that hop, which is what the storage backend expects.

use crate::config::Config;
use crate::error::{ArtifactError, Error, Result};
use crate::run::RunId;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Artifact name to archive download URL
pub type ArtifactMap = HashMap<String, String>;

/// Page size for the artifact listing (GitHub's maximum)
const ARTIFACTS_PER_PAGE: u32 = 100;

/// REST API version pinned in every request
const GITHUB_API_VERSION: &str = "2022-11-28";

/// One entry of the run artifact listing
#[derive(Clone, Debug, Deserialize)]
pub struct WorkflowArtifact {
    /// Artifact name as uploaded by the workflow
    pub name: String,
    /// API URL that redirects to the zip
    pub archive_download_url: String,
    /// Compressed size in bytes
    #[serde(default)]
    pub size_in_bytes: u64,
    /// Expired artifacts are still listed but can no longer be downloaded
    #[serde(default)]
    pub expired: bool,
}

#[derive(Debug, Deserialize)]
struct ArtifactList {
    #[serde(default)]
    total_count: u64,
    #[serde(default)]
    artifacts: Vec<WorkflowArtifact>,
}

/// Authenticated client for one repository
#[derive(Clone, Debug)]
pub struct GithubClient {
    http: reqwest::Client,
    api_base: String,
    repository: String,
}

impl GithubClient {
    /// Create a client that sends `token` as bearer credential
    ///
    /// No request timeout is set; the transport defaults apply.
    ///
    /// # Errors
    /// Returns error if the token is not a valid header value or the HTTP
    /// client cannot be built
    pub fn new(config: &Config, token: &str) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            Error::Config {
                message: "oauth_token contains characters not allowed in an HTTP header"
                    .to_string(),
                key: Some("oauth_token".to_string()),
            }
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            HeaderName::from_static("x-github-api-version"),
            HeaderValue::from_static(GITHUB_API_VERSION),
        );

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base_url.trim_end_matches('/').to_string(),
            repository: config.repository.clone(),
        })
    }

    /// Listing endpoint for `run_id`
    pub fn artifacts_url(&self, run_id: RunId) -> String {
        format!(
            "{}/repos/{}/actions/runs/{}/artifacts?per_page={}",
            self.api_base, self.repository, run_id, ARTIFACTS_PER_PAGE
        )
    }

    /// List the artifacts of a workflow run
    ///
    /// A run without artifacts yields an empty map. When two artifacts share
    /// a name, the one listed later replaces the earlier one.
    ///
    /// # Errors
    /// Transport failures, non-success statuses, and undecodable bodies are
    /// all returned; none of them is retried
    pub async fn list_run_artifacts(&self, run_id: RunId) -> Result<ArtifactMap> {
        let url = self.artifacts_url(run_id);
        debug!(%run_id, %url, "listing run artifacts");

        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Api { status, url });
        }

        let body = response.bytes().await?;
        let list: ArtifactList = serde_json::from_slice(&body)?;

        if list.total_count > list.artifacts.len() as u64 {
            warn!(
                %run_id,
                total = list.total_count,
                received = list.artifacts.len(),
                "artifact listing truncated; only the first page is used"
            );
        }

        let mut artifacts = ArtifactMap::with_capacity(list.artifacts.len());
        for artifact in list.artifacts {
            if artifact.expired {
                debug!(name = %artifact.name, "artifact is expired");
            }
            if let Some(previous) =
                artifacts.insert(artifact.name.clone(), artifact.archive_download_url)
            {
                debug!(
                    name = %artifact.name,
                    replaced = %previous,
                    "duplicate artifact name, keeping the later entry"
                );
            }
        }

        info!(%run_id, count = artifacts.len(), "found run artifacts");
        Ok(artifacts)
    }

    /// Download the zip of the artifact `name` from `url`
    ///
    /// Failures are per-artifact errors so the caller can move on.
    pub async fn download_archive(
        &self,
        name: &str,
        url: &str,
    ) -> std::result::Result<Vec<u8>, ArtifactError> {
        let request_error = |e: reqwest::Error| ArtifactError::Request {
            name: name.to_string(),
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = self.http.get(url).send().await.map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArtifactError::DownloadFailed {
                name: name.to_string(),
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(request_error)?;
        debug!(name, bytes = body.len(), "downloaded artifact archive");
        Ok(body.to_vec())
    }
}
