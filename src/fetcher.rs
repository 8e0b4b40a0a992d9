//! Per-artifact download and extraction loop
//!
//! Every expected artifact goes through lookup, download, archive open,
//! entry selection, and write. A failure at any step is recorded against that
//! artifact and the loop moves on, so one broken build job does not hold back
//! the packages of the others. Files already written stay on disk.

use crate::archive::{ArtifactArchive, select_entry};
use crate::client::{ArtifactMap, GithubClient};
use crate::error::{ArtifactError, Error, Result};
use crate::targets::{EXPECTED_ARTIFACTS, ExpectedArtifact};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Outcome of a batch
#[derive(Debug, Default)]
pub struct FetchReport {
    /// Files written, in table order
    pub written: Vec<PathBuf>,
    /// Per-artifact failures, in table order
    pub errors: Vec<ArtifactError>,
}

impl FetchReport {
    /// True when every expected artifact was written
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Process exit status for this outcome
    pub fn exit_code(&self) -> u8 {
        if self.is_success() { 0 } else { 1 }
    }
}

/// Pulls the expected packages out of a run's artifacts
#[derive(Debug)]
pub struct ArtifactFetcher {
    client: GithubClient,
    dest_dir: PathBuf,
    version: String,
    targets: Vec<ExpectedArtifact>,
}

impl ArtifactFetcher {
    /// Fetcher for the full release table
    pub fn new(
        client: GithubClient,
        dest_dir: impl Into<PathBuf>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            client,
            dest_dir: dest_dir.into(),
            version: version.into(),
            targets: EXPECTED_ARTIFACTS.to_vec(),
        }
    }

    /// Replace the expected-artifact table
    pub fn with_targets(mut self, targets: &[ExpectedArtifact]) -> Self {
        self.targets = targets.to_vec();
        self
    }

    /// Process every expected artifact
    ///
    /// # Errors
    /// Only failing to create the destination directory is returned as an
    /// error; everything per-artifact ends up in the report
    pub async fn fetch_all(&self, artifacts: &ArtifactMap) -> Result<FetchReport> {
        tokio::fs::create_dir_all(&self.dest_dir).await.map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "failed to create destination directory '{}': {}",
                    self.dest_dir.display(),
                    e
                ),
            ))
        })?;

        let mut report = FetchReport::default();

        for expected in &self.targets {
            match self.process_artifact(expected, artifacts).await {
                Ok(path) => report.written.push(path),
                Err(e) => {
                    warn!(artifact = expected.name, error = %e, "artifact failed");
                    report.errors.push(e);
                }
            }
        }

        info!(
            written = report.written.len(),
            failed = report.errors.len(),
            "finished processing artifacts"
        );
        Ok(report)
    }

    /// Lookup, download, extract, and write one expected artifact
    pub async fn process_artifact(
        &self,
        expected: &ExpectedArtifact,
        artifacts: &ArtifactMap,
    ) -> std::result::Result<PathBuf, ArtifactError> {
        let name = expected.name;

        let url = artifacts.get(name).ok_or_else(|| ArtifactError::NotFound {
            name: name.to_string(),
        })?;

        let pattern = expected.entry_pattern()?;

        info!(artifact = name, "{}: Downloading from {}", name, url);
        let bytes = self.client.download_archive(name, url).await?;

        let mut archive =
            ArtifactArchive::from_bytes(bytes).map_err(|e| ArtifactError::InvalidArchive {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        let entries = archive
            .entry_names()
            .map_err(|e| ArtifactError::InvalidArchive {
                name: name.to_string(),
                reason: e.to_string(),
            })?;

        let index = select_entry(entries.iter().map(String::as_str), &pattern).ok_or_else(|| {
            ArtifactError::PatternNotMatched {
                name: name.to_string(),
                pattern: pattern.to_string(),
                entries: entries.clone(),
            }
        })?;
        let entry = &entries[index];
        debug!(artifact = name, %entry, index, %pattern, "selected archive entry");

        let content = archive
            .read_entry(index)
            .map_err(|e| ArtifactError::InvalidArchive {
                name: name.to_string(),
                reason: format!("failed to read {}: {}", entry, e),
            })?;

        let dest_path = self.dest_dir.join(expected.destination_for(&self.version));
        info!(artifact = name, "{}: Writing to {}", name, dest_path.display());
        tokio::fs::write(&dest_path, &content)
            .await
            .map_err(|e| ArtifactError::WriteFailed {
                name: name.to_string(),
                path: dest_path.clone(),
                reason: e.to_string(),
            })?;

        Ok(dest_path)
    }
}
