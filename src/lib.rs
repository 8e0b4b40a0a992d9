//! # artifact-dl
//!
//! Assembles an Input Leap release directory from the artifacts of one
//! GitHub Actions workflow run.
//!
//! For every package in [`targets::EXPECTED_ARTIFACTS`] the run's artifact zip
//! is downloaded, the first entry matching the package's pattern is pulled
//! out, and it is written under a version-stamped filename. Failures of single
//! artifacts are collected in a [`FetchReport`] instead of aborting the batch.
//!
//! ## Quick Start
//!
//! ```no_run
//! use artifact_dl::{Config, ReleaseRequest, fetch_release};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let request = ReleaseRequest {
//!         run_locator: "https://github.com/input-leap/input-leap/actions/runs/11834523211".into(),
//!         dest_dir: "release".into(),
//!         version: "3.0.2".into(),
//!     };
//!
//!     let report = fetch_release(&Config::default(), &request).await?;
//!     for error in &report.errors {
//!         eprintln!("{}", error);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Downloaded zip access and entry selection
pub mod archive;
/// GitHub REST client
pub mod client;
/// Configuration types
pub mod config;
/// Hub credentials file loading
pub mod credentials;
/// Error types
pub mod error;
/// Per-artifact processing loop
pub mod fetcher;
/// Workflow run identifiers
pub mod run;
/// Expected release artifacts
pub mod targets;

pub use client::{ArtifactMap, GithubClient};
pub use config::{Config, ReleaseRequest};
pub use error::{ArtifactError, CredentialsError, Error, Result};
pub use fetcher::{ArtifactFetcher, FetchReport};
pub use run::RunId;

use tracing::info;

/// Fetch every expected artifact of a workflow run into `request.dest_dir`
///
/// # Errors
/// Fatal problems (bad configuration or run locator, unreadable credentials,
/// failed artifact listing, uncreatable destination) are returned as `Err`.
/// Per-artifact failures are in the returned report.
pub async fn fetch_release(config: &Config, request: &ReleaseRequest) -> Result<FetchReport> {
    config.validate()?;

    let run_id = RunId::from_locator(&request.run_locator)?;
    info!(%run_id, repository = %config.repository, "fetching release artifacts");

    let token = credentials::load_token(&config.credentials_path, &config.credentials_host)?;
    let client = GithubClient::new(config, &token)?;

    let artifacts = client.list_run_artifacts(run_id).await?;

    ArtifactFetcher::new(client, &request.dest_dir, &request.version)
        .fetch_all(&artifacts)
        .await
}
