//! Error types for artifact-dl
//!
//! Errors come in two tiers:
//! - [`Error`] is fatal and aborts the whole invocation (bad run locator,
//!   unreadable credentials, failed artifact listing, ...)
//! - [`ArtifactError`] belongs to a single expected artifact. The fetcher
//!   records it and moves on to the next artifact.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for artifact-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for artifact-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "repository")
        key: Option<String>,
    },

    /// The run locator did not end in a numeric run id
    #[error("invalid run locator {locator:?}: {reason}")]
    InvalidRunLocator {
        /// The locator as given on the command line
        locator: String,
        /// Why it was rejected
        reason: String,
    },

    /// Credentials could not be loaded
    #[error("credentials error: {0}")]
    Credentials(#[from] CredentialsError),

    /// The provider answered the artifact listing with a non-success status
    #[error("GitHub API returned HTTP {status} for {url}")]
    Api {
        /// HTTP status returned by the provider
        status: StatusCode,
        /// Requested URL
        url: String,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while loading the hub credentials file
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// File missing or unreadable
    #[error("cannot read credentials file {path}: {source}")]
    Unreadable {
        /// Credentials file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// File is not the expected YAML shape
    #[error("malformed credentials file {path}: {reason}")]
    Malformed {
        /// Credentials file path
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// No section for the requested host
    #[error("no entry for host {host} in credentials file {path}")]
    HostMissing {
        /// Host key that was looked up (e.g. "github.com")
        host: String,
        /// Credentials file path
        path: PathBuf,
    },

    /// The host section is an empty list
    #[error("host {host} has no accounts in credentials file {path}")]
    NoEntries {
        /// Host key that was looked up
        host: String,
        /// Credentials file path
        path: PathBuf,
    },

    /// The first account has a blank token
    #[error("empty oauth_token for host {host} in credentials file {path}")]
    EmptyToken {
        /// Host key that was looked up
        host: String,
        /// Credentials file path
        path: PathBuf,
    },
}

/// Failure of a single expected artifact
///
/// Display strings are what ends up in the final error summary.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The run has no artifact with this name
    #[error("Artifact {name} not found in Github artifacts")]
    NotFound {
        /// Expected artifact name
        name: String,
    },

    /// The archive download answered with a non-success status
    #[error("{name}: Failed to download {url} (HTTP {status})")]
    DownloadFailed {
        /// Expected artifact name
        name: String,
        /// Archive download URL
        url: String,
        /// HTTP status returned
        status: StatusCode,
    },

    /// The archive request did not complete
    #[error("{name}: Failed to download {url}: {reason}")]
    Request {
        /// Expected artifact name
        name: String,
        /// Archive download URL
        url: String,
        /// Transport error message
        reason: String,
    },

    /// The downloaded bytes are not a readable zip container
    #[error("{name}: downloaded file is not a valid zip: {reason}")]
    InvalidArchive {
        /// Expected artifact name
        name: String,
        /// Reader error message
        reason: String,
    },

    /// No entry of the archive matches the extraction pattern
    #[error("{name}: {pattern} not in downloaded zip: {entries:?}")]
    PatternNotMatched {
        /// Expected artifact name
        name: String,
        /// Extraction pattern source text
        pattern: String,
        /// Entry names of the archive in listing order
        entries: Vec<String>,
    },

    /// The extraction pattern does not compile
    #[error("{name}: invalid pattern {pattern}: {reason}")]
    InvalidPattern {
        /// Expected artifact name
        name: String,
        /// Extraction pattern source text
        pattern: String,
        /// Regex compiler message
        reason: String,
    },

    /// The extracted bytes could not be written
    #[error("{name}: failed to write {path}: {reason}")]
    WriteFailed {
        /// Expected artifact name
        name: String,
        /// Destination file path
        path: PathBuf,
        /// I/O error message
        reason: String,
    },
}

impl ArtifactError {
    /// Name of the expected artifact this error belongs to
    pub fn artifact_name(&self) -> &str {
        match self {
            ArtifactError::NotFound { name }
            | ArtifactError::DownloadFailed { name, .. }
            | ArtifactError::Request { name, .. }
            | ArtifactError::InvalidArchive { name, .. }
            | ArtifactError::PatternNotMatched { name, .. }
            | ArtifactError::InvalidPattern { name, .. }
            | ArtifactError::WriteFailed { name, .. } => name,
        }
    }
}
