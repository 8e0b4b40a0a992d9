//! Command line entry point for artifact-dl
//!
//! Usage: `artifact-dl <RUN_URL> <DEST_DIRECTORY> <VERSION>`

use artifact_dl::{Config, ReleaseRequest, fetch_release};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Download the release packages built by an Input Leap workflow run
#[derive(Debug, Parser)]
#[command(name = "artifact-dl", version, about)]
struct Cli {
    /// Workflow run URL; its last path segment is the run id
    run_url: String,

    /// Directory the packages are written to (created if missing)
    dest_directory: PathBuf,

    /// Release version used in the package filenames
    #[arg(value_name = "VERSION")]
    release_version: String,

    /// Repository in owner/name form
    #[arg(long, default_value = "input-leap/input-leap")]
    repo: String,

    /// GitHub REST API base URL
    #[arg(long, default_value = "https://api.github.com")]
    api_url: String,

    /// Hub credentials file [default: ~/.config/hub]
    #[arg(long, env = "HUB_CONFIG")]
    credentials: Option<PathBuf>,

    /// Host key to read from the credentials file
    #[arg(long, default_value = "github.com")]
    host: String,
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config {
            api_base_url: self.api_url.clone(),
            repository: self.repo.clone(),
            credentials_host: self.host.clone(),
            ..Default::default()
        };
        if let Some(path) = &self.credentials {
            config.credentials_path = path.clone();
        }
        config
    }

    fn request(&self) -> ReleaseRequest {
        ReleaseRequest {
            run_locator: self.run_url.clone(),
            dest_dir: self.dest_directory.clone(),
            version: self.release_version.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("artifact_dl=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let report = match fetch_release(&cli.config(), &cli.request()).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if !report.is_success() {
        println!("Got errors:");
        for error in &report.errors {
            println!("{}", error);
        }
    }

    ExitCode::from(report.exit_code())
}
