//! Mock GitHub setup and configuration for integration tests

use super::fixtures::{TEST_VERSION, artifact_listing};
use artifact_dl::{Config, ReleaseRequest};
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Token written to the test credentials file
pub const TEST_TOKEN: &str = "ghp_test_token";

/// Run id used by the tests
pub const TEST_RUN_ID: u64 = 11834523211;

/// A mock GitHub API plus a scratch directory with a credentials file
pub struct TestEnv {
    pub server: MockServer,
    pub dir: TempDir,
    pub config: Config,
}

impl TestEnv {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();

        let credentials_path = dir.path().join("hub");
        std::fs::write(
            &credentials_path,
            format!(
                "github.com:\n- user: releaser\n  oauth_token: {TEST_TOKEN}\n  protocol: https\n"
            ),
        )
        .unwrap();

        let config = Config {
            api_base_url: server.uri(),
            credentials_path,
            ..Default::default()
        };

        Self {
            server,
            dir,
            config,
        }
    }

    /// Where the release files should land; not created up front
    pub fn dest_dir(&self) -> PathBuf {
        self.dir.path().join("release").join(TEST_VERSION)
    }

    pub fn request(&self) -> ReleaseRequest {
        ReleaseRequest {
            run_locator: format!(
                "https://github.com/input-leap/input-leap/actions/runs/{TEST_RUN_ID}"
            ),
            dest_dir: self.dest_dir(),
            version: TEST_VERSION.to_string(),
        }
    }

    /// Serve an artifact zip download, returning its URL
    pub async fn mount_archive(&self, index: usize, template: ResponseTemplate) -> String {
        let route = format!("/repos/input-leap/input-leap/actions/artifacts/{index}/zip");
        Mock::given(method("GET"))
            .and(path(route.as_str()))
            .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
            .respond_with(template)
            .mount(&self.server)
            .await;
        format!("{}{}", self.server.uri(), route)
    }

    /// Serve the artifact listing for the test run
    pub async fn mount_listing(&self, artifacts: &[(&str, String)]) {
        Mock::given(method("GET"))
            .and(path(format!(
                "/repos/input-leap/input-leap/actions/runs/{TEST_RUN_ID}/artifacts"
            )))
            .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(artifact_listing(artifacts)))
            .expect(1)
            .mount(&self.server)
            .await;
    }
}
