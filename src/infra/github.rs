use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, USER_AGENT},
};
use serde::Deserialize;

use crate::domain::version::SemVer;
use crate::error::{AppError, AppResult};
use crate::services::ReleaseService;

/// Repository the published releases and installer live in.
pub const GITHUB_REPO: &str = "baton-cli/baton";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

pub struct GitHubReleases {
    http: Client,
    repo: String,
}

impl GitHubReleases {
    pub fn new(repo: &str) -> Self {
        Self {
            http: Client::new(),
            repo: repo.to_string(),
        }
    }

    fn latest_release_endpoint(&self) -> String {
        format!("https://api.github.com/repos/{}/releases/latest", self.repo)
    }
}

#[async_trait]
impl ReleaseService for GitHubReleases {
    async fn fetch_latest_version(&self) -> AppResult<SemVer> {
        let response = self
            .http
            .get(self.latest_release_endpoint())
            .header(USER_AGENT, concat!("baton/", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/vnd.github+json")
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|err| AppError::ReleaseSource(format!("failed to call GitHub: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ReleaseSource(format!(
                "GitHub responded with {status}"
            )));
        }

        let payload: GitHubRelease = response.json().await.map_err(|err| {
            AppError::ReleaseSource(format!("failed to parse GitHub response: {err}"))
        })?;

        parse_tag(&payload.tag_name)
    }
}

/// Release tags are published as `v1.2.3`; the leading `v` is optional.
fn parse_tag(tag: &str) -> AppResult<SemVer> {
    let version = tag.trim().trim_start_matches('v');
    Ok(version.parse::<SemVer>()?)
}

#[derive(Deserialize)]
struct GitHubRelease {
    tag_name: String,
}
