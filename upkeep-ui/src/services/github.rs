//! GitHub release feed and workflow dispatch client

use std::time::Duration;

use async_trait::async_trait;
use semver::Version;
use serde::Deserialize;
use thiserror::Error;
use upkeep_common::config::ConsoleConfig;
use upkeep_common::VersionInfo;

use super::{ReleaseProvider, UpgradeLauncher};

const USER_AGENT: &str = "Upkeep/0.1.0 (https://github.com/upkeep/upkeep)";
const GITHUB_API_ACCEPT: &str = "application/vnd.github+json";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Release client errors
#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("No published release found for {0}")]
    NoRelease(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Workflow token missing or lacks workflow permissions")]
    WorkflowPermission,

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Latest-release response, reduced to the field the console needs
#[derive(Debug, Deserialize)]
struct LatestRelease {
    tag_name: String,
}

/// Client for the GitHub releases and workflow dispatch APIs
///
/// Implements both collaborator seams: the release check compares the
/// compiled package version against the newest published release tag, and
/// the launcher dispatches the configured upgrade workflow.
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: String,
    repository: String,
    workflow: String,
    branch: String,
    token: Option<String>,
    installed: Version,
}

impl GitHubClient {
    pub fn new(config: &ConsoleConfig) -> Result<Self, ReleaseError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ReleaseError::Network(e.to_string()))?;

        let installed = Version::parse(env!("CARGO_PKG_VERSION"))
            .map_err(|e| ReleaseError::Parse(e.to_string()))?;

        Ok(Self {
            http,
            api_base: config.release_api.clone(),
            repository: config.repository.clone(),
            workflow: config.workflow.clone(),
            branch: config.branch.clone(),
            token: config.token.clone(),
            installed,
        })
    }

    /// Fetch and parse the newest published release tag
    async fn latest_release(&self) -> Result<Version, ReleaseError> {
        let url = format!(
            "{}/repos/{}/releases/latest",
            self.api_base, self.repository
        );

        tracing::debug!(url = %url, "Querying release feed");

        let mut request = self.http.get(&url).header("accept", GITHUB_API_ACCEPT);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ReleaseError::Network(e.to_string()))?;

        let status = response.status();

        if status == 404 {
            return Err(ReleaseError::NoRelease(self.repository.clone()));
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ReleaseError::Api(status.as_u16(), error_text));
        }

        let release: LatestRelease = response
            .json()
            .await
            .map_err(|e| ReleaseError::Parse(e.to_string()))?;

        parse_tag(&release.tag_name)
    }
}

/// Parse a release tag, tolerating the conventional leading `v`
fn parse_tag(tag: &str) -> Result<Version, ReleaseError> {
    let normalized = tag.trim().trim_start_matches('v');
    Version::parse(normalized)
        .map_err(|e| ReleaseError::Parse(format!("Bad release tag '{}': {}", tag, e)))
}

/// Build the version report from installed and latest versions
///
/// An update is reported only when the published version is strictly newer;
/// equal or older tags (rollbacks, re-tagged releases) read as up to date.
fn version_report(installed: &Version, latest: Version) -> VersionInfo {
    if latest > *installed {
        VersionInfo::with_update(installed.to_string(), latest.to_string())
    } else {
        VersionInfo::up_to_date(installed.to_string())
    }
}

#[async_trait]
impl ReleaseProvider for GitHubClient {
    async fn check(&self) -> Result<VersionInfo, ReleaseError> {
        let latest = self.latest_release().await?;
        let info = version_report(&self.installed, latest);

        tracing::info!(
            installed = %info.version,
            available = info.update_available.as_deref().unwrap_or("none"),
            "Version check completed"
        );

        Ok(info)
    }
}

#[async_trait]
impl UpgradeLauncher for GitHubClient {
    async fn dispatch(&self) -> Result<(), ReleaseError> {
        let token = self.token.as_ref().ok_or(ReleaseError::WorkflowPermission)?;

        let url = format!(
            "{}/repos/{}/actions/workflows/{}/dispatches",
            self.api_base, self.repository, self.workflow
        );

        tracing::info!(workflow = %self.workflow, branch = %self.branch, "Dispatching upgrade workflow");

        let response = self
            .http
            .post(&url)
            .header("accept", GITHUB_API_ACCEPT)
            .bearer_auth(token)
            .json(&serde_json::json!({ "ref": self.branch }))
            .send()
            .await
            .map_err(|e| ReleaseError::Network(e.to_string()))?;

        let status = response.status();

        match status.as_u16() {
            // Dispatch acceptance is a bare 204
            204 => Ok(()),
            401 | 403 | 404 => Err(ReleaseError::WorkflowPermission),
            code => {
                let error_text = response.text().await.unwrap_or_default();
                Err(ReleaseError::Api(code, error_text))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ConsoleConfig {
        ConsoleConfig {
            repository: "acme/widget".to_string(),
            workflow: "upgrade-event-handler.yml".to_string(),
            branch: "main".to_string(),
            release_api: "https://api.github.com".to_string(),
            token: None,
        }
    }

    #[test]
    fn test_client_creation() {
        let client = GitHubClient::new(&test_config());
        assert!(client.is_ok());
    }

    #[test]
    fn test_parse_tag_accepts_v_prefix() {
        assert_eq!(parse_tag("v1.2.3").unwrap(), Version::new(1, 2, 3));
        assert_eq!(parse_tag("1.2.3").unwrap(), Version::new(1, 2, 3));
        assert_eq!(parse_tag(" v2.0.0 ").unwrap(), Version::new(2, 0, 0));
    }

    #[test]
    fn test_parse_tag_rejects_garbage() {
        assert!(matches!(parse_tag("latest"), Err(ReleaseError::Parse(_))));
        assert!(matches!(parse_tag(""), Err(ReleaseError::Parse(_))));
    }

    #[test]
    fn test_version_report_newer_release() {
        let info = version_report(&Version::new(1, 2, 3), Version::new(1, 3, 0));
        assert_eq!(info, VersionInfo::with_update("1.2.3", "1.3.0"));
    }

    #[test]
    fn test_version_report_same_release_is_up_to_date() {
        let info = version_report(&Version::new(1, 2, 3), Version::new(1, 2, 3));
        assert!(info.is_up_to_date());
    }

    #[test]
    fn test_version_report_older_release_is_up_to_date() {
        let info = version_report(&Version::new(1, 2, 3), Version::new(1, 0, 0));
        assert!(info.is_up_to_date());
        assert_eq!(info.version, "1.2.3");
    }

    #[tokio::test]
    async fn test_dispatch_without_token_is_permission_error() {
        let client = GitHubClient::new(&test_config()).unwrap();
        let result = client.dispatch().await;
        assert!(matches!(result, Err(ReleaseError::WorkflowPermission)));
    }
}
