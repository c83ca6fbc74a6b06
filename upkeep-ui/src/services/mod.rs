//! Service clients for the console's external collaborators
//!
//! The two operations the page drives — "fetch current and latest version"
//! and "trigger upgrade" — live behind trait seams so handlers stay testable
//! with deterministic collaborators. `GitHubClient` implements both against
//! the GitHub releases and workflow dispatch APIs.

mod github;

pub use github::{GitHubClient, ReleaseError};

use async_trait::async_trait;
use upkeep_common::VersionInfo;

/// Release feed collaborator: reports installed + latest published version
#[async_trait]
pub trait ReleaseProvider: Send + Sync {
    /// Check the release feed for the latest published version
    async fn check(&self) -> Result<VersionInfo, ReleaseError>;
}

/// Upgrade collaborator: dispatches the upgrade workflow
#[async_trait]
pub trait UpgradeLauncher: Send + Sync {
    /// Trigger the upgrade workflow; returns once the dispatch is accepted
    async fn dispatch(&self) -> Result<(), ReleaseError>;
}
