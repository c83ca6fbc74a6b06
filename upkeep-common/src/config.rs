//! Configuration loading and root folder resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the root folder
pub const ROOT_FOLDER_ENV: &str = "UPKEEP_ROOT_FOLDER";

/// Environment variable carrying the workflow token (overrides config file)
pub const TOKEN_ENV: &str = "UPKEEP_GITHUB_TOKEN";

const DEFAULT_WORKFLOW: &str = "upgrade-event-handler.yml";
const DEFAULT_BRANCH: &str = "main";
const DEFAULT_RELEASE_API: &str = "https://api.github.com";

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. Platform config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&Path>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        return PathBuf::from(path);
    }

    // Priority 3: Platform config file
    if let Ok(config_path) = platform_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml_content.parse::<toml::Value>() {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(root_folder);
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Create the root folder if it does not exist yet
pub fn ensure_root_folder(root: &Path) -> Result<()> {
    if !root.exists() {
        std::fs::create_dir_all(root)?;
    }
    Ok(())
}

/// Path of the console database inside the root folder
pub fn database_path(root: &Path) -> PathBuf {
    root.join("upkeep.db")
}

/// Get the platform configuration file path
fn platform_config_file() -> Result<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("upkeep").join("config.toml"));

    if let Some(path) = user_config {
        if path.exists() {
            return Ok(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/upkeep/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        dirs::data_local_dir()
            .map(|d| d.join("upkeep"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/upkeep"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("upkeep"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/upkeep"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("upkeep"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\upkeep"))
    } else {
        PathBuf::from("./upkeep_data")
    }
}

/// Console configuration from `<root>/config.toml`
///
/// The `[upgrade]` section names the repository whose releases are watched
/// and whose workflow performs the upgrade. The token may live in the file
/// or in the environment; the environment wins.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Watched repository in `owner/name` form
    pub repository: String,
    /// Workflow file that performs the upgrade
    pub workflow: String,
    /// Branch ref the workflow is dispatched on
    pub branch: String,
    /// Base URL of the release/workflow API
    pub release_api: String,
    /// Token with workflow dispatch permission, if configured
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    upgrade: UpgradeSection,
}

#[derive(Debug, Deserialize)]
struct UpgradeSection {
    repository: String,
    workflow: Option<String>,
    branch: Option<String>,
    release_api: Option<String>,
    token: Option<String>,
}

impl ConsoleConfig {
    /// Load configuration from `<root>/config.toml`
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join("config.toml");
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Error::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config.toml: {}", e)))?;

        if file.upgrade.repository.is_empty() || !file.upgrade.repository.contains('/') {
            return Err(Error::Config(format!(
                "Invalid repository '{}': expected owner/name",
                file.upgrade.repository
            )));
        }

        // Environment token overrides the config file
        let token = std::env::var(TOKEN_ENV).ok().or(file.upgrade.token);

        Ok(Self {
            repository: file.upgrade.repository,
            workflow: file
                .upgrade
                .workflow
                .unwrap_or_else(|| DEFAULT_WORKFLOW.to_string()),
            branch: file
                .upgrade
                .branch
                .unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            release_api: file
                .upgrade
                .release_api
                .unwrap_or_else(|| DEFAULT_RELEASE_API.to_string())
                .trim_end_matches('/')
                .to_string(),
            token,
        })
    }
}
