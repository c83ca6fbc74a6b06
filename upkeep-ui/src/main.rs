//! upkeep-ui (Upgrade Console) - Self-hosted upgrade page
//!
//! Serves a settings page showing the installed application version, checks
//! the release feed for a newer one, and lets an operator trigger the
//! upgrade workflow with a click. The heavy lifting — version publishing
//! and the upgrade itself — happens in external collaborators.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use upkeep_common::config::{self, ConsoleConfig};
use upkeep_common::events::EventBus;
use upkeep_ui::services::GitHubClient;
use upkeep_ui::{build_router, db, AppState};

/// Command-line arguments for upkeep-ui
#[derive(Parser, Debug)]
#[command(name = "upkeep-ui")]
#[command(about = "Upgrade console for self-hosted deployments")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5730", env = "UPKEEP_UI_PORT")]
    port: u16,

    /// Root folder containing config.toml and upkeep.db
    #[arg(short, long, env = "UPKEEP_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Upkeep Upgrade Console (upkeep-ui) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref());
    config::ensure_root_folder(&root_folder)?;
    info!("Root folder: {}", root_folder.display());

    let console_config = ConsoleConfig::load(&root_folder).with_context(|| {
        format!(
            "Missing or invalid {}/config.toml; an [upgrade] section with a repository is required",
            root_folder.display()
        )
    })?;
    info!("Watching releases of {}", console_config.repository);

    if console_config.token.is_none() {
        warn!(
            "No workflow token configured ({} or config.toml); upgrade triggering will fail",
            config::TOKEN_ENV
        );
    }

    // Sessions are written by the auth service; the console reads them back.
    // A missing database only disables the operator display.
    let db_path = config::database_path(&root_folder);
    let pool = match db::connect_readonly(&db_path).await {
        Ok(pool) => {
            info!("✓ Connected to database (read-only)");
            pool
        }
        Err(e) => {
            warn!("Sessions unavailable ({}); operator display disabled", e);
            db::connect_ephemeral().await?
        }
    };

    let github = Arc::new(
        GitHubClient::new(&console_config).context("Failed to create release client")?,
    );

    let state = AppState::new(
        pool,
        Arc::new(console_config),
        github.clone(),
        github,
        EventBus::new(100),
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port))
        .await
        .with_context(|| format!("Failed to bind port {}", args.port))?;
    info!("upkeep-ui listening on http://127.0.0.1:{}", args.port);
    info!("Health check: http://127.0.0.1:{}/health", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
