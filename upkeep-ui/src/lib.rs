//! upkeep-ui library - Upgrade Console module
//!
//! Serves the upgrade page and the JSON API it drives: version check,
//! workflow trigger, session display, health, build info, and SSE events.

use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use upkeep_common::config::ConsoleConfig;
use upkeep_common::events::EventBus;

pub mod api;
pub mod db;
pub mod services;

use services::{ReleaseProvider, UpgradeLauncher};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Console database (read-only; sessions written by the auth service)
    pub db: SqlitePool,
    /// Console configuration (repository, workflow, token)
    pub config: Arc<ConsoleConfig>,
    /// Release feed collaborator
    pub releases: Arc<dyn ReleaseProvider>,
    /// Upgrade workflow collaborator
    pub launcher: Arc<dyn UpgradeLauncher>,
    /// Event bus feeding SSE clients
    pub events: EventBus,
}

impl AppState {
    /// Create new application state
    pub fn new(
        db: SqlitePool,
        config: Arc<ConsoleConfig>,
        releases: Arc<dyn ReleaseProvider>,
        launcher: Arc<dyn UpgradeLauncher>,
        events: EventBus,
    ) -> Self {
        Self {
            db,
            config,
            releases,
            launcher,
            events,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        // Embedded page and assets
        .route("/", get(api::serve_index))
        .route("/static/upgrade.js", get(api::serve_upgrade_js))
        .route("/static/upkeep-ui.css", get(api::serve_ui_css))
        // Console API
        .route("/api/version", get(api::get_version))
        .route("/api/upgrade", post(api::trigger_upgrade))
        .route("/api/session", get(api::get_session))
        .route("/api/buildinfo", get(api::get_build_info))
        .route("/api/events", get(api::event_stream))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
