//! UI serving routes
//!
//! Serves the embedded HTML/JS/CSS upgrade page (vanilla ES6+, no frontend
//! framework; assets are compiled in)

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

const INDEX_HTML: &str = include_str!("../../static/index.html");
const UPGRADE_JS: &str = include_str!("../../static/upgrade.js");
const UI_CSS: &str = include_str!("../../static/upkeep-ui.css");

/// GET /
///
/// Serves the upgrade page
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /static/upgrade.js
///
/// Serves the page controller script
pub async fn serve_upgrade_js() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "application/javascript"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        UPGRADE_JS,
    )
        .into_response()
}

/// GET /static/upkeep-ui.css
///
/// Serves the console styles
pub async fn serve_ui_css() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "text/css"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        UI_CSS,
    )
        .into_response()
}
