//! HTTP API handlers for upkeep-ui

pub mod buildinfo;
pub mod health;
pub mod session;
pub mod sse;
pub mod ui;
pub mod upgrade;
pub mod version;

pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use session::get_session;
pub use sse::event_stream;
pub use ui::{serve_index, serve_ui_css, serve_upgrade_js};
pub use upgrade::trigger_upgrade;
pub use version::get_version;
