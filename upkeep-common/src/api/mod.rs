//! API module for shared HTTP API functionality
//!
//! Shared response types used by the console's JSON endpoints. Framework
//! wiring (Axum handlers, routers) lives in the module binaries; this module
//! holds only plain types.

pub mod types;

pub use types::ErrorResponse;
