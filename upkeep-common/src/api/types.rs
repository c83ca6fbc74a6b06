//! Shared API response types

use serde::Serialize;
use serde_json::Value;

/// Error response body for failed API calls
///
/// Returned with a non-2xx status; `error` is a stable identifier the page
/// can branch on, `message` is human-readable.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Additional error details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    /// Create new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Create error response with details
    pub fn with_details(
        error: impl Into<String>,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response() {
        let error = ErrorResponse::new("version_check_failed", "Release feed unreachable");

        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("version_check_failed"));
        assert!(json.contains("Release feed unreachable"));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_error_response_with_details() {
        let details = serde_json::json!({ "status": 403 });
        let error =
            ErrorResponse::with_details("upgrade_trigger_failed", "Dispatch rejected", details);

        assert_eq!(error.error, "upgrade_trigger_failed");
        assert!(error.details.is_some());
    }
}
