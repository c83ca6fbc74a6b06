//! Release/version types shared between the console and its service clients

use serde::{Deserialize, Serialize};

/// Version information reported by the release collaborator
///
/// `update_available == None` means the installed version is current.
/// When present it denotes a version newer than `version`; that ordering
/// is the release collaborator's contract, not enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Installed application version
    pub version: String,

    /// Newer published version, omitted from the wire when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_available: Option<String>,
}

impl VersionInfo {
    /// Version info for an installation that is current
    pub fn up_to_date(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            update_available: None,
        }
    }

    /// Version info for an installation with a newer release published
    pub fn with_update(version: impl Into<String>, available: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            update_available: Some(available.into()),
        }
    }

    /// Whether the installed version is the latest published one
    pub fn is_up_to_date(&self) -> bool {
        self.update_available.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_up_to_date_omits_update_field() {
        let info = VersionInfo::up_to_date("1.2.3");
        assert!(info.is_up_to_date());

        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"version\":\"1.2.3\""));
        assert!(!json.contains("update_available"));
    }

    #[test]
    fn test_update_available_serializes() {
        let info = VersionInfo::with_update("1.2.3", "1.3.0");
        assert!(!info.is_up_to_date());

        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"update_available\":\"1.3.0\""));
    }

    #[test]
    fn test_absent_field_deserializes_to_none() {
        let info: VersionInfo = serde_json::from_str(r#"{"version":"2.0.0"}"#).unwrap();
        assert_eq!(info, VersionInfo::up_to_date("2.0.0"));
    }
}
