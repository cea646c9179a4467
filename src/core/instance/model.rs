use serde::{Deserialize, Serialize};

use crate::core::error::{AnalyzerError, AnalyzerResult};

/// Base mod loader an instance is built on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoaderRequirement {
    pub name: String,
    pub date_modified: String,
    pub download_url: String,
    pub file_name: String,
    pub forge_version: String,
    pub minecraft_version: String,
}

/// A single optional artifact installed on top of the loader.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddonRequirement {
    pub display_name: String,
    pub download_url: String,
    pub file_date: String,
    pub file_name: String,
}

/// Instance descriptor as produced by the profile location (file or URL).
///
/// `addons` keeps descriptor order; it defines prompt and install order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InstanceDescriptor {
    pub name: String,
    #[serde(default)]
    pub install_path: Option<String>,
    pub loader: LoaderRequirement,
    pub addons: Vec<AddonRequirement>,
}

impl InstanceDescriptor {
    /// Parse an already decoded JSON document.
    pub fn from_value(value: serde_json::Value) -> AnalyzerResult<Self> {
        if !value.is_object() {
            return Err(AnalyzerError::MalformedDescriptor(
                "instance data is not a JSON object".into(),
            ));
        }

        serde_json::from_value(value).map_err(|e| AnalyzerError::MalformedDescriptor(e.to_string()))
    }

    /// Parse raw descriptor bytes (file contents or HTTP body).
    pub fn from_slice(bytes: &[u8]) -> AnalyzerResult<Self> {
        let value: serde_json::Value = serde_json::from_slice(bytes)
            .map_err(|e| AnalyzerError::MalformedDescriptor(e.to_string()))?;
        Self::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn loader_json() -> serde_json::Value {
        json!({
            "name": "Forge",
            "dateModified": "2024-01-01",
            "downloadUrl": "https://x/forge.jar",
            "fileName": "forge.jar",
            "forgeVersion": "47.2.0",
            "minecraftVersion": "1.20.1"
        })
    }

    #[test]
    fn parses_full_descriptor_in_order() {
        let parsed = InstanceDescriptor::from_value(json!({
            "name": "Pack",
            "installPath": "/games/pack",
            "loader": loader_json(),
            "addons": [
                {"displayName": "JEI", "downloadUrl": "https://x/jei.jar", "fileDate": "2024-01-02", "fileName": "jei.jar"},
                {"displayName": "AE2", "downloadUrl": "https://x/ae2.jar", "fileDate": "2024-01-03", "fileName": "ae2.jar"}
            ]
        }))
        .unwrap();

        assert_eq!(parsed.install_path.as_deref(), Some("/games/pack"));
        assert_eq!(parsed.loader.forge_version, "47.2.0");
        let names: Vec<_> = parsed.addons.iter().map(|a| a.display_name.as_str()).collect();
        assert_eq!(names, ["JEI", "AE2"]);
    }

    #[test]
    fn null_install_path_and_empty_addons_are_valid() {
        let parsed = InstanceDescriptor::from_value(json!({
            "name": "Pack",
            "installPath": null,
            "loader": loader_json(),
            "addons": []
        }))
        .unwrap();

        assert!(parsed.install_path.is_none());
        assert!(parsed.addons.is_empty());
    }

    #[test]
    fn missing_loader_is_malformed() {
        let err = InstanceDescriptor::from_value(json!({
            "name": "Pack",
            "addons": []
        }))
        .unwrap_err();

        match err {
            AnalyzerError::MalformedDescriptor(msg) => assert!(msg.contains("loader")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_addons_is_malformed() {
        let err = InstanceDescriptor::from_value(json!({
            "name": "Pack",
            "loader": loader_json()
        }))
        .unwrap_err();

        match err {
            AnalyzerError::MalformedDescriptor(msg) => assert!(msg.contains("addons")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_object_is_malformed() {
        assert!(matches!(
            InstanceDescriptor::from_value(json!({})),
            Err(AnalyzerError::MalformedDescriptor(_))
        ));
        assert!(matches!(
            InstanceDescriptor::from_value(json!([])),
            Err(AnalyzerError::MalformedDescriptor(_))
        ));
    }

    #[test]
    fn non_json_body_is_malformed() {
        assert!(matches!(
            InstanceDescriptor::from_slice(b"<html>502 Bad Gateway</html>"),
            Err(AnalyzerError::MalformedDescriptor(_))
        ));
        assert!(matches!(
            InstanceDescriptor::from_slice(b""),
            Err(AnalyzerError::MalformedDescriptor(_))
        ));
    }
}
