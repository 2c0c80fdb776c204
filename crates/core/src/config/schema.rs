//! Configuration schema definitions
//!
//! Typed schema for `.gradlecfg.toml`.

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub dependencies: DependenciesConfig,
}

/// General project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Project name
    #[serde(default = "default_project_name")]
    pub project_name: String,

    /// Default descriptor path, used when no file argument is given
    #[serde(default = "default_descriptor_path")]
    pub descriptor_path: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            project_name: default_project_name(),
            descriptor_path: default_descriptor_path(),
        }
    }
}

fn default_project_name() -> String {
    "app".to_string()
}

fn default_descriptor_path() -> String {
    "android/app/build.gradle.kts".to_string()
}

/// Project policy checked by the `lint` subcommand
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Plugins every app module must declare
    #[serde(default = "default_required_plugins")]
    pub required_plugins: Vec<String>,

    /// Warn when minSdk drops below this floor
    #[serde(default = "default_min_supported_sdk")]
    pub min_supported_sdk: u32,

    /// Warn when versionCode/versionName are externally resolved placeholders
    #[serde(default)]
    pub warn_placeholder_versions: bool,

    /// Warn when ndkVersion is not pinned
    #[serde(default = "default_true")]
    pub warn_missing_ndk: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            required_plugins: default_required_plugins(),
            min_supported_sdk: default_min_supported_sdk(),
            warn_placeholder_versions: false,
            warn_missing_ndk: true,
        }
    }
}

fn default_required_plugins() -> Vec<String> {
    vec!["com.android.application".to_string()]
}

fn default_min_supported_sdk() -> u32 {
    21
}

fn default_true() -> bool {
    true
}

/// Dependency policy checked by the `lint` subcommand
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DependenciesConfig {
    /// Coordinates that must not appear in the descriptor
    #[serde(default)]
    pub blocked: Vec<String>,

    /// Groups whose artifacts should be version-managed by a platform/BOM entry
    #[serde(default)]
    pub bom_groups: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let schema = ConfigSchema::default();
        assert_eq!(schema.general.descriptor_path, "android/app/build.gradle.kts");
        assert_eq!(schema.policy.min_supported_sdk, 21);
        assert!(schema.policy.required_plugins.contains(&"com.android.application".to_string()));
        assert!(schema.dependencies.blocked.is_empty());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let schema: ConfigSchema = toml::from_str(
            r#"
            [policy]
            min_supported_sdk = 24

            [dependencies]
            bom_groups = ["com.google.firebase"]
            "#,
        )
        .unwrap();
        assert_eq!(schema.policy.min_supported_sdk, 24);
        assert!(schema.policy.warn_missing_ndk);
        assert_eq!(schema.dependencies.bom_groups, vec!["com.google.firebase"]);
        assert_eq!(schema.general.project_name, "app");
    }
}
