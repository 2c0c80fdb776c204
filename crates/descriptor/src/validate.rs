//! Descriptor invariant validation and policy lint
//!
//! [`validate`] checks the structural invariants every descriptor must hold:
//! non-empty identifiers, `minSdk <= targetSdk <= compileSdk`, and unique
//! non-BOM coordinates. [`lint`] adds non-blocking project-policy warnings
//! driven by the tool configuration.

use crate::model::GradleDescriptor;
use gradlecfg_core::config::ConfigSchema;
use gradlecfg_core::error::ErrorCode;
use gradlecfg_core::validation::{ValidationError, ValidationResult, Validator};
use std::collections::HashSet;

const KNOWN_JVM_TARGETS: &[&str] = &["1.8", "11", "17", "21"];

/// Sanity bounds for platform API levels
const SDK_LEVEL_MIN: u32 = 1;
const SDK_LEVEL_MAX: u32 = 100;

/// Check the structural invariants of a descriptor
pub fn validate(descriptor: &GradleDescriptor) -> ValidationResult {
    let min_sdk = descriptor.min_sdk();
    let target_sdk = descriptor.target_sdk();
    let compile_sdk = descriptor.compile_sdk();

    let mut validator = Validator::new()
        .required("namespace", &descriptor.android.namespace)
        .required("applicationId", &descriptor.android.default_config.application_id)
        .range("compileSdk", compile_sdk, SDK_LEVEL_MIN, SDK_LEVEL_MAX)
        .custom("minSdk", ErrorCode::InvalidSdkOrdering, || {
            (min_sdk > target_sdk).then(|| {
                format!("minSdk {} exceeds targetSdk {}", min_sdk, target_sdk)
            })
        })
        .custom("targetSdk", ErrorCode::InvalidSdkOrdering, || {
            (target_sdk > compile_sdk).then(|| {
                format!("targetSdk {} exceeds compileSdk {}", target_sdk, compile_sdk)
            })
        })
        .custom("dependencies", ErrorCode::DuplicateDependency, || {
            find_duplicate(descriptor)
        });

    if let Some(kotlin_options) = &descriptor.android.kotlin_options {
        validator = validator.one_of(
            "kotlinOptions.jvmTarget",
            &kotlin_options.jvm_target,
            KNOWN_JVM_TARGETS,
        );
    }

    validator.validate()
}

/// First duplicated non-BOM coordinate, if any
fn find_duplicate(descriptor: &GradleDescriptor) -> Option<String> {
    let mut seen = HashSet::new();
    for dependency in descriptor.dependencies.iter().filter(|d| !d.platform) {
        if !seen.insert(&dependency.coordinate) {
            return Some(format!(
                "Duplicate dependency coordinate: {}",
                dependency.coordinate
            ));
        }
    }
    None
}

/// Check project policy; produces warnings only
pub fn lint(descriptor: &GradleDescriptor, schema: &ConfigSchema) -> ValidationResult {
    let mut result = Validator::new()
        .warn_if(
            "minSdk",
            descriptor.min_sdk() < schema.policy.min_supported_sdk,
            &format!(
                "minSdk {} is below the supported floor {}",
                descriptor.min_sdk(),
                schema.policy.min_supported_sdk
            ),
        )
        .warn_if(
            "ndkVersion",
            schema.policy.warn_missing_ndk && descriptor.android.ndk_version.is_none(),
            "ndkVersion is not pinned",
        )
        .warn_if(
            "versionCode",
            schema.policy.warn_placeholder_versions
                && descriptor.android.default_config.version_code.is_placeholder(),
            "versionCode is resolved externally",
        )
        .validate();

    for plugin in &schema.policy.required_plugins {
        if !descriptor.has_plugin(plugin) {
            result.add_warning(ValidationError {
                field: "plugins".to_string(),
                message: format!("Required plugin not declared: {}", plugin),
                code: ErrorCode::InvalidValue,
                expected: Some(plugin.clone()),
                actual: None,
            });
        }
    }

    for dependency in &descriptor.dependencies {
        let coordinate = dependency.coordinate.to_string();
        if schema.dependencies.blocked.contains(&coordinate) {
            result.add_warning(ValidationError {
                field: "dependencies".to_string(),
                message: format!("Blocked coordinate: {}", coordinate),
                code: ErrorCode::InvalidValue,
                expected: None,
                actual: Some(coordinate),
            });
        }
    }

    let platform_groups: HashSet<&str> = descriptor
        .dependencies
        .iter()
        .filter(|d| d.platform)
        .map(|d| d.coordinate.group.as_str())
        .collect();

    for dependency in descriptor.dependencies.iter().filter(|d| !d.platform) {
        if dependency.version.is_none() && !platform_groups.contains(dependency.coordinate.group.as_str())
        {
            result.add_warning(ValidationError {
                field: "dependencies".to_string(),
                message: format!(
                    "Versionless dependency {} is not covered by a platform/BOM entry",
                    dependency.coordinate
                ),
                code: ErrorCode::InvalidValue,
                expected: None,
                actual: Some(dependency.coordinate.to_string()),
            });
        }
    }

    result
}
