//! Canonical descriptor serialization
//!
//! Writes a descriptor back to Kotlin-DSL text in a fixed canonical layout.
//! Re-parsing the output yields an equal model, which is what the `fmt`
//! subcommand and the round-trip tests rely on.

use crate::model::{GradleDescriptor, VersionValue};
use std::fmt::Write;

/// Render a descriptor as canonical Kotlin-DSL text
pub fn to_kts(descriptor: &GradleDescriptor) -> String {
    let mut out = String::new();

    if !descriptor.plugins.is_empty() {
        out.push_str("plugins {\n");
        for plugin in &descriptor.plugins {
            let _ = writeln!(out, "    id(\"{}\")", plugin.id);
        }
        out.push_str("}\n\n");
    }

    let android = &descriptor.android;
    out.push_str("android {\n");
    let _ = writeln!(out, "    namespace = \"{}\"", android.namespace);
    let _ = writeln!(out, "    compileSdk = {}", android.compile_sdk);
    if let Some(ndk_version) = &android.ndk_version {
        let _ = writeln!(out, "    ndkVersion = \"{}\"", ndk_version);
    }

    if let Some(compile_options) = &android.compile_options {
        out.push_str("\n    compileOptions {\n");
        let _ = writeln!(
            out,
            "        sourceCompatibility = {}",
            compile_options.source_compatibility.as_kts()
        );
        let _ = writeln!(
            out,
            "        targetCompatibility = {}",
            compile_options.target_compatibility.as_kts()
        );
        out.push_str("    }\n");
    }

    if let Some(kotlin_options) = &android.kotlin_options {
        out.push_str("\n    kotlinOptions {\n");
        let _ = writeln!(out, "        jvmTarget = \"{}\"", kotlin_options.jvm_target);
        out.push_str("    }\n");
    }

    let default_config = &android.default_config;
    out.push_str("\n    defaultConfig {\n");
    let _ = writeln!(
        out,
        "        applicationId = \"{}\"",
        default_config.application_id
    );
    let _ = writeln!(out, "        minSdk = {}", default_config.min_sdk);
    let _ = writeln!(out, "        targetSdk = {}", default_config.target_sdk);
    let _ = writeln!(
        out,
        "        versionCode = {}",
        version_value(&default_config.version_code)
    );
    let _ = writeln!(
        out,
        "        versionName = {}",
        version_value(&default_config.version_name)
    );
    out.push_str("    }\n");

    if !android.build_types.is_empty() {
        out.push_str("\n    buildTypes {\n");
        for build_type in &android.build_types {
            let _ = writeln!(out, "        {} {{", build_type.name);
            if let Some(signing) = &build_type.signing_config {
                let _ = writeln!(
                    out,
                    "            signingConfig = signingConfigs.getByName(\"{}\")",
                    signing.name
                );
            }
            out.push_str("        }\n");
        }
        out.push_str("    }\n");
    }
    out.push_str("}\n");

    if let Some(flutter) = &descriptor.flutter {
        out.push_str("\nflutter {\n");
        let _ = writeln!(out, "    source = \"{}\"", flutter.source);
        out.push_str("}\n");
    }

    if !descriptor.dependencies.is_empty() {
        out.push_str("\ndependencies {\n");
        for dependency in &descriptor.dependencies {
            if dependency.platform {
                let _ = writeln!(
                    out,
                    "    {}(platform(\"{}\"))",
                    dependency.configuration,
                    dependency.notation()
                );
            } else {
                let _ = writeln!(
                    out,
                    "    {}(\"{}\")",
                    dependency.configuration,
                    dependency.notation()
                );
            }
        }
        out.push_str("}\n");
    }

    out
}

/// Literal digits stay bare (versionCode), other literals are quoted,
/// placeholders are written as references
fn version_value(value: &VersionValue) -> String {
    match value {
        VersionValue::Literal(v) if !v.is_empty() && v.chars().all(|c| c.is_ascii_digit()) => {
            v.clone()
        }
        VersionValue::Literal(v) => format!("\"{}\"", v),
        VersionValue::Placeholder(reference) => reference.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    const FULL: &str = r#"
plugins {
    id("com.android.application")
    id("com.google.gms.google-services")
    id("kotlin-android")
    id("dev.flutter.flutter-gradle-plugin")
}

android {
    namespace = "com.example.syfpark"
    compileSdk = 36
    ndkVersion = "27.0.12077973"

    compileOptions {
        sourceCompatibility = JavaVersion.VERSION_11
        targetCompatibility = JavaVersion.VERSION_11
    }

    kotlinOptions {
        jvmTarget = "11"
    }

    defaultConfig {
        applicationId = "com.example.syfpark"
        minSdk = 24
        targetSdk = 34
        versionCode = flutter.versionCode
        versionName = flutter.versionName
    }

    buildTypes {
        release {
            signingConfig = signingConfigs.getByName("debug")
        }
    }
}

flutter {
    source = "../.."
}

dependencies {
    implementation(platform("com.google.firebase:firebase-bom:33.1.0"))
    implementation("com.google.firebase:firebase-auth")
    implementation("com.google.android.gms:play-services-auth:21.2.0")
}
"#;

    const MINIMAL: &str = r#"
android {
    namespace = "com.example.app"
    compileSdk = 36

    defaultConfig {
        applicationId = "com.example.app"
        minSdk = 24
        targetSdk = 34
        versionCode = 1
        versionName = "1.0"
    }
}
"#;

    #[test]
    fn test_round_trip_full() {
        let parsed = parse_str(FULL).unwrap();
        let rendered = to_kts(&parsed);
        let reparsed = parse_str(&rendered).unwrap();
        assert_eq!(parsed, reparsed);
    }

    #[test]
    fn test_round_trip_minimal() {
        let parsed = parse_str(MINIMAL).unwrap();
        let rendered = to_kts(&parsed);
        let reparsed = parse_str(&rendered).unwrap();
        assert_eq!(parsed, reparsed);
    }

    #[test]
    fn test_canonical_output_is_stable() {
        let parsed = parse_str(FULL).unwrap();
        let rendered = to_kts(&parsed);
        let rendered_again = to_kts(&parse_str(&rendered).unwrap());
        assert_eq!(rendered, rendered_again);
    }

    #[test]
    fn test_version_values_rendered() {
        let parsed = parse_str(MINIMAL).unwrap();
        let rendered = to_kts(&parsed);
        assert!(rendered.contains("versionCode = 1\n"));
        assert!(rendered.contains("versionName = \"1.0\"\n"));
    }

    #[test]
    fn test_round_trip_empty_version_name() {
        let input = MINIMAL.replace("versionName = \"1.0\"", "versionName = \"\"");
        let parsed = parse_str(&input).unwrap();
        let rendered = to_kts(&parsed);
        assert!(rendered.contains("versionName = \"\"\n"));

        let reparsed = parse_str(&rendered).unwrap();
        assert_eq!(parsed, reparsed);
    }

    #[test]
    fn test_platform_entry_rendered() {
        let parsed = parse_str(FULL).unwrap();
        let rendered = to_kts(&parsed);
        assert!(rendered
            .contains("implementation(platform(\"com.google.firebase:firebase-bom:33.1.0\"))"));
    }
}
