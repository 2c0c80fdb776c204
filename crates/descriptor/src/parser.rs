//! Descriptor parsing
//!
//! Line-oriented parser for the Kotlin-DSL descriptor syntax: `key = value`
//! assignments, nested `name { ... }` blocks, and call-style entries
//! (`id("...")`, `implementation("...")`). A block stack tracks the current
//! nesting; recognition of individual forms is regex-based.
//!
//! Unknown but well-formed properties are skipped (the wider Gradle surface
//! is large); syntactically malformed lines abort with the offending line
//! number.

use crate::model::{
    AndroidBlock, BuildType, CompileOptions, DefaultConfig, Dependency, FlutterBlock,
    GradleDescriptor, JavaVersion, KotlinOptions, PluginDeclaration, SigningConfigRef,
    VersionValue,
};
use gradlecfg_core::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static BLOCK_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*\{$").unwrap());
static ASSIGNMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(.+)$").unwrap());
static CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*\((.*)\)$").unwrap());
static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^"([^"]*)"$"#).unwrap());
static PLATFORM_ARG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^platform\(\s*"([^"]+)"\s*\)$"#).unwrap());
static SIGNING_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^signingConfigs\.getByName\("([^"]+)"\)$"#).unwrap());
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)+$").unwrap()
});

/// Parse a descriptor from its text form
///
/// Parsing is purely structural; invariant checks live in
/// [`crate::validate`]. Missing required fields are reported here because
/// the typed model cannot represent their absence.
pub fn parse_str(content: &str) -> Result<GradleDescriptor> {
    let mut stack: Vec<String> = Vec::new();
    let mut plugins: Vec<PluginDeclaration> = Vec::new();
    let mut android = AndroidBuilder::default();
    let mut flutter = FlutterBuilder::default();
    let mut dependencies: Vec<Dependency> = Vec::new();
    let mut last_line = 0;

    for (idx, raw_line) in content.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;
        let stripped = strip_comment(raw_line);
        let line = stripped.trim();
        if line.is_empty() {
            continue;
        }

        if line == "}" {
            if stack.pop().is_none() {
                return Err(Error::unbalanced_block(line_no));
            }
            continue;
        }

        if let Some(cap) = BLOCK_OPEN.captures(line) {
            let name = cap[1].to_string();
            if stack.len() == 2 && stack[0] == "android" && stack[1] == "buildTypes" {
                android.build_types.push(BuildType {
                    name: name.clone(),
                    signing_config: None,
                });
            }
            if name == "flutter" && stack.is_empty() {
                flutter.present = true;
            }
            stack.push(name);
            continue;
        }

        if let Some(cap) = ASSIGNMENT.captures(line) {
            let key = cap[1].to_string();
            let value = cap[2].trim().to_string();
            apply_assignment(&stack, &key, &value, line_no, &mut android, &mut flutter)?;
            continue;
        }

        if let Some(cap) = CALL.captures(line) {
            let name = cap[1].to_string();
            let arg = cap[2].trim().to_string();
            apply_call(&stack, &name, &arg, line_no, &mut plugins, &mut dependencies)?;
            continue;
        }

        return Err(Error::malformed(
            line_no,
            format!("Unrecognized syntax: {}", line),
        ));
    }

    if !stack.is_empty() {
        return Err(Error::unbalanced_block(last_line));
    }

    Ok(GradleDescriptor {
        plugins,
        android: android.finish()?,
        flutter: flutter.finish()?,
        dependencies,
    })
}

/// Remove a trailing `//` comment, ignoring occurrences inside string literals
fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut in_string = false;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => in_string = !in_string,
            b'/' if !in_string && i + 1 < bytes.len() && bytes[i + 1] == b'/' => {
                return &line[..i];
            }
            _ => {}
        }
        i += 1;
    }
    line
}

fn apply_assignment(
    stack: &[String],
    key: &str,
    value: &str,
    line_no: usize,
    android: &mut AndroidBuilder,
    flutter: &mut FlutterBuilder,
) -> Result<()> {
    let path: Vec<&str> = stack.iter().map(String::as_str).collect();

    match (path.as_slice(), key) {
        (["android"], "namespace") => android.namespace = Some(parse_string(value, line_no)?),
        (["android"], "compileSdk") => android.compile_sdk = Some(parse_sdk(value, line_no)?),
        (["android"], "ndkVersion") => android.ndk_version = Some(parse_string(value, line_no)?),

        (["android", "compileOptions"], "sourceCompatibility") => {
            android.source_compatibility = Some(parse_java_version(value, line_no)?);
        }
        (["android", "compileOptions"], "targetCompatibility") => {
            android.target_compatibility = Some(parse_java_version(value, line_no)?);
        }

        (["android", "kotlinOptions"], "jvmTarget") => {
            android.jvm_target = Some(parse_string(value, line_no)?);
        }

        (["android", "defaultConfig"], "applicationId") => {
            android.application_id = Some(parse_string(value, line_no)?);
        }
        (["android", "defaultConfig"], "minSdk") => {
            android.min_sdk = Some(parse_sdk(value, line_no)?);
        }
        (["android", "defaultConfig"], "targetSdk") => {
            android.target_sdk = Some(parse_sdk(value, line_no)?);
        }
        (["android", "defaultConfig"], "versionCode") => {
            android.version_code = Some(parse_version_value(value, line_no)?);
        }
        (["android", "defaultConfig"], "versionName") => {
            android.version_name = Some(parse_version_value(value, line_no)?);
        }

        (["android", "buildTypes", _], "signingConfig") => {
            let cap = SIGNING_REF.captures(value).ok_or_else(|| {
                Error::malformed(
                    line_no,
                    format!("Expected signingConfigs.getByName(\"...\"), got: {}", value),
                )
            })?;
            let build_type = android.build_types.last_mut().ok_or_else(|| {
                Error::malformed(line_no, "signingConfig outside a build type block")
            })?;
            build_type.signing_config = Some(SigningConfigRef {
                name: cap[1].to_string(),
            });
        }

        (["flutter"], "source") => flutter.source = Some(parse_string(value, line_no)?),

        _ => {
            debug!(key, path = ?path, "Skipping unknown property");
        }
    }

    Ok(())
}

fn apply_call(
    stack: &[String],
    name: &str,
    arg: &str,
    line_no: usize,
    plugins: &mut Vec<PluginDeclaration>,
    dependencies: &mut Vec<Dependency>,
) -> Result<()> {
    let path: Vec<&str> = stack.iter().map(String::as_str).collect();

    match path.as_slice() {
        ["plugins"] if name == "id" => {
            plugins.push(PluginDeclaration {
                id: parse_string(arg, line_no)?,
            });
        }
        ["dependencies"] => {
            let dependency = if let Some(cap) = PLATFORM_ARG.captures(arg) {
                Dependency::from_notation(name, &cap[1], true)?
            } else if let Some(cap) = QUOTED.captures(arg) {
                Dependency::from_notation(name, &cap[1], false)?
            } else {
                return Err(Error::malformed(
                    line_no,
                    format!("Unrecognized dependency notation: {}", arg),
                ));
            };
            dependencies.push(dependency);
        }
        _ => {
            debug!(call = name, path = ?path, "Skipping unknown call");
        }
    }

    Ok(())
}

fn parse_string(value: &str, line_no: usize) -> Result<String> {
    QUOTED
        .captures(value)
        .map(|cap| cap[1].to_string())
        .ok_or_else(|| Error::malformed(line_no, format!("Expected string literal, got: {}", value)))
}

fn parse_sdk(value: &str, line_no: usize) -> Result<u32> {
    value
        .parse::<u32>()
        .map_err(|_| Error::malformed(line_no, format!("Expected integer SDK level, got: {}", value)))
}

fn parse_java_version(value: &str, line_no: usize) -> Result<JavaVersion> {
    JavaVersion::parse(value).ok_or_else(|| {
        Error::malformed(
            line_no,
            format!("Unknown Java compatibility level: {}", value),
        )
    })
}

fn parse_version_value(value: &str, line_no: usize) -> Result<VersionValue> {
    if let Some(cap) = QUOTED.captures(value) {
        return Ok(VersionValue::Literal(cap[1].to_string()));
    }
    if value.chars().all(|c| c.is_ascii_digit()) && !value.is_empty() {
        return Ok(VersionValue::Literal(value.to_string()));
    }
    if PLACEHOLDER.is_match(value) {
        return Ok(VersionValue::Placeholder(value.to_string()));
    }
    Err(Error::malformed(
        line_no,
        format!("Expected literal or reference, got: {}", value),
    ))
}

/// Collects `android` block fields during parsing; the typed model requires
/// the mandatory ones at `finish`
#[derive(Default)]
struct AndroidBuilder {
    namespace: Option<String>,
    compile_sdk: Option<u32>,
    ndk_version: Option<String>,
    source_compatibility: Option<JavaVersion>,
    target_compatibility: Option<JavaVersion>,
    jvm_target: Option<String>,
    application_id: Option<String>,
    min_sdk: Option<u32>,
    target_sdk: Option<u32>,
    version_code: Option<VersionValue>,
    version_name: Option<VersionValue>,
    build_types: Vec<BuildType>,
}

impl AndroidBuilder {
    fn finish(self) -> Result<AndroidBlock> {
        let compile_options = match (self.source_compatibility, self.target_compatibility) {
            (Some(source), Some(target)) => Some(CompileOptions {
                source_compatibility: source,
                target_compatibility: target,
            }),
            (Some(_), None) => {
                return Err(Error::missing_field("compileOptions.targetCompatibility"))
            }
            (None, Some(_)) => {
                return Err(Error::missing_field("compileOptions.sourceCompatibility"))
            }
            (None, None) => None,
        };

        Ok(AndroidBlock {
            namespace: self.namespace.ok_or_else(|| Error::missing_field("namespace"))?,
            compile_sdk: self
                .compile_sdk
                .ok_or_else(|| Error::missing_field("compileSdk"))?,
            ndk_version: self.ndk_version,
            compile_options,
            kotlin_options: self.jvm_target.map(|jvm_target| KotlinOptions { jvm_target }),
            default_config: DefaultConfig {
                application_id: self
                    .application_id
                    .ok_or_else(|| Error::missing_field("applicationId"))?,
                min_sdk: self.min_sdk.ok_or_else(|| Error::missing_field("minSdk"))?,
                target_sdk: self
                    .target_sdk
                    .ok_or_else(|| Error::missing_field("targetSdk"))?,
                version_code: self
                    .version_code
                    .ok_or_else(|| Error::missing_field("versionCode"))?,
                version_name: self
                    .version_name
                    .ok_or_else(|| Error::missing_field("versionName"))?,
            },
            build_types: self.build_types,
        })
    }
}

#[derive(Default)]
struct FlutterBuilder {
    present: bool,
    source: Option<String>,
}

impl FlutterBuilder {
    fn finish(self) -> Result<Option<FlutterBlock>> {
        if !self.present {
            return Ok(None);
        }
        let source = self
            .source
            .ok_or_else(|| Error::missing_field("flutter.source"))?;
        Ok(Some(FlutterBlock { source }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradlecfg_core::error::ErrorCode;

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
        sourceCompatibility = JavaVersion.VERSION_11 // Standard for Flutter
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

    #[test]
    fn test_parse_full_descriptor() {
        let d = parse_str(FULL).unwrap();

        assert_eq!(d.plugins.len(), 4);
        assert!(d.has_plugin("com.android.application"));

        assert_eq!(d.android.namespace, "com.example.syfpark");
        assert_eq!(d.android.compile_sdk, 36);
        assert_eq!(d.android.ndk_version.as_deref(), Some("27.0.12077973"));

        let compile_options = d.android.compile_options.as_ref().unwrap();
        assert_eq!(compile_options.source_compatibility, JavaVersion::V11);
        assert_eq!(compile_options.target_compatibility, JavaVersion::V11);
        assert_eq!(d.android.kotlin_options.as_ref().unwrap().jvm_target, "11");

        assert_eq!(d.min_sdk(), 24);
        assert_eq!(d.target_sdk(), 34);
        assert!(d.android.default_config.version_code.is_placeholder());

        assert_eq!(d.android.build_types.len(), 1);
        let release = &d.android.build_types[0];
        assert_eq!(release.name, "release");
        assert_eq!(release.signing_config.as_ref().unwrap().name, "debug");

        assert_eq!(d.flutter.as_ref().unwrap().source, "../..");

        assert_eq!(d.dependencies.len(), 3);
        assert!(d.dependencies[0].platform);
        assert_eq!(d.dependencies[0].version.as_deref(), Some("33.1.0"));
        assert!(d.dependencies[1].version.is_none());
    }

    #[test]
    fn test_parse_preserves_dependency_order() {
        let d = parse_str(FULL).unwrap();
        let artifacts: Vec<&str> = d
            .dependencies
            .iter()
            .map(|dep| dep.coordinate.artifact.as_str())
            .collect();
        assert_eq!(
            artifacts,
            vec!["firebase-bom", "firebase-auth", "play-services-auth"]
        );
    }

    #[test]
    fn test_comments_stripped_outside_strings() {
        assert_eq!(strip_comment("compileSdk = 36 // latest"), "compileSdk = 36 ");
        assert_eq!(
            strip_comment(r#"namespace = "com.example//app""#),
            r#"namespace = "com.example//app""#
        );
    }

    #[test]
    fn test_unknown_properties_skipped() {
        let input = FULL.replace(
            "compileSdk = 36",
            "compileSdk = 36\n    buildToolsVersion = \"34.0.0\"",
        );
        let d = parse_str(&input).unwrap();
        assert_eq!(d.android.compile_sdk, 36);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let err = parse_str("android {\n    namespace = \n}").unwrap_err();
        assert_eq!(err.code, ErrorCode::MalformedDescriptor);
        assert!(err.message.contains("line 2"));
    }

    #[test]
    fn test_unbalanced_block() {
        let err = parse_str("android {\n    namespace = \"com.example\"\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnbalancedBlock);

        let err = parse_str("}\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnbalancedBlock);
    }

    #[test]
    fn test_missing_namespace() {
        let input = FULL.replace("namespace = \"com.example.syfpark\"", "");
        let err = parse_str(&input).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingRequiredField);
        assert!(err.message.contains("namespace"));
    }

    #[test]
    fn test_missing_version_fields() {
        let input = FULL.replace("versionCode = flutter.versionCode", "");
        let err = parse_str(&input).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingRequiredField);
        assert!(err.message.contains("versionCode"));
    }

    #[test]
    fn test_flutter_block_requires_source() {
        let input = FULL.replace("source = \"../..\"", "");
        let err = parse_str(&input).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingRequiredField);
        assert!(err.message.contains("flutter.source"));
    }

    #[test]
    fn test_literal_version_values() {
        let input = FULL
            .replace("versionCode = flutter.versionCode", "versionCode = 7")
            .replace("versionName = flutter.versionName", "versionName = \"1.4.2\"");
        let d = parse_str(&input).unwrap();
        assert_eq!(
            d.android.default_config.version_code,
            VersionValue::Literal("7".to_string())
        );
        assert_eq!(
            d.android.default_config.version_name,
            VersionValue::Literal("1.4.2".to_string())
        );
    }

    #[test]
    fn test_bad_signing_reference() {
        let input = FULL.replace(
            "signingConfig = signingConfigs.getByName(\"debug\")",
            "signingConfig = debugConfig",
        );
        let err = parse_str(&input).unwrap_err();
        assert_eq!(err.code, ErrorCode::MalformedDescriptor);
    }

    #[test]
    fn test_bad_dependency_notation() {
        let input = FULL.replace(
            "implementation(\"com.google.firebase:firebase-auth\")",
            "implementation(\"firebase-auth\")",
        );
        let err = parse_str(&input).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCoordinate);
    }
}
