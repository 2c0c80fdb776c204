//! Build descriptor data model
//!
//! Typed representation of an Android app-module `build.gradle.kts`
//! descriptor. Constructed once by the parser and immutable thereafter.

use gradlecfg_core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed build descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradleDescriptor {
    /// Declared plugins, in declaration order
    pub plugins: Vec<PluginDeclaration>,
    /// The `android` block
    pub android: AndroidBlock,
    /// The optional `flutter` block
    pub flutter: Option<FlutterBlock>,
    /// Declared dependencies, in declaration order
    pub dependencies: Vec<Dependency>,
}

impl GradleDescriptor {
    /// Check whether a plugin id is declared
    pub fn has_plugin(&self, id: &str) -> bool {
        self.plugins.iter().any(|p| p.id == id)
    }

    /// Minimum supported SDK level
    pub fn min_sdk(&self) -> u32 {
        self.android.default_config.min_sdk
    }

    /// Target SDK level
    pub fn target_sdk(&self) -> u32 {
        self.android.default_config.target_sdk
    }

    /// Compile SDK level
    pub fn compile_sdk(&self) -> u32 {
        self.android.compile_sdk
    }
}

/// A plugin declaration (`id("com.android.application")`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDeclaration {
    /// Plugin id
    pub id: String,
}

/// The `android` block of the descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndroidBlock {
    /// Unique package namespace
    pub namespace: String,
    /// SDK level the module compiles against
    pub compile_sdk: u32,
    /// Pinned NDK version, if any
    pub ndk_version: Option<String>,
    /// Java language-compatibility levels
    pub compile_options: Option<CompileOptions>,
    /// Kotlin compiler options
    pub kotlin_options: Option<KotlinOptions>,
    /// The `defaultConfig` block
    pub default_config: DefaultConfig,
    /// Declared build types, in declaration order
    pub build_types: Vec<BuildType>,
}

/// Java source/target compatibility levels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileOptions {
    pub source_compatibility: JavaVersion,
    pub target_compatibility: JavaVersion,
}

/// Kotlin compiler options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KotlinOptions {
    /// JVM bytecode target (`"11"`)
    pub jvm_target: String,
}

/// Enumerated Java language-compatibility tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JavaVersion {
    V1_8,
    V11,
    V17,
    V21,
}

impl JavaVersion {
    /// Parse a Kotlin-DSL tag such as `JavaVersion.VERSION_11`
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.strip_prefix("JavaVersion.")? {
            "VERSION_1_8" => Some(Self::V1_8),
            "VERSION_11" => Some(Self::V11),
            "VERSION_17" => Some(Self::V17),
            "VERSION_21" => Some(Self::V21),
            _ => None,
        }
    }

    /// The Kotlin-DSL spelling of this tag
    pub fn as_kts(&self) -> &'static str {
        match self {
            Self::V1_8 => "JavaVersion.VERSION_1_8",
            Self::V11 => "JavaVersion.VERSION_11",
            Self::V17 => "JavaVersion.VERSION_17",
            Self::V21 => "JavaVersion.VERSION_21",
        }
    }
}

/// The `defaultConfig` block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultConfig {
    /// Application id (usually equal to the namespace)
    pub application_id: String,
    /// Minimum supported SDK level
    pub min_sdk: u32,
    /// Target SDK level
    pub target_sdk: u32,
    /// Version code, literal or externally resolved
    pub version_code: VersionValue,
    /// Version name, literal or externally resolved
    pub version_name: VersionValue,
}

/// A version value that is either a literal or resolved by the external
/// build tool (`flutter.versionCode`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VersionValue {
    /// Literal value as written in the descriptor
    Literal(String),
    /// Dotted reference resolved outside the descriptor
    Placeholder(String),
}

impl VersionValue {
    /// True for externally resolved values
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

impl fmt::Display for VersionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(v) | Self::Placeholder(v) => write!(f, "{}", v),
        }
    }
}

/// A named build type (`release { ... }`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildType {
    /// Build type name
    pub name: String,
    /// Signing-config reference, if assigned
    pub signing_config: Option<SigningConfigRef>,
}

/// A reference into the signing-config registry
/// (`signingConfigs.getByName("debug")`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningConfigRef {
    /// Name key into the registry
    pub name: String,
}

/// The `flutter` block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlutterBlock {
    /// Source-root path, relative to the module
    pub source: String,
}

/// A dependency coordinate (`group:artifact`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)
    }
}

/// A dependency declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Configuration name (`implementation`, `api`, ...)
    pub configuration: String,
    /// Artifact coordinate
    pub coordinate: Coordinate,
    /// Version constraint; absent when managed by a BOM
    pub version: Option<String>,
    /// True for `platform(...)` bill-of-materials entries
    pub platform: bool,
}

impl Dependency {
    /// Parse a Gradle dependency notation (`group:artifact[:version]`)
    pub fn from_notation(configuration: &str, notation: &str, platform: bool) -> Result<Self> {
        let parts: Vec<&str> = notation.split(':').collect();
        let (group, artifact, version) = match parts.as_slice() {
            [group, artifact] => (*group, *artifact, None),
            [group, artifact, version] => (*group, *artifact, Some((*version).to_string())),
            _ => return Err(Error::invalid_coordinate(notation)),
        };

        if group.is_empty() || artifact.is_empty() {
            return Err(Error::invalid_coordinate(notation));
        }

        Ok(Self {
            configuration: configuration.to_string(),
            coordinate: Coordinate {
                group: group.to_string(),
                artifact: artifact.to_string(),
            },
            version,
            platform,
        })
    }

    /// The Gradle notation for this dependency (`group:artifact[:version]`)
    pub fn notation(&self) -> String {
        match &self.version {
            Some(version) => format!("{}:{}", self.coordinate, version),
            None => self.coordinate.to_string(),
        }
    }
}
