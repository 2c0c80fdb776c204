//! Gradle build descriptor loading for the gradlecfg toolkit
//!
//! This crate implements the build-configuration loader: it parses an Android
//! `build.gradle.kts` descriptor (the app-module shape: plugins, `android`
//! block, optional `flutter` block, dependencies), validates its invariants,
//! and hands the validated structure to the caller. Loading is a pure
//! parse-validate-return operation with no side effects beyond the file read.
//!
//! # Example
//!
//! ```rust
//! use gradlecfg_descriptor::parser;
//!
//! let descriptor = parser::parse_str(
//!     r#"
//!     plugins {
//!         id("com.android.application")
//!     }
//!     android {
//!         namespace = "com.example.app"
//!         compileSdk = 36
//!         defaultConfig {
//!             applicationId = "com.example.app"
//!             minSdk = 24
//!             targetSdk = 34
//!             versionCode = 1
//!             versionName = "1.0"
//!         }
//!     }
//!     "#,
//! ).unwrap();
//! assert_eq!(descriptor.android.compile_sdk, 36);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod model;
pub mod parser;
pub mod serialize;
pub mod validate;

pub use model::GradleDescriptor;

use gradlecfg_core::error::{Error, Result};
use std::path::Path;

impl GradleDescriptor {
    /// Load and validate a descriptor from a file
    ///
    /// Reads the file, parses it, and checks the structural invariants
    /// (required fields, SDK ordering, coordinate uniqueness). Returns the
    /// first violated invariant as an error carrying its specific code.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }

        let content = std::fs::read_to_string(path)?;
        let descriptor = parser::parse_str(&content)
            .map_err(|e| e.with_context(format!("While loading {}", path.display())))?;

        validate::validate(&descriptor).to_result()?;
        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradlecfg_core::error::ErrorCode;
    use std::io::Write;

    const DESCRIPTOR: &str = r#"
plugins {
    id("com.android.application")
    id("kotlin-android")
}

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
    fn test_load_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DESCRIPTOR.as_bytes()).unwrap();

        let descriptor = GradleDescriptor::load(file.path()).unwrap();
        assert_eq!(descriptor.android.namespace, "com.example.app");
        assert_eq!(descriptor.plugins.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = GradleDescriptor::load(Path::new("/no/such/build.gradle.kts")).unwrap_err();
        assert_eq!(err.code, ErrorCode::FileNotFound);
    }

    #[test]
    fn test_load_reports_invalid_ordering() {
        let bad = DESCRIPTOR.replace("minSdk = 24", "minSdk = 35");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bad.as_bytes()).unwrap();

        let err = GradleDescriptor::load(file.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSdkOrdering);
    }
}
