//! Descriptor and input validation
//!
//! Provides a fluent validation builder producing field-level diagnostics.
//! Each diagnostic carries an [`ErrorCode`] so callers can match on the
//! specific failure kind.
//!
//! # Example
//!
//! ```rust
//! use gradlecfg_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("namespace", "com.example.app")
//!     .range("minSdk", 24, 1, 36)
//!     .validate();
//!
//! assert!(result.is_valid());
//! ```

use crate::error::{Error, ErrorCode, Result};
use serde::{Deserialize, Serialize};

/// Validation error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: ErrorCode,
    /// Expected value (if applicable)
    pub expected: Option<String>,
    /// Actual value (if applicable)
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Get all warnings
    pub fn warnings(&self) -> &[ValidationError] {
        &self.warnings
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: ValidationError) {
        self.warnings.push(warning);
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Convert to Result type
    ///
    /// The first error's code becomes the returned error's code, so a single
    /// failed invariant surfaces as its specific kind rather than a generic
    /// validation failure.
    pub fn to_result(self) -> Result<()> {
        if self.is_valid() {
            return Ok(());
        }
        let code = self.errors[0].code;
        let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        Err(Error::new(
            code,
            format!("Validation failed: {}", messages.join("; ")),
        ))
    }
}

/// Fluent validator builder
pub struct Validator {
    result: ValidationResult,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self {
            result: ValidationResult::new(),
        }
    }

    /// Validate that a field is not empty
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: "Field is required".to_string(),
                code: ErrorCode::MissingRequiredField,
                expected: Some("non-empty value".to_string()),
                actual: Some("empty".to_string()),
            });
        }
        self
    }

    /// Validate a numeric range
    pub fn range<T: PartialOrd + std::fmt::Display>(
        mut self,
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> Self {
        if value < min || value > max {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be between {} and {}", min, max),
                code: ErrorCode::InvalidValue,
                expected: Some(format!("{} - {}", min, max)),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Validate that a value is in a list of allowed values
    pub fn one_of(mut self, field: &str, value: &str, allowed: &[&str]) -> Self {
        if !allowed.contains(&value) {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be one of: {}", allowed.join(", ")),
                code: ErrorCode::InvalidValue,
                expected: Some(allowed.join(", ")),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Add a custom validation with an explicit error code
    pub fn custom<F>(mut self, field: &str, code: ErrorCode, f: F) -> Self
    where
        F: FnOnce() -> Option<String>,
    {
        if let Some(message) = f() {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message,
                code,
                expected: None,
                actual: None,
            });
        }
        self
    }

    /// Add a warning (non-blocking)
    pub fn warn_if(mut self, field: &str, condition: bool, message: &str) -> Self {
        if condition {
            self.result.add_warning(ValidationError {
                field: field.to_string(),
                message: message.to_string(),
                code: ErrorCode::InvalidValue,
                expected: None,
                actual: None,
            });
        }
        self
    }

    /// Complete validation and return result
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_validation() {
        let result = Validator::new().required("namespace", "").validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, ErrorCode::MissingRequiredField);
    }

    #[test]
    fn test_range_validation() {
        let result = Validator::new().range("compileSdk", 150, 1, 100).validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, ErrorCode::InvalidValue);
    }

    #[test]
    fn test_one_of_validation() {
        let result = Validator::new()
            .one_of("buildType", "staging", &["debug", "release"])
            .validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, ErrorCode::InvalidValue);
    }

    #[test]
    fn test_custom_validation_code() {
        let result = Validator::new()
            .custom("minSdk", ErrorCode::InvalidSdkOrdering, || {
                Some("minSdk 30 exceeds targetSdk 24".to_string())
            })
            .validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, ErrorCode::InvalidSdkOrdering);
    }

    #[test]
    fn test_warning_does_not_fail() {
        let result = Validator::new()
            .warn_if("ndkVersion", true, "ndkVersion not pinned")
            .validate();
        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 1);
    }

    #[test]
    fn test_to_result_preserves_first_code() {
        let err = Validator::new()
            .custom("deps", ErrorCode::DuplicateDependency, || {
                Some("duplicate coordinate".to_string())
            })
            .required("namespace", "")
            .validate()
            .to_result()
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateDependency);
    }

    #[test]
    fn test_chained_validation() {
        let result = Validator::new()
            .required("namespace", "com.example.app")
            .range("minSdk", 24, 1, 36)
            .one_of("buildType", "release", &["debug", "release"])
            .validate();
        assert!(result.is_valid());
    }
}
