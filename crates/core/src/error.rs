//! Structured error handling with context and recovery suggestions
//!
//! This module provides structured error types with:
//! - Detailed error context
//! - Recovery suggestions
//! - Error codes for programmatic handling
//! - Serializable error reports

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // General errors (1xxx)
    Unknown = 1000,
    Internal = 1001,

    // IO errors (2xxx)
    IoError = 2000,
    FileNotFound = 2001,
    PermissionDenied = 2002,
    InvalidPath = 2003,

    // Tool configuration errors (3xxx)
    ConfigError = 3000,
    ConfigNotFound = 3001,
    ConfigParseError = 3002,

    // Descriptor errors (4xxx)
    MalformedDescriptor = 4000,
    MissingRequiredField = 4001,
    UnbalancedBlock = 4002,

    // Validation errors (5xxx)
    ValidationError = 5000,
    InvalidSdkOrdering = 5001,
    DuplicateDependency = 5002,
    InvalidCoordinate = 5003,
    InvalidValue = 5004,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a human-readable category
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            1 => "General",
            2 => "IO",
            3 => "Configuration",
            4 => "Descriptor",
            5 => "Validation",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type with rich context
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context
    pub context: Option<String>,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, "\n  Context: {}", ctx)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a recovery suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Convert to a serializable report
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code,
            code_str: self.code.to_string(),
            category: self.code.category().to_string(),
            message: self.message.clone(),
            context: self.context.clone(),
            suggestion: self.suggestion.clone(),
            source: self.source.as_ref().map(|e| e.to_string()),
        }
    }

    // Convenience constructors

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IoError, message)
    }

    pub fn file_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::FileNotFound,
            format!("File not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Check that the file exists and you have read permissions")
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    pub fn config_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create a .gradlecfg.toml file or use --config to specify a path")
    }

    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::MalformedDescriptor,
            format!("Malformed descriptor at line {}: {}", line, message.into()),
        )
    }

    pub fn unbalanced_block(line: usize) -> Self {
        Self::new(
            ErrorCode::UnbalancedBlock,
            format!("Unbalanced block at line {}", line),
        )
        .with_suggestion("Check that every opening brace has a matching closing brace")
    }

    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("Missing required field: {}", field),
        )
    }

    pub fn invalid_sdk_ordering(min_sdk: u32, target_sdk: u32, compile_sdk: u32) -> Self {
        Self::new(
            ErrorCode::InvalidSdkOrdering,
            format!(
                "Invalid SDK ordering: minSdk={}, targetSdk={}, compileSdk={}",
                min_sdk, target_sdk, compile_sdk
            ),
        )
        .with_suggestion("Required ordering is minSdk <= targetSdk <= compileSdk")
    }

    pub fn duplicate_dependency(coordinate: &str) -> Self {
        Self::new(
            ErrorCode::DuplicateDependency,
            format!("Duplicate dependency: {}", coordinate),
        )
        .with_suggestion("Remove the duplicate declaration; each coordinate may appear once")
    }

    pub fn invalid_coordinate(raw: &str) -> Self {
        Self::new(
            ErrorCode::InvalidCoordinate,
            format!("Invalid dependency coordinate: {}", raw),
        )
        .with_suggestion("Coordinates must have the form group:artifact or group:artifact:version")
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }
}

/// Serializable error report for logging and JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub code_str: String,
    pub category: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for CLI commands
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const VALIDATION_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DESCRIPTOR_ERROR: i32 = 4;
}

// Implement From for common error types

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {}", err))
            .with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorCode::Internal, format!("JSON error: {}", err)).with_source(err)
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_suggestion(suggestion))
    }
}
