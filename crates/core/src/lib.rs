//! Core utilities for the gradlecfg toolkit
//!
//! This crate provides shared functionality used by the descriptor loader and
//! the CLI:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Validation**: Fluent validation builder producing field-level diagnostics
//! - **Configuration**: TOML-based tool configuration with defaults
//!
//! # Example
//!
//! ```rust
//! use gradlecfg_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("namespace", "com.example.app")
//!     .validate();
//! assert!(result.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::validation::{ValidationError, ValidationResult, Validator};
}
