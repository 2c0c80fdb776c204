//! Configuration loading and schema definitions
//!
//! Tool configuration shared by the CLI and the policy lint.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
