//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use gradlecfg_core::validation::ValidationError;
use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.len()));
    }

    /// Print a subheader
    pub fn subheader(message: &str) {
        println!();
        println!("{}", message.bold().dimmed());
    }
}

/// Print a validation diagnostic with its field and code
pub fn print_diagnostic(diagnostic: &ValidationError, as_warning: bool) {
    let line = format!("[{}] {}", diagnostic.code, diagnostic);
    if as_warning {
        Status::warning(&line);
    } else {
        Status::error(&line);
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count_singular() {
        assert_eq!(format_count(1, "dependency", "dependencies"), "1 dependency");
    }

    #[test]
    fn test_format_count_plural() {
        assert_eq!(format_count(3, "dependency", "dependencies"), "3 dependencies");
    }
}
