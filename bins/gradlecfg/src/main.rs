//! gradlecfg CLI
//!
//! Loads, validates, inspects, and canonically reformats Android Gradle
//! build descriptors.

use clap::{Parser, Subcommand};
use gradlecfg_cli::output::{format_count, print_diagnostic, Status};
use gradlecfg_core::config::Config;
use gradlecfg_core::error::{exit_codes, Error};
use gradlecfg_descriptor::{parser, serialize, validate, GradleDescriptor};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gradlecfg")]
#[command(about = "Load and validate Android Gradle build descriptors")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a descriptor
    Validate {
        /// Descriptor path (defaults to the configured path)
        file: Option<PathBuf>,
    },

    /// Show the parsed descriptor
    Show {
        /// Descriptor path
        file: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List declared dependencies
    Deps {
        /// Descriptor path
        file: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rewrite the descriptor in canonical form
    Fmt {
        /// Descriptor path
        file: Option<PathBuf>,
        /// Write the result back instead of printing it
        #[arg(long)]
        write: bool,
    },

    /// Check project policy
    Lint {
        /// Descriptor path
        file: Option<PathBuf>,
        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    init_tracing(cli.verbose, cli.quiet);

    let config = match Config::load(cli.config.as_deref().and_then(|p| p.to_str())) {
        Ok(config) => config,
        Err(e) => {
            Status::error(&e.to_string());
            std::process::exit(exit_code_for(&e));
        }
    };

    let exit_code = match cli.command {
        Commands::Validate { file } => {
            run_validate(&resolve_path(file, &config), cli.quiet)
        }
        Commands::Show { file, json } => run_show(&resolve_path(file, &config), json),
        Commands::Deps { file, json } => run_deps(&resolve_path(file, &config), json),
        Commands::Fmt { file, write } => run_fmt(&resolve_path(file, &config), write),
        Commands::Lint { file, strict } => {
            run_lint(&resolve_path(file, &config), &config, strict, cli.quiet)
        }
    };

    std::process::exit(exit_code);
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_path(file: Option<PathBuf>, config: &Config) -> PathBuf {
    file.unwrap_or_else(|| PathBuf::from(&config.schema.general.descriptor_path))
}

fn exit_code_for(error: &Error) -> i32 {
    match error.code.category() {
        "Descriptor" => exit_codes::DESCRIPTOR_ERROR,
        "Validation" => exit_codes::VALIDATION_ERROR,
        "Configuration" => exit_codes::CONFIG_ERROR,
        _ => exit_codes::FAILURE,
    }
}

fn load_validated(path: &Path) -> Result<GradleDescriptor, i32> {
    GradleDescriptor::load(path).map_err(|e| {
        Status::error(&e.to_string());
        exit_code_for(&e)
    })
}

fn run_validate(path: &Path, quiet: bool) -> i32 {
    if !path.exists() {
        Status::error(&Error::file_not_found(path).to_string());
        return exit_codes::FAILURE;
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            Status::error(&format!("Failed to read {}: {}", path.display(), e));
            return exit_codes::FAILURE;
        }
    };

    let descriptor = match parser::parse_str(&content) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            Status::error(&e.to_string());
            return exit_code_for(&e);
        }
    };

    let result = validate::validate(&descriptor);
    for diagnostic in result.errors() {
        print_diagnostic(diagnostic, false);
    }
    if !result.is_valid() {
        return exit_codes::VALIDATION_ERROR;
    }

    if !quiet {
        Status::success(&format!(
            "{} is valid ({}, {})",
            path.display(),
            format_count(descriptor.plugins.len(), "plugin", "plugins"),
            format_count(descriptor.dependencies.len(), "dependency", "dependencies"),
        ));
    }
    exit_codes::SUCCESS
}

fn run_show(path: &Path, json: bool) -> i32 {
    let descriptor = match load_validated(path) {
        Ok(descriptor) => descriptor,
        Err(code) => return code,
    };

    if json {
        match serde_json::to_string_pretty(&descriptor) {
            Ok(output) => println!("{}", output),
            Err(e) => {
                Status::error(&format!("JSON encoding failed: {}", e));
                return exit_codes::FAILURE;
            }
        }
        return exit_codes::SUCCESS;
    }

    Status::header(&format!("Descriptor: {}", path.display()));

    println!("  namespace:     {}", descriptor.android.namespace);
    println!("  applicationId: {}", descriptor.android.default_config.application_id);
    println!("  compileSdk:    {}", descriptor.compile_sdk());
    println!("  targetSdk:     {}", descriptor.target_sdk());
    println!("  minSdk:        {}", descriptor.min_sdk());
    if let Some(ndk_version) = &descriptor.android.ndk_version {
        println!("  ndkVersion:    {}", ndk_version);
    }
    println!("  versionCode:   {}", descriptor.android.default_config.version_code);
    println!("  versionName:   {}", descriptor.android.default_config.version_name);

    if !descriptor.plugins.is_empty() {
        Status::subheader("Plugins");
        for plugin in &descriptor.plugins {
            println!("  - {}", plugin.id);
        }
    }

    if !descriptor.android.build_types.is_empty() {
        Status::subheader("Build types");
        for build_type in &descriptor.android.build_types {
            match &build_type.signing_config {
                Some(signing) => {
                    println!("  - {} (signed with \"{}\")", build_type.name, signing.name)
                }
                None => println!("  - {}", build_type.name),
            }
        }
    }

    if let Some(flutter) = &descriptor.flutter {
        Status::subheader("Flutter");
        println!("  source: {}", flutter.source);
    }

    exit_codes::SUCCESS
}

fn run_deps(path: &Path, json: bool) -> i32 {
    let descriptor = match load_validated(path) {
        Ok(descriptor) => descriptor,
        Err(code) => return code,
    };

    if json {
        match serde_json::to_string_pretty(&descriptor.dependencies) {
            Ok(output) => println!("{}", output),
            Err(e) => {
                Status::error(&format!("JSON encoding failed: {}", e));
                return exit_codes::FAILURE;
            }
        }
        return exit_codes::SUCCESS;
    }

    for dependency in &descriptor.dependencies {
        let marker = if dependency.platform { " (BOM)" } else { "" };
        println!(
            "{:<16} {}{}",
            dependency.configuration,
            dependency.notation(),
            marker
        );
    }
    println!();
    println!(
        "{}",
        format_count(descriptor.dependencies.len(), "dependency", "dependencies")
    );

    exit_codes::SUCCESS
}

fn run_fmt(path: &Path, write: bool) -> i32 {
    let descriptor = match load_validated(path) {
        Ok(descriptor) => descriptor,
        Err(code) => return code,
    };

    let rendered = serialize::to_kts(&descriptor);

    if write {
        if let Err(e) = std::fs::write(path, &rendered) {
            Status::error(&format!("Failed to write {}: {}", path.display(), e));
            return exit_codes::FAILURE;
        }
        Status::success(&format!("Rewrote {}", path.display()));
    } else {
        print!("{}", rendered);
    }

    exit_codes::SUCCESS
}

fn run_lint(path: &Path, config: &Config, strict: bool, quiet: bool) -> i32 {
    let descriptor = match load_validated(path) {
        Ok(descriptor) => descriptor,
        Err(code) => return code,
    };

    let result = validate::lint(&descriptor, &config.schema);
    for warning in result.warnings() {
        print_diagnostic(warning, true);
    }

    if result.warnings().is_empty() {
        if !quiet {
            Status::success("No policy warnings");
        }
        exit_codes::SUCCESS
    } else if strict {
        Status::error(&format!(
            "{} in strict mode",
            format_count(result.warnings().len(), "warning", "warnings")
        ));
        exit_codes::FAILURE
    } else {
        exit_codes::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_per_category() {
        assert_eq!(
            exit_code_for(&Error::config("bad config")),
            exit_codes::CONFIG_ERROR
        );
        assert_eq!(
            exit_code_for(&Error::malformed(3, "bad line")),
            exit_codes::DESCRIPTOR_ERROR
        );
        assert_eq!(
            exit_code_for(&Error::invalid_sdk_ordering(30, 24, 36)),
            exit_codes::VALIDATION_ERROR
        );
        assert_eq!(
            exit_code_for(&Error::file_not_found("/missing")),
            exit_codes::FAILURE
        );
    }
}
