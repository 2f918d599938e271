//! # CLI Module
//!
//! @title Command Line Interface
//!
//! This module defines the command-line interface for Django-Sentinel using
//! the `clap` derive macros for declarative argument parsing.
//!
//! ## Commands
//!
//! - `check` - Inspect a Django project's settings and URLconf
//! - `list` - Display the security rules
//! - `version` - Show version information

use crate::report::Severity;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Django-Sentinel command-line interface.
///
/// Statically inspects Django settings for insecure production values.
/// Nothing in the inspected project is imported or executed.
#[derive(Parser, Debug)]
#[command(name = "django-sentinel")]
#[command(version)]
#[command(about = "Static security inspector for Django settings")]
#[command(long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Report output formats.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colorized console output.
    Terminal,
    /// Machine-readable JSON.
    Json,
    /// Markdown document.
    Markdown,
}

/// Available subcommands for the Django-Sentinel CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a Django project's security settings.
    ///
    /// Reads `<PROJECT_PATH>/<SETTINGS_MODULE>.py` and the project's root
    /// URLconf (`config/urls.py` or `urls.py`).
    Check {
        /// Path to the Django project.
        #[arg(value_name = "PROJECT_PATH", value_parser = existing_dir)]
        project_path: PathBuf,

        /// Settings module to check (e.g. production, local).
        #[arg(value_name = "SETTINGS_MODULE")]
        settings_module: String,

        /// Output format for the report.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Terminal)]
        format: OutputFormat,

        /// Write the report to a file instead of stdout.
        ///
        /// Only used with the `json` and `markdown` formats.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Minimum severity level to include in results.
        #[arg(short = 's', long = "min-severity", value_enum, value_name = "LEVEL")]
        min_severity: Option<Severity>,
    },

    /// List all security rules.
    List,

    /// Print version information.
    Version,
}

impl Cli {
    /// Checks argument combinations clap cannot express declaratively.
    ///
    /// # Errors
    ///
    /// Returns a usage error when `--output` is given with terminal output.
    pub fn validate(&self) -> Result<(), clap::Error> {
        match &self.command {
            Commands::Check {
                format: OutputFormat::Terminal,
                output: Some(_),
                ..
            } => Err(Cli::command().error(
                ErrorKind::ArgumentConflict,
                "--output requires --format json or --format markdown",
            )),
            _ => Ok(()),
        }
    }
}

/// Accepts only paths to existing directories.
fn existing_dir(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("project path is not a directory: {}", value))
    }
}
