//! # Django-Sentinel CLI Entry Point
//!
//! @title Django-Sentinel CLI
//!
//! This module provides the main entry point for the Django-Sentinel
//! command-line security inspector.

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use django_sentinel::cli::{Commands, OutputFormat};
use django_sentinel::rules::{catalog, ADMIN_URL_RULE};
use django_sentinel::{Cli, Inspector, Project, Report, Severity};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// ASCII art banner displayed at startup.
const BANNER: &str = r#"
     _ _                           ____             _   _            _
  __| (_) __ _ _ __   __ _  ___   / ___|  ___ _ __ | |_(_)_ __   ___| |
 / _` | |/ _` | '_ \ / _` |/ _ \  \___ \ / _ \ '_ \| __| | '_ \ / _ \ |
| (_| | | (_| | | | | (_| | (_) |  ___) |  __/ | | | |_| | | | |  __/ |
 \__,_|/ |\__,_|_| |_|\__, |\___/  |____/ \___|_| |_|\__|_|_| |_|\___|_|
     |__/             |___/
                  Django Settings Security Inspector
"#;

/// Application entry point.
///
/// Initializes the logging system, parses command-line arguments, and
/// dispatches to the appropriate command handler.
///
/// # Returns
///
/// Exit code `1` when a critical check failed, `0` otherwise.
fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    if let Err(e) = cli.validate() {
        e.exit();
    }

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Check {
            project_path,
            settings_module,
            format,
            output,
            min_severity,
        } => run_check(&project_path, &settings_module, format, output, min_severity),
        Commands::List => {
            list_rules();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Version => {
            println!(
                "{} {}",
                "Django-Sentinel version:".green(),
                env!("CARGO_PKG_VERSION").yellow()
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Executes the inspection.
///
/// # Arguments
///
/// * `project_path` - Django project root, already checked to be a directory
/// * `settings_module` - Settings module name, without `.py`
/// * `format` - Output format
/// * `output` - Optional file to write JSON or Markdown output to
/// * `min_severity` - Optional minimum severity level to include in results
fn run_check(
    project_path: &Path,
    settings_module: &str,
    format: OutputFormat,
    output: Option<PathBuf>,
    min_severity: Option<Severity>,
) -> Result<ExitCode> {
    let project = Project::new(project_path, settings_module);

    if format == OutputFormat::Terminal {
        println!("{}", BANNER.cyan().bold());
        println!(
            "{} {}",
            "[*] Inspecting:".green().bold(),
            project.root().display().to_string().yellow()
        );
    }

    let results = run_inspector(&project, format == OutputFormat::Terminal);
    let mut report = Report::new(
        results,
        &project.root().display().to_string(),
        project.settings_module(),
    );
    let critical_failed = report.has_critical_failures();

    if let Some(threshold) = min_severity {
        report.retain_severity(threshold);
    }

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)?;
            emit(&json, output.as_deref())?;
        }
        OutputFormat::Markdown => {
            emit(&report.to_markdown(), output.as_deref())?;
        }
        OutputFormat::Terminal => {
            report.print_terminal();
            println!("\n{}", "=".repeat(60).cyan());
            report.print_summary();
            println!("{}", "[*] Security scan complete".bold());
        }
    }

    Ok(if critical_failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Runs all checkers, with a progress bar in terminal mode.
fn run_inspector(project: &Project, show_progress: bool) -> Vec<django_sentinel::CheckResult> {
    use indicatif::{ProgressBar, ProgressStyle};

    let inspector = Inspector::new();
    if !show_progress {
        return inspector.run(project);
    }

    let pb = ProgressBar::new(inspector.checkers().len() as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb.set_message("Running security checks...");

    let results = inspector.run_with(project, |checker| {
        pb.set_message(format!("Checked {}", checker.name()));
        pb.inc(1);
    });

    pb.finish_and_clear();
    results
}

/// Writes rendered output to a file, or stdout when no file is given.
fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            eprintln!(
                "{} {}",
                "[+] Report saved to:".green(),
                path.display().to_string().yellow()
            );
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Displays all security rules.
fn list_rules() {
    println!("{}", "[*] Available Security Rules:".green().bold());
    println!("{}", "-".repeat(60).cyan());

    for rule in catalog().iter().chain([&ADMIN_URL_RULE]) {
        println!(
            "  {} [{}]",
            rule.id.cyan().bold(),
            rule.severity.to_string().yellow()
        );
        println!("     {}", rule.description.dimmed());
        println!();
    }
}
