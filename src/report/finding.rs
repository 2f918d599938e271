//! # Check Result and Severity Definitions
//!
//! @title Security Check Data Structures
//!
//! Defines the outcome of evaluating one rule against a project and the
//! severity classification used to group outcomes.

use crate::parser::SettingValue;
use crate::rules::SecurityRule;
use colored::*;
use serde::{Deserialize, Serialize};

/// Severity level classification for security rules.
///
/// Ordered from most to least severe, so sorting ascending lists
/// `Critical` first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Exploitable as deployed.
    Critical = 0,

    /// Significant weakening of a security control.
    High = 1,

    /// Missing hardening.
    Medium = 2,

    /// Minor hardening.
    Low = 3,

    /// Informational.
    Info = 4,
}

impl Severity {
    /// Returns `true` if this severity is `threshold` or more severe.
    pub fn is_at_least(&self, threshold: Severity) -> bool {
        *self <= threshold
    }

    /// Returns a colored label for terminal output.
    pub fn colored_label(&self) -> ColoredString {
        match self {
            Severity::Critical => "CRITICAL".white().on_red().bold(),
            Severity::High => "HIGH".black().on_yellow().bold(),
            Severity::Medium => "MEDIUM".white().on_bright_blue().bold(),
            Severity::Low => "LOW".black().on_white().bold(),
            Severity::Info => "INFO".black().on_bright_white(),
        }
    }

    /// Colors `text` with this severity's foreground color.
    pub fn paint(&self, text: &str) -> ColoredString {
        match self {
            Severity::Critical => text.bright_red(),
            Severity::High => text.red(),
            Severity::Medium => text.yellow(),
            Severity::Low => text.blue(),
            Severity::Info => text.white(),
        }
    }

    /// Returns a Markdown badge for the severity.
    pub fn markdown_badge(&self) -> &'static str {
        match self {
            Severity::Critical => {
                "![Critical](https://img.shields.io/badge/severity-CRITICAL-red)"
            }
            Severity::High => "![High](https://img.shields.io/badge/severity-HIGH-orange)",
            Severity::Medium => "![Medium](https://img.shields.io/badge/severity-MEDIUM-yellow)",
            Severity::Low => "![Low](https://img.shields.io/badge/severity-LOW-blue)",
            Severity::Info => "![Info](https://img.shields.io/badge/severity-INFO-lightgrey)",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "CRITICAL"),
            Severity::High => write!(f, "HIGH"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::Low => write!(f, "LOW"),
            Severity::Info => write!(f, "INFO"),
        }
    }
}

/// Outcome of evaluating one rule.
///
/// Carries a copy of the rule's descriptive fields so that a result can be
/// rendered or serialized on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Setting identifier (e.g., "DEBUG") or "ADMIN_URL".
    pub setting: String,

    /// Short message shown when the check fails.
    pub message: String,

    /// Severity classification.
    pub severity: Severity,

    /// What a safe configuration looks like.
    pub description: String,

    /// Link to the Django documentation for the setting.
    pub documentation: String,

    /// Whether the observed value satisfies the rule.
    pub passed: bool,

    /// Value the check was evaluated against, if one was found.
    pub observed: Option<SettingValue>,

    /// File the value was read from.
    pub file_path: Option<String>,

    /// Line of the binding the value came from.
    pub line: Option<usize>,
}

impl CheckResult {
    /// Creates a result for `rule`.
    ///
    /// # Arguments
    ///
    /// * `rule` - The rule that was evaluated
    /// * `passed` - Outcome of the evaluation
    /// * `observed` - Resolved value, or `None` if nothing was found
    pub fn new(rule: &SecurityRule, passed: bool, observed: Option<SettingValue>) -> Self {
        Self {
            setting: rule.id.to_string(),
            message: rule.message.to_string(),
            severity: rule.severity,
            description: rule.description.to_string(),
            documentation: rule.documentation.to_string(),
            passed,
            observed,
            file_path: None,
            line: None,
        }
    }

    /// Attaches the source location the observed value came from.
    pub fn at(mut self, file_path: &str, line: usize) -> Self {
        self.file_path = Some(file_path.to_string());
        self.line = Some(line);
        self
    }

    /// Returns `true` for a failed check of critical severity.
    pub fn is_critical_failure(&self) -> bool {
        !self.passed && self.severity == Severity::Critical
    }

    /// Prints a failed check to terminal with color formatting.
    pub fn print_terminal(&self) {
        println!("{} {}", "✗".red(), self.severity.paint(&self.message));
        println!("   {} {}", "Setting:".dimmed(), self.setting.yellow());

        match (&self.observed, &self.file_path, self.line) {
            (Some(value), Some(path), Some(line)) => println!(
                "   {} {} ({}:{})",
                "Found:".dimmed(),
                value.to_string().bright_white(),
                path.blue(),
                line.to_string().cyan()
            ),
            (Some(value), _, _) => {
                println!("   {} {}", "Found:".dimmed(), value.to_string().bright_white())
            }
            _ => println!("   {} {}", "Found:".dimmed(), "not set".bright_white()),
        }

        println!("   {} {}", "Description:".dimmed(), self.description.dimmed());
        println!(
            "   {} {}",
            "Documentation:".dimmed(),
            self.documentation.blue().underline()
        );
        println!();
    }
}
