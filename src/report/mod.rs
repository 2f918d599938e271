//! # Report Generation Module
//!
//! @title Security Report Generator
//!
//! Collects check results into a report and renders it as colored terminal
//! output, Markdown or JSON.
//!
//! ## Key Types
//!
//! - [`Report`] - Complete inspection report
//! - [`CheckResult`] - Outcome of one rule
//! - [`Severity`] - Severity classification for rules

mod finding;
mod formatter;

pub use finding::{CheckResult, Severity};

use colored::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete security inspection report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Metadata about the inspection.
    pub metadata: ReportMetadata,

    /// All results, in evaluation order.
    pub results: Vec<CheckResult>,

    /// Pass/fail counts.
    pub summary: ReportSummary,
}

/// Metadata about the inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Tool version used for the inspection.
    pub version: String,

    /// Project root that was inspected.
    pub project_path: String,

    /// Settings module that was inspected.
    pub settings_module: String,
}

/// Summary of results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Count of passed checks.
    pub passed: usize,

    /// Count of failed checks.
    pub failed: usize,

    /// Count of failed critical checks.
    pub critical: usize,

    /// Count of failed high severity checks.
    pub high: usize,

    /// Count of failed medium severity checks.
    pub medium: usize,

    /// Count of failed low severity checks.
    pub low: usize,

    /// Count of failed informational checks.
    pub info: usize,

    /// Total count of all checks.
    pub total: usize,
}

impl Report {
    /// Creates a new report from a collection of results.
    ///
    /// # Arguments
    ///
    /// * `results` - Check results in evaluation order
    /// * `project_path` - Project root that was inspected
    /// * `settings_module` - Settings module that was inspected
    pub fn new(results: Vec<CheckResult>, project_path: &str, settings_module: &str) -> Self {
        let summary = ReportSummary::from_results(&results);

        let metadata = ReportMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            project_path: project_path.to_string(),
            settings_module: settings_module.to_string(),
        };

        Self {
            metadata,
            results,
            summary,
        }
    }

    /// Keeps only results at `threshold` severity or above.
    pub fn retain_severity(&mut self, threshold: Severity) {
        self.results.retain(|r| r.severity.is_at_least(threshold));
        self.summary = ReportSummary::from_results(&self.results);
    }

    /// Returns `true` if any critical check failed.
    pub fn has_critical_failures(&self) -> bool {
        self.results.iter().any(CheckResult::is_critical_failure)
    }

    /// Results that passed, in evaluation order.
    pub fn passed(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| r.passed)
    }

    /// Failed results grouped by severity, most severe first.
    pub fn failures_by_severity(&self) -> BTreeMap<Severity, Vec<&CheckResult>> {
        let mut groups: BTreeMap<Severity, Vec<&CheckResult>> = BTreeMap::new();
        for result in self.results.iter().filter(|r| !r.passed) {
            groups.entry(result.severity).or_default().push(result);
        }
        groups
    }

    /// Prints colorized output to the terminal.
    pub fn print_terminal(&self) {
        if self.results.is_empty() {
            println!("\n{}", "[+] No security issues found.".green().bold());
            return;
        }

        println!(
            "\n{} {}",
            "Checking settings module:".bold(),
            self.metadata.settings_module.yellow()
        );

        let passed: Vec<_> = self.passed().collect();
        if !passed.is_empty() {
            println!("\n{}", "Passed Checks:".green().bold());
            for result in passed {
                println!("{} {}", "✓".green(), result.message.green());
            }
        }

        for (severity, failures) in self.failures_by_severity() {
            println!("\n{} {}", severity.colored_label(), "Issues:".bold());
            println!("{}", "-".repeat(60).dimmed());
            for result in failures {
                result.print_terminal();
            }
        }
    }

    /// Prints summary statistics to the terminal.
    pub fn print_summary(&self) {
        println!("{}", "[*] Summary:".bold());
        println!("{}", format!("    ✓ {} checks passed", self.summary.passed).green());
        println!("{}", format!("    ✗ {} checks failed", self.summary.failed).red());
        println!(
            "{}",
            format!(
                "    {} Critical | {} High | {} Medium | {} Low | {} Info",
                self.summary.critical,
                self.summary.high,
                self.summary.medium,
                self.summary.low,
                self.summary.info
            )
            .dimmed()
        );

        if self.has_critical_failures() {
            println!(
                "{}",
                format!(
                    "[!!] Found {} critical security issue(s)",
                    self.summary.critical
                )
                .red()
                .bold()
            );
        } else if self.summary.failed == 0 {
            println!("{}", "[+] No issues found.".green().bold());
        }
    }

    /// Converts the report to Markdown format.
    pub fn to_markdown(&self) -> String {
        formatter::to_markdown(self)
    }
}

impl ReportSummary {
    /// Creates a summary from a collection of results.
    fn from_results(results: &[CheckResult]) -> Self {
        let mut summary = ReportSummary {
            total: results.len(),
            ..Default::default()
        };

        for result in results {
            if result.passed {
                summary.passed += 1;
                continue;
            }

            summary.failed += 1;
            match result.severity {
                Severity::Critical => summary.critical += 1,
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
                Severity::Info => summary.info += 1,
            }
        }

        summary
    }
}
