//! Markdown rendering for [`Report`].

use super::{CheckResult, Report};
use std::fmt;

/// Markdown view of a report.
pub struct MarkdownReport<'a>(pub &'a Report);

/// Renders a report as a Markdown document.
pub fn to_markdown(report: &Report) -> String {
    MarkdownReport(report).to_string()
}

impl fmt::Display for MarkdownReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f, "# Django Security Report\n")?;
        writeln!(f, "| | |")?;
        writeln!(f, "|---|---|")?;
        writeln!(f, "| Project | `{}` |", report.metadata.project_path)?;
        writeln!(f, "| Settings module | `{}` |", report.metadata.settings_module)?;
        writeln!(f, "| Version | {} |", report.metadata.version)?;
        writeln!(
            f,
            "| Result | {} passed, {} failed |\n",
            report.summary.passed, report.summary.failed
        )?;

        if report.has_critical_failures() {
            writeln!(
                f,
                "> **Warning:** {} critical check(s) failed.\n",
                report.summary.critical
            )?;
        }

        for (severity, failures) in report.failures_by_severity() {
            writeln!(f, "## {} Issues\n", severity)?;
            for result in failures {
                writeln!(f, "### {} {}\n", severity.markdown_badge(), result.message)?;
                write_failure(f, result)?;
            }
        }

        let passed: Vec<_> = report.passed().collect();
        if !passed.is_empty() {
            writeln!(f, "## Passed Checks\n")?;
            for result in passed {
                writeln!(f, "- `{}`", result.setting)?;
            }
        }

        Ok(())
    }
}

fn write_failure(f: &mut fmt::Formatter<'_>, result: &CheckResult) -> fmt::Result {
    writeln!(f, "- **Setting:** `{}`", result.setting)?;
    match (&result.observed, &result.file_path, result.line) {
        (Some(value), Some(path), Some(line)) => {
            writeln!(f, "- **Found:** `{}` (`{}:{}`)", value, path, line)?
        }
        (Some(value), _, _) => writeln!(f, "- **Found:** `{}`", value)?,
        _ => writeln!(f, "- **Found:** not set")?,
    }
    writeln!(f, "- **Description:** {}", result.description)?;
    writeln!(f, "- **Documentation:** <{}>\n", result.documentation)
}
