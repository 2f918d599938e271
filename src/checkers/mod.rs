//! # Checker Module
//!
//! @title Security Checking Framework
//!
//! This module provides the framework for running security checks against a
//! Django project and contains the built-in checkers.
//!
//! ## Architecture
//!
//! All checkers implement the [`Checker`] trait. The [`Inspector`] runs every
//! registered checker and concatenates their results in registration order.
//!
//! ## Built-in Checkers
//!
//! | Checker | Reads | Produces |
//! |---------|-------|----------|
//! | [`SettingsChecker`] | settings module | one result per catalog rule |
//! | [`AdminUrlChecker`] | root URLconf | one `ADMIN_URL` result |

mod admin_url;
mod settings;

pub use admin_url::AdminUrlChecker;
pub use settings::SettingsChecker;

use crate::project::Project;
use crate::report::CheckResult;
use anyhow::Result;

/// Trait for implementing security checkers.
///
/// # Example Implementation
///
/// ```rust,ignore
/// pub struct MyChecker;
///
/// impl Checker for MyChecker {
///     fn name(&self) -> &'static str { "my-checker" }
///
///     fn run_check(&self, project: &Project) -> Result<Vec<CheckResult>> {
///         Ok(Vec::new())
///     }
/// }
/// ```
pub trait Checker: Send + Sync {
    /// Short name used in logs and progress output.
    fn name(&self) -> &'static str;

    /// Runs the checker against a project.
    ///
    /// # Returns
    ///
    /// The checker's results, in a stable order.
    fn run_check(&self, project: &Project) -> Result<Vec<CheckResult>>;
}

/// Runs every registered checker against a project.
///
/// # Example
///
/// ```rust,ignore
/// let inspector = Inspector::new();
/// let results = inspector.run(&Project::new("./mysite", "production"));
/// ```
pub struct Inspector {
    checkers: Vec<Box<dyn Checker>>,
}

impl Inspector {
    /// Creates an inspector with the built-in checkers.
    pub fn new() -> Self {
        Self::with_checkers(vec![Box::new(SettingsChecker), Box::new(AdminUrlChecker)])
    }

    /// Creates an inspector with a custom set of checkers.
    pub fn with_checkers(checkers: Vec<Box<dyn Checker>>) -> Self {
        Self { checkers }
    }

    /// Returns a reference to all registered checkers.
    pub fn checkers(&self) -> &[Box<dyn Checker>] {
        &self.checkers
    }

    /// Runs all checkers and concatenates their results.
    pub fn run(&self, project: &Project) -> Vec<CheckResult> {
        self.run_with(project, |_| {})
    }

    /// Runs all checkers, calling `on_finished` after each one.
    ///
    /// A checker that fails is logged and skipped; the remaining checkers
    /// still run.
    pub fn run_with<F>(&self, project: &Project, mut on_finished: F) -> Vec<CheckResult>
    where
        F: FnMut(&dyn Checker),
    {
        let mut results = Vec::new();

        for checker in &self.checkers {
            match checker.run_check(project) {
                Ok(checked) => {
                    log::debug!("{} produced {} result(s)", checker.name(), checked.len());
                    results.extend(checked);
                }
                Err(e) => {
                    log::error!("Error running checker {}: {:#}", checker.name(), e);
                }
            }
            on_finished(checker.as_ref());
        }

        results
    }
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new()
    }
}
