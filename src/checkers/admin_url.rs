//! # Admin URL Checker
//!
//! Checks that the Django admin is not mounted at a guessable path.

use super::Checker;
use crate::parser::{find_admin_mount, parse_python_file, SettingValue};
use crate::project::Project;
use crate::report::CheckResult;
use crate::rules::ADMIN_URL_RULE;
use anyhow::Result;

/// Evaluates [`ADMIN_URL_RULE`] against the project's root URLconf.
///
/// A missing or unparsable URLconf, or one without an admin route, is
/// evaluated as the empty path and fails.
pub struct AdminUrlChecker;

impl Checker for AdminUrlChecker {
    fn name(&self) -> &'static str {
        "admin-url"
    }

    fn run_check(&self, project: &Project) -> Result<Vec<CheckResult>> {
        let urls_file = project.urls_file();

        let mount = match parse_python_file(&urls_file) {
            Ok(module) => find_admin_mount(&module).map(|mount| (module.file_path, mount)),
            Err(e) => {
                log::error!("Error loading URLconf: {}", e);
                None
            }
        };

        let (path, location) = match mount {
            Some((file_path, mount)) => (mount.path, Some((file_path, mount.line))),
            None => (String::new(), None),
        };

        let value = SettingValue::Str(path);
        let passed = ADMIN_URL_RULE.passes(Some(&value));
        let result = CheckResult::new(&ADMIN_URL_RULE, passed, Some(value));
        let result = match location {
            Some((file_path, line)) => result.at(&file_path, line),
            None => result,
        };

        Ok(vec![result])
    }
}
