//! # Settings Checker
//!
//! Evaluates every catalog rule against the project's settings module.

use super::Checker;
use crate::parser::SettingsSource;
use crate::project::Project;
use crate::report::CheckResult;
use crate::rules::{self, SecurityRule, Setting};
use anyhow::Result;

/// Applies the rule catalog to the settings module.
///
/// The settings file is parsed once per run. If it is missing or cannot be
/// parsed, every rule fails.
pub struct SettingsChecker;

impl SettingsChecker {
    /// Evaluates one rule against an already loaded settings module.
    pub fn evaluate(rule: &SecurityRule, source: Option<&SettingsSource>) -> CheckResult {
        let binding = source.and_then(|source| source.find_binding(rule.id));
        let passed = rule.passes(binding.as_ref().map(|binding| &binding.value));

        match (binding, source) {
            (Some(binding), Some(source)) => {
                CheckResult::new(rule, passed, Some(binding.value)).at(source.file_path(), binding.line)
            }
            _ => CheckResult::new(rule, passed, None),
        }
    }
}

impl Checker for SettingsChecker {
    fn name(&self) -> &'static str {
        "settings"
    }

    fn run_check(&self, project: &Project) -> Result<Vec<CheckResult>> {
        let path = project.settings_file();
        let source = match SettingsSource::load(&path) {
            Ok(source) => Some(source),
            Err(e) => {
                log::error!("Error loading settings module: {}", e);
                None
            }
        };

        let mut results = Vec::with_capacity(Setting::ALL.len());
        for setting in Setting::ALL {
            let Some(rule) = rules::lookup(setting) else {
                log::warn!("{} not implemented", setting);
                continue;
            };
            results.push(Self::evaluate(rule, source.as_ref()));
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SettingValue;
    use std::fs;
    use tempfile::tempdir;

    fn check(setting: Setting, source: &str) -> CheckResult {
        let source = SettingsSource::from_source("settings.py", source).unwrap();
        SettingsChecker::evaluate(rules::lookup(setting).unwrap(), Some(&source))
    }

    #[test]
    fn test_debug_setting() {
        let result = check(Setting::Debug, "DEBUG = True");
        assert!(!result.passed);
        assert_eq!(result.observed, Some(SettingValue::Bool(true)));
        assert_eq!(result.line, Some(1));

        assert!(check(Setting::Debug, "DEBUG = False").passed);
    }

    #[test]
    fn test_secret_key_setting() {
        assert!(!check(Setting::SecretKey, "SECRET_KEY = 'django-insecure-abc1234567890123'").passed);
        assert!(check(Setting::SecretKey, "SECRET_KEY = 'q8Zr3vLk0pWm5Tn7Xy2Bc4Hd9'").passed);
        assert!(!check(Setting::SecretKey, "SECRET_KEY = env('DJANGO_SECRET_KEY')").passed);
    }

    #[test]
    fn test_cookie_and_frame_settings() {
        assert!(check(Setting::CsrfCookieSecure, "CSRF_COOKIE_SECURE = True").passed);
        assert!(check(Setting::SessionCookieSecure, "SESSION_COOKIE_SECURE = True").passed);
        assert!(check(Setting::XFrameOptions, "X_FRAME_OPTIONS = 'DENY'").passed);
    }

    #[test]
    fn test_csrf_trusted_origins() {
        assert!(!check(Setting::CsrfTrustedOrigins, "CSRF_TRUSTED_ORIGINS = []").passed);
        assert!(check(Setting::CsrfTrustedOrigins, "CSRF_TRUSTED_ORIGINS = ['https://example.com']").passed);
        assert!(!check(Setting::CsrfTrustedOrigins, "CSRF_TRUSTED_ORIGINS = ['ftp://x.com']").passed);
    }

    #[test]
    fn test_hsts_seconds_through_env_wrapper() {
        let secure = "SECURE_HSTS_SECONDS = env('SECURE_HSTS_SECONDS', default=31536000)";
        let insecure = "SECURE_HSTS_SECONDS = env('SECURE_HSTS_SECONDS', default=0)";
        assert!(check(Setting::SecureHstsSeconds, secure).passed);
        assert!(!check(Setting::SecureHstsSeconds, insecure).passed);
    }

    #[test]
    fn test_unset_setting_fails() {
        let result = check(Setting::SecureSslRedirect, "DEBUG = False");
        assert!(!result.passed);
        assert_eq!(result.observed, None);
        assert_eq!(result.line, None);
    }

    #[test]
    fn test_missing_settings_file_fails_every_rule() {
        let dir = tempdir().unwrap();
        let results = SettingsChecker
            .run_check(&Project::new(dir.path(), "production"))
            .unwrap();

        assert_eq!(results.len(), Setting::ALL.len());
        assert!(results.iter().all(|r| !r.passed));
    }

    #[test]
    fn test_unparsable_settings_file_fails_every_rule() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("production.py"), "DEBUG = False\nif:\n").unwrap();

        let results = SettingsChecker
            .run_check(&Project::new(dir.path(), "production"))
            .unwrap();

        assert!(results.iter().all(|r| !r.passed));
    }
}
