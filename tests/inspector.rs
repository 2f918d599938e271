use django_sentinel::{Inspector, Project, Report, SettingValue, Severity};
use std::fs;
use tempfile::tempdir;

fn write_project(settings: &str, urls: Option<&str>) -> tempfile::TempDir {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("settings.py"), settings).expect("settings");
    if let Some(urls) = urls {
        fs::write(dir.path().join("urls.py"), urls).expect("urls");
    }
    dir
}

fn outcome(results: &[django_sentinel::CheckResult], setting: &str) -> bool {
    results
        .iter()
        .find(|r| r.setting == setting)
        .map(|r| r.passed)
        .expect("result present")
}

#[test]
fn env_wrapped_settings_resolve_to_defaults() {
    let dir = write_project(
        "SECURE_HSTS_SECONDS = env('SECURE_HSTS_SECONDS', default=31536000)\n\
         SECURE_SSL_REDIRECT = env.bool('SSL', default=False)\n",
        None,
    );
    let results = Inspector::new().run(&Project::new(dir.path(), "settings"));

    assert!(outcome(&results, "SECURE_HSTS_SECONDS"));
    assert!(!outcome(&results, "SECURE_SSL_REDIRECT"));
}

#[test]
fn settings_nested_in_blocks_are_found() {
    let dir = write_project(
        "import os\n\
         if os.environ.get('PRODUCTION'):\n    DEBUG = False\nelse:\n    DEBUG = True\n",
        None,
    );
    let results = Inspector::new().run(&Project::new(dir.path(), "settings"));
    assert!(outcome(&results, "DEBUG"));
}

#[test]
fn admin_url_result_is_last() {
    let dir = write_project(
        "DEBUG = False\n",
        Some("urlpatterns = [path('super-secret-admin-portal/', admin.site.urls)]\n"),
    );
    let results = Inspector::new().run(&Project::new(dir.path(), "settings"));
    let last = results.last().expect("results");

    assert_eq!(last.setting, "ADMIN_URL");
    assert!(last.passed);
    assert_eq!(
        last.observed,
        Some(SettingValue::Str("super-secret-admin-portal/".into()))
    );
}

#[test]
fn report_groups_critical_failures() {
    let dir = write_project("DEBUG = True\nSECRET_KEY = 'short'\n", None);
    let project = Project::new(dir.path(), "settings");
    let report = Report::new(Inspector::new().run(&project), "project", "settings");

    assert!(report.has_critical_failures());
    let groups = report.failures_by_severity();
    assert_eq!(groups[&Severity::Critical].len(), 2);
}
