//! # Project Layout
//!
//! Resolves where the settings module and URLconf of a Django project live.

use std::path::{Path, PathBuf};

/// Django project under inspection.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    settings_module: String,
}

impl Project {
    /// Creates a project rooted at `root`.
    ///
    /// `settings_module` is given without the `.py` suffix (e.g. `production`
    /// or `config.settings.production`); a trailing `.py` is stripped.
    pub fn new(root: impl Into<PathBuf>, settings_module: &str) -> Self {
        let settings_module = settings_module
            .strip_suffix(".py")
            .unwrap_or(settings_module)
            .to_string();

        Self {
            root: root.into(),
            settings_module,
        }
    }

    /// Project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Settings module name as supplied.
    pub fn settings_module(&self) -> &str {
        &self.settings_module
    }

    /// Path of the settings module.
    ///
    /// `<root>/<module>.py` is preferred. When it does not exist and the
    /// module name is dotted, the dotted path is tried as nested directories.
    pub fn settings_file(&self) -> PathBuf {
        let direct = self.root.join(format!("{}.py", self.settings_module));
        if direct.exists() || !self.settings_module.contains('.') {
            return direct;
        }

        let mut nested = self.root.clone();
        for part in self.settings_module.split('.') {
            nested.push(part);
        }
        nested.set_extension("py");

        if nested.exists() {
            nested
        } else {
            direct
        }
    }

    /// Path of the root URLconf: `config/urls.py` if present, else `urls.py`.
    pub fn urls_file(&self) -> PathBuf {
        let config_urls = self.root.join("config").join("urls.py");
        if config_urls.exists() {
            config_urls
        } else {
            self.root.join("urls.py")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_settings_file_plain_module() {
        let project = Project::new("/srv/app", "production");
        assert_eq!(project.settings_file(), PathBuf::from("/srv/app/production.py"));
    }

    #[test]
    fn test_py_suffix_is_stripped() {
        let project = Project::new("/srv/app", "production.py");
        assert_eq!(project.settings_module(), "production");
        assert_eq!(project.settings_file(), PathBuf::from("/srv/app/production.py"));
    }

    #[test]
    fn test_dotted_module_resolves_to_nested_file() {
        let dir = tempdir().unwrap();
        let settings_dir = dir.path().join("config").join("settings");
        fs::create_dir_all(&settings_dir).unwrap();
        fs::write(settings_dir.join("production.py"), "DEBUG = False\n").unwrap();

        let project = Project::new(dir.path(), "config.settings.production");
        assert_eq!(project.settings_file(), settings_dir.join("production.py"));
    }

    #[test]
    fn test_urls_file_prefers_config_package() {
        let dir = tempdir().unwrap();
        let project = Project::new(dir.path(), "settings");
        assert_eq!(project.urls_file(), dir.path().join("urls.py"));

        fs::create_dir_all(dir.path().join("config")).unwrap();
        fs::write(dir.path().join("config").join("urls.py"), "").unwrap();
        assert_eq!(project.urls_file(), dir.path().join("config").join("urls.py"));
    }
}
