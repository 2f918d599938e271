//! # Django-Sentinel Library
//!
//! @title Django-Sentinel - Static Settings Security Inspector
//!
//! A static analysis library for Django projects.
//!
//! This library resolves the values of security-relevant settings from a
//! project's settings module without importing it, checks them against a
//! catalog of safe policies, and verifies that the admin site is not mounted
//! at a guessable URL.
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface definitions and argument parsing
//! - [`parser`] - Python source parsing and static value extraction
//! - [`rules`] - Security rule catalog and policies
//! - [`checkers`] - Checkers and the inspector that runs them
//! - [`project`] - Locating settings and URLconf files
//! - [`report`] - Report generation in multiple formats
//!
//! ## Example
//!
//! ```rust,ignore
//! use django_sentinel::{Inspector, Project, Report};
//!
//! let project = Project::new("./mysite", "production");
//! let results = Inspector::new().run(&project);
//! let report = Report::new(results, "./mysite", "production");
//! ```

pub mod checkers;
pub mod cli;
pub mod parser;
pub mod project;
pub mod report;
pub mod rules;

pub use checkers::{Checker, Inspector};
pub use cli::Cli;
pub use parser::{SettingValue, SettingsSource};
pub use project::Project;
pub use report::{CheckResult, Report, Severity};
pub use rules::{SecurityRule, Setting};
