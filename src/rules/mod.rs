//! # Security Rule Module
//!
//! @title Django Security Rule Catalog
//!
//! This module defines the security rules applied to a Django project and
//! the immutable catalog that maps each setting to its rule.
//!
//! ## Catalog
//!
//! | Setting | Severity | Passes when |
//! |---------|----------|-------------|
//! | DEBUG | Critical | `False` |
//! | SECRET_KEY | Critical | string longer than 20 characters, not `django-insecure-...` |
//! | CSRF_COOKIE_SECURE | High | `True` |
//! | SESSION_COOKIE_SECURE | High | `True` |
//! | X_FRAME_OPTIONS | Medium | `DENY` or `SAMEORIGIN` |
//! | SECURE_HSTS_SECONDS | High | at least one year |
//! | SECURE_CONTENT_TYPE_NOSNIFF | Medium | `True` |
//! | SECURE_HSTS_INCLUDE_SUBDOMAINS | Medium | `True` |
//! | SECURE_HSTS_PRELOAD | Medium | `True` |
//! | SECURE_REFERRER_POLICY | Medium | a known referrer policy |
//! | SECURE_SSL_REDIRECT | High | `True` |
//! | SECURE_BROWSER_XSS_FILTER | Medium | `True` |
//! | CSRF_TRUSTED_ORIGINS | Medium | non-empty list of http(s) origins |
//!
//! The admin URL rule ([`ADMIN_URL_RULE`]) lives outside the catalog because
//! it reads the URLconf rather than the settings module.

mod catalog;
mod policy;

pub use catalog::{catalog, lookup, ADMIN_URL_RULE};
pub use policy::*;

use crate::parser::SettingValue;
use crate::report::Severity;
use std::fmt;

/// Settings inspected by the catalog, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    Debug,
    SecretKey,
    CsrfCookieSecure,
    SessionCookieSecure,
    XFrameOptions,
    SecureHstsSeconds,
    SecureContentTypeNosniff,
    SecureHstsIncludeSubdomains,
    SecureHstsPreload,
    SecureReferrerPolicy,
    SecureSslRedirect,
    SecureBrowserXssFilter,
    CsrfTrustedOrigins,
}

impl Setting {
    /// Every setting, in evaluation order.
    pub const ALL: [Setting; 13] = [
        Setting::Debug,
        Setting::SecretKey,
        Setting::CsrfCookieSecure,
        Setting::SessionCookieSecure,
        Setting::XFrameOptions,
        Setting::SecureHstsSeconds,
        Setting::SecureContentTypeNosniff,
        Setting::SecureHstsIncludeSubdomains,
        Setting::SecureHstsPreload,
        Setting::SecureReferrerPolicy,
        Setting::SecureSslRedirect,
        Setting::SecureBrowserXssFilter,
        Setting::CsrfTrustedOrigins,
    ];

    /// The name the setting is assigned to in `settings.py`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Setting::Debug => "DEBUG",
            Setting::SecretKey => "SECRET_KEY",
            Setting::CsrfCookieSecure => "CSRF_COOKIE_SECURE",
            Setting::SessionCookieSecure => "SESSION_COOKIE_SECURE",
            Setting::XFrameOptions => "X_FRAME_OPTIONS",
            Setting::SecureHstsSeconds => "SECURE_HSTS_SECONDS",
            Setting::SecureContentTypeNosniff => "SECURE_CONTENT_TYPE_NOSNIFF",
            Setting::SecureHstsIncludeSubdomains => "SECURE_HSTS_INCLUDE_SUBDOMAINS",
            Setting::SecureHstsPreload => "SECURE_HSTS_PRELOAD",
            Setting::SecureReferrerPolicy => "SECURE_REFERRER_POLICY",
            Setting::SecureSslRedirect => "SECURE_SSL_REDIRECT",
            Setting::SecureBrowserXssFilter => "SECURE_BROWSER_XSS_FILTER",
            Setting::CsrfTrustedOrigins => "CSRF_TRUSTED_ORIGINS",
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable security rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityRule {
    /// Setting identifier, or "ADMIN_URL".
    pub id: &'static str,

    /// Short message describing the failure.
    pub message: &'static str,

    /// Severity of a failure.
    pub severity: Severity,

    /// What a safe configuration looks like.
    pub description: &'static str,

    /// Django documentation link.
    pub documentation: &'static str,

    /// Predicate applied to the resolved value.
    pub policy: Policy,
}

impl SecurityRule {
    /// Decides the outcome for an observed value.
    ///
    /// An absent value always fails without consulting the policy.
    pub fn passes(&self, observed: Option<&SettingValue>) -> bool {
        observed.is_some_and(|value| self.policy.evaluate(value))
    }
}
