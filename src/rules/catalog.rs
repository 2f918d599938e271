//! Static rule table.

use super::policy::*;
use super::{SecurityRule, Setting};
use crate::report::Severity;

const DOCS: &str = "https://docs.djangoproject.com/en/5.1/ref/settings/";

macro_rules! docs {
    ($anchor:literal) => {
        concat!("https://docs.djangoproject.com/en/5.1/ref/settings/#", $anchor)
    };
}

static CATALOG: [SecurityRule; 13] = [
    SecurityRule {
        id: "DEBUG",
        message: "DEBUG enabled in production",
        severity: Severity::Critical,
        description: "Debug mode must be disabled in production for security",
        documentation: docs!("debug"),
        policy: Policy::IsFalse,
    },
    SecurityRule {
        id: "SECRET_KEY",
        message: "SECRET_KEY should not be the default value",
        severity: Severity::Critical,
        description: "The SECRET_KEY setting must be unique and kept secret",
        documentation: docs!("secret-key"),
        policy: Policy::StrongSecret {
            min_length: SECRET_KEY_MIN_LENGTH,
            insecure_prefix: INSECURE_SECRET_KEY_PREFIX,
        },
    },
    SecurityRule {
        id: "CSRF_COOKIE_SECURE",
        message: "CSRF_COOKIE_SECURE not set to True",
        severity: Severity::High,
        description: "CSRF cookies must be secure in production",
        documentation: docs!("csrf-cookie-secure"),
        policy: Policy::IsTrue,
    },
    SecurityRule {
        id: "SESSION_COOKIE_SECURE",
        message: "SESSION_COOKIE_SECURE not set to True",
        severity: Severity::High,
        description: "Session cookies must be secure in production",
        documentation: docs!("session-cookie-secure"),
        policy: Policy::IsTrue,
    },
    SecurityRule {
        id: "X_FRAME_OPTIONS",
        message: "X_FRAME_OPTIONS not properly set",
        severity: Severity::Medium,
        description: "The X_FRAME_OPTIONS setting must be set to 'DENY' or 'SAMEORIGIN' to prevent clickjacking",
        documentation: docs!("x-frame-options"),
        policy: Policy::OneOfUppercase(FRAME_OPTIONS),
    },
    SecurityRule {
        id: "SECURE_HSTS_SECONDS",
        message: "SECURE_HSTS_SECONDS not set or too low",
        severity: Severity::High,
        description: "The SECURE_HSTS_SECONDS setting must be set to at least 1 year (31536000 seconds)",
        documentation: docs!("secure-hsts-seconds"),
        policy: Policy::AtLeast(ONE_YEAR_SECONDS),
    },
    SecurityRule {
        id: "SECURE_CONTENT_TYPE_NOSNIFF",
        message: "SECURE_CONTENT_TYPE_NOSNIFF not set to True",
        severity: Severity::Medium,
        description: "The SECURE_CONTENT_TYPE_NOSNIFF setting must be set to True to prevent MIME type sniffing",
        documentation: docs!("secure-content-type-nosniff"),
        policy: Policy::IsTrue,
    },
    SecurityRule {
        id: "SECURE_HSTS_INCLUDE_SUBDOMAINS",
        message: "SECURE_HSTS_INCLUDE_SUBDOMAINS not set to True",
        severity: Severity::Medium,
        description: "The SECURE_HSTS_INCLUDE_SUBDOMAINS setting must be set to True to include subdomains in HSTS",
        documentation: docs!("secure-hsts-include-subdomains"),
        policy: Policy::IsTrue,
    },
    SecurityRule {
        id: "SECURE_HSTS_PRELOAD",
        message: "SECURE_HSTS_PRELOAD not set to True",
        severity: Severity::Medium,
        description: "The SECURE_HSTS_PRELOAD setting must be set to True to enable HSTS preload",
        documentation: docs!("secure-hsts-preload"),
        policy: Policy::IsTrue,
    },
    SecurityRule {
        id: "SECURE_REFERRER_POLICY",
        message: "SECURE_REFERRER_POLICY not properly set",
        severity: Severity::Medium,
        description: "The SECURE_REFERRER_POLICY setting must be set to an appropriate value",
        documentation: docs!("secure-referrer-policy"),
        policy: Policy::OneOfLowercase(REFERRER_POLICIES),
    },
    SecurityRule {
        id: "SECURE_SSL_REDIRECT",
        message: "SECURE_SSL_REDIRECT not set to True",
        severity: Severity::High,
        description: "The SECURE_SSL_REDIRECT setting must be set to True to redirect all HTTP requests to HTTPS",
        documentation: docs!("secure-ssl-redirect"),
        policy: Policy::IsTrue,
    },
    SecurityRule {
        id: "SECURE_BROWSER_XSS_FILTER",
        message: "SECURE_BROWSER_XSS_FILTER not set to True",
        severity: Severity::Medium,
        description: "The SECURE_BROWSER_XSS_FILTER setting must be set to True to enable the browser's XSS filter",
        documentation: docs!("secure-browser-xss-filter"),
        policy: Policy::IsTrue,
    },
    SecurityRule {
        id: "CSRF_TRUSTED_ORIGINS",
        message: "CSRF_TRUSTED_ORIGINS not properly set",
        severity: Severity::Medium,
        description: "The CSRF_TRUSTED_ORIGINS setting must be a non-empty list of trusted origins",
        documentation: docs!("csrf-trusted-origins"),
        policy: Policy::OriginList(ORIGIN_SCHEMES),
    },
];

/// Rule for the admin site mount path, evaluated against the URLconf.
pub static ADMIN_URL_RULE: SecurityRule = SecurityRule {
    id: "ADMIN_URL",
    message: "Admin URL should not be a common or easily guessable path",
    severity: Severity::High,
    description: "The admin URL should be unique and not easily guessable (minimum 10 characters)",
    documentation: DOCS,
    policy: Policy::UnguessablePath {
        min_length: ADMIN_PATH_MIN_LENGTH,
        blacklist: ADMIN_PATH_BLACKLIST,
    },
};

/// Returns every catalog rule in table order.
pub fn catalog() -> &'static [SecurityRule] {
    &CATALOG
}

/// Looks up the rule for a setting.
///
/// Returns `None` if the setting has no implemented rule.
pub fn lookup(setting: Setting) -> Option<&'static SecurityRule> {
    CATALOG.iter().find(|rule| rule.id == setting.as_str())
}
