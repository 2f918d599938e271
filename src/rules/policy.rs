//! # Rule Policies
//!
//! The predicate kinds a rule can apply to a resolved setting value. Every
//! policy is pure and total: any value of the wrong shape, including
//! [`SettingValue::Undetermined`], simply fails.

use crate::parser::SettingValue;

/// Prefix Django's `startproject` puts on generated development keys.
pub const INSECURE_SECRET_KEY_PREFIX: &str = "django-insecure-";

/// Lengths at or below this are rejected for `SECRET_KEY`.
pub const SECRET_KEY_MIN_LENGTH: usize = 20;

/// One year, in seconds.
pub const ONE_YEAR_SECONDS: i64 = 31_536_000;

/// Accepted values of `X_FRAME_OPTIONS`, compared upper-cased.
pub const FRAME_OPTIONS: &[&str] = &["DENY", "SAMEORIGIN"];

/// Accepted values of `SECURE_REFERRER_POLICY`, compared lower-cased.
pub const REFERRER_POLICIES: &[&str] = &[
    "no-referrer",
    "no-referrer-when-downgrade",
    "origin",
    "origin-when-cross-origin",
    "same-origin",
    "strict-origin",
    "strict-origin-when-cross-origin",
    "unsafe-url",
];

/// Schemes a trusted CSRF origin may start with.
pub const ORIGIN_SCHEMES: &[&str] = &["http://", "https://"];

/// Admin mount paths of this length or shorter are considered guessable.
pub const ADMIN_PATH_MIN_LENGTH: usize = 10;

/// Common admin mount paths.
pub const ADMIN_PATH_BLACKLIST: &[&str] = &[
    "admin/",
    "administrator/",
    "django-admin/",
    "admin-panel/",
    "admin-console/",
    "admin-login/",
];

/// A security predicate over a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Value is the boolean `False`.
    IsFalse,

    /// Value is the boolean `True`.
    IsTrue,

    /// Value is a long string that is not a generated development key.
    StrongSecret {
        min_length: usize,
        insecure_prefix: &'static str,
    },

    /// Value is a string whose upper-case form is one of the options.
    OneOfUppercase(&'static [&'static str]),

    /// Value is a string whose lower-case form is one of the options.
    OneOfLowercase(&'static [&'static str]),

    /// Value is an integer no smaller than the bound.
    AtLeast(i64),

    /// Value is a non-empty list of strings each starting with an allowed scheme.
    OriginList(&'static [&'static str]),

    /// Value is a string longer than `min_length` and not on the blacklist.
    UnguessablePath {
        min_length: usize,
        blacklist: &'static [&'static str],
    },
}

impl Policy {
    /// Applies the predicate to a resolved value.
    pub fn evaluate(&self, value: &SettingValue) -> bool {
        match (self, value) {
            (Policy::IsFalse, SettingValue::Bool(b)) => !*b,
            (Policy::IsTrue, SettingValue::Bool(b)) => *b,
            (
                Policy::StrongSecret {
                    min_length,
                    insecure_prefix,
                },
                SettingValue::Str(s),
            ) => s.chars().count() > *min_length && !s.starts_with(insecure_prefix),
            (Policy::OneOfUppercase(options), SettingValue::Str(s)) => {
                options.contains(&s.to_uppercase().as_str())
            }
            (Policy::OneOfLowercase(options), SettingValue::Str(s)) => {
                options.contains(&s.to_lowercase().as_str())
            }
            (Policy::AtLeast(bound), SettingValue::Int(n)) => n >= bound,
            (Policy::OriginList(schemes), SettingValue::List(items)) => {
                !items.is_empty()
                    && items.iter().all(|item| match item {
                        SettingValue::Str(origin) => {
                            schemes.iter().any(|scheme| origin.starts_with(scheme))
                        }
                        _ => false,
                    })
            }
            (
                Policy::UnguessablePath {
                    min_length,
                    blacklist,
                },
                SettingValue::Str(path),
            ) => path.chars().count() > *min_length && !blacklist.contains(&path.as_str()),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(value: &str) -> SettingValue {
        SettingValue::Str(value.to_string())
    }

    const SECRET: Policy = Policy::StrongSecret {
        min_length: SECRET_KEY_MIN_LENGTH,
        insecure_prefix: INSECURE_SECRET_KEY_PREFIX,
    };

    const ADMIN_PATH: Policy = Policy::UnguessablePath {
        min_length: ADMIN_PATH_MIN_LENGTH,
        blacklist: ADMIN_PATH_BLACKLIST,
    };

    #[test]
    fn test_boolean_policies_reject_truthy_values() {
        assert!(Policy::IsFalse.evaluate(&SettingValue::Bool(false)));
        assert!(!Policy::IsFalse.evaluate(&SettingValue::Bool(true)));
        assert!(!Policy::IsFalse.evaluate(&SettingValue::Int(0)));
        assert!(!Policy::IsFalse.evaluate(&SettingValue::None));
        assert!(Policy::IsTrue.evaluate(&SettingValue::Bool(true)));
        assert!(!Policy::IsTrue.evaluate(&SettingValue::Int(1)));
        assert!(!Policy::IsTrue.evaluate(&s("True")));
    }

    #[test]
    fn test_strong_secret() {
        assert!(!SECRET.evaluate(&s("django-insecure-abc1234567890123")));
        assert!(SECRET.evaluate(&s("q8Zr3vLk0pWm5Tn7Xy2Bc4Hd9")));
        assert!(!SECRET.evaluate(&s("exactly-twenty-chars")));
        assert!(!SECRET.evaluate(&SettingValue::Undetermined));
    }

    #[test]
    fn test_frame_options_case_insensitive() {
        let policy = Policy::OneOfUppercase(FRAME_OPTIONS);
        assert!(policy.evaluate(&s("deny")));
        assert!(policy.evaluate(&s("SameOrigin")));
        assert!(!policy.evaluate(&s("ALLOW-FROM https://x.com")));
    }

    #[test]
    fn test_referrer_policy() {
        let policy = Policy::OneOfLowercase(REFERRER_POLICIES);
        assert_eq!(REFERRER_POLICIES.len(), 8);
        assert!(policy.evaluate(&s("Strict-Origin-When-Cross-Origin")));
        assert!(!policy.evaluate(&s("always")));
    }

    #[test]
    fn test_at_least() {
        let policy = Policy::AtLeast(ONE_YEAR_SECONDS);
        assert!(policy.evaluate(&SettingValue::Int(31536000)));
        assert!(!policy.evaluate(&SettingValue::Int(0)));
        assert!(!policy.evaluate(&SettingValue::Float(31536000.0)));
        assert!(!policy.evaluate(&s("31536000")));
    }

    #[test]
    fn test_origin_list() {
        let policy = Policy::OriginList(ORIGIN_SCHEMES);
        assert!(!policy.evaluate(&SettingValue::List(vec![])));
        assert!(policy.evaluate(&SettingValue::List(vec![s("https://example.com")])));
        assert!(!policy.evaluate(&SettingValue::List(vec![s("ftp://x.com")])));
        assert!(!policy.evaluate(&SettingValue::List(vec![
            s("https://a.com"),
            SettingValue::Int(1)
        ])));
        assert!(!policy.evaluate(&s("https://example.com")));
    }

    #[test]
    fn test_unguessable_path() {
        assert!(!ADMIN_PATH.evaluate(&s("admin/")));
        assert!(!ADMIN_PATH.evaluate(&s("administrator/")));
        assert!(!ADMIN_PATH.evaluate(&s("")));
        assert!(!ADMIN_PATH.evaluate(&s("backoffice")));
        assert!(ADMIN_PATH.evaluate(&s("super-secret-admin-portal/")));
    }

    #[test]
    fn test_admin_blacklist_has_no_duplicates() {
        let mut paths = ADMIN_PATH_BLACKLIST.to_vec();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), ADMIN_PATH_BLACKLIST.len());
    }

    #[test]
    fn test_policies_are_deterministic() {
        let value = s("django-insecure-abc1234567890123");
        assert_eq!(SECRET.evaluate(&value), SECRET.evaluate(&value));
    }
}
