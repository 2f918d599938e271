//! # Setting Value Extraction
//!
//! @title Static Setting Resolver
//!
//! Resolves the value bound to a setting name in a Django settings module
//! without importing it.
//!
//! The lookup is an approximation of Python evaluation, not an interpreter:
//! every node of the tree is visited in breadth-first order and the first
//! assignment to the name wins, regardless of the scope it sits in or of any
//! later rebinding. A name assigned twice may therefore resolve to a value
//! the running application never sees.
//!
//! ## Recognised right-hand sides
//!
//! | Shape | Resolves to |
//! |-------|-------------|
//! | `True`, `42`, `-1`, `"text"`, `None` | the literal |
//! | `[...]` / `(...)` | the literal elements, others dropped |
//! | `env("NAME", default)` / `env.bool("NAME", default=...)` | the literal default |
//! | anything else | [`SettingValue::Undetermined`] |

use super::{name_of, parse_python_file, walk, Node, PythonModule, SourceError};
use rustpython_parser::ast::{self, Expr, Stmt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Callee name of the environment wrapper convention.
const ENV_WRAPPER: &str = "env";

/// Keyword carrying the fallback value of an environment wrapper call.
const ENV_DEFAULT_KEYWORD: &str = "default";

/// Statically resolved value of a setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SettingValue {
    /// A binding exists but its expression is not a shape the resolver understands.
    Undetermined,

    /// The `None` literal.
    None,

    /// A `True` / `False` literal.
    Bool(bool),

    /// An integer literal that fits in 64 bits.
    Int(i64),

    /// A float literal.
    Float(f64),

    /// A string literal.
    Str(String),

    /// The literal elements of a list or tuple display.
    List(Vec<SettingValue>),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Undetermined => write!(f, "<undetermined>"),
            SettingValue::None => write!(f, "None"),
            SettingValue::Bool(true) => write!(f, "True"),
            SettingValue::Bool(false) => write!(f, "False"),
            SettingValue::Int(n) => write!(f, "{}", n),
            SettingValue::Float(n) => write!(f, "{:?}", n),
            SettingValue::Str(s) => write!(f, "{:?}", s),
            SettingValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// An assignment to a setting name found in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// Resolved right-hand side.
    pub value: SettingValue,

    /// Line of the assignment statement (1-indexed).
    pub line: usize,
}

/// A parsed settings module ready for repeated lookups.
#[derive(Debug, Clone)]
pub struct SettingsSource {
    module: PythonModule,
}

impl SettingsSource {
    /// Reads and parses a settings module from disk.
    ///
    /// # Errors
    ///
    /// Propagates [`SourceError`] from [`parse_python_file`].
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        Ok(Self {
            module: parse_python_file(path)?,
        })
    }

    /// Parses settings from in-memory source text.
    pub fn from_source(file_path: &str, source_code: &str) -> Result<Self, SourceError> {
        Ok(Self {
            module: PythonModule::from_source(file_path, source_code.to_string())?,
        })
    }

    /// Path of the underlying settings file.
    pub fn file_path(&self) -> &str {
        &self.module.file_path
    }

    /// Finds the first binding of `name` in traversal order.
    ///
    /// Returns `None` when no assignment targets the name. Repeated calls
    /// with the same name return the same binding.
    pub fn find_binding(&self, name: &str) -> Option<Binding> {
        walk(&self.module.ast).find_map(|node| match node {
            Node::Stmt(stmt) => bound_expr(stmt, name).map(|(expr, offset)| {
                let binding = Binding {
                    value: resolve(expr),
                    line: self.module.line_at(offset),
                };
                log::debug!(
                    "{}:{} resolved {} = {}",
                    self.module.file_path,
                    binding.line,
                    name,
                    binding.value
                );
                binding
            }),
            Node::Expr(_) => None,
        })
    }
}

/// Returns the right-hand side and start offset of `stmt` if it binds `name`.
///
/// Plain assignments (including chained `A = B = value`) and annotated
/// assignments with a value count as bindings. Unpacking targets do not.
fn bound_expr<'a>(stmt: &'a Stmt, name: &str) -> Option<(&'a Expr, usize)> {
    match stmt {
        Stmt::Assign(ast::StmtAssign {
            targets,
            value,
            range,
            ..
        }) if targets.iter().any(|target| name_of(target) == Some(name)) => {
            Some((value.as_ref(), u32::from(range.start()) as usize))
        }
        Stmt::AnnAssign(ast::StmtAnnAssign {
            target,
            value: Some(value),
            range,
            ..
        }) if name_of(target) == Some(name) => {
            Some((value.as_ref(), u32::from(range.start()) as usize))
        }
        _ => None,
    }
}

/// Resolves a right-hand side expression.
fn resolve(expr: &Expr) -> SettingValue {
    if let Some(value) = literal(expr) {
        return value;
    }

    match expr {
        Expr::List(ast::ExprList { elts, .. }) | Expr::Tuple(ast::ExprTuple { elts, .. }) => {
            literal_elements(elts)
        }
        Expr::Call(call) if is_env_wrapper(&call.func) => env_default(call),
        _ => SettingValue::Undetermined,
    }
}

/// Collects the literal elements of a sequence display.
fn literal_elements(elts: &[Expr]) -> SettingValue {
    SettingValue::List(elts.iter().filter_map(literal).collect())
}

/// Resolves a single literal, including a negated number.
fn literal(expr: &Expr) -> Option<SettingValue> {
    match expr {
        Expr::Constant(ast::ExprConstant { value, .. }) => constant(value),
        Expr::UnaryOp(ast::ExprUnaryOp {
            op: ast::UnaryOp::USub,
            operand,
            ..
        }) => match literal(operand)? {
            SettingValue::Int(n) => n.checked_neg().map(SettingValue::Int),
            SettingValue::Float(n) => Some(SettingValue::Float(-n)),
            _ => None,
        },
        _ => None,
    }
}

fn constant(value: &ast::Constant) -> Option<SettingValue> {
    match value {
        ast::Constant::None => Some(SettingValue::None),
        ast::Constant::Bool(b) => Some(SettingValue::Bool(*b)),
        ast::Constant::Str(s) => Some(SettingValue::Str(s.clone())),
        // Out-of-range integers are kept as a binding but never compared.
        ast::Constant::Int(n) => Some(
            n.to_string()
                .parse::<i64>()
                .map_or(SettingValue::Undetermined, SettingValue::Int),
        ),
        ast::Constant::Float(n) => Some(SettingValue::Float(*n)),
        _ => None,
    }
}

/// Matches `env(...)` and `env.<cast>(...)` callees.
fn is_env_wrapper(func: &Expr) -> bool {
    match func {
        Expr::Name(_) => name_of(func) == Some(ENV_WRAPPER),
        Expr::Attribute(ast::ExprAttribute { value, .. }) => name_of(value) == Some(ENV_WRAPPER),
        _ => false,
    }
}

/// Resolves the fallback of an environment wrapper call.
///
/// A literal second positional argument wins, then a literal `default=`
/// keyword. List and tuple displays of literals are accepted as defaults.
fn env_default(call: &ast::ExprCall) -> SettingValue {
    call.args
        .get(1)
        .and_then(default_literal)
        .or_else(|| {
            call.keywords
                .iter()
                .find(|keyword| {
                    keyword
                        .arg
                        .as_ref()
                        .is_some_and(|arg| arg.as_str() == ENV_DEFAULT_KEYWORD)
                })
                .and_then(|keyword| default_literal(&keyword.value))
        })
        .unwrap_or(SettingValue::Undetermined)
}

fn default_literal(expr: &Expr) -> Option<SettingValue> {
    match expr {
        Expr::List(ast::ExprList { elts, .. }) | Expr::Tuple(ast::ExprTuple { elts, .. }) => {
            Some(literal_elements(elts))
        }
        _ => literal(expr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(source: &str, name: &str) -> Option<SettingValue> {
        SettingsSource::from_source("settings.py", source)
            .unwrap()
            .find_binding(name)
            .map(|binding| binding.value)
    }

    #[test]
    fn test_resolve_bool_literal() {
        assert_eq!(lookup("DEBUG = True", "DEBUG"), Some(SettingValue::Bool(true)));
        assert_eq!(lookup("DEBUG = False", "DEBUG"), Some(SettingValue::Bool(false)));
    }

    #[test]
    fn test_missing_name_is_absent() {
        assert_eq!(lookup("DEBUG = True", "SECRET_KEY"), None);
        assert_eq!(lookup("", "DEBUG"), None);
    }

    #[test]
    fn test_resolve_scalar_literals() {
        let source = r#"
SECRET_KEY = "abc"
SECURE_HSTS_SECONDS = 31536000
NEGATIVE = -5
RATIO = 0.5
NOTHING = None
"#;
        assert_eq!(lookup(source, "SECRET_KEY"), Some(SettingValue::Str("abc".into())));
        assert_eq!(lookup(source, "SECURE_HSTS_SECONDS"), Some(SettingValue::Int(31536000)));
        assert_eq!(lookup(source, "NEGATIVE"), Some(SettingValue::Int(-5)));
        assert_eq!(lookup(source, "RATIO"), Some(SettingValue::Float(0.5)));
        assert_eq!(lookup(source, "NOTHING"), Some(SettingValue::None));
    }

    #[test]
    fn test_huge_integer_is_undetermined() {
        assert_eq!(
            lookup("N = 123456789012345678901234567890", "N"),
            Some(SettingValue::Undetermined)
        );
    }

    #[test]
    fn test_sequence_keeps_only_literals() {
        let source = "ORIGINS = ['https://a.com', HOST, ('x'), 3]";
        assert_eq!(
            lookup(source, "ORIGINS"),
            Some(SettingValue::List(vec![
                SettingValue::Str("https://a.com".into()),
                SettingValue::Str("x".into()),
                SettingValue::Int(3),
            ]))
        );
        assert_eq!(
            lookup("HOSTS = ('a', 'b')", "HOSTS"),
            Some(SettingValue::List(vec![
                SettingValue::Str("a".into()),
                SettingValue::Str("b".into()),
            ]))
        );
        assert_eq!(lookup("ORIGINS = []", "ORIGINS"), Some(SettingValue::List(vec![])));
    }

    #[test]
    fn test_env_wrapper_keyword_default() {
        let source = "SECURE_HSTS_SECONDS = env('SECURE_HSTS_SECONDS', default=31536000)";
        assert_eq!(
            lookup(source, "SECURE_HSTS_SECONDS"),
            Some(SettingValue::Int(31536000))
        );
    }

    #[test]
    fn test_env_wrapper_positional_default() {
        let source = "DEBUG = env.bool('DJANGO_DEBUG', False)";
        assert_eq!(lookup(source, "DEBUG"), Some(SettingValue::Bool(false)));
    }

    #[test]
    fn test_env_wrapper_non_literal_positional_falls_back_to_keyword() {
        let source = "DEBUG = env('DJANGO_DEBUG', cast, default=True)";
        assert_eq!(lookup(source, "DEBUG"), Some(SettingValue::Bool(true)));
    }

    #[test]
    fn test_env_wrapper_without_default_is_undetermined() {
        assert_eq!(
            lookup("SECRET_KEY = env('DJANGO_SECRET_KEY')", "SECRET_KEY"),
            Some(SettingValue::Undetermined)
        );
        assert_eq!(
            lookup("SECRET_KEY = env.str('KEY', default=make_key())", "SECRET_KEY"),
            Some(SettingValue::Undetermined)
        );
    }

    #[test]
    fn test_env_wrapper_list_default() {
        let source = "CSRF_TRUSTED_ORIGINS = env.list('ORIGINS', default=['https://a.com'])";
        assert_eq!(
            lookup(source, "CSRF_TRUSTED_ORIGINS"),
            Some(SettingValue::List(vec![SettingValue::Str("https://a.com".into())]))
        );
    }

    #[test]
    fn test_other_calls_are_undetermined() {
        assert_eq!(
            lookup("SECRET_KEY = os.environ.get('KEY', 'fallback')", "SECRET_KEY"),
            Some(SettingValue::Undetermined)
        );
        assert_eq!(
            lookup("DEBUG = not PRODUCTION", "DEBUG"),
            Some(SettingValue::Undetermined)
        );
    }

    #[test]
    fn test_first_binding_in_walk_order_wins() {
        let source = "DEBUG = True\nDEBUG = False\n";
        let binding = SettingsSource::from_source("settings.py", source)
            .unwrap()
            .find_binding("DEBUG")
            .unwrap();
        assert_eq!(binding.value, SettingValue::Bool(true));
        assert_eq!(binding.line, 1);
    }

    #[test]
    fn test_nested_binding_is_visible() {
        let source = "if PRODUCTION:\n    DEBUG = False\n";
        assert_eq!(lookup(source, "DEBUG"), Some(SettingValue::Bool(false)));
    }

    #[test]
    fn test_module_level_binding_precedes_nested_one() {
        let source = "def configure():\n    DEBUG = True\nDEBUG = False\n";
        assert_eq!(lookup(source, "DEBUG"), Some(SettingValue::Bool(false)));
    }

    #[test]
    fn test_chained_and_annotated_assignments() {
        assert_eq!(
            lookup("CSRF_COOKIE_SECURE = SESSION_COOKIE_SECURE = True", "SESSION_COOKIE_SECURE"),
            Some(SettingValue::Bool(true))
        );
        assert_eq!(lookup("DEBUG: bool = False", "DEBUG"), Some(SettingValue::Bool(false)));
        assert_eq!(lookup("DEBUG: bool", "DEBUG"), None);
    }

    #[test]
    fn test_attribute_targets_do_not_bind() {
        assert_eq!(lookup("settings.DEBUG = False", "DEBUG"), None);
    }

    #[test]
    fn test_lookup_is_idempotent() {
        let source = SettingsSource::from_source("s.py", "X_FRAME_OPTIONS = 'DENY'").unwrap();
        assert_eq!(source.find_binding("X_FRAME_OPTIONS"), source.find_binding("X_FRAME_OPTIONS"));
    }

    #[test]
    fn test_display_uses_python_spelling() {
        let value = SettingValue::List(vec![
            SettingValue::Bool(true),
            SettingValue::None,
            SettingValue::Str("x".into()),
        ]);
        assert_eq!(value.to_string(), r#"[True, None, "x"]"#);
    }
}
