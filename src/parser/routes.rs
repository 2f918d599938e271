//! # URLconf Scanning
//!
//! Locates the mount path of the Django admin site in a URLconf module.
//!
//! Only the conventional registration is recognised:
//!
//! ```python
//! urlpatterns = [
//!     path("admin/", admin.site.urls),
//! ]
//! ```

use super::{name_of, walk, Node, PythonModule};
use rustpython_parser::ast::{self, Expr};

/// Callee that registers a route.
const ROUTE_FUNCTION: &str = "path";

/// Module name the admin site is reached through.
const ADMIN_MODULE: &str = "admin";

/// The admin site route found in a URLconf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminMount {
    /// Literal route prefix, e.g. `"admin/"`.
    pub path: String,

    /// Line of the `path(...)` call (1-indexed).
    pub line: usize,
}

/// Finds the first `path("<prefix>", admin.site.urls)` call in the module.
///
/// Calls are matched anywhere in the tree, in the same breadth-first order
/// used for setting lookups.
///
/// # Returns
///
/// The mount, or `None` when no call has the expected shape.
pub fn find_admin_mount(module: &PythonModule) -> Option<AdminMount> {
    walk(&module.ast).find_map(|node| match node {
        Node::Expr(Expr::Call(call)) => admin_route_prefix(call).map(|path| AdminMount {
            path: path.to_string(),
            line: module.line_at(u32::from(call.range.start()) as usize),
        }),
        _ => None,
    })
}

fn admin_route_prefix(call: &ast::ExprCall) -> Option<&str> {
    if name_of(&call.func) != Some(ROUTE_FUNCTION) {
        return None;
    }

    let [prefix, view, ..] = call.args.as_slice() else {
        return None;
    };

    if !is_admin_site_urls(view) {
        return None;
    }

    match prefix {
        Expr::Constant(ast::ExprConstant {
            value: ast::Constant::Str(path),
            ..
        }) => Some(path.as_str()),
        _ => None,
    }
}

/// Matches exactly `admin.site.urls`.
fn is_admin_site_urls(expr: &Expr) -> bool {
    let Expr::Attribute(urls) = expr else {
        return false;
    };
    let Expr::Attribute(site) = urls.value.as_ref() else {
        return false;
    };

    urls.attr.as_str() == "urls"
        && site.attr.as_str() == "site"
        && name_of(&site.value) == Some(ADMIN_MODULE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Option<AdminMount> {
        let module = PythonModule::from_source("urls.py", source.to_string()).unwrap();
        find_admin_mount(&module)
    }

    #[test]
    fn test_finds_default_admin_mount() {
        let source = r#"
from django.contrib import admin
from django.urls import path

urlpatterns = [
    path('admin/', admin.site.urls),
]
"#;
        let mount = scan(source).unwrap();
        assert_eq!(mount.path, "admin/");
        assert_eq!(mount.line, 6);
    }

    #[test]
    fn test_first_matching_call_wins() {
        let source = r#"
urlpatterns = [
    path('api/', include('api.urls')),
    path('super-secret-admin-portal/', admin.site.urls),
    path('backup-admin/', admin.site.urls),
]
"#;
        assert_eq!(scan(source).unwrap().path, "super-secret-admin-portal/");
    }

    #[test]
    fn test_ignores_other_shapes() {
        assert_eq!(scan("urlpatterns = [path('admin/', views.index)]"), None);
        assert_eq!(scan("urlpatterns = [path(ADMIN_URL, admin.site.urls)]"), None);
        assert_eq!(scan("urlpatterns = [re_path('admin/', admin.site.urls)]"), None);
        assert_eq!(scan("urlpatterns = [path('admin/', custom.site.urls)]"), None);
        assert_eq!(scan("urlpatterns = [path('admin/')]"), None);
        assert_eq!(scan("urlpatterns = [urls.path('admin/', admin.site.urls)]"), None);
    }

    #[test]
    fn test_empty_prefix_is_reported() {
        assert_eq!(scan("urlpatterns = [path('', admin.site.urls)]").unwrap().path, "");
    }

    #[test]
    fn test_finds_mount_inside_conditionals() {
        let source = "if settings.ADMIN_ENABLED:\n    urlpatterns += [path('manage/', admin.site.urls)]\n";
        assert_eq!(scan(source).unwrap().path, "manage/");
    }

    #[test]
    fn test_finds_mount_in_parameter_default() {
        let source = "def build(patterns=[path('hidden-admin-path/', admin.site.urls)]):\n    return patterns\n";
        assert_eq!(scan(source).unwrap().path, "hidden-admin-path/");
    }
}
