//! # Parser Module
//!
//! @title Static Parser for Django Source Modules
//!
//! This module loads Python source files and parses them into a syntax tree
//! without executing them. It uses the `rustpython-parser` crate to build the
//! AST and exposes the extraction passes used by the checkers.
//!
//! ## Submodules
//!
//! - [`settings`] - Resolves the value bound to a setting name
//! - [`routes`] - Locates the admin site mount in a URLconf
//! - [`walk`] - Whole-tree node traversal shared by both passes
//!
//! ## Key Types
//!
//! - [`PythonModule`] - A parsed source file together with its raw text
//! - [`SourceError`] - Why a source file could not be loaded

mod routes;
mod settings;
mod walk;

pub use routes::*;
pub use settings::*;
pub use walk::*;

use rustpython_parser::{ast, Parse};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a Python source file.
///
/// Callers treat every variant as "value not found" so that an unreadable
/// project never passes a check.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The expected source file does not exist.
    #[error("source file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The text is not valid Python.
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

/// A parsed Python module.
///
/// # Example
///
/// ```rust,ignore
/// let module = PythonModule::from_source("settings.py", "DEBUG = False".to_string())?;
/// assert_eq!(module.ast.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct PythonModule {
    /// Path identifier for the source file.
    pub file_path: String,

    /// Raw source code content.
    pub source_code: String,

    /// Parsed module body.
    pub ast: ast::Suite,
}

impl PythonModule {
    /// Parses source text into a module.
    ///
    /// # Arguments
    ///
    /// * `file_path` - Path identifier used in diagnostics
    /// * `source_code` - Raw Python source
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Parse`] if the text is not valid Python.
    pub fn from_source(file_path: &str, source_code: String) -> Result<Self, SourceError> {
        let ast = ast::Suite::parse(&source_code, file_path).map_err(|e| SourceError::Parse {
            path: file_path.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            file_path: file_path.to_string(),
            source_code,
            ast,
        })
    }

    /// Converts a byte offset into a 1-indexed line number.
    pub fn line_at(&self, offset: usize) -> usize {
        self.source_code
            .get(..offset)
            .map_or(0, |prefix| prefix.bytes().filter(|b| *b == b'\n').count())
            + 1
    }
}

/// Reads and parses a Python file from disk.
///
/// The file handle is released before parsing starts, so it is closed on
/// every exit path.
///
/// # Errors
///
/// Returns [`SourceError::NotFound`] when the file is missing,
/// [`SourceError::Io`] when it cannot be read and [`SourceError::Parse`]
/// when it is not valid Python.
pub fn parse_python_file(path: &Path) -> Result<PythonModule, SourceError> {
    let source_code = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            SourceError::NotFound(path.to_path_buf())
        } else {
            SourceError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    PythonModule::from_source(&path.to_string_lossy(), source_code)
}

/// Returns the identifier of a bare-name expression.
pub(crate) fn name_of(expr: &ast::Expr) -> Option<&str> {
    match expr {
        ast::Expr::Name(ast::ExprName { id, .. }) => Some(id.as_str()),
        _ => None,
    }
}
