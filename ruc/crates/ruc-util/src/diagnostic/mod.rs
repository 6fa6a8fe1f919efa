//! Diagnostic module - error and warning reporting infrastructure.
//!
//! A [`Diagnostic`] is a severity level, a message, a 0-based source position
//! and an optional stable [`DiagnosticCode`]. The [`Handler`] accumulates
//! diagnostics behind interior mutability so producers only need a shared
//! reference.
//!
//! # Examples
//!
//! ```
//! use ruc_util::diagnostic::{codes, Diagnostic, Handler};
//!
//! let handler = Handler::new();
//! handler.emit(
//!     Diagnostic::error("string literal is missing its closing quotes", 3, 17)
//!         .with_code(codes::E_LEX_UNCLOSED_STRING),
//! );
//!
//! assert!(handler.has_errors());
//! ```

pub mod codes;

pub use codes::DiagnosticCode;

use std::cell::RefCell;
use std::fmt;

use thiserror::Error;

/// Diagnostic severity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// A problem that makes the compilation unit unusable.
    Error,
    /// A problem the frontend can work around.
    Warning,
    /// Additional context attached to another diagnostic.
    Note,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
            Level::Note => write!(f, "note"),
        }
    }
}

/// A single diagnostic message with severity and source position.
///
/// Positions are 0-based; columns count Unicode scalars, matching the token
/// model of `ruc-lex`.
///
/// `Diagnostic` implements [`std::error::Error`], so a caller that only cares
/// about the first failure can box it into any error-carrying return type.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{level}: {message} at {line}:{column}")]
pub struct Diagnostic {
    /// Severity of this diagnostic.
    pub level: Level,
    /// Human-readable description.
    pub message: String,
    /// 0-based source line.
    pub line: u32,
    /// 0-based source column, in Unicode scalars.
    pub column: u32,
    /// Stable machine-readable code, when one applies.
    pub code: Option<DiagnosticCode>,
}

impl Diagnostic {
    /// Creates a diagnostic with an explicit level.
    pub fn new(level: Level, message: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            level,
            message: message.into(),
            line,
            column,
            code: None,
        }
    }

    /// Creates an error-level diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// use ruc_util::diagnostic::{Diagnostic, Level};
    ///
    /// let diag = Diagnostic::error("unexpected byte", 0, 7);
    /// assert_eq!(diag.level, Level::Error);
    /// ```
    pub fn error(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::new(Level::Error, message, line, column)
    }

    /// Creates a warning-level diagnostic.
    pub fn warning(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::new(Level::Warning, message, line, column)
    }

    /// Attaches a stable code.
    #[inline]
    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }
}

/// Accumulates diagnostics produced while processing one compilation unit.
///
/// The handler uses interior mutability so that it can be threaded through
/// code that only holds a shared reference.
#[derive(Debug, Default)]
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    /// Creates an empty handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic.
    pub fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Returns true if at least one error-level diagnostic was emitted.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level == Level::Error)
    }

    /// Number of recorded diagnostics of any level.
    pub fn len(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }

    /// Takes every recorded diagnostic out of the handler, in emission order.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.borrow_mut())
    }
}
