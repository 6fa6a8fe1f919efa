//! ruc-util - Foundation types shared by the Ru frontend crates.
//!
//! The frontend reports problems in two ways: the lexer embeds `error_*`
//! tokens in its output stream and never fails, while the parser fails with a
//! single positioned error. Both surfaces converge on the [`Diagnostic`]
//! type defined here, so callers collect every problem of a compilation unit
//! through one channel.
//!
//! # Example
//!
//! ```
//! use ruc_util::{Diagnostic, Handler, Level};
//!
//! let handler = Handler::new();
//! handler.emit(Diagnostic::error("unexpected byte", 0, 4));
//!
//! assert!(handler.has_errors());
//! assert_eq!(handler.take()[0].level, Level::Error);
//! ```

pub mod diagnostic;

pub use diagnostic::{codes, Diagnostic, DiagnosticCode, Handler, Level};
