//! Error and diagnostic system for the Flujo compiler.
//!
//! The system is built around the [`Diagnostic`] type: a single positioned
//! message with a severity, an error code, labeled source spans and optional
//! help text. A fatal diagnostic is wrapped in [`ParseError`] when returned
//! from the compilation pipeline; non-fatal diagnostics are surfaced as
//! warnings next to the result.
//!
//! Compilation follows a single-error policy: the first structural violation
//! encountered in document order aborts the pipeline, and the caller receives
//! exactly one fatal diagnostic. The editor surface highlights only that
//! error's span, mirroring how an author fixes errors top-down.
//!
//! # Example
//!
//! ```
//! # use flujo_parser::error::{Diagnostic, ErrorCode};
//! # use flujo_parser::Span;
//!
//! let second = Span::new(100..120);
//! let first = Span::new(50..70);
//!
//! let diag = Diagnostic::error("la pantalla `CITA` está definida varias veces")
//!     .with_code(ErrorCode::E200)
//!     .with_label(second, "segunda definición")
//!     .with_secondary_label(first, "definida por primera vez aquí")
//!     .with_help("usa un nombre distinto para cada pantalla");
//! ```

mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;

pub(crate) type Result<T> = std::result::Result<T, Diagnostic>;
