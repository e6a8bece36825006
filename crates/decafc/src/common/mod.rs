//! Common infrastructure shared across compiler stages

mod error;
mod span;

pub use error::{CompileError, CompileResult, DiagnosticReporter, DiagnosticStyle};
pub use span::Span;
