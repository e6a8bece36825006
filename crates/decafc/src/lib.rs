//! Decaf compiler front end
//!
//! This library lexes, parses and semantically checks programs written in
//! Decaf, a small Java-like teaching language.
//!
//! ## Architecture
//!
//! The compiler is organized into:
//! - **Frontend** (`frontend/`): Lexing, parsing and semantic analysis
//! - **Driver** (`driver/`): Stage selection (scan, parse, inter)
//! - **Common** (`common/`): Shared infrastructure (errors, spans, reporting)

pub mod common;
pub mod frontend;
pub mod driver;

// Re-exports for convenience
pub use common::{CompileError, CompileResult, DiagnosticReporter, Span};
pub use frontend::{DecafFrontend, FrontendConfig};
pub use frontend::sema::{Diagnostic, ErrorKind, SemanticAnalyzer};
pub use driver::{Pipeline, Target};
