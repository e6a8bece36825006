//! Semantic analysis module
//!
//! This module resolves names against nested scopes and type checks every
//! statement and expression, collecting diagnostics.

mod analyzer;
mod diagnostic;
mod scope;
mod symbol;
mod types;

pub use analyzer::SemanticAnalyzer;
pub use diagnostic::{Diagnostic, ErrorKind};
pub use scope::{DuplicateDeclaration, ScopeId, Scopes};
pub use symbol::{Symbol, array_length, parse_int_literal};
pub use types::Type;
