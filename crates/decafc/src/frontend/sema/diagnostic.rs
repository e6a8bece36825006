//! Semantic diagnostics
//!
//! Diagnostics are plain data collected during analysis. They never stop the
//! walk; rendering is left to the caller (see `DiagnosticReporter`).

use std::fmt;

use crate::common::Span;

/// Kinds of semantic error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DuplicateDeclaration,
    UndeclaredVariable,
    UndeclaredMethod,
    InvalidArraySize,
    AssignmentTypeMismatch,
    CompoundAssignmentTypeMismatch,
    ArrayIndexTypeMismatch,
    NestedArrayAssignment,
    ArithmeticTypeMismatch,
    RelationalTypeMismatch,
    ConditionalTypeMismatch,
    EqualityTypeMismatch,
    ReturnTypeMismatch,
    ReturnFromVoid,
    MissingReturn,
    MissingMain,
    ConditionNotBoolean,
    LoopBoundTypeMismatch,
    ArityMismatch,
    ArgumentTypeMismatch,
}

impl ErrorKind {
    /// Stable code shown by the pretty renderer
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::DuplicateDeclaration => "E0001",
            ErrorKind::UndeclaredVariable => "E0002",
            ErrorKind::UndeclaredMethod => "E0003",
            ErrorKind::InvalidArraySize => "E0004",
            ErrorKind::AssignmentTypeMismatch => "E0005",
            ErrorKind::CompoundAssignmentTypeMismatch => "E0006",
            ErrorKind::ArrayIndexTypeMismatch => "E0007",
            ErrorKind::NestedArrayAssignment => "E0008",
            ErrorKind::ArithmeticTypeMismatch => "E0009",
            ErrorKind::RelationalTypeMismatch => "E0010",
            ErrorKind::ConditionalTypeMismatch => "E0011",
            ErrorKind::EqualityTypeMismatch => "E0012",
            ErrorKind::ReturnTypeMismatch => "E0013",
            ErrorKind::ReturnFromVoid => "E0014",
            ErrorKind::MissingReturn => "E0015",
            ErrorKind::MissingMain => "E0016",
            ErrorKind::ConditionNotBoolean => "E0017",
            ErrorKind::LoopBoundTypeMismatch => "E0018",
            ErrorKind::ArityMismatch => "E0019",
            ErrorKind::ArgumentTypeMismatch => "E0020",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ErrorKind::DuplicateDeclaration => "duplicate declaration",
            ErrorKind::UndeclaredVariable => "undeclared variable",
            ErrorKind::UndeclaredMethod => "undeclared method",
            ErrorKind::InvalidArraySize => "invalid array size",
            ErrorKind::AssignmentTypeMismatch => "assignment type mismatch",
            ErrorKind::CompoundAssignmentTypeMismatch => "compound assignment type mismatch",
            ErrorKind::ArrayIndexTypeMismatch => "array index type mismatch",
            ErrorKind::NestedArrayAssignment => "nested array assignment",
            ErrorKind::ArithmeticTypeMismatch => "arithmetic type mismatch",
            ErrorKind::RelationalTypeMismatch => "relational type mismatch",
            ErrorKind::ConditionalTypeMismatch => "conditional type mismatch",
            ErrorKind::EqualityTypeMismatch => "equality type mismatch",
            ErrorKind::ReturnTypeMismatch => "return type mismatch",
            ErrorKind::ReturnFromVoid => "return value from void method",
            ErrorKind::MissingReturn => "missing return",
            ErrorKind::MissingMain => "missing main method",
            ErrorKind::ConditionNotBoolean => "condition is not boolean",
            ErrorKind::LoopBoundTypeMismatch => "loop bound type mismatch",
            ErrorKind::ArityMismatch => "wrong number of arguments",
            ErrorKind::ArgumentTypeMismatch => "argument type mismatch",
        };
        f.write_str(text)
    }
}

/// One reported semantic error
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub line: u32,
    pub kind: ErrorKind,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            line: span.line,
            kind,
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error line: {}. {}", self.line, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_reference_format() {
        let diag = Diagnostic::new(
            ErrorKind::MissingMain,
            "No method named 'main' declared",
            Span::new(40, 41, 7),
        );
        assert_eq!(diag.line, 7);
        assert_eq!(diag.to_string(), "Error line: 7. No method named 'main' declared");
    }

    #[test]
    fn test_codes_are_unique() {
        let kinds = [
            ErrorKind::DuplicateDeclaration,
            ErrorKind::UndeclaredVariable,
            ErrorKind::UndeclaredMethod,
            ErrorKind::InvalidArraySize,
            ErrorKind::AssignmentTypeMismatch,
            ErrorKind::CompoundAssignmentTypeMismatch,
            ErrorKind::ArrayIndexTypeMismatch,
            ErrorKind::NestedArrayAssignment,
            ErrorKind::ArithmeticTypeMismatch,
            ErrorKind::RelationalTypeMismatch,
            ErrorKind::ConditionalTypeMismatch,
            ErrorKind::EqualityTypeMismatch,
            ErrorKind::ReturnTypeMismatch,
            ErrorKind::ReturnFromVoid,
            ErrorKind::MissingReturn,
            ErrorKind::MissingMain,
            ErrorKind::ConditionNotBoolean,
            ErrorKind::LoopBoundTypeMismatch,
            ErrorKind::ArityMismatch,
            ErrorKind::ArgumentTypeMismatch,
        ];
        let codes: HashSet<_> = kinds.iter().map(|k| k.code()).collect();
        assert_eq!(codes.len(), kinds.len());
    }
}
