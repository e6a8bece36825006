//! Symbols recorded for declarations

use super::types::Type;
use crate::common::Span;

/// A declared field, local, parameter or method
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub ty: Type,
    /// Where the name was declared
    pub span: Span,
}

impl Symbol {
    pub fn new(name: impl Into<String>, ty: Type, span: Span) -> Self {
        Self {
            name: name.into(),
            ty,
            span,
        }
    }

    /// Method symbol; `params` are in declaration order and never change afterwards
    pub fn method(name: impl Into<String>, return_type: Type, params: Vec<Type>, span: Span) -> Self {
        Self::new(name, Type::method(return_type, params), span)
    }

    /// Array symbol. Whatever the declared element type, arrays are int arrays.
    pub fn array(name: impl Into<String>, span: Span) -> Self {
        Self::new(name, Type::IntArray, span)
    }

    pub fn is_method(&self) -> bool {
        matches!(self.ty, Type::Method { .. })
    }
}

/// Value of an int literal written in decimal or `0x` hex.
///
/// Returns `None` when the text does not fit a 32-bit int.
pub fn parse_int_literal(text: &str) -> Option<i32> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => i32::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

/// Declared array length, if the literal is a valid positive int
pub fn array_length(text: &str) -> Option<i32> {
    parse_int_literal(text).filter(|&len| len > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_literal() {
        assert_eq!(parse_int_literal("42"), Some(42));
        assert_eq!(parse_int_literal("0x1F"), Some(31));
        assert_eq!(parse_int_literal("0"), Some(0));
        assert_eq!(parse_int_literal("2147483647"), Some(i32::MAX));
        assert_eq!(parse_int_literal("2147483648"), None);
        assert_eq!(parse_int_literal("0x"), None);
    }

    #[test]
    fn test_array_length_must_be_positive() {
        assert_eq!(array_length("10"), Some(10));
        assert_eq!(array_length("0x10"), Some(16));
        assert_eq!(array_length("0"), None);
        assert_eq!(array_length("0x0"), None);
        assert_eq!(array_length("99999999999"), None);
    }

    #[test]
    fn test_method_symbol_keeps_param_order() {
        let sym = Symbol::method("f", Type::Void, vec![Type::Boolean, Type::Int], Span::default());
        assert!(sym.is_method());
        assert_eq!(sym.ty, Type::method(Type::Void, vec![Type::Boolean, Type::Int]));
        assert!(!Symbol::array("a", Span::default()).is_method());
    }
}
