//! Semantic types

use std::fmt;

use crate::frontend::ast::ValueType;

/// Type tag carried by every symbol and inferred for every expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Int,
    Boolean,
    /// Array of int; the declared length is validated once and not kept
    IntArray,
    Void,
    Method {
        return_type: Box<Type>,
        params: Vec<Type>,
    },
    /// Type of a name that did not resolve. Matches every other type, so the
    /// unresolved name is the only thing reported.
    Unknown,
}

impl Type {
    pub fn method(return_type: Type, params: Vec<Type>) -> Self {
        Type::Method {
            return_type: Box::new(return_type),
            params,
        }
    }

    /// Type equality, with `Unknown` compatible with anything
    pub fn matches(&self, other: &Type) -> bool {
        matches!(self, Type::Unknown) || matches!(other, Type::Unknown) || self == other
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    /// Type read from `name[i]` when `name` has this type.
    ///
    /// Element types are not stored: an int array yields int and anything
    /// else is taken to be boolean.
    pub fn element(&self) -> Type {
        match self {
            Type::IntArray => Type::Int,
            Type::Unknown => Type::Unknown,
            _ => Type::Boolean,
        }
    }
}

impl From<ValueType> for Type {
    fn from(ty: ValueType) -> Self {
        match ty {
            ValueType::Int => Type::Int,
            ValueType::Boolean => Type::Boolean,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Boolean => write!(f, "boolean"),
            Type::IntArray => write!(f, "int[]"),
            Type::Void => write!(f, "void"),
            Type::Method { return_type, params } => {
                f.write_str("method(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ") -> {}", return_type)
            }
            Type::Unknown => write!(f, "unknown"),
        }
    }
}
