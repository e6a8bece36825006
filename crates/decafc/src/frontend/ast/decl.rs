//! Declaration AST nodes

use super::{Block, Ident, ValueType};
use crate::common::Span;

/// Field declaration group: `int a, b[10];`
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub ty: ValueType,
    pub names: Vec<FieldName>,
    pub span: Span,
}

/// One declarator inside a field group
#[derive(Debug, Clone)]
pub struct FieldName {
    pub name: Ident,
    /// Literal length text for array fields, e.g. `10` or `0x0A`
    pub array_len: Option<String>,
    pub span: Span,
}

impl FieldName {
    pub fn is_array(&self) -> bool {
        self.array_len.is_some()
    }
}

/// Method declaration with its body
#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub name: Ident,
    /// `None` for `void` methods
    pub return_type: Option<ValueType>,
    pub params: Vec<Param>,
    pub body: Block,
    pub span: Span,
}

/// Method parameter
#[derive(Debug, Clone)]
pub struct Param {
    pub ty: ValueType,
    pub name: Ident,
    pub span: Span,
}

/// Local variable declaration group at the top of a block: `int i, j;`
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub ty: ValueType,
    pub names: Vec<Ident>,
    pub span: Span,
}
