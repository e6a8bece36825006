//! Statement AST nodes

use super::{Expr, Ident, Location, MethodCall, VarDecl};
use crate::common::Span;

/// Block: `{ var_decl* statement* }`
#[derive(Debug, Clone)]
pub struct Block {
    pub var_decls: Vec<VarDecl>,
    pub statements: Vec<Stmt>,
    pub span: Span,
    /// Span of the closing `}`
    pub close_span: Span,
}

/// Statement node
#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Statement kinds
#[derive(Debug, Clone)]
pub enum StmtKind {
    /// Assignment: location op expr;
    Assign {
        location: Location,
        op: AssignOp,
        value: Expr,
    },

    /// Method call used as a statement
    Call(MethodCall),

    /// If statement: if (cond) block [else block]
    If {
        condition: Expr,
        then_block: Block,
        else_block: Option<Block>,
    },

    /// For loop: for id = start, end block
    For {
        var: Ident,
        start: Expr,
        end: Expr,
        body: Block,
    },

    /// Return statement: return [expr];
    Return(Option<Expr>),

    Break,

    Continue,

    /// Nested block
    Block(Block),
}

/// Assignment operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
}

impl AssignOp {
    /// `+=` and `-=` require both sides to be int
    pub fn is_compound(self) -> bool {
        matches!(self, AssignOp::AddAssign | AssignOp::SubAssign)
    }
}

impl std::fmt::Display for AssignOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignOp::Assign => write!(f, "="),
            AssignOp::AddAssign => write!(f, "+="),
            AssignOp::SubAssign => write!(f, "-="),
        }
    }
}
