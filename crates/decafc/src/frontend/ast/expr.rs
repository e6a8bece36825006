//! Expression AST nodes
//!
//! Every node implements `Display`, producing the compact source text of the
//! expression (tokens joined without whitespace) used in diagnostics.

use std::fmt;

use super::Ident;
use crate::common::Span;

/// Expression node
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Expression kinds
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// Variable or array element: x, a[i]
    Location(Location),

    /// Method call or callout
    Call(MethodCall),

    Literal(Literal),

    /// Unary operation: -x, !flag
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    /// Binary operation: a + b, x < y
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Parenthesized expression: (e)
    Paren(Box<Expr>),
}

/// Assignable location: `x` or `a[expr]`
#[derive(Debug, Clone)]
pub struct Location {
    pub name: Ident,
    pub index: Option<Box<Expr>>,
    pub span: Span,
}

impl Location {
    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }
}

/// Literal values, integer and char literals keep their source text
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(String),
    Bool(bool),
    Char(String),
}

/// Method invocation
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub kind: CallKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum CallKind {
    /// Call of a method declared in the program: f(a, b)
    User { name: Ident, args: Vec<Expr> },

    /// Foreign call: callout("printf", "%d", x)
    Callout { name: String, args: Vec<CalloutArg> },
}

/// Argument passed to a callout
#[derive(Debug, Clone)]
pub enum CalloutArg {
    Expr(Expr),
    /// String literal, quotes included
    Str(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Mul,
    Div,
    Mod,
    Add,
    Sub,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    And,
    Or,
}

/// Operator families sharing one typing rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpClass {
    /// `* / %`
    StrongArith,
    /// `+ -`
    WeakArith,
    /// `< > <= >=`
    Relational,
    /// `== !=`
    Equality,
    /// `&& ||`
    Conditional,
}

impl BinaryOp {
    pub fn class(self) -> OpClass {
        match self {
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => OpClass::StrongArith,
            BinaryOp::Add | BinaryOp::Sub => OpClass::WeakArith,
            BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge => OpClass::Relational,
            BinaryOp::Eq | BinaryOp::Ne => OpClass::Equality,
            BinaryOp::And | BinaryOp::Or => OpClass::Conditional,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Location(loc) => write!(f, "{}", loc),
            ExprKind::Call(call) => write!(f, "{}", call),
            ExprKind::Literal(lit) => write!(f, "{}", lit),
            ExprKind::Unary { op, operand } => {
                let symbol = match op {
                    UnaryOp::Neg => "-",
                    UnaryOp::Not => "!",
                };
                write!(f, "{}{}", symbol, operand)
            }
            ExprKind::Binary { op, left, right } => {
                write!(f, "{}{}{}", left, op.symbol(), right)
            }
            ExprKind::Paren(inner) => write!(f, "({})", inner),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.index {
            Some(index) => write!(f, "{}[{}]", self.name, index),
            None => write!(f, "{}", self.name),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(text) | Literal::Char(text) => f.write_str(text),
            Literal::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl fmt::Display for MethodCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            CallKind::User { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            CallKind::Callout { name, args } => {
                write!(f, "callout({}", name)?;
                for arg in args {
                    match arg {
                        CalloutArg::Expr(e) => write!(f, ",{}", e)?,
                        CalloutArg::Str(s) => write!(f, ",{}", s)?,
                    }
                }
                f.write_str(")")
            }
        }
    }
}
