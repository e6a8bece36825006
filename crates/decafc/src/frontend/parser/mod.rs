//! Parser module producing the Decaf AST

#[allow(clippy::module_inception)]
mod parser;

pub use parser::Parser;
