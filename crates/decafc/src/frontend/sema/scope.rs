//! Symbol table and scope management
//!
//! Scopes live in an arena and refer to their enclosing scope by index. The
//! analyzer enters and leaves them in strict LIFO order, so leaving a scope
//! simply moves `current` back to its parent.

use std::collections::HashMap;

use thiserror::Error;
use tracing::trace;

use super::symbol::Symbol;
use crate::common::Span;

/// Index of a scope in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

impl ScopeId {
    /// The program scope holding every field and method
    pub const ROOT: ScopeId = ScopeId(0);
}

/// Declaration rejected because the name is already visible
#[derive(Error, Debug, Clone, PartialEq)]
#[error("'{name}' is already declared on line {}", previous.line)]
pub struct DuplicateDeclaration {
    pub name: String,
    /// Where the visible binding was declared
    pub previous: Span,
}

/// A single scope's bindings
#[derive(Debug, Default)]
struct Scope {
    bindings: HashMap<String, Symbol>,
    parent: Option<ScopeId>,
}

/// Arena of scopes plus the innermost active one
#[derive(Debug)]
pub struct Scopes {
    arena: Vec<Scope>,
    current: ScopeId,
}

impl Scopes {
    /// Start with only the root scope active
    pub fn new() -> Self {
        Self {
            arena: vec![Scope::default()],
            current: ScopeId::ROOT,
        }
    }

    /// Create an empty scope chained to `parent`
    pub fn create(&mut self, parent: Option<ScopeId>) -> ScopeId {
        let id = ScopeId(self.arena.len());
        self.arena.push(Scope {
            bindings: HashMap::new(),
            parent,
        });
        id
    }

    /// Enter a new scope nested in the current one
    pub fn push(&mut self) -> ScopeId {
        let id = self.create(Some(self.current));
        self.current = id;
        trace!(scope = id.0, depth = self.depth(), "push scope");
        id
    }

    /// Leave the current scope and discard its bindings.
    ///
    /// Returns `None` at the root, which is never popped.
    pub fn pop(&mut self) -> Option<ScopeId> {
        let id = self.current;
        let parent = self.arena[id.0].parent?;
        self.current = parent;
        if id.0 + 1 == self.arena.len() {
            self.arena.pop();
        }
        trace!(scope = id.0, depth = self.depth(), "pop scope");
        Some(id)
    }

    pub fn root(&self) -> ScopeId {
        ScopeId::ROOT
    }

    pub fn current(&self) -> ScopeId {
        self.current
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.arena[scope.0].parent
    }

    /// Number of scopes on the active chain, root included
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut next = self.parent(self.current);
        while let Some(id) = next {
            depth += 1;
            next = self.parent(id);
        }
        depth
    }

    /// Bind `symbol` in `scope`.
    ///
    /// Fails if the name is visible anywhere on the chain from `scope`;
    /// shadowing an enclosing declaration is not allowed. The existing
    /// binding is left untouched.
    pub fn declare(&mut self, scope: ScopeId, symbol: Symbol) -> Result<(), DuplicateDeclaration> {
        if let Some(existing) = self.lookup(scope, &symbol.name) {
            return Err(DuplicateDeclaration {
                name: symbol.name,
                previous: existing.span,
            });
        }
        trace!(scope = scope.0, name = %symbol.name, ty = %symbol.ty, "declare");
        self.arena[scope.0].bindings.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    /// Nearest binding of `name`, searching from `scope` out to the root
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&Symbol> {
        let mut next = Some(scope);
        while let Some(id) = next {
            let scope = &self.arena[id.0];
            if let Some(sym) = scope.bindings.get(name) {
                return Some(sym);
            }
            next = scope.parent;
        }
        None
    }

    /// Binding of `name` in `scope` itself, ignoring enclosing scopes
    pub fn lookup_local(&self, scope: ScopeId, name: &str) -> Option<&Symbol> {
        self.arena[scope.0].bindings.get(name)
    }

    /// Declare in the current scope
    pub fn declare_current(&mut self, symbol: Symbol) -> Result<(), DuplicateDeclaration> {
        self.declare(self.current, symbol)
    }

    /// Look up from the current scope
    pub fn resolve(&self, name: &str) -> Option<&Symbol> {
        self.lookup(self.current, name)
    }
}

impl Default for Scopes {
    fn default() -> Self {
        Self::new()
    }
}
