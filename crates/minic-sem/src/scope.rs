//! Lexical scope tracking for semantic analysis.
//!
//! Modeled on `faxc-sem/src/scope.rs`'s enter/exit/resolve interface, but
//! simplified from its parent-linked `IndexVec<RibId, Rib>` to a plain
//! `Vec` stack: MiniC's scoping is strictly push/pop (no later code ever
//! needs to address a rib that has already been exited), so there is
//! nothing for a `RibId` handle to buy here.
//!
//! The original implementation (`MiniC/semantic.py`) snapshots the symbol
//! table with `dict(symtab)` whenever it descends into a `Block`, and
//! shares the table directly for a single, non-`Block` statement body (an
//! `if`/`while`/`for` whose body is one bare statement rather than `{ ... }`).
//! Pushing a new scope only for `Block` bodies reproduces exactly that
//! asymmetry: a declaration inside a pushed scope is discarded on `pop`,
//! while a declaration inside a shared (non-pushed) scope mutates the
//! enclosing one and is visible after the `if`/`while`/`for` returns.

use minic_par::ast::TypeName;
use minic_util::{FxHashMap, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Var,
    Func,
}

#[derive(Debug, Clone, Copy)]
pub struct SymbolInfo {
    pub typ: TypeName,
    pub kind: SymbolKind,
}

/// A stack of symbol tables, innermost last.
pub struct ScopeTree {
    scopes: Vec<FxHashMap<Symbol, SymbolInfo>>,
}

impl ScopeTree {
    pub fn new() -> Self {
        Self { scopes: vec![FxHashMap::default()] }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    pub fn pop_scope(&mut self) {
        self.scopes.pop();
        debug_assert!(!self.scopes.is_empty(), "popped the outermost scope");
    }

    /// Declares `name` in the innermost scope. Fails if `name` is already
    /// visible anywhere in the chain — MiniC has no shadowing (spec
    /// Invariant 1: unique names within any lexical scope, where "a lexical
    /// scope" includes everything inherited from its enclosing scopes).
    pub fn declare(&mut self, name: Symbol, info: SymbolInfo) -> Result<(), ()> {
        if self.resolve(name).is_some() {
            return Err(());
        }
        self.scopes.last_mut().expect("at least one scope").insert(name, info);
        Ok(())
    }

    pub fn resolve(&self, name: Symbol) -> Option<SymbolInfo> {
        self.scopes.iter().rev().find_map(|scope| scope.get(&name).copied())
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(n: u32) -> Symbol {
        // Symbols are opaque outside minic-util; tests only need distinct
        // values that compare equal to themselves.
        let mut interner = minic_util::Interner::new();
        for i in 0..=n {
            interner.intern(&format!("v{i}"));
        }
        interner.intern(&format!("v{n}"))
    }

    #[test]
    fn block_scope_declarations_do_not_leak_after_pop() {
        let mut tree = ScopeTree::new();
        let x = sym(0);
        tree.push_scope();
        tree.declare(x, SymbolInfo { typ: TypeName::Int, kind: SymbolKind::Var }).unwrap();
        assert!(tree.resolve(x).is_some());
        tree.pop_scope();
        assert!(tree.resolve(x).is_none());
    }

    #[test]
    fn declaring_into_a_shared_non_pushed_scope_leaks_to_the_caller() {
        let mut tree = ScopeTree::new();
        let y = sym(1);
        // No push_scope() here: this models a single-statement if/while/for
        // body, which shares the enclosing scope directly.
        tree.declare(y, SymbolInfo { typ: TypeName::Int, kind: SymbolKind::Var }).unwrap();
        assert!(tree.resolve(y).is_some());
    }

    #[test]
    fn redeclaring_a_name_visible_from_an_outer_scope_is_rejected() {
        let mut tree = ScopeTree::new();
        let z = sym(2);
        tree.declare(z, SymbolInfo { typ: TypeName::Int, kind: SymbolKind::Var }).unwrap();
        tree.push_scope();
        let err = tree.declare(z, SymbolInfo { typ: TypeName::Float, kind: SymbolKind::Var });
        assert!(err.is_err());
    }
}
