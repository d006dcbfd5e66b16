//! Raw declaration-table data and dependency ordering.
//!
//! Like `imports_data`, this crate only holds the graph: which symbol a
//! declaration names, which other symbols its body references, whether it
//! is exported, and where it is placed. Turning that into `export`/
//! `return {...}` text is the `esgen` crate's job. The dependency-DFS
//! ordering algorithm itself, though, is pure graph data and belongs here.
//!
//! Under this workspace's two-phase synchronous emission model, every
//! declaration is registered during pass 1 before pass 2 renders anything,
//! so there is nothing to eagerly flush mid-emission - `drain_in_order`
//! always sees the complete graph.

use rustc_hash::FxHashSet;

use esgen_core::{EsgenError, EsgenResult};
use indexmap::IndexMap;

use crate::fragment::CodeFragment;
use crate::ids::{ScopeId, SymbolId};

/// Where a declaration is placed when printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Nearest enclosing function-or-bundle scope.
    Bundle,
    /// Bundle root, with an export marker.
    Exports,
}

/// One declaration: a symbol, the code that realizes it, what it depends
/// on, and whether/where it is exported.
pub struct DeclarationRecord {
    pub symbol: SymbolId,
    pub refs: Vec<SymbolId>,
    pub exported: bool,
    pub placement: Placement,
    /// The `function_or_bundle` scope this declaration hoists to. Most
    /// declarations target the bundle root; a declaration built while
    /// composing a nested function body targets that function's own scope
    /// instead.
    pub scope: ScopeId,
    pub snippet: CodeFragment,
}

/// All declarations registered on a bundle, in first-registered order
/// until `drain_in_order` consumes them in dependency-topological order.
#[derive(Default)]
pub struct DeclarationsTable {
    entries: IndexMap<SymbolId, DeclarationRecord>,
    drained: bool,
}

impl DeclarationsTable {
    /// Register (or replace) a declaration for `record.symbol`.
    pub fn declare(&mut self, record: DeclarationRecord) -> EsgenResult<()> {
        if self.drained {
            return Err(EsgenError::DeclarationsAlreadyPrinted);
        }
        self.entries.insert(record.symbol, record);
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dependency-topological order via recursive post-order DFS, keyed by
    /// each declaration's `refs`. A symbol referenced mid-cycle is skipped
    /// on revisit, so it appears exactly once, at the position the walk
    /// first reaches it.
    fn topological_order(&self) -> Vec<SymbolId> {
        let mut visited = FxHashSet::default();
        let mut visiting = FxHashSet::default();
        let mut order = Vec::with_capacity(self.entries.len());
        let roots: Vec<SymbolId> = self.entries.keys().copied().collect();
        for symbol in roots {
            self.visit(symbol, &mut visited, &mut visiting, &mut order);
        }
        order
    }

    fn visit(
        &self,
        symbol: SymbolId,
        visited: &mut FxHashSet<SymbolId>,
        visiting: &mut FxHashSet<SymbolId>,
        order: &mut Vec<SymbolId>,
    ) {
        if visited.contains(&symbol) || visiting.contains(&symbol) {
            return;
        }
        let Some(entry) = self.entries.get(&symbol) else {
            return;
        };
        visiting.insert(symbol);
        for &dep in &entry.refs {
            self.visit(dep, visited, visiting, order);
        }
        visiting.remove(&symbol);
        visited.insert(symbol);
        order.push(symbol);
    }

    /// Consume every declaration in dependency-topological order. Fails if
    /// already drained once; a later `declare` call also then fails.
    ///
    /// Intended as the *final* pass, called once all nested-scope
    /// declarations have already been pulled out via `take_for_scope` - by
    /// that point only bundle-root-targeted entries remain, but this simply
    /// drains whatever is left, in dependency order.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn drain_in_order(&mut self) -> EsgenResult<Vec<DeclarationRecord>> {
        if self.drained {
            return Err(EsgenError::DeclarationsAlreadyPrinted);
        }
        self.drained = true;
        let order = self.topological_order();
        Ok(order
            .into_iter()
            .filter_map(|id| self.entries.shift_remove(&id))
            .collect())
    }

    /// Pull out every still-registered declaration targeting `scope`, in
    /// dependency-topological order relative to the *whole* remaining
    /// graph (so cross-scope refs still order correctly), leaving entries
    /// for other scopes untouched. Used to eagerly hoist a nested
    /// function's own helper declarations to the top of its body at the
    /// point that body is being composed, without needing the single
    /// `drained` flag this table otherwise enforces for the final pass.
    pub fn take_for_scope(&mut self, scope: ScopeId) -> Vec<DeclarationRecord> {
        let order = self.topological_order();
        let matching: Vec<SymbolId> = order
            .into_iter()
            .filter(|id| self.entries.get(id).is_some_and(|e| e.scope == scope))
            .collect();
        matching
            .into_iter()
            .filter_map(|id| self.entries.shift_remove(&id))
            .collect()
    }
}
