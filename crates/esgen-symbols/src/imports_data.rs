//! Raw import-table data.
//!
//! This crate only aggregates *what* is imported from *where*; rendering
//! the ES-module `import { ... } from "m";` / IIFE
//! `const { ... } = await import("m");` text is the `esgen` crate's job
//! (it alone knows the bundle's `BundleFormat`).
//!
//! Module identity is an opaque caller-provided string key so that two
//! imports of the same module - regardless of how many distinct export
//! names are pulled from it - coalesce into one record. `IndexMap` keeps
//! modules and, within a module, entries in
//! first-referenced order, the same `indexmap`-for-stable-iteration
//! convention used throughout this workspace.

use indexmap::IndexMap;

use crate::ids::SymbolId;

/// One imported binding: `import { export_name as ... } from module`.
#[derive(Debug, Clone)]
pub struct ImportEntry {
    pub symbol: SymbolId,
    pub export_name: String,
}

/// All imports registered on a bundle, grouped by module identity.
#[derive(Debug, Clone, Default)]
pub struct ImportsTable {
    modules: IndexMap<String, Vec<ImportEntry>>,
}

impl ImportsTable {
    /// Register `symbol` as importing `export_name` from `module_key`.
    /// A symbol already registered under this module is not registered
    /// twice (first reference wins).
    pub fn register(
        &mut self,
        module_key: impl Into<String>,
        symbol: SymbolId,
        export_name: impl Into<String>,
    ) {
        let entries = self.modules.entry(module_key.into()).or_default();
        if !entries.iter().any(|e| e.symbol == symbol) {
            entries.push(ImportEntry {
                symbol,
                export_name: export_name.into(),
            });
        }
    }

    /// Iterate modules in first-reference order, each with its entries in
    /// first-reference order.
    pub fn modules(&self) -> impl Iterator<Item = (&str, &[ImportEntry])> {
        self.modules.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_imports_from_the_same_module_coalesce() {
        let mut table = ImportsTable::default();
        table.register("test-module", SymbolId(0), "test1");
        table.register("test-module", SymbolId(1), "test2");
        let modules: Vec<_> = table.modules().collect();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].1.len(), 2);
    }

    #[test]
    fn distinct_modules_stay_separate() {
        let mut table = ImportsTable::default();
        table.register("m1", SymbolId(0), "test");
        table.register("m2", SymbolId(1), "test");
        assert_eq!(table.modules().count(), 2);
    }

    #[test]
    fn re_registering_the_same_symbol_is_a_no_op() {
        let mut table = ImportsTable::default();
        table.register("m", SymbolId(0), "a");
        table.register("m", SymbolId(0), "a");
        assert_eq!(table.modules().next().unwrap().1.len(), 1);
    }
}
