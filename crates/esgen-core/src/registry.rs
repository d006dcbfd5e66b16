//! Hierarchical unique-name allocator.
//!
//! A `NameRegistry` tree mirrors the namespace tree: each registry may have
//! an enclosing parent, and `reserve_name` guarantees the returned name is
//! globally unique across the whole registry tree - nothing is ever
//! released, even after the reserving scope is emitted. Every reservation
//! bubbles all the way to the root, which is where the final `$0`, `$1`, ...
//! suffix is actually assigned; intermediate registries just mirror the
//! result locally so that a *direct* reservation of the same text later, in
//! that same registry, correctly detects the conflict too.
//!
//! A literal reading of "if the preferred name is already taken for a
//! nested request, return the cached nested name" would let two unrelated
//! symbols in unrelated namespaces collide on one cached name the moment
//! they share a requested seed. Global-uniqueness-via-root (documented in
//! `DESIGN.md`) is the reading that keeps the naming-uniqueness guarantee
//! true without exceptions.
//!
//! Registries are `Rc<RefCell<...>>`-linked rather than tree-owned, matching
//! the rest of this workspace's single-threaded arena-with-shared-handles
//! style (see `esgen_symbols::scope`): a registry's enclosing registry is a
//! long-lived shared object, not a value this registry could own outright.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct NameRegistry {
    parent: Option<Rc<RefCell<NameRegistry>>>,
    /// Seed text -> every concrete name that has been handed out for it
    /// from this registry (the seed itself, plus any `$n`-suffixed aliases).
    taken: FxHashMap<String, Vec<String>>,
}

impl NameRegistry {
    /// Create a fresh root registry.
    #[must_use]
    pub fn new_root() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Create a registry nested under `parent`.
    #[must_use]
    pub fn new_child(parent: &Rc<RefCell<NameRegistry>>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            parent: Some(Rc::clone(parent)),
            taken: FxHashMap::default(),
        }))
    }

    /// Reserve `preferred`, returning the concrete name assigned.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn reserve_name(&mut self, preferred: &str) -> String {
        let assigned = match &self.parent {
            Some(parent) => parent.borrow_mut().reserve_name(preferred),
            None => self.allocate_at_root(preferred),
        };
        if assigned != preferred {
            tracing::debug!(preferred, assigned, "name conflict resolved with suffix");
        }
        self.record_taken(preferred, &assigned);
        assigned
    }

    fn is_taken(&self, name: &str) -> bool {
        self.taken.values().any(|aliases| aliases.iter().any(|a| a == name))
            || self.taken.contains_key(name)
    }

    fn allocate_at_root(&self, preferred: &str) -> String {
        if !self.is_taken(preferred) {
            return preferred.to_string();
        }
        let (stem, mut n) = split_suffix(preferred);
        loop {
            let candidate = format!("{stem}${n}");
            if !self.is_taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    fn record_taken(&mut self, preferred: &str, assigned: &str) {
        let aliases = self.taken.entry(preferred.to_string()).or_default();
        if !aliases.iter().any(|a| a == assigned) {
            aliases.push(assigned.to_string());
        }
    }

    /// Names directly reserved in this registry (including alias suffixes).
    /// Exposed for tests that assert pairwise distinctness.
    #[must_use]
    pub fn reserved_names(&self) -> Vec<String> {
        self.taken.values().flatten().cloned().collect()
    }
}

/// Split a trailing `$<digits>` suffix off `name`, returning `(stem, next_n)`
/// where `next_n` is one past the parsed suffix (or `0` if there was none).
fn split_suffix(name: &str) -> (&str, u32) {
    if let Some(dollar) = name.rfind('$') {
        let digits = &name[dollar + 1..];
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = digits.parse::<u32>() {
                return (&name[..dollar], n + 1);
            }
        }
    }
    (name, 0)
}

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod tests;
