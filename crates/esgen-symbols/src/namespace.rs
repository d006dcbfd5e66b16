//! Namespaces and the symbol-naming protocol.
//!
//! Naming is lazy: `add_symbol` only records that a symbol belongs to this
//! namespace; the underlying `esgen_core::NameRegistry` is consulted the
//! first time a `Resolution` actually asks for the name, and the result is
//! cached. Visibility is ancestor-walk based: a naming made in namespace
//! `N` is visible to `N` and to every namespace reached by `nest`ing from
//! `N`, and every namespace reachable by descending nest links from `N`.

use std::cell::RefCell;
use std::rc::Rc;

use esgen_core::{EsgenError, EsgenResult, NameRegistry};
use rustc_hash::FxHashMap;

use crate::fragment::CodeFragment;
use crate::ids::{NamespaceId, SymbolId};
use crate::scope::BundleData;
use crate::symbol::Symbol;

pub(crate) struct NamespaceData {
    pub(crate) parent: Option<NamespaceId>,
    pub(crate) registry: Rc<RefCell<NameRegistry>>,
    /// `None` once added but not yet named; `Some` once a concrete name has
    /// been reserved and cached.
    pub(crate) local_namings: FxHashMap<SymbolId, Option<String>>,
}

impl NamespaceData {
    pub(crate) fn new_root(registry: Rc<RefCell<NameRegistry>>) -> Self {
        Self {
            parent: None,
            registry,
            local_namings: FxHashMap::default(),
        }
    }
}

/// A nested visibility scope for symbols, owning its own name registry.
#[derive(Clone)]
pub struct Namespace {
    pub(crate) bundle: Rc<RefCell<BundleData>>,
    pub(crate) id: NamespaceId,
}

impl Namespace {
    #[must_use]
    pub fn id(&self) -> NamespaceId {
        self.id
    }

    fn label(&self) -> String {
        if self.id.index() == 0 {
            "bundle root namespace".to_string()
        } else {
            format!("namespace#{}", self.id.0)
        }
    }

    /// Create a namespace nested under this one; its registry is nested
    /// under this namespace's own, so the nested registry's names never
    /// collide with the parent's.
    #[must_use]
    pub fn nest(&self) -> Namespace {
        let parent_registry = Rc::clone(&self.bundle.borrow().namespaces[self.id.index()].registry);
        let child_registry = NameRegistry::new_child(&parent_registry);
        let mut data = self.bundle.borrow_mut();
        let id = NamespaceId(data.namespaces.len() as u32);
        data.namespaces.push(NamespaceData {
            parent: Some(self.id),
            registry: child_registry,
            local_namings: FxHashMap::default(),
        });
        Namespace {
            bundle: Rc::clone(&self.bundle),
            id,
        }
    }

    /// Declare `symbol` in this namespace.
    ///
    /// Unique symbols may be declared in at most one namespace bundle-wide;
    /// a second declaration anywhere else fails with `AlreadyNamed`.
    /// Non-unique symbols may be declared independently in any number of
    /// unrelated namespaces, each getting its own concrete name.
    pub fn add_symbol(&self, symbol: &Symbol) -> EsgenResult<()> {
        let symbol_id = symbol.id();
        if symbol.is_unique() {
            let mut data = self.bundle.borrow_mut();
            if let Some(&existing) = data.unique_namings.get(&symbol_id) {
                if existing != self.id {
                    let existing_label = Namespace {
                        bundle: Rc::clone(&self.bundle),
                        id: existing,
                    }
                    .label();
                    return Err(EsgenError::AlreadyNamed(symbol.requested_name(), existing_label));
                }
            } else {
                data.unique_namings.insert(symbol_id, self.id);
            }
        }
        let mut data = self.bundle.borrow_mut();
        data.any_naming.insert(symbol_id, self.id);
        data.namespaces[self.id.index()]
            .local_namings
            .entry(symbol_id)
            .or_insert(None);
        Ok(())
    }

    /// Resolve `symbol`'s naming as seen from this namespace.
    #[must_use]
    pub fn refer(&self, symbol: &Symbol) -> Resolution {
        Resolution {
            namespace: self.clone(),
            symbol: symbol.clone(),
        }
    }

    /// Synchronous lookup without going through a `Resolution` - used by
    /// callers (e.g. visibility-monotonicity tests) that just want to know
    /// whether `symbol` is visible here at all.
    pub fn find_symbol(&self, symbol: &Symbol) -> Option<String> {
        self.refer(symbol).get_naming().ok()
    }
}

impl std::fmt::Debug for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Namespace").field("id", &self.id).finish()
    }
}

impl PartialEq for Namespace {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Rc::ptr_eq(&self.bundle, &other.bundle)
    }
}

impl Eq for Namespace {}

/// The result of `Namespace::refer`: three ways to access a symbol's
/// naming.
pub struct Resolution {
    namespace: Namespace,
    symbol: Symbol,
}

impl Resolution {
    /// Synchronous naming lookup. Fails with `Unnamed` if the symbol has
    /// not been added to any namespace yet, or `Invisible` if it has been
    /// named somewhere this namespace cannot see.
    pub fn get_naming(&self) -> EsgenResult<String> {
        let mut cursor = Some(self.namespace.id);
        while let Some(ns_id) = cursor {
            let already_named = {
                let data = self.namespace.bundle.borrow();
                data.namespaces[ns_id.index()]
                    .local_namings
                    .get(&self.symbol.id())
                    .cloned()
            };
            match already_named {
                Some(Some(name)) => return Ok(name),
                Some(None) => {
                    let mut data = self.namespace.bundle.borrow_mut();
                    let requested = data.symbols[self.symbol.id().index()].requested_name.clone();
                    let name = data.namespaces[ns_id.index()]
                        .registry
                        .borrow_mut()
                        .reserve_name(&requested);
                    data.namespaces[ns_id.index()]
                        .local_namings
                        .insert(self.symbol.id(), Some(name.clone()));
                    return Ok(name);
                }
                None => {
                    cursor = self.namespace.bundle.borrow().namespaces[ns_id.index()].parent;
                }
            }
        }

        let data = self.namespace.bundle.borrow();
        if let Some(&naming_ns) = data.any_naming.get(&self.symbol.id()) {
            let naming_label = Namespace {
                bundle: Rc::clone(&self.namespace.bundle),
                id: naming_ns,
            }
            .label();
            Err(EsgenError::Invisible {
                symbol: self.symbol.requested_name(),
                referring_ns: self.namespace.label(),
                naming_ns: naming_label,
            })
        } else {
            Err(EsgenError::Unnamed(self.symbol.requested_name()))
        }
    }

    /// Under an async forward-reference model this would wait (typically
    /// two ticks: microtask then macrotask) for a forward-declared symbol
    /// to be named. This workspace's two-phase synchronous emission model
    /// names every reachable symbol during pass 1 before any reference is
    /// resolved in pass 2, so by the time `when_named` can be called there
    /// is nothing left to wait for: it is exactly `get_naming`.
    pub fn when_named(&self) -> EsgenResult<String> {
        self.get_naming()
    }

    #[must_use]
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Resolve and write the symbol's name into `fragment`; the destination
    /// is the fragment the caller is already composing, which is always
    /// owned by some scope.
    pub fn emit_into(&self, fragment: &CodeFragment) -> EsgenResult<()> {
        let name = self.get_naming()?;
        fragment.write(name)
    }
}
