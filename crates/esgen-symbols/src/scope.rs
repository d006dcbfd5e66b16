//! Bundle arena and scope tree.
//!
//! `Bundle` owns every arena for a single generated program: scopes,
//! namespaces, symbols and code fragments. Everything else in this crate
//! (`Scope`, `Namespace`, `Symbol`, `CodeFragment`) is a cheap `Clone`
//! handle pairing an `Rc<RefCell<BundleData>>` with an integer id into one
//! of those arenas - see `ids` for why.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::rc::Rc;

use esgen_core::{EsgenError, EsgenResult, NameRegistry};
use rustc_hash::FxHashMap;

use crate::declarations_data::{DeclarationRecord, DeclarationsTable};
use crate::fragment::FragmentData;
use crate::ids::{FragmentId, NamespaceId, ScopeId, SymbolId};
use crate::imports_data::ImportsTable;
use crate::namespace::NamespaceData;
use crate::symbol::{SymbolData, SymbolKind};

/// Which kind of emission context a `Scope` represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// The bundle root. Exactly one per bundle.
    Bundle,
    /// A plain nested block; inherits async/generator flags from its parent.
    Block,
    /// A function body; carries its own async/generator flags.
    Function { is_async: bool, is_generator: bool },
}

impl ScopeKind {
    #[must_use]
    pub const fn is_function_or_bundle(self) -> bool {
        matches!(self, Self::Bundle | Self::Function { .. })
    }
}

/// Active -> Emitted, once only, per bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BundleState {
    Active,
    Emitted,
}

pub(crate) struct ScopeData {
    pub(crate) kind: ScopeKind,
    pub(crate) parent: Option<ScopeId>,
    pub(crate) function_or_bundle: ScopeId,
    pub(crate) namespace: NamespaceId,
    pub(crate) scoped_values: FxHashMap<TypeId, Rc<dyn Any>>,
}

/// Everything a bundle owns: its arenas, the root name registry, the
/// bundle-wide unique-symbol table, the imports/declarations tables, and
/// the active/emitted state machine.
pub(crate) struct BundleData {
    pub(crate) scopes: Vec<ScopeData>,
    pub(crate) namespaces: Vec<NamespaceData>,
    pub(crate) symbols: Vec<SymbolData>,
    pub(crate) fragments: Vec<FragmentData>,
    pub(crate) root_registry: Rc<RefCell<NameRegistry>>,
    /// Unique symbols may be named in at most one namespace bundle-wide.
    pub(crate) unique_namings: FxHashMap<SymbolId, NamespaceId>,
    /// Last namespace any `Symbol` (unique or not) was added to, kept only
    /// to produce a useful "named in ..." label for invisibility errors.
    pub(crate) any_naming: FxHashMap<SymbolId, NamespaceId>,
    pub(crate) imports: ImportsTable,
    pub(crate) declarations: DeclarationsTable,
    pub(crate) state: BundleState,
}

/// The root of one generated program: owns every scope, namespace, symbol
/// and fragment, plus the shared imports/declarations tables.
#[derive(Clone)]
pub struct Bundle {
    pub(crate) data: Rc<RefCell<BundleData>>,
}

impl Default for Bundle {
    fn default() -> Self {
        Self::new()
    }
}

impl Bundle {
    #[must_use]
    pub fn new() -> Self {
        let root_registry = NameRegistry::new_root();
        let root_namespace = NamespaceData::new_root(Rc::clone(&root_registry));
        let data = BundleData {
            scopes: Vec::new(),
            namespaces: vec![root_namespace],
            symbols: Vec::new(),
            fragments: Vec::new(),
            root_registry,
            unique_namings: FxHashMap::default(),
            any_naming: FxHashMap::default(),
            imports: ImportsTable::default(),
            declarations: DeclarationsTable::default(),
            state: BundleState::Active,
        };
        let bundle = Self {
            data: Rc::new(RefCell::new(data)),
        };
        let root_id = ScopeId(0);
        bundle.data.borrow_mut().scopes.push(ScopeData {
            kind: ScopeKind::Bundle,
            parent: None,
            function_or_bundle: root_id,
            namespace: NamespaceId(0),
            scoped_values: FxHashMap::default(),
        });
        bundle
    }

    #[must_use]
    pub fn root_scope(&self) -> Scope {
        Scope {
            bundle: Rc::clone(&self.data),
            id: ScopeId(0),
        }
    }

    #[must_use]
    pub fn root_namespace(&self) -> Namespace {
        Namespace {
            bundle: Rc::clone(&self.data),
            id: NamespaceId(0),
        }
    }

    /// Mark the bundle emitted. After this, `Scope::span` fails with
    /// `BundleAlreadyDone`; the two-phase emission driver (`esgen::generate`)
    /// is expected to call this once all user-facing construction is done
    /// and before walking the fragment tree.
    pub fn done(&self) {
        self.data.borrow_mut().state = BundleState::Emitted;
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self.data.borrow().state, BundleState::Emitted)
    }

    /// Register an import. Fails once the bundle is done, same as `span`.
    pub fn register_import(
        &self,
        module_key: impl Into<String>,
        symbol: &Symbol,
        export_name: impl Into<String>,
    ) -> EsgenResult<()> {
        let mut data = self.data.borrow_mut();
        if matches!(data.state, BundleState::Emitted) {
            return Err(EsgenError::BundleAlreadyDone);
        }
        data.imports.register(module_key, symbol.id(), export_name);
        Ok(())
    }

    /// Register a declaration. Fails once the bundle is done, or once the
    /// declarations subsystem has already been drained.
    pub fn declare(&self, record: DeclarationRecord) -> EsgenResult<()> {
        let mut data = self.data.borrow_mut();
        if matches!(data.state, BundleState::Emitted) {
            return Err(EsgenError::BundleAlreadyDone);
        }
        data.declarations.declare(record)
    }

    /// A read-only snapshot of the imports registered so far, for the
    /// rendering layer to walk during Pass 2.
    #[must_use]
    pub fn imports_snapshot(&self) -> ImportsTable {
        self.data.borrow().imports.clone()
    }

    /// Drain every declaration in dependency-topological order. Intended to
    /// be called once, by the Pass 2 driver, after `done()`.
    pub fn drain_declarations(&self) -> EsgenResult<Vec<DeclarationRecord>> {
        self.data.borrow_mut().declarations.drain_in_order()
    }

    /// Pull out every still-registered declaration targeting `scope`,
    /// leaving the rest for later. Used to eagerly hoist a nested
    /// function's own helper declarations to the top of its body while
    /// that body is still being composed.
    #[must_use]
    pub fn take_declarations_for_scope(&self, scope: ScopeId) -> Vec<DeclarationRecord> {
        self.data.borrow_mut().declarations.take_for_scope(scope)
    }

    /// Recover a `Symbol` handle from a raw id, e.g. one read back out of
    /// an `ImportEntry` or `DeclarationRecord` by a rendering layer that
    /// only has the id, not the original handle.
    #[must_use]
    pub fn symbol_from_id(&self, id: SymbolId) -> Symbol {
        Symbol {
            bundle: Rc::clone(&self.data),
            id,
        }
    }

    /// Recover a `Namespace` handle from a raw id.
    #[must_use]
    pub fn namespace_from_id(&self, id: NamespaceId) -> Namespace {
        Namespace {
            bundle: Rc::clone(&self.data),
            id,
        }
    }

    /// Recover a `Scope` handle from a raw id.
    #[must_use]
    pub fn scope_from_id(&self, id: ScopeId) -> Scope {
        Scope {
            bundle: Rc::clone(&self.data),
            id,
        }
    }

    /// Create a fresh symbol identity, not yet added to any namespace.
    #[must_use]
    pub fn new_symbol(
        &self,
        requested_name: impl Into<String>,
        kind: SymbolKind,
        unique: bool,
    ) -> Symbol {
        let mut data = self.data.borrow_mut();
        let id = SymbolId(data.symbols.len() as u32);
        data.symbols.push(SymbolData {
            requested_name: requested_name.into(),
            comment: None,
            unique,
            kind,
        });
        drop(data);
        Symbol {
            bundle: Rc::clone(&self.data),
            id,
        }
    }
}

/// A factory for a scope-local singleton value. A `Scope`'s store is keyed by the factory's own type, so each
/// distinct factory type gets its own lazily-produced, memoized value.
pub trait ScopedValueFactory: 'static {
    type Value: 'static;

    fn produce(&self, scope: &Scope) -> Self::Value;
}

/// A single emission context: the bundle root, a block, or a function body.
#[derive(Clone)]
pub struct Scope {
    pub(crate) bundle: Rc<RefCell<BundleData>>,
    pub(crate) id: ScopeId,
}

impl Scope {
    #[must_use]
    pub fn id(&self) -> ScopeId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> ScopeKind {
        self.bundle.borrow().scopes[self.id.index()].kind
    }

    #[must_use]
    pub fn namespace(&self) -> Namespace {
        let ns = self.bundle.borrow().scopes[self.id.index()].namespace;
        Namespace {
            bundle: Rc::clone(&self.bundle),
            id: ns,
        }
    }

    #[must_use]
    pub fn parent(&self) -> Option<Scope> {
        self.bundle.borrow().scopes[self.id.index()]
            .parent
            .map(|id| Scope {
                bundle: Rc::clone(&self.bundle),
                id,
            })
    }

    /// Nearest enclosing `Function` or `Bundle` scope - used to place
    /// declarations that must live at program top level.
    #[must_use]
    pub fn function_or_bundle(&self) -> Scope {
        let id = self.bundle.borrow().scopes[self.id.index()].function_or_bundle;
        Scope {
            bundle: Rc::clone(&self.bundle),
            id,
        }
    }

    #[must_use]
    pub fn is_async(&self) -> bool {
        matches!(self.kind(), ScopeKind::Function { is_async: true, .. })
    }

    #[must_use]
    pub fn is_generator(&self) -> bool {
        matches!(
            self.kind(),
            ScopeKind::Function {
                is_generator: true,
                ..
            }
        )
    }

    /// Create a nested scope. The child inherits this scope's bundle-wide
    /// imports/declarations tables implicitly (they live on `BundleData`,
    /// not per-scope) and nests its namespace under this scope's own.
    /// `kind` is `ScopeKind::Block` for a plain nested scope or
    /// `ScopeKind::Function { .. }` to open a new function context.
    #[must_use]
    pub fn nest(&self, kind: ScopeKind) -> Scope {
        let parent_ns = self.namespace();
        let child_ns = parent_ns.nest();
        let mut data = self.bundle.borrow_mut();
        let id = ScopeId(data.scopes.len() as u32);
        let function_or_bundle = if kind.is_function_or_bundle() {
            id
        } else {
            data.scopes[self.id.index()].function_or_bundle
        };
        data.scopes.push(ScopeData {
            kind,
            parent: Some(self.id),
            function_or_bundle,
            namespace: child_ns.id,
            scoped_values: FxHashMap::default(),
        });
        Scope {
            bundle: Rc::clone(&self.bundle),
            id,
        }
    }

    /// Open an emission span: a fresh `CodeFragment` owned by this scope.
    /// Fails once the bundle has been marked done.
    pub fn span(&self) -> EsgenResult<crate::fragment::CodeFragment> {
        {
            let data = self.bundle.borrow();
            if matches!(data.state, BundleState::Emitted) {
                return Err(EsgenError::BundleAlreadyDone);
            }
        }
        Ok(crate::fragment::CodeFragment::new(Rc::clone(&self.bundle)))
    }

    /// Get or lazily produce this scope's value for `factory`'s type,
    /// memoized on the scope so repeated calls return the same value.
    pub fn scoped_value<F: ScopedValueFactory>(&self, factory: &F) -> Rc<F::Value> {
        let key = TypeId::of::<F>();
        let existing = self.bundle.borrow().scopes[self.id.index()]
            .scoped_values
            .get(&key)
            .cloned();
        if let Some(any) = existing {
            return any
                .downcast::<F::Value>()
                .unwrap_or_else(|_| unreachable!("scoped value stored under its own factory type"));
        }
        let produced: Rc<dyn Any> = Rc::new(factory.produce(self));
        self.bundle.borrow_mut().scopes[self.id.index()]
            .scoped_values
            .insert(key, Rc::clone(&produced));
        produced
            .downcast::<F::Value>()
            .unwrap_or_else(|_| unreachable!("scoped value stored under its own factory type"))
    }
}

impl PartialEq for Scope {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Rc::ptr_eq(&self.bundle, &other.bundle)
    }
}

impl Eq for Scope {}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope").field("id", &self.id).field("kind", &self.kind()).finish()
    }
}

pub use crate::namespace::Namespace;
pub use crate::symbol::Symbol;
