//! Program symbols.
//!
//! A `Symbol` is an identity object: two symbols are distinct even if they
//! request the same name. `SymbolKind` is a tagged-variant realization of
//! dynamic dispatch across symbol kinds: a plain classification tag here,
//! not a v-table. The kind-specific
//! behaviour a `bind(baseNaming)`-style callback would attach (import
//! module/export text, declaration bodies, signatures, ...) is instead kept
//! as ordinary Rust structs in the `esgen` crate that each hold a
//! `SymbolId`, which is simpler and more statically checked than threading
//! a `dyn Any`-erased "specialized naming" object through this crate. See
//! `DESIGN.md` for that decision.

use esgen_core::Comment;

use crate::ids::SymbolId;
use crate::scope::BundleData;
use std::cell::RefCell;
use std::rc::Rc;

/// Which role a symbol plays, for diagnostics and the handful of emission
/// decisions that genuinely depend on it (e.g. a `Class` symbol's members
/// iterate differently than a plain `Var`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Local,
    Import,
    Declared,
    Arg,
    Var,
    Class,
    Function,
}

pub(crate) struct SymbolData {
    pub(crate) requested_name: String,
    pub(crate) comment: Option<Comment>,
    pub(crate) unique: bool,
    pub(crate) kind: SymbolKind,
}

/// An identity object standing for some named entity in the generated
/// program. Created via `Namespace::new_symbol`/`Bundle::new_symbol`.
#[derive(Clone)]
pub struct Symbol {
    pub(crate) bundle: Rc<RefCell<BundleData>>,
    pub(crate) id: SymbolId,
}

impl Symbol {
    #[must_use]
    pub fn id(&self) -> SymbolId {
        self.id
    }

    #[must_use]
    pub fn requested_name(&self) -> String {
        self.bundle.borrow().symbols[self.id.index()]
            .requested_name
            .clone()
    }

    #[must_use]
    pub fn kind(&self) -> SymbolKind {
        self.bundle.borrow().symbols[self.id.index()].kind
    }

    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.bundle.borrow().symbols[self.id.index()].unique
    }

    #[must_use]
    pub fn comment(&self) -> Option<Comment> {
        self.bundle.borrow().symbols[self.id.index()].comment.clone()
    }

    pub fn set_comment(&self, comment: Comment) {
        self.bundle.borrow_mut().symbols[self.id.index()].comment = Some(comment);
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Symbol")
            .field("id", &self.id)
            .field("requested_name", &self.requested_name())
            .field("kind", &self.kind())
            .finish()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Rc::ptr_eq(&self.bundle, &other.bundle)
    }
}

impl Eq for Symbol {}
