//! Scope tree, symbol/namespace naming, and code fragments for `esgen`.
//!
//! Builds on `esgen-core`'s leaf utilities to provide the pieces the
//! `esgen` crate composes into the public surface:
//! - `Bundle` / `Scope` - the arena owner and the emission-context tree
//! - `Namespace` / `Symbol` / `Resolution` - the naming protocol
//! - `CodeFragment` - composable writable output
//! - `ImportsTable` / `DeclarationsTable` - the raw data (not rendering)
//!   backing the imports and declarations subsystems

pub mod ids;
pub use ids::{FragmentId, NamespaceId, ScopeId, SymbolId};

pub mod symbol;
pub use symbol::{Symbol, SymbolKind};

pub mod namespace;
pub use namespace::{Namespace, Resolution};

pub mod scope;
pub use scope::{Bundle, Scope, ScopeKind, ScopedValueFactory};

pub mod fragment;
pub use fragment::CodeFragment;

pub mod imports_data;
pub use imports_data::{ImportEntry, ImportsTable};

pub mod declarations_data;
pub use declarations_data::{DeclarationRecord, DeclarationsTable, Placement};
