//! Programmatic generation of ECMAScript source text.
//!
//! Builds on `esgen-core`'s leaf utilities and `esgen-symbols`'s scope tree
//! and naming protocol to provide the public surface:
//! - `generate` / `evaluate` - the two entry points
//! - `EsBundle` / `BundleOptions` - bundle construction and configuration
//! - `Signature` / `CallValue` - callable argument lists
//! - `EsFunction` / `EsClass` / `Member` - declarative function and class
//!   constructs
//! - `es_import` / `es_import_value` / `es_import_class` /
//!   `es_import_function` - import declarations
//! - `join_code` - the tag-template code joiner

pub mod options;
pub use options::{BundleOptions, EsBundle};

pub mod signature;
pub use signature::{ArgKind, CallValue, Signature};

pub mod callable;
pub use callable::{write_function, write_lambda, write_method};

pub mod imports;
pub use imports::{es_import, render_imports, ImportRef};

pub mod declarations;
pub use declarations::{render_declarations, RenderedDeclarations};

pub mod entry;
pub use entry::{generate, generate_with, evaluate};

pub mod function;
pub use function::{DeclarationPolicy, EsFunction, FunctionAs};

pub mod class;
pub use class::{EsClass, Member, MemberKind};

pub mod import_helpers;
pub use import_helpers::{es_import_class, es_import_function, es_import_value};

pub mod tag;
pub use tag::join_code;

pub use esgen_core::{BundleFormat, Comment, EsgenError, NewLineKind};
pub use esgen_symbols::{Bundle, CodeFragment, Namespace, Placement, Scope, ScopeKind, Symbol, SymbolKind};

/// The crate's `Result` alias, re-exported for callers composing their own
/// fallible builder closures.
pub type EsgenResult<T> = esgen_core::EsgenResult<T>;
