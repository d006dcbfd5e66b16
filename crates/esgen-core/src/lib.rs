//! Leaf utilities for `esgen`.
//!
//! This crate provides the foundational pieces shared by the rest of the
//! `esgen` workspace:
//! - `EsgenError` - the closed error taxonomy raised by the generator
//! - `BundleFormat` / `NewLineKind` - small output configuration enums
//! - `sanitize_identifier` - ECMAScript-safe identifier escaping
//! - `Comment` - `/* ... */` comment formatting
//! - `NameRegistry` - hierarchical unique-name allocation
//! - `Printer` - buffered, indentation-aware line assembly

pub mod comment;
pub use comment::Comment;

pub mod error;
pub use error::EsgenError;

pub mod format;
pub use format::{BundleFormat, NewLineKind};

pub mod ident;
pub use ident::sanitize_identifier;

pub mod registry;
pub use registry::NameRegistry;

pub mod printer;
pub use printer::Printer;
