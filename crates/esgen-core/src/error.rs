//! The closed error taxonomy for the generator.
//!
//! Every fallible public API across the `esgen` workspace returns
//! `Result<T, EsgenError>`. The variants below are exhaustive by design:
//! structural misuse of the fragment/scope API, naming/visibility errors,
//! declaration errors, and bundle-format errors.

/// Errors raised while building or emitting an `esgen` bundle.
#[derive(Debug, thiserror::Error)]
pub enum EsgenError {
    /// A code fragment was inserted into itself, directly or transitively.
    #[error("Can not insert code fragment into itself")]
    FragmentCycle,

    /// A write was attempted against a fragment whose printer already drained.
    #[error("Code printed already")]
    AlreadyPrinted,

    /// `Scope::span` was called after the owning bundle was marked done.
    #[error("All code emitted already")]
    BundleAlreadyDone,

    /// A reference was resolved synchronously before the symbol was named.
    #[error("{0} is unnamed")]
    Unnamed(String),

    /// A symbol was referenced from a namespace that cannot see its naming.
    #[error("{symbol} invisible to {referring_ns}, named in {naming_ns}")]
    Invisible {
        symbol: String,
        referring_ns: String,
        naming_ns: String,
    },

    /// A unique symbol was named a second time somewhere in the bundle.
    #[error("{0} already named in {1}")]
    AlreadyNamed(String, String),

    /// A class member was declared twice under the same key.
    #[error("{0} already declared in {1}")]
    AlreadyDeclared(String, String),

    /// A derived class has no constructor declaration and no base to inherit from.
    #[error("{0} not declared")]
    ConstructorNotDeclared(String),

    /// A derived-class constructor signature cannot satisfy the base signature.
    #[error("{0} can not accept arguments from base {1}")]
    IncompatibleConstructor(String, String),

    /// A declaration was added, or the declarations subsystem drained again,
    /// after it had already been drained once.
    #[error("Declarations already printed")]
    DeclarationsAlreadyPrinted,

    /// A signature key-map repeated the same parameter name.
    #[error("Duplicate arg: {0}")]
    DuplicateArg(String),

    /// A signature key-map declared more than one variadic parameter.
    #[error("Duplicate vararg: {0}")]
    DuplicateVararg(String),

    /// `Bundle::as_exports` was called on a non-IIFE bundle.
    #[error("Can not export from {0} bundle")]
    CannotExportFromBundle(String),

    /// Wraps a failure from an in-process JS evaluator used by `evaluate`.
    #[error("evaluation failed: {0}")]
    Evaluation(String),
}

pub type EsgenResult<T> = Result<T, EsgenError>;
