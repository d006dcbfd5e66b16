//! Thin convenience wrappers: `esImport`, `esImportClass`,
//! `esImportFunction`. Their internals are glue over the
//! imports subsystem (`crate::imports`) and the signature/class/function
//! constructors - the hard engineering lives in those modules, not here.

use esgen_core::EsgenResult;
use esgen_symbols::Bundle;

use crate::imports::{es_import, ImportRef};
use crate::signature::Signature;

/// Import a single export, optionally under a different local name.
pub fn es_import_value(
    bundle: &Bundle,
    module_name: impl Into<String>,
    export_name: impl Into<String>,
    as_name: Option<&str>,
) -> EsgenResult<ImportRef> {
    es_import(bundle, module_name, export_name, as_name)
}

/// Import an export and model it as a class with the given constructor
/// signature (the imported symbol's naming is then usable wherever an
/// `EsClass`'s symbol would be - `instantiate` still composes `new Name(...)`
/// against the resolved local name).
pub fn es_import_class(
    bundle: &Bundle,
    module_name: impl Into<String>,
    export_name: impl Into<String>,
    signature_keys: impl IntoIterator<Item = impl Into<String>>,
) -> EsgenResult<(ImportRef, Signature)> {
    let reference = es_import(bundle, module_name, export_name, None)?;
    let signature = Signature::new(signature_keys)?;
    Ok((reference, signature))
}

/// Import an export and model it as a callable function with the given
/// signature.
pub fn es_import_function(
    bundle: &Bundle,
    module_name: impl Into<String>,
    export_name: impl Into<String>,
    signature_keys: impl IntoIterator<Item = impl Into<String>>,
) -> EsgenResult<(ImportRef, Signature)> {
    let reference = es_import(bundle, module_name, export_name, None)?;
    let signature = Signature::new(signature_keys)?;
    Ok((reference, signature))
}
