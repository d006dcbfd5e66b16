//! Bundle configuration and the `esgen`-level bundle handle.
//!
//! `esgen_symbols::Bundle` owns the raw arenas; `EsBundle` pairs it with the
//! rendering-relevant configuration (`BundleFormat`, line ending, indent
//! string) that only this crate's renderers need, keeping the same split
//! between a bare state owner and an options-aware emission wrapper used
//! elsewhere in this workspace.

use std::rc::Rc;

use esgen_core::{BundleFormat, EsgenError, EsgenResult, NewLineKind};
use esgen_symbols::{Bundle, Namespace, Scope};

/// Construction-time options for a bundle.
pub struct BundleOptions {
    pub format: BundleFormat,
    pub newline: NewLineKind,
    pub indent: String,
    /// Pre-populates the root scope's scoped-value store before any user
    /// code runs.
    pub setup: Option<Box<dyn Fn(&Scope)>>,
}

impl std::fmt::Debug for BundleOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BundleOptions")
            .field("format", &self.format)
            .field("newline", &self.newline)
            .field("indent", &self.indent)
            .field("setup", &self.setup.is_some())
            .finish()
    }
}

impl Default for BundleOptions {
    fn default() -> Self {
        Self::es_module()
    }
}

impl BundleOptions {
    #[must_use]
    pub fn es_module() -> Self {
        Self {
            format: BundleFormat::Es2015,
            newline: NewLineKind::LineFeed,
            indent: "  ".to_string(),
            setup: None,
        }
    }

    #[must_use]
    pub fn iife() -> Self {
        Self {
            format: BundleFormat::Iife,
            newline: NewLineKind::LineFeed,
            indent: "  ".to_string(),
            setup: None,
        }
    }

    #[must_use]
    pub fn with_setup(mut self, setup: impl Fn(&Scope) + 'static) -> Self {
        self.setup = Some(Box::new(setup));
        self
    }

    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }
}

/// The `esgen`-level handle a caller builds a document through: the raw
/// `esgen_symbols::Bundle` plus the format this bundle renders as.
#[derive(Clone)]
pub struct EsBundle {
    bundle: Bundle,
    format: BundleFormat,
    indent: Rc<String>,
}

impl EsBundle {
    #[must_use]
    pub fn new(options: &BundleOptions) -> Self {
        let bundle = Bundle::new();
        if let Some(setup) = &options.setup {
            setup(&bundle.root_scope());
        }
        Self {
            bundle,
            format: options.format,
            indent: Rc::new(options.indent.clone()),
        }
    }

    #[must_use]
    pub fn bundle(&self) -> &Bundle {
        &self.bundle
    }

    #[must_use]
    pub fn format(&self) -> BundleFormat {
        self.format
    }

    #[must_use]
    pub fn indent(&self) -> &str {
        &self.indent
    }

    #[must_use]
    pub fn root_scope(&self) -> Scope {
        self.bundle.root_scope()
    }

    #[must_use]
    pub fn root_namespace(&self) -> Namespace {
        self.bundle.root_namespace()
    }

    /// An IIFE bundle's exports are assembled into a trailing
    /// `return { ... };` block built from every declaration's own
    /// `exported` flag, so this just confirms the bundle is in the right
    /// format before a caller proceeds to mark declarations exported that
    /// way. An ES module bundle exports via the `export` keyword on
    /// individual declarations instead.
    pub fn as_exports(&self) -> EsgenResult<&Bundle> {
        if self.format.is_iife() {
            Ok(&self.bundle)
        } else {
            Err(EsgenError::CannotExportFromBundle(self.format.name().to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_exports_succeeds_for_an_iife_bundle() {
        let bundle = EsBundle::new(&BundleOptions::iife());
        assert!(bundle.as_exports().is_ok());
    }

    #[test]
    fn as_exports_fails_for_an_es_module_bundle() {
        let bundle = EsBundle::new(&BundleOptions::es_module());
        let err = bundle.as_exports().unwrap_err();
        assert!(matches!(err, EsgenError::CannotExportFromBundle(ref fmt) if fmt == "ES2015"));
    }
}
