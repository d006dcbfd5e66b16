//! Import declarations: registration and format-specific rendering.
//!
//! Registration lives here rather than in `esgen-symbols` because the
//! local-name-uniqueness rule ("the import is registered with the *bundle*
//! namespace") and the two output shapes (ES module / IIFE) are both
//! rendering-layer concerns once the raw aggregation table
//! (`esgen_symbols::ImportsTable`) is in place.

use esgen_core::{BundleFormat, EsgenResult, Printer};
use esgen_symbols::{Bundle, Symbol, SymbolKind};

/// A reference to one imported export, obtained from `esImport`/
/// `EsBundle::import`. Behaves like any other namespace-visible symbol.
#[derive(Clone)]
pub struct ImportRef {
    pub symbol: Symbol,
}

impl ImportRef {
    /// Resolve this import's local name as seen from the bundle root (the
    /// only namespace an import is ever named in).
    pub fn name(&self, bundle: &Bundle) -> EsgenResult<String> {
        bundle.root_namespace().refer(&self.symbol).get_naming()
    }
}

/// Register an import of `export_name` from `module_key`, returning a
/// reference usable anywhere in the bundle. Two calls with the same
/// `module_key` coalesce into one import clause at render time; two calls
/// requesting the same local name from different modules get the usual
/// `$n`-suffixed disambiguation.
pub fn es_import(
    bundle: &Bundle,
    module_key: impl Into<String>,
    export_name: impl Into<String>,
    requested_local_name: Option<&str>,
) -> EsgenResult<ImportRef> {
    let export_name = export_name.into();
    let local = requested_local_name.unwrap_or(&export_name).to_string();
    let symbol = bundle.new_symbol(local, SymbolKind::Import, true);
    bundle.root_namespace().add_symbol(&symbol)?;
    bundle.register_import(module_key, &symbol, export_name)?;
    Ok(ImportRef { symbol })
}

/// Render every registered import as the document's leading section.
pub fn render_imports(bundle: &Bundle, format: BundleFormat) -> EsgenResult<String> {
    let table = bundle.imports_snapshot();
    let root_ns = bundle.root_namespace();
    let mut printer = Printer::new();

    for (module, entries) in table.modules() {
        let mut pairs = Vec::with_capacity(entries.len());
        for entry in entries {
            let symbol = bundle.symbol_from_id(entry.symbol);
            let local = root_ns.refer(&symbol).get_naming()?;
            pairs.push((entry.export_name.clone(), local));
        }
        match format {
            BundleFormat::Es2015 => render_es_module_clause(&mut printer, module, &pairs),
            BundleFormat::Iife => render_iife_clause(&mut printer, module, &pairs),
        }
    }

    Ok(printer.as_text())
}

fn render_es_module_clause(printer: &mut Printer, module: &str, pairs: &[(String, String)]) {
    let parts: Vec<String> = pairs
        .iter()
        .map(|(export, local)| {
            if export == local {
                export.clone()
            } else {
                format!("{export} as {local}")
            }
        })
        .collect();
    if parts.len() == 1 {
        printer.print(format!("import {{ {} }} from \"{module}\";", parts[0]));
    } else {
        printer.print("import {");
        printer.indent(|p| {
            let last = parts.len() - 1;
            for (i, part) in parts.iter().enumerate() {
                let comma = if i == last { "" } else { "," };
                p.print(format!("{part}{comma}"));
            }
        });
        printer.print(format!("}} from \"{module}\";"));
    }
}

fn render_iife_clause(printer: &mut Printer, module: &str, pairs: &[(String, String)]) {
    let parts: Vec<String> = pairs
        .iter()
        .map(|(export, local)| {
            if export == local {
                export.clone()
            } else {
                format!("{export}: {local}")
            }
        })
        .collect();
    if parts.len() == 1 {
        printer.print(format!(
            "const {{ {} }} = await import(\"{module}\");",
            parts[0]
        ));
    } else {
        printer.print("const {");
        printer.indent(|p| {
            let last = parts.len() - 1;
            for (i, part) in parts.iter().enumerate() {
                let comma = if i == last { "" } else { "," };
                p.print(format!("{part}{comma}"));
            }
        });
        printer.print(format!("}} = await import(\"{module}\");"));
    }
}
