//! Declaration rendering: dependency-ordered top-level snippets plus their
//! export markers.
//!
//! The raw aggregation and dependency-topological ordering live in
//! `esgen_symbols::DeclarationsTable`; this module turns the drained
//! records into text, deciding - per `BundleFormat` - whether an exported
//! declaration gets an inline `export` prefix or contributes to a trailing
//! aggregated export construct.

use esgen_core::{BundleFormat, EsgenResult, Printer};
use esgen_symbols::{Bundle, DeclarationRecord, Scope};

/// The rendered declarations section, plus whatever trailing export
/// construct (if any) still needs to be appended after the document body.
pub struct RenderedDeclarations {
    pub text: String,
    /// ES module trailing block: `export { local as requested, ... };`,
    /// only for exported declarations whose local name diverged from the
    /// requested export name (a matching name gets an inline prefix
    /// instead, baked directly into `text`).
    pub es_export_tail: Option<String>,
    /// IIFE trailing block: `return { requested: local, ... };`, collecting
    /// every exported declaration regardless of name match.
    pub iife_return_tail: Option<String>,
}

/// Render `records` (already in dependency-topological order) against the
/// bundle root namespace.
pub fn render_declarations(
    bundle: &Bundle,
    scope: &Scope,
    records: Vec<DeclarationRecord>,
    format: BundleFormat,
) -> EsgenResult<RenderedDeclarations> {
    let root_ns = bundle.root_namespace();
    let mut printer = Printer::new();
    let mut es_mismatched: Vec<(String, String)> = Vec::new();
    let mut iife_exports: Vec<(String, String)> = Vec::new();

    for record in records {
        let symbol = bundle.symbol_from_id(record.symbol);
        let requested = symbol.requested_name();
        let local = root_ns.refer(&symbol).get_naming()?;
        let text = record.snippet.emit(scope);
        let trimmed = text.trim_end_matches('\n');

        if let Some(comment) = symbol.comment() {
            printer.print(comment.render());
        }

        if record.exported {
            match format {
                BundleFormat::Es2015 if local == requested => {
                    printer.print(format!("export {trimmed}"));
                }
                BundleFormat::Es2015 => {
                    printer.print(trimmed);
                    es_mismatched.push((local, requested));
                }
                BundleFormat::Iife => {
                    printer.print(trimmed);
                    iife_exports.push((requested, local));
                }
            }
        } else {
            printer.print(trimmed);
        }
    }

    let es_export_tail = (!es_mismatched.is_empty()).then(|| {
        let parts: Vec<String> = es_mismatched
            .iter()
            .map(|(local, requested)| format!("{local} as {requested}"))
            .collect();
        format!("export {{ {} }};", parts.join(", "))
    });

    let iife_return_tail = (!iife_exports.is_empty()).then(|| {
        let parts: Vec<String> = iife_exports
            .iter()
            .map(|(key, local)| {
                if key == local {
                    key.clone()
                } else {
                    format!("{key}: {local}")
                }
            })
            .collect();
        format!("return {{ {} }};", parts.join(", "))
    });

    Ok(RenderedDeclarations {
        text: printer.as_text(),
        es_export_tail,
        iife_return_tail,
    })
}
