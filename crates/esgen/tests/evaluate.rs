use esgen::{evaluate, CodeFragment};
use esgen_symbols::{DeclarationRecord, Placement, SymbolKind};

#[test]
fn evaluate_runs_the_generated_iife_and_returns_its_exports() {
    let value = evaluate(|bundle, _root| {
        let raw = bundle.bundle();
        let symbol = raw.new_symbol("greeting", SymbolKind::Declared, false);
        raw.root_namespace().add_symbol(&symbol)?;

        let snippet: CodeFragment = bundle.root_scope().span()?;
        snippet.write("const greeting = 42;")?;

        raw.declare(DeclarationRecord {
            symbol: symbol.id(),
            refs: Vec::new(),
            exported: true,
            placement: Placement::Exports,
            scope: bundle.root_scope().id(),
            snippet,
        })
    })
    .unwrap();

    assert_eq!(value["greeting"], serde_json::json!(42));
}
