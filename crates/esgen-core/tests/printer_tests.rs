use esgen_core::Printer;

#[test]
fn prints_lines_in_insertion_order() {
    let mut p = Printer::new();
    p.print("a");
    p.print("b");
    assert_eq!(p.as_lines(), vec!["a", "b"]);
}

#[test]
fn blank_line_request_collapses_runs() {
    let mut p = Printer::new();
    p.print("a");
    p.print("");
    p.print("");
    p.print("b");
    assert_eq!(p.as_lines(), vec!["a", "", "b"]);
}

#[test]
fn indent_composes_with_parent_prefix() {
    let mut p = Printer::new();
    p.print("function f() {");
    p.indent(|inner| {
        inner.print("inner();");
        inner.indent(|deeper| deeper.print("deepest();"));
    });
    p.print("}");
    assert_eq!(
        p.as_lines(),
        vec!["function f() {", "  inner();", "    deepest();", "}"]
    );
}

#[test]
fn render_inline_produces_a_standalone_string() {
    let p = Printer::new();
    let rendered = p.render_inline(|inline| {
        inline.print("a,");
        inline.print("b");
    });
    assert_eq!(rendered, "a,\nb");
}

#[test]
fn as_text_ends_with_single_trailing_newline() {
    let mut p = Printer::new();
    p.print("a");
    p.print("b");
    assert_eq!(p.as_text(), "a\nb\n");
}

#[test]
fn empty_printer_renders_empty_text() {
    assert_eq!(Printer::new().as_text(), "");
}
