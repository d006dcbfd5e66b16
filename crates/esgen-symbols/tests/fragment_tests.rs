use esgen_core::EsgenError;
use esgen_symbols::{Bundle, ScopeKind};

#[test]
fn write_composes_lines_in_insertion_order() {
    let bundle = Bundle::new();
    let scope = bundle.root_scope();
    let frag = scope.span().unwrap();
    frag.write("a").unwrap();
    frag.write("b").unwrap();
    assert_eq!(&*frag.emit(&scope), "a\nb\n");
}

#[test]
fn blank_write_request_is_preserved_as_one_blank_line() {
    let bundle = Bundle::new();
    let scope = bundle.root_scope();
    let frag = scope.span().unwrap();
    frag.write("a").unwrap();
    frag.write("").unwrap();
    frag.write("").unwrap();
    frag.write("b").unwrap();
    assert_eq!(&*frag.emit(&scope), "a\n\nb\n");
}

#[test]
fn indent_nests_child_content_one_level() {
    let bundle = Bundle::new();
    let scope = bundle.root_scope();
    let frag = scope.span().unwrap();
    frag.write("function f() {").unwrap();
    frag.indent(|inner| {
        inner.write("inner();").unwrap();
    })
    .unwrap();
    frag.write("}").unwrap();
    assert_eq!(&*frag.emit(&scope), "function f() {\n  inner();\n}\n");
}

#[test]
fn line_joins_writes_into_one_horizontal_line() {
    let bundle = Bundle::new();
    let scope = bundle.root_scope();
    let frag = scope.span().unwrap();
    frag.line(|inline| {
        inline.write("a,").unwrap();
        inline.write("b").unwrap();
    })
    .unwrap();
    assert_eq!(&*frag.emit(&scope), "a,b\n");
}

#[test]
fn line_inserts_a_newline_before_indented_content_at_the_splice_point() {
    let bundle = Bundle::new();
    let scope = bundle.root_scope();
    let frag = scope.span().unwrap();
    frag.line(|inline| {
        inline.write("a").unwrap();
        inline
            .indent(|inner| {
                inner.write("b").unwrap();
            })
            .unwrap();
    })
    .unwrap();
    assert_eq!(&*frag.emit(&scope), "a\n  b\n");
}

#[test]
fn write_fragment_embeds_another_fragment_wholesale() {
    let bundle = Bundle::new();
    let scope = bundle.root_scope();
    let helper = scope.span().unwrap();
    helper.write("const helper = 1;").unwrap();

    let main = scope.span().unwrap();
    main.write_fragment(&helper).unwrap();
    main.write("helper;").unwrap();

    assert_eq!(&*main.emit(&scope), "const helper = 1;\nhelper;\n");
}

#[test]
fn writing_a_fragment_into_itself_fails() {
    let bundle = Bundle::new();
    let scope = bundle.root_scope();
    let frag = scope.span().unwrap();
    let err = frag.write_fragment(&frag).unwrap_err();
    assert!(matches!(err, EsgenError::FragmentCycle));
}

#[test]
fn transitive_cycle_through_an_embedded_fragment_is_rejected() {
    let bundle = Bundle::new();
    let scope = bundle.root_scope();
    let a = scope.span().unwrap();
    let b = scope.span().unwrap();
    a.write_fragment(&b).unwrap();
    let err = b.write_fragment(&a).unwrap_err();
    assert!(matches!(err, EsgenError::FragmentCycle));
}

#[test]
fn writing_to_an_already_emitted_fragment_fails() {
    let bundle = Bundle::new();
    let scope = bundle.root_scope();
    let frag = scope.span().unwrap();
    frag.write("a").unwrap();
    let _ = frag.emit(&scope);
    let err = frag.write("b").unwrap_err();
    assert!(matches!(err, EsgenError::AlreadyPrinted));
}

#[test]
fn emitting_the_same_fragment_twice_into_the_same_scope_is_idempotent() {
    let bundle = Bundle::new();
    let scope = bundle.root_scope();
    let frag = scope.span().unwrap();
    frag.write("a").unwrap();
    let first = frag.emit(&scope);
    let second = frag.emit(&scope);
    assert_eq!(first, second);
}

#[test]
fn nest_scope_embeds_a_nested_function_body() {
    let bundle = Bundle::new();
    let scope = bundle.root_scope();
    let frag = scope.span().unwrap();
    let inner_scope = scope.nest(ScopeKind::Function {
        is_async: false,
        is_generator: false,
    });
    frag.write("function f() {").unwrap();
    frag.nest_scope(&inner_scope, |inner| {
        inner.write("return 1;").unwrap();
    })
    .unwrap();
    frag.write("}").unwrap();
    assert_eq!(&*frag.emit(&scope), "function f() {\nreturn 1;\n}\n");
}
