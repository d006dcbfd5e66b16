use esgen_core::EsgenError;
use esgen_symbols::{Bundle, SymbolKind};

#[test]
fn first_reference_names_the_symbol_with_its_requested_name() {
    let bundle = Bundle::new();
    let ns = bundle.root_namespace();
    let sym = bundle.new_symbol("greeting", SymbolKind::Local, false);
    ns.add_symbol(&sym).unwrap();
    assert_eq!(ns.refer(&sym).get_naming().unwrap(), "greeting");
}

#[test]
fn naming_is_cached_after_first_resolution() {
    let bundle = Bundle::new();
    let ns = bundle.root_namespace();
    let sym = bundle.new_symbol("x", SymbolKind::Var, false);
    ns.add_symbol(&sym).unwrap();
    let first = ns.refer(&sym).get_naming().unwrap();
    let second = ns.refer(&sym).get_naming().unwrap();
    assert_eq!(first, second);
}

#[test]
fn naming_a_unique_symbol_twice_in_different_namespaces_fails() {
    let bundle = Bundle::new();
    let root = bundle.root_namespace();
    let child = root.nest();
    let sym = bundle.new_symbol("singleton", SymbolKind::Class, true);
    root.add_symbol(&sym).unwrap();
    let err = child.add_symbol(&sym).unwrap_err();
    assert!(matches!(err, EsgenError::AlreadyNamed(..)));
}

#[test]
fn nested_namespace_sees_parent_naming() {
    let bundle = Bundle::new();
    let root = bundle.root_namespace();
    let child = root.nest();
    let sym = bundle.new_symbol("outer", SymbolKind::Var, false);
    root.add_symbol(&sym).unwrap();
    assert_eq!(child.refer(&sym).get_naming().unwrap(), "outer");
}

#[test]
fn sibling_namespace_cannot_see_a_naming() {
    let bundle = Bundle::new();
    let root = bundle.root_namespace();
    let a = root.nest();
    let b = root.nest();
    let sym = bundle.new_symbol("local", SymbolKind::Var, false);
    a.add_symbol(&sym).unwrap();
    let err = b.refer(&sym).get_naming().unwrap_err();
    assert!(matches!(err, EsgenError::Invisible { .. }));
}

#[test]
fn referring_to_a_symbol_never_added_anywhere_is_unnamed() {
    let bundle = Bundle::new();
    let ns = bundle.root_namespace();
    let sym = bundle.new_symbol("ghost", SymbolKind::Var, false);
    let err = ns.refer(&sym).get_naming().unwrap_err();
    assert!(matches!(err, EsgenError::Unnamed(_)));
}

#[test]
fn two_non_unique_symbols_with_the_same_requested_name_get_distinct_names() {
    let bundle = Bundle::new();
    let ns = bundle.root_namespace();
    let a = bundle.new_symbol("test", SymbolKind::Import, false);
    let b = bundle.new_symbol("test", SymbolKind::Import, false);
    ns.add_symbol(&a).unwrap();
    ns.add_symbol(&b).unwrap();
    let name_a = ns.refer(&a).get_naming().unwrap();
    let name_b = ns.refer(&b).get_naming().unwrap();
    assert_ne!(name_a, name_b);
    assert_eq!(name_a, "test");
    assert_eq!(name_b, "test$0");
}

#[test]
fn when_named_collapses_to_get_naming_once_declared_before_pass_two() {
    let bundle = Bundle::new();
    let ns = bundle.root_namespace();
    let sym = bundle.new_symbol("fwd", SymbolKind::Function, false);
    ns.add_symbol(&sym).unwrap();
    assert_eq!(ns.refer(&sym).when_named().unwrap(), "fwd");
}
