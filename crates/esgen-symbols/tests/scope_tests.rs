use std::cell::Cell;
use std::rc::Rc;

use esgen_core::EsgenError;
use esgen_symbols::{Bundle, Scope, ScopeKind, ScopedValueFactory};

#[test]
fn root_scope_is_the_bundle_kind() {
    let bundle = Bundle::new();
    assert_eq!(bundle.root_scope().kind(), ScopeKind::Bundle);
    assert!(bundle.root_scope().parent().is_none());
}

#[test]
fn nested_block_inherits_enclosing_function_or_bundle() {
    let bundle = Bundle::new();
    let root = bundle.root_scope();
    let block = root.nest(ScopeKind::Block);
    assert_eq!(block.function_or_bundle().kind(), ScopeKind::Bundle);
    assert!(block.parent().is_some());
}

#[test]
fn nested_function_scope_becomes_its_own_function_or_bundle() {
    let bundle = Bundle::new();
    let root = bundle.root_scope();
    let function = root.nest(ScopeKind::Function {
        is_async: true,
        is_generator: false,
    });
    assert!(function.is_async());
    assert!(!function.is_generator());
    assert_eq!(function.function_or_bundle().kind(), function.kind());
}

#[test]
fn span_fails_once_bundle_is_done() {
    let bundle = Bundle::new();
    let root = bundle.root_scope();
    assert!(root.span().is_ok());
    bundle.done();
    assert!(matches!(root.span(), Err(EsgenError::BundleAlreadyDone)));
}

struct Counter;

impl ScopedValueFactory for Counter {
    type Value = Cell<u32>;

    fn produce(&self, _scope: &Scope) -> Self::Value {
        Cell::new(0)
    }
}

#[test]
fn scoped_value_is_memoized_per_scope() {
    let bundle = Bundle::new();
    let scope = bundle.root_scope();
    let first: Rc<Cell<u32>> = scope.scoped_value(&Counter);
    first.set(7);
    let second = scope.scoped_value(&Counter);
    assert_eq!(second.get(), 7);
}

#[test]
fn sibling_scopes_get_independent_scoped_values() {
    let bundle = Bundle::new();
    let root = bundle.root_scope();
    let a = root.nest(ScopeKind::Block);
    let b = root.nest(ScopeKind::Block);
    a.scoped_value(&Counter).set(1);
    assert_eq!(b.scoped_value(&Counter).get(), 0);
}
