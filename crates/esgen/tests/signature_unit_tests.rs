use super::*;

#[test]
fn parses_required_optional_and_variadic_keys() {
    let sig = Signature::new(["a", "b?", "...c"]).unwrap();
    assert_eq!(sig.arg_names(), vec!["a", "b", "c"]);
}

#[test]
fn duplicate_argument_name_fails() {
    let err = Signature::new(["a", "a"]).unwrap_err();
    assert!(matches!(err, EsgenError::DuplicateArg(_)));
}

#[test]
fn more_than_one_variadic_fails() {
    let err = Signature::new(["...a", "...b"]).unwrap_err();
    assert!(matches!(err, EsgenError::DuplicateVararg(_)));
}

#[test]
fn declare_renders_inline_for_three_or_fewer_args() {
    let sig = Signature::new(["a", "b", "c"]).unwrap();
    assert_eq!(sig.declare(), "(a, b, c)");
}

#[test]
fn declare_renders_multiline_past_the_threshold() {
    let sig = Signature::new(["a", "b", "c", "d"]).unwrap();
    assert_eq!(sig.declare(), "(\n  a,\n  b,\n  c,\n  d,\n)");
}

#[test]
fn declare_omits_trailing_comma_for_variadic() {
    let sig = Signature::new(["a", "b", "c", "...rest"]).unwrap();
    assert_eq!(sig.declare(), "(\n  a,\n  b,\n  c,\n  ...rest\n)");
}

#[test]
fn empty_signature_declares_as_empty_parens() {
    assert_eq!(Signature::empty().declare(), "()");
}

#[test]
fn variadic_call_with_sequence_expands_in_place() {
    let sig = Signature::new(["arg", "...rest"]).unwrap();
    let values = indexmap::indexmap! {
        "arg".to_string() => CallValue::from("1"),
        "rest".to_string() => CallValue::from(["2", "3"]),
    };
    assert_eq!(sig.call(values).unwrap(), "(1, 2, 3)");
}

#[test]
fn missing_variadic_contributes_nothing() {
    let sig = Signature::new(["arg", "...rest"]).unwrap();
    let values = indexmap::indexmap! {
        "arg".to_string() => CallValue::from("1"),
    };
    assert_eq!(sig.call(values).unwrap(), "(1)");
}

#[test]
fn missing_optional_renders_undefined_unless_trailing() {
    let sig = Signature::new(["a", "b?", "c?"]).unwrap();
    let values = indexmap::indexmap! {
        "a".to_string() => CallValue::from("1"),
        "c".to_string() => CallValue::from("3"),
    };
    assert_eq!(sig.call(values).unwrap(), "(1, undefined, 3)");
}

#[test]
fn trailing_undefineds_are_trimmed() {
    let sig = Signature::new(["a", "b?", "c?"]).unwrap();
    let values = indexmap::indexmap! {
        "a".to_string() => CallValue::from("1"),
    };
    assert_eq!(sig.call(values).unwrap(), "(1)");
}

#[test]
fn accepts_args_for_matches_identical_positional_required_args() {
    let base = Signature::new(["a", "b"]).unwrap();
    let derived = Signature::new(["a", "b"]).unwrap();
    assert!(derived.accepts_args_for(&base));
}

#[test]
fn accepts_args_for_rejects_name_mismatch() {
    let base = Signature::new(["a"]).unwrap();
    let derived = Signature::new(["x"]).unwrap();
    assert!(!derived.accepts_args_for(&base));
}

#[test]
fn accepts_args_for_allows_optional_to_cover_missing_base_arg() {
    let base = Signature::empty();
    let derived = Signature::new(["a?"]).unwrap();
    assert!(derived.accepts_args_for(&base));
}

#[test]
fn accepts_args_for_rejects_required_not_satisfied_by_missing() {
    let base = Signature::empty();
    let derived = Signature::new(["a"]).unwrap();
    assert!(!derived.accepts_args_for(&base));
}
