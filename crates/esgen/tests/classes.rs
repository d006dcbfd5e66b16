use esgen::{generate, Bundle, EsClass, MemberKind, Signature};
use pretty_assertions::assert_eq;

#[test]
fn overriding_a_base_field_keeps_it_declared_exactly_once() {
    let bundle = Bundle::new();
    let base = EsClass::new(&bundle, "A", None).unwrap();
    base.declare_member("value", MemberKind::Field, false, None, None).unwrap();

    let derived = EsClass::new(&bundle, "B", Some(base.clone())).unwrap();
    // Touching it through the derived class first lazily materializes it
    // as inherited (declared: false) before the override flips it back.
    let inherited = derived.find_member("value").unwrap();
    assert!(!inherited.declared);

    derived.override_member("value", None, None).unwrap();
    let overridden = derived.find_member("value").unwrap();
    assert!(overridden.declared);
    assert!(base.find_member("value").unwrap().declared);

    let keys: Vec<&str> = derived.members().iter().map(|m| m.key.as_str()).collect();
    assert_eq!(keys.iter().filter(|k| **k == "value").count(), 1);
}

#[test]
fn two_private_members_requesting_the_same_name_get_suffixed() {
    let bundle = Bundle::new();
    let class = EsClass::new(&bundle, "Widget", None).unwrap();
    let first = class.declare_member("test", MemberKind::Field, true, None, None).unwrap();
    let second = class.declare_member("test", MemberKind::Field, true, None, None).unwrap();

    assert_eq!(first.key, "#test");
    assert_eq!(second.key, "#test$0");
}

#[test]
fn redeclaring_a_public_member_already_declared_here_fails() {
    let bundle = Bundle::new();
    let class = EsClass::new(&bundle, "Widget", None).unwrap();
    class.declare_member("value", MemberKind::Field, false, None, None).unwrap();
    let err = class.declare_member("value", MemberKind::Field, false, None, None).unwrap_err();
    assert!(matches!(err, esgen::EsgenError::AlreadyDeclared(_, _)));
}

#[test]
fn instantiating_with_args_and_no_constructor_or_base_fails() {
    let bundle = Bundle::new();
    let class = EsClass::new(&bundle, "Widget", None).unwrap();
    let mut values = indexmap::IndexMap::new();
    values.insert("x".to_string(), esgen::CallValue::Expr("1".to_string()));
    let err = class.instantiate(values).unwrap_err();
    assert!(matches!(err, esgen::EsgenError::ConstructorNotDeclared(ref name) if name == "Widget"));
}

#[test]
fn instantiating_with_no_args_and_no_constructor_or_base_synthesizes_an_empty_one() {
    let bundle = Bundle::new();
    let class = EsClass::new(&bundle, "Widget", None).unwrap();
    let call = class.instantiate(indexmap::IndexMap::new()).unwrap();
    assert_eq!(call, "new Widget()");
}

#[test]
fn declare_renders_a_base_and_derived_class_with_override() {
    let output = generate(|bundle, root| {
        let raw = bundle.bundle();
        let base = EsClass::new(raw, "A", None)?;
        base.declare_member("value", MemberKind::Field, false, Some("1".to_string()), None)?;
        base.declare_constructor(Signature::empty())?;

        let derived = EsClass::new(raw, "B", Some(base.clone()))?;
        derived.find_member("value");
        derived.override_member("value", Some("2".to_string()), None)?;

        let scope = bundle.root_scope();
        let base_decl = base.declare(&scope)?;
        let derived_decl = derived.declare(&scope)?;
        root.write_fragment(&base_decl)?;
        root.write_fragment(&derived_decl)?;
        Ok(())
    })
    .unwrap();

    assert_eq!(
        output,
        "class A {\n  constructor() {\n  }\n  value = 1;\n}\nclass B extends A {\n  value = 2;\n}\n"
    );
}
