use esgen::{generate, CallValue, DeclarationPolicy, EsFunction, FunctionAs, Placement, Signature};
use indexmap::indexmap;
use pretty_assertions::assert_eq;

#[test]
fn variadic_call_renders_end_to_end_through_generate() {
    let output = generate(|bundle, root| {
        let log = EsFunction::new(bundle.bundle(), "logAll", Signature::new(["arg", "...rest"])?, false, false)?
            .with_auto_declaration(
                DeclarationPolicy {
                    placement: Placement::Bundle,
                    as_kind: FunctionAs::Function,
                },
                |body, _scope| {
                    let _ = body.write("console.log(arg, ...rest);");
                },
            );

        let full = log.call(indexmap! {
            "arg".to_string() => CallValue::from("1"),
            "rest".to_string() => CallValue::from(["2", "3"]),
        })?;
        root.write(format!("{full};"))?;

        let arg_only = log.call(indexmap! {
            "arg".to_string() => CallValue::from("1"),
        })?;
        root.write(format!("{arg_only};"))?;
        Ok(())
    })
    .unwrap();

    assert!(output.contains("logAll(1, 2, 3);"));
    assert!(output.contains("logAll(1);"));
}
