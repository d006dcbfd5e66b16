//! Rendering helpers shared by the `Function`/`Class` family for the two
//! callable head shapes this workspace renders: `(args) => { body }` arrow
//! functions and `function name(args) { body }` declarations.

use esgen_core::Printer;

/// Render `[async ](args) => { body }` into `printer`.
pub fn write_lambda(printer: &mut Printer, is_async: bool, params: &str, body: impl FnOnce(&mut Printer)) {
    let head = if is_async {
        format!("async {params} => {{")
    } else {
        format!("{params} => {{")
    };
    printer.print(head);
    printer.indent(body);
    printer.print("}");
}

/// Render `[async ]function [*]name(args) { body }` into `printer`.
pub fn write_function(
    printer: &mut Printer,
    name: &str,
    is_async: bool,
    is_generator: bool,
    params: &str,
    body: impl FnOnce(&mut Printer),
) {
    let asy = if is_async { "async " } else { "" };
    let star = if is_generator { "*" } else { "" };
    printer.print(format!("{asy}function {star}{name}{params} {{"));
    printer.indent(body);
    printer.print("}");
}

/// Render a class method or constructor head: `[async ][*]name(args) {
/// body }`, with no leading `function` keyword.
pub fn write_method(
    printer: &mut Printer,
    name: &str,
    is_async: bool,
    is_generator: bool,
    params: &str,
    body: impl FnOnce(&mut Printer),
) {
    let asy = if is_async { "async " } else { "" };
    let star = if is_generator { "*" } else { "" };
    printer.print(format!("{asy}{star}{name}{params} {{"));
    printer.indent(body);
    printer.print("}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lambda_renders_arrow_body() {
        let mut p = Printer::new();
        write_lambda(&mut p, false, "(text)", |b| b.print("console.log(text);"));
        assert_eq!(p.as_text(), "(text) => {\n  console.log(text);\n}\n");
    }

    #[test]
    fn async_lambda_gets_async_keyword() {
        let mut p = Printer::new();
        write_lambda(&mut p, true, "()", |b| b.print("return 1;"));
        assert_eq!(p.as_text(), "async () => {\n  return 1;\n}\n");
    }

    #[test]
    fn function_renders_named_declaration() {
        let mut p = Printer::new();
        write_function(&mut p, "print", false, false, "(text)", |b| {
            b.print("console.log(text);");
        });
        assert_eq!(p.as_text(), "function print(text) {\n  console.log(text);\n}\n");
    }

    #[test]
    fn generator_function_gets_a_star() {
        let mut p = Printer::new();
        write_function(&mut p, "gen", false, true, "()", |b| b.print("yield 1;"));
        assert_eq!(p.as_text(), "function *gen() {\n  yield 1;\n}\n");
    }

    #[test]
    fn method_renders_without_the_function_keyword() {
        let mut p = Printer::new();
        write_method(&mut p, "greet", false, false, "(name)", |b| b.print("return name;"));
        assert_eq!(p.as_text(), "greet(name) {\n  return name;\n}\n");
    }

    #[test]
    fn constructor_renders_without_the_function_keyword() {
        let mut p = Printer::new();
        write_method(&mut p, "constructor", false, false, "()", |_| {});
        assert_eq!(p.as_text(), "constructor() {\n}\n");
    }
}
