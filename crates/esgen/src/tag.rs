//! Tag-template code joiner (collaborator glue,
//! listed because its signature is part of the external surface even
//! though its internals are trivial).

use esgen_core::EsgenResult;
use esgen_symbols::{CodeFragment, Scope};

/// Join alternating literal parts and embedded fragments into one inline
/// code fragment, e.g. the Rust analogue of a `` code`${a} + ${b}` ``
/// tagged template: `parts` has one more entry than `fragments`.
pub fn join_code(scope: &Scope, parts: &[&str], fragments: &[CodeFragment]) -> EsgenResult<CodeFragment> {
    let frag = scope.span()?;
    frag.line(|inline| {
        for (i, part) in parts.iter().enumerate() {
            if !part.is_empty() {
                let _ = inline.write(*part);
            }
            if let Some(f) = fragments.get(i) {
                let _ = inline.write_fragment(f);
            }
        }
    })?;
    Ok(frag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use esgen_symbols::Bundle;

    #[test]
    fn joins_parts_and_fragments_in_order() {
        let bundle = Bundle::new();
        let scope = bundle.root_scope();
        let a = scope.span().unwrap();
        a.write("a").unwrap();
        let joined = join_code(&scope, &["(", ") + 1"], std::slice::from_ref(&a)).unwrap();
        assert_eq!(joined.emit(&scope).as_str(), "(a) + 1\n");
    }
}
