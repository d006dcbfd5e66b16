use esgen_core::sanitize_identifier;

#[test]
fn passes_through_valid_identifiers() {
    assert_eq!(sanitize_identifier("hello"), "hello");
    assert_eq!(sanitize_identifier("_private"), "_private");
    assert_eq!(sanitize_identifier("$jquery"), "$jquery");
    assert_eq!(sanitize_identifier("camelCase123"), "camelCase123");
}

#[test]
fn escapes_unsafe_characters() {
    assert_eq!(sanitize_identifier("a-b"), "a_x2d_b");
    assert_eq!(sanitize_identifier("a.b.c"), "a_x2e_b_x2e_c");
    assert_eq!(sanitize_identifier("100"), "_100");
}

#[test]
fn suffixes_reserved_words() {
    assert_eq!(sanitize_identifier("class"), "class_");
    assert_eq!(sanitize_identifier("default"), "default_");
    assert_eq!(sanitize_identifier("notreserved"), "notreserved");
}

#[test]
fn empty_string_becomes_underscore() {
    assert_eq!(sanitize_identifier(""), "_");
}

fn is_ident_start(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_alphabetic()
}

fn is_ident_continue(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_alphanumeric()
}

proptest::proptest! {
    #[test]
    fn sanitizing_is_idempotent(s in ".{0,20}") {
        let once = sanitize_identifier(&s);
        let twice = sanitize_identifier(&once);
        proptest::prop_assert_eq!(once, twice);
    }

    #[test]
    fn always_produces_a_valid_identifier(s in ".{0,20}") {
        let sanitized = sanitize_identifier(&s);
        let mut chars = sanitized.chars();
        let first = chars.next().expect("sanitized identifier is never empty");
        proptest::prop_assert!(is_ident_start(first));
        proptest::prop_assert!(chars.all(is_ident_continue));
    }
}
