// tests/reader_tests.rs

use sigil::ast::{Literal, LiteralValue, Node, Property};
use sigil::errors::{Construct, SyntaxErrorKind};
use sigil::{read, read_all, ErrorType, Reader};

// A helper to read exactly one form.
fn read_one(source: &str) -> Node {
    read(source)
        .expect("read should succeed")
        .expect("input should contain a form")
}

fn syntax_kind(source: &str) -> SyntaxErrorKind {
    let err = read_all(source).expect_err("read should fail");
    assert_eq!(err.error_type(), ErrorType::Syntax);
    err.syntax_kind().cloned().expect("syntax error kind")
}

fn object_properties(node: Node) -> Vec<Property> {
    match node {
        Node::ObjectExpression(object) => object.properties,
        other => panic!("Expected an object, got {:?}", other),
    }
}

// ---
// Atoms
// ---

#[test]
fn test_read_identifier() {
    assert_eq!(read_one("foo"), Node::identifier("foo"));
    assert_eq!(read_one("$el_2"), Node::identifier("$el_2"));
    assert_eq!(read_one("λ"), Node::identifier("λ"));
}

#[test]
fn test_read_number() {
    assert_eq!(read_one("42"), Node::number(42.0));
    assert_eq!(read_one("007"), Node::number(7.0));
}

#[test]
fn test_number_stops_at_first_non_digit() {
    let forms = read_all("123abc").unwrap();
    assert_eq!(forms, vec![Node::number(123.0), Node::identifier("abc")]);
}

#[test]
fn test_read_string_without_escapes() {
    assert_eq!(read_one(r#""hello world""#), Node::string("hello world"));
    assert_eq!(read_one(r#""a\nb""#), Node::string(r"a\nb"));
    assert_eq!(read_one(r#""""#), Node::string(""));
}

#[test]
fn test_keyword_reads_as_string() {
    assert_eq!(read_one(":foo"), Node::string("foo"));
    assert!(matches!(
        read_one(":foo"),
        Node::Literal(Literal { value: LiteralValue::String(ref s) }) if s == "foo"
    ));
}

// ---
// Compound forms
// ---

#[test]
fn test_read_list() {
    let node = read_one("(add 1 2)");
    assert_eq!(
        node,
        Node::list(vec![
            Node::identifier("add"),
            Node::number(1.0),
            Node::number(2.0)
        ])
    );
}

#[test]
fn test_read_array_and_nesting() {
    let node = read_one("[1 (f [2]) :x]");
    assert_eq!(
        node,
        Node::array(vec![
            Node::number(1.0),
            Node::list(vec![Node::identifier("f"), Node::array(vec![Node::number(2.0)])]),
            Node::string("x"),
        ])
    );
}

#[test]
fn test_commas_are_whitespace() {
    let node = read_one("(a,b,, c\n\t,d)");
    assert_eq!(node.pretty(), "(a b c d)");
}

#[test]
fn test_empty_forms() {
    assert_eq!(read_one("()"), Node::list(vec![]));
    assert_eq!(read_one("[ ]"), Node::array(vec![]));
    assert_eq!(read_one("{,}"), Node::object(vec![]));
}

// ---
// Object keys
// ---

#[test]
fn test_identifier_key_is_plain() {
    let props = object_properties(read_one(r#"{name "x"}"#));
    assert_eq!(props.len(), 1);
    assert_eq!(props[0].key, Node::identifier("name"));
    assert_eq!(props[0].value, Node::string("x"));
    assert!(!props[0].computed);
}

#[test]
fn test_string_key_becomes_identifier() {
    let props = object_properties(read_one(r#"{"name" 1 :age 2}"#));
    assert_eq!(props[0].key, Node::identifier("name"));
    assert!(!props[0].computed);
    assert_eq!(props[1].key, Node::identifier("age"));
    assert!(!props[1].computed);
}

#[test]
fn test_non_identifier_keys_are_computed() {
    let props = object_properties(read_one(r#"{"two words" 1 2 3 ("a") 4}"#));
    assert_eq!(props[0].key, Node::string("two words"));
    assert!(props[0].computed);
    assert_eq!(props[1].key, Node::number(2.0));
    assert!(props[1].computed);
    assert_eq!(props[2].key, Node::list(vec![Node::string("a")]));
    assert!(props[2].computed);
}

// ---
// Top-level sequencing
// ---

#[test]
fn test_read_returns_first_form_only() {
    assert_eq!(read_one("a b c"), Node::identifier("a"));
}

#[test]
fn test_read_all_in_source_order() {
    let forms = read_all(" (f) , x\n[1] ").unwrap();
    let pretty: Vec<_> = forms.iter().map(Node::pretty).collect();
    assert_eq!(pretty, vec!["(f)", "x", "[1]"]);
}

#[test]
fn test_whitespace_only_reads_nothing() {
    assert_eq!(read(" ,\n ").unwrap(), None);
    assert!(read_all("").unwrap().is_empty());
}

#[test]
fn test_reader_iterator_is_not_restartable() {
    let mut reader = Reader::new("a b");
    assert_eq!(reader.by_ref().count(), 2);
    assert!(reader.next().is_none());
}

// ---
// Failures
// ---

#[test]
fn test_unclosed_list_fails() {
    assert_eq!(
        syntax_kind("(1 2"),
        SyntaxErrorKind::UnexpectedEnd(Construct::Expression)
    );
    assert_eq!(
        syntax_kind("(1 2 ,"),
        SyntaxErrorKind::UnexpectedEnd(Construct::Expression)
    );
    assert_eq!(
        syntax_kind("[1 (2)"),
        SyntaxErrorKind::UnexpectedEnd(Construct::Expression)
    );
}

#[test]
fn test_stray_close_fails() {
    assert_eq!(syntax_kind("}"), SyntaxErrorKind::UnexpectedCharacter('}'));
    assert_eq!(syntax_kind("(a]"), SyntaxErrorKind::UnexpectedCharacter(']'));
}

#[test]
fn test_unsupported_characters_fail() {
    assert_eq!(syntax_kind("-1"), SyntaxErrorKind::UnexpectedCharacter('-'));
    assert_eq!(syntax_kind("(a.b)"), SyntaxErrorKind::UnexpectedCharacter('.'));
}

#[test]
fn test_unclosed_object_fails() {
    assert_eq!(
        syntax_kind("{a 1"),
        SyntaxErrorKind::UnexpectedEnd(Construct::Object)
    );
    assert_eq!(
        syntax_kind("{a"),
        SyntaxErrorKind::MissingElement("property value")
    );
    assert_eq!(syntax_kind("{a }"), SyntaxErrorKind::UnexpectedCharacter('}'));
}

#[test]
fn test_unterminated_string_fails() {
    assert_eq!(
        syntax_kind(r#"(f "abc)"#),
        SyntaxErrorKind::UnexpectedEnd(Construct::String)
    );
}

#[test]
fn test_error_message_names_the_condition() {
    let err = read("(1 2").unwrap_err();
    assert_eq!(err.to_string(), "Syntax error: unexpected end of expression");
    let err = read("}").unwrap_err();
    assert_eq!(err.to_string(), "Syntax error: unexpected character: }");
}

#[test]
fn test_error_span_points_at_offending_character() {
    let err = read_all("(a b) )").unwrap_err();
    let span = err.span().expect("syntax errors carry a span");
    assert_eq!((span.start, span.end), (6, 7));
}

#[test]
fn test_end_of_input_errors_label_the_end() {
    for source in ["(1 2", "{a 1", "\"abc", "[", "{a"] {
        let err = read(source).unwrap_err();
        let output = format!("{:?}", miette::Report::new(err));
        let label = if source == "{a" { "missing here" } else { "input ends here" };
        assert!(
            output.contains(label),
            "No end-of-input label for {:?}:\n{}",
            source,
            output
        );
    }
}

#[test]
fn test_combining_mark_is_not_an_identifier() {
    assert_eq!(
        syntax_kind("{\u{0345}x 1}"),
        SyntaxErrorKind::UnexpectedCharacter('\u{0345}')
    );
    assert_eq!(read_one("é\u{0301}").pretty(), "é");
}
