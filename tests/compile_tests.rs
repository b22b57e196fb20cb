// tests/compile_tests.rs

use sigil::ast::Node;
use sigil::{compile, compile_source, compile_source_with, read, CompileOptions, ErrorType};

fn js(source: &str) -> String {
    let result = compile_source(source);
    assert!(result.is_ok(), "Compilation of {:?} failed: {:?}", source, result);
    result.unwrap()
}

// ---
// Lists
// ---

#[test]
fn empty_list_renders_as_empty_array() {
    assert_eq!(js("()"), "[]");
}

#[test]
fn list_with_non_identifier_head_renders_as_array() {
    assert_eq!(js("(1 2 3)"), "[1, 2, 3]");
    assert_eq!(js("(:a b)"), r#"["a", b]"#);
}

#[test]
fn unknown_head_renders_as_call() {
    assert_eq!(js("(foo 1 2)"), "foo(1, 2)");
    assert_eq!(js("(f)"), "f()");
    assert_eq!(js("(foo (bar :x) [1 2])"), r#"foo(bar("x"), [1, 2])"#);
}

#[test]
fn list_head_keeps_the_form_a_collection() {
    assert_eq!(js("((quote (f)) 1)"), "[[f], 1]");
    assert_eq!(js("((g) 1)"), "[g(), 1]");
}

// ---
// quote
// ---

#[test]
fn quote_suppresses_calls() {
    assert_eq!(js("(quote (quote 1))"), "[quote, 1]");
    assert_eq!(js("(quote (foo 1))"), "[foo, 1]");
    assert_eq!(js("(quote x)"), "x");
}

#[test]
fn quoted_list_elements_still_render_nested_forms() {
    assert_eq!(js("(quote (a (b 1)))"), "[a, b(1)]");
}

#[test]
fn quote_arity_errors_surface_from_rendering() {
    let err = compile_source("(quote a b)").unwrap_err();
    assert_eq!(err.error_type(), ErrorType::Expansion);
}

// ---
// Objects and literals
// ---

#[test]
fn identifier_keys_render_plain() {
    assert_eq!(js(r#"{name "x"}"#), "{\n  name: \"x\"\n}");
}

#[test]
fn computed_keys_render_in_brackets() {
    assert_eq!(js(r#"{("a") "x"}"#), "{\n  [[\"a\"]]: \"x\"\n}");
    assert_eq!(js(r#"{"two words" 1}"#), "{\n  [\"two words\"]: 1\n}");
    assert_eq!(js("{1 2}"), "{\n  [1]: 2\n}");
}

#[test]
fn object_values_expand() {
    assert_eq!(
        js("{a (f 1), b (quote (g))}"),
        "{\n  a: f(1),\n  b: [g]\n}"
    );
}

#[test]
fn empty_object() {
    assert_eq!(js("{}"), "{}");
}

#[test]
fn keywords_render_as_strings() {
    assert_eq!(js(":foo"), r#""foo""#);
    assert_eq!(js("[:a :b $c _d]"), r#"["a", "b", $c, _d]"#);
}

#[test]
fn backslashes_are_escaped_on_output() {
    assert_eq!(js(r#""no \escapes""#), r#""no \\escapes""#);
}

// ---
// Whole programs
// ---

#[test]
fn each_form_renders_on_its_own_line() {
    assert_eq!(js("(a) (b 1)\n:c"), "a()\nb(1)\n\"c\"");
}

#[test]
fn custom_line_end_joins_forms() {
    let options = CompileOptions::default().line_end(";\n");
    assert_eq!(compile_source_with("(a) (b)", &options).unwrap(), "a();\nb()");
}

#[test]
fn syntax_errors_abort_the_whole_program() {
    let err = compile_source("(a) (b").unwrap_err();
    assert_eq!(err.error_type(), ErrorType::Syntax);
}

#[test]
fn rendering_is_deterministic() {
    let node = read(r#"(f {a [1 2] "b c" (quote (x y))} (g))"#).unwrap().unwrap();
    let first = compile(&node).unwrap();
    for _ in 0..5 {
        assert_eq!(compile(&node).unwrap(), first);
    }
}

#[test]
fn rendering_does_not_mutate_the_tree() {
    let node = read("(f (g) (quote (h)))").unwrap().unwrap();
    let before = node.clone();
    compile(&node).unwrap();
    assert_eq!(node, before);
    assert!(matches!(node, Node::ListExpression(_)));
}

#[test]
fn compiles_concurrently() {
    let handles: Vec<_> = (0..4)
        .map(|i| std::thread::spawn(move || compile_source(&format!("(f {})", i)).unwrap()))
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("f({})", i));
    }
}

#[test]
fn overlong_digit_runs_render_as_null() {
    let digits = "9".repeat(400);
    assert_eq!(js(&digits), "null");
}
