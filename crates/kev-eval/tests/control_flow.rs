use kev_eval::{eval_program, Environment, Object};
use kev_parse::parse_source;

fn run_value(src: &str) -> Object {
    let program = parse_source(src).expect("program should parse");
    let env = Environment::new();
    eval_program(&program, &env).expect("program should produce a value")
}

#[test]
fn if_takes_the_truthy_branch() {
    let cases = [
        ("if (true) { 10 }", Some(10)),
        ("if (false) { 10 }", None),
        ("if (1) { 10 }", Some(10)),
        ("if (1 < 2) { 10 }", Some(10)),
        ("if (1 > 2) { 10 }", None),
        ("if (1 > 2) { 10 } else { 20 }", Some(20)),
        ("if (1 < 2) { 10 } else { 20 }", Some(10)),
    ];
    for (src, want) in cases {
        match (run_value(src), want) {
            (Object::Integer(got), Some(want)) => assert_eq!(got, want, "{src}"),
            (Object::Null, None) => {}
            (other, _) => panic!("{src}: unexpected result {other:?}"),
        }
    }
}

#[test]
fn zero_and_empty_string_are_truthy_conditions() {
    assert!(matches!(run_value("if (0) { 1 }"), Object::Integer(1)));
    assert!(matches!(run_value(r#"if ("") { 1 }"#), Object::Integer(1)));
}

#[test]
fn if_without_alternative_yields_null_when_falsy() {
    assert!(matches!(run_value("if (false) { 1 }"), Object::Null));
}

#[test]
fn chaining_requires_nested_if_in_the_else_block() {
    let src = "var grade = func(n) {
        if (n > 89) { \"A\" } else { if (n > 79) { \"B\" } else { \"C\" } }
    };
    grade(85);";
    assert!(matches!(run_value(src), Object::Str(s) if s == b"B"));
}

#[test]
fn return_stops_the_program() {
    let cases = [
        ("return 10;", 10),
        ("return 10; 9;", 10),
        ("return 2 * 5; 9;", 10),
        ("9; return 2 * 5; 9;", 10),
    ];
    for (src, want) in cases {
        assert!(
            matches!(run_value(src), Object::Integer(got) if got == want),
            "{src}"
        );
    }
}

#[test]
fn return_unwinds_through_nested_blocks() {
    let src = "if (10 > 1) {
        if (10 > 1) {
            return 10;
        }
        return 1;
    }";
    assert!(matches!(run_value(src), Object::Integer(10)));
}

#[test]
fn return_inside_a_nested_condition() {
    let src = "if (1 < 2) { if (10 > 1) { return 10; } return 1; }";
    assert!(matches!(run_value(src), Object::Integer(10)));
}

#[test]
fn top_level_return_beats_following_statements() {
    assert!(matches!(
        run_value("if (true) { return 10; } return 1;"),
        Object::Integer(10)
    ));
}

#[test]
fn return_inside_function_reaches_only_the_caller() {
    let src = "var f = func() { if (true) { return 10; } return 1; }; f();";
    assert!(matches!(run_value(src), Object::Integer(10)));

    // the function's return does not end the surrounding program
    let src = "var f = func() { return 10; }; f(); 99;";
    assert!(matches!(run_value(src), Object::Integer(99)));
}
