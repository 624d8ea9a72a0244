use cexpr_lang::ast::Statement;
use cexpr_lang::error::{Diagnostic, ErrorCategory, ErrorKind};
use cexpr_lang::output::describe_statements;
use cexpr_lang::script::source::{SourceLine, normalize};
use cexpr_lang::{Environment, ParseError, Script};

fn capture() -> Environment<Vec<u8>> {
    Environment::with_output(Vec::new())
}

fn run_once(source: &str, bindings: &[(&str, f64)]) -> Script {
    let mut script = Script::compile(source).unwrap();
    for (name, value) in bindings {
        assert!(script.set(name, *value), "no variable {}", name);
    }
    script.run(&mut capture());
    script
}

fn parse_error(source: &str, names: &[&str]) -> ParseError {
    match Script::parse(source, names) {
        Ok(script) => panic!("expected {:?} to fail, got {:?}", source, script.statements()),
        Err(err) => err,
    }
}

// ============================================================================
// Execution
// ============================================================================

#[test]
fn test_if_else_over_repeated_runs() {
    let source = "if (z==0) { x=y; } else { x=y/(2*z); }\nz=z+1;";
    let mut script = Script::compile(source).unwrap();
    script.set("y", 48.0);
    script.set("z", 0.0);

    let mut env = capture();
    let mut seen = Vec::new();
    for _ in 0..5 {
        script.run(&mut env);
        seen.push(script.get("x").unwrap());
    }
    assert_eq!(seen, vec![48.0, 24.0, 12.0, 8.0, 6.0]);
    assert_eq!(script.get("z"), Some(5.0));
}

#[test]
fn test_else_if_chain() {
    let source = r#"
        if (x > 1) {
            r = 1;
        } else if (x > 0) {
            r = 2;
        } else {
            r = 3;
        }
    "#;
    for (x, expected) in [(2.0, 1.0), (0.5, 2.0), (-1.0, 3.0)] {
        let script = run_once(source, &[("x", x)]);
        assert_eq!(script.get("r"), Some(expected), "Failed for x = {}", x);
    }
}

#[test]
fn test_else_if_without_else() {
    let source = "r = 0; if (x == 1) { r = 1; } else if (x == 2) { r = 2; }";
    assert_eq!(run_once(source, &[("x", 2.0)]).get("r"), Some(2.0));
    assert_eq!(run_once(source, &[("x", 3.0)]).get("r"), Some(0.0));
}

#[test]
fn test_while_loop() {
    let source = "n = 0; s = 0;\nwhile (n < 10) {\n  n += 1;\n  s += n;\n}";
    let script = run_once(source, &[]);
    assert_eq!(script.get("s"), Some(55.0));
}

#[test]
fn test_while_never_entered() {
    let script = run_once("while (0) { x = 1; }", &[]);
    assert_eq!(script.get("x"), Some(0.0));
}

#[test]
fn test_nested_blocks() {
    let source = r#"
        i = 0; c = 0;
        while (i < 3) {
            j = 0;
            while (j < 3) {
                if (i == j) {
                    c += 1;
                }
                j += 1;
            }
            i += 1;
        }
    "#;
    assert_eq!(run_once(source, &[]).get("c"), Some(3.0));
}

#[test]
fn test_comments_and_multiline_statements() {
    let source = "// leading comment\nx = 1; # trailing\n/* block\n comment */ y = x +\n  2;";
    let script = run_once(source, &[]);
    assert_eq!(script.get("y"), Some(3.0));
    assert_eq!(script.variables(), &["x", "y"]);
}

#[test]
fn test_print_in_script() {
    let mut script = Script::compile("x = 2;\nprint(x);\nprint(\"a; {b} // c\", x * 2);").unwrap();
    let mut env = capture();
    script.run(&mut env);
    let output = String::from_utf8(env.into_output()).unwrap();
    assert_eq!(output, "x = 2\na; {b} // c 4\n");
}

#[test]
fn test_run_with_caller_values() {
    let mut script = Script::parse("b = a * 2;", &["a", "b"]).unwrap();
    let mut values = [4.0, 0.0];
    script.run_with(&mut values, &mut capture());
    assert_eq!(values, [4.0, 8.0]);
}

// ============================================================================
// Variables
// ============================================================================

#[test]
fn test_variables_in_order_of_appearance() {
    let source = "b = a + 1;\nif (c) { d = 2; } else { e = b; }\nwhile (f) { f = 0; }";
    assert_eq!(Script::variables_in(source), vec!["b", "a", "c", "d", "e", "f"]);
}

#[test]
fn test_variables_in_ignores_errors() {
    assert_eq!(Script::variables_in("x = 1;\ny = (2"), vec!["x"]);
}

#[test]
fn test_fixed_list_rejects_other_names() {
    let err = parse_error("x = y;", &["x"]);
    assert_eq!(
        err.diagnostics(),
        &[Diagnostic::at_line(ErrorKind::UnknownVariable("y".to_string()), 1)]
    );
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn test_else_if_is_nested() {
    let script = Script::compile("if (a) { b = 1; } else if (c) { b = 2; } else { b = 3; }").unwrap();
    let [Statement::If { otherwise: Some(otherwise), .. }] = script.statements() else {
        panic!("expected a single if statement");
    };
    let [Statement::If { otherwise: Some(last), .. }] = otherwise.as_slice() else {
        panic!("expected the else-if as a nested if");
    };
    assert_eq!(last.len(), 1);
}

#[test]
fn test_statement_lines() {
    let script = Script::compile("x = 1;\n\nif (x > 0) {\n  y = 2;\n}\nwhile (x < 0) { x = 0; }").unwrap();
    let lines: Vec<usize> = script.statements().iter().map(|s| s.line()).collect();
    assert_eq!(lines, vec![1, 3, 6]);
}

#[test]
fn test_script_tree() {
    let script = Script::compile("x = 1;\nif (x > 0) {\n  y = 2;\n}").unwrap();
    assert_eq!(
        describe_statements(script.statements()),
        concat!(
            "Equation (line 1)\n  Assign\n    Variable: x\n    Constant: 1\n",
            "If (line 2)\n  Condition\n    Is greater\n      Variable: x\n      Constant: 0\n",
            "  Then\n    Equation (line 3)\n      Assign\n        Variable: y\n        Constant: 2\n",
        )
    );
}

#[test]
fn test_normalize_units() {
    let units = normalize("if (a) {\n  b = 1; c = 2;\n} else {}");
    let expected = vec![
        SourceLine::new("if (a)", 1),
        SourceLine::new("{", 1),
        SourceLine::new("b = 1;", 2),
        SourceLine::new("c = 2;", 2),
        SourceLine::new("}", 3),
        SourceLine::new("else", 3),
        SourceLine::new("{", 3),
        SourceLine::new("}", 3),
    ];
    assert_eq!(units, expected);
}

// ============================================================================
// Structure Errors
// ============================================================================

#[test]
fn test_structure_errors() {
    let names = ["x", "y"];
    let test_cases = vec![
        ("x = 1;\ny = 2", ErrorKind::UnexpectedEndOfScript, Some(2)),
        (
            "x = 1\nif (x) { y = 1; }",
            ErrorKind::MissingSemicolon {
                before: "if".to_string(),
            },
            Some(2),
        ),
        ("x = 1;\n}", ErrorKind::UnmatchedClosingBrace, Some(2)),
        (
            "if\n{ y = 1; }",
            ErrorKind::ExpectedParenthesis {
                after: "if".to_string(),
            },
            Some(2),
        ),
        (
            "if (x) y = 1;",
            ErrorKind::UnexpectedAfterCondition("y = 1;".to_string()),
            Some(1),
        ),
        ("if () { y = 1; }", ErrorKind::EmptyCondition, Some(1)),
        ("if (x) {\n  y = 1;\n", ErrorKind::UnbalancedBraces, Some(2)),
        ("if (x) {\nx = 2;\n\n// done\n", ErrorKind::UnbalancedBraces, Some(2)),
        ("while (x\n", ErrorKind::UnbalancedConditionParentheses, Some(1)),
        ("while (x >\n  y\n", ErrorKind::UnbalancedConditionParentheses, Some(2)),
        (
            "if (x) { y = 1; } else y = 2;",
            ErrorKind::ExpectedBrace {
                after: "'else'".to_string(),
            },
            Some(1),
        ),
    ];

    for (source, kind, line) in test_cases {
        let err = parse_error(source, &names);
        assert_eq!(err.len(), 1, "Failed for {:?}: {}", source, err);
        let diagnostic = &err.diagnostics()[0];
        assert_eq!(diagnostic.kind, kind, "Failed for {:?}", source);
        assert_eq!(diagnostic.line, line, "Failed for {:?}", source);
        assert_eq!(diagnostic.category(), ErrorCategory::ScriptStructure);
    }
}

#[test]
fn test_keywords_without_parenthesis_are_names() {
    let script = run_once("if = 3;\nwhile = if + 1;\nx = while * 2;", &[]);
    assert_eq!(script.variables(), ["if", "while", "x"]);
    assert_eq!(script.get("x"), Some(8.0));
}

#[test]
fn test_structure_error_only_stops_its_block() {
    let err = parse_error("if (x) {\n  y = 1\n}\nz = w;", &["x", "y", "z"]);
    assert_eq!(
        err.diagnostics(),
        &[
            Diagnostic::at_line(
                ErrorKind::MissingSemicolon {
                    before: "}".to_string()
                },
                2
            ),
            Diagnostic::at_line(ErrorKind::UnknownVariable("w".to_string()), 4),
        ]
    );
    assert_eq!(
        err.to_string(),
        "2 error(s):\n  1: line 2: missing ';' before '}'\n  2: line 4: Unknown variable: w"
    );
}

#[test]
fn test_expression_errors_carry_their_line() {
    let err = parse_error("x = 1;\ny = (x + 1;\nx = y +;", &["x", "y"]);
    let lines: Vec<Option<usize>> = err.diagnostics().iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![Some(2), Some(3)]);
    assert!(err.diagnostics().iter().all(|d| d.category() == ErrorCategory::Syntax));
}
