#![cfg(feature = "cli")]

use cexpr_lang::cli::{
    self, CliError, DocCategory, EvalOptions, EvalResult, RunOptions, RunResult,
};

fn bindings(pairs: &[(&str, f64)]) -> Vec<(String, f64)> {
    pairs.iter().map(|(name, value)| (name.to_string(), *value)).collect()
}

// ============================================================================
// eval
// ============================================================================

#[test]
fn test_eval_with_bindings() {
    let options = EvalOptions {
        expression: "x^2 + y".to_string(),
        bindings: bindings(&[("x", 3.0), ("y", 1.0)]),
        ..Default::default()
    };
    let result = cli::execute_eval(&options, Vec::new()).unwrap();
    assert_eq!(result, EvalResult::Value(10.0));
}

#[test]
fn test_eval_unbound_variable_needs_auto() {
    let mut options = EvalOptions {
        expression: "z + 1".to_string(),
        ..Default::default()
    };
    match cli::execute_eval(&options, Vec::new()) {
        Err(CliError::Parse(err)) => assert_eq!(err.len(), 1),
        other => panic!("expected a parse error, got {:?}", other),
    }

    options.auto = true;
    let result = cli::execute_eval(&options, Vec::new()).unwrap();
    assert_eq!(result, EvalResult::Value(1.0));
}

#[test]
fn test_eval_syntax_only() {
    let options = EvalOptions {
        expression: "print(1, \"two\")".to_string(),
        syntax_only: true,
        ..Default::default()
    };
    let mut output = Vec::new();
    let result = cli::execute_eval(&options, &mut output).unwrap();
    assert_eq!(result, EvalResult::SyntaxValid);
    assert!(output.is_empty());
}

#[test]
fn test_eval_print_goes_to_output() {
    let options = EvalOptions {
        expression: "print(\"value\", 1.5)".to_string(),
        ..Default::default()
    };
    let mut output = Vec::new();
    cli::execute_eval(&options, &mut output).unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), "value 1.5\n");
}

#[test]
fn test_eval_seed_is_reproducible() {
    let options = EvalOptions {
        expression: "urand(0, 100)".to_string(),
        seed: Some(11),
        ..Default::default()
    };
    let first = cli::execute_eval(&options, Vec::new()).unwrap();
    let second = cli::execute_eval(&options, Vec::new()).unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// run
// ============================================================================

#[test]
fn test_run_script_several_times() {
    let options = RunOptions {
        script: "if (z==0) { x=y; } else { x=y/(2*z); }\nz=z+1;".to_string(),
        bindings: bindings(&[("y", 48.0)]),
        runs: 5,
        ..Default::default()
    };
    let RunResult::Success(json) = cli::execute_run(&options, Vec::new()).unwrap() else {
        panic!("expected variables");
    };
    assert_eq!(json.to_string(), r#"{"y":48.0,"z":5.0,"x":6.0}"#);
}

#[test]
fn test_run_keeps_unused_bindings() {
    let options = RunOptions {
        script: "a = 1;".to_string(),
        bindings: bindings(&[("unused", 2.5)]),
        ..Default::default()
    };
    let RunResult::Success(json) = cli::execute_run(&options, Vec::new()).unwrap() else {
        panic!("expected variables");
    };
    assert_eq!(json["unused"], 2.5);
    assert_eq!(json["a"], 1.0);
}

#[test]
fn test_run_syntax_only_and_errors() {
    let mut options = RunOptions {
        script: "x = 1;\nwhile (x) { x = 0; }".to_string(),
        syntax_only: true,
        ..Default::default()
    };
    assert!(matches!(
        cli::execute_run(&options, Vec::new()),
        Ok(RunResult::SyntaxValid)
    ));

    options.script = "x = 1\n".to_string();
    let err = cli::execute_run(&options, Vec::new()).unwrap_err();
    assert!(err.to_string().contains("line 1: unexpected end of script"), "{}", err);
}

// ============================================================================
// vars / tree
// ============================================================================

#[test]
fn test_vars() {
    let names = cli::execute_vars("total = total + price * qty;").unwrap();
    assert_eq!(names, vec!["total", "price", "qty"]);
    assert!(cli::execute_vars("if x {").is_err());
}

#[test]
fn test_tree() {
    assert_eq!(
        cli::execute_tree("a = -b", false).unwrap(),
        "Assign\n  Variable: a\n  Change sign\n    Variable: b\n"
    );
    assert_eq!(
        cli::execute_tree("while (n) { n -= 1; }", true).unwrap(),
        "While loop (line 1)\n  Condition\n    Variable: n\n  Body\n    Equation (line 1)\n      Subtract and assign\n        Variable: n\n        Constant: 1\n"
    );
}

// ============================================================================
// bindings
// ============================================================================

#[test]
fn test_collect_bindings() {
    let pairs = vec!["x=1".to_string(), "y = 2.5".to_string()];
    let result = cli::collect_bindings(&pairs, Some(r#"{"x": 0, "w": null}"#)).unwrap();
    assert_eq!(result[0], ("x".to_string(), 1.0));
    assert!(result[1].1.is_nan());
    assert_eq!(result[2], ("y".to_string(), 2.5));

    let bad = vec!["nonsense".to_string()];
    assert!(matches!(
        cli::collect_bindings(&bad, None),
        Err(CliError::InvalidBinding(_))
    ));
    assert!(matches!(
        cli::collect_bindings(&[], Some("{oops")),
        Err(CliError::Json(_))
    ));
}

// ============================================================================
// docs
// ============================================================================

#[test]
fn test_docs_overview_lists_categories() {
    let overview = cli::get_docs_overview();
    for category in ["constants", "functions", "operators", "script"] {
        assert!(overview.contains(category), "missing {}", category);
        assert!(cli::get_doc_category(category).is_ok());
    }
}

#[test]
fn test_doc_category_aliases() {
    assert_eq!(DocCategory::from_name("FUNCTIONS"), Some(DocCategory::Functions));
    assert_eq!(DocCategory::from_name("ops"), Some(DocCategory::Operators));
    assert_eq!(DocCategory::from_name("nothing"), None);
    assert!(DocCategory::Functions.content().contains("urand(min, max)"));
}

#[test]
fn test_unknown_doc_category() {
    match cli::get_doc_category("nope") {
        Err(CliError::UnknownCategory(name)) => assert_eq!(name, "nope"),
        other => panic!("expected an unknown category, got {:?}", other),
    }
}
