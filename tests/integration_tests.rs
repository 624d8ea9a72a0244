use cexpr_lang::{Environment, Equation, ParseMode, Session};

fn capture() -> Environment<Vec<u8>> {
    Environment::with_output(Vec::new())
}

fn printed(env: Environment<Vec<u8>>) -> String {
    String::from_utf8(env.into_output()).unwrap()
}

fn eval(input: &str) -> f64 {
    let none: [&str; 0] = [];
    let mut equation = Equation::parse(input, &none, ParseMode::AutoAdd).unwrap();
    equation.evaluate(&mut capture())
}

/// Evaluates with the given bindings; returns the value, the final
/// variables and what was printed.
fn eval_with(input: &str, bindings: &[(&str, f64)]) -> (f64, Equation, String) {
    let names: Vec<&str> = bindings.iter().map(|(name, _)| *name).collect();
    let mut equation = Equation::parse(input, &names, ParseMode::AutoAdd).unwrap();
    for (name, value) in bindings {
        equation.set(name, *value);
    }
    let mut env = capture();
    let value = equation.evaluate(&mut env);
    (value, equation, printed(env))
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

// ============================================================================
// Arithmetic
// ============================================================================

#[test]
fn test_arithmetic() {
    assert_eq!(eval("2+3*4"), 14.0);
    assert_eq!(eval("(2+3)*4"), 20.0);
    assert_eq!(eval("2^10"), 1024.0);
    assert_eq!(eval("2^3^2"), 64.0);
    assert_eq!(eval("10 % 3"), 1.0);
    assert_eq!(eval("-7 % 3"), -1.0);
    assert_eq!(eval("7 - 2 - 1"), 4.0);
    assert_eq!(eval("-2^2"), 4.0);
    assert_eq!(eval("0x10 + 0b11 + 0o7"), 26.0);
}

#[test]
fn test_ieee_results_instead_of_errors() {
    assert_eq!(eval("1/0"), f64::INFINITY);
    assert_eq!(eval("-1/0"), f64::NEG_INFINITY);
    assert!(eval("0/0").is_nan());
    assert!(eval("sqrt(-1)").is_nan());
    assert!(eval("undefined_so_far / 0").is_nan());
}

// ============================================================================
// Comparison and Logic
// ============================================================================

#[test]
fn test_comparisons() {
    assert_eq!(eval("1 < 2"), 1.0);
    assert_eq!(eval("2 < 2"), 0.0);
    assert_eq!(eval("2 <= 2"), 1.0);
    assert_eq!(eval("3 > 2"), 1.0);
    assert_eq!(eval("2 >= 3"), 0.0);
    assert_eq!(eval("1 != 2"), 1.0);
}

#[test]
fn test_equality_tolerates_rounding() {
    assert_eq!(eval("0.1 + 0.2 == 0.3"), 1.0);
    assert_eq!(eval("0.1 + 0.2 != 0.3"), 0.0);
    assert_eq!(eval("0.1 + 0.2 <= 0.3"), 1.0);
    assert_eq!(eval("0.3 >= 0.1 + 0.2"), 1.0);
    assert_eq!(eval("1 == 1.0001"), 0.0);
}

#[test]
fn test_logical_operators() {
    assert_eq!(eval("1 && 2"), 1.0);
    assert_eq!(eval("1 && 0"), 0.0);
    assert_eq!(eval("0 || 0"), 0.0);
    assert_eq!(eval("0 || -3"), 1.0);
}

#[test]
fn test_logical_operators_do_not_short_circuit() {
    let (value, equation, _) = eval_with("0 && ++x", &[("x", 0.0)]);
    assert_eq!(value, 0.0);
    assert_eq!(equation.get("x"), Some(1.0));

    let (value, equation, _) = eval_with("1 || ++x", &[("x", 0.0)]);
    assert_eq!(value, 1.0);
    assert_eq!(equation.get("x"), Some(1.0));
}

#[test]
fn test_if_is_lazy() {
    let (value, equation, _) = eval_with("if(1, 2, ++x)", &[("x", 0.0)]);
    assert_eq!(value, 2.0);
    assert_eq!(equation.get("x"), Some(0.0));

    let (value, equation, _) = eval_with("if(x, ++y, 7)", &[("x", 0.0), ("y", 0.0)]);
    assert_eq!(value, 7.0);
    assert_eq!(equation.get("y"), Some(0.0));
}

// ============================================================================
// Assignment
// ============================================================================

#[test]
fn test_assignment_chain_sets_every_target() {
    let (value, equation, _) = eval_with("a=b=c=5", &[("a", 0.0), ("b", 0.0), ("c", 0.0)]);
    assert_eq!(value, 5.0);
    assert_eq!(equation.values(), &[5.0, 5.0, 5.0]);
}

#[test]
fn test_assignment_value_is_usable() {
    let (value, equation, _) = eval_with("(a = 2) * 3", &[]);
    assert_eq!(value, 6.0);
    assert_eq!(equation.get("a"), Some(2.0));
}

#[test]
fn test_compound_assignment() {
    let cases = [
        ("x += 3", 5.0),
        ("x -= 3", -1.0),
        ("x *= 3", 6.0),
        ("x /= 4", 0.5),
    ];
    for (input, expected) in cases {
        let (value, equation, _) = eval_with(input, &[("x", 2.0)]);
        assert_eq!(value, expected, "Failed for input: {}", input);
        assert_eq!(equation.get("x"), Some(expected), "Failed for input: {}", input);
    }
}

#[test]
fn test_compound_assignment_in_a_chain() {
    // b = 3, then a = a + 3
    let (value, equation, _) = eval_with("a += b = 3", &[("a", 10.0), ("b", 0.0)]);
    assert_eq!(value, 13.0);
    assert_eq!(equation.get("a"), Some(13.0));
    assert_eq!(equation.get("b"), Some(3.0));
}

#[test]
fn test_chained_compound_assignments_write_once() {
    // b = 1 + 1, then a = 10 + 2
    let (value, equation, _) = eval_with("a += b += 1", &[("a", 10.0), ("b", 1.0)]);
    assert_eq!(equation.get("b"), Some(2.0));
    assert_eq!(equation.get("a"), Some(12.0));
    assert_eq!(value, 12.0);

    let (value, equation, _) = eval_with("a *= b -= c = 4", &[("a", 3.0), ("b", 10.0), ("c", 0.0)]);
    assert_eq!(equation.get("c"), Some(4.0));
    assert_eq!(equation.get("b"), Some(6.0));
    assert_eq!(equation.get("a"), Some(18.0));
    assert_eq!(value, 18.0);
}

#[test]
fn test_increment_and_decrement() {
    let (value, equation, _) = eval_with("++x", &[("x", 4.0)]);
    assert_eq!(value, 5.0);
    assert_eq!(equation.get("x"), Some(5.0));

    let (value, equation, _) = eval_with("--x * 2", &[("x", 4.0)]);
    assert_eq!(value, 6.0);
    assert_eq!(equation.get("x"), Some(3.0));
}

// ============================================================================
// Built-in Functions
// ============================================================================

#[test]
fn test_builtin_functions() {
    assert_eq!(eval("sqrt(16)"), 4.0);
    assert_close(eval("cbrt(27)"), 3.0);
    assert_eq!(eval("pow(2, 3)"), 8.0);
    assert_close(eval("log(exp(2))"), 2.0);
    assert_close(eval("ln(exp(1))"), 1.0);
    assert_close(eval("log10(1000)"), 3.0);
    assert_eq!(eval("abs(-3)"), 3.0);
    assert_eq!(eval("fabs(-3)"), 3.0);
    assert_eq!(eval("ceil(1.2)"), 2.0);
    assert_eq!(eval("floor(-1.2)"), -2.0);
    assert_eq!(eval("min(1, 2)"), 1.0);
    assert_eq!(eval("max(1, 2)"), 2.0);
    assert_close(eval("atan2(1, 1)"), std::f64::consts::FRAC_PI_4);
    assert_close(eval("sin(PI / 2)"), 1.0);
    assert_close(eval("cos(0)"), 1.0);
    assert_close(eval("degToRad(180)"), std::f64::consts::PI);
    assert_close(eval("radToDeg(PI)"), 180.0);
    assert_close(eval("asinh(sinh(0.5))"), 0.5);
}

#[test]
fn test_round_and_sign() {
    assert_eq!(eval("round(2.5)"), 3.0);
    assert_eq!(eval("round(-2.5)"), -3.0);
    assert_eq!(eval("round(2.4)"), 2.0);
    assert_eq!(eval("sign(-0.5)"), -1.0);
    assert_eq!(eval("sign(0)"), 1.0);
    assert_eq!(eval("sign(8)"), 1.0);
}

// ============================================================================
// Print
// ============================================================================

#[test]
fn test_print_single_variable() {
    let (value, _, output) = eval_with("print(x)", &[("x", 3.5)]);
    assert_eq!(value, 3.5);
    assert_eq!(output, "x = 3.5\n");
}

#[test]
fn test_print_values_and_strings() {
    let (value, _, output) = eval_with(r#"print(1,2,"hi")"#, &[]);
    assert_eq!(value, 2.0);
    assert_eq!(output, "1 2 hi\n");

    let (value, _, output) = eval_with(r#"print("x + 1 is", x + 1)"#, &[("x", 1.0)]);
    assert_eq!(value, 2.0);
    assert_eq!(output, "x + 1 is 2\n");
}

#[test]
fn test_print_edge_cases() {
    let (value, _, output) = eval_with(r#"print("only text")"#, &[]);
    assert_eq!(value, 0.0);
    assert_eq!(output, "only text\n");

    let (value, _, output) = eval_with("print()", &[]);
    assert_eq!(value, 0.0);
    assert_eq!(output, "\n");

    let (_, _, output) = eval_with("print(1/3, 1/0, 1e20)", &[]);
    assert_eq!(output, "0.333333333333 inf 1e+20\n");
}

// ============================================================================
// Random Numbers
// ============================================================================

#[test]
fn test_urand_range_and_seed() {
    let none: [&str; 0] = [];
    let mut equation = Equation::parse("urand(2, 5)", &none, ParseMode::Fixed).unwrap();
    let mut env = capture();
    for _ in 0..200 {
        let value = equation.evaluate(&mut env);
        assert!((2.0..5.0).contains(&value), "out of range: {}", value);
    }
    assert_eq!(eval("urand(4, 4)"), 4.0);
}

#[test]
fn test_rands_reseeds_the_environment() {
    let none: [&str; 0] = [];
    let mut seed = Equation::parse("rands(7)", &none, ParseMode::Fixed).unwrap();
    let mut draw = Equation::parse("urand(0, 1) + nrand(0, 1)", &none, ParseMode::Fixed).unwrap();

    let mut env = capture();
    draw.evaluate(&mut env);
    assert_eq!(seed.evaluate(&mut env), 7.0);
    let first = draw.evaluate(&mut env);

    let mut other = capture();
    other.random_mut().reseed(7);
    assert_eq!(draw.evaluate(&mut other), first);
    assert_eq!(env.random().seed(), 7);
}

#[test]
fn test_rands_truncates_seed() {
    assert_eq!(eval("rands(12.9)"), 12.0);
    assert_eq!(eval("rands(-3)"), 0.0);
}

#[test]
fn test_nrand_mean() {
    let none: [&str; 0] = [];
    let mut equation = Equation::parse("nrand(10, 2)", &none, ParseMode::Fixed).unwrap();
    let mut env = capture();
    let n = 4000;
    let mean = (0..n).map(|_| equation.evaluate(&mut env)).sum::<f64>() / n as f64;
    assert!((mean - 10.0).abs() < 0.3, "mean was {}", mean);
}

// ============================================================================
// Equation Values
// ============================================================================

#[test]
fn test_evaluate_with_caller_values() {
    let mut equation = Equation::parse("y = 2 * x", &["x", "y"], ParseMode::Fixed).unwrap();
    let mut values = [21.0, 0.0];
    let value = equation.evaluate_with(&mut values, &mut capture());
    assert_eq!(value, 42.0);
    assert_eq!(values, [21.0, 42.0]);
}

#[test]
fn test_set_unknown_variable() {
    let mut equation = Equation::parse("x", &["x"], ParseMode::Fixed).unwrap();
    assert!(equation.set("x", 1.0));
    assert!(!equation.set("nope", 1.0));
    assert_eq!(equation.get("nope"), None);
}

// ============================================================================
// Session
// ============================================================================

#[test]
fn test_session_keeps_variables_between_lines() {
    let mut session = Session::with_environment(capture());
    assert_eq!(session.eval_line("a = 2").unwrap(), 2.0);
    assert_eq!(session.eval_line("b = a * 3").unwrap(), 6.0);
    assert_eq!(session.eval_line("a + b").unwrap(), 8.0);
    assert_eq!(session.variables().names(), &["a", "b"]);
}

#[test]
fn test_session_error_keeps_state() {
    let mut session = Session::with_environment(capture());
    session.eval_line("a = 2").unwrap();
    assert!(session.eval_line("a +").is_err());
    assert_eq!(session.get("a"), Some(2.0));
}

#[test]
fn test_session_script_reparsed_after_reset() {
    let mut session = Session::with_environment(capture());
    session.load_script("total = total + step;").unwrap();
    session.set("step", 2.0);
    assert!(session.run_script().unwrap());
    assert!(session.run_script().unwrap());
    assert_eq!(session.get("total"), Some(4.0));

    // new slot layout: the script must follow the names, not old indices
    session.reset_variables(&["step", "other", "total"]);
    session.set("step", 5.0);
    assert!(session.run_script().unwrap());
    assert_eq!(session.get("total"), Some(5.0));
    assert_eq!(session.get("other"), Some(0.0));
}

#[test]
fn test_session_print_goes_to_environment() {
    let mut session = Session::with_environment(capture());
    session.eval_line("x = 1.25").unwrap();
    session.eval_line("print(x)").unwrap();
    let output = printed(session.into_environment());
    assert_eq!(output, "x = 1.25\n");
}

#[test]
fn test_session_without_script() {
    let mut session = Session::with_environment(capture());
    assert!(!session.has_script());
    assert!(!session.run_script().unwrap());
}
