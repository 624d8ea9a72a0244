//! Evaluate expressions and run scripts for the CLI

use std::io::Write;

use super::CliError;
use crate::{Environment, Equation, ParseMode, Script, output};

/// Options for the eval command
#[derive(Debug, Clone, Default)]
pub struct EvalOptions {
    /// The expression to evaluate
    pub expression: String,
    /// Initial variable values; their names form the variable list
    pub bindings: Vec<(String, f64)>,
    /// Create variables the expression uses but `bindings` does not name
    pub auto: bool,
    /// Seed for `urand` / `nrand`
    pub seed: Option<u32>,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
}

/// Result of an eval operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvalResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Value of the expression
    Value(f64),
}

/// Options for the run command
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Script source text
    pub script: String,
    /// Initial variable values
    pub bindings: Vec<(String, f64)>,
    /// How many times to run the script; values carry over between runs
    pub runs: usize,
    /// Seed for `urand` / `nrand`
    pub seed: Option<u32>,
    /// Only validate syntax, don't run
    pub syntax_only: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            script: String::new(),
            bindings: Vec::new(),
            runs: 1,
            seed: None,
            syntax_only: false,
        }
    }
}

/// Result of a run operation
#[derive(Debug)]
pub enum RunResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Final variable values as a JSON object
    Success(serde_json::Value),
}

fn environment<W: Write>(seed: Option<u32>, output: W) -> Environment<W> {
    let mut env = Environment::with_output(output);
    if let Some(seed) = seed {
        env.random_mut().reseed(seed);
    }
    env
}

fn binding_names(bindings: &[(String, f64)]) -> Vec<&str> {
    bindings.iter().map(|(name, _)| name.as_str()).collect()
}

/// Execute an eval operation. `print` output goes to `output`.
pub fn execute_eval<W: Write>(options: &EvalOptions, output: W) -> Result<EvalResult, CliError> {
    let mode = if options.auto {
        ParseMode::AutoAdd
    } else {
        ParseMode::Fixed
    };
    let mut equation = Equation::parse(&options.expression, &binding_names(&options.bindings), mode)?;

    if options.syntax_only {
        return Ok(EvalResult::SyntaxValid);
    }

    for (name, value) in &options.bindings {
        equation.set(name, *value);
    }
    let mut env = environment(options.seed, output);
    Ok(EvalResult::Value(equation.evaluate(&mut env)))
}

/// Execute a run operation. `print` output goes to `output`.
///
/// The variable list is the bound names followed by the names the script
/// introduces, so a binding the script never reads still shows up in the
/// result.
pub fn execute_run<W: Write>(options: &RunOptions, output: W) -> Result<RunResult, CliError> {
    let mut names: Vec<String> = options.bindings.iter().map(|(name, _)| name.clone()).collect();
    for name in Script::variables_in(&options.script) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    let mut script = Script::parse(&options.script, &names)?;

    if options.syntax_only {
        return Ok(RunResult::SyntaxValid);
    }

    for (name, value) in &options.bindings {
        script.set(name, *value);
    }
    let mut env = environment(options.seed, output);
    for _ in 0..options.runs {
        script.run(&mut env);
    }
    Ok(RunResult::Success(output::variables_to_json(script.table())))
}

/// Variables a script uses, in order of first appearance. Fails if the
/// script does not parse.
pub fn execute_vars(source: &str) -> Result<Vec<String>, CliError> {
    let script = Script::compile(source)?;
    Ok(script.variables().to_vec())
}

/// Parse-tree description of an expression, or of a whole script.
pub fn execute_tree(input: &str, script: bool) -> Result<String, CliError> {
    if script {
        let script = Script::compile(input)?;
        Ok(output::describe_statements(script.statements()))
    } else {
        let none: [&str; 0] = [];
        let equation = Equation::parse(input, &none, ParseMode::AutoAdd)?;
        Ok(output::describe_node(equation.root()))
    }
}
