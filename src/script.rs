//! # Scripts
//!
//! A script is a sequence of `;`-terminated expressions plus `if` / `else if`
//! / `else` and `while` blocks:
//!
//! ```text
//! // halve y, or divide it by 2z
//! if (z == 0) {
//!     x = y;
//! } else {
//!     x = y / (2 * z);
//! }
//! z = z + 1;
//! ```
//!
//! Parsing happens in two steps. [`source::normalize`] strips comments and
//! cuts the text into units holding one statement piece or one brace, each
//! tagged with its original line. [`block::BlockParser`] then walks those
//! units, extracts conditions and blocks, and hands every leaf expression to
//! the expression parser. Conditions become `if(<condition>, 1, 0)`
//! expressions.
//!
//! [`Script::compile`] first runs the whole pipeline in auto-add mode only to
//! collect variable names, then parses for real against that fixed list.
//!
//! ```
//! use cexpr_lang::{Environment, Script};
//!
//! let mut script = Script::compile("n = 0; while (n < 5) { n += 1; }").unwrap();
//! let mut env = Environment::with_output(Vec::new());
//! script.run(&mut env);
//! assert_eq!(script.get("n"), Some(5.0));
//! ```

pub mod block;
pub mod source;

use std::io::Write;

use crate::{
    ast::Statement,
    error::ParseError,
    evaluator::Environment,
    variables::{ParseMode, VariableTable},
};

use block::BlockParser;

/// Parses a whole script against `variables`.
pub fn parse_statements(
    source: &str,
    variables: &mut VariableTable,
    mode: ParseMode,
) -> Result<Vec<Statement>, ParseError> {
    let units = source::normalize(source);
    let mut parser = BlockParser::new(variables, mode);
    let statements = parser.parse_script(&units);
    let diagnostics = parser.into_diagnostics();
    if diagnostics.is_empty() {
        Ok(statements)
    } else {
        Err(ParseError::new(diagnostics))
    }
}

/// A parsed script and the variables it owns.
#[derive(Debug, Clone)]
pub struct Script {
    source: String,
    statements: Vec<Statement>,
    variables: VariableTable,
}

impl Script {
    /// Parses `source` against a fixed list of variable names. Any other
    /// identifier is an error.
    pub fn parse<S: AsRef<str>>(source: &str, names: &[S]) -> Result<Self, ParseError> {
        let mut variables = VariableTable::with_names(names);
        let statements = parse_statements(source, &mut variables, ParseMode::Fixed)?;
        Ok(Script {
            source: source.to_string(),
            statements,
            variables,
        })
    }

    /// Every variable name used in `source`, in order of first appearance.
    ///
    /// Parse errors are ignored: names are collected from whatever parsed.
    pub fn variables_in(source: &str) -> Vec<String> {
        let mut variables = VariableTable::new();
        let _ = parse_statements(source, &mut variables, ParseMode::AutoAdd);
        variables.names().to_vec()
    }

    /// Discovers the variables of `source`, then parses it against them.
    pub fn compile(source: &str) -> Result<Self, ParseError> {
        let names = Script::variables_in(source);
        Script::parse(source, &names)
    }

    /// Runs every statement once with the current values.
    pub fn run<W: Write>(&mut self, env: &mut Environment<W>) {
        env.evaluator(self.variables.values_mut())
            .exec(&self.statements);
    }

    /// Loads `values` slot by slot, runs, and writes the values back.
    pub fn run_with<W: Write>(&mut self, values: &mut [f64], env: &mut Environment<W>) {
        self.variables.load(values);
        self.run(env);
        self.variables.store(values);
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn variables(&self) -> &[String] {
        self.variables.names()
    }

    pub fn table(&self) -> &VariableTable {
        &self.variables
    }

    pub fn values(&self) -> &[f64] {
        self.variables.values()
    }

    pub fn values_mut(&mut self) -> &mut [f64] {
        self.variables.values_mut()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.variables.get(name)
    }

    /// Sets a variable. Returns false if the script has no such variable.
    pub fn set(&mut self, name: &str, value: f64) -> bool {
        self.variables.set(name, value)
    }
}
