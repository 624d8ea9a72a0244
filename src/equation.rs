//! Single expression front end.
//!
//! ```
//! use cexpr_lang::{Environment, Equation, ParseMode};
//!
//! let mut eq = Equation::parse("y = 2 * x + 1", &["x"], ParseMode::AutoAdd).unwrap();
//! eq.set("x", 4.0);
//! let mut env = Environment::with_output(Vec::new());
//! assert_eq!(eq.evaluate(&mut env), 9.0);
//! assert_eq!(eq.get("y"), Some(9.0));
//! assert_eq!(eq.variables(), &["x", "y"]);
//! ```

use std::io::Write;

use crate::{
    ast::Node,
    error::ParseError,
    evaluator::Environment,
    parser,
    variables::{ParseMode, VariableTable},
};

/// A parsed expression and the variables it owns.
#[derive(Debug, Clone)]
pub struct Equation {
    source: String,
    root: Node,
    variables: VariableTable,
}

impl Equation {
    /// Parses `text` against the given variable names.
    ///
    /// With [`ParseMode::AutoAdd`], unknown names are appended after `names`
    /// in order of first appearance.
    pub fn parse<S: AsRef<str>>(text: &str, names: &[S], mode: ParseMode) -> Result<Self, ParseError> {
        let mut variables = VariableTable::with_names(names);
        let root = parser::parse(text, &mut variables, mode)?;
        Ok(Equation {
            source: text.to_string(),
            root,
            variables,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Evaluates with the values currently held by the equation.
    pub fn evaluate<W: Write>(&mut self, env: &mut Environment<W>) -> f64 {
        env.evaluator(self.variables.values_mut()).eval(&self.root)
    }

    /// Loads `values` slot by slot, evaluates, and writes the (possibly
    /// assigned) values back.
    pub fn evaluate_with<W: Write>(&mut self, values: &mut [f64], env: &mut Environment<W>) -> f64 {
        self.variables.load(values);
        let result = self.evaluate(env);
        self.variables.store(values);
        result
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

    /// Sets a variable. Returns false if the equation has no such variable.
    pub fn set(&mut self, name: &str, value: f64) -> bool {
        self.variables.set(name, value)
    }
}
