//! Long-lived evaluation state for interactive and batch front ends.
//!
//! A [`Session`] keeps one variable table across every line it evaluates, so
//! `a = 2` followed by `a * 3` yields 6. It can also hold one script that
//! runs against the same variables.
//!
//! Trees only remember slot indices. When the variable set is replaced with
//! [`Session::reset_variables`], the table's generation changes and the
//! loaded script is parsed again before its next run.

use std::io::{self, Write};

use crate::{
    ast::Statement,
    error::ParseError,
    evaluator::Environment,
    parser,
    script::{self, Script},
    variables::{ParseMode, VariableTable},
};

#[derive(Debug, Clone)]
struct LoadedScript {
    source: String,
    statements: Vec<Statement>,
    /// Table generation the statements were parsed against
    generation: u64,
}

#[derive(Debug)]
pub struct Session<W: Write = io::Stdout> {
    variables: VariableTable,
    env: Environment<W>,
    script: Option<LoadedScript>,
}

impl Default for Session<io::Stdout> {
    fn default() -> Self {
        Session::with_environment(Environment::new())
    }
}

impl Session<io::Stdout> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<W: Write> Session<W> {
    pub fn with_environment(env: Environment<W>) -> Self {
        Session {
            variables: VariableTable::new(),
            env,
            script: None,
        }
    }

    /// Parses one expression, creating any new variables, and evaluates it.
    pub fn eval_line(&mut self, text: &str) -> Result<f64, ParseError> {
        let node = parser::parse(text, &mut self.variables, ParseMode::AutoAdd)?;
        Ok(self.env.evaluator(self.variables.values_mut()).eval(&node))
    }

    /// Parses a script and keeps it for [`Session::run_script`]. Variables
    /// the script uses are added to the session. A failed load keeps the
    /// previously loaded script.
    pub fn load_script(&mut self, source: &str) -> Result<(), ParseError> {
        let statements = self.parse_script(source)?;
        self.script = Some(LoadedScript {
            source: source.to_string(),
            statements,
            generation: self.variables.generation(),
        });
        Ok(())
    }

    /// Runs the loaded script. Returns `Ok(false)` when none is loaded.
    pub fn run_script(&mut self) -> Result<bool, ParseError> {
        let Some(loaded) = self.script.take() else {
            return Ok(false);
        };

        let loaded = if loaded.generation == self.variables.generation() {
            loaded
        } else {
            // the slots the statements point at are gone
            match self.parse_script(&loaded.source) {
                Ok(statements) => LoadedScript {
                    statements,
                    generation: self.variables.generation(),
                    ..loaded
                },
                Err(err) => {
                    self.script = Some(loaded);
                    return Err(err);
                }
            }
        };

        self.env
            .evaluator(self.variables.values_mut())
            .exec(&loaded.statements);
        self.script = Some(loaded);
        Ok(true)
    }

    fn parse_script(&mut self, source: &str) -> Result<Vec<Statement>, ParseError> {
        for name in Script::variables_in(source) {
            self.variables.push(&name);
        }
        script::parse_statements(source, &mut self.variables, ParseMode::Fixed)
    }

    pub fn has_script(&self) -> bool {
        self.script.is_some()
    }

    pub fn script_source(&self) -> Option<&str> {
        self.script.as_ref().map(|s| s.source.as_str())
    }

    /// Replaces the variable set with `names`, all zero.
    pub fn reset_variables<S: AsRef<str>>(&mut self, names: &[S]) {
        self.variables.reset(names);
    }

    pub fn variables(&self) -> &VariableTable {
        &self.variables
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.variables.get(name)
    }

    /// Sets a variable, creating it if needed.
    pub fn set(&mut self, name: &str, value: f64) {
        self.variables.push(name);
        self.variables.set(name, value);
    }

    pub fn environment(&self) -> &Environment<W> {
        &self.env
    }

    pub fn environment_mut(&mut self) -> &mut Environment<W> {
        &mut self.env
    }

    pub fn into_environment(self) -> Environment<W> {
        self.env
    }
}
