//! # cexpr-lang
//!
//! An embeddable evaluator for C-like mathematical expressions, plus a small
//! script layer with `if` / `else if` / `else` and `while`.
//!
//! Every value is an `f64`. Comparisons and logical operators yield 1 or 0,
//! and any non-zero value counts as true.
//!
//! ```
//! use cexpr_lang::{Environment, Equation, ParseMode};
//!
//! let none: [&str; 0] = [];
//! let mut eq = Equation::parse("a = b = 2 + 3 * 4", &none, ParseMode::AutoAdd).unwrap();
//! let mut env = Environment::with_output(Vec::new());
//! assert_eq!(eq.evaluate(&mut env), 14.0);
//! assert_eq!(eq.get("a"), Some(14.0));
//! assert_eq!(eq.get("b"), Some(14.0));
//! ```

pub mod ast;
pub mod equation;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod numeric;
pub mod output;
pub mod parser;
pub mod random;
pub mod script;
pub mod session;
pub mod variables;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{Node, Statement, Token};
pub use equation::Equation;
pub use error::{Diagnostic, ErrorCategory, ErrorKind, ParseError};
pub use evaluator::{Environment, Evaluator};
pub use lexer::Lexer;
pub use parser::Parser;
pub use random::RandomState;
pub use script::Script;
pub use session::Session;
pub use variables::{ParseMode, VariableTable};
