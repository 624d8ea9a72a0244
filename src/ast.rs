//! # Abstract Syntax Tree
//!
//! Data types shared by the lexer, the parsers and the evaluator.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes (constants, variables, operators, built-ins)
//! - **[operators]** - Operator kinds and the built-in function table
//! - **[statements]** - Script statements (equation, `if`, `while`)
//!
//! ## Quick Start
//!
//! ```text
//! x = y * 1.5 + sqrt(z)
//! ```
//!
//! parses to
//!
//! ```text
//! Assign
//!   Variable: x
//!   Add
//!     Multiply
//!       Variable: y
//!       Constant: 1.5
//!     Square root
//!       Variable: z
//! ```
//!
//! ## Core Concepts
//!
//! ### Everything is a double
//!
//! There is no type system: every expression evaluates to an `f64`, booleans
//! are `1.0` / `0.0`, and a value counts as true when it is not ULP-equal to
//! zero.
//!
//! ### Assignable nodes
//!
//! Assignment targets are checked at parse time with
//! [`Node::is_assignable`]. Variables are assignable, and so are
//! assignments whose value side is assignable, which lets chains such as
//! `a = b = c = 0` write every variable.
//!
//! ### Variables are slots
//!
//! A [`VarRef`] is an index into the value array of the variable table the
//! tree was parsed against. Trees never own values.
pub mod expressions;
pub mod operators;
pub mod statements;
pub mod tokens;

pub use expressions::{Node, PrintArg, VarRef};
pub use operators::{AssignOp, BinOp, Builtin, NAryOp, UnaryOp};
pub use statements::Statement;
pub use tokens::Token;
