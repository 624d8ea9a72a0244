//! Human and machine readable renderings.
//!
//! - **Parse trees** via [`describe_node()`] and [`describe_statements()`]:
//!   one line per node, children indented by two spaces
//! - **Variables as JSON** via [`variables_to_json()`]: an object mapping each
//!   name to its value, in slot order. Values JSON cannot represent (NaN,
//!   infinities) become `null`
//!
//! # Examples
//!
//! ```
//! use cexpr_lang::{Equation, ParseMode};
//! use cexpr_lang::output::describe_node;
//!
//! let eq = Equation::parse("x = 2 + y", &["x", "y"], ParseMode::Fixed).unwrap();
//! assert_eq!(
//!     describe_node(eq.root()),
//!     "Assign\n  Variable: x\n  Add\n    Constant: 2\n    Variable: y\n"
//! );
//! ```

use crate::{
    ast::{NAryOp, Node, PrintArg, Statement},
    numeric::{format_number, is_equal},
    variables::VariableTable,
};

pub struct TreePrinter {
    out: String,
    indent: usize,
}

impl TreePrinter {
    pub fn new() -> Self {
        TreePrinter {
            out: String::new(),
            indent: 0,
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, text: &str) {
        self.out.push_str(&"  ".repeat(self.indent));
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Writes `label`, then whatever `children` writes one level deeper.
    fn nested(&mut self, label: &str, children: impl FnOnce(&mut Self)) {
        self.line(label);
        self.indent += 1;
        children(self);
        self.indent -= 1;
    }

    pub fn node(&mut self, node: &Node) {
        match node {
            Node::Constant(value) => self.line(&format!("Constant: {}", format_number(*value))),
            Node::Variable(var) => self.line(&format!("Variable: {}", var.name)),
            Node::Unresolved(name) => self.line(&format!("Unknown variable: {}", name)),
            Node::Unary { op, operand } => self.nested(op.name(), |p| p.node(operand)),
            Node::Binary { op, left, right } => self.nested(op.name(), |p| {
                p.node(left);
                p.node(right);
            }),
            Node::NAry { op, args } => {
                let label = match op {
                    NAryOp::Print => "Print",
                };
                self.nested(label, |p| {
                    for arg in args {
                        match arg {
                            PrintArg::Text(text) => p.line(&format!("String: \"{}\"", text)),
                            PrintArg::Expr(expr) => p.node(expr),
                        }
                    }
                });
            }
            Node::Assign { target, value } => self.nested("Assign", |p| {
                p.node(target);
                p.node(value);
            }),
            Node::CompoundAssign { op, target, value } => self.nested(op.name(), |p| {
                p.node(target);
                p.node(value);
            }),
            Node::Increment { target, delta } => {
                let label = if *delta < 0.0 { "Decrement" } else { "Increment" };
                self.nested(label, |p| p.node(target));
            }
            Node::Conditional {
                test,
                then,
                otherwise,
            } => self.nested("If", |p| {
                p.nested("Condition", |p| p.node(test));
                p.nested("Then", |p| p.node(then));
                p.nested("Else", |p| p.node(otherwise));
            }),
        }
    }

    pub fn statements(&mut self, statements: &[Statement]) {
        for statement in statements {
            match statement {
                Statement::Equation { expr, line } => {
                    self.nested(&format!("Equation (line {})", line), |p| p.node(expr));
                }
                Statement::If {
                    condition,
                    then,
                    otherwise,
                    line,
                } => self.nested(&format!("If (line {})", line), |p| {
                    p.nested("Condition", |p| p.node(user_condition(condition)));
                    p.nested("Then", |p| p.statements(then));
                    if let Some(otherwise) = otherwise {
                        p.nested("Else", |p| p.statements(otherwise));
                    }
                }),
                Statement::While {
                    condition,
                    body,
                    line,
                } => self.nested(&format!("While loop (line {})", line), |p| {
                    p.nested("Condition", |p| p.node(user_condition(condition)));
                    p.nested("Body", |p| p.statements(body));
                }),
            }
        }
    }
}

impl Default for TreePrinter {
    fn default() -> Self {
        Self::new()
    }
}

/// Strips the `if(condition, 1, 0)` wrapper scripts put around conditions.
fn user_condition(node: &Node) -> &Node {
    match node {
        Node::Conditional {
            test,
            then,
            otherwise,
        } if matches!(**then, Node::Constant(t) if is_equal(t, 1.0))
            && matches!(**otherwise, Node::Constant(e) if is_equal(e, 0.0)) =>
        {
            test.as_ref()
        }
        _ => node,
    }
}

pub fn describe_node(node: &Node) -> String {
    let mut printer = TreePrinter::new();
    printer.node(node);
    printer.finish()
}

pub fn describe_statements(statements: &[Statement]) -> String {
    let mut printer = TreePrinter::new();
    printer.statements(statements);
    printer.finish()
}

/// Variables as a JSON object, in slot order.
pub fn variables_to_json(variables: &VariableTable) -> serde_json::Value {
    let map = variables
        .iter()
        .map(|(name, value)| {
            let value = serde_json::Number::from_f64(value)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null);
            (name.to_string(), value)
        })
        .collect();
    serde_json::Value::Object(map)
}

/// Compact or pretty JSON text, e.g. of [`variables_to_json`].
pub fn to_json(value: &serde_json::Value, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
