use crate::ast::Node;

/// Script statement.
///
/// A script is a sequence of statements. Conditions are parsed as
/// `if(<condition>, 1, 0)` expressions, so evaluating `condition` yields 0 or 1.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Expression statement terminated by `;`
    ///
    /// # Example
    /// ```text
    /// x = y / (2 * z);
    /// ```
    Equation { expr: Node, line: usize },

    /// Conditional block. An `else if` chain is stored as an `If` nested
    /// alone in the `otherwise` list of the previous one.
    ///
    /// # Example
    /// ```text
    /// if (z == 0) { x = y; } else { x = y / (2 * z); }
    /// ```
    If {
        condition: Node,
        then: Vec<Statement>,
        otherwise: Option<Vec<Statement>>,
        line: usize,
    },

    /// Loop, runs until the condition is (ULP-)equal to zero
    ///
    /// # Example
    /// ```text
    /// while (n > 0) { n -= 1; }
    /// ```
    While {
        condition: Node,
        body: Vec<Statement>,
        line: usize,
    },
}

impl Statement {
    /// Line of the original source where the statement starts.
    pub fn line(&self) -> usize {
        match self {
            Statement::Equation { line, .. }
            | Statement::If { line, .. }
            | Statement::While { line, .. } => *line,
        }
    }
}
