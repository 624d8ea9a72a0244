use crate::ast::{AssignOp, BinOp, NAryOp, UnaryOp};

/// Reference from an AST node to a slot of the variable value array.
///
/// The node does not own the value: it holds the slot index in the
/// [`VariableTable`](crate::variables::VariableTable) the tree was parsed
/// against, plus the name for printing and tree descriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarRef {
    pub index: usize,
    pub name: String,
}

/// One argument of `print(...)`.
#[derive(Debug, Clone, PartialEq)]
pub enum PrintArg {
    /// Quoted string literal, printed verbatim
    Text(String),
    /// Expression, printed with 12 significant digits
    Expr(Node),
}

/// Abstract Syntax Tree node of an expression.
///
/// Built once by the [`Parser`](crate::parser::Parser) and evaluated any
/// number of times by the [`Evaluator`](crate::evaluator::Evaluator).
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Numeric literal or the `PI` constant
    ///
    /// # Example
    /// ```text
    /// 42
    /// 0x2A
    /// PI
    /// ```
    Constant(f64),

    /// Variable lookup
    Variable(VarRef),

    /// Unary minus or one-argument built-in
    ///
    /// # Example
    /// ```text
    /// -x
    /// sqrt(x)
    /// ```
    Unary { op: UnaryOp, operand: Box<Node> },

    /// Infix operator or two-argument built-in
    ///
    /// # Example
    /// ```text
    /// a + b
    /// atan2(y, x)
    /// ```
    Binary {
        op: BinOp,
        left: Box<Node>,
        right: Box<Node>,
    },

    /// Variadic built-in
    ///
    /// # Example
    /// ```text
    /// print("x is", x)
    /// ```
    NAry { op: NAryOp, args: Vec<PrintArg> },

    /// Plain assignment, returns the assigned value
    ///
    /// # Example
    /// ```text
    /// a = 3
    /// a = b = c = 0
    /// ```
    Assign { target: Box<Node>, value: Box<Node> },

    /// Compound assignment
    ///
    /// # Example
    /// ```text
    /// a += 2
    /// ```
    CompoundAssign {
        op: AssignOp,
        target: Box<Node>,
        value: Box<Node>,
    },

    /// Prefix `++` / `--`, desugared to adding `delta` to the target
    Increment { target: Box<Node>, delta: f64 },

    /// `if(test, then, else)`: only the selected branch is evaluated
    Conditional {
        test: Box<Node>,
        then: Box<Node>,
        otherwise: Box<Node>,
    },

    /// Identifier that failed to resolve. The parser keeps going after an
    /// unknown variable to report further problems, but a tree containing
    /// this node is never returned from a parse.
    Unresolved(String),
}

impl Node {
    /// Whether a value can be written through this node.
    ///
    /// A variable is assignable, and so is an assignment whose own value
    /// side is assignable, which is what makes `a = b = c = 0` work.
    pub fn is_assignable(&self) -> bool {
        match self {
            Node::Variable(_) | Node::Unresolved(_) => true,
            Node::Assign { value, .. } | Node::CompoundAssign { value, .. } => value.is_assignable(),
            _ => false,
        }
    }

    /// True for a bare variable reference.
    pub fn is_variable(&self) -> bool {
        matches!(self, Node::Variable(_) | Node::Unresolved(_))
    }

    pub(crate) fn unary(op: UnaryOp, operand: Node) -> Node {
        Node::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub(crate) fn binary(op: BinOp, left: Node, right: Node) -> Node {
        Node::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}
