use std::io::{self, Write};

use crate::{
    ast::{BinOp, NAryOp, Node, PrintArg, Statement, UnaryOp},
    numeric::{format_number, from_bool, is_equal, is_inf_or_equal, is_sup_or_equal, is_true},
    random::RandomState,
};

/// State that outlives a single evaluation: the random generator shared by
/// `urand`, `nrand` and `rands`, and the sink `print` writes to.
///
/// Any `Write` works as a sink; tests use a `Vec<u8>` to capture output.
#[derive(Debug)]
pub struct Environment<W: Write = io::Stdout> {
    random: RandomState,
    output: W,
}

impl Default for Environment<io::Stdout> {
    fn default() -> Self {
        Environment::with_output(io::stdout())
    }
}

impl Environment<io::Stdout> {
    /// Prints to stdout, generator seeded with the default seed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(seed: u32) -> Self {
        let mut env = Environment::new();
        env.random.reseed(seed);
        env
    }
}

impl<W: Write> Environment<W> {
    pub fn with_output(output: W) -> Self {
        Environment {
            random: RandomState::new(),
            output,
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn random(&self) -> &RandomState {
        &self.random
    }

    pub fn random_mut(&mut self) -> &mut RandomState {
        &mut self.random
    }

    /// Evaluator writing into `values`, drawing from this environment.
    pub fn evaluator<'a>(&'a mut self, values: &'a mut [f64]) -> Evaluator<'a> {
        Evaluator::new(values, &mut self.random, &mut self.output)
    }
}

/// Tree-walking evaluator.
///
/// Never fails: arithmetic follows IEEE-754, so `1/0` is infinity and
/// `log(-1)` is NaN. Write errors from `print` are ignored.
pub struct Evaluator<'a> {
    values: &'a mut [f64],
    random: &'a mut RandomState,
    output: &'a mut dyn Write,
}

impl<'a> Evaluator<'a> {
    pub fn new(values: &'a mut [f64], random: &'a mut RandomState, output: &'a mut dyn Write) -> Self {
        Evaluator {
            values,
            random,
            output,
        }
    }

    pub fn eval(&mut self, node: &Node) -> f64 {
        match node {
            Node::Constant(value) => *value,
            Node::Variable(var) => self.values.get(var.index).copied().unwrap_or(f64::NAN),
            Node::Unary { op, operand } => {
                let value = self.eval(operand);
                self.eval_unary(*op, value)
            }
            Node::Binary { op, left, right } => {
                // Both sides are always evaluated, `&&` and `||` included
                let left = self.eval(left);
                let right = self.eval(right);
                self.eval_binary(*op, left, right)
            }
            Node::NAry { op, args } => match op {
                NAryOp::Print => self.print(args),
            },
            Node::Assign { target, value } => {
                let value = self.eval(value);
                self.assign(target, value)
            }
            Node::CompoundAssign { op, target, value } => {
                let current = self.current_value(target);
                let operand = self.eval(value);
                self.assign(target, op.apply(current, operand))
            }
            Node::Increment { target, delta } => {
                let value = self.eval(target) + delta;
                self.assign(target, value)
            }
            Node::Conditional {
                test,
                then,
                otherwise,
            } => {
                if is_true(self.eval(test)) {
                    self.eval(then)
                } else {
                    self.eval(otherwise)
                }
            }
            Node::Unresolved(_) => f64::NAN,
        }
    }

    /// Writes `value` through an assignable node and returns what was
    /// written.
    ///
    /// For an assignment chain the value goes to the innermost value side
    /// first and the result is then written to the target, so
    /// `(a = b) <- 5` sets `b` and then `a`. A compound assignment used as a
    /// target combines its own current value with the written one. Nodes that
    /// are not assignable leave everything untouched and return `value`.
    pub fn assign(&mut self, target: &Node, value: f64) -> f64 {
        match target {
            Node::Variable(var) => {
                if let Some(slot) = self.values.get_mut(var.index) {
                    *slot = value;
                }
                value
            }
            Node::Assign { target, value: inner } => {
                let written = self.assign(inner, value);
                self.assign(target, written)
            }
            Node::CompoundAssign {
                op,
                target,
                value: inner,
            } => {
                let operand = self.assign(inner, value);
                let current = self.current_value(target);
                self.assign(target, op.apply(current, operand))
            }
            _ => value,
        }
    }

    /// Value held by the variable an assignable node writes to last, read
    /// without evaluating anything. For an assignment chain that is the
    /// innermost value side.
    fn current_value(&self, node: &Node) -> f64 {
        match node {
            Node::Variable(var) => self.values.get(var.index).copied().unwrap_or(f64::NAN),
            Node::Assign { value, .. } | Node::CompoundAssign { value, .. } => {
                self.current_value(value)
            }
            _ => f64::NAN,
        }
    }

    /// Runs statements in order.
    ///
    /// A `while` whose condition never reaches zero never returns.
    pub fn exec(&mut self, statements: &[Statement]) {
        for statement in statements {
            match statement {
                Statement::Equation { expr, .. } => {
                    self.eval(expr);
                }
                Statement::If {
                    condition,
                    then,
                    otherwise,
                    ..
                } => {
                    if is_true(self.eval(condition)) {
                        self.exec(then);
                    } else if let Some(otherwise) = otherwise {
                        self.exec(otherwise);
                    }
                }
                Statement::While {
                    condition, body, ..
                } => {
                    while is_true(self.eval(condition)) {
                        self.exec(body);
                    }
                }
            }
        }
    }

    fn eval_unary(&mut self, op: UnaryOp, x: f64) -> f64 {
        match op {
            UnaryOp::Negate => -x,
            UnaryOp::Sqrt => x.sqrt(),
            UnaryOp::Cbrt => x.cbrt(),
            UnaryOp::Exp => x.exp(),
            UnaryOp::Log => x.ln(),
            UnaryOp::Log10 => x.log10(),
            UnaryOp::Sin => x.sin(),
            UnaryOp::Cos => x.cos(),
            UnaryOp::Tan => x.tan(),
            UnaryOp::Asin => x.asin(),
            UnaryOp::Acos => x.acos(),
            UnaryOp::Atan => x.atan(),
            UnaryOp::Sinh => x.sinh(),
            UnaryOp::Cosh => x.cosh(),
            UnaryOp::Tanh => x.tanh(),
            UnaryOp::Asinh => x.asinh(),
            UnaryOp::Acosh => x.acosh(),
            UnaryOp::Atanh => x.atanh(),
            UnaryOp::Ceil => x.ceil(),
            UnaryOp::Floor => x.floor(),
            UnaryOp::Abs => x.abs(),
            UnaryOp::Sign => {
                if x < 0.0 {
                    -1.0
                } else {
                    1.0
                }
            }
            UnaryOp::Round => x.round(),
            UnaryOp::DegToRad => x.to_radians(),
            UnaryOp::RadToDeg => x.to_degrees(),
            UnaryOp::RandSeed => {
                // saturating: negative seeds become 0
                let seed = x as u32;
                self.random.reseed(seed);
                f64::from(seed)
            }
        }
    }

    fn eval_binary(&mut self, op: BinOp, l: f64, r: f64) -> f64 {
        match op {
            BinOp::Or => from_bool(is_true(l) || is_true(r)),
            BinOp::And => from_bool(is_true(l) && is_true(r)),
            BinOp::Equal => from_bool(is_equal(l, r)),
            BinOp::NotEqual => from_bool(!is_equal(l, r)),
            BinOp::LessThan => from_bool(l < r),
            BinOp::LessEqual => from_bool(is_inf_or_equal(l, r)),
            BinOp::GreaterThan => from_bool(l > r),
            BinOp::GreaterEqual => from_bool(is_sup_or_equal(l, r)),
            BinOp::Add => l + r,
            BinOp::Subtract => l - r,
            BinOp::Multiply => l * r,
            BinOp::Divide => l / r,
            BinOp::Modulo => l % r,
            BinOp::Power => l.powf(r),
            BinOp::Atan2 => l.atan2(r),
            BinOp::Min => {
                if l < r {
                    l
                } else {
                    r
                }
            }
            BinOp::Max => {
                if l < r {
                    r
                } else {
                    l
                }
            }
            BinOp::URand => self.random.uniform(l, r),
            BinOp::NRand => self.random.normal(l, r),
        }
    }

    /// `print(x)` on a lone variable writes `x = <value>`; anything else
    /// writes every argument separated by one space. Returns the value of the
    /// last expression argument, 0 if there is none.
    fn print(&mut self, args: &[PrintArg]) -> f64 {
        if let [PrintArg::Expr(Node::Variable(var))] = args {
            let value = self.values.get(var.index).copied().unwrap_or(f64::NAN);
            let _ = writeln!(self.output, "{} = {}", var.name, format_number(value));
            return value;
        }

        let mut last = 0.0;
        let mut pieces = Vec::with_capacity(args.len());
        for arg in args {
            match arg {
                PrintArg::Text(text) => pieces.push(text.clone()),
                PrintArg::Expr(node) => {
                    last = self.eval(node);
                    pieces.push(format_number(last));
                }
            }
        }
        let _ = writeln!(self.output, "{}", pieces.join(" "));
        last
    }
}

#[test]
fn test_assign_through_compound_target() {
    use crate::ast::{AssignOp, VarRef};

    let var = |index: usize, name: &str| {
        Box::new(Node::Variable(VarRef {
            index,
            name: name.to_string(),
        }))
    };
    // (a += b) <- 3  writes b = 3, then a = a + 3
    let target = Node::CompoundAssign {
        op: AssignOp::Add,
        target: var(0, "a"),
        value: var(1, "b"),
    };
    let mut values = [10.0, 0.0];
    let mut env = Environment::with_output(Vec::new());
    let written = env.evaluator(&mut values).assign(&target, 3.0);
    assert_eq!(written, 13.0);
    assert_eq!(values, [13.0, 3.0]);
}

#[test]
fn test_assign_to_constant_is_noop() {
    let mut values = [1.0];
    let mut env = Environment::with_output(Vec::new());
    let written = env.evaluator(&mut values).assign(&Node::Constant(2.0), 7.0);
    assert_eq!(written, 7.0);
    assert_eq!(values, [1.0]);
}
