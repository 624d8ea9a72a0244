/// Single-operand operators: unary minus and every one-argument built-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Unary minus (`-x`)
    Negate,
    /// `sqrt(x)`
    Sqrt,
    /// `cbrt(x)`
    Cbrt,
    /// `exp(x)`
    Exp,
    /// `log(x)` or `ln(x)`, natural logarithm
    Log,
    /// `log10(x)`
    Log10,
    /// `sin(x)`
    Sin,
    /// `cos(x)`
    Cos,
    /// `tan(x)`
    Tan,
    /// `asin(x)`
    Asin,
    /// `acos(x)`
    Acos,
    /// `atan(x)`
    Atan,
    /// `sinh(x)`
    Sinh,
    /// `cosh(x)`
    Cosh,
    /// `tanh(x)`
    Tanh,
    /// `asinh(x)`
    Asinh,
    /// `acosh(x)`
    Acosh,
    /// `atanh(x)`
    Atanh,
    /// `ceil(x)`
    Ceil,
    /// `floor(x)`
    Floor,
    /// `fabs(x)` or `abs(x)`
    Abs,
    /// `sign(x)`: -1 for negative values, 1 otherwise
    Sign,
    /// `round(x)`: nearest integer, halves away from zero
    Round,
    /// `degToRad(x)`
    DegToRad,
    /// `radToDeg(x)`
    RadToDeg,
    /// `rands(seed)`: reseeds the session generator, returns the seed
    RandSeed,
}

impl UnaryOp {
    pub fn name(&self) -> &'static str {
        match self {
            UnaryOp::Negate => "Change sign",
            UnaryOp::Sqrt => "Square root",
            UnaryOp::Cbrt => "Cubic root",
            UnaryOp::Exp => "Exponential",
            UnaryOp::Log => "Natural logarithm",
            UnaryOp::Log10 => "Base 10 logarithm",
            UnaryOp::Sin => "Sine",
            UnaryOp::Cos => "Cosine",
            UnaryOp::Tan => "Tangent",
            UnaryOp::Asin => "Arc sine",
            UnaryOp::Acos => "Arc cosine",
            UnaryOp::Atan => "Arc tangent",
            UnaryOp::Sinh => "Hyperbolic sine",
            UnaryOp::Cosh => "Hyperbolic cosine",
            UnaryOp::Tanh => "Hyperbolic tangent",
            UnaryOp::Asinh => "Inverse hyperbolic sine",
            UnaryOp::Acosh => "Inverse hyperbolic cosine",
            UnaryOp::Atanh => "Inverse hyperbolic tangent",
            UnaryOp::Ceil => "Round up",
            UnaryOp::Floor => "Round down",
            UnaryOp::Abs => "Absolute value",
            UnaryOp::Sign => "Sign",
            UnaryOp::Round => "Round to nearest",
            UnaryOp::DegToRad => "Convert angle from degree to radian",
            UnaryOp::RadToDeg => "Convert angle from radian to degree",
            UnaryOp::RandSeed => "Set seed for random numbers",
        }
    }
}

/// Two-operand operators: infix operators and every two-argument built-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Logical (both operands are always evaluated)
    /// `||`
    Or,
    /// `&&`
    And,

    // Comparison
    /// `==`, ULP tolerant
    Equal,
    /// `!=`, ULP tolerant
    NotEqual,
    /// `<`, exact
    LessThan,
    /// `<=`, ULP tolerant on the equal side
    LessEqual,
    /// `>`, exact
    GreaterThan,
    /// `>=`, ULP tolerant on the equal side
    GreaterEqual,

    // Arithmetic
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`, floating point remainder
    Modulo,
    /// `^` or `pow(x, y)`
    Power,

    // Two-argument built-ins
    /// `atan2(y, x)`
    Atan2,
    /// `min(a, b)`
    Min,
    /// `max(a, b)`
    Max,
    /// `urand(min, max)`, uniform draw from the session generator
    URand,
    /// `nrand(mean, sigma)`, normal draw from the session generator
    NRand,
}

impl BinOp {
    pub fn name(&self) -> &'static str {
        match self {
            BinOp::Or => "Or",
            BinOp::And => "And",
            BinOp::Equal => "Is equal",
            BinOp::NotEqual => "Is not equal",
            BinOp::LessThan => "Is smaller",
            BinOp::LessEqual => "Is equal or smaller",
            BinOp::GreaterThan => "Is greater",
            BinOp::GreaterEqual => "Is equal or greater",
            BinOp::Add => "Add",
            BinOp::Subtract => "Subtract",
            BinOp::Multiply => "Multiply",
            BinOp::Divide => "Divide",
            BinOp::Modulo => "Modulo",
            BinOp::Power => "Pow",
            BinOp::Atan2 => "Arc tangent of two arguments",
            BinOp::Min => "Minimum",
            BinOp::Max => "Maximum",
            BinOp::URand => "Uniform distribution random number",
            BinOp::NRand => "Normal distribution random number",
        }
    }
}

/// Arithmetic applied by a compound assignment (`+=`, `-=`, `*=`, `/=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl AssignOp {
    pub fn apply(&self, current: f64, operand: f64) -> f64 {
        match self {
            AssignOp::Add => current + operand,
            AssignOp::Subtract => current - operand,
            AssignOp::Multiply => current * operand,
            AssignOp::Divide => current / operand,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AssignOp::Add => "Add and assign",
            AssignOp::Subtract => "Subtract and assign",
            AssignOp::Multiply => "Multiply and assign",
            AssignOp::Divide => "Divide and assign",
        }
    }
}

/// Variadic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NAryOp {
    /// `print(arg, ...)`
    Print,
}

/// What a function name resolves to, which also fixes its arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Unary(UnaryOp),
    Binary(BinOp),
    /// `if(test, then, else)`, lazily evaluated
    If,
    /// `print(...)`, any number of arguments, strings allowed
    Print,
}

impl Builtin {
    /// Resolves a function name. Names are case sensitive.
    pub fn lookup(name: &str) -> Option<Builtin> {
        let builtin = match name {
            "sqrt" => Builtin::Unary(UnaryOp::Sqrt),
            "cbrt" => Builtin::Unary(UnaryOp::Cbrt),
            "exp" => Builtin::Unary(UnaryOp::Exp),
            "log" | "ln" => Builtin::Unary(UnaryOp::Log),
            "log10" => Builtin::Unary(UnaryOp::Log10),
            "sin" => Builtin::Unary(UnaryOp::Sin),
            "cos" => Builtin::Unary(UnaryOp::Cos),
            "tan" => Builtin::Unary(UnaryOp::Tan),
            "asin" => Builtin::Unary(UnaryOp::Asin),
            "acos" => Builtin::Unary(UnaryOp::Acos),
            "atan" => Builtin::Unary(UnaryOp::Atan),
            "sinh" => Builtin::Unary(UnaryOp::Sinh),
            "cosh" => Builtin::Unary(UnaryOp::Cosh),
            "tanh" => Builtin::Unary(UnaryOp::Tanh),
            "asinh" => Builtin::Unary(UnaryOp::Asinh),
            "acosh" => Builtin::Unary(UnaryOp::Acosh),
            "atanh" => Builtin::Unary(UnaryOp::Atanh),
            "ceil" => Builtin::Unary(UnaryOp::Ceil),
            "floor" => Builtin::Unary(UnaryOp::Floor),
            "fabs" | "abs" => Builtin::Unary(UnaryOp::Abs),
            "sign" => Builtin::Unary(UnaryOp::Sign),
            "round" => Builtin::Unary(UnaryOp::Round),
            "degToRad" => Builtin::Unary(UnaryOp::DegToRad),
            "radToDeg" => Builtin::Unary(UnaryOp::RadToDeg),
            "rands" => Builtin::Unary(UnaryOp::RandSeed),
            "pow" => Builtin::Binary(BinOp::Power),
            "atan2" => Builtin::Binary(BinOp::Atan2),
            "min" => Builtin::Binary(BinOp::Min),
            "max" => Builtin::Binary(BinOp::Max),
            "urand" => Builtin::Binary(BinOp::URand),
            "nrand" => Builtin::Binary(BinOp::NRand),
            "if" => Builtin::If,
            "print" => Builtin::Print,
            _ => return None,
        };
        Some(builtin)
    }

    /// Fixed argument count, `None` for `print`.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Builtin::Unary(_) => Some(1),
            Builtin::Binary(_) => Some(2),
            Builtin::If => Some(3),
            Builtin::Print => None,
        }
    }
}

#[test]
fn test_lookup_aliases() {
    assert_eq!(Builtin::lookup("ln"), Builtin::lookup("log"));
    assert_eq!(Builtin::lookup("abs"), Some(Builtin::Unary(UnaryOp::Abs)));
    assert_eq!(Builtin::lookup("pow").and_then(|b| b.arity()), Some(2));
    assert_eq!(Builtin::lookup("Sqrt"), None);
}
