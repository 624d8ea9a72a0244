//! Documentation content for the cexpr CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Constants,
    Functions,
    Operators,
    Script,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "constants" | "constant" | "const" => Some(Self::Constants),
            "functions" | "function" | "fn" => Some(Self::Functions),
            "operators" | "operator" | "ops" => Some(Self::Operators),
            "script" | "scripts" => Some(Self::Script),
            _ => None,
        }
    }

    pub fn content(&self) -> &'static str {
        match self {
            Self::Constants => CONSTANTS_DOC,
            Self::Functions => FUNCTIONS_DOC,
            Self::Operators => OPERATORS_DOC,
            Self::Script => SCRIPT_DOC,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"CEXPR DOCUMENTATION

cexpr evaluates C-like mathematical expressions and small scripts. Every value
is a double precision number; comparisons return 1 for true and 0 for false.

DOCUMENTATION CATEGORIES

  constants         Built-in constants
  functions         Built-in functions (sqrt, pow, if, print, ...)
  operators         Arithmetic, comparison, logical and assignment operators
  script            Statements, conditionals, loops and comments

QUICK REFERENCE

  cexpr eval "2 + 3 * 4"                     Evaluate one expression
  cexpr eval "x^2" --var x=3                 Bind a variable
  cexpr run -f script.cx -v y=48 --runs 5    Run a script five times
  cexpr vars -f script.cx                    List the variables of a script
  cexpr tree "a = b = 0"                     Show the parse tree

Run 'cexpr doc <category>' for details.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    DocCategory::from_name(name)
        .map(|category| category.content())
        .ok_or_else(|| CliError::UnknownCategory(name.to_string()))
}

const CONSTANTS_DOC: &str = r#"CONSTANTS - Built-in Values

  PI                3.14159265359

PI cannot be assigned to; it is replaced by its value when parsed.
"#;

const FUNCTIONS_DOC: &str = r#"FUNCTIONS - Built-in Functions

POWERS AND LOGARITHMS

  sqrt(x)           The square root of x
  cbrt(x)           The cubic root of x
  pow(x, y)         x raised to the power of y
  exp(x)            The exponential of x (e raised to the power of x)
  log10(x)          The base 10 logarithm of x
  log(x)            The natural logarithm of x
  ln(x)             Same as log(x)

ROUNDING

  ceil(x)           Round x up
  floor(x)          Round x down
  round(x)          Round x to the nearest integer, halves away from zero
  fabs(x)           Absolute value of x
  abs(x)            Same as fabs(x)
  sign(x)           -1 if x is negative, 1 otherwise
  min(x, y)         The smaller of x and y
  max(x, y)         The bigger of x and y

TRIGONOMETRY

  cos(x)  sin(x)  tan(x)         Angles in radians
  acos(x) asin(x) atan(x)        Inverse functions
  atan2(y, x)                    Arc tangent of y/x using the signs of both
  cosh(x) sinh(x) tanh(x)        Hyperbolic functions
  acosh(x) asinh(x) atanh(x)     Inverse hyperbolic functions
  degToRad(x)                    Degrees to radians
  radToDeg(x)                    Radians to degrees

RANDOM NUMBERS

  urand(min, max)   Uniform random number between min and max
  nrand(mean, sd)   Normal random number
  rands(seed)       Reseed the generator; returns the seed

CONTROL AND OUTPUT

  if(x, y, z)       y if x is not zero, z otherwise. Only the chosen
                    branch is evaluated.
  print(x)          Prints "x = <value>" for a single variable
  print(a, "b", c)  Prints values and strings separated by spaces

Strings are only allowed inside print().
"#;

const OPERATORS_DOC: &str = r#"OPERATORS - From Loosest to Tightest Binding

ASSIGNMENT

  x = y             Set x to y and return y. a = b = 0 sets both.
  x += y            Also -=, *= and /=

LOGICAL (both sides are always evaluated)

  x || y            1 if x or y is not zero
  x && y            1 if x and y are not zero

COMPARISON

  x == y            Equality, tolerant to rounding (100 ULPs)
  x != y            Inequality
  x < y   x > y     Strict comparison
  x <= y  x >= y    Comparison with the same tolerance as ==

ARITHMETIC

  x + y   x - y     Addition, subtraction
  x * y   x / y     Multiplication, division (1/0 is inf)
  x % y             Floating point remainder
  x^y               Power, evaluated left to right: 2^3^2 is 64

UNARY

  -x  +x            Sign
  ++x --x           Add or subtract 1 and store the result in x
"#;

const SCRIPT_DOC: &str = r#"SCRIPT - Statements and Control Flow

A script consists of one or more expressions terminated by ';'. It can also
contain conditional statements and loops, and it can use variables.

EXAMPLE

  variable1 = variable2 * 1.56325 + 17.4;
  if (variable1 >= 0) {
    variable1 = sqrt(variable1);
  }
  // This is a valid comment.
  # This is another valid comment.
  /* And so is this. */
  variable4 = 0;
  if (variable1 > 1) {
    variable3 = 1 / sqrt(variable1 - 1);
    variable4 = variable3 + 1;
  } else if (variable1 > 0) {
    variable3 = 1 / sqrt(variable1);
    variable4 = variable3 - 1;
  } else {
    if (variable2 != 0) {
      variable3 = 1 / variable2;
    }
  }
  while (variable4 > 1) {
    variable4 = variable4 / 2;
  }

NOTES

  Blocks always need braces.
  A while loop whose condition never becomes 0 never ends.
  Variables keep their values between runs.
"#;
