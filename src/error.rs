//! Parse diagnostics.
//!
//! Nothing in this crate throws while parsing: every problem is recorded as a
//! [`Diagnostic`] and parsing carries on where it can, so that a single pass
//! reports as many independent problems as possible. A parse entry point
//! succeeds only when no diagnostic was recorded; otherwise it returns a
//! [`ParseError`] holding all of them, in the order they were found.
//!
//! Evaluation has no error type at all: arithmetic follows IEEE-754 and yields
//! infinities or NaN instead of failing.

use std::fmt;

/// The three families of diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed numeric literal, unterminated string
    Lex,
    /// Problems building an expression tree
    Syntax,
    /// Problems in the `if` / `else` / `while` / `;` structure of a script
    ScriptStructure,
}

/// Every diagnostic the lexer, the expression parser and the script block
/// parser can report.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    // Lex
    /// A numeric literal that does not decode (`1e`, `0b102`, `0xZ`, `1.2.3`)
    MalformedNumber(String),
    /// A `"` without its closing quote
    UnbalancedQuotes,

    // Syntax
    /// Missing `)` or a `)` without its `(`
    UnbalancedParentheses,
    /// `()`
    EmptyParentheses,
    /// Nothing to parse at all
    NoExpression,
    /// A token that cannot start or continue an expression
    UnexpectedToken(String),
    /// The input ended while an operand was expected
    UnexpectedEnd,
    /// A complete expression was followed by more tokens
    SyntaxErrorNear(String),
    /// A string literal used anywhere but inside `print(...)`
    StringOutsidePrint,
    /// Call to a function that is not built in
    UnknownFunction(String),
    /// Built-in function called with the wrong number of arguments
    WrongArgumentCount { function: String, expected: usize },
    /// Identifier that is not in the variable list (auto-add disabled)
    UnknownVariable(String),
    /// Auto-add mode ran out of variable slots
    VariableCapacityExceeded(String),
    /// Left of `=`, `+=`, ... or operand of `++` / `--` cannot be written to
    NonAssignableTarget,

    // Script structure
    /// Pending statement text without `;` before a keyword or `}`
    MissingSemicolon { before: String },
    /// `if`, `else if` or `while` not followed by `(`
    ExpectedParenthesis { after: String },
    /// A block did not start with `{`
    ExpectedBrace { after: String },
    /// Text between the closing `)` of a condition and the `{`
    UnexpectedAfterCondition(String),
    /// `if ()`
    EmptyCondition,
    /// `}` with no block open
    UnmatchedClosingBrace,
    /// A condition's parentheses never balance
    UnbalancedConditionParentheses,
    /// A block's braces never balance
    UnbalancedBraces,
    /// The script ended inside a statement
    UnexpectedEndOfScript,
}

impl ErrorKind {
    /// The family this diagnostic belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorKind::MalformedNumber(_) | ErrorKind::UnbalancedQuotes => ErrorCategory::Lex,
            ErrorKind::UnbalancedParentheses
            | ErrorKind::EmptyParentheses
            | ErrorKind::NoExpression
            | ErrorKind::UnexpectedToken(_)
            | ErrorKind::UnexpectedEnd
            | ErrorKind::SyntaxErrorNear(_)
            | ErrorKind::StringOutsidePrint
            | ErrorKind::UnknownFunction(_)
            | ErrorKind::WrongArgumentCount { .. }
            | ErrorKind::UnknownVariable(_)
            | ErrorKind::VariableCapacityExceeded(_)
            | ErrorKind::NonAssignableTarget => ErrorCategory::Syntax,
            _ => ErrorCategory::ScriptStructure,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MalformedNumber(text) => write!(f, "Invalid number: {}", text),
            ErrorKind::UnbalancedQuotes => write!(f, "Unbalanced quotes"),
            ErrorKind::UnbalancedParentheses => write!(f, "Unbalanced parentheses"),
            ErrorKind::EmptyParentheses => write!(f, "Empty parentheses"),
            ErrorKind::NoExpression => write!(f, "No expression present"),
            ErrorKind::UnexpectedToken(token) => write!(f, "Unexpected token: {}", token),
            ErrorKind::UnexpectedEnd => write!(f, "Unexpected end of equation"),
            ErrorKind::SyntaxErrorNear(token) => write!(f, "Syntax error near {}", token),
            ErrorKind::StringOutsidePrint => {
                write!(f, "Strings are only supported in print() functions")
            }
            ErrorKind::UnknownFunction(name) => write!(f, "Unknown function: {}()", name),
            ErrorKind::WrongArgumentCount { function, expected } => write!(
                f,
                "{}() expects {} argument{}",
                function,
                expected,
                if *expected == 1 { "" } else { "s" }
            ),
            ErrorKind::UnknownVariable(name) => write!(f, "Unknown variable: {}", name),
            ErrorKind::VariableCapacityExceeded(name) => write!(
                f,
                "Detected variable {} but maximum number of unknown variables has been reached",
                name
            ),
            ErrorKind::NonAssignableTarget => write!(f, "Non assignable target"),
            ErrorKind::MissingSemicolon { before } => write!(f, "missing ';' before '{}'", before),
            ErrorKind::ExpectedParenthesis { after } => write!(f, "'(' expected after '{}'", after),
            ErrorKind::ExpectedBrace { after } => write!(f, "'{{' expected after {}", after),
            ErrorKind::UnexpectedAfterCondition(text) => write!(
                f,
                "'{{' expected after conditional expression but '{}' found",
                text
            ),
            ErrorKind::EmptyCondition => write!(f, "empty conditional expression"),
            ErrorKind::UnmatchedClosingBrace => write!(f, "unexpected '}}'"),
            ErrorKind::UnbalancedConditionParentheses => {
                write!(f, "unexpected end of script (unbalanced parenthesis)")
            }
            ErrorKind::UnbalancedBraces => {
                write!(f, "unexpected end of script (unbalanced '{{' and '}}')")
            }
            ErrorKind::UnexpectedEndOfScript => write!(f, "unexpected end of script"),
        }
    }
}

/// One recorded problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    /// 1-based line in the original script source; `None` for single expressions
    pub line: Option<usize>,
}

impl Diagnostic {
    pub fn new(kind: ErrorKind) -> Self {
        Diagnostic { kind, line: None }
    }

    pub fn at_line(kind: ErrorKind, line: usize) -> Self {
        Diagnostic {
            kind,
            line: Some(line),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// A failed parse. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    /// Wraps a non-empty diagnostic list.
    pub(crate) fn new(diagnostics: Vec<Diagnostic>) -> Self {
        debug_assert!(!diagnostics.is_empty());
        ParseError { diagnostics }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The most recently recorded diagnostic.
    pub fn last(&self) -> Option<&Diagnostic> {
        self.diagnostics.last()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error(s):", self.diagnostics.len())?;
        for (i, diagnostic) in self.diagnostics.iter().enumerate() {
            write!(f, "\n  {}: {}", i + 1, diagnostic)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(ErrorKind::UnbalancedQuotes.category(), ErrorCategory::Lex);
        assert_eq!(
            ErrorKind::UnknownVariable("x".into()).category(),
            ErrorCategory::Syntax
        );
        assert_eq!(
            ErrorKind::UnmatchedClosingBrace.category(),
            ErrorCategory::ScriptStructure
        );
    }

    #[test]
    fn test_display_with_line() {
        let d = Diagnostic::at_line(ErrorKind::UnknownVariable("foo".into()), 3);
        assert_eq!(d.to_string(), "line 3: Unknown variable: foo");

        let err = ParseError::new(vec![d, Diagnostic::new(ErrorKind::EmptyParentheses)]);
        assert_eq!(
            err.to_string(),
            "2 error(s):\n  1: line 3: Unknown variable: foo\n  2: Empty parentheses"
        );
    }
}
