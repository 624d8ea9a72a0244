use std::fmt;

use crate::numeric::format_number;

/// Lexical tokens produced by the [`Lexer`](crate::lexer::Lexer).
///
/// Operators that are two characters long (`==`, `+=`, `++`, `&&`, ...) are
/// single tokens. All operator and punctuation variants are "delimiters" in
/// the sense of [`Token::is_delimiter`].
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Decoded numeric literal
    ///
    /// # Examples
    /// ```text
    /// 42
    /// .5
    /// 1.5e-3
    /// 0x1F
    /// 0b1010
    /// 0o17
    /// ```
    Number(f64),

    /// Numeric literal that failed to decode. The full text is kept so the
    /// diagnostic can quote it.
    ///
    /// # Examples
    /// ```text
    /// 1e+
    /// 0b102
    /// 12abc
    /// ```
    InvalidNumber(String),

    /// String literal enclosed in double quotes. Only valid inside `print(...)`.
    ///
    /// # Examples
    /// ```text
    /// "result:"
    /// ```
    String(String),

    // Identifiers
    /// Identifier not followed by `(`
    Variable(String),

    /// Identifier directly followed (after optional whitespace) by `(`
    Function(String),

    // Arithmetic
    /// Addition or unary plus
    Plus,
    /// Subtraction or unary minus
    Minus,
    /// Multiplication
    Star,
    /// Division
    Slash,
    /// Floating point remainder
    Percent,
    /// Power
    Caret,

    // Assignment
    /// `=`
    Assign,
    /// `+=`
    PlusAssign,
    /// `-=`
    MinusAssign,
    /// `*=`
    StarAssign,
    /// `/=`
    SlashAssign,
    /// Prefix increment `++`
    PlusPlus,
    /// Prefix decrement `--`
    MinusMinus,

    // Comparison
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,

    // Logical
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,

    // Lone characters that are delimiters but no operator on their own
    /// `!`
    Bang,
    /// `&`
    Ampersand,
    /// `|`
    Pipe,

    // Punctuation
    /// Left parenthesis
    LParen,
    /// Right parenthesis
    RParen,
    /// Argument separator
    Comma,

    /// Characters that cannot start any token (`_x`, `$`, `{`)
    Unknown(String),

    /// Returned for every call once the input is exhausted
    End,
}

impl Token {
    /// True for operator and punctuation tokens.
    pub fn is_delimiter(&self) -> bool {
        !matches!(
            self,
            Token::Number(_)
                | Token::InvalidNumber(_)
                | Token::String(_)
                | Token::Variable(_)
                | Token::Function(_)
                | Token::Unknown(_)
                | Token::End
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Token::Number(n) => return write!(f, "{}", format_number(*n)),
            Token::InvalidNumber(s) | Token::Variable(s) | Token::Function(s) | Token::Unknown(s) => {
                return write!(f, "{}", s);
            }
            Token::String(s) => return write!(f, "\"{}\"", s),
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Percent => "%",
            Token::Caret => "^",
            Token::Assign => "=",
            Token::PlusAssign => "+=",
            Token::MinusAssign => "-=",
            Token::StarAssign => "*=",
            Token::SlashAssign => "/=",
            Token::PlusPlus => "++",
            Token::MinusMinus => "--",
            Token::EqEq => "==",
            Token::NotEq => "!=",
            Token::Lt => "<",
            Token::LtEq => "<=",
            Token::Gt => ">",
            Token::GtEq => ">=",
            Token::AndAnd => "&&",
            Token::OrOr => "||",
            Token::Bang => "!",
            Token::Ampersand => "&",
            Token::Pipe => "|",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::Comma => ",",
            Token::End => "end of input",
        };
        write!(f, "{}", text)
    }
}
