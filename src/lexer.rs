use std::sync::LazyLock;

use regex::Regex;

use crate::ast::Token;
use crate::error::{Diagnostic, ErrorKind};

/// Decimal literal with optional fraction and exponent.
static DECIMAL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").ok());

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Lex problems found since the last call, in order.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() || ch == '\0' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn is_delimiter(ch: char) -> bool {
        matches!(
            ch,
            '+' | '-' | '*' | '/' | '%' | '^' | '(' | ')' | ',' | '=' | '!' | '<' | '>' | '|' | '&'
        ) || ch.is_whitespace()
            || ch == '\0'
            || ch == '"'
    }

    /// Reads up to the next delimiter.
    fn read_word(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if Self::is_delimiter(ch) {
                break;
            }
            result.push(ch);
            self.advance();
        }
        result
    }

    fn read_string(&mut self) -> Token {
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == '"' {
                return Token::String(result);
            }
            result.push(ch);
        }

        self.diagnostics
            .push(Diagnostic::new(ErrorKind::UnbalancedQuotes));
        Token::String(result)
    }

    fn read_identifier(&mut self) -> Token {
        let name = self.read_word();

        // A function is an identifier whose next non-blank character is `(`
        let mut offset = 0;
        while self.peek_char(offset).is_some_and(char::is_whitespace) {
            offset += 1;
        }
        if self.peek_char(offset) == Some('(') {
            self.position += offset;
            Token::Function(name)
        } else {
            Token::Variable(name)
        }
    }

    fn read_number(&mut self) -> Token {
        let mut text = String::new();
        let is_hex = self.current_char() == Some('0')
            && matches!(self.peek_char(1), Some('x') | Some('X'));

        while let Some(ch) = self.current_char() {
            let exponent_sign = !is_hex
                && matches!(ch, '+' | '-')
                && matches!(text.chars().last(), Some('e') | Some('E'));
            if Self::is_delimiter(ch) && !exponent_sign {
                break;
            }
            text.push(ch);
            self.advance();
        }

        match decode_number(&text) {
            Some(value) => Token::Number(value),
            None => {
                self.diagnostics
                    .push(Diagnostic::new(ErrorKind::MalformedNumber(text.clone())));
                Token::InvalidNumber(text)
            }
        }
    }

    fn two_char(&mut self, second: char, double: Token, single: Token) -> Token {
        self.advance();
        if self.current_char() == Some(second) {
            self.advance();
            double
        } else {
            single
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        match self.current_char() {
            None => Token::End,
            Some('"') => self.read_string(),
            Some('+') => match self.peek_char(1) {
                Some('+') => self.two_char('+', Token::PlusPlus, Token::Plus),
                _ => self.two_char('=', Token::PlusAssign, Token::Plus),
            },
            Some('-') => match self.peek_char(1) {
                Some('-') => self.two_char('-', Token::MinusMinus, Token::Minus),
                _ => self.two_char('=', Token::MinusAssign, Token::Minus),
            },
            Some('*') => self.two_char('=', Token::StarAssign, Token::Star),
            Some('/') => self.two_char('=', Token::SlashAssign, Token::Slash),
            Some('=') => self.two_char('=', Token::EqEq, Token::Assign),
            Some('!') => self.two_char('=', Token::NotEq, Token::Bang),
            Some('<') => self.two_char('=', Token::LtEq, Token::Lt),
            Some('>') => self.two_char('=', Token::GtEq, Token::Gt),
            Some('&') => self.two_char('&', Token::AndAnd, Token::Ampersand),
            Some('|') => self.two_char('|', Token::OrOr, Token::Pipe),
            Some('%') => {
                self.advance();
                Token::Percent
            }
            Some('^') => {
                self.advance();
                Token::Caret
            }
            Some('(') => {
                self.advance();
                Token::LParen
            }
            Some(')') => {
                self.advance();
                Token::RParen
            }
            Some(',') => {
                self.advance();
                Token::Comma
            }
            Some(ch) if ch.is_ascii_alphabetic() => self.read_identifier(),
            Some(ch) if ch.is_ascii_digit() => self.read_number(),
            Some('.') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.read_number()
            }
            Some(_) => {
                let mut text = self.read_word();
                if text.is_empty() {
                    // lone character the word reader stops on
                    if let Some(ch) = self.current_char() {
                        text.push(ch);
                        self.advance();
                    }
                }
                Token::Unknown(text)
            }
        }
    }

    /// Lexes the whole input. Stops before [`Token::End`].
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            match self.next_token() {
                Token::End => return tokens,
                token => tokens.push(token),
            }
        }
    }
}

/// Decodes a numeric literal: decimal, `0b` binary, `0o` octal or `0x` hex.
pub fn decode_number(text: &str) -> Option<f64> {
    let radix_digits = |digits: &str, radix: u32| -> Option<f64> {
        if digits.is_empty() {
            return None;
        }
        digits.chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        })
    };

    let lower = text.get(..2).map(str::to_ascii_lowercase);
    match lower.as_deref() {
        Some("0b") => radix_digits(&text[2..], 2),
        Some("0o") => radix_digits(&text[2..], 8),
        Some("0x") => radix_digits(&text[2..], 16),
        _ => {
            let valid = DECIMAL.as_ref().is_some_and(|re| re.is_match(text));
            if valid { text.parse::<f64>().ok() } else { None }
        }
    }
}

#[test]
fn test_two_char_operators() {
    let mut lexer = Lexer::new("a += b == c != d <= e >= f && g || h ++ --");
    let expected = vec![
        Token::Variable("a".to_string()),
        Token::PlusAssign,
        Token::Variable("b".to_string()),
        Token::EqEq,
        Token::Variable("c".to_string()),
        Token::NotEq,
        Token::Variable("d".to_string()),
        Token::LtEq,
        Token::Variable("e".to_string()),
        Token::GtEq,
        Token::Variable("f".to_string()),
        Token::AndAnd,
        Token::Variable("g".to_string()),
        Token::OrOr,
        Token::Variable("h".to_string()),
        Token::PlusPlus,
        Token::MinusMinus,
    ];
    assert_eq!(lexer.tokenize(), expected);
    assert_eq!(lexer.next_token(), Token::End);
    assert_eq!(lexer.next_token(), Token::End);
}

#[test]
fn test_function_detection() {
    let mut lexer = Lexer::new("sqrt (x) y");
    assert_eq!(lexer.next_token(), Token::Function("sqrt".to_string()));
    assert_eq!(lexer.next_token(), Token::LParen);
    assert_eq!(lexer.next_token(), Token::Variable("x".to_string()));
    assert_eq!(lexer.next_token(), Token::RParen);
    assert_eq!(lexer.next_token(), Token::Variable("y".to_string()));
}

#[test]
fn test_exponent_sign_stays_in_number() {
    let mut lexer = Lexer::new("1.5e-3-2");
    assert_eq!(lexer.next_token(), Token::Number(1.5e-3));
    assert_eq!(lexer.next_token(), Token::Minus);
    assert_eq!(lexer.next_token(), Token::Number(2.0));
}

#[test]
fn test_hex_does_not_eat_sign() {
    let mut lexer = Lexer::new("0x1E+1");
    assert_eq!(lexer.next_token(), Token::Number(30.0));
    assert_eq!(lexer.next_token(), Token::Plus);
    assert_eq!(lexer.next_token(), Token::Number(1.0));
}
