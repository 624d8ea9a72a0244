use std::mem;

use crate::{
    ast::{AssignOp, BinOp, Builtin, NAryOp, Node, PrintArg, Token, UnaryOp, VarRef},
    error::{Diagnostic, ErrorKind, ParseError},
    lexer::Lexer,
    variables::{Missing, ParseMode, VariableTable},
};

/// A sub-parse hit an error after which no tree can be built. The diagnostic
/// has already been recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Abort;

type ParseResult = Result<Node, Abort>;

/// Expression parser.
///
/// Precedence, loosest first:
///
/// | level | operators                  |
/// |-------|----------------------------|
/// | 1     | `=` `+=` `-=` `*=` `/=`    |
/// | 2     | `\|\|`                     |
/// | 3     | `&&`                       |
/// | 4     | `==` `!=`                  |
/// | 5     | `<` `<=` `>` `>=`          |
/// | 6     | `+` `-`                    |
/// | 7     | `*` `/` `%`                |
/// | 8     | `^`                        |
/// | 9     | unary `+` `-`, `++` `--`   |
/// | 10    | `( ... )`                  |
/// | 11    | numbers, `PI`, variables, calls |
///
/// Every binary level is left-associative, including assignment: `a = b = 5`
/// parses as `Assign(Assign(a, b), 5)` and writes 5 through the whole chain.
pub struct Parser<'a> {
    lexer: Lexer,
    current_token: Token,
    variables: &'a mut VariableTable,
    mode: ParseMode,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &str, variables: &'a mut VariableTable, mode: ParseMode) -> Self {
        if mode == ParseMode::AutoAdd {
            variables.begin_auto_add();
        }
        let mut parser = Parser {
            lexer: Lexer::new(input),
            current_token: Token::End,
            variables,
            mode,
            diagnostics: Vec::new(),
        };
        parser.advance();
        parser
    }

    /// Parses the whole input as one expression.
    ///
    /// The tree is returned only if nothing at all was reported; otherwise
    /// every diagnostic found on the way is returned instead.
    pub fn parse(mut self) -> Result<Node, ParseError> {
        if self.current_token == Token::End {
            self.record(ErrorKind::NoExpression);
            return Err(ParseError::new(self.diagnostics));
        }

        if let Ok(node) = self.parse_assignment() {
            match &self.current_token {
                Token::End => {}
                Token::RParen => self.record(ErrorKind::UnbalancedParentheses),
                token => {
                    let near = token.to_string();
                    self.record(ErrorKind::SyntaxErrorNear(near));
                }
            }
            if self.diagnostics.is_empty() {
                return Ok(node);
            }
        }
        Err(ParseError::new(self.diagnostics))
    }

    fn advance(&mut self) {
        self.current_token = self.lexer.next_token();
        self.diagnostics.extend(self.lexer.take_diagnostics());
    }

    fn check(&self, token: &Token) -> bool {
        &self.current_token == token
    }

    fn record(&mut self, kind: ErrorKind) {
        self.diagnostics.push(Diagnostic::new(kind));
    }

    fn fail(&mut self, kind: ErrorKind) -> ParseResult {
        self.record(kind);
        Err(Abort)
    }

    /// Level 1: `=`, `+=`, `-=`, `*=`, `/=`
    fn parse_assignment(&mut self) -> ParseResult {
        let mut left = self.parse_or()?;

        loop {
            let op = match self.current_token {
                Token::Assign => None,
                Token::PlusAssign => Some(AssignOp::Add),
                Token::MinusAssign => Some(AssignOp::Subtract),
                Token::StarAssign => Some(AssignOp::Multiply),
                Token::SlashAssign => Some(AssignOp::Divide),
                _ => break,
            };
            self.advance();
            let right = self.parse_or()?;

            if !left.is_assignable() {
                return self.fail(ErrorKind::NonAssignableTarget);
            }
            left = match op {
                None => Node::Assign {
                    target: Box::new(left),
                    value: Box::new(right),
                },
                Some(op) => Node::CompoundAssign {
                    op,
                    target: Box::new(left),
                    value: Box::new(right),
                },
            };
        }

        Ok(left)
    }

    /// Level 2: `||`
    fn parse_or(&mut self) -> ParseResult {
        let mut left = self.parse_and()?;
        while self.check(&Token::OrOr) {
            self.advance();
            let right = self.parse_and()?;
            left = Node::binary(BinOp::Or, left, right);
        }
        Ok(left)
    }

    /// Level 3: `&&`
    fn parse_and(&mut self) -> ParseResult {
        let mut left = self.parse_equality()?;
        while self.check(&Token::AndAnd) {
            self.advance();
            let right = self.parse_equality()?;
            left = Node::binary(BinOp::And, left, right);
        }
        Ok(left)
    }

    /// Level 4: `==`, `!=`
    fn parse_equality(&mut self) -> ParseResult {
        let mut left = self.parse_comparison()?;
        loop {
            let op = match self.current_token {
                Token::EqEq => BinOp::Equal,
                Token::NotEq => BinOp::NotEqual,
                _ => break,
            };
            self.advance();
            let right = self.parse_comparison()?;
            left = Node::binary(op, left, right);
        }
        Ok(left)
    }

    /// Level 5: `<`, `<=`, `>`, `>=`
    fn parse_comparison(&mut self) -> ParseResult {
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.current_token {
                Token::Lt => BinOp::LessThan,
                Token::LtEq => BinOp::LessEqual,
                Token::Gt => BinOp::GreaterThan,
                Token::GtEq => BinOp::GreaterEqual,
                _ => break,
            };
            self.advance();
            let right = self.parse_additive()?;
            left = Node::binary(op, left, right);
        }
        Ok(left)
    }

    /// Level 6: `+`, `-`
    fn parse_additive(&mut self) -> ParseResult {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.current_token {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Subtract,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Node::binary(op, left, right);
        }
        Ok(left)
    }

    /// Level 7: `*`, `/`, `%`
    fn parse_multiplicative(&mut self) -> ParseResult {
        let mut left = self.parse_power()?;
        loop {
            let op = match self.current_token {
                Token::Star => BinOp::Multiply,
                Token::Slash => BinOp::Divide,
                Token::Percent => BinOp::Modulo,
                _ => break,
            };
            self.advance();
            let right = self.parse_power()?;
            left = Node::binary(op, left, right);
        }
        Ok(left)
    }

    /// Level 8: `^`, left-associative: `2^3^2` is 64
    fn parse_power(&mut self) -> ParseResult {
        let mut left = self.parse_unary()?;
        while self.check(&Token::Caret) {
            self.advance();
            let right = self.parse_unary()?;
            left = Node::binary(BinOp::Power, left, right);
        }
        Ok(left)
    }

    /// Level 9: unary `+` / `-` and prefix `++` / `--`
    fn parse_unary(&mut self) -> ParseResult {
        match self.current_token {
            Token::Plus => {
                self.advance();
                self.parse_unary()
            }
            Token::Minus => {
                self.advance();
                let operand = self.parse_unary()?;
                Ok(Node::unary(UnaryOp::Negate, operand))
            }
            Token::PlusPlus | Token::MinusMinus => {
                let delta = if self.check(&Token::PlusPlus) { 1.0 } else { -1.0 };
                self.advance();
                let target = self.parse_unary()?;
                if !target.is_variable() {
                    return self.fail(ErrorKind::NonAssignableTarget);
                }
                Ok(Node::Increment {
                    target: Box::new(target),
                    delta,
                })
            }
            _ => self.parse_parenthesized(),
        }
    }

    /// Level 10: `( expression )`
    fn parse_parenthesized(&mut self) -> ParseResult {
        if !self.check(&Token::LParen) {
            return self.parse_primary();
        }
        self.advance();
        if self.check(&Token::RParen) {
            return self.fail(ErrorKind::EmptyParentheses);
        }
        let inner = self.parse_assignment()?;
        if !self.check(&Token::RParen) {
            return self.fail(ErrorKind::UnbalancedParentheses);
        }
        self.advance();
        Ok(inner)
    }

    /// Level 11: numbers, `PI`, variables and function calls
    fn parse_primary(&mut self) -> ParseResult {
        match mem::replace(&mut self.current_token, Token::End) {
            Token::Number(value) => {
                self.advance();
                Ok(Node::Constant(value))
            }
            Token::InvalidNumber(_) => {
                // already reported by the lexer; keep going to find more
                self.advance();
                Ok(Node::Constant(f64::NAN))
            }
            Token::Variable(name) => {
                self.advance();
                Ok(self.resolve_variable(name))
            }
            Token::Function(name) => {
                self.advance();
                self.parse_call(name)
            }
            Token::String(_) => self.fail(ErrorKind::StringOutsidePrint),
            Token::End => self.fail(ErrorKind::UnexpectedEnd),
            Token::RParen => self.fail(ErrorKind::UnbalancedParentheses),
            token => self.fail(ErrorKind::UnexpectedToken(token.to_string())),
        }
    }

    fn resolve_variable(&mut self, name: String) -> Node {
        if name == "PI" {
            return Node::Constant(std::f64::consts::PI);
        }
        match self.variables.resolve(&name, self.mode) {
            Ok(index) => Node::Variable(VarRef { index, name }),
            Err(Missing::Unknown) => {
                self.record(ErrorKind::UnknownVariable(name.clone()));
                Node::Unresolved(name)
            }
            Err(Missing::CapacityExceeded) => {
                self.record(ErrorKind::VariableCapacityExceeded(name.clone()));
                Node::Unresolved(name)
            }
        }
    }

    /// Parses `( args )` after a function name.
    fn parse_call(&mut self, name: String) -> ParseResult {
        let Some(builtin) = Builtin::lookup(&name) else {
            return self.fail(ErrorKind::UnknownFunction(name));
        };
        // The lexer only emits a function token when `(` follows
        self.advance();

        let node = match builtin {
            Builtin::Print => Node::NAry {
                op: NAryOp::Print,
                args: self.parse_print_arguments()?,
            },
            Builtin::Unary(op) => {
                let [operand] = self.fixed_arguments(&name)?;
                Node::unary(op, operand)
            }
            Builtin::Binary(op) => {
                let [left, right] = self.fixed_arguments(&name)?;
                Node::binary(op, left, right)
            }
            Builtin::If => {
                let [test, then, otherwise] = self.fixed_arguments(&name)?;
                Node::Conditional {
                    test: Box::new(test),
                    then: Box::new(then),
                    otherwise: Box::new(otherwise),
                }
            }
        };
        Ok(node)
    }

    /// Exactly `N` arguments.
    fn fixed_arguments<const N: usize>(&mut self, name: &str) -> Result<[Node; N], Abort> {
        let args = self.parse_arguments()?;
        <[Node; N]>::try_from(args).map_err(|_| {
            self.record(ErrorKind::WrongArgumentCount {
                function: name.to_string(),
                expected: N,
            });
            Abort
        })
    }

    /// Comma separated expressions up to and including the closing `)`.
    fn parse_arguments(&mut self) -> Result<Vec<Node>, Abort> {
        let mut args = Vec::new();
        if !self.check(&Token::RParen) {
            loop {
                args.push(self.parse_assignment()?);
                if !self.check(&Token::Comma) {
                    break;
                }
                self.advance();
            }
        }
        self.close_call()?;
        Ok(args)
    }

    /// Like [`Parser::parse_arguments`] but string literals are allowed.
    fn parse_print_arguments(&mut self) -> Result<Vec<PrintArg>, Abort> {
        let mut args = Vec::new();
        if !self.check(&Token::RParen) {
            loop {
                if let Token::String(text) = &self.current_token {
                    args.push(PrintArg::Text(text.clone()));
                    self.advance();
                } else {
                    args.push(PrintArg::Expr(self.parse_assignment()?));
                }
                if !self.check(&Token::Comma) {
                    break;
                }
                self.advance();
            }
        }
        self.close_call()?;
        Ok(args)
    }

    fn close_call(&mut self) -> Result<(), Abort> {
        if !self.check(&Token::RParen) {
            self.record(ErrorKind::UnbalancedParentheses);
            return Err(Abort);
        }
        self.advance();
        Ok(())
    }
}

/// Parses one expression against `variables`.
///
/// In [`ParseMode::AutoAdd`] unknown identifiers are appended to the table,
/// and they stay there even if the parse fails.
pub fn parse(
    input: &str,
    variables: &mut VariableTable,
    mode: ParseMode,
) -> Result<Node, ParseError> {
    Parser::new(input, variables, mode).parse()
}

#[test]
fn test_assignment_chain_is_left_nested() {
    let mut variables = VariableTable::with_names(&["a", "b"]);
    let node = parse("a = b = 2", &mut variables, ParseMode::Fixed);
    let Ok(Node::Assign { target, value }) = node else {
        panic!("expected an assignment");
    };
    assert!(matches!(*target, Node::Assign { .. }));
    assert_eq!(*value, Node::Constant(2.0));
}

#[test]
fn test_unary_binds_tighter_than_power() {
    let mut variables = VariableTable::new();
    let node = parse("-2^2", &mut variables, ParseMode::Fixed);
    assert_eq!(
        node,
        Ok(Node::binary(
            BinOp::Power,
            Node::unary(UnaryOp::Negate, Node::Constant(2.0)),
            Node::Constant(2.0)
        ))
    );
}
