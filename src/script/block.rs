//! Block structure of a script: `;`-terminated equations, `if` / `else if` /
//! `else` chains and `while` loops, nested to any depth.
//!
//! A structure error (missing `;`, `(` or `{`, stray `}`, ...) stops the
//! block it occurs in; the enclosing block carries on so that independent
//! problems elsewhere are still reported. Expression errors never stop
//! anything.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    ast::{Node, Statement},
    error::{Diagnostic, ErrorKind},
    parser,
    script::source::SourceLine,
    variables::{ParseMode, VariableTable},
};

/// `if`, `while` or `else if`, alone or followed by `(...`
static KEYWORD_HEAD: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(if|while|else\s+if)\s*(\(.*)?$").ok());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    If,
    While,
    ElseIf,
}

impl Keyword {
    fn as_str(&self) -> &'static str {
        match self {
            Keyword::If => "if",
            Keyword::While => "while",
            Keyword::ElseIf => "else if",
        }
    }
}

/// Splits a unit into its leading keyword and the text after it.
fn keyword_head(text: &str) -> Option<(Keyword, &str)> {
    let captures = KEYWORD_HEAD.as_ref()?.captures(text)?;
    let keyword = match captures.get(1)?.as_str() {
        "if" => Keyword::If,
        "while" => Keyword::While,
        _ => Keyword::ElseIf,
    };
    let rest = captures.get(2).map_or("", |m| m.as_str().trim_start());
    Some((keyword, rest))
}

/// The structure error has been recorded; give up on the current block.
#[derive(Debug)]
struct Abort;

/// An `if` whose `else if` / `else` tail may still follow.
struct PendingIf {
    condition: Node,
    then: Vec<Statement>,
    line: usize,
    else_ifs: Vec<(Node, Vec<Statement>, usize)>,
    otherwise: Option<Vec<Statement>>,
}

impl PendingIf {
    /// Folds the `else if` chain into nested `If` statements.
    fn finish(self) -> Statement {
        let otherwise = self
            .else_ifs
            .into_iter()
            .rev()
            .fold(self.otherwise, |otherwise, (condition, then, line)| {
                Some(vec![Statement::If {
                    condition,
                    then,
                    otherwise,
                    line,
                }])
            });
        Statement::If {
            condition: self.condition,
            then: self.then,
            otherwise,
            line: self.line,
        }
    }
}

/// Reads one block's units in order.
struct Cursor<'a> {
    units: &'a [SourceLine],
    position: usize,
    /// Line of the last unit handed out
    line: usize,
}

impl<'a> Cursor<'a> {
    fn new(units: &'a [SourceLine]) -> Self {
        Cursor {
            units,
            position: 0,
            line: units.first().map_or(1, |u| u.line),
        }
    }

    fn next(&mut self) -> Option<&'a SourceLine> {
        let unit = self.units.get(self.position)?;
        self.position += 1;
        self.line = unit.line;
        Some(unit)
    }
}

pub struct BlockParser<'a> {
    variables: &'a mut VariableTable,
    mode: ParseMode,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> BlockParser<'a> {
    pub fn new(variables: &'a mut VariableTable, mode: ParseMode) -> Self {
        BlockParser {
            variables,
            mode,
            diagnostics: Vec::new(),
        }
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Parses the units of a whole script.
    pub fn parse_script(&mut self, units: &[SourceLine]) -> Vec<Statement> {
        self.parse_block(units, false)
    }

    fn error(&mut self, kind: ErrorKind, line: Option<usize>) -> Abort {
        self.diagnostics.push(Diagnostic { kind, line });
        Abort
    }

    fn parse_block(&mut self, units: &[SourceLine], nested: bool) -> Vec<Statement> {
        let mut statements = Vec::new();
        let mut cursor = Cursor::new(units);
        // Ignoring the result is fine: the diagnostic is already recorded
        let _ = self.parse_units(&mut cursor, &mut statements, nested);
        statements
    }

    fn parse_units(
        &mut self,
        cursor: &mut Cursor<'_>,
        statements: &mut Vec<Statement>,
        nested: bool,
    ) -> Result<(), Abort> {
        let mut pending: Option<PendingIf> = None;
        // Statement text accumulated over several units, and its first line
        let mut expression = String::new();
        let mut expression_line = 0;

        while let Some(unit) = cursor.next() {
            let text = unit.text.as_str();
            let line = unit.line;

            if text == "}" {
                return Err(self.error(ErrorKind::UnmatchedClosingBrace, Some(line)));
            }

            if let Some(chain) = pending.as_mut() {
                if chain.otherwise.is_none() {
                    if let Some((Keyword::ElseIf, rest)) = keyword_head(text) {
                        let (condition, line) = self.read_condition(cursor, Keyword::ElseIf, rest)?;
                        let body = self.read_block(cursor)?;
                        let then = self.parse_block(&body, true);
                        chain.else_ifs.push((condition, then, line));
                        continue;
                    }
                    match text.strip_prefix("else") {
                        Some("") => {
                            self.expect_open_brace(cursor, "'else'")?;
                            let body = self.read_block(cursor)?;
                            chain.otherwise = Some(self.parse_block(&body, true));
                            continue;
                        }
                        // `else x = 1;` without braces
                        Some(rest) if rest.starts_with(char::is_whitespace) => {
                            return Err(self.error(
                                ErrorKind::ExpectedBrace {
                                    after: "'else'".to_string(),
                                },
                                Some(line),
                            ));
                        }
                        _ => {}
                    }
                }
                if let Some(chain) = pending.take() {
                    statements.push(chain.finish());
                }
            }

            match keyword_head(text) {
                Some((keyword @ (Keyword::If | Keyword::While), rest)) => {
                    if !expression.is_empty() {
                        return Err(self.error(
                            ErrorKind::MissingSemicolon {
                                before: keyword.as_str().to_string(),
                            },
                            Some(line),
                        ));
                    }
                    let (condition, line) = self.read_condition(cursor, keyword, rest)?;
                    let body = self.read_block(cursor)?;
                    let body = self.parse_block(&body, true);
                    if keyword == Keyword::If {
                        pending = Some(PendingIf {
                            condition,
                            then: body,
                            line,
                            else_ifs: Vec::new(),
                            otherwise: None,
                        });
                    } else {
                        statements.push(Statement::While {
                            condition,
                            body,
                            line,
                        });
                    }
                }
                _ => {
                    if expression.is_empty() {
                        expression_line = line;
                    } else {
                        expression.push(' ');
                    }
                    match text.strip_suffix(';') {
                        Some(head) => {
                            expression.push_str(head);
                            let source = std::mem::take(&mut expression);
                            if !source.trim().is_empty() {
                                let expr = self.parse_expression(source.trim(), expression_line);
                                statements.push(Statement::Equation {
                                    expr,
                                    line: expression_line,
                                });
                            }
                        }
                        None => expression.push_str(text),
                    }
                }
            }
        }

        if let Some(chain) = pending.take() {
            statements.push(chain.finish());
        } else if !expression.is_empty() {
            let kind = if nested {
                ErrorKind::MissingSemicolon {
                    before: "}".to_string(),
                }
            } else {
                ErrorKind::UnexpectedEndOfScript
            };
            return Err(self.error(kind, Some(cursor.line)));
        }
        Ok(())
    }

    /// Parses a leaf expression, tagging its diagnostics with `line`.
    fn parse_expression(&mut self, text: &str, line: usize) -> Node {
        match parser::parse(text, self.variables, self.mode) {
            Ok(node) => node,
            Err(err) => {
                self.diagnostics.extend(
                    err.into_diagnostics()
                        .into_iter()
                        .map(|d| Diagnostic::at_line(d.kind, line)),
                );
                Node::Constant(0.0)
            }
        }
    }

    /// Reads `( condition )` starting at `rest` (the text after the keyword)
    /// and the `{` that must follow. Returns the condition as an
    /// `if(condition, 1, 0)` expression and the line it started on.
    fn read_condition(
        &mut self,
        cursor: &mut Cursor<'_>,
        keyword: Keyword,
        rest: &str,
    ) -> Result<(Node, usize), Abort> {
        let mut text = rest.trim().to_string();
        let line = cursor.line;
        while text.is_empty() {
            match cursor.next() {
                Some(unit) => text = unit.text.clone(),
                None => break,
            }
        }
        let Some(mut remaining) = text.strip_prefix('(').map(str::to_string) else {
            return Err(self.error(
                ErrorKind::ExpectedParenthesis {
                    after: keyword.as_str().to_string(),
                },
                Some(cursor.line),
            ));
        };

        let mut condition = String::new();
        let mut depth = 1;
        let after = loop {
            let mut close = None;
            for (i, ch) in remaining.char_indices() {
                match ch {
                    '(' => depth += 1,
                    ')' => depth -= 1,
                    _ => {}
                }
                if depth == 0 {
                    close = Some(i);
                    break;
                }
            }
            if let Some(i) = close {
                condition.push_str(&remaining[..i]);
                break remaining[i + 1..].trim().to_string();
            }
            condition.push_str(&remaining);
            condition.push(' ');
            match cursor.next() {
                Some(unit) => remaining = unit.text.clone(),
                None => {
                    return Err(self.error(
                        ErrorKind::UnbalancedConditionParentheses,
                        Some(cursor.line),
                    ));
                }
            }
        };

        if !after.is_empty() {
            return Err(self.error(ErrorKind::UnexpectedAfterCondition(after), Some(cursor.line)));
        }
        let condition = condition.trim();
        if condition.is_empty() {
            return Err(self.error(ErrorKind::EmptyCondition, Some(cursor.line)));
        }
        self.expect_open_brace(cursor, "conditional expression")?;

        let node = self.parse_expression(&format!("if({}, 1, 0)", condition), line);
        Ok((node, line))
    }

    fn expect_open_brace(&mut self, cursor: &mut Cursor<'_>, after: &str) -> Result<(), Abort> {
        match cursor.next() {
            Some(unit) if unit.text == "{" => Ok(()),
            _ => Err(self.error(
                ErrorKind::ExpectedBrace {
                    after: after.to_string(),
                },
                Some(cursor.line),
            )),
        }
    }

    /// Collects the units of a block up to its matching `}`. The opening `{`
    /// has already been read.
    fn read_block(&mut self, cursor: &mut Cursor<'_>) -> Result<Vec<SourceLine>, Abort> {
        let mut depth = 1;
        let mut body = Vec::new();
        while let Some(unit) = cursor.next() {
            match unit.text.as_str() {
                "}" => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(body);
                    }
                }
                "{" => depth += 1,
                _ => {}
            }
            body.push(unit.clone());
        }
        Err(self.error(ErrorKind::UnbalancedBraces, Some(cursor.line)))
    }
}
