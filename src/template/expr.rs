//! Expression parsing for `{{ }}` bodies and `{% %}` tag arguments.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! or         := and ("or" and)*
//! and        := not ("and" not)*
//! not        := "not" not | comparison
//! comparison := primary (("==" | "!=" | "in" | "not" "in") primary)?
//! primary    := "(" or ")" | STRING | "true" | "false" | path
//! path       := IDENT ("." (IDENT | INT) | "[" (INT | STRING) "]")*
//! interp     := or ("|" IDENT ("(" (or ("," or)*)? ")")?)*
//! ```
//!
//! A single expression may use at most [`MAX_OPERATORS`] operators and
//! parentheses, which bounds the depth of the tree it produces.

use super::ast::{Accessor, CompareOp, Expr, ExprKind, FilterCall, Interpolation, Path};
use super::error::TemplateError;
use super::filters;

const KEYWORDS: &[&str] = &["and", "or", "not", "in", "true", "false"];

/// Operators and parenthesised groups allowed in one expression or tag.
pub(crate) const MAX_OPERATORS: usize = 64;

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Ident(String),
    Str(String),
    Int(usize),
    Dot,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Pipe,
    EqEq,
    NotEq,
}

impl Tok {
    fn describe(&self) -> String {
        match self {
            Tok::Ident(name) => format!("`{}`", name),
            Tok::Str(s) => format!("string {:?}", s),
            Tok::Int(i) => format!("number `{}`", i),
            Tok::Dot => "`.`".to_string(),
            Tok::LBracket => "`[`".to_string(),
            Tok::RBracket => "`]`".to_string(),
            Tok::LParen => "`(`".to_string(),
            Tok::RParen => "`)`".to_string(),
            Tok::Comma => "`,`".to_string(),
            Tok::Pipe => "`|`".to_string(),
            Tok::EqEq => "`==`".to_string(),
            Tok::NotEq => "`!=`".to_string(),
        }
    }
}

/// Parser over the tokens of a single expression or tag body.
pub(crate) struct ExprParser<'s> {
    source: &'s str,
    tokens: Vec<(Tok, usize)>,
    pos: usize,
    end: usize,
    operators: usize,
}

impl<'s> ExprParser<'s> {
    /// Tokenize `body`, which starts at byte `offset` of `source`.
    pub(crate) fn new(source: &'s str, body: &str, offset: usize) -> Result<Self, TemplateError> {
        let tokens = lex(source, body, offset)?;
        Ok(Self {
            source,
            tokens,
            pos: 0,
            end: offset + body.len(),
            operators: 0,
        })
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Error unless every token has been consumed.
    pub(crate) fn finish(&self) -> Result<(), TemplateError> {
        match self.tokens.get(self.pos) {
            None => Ok(()),
            Some((tok, offset)) => Err(self.error_at(
                *offset,
                format!("unexpected {} after expression", tok.describe()),
            )),
        }
    }

    /// Consume an identifier, returning it and its offset.
    pub(crate) fn expect_ident(&mut self, what: &str) -> Result<(String, usize), TemplateError> {
        match self.next() {
            Some((Tok::Ident(name), offset)) => Ok((name, offset)),
            Some((tok, offset)) => Err(self.error_at(
                offset,
                format!("expected {}, found {}", what, tok.describe()),
            )),
            None => Err(self.error_at(self.end, format!("expected {}", what))),
        }
    }

    /// Consume `keyword` if it is next, returning its offset.
    pub(crate) fn eat_keyword(&mut self, keyword: &str) -> Option<usize> {
        match self.tokens.get(self.pos) {
            Some((Tok::Ident(name), offset)) if name == keyword => {
                let offset = *offset;
                self.pos += 1;
                Some(offset)
            }
            _ => None,
        }
    }

    pub(crate) fn parse_interpolation(&mut self) -> Result<Interpolation, TemplateError> {
        let expr = self.parse_expr()?;
        let mut filters = Vec::new();
        while self.eat(&Tok::Pipe).is_some() {
            let (name, offset) = self.expect_ident("filter name")?;
            let mut args = Vec::new();
            if self.eat(&Tok::LParen).is_some() && self.eat(&Tok::RParen).is_none() {
                loop {
                    args.push(self.parse_expr()?);
                    if self.eat(&Tok::Comma).is_some() {
                        continue;
                    }
                    self.expect(&Tok::RParen)?;
                    break;
                }
            }
            let Some(arity) = filters::arity(&name) else {
                return Err(self.error_at(offset, format!("unknown filter `{}`", name)));
            };
            if !arity.contains(&args.len()) {
                return Err(self.error_at(
                    offset,
                    format!(
                        "filter `{}` takes {} argument(s), got {}",
                        name,
                        describe_arity(&arity),
                        args.len()
                    ),
                ));
            }
            filters.push(FilterCall { name, args, offset });
        }
        Ok(Interpolation { expr, filters })
    }

    pub(crate) fn parse_expr(&mut self) -> Result<Expr, TemplateError> {
        let mut left = self.parse_and()?;
        while let Some(offset) = self.eat_keyword("or") {
            self.count_operator(offset)?;
            let right = self.parse_and()?;
            left = Expr {
                kind: ExprKind::Or(Box::new(left), Box::new(right)),
                offset,
            };
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, TemplateError> {
        let mut left = self.parse_not()?;
        while let Some(offset) = self.eat_keyword("and") {
            self.count_operator(offset)?;
            let right = self.parse_not()?;
            left = Expr {
                kind: ExprKind::And(Box::new(left), Box::new(right)),
                offset,
            };
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expr, TemplateError> {
        if let Some(offset) = self.eat_keyword("not") {
            self.count_operator(offset)?;
            let inner = self.parse_not()?;
            return Ok(Expr {
                kind: ExprKind::Not(Box::new(inner)),
                offset,
            });
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, TemplateError> {
        let left = self.parse_primary()?;
        let (op, offset) = if let Some(offset) = self.eat(&Tok::EqEq) {
            (CompareOp::Eq, offset)
        } else if let Some(offset) = self.eat(&Tok::NotEq) {
            (CompareOp::Ne, offset)
        } else if let Some(offset) = self.eat_keyword("in") {
            (CompareOp::In, offset)
        } else if self.peek_is_keyword("not") && self.peek_nth_is_keyword(1, "in") {
            let offset = self.eat_keyword("not").unwrap_or(self.end);
            self.eat_keyword("in");
            (CompareOp::NotIn, offset)
        } else {
            return Ok(left);
        };
        self.count_operator(offset)?;
        let right = self.parse_primary()?;
        Ok(Expr {
            kind: ExprKind::Compare {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            offset,
        })
    }

    fn parse_primary(&mut self) -> Result<Expr, TemplateError> {
        match self.tokens.get(self.pos).cloned() {
            Some((Tok::LParen, offset)) => {
                self.pos += 1;
                self.count_operator(offset)?;
                let inner = self.parse_expr()?;
                self.expect(&Tok::RParen)?;
                Ok(inner)
            }
            Some((Tok::Str(s), offset)) => {
                self.pos += 1;
                Ok(Expr {
                    kind: ExprKind::Str(s),
                    offset,
                })
            }
            Some((Tok::Ident(name), offset)) if name == "true" || name == "false" => {
                self.pos += 1;
                Ok(Expr {
                    kind: ExprKind::Bool(name == "true"),
                    offset,
                })
            }
            Some((Tok::Ident(_), offset)) => {
                let path = self.parse_path()?;
                Ok(Expr {
                    kind: ExprKind::Path(path),
                    offset,
                })
            }
            Some((tok, offset)) => Err(self.error_at(
                offset,
                format!("expected expression, found {}", tok.describe()),
            )),
            None => Err(self.error_at(self.end, "expected expression")),
        }
    }

    pub(crate) fn parse_path(&mut self) -> Result<Path, TemplateError> {
        let (root, offset) = self.expect_ident("variable name")?;
        if KEYWORDS.contains(&root.as_str()) {
            return Err(self.error_at(
                offset,
                format!("`{}` is a keyword, not a variable name", root),
            ));
        }
        let mut accessors = Vec::new();
        loop {
            if self.eat(&Tok::Dot).is_some() {
                match self.next() {
                    Some((Tok::Ident(key), _)) => accessors.push(Accessor::Key(key)),
                    Some((Tok::Int(index), _)) => accessors.push(Accessor::Index(index)),
                    Some((tok, at)) => {
                        return Err(self.error_at(
                            at,
                            format!("expected attribute name after `.`, found {}", tok.describe()),
                        ));
                    }
                    None => return Err(self.error_at(self.end, "expected attribute name after `.`")),
                }
            } else if self.eat(&Tok::LBracket).is_some() {
                match self.next() {
                    Some((Tok::Int(index), _)) => accessors.push(Accessor::Index(index)),
                    Some((Tok::Str(key), _)) => accessors.push(Accessor::Key(key)),
                    Some((tok, at)) => {
                        return Err(self.error_at(
                            at,
                            format!("expected index or key inside `[]`, found {}", tok.describe()),
                        ));
                    }
                    None => return Err(self.error_at(self.end, "expected index or key inside `[]`")),
                }
                self.expect(&Tok::RBracket)?;
            } else {
                break;
            }
        }
        Ok(Path {
            root,
            accessors,
            offset,
        })
    }

    fn count_operator(&mut self, offset: usize) -> Result<(), TemplateError> {
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(self.error_at(
                offset,
                format!("expression uses more than {} operators", MAX_OPERATORS),
            ));
        }
        Ok(())
    }

    fn next(&mut self) -> Option<(Tok, usize)> {
        let item = self.tokens.get(self.pos).cloned();
        if item.is_some() {
            self.pos += 1;
        }
        item
    }

    fn eat(&mut self, tok: &Tok) -> Option<usize> {
        match self.tokens.get(self.pos) {
            Some((t, offset)) if t == tok => {
                let offset = *offset;
                self.pos += 1;
                Some(offset)
            }
            _ => None,
        }
    }

    fn expect(&mut self, tok: &Tok) -> Result<usize, TemplateError> {
        if let Some(offset) = self.eat(tok) {
            return Ok(offset);
        }
        match self.tokens.get(self.pos) {
            Some((found, offset)) => Err(self.error_at(
                *offset,
                format!("expected {}, found {}", tok.describe(), found.describe()),
            )),
            None => Err(self.error_at(self.end, format!("expected {}", tok.describe()))),
        }
    }

    fn peek_is_keyword(&self, keyword: &str) -> bool {
        self.peek_nth_is_keyword(0, keyword)
    }

    fn peek_nth_is_keyword(&self, n: usize, keyword: &str) -> bool {
        matches!(self.tokens.get(self.pos + n), Some((Tok::Ident(name), _)) if name == keyword)
    }

    fn error_at(&self, offset: usize, message: impl Into<String>) -> TemplateError {
        TemplateError::malformed(self.source, offset, message)
    }
}

fn describe_arity(arity: &std::ops::RangeInclusive<usize>) -> String {
    if arity.start() == arity.end() {
        arity.start().to_string()
    } else {
        format!("{} to {}", arity.start(), arity.end())
    }
}

fn lex(source: &str, body: &str, base: usize) -> Result<Vec<(Tok, usize)>, TemplateError> {
    let mut tokens = Vec::new();
    let mut chars = body.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        let offset = base + i;
        let tok = match ch {
            c if c.is_whitespace() => continue,
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut ident = String::from(c);
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        ident.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                Tok::Ident(ident)
            }
            c if c.is_ascii_digit() => {
                let mut digits = String::from(c);
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_ascii_digit() {
                        digits.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = digits.parse::<usize>().map_err(|_| {
                    TemplateError::malformed(source, offset, format!("index `{}` is too large", digits))
                })?;
                Tok::Int(value)
            }
            quote @ ('"' | '\'') => {
                let mut text = String::new();
                let mut closed = false;
                while let Some((_, c)) = chars.next() {
                    match c {
                        c if c == quote => {
                            closed = true;
                            break;
                        }
                        '\\' => match chars.next() {
                            Some((_, 'n')) => text.push('\n'),
                            Some((_, 't')) => text.push('\t'),
                            Some((_, c @ ('\\' | '"' | '\''))) => text.push(c),
                            Some((j, c)) => {
                                return Err(TemplateError::malformed(
                                    source,
                                    base + j,
                                    format!("unknown escape `\\{}` in string", c),
                                ));
                            }
                            None => break,
                        },
                        c => text.push(c),
                    }
                }
                if !closed {
                    return Err(TemplateError::malformed(
                        source,
                        offset,
                        "unterminated string literal",
                    ));
                }
                Tok::Str(text)
            }
            '.' => Tok::Dot,
            '[' => Tok::LBracket,
            ']' => Tok::RBracket,
            '(' => Tok::LParen,
            ')' => Tok::RParen,
            ',' => Tok::Comma,
            '|' => Tok::Pipe,
            '=' if matches!(chars.peek(), Some((_, '='))) => {
                chars.next();
                Tok::EqEq
            }
            '!' if matches!(chars.peek(), Some((_, '='))) => {
                chars.next();
                Tok::NotEq
            }
            other => {
                return Err(TemplateError::malformed(
                    source,
                    offset,
                    format!("unexpected character `{}` in expression", other),
                ));
            }
        };
        tokens.push((tok, offset));
    }

    Ok(tokens)
}
