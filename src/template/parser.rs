//! Builds the segment tree from lexer tokens.
//!
//! Block tags must nest: an `if` or `for` is closed by its own `endif` /
//! `endfor` before any enclosing block closes. Nesting is limited to
//! [`MAX_NESTING`] levels so parsing and rendering stay within the stack.

use super::ast::Segment;
use super::error::{Location, TemplateError};
use super::expr::ExprParser;
use super::lexer::{self, Token};

/// Deepest allowed nesting of `if` / `for` blocks.
pub(crate) const MAX_NESTING: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockEndKind {
    Else,
    Endif,
    Endfor,
}

impl BlockEndKind {
    fn name(self) -> &'static str {
        match self {
            BlockEndKind::Else => "else",
            BlockEndKind::Endif => "endif",
            BlockEndKind::Endfor => "endfor",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct BlockEnd {
    kind: BlockEndKind,
    offset: usize,
}

pub(crate) fn parse(source: &str) -> Result<Vec<Segment>, TemplateError> {
    let tokens = lexer::tokenize(source)?;
    let mut parser = Parser {
        source,
        tokens: tokens.into_iter(),
        depth: 0,
    };
    let (segments, end) = parser.parse_block()?;
    match end {
        None => Ok(segments),
        Some(end) => Err(TemplateError::malformed(
            source,
            end.offset,
            format!("`{}` without a matching opening tag", end.kind.name()),
        )),
    }
}

struct Parser<'a> {
    source: &'a str,
    tokens: std::vec::IntoIter<Token<'a>>,
    /// Number of blocks currently open.
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Parse segments until end of input or a block-ending tag.
    fn parse_block(&mut self) -> Result<(Vec<Segment>, Option<BlockEnd>), TemplateError> {
        let mut segments = Vec::new();

        while let Some(token) = self.tokens.next() {
            match token {
                Token::Text { text, .. } => push_literal(&mut segments, text),
                Token::Expr { body, offset } => {
                    let mut expr = ExprParser::new(self.source, body, offset)?;
                    if expr.is_empty() {
                        return Err(self.error(offset, "empty expression"));
                    }
                    let interpolation = expr.parse_interpolation()?;
                    expr.finish()?;
                    segments.push(Segment::Variable(interpolation));
                }
                Token::Tag { body, offset } => {
                    let mut args = ExprParser::new(self.source, body, offset)?;
                    let (name, tag_offset) = args.expect_ident("tag name")?;
                    let end = match name.as_str() {
                        "if" => {
                            segments.push(self.parse_if(args, tag_offset)?);
                            continue;
                        }
                        "for" => {
                            segments.push(self.parse_for(args, tag_offset)?);
                            continue;
                        }
                        "else" => BlockEndKind::Else,
                        "endif" => BlockEndKind::Endif,
                        "endfor" => BlockEndKind::Endfor,
                        "endraw" => {
                            return Err(self.error(tag_offset, "`endraw` without a matching `raw`"));
                        }
                        other => {
                            return Err(self.error(tag_offset, format!("unknown tag `{}`", other)));
                        }
                    };
                    args.finish()?;
                    return Ok((
                        segments,
                        Some(BlockEnd {
                            kind: end,
                            offset: tag_offset,
                        }),
                    ));
                }
            }
        }

        Ok((segments, None))
    }

    fn enter_block(&mut self, open: usize, opener: &str) -> Result<(), TemplateError> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(
                open,
                format!("`{}` nests blocks deeper than {} levels", opener, MAX_NESTING),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_if(&mut self, mut args: ExprParser<'_>, open: usize) -> Result<Segment, TemplateError> {
        self.enter_block(open, "if")?;
        let condition = args.parse_expr()?;
        args.finish()?;

        let (then_branch, end) = self.parse_block()?;
        let else_branch = match self.expect_end(end, open, "if", BlockEndKind::Endif)? {
            BlockEndKind::Else => {
                let (else_branch, end) = self.parse_block()?;
                match end {
                    Some(BlockEnd {
                        kind: BlockEndKind::Else,
                        offset,
                    }) => {
                        return Err(self.error(
                            offset,
                            format!(
                                "second `else` for the `if` opened at {}",
                                Location::at(self.source, open)
                            ),
                        ));
                    }
                    end => {
                        self.expect_end(end, open, "if", BlockEndKind::Endif)?;
                    }
                }
                Some(else_branch)
            }
            _ => None,
        };

        self.depth -= 1;
        Ok(Segment::Conditional {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn parse_for(&mut self, mut args: ExprParser<'_>, open: usize) -> Result<Segment, TemplateError> {
        self.enter_block(open, "for")?;
        let (binding, binding_offset) = args.expect_ident("loop variable")?;
        if binding == "loop" {
            return Err(self.error(
                binding_offset,
                "`loop` is reserved for loop metadata and cannot be a loop variable",
            ));
        }
        if args.eat_keyword("in").is_none() {
            return Err(self.error(binding_offset, "expected `in` after the loop variable"));
        }
        let iterable = args.parse_path()?;
        args.finish()?;

        let (body, end) = self.parse_block()?;
        if let Some(BlockEnd {
            kind: BlockEndKind::Else,
            offset,
        }) = end
        {
            return Err(self.error(offset, "`else` is not supported inside `for`"));
        }
        self.expect_end(end, open, "for", BlockEndKind::Endfor)?;

        self.depth -= 1;
        Ok(Segment::Loop {
            binding,
            iterable,
            body,
        })
    }

    /// Check that a nested block ended with `expected` (or `else` for `if`).
    fn expect_end(
        &self,
        end: Option<BlockEnd>,
        open: usize,
        opener: &str,
        expected: BlockEndKind,
    ) -> Result<BlockEndKind, TemplateError> {
        match end {
            None => Err(self.error(
                open,
                format!("`{}` is never closed by `{}`", opener, expected.name()),
            )),
            Some(end) if end.kind == expected => Ok(end.kind),
            Some(end) if end.kind == BlockEndKind::Else && expected == BlockEndKind::Endif => {
                Ok(end.kind)
            }
            Some(end) => Err(self.error(
                end.offset,
                format!(
                    "`{}` cannot close the `{}` opened at {}",
                    end.kind.name(),
                    opener,
                    Location::at(self.source, open)
                ),
            )),
        }
    }

    fn error(&self, offset: usize, message: impl Into<String>) -> TemplateError {
        TemplateError::malformed(self.source, offset, message)
    }
}

fn push_literal(segments: &mut Vec<Segment>, text: &str) {
    if let Some(Segment::Literal(last)) = segments.last_mut() {
        last.push_str(text);
    } else {
        segments.push(Segment::Literal(text.to_string()));
    }
}
