//! Splits template source into literal text, expressions and block tags.
//!
//! Recognised delimiters:
//!
//! - `{{ ... }}` expression
//! - `{% ... %}` block tag
//!
//! A `{` that does not start one of these is ordinary text, as is any lone
//! closing delimiter. That keeps shell constructs such as `${#files[@]}` and
//! `${HOME}` literal. `{% raw %} ... {% endraw %}` passes its body through
//! untouched.

use super::error::TemplateError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Literal text starting at `offset`.
    Text { text: &'a str, offset: usize },
    /// Body of a `{{ }}` expression; `offset` points at the body's first byte.
    Expr { body: &'a str, offset: usize },
    /// Body of a `{% %}` tag; `offset` points at the body's first byte.
    Tag { body: &'a str, offset: usize },
}

#[derive(Clone, Copy)]
enum Delimiter {
    Expr,
    Tag,
}

impl Delimiter {
    fn from_second_byte(byte: u8) -> Option<Self> {
        match byte {
            b'{' => Some(Delimiter::Expr),
            b'%' => Some(Delimiter::Tag),
            _ => None,
        }
    }

    fn open(self) -> &'static str {
        match self {
            Delimiter::Expr => "{{",
            Delimiter::Tag => "{%",
        }
    }

    fn close(self) -> &'static str {
        match self {
            Delimiter::Expr => "}}",
            Delimiter::Tag => "%}",
        }
    }
}

pub(crate) fn tokenize(source: &str) -> Result<Vec<Token<'_>>, TemplateError> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while pos + 1 < bytes.len() {
        if bytes[pos] != b'{' {
            pos += 1;
            continue;
        }
        let Some(delimiter) = Delimiter::from_second_byte(bytes[pos + 1]) else {
            pos += 1;
            continue;
        };

        push_text(&mut tokens, source, text_start, pos);

        let body_start = pos + 2;
        let Some(len) = source[body_start..].find(delimiter.close()) else {
            return Err(TemplateError::malformed(
                source,
                pos,
                format!(
                    "`{}` is never closed by `{}`",
                    delimiter.open(),
                    delimiter.close()
                ),
            ));
        };
        let body_end = body_start + len;
        let body = &source[body_start..body_end];
        pos = body_end + 2;

        match delimiter {
            Delimiter::Expr => tokens.push(Token::Expr {
                body,
                offset: body_start,
            }),
            Delimiter::Tag if body.trim() == "raw" => {
                let (raw_end, resume) = find_endraw(source, pos).ok_or_else(|| {
                    TemplateError::malformed(source, body_start, "`raw` block is never closed")
                })?;
                push_text(&mut tokens, source, pos, raw_end);
                pos = resume;
            }
            Delimiter::Tag => tokens.push(Token::Tag {
                body,
                offset: body_start,
            }),
        }
        text_start = pos;
    }

    push_text(&mut tokens, source, text_start, source.len());
    Ok(tokens)
}

fn push_text<'a>(tokens: &mut Vec<Token<'a>>, source: &'a str, start: usize, end: usize) {
    if start < end {
        tokens.push(Token::Text {
            text: &source[start..end],
            offset: start,
        });
    }
}

/// Find the next `{% endraw %}` at or after `from`.
///
/// Returns the offset where the tag starts and the offset just past it.
fn find_endraw(source: &str, from: usize) -> Option<(usize, usize)> {
    let mut cursor = from;
    while let Some(rel) = source[cursor..].find("{%") {
        let tag_start = cursor + rel;
        let body_start = tag_start + 2;
        let close = source[body_start..].find("%}")?;
        if source[body_start..body_start + close].trim() == "endraw" {
            return Some((tag_start, body_start + close + 2));
        }
        cursor = body_start;
    }
    None
}
