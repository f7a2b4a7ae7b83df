//! Import declaration scanner.
//!
//! Reads just enough of a Go source file to find its import paths: the
//! package clause followed by any number of `import` declarations. Every
//! path is reported with the byte span of its string literal so callers can
//! splice in a new literal without disturbing anything else in the file.

use std::ops::Range;
use std::str::CharIndices;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// One import path found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// The unquoted import path
    pub path: String,

    /// Byte range of the literal, quotes included
    pub span: Range<usize>,

    /// Whether the literal is a raw (backquoted) string
    pub raw: bool,
}

impl ImportSpec {
    /// Render `path` as a literal in the same quote style as this spec.
    pub fn literal(&self, path: &str) -> String {
        if self.raw {
            format!("`{path}`")
        } else {
            let mut out = String::with_capacity(path.len() + 2);
            out.push('"');
            for c in path.chars() {
                if c == '"' || c == '\\' {
                    out.push('\\');
                }
                out.push(c);
            }
            out.push('"');
            out
        }
    }
}

/// A file header that could not be scanned.
#[derive(Debug, Error, Diagnostic)]
#[error("{file}: {message}")]
#[diagnostic(
    code(deppy::rewrite::import_parse),
    help("Fix the syntax error, then run `deppy save` again")
)]
pub struct ImportParseError {
    pub file: String,
    pub message: String,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("here")]
    pub span: SourceSpan,
}

/// Find every import path declared in `src`.
///
/// `name` is only used for error reporting. Scanning stops at the first
/// top-level declaration that is not an import.
pub fn scan_imports(name: &str, src: &str) -> Result<Vec<ImportSpec>, ImportParseError> {
    let mut s = Scanner::new(name, src);

    let tok = s.next_non_sep()?;
    if tok.tok != Token::Ident("package".into()) {
        return Err(s.error("expected `package` clause", tok.span));
    }
    let tok = s.next()?;
    if !matches!(tok.tok, Token::Ident(_)) {
        return Err(s.error("expected package name", tok.span));
    }
    s.expect_end_of_decl()?;

    let mut specs = Vec::new();
    loop {
        s.skip_seps()?;
        if !s.at_keyword("import") {
            break;
        }
        s.pos += "import".len();

        let tok = s.next_non_sep()?;
        if tok.tok == Token::LParen {
            loop {
                let tok = s.next_non_sep()?;
                if tok.tok == Token::RParen {
                    break;
                }
                specs.push(s.spec(tok)?);

                let end = s.next()?;
                match end.tok {
                    Token::Sep => {}
                    Token::RParen => break,
                    _ => return Err(s.error("expected `;`, newline or `)`", end.span)),
                }
            }
        } else {
            specs.push(s.spec(tok)?);
        }
        s.expect_end_of_decl()?;
    }

    Ok(specs)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Str { value: String, raw: bool },
    Dot,
    LParen,
    RParen,
    /// `;` or a line break
    Sep,
    Other(char),
    Eof,
}

#[derive(Debug)]
struct Lexed {
    tok: Token,
    span: Range<usize>,
}

struct Scanner<'a> {
    name: &'a str,
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(name: &'a str, src: &'a str) -> Self {
        let pos = if src.starts_with('\u{feff}') { 3 } else { 0 };
        Scanner { name, src, pos }
    }

    fn error(&self, message: &str, span: Range<usize>) -> ImportParseError {
        ImportParseError {
            file: self.name.to_string(),
            message: message.to_string(),
            src: NamedSource::new(self.name, self.src.to_string()),
            span: (span.start, span.end - span.start).into(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_keyword(&self, kw: &str) -> bool {
        let rest = self.rest();
        rest.starts_with(kw) && !rest[kw.len()..].chars().next().is_some_and(is_ident_char)
    }

    /// Skip whitespace and comments, reporting whether a line break was crossed.
    fn skip_space(&mut self) -> Result<bool, ImportParseError> {
        let mut newline = false;
        loop {
            let rest = self.rest();
            if rest.starts_with("//") {
                self.pos += rest.find('\n').unwrap_or(rest.len());
            } else if let Some(body) = rest.strip_prefix("/*") {
                let Some(end) = body.find("*/") else {
                    return Err(self.error("comment not terminated", self.pos..self.src.len()));
                };
                newline |= body[..end].contains('\n');
                self.pos += end + 4;
            } else {
                match rest.chars().next() {
                    Some('\n') => {
                        newline = true;
                        self.pos += 1;
                    }
                    Some(c) if c.is_whitespace() => self.pos += c.len_utf8(),
                    _ => return Ok(newline),
                }
            }
        }
    }

    fn skip_seps(&mut self) -> Result<(), ImportParseError> {
        loop {
            self.skip_space()?;
            if self.rest().starts_with(';') {
                self.pos += 1;
            } else {
                return Ok(());
            }
        }
    }

    fn next(&mut self) -> Result<Lexed, ImportParseError> {
        let before = self.pos;
        if self.skip_space()? {
            return Ok(Lexed {
                tok: Token::Sep,
                span: before..self.pos,
            });
        }

        let start = self.pos;
        let Some(c) = self.rest().chars().next() else {
            return Ok(Lexed {
                tok: Token::Eof,
                span: start..start,
            });
        };

        let tok = match c {
            '"' => return self.interpreted(start),
            '`' => return self.raw(start),
            ';' => Token::Sep,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '.' => Token::Dot,
            c if is_ident_start(c) => {
                let len = self
                    .rest()
                    .find(|c: char| !is_ident_char(c))
                    .unwrap_or(self.rest().len());
                self.pos += len;
                return Ok(Lexed {
                    tok: Token::Ident(self.src[start..self.pos].to_string()),
                    span: start..self.pos,
                });
            }
            c => Token::Other(c),
        };

        self.pos += c.len_utf8();
        Ok(Lexed {
            tok,
            span: start..self.pos,
        })
    }

    fn next_non_sep(&mut self) -> Result<Lexed, ImportParseError> {
        loop {
            let tok = self.next()?;
            if tok.tok != Token::Sep {
                return Ok(tok);
            }
        }
    }

    fn expect_end_of_decl(&mut self) -> Result<(), ImportParseError> {
        let tok = self.next()?;
        match tok.tok {
            Token::Sep | Token::Eof => Ok(()),
            _ => Err(self.error("expected `;` or newline", tok.span)),
        }
    }

    /// An import spec: an optional name or `.`, then the path literal.
    fn spec(&mut self, first: Lexed) -> Result<ImportSpec, ImportParseError> {
        let lit = match first.tok {
            Token::Ident(_) | Token::Dot => self.next()?,
            _ => first,
        };

        match lit.tok {
            Token::Str { value, .. } if value.is_empty() => {
                Err(self.error("empty import path", lit.span))
            }
            Token::Str { value, raw } => Ok(ImportSpec {
                path: value,
                span: lit.span,
                raw,
            }),
            _ => Err(self.error("expected import path", lit.span)),
        }
    }

    fn raw(&mut self, start: usize) -> Result<Lexed, ImportParseError> {
        let body = &self.src[start + 1..];
        let Some(end) = body.find('`') else {
            return Err(self.error("raw string literal not terminated", start..self.src.len()));
        };

        self.pos = start + 1 + end + 1;
        Ok(Lexed {
            tok: Token::Str {
                value: body[..end].replace('\r', ""),
                raw: true,
            },
            span: start..self.pos,
        })
    }

    fn interpreted(&mut self, start: usize) -> Result<Lexed, ImportParseError> {
        let body_start = start + 1;
        let mut value = String::new();
        let mut chars = self.src[body_start..].char_indices();

        while let Some((i, c)) = chars.next() {
            match c {
                '"' => {
                    self.pos = body_start + i + 1;
                    return Ok(Lexed {
                        tok: Token::Str { value, raw: false },
                        span: start..self.pos,
                    });
                }
                '\n' => break,
                '\\' => {
                    let escaped = chars.next().and_then(|(_, e)| unescape(e, &mut chars));
                    match escaped {
                        Some(c) => value.push(c),
                        None => {
                            let at = body_start + i;
                            return Err(self.error("invalid escape sequence", at..at + 2));
                        }
                    }
                }
                c => value.push(c),
            }
        }

        let line_end = self.src[start..]
            .find('\n')
            .map_or(self.src.len(), |i| start + i);
        Err(self.error("string literal not terminated", start..line_end))
    }
}

fn unescape(e: char, chars: &mut CharIndices<'_>) -> Option<char> {
    match e {
        'a' => Some('\x07'),
        'b' => Some('\x08'),
        'f' => Some('\x0c'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\x0b'),
        '\\' => Some('\\'),
        '"' => Some('"'),
        'x' => escape_digits(chars, None, 2, 16),
        'u' => escape_digits(chars, None, 4, 16),
        'U' => escape_digits(chars, None, 8, 16),
        '0'..='7' => escape_digits(chars, Some(e), 3, 8),
        _ => None,
    }
}

fn escape_digits(
    chars: &mut CharIndices<'_>,
    first: Option<char>,
    count: usize,
    radix: u32,
) -> Option<char> {
    let mut digits = String::new();
    digits.extend(first);
    while digits.len() < count {
        let (_, c) = chars.next()?;
        digits.push(c);
    }
    u32::from_str_radix(&digits, radix)
        .ok()
        .and_then(char::from_u32)
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}
