//! Lexer and recursive-descent parser for the libconfig text format.
//!
//! ```text
//! config  := setting*
//! setting := name (':' | '=') value (';' | ',')?
//! value   := scalar | '[' scalars? ']' | '(' values? ')' | '{' setting* '}'
//! ```

use super::{Group, Scalar, Setting};
use crate::convert::ValueKind;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}: {}", self.line, self.column, self.message)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Name(String),
    Scalar(Scalar),
    /// String literal, kept apart so adjacent literals can be joined
    Str(String),
    Punct(char),
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Name(name) => write!(f, "name '{}'", name),
            Token::Scalar(s) => write!(f, "value '{}'", s.text),
            Token::Str(_) => f.write_str("string"),
            Token::Punct(c) => write!(f, "'{}'", c),
            Token::Eof => f.write_str("end of input"),
        }
    }
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(&self, message: impl Into<String>) -> SyntaxError {
        SyntaxError {
            line: self.line,
            column: self.column,
            message: message.into(),
        }
    }

    fn skip_trivia(&mut self) -> Result<(), SyntaxError> {
        loop {
            match self.chars.peek().copied() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('#') => self.skip_line(),
                Some('/') => {
                    let mut ahead = self.chars.clone();
                    ahead.next();
                    match ahead.next() {
                        Some('/') => self.skip_line(),
                        Some('*') => {
                            self.bump();
                            self.bump();
                            self.skip_block_comment()?;
                        }
                        _ => return Ok(()),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.bump() {
            if c == '\n' {
                break;
            }
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), SyntaxError> {
        let mut prev = '\0';
        while let Some(c) = self.bump() {
            if prev == '*' && c == '/' {
                return Ok(());
            }
            prev = c;
        }
        Err(self.error("unterminated block comment"))
    }

    /// Returns the token plus the position it started at
    fn next_token(&mut self) -> Result<(Token, usize, usize), SyntaxError> {
        self.skip_trivia()?;
        let (line, column) = (self.line, self.column);

        let Some(c) = self.chars.peek().copied() else {
            return Ok((Token::Eof, line, column));
        };

        let token = match c {
            '=' | ':' | ';' | ',' | '[' | ']' | '(' | ')' | '{' | '}' => {
                self.bump();
                Token::Punct(c)
            }
            '"' => {
                self.bump();
                Token::Str(self.string_body()?)
            }
            c if c.is_ascii_alphabetic() || c == '*' => self.name_or_bool(),
            c if c.is_ascii_digit() || matches!(c, '+' | '-' | '.') => self.number()?,
            '@' => return Err(self.error("directives such as @include are not supported")),
            other => return Err(self.error(format!("unexpected character '{}'", other))),
        };

        Ok((token, line, column))
    }

    fn name_or_bool(&mut self) -> Token {
        let mut name = String::new();
        while let Some(c) = self.chars.peek().copied() {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '*') {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }

        if name.eq_ignore_ascii_case("true") || name.eq_ignore_ascii_case("false") {
            Token::Scalar(Scalar {
                kind: ValueKind::Boolean,
                text: name.to_ascii_lowercase(),
            })
        } else {
            Token::Name(name)
        }
    }

    fn number(&mut self) -> Result<Token, SyntaxError> {
        let mut raw = String::new();
        while let Some(c) = self.chars.peek().copied() {
            let continues = c.is_ascii_alphanumeric()
                || c == '.'
                || (matches!(c, '+' | '-')
                    && (raw.is_empty() || raw.ends_with(['e', 'E']) && !is_hex(&raw)));
            if !continues {
                break;
            }
            raw.push(c);
            self.bump();
        }

        classify_number(&raw)
            .map(Token::Scalar)
            .ok_or_else(|| self.error(format!("invalid number '{}'", raw)))
    }

    fn string_body(&mut self) -> Result<String, SyntaxError> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('\\') => out.push('\\'),
                    Some('"') => out.push('"'),
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some('f') => out.push('\u{0c}'),
                    Some('x') => {
                        let hex: String = [self.bump(), self.bump()].into_iter().flatten().collect();
                        let byte = u8::from_str_radix(&hex, 16)
                            .map_err(|_| self.error(format!("invalid escape '\\x{}'", hex)))?;
                        out.push(char::from(byte));
                    }
                    Some(other) => {
                        return Err(self.error(format!("invalid escape '\\{}'", other)));
                    }
                    None => return Err(self.error("unterminated string")),
                },
                Some(c) => out.push(c),
            }
        }
    }
}

fn is_hex(raw: &str) -> bool {
    let digits = raw.trim_start_matches(['+', '-']);
    digits.starts_with("0x") || digits.starts_with("0X")
}

/// Integers are normalized to decimal text (hex and `L`/`LL` suffixes
/// removed); floats keep their lexeme.
fn classify_number(raw: &str) -> Option<Scalar> {
    let trimmed = raw
        .strip_suffix("LL")
        .or_else(|| raw.strip_suffix('L'))
        .unwrap_or(raw);

    if is_hex(trimmed) {
        let negative = trimmed.starts_with('-');
        let digits = &trimmed.trim_start_matches(['+', '-'])[2..];
        let magnitude = u64::from_str_radix(digits, 16).ok()?;
        // Hex literals are two's complement 64-bit values
        let value = magnitude as i64;
        let value = if negative { value.checked_neg()? } else { value };
        return Some(Scalar {
            kind: ValueKind::Integer,
            text: value.to_string(),
        });
    }

    let unsigned = trimmed.trim_start_matches(['+', '-']);
    if !unsigned.is_empty() && unsigned.chars().all(|c| c.is_ascii_digit()) {
        let value = trimmed.parse::<i64>().ok()?;
        return Some(Scalar {
            kind: ValueKind::Integer,
            text: value.to_string(),
        });
    }

    // Suffixes only apply to integers
    if trimmed.len() != raw.len() {
        return None;
    }

    let looks_numeric = unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
        && unsigned.chars().any(|c| c.is_ascii_digit());
    if looks_numeric && raw.parse::<f64>().is_ok() {
        return Some(Scalar {
            kind: ValueKind::Float,
            text: raw.to_string(),
        });
    }

    None
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    peeked: Option<(Token, usize, usize)>,
}

impl<'a> Parser<'a> {
    fn peek(&mut self) -> Result<&Token, SyntaxError> {
        let peeked = match self.peeked.take() {
            Some(peeked) => peeked,
            None => self.lexer.next_token()?,
        };
        Ok(&self.peeked.insert(peeked).0)
    }

    fn next(&mut self) -> Result<(Token, usize, usize), SyntaxError> {
        match self.peeked.take() {
            Some(peeked) => Ok(peeked),
            None => self.lexer.next_token(),
        }
    }

    fn unexpected(token: &Token, line: usize, column: usize, expected: &str) -> SyntaxError {
        SyntaxError {
            line,
            column,
            message: format!("expected {}, found {}", expected, token),
        }
    }

    /// Settings up to `close` (`None` for end of input)
    fn settings(&mut self, close: Option<char>) -> Result<Group, SyntaxError> {
        let mut group = Group::new();

        loop {
            let (token, line, column) = self.next()?;
            let name = match token {
                Token::Eof if close.is_none() => return Ok(group),
                Token::Punct(c) if Some(c) == close => return Ok(group),
                Token::Name(name) => name,
                other => {
                    let expected = match close {
                        Some(c) => format!("setting name or '{}'", c),
                        None => "setting name".to_string(),
                    };
                    return Err(Self::unexpected(&other, line, column, &expected));
                }
            };

            match self.next()? {
                (Token::Punct('=' | ':'), _, _) => {}
                (other, line, column) => {
                    return Err(Self::unexpected(&other, line, column, "'=' or ':'"));
                }
            }

            let value = self.value()?;

            if matches!(self.peek()?, Token::Punct(';' | ',')) {
                self.next()?;
            }

            if group.iter().any(|(existing, _)| *existing == name) {
                return Err(SyntaxError {
                    line,
                    column,
                    message: format!("duplicate setting '{}'", name),
                });
            }
            group.push((name, value));
        }
    }

    fn value(&mut self) -> Result<Setting, SyntaxError> {
        let (token, line, column) = self.next()?;
        match token {
            Token::Scalar(scalar) => Ok(Setting::Scalar(scalar)),
            Token::Str(first) => Ok(Setting::Scalar(Scalar {
                kind: ValueKind::String,
                text: self.join_strings(first)?,
            })),
            Token::Punct('[') => self.array(),
            Token::Punct('(') => self.list(),
            Token::Punct('{') => Ok(Setting::Group(self.settings(Some('}'))?)),
            other => Err(Self::unexpected(&other, line, column, "a value")),
        }
    }

    fn join_strings(&mut self, mut text: String) -> Result<String, SyntaxError> {
        while matches!(self.peek()?, Token::Str(_)) {
            if let (Token::Str(more), _, _) = self.next()? {
                text.push_str(&more);
            }
        }
        Ok(text)
    }

    fn array(&mut self) -> Result<Setting, SyntaxError> {
        let mut items: Vec<Scalar> = Vec::new();

        if matches!(self.peek()?, Token::Punct(']')) {
            self.next()?;
            return Ok(Setting::Array(items));
        }

        loop {
            let (token, line, column) = self.next()?;
            let scalar = match token {
                Token::Scalar(scalar) => scalar,
                Token::Str(first) => Scalar {
                    kind: ValueKind::String,
                    text: self.join_strings(first)?,
                },
                other => return Err(Self::unexpected(&other, line, column, "an array element")),
            };

            if let Some(first) = items.first()
                && first.kind != scalar.kind
            {
                return Err(SyntaxError {
                    line,
                    column,
                    message: "array elements must all have the same type".to_string(),
                });
            }
            items.push(scalar);

            match self.next()? {
                (Token::Punct(','), _, _) => {}
                (Token::Punct(']'), _, _) => return Ok(Setting::Array(items)),
                (other, line, column) => {
                    return Err(Self::unexpected(&other, line, column, "',' or ']'"));
                }
            }
        }
    }

    fn list(&mut self) -> Result<Setting, SyntaxError> {
        let mut items = Vec::new();

        if matches!(self.peek()?, Token::Punct(')')) {
            self.next()?;
            return Ok(Setting::List(items));
        }

        loop {
            items.push(self.value()?);

            match self.next()? {
                (Token::Punct(','), _, _) => {}
                (Token::Punct(')'), _, _) => return Ok(Setting::List(items)),
                (other, line, column) => {
                    return Err(Self::unexpected(&other, line, column, "',' or ')'"));
                }
            }
        }
    }
}

/// Parse a whole libconfig document into its top-level group
pub fn parse_document(input: &str) -> Result<Group, SyntaxError> {
    let mut parser = Parser {
        lexer: Lexer::new(input),
        peeked: None,
    };
    parser.settings(None)
}
