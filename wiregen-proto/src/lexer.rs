//! Tokenizer for `.proto` sources.

use wiregen_core::Location;
use wiregen_schema::SchemaError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// An identifier, possibly dotted (`google.protobuf.Any`, `.shop.Order`).
    Ident(String),
    /// A numeric literal, as written.
    Number(String),
    /// A string literal with escapes resolved.
    Str(String),
    Symbol(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

/// Split `source` into tokens, dropping whitespace and comments.
pub(crate) fn tokenize(location: &Location, source: &str) -> Result<Vec<Token>, SchemaError> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut line = 1;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\n' => {
                line += 1;
                i += 1;
            }
            c if c.is_whitespace() => i += 1,
            '/' if chars.get(i + 1) == Some(&'/') => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                let start = line;
                i += 2;
                loop {
                    match chars.get(i) {
                        None => {
                            return Err(SchemaError::syntax(location, start, "unterminated comment"));
                        }
                        Some('*') if chars.get(i + 1) == Some(&'/') => {
                            i += 2;
                            break;
                        }
                        Some('\n') => {
                            line += 1;
                            i += 1;
                        }
                        Some(_) => i += 1,
                    }
                }
            }
            '"' | '\'' => {
                let (value, next) = string_literal(&chars, i, location, line)?;
                tokens.push(Token {
                    kind: TokenKind::Str(value),
                    line,
                });
                i = next;
            }
            c if c.is_ascii_digit() => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '.') {
                    i += 1;
                }
                tokens.push(Token {
                    kind: TokenKind::Number(chars[start..i].iter().collect()),
                    line,
                });
            }
            c if is_ident_start(c)
                || (c == '.' && chars.get(i + 1).is_some_and(|&n| is_ident_start(n))) =>
            {
                let start = i;
                i += 1;
                while i < chars.len() && (is_ident_char(chars[i]) || chars[i] == '.') {
                    i += 1;
                }
                tokens.push(Token {
                    kind: TokenKind::Ident(chars[start..i].iter().collect()),
                    line,
                });
            }
            c if c.is_ascii_punctuation() => {
                tokens.push(Token {
                    kind: TokenKind::Symbol(c),
                    line,
                });
                i += 1;
            }
            other => {
                return Err(SchemaError::syntax(
                    location,
                    line,
                    format!("unexpected character '{other}'"),
                ));
            }
        }
    }

    Ok(tokens)
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn string_literal(
    chars: &[char],
    start: usize,
    location: &Location,
    line: usize,
) -> Result<(String, usize), SchemaError> {
    let quote = chars[start];
    let mut value = String::new();
    let mut i = start + 1;
    loop {
        match chars.get(i) {
            None | Some('\n') => {
                return Err(SchemaError::syntax(location, line, "unterminated string"));
            }
            Some(&c) if c == quote => return Ok((value, i + 1)),
            Some('\\') => {
                let escaped = match chars.get(i + 1) {
                    Some('n') => '\n',
                    Some('t') => '\t',
                    Some('r') => '\r',
                    Some('0') => '\0',
                    Some(&other) => other,
                    None => {
                        return Err(SchemaError::syntax(location, line, "unterminated string"));
                    }
                };
                value.push(escaped);
                i += 2;
            }
            Some(&c) => {
                value.push(c);
                i += 1;
            }
        }
    }
}
