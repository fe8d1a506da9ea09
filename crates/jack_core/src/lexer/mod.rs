//! Lexical analysis for Jack: a comment-stripping pre-pass followed by a
//! tokenization pass, producing a flat [`Token`] stream for the compilation
//! engine to walk with one token of lookahead.

mod cursor;
mod token;

pub use cursor::TokenCursor;
pub use token::{is_symbol, Keyword, Span, Token, TokenKind, SYMBOLS};

use std::error::Error;
use std::fmt::Display;

use colored::Colorize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    UnterminatedComment,
    BadString,
    BadToken(String),
    IntOutOfRange(String),
}

impl Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LexError::UnterminatedComment => {
                write!(f, "{}", "unterminated block comment".red())
            }
            LexError::BadString => {
                write!(f, "{}", "string constant is not terminated on its line".red())
            }
            LexError::BadToken(raw) => write!(f, "{} '{raw}'", "unrecognized token".red()),
            LexError::IntOutOfRange(raw) => {
                write!(f, "{} '{raw}' is outside 0..=32767", "integer constant".red())
            }
        }
    }
}

impl Error for LexError {}

pub type LexResult<T> = Result<T, LexError>;

/// Comment-removal pre-pass: strings are copied verbatim, `//` and `/*`/`/**`
/// runs are each collapsed to a single space. Does not preserve newlines
/// consumed as part of a comment, matching the reference behavior this
/// tokenizer is grounded on.
pub fn strip_comments(input: &str) -> LexResult<String> {
    let chars: Vec<char> = input.chars().collect();
    let len = chars.len();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    let mut in_string = false;

    while i < len {
        let c = chars[i];

        if in_string {
            out.push(c);
            if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
                i += 1;
            }
            '/' if chars.get(i + 1) == Some(&'/') => {
                out.push(' ');
                while i < len && chars[i] != '\n' {
                    i += 1;
                }
                if i < len {
                    i += 1; // consume the newline too
                }
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                out.push(' ');
                i += 2;
                let mut terminated = false;
                while i + 1 < len {
                    if chars[i] == '*' && chars[i + 1] == '/' {
                        i += 2;
                        terminated = true;
                        break;
                    }
                    i += 1;
                }
                if !terminated {
                    return Err(LexError::UnterminatedComment);
                }
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    Ok(out)
}

fn classify(buf: &str) -> LexResult<TokenKind> {
    if let Some(kw) = Keyword::from_str(buf) {
        return Ok(TokenKind::Keyword(kw));
    }

    if !buf.is_empty() && buf.chars().all(|c| c.is_ascii_digit()) {
        let value: u32 = buf
            .parse()
            .map_err(|_| LexError::BadToken(buf.to_string()))?;
        if value > 32767 {
            return Err(LexError::IntOutOfRange(buf.to_string()));
        }
        return Ok(TokenKind::IntegerConstant(value as u16));
    }

    let starts_with_digit = buf.chars().next().is_some_and(|c| c.is_ascii_digit());
    if !starts_with_digit && !buf.is_empty() && buf.chars().all(|c| c.is_alphanumeric() || c == '_')
    {
        return Ok(TokenKind::Identifier(buf.to_string()));
    }

    Err(LexError::BadToken(buf.to_string()))
}

/// Tokenizes a comment-free source string, as produced by [`strip_comments`].
pub fn tokenize(stripped: &str) -> LexResult<Vec<Token>> {
    let lines: Vec<String> = stripped.split('\n').map(str::to_string).collect();
    let chars: Vec<char> = stripped.chars().collect();
    let len = chars.len();

    let mut tokens = Vec::new();
    let mut buf = String::new();
    let mut line = 1usize;
    let mut buf_line = 1usize;
    let mut i = 0usize;

    macro_rules! flush {
        () => {
            if !buf.is_empty() {
                let kind = classify(&buf)?;
                tokens.push(Token::new(
                    kind,
                    Span::new(buf_line, lines[buf_line - 1].clone()),
                ));
                buf.clear();
            }
        };
    }

    while i < len {
        let c = chars[i];

        if c == '"' {
            flush!();
            let start_line = line;
            let mut s = String::new();
            i += 1;
            loop {
                match chars.get(i) {
                    None => return Err(LexError::BadString),
                    Some('\n') => return Err(LexError::BadString),
                    Some('"') => {
                        i += 1;
                        break;
                    }
                    Some(ch) => {
                        s.push(*ch);
                        i += 1;
                    }
                }
            }
            tokens.push(Token::new(
                TokenKind::StringConstant(s),
                Span::new(start_line, lines[start_line - 1].clone()),
            ));
            continue;
        }

        if c.is_whitespace() {
            flush!();
            if c == '\n' {
                line += 1;
            }
            i += 1;
            buf_line = line;
            continue;
        }

        if is_symbol(c) {
            flush!();
            tokens.push(Token::new(
                TokenKind::Symbol(c),
                Span::new(line, lines[line - 1].clone()),
            ));
            i += 1;
            buf_line = line;
            continue;
        }

        if buf.is_empty() {
            buf_line = line;
        }
        buf.push(c);
        i += 1;
    }

    flush!();

    Ok(tokens)
}

/// Strips comments and tokenizes `source` in one call.
pub fn lex(source: &str) -> LexResult<Vec<Token>> {
    let stripped = strip_comments(source)?;
    tokenize(&stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn strips_line_comment() {
        assert_eq!(strip_comments("let x = 1; // set x\n").unwrap(), "let x = 1;  ");
    }

    #[test]
    fn strips_block_and_api_comments() {
        assert_eq!(strip_comments("/* a */x/** b */y").unwrap(), " x y");
    }

    #[test]
    fn unterminated_block_comment_is_an_error() {
        assert_eq!(strip_comments("/* never closes"), Err(LexError::UnterminatedComment));
    }

    #[test]
    fn slash_inside_string_survives_comment_stripping() {
        assert_eq!(
            strip_comments("\"http://example.com\"").unwrap(),
            "\"http://example.com\""
        );
    }

    #[test]
    fn comment_stripping_is_idempotent() {
        let source = "let x = 1; // hi\n/* block */ let y = 2;";
        let once = strip_comments(source).unwrap();
        let twice = strip_comments(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn classifies_keyword_symbol_int_string_identifier() {
        assert_eq!(
            kinds("class Foo { field int x; }"),
            vec![
                TokenKind::Keyword(Keyword::Class),
                TokenKind::Identifier("Foo".into()),
                TokenKind::Symbol('{'),
                TokenKind::Keyword(Keyword::Field),
                TokenKind::Keyword(Keyword::Int),
                TokenKind::Identifier("x".into()),
                TokenKind::Symbol(';'),
                TokenKind::Symbol('}'),
            ]
        );
    }

    #[test]
    fn string_constant_keeps_internal_slash_and_strips_quotes() {
        assert_eq!(
            kinds("\"a/b\""),
            vec![TokenKind::StringConstant("a/b".into())]
        );
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert_eq!(tokenize("\"abc\ndef\""), Err(LexError::BadString));
    }

    #[test]
    fn integer_in_range_is_accepted() {
        assert_eq!(kinds("32767"), vec![TokenKind::IntegerConstant(32767)]);
    }

    #[test]
    fn integer_out_of_range_is_an_error() {
        assert_eq!(
            tokenize("32768"),
            Err(LexError::IntOutOfRange("32768".into()))
        );
    }

    #[test]
    fn bad_token_is_rejected() {
        assert!(matches!(tokenize("@"), Err(LexError::BadToken(_))));
    }
}
