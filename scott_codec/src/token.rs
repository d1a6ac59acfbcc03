//! Tokenizer for ScottFree data files.
//!
//! A data file is a sequence of ASCII integers (surrounded by whitespace) and
//! double-quoted strings (which may span lines). The files are small and never
//! read partially, so the whole input is tokenized up front and then handed out
//! one typed token at a time by [`TokenStream`].
//!
//! Bytes are mapped one-to-one onto `U+0000..=U+00FF`; there is no Unicode
//! processing, which keeps every byte of a string reproducible on encode.

use std::fmt;

use thiserror::Error;

/// Smallest lexical unit of a data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Integer(i64),
    Text(String),
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Integer(_) => TokenKind::Integer,
            Token::Text(_) => TokenKind::Text,
        }
    }
}

/// Type of a token, used when reporting mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Integer,
    Text,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Integer => f.write_str("an integer"),
            TokenKind::Text => f.write_str("a string"),
        }
    }
}

/// States of the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Between tokens.
    Init,
    /// Read the leading '-' of a negative integer.
    Sign,
    /// Reading the digits of an integer.
    Number,
    /// Inside a quoted string.
    QuotedString,
}

impl fmt::Display for ScanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScanState::Init => "Init",
            ScanState::Sign => "Sign",
            ScanState::Number => "Number",
            ScanState::QuotedString => "QuotedString",
        };
        f.write_str(name)
    }
}

/// Errors raised while turning bytes into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("unexpected character {found:?} at offset {offset} (state {state})")]
    UnexpectedByte { found: char, offset: usize, state: ScanState },
    #[error("input ended inside an integer starting at offset {start} (state {state})")]
    UnterminatedInteger { start: usize, state: ScanState },
    #[error("input ended inside a string starting at offset {start}")]
    UnterminatedString { start: usize },
    #[error("could not convert '{text}' to an integer at offset {start}")]
    IntegerFormat { text: String, start: usize },
}

/// Errors raised while consuming tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    #[error("premature end of stream at token {position}")]
    Exhausted { position: usize },
    #[error("token {position} is {found}, expected {expected}")]
    TypeMismatch {
        position: usize,
        expected: TokenKind,
        found: TokenKind,
    },
}

/// Split raw game data into tokens.
///
/// # Errors
/// Fails on any byte that cannot start or continue a token in the current
/// state, and on input that ends inside an integer or a string.
pub fn tokenize(data: &[u8]) -> Result<Vec<Token>, TokenizeError> {
    let mut tokens = Vec::new();
    let mut state = ScanState::Init;
    let mut buf = String::new();
    let mut start = 0;

    for (offset, &byte) in data.iter().enumerate() {
        state = match state {
            ScanState::Init => match byte {
                b if is_space(b) => ScanState::Init,
                b'-' => {
                    start = offset;
                    buf.push('-');
                    ScanState::Sign
                },
                b'0'..=b'9' => {
                    start = offset;
                    buf.push(char::from(byte));
                    ScanState::Number
                },
                b'"' => {
                    start = offset;
                    ScanState::QuotedString
                },
                _ => return Err(unexpected(byte, offset, state)),
            },
            ScanState::Sign => match byte {
                b'0'..=b'9' => {
                    buf.push(char::from(byte));
                    ScanState::Number
                },
                _ => return Err(unexpected(byte, offset, state)),
            },
            ScanState::Number => match byte {
                b if is_space(b) => {
                    tokens.push(Token::Integer(parse_integer(&buf, start)?));
                    buf.clear();
                    ScanState::Init
                },
                b'0'..=b'9' => {
                    buf.push(char::from(byte));
                    ScanState::Number
                },
                _ => return Err(unexpected(byte, offset, state)),
            },
            ScanState::QuotedString => match byte {
                b'"' => {
                    tokens.push(Token::Text(std::mem::take(&mut buf)));
                    ScanState::Init
                },
                _ => {
                    buf.push(char::from(byte));
                    ScanState::QuotedString
                },
            },
        };
    }

    match state {
        ScanState::Init => Ok(tokens),
        ScanState::Sign | ScanState::Number => Err(TokenizeError::UnterminatedInteger { start, state }),
        ScanState::QuotedString => Err(TokenizeError::UnterminatedString { start }),
    }
}

fn unexpected(byte: u8, offset: usize, state: ScanState) -> TokenizeError {
    TokenizeError::UnexpectedByte {
        found: char::from(byte),
        offset,
        state,
    }
}

fn parse_integer(text: &str, start: usize) -> Result<i64, TokenizeError> {
    text.parse().map_err(|_| TokenizeError::IntegerFormat {
        text: text.to_string(),
        start,
    })
}

/// Whitespace as the format understands it. Vertical tab and form feed are not separators.
fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// Fully tokenized game data, consumed front to back.
///
/// The decoder always knows whether an integer or a string comes next, so the
/// stream only offers typed accessors and cannot be rewound.
#[derive(Debug)]
pub struct TokenStream {
    tokens: std::vec::IntoIter<Token>,
    position: usize,
}

impl TokenStream {
    /// Tokenize `data` and wrap the result.
    ///
    /// # Errors
    /// Propagates any [`TokenizeError`].
    pub fn new(data: &[u8]) -> Result<Self, TokenizeError> {
        Ok(Self::from_tokens(tokenize(data)?))
    }

    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into_iter(),
            position: 0,
        }
    }

    /// True once every token has been consumed.
    pub fn is_done(&self) -> bool {
        self.tokens.len() == 0
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }

    /// Index of the next token to be consumed.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Consume the next token, which must be an integer.
    ///
    /// # Errors
    /// On an exhausted stream or when the next token is a string.
    pub fn next_int(&mut self) -> Result<i64, StreamError> {
        let position = self.position;
        match self.next_token()? {
            Token::Integer(value) => Ok(value),
            other => Err(StreamError::TypeMismatch {
                position,
                expected: TokenKind::Integer,
                found: other.kind(),
            }),
        }
    }

    /// Consume the next token, which must be a string.
    ///
    /// # Errors
    /// On an exhausted stream or when the next token is an integer.
    pub fn next_text(&mut self) -> Result<String, StreamError> {
        let position = self.position;
        match self.next_token()? {
            Token::Text(text) => Ok(text),
            other => Err(StreamError::TypeMismatch {
                position,
                expected: TokenKind::Text,
                found: other.kind(),
            }),
        }
    }

    fn next_token(&mut self) -> Result<Token, StreamError> {
        let token = self.tokens.next().ok_or(StreamError::Exhausted {
            position: self.position,
        })?;
        self.position += 1;
        Ok(token)
    }
}
