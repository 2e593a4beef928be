//! Grammar enforcement and evaluation for a single line:
//!
//! ```text
//! expr := INTEGER (PLUS | MINUS) INTEGER
//! ```
//!
//! Tokens are pulled from the tokenizer only when the grammar asks for
//! them. Nothing after the right operand is ever requested, so trailing
//! input is neither scanned for errors nor rejected.

use std::fmt;

use log::trace;

use crate::lexer::{Dialect, LexError, Token, TokenKind, Tokenizer};

/// Result of evaluating one expression.
pub type Value = i128;

/// The token class a grammar position requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Integer,
    Operator,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Integer => write!(f, "an integer"),
            Expected::Operator => write!(f, "an operator"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnexpectedToken { expected: Expected, found: Token },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken { expected, found } => write!(
                f,
                "error parsing input: expected {expected}, found {found} at offset {}",
                found.span.0
            ),
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Lex(LexError),
    Parse(ParseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Lex(err) => err.fmt(f),
            Error::Parse(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

impl From<LexError> for Error {
    fn from(err: LexError) -> Self {
        Error::Lex(err)
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

pub struct Interpreter<'input> {
    tokenizer: Tokenizer<'input>,
    /// Lookahead. `None` until the grammar asks for the next token.
    current_token: Option<Token>,
    dump_tokens: bool,
}

impl<'input> Interpreter<'input> {
    pub fn new(text: &'input str, dialect: Dialect) -> Self {
        Self {
            tokenizer: Tokenizer::new(text, dialect),
            current_token: None,
            dump_tokens: false,
        }
    }

    /// Write every token to stderr as it is pulled from the tokenizer.
    pub fn dump_tokens(mut self, enabled: bool) -> Self {
        self.dump_tokens = enabled;
        self
    }

    /// Evaluate `INTEGER (PLUS | MINUS) INTEGER`.
    pub fn expr(&mut self) -> Result<Value, Error> {
        let left = self.eat(Expected::Integer, TokenKind::as_integer)?;
        let op = self.eat(Expected::Operator, TokenKind::as_operator)?;
        let right = self.eat(Expected::Integer, TokenKind::as_integer)?;

        let result = op.apply(left, right);
        trace!("{left} {op:?} {right} = {result}");
        Ok(result)
    }

    fn current_token(&mut self) -> Result<Token, LexError> {
        if let Some(token) = self.current_token {
            return Ok(token);
        }
        let token = self.tokenizer.next_token()?;
        trace!("pulled {token}");
        if self.dump_tokens {
            eprintln!("{token}");
        }
        self.current_token = Some(token);
        Ok(token)
    }

    /// Consume the current token if `accept` maps its kind to a value,
    /// otherwise fail with the class that was `expected` here.
    fn eat<T>(
        &mut self,
        expected: Expected,
        accept: impl FnOnce(TokenKind) -> Option<T>,
    ) -> Result<T, Error> {
        let found = self.current_token()?;
        match accept(found.kind) {
            Some(value) => {
                self.current_token = None;
                Ok(value)
            }
            None => Err(ParseError::UnexpectedToken { expected, found }.into()),
        }
    }
}
