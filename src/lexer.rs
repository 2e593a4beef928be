mod token_kinds;
use std::{fmt, iter::Peekable};

use log::{debug, trace};
use logos::{Lexer, Span, SpannedIter};

pub use token_kinds::*;

use crate::utils::peeking_take_while::PeekingTakeWhileExt;

/// Which version of the calculator grammar the tokenizer accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Single digit integers and `+`. No whitespace anywhere.
    Classic,
    /// Integers of any width, `+` and `-`, whitespace between tokens.
    #[default]
    Extended,
}

impl Dialect {
    #[inline]
    fn skips_whitespace(self) -> bool {
        self == Dialect::Extended
    }

    #[inline]
    fn has_multi_digit_integers(self) -> bool {
        self == Dialect::Extended
    }

    #[inline]
    fn accepts(self, op: Op) -> bool {
        match op {
            Op::Plus => true,
            Op::Minus => self == Dialect::Extended,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A character that does not start any token in the active dialect.
    UnexpectedCharacter { found: char, offset: Offset },
    /// A run of digits whose value does not fit in a `u64`.
    IntegerTooLarge { span: ByteSpan },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedCharacter { found, offset } => write!(
                f,
                "error parsing input: unexpected character {found:?} at offset {offset}"
            ),
            LexError::IntegerTooLarge { span: (start, end) } => write!(
                f,
                "error parsing input: integer literal at {start}..{end} is too large"
            ),
        }
    }
}

impl std::error::Error for LexError {}

/// Produces one token per call, scanning only as far as that token needs.
pub struct Tokenizer<'input> {
    source: &'input str,
    raw_lexer: Peekable<SpannedIter<'input, RawToken>>,
    dialect: Dialect,
}

impl<'input> Tokenizer<'input> {
    pub fn new(source: &'input str, dialect: Dialect) -> Self {
        Self {
            source,
            raw_lexer: Lexer::new(source).spanned().peekable(),
            dialect,
        }
    }

    /// Return the next token. Once the input is exhausted every further
    /// call returns an EOF token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        if self.dialect.skips_whitespace() {
            self.raw_lexer
                .peeking_take_while(|ts| ts.0.is_whitespace())
                .for_each(drop);
        }

        let Some((raw, span)) = self.raw_lexer.next() else {
            let end = self.source.len();
            return Ok(Token::new(TokenKind::Eof, (end, end)));
        };
        trace!("raw token {raw:?} at {span:?}");

        match raw {
            RawToken::Digit(digit) => self.integer(digit, span),
            RawToken::Plus => self.operator(Op::Plus, span),
            RawToken::Minus => self.operator(Op::Minus, span),
            RawToken::Whitespace | RawToken::Error => Err(self.unexpected(span)),
        }
    }

    /// Build an integer starting with `first`. The extended dialect keeps
    /// consuming digits until something else shows up; that something is
    /// left in the raw lexer and is not inspected any further.
    fn integer(&mut self, first: u8, span: Span) -> Result<Token, LexError> {
        let start = span.start;
        let mut end = span.end;
        let mut value = Some(u64::from(first));

        if self.dialect.has_multi_digit_integers() {
            for (raw, span) in self.raw_lexer.peeking_take_while(|ts| ts.0.is_digit()) {
                if let RawToken::Digit(digit) = raw {
                    value = value
                        .and_then(|v| v.checked_mul(10))
                        .and_then(|v| v.checked_add(u64::from(digit)));
                }
                end = span.end;
            }
        }

        match value {
            Some(value) => Ok(Token::new(TokenKind::Integer(value), (start, end))),
            None => {
                debug!("integer literal {:?} overflows", &self.source[start..end]);
                Err(LexError::IntegerTooLarge { span: (start, end) })
            }
        }
    }

    fn operator(&self, op: Op, span: Span) -> Result<Token, LexError> {
        if self.dialect.accepts(op) {
            Ok(Token::new(TokenKind::Operator(op), (span.start, span.end)))
        } else {
            Err(self.unexpected(span))
        }
    }

    fn unexpected(&self, span: Span) -> LexError {
        let found = self.source[span.start..]
            .chars()
            .next()
            .unwrap_or_default();
        debug!("no token starts with {found:?} at offset {}", span.start);
        LexError::UnexpectedCharacter {
            found,
            offset: span.start,
        }
    }
}
