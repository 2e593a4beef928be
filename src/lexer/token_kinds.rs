use std::fmt;

use logos::{Lexer, Logos};

/// Byte offset into a line of input
pub type Offset = usize;

/// A pair of offsets that capture a range within a line of input
pub type ByteSpan = (Offset, Offset);

/// The two builtin binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Plus,
    Minus,
}

impl Op {
    /// Apply the operator to two literals. Every result is representable,
    /// `u64::MAX + u64::MAX` and `0 - u64::MAX` included.
    pub fn apply(self, left: u64, right: u64) -> i128 {
        let (left, right) = (i128::from(left), i128::from(right));
        match self {
            Op::Plus => left + right,
            Op::Minus => left - right,
        }
    }

    fn symbol(self) -> char {
        match self {
            Op::Plus => '+',
            Op::Minus => '-',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Integer(u64),
    Operator(Op),
    Eof,
}

impl TokenKind {
    #[inline]
    pub fn as_integer(self) -> Option<u64> {
        match self {
            TokenKind::Integer(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_operator(self) -> Option<Op> {
        match self {
            TokenKind::Operator(op) => Some(op),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Kind of token this is
    pub kind: TokenKind,
    /// Byte range from the input line that this token was found at
    pub span: ByteSpan,
}

impl Token {
    pub fn new(kind: TokenKind, span: ByteSpan) -> Self {
        Self { kind, span }
    }
}

/// Renders tokens the way the calculator has always shown them:
/// `Token(INTEGER, 3)`, `Token(PLUS, '+')`, `Token(EOF, None)`.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Integer(value) => write!(f, "Token(INTEGER, {value})"),
            TokenKind::Operator(op @ Op::Plus) => write!(f, "Token(PLUS, '{}')", op.symbol()),
            TokenKind::Operator(op @ Op::Minus) => write!(f, "Token(MINUS, '{}')", op.symbol()),
            TokenKind::Eof => write!(f, "Token(EOF, None)"),
        }
    }
}

fn lex_digit(lex: &mut Lexer<RawToken>) -> u8 {
    lex.slice().as_bytes()[0] - b'0'
}

/// Character classes recognised by the automaton. Digits are produced one
/// at a time; the tokenizer decides whether a run of them forms a single
/// integer.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
pub(super) enum RawToken {
    #[regex("[0-9]", lex_digit)]
    Digit(u8),

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,

    #[regex(r"[ \t\r\n\x0B\x0C]+")]
    Whitespace,

    #[error]
    Error,
}

impl RawToken {
    #[inline]
    pub fn is_whitespace(&self) -> bool {
        matches!(self, RawToken::Whitespace)
    }

    #[inline]
    pub fn is_digit(&self) -> bool {
        matches!(self, RawToken::Digit(_))
    }
}
