//! Lexer for tokenizing patterns
//!
//! The pattern language is small: printable ASCII literals, the wildcard `.`,
//! the digit class `\d`, and the postfix quantifiers `*` and `+`. Parentheses
//! and commas carry no grouping meaning and lex as plain literals.
//!
//! Tokens only exist at compile time. What a transition consumes at match time
//! is described separately by [`MatchKind`](crate::graph::MatchKind).

use crate::error::{LexerErrorKind, RegexError, Result, Span};
use std::fmt;

/// A token in a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A character that must match itself
    Literal(char),
    /// Dot `.` (any character)
    Wildcard,
    /// Digit shorthand (`\d`)
    Digit,
    /// Star `*` (zero or more)
    Star,
    /// Plus `+` (one or more)
    Plus,
    /// End of input
    Eof,
}

impl Token {
    /// Whether this token repeats the atom before it
    pub fn is_quantifier(&self) -> bool {
        matches!(self, Token::Star | Token::Plus)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(c) => write!(f, "literal `{}`", c),
            Token::Wildcard => write!(f, "`.`"),
            Token::Digit => write!(f, "shorthand `\\d`"),
            Token::Star => write!(f, "`*`"),
            Token::Plus => write!(f, "`+`"),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

/// Lexer for tokenizing patterns
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given pattern
    pub fn new(input: &'a str) -> Self {
        Lexer { input, position: 0 }
    }

    /// Byte offset of the next unread character
    pub fn position(&self) -> usize {
        self.position
    }

    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    fn error(position: usize, kind: LexerErrorKind) -> RegexError {
        RegexError::Lexer { position, kind }
    }

    /// Read an escape sequence (assumes the backslash was already consumed)
    fn read_escape(&mut self, start: usize) -> Result<Token> {
        match self.bump() {
            Some('d') => Ok(Token::Digit),
            Some(c) => Err(Self::error(start, LexerErrorKind::InvalidEscape(c))),
            None => Err(Self::error(start, LexerErrorKind::DanglingEscape)),
        }
    }

    /// Get the next token and the span it covers
    pub fn next_token(&mut self) -> Result<(Token, Span)> {
        let start = self.position;
        let token = match self.bump() {
            None => Token::Eof,
            Some('\\') => self.read_escape(start)?,
            Some('.') => Token::Wildcard,
            Some('*') => Token::Star,
            Some('+') => Token::Plus,
            Some(c) if c.is_ascii_graphic() || c == ' ' => Token::Literal(c),
            Some(c) => return Err(Self::error(start, LexerErrorKind::UnexpectedChar(c))),
        };
        Ok((token, Span::new(start, self.position)))
    }

    /// Tokenize the entire pattern, excluding the trailing EOF
    pub fn tokenize(&mut self) -> Result<Vec<(Token, Span)>> {
        let mut tokens = Vec::new();
        loop {
            let (token, span) = self.next_token()?;
            if token == Token::Eof {
                return Ok(tokens);
            }
            tokens.push((token, span));
        }
    }
}
