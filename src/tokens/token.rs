//! Token system for the expression front end
//!
//! Dedicated symbol tokens for every operator, plus NUMBER, parentheses,
//! and the distinguished EOF and ERROR tokens. A token is the pair of a
//! [`TokenKind`] tag and the exact source substring it was scanned from;
//! tag identity drives all parsing decisions, the lexeme travels alongside
//! for rendering and diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of terminal tags produced by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Arithmetic operators
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /
    Exp, // ^

    // Grouping
    LParen, // (
    RParen, // )

    // Literals
    Number, // digit run

    // End of input marker
    Eof,

    // Character outside every terminal class
    Error,
}

impl TokenKind {
    /// Tag name used by the canonical tree rendering
    pub fn tag_str(&self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Exp => "EXP",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
            Self::Number => "NUMBER",
            Self::Eof => "EOF",
            Self::Error => "ERROR",
        }
    }

    /// Check if this tag is a binary arithmetic operator
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Exp
        )
    }

    /// Check if this tag is a grouping delimiter
    pub fn is_paren(&self) -> bool {
        matches!(self, Self::LParen | Self::RParen)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag_str())
    }
}

/// A scanned token: tag plus the exact source substring it covers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
}

impl Token {
    /// Create a token from a tag and its source text
    pub fn new(kind: TokenKind, lexeme: &str) -> Self {
        Self {
            kind,
            lexeme: lexeme.to_string(),
        }
    }

    /// The distinguished end-of-input token (empty lexeme)
    pub fn eof() -> Self {
        Self {
            kind: TokenKind::Eof,
            lexeme: String::new(),
        }
    }

    /// A single-character error token for input outside every class
    pub fn error(ch: char) -> Self {
        Self {
            kind: TokenKind::Error,
            lexeme: ch.to_string(),
        }
    }

    /// Check if this is the end-of-input token
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Check if this token reports a lexical error
    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }

    /// Tag name used by the canonical tree rendering
    pub fn tag_str(&self) -> &'static str {
        self.kind.tag_str()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lexeme.is_empty() {
            write!(f, "{}", self.kind.tag_str())
        } else {
            write!(f, "{}({:?})", self.kind.tag_str(), self.lexeme)
        }
    }
}
