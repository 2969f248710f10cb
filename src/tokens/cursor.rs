//! Backtrackable token stream cursor
//!
//! Owns the raw input text and a scanning position. Tokens are produced
//! lazily by re-scanning from the current byte offset, so saving and
//! restoring a position is a single offset copy and rewinding automatically
//! un-skips any whitespace the scanner had discarded. A one-token cache
//! keyed by position avoids re-lexing on repeated `peek` calls.

use crate::lexical::scanner::scan_one;
use crate::tokens::token::Token;

/// Opaque, totally-ordered cursor position (a byte offset into the input)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CursorPos(usize);

impl CursorPos {
    /// Byte offset into the raw input
    pub fn offset(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for CursorPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Token-at-a-time cursor over raw input with mark/reset backtracking
#[derive(Debug, Clone)]
pub struct TokenCursor {
    input: String,
    pos: usize,
    /// Cached scan result: (scanned-from offset, token, offset after token)
    lookahead: Option<(usize, Token, usize)>,
}

impl TokenCursor {
    /// Create a cursor at the start of the given input
    pub fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
            pos: 0,
            lookahead: None,
        }
    }

    /// The raw input text this cursor scans
    pub fn input(&self) -> &str {
        &self.input
    }

    fn scan_cached(&mut self) -> (Token, usize) {
        if let Some((from, token, next)) = &self.lookahead {
            if *from == self.pos {
                return (token.clone(), *next);
            }
        }

        let (token, next) = scan_one(&self.input, self.pos);
        self.lookahead = Some((self.pos, token.clone(), next));
        (token, next)
    }

    /// Return the next token without consuming it
    ///
    /// Idempotent: repeated calls return the identical token and leave the
    /// position unchanged.
    pub fn peek(&mut self) -> Token {
        self.scan_cached().0
    }

    /// Consume and return the next token, advancing past it
    ///
    /// At end of input this keeps returning EOF without advancing further.
    pub fn next(&mut self) -> Token {
        let (token, next) = self.scan_cached();
        self.pos = next;
        token
    }

    /// Save the current position
    pub fn mark(&self) -> CursorPos {
        CursorPos(self.pos)
    }

    /// Position of the token `peek` returns, past any discarded whitespace
    pub fn peek_mark(&mut self) -> CursorPos {
        let (token, next) = self.scan_cached();
        CursorPos(next - token.lexeme.len())
    }

    /// Rewind to a previously saved position
    ///
    /// Subsequent `peek`/`next` calls behave as if this had always been the
    /// current position; the stale lookahead is ignored because the cache is
    /// keyed by the offset it was scanned from.
    pub fn reset(&mut self, position: CursorPos) {
        self.pos = position.0;
    }

    /// Check if the cursor has reached the end-of-input token
    pub fn at_eof(&mut self) -> bool {
        self.peek().is_eof()
    }
}
