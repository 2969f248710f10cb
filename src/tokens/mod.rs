//! Token types and the backtrackable token stream cursor
//!
//! The first phase of the front end: raw text becomes typed tokens. The
//! cursor produces tokens lazily by scanning on demand, which is what makes
//! mark/reset backtracking an O(1) offset copy instead of a buffer rewind.

pub mod cursor;
pub mod token;

// Re-export key types for convenience
pub use cursor::{CursorPos, TokenCursor};
pub use token::{Token, TokenKind};
