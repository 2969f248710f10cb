// Internal modules
pub mod config;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use grammar::{ParseNode, RuleKind, TreeItem};
pub use syntax::{parse_source, parse_to_tree, ParseError, ParseOutcome};
pub use tokens::{Token, TokenCursor, TokenKind};
