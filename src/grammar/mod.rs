//! Grammar definition and parse tree for arithmetic expressions
//!
//! The rules consume the engine primitives (`expect`, `memoize`) through the
//! [`rules::RuleEngine`] trait; the tree they build is the front end's only
//! output artifact.

pub mod rules;
pub mod tree;

pub use rules::{RuleEngine, RuleKind};
pub use tree::{ParseNode, TreeItem};
