//! Syntax analysis - source text to parse tree
//!
//! One engine (with its memo table) serves exactly one top-level parse and
//! is discarded afterwards; concurrent parses use independent engines.

pub mod engine;
pub mod error;

pub use engine::PackratEngine;
pub use error::{ParseError, ParseResult};

use crate::config::runtime::ParsePreferences;
use crate::grammar::ParseNode;
use crate::logging::codes;
use crate::utils::{Position, SourceMap};
use crate::{log_debug, log_error, log_success};

/// Result of one top-level parse
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// Whether `add EOF` consumed the whole input
    pub success: bool,
    /// The `prog` tree on success; the best partial tree (or nothing)
    /// on failure
    pub tree: Option<ParseNode>,
    /// Furthest position any match attempt reached
    pub furthest: Position,
}

/// Parse a complete source string into a `(success, tree)` outcome plus
/// the furthest-failure position
pub fn parse_source(source: &str) -> ParseOutcome {
    let preferences = ParsePreferences::default();

    log_debug!("Starting parse", "length" => source.len());

    let mut engine = PackratEngine::new(source);
    let (success, tree) = engine.parse();

    let source_map = SourceMap::new(source.to_string());
    let furthest = source_map.position_at(engine.furthest_offset());

    if preferences.log_memo_statistics {
        log_debug!("Memo table statistics",
            "entries" => engine.memo_entries(),
            "furthest_offset" => engine.furthest_offset()
        );
    }

    if success {
        log_success!(codes::success::PARSE_COMPLETE,
            "Parse completed successfully",
            "length" => source.len()
        );
    } else {
        log_error!(codes::syntax::NO_RULE_MATCHED, "Parse failed",
            "furthest" => furthest,
            "partial_tree" => tree.is_some()
        );
    }

    ParseOutcome {
        success,
        tree,
        furthest,
    }
}

/// Parse a source string, classifying failures into [`ParseError`]
pub fn parse_to_tree(source: &str) -> ParseResult<ParseNode> {
    let outcome = parse_source(source);

    match (outcome.success, outcome.tree) {
        (true, Some(tree)) => Ok(tree),
        (_, tree) => {
            if source.trim().is_empty() {
                Err(ParseError::EmptyInput)
            } else if tree.is_some() {
                Err(ParseError::TrailingInput {
                    position: outcome.furthest,
                })
            } else {
                Err(ParseError::NoMatch {
                    position: outcome.furthest,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_source_success() {
        let outcome = parse_source("1+2*3");
        assert!(outcome.success);

        let tree = outcome.tree.unwrap();
        assert_eq!(tree.label, "prog");
        assert_eq!(tree.children.len(), 2);
    }

    #[test]
    fn test_parse_source_failure_keeps_partial_tree() {
        let outcome = parse_source("1*2 junk");
        assert!(!outcome.success);
        assert!(outcome.tree.is_some());
        assert!(outcome.furthest.offset >= 3);
    }

    #[test]
    fn test_parse_to_tree_success() {
        let tree = parse_to_tree("(4-1)^2").unwrap();
        assert_eq!(tree.label, "prog");
    }

    #[test]
    fn test_parse_to_tree_empty_input() {
        assert_matches!(parse_to_tree(""), Err(ParseError::EmptyInput));
        assert_matches!(parse_to_tree("  \n "), Err(ParseError::EmptyInput));
    }

    #[test]
    fn test_parse_to_tree_trailing_input() {
        let result = parse_to_tree("1+2)");
        assert_matches!(result, Err(ParseError::TrailingInput { .. }));
    }

    #[test]
    fn test_parse_to_tree_no_match() {
        let result = parse_to_tree(")1+2");
        assert_matches!(result, Err(ParseError::NoMatch { .. }));
    }

    #[test]
    fn test_furthest_position_is_line_aware() {
        let outcome = parse_source("1 +\n$");
        assert!(!outcome.success);
        assert_eq!(outcome.furthest.line, 2);
    }
}
