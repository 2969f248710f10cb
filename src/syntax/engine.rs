//! Packrat engine with direct left-recursion support
//!
//! Ordinary packrat parsing memoizes `(rule, position)` results so each
//! position is evaluated by each rule at most once. A left-recursive rule
//! body defeats that naively: evaluating the rule at position `p`
//! immediately asks for its own result at `p`, which is not known yet. The
//! engine resolves this with memoized seed growing:
//!
//! 1. On first entry at `(rule, p)`, install a failure seed: a memo entry
//!    that matches nothing and ends at `p`. Any recursive re-entry observes
//!    the seed and fails fast instead of looping.
//! 2. Run the rule body. Its non-recursive alternative can now succeed.
//! 3. If the attempt ended strictly further than the recorded entry,
//!    overwrite the entry with the new result and run the body again; the
//!    recursive re-entry now observes the grown result and can consume one
//!    more operator application.
//! 4. Stop when an attempt fails to advance past the recorded entry (or the
//!    recorded entry already reaches end of input), rewind to the recorded
//!    end, and return the recorded result. The entry is final from then on.
//!
//! Each growth round wraps the previous best result as the left child of
//! one more binary application, which is exactly left associativity without
//! left-factoring the grammar.
//!
//! The memo table is owned by one engine instance, lives for exactly one
//! top-level parse, and is discarded with the engine.

use crate::grammar::rules::{self, RuleEngine, RuleKind};
use crate::grammar::tree::ParseNode;
use crate::log_debug;
use crate::tokens::{CursorPos, Token, TokenCursor, TokenKind};
use std::collections::HashMap;

/// A memoized evaluation: the result and the position it consumed up to
///
/// The failure seed and a final result share this shape; an entry present
/// while its grow loop is still running is exactly the seed the next
/// recursive re-entry must observe.
#[derive(Debug, Clone)]
struct MemoEntry {
    result: Option<ParseNode>,
    end: CursorPos,
}

/// One-parse packrat evaluator over a token cursor
pub struct PackratEngine {
    cursor: TokenCursor,
    memo: HashMap<(RuleKind, CursorPos), MemoEntry>,
    furthest: CursorPos,
}

impl PackratEngine {
    /// Create an engine for one top-level parse of `source`
    pub fn new(source: &str) -> Self {
        let cursor = TokenCursor::new(source);
        let furthest = cursor.mark();
        Self {
            cursor,
            memo: HashMap::new(),
            furthest,
        }
    }

    /// Run the top-level production: `prog := add EOF`
    ///
    /// Returns the success flag and the tree: the full `prog` tree on
    /// success, the best partial tree (or nothing) on failure.
    pub fn parse(&mut self) -> (bool, Option<ParseNode>) {
        rules::prog(self)
    }

    /// Furthest byte offset any match attempt reached
    ///
    /// Best-effort diagnostic for "error near position N"; not part of the
    /// success contract.
    pub fn furthest_offset(&self) -> usize {
        self.furthest.offset()
    }

    /// Number of memo table entries accumulated by this parse
    pub fn memo_entries(&self) -> usize {
        self.memo.len()
    }

    fn note_position(&mut self, position: CursorPos) {
        if position > self.furthest {
            self.furthest = position;
        }
    }
}

impl RuleEngine for PackratEngine {
    fn mark(&self) -> CursorPos {
        self.cursor.mark()
    }

    fn reset(&mut self, position: CursorPos) {
        self.cursor.reset(position);
    }

    fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        let token_at = self.cursor.peek_mark();
        self.note_position(token_at);

        if self.cursor.peek().kind == kind {
            let token = self.cursor.next();
            let after = self.cursor.mark();
            self.note_position(after);
            Some(token)
        } else {
            None
        }
    }

    fn memoize(
        &mut self,
        rule: RuleKind,
        body: fn(&mut dyn RuleEngine) -> Option<ParseNode>,
    ) -> Option<ParseNode> {
        let start = self.mark();
        let key = (rule, start);

        // Fast path: both final results and in-flight seeds are served from
        // the table; observing a seed is what terminates the recursion.
        if let Some(entry) = self.memo.get(&key) {
            let node = entry.result.clone();
            self.reset(entry.end);
            return node;
        }

        if rule.is_left_recursive() {
            // Failure seed: matched nothing, ends where it starts
            let mut last = MemoEntry {
                result: None,
                end: start,
            };
            self.memo.insert(key, last.clone());

            loop {
                self.reset(start);
                let node = body(self);
                let end = self.mark();

                if end <= last.end {
                    // No further progress; the recorded entry is final
                    self.reset(last.end);
                    log_debug!("Left recursion resolved",
                        "rule" => rule,
                        "start" => start,
                        "end" => last.end
                    );
                    return last.result.clone();
                }

                last = MemoEntry { result: node, end };
                self.memo.insert(key, last.clone());

                if self.cursor.at_eof() {
                    // The grown result already reaches end of input
                    log_debug!("Left recursion resolved at end of input",
                        "rule" => rule,
                        "start" => start,
                        "end" => end
                    );
                    return last.result.clone();
                }
            }
        } else {
            let node = body(self);
            let end = self.mark();
            self.memo.insert(
                key,
                MemoEntry {
                    result: node.clone(),
                    end,
                },
            );
            node
        }
    }
}
