//! Arithmetic expression grammar
//!
//! Ordered-choice productions, highest to lowest precedence:
//!
//! ```text
//! atom := NUMBER | LPAREN add RPAREN
//! exp  := atom EXP exp | atom            (right-associative)
//! mul  := mul MUL exp | mul DIV exp | exp  (left-recursive)
//! add  := add ADD mul | add SUB mul | mul  (left-recursive)
//! prog := add EOF
//! ```
//!
//! Each non-terminal has a dispatcher that tries its numbered alternatives
//! in priority order, resetting the cursor between attempts, and an
//! alternative function per production that builds its children into a
//! local vector and only returns it on a complete match. Every reference to
//! a non-terminal goes through the engine's `memoize`, which also resolves
//! the left recursion in `add` and `mul`.

use crate::grammar::tree::{ParseNode, TreeItem};
use crate::tokens::{CursorPos, Token, TokenKind};

/// Identity of a non-terminal, used as the memoization key
///
/// A fixed enumerated tag rather than a function reference: memo keys must
/// be stable, comparable, and hashable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Add,
    Mul,
    Exp,
    Atom,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Mul => "mul",
            Self::Exp => "exp",
            Self::Atom => "atom",
        }
    }

    /// Whether the rule's first alternative re-enters the rule before
    /// consuming any token
    pub fn is_left_recursive(&self) -> bool {
        matches!(self, Self::Add | Self::Mul)
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The engine primitives the grammar is written against
///
/// Implemented by the packrat engine; the rules never touch the cursor or
/// the memo table directly.
pub trait RuleEngine {
    /// Save the current cursor position
    fn mark(&self) -> CursorPos;

    /// Rewind the cursor to a saved position
    fn reset(&mut self, position: CursorPos);

    /// Consume exactly one token iff the next token has the given tag;
    /// on mismatch the cursor is unchanged
    fn expect(&mut self, kind: TokenKind) -> Option<Token>;

    /// Evaluate a rule body with memoization (and seed growing for
    /// left-recursive rules)
    fn memoize(
        &mut self,
        rule: RuleKind,
        body: fn(&mut dyn RuleEngine) -> Option<ParseNode>,
    ) -> Option<ParseNode>;
}

// === TOP LEVEL ===

/// `prog := add EOF`
///
/// A successful parse requires `add` to consume a maximal expression and
/// the cursor to then sit exactly at EOF; trailing tokens fail the overall
/// parse even though `add` matched a prefix, in which case the prefix tree
/// is returned as the best partial result.
pub fn prog(engine: &mut dyn RuleEngine) -> (bool, Option<ParseNode>) {
    let tree = engine.memoize(RuleKind::Add, add);
    let eof = engine.expect(TokenKind::Eof);

    match (tree, eof) {
        (Some(tree), Some(eof)) => (
            true,
            Some(ParseNode::new(
                "prog",
                vec![TreeItem::Node(tree), TreeItem::Leaf(eof)],
            )),
        ),
        (tree, _) => (false, tree),
    }
}

// === ADD (left-recursive, left-associative) ===

pub fn add(engine: &mut dyn RuleEngine) -> Option<ParseNode> {
    let start = engine.mark();

    if let Some(children) = add_0(engine) {
        return Some(ParseNode::new("add_0", children));
    }
    engine.reset(start);
    if let Some(children) = add_1(engine) {
        return Some(ParseNode::new("add_1", children));
    }
    engine.reset(start);
    if let Some(children) = add_2(engine) {
        return Some(ParseNode::new("add_2", children));
    }
    engine.reset(start);
    None
}

fn add_0(engine: &mut dyn RuleEngine) -> Option<Vec<TreeItem>> {
    let left = engine.memoize(RuleKind::Add, add)?;
    let op = engine.expect(TokenKind::Add)?;
    let right = engine.memoize(RuleKind::Mul, mul)?;
    Some(vec![
        TreeItem::Node(left),
        TreeItem::Leaf(op),
        TreeItem::Node(right),
    ])
}

fn add_1(engine: &mut dyn RuleEngine) -> Option<Vec<TreeItem>> {
    let left = engine.memoize(RuleKind::Add, add)?;
    let op = engine.expect(TokenKind::Sub)?;
    let right = engine.memoize(RuleKind::Mul, mul)?;
    Some(vec![
        TreeItem::Node(left),
        TreeItem::Leaf(op),
        TreeItem::Node(right),
    ])
}

fn add_2(engine: &mut dyn RuleEngine) -> Option<Vec<TreeItem>> {
    let inner = engine.memoize(RuleKind::Mul, mul)?;
    Some(vec![TreeItem::Node(inner)])
}

// === MUL (left-recursive, left-associative) ===

pub fn mul(engine: &mut dyn RuleEngine) -> Option<ParseNode> {
    let start = engine.mark();

    if let Some(children) = mul_0(engine) {
        return Some(ParseNode::new("mul_0", children));
    }
    engine.reset(start);
    if let Some(children) = mul_1(engine) {
        return Some(ParseNode::new("mul_1", children));
    }
    engine.reset(start);
    if let Some(children) = mul_2(engine) {
        return Some(ParseNode::new("mul_2", children));
    }
    engine.reset(start);
    None
}

fn mul_0(engine: &mut dyn RuleEngine) -> Option<Vec<TreeItem>> {
    let left = engine.memoize(RuleKind::Mul, mul)?;
    let op = engine.expect(TokenKind::Mul)?;
    let right = engine.memoize(RuleKind::Exp, exp)?;
    Some(vec![
        TreeItem::Node(left),
        TreeItem::Leaf(op),
        TreeItem::Node(right),
    ])
}

fn mul_1(engine: &mut dyn RuleEngine) -> Option<Vec<TreeItem>> {
    let left = engine.memoize(RuleKind::Mul, mul)?;
    let op = engine.expect(TokenKind::Div)?;
    let right = engine.memoize(RuleKind::Exp, exp)?;
    Some(vec![
        TreeItem::Node(left),
        TreeItem::Leaf(op),
        TreeItem::Node(right),
    ])
}

fn mul_2(engine: &mut dyn RuleEngine) -> Option<Vec<TreeItem>> {
    let inner = engine.memoize(RuleKind::Exp, exp)?;
    Some(vec![TreeItem::Node(inner)])
}

// === EXP (right-recursive, right-associative) ===

pub fn exp(engine: &mut dyn RuleEngine) -> Option<ParseNode> {
    let start = engine.mark();

    if let Some(children) = exp_0(engine) {
        return Some(ParseNode::new("exp_0", children));
    }
    engine.reset(start);
    if let Some(children) = exp_1(engine) {
        return Some(ParseNode::new("exp_1", children));
    }
    engine.reset(start);
    None
}

fn exp_0(engine: &mut dyn RuleEngine) -> Option<Vec<TreeItem>> {
    let base = engine.memoize(RuleKind::Atom, atom)?;
    let op = engine.expect(TokenKind::Exp)?;
    let power = engine.memoize(RuleKind::Exp, exp)?;
    Some(vec![
        TreeItem::Node(base),
        TreeItem::Leaf(op),
        TreeItem::Node(power),
    ])
}

fn exp_1(engine: &mut dyn RuleEngine) -> Option<Vec<TreeItem>> {
    let base = engine.memoize(RuleKind::Atom, atom)?;
    Some(vec![TreeItem::Node(base)])
}

// === ATOM ===

pub fn atom(engine: &mut dyn RuleEngine) -> Option<ParseNode> {
    let start = engine.mark();

    if let Some(children) = atom_0(engine) {
        return Some(ParseNode::new("atom_0", children));
    }
    engine.reset(start);
    if let Some(children) = atom_1(engine) {
        return Some(ParseNode::new("atom_1", children));
    }
    engine.reset(start);
    None
}

fn atom_0(engine: &mut dyn RuleEngine) -> Option<Vec<TreeItem>> {
    let open = engine.expect(TokenKind::LParen)?;
    let inner = engine.memoize(RuleKind::Add, add)?;
    let close = engine.expect(TokenKind::RParen)?;
    Some(vec![
        TreeItem::Leaf(open),
        TreeItem::Node(inner),
        TreeItem::Leaf(close),
    ])
}

fn atom_1(engine: &mut dyn RuleEngine) -> Option<Vec<TreeItem>> {
    let number = engine.expect(TokenKind::Number)?;
    Some(vec![TreeItem::Leaf(number)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::engine::PackratEngine;
    use crate::tokens::TokenKind;

    fn parse(source: &str) -> (bool, Option<ParseNode>) {
        PackratEngine::new(source).parse()
    }

    fn parse_tree(source: &str) -> ParseNode {
        let (success, tree) = parse(source);
        assert!(success, "expected '{}' to parse", source);
        tree.unwrap()
    }

    /// The `add` subtree of a successful `prog` parse
    fn add_tree(source: &str) -> ParseNode {
        parse_tree(source).child_node(0).unwrap().clone()
    }

    #[test]
    fn test_rule_kind_left_recursion_flags() {
        assert!(RuleKind::Add.is_left_recursive());
        assert!(RuleKind::Mul.is_left_recursive());
        assert!(!RuleKind::Exp.is_left_recursive());
        assert!(!RuleKind::Atom.is_left_recursive());
    }

    #[test]
    fn test_single_number() {
        let tree = parse_tree("42");
        assert_eq!(
            tree.bracketed(),
            "(prog (add_2 (mul_2 (exp_1 (atom_1 NUMBER)))) EOF)"
        );
    }

    #[test]
    fn test_precedence_canonical_rendering() {
        // * binds tighter than +: the root add's right operand holds the mul
        let tree = add_tree("1+2*3");
        assert_eq!(
            tree.bracketed(),
            "(add_0 (add_2 (mul_2 (exp_1 (atom_1 NUMBER)))) ADD \
             (mul_0 (mul_2 (exp_1 (atom_1 NUMBER))) MUL (exp_1 (atom_1 NUMBER))))"
        );
    }

    #[test]
    fn test_left_associativity_of_sub() {
        // 1-2-3 parses as (1-2)-3: the outer add's left child is an add node
        let tree = add_tree("1-2-3");
        assert_eq!(tree.label, "add_1");

        let left = tree.child_node(0).unwrap();
        assert_eq!(left.label, "add_1");

        let innermost = left.child_node(0).unwrap();
        assert_eq!(innermost.label, "add_2");
    }

    #[test]
    fn test_left_associativity_of_div() {
        // 8/4/2 parses as (8/4)/2
        let tree = add_tree("8/4/2");
        let mul_node = tree.child_node(0).unwrap();
        assert_eq!(mul_node.label, "mul_1");
        assert_eq!(mul_node.child_node(0).unwrap().label, "mul_1");
    }

    #[test]
    fn test_right_associativity_of_exp() {
        // 2^3^2 parses as 2^(3^2): the outer exp's right child is an exp node
        let tree = add_tree("2^3^2");
        let exp_node = tree
            .child_node(0) // add_2 -> mul
            .and_then(|n| n.child_node(0)) // mul_2 -> exp
            .unwrap();
        assert_eq!(exp_node.label, "exp_0");

        let right = exp_node.child_node(2).unwrap();
        assert_eq!(right.label, "exp_0");
        assert_eq!(right.child_node(2).unwrap().label, "exp_1");
    }

    #[test]
    fn test_mixed_operators() {
        let tree = add_tree("1+2-3");
        // Left-to-right: ((1+2)-3), outermost alternative is SUB
        assert_eq!(tree.label, "add_1");
        assert_eq!(tree.child_node(0).unwrap().label, "add_0");
    }

    #[test]
    fn test_parenthesized_subexpression() {
        let tree = add_tree("(1+2)*3");
        let mul_node = tree.child_node(0).unwrap();
        assert_eq!(mul_node.label, "mul_0");

        let atom_node = mul_node
            .child_node(0) // mul_2 -> exp_1 -> atom_0
            .and_then(|n| n.child_node(0))
            .and_then(|n| n.child_node(0))
            .unwrap();
        assert_eq!(atom_node.label, "atom_0");
        assert_eq!(
            atom_node.child_leaf(0).map(|t| t.kind),
            Some(TokenKind::LParen)
        );
        assert_eq!(atom_node.child_node(1).unwrap().label, "add_0");
    }

    #[test]
    fn test_paren_round_trip_preserves_shape() {
        // Parsing "(E)" wraps the same add subtree that parsing E yields,
        // modulo the atom_0 wrapper and its paren leaves
        let direct = add_tree("1+2*3");
        let wrapped = add_tree("(1+2*3)");

        let atom_node = wrapped
            .child_node(0)
            .and_then(|n| n.child_node(0))
            .and_then(|n| n.child_node(0))
            .unwrap();
        assert_eq!(atom_node.label, "atom_0");
        assert_eq!(atom_node.child_node(1), Some(&direct));
    }

    #[test]
    fn test_whitespace_between_tokens() {
        assert_eq!(add_tree("1 + 2").bracketed(), add_tree("1+2").bracketed());
    }

    #[test]
    fn test_empty_input_fails_without_hanging() {
        let (success, tree) = parse("");
        assert!(!success);
        assert!(tree.is_none());
    }

    #[test]
    fn test_whitespace_only_input_fails() {
        let (success, tree) = parse("   \n  ");
        assert!(!success);
        assert!(tree.is_none());
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        // "1+2" alone succeeds, but the unconsumed RPAREN fails the parse
        let (success, tree) = parse("1+2)");
        assert!(!success);

        // The partial tree covers the well-formed prefix
        let partial = tree.unwrap();
        assert_eq!(partial.label, "add_0");
    }

    #[test]
    fn test_dangling_operator_fails() {
        let (success, tree) = parse("1+");
        assert!(!success);
        assert!(tree.is_some());
    }

    #[test]
    fn test_unbalanced_paren_fails() {
        let (success, _) = parse("(1+2");
        assert!(!success);
    }

    #[test]
    fn test_error_token_fails_parse() {
        let (success, _) = parse("1 @ 2");
        assert!(!success);

        let (success, _) = parse("$");
        assert!(!success);
    }

    #[test]
    fn test_prefix_minus_is_rejected() {
        // '-' is always the binary SUB operator in this grammar
        let (success, _) = parse("-3");
        assert!(!success);
    }

    #[test]
    fn test_deeply_nested_parens() {
        let tree = add_tree("((((7))))");
        assert_eq!(
            tree.bracketed(),
            "(add_2 (mul_2 (exp_1 (atom_0 LPAREN \
             (add_2 (mul_2 (exp_1 (atom_0 LPAREN \
             (add_2 (mul_2 (exp_1 (atom_0 LPAREN \
             (add_2 (mul_2 (exp_1 (atom_0 LPAREN \
             (add_2 (mul_2 (exp_1 (atom_1 NUMBER)))) \
             RPAREN)))) RPAREN)))) RPAREN)))) RPAREN))))"
        );
    }

    #[test]
    fn test_long_left_recursive_chain_terminates() {
        let source = (0..50).map(|i| i.to_string()).collect::<Vec<_>>().join("+");
        let (success, tree) = parse(&source);
        assert!(success);

        // The chain nests 49 add_0 applications, leftmost number deepest
        let mut node = tree.unwrap().child_node(0).unwrap().clone();
        let mut depth = 0;
        while node.label == "add_0" {
            node = node.child_node(0).unwrap().clone();
            depth += 1;
        }
        assert_eq!(depth, 49);
        assert_eq!(node.label, "add_2");
    }
}
