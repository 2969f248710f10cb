//! Ordered, labeled parse tree
//!
//! Internal nodes carry the label of the grammar alternative that matched
//! (`"add_0"`, `"atom_1"`, ...); leaves are the tokens the alternative
//! consumed, in left-to-right grammar order. Nodes are only ever built from
//! fully matched alternatives, so no partially matched structure is
//! reachable from a returned tree.

use crate::tokens::Token;
use serde::Serialize;
use std::fmt;

/// A child of a parse tree node: either a consumed token or a sub-tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TreeItem {
    Leaf(Token),
    Node(ParseNode),
}

impl TreeItem {
    /// Get the sub-tree if this child is an internal node
    pub fn as_node(&self) -> Option<&ParseNode> {
        match self {
            Self::Node(node) => Some(node),
            Self::Leaf(_) => None,
        }
    }

    /// Get the token if this child is a leaf
    pub fn as_leaf(&self) -> Option<&Token> {
        match self {
            Self::Leaf(token) => Some(token),
            Self::Node(_) => None,
        }
    }
}

/// A rule application in the parse tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseNode {
    /// Label of the grammar alternative that produced this node
    pub label: &'static str,
    /// Children in left-to-right grammar order
    pub children: Vec<TreeItem>,
}

impl ParseNode {
    /// Create a node for a fully matched alternative
    pub fn new(label: &'static str, children: Vec<TreeItem>) -> Self {
        Self { label, children }
    }

    /// Get a child by index
    pub fn child(&self, index: usize) -> Option<&TreeItem> {
        self.children.get(index)
    }

    /// Get a child sub-tree by index
    pub fn child_node(&self, index: usize) -> Option<&ParseNode> {
        self.children.get(index).and_then(TreeItem::as_node)
    }

    /// Get a child token by index
    pub fn child_leaf(&self, index: usize) -> Option<&Token> {
        self.children.get(index).and_then(TreeItem::as_leaf)
    }

    /// Canonical one-line rendering: `(<label> <children...>)` with leaves
    /// rendered as their token tag names
    ///
    /// This exact bracketing/labeling scheme is the serialization contract
    /// external tooling may depend on.
    pub fn bracketed(&self) -> String {
        let mut out = String::new();
        self.write_bracketed(&mut out);
        out
    }

    fn write_bracketed(&self, out: &mut String) {
        out.push('(');
        out.push_str(self.label);
        for child in &self.children {
            out.push(' ');
            match child {
                TreeItem::Leaf(token) => out.push_str(token.tag_str()),
                TreeItem::Node(node) => node.write_bracketed(out),
            }
        }
        out.push(')');
    }

    /// Indented multi-line rendering for human inspection
    pub fn tree_string(&self) -> String {
        self.render_indented(0)
    }

    fn render_indented(&self, level: usize) -> String {
        let indent = "  ".repeat(level);
        let mut res = format!("{}({}", indent, self.label);
        for child in &self.children {
            match child {
                TreeItem::Leaf(token) => {
                    res.push_str(&format!("\n{}  {}", indent, token.tag_str()));
                }
                TreeItem::Node(node) => {
                    res.push('\n');
                    res.push_str(&node.render_indented(level + 1));
                }
            }
        }
        res.push_str(&format!("\n{})", indent));
        res
    }
}

impl fmt::Display for ParseNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bracketed())
    }
}
