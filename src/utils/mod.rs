//! Shared utilities for the expression front end

pub mod span;

pub use span::{Position, SourceMap, Span, Spanned};
