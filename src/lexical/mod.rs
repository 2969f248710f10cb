//! Lexical analysis for the expression front end
//!
//! A single longest-match scanner over a fixed terminal alphabet. The
//! scanner is position-pure: the cursor and the packrat engine rely on
//! `scan_one(text, pos)` producing the same token for the same offset no
//! matter what was scanned before.

pub mod scanner;

pub use scanner::{scan_one, tokenize_source, ScanLimitError, ScanMetrics};
