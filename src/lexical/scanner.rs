//! Longest-match scanner for the expression terminal alphabet
//!
//! The scanner extends a candidate substring one character at a time for as
//! long as some terminal class still matches the whole substring; when no
//! class matches it backs off one character and emits the token for the last
//! substring that did match. Whitespace is a terminal class that is matched
//! greedily and then discarded instead of being emitted. A character outside
//! every class becomes a single-character ERROR token, so one bad character
//! fails one token rather than the whole scan.
//!
//! `scan_one` is a pure function of `(text, pos)`, which is what makes
//! memoized backtracking in the parser sound.

use crate::config::constants::compile_time::lexical::{MAX_LEXEME_LENGTH, MAX_TOKEN_COUNT};
use crate::config::runtime::ScanPreferences;
use crate::logging::codes;
use crate::tokens::token::{Token, TokenKind};
use crate::utils::{SourceMap, Span, Spanned};
use crate::{log_debug, log_success};

/// Scan limits enforced by the eager tokenization pass
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScanLimitError {
    #[error("Too many tokens: {count} (max {MAX_TOKEN_COUNT})")]
    TooManyTokens { count: usize },

    #[error("Lexeme too long: {length} characters (max {MAX_LEXEME_LENGTH})")]
    LexemeTooLong { length: usize },
}

impl ScanLimitError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ScanLimitError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
            ScanLimitError::LexemeTooLong { .. } => codes::lexical::LEXEME_TOO_LONG,
        }
    }
}

/// Terminal classes recognized by the scanner
///
/// Whitespace is a real class during matching but never reaches the caller
/// of [`scan_one`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanClass {
    Whitespace,
    Terminal(TokenKind),
}

/// Classify a candidate substring against the terminal alphabet
fn classify(sub: &str) -> Option<ScanClass> {
    match sub {
        "+" => Some(ScanClass::Terminal(TokenKind::Add)),
        "-" => Some(ScanClass::Terminal(TokenKind::Sub)),
        "*" => Some(ScanClass::Terminal(TokenKind::Mul)),
        "/" => Some(ScanClass::Terminal(TokenKind::Div)),
        "^" => Some(ScanClass::Terminal(TokenKind::Exp)),
        "(" => Some(ScanClass::Terminal(TokenKind::LParen)),
        ")" => Some(ScanClass::Terminal(TokenKind::RParen)),
        _ => {
            if !sub.is_empty() && sub.bytes().all(|b| b.is_ascii_digit()) {
                Some(ScanClass::Terminal(TokenKind::Number))
            } else if !sub.is_empty() && sub.chars().all(|c| c.is_whitespace()) {
                Some(ScanClass::Whitespace)
            } else {
                None
            }
        }
    }
}

/// Greedy longest-match over one class-stable run starting at `start`
///
/// Returns the matched class and the end offset of the longest substring
/// that still classified, or `None` when the first character belongs to no
/// class.
fn scan_raw(input: &str, start: usize) -> Option<(ScanClass, usize)> {
    let mut matched: Option<(ScanClass, usize)> = None;

    for (idx, ch) in input[start..].char_indices() {
        let candidate_end = start + idx + ch.len_utf8();
        match classify(&input[start..candidate_end]) {
            Some(class) => matched = Some((class, candidate_end)),
            None => break,
        }
    }

    matched
}

/// Scan exactly one token starting at `pos`
///
/// Whitespace runs are skipped transparently; exhausted input yields the
/// distinguished EOF token with an empty lexeme and a non-advancing
/// position. Pure function of `(input, pos)`.
pub fn scan_one(input: &str, pos: usize) -> (Token, usize) {
    let mut pos = pos;

    loop {
        if pos >= input.len() {
            return (Token::eof(), input.len());
        }

        match scan_raw(input, pos) {
            Some((ScanClass::Whitespace, end)) => {
                pos = end;
            }
            Some((ScanClass::Terminal(kind), end)) => {
                return (Token::new(kind, &input[pos..end]), end);
            }
            None => {
                if let Some(ch) = input[pos..].chars().next() {
                    return (Token::error(ch), pos + ch.len_utf8());
                }
                return (Token::eof(), input.len());
            }
        }
    }
}

/// Essential scan metrics for diagnostics output
#[derive(Debug, Default, Clone)]
pub struct ScanMetrics {
    pub total_tokens: usize,
    pub number_tokens: usize,
    pub operator_tokens: usize,
    pub paren_tokens: usize,
    pub error_tokens: usize,
    pub whitespace_runs: usize,
    pub max_lexeme_length: usize,
}

impl ScanMetrics {
    fn record_token(&mut self, token: &Token, preferences: &ScanPreferences) {
        self.total_tokens += 1;

        match token.kind {
            TokenKind::Number => self.number_tokens += 1,
            kind if kind.is_operator() => self.operator_tokens += 1,
            kind if kind.is_paren() => self.paren_tokens += 1,
            TokenKind::Error => self.error_tokens += 1,
            _ => {}
        }

        if preferences.collect_detailed_metrics {
            self.max_lexeme_length = self.max_lexeme_length.max(token.lexeme.len());
        }
    }
}

/// Eagerly scan the whole input into spanned tokens for dumps and diagnostics
///
/// The parser never uses this; it scans lazily through the cursor. ERROR
/// tokens are included (preference-gated) so a dump shows exactly what the
/// parser would see. The final EOF token is always the last element.
pub fn tokenize_source(
    source: &str,
    preferences: &ScanPreferences,
) -> Result<(Vec<Spanned<Token>>, ScanMetrics), ScanLimitError> {
    let source_map = SourceMap::new(source.to_string());
    let mut tokens = Vec::new();
    let mut metrics = ScanMetrics::default();
    let mut pos = 0;
    let mut prev_end = 0;

    log_debug!("Starting eager scan", "length" => source.len());

    loop {
        if tokens.len() >= MAX_TOKEN_COUNT {
            return Err(ScanLimitError::TooManyTokens {
                count: tokens.len(),
            });
        }

        let (token, next_pos) = scan_one(source, pos);
        let lexeme_start = next_pos - token.lexeme.len();

        if token.lexeme.len() > MAX_LEXEME_LENGTH {
            return Err(ScanLimitError::LexemeTooLong {
                length: token.lexeme.len(),
            });
        }

        if preferences.count_whitespace_runs && lexeme_start > prev_end {
            metrics.whitespace_runs += 1;
        }
        prev_end = next_pos;

        let span = Span::new(
            source_map.position_at(lexeme_start),
            source_map.position_at(next_pos),
        );

        metrics.record_token(&token, preferences);

        let is_eof = token.is_eof();
        if !token.is_error() || preferences.include_error_tokens {
            tokens.push(Spanned::new(token, span));
        }

        if is_eof {
            break;
        }
        pos = next_pos;
    }

    log_success!(codes::success::TOKENIZATION_COMPLETE,
        "Eager scan completed",
        "tokens" => metrics.total_tokens,
        "numbers" => metrics.number_tokens,
        "operators" => metrics.operator_tokens,
        "errors" => metrics.error_tokens
    );

    Ok((tokens, metrics))
}
