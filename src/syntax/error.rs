//! Parse failure classification
//!
//! The engine itself reports failure as a first-class outcome (`false` plus
//! a best partial tree); this module maps that outcome onto error values
//! for callers that want `Result` ergonomics and coded logging.

use crate::logging::{codes, Code};
use crate::utils::Position;

pub type ParseResult<T> = Result<T, ParseError>;

/// Why a top-level parse failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("No grammar rule matched near {position}")]
    NoMatch { position: Position },

    #[error("Unconsumed input after a well-formed expression near {position}")]
    TrailingInput { position: Position },

    #[error("Empty input - nothing to parse")]
    EmptyInput,
}

impl ParseError {
    /// Get error code for the global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::NoMatch { .. } => codes::syntax::NO_RULE_MATCHED,
            Self::TrailingInput { .. } => codes::syntax::TRAILING_INPUT,
            Self::EmptyInput => codes::syntax::EMPTY_EXPRESSION,
        }
    }

    /// Position of the failure, if one is attributable
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::NoMatch { position } | Self::TrailingInput { position } => Some(*position),
            Self::EmptyInput => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let position = Position::new(3, 1, 4);

        assert_eq!(
            ParseError::NoMatch { position }.error_code().as_str(),
            "E043"
        );
        assert_eq!(
            ParseError::TrailingInput { position }.error_code().as_str(),
            "E045"
        );
        assert_eq!(ParseError::EmptyInput.error_code().as_str(), "E041");
    }

    #[test]
    fn test_error_display() {
        let position = Position::new(3, 1, 4);
        let message = format!("{}", ParseError::TrailingInput { position });
        assert!(message.contains("1:4"));
    }

    #[test]
    fn test_position_attribution() {
        let position = Position::new(0, 1, 1);
        assert_eq!(
            ParseError::NoMatch { position }.position(),
            Some(position)
        );
        assert_eq!(ParseError::EmptyInput.position(), None);
    }
}
