//! Consolidated error codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and
//! classification functions used by the global logging system.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Input handling error codes
pub mod input {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INPUT_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_INPUT: Code = Code::new("E008");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const INVALID_CHARACTER: Code = Code::new("E020");
    pub const LEXEME_TOO_LONG: Code = Code::new("E023");
    pub const TOO_MANY_TOKENS: Code = Code::new("E027");
}

/// Syntax analysis error codes
pub mod syntax {
    use super::Code;

    pub const EMPTY_EXPRESSION: Code = Code::new("E041");
    pub const NO_RULE_MATCHED: Code = Code::new("E043");
    pub const TRAILING_INPUT: Code = Code::new("E045");
    pub const UNEXPECTED_TOKEN: Code = Code::new("E050");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const INPUT_LOADED: Code = Code::new("I006");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I010");
    pub const PARSE_COMPLETE: Code = Code::new("I011");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

static METADATA_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn metadata_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    METADATA_REGISTRY.get_or_init(|| {
        let entries = [
            ErrorMetadata {
                code: "ERR001",
                category: "System",
                severity: Severity::Critical,
                recoverable: false,
                requires_halt: true,
                description: "Internal error in the front end",
                recommended_action: "Report this as a bug with the offending input",
            },
            ErrorMetadata {
                code: "ERR002",
                category: "System",
                severity: Severity::Critical,
                recoverable: false,
                requires_halt: true,
                description: "Global subsystem initialization failed",
                recommended_action: "Check configuration and retry",
            },
            ErrorMetadata {
                code: "E005",
                category: "Input",
                severity: Severity::High,
                recoverable: true,
                requires_halt: false,
                description: "Input file does not exist",
                recommended_action: "Verify the file path",
            },
            ErrorMetadata {
                code: "E007",
                category: "Input",
                severity: Severity::High,
                recoverable: true,
                requires_halt: false,
                description: "Input exceeds the maximum accepted size",
                recommended_action: "Split the input or raise the compile-time bound",
            },
            ErrorMetadata {
                code: "E008",
                category: "Input",
                severity: Severity::Medium,
                recoverable: true,
                requires_halt: false,
                description: "Input contains no expression",
                recommended_action: "Provide a non-empty expression",
            },
            ErrorMetadata {
                code: "E010",
                category: "Input",
                severity: Severity::High,
                recoverable: true,
                requires_halt: false,
                description: "Input is not valid UTF-8",
                recommended_action: "Re-encode the input as UTF-8",
            },
            ErrorMetadata {
                code: "E011",
                category: "Input",
                severity: Severity::High,
                recoverable: true,
                requires_halt: false,
                description: "I/O failure while reading input",
                recommended_action: "Check file permissions and retry",
            },
            ErrorMetadata {
                code: "E020",
                category: "Lexical",
                severity: Severity::Medium,
                recoverable: true,
                requires_halt: false,
                description: "Character matches no terminal class",
                recommended_action: "Remove or replace the offending character",
            },
            ErrorMetadata {
                code: "E023",
                category: "Lexical",
                severity: Severity::Medium,
                recoverable: true,
                requires_halt: false,
                description: "Token lexeme exceeds the maximum length",
                recommended_action: "Shorten the offending token",
            },
            ErrorMetadata {
                code: "E027",
                category: "Lexical",
                severity: Severity::High,
                recoverable: false,
                requires_halt: false,
                description: "Token count limit exceeded during eager scan",
                recommended_action: "Split the input into smaller expressions",
            },
            ErrorMetadata {
                code: "E041",
                category: "Syntax",
                severity: Severity::Medium,
                recoverable: true,
                requires_halt: false,
                description: "Nothing to parse after whitespace removal",
                recommended_action: "Provide a non-empty expression",
            },
            ErrorMetadata {
                code: "E043",
                category: "Syntax",
                severity: Severity::Medium,
                recoverable: true,
                requires_halt: false,
                description: "No grammar rule matched the input",
                recommended_action: "Fix the expression near the reported position",
            },
            ErrorMetadata {
                code: "E045",
                category: "Syntax",
                severity: Severity::Medium,
                recoverable: true,
                requires_halt: false,
                description: "Well-formed expression followed by unconsumed input",
                recommended_action: "Remove the trailing tokens",
            },
            ErrorMetadata {
                code: "E050",
                category: "Syntax",
                severity: Severity::Medium,
                recoverable: true,
                requires_halt: false,
                description: "Token did not match the expected terminal",
                recommended_action: "Fix the expression near the reported position",
            },
            ErrorMetadata {
                code: "I001",
                category: "Success",
                severity: Severity::Low,
                recoverable: true,
                requires_halt: false,
                description: "Global logging initialized",
                recommended_action: "No action required",
            },
            ErrorMetadata {
                code: "I006",
                category: "Success",
                severity: Severity::Low,
                recoverable: true,
                requires_halt: false,
                description: "Input loaded and validated",
                recommended_action: "No action required",
            },
            ErrorMetadata {
                code: "I010",
                category: "Success",
                severity: Severity::Low,
                recoverable: true,
                requires_halt: false,
                description: "Tokenization completed",
                recommended_action: "No action required",
            },
            ErrorMetadata {
                code: "I011",
                category: "Success",
                severity: Severity::Low,
                recoverable: true,
                requires_halt: false,
                description: "Parse completed successfully",
                recommended_action: "No action required",
            },
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get the metadata entry for a code, if registered
pub fn get_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    metadata_registry().get(code)
}

/// Get the human-readable description for a code
pub fn get_description(code: &str) -> &'static str {
    get_metadata(code)
        .map(|m| m.description)
        .unwrap_or("Unknown error")
}

/// Get the category for a code
pub fn get_category(code: &str) -> &'static str {
    get_metadata(code).map(|m| m.category).unwrap_or("Unknown")
}

/// Get the severity for a code (unknown codes default to Medium)
pub fn get_severity(code: &str) -> Severity {
    get_metadata(code)
        .map(|m| m.severity)
        .unwrap_or(Severity::Medium)
}

/// Get the recommended action for a code
pub fn get_action(code: &str) -> &'static str {
    get_metadata(code)
        .map(|m| m.recommended_action)
        .unwrap_or("No specific action available")
}

/// Check if an error with this code is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_metadata(code).map(|m| m.recoverable).unwrap_or(true)
}

/// Check if an error with this code requires halting
pub fn requires_halt(code: &str) -> bool {
    get_metadata(code).map(|m| m.requires_halt).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_display() {
        assert_eq!(lexical::INVALID_CHARACTER.as_str(), "E020");
        assert_eq!(format!("{}", syntax::TRAILING_INPUT), "E045");
    }

    #[test]
    fn test_registry_covers_all_constants() {
        let all = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            input::FILE_NOT_FOUND,
            input::INPUT_TOO_LARGE,
            input::EMPTY_INPUT,
            input::INVALID_ENCODING,
            input::IO_ERROR,
            lexical::INVALID_CHARACTER,
            lexical::LEXEME_TOO_LONG,
            lexical::TOO_MANY_TOKENS,
            syntax::EMPTY_EXPRESSION,
            syntax::NO_RULE_MATCHED,
            syntax::TRAILING_INPUT,
            syntax::UNEXPECTED_TOKEN,
            success::SYSTEM_INITIALIZATION_COMPLETED,
            success::INPUT_LOADED,
            success::TOKENIZATION_COMPLETE,
            success::PARSE_COMPLETE,
        ];

        for code in all {
            assert_ne!(
                get_description(code.as_str()),
                "Unknown error",
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_classification() {
        assert!(requires_halt(system::INTERNAL_ERROR.as_str()));
        assert!(!requires_halt(syntax::TRAILING_INPUT.as_str()));
        assert!(is_recoverable(lexical::INVALID_CHARACTER.as_str()));
        assert_eq!(get_category(syntax::NO_RULE_MATCHED.as_str()), "Syntax");
        assert_eq!(
            get_severity(system::INTERNAL_ERROR.as_str()),
            Severity::Critical
        );
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("E999"), "Unknown error");
        assert_eq!(get_category("E999"), "Unknown");
        assert!(!requires_halt("E999"));
    }
}
