// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Runtime configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanPreferences {
    /// Whether to collect detailed token metrics during eager scans
    pub collect_detailed_metrics: bool,

    /// Whether to count discarded whitespace runs in scan metrics
    pub count_whitespace_runs: bool,

    /// Whether to include error tokens in token dumps
    pub include_error_tokens: bool,
}

impl Default for ScanPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env_flag("ARITH_SCAN_DETAILED_METRICS", true),
            count_whitespace_runs: env_flag("ARITH_SCAN_COUNT_WHITESPACE", false),
            include_error_tokens: env_flag("ARITH_SCAN_INCLUDE_ERRORS", true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsePreferences {
    /// Whether to log memoization statistics after each parse
    pub log_memo_statistics: bool,

    /// Whether to show line/column information in parse failures
    pub include_position_in_errors: bool,
}

impl Default for ParsePreferences {
    fn default() -> Self {
        Self {
            log_memo_statistics: env_flag("ARITH_PARSE_LOG_MEMO_STATS", false),
            include_position_in_errors: env_flag("ARITH_PARSE_INCLUDE_POSITIONS", true),
        }
    }
}

/// Log level as configured by the user (string-friendly for TOML/env)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" | "warn" => Some(Self::Warning),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }

    /// Convert to the event-level type used by the logging service
    pub fn to_events_log_level(self) -> crate::logging::LogLevel {
        match self {
            Self::Error => crate::logging::LogLevel::Error,
            Self::Warning => crate::logging::LogLevel::Warning,
            Self::Info => crate::logging::LogLevel::Info,
            Self::Debug => crate::logging::LogLevel::Debug,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Minimum level emitted by the global logger
    pub min_log_level: LogLevel,

    /// Whether to emit JSON lines instead of human-readable log lines
    pub use_structured_logging: bool,

    /// Whether console logging is enabled at all
    pub enable_console_logging: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            min_log_level: env::var("ARITH_LOG_LEVEL")
                .ok()
                .and_then(|v| LogLevel::from_str(&v))
                .unwrap_or(LogLevel::Warning),
            use_structured_logging: env_flag("ARITH_LOG_STRUCTURED", false),
            enable_console_logging: env_flag("ARITH_LOG_CONSOLE", true),
        }
    }
}

/// Aggregated runtime configuration for all stages
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub scan: ScanPreferences,
    pub parse: ParsePreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Build configuration from environment variables only
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file, falling back to env defaults
    /// for any key the file omits
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_display = path.as_ref().display().to_string();

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path_display.clone(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path_display,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_defaults_are_sane() {
        let config = RuntimeConfig::from_env();
        assert!(config.parse.include_position_in_errors);
        assert!(config.logging.enable_console_logging);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("debug"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_str("WARN"), Some(LogLevel::Warning));
        assert_eq!(LogLevel::from_str("nope"), None);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_text = r#"
            [scan]
            collect_detailed_metrics = false

            [logging]
            min_log_level = "debug"
            use_structured_logging = true
        "#;

        let config: RuntimeConfig = toml::from_str(toml_text).unwrap();
        assert!(!config.scan.collect_detailed_metrics);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
        assert!(config.logging.use_structured_logging);
        // Omitted section falls back to defaults
        assert!(config.parse.include_position_in_errors);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = RuntimeConfig::load("/nonexistent/arith_front.toml");
        assert_matches!(result, Err(ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[parse]\nlog_memo_statistics = true").unwrap();

        let config = RuntimeConfig::load(file.path()).unwrap();
        assert!(config.parse.log_memo_statistics);
    }
}
