//! Configuration module for the expression front end
//!
//! Compile-time resource bounds live in [`constants`]; user-tunable runtime
//! preferences (env vars, optional TOML file) live in [`runtime`].

pub mod constants;
pub mod runtime;

pub use constants::compile_time;
pub use runtime::{
    ConfigError, LoggingPreferences, ParsePreferences, RuntimeConfig, ScanPreferences,
};
