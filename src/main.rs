use arith_front::config::constants::compile_time::input::{LARGE_INPUT_THRESHOLD, MAX_INPUT_SIZE};
use arith_front::config::runtime::{ParsePreferences, RuntimeConfig, ScanPreferences};
use arith_front::lexical;
use arith_front::logging::{self, codes};
use arith_front::syntax;
use arith_front::utils::{SourceMap, Span};
use arith_front::{log_error, log_success, log_warning};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        eprintln!("Usage: arith_front <input>... [options]");
        eprintln!("       arith_front --help");
        std::process::exit(1);
    }

    if args[0] == "--help" {
        print_help();
        return Ok(());
    }

    let options = parse_options(&args);

    let runtime_config = match &options.config_path {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::from_env(),
    };
    logging::config::init_runtime_preferences(runtime_config.logging.clone())?;
    logging::init_global_logging()?;

    if options.paths.is_empty() && options.exprs.is_empty() {
        eprintln!("Error: no input given (file path or --expr)");
        std::process::exit(1);
    }

    let mut failures = 0;

    for expr in &options.exprs {
        if !process_source("<expr>", expr, &options) {
            failures += 1;
        }
    }

    for path in &options.paths {
        match load_input(path) {
            Ok(source) => {
                log_success!(codes::success::INPUT_LOADED, "Input loaded",
                    "path" => path,
                    "bytes" => source.len()
                );
                if !process_source(path, &source, &options) {
                    failures += 1;
                }
            }
            Err(error) => {
                log_error!(error.error_code(), "Failed to load input", "path" => path);
                eprintln!("{}: {}", path, error);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn print_help() {
    println!("arith_front v{}", env!("CARGO_PKG_VERSION"));
    println!("Packrat expression front end with direct left-recursion support");
    println!();
    println!("USAGE:");
    println!("    arith_front <input>... [options]    # Parse expression files");
    println!("    arith_front --expr \"1+2*3\"          # Parse a literal expression");
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --expr <text>       Parse the given text instead of a file");
    println!("    --tokens            Dump the token stream before parsing");
    println!("    --bracketed         Print the canonical one-line tree rendering");
    println!("    --json              Print the tree as JSON");
    println!("    --config <file>     Load runtime preferences from a TOML file");
    println!("    --quiet             Suppress per-input status lines");
    println!();
    println!("OUTPUT:");
    println!("    Success: the parse tree (indented by default)");
    println!("    Failure: a caret diagnostic at the furthest position reached;");
    println!("             the process exits with status 1");
}

/// How to print a successful parse tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Indented,
    Bracketed,
    Json,
}

#[derive(Debug, Clone)]
struct CliOptions {
    paths: Vec<String>,
    exprs: Vec<String>,
    show_tokens: bool,
    mode: OutputMode,
    quiet: bool,
    config_path: Option<String>,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            exprs: Vec::new(),
            show_tokens: false,
            mode: OutputMode::Indented,
            quiet: false,
            config_path: None,
        }
    }
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--tokens" => {
                options.show_tokens = true;
            }
            "--bracketed" => {
                options.mode = OutputMode::Bracketed;
            }
            "--json" => {
                options.mode = OutputMode::Json;
            }
            "--quiet" => {
                options.quiet = true;
            }
            "--expr" => {
                if i + 1 < args.len() {
                    options.exprs.push(args[i + 1].clone());
                    i += 1;
                } else {
                    eprintln!("Warning: --expr requires an expression");
                }
            }
            "--config" => {
                if i + 1 < args.len() {
                    options.config_path = Some(args[i + 1].clone());
                    i += 1;
                } else {
                    eprintln!("Warning: --config requires a file path");
                }
            }
            other if other.starts_with("--") => {
                eprintln!("Warning: Unknown option '{}'", other);
            }
            path => {
                options.paths.push(path.to_string());
            }
        }
        i += 1;
    }

    options
}

/// Input loading errors
#[derive(Debug, thiserror::Error)]
enum InputError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Input too large: {size} bytes (max {MAX_INPUT_SIZE})")]
    TooLarge { size: u64 },

    #[error("Input is not valid UTF-8")]
    InvalidEncoding,

    #[error("I/O error: {0}")]
    Io(std::io::Error),
}

impl InputError {
    fn error_code(&self) -> logging::Code {
        match self {
            InputError::NotFound { .. } => codes::input::FILE_NOT_FOUND,
            InputError::TooLarge { .. } => codes::input::INPUT_TOO_LARGE,
            InputError::InvalidEncoding => codes::input::INVALID_ENCODING,
            InputError::Io(_) => codes::input::IO_ERROR,
        }
    }
}

fn load_input(path: &str) -> Result<String, InputError> {
    let metadata = std::fs::metadata(path).map_err(|error| match error.kind() {
        std::io::ErrorKind::NotFound => InputError::NotFound {
            path: path.to_string(),
        },
        _ => InputError::Io(error),
    })?;

    if metadata.len() > MAX_INPUT_SIZE {
        return Err(InputError::TooLarge {
            size: metadata.len(),
        });
    }
    if metadata.len() > LARGE_INPUT_THRESHOLD {
        log_warning!("Large input file", "path" => path, "bytes" => metadata.len());
    }

    std::fs::read_to_string(path).map_err(|error| match error.kind() {
        std::io::ErrorKind::InvalidData => InputError::InvalidEncoding,
        std::io::ErrorKind::NotFound => InputError::NotFound {
            path: path.to_string(),
        },
        _ => InputError::Io(error),
    })
}

/// Parse one input and print the requested output; returns success
fn process_source(name: &str, source: &str, options: &CliOptions) -> bool {
    if options.show_tokens && !dump_tokens(name, source) {
        return false;
    }

    match syntax::parse_to_tree(source) {
        Ok(tree) => {
            if !options.quiet {
                println!("{}: parse OK", name);
            }
            match options.mode {
                OutputMode::Indented => println!("{}", tree.tree_string()),
                OutputMode::Bracketed => println!("{}", tree.bracketed()),
                OutputMode::Json => match serde_json::to_string_pretty(&tree) {
                    Ok(json) => println!("{}", json),
                    Err(error) => {
                        eprintln!("{}: failed to serialize tree: {}", name, error);
                        return false;
                    }
                },
            }
            true
        }
        Err(error) => {
            let preferences = ParsePreferences::default();
            match error.position() {
                Some(position) if preferences.include_position_in_errors => {
                    let source_map = SourceMap::new(source.to_string());
                    let span = if position.offset < source.len() {
                        Span::single(position)
                    } else {
                        Span::new(position, position)
                    };
                    eprint!("{}", source_map.format_error(&span, &error.to_string()));
                }
                _ => {
                    eprintln!("{}: {}", name, error);
                }
            }
            false
        }
    }
}

/// Print the eager token dump; returns false if a scan limit was hit
fn dump_tokens(name: &str, source: &str) -> bool {
    match lexical::tokenize_source(source, &ScanPreferences::default()) {
        Ok((tokens, metrics)) => {
            println!("{}: {} tokens", name, metrics.total_tokens);
            for token in &tokens {
                println!("  {}  {}", token.span, token.value);
            }
            if metrics.error_tokens > 0 {
                println!("  ({} error tokens)", metrics.error_tokens);
            }
            true
        }
        Err(error) => {
            log_error!(error.error_code(), "Token dump failed", "input" => name);
            eprintln!("{}: {}", name, error);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_options_modes_and_inputs() {
        let options = parse_options(&args(&[
            "expr.txt",
            "--bracketed",
            "--tokens",
            "--expr",
            "1+2",
        ]));

        assert_eq!(options.paths, vec!["expr.txt"]);
        assert_eq!(options.exprs, vec!["1+2"]);
        assert_eq!(options.mode, OutputMode::Bracketed);
        assert!(options.show_tokens);
        assert!(!options.quiet);
    }

    #[test]
    fn test_parse_options_ignores_unknown() {
        let options = parse_options(&args(&["--wat", "input.txt"]));
        assert_eq!(options.paths, vec!["input.txt"]);
    }

    #[test]
    fn test_parse_options_dangling_value_flags() {
        let options = parse_options(&args(&["--expr"]));
        assert!(options.exprs.is_empty());

        let options = parse_options(&args(&["--config"]));
        assert!(options.config_path.is_none());
    }

    #[test]
    fn test_load_input_missing_file() {
        let result = load_input("/nonexistent/expression.txt");
        assert_matches!(result, Err(InputError::NotFound { .. }));
    }

    #[test]
    fn test_load_input_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(1+2)*3").unwrap();

        let source = load_input(file.path().to_str().unwrap()).unwrap();
        assert_eq!(source, "(1+2)*3");
    }

    #[test]
    fn test_process_source_success_and_failure() {
        let options = CliOptions {
            quiet: true,
            mode: OutputMode::Bracketed,
            ..CliOptions::default()
        };

        assert!(process_source("<test>", "1+2*3", &options));
        assert!(!process_source("<test>", "1+2)", &options));
        assert!(!process_source("<test>", "", &options));
    }

    #[test]
    fn test_dump_tokens_smoke() {
        assert!(dump_tokens("<test>", "1 + $"));
    }
}
