pub mod compile_time {
    pub mod input {
        /// Maximum input size accepted for parsing (1MB)
        /// SECURITY: Prevents DoS via oversized expression files
        pub const MAX_INPUT_SIZE: u64 = 1024 * 1024;

        /// Threshold for considering an input "large" (64KB)
        /// PERFORMANCE: Large inputs get a warning in the processing log
        pub const LARGE_INPUT_THRESHOLD: u64 = 64 * 1024;
    }

    pub mod lexical {
        /// Maximum number of tokens produced by a full eager scan
        /// SECURITY: Prevents DoS via token explosion in diagnostics dumps
        pub const MAX_TOKEN_COUNT: usize = 1_000_000;

        /// Maximum lexeme length for a single token
        /// SECURITY: Bounds per-token allocation during scanning
        pub const MAX_LEXEME_LENGTH: usize = 4_096;
    }

    pub mod logging {
        /// Maximum events retained by the in-memory log buffer
        /// RESOURCE: Prevents unbounded event accumulation in tests
        pub const LOG_BUFFER_SIZE: usize = 10_000;

        /// Maximum log message length
        /// RESOURCE: Prevents memory attacks via huge messages
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 10_000;
    }
}
