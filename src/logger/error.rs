use thiserror::Error;

/// Errors from [`logger_init`](crate::logger_init) and format parsing.
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Invalid logger format: {0} (expected: text|json)")]
    InvalidFormat(String),
    #[error("Invalid logger output: {0} (expected: stdout|stderr)")]
    InvalidOutput(String),
    #[error("Logger has been already initialized")]
    AlreadyInitialized,
    #[error("Failed to initialize logger: {0}")]
    InitializationFailed(String),
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}
