use crate::logger::format::{LoggerFormat, LoggerOutput};

/// Logger settings.
///
/// `level` is an `EnvFilter` directive such as `"info"` or
/// `"taskline=debug,warn"`. Color is only used when `output` is a terminal.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    pub output: LoggerOutput,
    pub level: String,
    pub with_targets: bool,
    pub use_color: bool,
}

impl LoggerConfig {
    /// Sends records to `output`, re-deriving the color default for it.
    pub fn with_output(mut self, output: LoggerOutput) -> Self {
        self.output = output;
        self.use_color = output.is_terminal();
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let output = LoggerOutput::default();
        Self {
            format: LoggerFormat::Text,
            output,
            level: "info".to_string(),
            with_targets: true,
            use_color: output.is_terminal(),
        }
    }
}
