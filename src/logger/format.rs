use std::str::FromStr;

use crate::logger::error::LoggerError;

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per record.
    Json,
}

impl FromStr for LoggerFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        match norm.as_str() {
            "text" => Ok(LoggerFormat::Text),
            "json" => Ok(LoggerFormat::Json),
            _ => Err(LoggerError::InvalidFormat(s.to_string())),
        }
    }
}

/// Stream the log records go to.
///
/// Task output is printed on stdout while no surface is attached, so logs
/// default to stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoggerOutput {
    Stdout,
    #[default]
    Stderr,
}

impl LoggerOutput {
    /// True when the chosen stream is attached to a terminal.
    pub fn is_terminal(self) -> bool {
        use std::io::IsTerminal;
        match self {
            LoggerOutput::Stdout => std::io::stdout().is_terminal(),
            LoggerOutput::Stderr => std::io::stderr().is_terminal(),
        }
    }
}

impl FromStr for LoggerOutput {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdout" => Ok(LoggerOutput::Stdout),
            "stderr" => Ok(LoggerOutput::Stderr),
            _ => Err(LoggerError::InvalidOutput(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(" JSON ".parse::<LoggerFormat>().unwrap(), LoggerFormat::Json);
        assert_eq!("text".parse::<LoggerFormat>().unwrap(), LoggerFormat::Text);
        assert!(matches!(
            "xml".parse::<LoggerFormat>(),
            Err(LoggerError::InvalidFormat(f)) if f == "xml"
        ));
    }

    #[test]
    fn output_names() {
        assert_eq!("StdOut".parse::<LoggerOutput>().unwrap(), LoggerOutput::Stdout);
        assert_eq!(LoggerOutput::default(), LoggerOutput::Stderr);
        assert!(matches!(
            "syslog".parse::<LoggerOutput>(),
            Err(LoggerError::InvalidOutput(o)) if o == "syslog"
        ));
    }
}
