use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, time::OffsetTime, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::logger::{
    config::LoggerConfig,
    error::LoggerError,
    format::{LoggerFormat, LoggerOutput},
};

pub(crate) struct Logger;

impl Logger {
    pub(crate) fn init(cfg: &LoggerConfig) -> Result<(), LoggerError> {
        let filter = mk_filter(&cfg.level)?;
        let layer = fmt::layer()
            .with_writer(mk_writer(cfg.output))
            .with_target(cfg.with_targets)
            .with_timer(mk_timer());

        match cfg.format {
            LoggerFormat::Text => {
                let layer = layer.with_ansi(cfg.use_color && cfg.output.is_terminal());
                init_with(tracing_subscriber::registry().with(filter).with(layer))
            }
            LoggerFormat::Json => {
                let layer = layer.json().with_ansi(false);
                init_with(tracing_subscriber::registry().with(filter).with(layer))
            }
        }
    }
}

fn mk_filter(level: &str) -> Result<EnvFilter, LoggerError> {
    EnvFilter::try_new(level).map_err(|_| LoggerError::InvalidLogLevel(level.to_string()))
}

fn mk_writer(output: LoggerOutput) -> BoxMakeWriter {
    match output {
        LoggerOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        LoggerOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
    }
}

fn mk_timer() -> OffsetTime<Rfc3339> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}

fn as_error(e: impl std::fmt::Display) -> LoggerError {
    let s = e.to_string();
    if s.contains("SetGlobalDefaultError") || s.contains("global default trace dispatcher") {
        LoggerError::AlreadyInitialized
    } else {
        LoggerError::InitializationFailed(s)
    }
}

fn init_with<S>(subscriber: S) -> Result<(), LoggerError>
where
    S: Subscriber + Send + Sync + 'static,
{
    subscriber.try_init().map_err(as_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_level_is_reported() {
        assert!(matches!(
            mk_filter("taskline=loudest"),
            Err(LoggerError::InvalidLogLevel(_))
        ));
        assert!(mk_filter("taskline=debug,warn").is_ok());
    }

    #[test]
    fn bad_level_fails_before_install() {
        let cfg = LoggerConfig {
            level: "taskline=loudest".into(),
            ..LoggerConfig::default().with_output(LoggerOutput::Stdout)
        };
        assert_eq!(cfg.output, LoggerOutput::Stdout);
        assert!(matches!(Logger::init(&cfg), Err(LoggerError::InvalidLogLevel(_))));
    }
}
