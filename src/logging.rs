/*!
 * Logging setup for the Databend adapter
 *
 * Initializes a `tracing-subscriber` writing to stderr or to a file.
 *
 * Level priority:
 * 1. explicit level (`--log-level`)
 * 2. `RUST_LOG`
 * 3. `warn`
 */

use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

const DEFAULT_DIRECTIVE: &str = "warn";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// "off", "error", "warn", "info", "debug" or "trace"
    pub level: Option<String>,
    /// Append to this file instead of stderr
    pub file: Option<String>,
}

impl LogConfig {
    fn is_off(&self) -> bool {
        self.level
            .as_deref()
            .is_some_and(|level| level.eq_ignore_ascii_case("off"))
    }

    /// Directive for an explicit level, covering the library and the CLI
    fn directive(&self) -> Option<String> {
        self.level.as_deref().map(|level| {
            let level = level.to_lowercase();
            format!("databend_adapter={},databend_cli={}", level, level)
        })
    }

    fn filter(&self) -> EnvFilter {
        match self.directive() {
            Some(directive) => EnvFilter::new(directive),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
        }
    }
}

/// Install the global subscriber; later calls are no-ops
pub fn init_logging(config: &LogConfig) {
    LOGGING_INITIALIZED.get_or_init(|| {
        if config.is_off() {
            return;
        }

        match &config.file {
            Some(path) => {
                let file = match std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                {
                    Ok(f) => f,
                    Err(e) => {
                        eprintln!("databend-cli: failed to open log file {}: {}", path, e);
                        return;
                    }
                };
                tracing_subscriber::registry()
                    .with(config.filter())
                    .with(
                        fmt::layer()
                            .with_writer(file)
                            .with_target(false)
                            .with_ansi(false),
                    )
                    .try_init()
                    .ok();
            }
            None => {
                tracing_subscriber::registry()
                    .with(config.filter())
                    .with(
                        fmt::layer()
                            .with_writer(std::io::stderr)
                            .with_target(false),
                    )
                    .try_init()
                    .ok();
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_level() {
        let config = LogConfig {
            level: Some("OFF".to_string()),
            file: None,
        };
        assert!(config.is_off());
        assert!(!LogConfig::default().is_off());
    }

    #[test]
    fn test_explicit_level_directive() {
        let config = LogConfig {
            level: Some("DEBUG".to_string()),
            file: None,
        };
        assert_eq!(
            config.directive().as_deref(),
            Some("databend_adapter=debug,databend_cli=debug")
        );
        assert!(LogConfig::default().directive().is_none());
    }
}
