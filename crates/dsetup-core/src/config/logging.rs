//! Logging configuration

use std::fmt;
use std::str::FromStr;

use super::env::EnvSnapshot;

/// Filter directive variable understood by `tracing_subscriber::EnvFilter`
pub const LOG_FILTER: &str = "RUST_LOG";
/// Output format variable
pub const LOG_FORMAT: &str = "DSETUP_LOG_FORMAT";

/// Output format of the log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line, human oriented
    Pretty,
    /// One line per event
    #[default]
    Compact,
    /// Newline delimited JSON
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Compact => write!(f, "compact"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive (e.g. `info`, `dsetup_core=debug`)
    pub filter: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    /// Read the logging knobs. Unknown formats fall back to the default.
    pub fn from_env(env: &EnvSnapshot) -> Self {
        let mut config = Self::default();

        if let Some(filter) = env.get(LOG_FILTER).filter(|f| !f.trim().is_empty()) {
            config.filter = filter.to_string();
        }

        if let Some(format) = env.get(LOG_FORMAT) {
            config.format = format.parse().unwrap_or_default();
        }

        config
    }
}
