//! Logging functionality for rdescribe
//!
//! Configures a `tracing` subscriber that writes to stderr, keeping stdout free
//! for the JSON record.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV_VAR: &str = "RDESCRIBE_LOG";

/// Log levels supported by rdescribe.
///
/// These map to the tracing level hierarchy: ERROR, WARN, INFO, DEBUG, TRACE.
/// `Off` silences the crate entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// The filter directive used when `RDESCRIBE_LOG` is not set.
    pub fn directive(self) -> String {
        format!("rdescribe={}", self.as_filter_str())
    }
}

/// Initialize logging for rdescribe with a specific log level.
///
/// Call once at program start. The `RDESCRIBE_LOG` environment variable takes
/// precedence over `level`:
///
/// ```bash
/// RDESCRIBE_LOG=rdescribe=debug rdescribe shoe.jpg
/// ```
pub fn init_logging(level: LogLevel) {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(level.directive()));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(env_filter)
        .init();

    tracing::debug!("rdescribe logging initialized at level: {:?}", level);
}

/// Initialize logging with a custom filter string, e.g.
/// `"rdescribe=debug,rdescribe::backend=trace"`.
pub fn init_logging_with_filter(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| {
        eprintln!("Invalid log filter '{}', using rdescribe=info", filter);
        EnvFilter::new("rdescribe=info")
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(env_filter)
        .init();

    tracing::debug!("rdescribe logging initialized with custom filter: {}", filter);
}
