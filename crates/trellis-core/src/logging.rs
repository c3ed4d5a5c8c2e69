#![forbid(unsafe_code)]

//! Logging and tracing support.
//!
//! With the `tracing` feature the usual `tracing` macros are re-exported here
//! and at the crate root. Without it, same-named no-op macros are exported so
//! call sites compile unchanged and cost nothing.
//!
//! The `tracing-subscriber` feature adds [`init_from_env`], which installs a
//! global formatter configured from [`LOG_ENV`] and [`LOG_FORMAT_ENV`].

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, trace};

/// Environment variable holding `RUST_LOG`-style filter directives.
pub const LOG_ENV: &str = "TRELLIS_LOG";

/// Environment variable selecting the output format (`text` or `json`).
pub const LOG_FORMAT_ENV: &str = "TRELLIS_LOG_FORMAT";

/// Directives used when [`LOG_ENV`] is unset or unparsable.
pub const DEFAULT_DIRECTIVES: &str = "warn";

/// Output format for [`init_from_env`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single-line records.
    #[default]
    Text,
    /// One JSON object per record.
    Json,
}

impl LogFormat {
    /// Interpret the value of [`LOG_FORMAT_ENV`]. Unknown values fall back to text.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Install a global `tracing` subscriber configured from the environment.
///
/// Filter directives come from [`LOG_ENV`] (default [`DEFAULT_DIRECTIVES`]);
/// the format comes from [`LOG_FORMAT_ENV`].
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
#[cfg(feature = "tracing-subscriber")]
pub fn init_from_env() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let format = LogFormat::from_env_value(std::env::var(LOG_FORMAT_ENV).ok().as_deref());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    }
}

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op debug_span macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
}

/// Stand-in for `tracing::Span` when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Enter the span (does nothing).
    pub fn enter(&self) -> NoopGuard {
        NoopGuard
    }
}

/// Guard returned by [`NoopSpan::enter`].
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct NoopGuard;

#[cfg(test)]
mod tests {
    use super::LogFormat;

    #[test]
    fn log_format_parses_json_case_insensitively() {
        assert_eq!(LogFormat::from_env_value(Some("json")), LogFormat::Json);
        assert_eq!(LogFormat::from_env_value(Some(" JSON ")), LogFormat::Json);
    }

    #[test]
    fn log_format_defaults_to_text() {
        assert_eq!(LogFormat::from_env_value(None), LogFormat::Text);
        assert_eq!(LogFormat::from_env_value(Some("pretty")), LogFormat::Text);
        assert_eq!(LogFormat::from_env_value(Some("")), LogFormat::Text);
    }

    #[cfg(not(feature = "tracing"))]
    #[test]
    fn noop_span_enters() {
        let span = crate::debug_span!("noop", field = 1);
        let _guard = span.enter();
        crate::debug!("ignored {}", 1);
        crate::trace!(value = 2, "ignored");
    }
}
