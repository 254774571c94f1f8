//! Tracing subscriber setup.
//!
//! The library crates only emit `tracing` events and spans; installing a
//! subscriber is left to whatever drives generation. [`init_tracing`]
//! installs a `tracing-subscriber` registry configured from a
//! [`TracingConfig`].
//!
//! Unless an explicit filter is given, only Spindle's own crates log at the
//! configured level and everything else is held at `warn`. Output goes to
//! stderr, leaving stdout to generated source.
//!
//! # Example
//!
//! ```
//! use spindle_core::{TracingConfig, TracingFormat, init_tracing};
//! use tracing::Level;
//!
//! let installed = init_tracing(
//!     &TracingConfig::default()
//!         .with_level(Level::DEBUG)
//!         .with_format(TracingFormat::Compact),
//! );
//! // A second call finds the subscriber in place.
//! assert!(!init_tracing(&TracingConfig::default()));
//! # let _ = installed;
//! ```

use tracing::Level;
use tracing_subscriber::fmt::TestWriter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Crates that emit Spindle's events, in pipeline order.
pub const TARGETS: [&str; 4] = [
    "spindle_catalog",
    "spindle_solver",
    "spindle_codegen",
    "spindle_core",
];

// ─────────────────────────────────────────────────────────────────────────────
// TracingFormat
// ─────────────────────────────────────────────────────────────────────────────

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingFormat {
    /// Multi-line output with span context (default).
    #[default]
    Pretty,
    /// One line per event.
    Compact,
    /// JSON lines, for build pipelines that collect logs.
    Json,
}

// ─────────────────────────────────────────────────────────────────────────────
// TracingConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Subscriber configuration.
///
/// ```
/// use spindle_core::{TracingConfig, TracingFormat};
/// use tracing::Level;
///
/// // Debugging a failing plan: every scheduled call, with span enter/exit
/// let verbose = TracingConfig::default()
///     .with_level(Level::TRACE)
///     .with_span_events(true);
/// assert!(verbose.directives().contains("spindle_solver=trace"));
///
/// // Build pipelines: JSON lines, merge summaries only
/// let ci = TracingConfig::default()
///     .with_format(TracingFormat::Json)
///     .with_env_filter("spindle_catalog=debug");
/// assert_eq!(ci.directives(), "spindle_catalog=debug");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    level: Level,
    format: TracingFormat,
    /// Replaces the default directives when set.
    env_filter: Option<String>,
    span_events: bool,
    test_writer: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: TracingFormat::Pretty,
            env_filter: None,
            span_events: false,
            test_writer: false,
        }
    }
}

impl TracingConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the level of Spindle's own crates.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    /// Replaces the default directives with `target=level,...`.
    ///
    /// A filter that does not parse falls back to the default directives.
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Enables span enter/exit events in output.
    #[must_use]
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    /// Routes output through the test harness's captured stdout instead of
    /// stderr.
    #[must_use]
    pub fn with_test_writer(mut self, enabled: bool) -> Self {
        self.test_writer = enabled;
        self
    }

    /// Returns the level of Spindle's own crates.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Returns the output format.
    #[must_use]
    pub fn format(&self) -> TracingFormat {
        self.format
    }

    /// Returns the explicit filter, if set.
    #[must_use]
    pub fn env_filter(&self) -> Option<&str> {
        self.env_filter.as_deref()
    }

    /// Returns whether span events are printed.
    #[must_use]
    pub fn span_events(&self) -> bool {
        self.span_events
    }

    /// Returns the directives [`filter`](Self::filter) parses.
    ///
    /// Without an explicit filter this is `warn` (or the level, if quieter)
    /// for every target, with each of [`TARGETS`] at the level.
    #[must_use]
    pub fn directives(&self) -> String {
        if let Some(filter) = &self.env_filter {
            return filter.clone();
        }
        self.default_directives()
    }

    fn default_directives(&self) -> String {
        let level = self.level.as_str().to_ascii_lowercase();
        let base = self.level.min(Level::WARN).as_str().to_ascii_lowercase();
        let mut out = base;
        for target in TARGETS {
            out.push_str(&format!(",{target}={level}"));
        }
        out
    }

    /// Builds the [`EnvFilter`] this configuration installs.
    #[must_use]
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_new(self.directives())
            .unwrap_or_else(|_| EnvFilter::new(self.default_directives()))
    }

    fn layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let writer = if self.test_writer {
            BoxMakeWriter::new(TestWriter::new())
        } else {
            BoxMakeWriter::new(std::io::stderr)
        };
        let span_events = if self.span_events {
            FmtSpan::ENTER | FmtSpan::EXIT
        } else {
            FmtSpan::NONE
        };
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_span_events(span_events);

        match self.format {
            TracingFormat::Pretty => layer.pretty().boxed(),
            TracingFormat::Compact => layer.compact().boxed(),
            TracingFormat::Json => layer.json().boxed(),
        }
    }
}

/// Installs a global subscriber configured by `config`.
///
/// Returns `false` and changes nothing if a global subscriber is already
/// installed.
pub fn init_tracing(config: &TracingConfig) -> bool {
    let installed = tracing_subscriber::registry()
        .with(config.layer())
        .with(config.filter())
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(
            directives = %config.directives(),
            format = ?config.format,
            "tracing initialized"
        );
    }
    installed
}
