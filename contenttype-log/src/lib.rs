//! Diagnostics for the contenttype crates.
//!
//! The core only reports at `trace` (every parsed range, every rejected
//! value) and `debug` (negotiation outcomes). The default level is `warn`,
//! so nothing is written unless the environment asks for it.
//!
//! # Usage
//!
//! ```rust
//! use contenttype_log::{debug, trace};
//!
//! debug!("negotiating against {} types", 3);
//! trace!(target: "contenttype::negotiation", "range {} weight {}", "text/*", "0.5");
//! ```
//!
//! # Environment Variables
//!
//! - `CONTENTTYPE_DEBUG=1` - Lower the level to `debug`
//! - `CONTENTTYPE_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level
//! - `CONTENTTYPE_LOG_FORMAT=pretty|compact|json` - Set output format
//! - `CONTENTTYPE_LOG_COLOR=1|0` - Colorize the level in the pretty format
//! - `CONTENTTYPE_LOG_TIMESTAMPS=1|0` - Prefix records with a timestamp
//!
//! With the `tracing` feature, records are handed to `tracing` instead of
//! being written to stderr (see [`tracing_compat`]).

use once_cell::sync::Lazy;
use std::env;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};

// ============================================================================
// Levels and Formats
// ============================================================================

/// Severity of a record. `Off` only appears as a configured minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl Level {
    const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Off,
    ];

    /// Parse a level name, case-insensitively. `warning` and `none` are
    /// accepted as aliases.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("warning") {
            return Some(Level::Warn);
        }
        if s.eq_ignore_ascii_case("none") {
            return Some(Level::Off);
        }
        Self::ALL.into_iter().find(|level| level.name().eq_ignore_ascii_case(s))
    }

    /// Lowercase name, as accepted by [`Level::parse`] and `EnvFilter`.
    pub fn name(self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Off => "off",
        }
    }

    fn from_u8(value: u8) -> Self {
        Self::ALL.get(usize::from(value)).copied().unwrap_or(Level::Off)
    }

    #[cfg(feature = "color")]
    fn paint(self, label: &str) -> colored::ColoredString {
        use colored::Colorize;
        match self {
            Level::Trace => label.magenta(),
            Level::Debug => label.blue(),
            Level::Info => label.green(),
            Level::Warn => label.yellow(),
            Level::Error | Level::Off => label.red(),
        }
    }
}

/// Upper-case name, as written in records.
impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.name().to_ascii_uppercase())
    }
}

/// Output format for records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `2024-01-01 12:00:00.000 DEBUG [target] message`
    Pretty,
    /// `12:00:00 D target: message`
    Compact,
    /// One JSON object per line
    Json,
}

impl Format {
    /// Parse a format name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        [
            (Format::Pretty, "pretty"),
            (Format::Compact, "compact"),
            (Format::Json, "json"),
        ]
        .into_iter()
        .find_map(|(format, name)| name.eq_ignore_ascii_case(s).then_some(format))
    }
}

// ============================================================================
// Configuration
// ============================================================================

static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Warn as u8);

static CONFIG: Lazy<LogConfig> = Lazy::new(|| {
    let config = LogConfig::from_env();
    LOG_LEVEL.store(config.level as u8, Ordering::SeqCst);
    config
});

/// Logging configuration, read once from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `CONTENTTYPE_DEBUG` was set; `level` is at most `Debug`
    pub debug: bool,
    /// Minimum level written
    pub level: Level,
    pub format: Format,
    /// Colorize the level in the pretty format (`color` feature)
    pub color: bool,
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Warn,
            format: Format::Compact,
            color: false,
            timestamps: true,
        }
    }
}

impl LogConfig {
    /// Build a configuration from `CONTENTTYPE_*` environment variables.
    ///
    /// Unset or unparseable variables fall back to the defaults. This does not
    /// touch the global state; the first log call (or [`init`]) installs it.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let flag = |key: &str| {
            lookup(key).map(|v| matches!(v.trim(), "1") || v.trim().eq_ignore_ascii_case("true"))
        };

        let debug = flag("CONTENTTYPE_DEBUG").unwrap_or(defaults.debug);
        let level = match lookup("CONTENTTYPE_LOG_LEVEL").and_then(|s| Level::parse(&s)) {
            Some(level) => level,
            None if debug => Level::Debug,
            None => defaults.level,
        };

        Self {
            debug,
            level,
            format: lookup("CONTENTTYPE_LOG_FORMAT")
                .and_then(|s| Format::parse(&s))
                .unwrap_or(defaults.format),
            color: flag("CONTENTTYPE_LOG_COLOR")
                .unwrap_or_else(|| lookup("NO_COLOR").is_none() && lookup("TERM").is_some()),
            timestamps: flag("CONTENTTYPE_LOG_TIMESTAMPS").unwrap_or(defaults.timestamps),
        }
    }

    /// Write `record` as one line in the configured format.
    pub fn write_record<W: Write>(&self, out: &mut W, record: &Record<'_>) -> io::Result<()> {
        match self.format {
            Format::Pretty => {
                if self.timestamps {
                    write!(out, "{} ", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))?;
                }
                let label = format!("{:5}", record.level);
                #[cfg(feature = "color")]
                let label = if self.color {
                    record.level.paint(&label).to_string()
                } else {
                    label
                };
                writeln!(out, "{} [{}] {}", label, record.target, record.message)
            }
            Format::Compact => {
                if self.timestamps {
                    write!(out, "{} ", chrono::Local::now().format("%H:%M:%S"))?;
                }
                let initial = record.level.name().chars().next().unwrap_or(' ');
                writeln!(
                    out,
                    "{} {}: {}",
                    initial.to_ascii_uppercase(),
                    record.target,
                    record.message
                )
            }
            Format::Json => {
                let mut object = serde_json::Map::new();
                if self.timestamps {
                    object.insert("timestamp".into(), chrono::Utc::now().to_rfc3339().into());
                }
                object.insert("level".into(), record.level.to_string().into());
                object.insert("target".into(), record.target.into());
                object.insert("message".into(), record.message.into());

                serde_json::to_writer(&mut *out, &object)?;
                writeln!(out)
            }
        }
    }
}

// ============================================================================
// Global State
// ============================================================================

/// Eagerly read the environment configuration.
///
/// Logging initializes itself on first use, so calling this is optional.
pub fn init() {
    Lazy::force(&CONFIG);
}

/// The configuration read from the environment.
pub fn config() -> &'static LogConfig {
    &CONFIG
}

/// Check if records at `level` are written.
#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    init();
    level != Level::Off && level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

pub fn current_level() -> Level {
    init();
    Level::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Change the minimum level at runtime.
pub fn set_level(level: Level) {
    init();
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

// ============================================================================
// Records
// ============================================================================

/// One log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub level: Level,
    pub target: &'a str,
    pub message: &'a str,
}

/// Dispatch a record. Used by the macros.
#[doc(hidden)]
pub fn log(level: Level, target: &str, message: &str) {
    if !is_level_enabled(level) {
        return;
    }

    let record = Record {
        level,
        target,
        message,
    };

    #[cfg(feature = "tracing")]
    tracing_compat::emit(&record);

    #[cfg(not(feature = "tracing"))]
    {
        // Write errors are dropped.
        let _ = config().write_record(&mut io::stderr().lock(), &record);
    }
}

/// Log a trace message.
#[macro_export]
macro_rules! trace {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Trace) {
            $crate::log($crate::Level::Trace, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        $crate::trace!(target: module_path!(), $($arg)+)
    };
}

/// Log a debug message.
///
/// Written when `CONTENTTYPE_DEBUG=1` or `CONTENTTYPE_LOG_LEVEL` is `debug`
/// or lower.
///
/// ```rust
/// use contenttype_log::debug;
///
/// let header = "text/html;q=0.9";
/// debug!(target: "contenttype::negotiation", "parsing {}", header);
/// ```
#[macro_export]
macro_rules! debug {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Debug) {
            $crate::log($crate::Level::Debug, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        $crate::debug!(target: module_path!(), $($arg)+)
    };
}

// ============================================================================
// Tracing Integration
// ============================================================================

#[cfg(feature = "tracing")]
pub mod tracing_compat {
    //! Records as `tracing` events.
    //!
    //! Events carry the target `contenttype`; the module that logged them is
    //! in the `source` field. [`subscriber`] builds a `fmt` subscriber
    //! filtered by the `CONTENTTYPE_*` level unless `RUST_LOG` is set.

    use super::{Level, Record, config};

    /// `EnvFilter` directive for `level`.
    pub fn filter_directive(level: Level) -> &'static str {
        level.name()
    }

    /// Create a subscriber; `RUST_LOG` takes precedence when set.
    pub fn subscriber() -> impl tracing::Subscriber + Send + Sync {
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::{EnvFilter, fmt};

        let config = config();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(filter_directive(config.level)));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(config.color))
    }

    pub(crate) fn emit(record: &Record<'_>) {
        let Record {
            level,
            target,
            message,
        } = *record;

        match level {
            Level::Trace => tracing::trace!(target: "contenttype", source = target, "{}", message),
            Level::Debug => tracing::debug!(target: "contenttype", source = target, "{}", message),
            Level::Info => tracing::info!(target: "contenttype", source = target, "{}", message),
            Level::Warn => tracing::warn!(target: "contenttype", source = target, "{}", message),
            Level::Error => tracing::error!(target: "contenttype", source = target, "{}", message),
            Level::Off => {}
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
