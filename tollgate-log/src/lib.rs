//! Tollgate Logging
//!
//! A small logging facility shared by the Tollgate crates. Library code logs
//! through the macros below; components that accept a log destination from
//! their caller take a [`LogSink`] instead, which is nothing more than a
//! receiver of `(Level, message)` pairs.
//!
//! # Usage
//!
//! ```rust
//! use tollgate_log::{debug, info, warn};
//!
//! debug!("Declaring rules");
//! info!("Validated {} fields", 3);
//! warn!(target: "tollgate::retry", "Attempt {} failed", 2);
//! ```
//!
//! # Environment Variables
//!
//! - `TOLLGATE_DEBUG=1` - Enable debug logging
//! - `TOLLGATE_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level
//! - `TOLLGATE_LOG_FORMAT=pretty|json|compact` - Set output format
//! - `TOLLGATE_LOG_TIMESTAMPS=1|0` - Include timestamps
//! - `TOLLGATE_LOG_MODULE=1|0` - Include the log target

mod sink;

pub use sink::{GlobalSink, LogRecord, LogSink, MemorySink};

use once_cell::sync::Lazy;
use std::env;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

// ============================================================================
// Levels
// ============================================================================

/// Severity of a log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[repr(u8)]
pub enum Level {
    /// Most verbose
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    /// Disables logging entirely
    Off = 5,
}

impl Level {
    /// Parse a level name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" | "information" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "off" | "none" => Some(Level::Off),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Level::Trace,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Warn,
            4 => Level::Error,
            _ => Level::Off,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Output format
// ============================================================================

/// How [`log`] renders a line on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Human-readable with full timestamp and bracketed target
    Pretty,
    /// Single-letter level, short timestamp
    Compact,
    /// One JSON object per line
    Json,
}

impl Format {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some(Format::Pretty),
            "compact" => Some(Format::Compact),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

// ============================================================================
// Global configuration
// ============================================================================

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Info as u8);

static CONFIG: Lazy<LogConfig> = Lazy::new(LogConfig::from_env);

/// Logging configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub debug: bool,
    pub level: Level,
    pub format: Format,
    pub timestamps: bool,
    pub module_path: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Info,
            format: Format::Json,
            timestamps: true,
            module_path: true,
        }
    }
}

fn env_flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}

impl LogConfig {
    /// Build the config from `TOLLGATE_*` variables and publish the level
    /// and debug flag to the global atomics.
    pub fn from_env() -> Self {
        let debug = env_flag("TOLLGATE_DEBUG", false);

        let level = env::var("TOLLGATE_LOG_LEVEL")
            .ok()
            .and_then(|s| Level::parse(&s))
            .unwrap_or(if debug { Level::Debug } else { Level::Info });

        let format = env::var("TOLLGATE_LOG_FORMAT")
            .ok()
            .and_then(|s| Format::parse(&s))
            .unwrap_or(Format::Json);

        let config = Self {
            debug,
            level,
            format,
            timestamps: env_flag("TOLLGATE_LOG_TIMESTAMPS", true),
            module_path: env_flag("TOLLGATE_LOG_MODULE", true),
        };

        DEBUG_ENABLED.store(config.debug, Ordering::SeqCst);
        LOG_LEVEL.store(config.level as u8, Ordering::SeqCst);

        config
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Force the lazy configuration to load.
///
/// Happens implicitly on the first [`log`] call.
pub fn init() {
    Lazy::force(&CONFIG);
}

#[inline]
pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    level != Level::Off && level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

pub fn current_level() -> Level {
    Level::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

pub fn set_level(level: Level) {
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Toggle debug mode. Enabling it also lowers the level to `Debug`.
pub fn set_debug(enabled: bool) {
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    if enabled && current_level() > Level::Debug {
        set_level(Level::Debug);
    }
}

pub fn config() -> &'static LogConfig {
    &CONFIG
}

// ============================================================================
// Output
// ============================================================================

/// Write one message to stderr if `level` is enabled.
pub fn log(level: Level, target: &str, message: &str) {
    if !is_level_enabled(level) {
        return;
    }

    let line = render(level, target, message, config());
    let _ = writeln!(std::io::stderr().lock(), "{}", line);
}

/// Format one line according to `config`, without the trailing newline.
pub fn render(level: Level, target: &str, message: &str, config: &LogConfig) -> String {
    let target = if config.module_path { target } else { "" };

    match config.format {
        Format::Json => render_json(level, target, message, config.timestamps),
        Format::Pretty | Format::Compact => {
            let compact = config.format == Format::Compact;
            let mut parts: Vec<String> = Vec::with_capacity(4);

            if config.timestamps {
                let pattern = if compact { "%H:%M:%S" } else { "%Y-%m-%d %H:%M:%S%.3f" };
                parts.push(chrono::Local::now().format(pattern).to_string());
            }
            parts.push(if compact {
                level.as_str()[..1].to_string()
            } else {
                format!("{:<5}", level.as_str())
            });
            if !target.is_empty() {
                parts.push(if compact {
                    format!("{}:", target)
                } else {
                    format!("[{}]", target)
                });
            }
            parts.push(message.to_string());
            parts.join(" ")
        }
    }
}

#[cfg(feature = "json")]
fn render_json(level: Level, target: &str, message: &str, timestamps: bool) -> String {
    let mut line = serde_json::Map::new();
    if timestamps {
        line.insert("timestamp".into(), chrono::Utc::now().to_rfc3339().into());
    }
    line.insert("level".into(), level.as_str().into());
    if !target.is_empty() {
        line.insert("target".into(), target.into());
    }
    line.insert("message".into(), message.into());
    serde_json::Value::Object(line).to_string()
}

#[cfg(not(feature = "json"))]
fn render_json(level: Level, target: &str, message: &str, timestamps: bool) -> String {
    let mut fields = Vec::with_capacity(4);
    if timestamps {
        fields.push(format!(r#""timestamp":"{}""#, chrono::Utc::now().to_rfc3339()));
    }
    fields.push(format!(r#""level":"{}""#, level.as_str()));
    if !target.is_empty() {
        fields.push(format!(r#""target":{:?}"#, target));
    }
    fields.push(format!(r#""message":{:?}"#, message));
    format!("{{{}}}", fields.join(","))
}

// ============================================================================
// Macros
// ============================================================================

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:expr, $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($level) {
            $crate::log($level, $target, &format!($($arg)+));
        }
    };
}

/// Log at trace level.
#[macro_export]
macro_rules! trace {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::__log_at!($crate::Level::Trace, $target, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_at!($crate::Level::Trace, module_path!(), $($arg)+)
    };
}

/// Log at debug level.
///
/// Emitted when `TOLLGATE_DEBUG=1` or the level is `debug` or lower.
///
/// ```rust
/// use tollgate_log::debug;
///
/// let field = "email";
/// debug!(target: "tollgate::validation", "Declared rule for {}", field);
/// ```
#[macro_export]
macro_rules! debug {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_debug_enabled() || $crate::is_level_enabled($crate::Level::Debug) {
            $crate::log($crate::Level::Debug, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        $crate::debug!(target: module_path!(), $($arg)+)
    };
}

/// Log at info level.
#[macro_export]
macro_rules! info {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::__log_at!($crate::Level::Info, $target, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_at!($crate::Level::Info, module_path!(), $($arg)+)
    };
}

/// Log at warn level.
#[macro_export]
macro_rules! warn {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::__log_at!($crate::Level::Warn, $target, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_at!($crate::Level::Warn, module_path!(), $($arg)+)
    };
}

/// Log at error level.
#[macro_export]
macro_rules! error {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::__log_at!($crate::Level::Error, $target, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__log_at!($crate::Level::Error, module_path!(), $($arg)+)
    };
}

// ============================================================================
// Tracing integration
// ============================================================================

#[cfg(feature = "tracing")]
pub mod tracing_compat {
    //! Bridge to `tracing` for applications that already run a subscriber.

    use super::*;

    /// A subscriber filtered at the configured Tollgate level unless
    /// `RUST_LOG` says otherwise.
    pub fn subscriber() -> impl tracing::Subscriber {
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config().level.as_str().to_ascii_lowercase()));

        tracing_subscriber::registry().with(filter).with(fmt::layer())
    }
}
