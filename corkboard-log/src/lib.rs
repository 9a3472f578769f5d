//! Corkboard logging
//!
//! The helper crates are libraries embedded in someone else's board, so they
//! say nothing unless the host asks. Records at [`Level::Warn`] and above are
//! handed to the [`log`] facade, which drops them when no logger is
//! installed; nothing is formatted in that case.
//!
//! ```rust
//! use corkboard_log::{debug, warn};
//!
//! let key = "board:42";
//! debug!(target: "corkboard::store", "set {}", key);
//! warn!("custom predicate failed");
//! ```
//!
//! # Environment Variables
//!
//! - `CORKBOARD_LOG_LEVEL=trace|debug|info|warn|error|off`
//! - `CORKBOARD_DEBUG=1` lowers the default level to `debug`
//! - `CORKBOARD_LOG_FORMAT=facade|json`; `json` writes one object per line
//!   to stderr for hosts that have no logger of their own

use once_cell::sync::Lazy;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Severity of a record, `Off` disables output.
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

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Off => "off",
        }
    }

    /// Parse a level name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Level> {
        let name = name.trim();
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(name))
    }

    fn to_log(self) -> Option<log::Level> {
        match self {
            Level::Trace => Some(log::Level::Trace),
            Level::Debug => Some(log::Level::Debug),
            Level::Info => Some(log::Level::Info),
            Level::Warn => Some(log::Level::Warn),
            Level::Error => Some(log::Level::Error),
            Level::Off => None,
        }
    }
}

/// Where records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sink {
    /// The `log` crate; silent unless the host installed a logger.
    #[default]
    Facade,
    /// JSON lines on stderr.
    Json,
}

impl Sink {
    pub fn from_name(name: &str) -> Option<Sink> {
        match name.trim().to_ascii_lowercase().as_str() {
            "facade" | "log" => Some(Sink::Facade),
            "json" => Some(Sink::Json),
            _ => None,
        }
    }
}

/// Settings read once from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub level: Level,
    pub sink: Sink,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: Level::Warn,
            sink: Sink::Facade,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from any variable source. Unknown values fall back to
    /// the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let debug = lookup("CORKBOARD_DEBUG")
            .is_some_and(|v| v.trim() == "1" || v.trim().eq_ignore_ascii_case("true"));
        let fallback = if debug { Level::Debug } else { Level::Warn };

        Self {
            level: lookup("CORKBOARD_LOG_LEVEL")
                .and_then(|v| Level::from_name(&v))
                .unwrap_or(fallback),
            sink: lookup("CORKBOARD_LOG_FORMAT")
                .and_then(|v| Sink::from_name(&v))
                .unwrap_or_default(),
        }
    }
}

const UNSET: u8 = u8::MAX;

static LEVEL: AtomicU8 = AtomicU8::new(UNSET);

static SETTINGS: Lazy<Settings> = Lazy::new(Settings::from_env);

/// Current minimum level.
pub fn level() -> Level {
    let raw = match LEVEL.load(Ordering::Relaxed) {
        UNSET => {
            let initial = SETTINGS.level as u8;
            match LEVEL.compare_exchange(UNSET, initial, Ordering::SeqCst, Ordering::Relaxed) {
                Ok(_) => initial,
                Err(current) => current,
            }
        }
        raw => raw,
    };
    Level::ALL.get(usize::from(raw)).copied().unwrap_or(Level::Off)
}

/// Override the minimum level at runtime.
pub fn set_level(level: Level) {
    LEVEL.store(level as u8, Ordering::SeqCst);
}

pub fn sink() -> Sink {
    SETTINGS.sink
}

/// Whether a record at `level` would be written anywhere.
#[inline]
pub fn enabled(level: Level) -> bool {
    let Some(log_level) = level.to_log() else {
        return false;
    };
    if level < self::level() {
        return false;
    }
    match sink() {
        Sink::Facade => log_level <= log::max_level(),
        Sink::Json => true,
    }
}

#[doc(hidden)]
pub fn emit(level: Level, target: &str, args: fmt::Arguments<'_>) {
    let Some(log_level) = level.to_log() else {
        return;
    };
    match sink() {
        Sink::Facade => log::log!(target: target, log_level, "{}", args),
        Sink::Json => {
            if let Ok(line) = json_line(level, target, &args.to_string()) {
                eprintln!("{}", line);
            }
        }
    }
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    timestamp: String,
    level: &'a str,
    target: &'a str,
    message: &'a str,
}

fn json_line(level: Level, target: &str, message: &str) -> serde_json::Result<String> {
    serde_json::to_string(&JsonRecord {
        timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        level: level.as_str(),
        target,
        message,
    })
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record {
    ($level:expr, target: $target:expr, $($arg:tt)+) => {
        if $crate::enabled($level) {
            $crate::emit($level, $target, format_args!($($arg)+));
        }
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::__record!($level, target: module_path!(), $($arg)+)
    };
}

#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => { $crate::__record!($crate::Level::Trace, $($arg)+) };
}

/// Log at debug level; arguments are only formatted when enabled.
///
/// ```rust
/// corkboard_log::debug!(target: "corkboard::text", "escape set is {:?}", ['<', '>']);
/// ```
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::__record!($crate::Level::Debug, $($arg)+) };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::__record!($crate::Level::Info, $($arg)+) };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => { $crate::__record!($crate::Level::Warn, $($arg)+) };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::__record!($crate::Level::Error, $($arg)+) };
}
