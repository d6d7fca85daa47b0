mod loader;
mod parser;
pub mod template;

use std::time::Duration;

use serde::Serialize;

pub use loader::{
    Paths, RECORD_FILE_NAME, RULE_FILE_NAME, data_dir, ensure_rule_file, load, report_json,
};
pub use parser::parse;

/// Poll interval used when none is configured or the value is unusable.
pub const DEFAULT_INTERVAL_SECS: f64 = 0.1;

/// Shortest poll interval the monitor accepts, in seconds.
pub const MIN_INTERVAL_SECS: f64 = 0.01;

/// Settings read from the config section of the rule file.
///
/// Loaded once at start-up and never mutated afterwards. Absent keys
/// keep their defaults; invalid numeric values fall back to safe ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    /// Whether the monitor runs at all. Only the literal `true` enables it.
    pub enable: bool,
    /// Password the control panel requires before monitoring stops.
    #[serde(skip_serializing)]
    pub password: String,
    /// Whether titles that match no rule are written to the record log.
    pub record_all: bool,
    /// Poll interval in seconds, never below [`MIN_INTERVAL_SECS`].
    pub interval_secs: f64,
    /// How many built-in rules are layered on top of the rule file.
    pub level: DetectionLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable: true,
            password: "123456".into(),
            record_all: true,
            interval_secs: DEFAULT_INTERVAL_SECS,
            level: DetectionLevel::default(),
        }
    }
}

impl Config {
    /// Returns the poll interval as a [`Duration`].
    ///
    /// A value no `Duration` can hold falls back to the default interval.
    pub fn interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.interval_secs)
            .unwrap_or_else(|_| Duration::from_secs_f64(DEFAULT_INTERVAL_SECS))
    }

    /// Applies one `key(value)` pair. Unknown keys are ignored.
    pub(crate) fn set(&mut self, key: &str, value: &str) {
        match key {
            "enable" => self.enable = value == "true",
            "password" => self.password = value.to_string(),
            "record_all" => self.record_all = value == "true",
            "interval" => self.interval_secs = parse_interval(value),
            "level" => self.level = DetectionLevel::parse(value),
            _ => {}
        }
    }
}

fn parse_interval(value: &str) -> f64 {
    let secs = match value.trim().parse::<f64>() {
        Ok(secs) if !secs.is_nan() => secs,
        _ => return DEFAULT_INTERVAL_SECS,
    };
    let secs = secs.max(MIN_INTERVAL_SECS);
    if Duration::try_from_secs_f64(secs).is_ok() {
        secs
    } else {
        DEFAULT_INTERVAL_SECS
    }
}

/// Detection level, always within `1..=3`.
///
/// Level 2 adds the built-in Task Manager and command prompt rules.
/// Level 3 is reserved and currently behaves like level 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DetectionLevel(u8);

impl DetectionLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 3;
    /// Used when the configured level is out of range or unparsable.
    pub const FALLBACK: u8 = 2;

    /// Builds a level, replacing out-of-range values with the fallback.
    pub fn new(level: i64) -> Self {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&level) {
            Self(level as u8)
        } else {
            Self(Self::FALLBACK)
        }
    }

    pub fn parse(value: &str) -> Self {
        value
            .trim()
            .parse::<i64>()
            .map_or(Self(Self::FALLBACK), Self::new)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for DetectionLevel {
    fn default() -> Self {
        Self(1)
    }
}

/// Rules read from the rule section of the rule file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleSet {
    pub protect: ProtectRules,
    /// Exact titles closed once.
    pub ordinary: Vec<String>,
    /// Exact titles closed, then force-terminated if ignored.
    pub force: Vec<String>,
    /// Title substrings closed once.
    pub include: Vec<String>,
    /// Title substrings closed, then force-terminated if ignored.
    pub ex_include: Vec<String>,
}

/// Windows and processes that are never acted upon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProtectRules {
    /// Executable names (`(0)` lines), resolved to pids at start-up.
    pub by_process: Vec<String>,
    /// Exact window titles (`(1)` lines).
    pub by_title: Vec<String>,
}
