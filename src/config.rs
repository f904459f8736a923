//! Driver configuration from environment variables.
//!
//! Unset or unparseable values fall back to the defaults.

use std::path::PathBuf;
use std::time::Duration;

use tracing::level_filters::LevelFilter;

use crate::types::DEFAULT_FRAME_MS;

pub const ENV_FRAME_MS: &str = "BLOCKFALL_FRAME_MS";
pub const ENV_AUTO_RESTART: &str = "BLOCKFALL_AUTO_RESTART";
pub const ENV_LOG: &str = "BLOCKFALL_LOG";
pub const ENV_LOG_LEVEL: &str = "BLOCKFALL_LOG_LEVEL";

/// Terminal driver configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Interval between frames (input poll deadline, gravity tick, redraw).
    pub frame_ms: u64,
    /// Start a new game as soon as the current one ends.
    pub auto_restart: bool,
    /// Log file; no subscriber is installed when `None`.
    pub log_path: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            frame_ms: DEFAULT_FRAME_MS,
            auto_restart: true,
            log_path: None,
            log_level: LevelFilter::INFO,
        }
    }
}

impl DriverConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. `from_env` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let frame_ms = lookup(ENV_FRAME_MS)
            .and_then(|s| parse_frame_ms(&s))
            .unwrap_or(defaults.frame_ms);

        let auto_restart = lookup(ENV_AUTO_RESTART)
            .and_then(|s| parse_flag(&s))
            .unwrap_or(defaults.auto_restart);

        let log_path = lookup(ENV_LOG)
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        let log_level = lookup(ENV_LOG_LEVEL)
            .and_then(|s| s.trim().parse::<LevelFilter>().ok())
            .unwrap_or(defaults.log_level);

        Self {
            frame_ms,
            auto_restart,
            log_path,
            log_level,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}

/// Frame interval in milliseconds; zero is rejected.
fn parse_frame_ms(s: &str) -> Option<u64> {
    s.trim().parse::<u64>().ok().filter(|&ms| ms > 0)
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
