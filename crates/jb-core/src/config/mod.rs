//! # Application configuration DTO
//!
//! ## Responsibilities
//!
//! - Define configuration data structures
//! - Provide TOML -> DTO mapping with the documented defaults
//!
//! ## Prohibited
//!
//! - No file I/O (loading lives in the bootstrap layer)
//! - No path discovery (the caller supplies the default store path)

use std::path::PathBuf;
use std::time::Duration;

use anyhow::anyhow;

use crate::launch::{ColdStartPolicy, Platform, DEFAULT_COLD_LAUNCH_THRESHOLD};
use crate::recovery::{RecoveryPolicy, RecoveryTrigger};

pub const DEFAULT_LOGIN_ROUND_TRIP: Duration = Duration::from_millis(1000);

/// Application configuration DTO.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Key-value store file. Empty means "use the platform default".
    pub store_path: PathBuf,
    pub platform: Platform,
    pub cold_start: ColdStartPolicy,
    pub recovery: RecoveryPolicy,
    /// Simulated backend latency for `login`.
    pub login_round_trip: Duration,
    /// Overrides the default filter when set (`RUST_LOG` still wins).
    pub log_level: Option<String>,
    /// Optional log file path in addition to stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::new(),
            platform: Platform::Android,
            cold_start: ColdStartPolicy::default(),
            recovery: RecoveryPolicy::default(),
            login_round_trip: DEFAULT_LOGIN_ROUND_TRIP,
            log_level: None,
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Create AppConfig from a TOML value.
    ///
    /// Missing keys take their defaults; unknown enum strings and negative
    /// durations are rejected.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let get = |section: &str, key: &str| toml_value.get(section).and_then(|s| s.get(key));

        let platform = match get("launch", "platform").and_then(|v| v.as_str()) {
            Some(raw) => raw.parse::<Platform>().map_err(|e| anyhow!(e))?,
            None => defaults.platform,
        };
        let trigger = match get("recovery", "trigger").and_then(|v| v.as_str()) {
            Some(raw) => raw.parse::<RecoveryTrigger>().map_err(|e| anyhow!(e))?,
            None => defaults.recovery.trigger,
        };
        let millis = |section: &str, key: &str, fallback: Duration| -> anyhow::Result<Duration> {
            match get(section, key).and_then(|v| v.as_integer()) {
                Some(ms) if ms < 0 => Err(anyhow!("{section}.{key} must not be negative")),
                Some(ms) => Ok(Duration::from_millis(ms as u64)),
                None => Ok(fallback),
            }
        };
        let max_attempts = match get("recovery", "max_attempts").and_then(|v| v.as_integer()) {
            Some(n) => u32::try_from(n)
                .map_err(|_| anyhow!("recovery.max_attempts is out of range: {n}"))?,
            None => defaults.recovery.max_attempts,
        };

        Ok(Self {
            store_path: PathBuf::from(
                get("storage", "path")
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            platform,
            cold_start: ColdStartPolicy::new(millis(
                "launch",
                "cold_launch_threshold_ms",
                DEFAULT_COLD_LAUNCH_THRESHOLD,
            )?),
            recovery: RecoveryPolicy {
                max_attempts,
                settle_delay: millis("recovery", "settle_delay_ms", defaults.recovery.settle_delay)?,
                trigger,
            },
            login_round_trip: millis("auth", "login_round_trip_ms", defaults.login_round_trip)?,
            log_level: get("logging", "level")
                .and_then(|v| v.as_str())
                .map(str::to_string),
            log_file: get("logging", "file")
                .and_then(|v| v.as_str())
                .map(PathBuf::from),
        })
    }
}
