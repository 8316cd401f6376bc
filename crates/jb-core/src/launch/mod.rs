//! Cold-start session heuristic.
//!
//! A launch is "cold" when no earlier launch was recorded or the last one is
//! older than the threshold. Wall-clock based, so clock skew and a long
//! suspended resume can misclassify a launch; treat the result as a hint.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_COLD_LAUNCH_THRESHOLD: Duration = Duration::from_millis(30_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaunchKind {
    Cold,
    Warm,
}

/// Host platform. Navigation restore is skipped on the web.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Ios,
    Android,
    Web,
}

impl Platform {
    pub fn restores_navigation(&self) -> bool {
        !matches!(self, Platform::Web)
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            "web" => Ok(Platform::Web),
            other => Err(format!("unknown platform `{other}`")),
        }
    }
}

/// Persisted launch markers as read at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionMarker {
    /// Last recorded launch, epoch milliseconds.
    pub app_session_id: Option<i64>,
    pub splash_shown_session: bool,
}

impl SessionMarker {
    /// Build from raw stored values. An unparseable timestamp counts as absent.
    pub fn from_stored(app_session_id: Option<&str>, splash_shown: Option<&str>) -> Self {
        Self {
            app_session_id: app_session_id.and_then(|raw| raw.trim().parse().ok()),
            splash_shown_session: splash_shown.map(|raw| raw.trim() == "true").unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColdStartPolicy {
    pub threshold: Duration,
}

impl Default for ColdStartPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_COLD_LAUNCH_THRESHOLD,
        }
    }
}

impl ColdStartPolicy {
    pub fn new(threshold: Duration) -> Self {
        Self { threshold }
    }

    pub fn classify(&self, last_launch_ms: Option<i64>, now_ms: i64) -> LaunchKind {
        let Some(last) = last_launch_ms else {
            return LaunchKind::Cold;
        };
        let elapsed = now_ms.saturating_sub(last);
        if elapsed > self.threshold.as_millis() as i64 {
            LaunchKind::Cold
        } else {
            LaunchKind::Warm
        }
    }

    /// Splash only on a cold launch whose marker has no splash recorded.
    pub fn should_show_splash(&self, marker: &SessionMarker, now_ms: i64) -> bool {
        self.classify(marker.app_session_id, now_ms) == LaunchKind::Cold
            && !marker.splash_shown_session
    }
}
