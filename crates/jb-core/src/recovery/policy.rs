use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_RECOVERY_ATTEMPTS: u32 = 3;
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(2000);

/// When an invalid state may start another automatic recovery cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryTrigger {
    /// Retry on every detection until the attempt cap, then escalate.
    UpToCap,
    /// Only the first detection runs a cycle. Later detections hold on the
    /// loading screen and never reach the cap on their own.
    FirstAttemptOnly,
}

impl FromStr for RecoveryTrigger {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "up_to_cap" => Ok(RecoveryTrigger::UpToCap),
            "first_attempt_only" => Ok(RecoveryTrigger::FirstAttemptOnly),
            other => Err(format!("unknown recovery trigger `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryPolicy {
    pub max_attempts: u32,
    /// Wait after each `check_auth_status` before the next detection.
    pub settle_delay: Duration,
    pub trigger: RecoveryTrigger,
}

impl Default for RecoveryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_RECOVERY_ATTEMPTS,
            settle_delay: DEFAULT_SETTLE_DELAY,
            trigger: RecoveryTrigger::UpToCap,
        }
    }
}
