//! Timer state structure and formatting

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of the reapplication countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    Expired,
}

impl fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
            TimerStatus::Expired => "expired",
        };
        f.write_str(label)
    }
}

/// Snapshot of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub remaining_seconds: u64,
    pub status: TimerStatus,
}

impl TimerState {
    /// Create an idle timer with nothing to count down
    pub fn new() -> Self {
        Self {
            remaining_seconds: 0,
            status: TimerStatus::Idle,
        }
    }

    /// Check if the countdown is running
    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    /// Remaining time as `HH:MM:SS`
    pub fn display(&self) -> String {
        format_hms(self.remaining_seconds)
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Format seconds as zero-padded `HH:MM:SS`. Hours are not wrapped at 24.
pub fn format_hms(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}
