//! Countdown state machine for sunscreen reapplication
//!
//! The timer holds no clock of its own. Time only advances through
//! [`CountdownTimer::tick`], which the host calls once per second while the
//! timer is running.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use super::{Recommendation, TimerState, TimerStatus};
use crate::error::EngineError;

const EXPIRY_CHANNEL_CAPACITY: usize = 16;

/// Emitted once when a running countdown reaches zero
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryEvent {
    pub at: DateTime<Utc>,
    /// Duration the expired run was set with
    pub duration_seconds: u64,
}

/// Result of an accepted tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running { remaining_seconds: u64 },
    Expired,
}

/// Reapplication countdown
#[derive(Debug)]
pub struct CountdownTimer {
    state: TimerState,
    duration_seconds: u64,
    expiry_tx: broadcast::Sender<ExpiryEvent>,
}

impl CountdownTimer {
    pub fn new() -> Self {
        let (expiry_tx, _) = broadcast::channel(EXPIRY_CHANNEL_CAPACITY);
        Self {
            state: TimerState::new(),
            duration_seconds: 0,
            expiry_tx,
        }
    }

    /// Current remaining seconds and status
    pub fn snapshot(&self) -> TimerState {
        self.state
    }

    /// Subscribe to expiry events
    pub fn subscribe_expiry(&self) -> broadcast::Receiver<ExpiryEvent> {
        self.expiry_tx.subscribe()
    }

    /// Stage a new duration. The timer is left idle; call [`start`](Self::start)
    /// to begin counting.
    pub fn set_duration(&mut self, seconds: u64) -> Result<TimerState, EngineError> {
        if self.state.status == TimerStatus::Running {
            return Err(EngineError::invalid_transition("set duration", self.state.status));
        }
        Ok(self.stage(seconds))
    }

    pub fn start(&mut self) -> Result<TimerState, EngineError> {
        match self.state.status {
            TimerStatus::Idle | TimerStatus::Paused => {}
            status => return Err(EngineError::invalid_transition("start", status)),
        }
        if self.state.remaining_seconds == 0 {
            return Err(EngineError::validation(
                "remaining_seconds",
                "nothing to count down",
            ));
        }
        self.state.status = TimerStatus::Running;
        Ok(self.state)
    }

    pub fn pause(&mut self) -> Result<TimerState, EngineError> {
        if self.state.status != TimerStatus::Running {
            return Err(EngineError::invalid_transition("pause", self.state.status));
        }
        self.state.status = TimerStatus::Paused;
        Ok(self.state)
    }

    /// Advance the countdown by one second.
    ///
    /// Only a running timer accepts ticks. A tick that arrives after a pause
    /// or after expiry is rejected and changes nothing.
    pub fn tick(&mut self) -> Result<TickOutcome, EngineError> {
        if self.state.status != TimerStatus::Running {
            return Err(EngineError::invalid_transition("tick", self.state.status));
        }

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        if self.state.remaining_seconds > 0 {
            return Ok(TickOutcome::Running {
                remaining_seconds: self.state.remaining_seconds,
            });
        }

        self.state.status = TimerStatus::Expired;
        let event = ExpiryEvent {
            at: Utc::now(),
            duration_seconds: self.duration_seconds,
        };
        if self.expiry_tx.send(event).is_err() {
            debug!("Countdown expired with no expiry subscribers");
        }
        Ok(TickOutcome::Expired)
    }

    /// Stage the interval of `recommendation`, replacing whatever the timer
    /// was doing. The timer is left idle.
    pub fn reset_to_recommendation(&mut self, recommendation: &Recommendation) -> TimerState {
        self.stage(recommendation.interval_seconds)
    }

    /// Set a user-chosen duration and start counting immediately.
    ///
    /// A zero total is rejected without touching the current state.
    pub fn set_custom_duration(&mut self, hours: u64, minutes: u64) -> Result<TimerState, EngineError> {
        let seconds = hours
            .checked_mul(3600)
            .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
            .ok_or_else(|| EngineError::validation("custom duration", "too large"))?;
        if seconds == 0 {
            return Err(EngineError::validation(
                "custom duration",
                "must be longer than zero",
            ));
        }

        self.stage(seconds);
        self.start()
    }

    /// Pause when running, otherwise start if there is time left
    pub fn toggle(&mut self) -> Result<TimerState, EngineError> {
        if self.state.status == TimerStatus::Running {
            self.pause()
        } else if self.state.remaining_seconds > 0 {
            self.start()
        } else {
            Ok(self.state)
        }
    }

    fn stage(&mut self, seconds: u64) -> TimerState {
        self.state = TimerState {
            remaining_seconds: seconds,
            status: TimerStatus::Idle,
        };
        self.duration_seconds = seconds;
        self.state
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a count typed by a user from its leading digits, so "1.5" is 1 and
/// "2h" is 2. Text without leading digits counts as zero; negative numbers
/// are rejected.
pub fn lenient_count(field: &'static str, text: &str) -> Result<u64, EngineError> {
    let trimmed = text.trim();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..digits_end];
    if digits.is_empty() {
        return Ok(0);
    }

    let value: u64 = digits
        .parse()
        .map_err(|_| EngineError::validation(field, format!("{} is too large", digits)))?;
    if negative && value > 0 {
        return Err(EngineError::validation(field, format!("-{} is negative", value)));
    }
    Ok(value)
}
