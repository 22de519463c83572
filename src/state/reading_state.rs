//! Current UV reading and lookup errors

use serde::{Deserialize, Serialize};

use crate::engine::{Recommendation, UvReading};

/// Oldest errors are dropped beyond this many
const MAX_ERRORS: usize = 10;

/// The reading the host is currently advising on
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadingState {
    pub reading: Option<UvReading>,
    pub recommendation: Option<Recommendation>,
    /// Lookup errors for client visibility
    pub errors: Vec<String>,
}

impl ReadingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the reading and its recommendation
    pub fn set_reading(&mut self, reading: UvReading, recommendation: Recommendation) {
        self.reading = Some(reading);
        self.recommendation = Some(recommendation);
    }

    /// Forget the reading, as after a failed lookup
    pub fn clear_reading(&mut self) {
        self.reading = None;
        self.recommendation = None;
    }

    /// Whether the timer controls should be usable
    pub fn requires_protection(&self) -> bool {
        self.recommendation
            .map(|r| r.requires_protection)
            .unwrap_or(false)
    }

    pub fn add_error(&mut self, error: String) {
        if self.errors.len() >= MAX_ERRORS {
            let excess = self.errors.len() + 1 - MAX_ERRORS;
            self.errors.drain(..excess);
        }
        self.errors.push(error);
    }

    /// Clear errors mentioning `component`
    pub fn clear_errors_for(&mut self, component: &str) {
        let initial_count = self.errors.len();
        let needle = component.to_lowercase();
        self.errors.retain(|error| !error.to_lowercase().contains(&needle));

        if self.errors.len() != initial_count {
            tracing::info!("Cleared {} errors for component: {}", initial_count - self.errors.len(), component);
        }
    }
}
