//! UV readings supplied by lookups or simulation

use serde::{Deserialize, Serialize};

use super::Recommendation;
use crate::error::EngineError;

/// A single UV observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvReading {
    pub index: f64,
    #[serde(default)]
    pub sunset_imminent: bool,
}

impl UvReading {
    /// Build a reading, rejecting indices the calculator would refuse
    pub fn new(index: f64, sunset_imminent: bool) -> Result<Self, EngineError> {
        let reading = Self {
            index,
            sunset_imminent,
        };
        reading.recommendation()?;
        Ok(reading)
    }

    pub fn recommendation(&self) -> Result<Recommendation, EngineError> {
        Recommendation::compute(self.index, self.sunset_imminent)
    }
}
