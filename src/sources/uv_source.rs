//! Contract for external UV index lookups

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{engine::UvReading, error::EngineError};

/// Errors reported by a UV source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("UV source unavailable: {0}")]
    Unavailable(String),

    #[error("UV lookup failed: {0}")]
    Lookup(String),
}

/// A device position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Result<Self, EngineError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(EngineError::validation("lat", format!("{} is outside -90..=90", lat)));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(EngineError::validation("lon", format!("{} is outside -180..=180", lon)));
        }
        Ok(Self { lat, lon })
    }
}

/// Trim a postcode and reject blank input
pub fn validate_postcode(postcode: &str) -> Result<&str, EngineError> {
    let trimmed = postcode.trim();
    if trimmed.is_empty() {
        return Err(EngineError::validation("postcode", "must not be empty"));
    }
    Ok(trimmed)
}

/// Resolves a location to a UV reading
pub trait UvSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn by_postcode<'a>(&'a self, postcode: &'a str) -> BoxFuture<'a, Result<UvReading, SourceError>>;

    fn by_coordinates(&self, coordinates: Coordinates) -> BoxFuture<'_, Result<UvReading, SourceError>>;
}
