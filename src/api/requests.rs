//! API request bodies and query strings

use serde::Deserialize;

use crate::{
    engine::lenient_count,
    error::{non_negative, EngineError},
};

/// A number that may arrive as JSON number or as text typed into a form
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LenientNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

impl LenientNumber {
    /// Whole count; fractions are truncated and unparseable text is zero
    pub fn to_count(&self, field: &'static str) -> Result<u64, EngineError> {
        match self {
            LenientNumber::Int(value) => non_negative(field, *value),
            LenientNumber::Float(value) if value.is_finite() => non_negative(field, value.trunc() as i64),
            LenientNumber::Float(_) => Ok(0),
            LenientNumber::Text(text) => lenient_count(field, text),
        }
    }

    /// Real value; unparseable text is zero
    pub fn to_real(&self) -> f64 {
        match self {
            LenientNumber::Int(value) => *value as f64,
            LenientNumber::Float(value) => *value,
            LenientNumber::Text(text) => text.trim().parse().unwrap_or(0.0),
        }
    }
}

fn count(value: &Option<LenientNumber>, field: &'static str) -> Result<u64, EngineError> {
    value.as_ref().map_or(Ok(0), |v| v.to_count(field))
}

/// Query for GET /recommendation
#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub uv_index: f64,
    #[serde(default)]
    pub sunset_imminent: bool,
}

/// Body for POST /uv/simulate
#[derive(Debug, Default, Deserialize)]
pub struct SimulateRequest {
    pub index: Option<LenientNumber>,
    pub sunset_imminent: Option<bool>,
}

impl SimulateRequest {
    pub fn index(&self) -> f64 {
        self.index.as_ref().map_or(0.0, LenientNumber::to_real)
    }
}

/// Body for POST /uv/postcode
#[derive(Debug, Deserialize)]
pub struct PostcodeRequest {
    pub postcode: String,
}

/// Body for POST /uv/location
#[derive(Debug, Deserialize)]
pub struct LocationRequest {
    pub lat: f64,
    pub lon: f64,
}

/// Body for POST /timer/duration
#[derive(Debug, Deserialize)]
pub struct DurationRequest {
    pub seconds: i64,
}

/// Body for POST /timer/custom
#[derive(Debug, Default, Deserialize)]
pub struct CustomDurationRequest {
    pub hours: Option<LenientNumber>,
    pub minutes: Option<LenientNumber>,
}

impl CustomDurationRequest {
    /// Hours and minutes with blank or malformed fields counted as zero
    pub fn parts(&self) -> Result<(u64, u64), EngineError> {
        Ok((count(&self.hours, "hours")?, count(&self.minutes, "minutes")?))
    }
}
