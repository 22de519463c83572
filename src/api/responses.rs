//! API response structures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{
    engine::{Recommendation, TimerState, TimerStatus, UvReading},
    error::{AppError, EngineError},
};

/// Recommendation with its display fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    #[serde(flatten)]
    pub recommendation: Recommendation,
    pub color_hex: String,
    pub advice: String,
}

impl From<Recommendation> for RecommendationResponse {
    fn from(recommendation: Recommendation) -> Self {
        Self {
            color_hex: recommendation.color.hex().to_string(),
            advice: recommendation.advice(),
            recommendation,
        }
    }
}

/// Response for the endpoints that set the current reading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingResponse {
    pub reading: UvReading,
    pub recommendation: RecommendationResponse,
    pub timestamp: DateTime<Utc>,
}

impl ReadingResponse {
    pub fn new(reading: UvReading, recommendation: Recommendation) -> Self {
        Self {
            reading,
            recommendation: recommendation.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Countdown snapshot with its clock-face rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerResponse {
    pub remaining_seconds: u64,
    pub status: TimerStatus,
    pub display: String,
}

impl From<TimerState> for TimerResponse {
    fn from(state: TimerState) -> Self {
        Self {
            remaining_seconds: state.remaining_seconds,
            status: state.status,
            display: state.display(),
        }
    }
}

/// Full status with reading, timer and server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub reading: Option<UvReading>,
    pub recommendation: Option<RecommendationResponse>,
    pub errors: Vec<String>,
    pub timer: TimerResponse,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Body returned for every rejected request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(message: String) -> Self {
        Self {
            status: "error".to_string(),
            message,
            timestamp: Utc::now(),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Engine(EngineError::Validation { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Engine(EngineError::InvalidTransition { .. }) => StatusCode::CONFLICT,
            AppError::Refused(_) => StatusCode::CONFLICT,
            AppError::Source(_) => StatusCode::BAD_GATEWAY,
            AppError::Lock(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::SourceError;

    #[test]
    fn errors_map_to_status_codes() {
        let validation = AppError::from(EngineError::validation("seconds", "-1 is negative"));
        assert_eq!(validation.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let transition = AppError::from(EngineError::invalid_transition("pause", TimerStatus::Idle));
        assert_eq!(transition.status_code(), StatusCode::CONFLICT);

        let source = AppError::from(SourceError::Lookup("timeout".to_string()));
        assert_eq!(source.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn recommendation_response_flattens_fields() {
        let rec = Recommendation::compute(6.0, false).unwrap();
        let json = serde_json::to_value(RecommendationResponse::from(rec)).unwrap();
        assert_eq!(json["severity"], "HIGH");
        assert_eq!(json["color"], "orange");
        assert_eq!(json["color_hex"], "#FF9800");
        assert_eq!(json["interval_seconds"], 3600);
        assert_eq!(json["advice"], "Reapply sunscreen every 60 minutes");
    }

    #[test]
    fn timer_response_renders_display() {
        let response = TimerResponse::from(TimerState {
            remaining_seconds: 3661,
            status: TimerStatus::Paused,
        });
        assert_eq!(response.display, "01:01:01");
    }
}
