//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::{Query, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::{
    config::AssetConfig,
    engine::{Recommendation, UvReading},
    error::AppError,
    state::AppState,
};
use super::{
    requests::{
        CustomDurationRequest, DurationRequest, LocationRequest, PostcodeRequest,
        RecommendationQuery, SimulateRequest,
    },
    responses::{HealthResponse, ReadingResponse, RecommendationResponse, StatusResponse, TimerResponse},
};

type ApiResult<T> = Result<Json<T>, AppError>;

/// Handle GET /recommendation - Compute advice without touching state
pub async fn recommendation_handler(Query(query): Query<RecommendationQuery>) -> ApiResult<RecommendationResponse> {
    let recommendation = Recommendation::compute(query.uv_index, query.sunset_imminent)?;
    Ok(Json(recommendation.into()))
}

/// Handle POST /uv - Accept a reading from the client
pub async fn reading_handler(
    State(state): State<Arc<AppState>>,
    Json(reading): Json<UvReading>,
) -> ApiResult<ReadingResponse> {
    let recommendation = state.set_reading(reading)?;
    Ok(Json(ReadingResponse::new(reading, recommendation)))
}

/// Handle POST /uv/simulate - Developer test mode
pub async fn simulate_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SimulateRequest>,
) -> ApiResult<ReadingResponse> {
    let sunset_imminent = request.sunset_imminent.unwrap_or_else(rand::random);
    let reading = UvReading::new(request.index(), sunset_imminent)?;
    info!("Simulating UV reading {:?}", reading);

    let recommendation = state.set_reading(reading)?;
    Ok(Json(ReadingResponse::new(reading, recommendation)))
}

/// Handle POST /uv/postcode - Look up the UV index for a postcode
pub async fn postcode_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PostcodeRequest>,
) -> ApiResult<ReadingResponse> {
    let (reading, recommendation) = state.lookup_postcode(&request.postcode).await?;
    Ok(Json(ReadingResponse::new(reading, recommendation)))
}

/// Handle POST /uv/location - Look up the UV index for device coordinates
pub async fn location_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LocationRequest>,
) -> ApiResult<ReadingResponse> {
    let (reading, recommendation) = state.lookup_coordinates(request.lat, request.lon).await?;
    Ok(Json(ReadingResponse::new(reading, recommendation)))
}

/// Handle GET /timer - Current countdown snapshot
pub async fn timer_handler(State(state): State<Arc<AppState>>) -> ApiResult<TimerResponse> {
    Ok(Json(state.get_timer_state()?.into()))
}

/// Handle POST /timer/start
pub async fn timer_start_handler(State(state): State<Arc<AppState>>) -> ApiResult<TimerResponse> {
    Ok(Json(state.start_timer()?.into()))
}

/// Handle POST /timer/pause
pub async fn timer_pause_handler(State(state): State<Arc<AppState>>) -> ApiResult<TimerResponse> {
    Ok(Json(state.pause_timer()?.into()))
}

/// Handle POST /timer/toggle - Play/pause button
pub async fn timer_toggle_handler(State(state): State<Arc<AppState>>) -> ApiResult<TimerResponse> {
    Ok(Json(state.toggle_timer()?.into()))
}

/// Handle POST /timer/reset - Replay button: restart the recommended interval
pub async fn timer_reset_handler(State(state): State<Arc<AppState>>) -> ApiResult<TimerResponse> {
    Ok(Json(state.replay_timer()?.into()))
}

/// Handle POST /timer/duration - Stage a duration without starting
pub async fn timer_duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationRequest>,
) -> ApiResult<TimerResponse> {
    Ok(Json(state.set_timer_duration(request.seconds)?.into()))
}

/// Handle POST /timer/custom - Start a custom hours/minutes countdown
pub async fn timer_custom_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CustomDurationRequest>,
) -> ApiResult<TimerResponse> {
    let (hours, minutes) = request.parts()?;
    Ok(Json(state.set_custom_duration(hours, minutes)?.into()))
}

/// Handle GET /timer/events - Stream expiry events to the client
pub async fn timer_events_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let expiry_rx = state.subscribe_expiry()?;

    let events = stream::unfold(expiry_rx, |mut expiry_rx| async move {
        loop {
            match expiry_rx.recv().await {
                Ok(expiry) => {
                    let event = Event::default()
                        .event("expired")
                        .json_data(&expiry)
                        .unwrap_or_else(|_| Event::default().event("expired"));
                    return Some((Ok(event), expiry_rx));
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Expiry stream lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

/// Handle GET /status - Reading, timer and server metadata
pub async fn status_handler(State(state): State<Arc<AppState>>) -> ApiResult<StatusResponse> {
    let reading_state = state.get_reading_state()?;
    let timer_state = state.get_timer_state()?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        reading: reading_state.reading,
        recommendation: reading_state.recommendation.map(Into::into),
        errors: reading_state.errors,
        timer: timer_state.into(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /config/assets - Resolved image paths
pub async fn assets_handler(State(state): State<Arc<AppState>>) -> Json<AssetConfig> {
    Json(state.assets.clone())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
