//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use super::ReadingState;
use crate::{
    config::AssetConfig,
    engine::{CountdownTimer, ExpiryEvent, Recommendation, TickOutcome, TimerState, UvReading},
    error::{non_negative, AppError, EngineError},
    sources::{validate_postcode, Coordinates, UvSource},
};

/// Shared state behind every handler and the ticker task
pub struct AppState {
    /// Current reading, its recommendation and lookup errors
    pub reading_state: Arc<Mutex<ReadingState>>,
    /// The single reapplication countdown
    pub timer: Arc<Mutex<CountdownTimer>>,
    /// Where postcode and coordinate lookups go
    pub source: Arc<dyn UvSource>,
    pub assets: AssetConfig,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for timer updates
    pub timer_update_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerState>,
}

impl AppState {
    pub fn new(port: u16, host: String, source: Arc<dyn UvSource>, assets: AssetConfig) -> Self {
        let (timer_update_tx, timer_update_rx) = watch::channel(TimerState::new());

        Self {
            reading_state: Arc::new(Mutex::new(ReadingState::new())),
            timer: Arc::new(Mutex::new(CountdownTimer::new())),
            source,
            assets,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    fn lock_timer(&self) -> Result<MutexGuard<'_, CountdownTimer>, AppError> {
        self.timer.lock().map_err(|_| AppError::Lock("timer"))
    }

    fn lock_reading(&self) -> Result<MutexGuard<'_, ReadingState>, AppError> {
        self.reading_state.lock().map_err(|_| AppError::Lock("reading"))
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    fn publish_timer(&self, timer_state: TimerState) {
        if let Err(e) = self.timer_update_tx.send(timer_state) {
            warn!("Failed to send timer update: {}", e);
        }
    }

    /// Apply a timer operation, then record it and notify watchers
    pub fn update_timer<F>(&self, action: &str, operation: F) -> Result<TimerState, AppError>
    where
        F: FnOnce(&mut CountdownTimer) -> Result<TimerState, EngineError>,
    {
        let mut timer = self.lock_timer()?;
        let result = operation(&mut *timer);
        drop(timer);

        match result {
            Ok(timer_state) => {
                info!("Timer {}: {} remaining, {}", action, timer_state.display(), timer_state.status);
                self.record_action(action);
                self.publish_timer(timer_state);
                Ok(timer_state)
            }
            Err(e) => {
                warn!("Timer {} rejected: {}", action, e);
                Err(e.into())
            }
        }
    }

    /// Store a new reading and return its recommendation
    pub fn set_reading(&self, reading: UvReading) -> Result<Recommendation, AppError> {
        let recommendation = reading.recommendation()?;

        let mut reading_state = self.lock_reading()?;
        reading_state.set_reading(reading, recommendation);
        reading_state.clear_errors_for("uv");
        drop(reading_state);

        info!(
            "UV reading {} ({}), sunset imminent: {}. {}",
            reading.index,
            recommendation.severity,
            reading.sunset_imminent,
            recommendation.advice()
        );
        self.record_action("reading");
        Ok(recommendation)
    }

    /// Look up a reading by postcode and make it current
    pub async fn lookup_postcode(&self, postcode: &str) -> Result<(UvReading, Recommendation), AppError> {
        let postcode = validate_postcode(postcode)?;
        debug!("Looking up UV index for postcode {} via {}", postcode, self.source.name());
        let result = self.source.by_postcode(postcode).await;
        self.accept_lookup(result.map_err(AppError::from))
    }

    /// Look up a reading by device position and make it current
    pub async fn lookup_coordinates(&self, lat: f64, lon: f64) -> Result<(UvReading, Recommendation), AppError> {
        let coordinates = Coordinates::new(lat, lon)?;
        debug!("Looking up UV index for {:?} via {}", coordinates, self.source.name());
        let result = self.source.by_coordinates(coordinates).await;
        self.accept_lookup(result.map_err(AppError::from))
    }

    fn accept_lookup(&self, result: Result<UvReading, AppError>) -> Result<(UvReading, Recommendation), AppError> {
        match result.and_then(|reading| Ok((reading, self.set_reading(reading)?))) {
            Ok(found) => Ok(found),
            Err(e) => {
                let mut reading_state = self.lock_reading()?;
                reading_state.clear_reading();
                reading_state.add_error(e.to_string());
                warn!("UV lookup failed: {}", e);
                Err(e)
            }
        }
    }

    /// Recommendation the timer controls act on, if they are usable at all
    fn protection_recommendation(&self, action: &str) -> Result<Recommendation, AppError> {
        let reading_state = self.lock_reading()?;
        match reading_state.recommendation {
            Some(recommendation) if reading_state.requires_protection() => Ok(recommendation),
            Some(_) => Err(AppError::Refused(format!("cannot {}: no sunscreen needed", action))),
            None => Err(AppError::Refused(format!("cannot {}: no UV reading yet", action))),
        }
    }

    pub fn start_timer(&self) -> Result<TimerState, AppError> {
        self.protection_recommendation("start")?;
        self.update_timer("start", |timer| timer.start())
    }

    pub fn pause_timer(&self) -> Result<TimerState, AppError> {
        self.update_timer("pause", |timer| timer.pause())
    }

    pub fn toggle_timer(&self) -> Result<TimerState, AppError> {
        self.protection_recommendation("toggle")?;
        self.update_timer("toggle", |timer| timer.toggle())
    }

    /// Replay: restage the recommended interval and start counting
    pub fn replay_timer(&self) -> Result<TimerState, AppError> {
        let recommendation = self.protection_recommendation("reset")?;
        self.update_timer("reset", |timer| {
            timer.reset_to_recommendation(&recommendation);
            timer.start()
        })
    }

    pub fn set_timer_duration(&self, seconds: i64) -> Result<TimerState, AppError> {
        let seconds = non_negative("seconds", seconds)?;
        self.update_timer("duration", |timer| timer.set_duration(seconds))
    }

    pub fn set_custom_duration(&self, hours: u64, minutes: u64) -> Result<TimerState, AppError> {
        self.update_timer("custom", |timer| timer.set_custom_duration(hours, minutes))
    }

    /// Advance the countdown by one second
    pub fn tick(&self) -> Result<TickOutcome, AppError> {
        let mut timer = self.lock_timer()?;
        let outcome = timer.tick()?;
        let timer_state = timer.snapshot();
        drop(timer);

        match outcome {
            TickOutcome::Running { remaining_seconds } => {
                debug!("Tick: {} seconds remaining", remaining_seconds);
            }
            TickOutcome::Expired => {
                info!("Countdown expired, sunscreen reapplication due");
                self.record_action("expired");
            }
        }
        self.publish_timer(timer_state);
        Ok(outcome)
    }

    pub fn get_timer_state(&self) -> Result<TimerState, AppError> {
        Ok(self.lock_timer()?.snapshot())
    }

    pub fn get_reading_state(&self) -> Result<ReadingState, AppError> {
        Ok(self.lock_reading()?.clone())
    }

    pub fn subscribe_timer(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    pub fn subscribe_expiry(&self) -> Result<broadcast::Receiver<ExpiryEvent>, AppError> {
        Ok(self.lock_timer()?.subscribe_expiry())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
