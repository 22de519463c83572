//! BrightAware - UV-aware sunscreen reapplication advice
//!
//! Maps UV index readings to reapplication intervals and runs a countdown
//! that signals when sunscreen is due again. The engine is pure; the HTTP
//! host, tick source and UV sources wrap around it.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod sources;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::{AssetConfig, Config};
pub use engine::{CountdownTimer, Recommendation, Severity, TimerState, TimerStatus, UvReading};
pub use error::{AppError, EngineError};
pub use state::AppState;
pub use utils::signals::shutdown_signal;
