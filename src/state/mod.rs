//! State management module
//!
//! Holds the current UV reading, the countdown timer and the channels that
//! tell observers when either changes.

pub mod app_state;
pub mod reading_state;

// Re-export main types
pub use app_state::AppState;
pub use reading_state::ReadingState;
