//! Recommendation and timer engine
//!
//! Pure logic with no I/O: UV readings in, reapplication intervals and
//! countdown state out.

pub mod countdown;
pub mod reading;
pub mod recommendation;
pub mod timer_state;

pub use countdown::{lenient_count, CountdownTimer, ExpiryEvent, TickOutcome};
pub use reading::UvReading;
pub use recommendation::{ColorCategory, Recommendation, Severity};
pub use timer_state::{format_hms, TimerState, TimerStatus};
