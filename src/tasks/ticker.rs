//! One-second tick source for the countdown

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::{engine::TickOutcome, state::AppState};

/// Background task that ticks the countdown once per second while it runs.
///
/// Ticking starts when the published timer state becomes running and stops
/// as soon as it is paused, reset or expired.
pub async fn countdown_ticker_task(state: Arc<AppState>) {
    info!("Starting countdown ticker task");

    let mut timer_rx = state.subscribe_timer();

    loop {
        if !timer_rx.borrow_and_update().is_running() {
            if timer_rx.changed().await.is_err() {
                error!("Timer update channel closed, stopping ticker");
                return;
            }
            continue;
        }

        debug!("Countdown running, ticking every second");
        let mut ticks = interval(Duration::from_secs(1));
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticks.tick().await;

        loop {
            tokio::select! {
                _ = ticks.tick() => {
                    match state.tick() {
                        Ok(TickOutcome::Running { .. }) => {}
                        Ok(TickOutcome::Expired) => break,
                        Err(e) => {
                            debug!("Tick ignored: {}", e);
                            break;
                        }
                    }
                }

                changed = timer_rx.changed() => {
                    if changed.is_err() {
                        error!("Timer update channel closed, stopping ticker");
                        return;
                    }
                    if !timer_rx.borrow_and_update().is_running() {
                        debug!("Countdown left running state, ticks stopped");
                        break;
                    }
                    // A replaced run gets a full second before its first tick
                    ticks.reset();
                }
            }
        }
    }
}
