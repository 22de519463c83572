//! BrightAware - sunscreen reapplication advice over HTTP
//!
//! This is the main entry point for the bright-aware server.

use std::sync::Arc;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use bright_aware::{
    api::create_router,
    config::{AssetConfig, Config},
    engine::UvReading,
    sources::{SimulatedSource, UnconfiguredSource, UvSource},
    state::AppState,
    tasks::countdown_ticker_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("bright_aware={},tower_http=info", config.log_level()))
        .init();

    info!("Starting bright-aware server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}", config.host, config.port);

    let source: Arc<dyn UvSource> = match config.simulate_uv {
        Some(index) => {
            let reading = UvReading::new(index, config.simulate_sunset)
                .context("invalid --simulate-uv value")?;
            info!("UV lookups simulated with {:?}", reading);
            Arc::new(SimulatedSource::new(reading))
        }
        None => {
            info!("No UV lookup backend configured; use POST /uv or /uv/simulate");
            Arc::new(UnconfiguredSource)
        }
    };

    let assets = AssetConfig::load(&config.assets_config);

    let state = Arc::new(AppState::new(config.port, config.host.clone(), source, assets));

    // Start the one-second tick source for the countdown
    let ticker_state = Arc::clone(&state);
    tokio::spawn(async move {
        countdown_ticker_task(ticker_state).await;
    });

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /recommendation - Advice for ?uv_index=&sunset_imminent=");
    info!("  POST /uv             - Set the current UV reading");
    info!("  POST /uv/simulate    - Developer test mode reading");
    info!("  POST /uv/postcode    - Look up UV index by postcode");
    info!("  POST /uv/location    - Look up UV index by coordinates");
    info!("  GET  /timer          - Countdown snapshot");
    info!("  POST /timer/{{start,pause,toggle,reset,duration,custom}}");
    info!("  GET  /timer/events   - Expiry event stream");
    info!("  GET  /status         - Current reading, timer and uptime");
    info!("  GET  /health         - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
