//! Focus Board - A state-managed HTTP server for an interval timer board
//!
//! This is the main entry point for the focus-board application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use focus_board::{
    api::create_router,
    config::Config,
    state::AppState,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_board={},tower_http=info", config.log_level()))
        .init();

    info!("Starting focus-board server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}", config.host, config.port);

    let state = Arc::new(AppState::new(config.port, config.host.clone()));
    {
        let session = state.get_session().map_err(anyhow::Error::msg)?;
        info!(
            "Board ready: {} sections, {} timers",
            session.groups().len(),
            session.total_initial()
        );
    }

    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /board             - Current board");
    info!("  POST /timers/:id/start  - Start a timer");
    info!("  POST /reset             - Restore the initial board");
    info!("  GET  /status            - Active timer and totals");
    info!("  GET  /events            - Board updates (SSE)");
    info!("  GET  /health            - Health check");

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

    if let Err(e) = state.shutdown() {
        tracing::error!("Failed to stop countdown: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
