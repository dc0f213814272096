// ============================================================================
// framegrab-server/src/server/mod.rs
// ============================================================================
//
// HTTP SERVICE: Routing and Listener
//
// KEY COMPONENTS:
// - router(): the axum Router with every route and the shared state
// - serve(): binds the listener and runs until Ctrl-C
//
// AI-ASSISTANT-INFO: axum router and server loop

pub mod handlers;
pub mod state;

pub use state::AppState;

use axum::Router;
use axum::routing::{get, post};
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Path of the frame extraction endpoint
pub const EXTRACT_FRAMES_PATH: &str = "/image/extract-frames-m3u8";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route(EXTRACT_FRAMES_PATH, post(handlers::extract_frames))
        .with_state(state)
}

/// Serves the router on `addr` until the process receives Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Cannot listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received, finishing in-flight requests");
}
