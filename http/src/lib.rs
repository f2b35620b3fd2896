use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;

pub mod delivery;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;
pub mod template;

pub use delivery::deliver_video;
pub use error::{error_mapper, HttpError};
pub use extract::ValidatedJson;
pub use handlers::*;
pub use state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit_form))
        .route("/api", post(generate_video_api))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Binds `bind_addr` and serves until ctrl-c.
pub async fn run_server(router: Router, bind_addr: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("bind failed on {bind_addr}"))?;
    tracing::info!(address = %bind_addr, "http server listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")
}

pub async fn create_app_routes(state: AppState, bind_addr: &str) -> anyhow::Result<()> {
    run_server(build_router(state), bind_addr).await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
