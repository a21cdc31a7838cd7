//! Process entrypoint: load configuration, initialize tracing, bind, and
//! serve the control plane router (§4.8, §6).

use abaco_control_plane::config::AppConfig;
use abaco_control_plane::http::state::AppState;
use abaco_control_plane::{error::AppError, http};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(config.log_filter.clone()))
        .init();

    let bind_addr = config.bind_addr;
    let app_state = AppState::new_in_memory(config);
    let router = http::router(app_state);

    tracing::info!(%bind_addr, "starting abaco control plane");
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|e| AppError::Internal(format!("failed to bind {bind_addr}: {e}")))?;

    axum::serve(listener, router)
        .await
        .map_err(|e| AppError::Internal(format!("server error: {e}")))
}
