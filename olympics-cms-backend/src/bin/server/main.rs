use olympics_cms_backend::error::AppError;
use olympics_cms_backend::telemetry::setup_telemetry;
use olympics_cms_backend::{run_server, AppState};
use olympics_cms_config::get_config;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    setup_telemetry();

    let config = get_config()?;
    info!(
        "using store {} (project {})",
        config.store.endpoint, config.store.project_id
    );
    let state = AppState::from_config(&config)?;
    run_server(config.listen, state).await
}
