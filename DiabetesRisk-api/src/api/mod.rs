pub mod handlers;
pub mod routes;
pub mod state;

use axum::Router;

use crate::config::AppConfig;
use diabetes_risk_data::client::ClientError;

/// Create the application router for a running server
pub fn create_application(config: &AppConfig) -> Result<Router, ClientError> {
    let state = state::AppState::from_config(config)?;
    handlers::health::initialize_server_start_time();
    Ok(routes::create_app(state, &config.allowed_origins))
}
