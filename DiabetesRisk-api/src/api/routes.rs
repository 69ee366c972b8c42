use axum::{
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowHeaders, CorsLayer},
    trace::TraceLayer,
};
use tracing::debug;

use crate::api::handlers::{fields, health, report, wizard};
use crate::api::state::AppState;
use crate::openapi::configure_swagger_routes;

/// Create the application router
pub fn create_app(state: AppState, allowed_origins: &[HeaderValue]) -> Router {
    debug!("Creating application router");

    // Define specific routes before parametrized routes to avoid conflicts
    let api_routes = Router::new()
        .route("/fields", get(fields::list_fields))
        .route("/wizard", get(wizard::get_wizard))
        .route("/wizard/fields/:name", put(wizard::update_field))
        .route("/wizard/advance", post(wizard::advance))
        .route("/wizard/retreat", post(wizard::retreat))
        .route("/wizard/sections/:index", post(wizard::jump_to_section))
        .route("/wizard/submit", post(wizard::submit))
        .route("/wizard/reset", post(wizard::reset))
        .route("/wizard/report", get(report::download_report))
        .route("/wizard/report/export", post(report::export_report));

    debug!("API routes configured");

    let app = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_routes)
        .with_state(state);

    // Configure the Swagger UI using the helper function
    let app = add_swagger_ui(app);
    debug!("Swagger UI merged");

    app.layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// CORS for the browser front end
///
/// No credentials: tower-http panics when they are combined with wildcard headers.
fn cors_layer(allowed_origins: &[HeaderValue]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origins.to_vec())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(AllowHeaders::any())
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    app.merge(configure_swagger_routes())
}
