use std::sync::Arc;

use diabetes_risk_domain::health::SystemStatus;
use diabetes_risk_domain::testing::{MockHealthService, MockPredictionClient};

use super::support::{body_json, send, test_app, test_state};

#[tokio::test]
async fn test_health_ok_when_model_loaded() {
    let (state, _) = test_state(MockPredictionClient::new());
    let app = test_app(state);

    let response = send(&app, "GET", "/health", None).await;
    assert_eq!(response.status(), 200);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["components"]["api"]["status"], "ok");
    assert_eq!(body["components"]["scoring_service"]["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_error_when_scoring_unreachable() {
    let (state, _) = test_state(MockPredictionClient::new().unreachable());
    let app = test_app(state);

    let response = send(&app, "GET", "/health", None).await;
    assert_eq!(response.status(), 500);

    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["components"]["scoring_service"]["status"], "error");
    assert!(body["components"]["scoring_service"]["message"].is_string());
}

#[tokio::test]
async fn test_health_degraded_returns_service_unavailable() {
    let (mut state, _) = test_state(MockPredictionClient::new());
    state.health = Arc::new(MockHealthService::new().with_status(SystemStatus::Degraded));
    let app = test_app(state);

    let response = send(&app, "GET", "/health", None).await;
    assert_eq!(response.status(), 503);

    let body = body_json(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["components"]["scoring_service"]["status"], "degraded");
}
