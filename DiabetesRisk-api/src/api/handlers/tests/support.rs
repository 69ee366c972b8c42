//! Shared helpers for the handler tests

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{HeaderValue, Request},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use diabetes_risk_data::export::ReportStore;
use diabetes_risk_domain::services::PredictionClientTrait;
use diabetes_risk_domain::testing::MockPredictionClient;

use crate::api::routes::create_app;
use crate::api::state::AppState;

/// Unique scratch directory for report exports
pub fn export_dir() -> PathBuf {
    std::env::temp_dir().join(format!("diabetes-risk-api-test-{}", uuid::Uuid::new_v4()))
}

pub fn test_state(client: MockPredictionClient) -> (AppState, Arc<MockPredictionClient>) {
    let client = Arc::new(client);
    let shared: Arc<dyn PredictionClientTrait> = client.clone();
    (AppState::new(shared, ReportStore::new(export_dir())), client)
}

pub fn test_app(state: AppState) -> Router {
    create_app(state, &[HeaderValue::from_static("http://localhost:5174")])
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Valid raw inputs for every required field, grouped by section
pub fn section_inputs(section: usize) -> Vec<(&'static str, Value)> {
    use serde_json::json;
    match section {
        0 => vec![
            ("age", json!(45)),
            ("gender", json!("M")),
            ("bmi", json!("27.5")),
            ("obesity_status", json!("Overweight")),
        ],
        1 => vec![
            ("HbA1c_level", json!(6.1)),
            ("blood_glucose_level", json!("140")),
            ("hdl_cholesterol", json!(45)),
            ("triglycerides", json!(160)),
        ],
        _ => vec![
            ("sleep_hours", json!(6.5)),
            ("smoking_history", json!("never")),
            ("dietary_habits", json!("Mixed")),
            ("alcohol_use", json!("None")),
        ],
    }
}

pub async fn fill_section(app: &Router, section: usize) {
    for (name, value) in section_inputs(section) {
        let response = send(
            app,
            "PUT",
            &format!("/api/v1/wizard/fields/{}", name),
            Some(serde_json::json!({ "value": value })),
        )
        .await;
        assert_eq!(response.status(), 200, "field {} was not accepted", name);
    }
}

/// Fill every section and stop on the last one without submitting
pub async fn ready_for_submission(app: &Router) {
    for section in 0..2 {
        fill_section(app, section).await;
        let body = body_json(send(app, "POST", "/api/v1/wizard/advance", None).await).await;
        assert_eq!(body["transition"]["moved"]["to"], section + 1);
    }
    fill_section(app, 2).await;
}

/// Fill and advance through all sections; the last advance submits
pub async fn complete_assessment(app: &Router) -> Value {
    let mut last = Value::Null;
    for section in 0..3 {
        fill_section(app, section).await;
        last = body_json(send(app, "POST", "/api/v1/wizard/advance", None).await).await;
    }
    last
}
