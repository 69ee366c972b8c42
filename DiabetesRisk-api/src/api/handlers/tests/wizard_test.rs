use std::time::Duration;

use serde_json::json;

use diabetes_risk_domain::services::PREDICTION_FAILED_MESSAGE;
use diabetes_risk_domain::testing::MockPredictionClient;

use super::support::{
    body_json, complete_assessment, fill_section, ready_for_submission, send, test_app, test_state,
};

#[tokio::test]
async fn test_list_fields() {
    let (state, _) = test_state(MockPredictionClient::new());
    let app = test_app(state);

    let response = send(&app, "GET", "/api/v1/fields", None).await;
    assert_eq!(response.status(), 200);

    let fields = body_json(response).await;
    let fields = fields.as_array().unwrap();
    assert_eq!(fields.len(), 17);

    let hba1c = fields.iter().find(|f| f["name"] == "HbA1c_level").unwrap();
    assert_eq!(hba1c["kind"], "decimal");
    assert_eq!(hba1c["min"], 3.0);
    assert_eq!(hba1c["max"], 10.0);
    assert_eq!(hba1c["section"], 1);
    assert_eq!(hba1c["required"], true);

    let gender = fields.iter().find(|f| f["name"] == "gender").unwrap();
    assert_eq!(gender["values"], json!(["M", "F"]));

    let hypertension = fields.iter().find(|f| f["name"] == "hypertension").unwrap();
    assert_eq!(hypertension["kind"], "flag");
    assert_eq!(hypertension["required"], false);
}

#[tokio::test]
async fn test_initial_state() {
    let (state, _) = test_state(MockPredictionClient::new());
    let app = test_app(state);

    let body = body_json(send(&app, "GET", "/api/v1/wizard", None).await).await;
    assert_eq!(body["current_section"], 0);
    assert_eq!(body["generation"], 0);
    assert_eq!(body["can_advance"], false);
    assert_eq!(body["can_submit"], false);
    assert_eq!(body["sections"].as_array().unwrap().len(), 3);
    assert_eq!(body["sections"][0]["missing"].as_array().unwrap().len(), 4);
    assert_eq!(body["sections"][1]["reached"], false);
    assert!(body.get("outcome").is_none());
}

#[tokio::test]
async fn test_advance_refused_until_section_complete() {
    let (state, _) = test_state(MockPredictionClient::new());
    let app = test_app(state);

    let body = body_json(send(&app, "POST", "/api/v1/wizard/advance", None).await).await;
    assert_eq!(body["transition"], "refused");
    assert_eq!(body["state"]["current_section"], 0);

    fill_section(&app, 0).await;
    let body = body_json(send(&app, "POST", "/api/v1/wizard/advance", None).await).await;
    assert_eq!(body["transition"], json!({ "moved": { "from": 0, "to": 1 } }));
    assert_eq!(body["state"]["current_section"], 1);
    assert_eq!(body["state"]["sections"][0]["complete"], true);
}

#[tokio::test]
async fn test_update_field_unknown_name() {
    let (state, _) = test_state(MockPredictionClient::new());
    let app = test_app(state);

    let response = send(&app, "PUT", "/api/v1/wizard/fields/weight", Some(json!({ "value": 80 }))).await;
    assert_eq!(response.status(), 404);

    let body = body_json(response).await;
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_update_field_out_of_range_clears() {
    let (state, _) = test_state(MockPredictionClient::new());
    let app = test_app(state);

    let body = body_json(send(&app, "PUT", "/api/v1/wizard/fields/age", Some(json!({ "value": "45" }))).await).await;
    assert_eq!(body["update"], "set");
    assert_eq!(body["state"]["profile"]["age"], 45);

    let body = body_json(send(&app, "PUT", "/api/v1/wizard/fields/age", Some(json!({ "value": 130 }))).await).await;
    assert_eq!(body["update"], "cleared");
    assert!(body["state"]["profile"]["age"].is_null());

    let body = body_json(send(&app, "PUT", "/api/v1/wizard/fields/bmi", Some(json!({ "value": null }))).await).await;
    assert_eq!(body["update"], "cleared");
}

#[tokio::test]
async fn test_flag_field_accepts_checkbox_state() {
    let (state, _) = test_state(MockPredictionClient::new());
    let app = test_app(state);

    let body = body_json(
        send(&app, "PUT", "/api/v1/wizard/fields/hypertension", Some(json!({ "value": true }))).await,
    )
    .await;
    assert_eq!(body["field"], "hypertension");
    assert_eq!(body["update"], "set");
}

#[tokio::test]
async fn test_jump_to_section() {
    let (state, _) = test_state(MockPredictionClient::new());
    let app = test_app(state);

    let body = body_json(send(&app, "POST", "/api/v1/wizard/sections/2", None).await).await;
    assert_eq!(body["transition"], "refused");

    let response = send(&app, "POST", "/api/v1/wizard/sections/5", None).await;
    assert_eq!(response.status(), 404);

    fill_section(&app, 0).await;
    send(&app, "POST", "/api/v1/wizard/advance", None).await;

    let body = body_json(send(&app, "POST", "/api/v1/wizard/sections/0", None).await).await;
    assert_eq!(body["transition"], json!({ "moved": { "from": 1, "to": 0 } }));
    assert_eq!(body["state"]["sections"][1]["reached"], true);

    let body = body_json(send(&app, "POST", "/api/v1/wizard/retreat", None).await).await;
    assert_eq!(body["transition"], "refused");
}

#[tokio::test]
async fn test_full_assessment_high_risk() {
    let (state, client) = test_state(MockPredictionClient::new().with_probability(0.72, 1));
    let app = test_app(state);

    let body = complete_assessment(&app).await;
    assert_eq!(body["transition"], "submission_requested");
    assert_eq!(body["submitted"], true);
    assert_eq!(client.call_count(), 1);

    let outcome = &body["state"]["outcome"];
    assert_eq!(outcome["risk_tier"], "High");
    assert_eq!(outcome["risk_label"], "High Risk");
    assert_eq!(outcome["probability_percent"], "72.0%");
    assert_eq!(outcome["color_class"], "text-red-600 bg-red-100");
    assert_eq!(outcome["prediction_label"], "At risk of diabetes");
    assert_eq!(outcome["recommendations"].as_array().unwrap().len(), 4);
    assert_eq!(body["state"]["submitting"], false);
}

#[tokio::test]
async fn test_low_risk_has_no_recommendations() {
    let (state, _) = test_state(MockPredictionClient::new().with_probability(0.12, 0));
    let app = test_app(state);

    let body = complete_assessment(&app).await;
    let outcome = &body["state"]["outcome"];
    assert_eq!(outcome["risk_tier"], "Low");
    assert_eq!(outcome["recommendations"], json!([]));
}

#[tokio::test]
async fn test_form_locked_after_outcome() {
    let (state, client) = test_state(MockPredictionClient::new().with_probability(0.45, 0));
    let app = test_app(state);
    complete_assessment(&app).await;

    let body = body_json(send(&app, "PUT", "/api/v1/wizard/fields/age", Some(json!({ "value": 50 }))).await).await;
    assert_eq!(body["update"], "ignored");
    assert_eq!(body["state"]["profile"]["age"], 45);

    let body = body_json(send(&app, "POST", "/api/v1/wizard/retreat", None).await).await;
    assert_eq!(body["transition"], "refused");

    let body = body_json(send(&app, "POST", "/api/v1/wizard/submit", None).await).await;
    assert_eq!(body["submitted"], false);
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn test_failed_submission_can_be_retried() {
    let (state, client) = test_state(MockPredictionClient::new().with_failure());
    let app = test_app(state);

    let body = complete_assessment(&app).await;
    assert_eq!(body["submitted"], true);
    assert_eq!(body["state"]["error"], PREDICTION_FAILED_MESSAGE);
    assert!(body["state"].get("outcome").is_none());
    assert_eq!(body["state"]["current_section"], 2);

    let body = body_json(send(&app, "POST", "/api/v1/wizard/submit", None).await).await;
    assert_eq!(body["submitted"], true);
    assert_eq!(client.call_count(), 2);
}

#[tokio::test]
async fn test_second_submit_refused_while_in_flight() {
    let (state, client) = test_state(
        MockPredictionClient::new()
            .with_probability(0.72, 1)
            .with_delay(Duration::from_millis(200)),
    );
    let app = test_app(state);
    ready_for_submission(&app).await;

    let first = tokio::spawn({
        let app = app.clone();
        async move { body_json(send(&app, "POST", "/api/v1/wizard/submit", None).await).await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    let body = body_json(send(&app, "POST", "/api/v1/wizard/submit", None).await).await;
    assert_eq!(body["submitted"], false);
    assert_eq!(body["transition"], "refused");
    assert_eq!(body["state"]["submitting"], true);
    assert_eq!(client.call_count(), 1);

    let body = first.await.unwrap();
    assert_eq!(body["submitted"], true);
    assert_eq!(body["state"]["outcome"]["risk_tier"], "High");
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn test_reset_starts_new_assessment() {
    let (state, _) = test_state(MockPredictionClient::new().with_probability(0.72, 1));
    let app = test_app(state);
    complete_assessment(&app).await;

    let body = body_json(send(&app, "POST", "/api/v1/wizard/reset", None).await).await;
    assert_eq!(body["generation"], 1);
    assert_eq!(body["current_section"], 0);
    assert!(body.get("outcome").is_none());
    assert!(body["profile"]["age"].is_null());
    assert_eq!(body["profile"]["hypertension"], false);
}
