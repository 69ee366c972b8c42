use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
};
use tracing::{debug, info, instrument};

use diabetes_risk_domain::entities::{ProfileField, WizardSection};
use diabetes_risk_domain::services::{RawInput, Transition};

use crate::api::state::AppState;
use crate::entities::common::ErrorResponse;
use crate::entities::wizard::{FieldInputRequest, FieldInputResponse, TransitionResponse, WizardStateResponse};

/// Current wizard state
#[utoipa::path(
    get,
    path = "/api/v1/wizard",
    responses(
        (status = 200, description = "Current wizard state", body = WizardStateResponse)
    ),
    tag = "wizard"
)]
#[instrument(skip(state))]
pub async fn get_wizard(State(state): State<AppState>) -> Json<WizardStateResponse> {
    let wizard = state.wizard.lock().await;
    Json(WizardStateResponse::from(&*wizard))
}

/// Send a raw input event for one field
#[utoipa::path(
    put,
    path = "/api/v1/wizard/fields/{name}",
    params(
        ("name" = String, Path, description = "Wire name of the field, e.g. `age` or `HbA1c_level`")
    ),
    request_body = FieldInputRequest,
    responses(
        (status = 200, description = "Edit processed", body = FieldInputResponse),
        (status = 404, description = "Unknown field", body = ErrorResponse)
    ),
    tag = "wizard"
)]
#[instrument(skip(state, request))]
pub async fn update_field(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<FieldInputRequest>,
) -> Result<Json<FieldInputResponse>, ErrorResponse> {
    let field = ProfileField::from_name(&name).ok_or_else(|| ErrorResponse::not_found("field"))?;
    let raw = request.value.unwrap_or_else(|| RawInput::Text(String::new()));

    let mut wizard = state.wizard.lock().await;
    let update = wizard.set_field(field, &raw);
    debug!("Field {} update: {:?}", field, update);

    Ok(Json(FieldInputResponse {
        field: field.name().to_string(),
        update,
        state: WizardStateResponse::from(&*wizard),
    }))
}

/// Advance to the next section; on the last section this submits
#[utoipa::path(
    post,
    path = "/api/v1/wizard/advance",
    responses(
        (status = 200, description = "Transition result and new state", body = TransitionResponse)
    ),
    tag = "wizard"
)]
#[instrument(skip(state))]
pub async fn advance(State(state): State<AppState>) -> Json<TransitionResponse> {
    let transition = state.wizard.lock().await.advance();

    let submitted = match transition {
        Transition::SubmissionRequested => state.submit().await,
        _ => false,
    };

    Json(respond(&state, transition, submitted).await)
}

/// Go back one section
#[utoipa::path(
    post,
    path = "/api/v1/wizard/retreat",
    responses(
        (status = 200, description = "Transition result and new state", body = TransitionResponse)
    ),
    tag = "wizard"
)]
#[instrument(skip(state))]
pub async fn retreat(State(state): State<AppState>) -> Json<TransitionResponse> {
    let transition = state.wizard.lock().await.retreat();
    Json(respond(&state, transition, false).await)
}

/// Jump to a section already reached
#[utoipa::path(
    post,
    path = "/api/v1/wizard/sections/{index}",
    params(
        ("index" = usize, Path, description = "Zero-based section index")
    ),
    responses(
        (status = 200, description = "Transition result and new state", body = TransitionResponse),
        (status = 404, description = "No such section", body = ErrorResponse)
    ),
    tag = "wizard"
)]
#[instrument(skip(state))]
pub async fn jump_to_section(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<TransitionResponse>, ErrorResponse> {
    if WizardSection::from_index(index).is_none() {
        return Err(ErrorResponse::not_found("section"));
    }

    let transition = state.wizard.lock().await.jump_to(index);
    Ok(Json(respond(&state, transition, false).await))
}

/// Submit the completed profile for scoring
#[utoipa::path(
    post,
    path = "/api/v1/wizard/submit",
    responses(
        (status = 200, description = "Submission result and new state", body = TransitionResponse)
    ),
    tag = "wizard"
)]
#[instrument(skip(state))]
pub async fn submit(State(state): State<AppState>) -> Json<TransitionResponse> {
    let submitted = state.submit().await;
    let transition = if submitted {
        Transition::SubmissionRequested
    } else {
        Transition::Refused
    };
    Json(respond(&state, transition, submitted).await)
}

/// Discard the current assessment and start over
#[utoipa::path(
    post,
    path = "/api/v1/wizard/reset",
    responses(
        (status = 200, description = "Fresh wizard state", body = WizardStateResponse)
    ),
    tag = "wizard"
)]
#[instrument(skip(state))]
pub async fn reset(State(state): State<AppState>) -> impl IntoResponse {
    let mut wizard = state.wizard.lock().await;
    wizard.reset();
    info!("Assessment reset");
    Json(WizardStateResponse::from(&*wizard))
}

async fn respond(state: &AppState, transition: Transition, submitted: bool) -> TransitionResponse {
    let wizard = state.wizard.lock().await;
    TransitionResponse {
        transition,
        submitted,
        state: WizardStateResponse::from(&*wizard),
    }
}
