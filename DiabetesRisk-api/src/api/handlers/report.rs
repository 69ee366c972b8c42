use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info, instrument};

use diabetes_risk_domain::services::{export, AssessmentReport};

use crate::api::state::AppState;
use crate::entities::common::ErrorResponse;
use crate::entities::wizard::{ExportResponse, ReportQuery};

/// Build the report for the outcome currently shown, if any
async fn current_report(state: &AppState) -> Result<AssessmentReport, ErrorResponse> {
    let wizard = state.wizard.lock().await;
    let outcome = wizard.outcome().ok_or_else(|| ErrorResponse::not_found("assessment result"))?;
    Ok(export(outcome, wizard.profile()))
}

/// Download the assessment report
#[utoipa::path(
    get,
    path = "/api/v1/wizard/report",
    params(ReportQuery),
    responses(
        (status = 200, description = "Report document, PDF or plain text"),
        (status = 404, description = "No assessment result yet", body = ErrorResponse)
    ),
    tag = "report"
)]
#[instrument(skip(state))]
pub async fn download_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, ErrorResponse> {
    let format = query.format.unwrap_or_default();
    let report = current_report(&state).await?;

    let bytes = format.render(&report).map_err(|e| {
        error!("Failed to render report: {}", e);
        ErrorResponse::internal_error()
    })?;

    let content_type = format
        .content_type()
        .parse::<mime::Mime>()
        .unwrap_or(mime::APPLICATION_OCTET_STREAM);
    let disposition = format!("attachment; filename=\"{}\"", format.file_name());
    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// Write the assessment report into the export directory
///
/// Only one report is kept; a new export replaces the previous file.
#[utoipa::path(
    post,
    path = "/api/v1/wizard/report/export",
    params(ReportQuery),
    responses(
        (status = 200, description = "Report written", body = ExportResponse),
        (status = 404, description = "No assessment result yet", body = ErrorResponse),
        (status = 500, description = "Report could not be written", body = ErrorResponse)
    ),
    tag = "report"
)]
#[instrument(skip(state))]
pub async fn export_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ExportResponse>, ErrorResponse> {
    let format = query.format.unwrap_or_default();
    let report = current_report(&state).await?;

    let bytes = format.render(&report).map_err(|e| {
        error!("Failed to render report: {}", e);
        ErrorResponse::internal_error()
    })?;

    let path = state.store.save(format.file_name(), &bytes).await.map_err(|e| {
        error!("Failed to export report: {}", e);
        ErrorResponse::internal_error()
    })?;

    info!("Report {} exported", report.id);
    Ok(Json(ExportResponse {
        file_name: format.file_name().to_string(),
        path: path.display().to_string(),
        bytes: bytes.len(),
    }))
}
