use axum::Json;
use tracing::{debug, instrument};

use diabetes_risk_domain::entities::ProfileField;

use crate::entities::fields::FieldInfo;

/// List every form field with its type, range or values, and section
#[utoipa::path(
    get,
    path = "/api/v1/fields",
    responses(
        (status = 200, description = "Field metadata", body = [FieldInfo])
    ),
    tag = "wizard"
)]
#[instrument]
pub async fn list_fields() -> Json<Vec<FieldInfo>> {
    debug!("Listing {} fields", ProfileField::ALL.len());
    Json(ProfileField::ALL.iter().copied().map(FieldInfo::from).collect())
}
