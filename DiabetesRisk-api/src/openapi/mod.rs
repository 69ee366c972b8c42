use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Field metadata
        crate::api::handlers::fields::list_fields,

        // Wizard endpoints
        crate::api::handlers::wizard::get_wizard,
        crate::api::handlers::wizard::update_field,
        crate::api::handlers::wizard::advance,
        crate::api::handlers::wizard::retreat,
        crate::api::handlers::wizard::jump_to_section,
        crate::api::handlers::wizard::submit,
        crate::api::handlers::wizard::reset,

        // Report endpoints
        crate::api::handlers::report::download_report,
        crate::api::handlers::report::export_report
    ),
    components(
        schemas(
            // Entities
            crate::entities::common::ErrorResponse,
            crate::entities::fields::FieldInfo,
            crate::entities::wizard::SectionView,
            crate::entities::wizard::OutcomeView,
            crate::entities::wizard::WizardStateResponse,
            crate::entities::wizard::FieldInputRequest,
            crate::entities::wizard::FieldInputResponse,
            crate::entities::wizard::TransitionResponse,
            crate::entities::wizard::ExportResponse,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus,

            // Domain schemas
            diabetes_risk_domain::entities::HealthProfile,
            diabetes_risk_domain::entities::Gender,
            diabetes_risk_domain::entities::ObesityStatus,
            diabetes_risk_domain::entities::SmokingHistory,
            diabetes_risk_domain::entities::DietaryHabits,
            diabetes_risk_domain::entities::AlcoholUse,
            diabetes_risk_domain::entities::ProfileField,
            diabetes_risk_domain::entities::WizardSection,
            diabetes_risk_domain::entities::PredictedClass,
            diabetes_risk_domain::entities::RiskTier,
            diabetes_risk_domain::services::RawInput,
            diabetes_risk_domain::services::FieldUpdate,
            diabetes_risk_domain::services::Transition,
            diabetes_risk_domain::services::ReportFormat
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "wizard", description = "Multi-step assessment form"),
        (name = "report", description = "Assessment report download and export")
    ),
    info(
        title = "Diabetes Risk API",
        version = "0.1.0",
        description = "Guided diabetes risk assessment backed by a remote scoring service",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_doc_generation() {
        let openapi = ApiDoc::openapi();

        assert_eq!(openapi.info.title, "Diabetes Risk API");
        assert_eq!(openapi.info.version, "0.1.0");

        let tags = openapi.tags.as_ref().expect("tags should be defined");
        assert!(tags.iter().any(|tag| tag.name == "wizard"));
        assert!(tags.iter().any(|tag| tag.name == "report"));

        let paths = &openapi.paths.paths;
        for path in [
            "/health",
            "/api/v1/fields",
            "/api/v1/wizard",
            "/api/v1/wizard/fields/{name}",
            "/api/v1/wizard/advance",
            "/api/v1/wizard/retreat",
            "/api/v1/wizard/sections/{index}",
            "/api/v1/wizard/submit",
            "/api/v1/wizard/reset",
            "/api/v1/wizard/report",
            "/api/v1/wizard/report/export",
        ] {
            assert!(paths.contains_key(path), "missing path {}", path);
        }
    }

    #[test]
    fn test_schemas_registered() {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.expect("components should be defined");

        assert!(components.schemas.contains_key("WizardStateResponse"));
        assert!(components.schemas.contains_key("HealthProfile"));
        assert!(components.schemas.contains_key("RiskTier"));
    }
}
