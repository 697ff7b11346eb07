//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: all HTTP endpoints, the shared error envelope, and the
//! session cookie security scheme. The generated specification backs
//! Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{ApplicationStatus, DashboardSummary, DomainError, ErrorCode, Role};
use crate::inbound::http::applications::{
    ApplicationRequest, ApplicationResponse, DashboardApplicationResponse, DashboardResponse,
};
use crate::inbound::http::auth::{CurrentUserResponse, LoginRequest, LogoutResponse};
use crate::inbound::http::catalogue::VisaTypeResponse;
use crate::inbound::http::error::ApiError;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Visa intake backend API",
        description = "HTTP interface for the visa application intake portal."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::me,
        crate::inbound::http::auth::logout,
        crate::inbound::http::catalogue::list_visa_types,
        crate::inbound::http::applications::list_applications,
        crate::inbound::http::applications::submit_application,
        crate::inbound::http::applications::dashboard,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ApiError,
        DomainError,
        ErrorCode,
        Role,
        ApplicationStatus,
        LoginRequest,
        LogoutResponse,
        CurrentUserResponse,
        VisaTypeResponse,
        ApplicationRequest,
        ApplicationResponse,
        DashboardApplicationResponse,
        DashboardResponse,
        DashboardSummary,
    )),
    tags(
        (name = "auth", description = "Session establishment and identity"),
        (name = "visa", description = "Catalogue and application intake"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use utoipa::OpenApi;

    use super::*;

    #[test]
    fn document_includes_every_operation() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/api/v1/auth/login",
            "/api/v1/auth/me",
            "/api/v1/auth/logout",
            "/api/v1/visa/types",
            "/api/v1/visa/applications",
            "/api/v1/visa/dashboard",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.contains_key(path), "missing path {path}");
        }
    }
}
