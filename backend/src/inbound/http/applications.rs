//! Application submission and tracking endpoints (protected tier).
//!
//! ```text
//! GET  /api/v1/visa/applications
//! POST /api/v1/visa/applications
//! GET  /api/v1/visa/dashboard?locale=ar
//! ```
//!
//! Every handler derives the user id from the session; the owning user of a
//! stored application can never be supplied by the caller.

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::ApplicationRepositoryError;
use crate::domain::{
    ApplicationStatus, ApplicationSubmission, DashboardSummary, DomainError, Locale,
    SubmissionDraft, SubmissionValidationError, VisaApplication, VisaTypeId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Submission payload for `POST /api/v1/visa/applications`.
///
/// Required fields default to empty strings so presence validation happens in
/// the domain and reports every offending field at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    /// Selected catalogue entry.
    #[serde(default)]
    pub visa_type_id: Option<i32>,
    /// Applicant's full name.
    #[serde(default)]
    pub full_name: String,
    /// Applicant's contact email.
    #[serde(default)]
    pub email: String,
    /// Applicant's contact phone.
    #[serde(default)]
    pub phone: String,
    /// Passport number.
    #[serde(default)]
    pub passport_number: String,
    /// Applicant's nationality.
    #[serde(default)]
    pub nationality: String,
    /// Optional intended travel date.
    #[serde(default)]
    pub travel_date: Option<DateTime<Utc>>,
    /// Optional free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<ApplicationRequest> for SubmissionDraft {
    fn from(value: ApplicationRequest) -> Self {
        Self {
            visa_type_id: value.visa_type_id.map(VisaTypeId::new),
            full_name: value.full_name,
            email: value.email,
            phone: value.phone,
            passport_number: value.passport_number,
            nationality: value.nationality,
            travel_date: value.travel_date,
            notes: value.notes,
        }
    }
}

/// Wire shape of a stored application.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    /// Server-generated identifier.
    pub id: i32,
    /// Owning user id.
    pub user_id: i32,
    /// Referenced catalogue entry.
    pub visa_type_id: i32,
    /// Lifecycle state.
    #[schema(example = "pending")]
    pub status: ApplicationStatus,
    /// Applicant's full name as submitted.
    pub full_name: String,
    /// Contact email as submitted.
    pub email: String,
    /// Contact phone as submitted.
    pub phone: String,
    /// Passport number as submitted.
    pub passport_number: String,
    /// Nationality as submitted.
    pub nationality: String,
    /// Intended travel date, if given.
    pub travel_date: Option<DateTime<Utc>>,
    /// Stored document references.
    pub documents: Vec<String>,
    /// Free-text notes, if given.
    pub notes: Option<String>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<VisaApplication> for ApplicationResponse {
    fn from(application: VisaApplication) -> Self {
        Self {
            id: application.id.as_i32(),
            user_id: application.user_id.as_i32(),
            visa_type_id: application.visa_type_id.as_i32(),
            status: application.status,
            full_name: application.applicant.full_name,
            email: application.applicant.email,
            phone: application.applicant.phone,
            passport_number: application.applicant.passport_number,
            nationality: application.applicant.nationality,
            travel_date: application.travel_date,
            documents: application.documents,
            notes: application.notes,
            created_at: application.created_at,
            updated_at: application.updated_at,
        }
    }
}

/// Application row enriched with a localized status label for the dashboard
/// table.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardApplicationResponse {
    /// The stored application.
    #[serde(flatten)]
    pub application: ApplicationResponse,
    /// Status label in the requested locale.
    #[schema(example = "قيد الانتظار")]
    pub status_label: String,
}

/// Response body for `GET /api/v1/visa/dashboard`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// The caller's applications, newest first.
    pub applications: Vec<DashboardApplicationResponse>,
    /// Counters derived from the listed applications.
    pub summary: DashboardSummary,
}

/// Query parameters for the dashboard read.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DashboardQuery {
    /// Label locale; Arabic when omitted.
    #[serde(default)]
    pub locale: Locale,
}

pub(crate) fn map_application_repository_error(error: ApplicationRepositoryError) -> DomainError {
    match error {
        ApplicationRepositoryError::Connection { message } => {
            DomainError::service_unavailable(message)
        }
        ApplicationRepositoryError::Query { message } => DomainError::internal(message),
        ApplicationRepositoryError::UnknownVisaType { .. } => {
            DomainError::not_found("visa type not found")
        }
    }
}

fn map_submission_error(error: SubmissionValidationError) -> DomainError {
    let missing: Vec<&str> = error.missing.iter().map(|f| f.as_str()).collect();
    let invalid: Vec<&str> = error.invalid.iter().map(|f| f.as_str()).collect();
    DomainError::invalid_request("submission has missing or invalid fields")
        .with_details(json!({ "missing": missing, "invalid": invalid }))
}

/// List the caller's applications, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/visa/applications",
    responses(
        (status = 200, description = "The caller's applications", body = [ApplicationResponse]),
        (status = 401, description = "No session", body = ApiError),
        (status = 503, description = "Store unavailable", body = ApiError)
    ),
    tags = ["visa"],
    operation_id = "listApplications"
)]
#[get("/visa/applications")]
pub async fn list_applications(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ApplicationResponse>>> {
    let user_id = session.require_user_id()?;
    let applications = state
        .applications
        .list_for_user(user_id)
        .await
        .map_err(map_application_repository_error)?;
    Ok(web::Json(applications.into_iter().map(Into::into).collect()))
}

/// Submit a new application for the authenticated caller.
#[utoipa::path(
    post,
    path = "/api/v1/visa/applications",
    request_body = ApplicationRequest,
    responses(
        (status = 201, description = "Application created", body = ApplicationResponse),
        (status = 400, description = "Missing or invalid fields", body = ApiError),
        (status = 401, description = "No session", body = ApiError),
        (status = 404, description = "Unknown visa type", body = ApiError),
        (status = 503, description = "Store unavailable", body = ApiError)
    ),
    tags = ["visa"],
    operation_id = "submitApplication"
)]
#[post("/visa/applications")]
pub async fn submit_application(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ApplicationRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let submission = ApplicationSubmission::new(payload.into_inner().into())
        .map_err(map_submission_error)?;
    let created = state
        .applications
        .create(user_id, &submission)
        .await
        .map_err(map_application_repository_error)?;
    Ok(HttpResponse::Created().json(ApplicationResponse::from(created)))
}

/// Fetch the caller's applications together with derived counters.
#[utoipa::path(
    get,
    path = "/api/v1/visa/dashboard",
    params(
        ("locale" = Option<String>, Query, description = "Label locale, `ar` (default) or `en`")
    ),
    responses(
        (status = 200, description = "Applications and counters", body = DashboardResponse),
        (status = 401, description = "No session", body = ApiError),
        (status = 503, description = "Store unavailable", body = ApiError)
    ),
    tags = ["visa"],
    operation_id = "dashboard"
)]
#[get("/visa/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<DashboardQuery>,
) -> ApiResult<web::Json<DashboardResponse>> {
    let user_id = session.require_user_id()?;
    let applications = state
        .applications
        .list_for_user(user_id)
        .await
        .map_err(map_application_repository_error)?;
    let summary = DashboardSummary::summarize(&applications);
    let locale = query.locale;
    let applications = applications
        .into_iter()
        .map(|application| {
            let status_label = application.status.label(locale).to_owned();
            DashboardApplicationResponse {
                application: application.into(),
                status_label,
            }
        })
        .collect();
    Ok(web::Json(DashboardResponse {
        applications,
        summary,
    }))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::MockApplicationRepository;
    use crate::domain::{ApplicantDetails, ApplicationId, UserId};
    use crate::inbound::http::auth::{LoginRequest, login};

    fn app_with_state(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .service(
                web::scope("/api/v1")
                    .service(login)
                    .service(list_applications)
                    .service(submit_application)
                    .service(dashboard),
            )
    }

    async fn signed_in_cookie<S>(app: &S, open_id: &str) -> actix_web::cookie::Cookie<'static>
    where
        S: actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse,
                Error = actix_web::Error,
            >,
    {
        let res = test::call_service(
            app,
            test::TestRequest::post()
                .uri("/api/v1/auth/login")
                .set_json(LoginRequest {
                    open_id: open_id.to_owned(),
                    name: Some("Ali Hassan".to_owned()),
                    email: None,
                    login_method: None,
                })
                .to_request(),
        )
        .await;
        assert!(res.status().is_success());
        res.response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie")
            .into_owned()
    }

    fn complete_request() -> ApplicationRequest {
        ApplicationRequest {
            visa_type_id: Some(1),
            full_name: "Ali Hassan".to_owned(),
            email: "ali@x.com".to_owned(),
            phone: "+966512345678".to_owned(),
            passport_number: "A1234567".to_owned(),
            nationality: "Saudi".to_owned(),
            travel_date: None,
            notes: None,
        }
    }

    fn stored_application(id: i32, user: i32, status: ApplicationStatus) -> VisaApplication {
        VisaApplication {
            id: ApplicationId::new(id),
            user_id: UserId::new(user),
            visa_type_id: VisaTypeId::new(1),
            status,
            applicant: ApplicantDetails {
                full_name: "Ali Hassan".to_owned(),
                email: "ali@x.com".to_owned(),
                phone: "+966512345678".to_owned(),
                passport_number: "A1234567".to_owned(),
                nationality: "Saudi".to_owned(),
            },
            travel_date: None,
            documents: Vec::new(),
            notes: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[actix_web::test]
    async fn protected_routes_reject_missing_sessions_before_any_store_access() {
        let mut applications = MockApplicationRepository::new();
        applications.expect_list_for_user().never();
        applications.expect_create().never();
        let state = HttpState {
            applications: Arc::new(applications),
            ..HttpState::fixtures().expect("fixture state")
        };
        let app = test::init_service(app_with_state(state)).await;

        for request in [
            test::TestRequest::get().uri("/api/v1/visa/applications"),
            test::TestRequest::get().uri("/api/v1/visa/dashboard"),
            test::TestRequest::post()
                .uri("/api/v1/visa/applications")
                .set_json(complete_request()),
        ] {
            let res = test::call_service(&app, request.to_request()).await;
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[actix_web::test]
    async fn submission_round_trips_the_applicant_snapshot() {
        let app = test::init_service(app_with_state(
            HttpState::fixtures().expect("fixture state"),
        ))
        .await;
        let cookie = signed_in_cookie(&app, "manus-ali").await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/visa/applications")
                .cookie(cookie.clone())
                .set_json(complete_request())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(res).await;
        assert_eq!(created.get("status").and_then(Value::as_str), Some("pending"));
        assert_eq!(
            created.get("fullName").and_then(Value::as_str),
            Some("Ali Hassan")
        );
        assert_eq!(
            created.get("passportNumber").and_then(Value::as_str),
            Some("A1234567")
        );

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/visa/applications")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let listed: Value = test::read_body_json(res).await;
        let rows = listed.as_array().expect("array body");
        assert_eq!(rows.len(), 1);
        let row = rows.first().expect("one row");
        assert_eq!(
            row.get("nationality").and_then(Value::as_str),
            Some("Saudi")
        );
        assert_eq!(row.get("userId"), created.get("userId"));
    }

    #[actix_web::test]
    async fn submission_enumerates_every_missing_field() {
        let app = test::init_service(app_with_state(
            HttpState::fixtures().expect("fixture state"),
        ))
        .await;
        let cookie = signed_in_cookie(&app, "manus-ali").await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/visa/applications")
                .cookie(cookie.clone())
                .set_json(ApplicationRequest::default())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body.get("code").and_then(Value::as_str),
            Some("invalid_request")
        );
        let missing = body
            .get("details")
            .and_then(|d| d.get("missing"))
            .and_then(Value::as_array)
            .expect("missing field list");
        let missing: Vec<&str> = missing.iter().filter_map(Value::as_str).collect();
        assert_eq!(
            missing,
            vec![
                "fullName",
                "email",
                "phone",
                "passportNumber",
                "nationality",
                "visaType"
            ]
        );

        // Nothing was persisted for the caller.
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/visa/applications")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let listed: Value = test::read_body_json(res).await;
        assert_eq!(listed.as_array().map(Vec::len), Some(0));
    }

    #[actix_web::test]
    async fn unknown_visa_type_maps_to_not_found() {
        let mut applications = MockApplicationRepository::new();
        applications.expect_create().return_once(|_, _| {
            Err(ApplicationRepositoryError::unknown_visa_type(
                "visa_applications_visa_type_id_fkey",
            ))
        });
        let state = HttpState {
            applications: Arc::new(applications),
            ..HttpState::fixtures().expect("fixture state")
        };
        let app = test::init_service(app_with_state(state)).await;
        let cookie = signed_in_cookie(&app, "manus-ali").await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/visa/applications")
                .cookie(cookie)
                .set_json(complete_request())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn dashboard_counts_a_known_distribution_with_arabic_labels() {
        let mut applications = MockApplicationRepository::new();
        applications.expect_list_for_user().returning(|user_id| {
            Ok(vec![
                stored_application(5, user_id.as_i32(), ApplicationStatus::Completed),
                stored_application(4, user_id.as_i32(), ApplicationStatus::Approved),
                stored_application(3, user_id.as_i32(), ApplicationStatus::Pending),
                stored_application(2, user_id.as_i32(), ApplicationStatus::Pending),
                stored_application(1, user_id.as_i32(), ApplicationStatus::Pending),
            ])
        });
        let state = HttpState {
            applications: Arc::new(applications),
            ..HttpState::fixtures().expect("fixture state")
        };
        let app = test::init_service(app_with_state(state)).await;
        let cookie = signed_in_cookie(&app, "manus-ali").await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/visa/dashboard")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        let summary = body.get("summary").expect("summary");
        assert_eq!(summary.get("total").and_then(Value::as_u64), Some(5));
        assert_eq!(summary.get("pending").and_then(Value::as_u64), Some(3));
        assert_eq!(summary.get("approved").and_then(Value::as_u64), Some(1));
        assert_eq!(summary.get("completed").and_then(Value::as_u64), Some(1));

        let rows = body
            .get("applications")
            .and_then(Value::as_array)
            .expect("application rows");
        let first = rows.first().expect("newest row");
        assert_eq!(
            first.get("statusLabel").and_then(Value::as_str),
            Some("مكتمل")
        );
        let pending_labels = rows
            .iter()
            .filter(|row| row.get("status").and_then(Value::as_str) == Some("pending"))
            .filter_map(|row| row.get("statusLabel").and_then(Value::as_str))
            .collect::<Vec<_>>();
        assert_eq!(
            pending_labels,
            vec!["قيد الانتظار", "قيد الانتظار", "قيد الانتظار"]
        );
    }

    #[actix_web::test]
    async fn dashboard_supports_english_labels() {
        let mut applications = MockApplicationRepository::new();
        applications.expect_list_for_user().returning(|user_id| {
            Ok(vec![stored_application(
                1,
                user_id.as_i32(),
                ApplicationStatus::Pending,
            )])
        });
        let state = HttpState {
            applications: Arc::new(applications),
            ..HttpState::fixtures().expect("fixture state")
        };
        let app = test::init_service(app_with_state(state)).await;
        let cookie = signed_in_cookie(&app, "manus-ali").await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/visa/dashboard?locale=en")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(res).await;
        let rows = body
            .get("applications")
            .and_then(Value::as_array)
            .expect("application rows");
        assert_eq!(
            rows.first()
                .and_then(|row| row.get("statusLabel"))
                .and_then(Value::as_str),
            Some("Pending")
        );
    }
}
