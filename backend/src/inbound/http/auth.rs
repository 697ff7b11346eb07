//! Authentication endpoints.
//!
//! ```text
//! POST /api/v1/auth/login {"openId":"manus-7f3a","name":"Ali"}
//! GET  /api/v1/auth/me
//! POST /api/v1/auth/logout
//! ```
//!
//! Credential verification happens at the external OAuth gateway; `login`
//! receives the gateway-verified profile, records the sign-in, and
//! establishes the cookie session.

use actix_web::{get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{DomainError, Role, SignInProfile, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Gateway-verified profile payload for `POST /api/v1/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// External-provider identifier, unique per user.
    pub open_id: String,
    /// Display name reported by the provider.
    #[serde(default)]
    pub name: Option<String>,
    /// Email reported by the provider.
    #[serde(default)]
    pub email: Option<String>,
    /// Sign-in method reported by the provider.
    #[serde(default)]
    pub login_method: Option<String>,
}

impl TryFrom<LoginRequest> for SignInProfile {
    type Error = DomainError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &value.open_id,
            value.name.as_deref(),
            value.email.as_deref(),
            value.login_method.as_deref(),
        )
        .map_err(|err| {
            DomainError::invalid_request(err.to_string())
                .with_details(json!({ "field": "openId" }))
        })
    }
}

/// Wire shape of the current identity.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    /// Server-generated user id.
    pub id: i32,
    /// External-provider identifier.
    pub open_id: String,
    /// Display name, if known.
    pub name: Option<String>,
    /// Email, if known.
    pub email: Option<String>,
    /// Sign-in method, if known.
    pub login_method: Option<String>,
    /// Account role.
    #[schema(example = "user")]
    pub role: Role,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Most recent sign-in timestamp.
    pub last_signed_in: DateTime<Utc>,
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.as_i32(),
            open_id: user.open_id.as_str().to_owned(),
            name: user.name,
            email: user.email,
            login_method: user.login_method,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
            last_signed_in: user.last_signed_in,
        }
    }
}

/// Response body for `POST /api/v1/auth/logout`.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct LogoutResponse {
    /// Always true; logout cannot fail.
    pub success: bool,
}

/// Record a gateway-verified sign-in and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Sign-in recorded", body = CurrentUserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid profile payload", body = ApiError),
        (status = 503, description = "Store unavailable", body = ApiError)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<CurrentUserResponse>> {
    let profile = SignInProfile::try_from(payload.into_inner())?;
    let user = state.sign_in.sign_in(&profile).await?;
    session.persist_user(user.id)?;
    Ok(web::Json(user.into()))
}

/// Fetch the current identity, or `null` when no session is established.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current identity or null", body = Option<CurrentUserResponse>),
        (status = 503, description = "Store unavailable", body = ApiError)
    ),
    tags = ["auth"],
    operation_id = "me",
    security([])
)]
#[get("/auth/me")]
pub async fn me(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Option<CurrentUserResponse>>> {
    let Some(user_id) = session.user_id()? else {
        return Ok(web::Json(None));
    };
    let user = state.users.current_user(user_id).await?;
    Ok(web::Json(user.map(CurrentUserResponse::from)))
}

/// Drop the session; the cookie is cleared on the client.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Session cleared", body = LogoutResponse)
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> web::Json<LogoutResponse> {
    session.purge();
    web::Json(LogoutResponse { success: true })
}
