//! Visa-type catalogue read endpoint.
//!
//! ```text
//! GET /api/v1/visa/types
//! ```

use actix_web::{get, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ports::VisaTypeRepositoryError;
use crate::domain::{DomainError, Locale, VisaType};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::state::HttpState;

/// Wire shape of a catalogue entry, mirroring the stored column names.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisaTypeResponse {
    /// Catalogue identifier.
    pub id: i32,
    /// Arabic product name.
    #[schema(example = "تأشيرة سياحية")]
    pub name_ar: String,
    /// English product name.
    #[schema(example = "Tourist visa")]
    pub name_en: String,
    /// Arabic description, if any.
    pub description_ar: Option<String>,
    /// English description, if any.
    pub description_en: Option<String>,
    /// Minor-unit-free SAR amount.
    pub price: i32,
    /// Advertised processing duration in days.
    pub processing_days: i32,
    /// Requirement strings shown to applicants.
    pub requirements: Vec<String>,
    /// Whether the entry is currently offered. Always true on this read.
    pub active: bool,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<VisaType> for VisaTypeResponse {
    fn from(entry: VisaType) -> Self {
        Self {
            id: entry.id().as_i32(),
            name_ar: entry.name().get(Locale::Ar).to_owned(),
            name_en: entry.name().get(Locale::En).to_owned(),
            description_ar: entry.description_ar().map(str::to_owned),
            description_en: entry.description_en().map(str::to_owned),
            price: entry.price(),
            processing_days: entry.processing_days(),
            requirements: entry.requirements().to_vec(),
            active: entry.active(),
            created_at: entry.created_at(),
            updated_at: entry.updated_at(),
        }
    }
}

pub(crate) fn map_catalogue_error(error: VisaTypeRepositoryError) -> DomainError {
    match error {
        VisaTypeRepositoryError::Connection { message } => {
            DomainError::service_unavailable(message)
        }
        VisaTypeRepositoryError::Query { message } => DomainError::internal(message),
    }
}

/// List the active visa-type catalogue. Unauthenticated-safe.
#[utoipa::path(
    get,
    path = "/api/v1/visa/types",
    responses(
        (status = 200, description = "Active catalogue entries", body = [VisaTypeResponse]),
        (status = 503, description = "Store unavailable", body = ApiError)
    ),
    tags = ["visa"],
    operation_id = "listVisaTypes",
    security([])
)]
#[get("/visa/types")]
pub async fn list_visa_types(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<VisaTypeResponse>>> {
    let entries = state
        .catalogue
        .list_active()
        .await
        .map_err(map_catalogue_error)?;
    Ok(web::Json(entries.into_iter().map(Into::into).collect()))
}
