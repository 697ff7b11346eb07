//! PostgreSQL-backed `ApplicationRepository` implementation using Diesel ORM.
//!
//! Creation is a single atomic insert; the owning user id always comes from
//! the authenticated caller, never from row data supplied by a client.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ApplicationRepository, ApplicationRepositoryError};
use crate::domain::{
    ApplicantDetails, ApplicationId, ApplicationStatus, ApplicationSubmission, UserId,
    VisaApplication, VisaTypeId,
};

use super::diesel_error_mapping::{is_foreign_key_violation, map_diesel_error, map_pool_error};
use super::models::{NewVisaApplicationRow, VisaApplicationRow};
use super::pool::{DbPool, PoolError};
use super::schema::visa_applications;

/// Diesel-backed implementation of the application repository port.
#[derive(Clone)]
pub struct DieselApplicationRepository {
    pool: DbPool,
}

impl DieselApplicationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> ApplicationRepositoryError {
    map_pool_error(error, |message| {
        ApplicationRepositoryError::connection(message)
    })
}

fn map_diesel(error: diesel::result::Error) -> ApplicationRepositoryError {
    map_diesel_error(
        error,
        |message| ApplicationRepositoryError::query(message),
        |message| ApplicationRepositoryError::connection(message),
    )
}

fn map_insert_error(error: diesel::result::Error) -> ApplicationRepositoryError {
    if is_foreign_key_violation(&error) {
        return ApplicationRepositoryError::unknown_visa_type(error.to_string());
    }
    map_diesel(error)
}

/// Decode the JSON-encoded document list; an absent column is an empty list.
fn decode_documents(
    documents: Option<String>,
) -> Result<Vec<String>, ApplicationRepositoryError> {
    documents
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .map_err(|err| ApplicationRepositoryError::query(format!("decode documents: {err}")))
        .map(Option::unwrap_or_default)
}

/// Convert a database row into a domain application.
fn row_to_application(row: VisaApplicationRow) -> Result<VisaApplication, ApplicationRepositoryError> {
    let VisaApplicationRow {
        id,
        user_id,
        visa_type_id,
        status,
        full_name,
        email,
        phone,
        passport_number,
        nationality,
        travel_date,
        documents,
        notes,
        created_at,
        updated_at,
    } = row;

    let status = status
        .parse::<ApplicationStatus>()
        .map_err(|err| ApplicationRepositoryError::query(err.to_string()))?;
    let documents = decode_documents(documents)?;

    Ok(VisaApplication {
        id: ApplicationId::new(id),
        user_id: UserId::new(user_id),
        visa_type_id: VisaTypeId::new(visa_type_id),
        status,
        applicant: ApplicantDetails {
            full_name,
            email,
            phone,
            passport_number,
            nationality,
        },
        travel_date,
        documents,
        notes,
        created_at,
        updated_at,
    })
}

#[async_trait]
impl ApplicationRepository for DieselApplicationRepository {
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<VisaApplication>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<VisaApplicationRow> = visa_applications::table
            .filter(visa_applications::user_id.eq(user_id.as_i32()))
            .select(VisaApplicationRow::as_select())
            .order_by((
                visa_applications::created_at.desc(),
                visa_applications::id.desc(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_application).collect()
    }

    async fn create(
        &self,
        user_id: UserId,
        submission: &ApplicationSubmission,
    ) -> Result<VisaApplication, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let applicant = submission.applicant();
        let new_row = NewVisaApplicationRow {
            user_id: user_id.as_i32(),
            visa_type_id: submission.visa_type_id().as_i32(),
            status: ApplicationStatus::Pending.as_str(),
            full_name: applicant.full_name.as_str(),
            email: applicant.email.as_str(),
            phone: applicant.phone.as_str(),
            passport_number: applicant.passport_number.as_str(),
            nationality: applicant.nationality.as_str(),
            travel_date: submission.travel_date(),
            documents: None,
            notes: submission.notes(),
        };

        let row = diesel::insert_into(visa_applications::table)
            .values(&new_row)
            .returning(VisaApplicationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_insert_error)?;

        row_to_application(row)
    }
}
