//! PostgreSQL-backed `VisaTypeRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{VisaTypeRepository, VisaTypeRepositoryError};
use crate::domain::{LocalizedText, VisaType, VisaTypeDraft, VisaTypeId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::VisaTypeRow;
use super::pool::{DbPool, PoolError};
use super::schema::visa_types;

/// Diesel-backed implementation of the catalogue read port.
#[derive(Clone)]
pub struct DieselVisaTypeRepository {
    pool: DbPool,
}

impl DieselVisaTypeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> VisaTypeRepositoryError {
    map_pool_error(error, |message| VisaTypeRepositoryError::connection(message))
}

fn map_diesel(error: diesel::result::Error) -> VisaTypeRepositoryError {
    map_diesel_error(
        error,
        |message| VisaTypeRepositoryError::query(message),
        |message| VisaTypeRepositoryError::connection(message),
    )
}

/// Decode the JSON-encoded requirement list; an absent column is an empty
/// list.
fn decode_requirements(
    requirements: Option<String>,
) -> Result<Vec<String>, VisaTypeRepositoryError> {
    requirements
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .map_err(|err| VisaTypeRepositoryError::query(format!("decode requirements: {err}")))
        .map(Option::unwrap_or_default)
}

/// Convert a database row into a validated domain catalogue entry.
fn row_to_visa_type(row: VisaTypeRow) -> Result<VisaType, VisaTypeRepositoryError> {
    let VisaTypeRow {
        id,
        name_ar,
        name_en,
        description_ar,
        description_en,
        price,
        processing_days,
        requirements,
        active,
        created_at,
        updated_at,
    } = row;

    let name = LocalizedText::new(name_ar, name_en)
        .map_err(|err| VisaTypeRepositoryError::query(err.to_string()))?;
    let requirements = decode_requirements(requirements)?;

    VisaType::new(VisaTypeDraft {
        id: VisaTypeId::new(id),
        name,
        description_ar,
        description_en,
        price,
        processing_days,
        requirements,
        active,
        created_at,
        updated_at,
    })
    .map_err(|err| VisaTypeRepositoryError::query(err.to_string()))
}

#[async_trait]
impl VisaTypeRepository for DieselVisaTypeRepository {
    async fn list_active(&self) -> Result<Vec<VisaType>, VisaTypeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<VisaTypeRow> = visa_types::table
            .filter(visa_types::active.eq(true))
            .select(VisaTypeRow::as_select())
            .order_by(visa_types::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_visa_type).collect()
    }
}

#[cfg(test)]
mod tests {
    //! Row decoding coverage; live queries are exercised against a real
    //! database out of band.
    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    fn row(requirements: Option<&str>) -> VisaTypeRow {
        VisaTypeRow {
            id: 1,
            name_ar: "تأشيرة سياحية".to_owned(),
            name_en: "Tourist visa".to_owned(),
            description_ar: None,
            description_en: None,
            price: 450,
            processing_days: 5,
            requirements: requirements.map(str::to_owned),
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    fn decodes_requirements_json() {
        let entry = row_to_visa_type(row(Some(r#"["Passport valid 6 months"]"#)))
            .expect("valid row");
        assert_eq!(entry.requirements(), ["Passport valid 6 months"]);
    }

    #[rstest]
    fn absent_requirements_decode_to_empty_list() {
        let entry = row_to_visa_type(row(None)).expect("valid row");
        assert!(entry.requirements().is_empty());
    }

    #[rstest]
    fn malformed_requirements_fail_as_query_errors() {
        let err = row_to_visa_type(row(Some("not json"))).expect_err("malformed JSON must fail");
        assert!(matches!(err, VisaTypeRepositoryError::Query { .. }));
    }
}
