//! Port for reading the visa-type catalogue.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::catalogue::{VisaType, VisaTypeDraft, VisaTypeId, VisaTypeValidationError};
use crate::domain::locale::LocalizedText;

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by catalogue repository adapters.
    pub enum VisaTypeRepositoryError {
        /// Repository connection could not be established.
        Connection => "visa type repository connection failed: {message}",
        /// Query failed during execution.
        Query => "visa type repository query failed: {message}",
    }
}

/// Port for the applicant-facing catalogue read.
///
/// The read is intentionally scoped to active entries: only active types are
/// offered to applicants.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisaTypeRepository: Send + Sync {
    /// Active catalogue entries ordered by id.
    async fn list_active(&self) -> Result<Vec<VisaType>, VisaTypeRepositoryError>;
}

/// In-memory implementation backing tests and the pool-less dev server.
#[derive(Debug, Default, Clone)]
pub struct FixtureVisaTypeRepository {
    entries: Vec<VisaType>,
}

impl FixtureVisaTypeRepository {
    /// Create a repository over the given entries.
    pub fn with_entries(entries: Vec<VisaType>) -> Self {
        Self { entries }
    }

    /// Create a repository seeded with the standard catalogue.
    pub fn seeded() -> Result<Self, VisaTypeValidationError> {
        let now = Utc::now();
        let seed = [
            ("تأشيرة سياحية", "Tourist visa", 450, 5, true),
            ("تأشيرة عمل", "Business visa", 900, 10, true),
            ("تأشيرة زيارة", "Visit visa", 600, 7, true),
            ("تأشيرة عبور", "Transit visa", 150, 3, true),
        ];
        let entries = seed
            .into_iter()
            .zip(1..)
            .map(|((ar, en, price, days, active), id)| {
                VisaType::new(VisaTypeDraft {
                    id: VisaTypeId::new(id),
                    name: LocalizedText::new(ar, en)?,
                    description_ar: None,
                    description_en: None,
                    price,
                    processing_days: days,
                    requirements: vec!["Passport valid for at least 6 months".to_owned()],
                    active,
                    created_at: now,
                    updated_at: now,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }
}

#[async_trait]
impl VisaTypeRepository for FixtureVisaTypeRepository {
    async fn list_active(&self) -> Result<Vec<VisaType>, VisaTypeRepositoryError> {
        let mut entries: Vec<VisaType> = self
            .entries
            .iter()
            .filter(|entry| entry.active())
            .cloned()
            .collect();
        entries.sort_by_key(|entry| entry.id().as_i32());
        Ok(entries)
    }
}
