//! Visa-type catalogue entities.
//!
//! Catalogue entries are seeded and administered out of band; the intake flow
//! reads them only. Validation lives in the constructor so adapters can never
//! hand malformed entries to the presentation flows.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::locale::{LocalizedText, LocalizedTextValidationError};

/// Identifier of a catalogue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisaTypeId(i32);

impl VisaTypeId {
    /// Wrap a raw database identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw numeric value for persistence and wire payloads.
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for VisaTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors returned by [`VisaType::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisaTypeValidationError {
    /// The localized name failed validation.
    Name(LocalizedTextValidationError),
    /// Price must be a non-negative SAR amount.
    NegativePrice {
        /// The rejected amount.
        price: i32,
    },
    /// Processing duration must be at least one day.
    InvalidProcessingDays {
        /// The rejected duration.
        days: i32,
    },
}

impl fmt::Display for VisaTypeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(err) => write!(f, "visa type name: {err}"),
            Self::NegativePrice { price } => {
                write!(f, "visa type price must not be negative, got {price}")
            }
            Self::InvalidProcessingDays { days } => {
                write!(f, "visa type processing days must be at least 1, got {days}")
            }
        }
    }
}

impl std::error::Error for VisaTypeValidationError {}

impl From<LocalizedTextValidationError> for VisaTypeValidationError {
    fn from(value: LocalizedTextValidationError) -> Self {
        Self::Name(value)
    }
}

/// Unvalidated field bundle for [`VisaType::new`].
#[derive(Debug, Clone)]
pub struct VisaTypeDraft {
    /// Catalogue identifier.
    pub id: VisaTypeId,
    /// Localized product name, both locales required.
    pub name: LocalizedText,
    /// Optional Arabic description.
    pub description_ar: Option<String>,
    /// Optional English description.
    pub description_en: Option<String>,
    /// Minor-unit-free SAR amount.
    pub price: i32,
    /// Advertised processing duration in days.
    pub processing_days: i32,
    /// Requirement strings shown to applicants.
    pub requirements: Vec<String>,
    /// Whether the entry is currently offered.
    pub active: bool,
    /// Record creation timestamp (store-assigned).
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp (store-assigned).
    pub updated_at: DateTime<Utc>,
}

/// A catalogue entry describing an offered visa product.
#[derive(Debug, Clone, PartialEq)]
pub struct VisaType {
    id: VisaTypeId,
    name: LocalizedText,
    description_ar: Option<String>,
    description_en: Option<String>,
    price: i32,
    processing_days: i32,
    requirements: Vec<String>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl VisaType {
    /// Validate a draft into a catalogue entry.
    pub fn new(draft: VisaTypeDraft) -> Result<Self, VisaTypeValidationError> {
        let VisaTypeDraft {
            id,
            name,
            description_ar,
            description_en,
            price,
            processing_days,
            requirements,
            active,
            created_at,
            updated_at,
        } = draft;

        if price < 0 {
            return Err(VisaTypeValidationError::NegativePrice { price });
        }
        if processing_days < 1 {
            return Err(VisaTypeValidationError::InvalidProcessingDays {
                days: processing_days,
            });
        }

        Ok(Self {
            id,
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
    }

    /// Catalogue identifier.
    pub fn id(&self) -> VisaTypeId {
        self.id
    }

    /// Localized product name.
    pub fn name(&self) -> &LocalizedText {
        &self.name
    }

    /// Arabic description, if any.
    pub fn description_ar(&self) -> Option<&str> {
        self.description_ar.as_deref()
    }

    /// English description, if any.
    pub fn description_en(&self) -> Option<&str> {
        self.description_en.as_deref()
    }

    /// Minor-unit-free SAR amount.
    pub fn price(&self) -> i32 {
        self.price
    }

    /// Advertised processing duration in days.
    pub fn processing_days(&self) -> i32 {
        self.processing_days
    }

    /// Requirement strings shown to applicants.
    pub fn requirements(&self) -> &[String] {
        &self.requirements
    }

    /// Whether the entry is currently offered.
    pub fn active(&self) -> bool {
        self.active
    }

    /// Record creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
