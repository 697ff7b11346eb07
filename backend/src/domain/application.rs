//! Visa application aggregate: status enum, applicant snapshot, and the
//! validated submission type every write path goes through.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::locale::Locale;
use super::user::UserId;
use crate::domain::catalogue::VisaTypeId;

/// Identifier of a stored application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(i32);

impl ApplicationId {
    /// Wrap a raw database identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw numeric value for persistence and wire payloads.
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of an application.
///
/// Applications start `Pending`; transitions are performed by an external
/// reviewing process and no transition operation exists in this service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Awaiting review.
    #[default]
    Pending,
    /// Approved by the reviewing process.
    Approved,
    /// Rejected by the reviewing process.
    Rejected,
    /// Fulfilled and closed.
    Completed,
}

impl ApplicationStatus {
    /// Stable storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }

    /// Display label for the requested locale.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{ApplicationStatus, Locale};
    ///
    /// assert_eq!(ApplicationStatus::Pending.label(Locale::Ar), "قيد الانتظار");
    /// ```
    pub const fn label(self, locale: Locale) -> &'static str {
        match locale {
            Locale::Ar => match self {
                Self::Pending => "قيد الانتظار",
                Self::Approved => "موافق عليه",
                Self::Rejected => "مرفوض",
                Self::Completed => "مكتمل",
            },
            Locale::En => match self {
                Self::Pending => "Pending",
                Self::Approved => "Approved",
                Self::Rejected => "Rejected",
                Self::Completed => "Completed",
            },
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse error for [`ApplicationStatus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseApplicationStatusError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseApplicationStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid application status: {}", self.input)
    }
}

impl std::error::Error for ParseApplicationStatusError {}

impl FromStr for ApplicationStatus {
    type Err = ParseApplicationStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseApplicationStatusError {
                input: value.to_owned(),
            }),
        }
    }
}

/// Required submission fields, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SubmissionField {
    /// Applicant's full name.
    FullName,
    /// Applicant's contact email.
    Email,
    /// Applicant's contact phone.
    Phone,
    /// Passport number.
    PassportNumber,
    /// Applicant's nationality.
    Nationality,
    /// Selected visa type.
    VisaType,
}

impl SubmissionField {
    /// Wire name of the field, matching the request DTO.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::PassportNumber => "passportNumber",
            Self::Nationality => "nationality",
            Self::VisaType => "visaType",
        }
    }

    const fn max_len(self) -> usize {
        match self {
            Self::FullName => 255,
            Self::Email => 320,
            Self::Phone => 20,
            Self::PassportNumber => 50,
            Self::Nationality => 100,
            Self::VisaType => usize::MAX,
        }
    }
}

impl fmt::Display for SubmissionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failure for a submission, enumerating every offending field
/// rather than stopping at the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionValidationError {
    /// Required fields that were absent or blank.
    pub missing: Vec<SubmissionField>,
    /// Fields that exceeded their storage limit.
    pub invalid: Vec<SubmissionField>,
}

impl SubmissionValidationError {
    fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }
}

impl fmt::Display for SubmissionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let missing: Vec<&str> = self.missing.iter().map(|field| field.as_str()).collect();
        let invalid: Vec<&str> = self.invalid.iter().map(|field| field.as_str()).collect();
        write!(
            f,
            "submission validation failed: missing [{}], invalid [{}]",
            missing.join(", "),
            invalid.join(", ")
        )
    }
}

impl std::error::Error for SubmissionValidationError {}

/// Personal and passport fields captured verbatim at submission time.
///
/// Stored independently of the live [`super::user::User`] record so later
/// profile edits never rewrite history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicantDetails {
    /// Full name as written in the passport.
    pub full_name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Passport number.
    pub passport_number: String,
    /// Nationality.
    pub nationality: String,
}

/// Raw submission fields prior to validation.
#[derive(Debug, Clone, Default)]
pub struct SubmissionDraft {
    /// Selected catalogue entry, if the caller picked one.
    pub visa_type_id: Option<VisaTypeId>,
    /// Applicant's full name.
    pub full_name: String,
    /// Applicant's contact email.
    pub email: String,
    /// Applicant's contact phone.
    pub phone: String,
    /// Passport number.
    pub passport_number: String,
    /// Applicant's nationality.
    pub nationality: String,
    /// Optional intended travel date.
    pub travel_date: Option<DateTime<Utc>>,
    /// Optional free-text notes.
    pub notes: Option<String>,
}

/// A validated application submission ready for persistence.
///
/// ## Invariants
/// - All five applicant fields are non-empty (trimmed) and within their
///   storage limits.
/// - A visa type is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationSubmission {
    visa_type_id: VisaTypeId,
    applicant: ApplicantDetails,
    travel_date: Option<DateTime<Utc>>,
    notes: Option<String>,
}

impl ApplicationSubmission {
    /// Validate a draft, collecting every missing or over-length field.
    pub fn new(draft: SubmissionDraft) -> Result<Self, SubmissionValidationError> {
        let mut error = SubmissionValidationError::default();

        let required = [
            (SubmissionField::FullName, draft.full_name.as_str()),
            (SubmissionField::Email, draft.email.as_str()),
            (SubmissionField::Phone, draft.phone.as_str()),
            (SubmissionField::PassportNumber, draft.passport_number.as_str()),
            (SubmissionField::Nationality, draft.nationality.as_str()),
        ];
        for (field, value) in required {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                error.missing.push(field);
            } else if trimmed.chars().count() > field.max_len() {
                error.invalid.push(field);
            }
        }
        if draft.visa_type_id.is_none() {
            error.missing.push(SubmissionField::VisaType);
        }

        if !error.is_empty() {
            return Err(error);
        }

        let visa_type_id = draft
            .visa_type_id
            .ok_or_else(SubmissionValidationError::default)?;

        let notes = draft
            .notes
            .map(|n| n.trim().to_owned())
            .filter(|n| !n.is_empty());

        Ok(Self {
            visa_type_id,
            applicant: ApplicantDetails {
                full_name: draft.full_name.trim().to_owned(),
                email: draft.email.trim().to_owned(),
                phone: draft.phone.trim().to_owned(),
                passport_number: draft.passport_number.trim().to_owned(),
                nationality: draft.nationality.trim().to_owned(),
            },
            travel_date: draft.travel_date,
            notes,
        })
    }

    /// Selected catalogue entry.
    pub fn visa_type_id(&self) -> VisaTypeId {
        self.visa_type_id
    }

    /// Applicant snapshot fields.
    pub fn applicant(&self) -> &ApplicantDetails {
        &self.applicant
    }

    /// Intended travel date, if given.
    pub fn travel_date(&self) -> Option<DateTime<Utc>> {
        self.travel_date
    }

    /// Free-text notes, if given.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// One applicant's stored request against one catalogue entry.
///
/// Rows are read-scoped to the owning user; ownership is fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct VisaApplication {
    /// Server-generated identifier.
    pub id: ApplicationId,
    /// Owning user; assigned from the authenticated caller, never from input.
    pub user_id: UserId,
    /// Referenced catalogue entry.
    pub visa_type_id: VisaTypeId,
    /// Lifecycle state.
    pub status: ApplicationStatus,
    /// Applicant snapshot captured at submission time.
    pub applicant: ApplicantDetails,
    /// Intended travel date, if given.
    pub travel_date: Option<DateTime<Utc>>,
    /// Stored document references.
    pub documents: Vec<String>,
    /// Free-text notes, if given.
    pub notes: Option<String>,
    /// Record creation timestamp (store-assigned).
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp (store-assigned).
    pub updated_at: DateTime<Utc>,
}
