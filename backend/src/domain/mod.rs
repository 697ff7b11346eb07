//! Domain primitives and aggregates.
//!
//! Purpose: define strongly typed domain entities used by the HTTP and
//! persistence layers. Types are immutable once constructed; invariants live
//! in the constructors so adapters can only hand out valid values.

pub mod application;
pub mod catalogue;
pub mod dashboard;
pub mod error;
pub mod locale;
pub mod ports;
pub mod user;

pub use self::application::{
    ApplicantDetails, ApplicationId, ApplicationStatus, ApplicationSubmission,
    ParseApplicationStatusError, SubmissionDraft, SubmissionField, SubmissionValidationError,
    VisaApplication,
};
pub use self::catalogue::{VisaType, VisaTypeDraft, VisaTypeId, VisaTypeValidationError};
pub use self::dashboard::DashboardSummary;
pub use self::error::{DomainError, ErrorCode};
pub use self::locale::{Locale, LocalizedText, LocalizedTextValidationError};
pub use self::user::{
    OpenId, OpenIdValidationError, ParseRoleError, Role, SignInProfile, User, UserId,
};
