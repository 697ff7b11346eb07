//! User identity types maintained by the external sign-in flow.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a stored user. Server-generated, stable, never supplied by
/// callers on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw database identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw numeric value for persistence and session storage.
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors for [`OpenId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenIdValidationError {
    /// Identifier was missing or blank once trimmed.
    Empty,
    /// Identifier exceeds the 64-character storage limit.
    TooLong,
}

impl fmt::Display for OpenIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "openId must not be empty"),
            Self::TooLong => write!(f, "openId must not exceed 64 characters"),
        }
    }
}

impl std::error::Error for OpenIdValidationError {}

/// External-provider identifier returned from the OAuth callback.
///
/// ## Invariants
/// - Non-empty after trimming; stored trimmed.
/// - At most 64 characters (the storage column width).
/// - Globally unique per user (enforced by the store).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpenId(String);

impl OpenId {
    /// Validate and construct an external identifier.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::OpenId;
    ///
    /// let id = OpenId::new("manus-7f3a").expect("valid openId");
    /// assert_eq!(id.as_str(), "manus-7f3a");
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, OpenIdValidationError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(OpenIdValidationError::Empty);
        }
        if trimmed.chars().count() > 64 {
            return Err(OpenIdValidationError::TooLong);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for OpenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for OpenId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Account role. Defaults to `User`; gates no behaviour in the intake flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular applicant account.
    #[default]
    User,
    /// Administrative account (reserved; unused by the intake flow).
    Admin,
}

impl Role {
    /// Stable storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse error for [`Role`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid role: {}", self.input)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseRoleError {
                input: value.to_owned(),
            }),
        }
    }
}

/// A stored user account.
///
/// Created on first successful external sign-in and refreshed on each
/// subsequent sign-in. Never deleted by the intake flow.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Server-generated identifier.
    pub id: UserId,
    /// External-provider identifier, unique per user.
    pub open_id: OpenId,
    /// Display name reported by the provider, if any.
    pub name: Option<String>,
    /// Email reported by the provider, if any.
    pub email: Option<String>,
    /// Sign-in method reported by the provider, if any.
    pub login_method: Option<String>,
    /// Account role.
    pub role: Role,
    /// Record creation timestamp (store-assigned).
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp (store-assigned).
    pub updated_at: DateTime<Utc>,
    /// Timestamp of the most recent sign-in.
    pub last_signed_in: DateTime<Utc>,
}

/// Gateway-verified profile presented at sign-in.
///
/// The OAuth gateway authenticates the user; this type only captures the
/// verified fields the backend persists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInProfile {
    open_id: OpenId,
    name: Option<String>,
    email: Option<String>,
    login_method: Option<String>,
}

impl SignInProfile {
    /// Construct a profile from raw callback values.
    ///
    /// Blank optional fields collapse to `None` so repeat sign-ins do not
    /// overwrite stored values with empty strings.
    pub fn try_from_parts(
        open_id: &str,
        name: Option<&str>,
        email: Option<&str>,
        login_method: Option<&str>,
    ) -> Result<Self, OpenIdValidationError> {
        let open_id = OpenId::new(open_id)?;
        Ok(Self {
            open_id,
            name: normalize_optional(name),
            email: normalize_optional(email),
            login_method: normalize_optional(login_method),
        })
    }

    /// External identifier the upsert is keyed on.
    pub fn open_id(&self) -> &OpenId {
        &self.open_id
    }

    /// Display name, if provided.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Email, if provided.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Sign-in method, if provided.
    pub fn login_method(&self) -> Option<&str> {
        self.login_method.as_deref()
    }
}

fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", OpenIdValidationError::Empty)]
    #[case("   ", OpenIdValidationError::Empty)]
    fn open_id_rejects_blank_input(#[case] input: &str, #[case] expected: OpenIdValidationError) {
        let err = OpenId::new(input).expect_err("blank openId must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn open_id_rejects_oversized_input() {
        let err = OpenId::new("x".repeat(65)).expect_err("oversized openId must fail");
        assert_eq!(err, OpenIdValidationError::TooLong);
    }

    #[rstest]
    fn open_id_trims_surrounding_whitespace() {
        let id = OpenId::new("  manus-1  ").expect("valid openId");
        assert_eq!(id.as_str(), "manus-1");
    }

    #[rstest]
    #[case("user", Role::User)]
    #[case("admin", Role::Admin)]
    fn role_parses_declared_set(#[case] input: &str, #[case] expected: Role) {
        assert_eq!(input.parse::<Role>().expect("declared role"), expected);
        assert_eq!(expected.as_str(), input);
    }

    #[rstest]
    #[case("superadmin")]
    #[case("USER")]
    #[case("")]
    fn role_rejects_out_of_set_values(#[case] input: &str) {
        let err = input.parse::<Role>().expect_err("out-of-set role must fail");
        assert_eq!(err.input, input);
    }

    #[rstest]
    fn sign_in_profile_collapses_blank_optionals() {
        let profile = SignInProfile::try_from_parts("manus-1", Some("  "), Some("a@x.com"), None)
            .expect("valid profile");
        assert_eq!(profile.name(), None);
        assert_eq!(profile.email(), Some("a@x.com"));
        assert_eq!(profile.login_method(), None);
    }

    #[rstest]
    fn sign_in_profile_requires_open_id() {
        let err = SignInProfile::try_from_parts(" ", None, None, None)
            .expect_err("blank openId must fail");
        assert_eq!(err, OpenIdValidationError::Empty);
    }
}
