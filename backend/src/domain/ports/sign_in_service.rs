//! Driving port for the external sign-in use-case.
//!
//! Inbound adapters call this to record a gateway-verified sign-in without
//! knowing the backing infrastructure, which keeps HTTP handler tests
//! deterministic because they can substitute a test double.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::user::{SignInProfile, User};

use super::user_repository::{UserRepository, UserRepositoryError};

/// Domain use-case port for recording a sign-in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignInService: Send + Sync {
    /// Upsert the user behind the verified profile and return the stored
    /// record for session establishment.
    async fn sign_in(&self, profile: &SignInProfile) -> Result<User, DomainError>;
}

/// Map repository failures into the transport-agnostic domain error.
pub(crate) fn map_user_repository_error(error: UserRepositoryError) -> DomainError {
    match error {
        UserRepositoryError::Connection { message } => DomainError::service_unavailable(message),
        UserRepositoryError::Query { message } => DomainError::internal(message),
    }
}

/// Sign-in service backed by any [`UserRepository`].
#[derive(Clone)]
pub struct SignInServiceImpl {
    users: Arc<dyn UserRepository>,
}

impl SignInServiceImpl {
    /// Create a service over the given repository.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl SignInService for SignInServiceImpl {
    async fn sign_in(&self, profile: &SignInProfile) -> Result<User, DomainError> {
        self.users
            .upsert_sign_in(profile)
            .await
            .map_err(map_user_repository_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::user_repository::{FixtureUserRepository, MockUserRepository};

    fn profile() -> SignInProfile {
        SignInProfile::try_from_parts("manus-1", Some("Ali"), None, None).expect("valid profile")
    }

    #[rstest]
    #[tokio::test]
    async fn sign_in_returns_stored_user() {
        let service = SignInServiceImpl::new(Arc::new(FixtureUserRepository::new()));
        let user = service.sign_in(&profile()).await.expect("sign-in succeeds");
        assert_eq!(user.open_id.as_str(), "manus-1");
    }

    #[rstest]
    #[case(
        UserRepositoryError::connection("database unavailable"),
        ErrorCode::ServiceUnavailable
    )]
    #[case(UserRepositoryError::query("query failed"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn sign_in_maps_repository_failures(
        #[case] failure: UserRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockUserRepository::new();
        repo.expect_upsert_sign_in()
            .return_once(move |_| Err(failure));
        let service = SignInServiceImpl::new(Arc::new(repo));
        let err = service.sign_in(&profile()).await.expect_err("must fail");
        assert_eq!(err.code(), expected);
    }
}
