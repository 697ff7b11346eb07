//! Read port resolving the session subject to a stored user record.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::user::{User, UserId};

use super::sign_in_service::map_user_repository_error;
use super::user_repository::UserRepository;

/// Domain use-case port for the `auth.me` read.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CurrentUserQuery: Send + Sync {
    /// Fetch the user identified by the session, if it still exists.
    async fn current_user(&self, id: UserId) -> Result<Option<User>, DomainError>;
}

/// Current-user query backed by any [`UserRepository`].
#[derive(Clone)]
pub struct CurrentUserQueryImpl {
    users: Arc<dyn UserRepository>,
}

impl CurrentUserQueryImpl {
    /// Create a query over the given repository.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl CurrentUserQuery for CurrentUserQueryImpl {
    async fn current_user(&self, id: UserId) -> Result<Option<User>, DomainError> {
        self.users
            .find_by_id(id)
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
    use crate::domain::ports::user_repository::{
        FixtureUserRepository, MockUserRepository, UserRepository, UserRepositoryError,
    };
    use crate::domain::user::SignInProfile;

    #[rstest]
    #[tokio::test]
    async fn resolves_a_signed_in_user() {
        let repo = Arc::new(FixtureUserRepository::new());
        let profile =
            SignInProfile::try_from_parts("manus-1", None, None, None).expect("valid profile");
        let stored = repo.upsert_sign_in(&profile).await.expect("upsert");

        let query = CurrentUserQueryImpl::new(repo);
        let found = query
            .current_user(stored.id)
            .await
            .expect("lookup succeeds")
            .expect("user present");
        assert_eq!(found.id, stored.id);
    }

    #[rstest]
    #[tokio::test]
    async fn maps_connection_failures_to_service_unavailable() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .return_once(|_| Err(UserRepositoryError::connection("database unavailable")));
        let query = CurrentUserQueryImpl::new(Arc::new(repo));
        let err = query
            .current_user(UserId::new(1))
            .await
            .expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
