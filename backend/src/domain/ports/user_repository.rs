//! Port for user persistence driven by the external sign-in flow.

use std::sync::Mutex;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::{Role, SignInProfile, User, UserId};

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "user repository query failed: {message}",
    }
}

/// Port for writing and reading user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user on first sign-in or refresh the stored profile fields
    /// and `last_signed_in` on a repeat sign-in, keyed on the external
    /// identifier. Returns the stored record.
    async fn upsert_sign_in(&self, profile: &SignInProfile) -> Result<User, UserRepositoryError>;

    /// Find a user by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;
}

/// In-memory implementation backing tests and the pool-less dev server.
#[derive(Debug)]
pub struct FixtureUserRepository {
    users: Mutex<Vec<User>>,
    next_id: AtomicI32,
}

impl Default for FixtureUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureUserRepository {
    /// Create an empty in-memory repository.
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<User>>, UserRepositoryError> {
        self.users
            .lock()
            .map_err(|_| UserRepositoryError::connection("fixture store poisoned"))
    }
}

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn upsert_sign_in(&self, profile: &SignInProfile) -> Result<User, UserRepositoryError> {
        let now = Utc::now();
        let mut users = self.lock()?;

        if let Some(user) = users.iter_mut().find(|u| &u.open_id == profile.open_id()) {
            if let Some(name) = profile.name() {
                user.name = Some(name.to_owned());
            }
            if let Some(email) = profile.email() {
                user.email = Some(email.to_owned());
            }
            if let Some(method) = profile.login_method() {
                user.login_method = Some(method.to_owned());
            }
            user.last_signed_in = now;
            user.updated_at = now;
            return Ok(user.clone());
        }

        let user = User {
            id: UserId::new(self.next_id.fetch_add(1, Ordering::Relaxed)),
            open_id: profile.open_id().clone(),
            name: profile.name().map(str::to_owned),
            email: profile.email().map(str::to_owned),
            login_method: profile.login_method().map(str::to_owned),
            role: Role::default(),
            created_at: now,
            updated_at: now,
            last_signed_in: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let users = self.lock()?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    fn profile(open_id: &str, name: Option<&str>) -> SignInProfile {
        SignInProfile::try_from_parts(open_id, name, None, Some("oauth"))
            .expect("valid profile")
    }

    #[rstest]
    #[tokio::test]
    async fn first_sign_in_creates_a_user_with_default_role() {
        let repo = FixtureUserRepository::new();
        let user = repo
            .upsert_sign_in(&profile("manus-1", Some("Ali")))
            .await
            .expect("upsert succeeds");
        assert_eq!(user.id, UserId::new(1));
        assert_eq!(user.role, Role::User);
        assert_eq!(user.name.as_deref(), Some("Ali"));
    }

    #[rstest]
    #[tokio::test]
    async fn repeat_sign_in_updates_in_place() {
        let repo = FixtureUserRepository::new();
        let first = repo
            .upsert_sign_in(&profile("manus-1", Some("Ali")))
            .await
            .expect("first upsert");
        let second = repo
            .upsert_sign_in(&profile("manus-1", Some("Ali Hassan")))
            .await
            .expect("second upsert");
        assert_eq!(first.id, second.id);
        assert_eq!(second.name.as_deref(), Some("Ali Hassan"));
        assert!(second.last_signed_in >= first.last_signed_in);

        let other = repo
            .upsert_sign_in(&profile("manus-2", None))
            .await
            .expect("distinct upsert");
        assert_ne!(other.id, first.id);
    }

    #[rstest]
    #[tokio::test]
    async fn find_by_id_misses_unknown_users() {
        let repo = FixtureUserRepository::new();
        let found = repo.find_by_id(UserId::new(42)).await.expect("lookup");
        assert!(found.is_none());
    }
}
