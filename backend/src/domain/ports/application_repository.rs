//! Port for visa application persistence, scoped to the owning user.

use std::sync::Mutex;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::application::{
    ApplicationId, ApplicationStatus, ApplicationSubmission, VisaApplication,
};
use crate::domain::user::UserId;

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by application repository adapters.
    pub enum ApplicationRepositoryError {
        /// Repository connection could not be established.
        Connection => "application repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "application repository query failed: {message}",
        /// The submission references a visa type that does not exist.
        UnknownVisaType => "application references an unknown visa type: {message}",
    }
}

/// Port for writing submissions and reading a user's own applications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// The caller's applications, newest first. Must never contain a row
    /// owned by another user.
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<VisaApplication>, ApplicationRepositoryError>;

    /// Persist a validated submission as a single atomic insert with status
    /// `Pending`, owned by `user_id`. Returns the stored row.
    async fn create(
        &self,
        user_id: UserId,
        submission: &ApplicationSubmission,
    ) -> Result<VisaApplication, ApplicationRepositoryError>;
}

/// In-memory implementation backing tests and the pool-less dev server.
#[derive(Debug)]
pub struct FixtureApplicationRepository {
    applications: Mutex<Vec<VisaApplication>>,
    next_id: AtomicI32,
}

impl Default for FixtureApplicationRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureApplicationRepository {
    /// Create an empty in-memory repository.
    pub fn new() -> Self {
        Self {
            applications: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
        }
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, Vec<VisaApplication>>, ApplicationRepositoryError> {
        self.applications
            .lock()
            .map_err(|_| ApplicationRepositoryError::connection("fixture store poisoned"))
    }
}

#[async_trait]
impl ApplicationRepository for FixtureApplicationRepository {
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<VisaApplication>, ApplicationRepositoryError> {
        let applications = self.lock()?;
        let mut owned: Vec<VisaApplication> = applications
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by_key(|a| std::cmp::Reverse(a.id.as_i32()));
        Ok(owned)
    }

    async fn create(
        &self,
        user_id: UserId,
        submission: &ApplicationSubmission,
    ) -> Result<VisaApplication, ApplicationRepositoryError> {
        let now = Utc::now();
        let application = VisaApplication {
            id: ApplicationId::new(self.next_id.fetch_add(1, Ordering::Relaxed)),
            user_id,
            visa_type_id: submission.visa_type_id(),
            status: ApplicationStatus::Pending,
            applicant: submission.applicant().clone(),
            travel_date: submission.travel_date(),
            documents: Vec::new(),
            notes: submission.notes().map(str::to_owned),
            created_at: now,
            updated_at: now,
        };
        self.lock()?.push(application.clone());
        Ok(application)
    }
}
