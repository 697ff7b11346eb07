//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ApplicationRepository, CurrentUserQuery, SignInService, VisaTypeRepository,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Sign-in use-case backing `POST /auth/login`.
    pub sign_in: Arc<dyn SignInService>,
    /// Identity read backing `GET /auth/me`.
    pub users: Arc<dyn CurrentUserQuery>,
    /// Catalogue read backing `GET /visa/types`.
    pub catalogue: Arc<dyn VisaTypeRepository>,
    /// Application reads and writes backing the protected tier.
    pub applications: Arc<dyn ApplicationRepository>,
}

impl HttpState {
    /// Bundle the port implementations handlers dispatch to.
    pub fn new(
        sign_in: Arc<dyn SignInService>,
        users: Arc<dyn CurrentUserQuery>,
        catalogue: Arc<dyn VisaTypeRepository>,
        applications: Arc<dyn ApplicationRepository>,
    ) -> Self {
        Self {
            sign_in,
            users,
            catalogue,
            applications,
        }
    }

    /// State over in-memory fixture ports, used by tests and the pool-less
    /// dev server.
    pub fn fixtures() -> Result<Self, crate::domain::VisaTypeValidationError> {
        use crate::domain::ports::{
            CurrentUserQueryImpl, FixtureApplicationRepository, FixtureUserRepository,
            FixtureVisaTypeRepository, SignInServiceImpl, UserRepository,
        };

        let users: Arc<dyn UserRepository> = Arc::new(FixtureUserRepository::new());
        Ok(Self::new(
            Arc::new(SignInServiceImpl::new(users.clone())),
            Arc::new(CurrentUserQueryImpl::new(users)),
            Arc::new(FixtureVisaTypeRepository::seeded()?),
            Arc::new(FixtureApplicationRepository::new()),
        ))
    }
}
