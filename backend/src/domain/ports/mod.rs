//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the relational store) and what use-cases inbound adapters may drive.
//! Each trait exposes strongly typed errors so adapters map their failures
//! into predictable variants instead of returning `anyhow::Result`.

pub mod application_repository;
pub mod current_user_query;
pub(crate) mod macros;
pub mod sign_in_service;
pub mod user_repository;
pub mod visa_type_repository;

pub use self::application_repository::{
    ApplicationRepository, ApplicationRepositoryError, FixtureApplicationRepository,
};
pub use self::current_user_query::{CurrentUserQuery, CurrentUserQueryImpl};
pub use self::sign_in_service::{SignInService, SignInServiceImpl};
pub use self::user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};
pub use self::visa_type_repository::{
    FixtureVisaTypeRepository, VisaTypeRepository, VisaTypeRepositoryError,
};

#[cfg(test)]
pub use self::application_repository::MockApplicationRepository;
#[cfg(test)]
pub use self::current_user_query::MockCurrentUserQuery;
#[cfg(test)]
pub use self::sign_in_service::MockSignInService;
#[cfg(test)]
pub use self::user_repository::MockUserRepository;
#[cfg(test)]
pub use self::visa_type_repository::MockVisaTypeRepository;
