//! Diesel/PostgreSQL driven adapters for the domain ports.

mod diesel_application_repository;
mod diesel_error_mapping;
mod diesel_user_repository;
mod diesel_visa_type_repository;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_application_repository::DieselApplicationRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_visa_type_repository::DieselVisaTypeRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
