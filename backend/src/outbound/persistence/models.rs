//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{users, visa_applications, visa_types};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub open_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub login_method: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_signed_in: DateTime<Utc>,
}

/// Insertable struct for the first sign-in of a user.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub open_id: &'a str,
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub login_method: Option<&'a str>,
}

/// Changeset applied on a repeat sign-in.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct SignInUpdate<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub login_method: Option<&'a str>,
    pub last_signed_in: DateTime<Utc>,
}

/// Row struct for reading from the visa_types table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = visa_types)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VisaTypeRow {
    pub id: i32,
    pub name_ar: String,
    pub name_en: String,
    pub description_ar: Option<String>,
    pub description_en: Option<String>,
    pub price: i32,
    pub processing_days: i32,
    pub requirements: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the visa_applications table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = visa_applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VisaApplicationRow {
    pub id: i32,
    pub user_id: i32,
    pub visa_type_id: i32,
    pub status: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub passport_number: String,
    pub nationality: String,
    pub travel_date: Option<DateTime<Utc>>,
    pub documents: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new application records.
///
/// Ids and timestamps are store-assigned; status is written explicitly so
/// the initial state never depends on a column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = visa_applications)]
pub(crate) struct NewVisaApplicationRow<'a> {
    pub user_id: i32,
    pub visa_type_id: i32,
    pub status: &'a str,
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub passport_number: &'a str,
    pub nationality: &'a str,
    pub travel_date: Option<DateTime<Utc>>,
    pub documents: Option<&'a str>,
    pub notes: Option<&'a str>,
}
