//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! The sign-in upsert is keyed on the unique `open_id` column: the first
//! sign-in inserts the row, every later sign-in refreshes the profile fields
//! and `last_signed_in` in place.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{OpenId, Role, SignInProfile, User, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, SignInUpdate, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> UserRepositoryError {
    map_pool_error(error, |message| UserRepositoryError::connection(message))
}

fn map_diesel(error: diesel::result::Error) -> UserRepositoryError {
    map_diesel_error(
        error,
        |message| UserRepositoryError::query(message),
        |message| UserRepositoryError::connection(message),
    )
}

/// Convert a database row into a validated domain user.
fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let UserRow {
        id,
        open_id,
        name,
        email,
        login_method,
        role,
        created_at,
        updated_at,
        last_signed_in,
    } = row;

    let open_id =
        OpenId::new(open_id).map_err(|err| UserRepositoryError::query(err.to_string()))?;
    let role = role
        .parse::<Role>()
        .map_err(|err| UserRepositoryError::query(err.to_string()))?;

    Ok(User {
        id: UserId::new(id),
        open_id,
        name,
        email,
        login_method,
        role,
        created_at,
        updated_at,
        last_signed_in,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn upsert_sign_in(&self, profile: &SignInProfile) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewUserRow {
            open_id: profile.open_id().as_str(),
            name: profile.name(),
            email: profile.email(),
            login_method: profile.login_method(),
        };
        let update = SignInUpdate {
            name: profile.name(),
            email: profile.email(),
            login_method: profile.login_method(),
            last_signed_in: Utc::now(),
        };

        let row = diesel::insert_into(users::table)
            .values(&new_row)
            .on_conflict(users::open_id)
            .do_update()
            .set(&update)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        row_to_user(row)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = users::table
            .find(id.as_i32())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Row decoding coverage; live queries are exercised against a real
    //! database out of band.
    use rstest::rstest;

    use super::*;

    fn row(role: &str) -> UserRow {
        UserRow {
            id: 7,
            open_id: "manus-7f3a".to_owned(),
            name: Some("Ali Hassan".to_owned()),
            email: None,
            login_method: Some("oauth".to_owned()),
            role: role.to_owned(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_signed_in: Utc::now(),
        }
    }

    #[rstest]
    fn decodes_a_valid_row() {
        let user = row_to_user(row("user")).expect("valid row");
        assert_eq!(user.id, UserId::new(7));
        assert_eq!(user.role, Role::User);
        assert_eq!(user.open_id.as_str(), "manus-7f3a");
    }

    #[rstest]
    fn rejects_an_out_of_set_role() {
        let err = row_to_user(row("superadmin")).expect_err("unknown role must fail");
        assert!(matches!(err, UserRepositoryError::Query { .. }));
    }
}
