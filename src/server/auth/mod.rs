
//! Identity verification for the catalog API.
//!
//! The authenticated user always travels through the [`AuthenticatedUser`]
//! request guard as an explicit handler parameter. There is no ambient
//! "current user" anywhere in the process.

mod guard;
mod jwt;
mod password;

pub use guard::AuthenticatedUser;
pub use jwt::{create_token, verify_token, JwtClaim, JwtError};
pub use password::{hash_password, verify_password};

use crate::db::schema::users;

use thiserror::Error;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AuthError {
  #[error("{0}")]
  JwtError(#[from] JwtError),
  #[error("{0}")]
  DieselError(#[from] diesel::result::Error),
  #[error("Invalid credentials")]
  InvalidCredentials,
}

/// Checks a credential triple against the stored user row and issues
/// a JWT on success. The user id, username and password must all
/// agree with the same row; a mismatch in any of the three yields the
/// same [`AuthError::InvalidCredentials`], so a caller cannot probe
/// which part was wrong.
pub async fn create_jwt_for_credentials(
  user_id: i32,
  username: &str,
  password: &str,
  db: &mut AsyncPgConnection,
) -> Result<String, AuthError> {
  let stored = users::table
    .find(user_id)
    .select(StoredCredentials::as_select())
    .first(db)
    .await
    .optional()?;
  let Some(stored) = stored else {
    return Err(AuthError::InvalidCredentials);
  };
  if stored.username != username || !password::verify_password(&stored.password_hash, password) {
    return Err(AuthError::InvalidCredentials);
  }
  let token = jwt::create_token(stored.id)?;
  Ok(token)
}

/// Subset of the `User` model containing the columns needed to check
/// a login attempt.
#[derive(Queryable, Selectable, Clone)]
#[diesel(table_name = crate::db::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct StoredCredentials {
  pub id: i32,
  pub username: String,
  pub password_hash: String,
}
