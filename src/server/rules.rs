
//! Business rules enforced before any catalog mutation.
//!
//! Handlers call into this module for the checks that guard the
//! store: rating bounds, referential existence, one-rating-and-one-
//! review-per-(user, game) uniqueness, and username uniqueness.

use crate::db::{models, schema};
use super::error::{messages, ApiError};

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use thiserror::Error;

/// Inclusive bounds on a per-user game rating.
pub const MIN_RATING: i32 = 0;
pub const MAX_RATING: i32 = 10;

/// A business-rule violation. Each variant corresponds to exactly one
/// observable, typed failure; no violation is ever silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
  #[error("{0}")]
  NotFound(&'static str),
  #[error("User has already submitted an entry for this game")]
  DuplicateSubmission,
  #[error("Username is already taken")]
  DuplicateUsername,
  #[error("Rating must be between 0 and 10")]
  OutOfRange,
  #[error("User is not authenticated")]
  Unauthenticated,
}

/// Rejects rating values outside the inclusive `0..=10` range. The
/// check runs before any write, on strict creation, update and upsert
/// alike.
pub fn check_rating_bounds(rating_int: i32) -> Result<(), RuleViolation> {
  if !(MIN_RATING..=MAX_RATING).contains(&rating_int) {
    return Err(RuleViolation::OutOfRange);
  }
  Ok(())
}

/// Looks up a user by id, failing with a 404 if absent.
pub async fn require_user(user_id: i32, db: &mut AsyncPgConnection) -> Result<models::User, ApiError> {
  schema::users::table
    .find(user_id)
    .first::<models::User>(db)
    .await
    .optional()?
    .ok_or_else(|| RuleViolation::NotFound(messages::USER_NOT_FOUND).into())
}

/// Looks up a game by id, failing with a 404 if absent.
pub async fn require_game(game_id: i32, db: &mut AsyncPgConnection) -> Result<models::Game, ApiError> {
  schema::games::table
    .find(game_id)
    .first::<models::Game>(db)
    .await
    .optional()?
    .ok_or_else(|| RuleViolation::NotFound(messages::GAME_NOT_FOUND).into())
}

/// Fails if the username is already taken. The check runs before the
/// insert rather than relying on the storage-level constraint, which
/// only exists as a backstop.
pub async fn require_unique_username(username: &str, db: &mut AsyncPgConnection) -> Result<(), ApiError> {
  let existing = schema::users::table
    .filter(schema::users::username.eq(username))
    .select(schema::users::id)
    .first::<i32>(db)
    .await
    .optional()?;
  if existing.is_some() {
    return Err(RuleViolation::DuplicateUsername.into());
  }
  Ok(())
}

/// Fetches the rating row for a (user, game) pair, if one exists.
/// Callers decide whether an existing row is a duplicate (strict
/// creation) or the target of an in-place update (upsert). The
/// decision must always test the row returned here, never merely that
/// the lookup ran.
pub async fn rating_for_pair(user_id: i32, game_id: i32, db: &mut AsyncPgConnection) -> Result<Option<models::UserGameRating>, ApiError> {
  let rating = schema::user_game_ratings::table
    .filter(schema::user_game_ratings::user_id.eq(user_id))
    .filter(schema::user_game_ratings::game_id.eq(game_id))
    .first::<models::UserGameRating>(db)
    .await
    .optional()?;
  Ok(rating)
}

/// Fetches the feedback row for a (user, game) pair, if one exists.
pub async fn feedback_for_pair(user_id: i32, game_id: i32, db: &mut AsyncPgConnection) -> Result<Option<models::UserGameFeedback>, ApiError> {
  let feedback = schema::user_game_feedback::table
    .filter(schema::user_game_feedback::user_id.eq(user_id))
    .filter(schema::user_game_feedback::game_id.eq(game_id))
    .first::<models::UserGameFeedback>(db)
    .await
    .optional()?;
  Ok(feedback)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ratings_at_the_bounds_are_accepted() {
    assert_eq!(check_rating_bounds(MIN_RATING), Ok(()));
    assert_eq!(check_rating_bounds(7), Ok(()));
    assert_eq!(check_rating_bounds(MAX_RATING), Ok(()));
  }

  #[test]
  fn ratings_outside_the_bounds_are_rejected() {
    assert_eq!(check_rating_bounds(-1), Err(RuleViolation::OutOfRange));
    assert_eq!(check_rating_bounds(11), Err(RuleViolation::OutOfRange));
    assert_eq!(check_rating_bounds(i32::MIN), Err(RuleViolation::OutOfRange));
  }
}
