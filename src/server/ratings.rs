
//! Endpoints for per-user game ratings.
//!
//! There are two deliberately distinct write paths for the same
//! (user, game) business key: strict creation, which rejects a
//! duplicate pair, and submission, which updates the existing row in
//! place. External callers depend on both behaviors, so they are
//! never unified.

use crate::db::{models, schema};
use super::auth::AuthenticatedUser;
use super::data_access::{
  MessageResponse, NewRatingDao, RatingResponse, RatingsResponse, SubmitRatingDao, UpdateRatingDao,
};
use super::db;
use super::error::{messages, ApiError, ApiSuccessResponse, ApiSuccessResponseBody};
use super::rules::{self, RuleViolation};

use rocket::{Route, routes, get, post, put, delete};
use rocket::serde::json::Json;
use rocket_db_pools::Connection;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};
use scoped_futures::ScopedFutureExt;

pub fn rating_routes() -> Vec<Route> {
  routes![
    list_ratings,
    get_rating,
    create_rating,
    update_rating,
    delete_rating,
    submit_rating,
  ]
}

/// Lists all ratings in insertion order.
#[utoipa::path(
  get,
  path="/api/rating",
  tag="rating",
  responses(
    (status = 200, description = "All ratings", body = ApiSuccessResponseBody<RatingsResponse>),
  ),
)]
#[get("/rating")]
pub(crate) async fn list_ratings(mut db: Connection<db::Db>) -> Result<ApiSuccessResponse<RatingsResponse>, ApiError> {
  let ratings = schema::user_game_ratings::table
    .order(schema::user_game_ratings::id.asc())
    .load::<models::UserGameRating>(&mut db)
    .await?;
  let ratings = ratings.into_iter().map(RatingResponse::from).collect();
  Ok(ApiSuccessResponse::new(RatingsResponse { ratings }))
}

/// Gets a single rating by its id.
#[utoipa::path(
  get,
  path="/api/rating/{id}",
  tag="rating",
  params(
    ("id" = i32, Path, description = "Rating id"),
  ),
  responses(
    (status = 200, description = "Rating details", body = ApiSuccessResponseBody<RatingResponse>),
    (status = 404, description = "Rating not found"),
  ),
)]
#[get("/rating/<id>")]
pub(crate) async fn get_rating(id: i32, mut db: Connection<db::Db>) -> Result<ApiSuccessResponse<RatingResponse>, ApiError> {
  let rating = schema::user_game_ratings::table
    .find(id)
    .first::<models::UserGameRating>(&mut db)
    .await
    .optional()?
    .ok_or(RuleViolation::NotFound(messages::RATING_NOT_FOUND))?;
  Ok(ApiSuccessResponse::new(RatingResponse::from(rating)))
}

/// Strictly creates a rating for a (user, game) pair.
///
/// Fails if either referent is missing, if the value is out of range,
/// or if the pair already has a rating. Use the submission endpoint
/// for update-in-place semantics.
#[utoipa::path(
  post,
  path="/api/rating",
  tag="rating",
  responses(
    (status = 200, description = "Rating created successfully", body = ApiSuccessResponseBody<RatingResponse>),
    (status = 400, description = "Out-of-range value or duplicate submission"),
    (status = 401, description = "No verified identity supplied"),
    (status = 404, description = "User or game not found"),
  ),
)]
#[post("/rating", data = "<params>")]
pub(crate) async fn create_rating(
  _user: AuthenticatedUser,
  params: Json<NewRatingDao>,
  mut db: Connection<db::Db>,
) -> Result<ApiSuccessResponse<RatingResponse>, ApiError> {
  let params = params.0;
  let created = db.transaction::<models::UserGameRating, ApiError, _>(|db| async move {
    rules::require_user(params.user_id, db).await?;
    rules::require_game(params.game_id, db).await?;
    rules::check_rating_bounds(params.rating_int)?;
    if rules::rating_for_pair(params.user_id, params.game_id, db).await?.is_some() {
      return Err(RuleViolation::DuplicateSubmission.into());
    }
    let new_rating = models::NewUserGameRating {
      user_id: params.user_id,
      game_id: params.game_id,
      rating_int: params.rating_int,
    };
    let rating = diesel::insert_into(schema::user_game_ratings::table)
      .values(&new_rating)
      .returning(models::UserGameRating::as_returning())
      .get_result(db)
      .await?;
    Ok(rating)
  }.scope_boxed()).await?;
  Ok(ApiSuccessResponse::new(RatingResponse::from(created)))
}

/// Changes the value of an existing rating. The new value is subject
/// to the same bounds as at creation.
#[utoipa::path(
  put,
  path="/api/rating/{id}",
  tag="rating",
  params(
    ("id" = i32, Path, description = "Rating id"),
  ),
  responses(
    (status = 200, description = "Rating updated", body = ApiSuccessResponseBody<RatingResponse>),
    (status = 400, description = "Out-of-range value"),
    (status = 404, description = "Rating not found"),
  ),
)]
#[put("/rating/<id>", data = "<params>")]
pub(crate) async fn update_rating(id: i32, params: Json<UpdateRatingDao>, mut db: Connection<db::Db>) -> Result<ApiSuccessResponse<RatingResponse>, ApiError> {
  let params = params.0;
  rules::check_rating_bounds(params.rating_int)?;
  let updated = diesel::update(schema::user_game_ratings::table.find(id))
    .set(schema::user_game_ratings::rating_int.eq(params.rating_int))
    .returning(models::UserGameRating::as_returning())
    .get_result(&mut db)
    .await
    .optional()?
    .ok_or(RuleViolation::NotFound(messages::RATING_NOT_FOUND))?;
  Ok(ApiSuccessResponse::new(RatingResponse::from(updated)))
}

/// Deletes a single rating by its id.
#[utoipa::path(
  delete,
  path="/api/rating/{id}",
  tag="rating",
  params(
    ("id" = i32, Path, description = "Rating id"),
  ),
  responses(
    (status = 200, description = "Rating deleted", body = ApiSuccessResponseBody<MessageResponse>),
    (status = 404, description = "Rating not found"),
  ),
)]
#[delete("/rating/<id>")]
pub(crate) async fn delete_rating(id: i32, mut db: Connection<db::Db>) -> Result<ApiSuccessResponse<MessageResponse>, ApiError> {
  let deleted = diesel::delete(schema::user_game_ratings::table.find(id))
    .execute(&mut db)
    .await?;
  if deleted == 0 {
    return Err(RuleViolation::NotFound(messages::RATING_NOT_FOUND).into());
  }
  Ok(ApiSuccessResponse::new(MessageResponse { message: messages::RATING_DELETED }))
}

/// Submits the authenticated user's rating for a game, updating the
/// existing row in place if the user has already rated it.
///
/// This is the upsert counterpart of the strict creation endpoint.
/// The acting user is the verified identity from the bearer token.
#[utoipa::path(
  post,
  path="/api/rating/submit",
  tag="rating",
  security(("Bearer" = [])),
  responses(
    (status = 200, description = "Rating recorded", body = ApiSuccessResponseBody<RatingResponse>),
    (status = 400, description = "Out-of-range value"),
    (status = 401, description = "No verified identity supplied"),
    (status = 404, description = "User or game not found"),
  ),
)]
#[post("/rating/submit", data = "<params>")]
pub(crate) async fn submit_rating(
  user: AuthenticatedUser,
  params: Json<SubmitRatingDao>,
  mut db: Connection<db::Db>,
) -> Result<ApiSuccessResponse<RatingResponse>, ApiError> {
  let params = params.0;
  let user_id = user.user_id();
  let saved = db.transaction::<models::UserGameRating, ApiError, _>(|db| async move {
    rules::require_user(user_id, db).await?;
    rules::require_game(params.game_id, db).await?;
    rules::check_rating_bounds(params.rating_int)?;
    let saved = match rules::rating_for_pair(user_id, params.game_id, db).await? {
      Some(existing) => {
        diesel::update(schema::user_game_ratings::table.find(existing.id))
          .set(schema::user_game_ratings::rating_int.eq(params.rating_int))
          .returning(models::UserGameRating::as_returning())
          .get_result(db)
          .await?
      }
      None => {
        let new_rating = models::NewUserGameRating {
          user_id,
          game_id: params.game_id,
          rating_int: params.rating_int,
        };
        diesel::insert_into(schema::user_game_ratings::table)
          .values(&new_rating)
          .returning(models::UserGameRating::as_returning())
          .get_result(db)
          .await?
      }
    };
    Ok(saved)
  }.scope_boxed()).await?;
  Ok(ApiSuccessResponse::new(RatingResponse::from(saved)))
}
