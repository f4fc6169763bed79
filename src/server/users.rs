
//! CRUD endpoints for registered users.

use crate::db::{models, schema};
use crate::util::slugify;
use super::auth::hash_password;
use super::data_access::{
  FeedbackListResponse, FeedbackResponse, MessageResponse, NewUserDao, RatingResponse,
  RatingsResponse, UpdateUserDao, UserResponse, UsersResponse,
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

pub fn user_routes() -> Vec<Route> {
  routes![
    list_users,
    get_user,
    create_user,
    update_user,
    delete_user,
    get_user_ratings,
    get_user_feedback,
  ]
}

/// Lists all registered users in insertion order.
#[utoipa::path(
  get,
  path="/api/user",
  tag="user",
  responses(
    (status = 200, description = "All registered users", body = ApiSuccessResponseBody<UsersResponse>),
  ),
)]
#[get("/user")]
pub(crate) async fn list_users(mut db: Connection<db::Db>) -> Result<ApiSuccessResponse<UsersResponse>, ApiError> {
  let users = schema::users::table
    .order(schema::users::id.asc())
    .load::<models::User>(&mut db)
    .await?;
  let users = users.into_iter().map(UserResponse::from).collect();
  Ok(ApiSuccessResponse::new(UsersResponse { users }))
}

/// Gets information about the user with the given id.
#[utoipa::path(
  get,
  path="/api/user/{id}",
  tag="user",
  params(
    ("id" = i32, Path, description = "User id"),
  ),
  responses(
    (status = 200, description = "User information", body = ApiSuccessResponseBody<UserResponse>),
    (status = 404, description = "User not found"),
  ),
)]
#[get("/user/<id>")]
pub(crate) async fn get_user(id: i32, mut db: Connection<db::Db>) -> Result<ApiSuccessResponse<UserResponse>, ApiError> {
  let user = rules::require_user(id, &mut db).await?;
  Ok(ApiSuccessResponse::new(UserResponse::from(user)))
}

/// Registers a new user.
///
/// The username must not already be taken. The user's slug is derived
/// from the username here and never changes afterwards.
#[utoipa::path(
  post,
  path="/api/user",
  tag="user",
  responses(
    (status = 200, description = "User created successfully", body = ApiSuccessResponseBody<UserResponse>),
    (status = 400, description = "Username is already taken"),
  ),
)]
#[post("/user", data = "<params>")]
pub(crate) async fn create_user(params: Json<NewUserDao>, mut db: Connection<db::Db>) -> Result<ApiSuccessResponse<UserResponse>, ApiError> {
  let params = params.0;
  let password_hash = hash_password(&params.password)
    .map_err(|err| ApiError::internal_server_error(err.to_string()))?;
  let new_user = models::NewUser {
    slug: slugify(&params.username),
    username: params.username,
    firstname: params.firstname,
    lastname: params.lastname,
    password_hash,
  };

  let created = db.transaction::<models::User, ApiError, _>(|db| async move {
    rules::require_unique_username(&new_user.username, db).await?;
    let user = diesel::insert_into(schema::users::table)
      .values(&new_user)
      .returning(models::User::as_returning())
      .get_result(db)
      .await?;
    Ok(user)
  }.scope_boxed()).await?;

  log::info!("registered user {} (id {})", created.username, created.id);
  Ok(ApiSuccessResponse::new(UserResponse::from(created)))
}

/// Updates the user's first and last name. No other field of a user
/// can change after registration.
#[utoipa::path(
  put,
  path="/api/user/{id}",
  tag="user",
  params(
    ("id" = i32, Path, description = "User id"),
  ),
  responses(
    (status = 200, description = "User updated", body = ApiSuccessResponseBody<UserResponse>),
    (status = 404, description = "User not found"),
  ),
)]
#[put("/user/<id>", data = "<params>")]
pub(crate) async fn update_user(id: i32, params: Json<UpdateUserDao>, mut db: Connection<db::Db>) -> Result<ApiSuccessResponse<UserResponse>, ApiError> {
  let params = params.0;
  let changes = models::UserChangeset {
    firstname: params.firstname,
    lastname: params.lastname,
  };
  let updated = diesel::update(schema::users::table.find(id))
    .set(&changes)
    .returning(models::User::as_returning())
    .get_result(&mut db)
    .await
    .optional()?
    .ok_or(RuleViolation::NotFound(messages::USER_NOT_FOUND))?;
  Ok(ApiSuccessResponse::new(UserResponse::from(updated)))
}

/// Deletes a user together with all ratings and feedback the user has
/// submitted. The cascade happens here, in one transaction; the
/// storage layer does not cascade on its own.
#[utoipa::path(
  delete,
  path="/api/user/{id}",
  tag="user",
  params(
    ("id" = i32, Path, description = "User id"),
  ),
  responses(
    (status = 200, description = "User deleted", body = ApiSuccessResponseBody<MessageResponse>),
    (status = 404, description = "User not found"),
  ),
)]
#[delete("/user/<id>")]
pub(crate) async fn delete_user(id: i32, mut db: Connection<db::Db>) -> Result<ApiSuccessResponse<MessageResponse>, ApiError> {
  db.transaction::<(), ApiError, _>(|db| async move {
    rules::require_user(id, db).await?;
    diesel::delete(schema::user_game_ratings::table.filter(schema::user_game_ratings::user_id.eq(id)))
      .execute(db)
      .await?;
    diesel::delete(schema::user_game_feedback::table.filter(schema::user_game_feedback::user_id.eq(id)))
      .execute(db)
      .await?;
    diesel::delete(schema::users::table.find(id))
      .execute(db)
      .await?;
    Ok(())
  }.scope_boxed()).await?;

  log::info!("deleted user {id} and dependent submissions");
  Ok(ApiSuccessResponse::new(MessageResponse { message: messages::USER_DELETED }))
}

/// Lists all ratings submitted by the given user.
#[utoipa::path(
  get,
  path="/api/user/{id}/ratings",
  tag="user",
  params(
    ("id" = i32, Path, description = "User id"),
  ),
  responses(
    (status = 200, description = "Ratings submitted by the user", body = ApiSuccessResponseBody<RatingsResponse>),
    (status = 404, description = "User not found"),
  ),
)]
#[get("/user/<id>/ratings")]
pub(crate) async fn get_user_ratings(id: i32, mut db: Connection<db::Db>) -> Result<ApiSuccessResponse<RatingsResponse>, ApiError> {
  rules::require_user(id, &mut db).await?;
  let ratings = schema::user_game_ratings::table
    .filter(schema::user_game_ratings::user_id.eq(id))
    .order(schema::user_game_ratings::id.asc())
    .load::<models::UserGameRating>(&mut db)
    .await?;
  let ratings = ratings.into_iter().map(RatingResponse::from).collect();
  Ok(ApiSuccessResponse::new(RatingsResponse { ratings }))
}

/// Lists all feedback submitted by the given user.
#[utoipa::path(
  get,
  path="/api/user/{id}/feedback",
  tag="user",
  params(
    ("id" = i32, Path, description = "User id"),
  ),
  responses(
    (status = 200, description = "Feedback submitted by the user", body = ApiSuccessResponseBody<FeedbackListResponse>),
    (status = 404, description = "User not found"),
  ),
)]
#[get("/user/<id>/feedback")]
pub(crate) async fn get_user_feedback(id: i32, mut db: Connection<db::Db>) -> Result<ApiSuccessResponse<FeedbackListResponse>, ApiError> {
  rules::require_user(id, &mut db).await?;
  let feedback = schema::user_game_feedback::table
    .filter(schema::user_game_feedback::user_id.eq(id))
    .order(schema::user_game_feedback::id.asc())
    .load::<models::UserGameFeedback>(&mut db)
    .await?;
  let feedback = feedback.into_iter().map(FeedbackResponse::from).collect();
  Ok(ApiSuccessResponse::new(FeedbackListResponse { feedback }))
}
