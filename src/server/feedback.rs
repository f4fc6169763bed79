
//! Endpoints for per-user written feedback on games.
//!
//! Mirrors the rating endpoints: a strict creation path that rejects
//! a duplicate (user, game) pair, and a submission path that edits
//! the existing review in place.

use crate::db::{models, schema};
use super::auth::AuthenticatedUser;
use super::data_access::{
  FeedbackListResponse, FeedbackResponse, MessageResponse, NewFeedbackDao, SubmitFeedbackDao,
  UpdateFeedbackDao,
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

pub fn feedback_routes() -> Vec<Route> {
  routes![
    list_feedback,
    get_feedback,
    create_feedback,
    update_feedback,
    delete_feedback,
    submit_feedback,
  ]
}

/// Lists all feedback in insertion order.
#[utoipa::path(
  get,
  path="/api/feedback",
  tag="feedback",
  responses(
    (status = 200, description = "All feedback", body = ApiSuccessResponseBody<FeedbackListResponse>),
  ),
)]
#[get("/feedback")]
pub(crate) async fn list_feedback(mut db: Connection<db::Db>) -> Result<ApiSuccessResponse<FeedbackListResponse>, ApiError> {
  let feedback = schema::user_game_feedback::table
    .order(schema::user_game_feedback::id.asc())
    .load::<models::UserGameFeedback>(&mut db)
    .await?;
  let feedback = feedback.into_iter().map(FeedbackResponse::from).collect();
  Ok(ApiSuccessResponse::new(FeedbackListResponse { feedback }))
}

/// Gets a single piece of feedback by its id.
#[utoipa::path(
  get,
  path="/api/feedback/{id}",
  tag="feedback",
  params(
    ("id" = i32, Path, description = "Feedback id"),
  ),
  responses(
    (status = 200, description = "Feedback details", body = ApiSuccessResponseBody<FeedbackResponse>),
    (status = 404, description = "Feedback not found"),
  ),
)]
#[get("/feedback/<id>")]
pub(crate) async fn get_feedback(id: i32, mut db: Connection<db::Db>) -> Result<ApiSuccessResponse<FeedbackResponse>, ApiError> {
  let feedback = schema::user_game_feedback::table
    .find(id)
    .first::<models::UserGameFeedback>(&mut db)
    .await
    .optional()?
    .ok_or(RuleViolation::NotFound(messages::FEEDBACK_NOT_FOUND))?;
  Ok(ApiSuccessResponse::new(FeedbackResponse::from(feedback)))
}

/// Strictly creates feedback for a (user, game) pair.
///
/// Fails if either referent is missing or if the pair already has
/// feedback. Use the submission endpoint for update-in-place
/// semantics.
#[utoipa::path(
  post,
  path="/api/feedback",
  tag="feedback",
  responses(
    (status = 200, description = "Feedback created successfully", body = ApiSuccessResponseBody<FeedbackResponse>),
    (status = 400, description = "Duplicate submission"),
    (status = 401, description = "No verified identity supplied"),
    (status = 404, description = "User or game not found"),
  ),
)]
#[post("/feedback", data = "<params>")]
pub(crate) async fn create_feedback(
  _user: AuthenticatedUser,
  params: Json<NewFeedbackDao>,
  mut db: Connection<db::Db>,
) -> Result<ApiSuccessResponse<FeedbackResponse>, ApiError> {
  let params = params.0;
  let created = db.transaction::<models::UserGameFeedback, ApiError, _>(|db| async move {
    rules::require_user(params.user_id, db).await?;
    rules::require_game(params.game_id, db).await?;
    if rules::feedback_for_pair(params.user_id, params.game_id, db).await?.is_some() {
      return Err(RuleViolation::DuplicateSubmission.into());
    }
    let new_feedback = models::NewUserGameFeedback {
      user_id: params.user_id,
      game_id: params.game_id,
      feedback_text: params.feedback_text,
    };
    let feedback = diesel::insert_into(schema::user_game_feedback::table)
      .values(&new_feedback)
      .returning(models::UserGameFeedback::as_returning())
      .get_result(db)
      .await?;
    Ok(feedback)
  }.scope_boxed()).await?;
  Ok(ApiSuccessResponse::new(FeedbackResponse::from(created)))
}

/// Replaces the text of an existing piece of feedback.
#[utoipa::path(
  put,
  path="/api/feedback/{id}",
  tag="feedback",
  params(
    ("id" = i32, Path, description = "Feedback id"),
  ),
  responses(
    (status = 200, description = "Feedback updated", body = ApiSuccessResponseBody<FeedbackResponse>),
    (status = 404, description = "Feedback not found"),
  ),
)]
#[put("/feedback/<id>", data = "<params>")]
pub(crate) async fn update_feedback(id: i32, params: Json<UpdateFeedbackDao>, mut db: Connection<db::Db>) -> Result<ApiSuccessResponse<FeedbackResponse>, ApiError> {
  let params = params.0;
  let updated = diesel::update(schema::user_game_feedback::table.find(id))
    .set(schema::user_game_feedback::feedback_text.eq(params.feedback_text))
    .returning(models::UserGameFeedback::as_returning())
    .get_result(&mut db)
    .await
    .optional()?
    .ok_or(RuleViolation::NotFound(messages::FEEDBACK_NOT_FOUND))?;
  Ok(ApiSuccessResponse::new(FeedbackResponse::from(updated)))
}

/// Deletes a single piece of feedback by its id.
#[utoipa::path(
  delete,
  path="/api/feedback/{id}",
  tag="feedback",
  params(
    ("id" = i32, Path, description = "Feedback id"),
  ),
  responses(
    (status = 200, description = "Feedback deleted", body = ApiSuccessResponseBody<MessageResponse>),
    (status = 404, description = "Feedback not found"),
  ),
)]
#[delete("/feedback/<id>")]
pub(crate) async fn delete_feedback(id: i32, mut db: Connection<db::Db>) -> Result<ApiSuccessResponse<MessageResponse>, ApiError> {
  let deleted = diesel::delete(schema::user_game_feedback::table.find(id))
    .execute(&mut db)
    .await?;
  if deleted == 0 {
    return Err(RuleViolation::NotFound(messages::FEEDBACK_NOT_FOUND).into());
  }
  Ok(ApiSuccessResponse::new(MessageResponse { message: messages::FEEDBACK_DELETED }))
}

/// Submits the authenticated user's feedback for a game, editing the
/// existing review in place if one exists.
///
/// The acting user is the verified identity from the bearer token.
#[utoipa::path(
  post,
  path="/api/feedback/submit",
  tag="feedback",
  security(("Bearer" = [])),
  responses(
    (status = 200, description = "Feedback recorded", body = ApiSuccessResponseBody<FeedbackResponse>),
    (status = 401, description = "No verified identity supplied"),
    (status = 404, description = "User or game not found"),
  ),
)]
#[post("/feedback/submit", data = "<params>")]
pub(crate) async fn submit_feedback(
  user: AuthenticatedUser,
  params: Json<SubmitFeedbackDao>,
  mut db: Connection<db::Db>,
) -> Result<ApiSuccessResponse<FeedbackResponse>, ApiError> {
  let params = params.0;
  let user_id = user.user_id();
  let saved = db.transaction::<models::UserGameFeedback, ApiError, _>(|db| async move {
    rules::require_user(user_id, db).await?;
    rules::require_game(params.game_id, db).await?;
    let saved = match rules::feedback_for_pair(user_id, params.game_id, db).await? {
      Some(existing) => {
        diesel::update(schema::user_game_feedback::table.find(existing.id))
          .set(schema::user_game_feedback::feedback_text.eq(params.feedback_text))
          .returning(models::UserGameFeedback::as_returning())
          .get_result(db)
          .await?
      }
      None => {
        let new_feedback = models::NewUserGameFeedback {
          user_id,
          game_id: params.game_id,
          feedback_text: params.feedback_text,
        };
        diesel::insert_into(schema::user_game_feedback::table)
          .values(&new_feedback)
          .returning(models::UserGameFeedback::as_returning())
          .get_result(db)
          .await?
      }
    };
    Ok(saved)
  }.scope_boxed()).await?;
  Ok(ApiSuccessResponse::new(FeedbackResponse::from(saved)))
}
