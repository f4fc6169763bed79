
//! CRUD endpoints for the game catalog.

use crate::db::{models, schema};
use crate::util::slugify;
use super::data_access::{
  FeedbackListResponse, FeedbackResponse, GameResponse, GamesResponse, MessageResponse,
  NewGameDao, RatingResponse, RatingsResponse, UpdateGameDao,
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

pub fn game_routes() -> Vec<Route> {
  routes![
    list_games,
    get_game,
    create_game,
    update_game,
    delete_game,
    get_game_ratings,
    get_game_feedback,
  ]
}

/// Lists the whole catalog in insertion order.
#[utoipa::path(
  get,
  path="/api/game",
  tag="game",
  responses(
    (status = 200, description = "All games in the catalog", body = ApiSuccessResponseBody<GamesResponse>),
  ),
)]
#[get("/game")]
pub(crate) async fn list_games(mut db: Connection<db::Db>) -> Result<ApiSuccessResponse<GamesResponse>, ApiError> {
  let games = schema::games::table
    .order(schema::games::id.asc())
    .load::<models::Game>(&mut db)
    .await?;
  let games = games.into_iter().map(GameResponse::from).collect();
  Ok(ApiSuccessResponse::new(GamesResponse { games }))
}

/// Gets details about the game with the given id.
#[utoipa::path(
  get,
  path="/api/game/{id}",
  tag="game",
  params(
    ("id" = i32, Path, description = "Game id"),
  ),
  responses(
    (status = 200, description = "Game details", body = ApiSuccessResponseBody<GameResponse>),
    (status = 404, description = "Game not found"),
  ),
)]
#[get("/game/<id>")]
pub(crate) async fn get_game(id: i32, mut db: Connection<db::Db>) -> Result<ApiSuccessResponse<GameResponse>, ApiError> {
  let game = rules::require_game(id, &mut db).await?;
  Ok(ApiSuccessResponse::new(GameResponse::from(game)))
}

/// Adds a new game to the catalog.
///
/// Titles are unique; the slug is derived from the title here and
/// never changes afterwards.
#[utoipa::path(
  post,
  path="/api/game",
  tag="game",
  responses(
    (status = 200, description = "Game created successfully", body = ApiSuccessResponseBody<GameResponse>),
    (status = 409, description = "A game with this title already exists"),
  ),
)]
#[post("/game", data = "<params>")]
pub(crate) async fn create_game(params: Json<NewGameDao>, mut db: Connection<db::Db>) -> Result<ApiSuccessResponse<GameResponse>, ApiError> {
  let params = params.0;
  let new_game = models::NewGame {
    slug: slugify(&params.title),
    title: params.title,
    description: params.description,
    rating: params.rating,
    price: params.price,
    feedback: params.feedback,
  };
  let created = diesel::insert_into(schema::games::table)
    .values(&new_game)
    .returning(models::Game::as_returning())
    .get_result(&mut db)
    .await?;

  log::info!("added game {} (id {}) to the catalog", created.title, created.id);
  Ok(ApiSuccessResponse::new(GameResponse::from(created)))
}

/// Updates a game's description, aggregate rating, price and blurb.
/// The title and slug are fixed at creation time.
#[utoipa::path(
  put,
  path="/api/game/{id}",
  tag="game",
  params(
    ("id" = i32, Path, description = "Game id"),
  ),
  responses(
    (status = 200, description = "Game updated", body = ApiSuccessResponseBody<GameResponse>),
    (status = 404, description = "Game not found"),
  ),
)]
#[put("/game/<id>", data = "<params>")]
pub(crate) async fn update_game(id: i32, params: Json<UpdateGameDao>, mut db: Connection<db::Db>) -> Result<ApiSuccessResponse<GameResponse>, ApiError> {
  let params = params.0;
  let changes = models::GameChangeset {
    description: params.description,
    rating: params.rating,
    price: params.price,
    feedback: params.feedback,
  };
  let updated = diesel::update(schema::games::table.find(id))
    .set(&changes)
    .returning(models::Game::as_returning())
    .get_result(&mut db)
    .await
    .optional()?
    .ok_or(RuleViolation::NotFound(messages::GAME_NOT_FOUND))?;
  Ok(ApiSuccessResponse::new(GameResponse::from(updated)))
}

/// Removes a game from the catalog together with every rating and
/// piece of feedback attached to it, in one transaction.
#[utoipa::path(
  delete,
  path="/api/game/{id}",
  tag="game",
  params(
    ("id" = i32, Path, description = "Game id"),
  ),
  responses(
    (status = 200, description = "Game deleted", body = ApiSuccessResponseBody<MessageResponse>),
    (status = 404, description = "Game not found"),
  ),
)]
#[delete("/game/<id>")]
pub(crate) async fn delete_game(id: i32, mut db: Connection<db::Db>) -> Result<ApiSuccessResponse<MessageResponse>, ApiError> {
  db.transaction::<(), ApiError, _>(|db| async move {
    rules::require_game(id, db).await?;
    diesel::delete(schema::user_game_ratings::table.filter(schema::user_game_ratings::game_id.eq(id)))
      .execute(db)
      .await?;
    diesel::delete(schema::user_game_feedback::table.filter(schema::user_game_feedback::game_id.eq(id)))
      .execute(db)
      .await?;
    diesel::delete(schema::games::table.find(id))
      .execute(db)
      .await?;
    Ok(())
  }.scope_boxed()).await?;

  log::info!("removed game {id} and dependent submissions");
  Ok(ApiSuccessResponse::new(MessageResponse { message: messages::GAME_DELETED }))
}

/// Lists all per-user ratings attached to the given game.
#[utoipa::path(
  get,
  path="/api/game/{id}/ratings",
  tag="game",
  params(
    ("id" = i32, Path, description = "Game id"),
  ),
  responses(
    (status = 200, description = "Ratings for the game", body = ApiSuccessResponseBody<RatingsResponse>),
    (status = 404, description = "Game not found"),
  ),
)]
#[get("/game/<id>/ratings")]
pub(crate) async fn get_game_ratings(id: i32, mut db: Connection<db::Db>) -> Result<ApiSuccessResponse<RatingsResponse>, ApiError> {
  rules::require_game(id, &mut db).await?;
  let ratings = schema::user_game_ratings::table
    .filter(schema::user_game_ratings::game_id.eq(id))
    .order(schema::user_game_ratings::id.asc())
    .load::<models::UserGameRating>(&mut db)
    .await?;
  let ratings = ratings.into_iter().map(RatingResponse::from).collect();
  Ok(ApiSuccessResponse::new(RatingsResponse { ratings }))
}

/// Lists all per-user feedback attached to the given game.
#[utoipa::path(
  get,
  path="/api/game/{id}/feedback",
  tag="game",
  params(
    ("id" = i32, Path, description = "Game id"),
  ),
  responses(
    (status = 200, description = "Feedback for the game", body = ApiSuccessResponseBody<FeedbackListResponse>),
    (status = 404, description = "Game not found"),
  ),
)]
#[get("/game/<id>/feedback")]
pub(crate) async fn get_game_feedback(id: i32, mut db: Connection<db::Db>) -> Result<ApiSuccessResponse<FeedbackListResponse>, ApiError> {
  rules::require_game(id, &mut db).await?;
  let feedback = schema::user_game_feedback::table
    .filter(schema::user_game_feedback::game_id.eq(id))
    .order(schema::user_game_feedback::id.asc())
    .load::<models::UserGameFeedback>(&mut db)
    .await?;
  let feedback = feedback.into_iter().map(FeedbackResponse::from).collect();
  Ok(ApiSuccessResponse::new(FeedbackListResponse { feedback }))
}
