
//! Request and response records for the catalog API.
//!
//! Response types expose exactly the entity field sets; the password
//! hash never appears in any response.

use crate::db::models;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginDao {
  /// Id of the user logging in. All three fields must agree with the
  /// same stored row.
  pub user_id: i32,
  pub username: String,
  pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewUserDao {
  pub username: String,
  pub firstname: String,
  pub lastname: String,
  pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserDao {
  pub firstname: String,
  pub lastname: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
  pub id: i32,
  pub username: String,
  pub firstname: String,
  pub lastname: String,
  /// URL-safe identifier derived from the username at creation time.
  pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UsersResponse {
  pub users: Vec<UserResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewGameDao {
  pub title: String,
  pub description: String,
  /// Aggregate catalog rating, independent of per-user ratings.
  pub rating: i32,
  pub price: f64,
  /// Editorial blurb, independent of per-user feedback.
  pub feedback: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateGameDao {
  pub description: String,
  pub rating: i32,
  pub price: f64,
  pub feedback: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GameResponse {
  pub id: i32,
  pub title: String,
  pub description: String,
  pub rating: i32,
  pub price: f64,
  pub feedback: String,
  pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GamesResponse {
  pub games: Vec<GameResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewRatingDao {
  pub user_id: i32,
  pub game_id: i32,
  pub rating_int: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateRatingDao {
  pub rating_int: i32,
}

/// Body for the upsert entry point. The acting user comes from the
/// verified identity, not from the body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitRatingDao {
  pub game_id: i32,
  pub rating_int: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RatingResponse {
  pub id: i32,
  pub user_id: i32,
  pub game_id: i32,
  pub rating_int: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RatingsResponse {
  pub ratings: Vec<RatingResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewFeedbackDao {
  pub user_id: i32,
  pub game_id: i32,
  pub feedback_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateFeedbackDao {
  pub feedback_text: String,
}

/// Body for the upsert entry point. The acting user comes from the
/// verified identity, not from the body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitFeedbackDao {
  pub game_id: i32,
  pub feedback_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedbackResponse {
  pub id: i32,
  pub user_id: i32,
  pub game_id: i32,
  pub feedback_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedbackListResponse {
  pub feedback: Vec<FeedbackResponse>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
  pub message: &'static str,
}

impl From<models::User> for UserResponse {
  fn from(u: models::User) -> Self {
    Self {
      id: u.id,
      username: u.username,
      firstname: u.firstname,
      lastname: u.lastname,
      slug: u.slug,
    }
  }
}

impl From<models::Game> for GameResponse {
  fn from(g: models::Game) -> Self {
    Self {
      id: g.id,
      title: g.title,
      description: g.description,
      rating: g.rating,
      price: g.price,
      feedback: g.feedback,
      slug: g.slug,
    }
  }
}

impl From<models::UserGameRating> for RatingResponse {
  fn from(r: models::UserGameRating) -> Self {
    Self {
      id: r.id,
      user_id: r.user_id,
      game_id: r.game_id,
      rating_int: r.rating_int,
    }
  }
}

impl From<models::UserGameFeedback> for FeedbackResponse {
  fn from(f: models::UserGameFeedback) -> Self {
    Self {
      id: f.id,
      user_id: f.user_id,
      game_id: f.game_id,
      feedback_text: f.feedback_text,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_user() -> models::User {
    models::User {
      id: 1,
      username: String::from("alice"),
      firstname: String::from("A"),
      lastname: String::from("L"),
      password_hash: String::from("$argon2id$v=19$m=19456,t=2,p=1$abc$def"),
      slug: String::from("alice"),
    }
  }

  #[test]
  fn user_responses_never_carry_the_password_hash() {
    let response = UserResponse::from(sample_user());
    let json = serde_json::to_value(&response).unwrap();
    assert!(json.get("password").is_none());
    assert!(json.get("password_hash").is_none());
    assert_eq!(json["username"], "alice");
    assert_eq!(json["slug"], "alice");
  }

  #[test]
  fn rating_response_mirrors_the_row() {
    let response = RatingResponse::from(models::UserGameRating {
      id: 3,
      user_id: 1,
      game_id: 2,
      rating_int: 7,
    });
    assert_eq!(response.user_id, 1);
    assert_eq!(response.game_id, 2);
    assert_eq!(response.rating_int, 7);
  }
}
