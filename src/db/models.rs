
use diesel::prelude::*;

#[derive(Queryable, Selectable, Clone)]
#[diesel(table_name = super::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
  pub id: i32,
  pub username: String,
  pub firstname: String,
  pub lastname: String,
  pub password_hash: String,
  pub slug: String,
}

#[derive(Insertable, Clone)]
#[diesel(table_name = super::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUser {
  pub username: String,
  pub firstname: String,
  pub lastname: String,
  pub password_hash: String,
  pub slug: String,
}

/// The subset of `users` columns that may change after creation.
/// Identity columns, the password hash and the slug are deliberately
/// absent.
#[derive(AsChangeset, Clone)]
#[diesel(table_name = super::schema::users)]
pub struct UserChangeset {
  pub firstname: String,
  pub lastname: String,
}

#[derive(Queryable, Selectable, Clone)]
#[diesel(table_name = super::schema::games)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Game {
  pub id: i32,
  pub title: String,
  pub description: String,
  pub rating: i32,
  pub price: f64,
  pub feedback: String,
  pub slug: String,
}

#[derive(Insertable, Clone)]
#[diesel(table_name = super::schema::games)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewGame {
  pub title: String,
  pub description: String,
  pub rating: i32,
  pub price: f64,
  pub feedback: String,
  pub slug: String,
}

/// Mutable subset of `games`. The title (and hence the slug) is fixed
/// at creation time.
#[derive(AsChangeset, Clone)]
#[diesel(table_name = super::schema::games)]
pub struct GameChangeset {
  pub description: String,
  pub rating: i32,
  pub price: f64,
  pub feedback: String,
}

#[derive(Queryable, Selectable, Associations, Clone)]
#[diesel(belongs_to(User))]
#[diesel(belongs_to(Game))]
#[diesel(table_name = super::schema::user_game_ratings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserGameRating {
  pub id: i32,
  pub user_id: i32,
  pub game_id: i32,
  pub rating_int: i32,
}

#[derive(Insertable, Clone)]
#[diesel(table_name = super::schema::user_game_ratings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUserGameRating {
  pub user_id: i32,
  pub game_id: i32,
  pub rating_int: i32,
}

#[derive(Queryable, Selectable, Associations, Clone)]
#[diesel(belongs_to(User))]
#[diesel(belongs_to(Game))]
#[diesel(table_name = super::schema::user_game_feedback)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserGameFeedback {
  pub id: i32,
  pub user_id: i32,
  pub game_id: i32,
  pub feedback_text: String,
}

#[derive(Insertable, Clone)]
#[diesel(table_name = super::schema::user_game_feedback)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUserGameFeedback {
  pub user_id: i32,
  pub game_id: i32,
  pub feedback_text: String,
}
