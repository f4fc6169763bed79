
use super::{feedback, games, ratings, users};

use utoipa::{Modify, OpenApi, openapi};
use utoipa::openapi::security::{SecurityScheme, Http, HttpAuthScheme, SecurityRequirement};

#[derive(OpenApi)]
#[openapi(
  paths(
    super::authorize,
    users::list_users, users::get_user, users::create_user, users::update_user,
    users::delete_user, users::get_user_ratings, users::get_user_feedback,
    games::list_games, games::get_game, games::create_game, games::update_game,
    games::delete_game, games::get_game_ratings, games::get_game_feedback,
    ratings::list_ratings, ratings::get_rating, ratings::create_rating,
    ratings::update_rating, ratings::delete_rating, ratings::submit_rating,
    feedback::list_feedback, feedback::get_feedback, feedback::create_feedback,
    feedback::update_feedback, feedback::delete_feedback, feedback::submit_feedback,
  ),
  tags(
    (name = "authorization", description = "Credential login for registered users"),
    (name = "user", description = "User registration and lookup"),
    (name = "game", description = "Game catalog access and creation"),
    (name = "rating", description = "Per-user game ratings"),
    (name = "feedback", description = "Per-user written feedback on games"),
  ),
  modifiers(&SecurityAddon),
  components(),
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
  fn modify(&self, openapi: &mut openapi::OpenApi) {
    let mut components = openapi.components.take().unwrap_or_default();

    let jwt = SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer));
    components.add_security_scheme("Bearer", jwt);

    openapi.components = Some(components);
    openapi.security = Some(vec![SecurityRequirement::new("Bearer".to_string(), Vec::<String>::new())]);
  }
}
