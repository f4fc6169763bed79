
pub mod auth;
pub mod data_access;
pub mod db;
pub mod error;
pub mod feedback;
pub mod games;
pub mod openapi;
pub mod ratings;
pub mod rules;
pub mod users;

use error::{messages, ApiError, ApiSuccessResponse, ApiSuccessResponseBody};
use auth::{create_jwt_for_credentials, AuthError};
use data_access::LoginDao;

use rocket::{Route, Rocket, Build, Ignite, routes, post};
use rocket::serde::json::Json;
use rocket_db_pools::{Database, Connection};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthResponse {
  /// A fresh JWT token associated to the user.
  pub token: String,
}

pub async fn run_server() -> Result<Rocket<Ignite>, rocket::Error> {
  build_rocket().launch().await
}

pub fn build_rocket() -> Rocket<Build> {
  let mut base_api_routes = Vec::new();
  base_api_routes.extend(api_routes());
  base_api_routes.extend(users::user_routes());
  base_api_routes.extend(games::game_routes());
  base_api_routes.extend(ratings::rating_routes());
  base_api_routes.extend(feedback::feedback_routes());

  rocket::build()
    .mount("/api", base_api_routes)
    .mount("/", SwaggerUi::new("/swagger-ui/<_..>").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
    .attach(db::Db::init())
    .register("/api", error::catchers())
}

pub fn api_routes() -> Vec<Route> {
  routes![
    authorize,
  ]
}

/// Authorizes a user to perform submission calls.
///
/// Takes the credential triple (user id, username, password) and
/// returns a JWT token if all three agree with the stored user row.
/// The token is valid for one hour and is presented as a bearer token
/// on the submission endpoints.
#[utoipa::path(
  post,
  path="/api/authorize",
  tag="authorization",
  responses(
    (status = 200, description = "A JWT token", body = ApiSuccessResponseBody<AuthResponse>),
    (status = 400, description = "Invalid credentials"),
  ),
)]
#[post("/authorize", data = "<params>")]
pub(crate) async fn authorize(params: Json<LoginDao>, mut db: Connection<db::Db>) -> Result<ApiSuccessResponse<AuthResponse>, ApiError> {
  let params = params.0;
  let jwt_token = create_jwt_for_credentials(params.user_id, &params.username, &params.password, &mut db)
    .await
    .map_err(|err| {
      match err {
        AuthError::InvalidCredentials => ApiError::bad_request().with_message(messages::INVALID_CREDENTIALS),
        err => ApiError::internal_server_error(err.to_string()),
      }
    })?;
  Ok(ApiSuccessResponse::new(AuthResponse { token: jwt_token }))
}
