
use crate::server::error::ApiError;
use crate::server::rules::RuleViolation;
use super::jwt::verify_token;

use rocket::request::{self, Request, FromRequest};

pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Rocket request guard carrying the verified identity of the
/// requesting user. Handlers that mutate ratings or feedback take
/// this guard as a parameter; the identity never lives in shared
/// state.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
  user_id: i32,
}

impl AuthenticatedUser {
  pub fn user_id(&self) -> i32 {
    self.user_id
  }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
  type Error = ApiError;

  async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, ApiError> {
    match authenticated_user_from_header(req.headers().get_one(AUTHORIZATION_HEADER)) {
      Err(err) => request::Outcome::Error((err.status(), err)),
      Ok(ok) => request::Outcome::Success(ok),
    }
  }
}

fn authenticated_user_from_header(header: Option<&str>) -> Result<AuthenticatedUser, ApiError> {
  let header = header.ok_or(RuleViolation::Unauthenticated)?;
  let (scheme, token) = header.split_once(' ').ok_or(RuleViolation::Unauthenticated)?;
  if !scheme.eq_ignore_ascii_case("bearer") {
    return Err(RuleViolation::Unauthenticated.into());
  }
  let user_id = verify_token(token.trim()).map_err(|_| RuleViolation::Unauthenticated)?;
  Ok(AuthenticatedUser { user_id })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::server::auth::jwt::{create_token, SECRET_KEY_ENV_VAR};

  use rocket::http::Status;

  fn install_test_secret() {
    // "gameshelf-test-secret" in base64.
    std::env::set_var(SECRET_KEY_ENV_VAR, "Z2FtZXNoZWxmLXRlc3Qtc2VjcmV0");
  }

  #[test]
  fn missing_header_is_unauthorized() {
    install_test_secret();
    let err = authenticated_user_from_header(None).unwrap_err();
    assert_eq!(err.status(), Status::Unauthorized);
  }

  #[test]
  fn non_bearer_scheme_is_unauthorized() {
    install_test_secret();
    let token = create_token(7).unwrap();
    let header = format!("Basic {token}");
    assert!(authenticated_user_from_header(Some(&header)).is_err());
  }

  #[test]
  fn bearer_token_yields_the_claimed_user() {
    install_test_secret();
    let token = create_token(7).unwrap();
    let header = format!("Bearer {token}");
    let user = authenticated_user_from_header(Some(&header)).unwrap();
    assert_eq!(user.user_id(), 7);
  }
}
