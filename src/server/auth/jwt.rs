
use serde::{Serialize, Deserialize};
use thiserror::Error;
use jsonwebtoken::{encode, decode, EncodingKey, DecodingKey, Validation, Header};

use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all="camelCase")]
pub struct JwtClaim {
  /// The id of the user being claimed.
  pub sub: i32,
  /// Expiration time, in seconds since the Unix epoch.
  pub exp: usize,
}

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum JwtError {
  #[error("{0}")]
  JsonWebTokenError(#[from] jsonwebtoken::errors::Error),
  #[error("Missing JWT_SECRET_KEY environment variable")]
  MissingJwtSecretKeyEnvVar,
}

pub const SECRET_KEY_ENV_VAR: &str = "JWT_SECRET_KEY";
pub const JWT_EXPIRATION_TIME: chrono::Duration = chrono::Duration::hours(1);

pub fn create_token(user_id: i32) -> Result<String, JwtError> {
  let claim = JwtClaim {
    sub: user_id,
    exp: (chrono::Utc::now() + JWT_EXPIRATION_TIME).timestamp() as usize,
  };
  let encoding_key = EncodingKey::from_base64_secret(&get_secret_key()?)?;
  let token = encode(
    &Header::default(),
    &claim,
    &encoding_key,
  )?;
  Ok(token)
}

pub fn verify_token(token_str: &str) -> Result<i32, JwtError> {
  let decoding_key = DecodingKey::from_base64_secret(&get_secret_key()?)?;
  let claims = decode::<JwtClaim>(
    token_str,
    &decoding_key,
    &Validation::default(),
  )?;
  Ok(claims.claims.sub)
}

fn get_secret_key() -> Result<String, JwtError> {
  env::var(SECRET_KEY_ENV_VAR)
    .map_err(|_| JwtError::MissingJwtSecretKeyEnvVar)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn install_test_secret() {
    // "gameshelf-test-secret" in base64.
    env::set_var(SECRET_KEY_ENV_VAR, "Z2FtZXNoZWxmLXRlc3Qtc2VjcmV0");
  }

  #[test]
  fn token_round_trips_to_the_same_user_id() {
    install_test_secret();
    let token = create_token(42).unwrap();
    assert_eq!(verify_token(&token).unwrap(), 42);
  }

  #[test]
  fn garbage_tokens_are_rejected() {
    install_test_secret();
    assert!(verify_token("not-a-jwt").is_err());
  }
}
