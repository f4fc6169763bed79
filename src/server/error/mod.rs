
pub mod messages;

use super::rules::RuleViolation;

use rocket::{Request, Catcher, catch, catchers};
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use utoipa::ToSchema;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
  Success,
  Error,
}

#[derive(Debug, Clone, Responder)]
pub struct ApiSuccessResponse<T> {
  json: Json<ApiSuccessResponseBody<T>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiSuccessResponseBody<T> {
  status: ApiStatus,
  #[serde(flatten)]
  body: T,
}

/// Rocket responder which responds using a JSON-like object
/// indicating what went wrong.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
  status: Status,
  message: String,
}

#[derive(Debug, Clone, Serialize)]
struct ErrorPayload {
  status: ApiStatus,
  reason: String,
}

impl<T: Serialize> ApiSuccessResponse<T> {
  pub fn new(body: T) -> ApiSuccessResponse<T> {
    let body = ApiSuccessResponseBody {
      status: ApiStatus::Success,
      body
    };
    ApiSuccessResponse {
      json: Json(body),
    }
  }
}

impl ApiError {
  pub fn bad_request() -> ApiError {
    ApiError {
      status: Status::BadRequest,
      message: messages::BAD_REQUEST.to_string(),
    }
  }

  pub fn unauthorized() -> ApiError {
    ApiError {
      status: Status::Unauthorized,
      message: messages::UNAUTHORIZED.to_string(),
    }
  }

  pub fn not_found() -> ApiError {
    ApiError {
      status: Status::NotFound,
      message: messages::NOT_FOUND.to_string(),
    }
  }

  pub fn conflict(message: &str) -> ApiError {
    ApiError {
      status: Status::Conflict,
      message: message.to_string(),
    }
  }

  /// A 500 Internal Server Error.
  ///
  /// This method takes [`Display`] rather than `str`, as we
  /// frequently pass error-like things to it. We can't take
  /// [`Error`](std::error::Error) since `anyhow` doesn't implement
  /// that.
  pub fn internal_server_error(message: impl Display) -> ApiError {
    ApiError {
      status: Status::InternalServerError,
      message: message.to_string(),
    }
  }

  pub fn status(&self) -> Status {
    self.status
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  pub fn with_message(mut self, message: impl Into<String>) -> Self {
    self.message = message.into();
    self
  }
}

impl ErrorPayload {
  pub fn new(message: String) -> ErrorPayload {
    ErrorPayload {
      status: ApiStatus::Error,
      reason: message,
    }
  }
}

impl<'r> Responder<'r, 'static> for ApiError {
  fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
    let payload = ErrorPayload::new(self.message);
    (self.status, Json(payload)).respond_to(req)
  }
}

/// Every rule violation surfaces as a typed HTTP failure. Duplicates
/// and range errors are client mistakes (400), missing referents are
/// 404, and a missing identity is 401.
impl From<RuleViolation> for ApiError {
  fn from(err: RuleViolation) -> ApiError {
    let status = match err {
      RuleViolation::NotFound(_) => Status::NotFound,
      RuleViolation::DuplicateSubmission => Status::BadRequest,
      RuleViolation::DuplicateUsername => Status::BadRequest,
      RuleViolation::OutOfRange => Status::BadRequest,
      RuleViolation::Unauthenticated => Status::Unauthorized,
    };
    ApiError {
      status,
      message: err.to_string(),
    }
  }
}

impl From<DieselError> for ApiError {
  fn from(err: DieselError) -> ApiError {
    if let DieselError::NotFound = err {
      ApiError::not_found()
    } else if let DieselError::DatabaseError(kind, info) = err {
      match kind {
        DatabaseErrorKind::UniqueViolation =>
          ApiError::conflict(&format!("Uniqueness error: {}", info.message())),
        DatabaseErrorKind::ForeignKeyViolation =>
          ApiError::bad_request().with_message(format!("Foreign key violation: {}", info.message())),
        _ =>
          ApiError::internal_server_error(messages::UNKNOWN_DB_ERROR),
      }
    } else {
      ApiError::internal_server_error(messages::UNKNOWN_DB_ERROR)
    }
  }
}

pub fn catchers() -> Vec<Catcher> {
  catchers![
    bad_request_catcher,
    unauthorized_catcher,
    not_found_catcher,
  ]
}

#[catch(400)]
pub fn bad_request_catcher(_: &Request) -> ApiError {
  ApiError::bad_request()
}

#[catch(401)]
pub fn unauthorized_catcher(_: &Request) -> ApiError {
  ApiError::unauthorized()
}

#[catch(404)]
pub fn not_found_catcher(_: &Request) -> ApiError {
  ApiError::not_found()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rule_violations_map_to_client_errors() {
    let err = ApiError::from(RuleViolation::NotFound(messages::GAME_NOT_FOUND));
    assert_eq!(err.status(), Status::NotFound);
    assert_eq!(err.message(), messages::GAME_NOT_FOUND);

    assert_eq!(ApiError::from(RuleViolation::DuplicateSubmission).status(), Status::BadRequest);
    assert_eq!(ApiError::from(RuleViolation::DuplicateUsername).status(), Status::BadRequest);
    assert_eq!(ApiError::from(RuleViolation::OutOfRange).status(), Status::BadRequest);
    assert_eq!(ApiError::from(RuleViolation::Unauthenticated).status(), Status::Unauthorized);
  }

  #[test]
  fn diesel_not_found_maps_to_404() {
    let err = ApiError::from(DieselError::NotFound);
    assert_eq!(err.status(), Status::NotFound);
  }

  #[test]
  fn diesel_unique_violation_maps_to_conflict() {
    let err = ApiError::from(DieselError::DatabaseError(
      DatabaseErrorKind::UniqueViolation,
      Box::new(String::from("duplicate key value violates unique constraint")),
    ));
    assert_eq!(err.status(), Status::Conflict);
  }

  #[test]
  fn success_envelope_flattens_the_body() {
    #[derive(Serialize, Clone, Debug)]
    struct Body {
      token: String,
    }
    let resp = ApiSuccessResponse::new(Body { token: String::from("abc") });
    let json = serde_json::to_value(&resp.json.0).unwrap();
    assert_eq!(json["status"], "success");
    assert_eq!(json["token"], "abc");
  }
}
