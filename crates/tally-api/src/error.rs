//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("unprocessable: {0}")]
  Unprocessable(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Map a core-layer error onto an HTTP status: `NotFound` → 404,
  /// validation failures → 422, everything else → 500.
  pub fn from_core<E>(err: tally_core::Error<E>) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    use tally_core::Error as Core;
    match err {
      Core::NotFound { entity, id } => {
        ApiError::NotFound(format!("{entity} {id} not found"))
      }
      Core::InactiveAuthor(id) => {
        ApiError::Unprocessable(format!("staff {id} is deactivated"))
      }
      Core::InvalidPoints(points) => {
        ApiError::Unprocessable(format!("points must be >= 1, got {points}"))
      }
      Core::EmptyClass(class) => {
        ApiError::NotFound(format!("no students in class {class:?}"))
      }
      err @ Core::PointTotalDrift { .. } => ApiError::Store(Box::new(err)),
      Core::Store(err) => ApiError::Store(Box::new(err)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Unprocessable(m) => {
        (StatusCode::UNPROCESSABLE_ENTITY, m.clone())
      }
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
