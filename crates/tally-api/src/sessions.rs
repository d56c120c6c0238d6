//! Handlers for `/counseling-sessions` endpoints.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use tally_core::{
  conduct::{CounselingSession, NewCounselingSession, SessionStatus, SessionUpdate},
  counseling,
  store::{ConductStore, SessionFilter, SessionRow},
};
use uuid::Uuid;

use crate::{achievements::check_refs, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub student_id:  Option<Uuid>,
  pub recorded_by: Option<Uuid>,
  pub class:       Option<String>,
  pub status:      Option<SessionStatus>,
}

/// `GET /counseling-sessions` with optional filters.
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<SessionRow>>, ApiError>
where
  S: ConductStore,
{
  let rows = store
    .list_sessions(&SessionFilter {
      student_id:  params.student_id,
      recorded_by: params.recorded_by,
      class:       params.class,
      status:      params.status,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(rows))
}

/// `POST /counseling-sessions` — returns 201 + the stored session.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewCounselingSession>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ConductStore,
{
  check_refs(store.as_ref(), body.student_id, body.recorded_by).await?;

  let session = store
    .add_session(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(session)))
}

/// `GET /counseling-sessions/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<CounselingSession>, ApiError>
where
  S: ConductStore,
{
  let session = store
    .get_session(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("session {id} not found")))?;
  Ok(Json(session))
}

/// `PATCH /counseling-sessions/:id` — body: [`SessionUpdate`]. Status
/// changes are logged by the core layer.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<SessionUpdate>,
) -> Result<Json<CounselingSession>, ApiError>
where
  S: ConductStore,
{
  let session = counseling::update_session(store.as_ref(), id, body)
    .await
    .map_err(ApiError::from_core)?;
  Ok(Json(session))
}
