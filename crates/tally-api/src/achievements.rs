//! Handlers for `/achievements` endpoints.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use tally_core::{
  conduct::NewAchievement,
  store::{AchievementFilter, AchievementRow, ConductStore},
};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub student_id:  Option<Uuid>,
  pub recorded_by: Option<Uuid>,
  pub class:       Option<String>,
}

/// `GET /achievements[?student_id=...][&recorded_by=...][&class=...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<AchievementRow>>, ApiError>
where
  S: ConductStore,
{
  let rows = store
    .list_achievements(&AchievementFilter {
      student_id:  params.student_id,
      recorded_by: params.recorded_by,
      class:       params.class,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(rows))
}

/// `POST /achievements` — returns 201 + the stored record. The referenced
/// student must exist (404) and the author must be an active staff account
/// (422).
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewAchievement>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ConductStore,
{
  check_refs(store.as_ref(), body.student_id, body.recorded_by).await?;

  let achievement = store
    .add_achievement(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(achievement)))
}

/// Shared referential checks for record creation.
pub(crate) async fn check_refs<S>(
  store:       &S,
  student_id:  Uuid,
  recorded_by: Uuid,
) -> Result<(), ApiError>
where
  S: ConductStore,
{
  store
    .get_student(student_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| {
      ApiError::NotFound(format!("student {student_id} not found"))
    })?;

  let author = store
    .get_staff(recorded_by)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| {
      ApiError::Unprocessable(format!("staff {recorded_by} not found"))
    })?;
  if !author.active {
    return Err(ApiError::Unprocessable(format!(
      "staff {recorded_by} is deactivated"
    )));
  }
  Ok(())
}
