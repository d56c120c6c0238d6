//! Handlers for `/students` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/students` | Optional `class`, `active_only`, `min_points` |
//! | `POST`  | `/students` | Body: [`NewStudent`]; 422 on duplicate code |
//! | `POST`  | `/students/import` | Body: `[RosterRow]`; duplicates are skipped, not fatal |
//! | `GET`   | `/students/:id` | Single roster entry |
//! | `PATCH` | `/students/:id` | Body: [`StudentUpdate`]; never touches points |
//! | `POST`  | `/students/:id/reconcile` | Recompute and rewrite the cached point total |
//! | `GET`   | `/students/:id/summary` | Lifetime record counts |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tally_core::{
  ledger,
  report::{self, StudentSummary},
  roster::{self, RosterOutcome, RosterRow},
  store::{ConductStore, StudentFilter},
  student::{NewStudent, Student, StudentUpdate},
};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub class:       Option<String>,
  #[serde(default)]
  pub active_only: bool,
  pub min_points:  Option<i64>,
}

/// `GET /students[?class=...][&active_only=true][&min_points=N]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Student>>, ApiError>
where
  S: ConductStore,
{
  let students = store
    .list_students(&StudentFilter {
      class:       params.class,
      active_only: params.active_only,
      min_points:  params.min_points,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(students))
}

/// `POST /students` — returns 201 + the stored entry, 422 if the student
/// code is already taken.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewStudent>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ConductStore,
{
  let taken = store
    .get_student_by_code(&body.code)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .is_some();
  if taken {
    return Err(ApiError::Unprocessable(format!(
      "student code {:?} already exists",
      body.code
    )));
  }

  let student = store
    .add_student(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(student)))
}

/// `POST /students/import` — bulk roster upload; body is a JSON array of
/// validated rows. Returns the created/skipped split.
pub async fn import<S>(
  State(store): State<Arc<S>>,
  Json(rows): Json<Vec<RosterRow>>,
) -> Result<Json<RosterOutcome>, ApiError>
where
  S: ConductStore,
{
  let outcome = roster::import_roster(store.as_ref(), rows)
    .await
    .map_err(ApiError::from_core)?;
  Ok(Json(outcome))
}

/// `GET /students/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Student>, ApiError>
where
  S: ConductStore,
{
  let student = store
    .get_student(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("student {id} not found")))?;
  Ok(Json(student))
}

/// `PATCH /students/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<StudentUpdate>,
) -> Result<Json<Student>, ApiError>
where
  S: ConductStore,
{
  let student = store
    .update_student(id, body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("student {id} not found")))?;
  Ok(Json(student))
}

#[derive(Debug, Serialize)]
pub struct ReconcileOutcome {
  pub student_id: Uuid,
  pub total:      i64,
}

/// `POST /students/:id/reconcile` — recompute the point total from the
/// violation records and rewrite the cache.
pub async fn reconcile<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<ReconcileOutcome>, ApiError>
where
  S: ConductStore,
{
  let total = ledger::reconcile_point_total(store.as_ref(), id)
    .await
    .map_err(ApiError::from_core)?;
  Ok(Json(ReconcileOutcome { student_id: id, total }))
}

/// `GET /students/:id/summary`
pub async fn summary<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<StudentSummary>, ApiError>
where
  S: ConductStore,
{
  let summary = report::student_summary(store.as_ref(), id)
    .await
    .map_err(ApiError::from_core)?;
  Ok(Json(summary))
}
