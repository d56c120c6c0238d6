//! Handlers for `/violations` endpoints.
//!
//! `POST /violations` is the only write path; it goes through the ledger so
//! the record insert and the point-total increment commit as one unit.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tally_core::{
  conduct::Severity,
  ledger::{self, ViolationInput},
  store::{ConductStore, ViolationFilter, ViolationRow},
};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub student_id:    Option<Uuid>,
  pub recorded_by:   Option<Uuid>,
  pub class:         Option<String>,
  pub severity:      Option<Severity>,
  pub created_after: Option<DateTime<Utc>>,
}

/// `GET /violations` with optional filters.
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<ViolationRow>>, ApiError>
where
  S: ConductStore,
{
  let rows = store
    .list_violations(&ViolationFilter {
      student_id:    params.student_id,
      recorded_by:   params.recorded_by,
      class:         params.class,
      severity:      params.severity,
      created_after: params.created_after,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(rows))
}

/// JSON body accepted by `POST /violations`. `recorded_by` is supplied by
/// the auth collaborator upstream of this API.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub recorded_by: Uuid,
  #[serde(flatten)]
  pub input:       ViolationInput,
}

/// `POST /violations` — returns 201 + the stored record.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ConductStore,
{
  let violation =
    ledger::record_violation(store.as_ref(), body.input, body.recorded_by)
      .await
      .map_err(ApiError::from_core)?;
  Ok((StatusCode::CREATED, Json(violation)))
}
