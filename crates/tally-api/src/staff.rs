//! Handlers for `/staff` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/staff` | Optional `?active_only=true` |
//! | `POST`   | `/staff` | Body: [`NewStaffUser`]; returns 201 + account |
//! | `GET`    | `/staff/:id` | Single account |
//! | `PATCH`  | `/staff/:id` | Body: [`StaffUpdate`] |
//! | `DELETE` | `/staff/:id` | Deactivates; accounts are never removed |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use tally_core::{
  staff::{NewStaffUser, StaffUpdate, StaffUser},
  store::ConductStore,
};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListParams {
  #[serde(default)]
  pub active_only: bool,
}

/// `GET /staff[?active_only=true]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<StaffUser>>, ApiError>
where
  S: ConductStore,
{
  let staff = store
    .list_staff(params.active_only)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(staff))
}

/// `POST /staff` — returns 201 + the stored account.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewStaffUser>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ConductStore,
{
  let staff = store
    .add_staff(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(staff)))
}

/// `GET /staff/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<StaffUser>, ApiError>
where
  S: ConductStore,
{
  let staff = store
    .get_staff(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("staff {id} not found")))?;
  Ok(Json(staff))
}

/// `PATCH /staff/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<StaffUpdate>,
) -> Result<Json<StaffUser>, ApiError>
where
  S: ConductStore,
{
  let staff = store
    .update_staff(id, body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("staff {id} not found")))?;
  Ok(Json(staff))
}

/// `DELETE /staff/:id` — deactivates the account and returns 204.
pub async fn deactivate<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: ConductStore,
{
  store
    .update_staff(id, StaffUpdate { active: Some(false), ..Default::default() })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("staff {id} not found")))?;
  Ok(StatusCode::NO_CONTENT)
}
