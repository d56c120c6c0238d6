//! Handlers for the dashboard and notification endpoints.
//!
//! Both take `?staff_id=` and scope their output through the visibility
//! policy for that account's role.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use tally_core::{
  engine::{self, DashboardData, Notification},
  store::ConductStore,
  visibility::Viewer,
};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ViewerParams {
  pub staff_id: Uuid,
}

async fn resolve_viewer<S>(store: &S, staff_id: Uuid) -> Result<Viewer, ApiError>
where
  S: ConductStore,
{
  let staff = store
    .get_staff(staff_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("staff {staff_id} not found")))?;
  if !staff.active {
    return Err(ApiError::Unprocessable(format!(
      "staff {staff_id} is deactivated"
    )));
  }
  Ok(Viewer::for_user(&staff))
}

/// `GET /dashboard?staff_id=<id>` — stats, recent activity, notifications.
pub async fn dashboard<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ViewerParams>,
) -> Result<Json<DashboardData>, ApiError>
where
  S: ConductStore,
{
  let viewer = resolve_viewer(store.as_ref(), params.staff_id).await?;
  let data = engine::dashboard(store.as_ref(), &viewer)
    .await
    .map_err(ApiError::from_core)?;
  Ok(Json(data))
}

/// `GET /notifications?staff_id=<id>` — just the notification list.
pub async fn notifications<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ViewerParams>,
) -> Result<Json<Vec<Notification>>, ApiError>
where
  S: ConductStore,
{
  let viewer = resolve_viewer(store.as_ref(), params.staff_id).await?;
  let notes = engine::notifications(store.as_ref(), &viewer)
    .await
    .map_err(ApiError::from_core)?;
  Ok(Json(notes))
}
