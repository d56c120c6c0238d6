//! Handler for the class-report endpoint.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;
use tally_core::{
  report::{self, ClassReport},
  store::ConductStore,
};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct WindowParams {
  pub from: NaiveDate,
  pub to:   NaiveDate,
}

/// `GET /reports/class/:class?from=YYYY-MM-DD&to=YYYY-MM-DD`
pub async fn class_report<S>(
  State(store): State<Arc<S>>,
  Path(class): Path<String>,
  Query(params): Query<WindowParams>,
) -> Result<Json<ClassReport>, ApiError>
where
  S: ConductStore,
{
  if params.from > params.to {
    return Err(ApiError::Unprocessable(format!(
      "from {} is after to {}",
      params.from, params.to
    )));
  }

  let report =
    report::class_report(store.as_ref(), &class, params.from, params.to)
      .await
      .map_err(ApiError::from_core)?;
  Ok(Json(report))
}
