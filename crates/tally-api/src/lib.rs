//! JSON REST API for Tally.
//!
//! Exposes an axum [`Router`] backed by any
//! [`tally_core::store::ConductStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility; handlers trust the `recorded_by` and
//! `staff_id` values the upstream auth collaborator supplies.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", tally_api::api_router(store.clone()))
//! ```

pub mod achievements;
pub mod dashboard;
pub mod error;
pub mod reports;
pub mod sessions;
pub mod staff;
pub mod students;
pub mod violations;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use tally_core::store::ConductStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ConductStore + 'static,
{
  Router::new()
    // Staff
    .route("/staff", get(staff::list::<S>).post(staff::create::<S>))
    .route(
      "/staff/{id}",
      get(staff::get_one::<S>)
        .patch(staff::update::<S>)
        .delete(staff::deactivate::<S>),
    )
    // Students
    .route("/students", get(students::list::<S>).post(students::create::<S>))
    .route("/students/import", post(students::import::<S>))
    .route(
      "/students/{id}",
      get(students::get_one::<S>).patch(students::update::<S>),
    )
    .route("/students/{id}/reconcile", post(students::reconcile::<S>))
    .route("/students/{id}/summary", get(students::summary::<S>))
    // Conduct records
    .route(
      "/achievements",
      get(achievements::list::<S>).post(achievements::create::<S>),
    )
    .route(
      "/violations",
      get(violations::list::<S>).post(violations::create::<S>),
    )
    .route(
      "/counseling-sessions",
      get(sessions::list::<S>).post(sessions::create::<S>),
    )
    .route(
      "/counseling-sessions/{id}",
      get(sessions::get_one::<S>).patch(sessions::update::<S>),
    )
    // Aggregation
    .route("/dashboard", get(dashboard::dashboard::<S>))
    .route("/notifications", get(dashboard::notifications::<S>))
    .route("/reports/class/{class}", get(reports::class_report::<S>))
    .with_state(store)
}

// ─── Integration tests ───────────────────────────────────────────────────────
